use clap::Parser;
use cutlist::config::{DEFAULT_KERF, DEFAULT_MIN_OFFCUT_SIZE};
use cutlist::types::{FitStrategy, GrainDirection, OptimizerConfig, Part, StockPanel};
use cutlist::{Optimizer, calculate_waste_area, format_dimension, render_layout};
use tracing::Level;

#[derive(Parser)]
#[command(name = "cutlist", about = "Single-sheet rectangular cut-list optimizer")]
struct Cli {
    /// Stock sheet dimensions in inches (WxH, e.g. 48x96)
    #[arg(long)]
    stock: String,

    /// Parts as name:WxH:qty[:grain] (e.g. shelf:22.5x11:4 side:23.25x34.5:2:vertical)
    #[arg(long = "parts", num_args = 1..)]
    parts: Vec<String>,

    /// Blade kerf width in inches
    #[arg(long, default_value_t = DEFAULT_KERF)]
    kerf: f64,

    /// Placement strategy: first-fit, best-area, best-short-side, or best-long-side
    #[arg(long, default_value = "first-fit")]
    strategy: FitStrategy,

    /// Smallest side of a leftover piece reported as an offcut
    #[arg(long, default_value_t = DEFAULT_MIN_OFFCUT_SIZE)]
    min_offcut: f64,

    /// Show ASCII layout of the sheet
    #[arg(long)]
    layout: bool,

    /// Print the layout as JSON
    #[arg(long)]
    json: bool,

    /// Log each placement
    #[arg(short, long)]
    verbose: bool,
}

fn parse_dimensions(s: &str) -> Result<(f64, f64), String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(format!("invalid dimensions '{}', expected WxH", s));
    }
    let width = parts[0]
        .parse::<f64>()
        .map_err(|_| format!("invalid width in '{}'", s))?;
    let height = parts[1]
        .parse::<f64>()
        .map_err(|_| format!("invalid height in '{}'", s))?;
    Ok((width, height))
}

fn parse_part(s: &str) -> Result<Part, String> {
    let fields: Vec<&str> = s.split(':').collect();
    if fields.len() != 3 && fields.len() != 4 {
        return Err(format!("invalid part '{}', expected name:WxH:qty[:grain]", s));
    }
    let (width, height) = parse_dimensions(fields[1])?;
    let qty = fields[2]
        .parse::<u32>()
        .map_err(|_| format!("invalid quantity in '{}'", s))?;
    let grain = match fields.get(3) {
        Some(g) => g.parse::<GrainDirection>()?,
        None => GrainDirection::None,
    };
    Ok(Part::new(fields[0], width, height, qty).with_grain(grain))
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let (width, height) = parse_dimensions(&cli.stock).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let stock = StockPanel::new(width, height);

    let parts: Vec<Part> = cli
        .parts
        .iter()
        .map(|p| parse_part(p))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    let optimizer = Optimizer::new(OptimizerConfig {
        kerf: cli.kerf,
        strategy: cli.strategy,
        min_offcut_size: cli.min_offcut,
        ..OptimizerConfig::default()
    });
    let layout = optimizer.optimize(stock, &parts).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if cli.json {
        match serde_json::to_string_pretty(&layout) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!(
        "Stock {} x {}:",
        format_dimension(stock.width),
        format_dimension(stock.height)
    );
    for p in &layout.placed_parts {
        let rot = if p.rotated { " [rotated]" } else { "" };
        println!(
            "  {:<16} {}x{} @ ({}, {}){}",
            p.instance_id, p.width, p.height, p.x, p.y, rot
        );
    }
    if cli.layout {
        print!("{}", render_layout(&layout));
    }
    if !layout.offcuts.is_empty() {
        println!("Offcuts:");
        for o in &layout.offcuts {
            println!(
                "  {} x {} @ ({}, {})",
                format_dimension(o.width),
                format_dimension(o.height),
                o.x,
                o.y
            );
        }
    }
    println!();

    println!(
        "Summary: {} of {} part{} placed, {:.1}% waste ({:.1} sq in)",
        layout.placed_parts.len(),
        layout.requested_count(),
        if layout.requested_count() == 1 { "" } else { "s" },
        layout.waste_percentage,
        calculate_waste_area(&layout),
    );
    if !layout.is_complete() {
        eprintln!(
            "Warning: {} part{} did not fit; use a larger sheet or multiple sheets",
            layout.unplaced_parts.len(),
            if layout.unplaced_parts.len() == 1 { "" } else { "s" },
        );
        for u in &layout.unplaced_parts {
            eprintln!("  {} {}x{}", u.instance_id, u.width, u.height);
        }
    }
}
