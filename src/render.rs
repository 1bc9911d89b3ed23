use crate::types::{CutLayout, PlacedPart};

const MAX_WIDTH: f64 = 80.0;
const MAX_HEIGHT: f64 = 40.0;

/// Draw the sheet and its placed parts as ASCII art, labelled with part names.
pub fn render_layout(layout: &CutLayout) -> String {
    let stock = layout.stock;
    if stock.width <= 0.0 || stock.height <= 0.0 {
        return String::new();
    }
    let scale = f64::min(MAX_WIDTH / stock.width, MAX_HEIGHT / stock.height);
    let grid_w = (stock.width * scale).round() as usize;
    let grid_h = (stock.height * scale).round() as usize;

    if grid_w == 0 || grid_h == 0 {
        return String::new();
    }

    let mut grid = vec![vec![' '; grid_w + 1]; grid_h + 1];

    // Draw stock border first
    draw_rect(&mut grid, 0, 0, grid_w, grid_h);

    for p in &layout.placed_parts {
        let sx = (p.x * scale).round() as usize;
        let sy = (p.y * scale).round() as usize;
        let sw = (p.width * scale).round() as usize;
        let sh = (p.height * scale).round() as usize;

        if sw == 0 || sh == 0 {
            continue;
        }

        draw_rect(&mut grid, sx, sy, sw, sh);

        let label_chars: Vec<char> = label(p).chars().collect();
        if sw > 2 {
            let cx = sx + sw / 2;
            let cy = sy + sh / 2;
            let half = label_chars.len() / 2;
            let start_x = cx.saturating_sub(half);

            for (i, &ch) in label_chars.iter().enumerate() {
                let x = start_x + i;
                if x > sx && x < sx + sw && cy > sy && cy < sy + sh {
                    grid[cy][x] = ch;
                }
            }
        }
    }

    let mut result = String::new();
    for row in &grid {
        let line: String = row.iter().collect();
        result.push_str(line.trim_end());
        result.push('\n');
    }
    result
}

fn label(p: &PlacedPart) -> String {
    let name = if p.name.is_empty() { &p.part_id } else { &p.name };
    if p.rotated {
        format!("{name}*")
    } else {
        name.clone()
    }
}

#[allow(clippy::needless_range_loop)]
fn draw_rect(grid: &mut [Vec<char>], x: usize, y: usize, w: usize, h: usize) {
    let rows = grid.len();
    let cols = if rows > 0 { grid[0].len() } else { return };

    // Horizontal edges
    for i in x..=x + w {
        if i < cols {
            for row in [y, y + h] {
                if row < rows {
                    grid[row][i] = if grid[row][i] == '|' || grid[row][i] == '+' {
                        '+'
                    } else {
                        '-'
                    };
                }
            }
        }
    }

    // Vertical edges
    for j in y..=y + h {
        if j < rows {
            for col in [x, x + w] {
                if col < cols {
                    grid[j][col] = if grid[j][col] == '-' || grid[j][col] == '+' {
                        '+'
                    } else {
                        '|'
                    };
                }
            }
        }
    }

    // Corners
    for &cx in &[x, x + w] {
        for &cy in &[y, y + h] {
            if cy < rows && cx < cols {
                grid[cy][cx] = '+';
            }
        }
    }
}

/// Format a length in inches as feet and inches, e.g. `52.0` -> `4' 4"`.
///
/// Whole feet drop the inch part (`48.0` -> `4'`) and lengths under a foot
/// drop the feet (`6.0` -> `6"`). Fractional inches keep up to three decimals.
pub fn format_dimension(inches: f64) -> String {
    if !inches.is_finite() {
        return format!("{inches}\"");
    }
    if inches < 0.0 {
        return format!("-{}", format_dimension(-inches));
    }

    // Round first so 47.9999 becomes 4' rather than 3' 12".
    let thousandths = (inches * 1000.0).round() as u64;
    let feet = thousandths / 12_000;
    let rest = (thousandths % 12_000) as f64 / 1000.0;

    match (feet, rest == 0.0) {
        (0, _) => format!("{rest}\""),
        (_, true) => format!("{feet}'"),
        _ => format!("{feet}' {rest}\""),
    }
}
