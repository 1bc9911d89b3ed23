//! Single-sheet rectangular cut-list optimizer.
//!
//! Packs parts onto one stock panel with a greedy guillotine heuristic that
//! accounts for saw kerf and per-part grain direction.
//!
//! ```
//! use cutlist::{optimize, Part, StockPanel};
//!
//! let layout = optimize(StockPanel::new(48.0, 96.0), &[Part::new("shelf", 12.0, 12.0, 4)], 0.125)?;
//! assert_eq!(layout.placed_parts.len(), 4);
//! # Ok::<(), cutlist::OptimizeError>(())
//! ```

pub mod config;
pub mod error;
pub mod guillotine;
pub mod render;
pub mod solver;
pub mod types;

pub use error::{OptimizeError, Result};
pub use render::{format_dimension, render_layout};
pub use solver::{Optimizer, calculate_waste_area, optimize, optimize_default};
pub use types::{
    CutLayout, FitStrategy, GrainDirection, Offcut, OptimizerConfig, Part, PlacedPart,
    StockPanel, UnplacedPart,
};
