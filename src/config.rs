//! Defaults and tolerances for the optimizer.

/// Saw blade width in inches (1/8", a common table-saw blade).
pub const DEFAULT_KERF: f64 = 0.125;

/// Floating-point comparison tolerance for fits and pruning.
pub const EPSILON: f64 = 1e-9;

/// Smallest side, in inches, for a leftover rectangle to be reported as an offcut.
pub const DEFAULT_MIN_OFFCUT_SIZE: f64 = 1.0;

/// Upper bound on expanded part instances per run.
pub const DEFAULT_MAX_INSTANCES: usize = 10_000;
