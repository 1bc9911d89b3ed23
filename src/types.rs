use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_KERF, DEFAULT_MAX_INSTANCES, DEFAULT_MIN_OFFCUT_SIZE, EPSILON};

/// Width and height of a rectangle, in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    pub fn rotated(&self) -> Self {
        Self {
            w: self.h,
            h: self.w,
        }
    }

    /// True when this rectangle fits inside `other` with `kerf` clearance on
    /// each trailing edge that needs a cut. An edge flush with the far side of
    /// `other` needs no cut and takes no clearance.
    pub fn fits_in(&self, other: &Rect, kerf: f64) -> bool {
        axis_fits(self.w, other.w, kerf) && axis_fits(self.h, other.h, kerf)
    }
}

fn axis_fits(len: f64, room: f64, kerf: f64) -> bool {
    len + kerf <= room + EPSILON || (room - len).abs() <= EPSILON
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// Grain constraint of a part relative to the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrainDirection {
    Horizontal,
    Vertical,
    #[default]
    None,
}

impl GrainDirection {
    pub fn allows_rotation(self) -> bool {
        self == GrainDirection::None
    }
}

impl std::str::FromStr for GrainDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" | "h" => Ok(GrainDirection::Horizontal),
            "vertical" | "v" => Ok(GrainDirection::Vertical),
            "none" | "" => Ok(GrainDirection::None),
            _ => Err(format!(
                "invalid grain direction '{}', expected: horizontal, vertical, or none",
                s
            )),
        }
    }
}

/// A rectangular piece that needs to be cut, `quantity` times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub quantity: u32,
    #[serde(default)]
    pub grain_direction: GrainDirection,
}

impl Part {
    pub fn new(id: impl Into<String>, width: f64, height: f64, quantity: u32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            width,
            height,
            quantity,
            grain_direction: GrainDirection::None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_grain(mut self, grain: GrainDirection) -> Self {
        self.grain_direction = grain;
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.width, self.height)
    }
}

/// The sheet being cut from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockPanel {
    pub width: f64,
    pub height: f64,
}

impl StockPanel {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedPart {
    pub part_id: String,
    pub name: String,
    pub instance_id: String,
    pub x: f64,
    pub y: f64,
    /// Placed width, after rotation.
    pub width: f64,
    /// Placed height, after rotation.
    pub height: f64,
    pub rotated: bool,
}

impl PlacedPart {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Interior overlap test; shared edges do not count.
    pub fn overlaps(&self, other: &PlacedPart) -> bool {
        self.x < other.right() - EPSILON
            && other.x < self.right() - EPSILON
            && self.y < other.bottom() - EPSILON
            && other.y < self.bottom() - EPSILON
    }
}

/// An instance that fit in no free rectangle in any allowed orientation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnplacedPart {
    pub part_id: String,
    pub name: String,
    pub instance_id: String,
    pub width: f64,
    pub height: f64,
}

/// A leftover region of the sheet large enough to be reused.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Offcut {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Offcut {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CutLayout {
    pub stock: StockPanel,
    pub kerf: f64,
    pub placed_parts: Vec<PlacedPart>,
    pub unplaced_parts: Vec<UnplacedPart>,
    pub waste_percentage: f64,
    pub total_area_used: f64,
    pub total_area_available: f64,
    pub offcuts: Vec<Offcut>,
}

impl CutLayout {
    /// Number of part instances the run attempted to place.
    pub fn requested_count(&self) -> usize {
        self.placed_parts.len() + self.unplaced_parts.len()
    }

    pub fn is_complete(&self) -> bool {
        self.unplaced_parts.is_empty()
    }
}

/// How a free rectangle is chosen for each part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitStrategy {
    /// First free rectangle in pool order that admits the part.
    #[default]
    FirstFit,
    /// Smallest leftover area, then smallest leftover short side.
    BestAreaFit,
    BestShortSideFit,
    BestLongSideFit,
}

impl std::str::FromStr for FitStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first-fit" => Ok(FitStrategy::FirstFit),
            "best-area" | "best-area-fit" => Ok(FitStrategy::BestAreaFit),
            "best-short-side" | "best-short-side-fit" => Ok(FitStrategy::BestShortSideFit),
            "best-long-side" | "best-long-side-fit" => Ok(FitStrategy::BestLongSideFit),
            _ => Err(format!(
                "invalid strategy '{}', expected: first-fit, best-area, best-short-side, or best-long-side",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptimizerConfig {
    pub kerf: f64,
    pub strategy: FitStrategy,
    pub min_offcut_size: f64,
    pub max_instances: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            kerf: DEFAULT_KERF,
            strategy: FitStrategy::FirstFit,
            min_offcut_size: DEFAULT_MIN_OFFCUT_SIZE,
            max_instances: DEFAULT_MAX_INSTANCES,
        }
    }
}
