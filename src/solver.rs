use crate::config::DEFAULT_KERF;
use crate::error::{OptimizeError, Result};
use crate::guillotine::GuillotineSheet;
use crate::types::{
    CutLayout, Offcut, OptimizerConfig, Part, PlacedPart, Rect, StockPanel, UnplacedPart,
};

/// One physical copy of a [`Part`], alive for a single run.
#[derive(Debug, Clone)]
struct PartInstance<'a> {
    part: &'a Part,
    instance_id: String,
}

impl PartInstance<'_> {
    fn rect(&self) -> Rect {
        self.part.rect()
    }
}

/// Greedy single-sheet cut-list optimizer.
///
/// Parts are expanded into instances, sorted largest first and placed one by
/// one into the free rectangles of a [`GuillotineSheet`]. Nothing is ever
/// revisited, so identical input always yields an identical layout.
pub struct Optimizer {
    config: OptimizerConfig,
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new(OptimizerConfig::default())
    }
}

impl Optimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn optimize(&self, stock: StockPanel, parts: &[Part]) -> Result<CutLayout> {
        self.validate(stock, parts)?;

        let kerf = self.config.kerf;
        let instances = Self::expand_parts(parts);
        let mut sheet = GuillotineSheet::new(stock.rect(), kerf);
        let mut placed_parts = Vec::with_capacity(instances.len());
        let mut unplaced_parts = Vec::new();

        for instance in &instances {
            let piece = instance.rect();
            let allow_rotate = instance.part.grain_direction.allows_rotation();

            match sheet.find(piece, allow_rotate, self.config.strategy) {
                Some(scored) => {
                    let p = sheet.place(scored, piece);
                    tracing::debug!(
                        instance = %instance.instance_id,
                        x = p.x,
                        y = p.y,
                        rotated = p.rotated,
                        "placed {}",
                        p.rect
                    );
                    placed_parts.push(PlacedPart {
                        part_id: instance.part.id.clone(),
                        name: instance.part.name.clone(),
                        instance_id: instance.instance_id.clone(),
                        x: p.x,
                        y: p.y,
                        width: p.rect.w,
                        height: p.rect.h,
                        rotated: p.rotated,
                    });
                }
                None => {
                    tracing::warn!(
                        instance = %instance.instance_id,
                        "part {} does not fit on stock {}",
                        piece,
                        stock.rect()
                    );
                    unplaced_parts.push(UnplacedPart {
                        part_id: instance.part.id.clone(),
                        name: instance.part.name.clone(),
                        instance_id: instance.instance_id.clone(),
                        width: piece.w,
                        height: piece.h,
                    });
                }
            }
        }

        let total_area_used: f64 = placed_parts.iter().map(PlacedPart::area).sum();
        let total_area_available = stock.area();
        let waste_percentage = if total_area_available > 0.0 {
            (total_area_available - total_area_used) / total_area_available * 100.0
        } else {
            0.0
        };

        let min = self.config.min_offcut_size;
        let offcuts = sheet
            .free_rects
            .iter()
            .filter(|f| f.rect.w >= min && f.rect.h >= min)
            .map(|f| Offcut {
                x: f.x,
                y: f.y,
                width: f.rect.w,
                height: f.rect.h,
            })
            .collect();

        tracing::info!(
            placed = placed_parts.len(),
            unplaced = unplaced_parts.len(),
            free_area = sheet.free_area(),
            "optimized {} instances, {:.1}% waste",
            instances.len(),
            waste_percentage
        );

        Ok(CutLayout {
            stock,
            kerf,
            placed_parts,
            unplaced_parts,
            waste_percentage,
            total_area_used,
            total_area_available,
            offcuts,
        })
    }

    fn validate(&self, stock: StockPanel, parts: &[Part]) -> Result<()> {
        if !is_positive(stock.width) || !is_positive(stock.height) {
            return Err(OptimizeError::InvalidStock {
                width: stock.width,
                height: stock.height,
            });
        }

        let kerf = self.config.kerf;
        if !kerf.is_finite() || kerf < 0.0 {
            return Err(OptimizeError::InvalidKerf { kerf });
        }

        let min_offcut_size = self.config.min_offcut_size;
        if !min_offcut_size.is_finite() || min_offcut_size < 0.0 {
            return Err(OptimizeError::InvalidMinOffcutSize { min_offcut_size });
        }

        let mut count: u64 = 0;
        for part in parts {
            if !is_positive(part.width) {
                return Err(OptimizeError::invalid_part(
                    &part.id,
                    "width",
                    part.width,
                    "must be a positive number",
                ));
            }
            if !is_positive(part.height) {
                return Err(OptimizeError::invalid_part(
                    &part.id,
                    "height",
                    part.height,
                    "must be a positive number",
                ));
            }
            if part.quantity == 0 {
                return Err(OptimizeError::invalid_part(
                    &part.id,
                    "quantity",
                    part.quantity,
                    "must be at least 1",
                ));
            }
            count += u64::from(part.quantity);
        }

        if count > self.config.max_instances as u64 {
            return Err(OptimizeError::TooManyInstances {
                count,
                limit: self.config.max_instances,
            });
        }
        Ok(())
    }

    fn expand_parts(parts: &[Part]) -> Vec<PartInstance<'_>> {
        let mut instances = Vec::new();
        for part in parts {
            for n in 1..=part.quantity {
                instances.push(PartInstance {
                    part,
                    instance_id: format!("{}#{}", part.id, n),
                });
            }
        }
        // Stable: equal areas keep input order.
        instances.sort_by(|a, b| b.rect().area().total_cmp(&a.rect().area()));
        instances
    }
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Pack `parts` onto `stock` with first-fit placement and the given blade `kerf`.
pub fn optimize(stock: StockPanel, parts: &[Part], kerf: f64) -> Result<CutLayout> {
    Optimizer::new(OptimizerConfig {
        kerf,
        ..OptimizerConfig::default()
    })
    .optimize(stock, parts)
}

/// [`optimize`] with the default 1/8" kerf.
pub fn optimize_default(stock: StockPanel, parts: &[Part]) -> Result<CutLayout> {
    optimize(stock, parts, DEFAULT_KERF)
}

/// Stock area not covered by placed parts.
pub fn calculate_waste_area(layout: &CutLayout) -> f64 {
    layout.total_area_available - layout.total_area_used
}
