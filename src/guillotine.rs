use crate::config::EPSILON;
use crate::types::{FitStrategy, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeRect {
    pub x: f64,
    pub y: f64,
    pub rect: Rect,
}

/// A part positioned on the sheet by [`GuillotineSheet::place`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub rect: Rect,
    pub x: f64,
    pub y: f64,
    pub rotated: bool,
}

/// Free space of one stock sheet, carved by right/bottom guillotine splits.
#[derive(Debug, Clone)]
pub struct GuillotineSheet {
    kerf: f64,
    pub free_rects: Vec<FreeRect>,
}

#[derive(Debug, Clone, Copy)]
pub struct ScoredPlacement {
    pub free_idx: usize,
    pub rotated: bool,
    pub score: (f64, f64),
}

impl GuillotineSheet {
    pub fn new(stock: Rect, kerf: f64) -> Self {
        let mut free_rects = Vec::new();
        if stock.w > EPSILON && stock.h > EPSILON {
            free_rects.push(FreeRect {
                x: 0.0,
                y: 0.0,
                rect: stock,
            });
        }
        Self { kerf, free_rects }
    }

    /// Pick a free rectangle and orientation for `piece`, or `None` if it
    /// fits nowhere. The unrotated orientation is always tried first.
    pub fn find(
        &self,
        piece: Rect,
        allow_rotate: bool,
        strategy: FitStrategy,
    ) -> Option<ScoredPlacement> {
        let mut best: Option<ScoredPlacement> = None;

        for (idx, free) in self.free_rects.iter().enumerate() {
            let orientations = [(piece, false), (piece.rotated(), true)];
            let tries = if allow_rotate { 2 } else { 1 };

            for &(candidate, rotated) in &orientations[..tries] {
                if !candidate.fits_in(&free.rect, self.kerf) {
                    continue;
                }
                let scored = ScoredPlacement {
                    free_idx: idx,
                    rotated,
                    score: self.score(candidate, free.rect, strategy),
                };
                if strategy == FitStrategy::FirstFit {
                    return Some(scored);
                }
                if best.is_none_or(|b| Self::better(scored.score, b.score)) {
                    best = Some(scored);
                }
            }
        }

        best
    }

    fn score(&self, piece: Rect, free: Rect, strategy: FitStrategy) -> (f64, f64) {
        // Flush edges take no kerf, so leftovers never go below zero.
        let leftover_w = (free.w - piece.w - self.kerf).max(0.0);
        let leftover_h = (free.h - piece.h - self.kerf).max(0.0);
        let short = leftover_w.min(leftover_h);
        let long = leftover_w.max(leftover_h);
        match strategy {
            FitStrategy::FirstFit => (0.0, 0.0),
            FitStrategy::BestAreaFit => (free.area() - piece.area(), short),
            FitStrategy::BestShortSideFit => (short, long),
            FitStrategy::BestLongSideFit => (long, short),
        }
    }

    // Strictly lower wins, so earlier candidates keep ties.
    fn better(a: (f64, f64), b: (f64, f64)) -> bool {
        if a.0 < b.0 - EPSILON {
            return true;
        }
        (a.0 - b.0).abs() <= EPSILON && a.1 < b.1 - EPSILON
    }

    pub fn place(&mut self, scored: ScoredPlacement, piece: Rect) -> Placement {
        let free = self.free_rects.remove(scored.free_idx);
        let placed = if scored.rotated {
            piece.rotated()
        } else {
            piece
        };

        self.split(free, placed);

        Placement {
            rect: placed,
            x: free.x,
            y: free.y,
            rotated: scored.rotated,
        }
    }

    /// Vertical cut along the part's right edge first, then a horizontal cut
    /// under the part. Each cut consumes `kerf`.
    fn split(&mut self, free: FreeRect, placed: Rect) {
        let right_w = free.rect.w - placed.w - self.kerf;
        if right_w > EPSILON {
            self.free_rects.push(FreeRect {
                x: free.x + placed.w + self.kerf,
                y: free.y,
                rect: Rect::new(right_w, free.rect.h),
            });
        }

        let bottom_h = free.rect.h - placed.h - self.kerf;
        if bottom_h > EPSILON && placed.w > EPSILON {
            self.free_rects.push(FreeRect {
                x: free.x,
                y: free.y + placed.h + self.kerf,
                rect: Rect::new(placed.w, bottom_h),
            });
        }
    }

    pub fn free_area(&self) -> f64 {
        self.free_rects.iter().map(|f| f.rect.area()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_single_piece() {
        let mut sheet = GuillotineSheet::new(Rect::new(100.0, 100.0), 0.0);
        let piece = Rect::new(50.0, 30.0);
        let scored = sheet.find(piece, false, FitStrategy::FirstFit).unwrap();
        let p = sheet.place(scored, piece);
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, 0.0);
        assert_eq!(p.rect, piece);
        assert!(!p.rotated);

        // Right remainder spans full height, bottom remainder spans part width.
        assert_eq!(
            sheet.free_rects,
            vec![
                FreeRect {
                    x: 50.0,
                    y: 0.0,
                    rect: Rect::new(50.0, 100.0),
                },
                FreeRect {
                    x: 0.0,
                    y: 30.0,
                    rect: Rect::new(50.0, 70.0),
                },
            ]
        );
    }

    #[test]
    fn test_piece_too_large() {
        let sheet = GuillotineSheet::new(Rect::new(100.0, 100.0), 0.0);
        let piece = Rect::new(200.0, 50.0);
        assert!(sheet.find(piece, true, FitStrategy::FirstFit).is_none());
    }

    #[test]
    fn test_rotation_fit() {
        let sheet = GuillotineSheet::new(Rect::new(100.0, 50.0), 0.0);
        let piece = Rect::new(50.0, 100.0);
        // Doesn't fit without rotation
        assert!(sheet.find(piece, false, FitStrategy::FirstFit).is_none());
        // Fits with rotation
        let scored = sheet.find(piece, true, FitStrategy::FirstFit).unwrap();
        assert!(scored.rotated);
    }

    #[test]
    fn test_unrotated_preferred() {
        let sheet = GuillotineSheet::new(Rect::new(100.0, 100.0), 0.0);
        let scored = sheet
            .find(Rect::new(20.0, 40.0), true, FitStrategy::FirstFit)
            .unwrap();
        assert!(!scored.rotated);
    }

    #[test]
    fn test_kerf() {
        let mut sheet = GuillotineSheet::new(Rect::new(100.0, 100.0), 5.0);
        let piece = Rect::new(50.0, 60.0);
        let scored = sheet.find(piece, false, FitStrategy::FirstFit).unwrap();
        sheet.place(scored, piece);
        // Remaining width should be 100 - 50 - 5 = 45, starting past the cut
        let right = sheet.free_rects[0];
        assert_eq!(right.x, 55.0);
        assert_eq!(right.rect.w, 45.0);
        let bottom = sheet.free_rects[1];
        assert_eq!(bottom.y, 65.0);
        assert_eq!(bottom.rect.h, 35.0);
    }

    #[test]
    fn test_exact_fit_with_kerf() {
        let mut sheet = GuillotineSheet::new(Rect::new(100.0, 100.0), 0.125);
        let piece = Rect::new(100.0, 100.0);
        let scored = sheet.find(piece, true, FitStrategy::FirstFit).unwrap();
        assert!(!scored.rotated);
        sheet.place(scored, piece);
        assert!(sheet.free_rects.is_empty());
    }

    #[test]
    fn test_kerf_rejects_near_flush() {
        let sheet = GuillotineSheet::new(Rect::new(100.0, 100.0), 0.125);
        // 0.05 of trim is thinner than the blade.
        let piece = Rect::new(99.95, 40.0);
        assert!(sheet.find(piece, false, FitStrategy::FirstFit).is_none());
        // Exactly one kerf of trim is cuttable.
        let piece = Rect::new(99.875, 40.0);
        assert!(sheet.find(piece, false, FitStrategy::FirstFit).is_some());
    }

    #[test]
    fn test_bottom_leftover_takes_same_width() {
        let mut sheet = GuillotineSheet::new(Rect::new(48.0, 96.0), 0.125);
        let piece = Rect::new(12.0, 12.0);
        let scored = sheet.find(piece, false, FitStrategy::FirstFit).unwrap();
        sheet.place(scored, piece);
        // Pool: right 35.875x96 at (12.125,0), bottom 12x83.875 at (0,12.125).
        let bottom = sheet.free_rects[1];
        assert_eq!((bottom.x, bottom.y), (0.0, 12.125));
        assert_eq!(bottom.rect, Rect::new(12.0, 83.875));

        let scored = ScoredPlacement {
            free_idx: 1,
            rotated: false,
            score: (0.0, 0.0),
        };
        assert!(piece.fits_in(&bottom.rect, 0.125));
        let p = sheet.place(scored, piece);
        assert_eq!((p.x, p.y), (0.0, 12.125));
        // Flush on the right: no right remainder, only the strip below.
        assert_eq!(
            sheet.free_rects.last().copied(),
            Some(FreeRect {
                x: 0.0,
                y: 24.25,
                rect: Rect::new(12.0, 71.75),
            })
        );
        assert_eq!(sheet.free_rects.len(), 2);
    }

    #[test]
    fn test_fill_exact() {
        let mut sheet = GuillotineSheet::new(Rect::new(100.0, 100.0), 0.0);
        let piece = Rect::new(100.0, 100.0);
        let scored = sheet.find(piece, false, FitStrategy::FirstFit).unwrap();
        sheet.place(scored, piece);
        assert!(sheet.free_rects.is_empty());
    }

    #[test]
    fn test_first_fit_uses_pool_order() {
        let mut sheet = GuillotineSheet::new(Rect::new(100.0, 100.0), 0.0);
        let first = Rect::new(60.0, 90.0);
        let scored = sheet.find(first, false, FitStrategy::FirstFit).unwrap();
        sheet.place(scored, first);
        // Pool: right 40x100 at (60,0), bottom 60x10 at (0,90).
        let small = Rect::new(10.0, 10.0);
        let scored = sheet.find(small, false, FitStrategy::FirstFit).unwrap();
        assert_eq!(scored.free_idx, 0);
    }

    #[test]
    fn test_best_area_fit_picks_tightest() {
        let mut sheet = GuillotineSheet::new(Rect::new(100.0, 100.0), 0.0);
        let first = Rect::new(60.0, 90.0);
        let scored = sheet.find(first, false, FitStrategy::FirstFit).unwrap();
        sheet.place(scored, first);
        let small = Rect::new(10.0, 10.0);
        let scored = sheet.find(small, false, FitStrategy::BestAreaFit).unwrap();
        assert_eq!(scored.free_idx, 1);
    }

    #[test]
    fn test_zero_area_stock_has_no_free_space() {
        let sheet = GuillotineSheet::new(Rect::new(0.0, 50.0), 0.0);
        assert!(sheet.free_rects.is_empty());
        assert_eq!(sheet.free_area(), 0.0);
    }
}
