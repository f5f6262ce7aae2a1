use fragnet_core::{Cell, Error, Result};

use crate::CostSearch;
use crate::heap::SearchNode;
use crate::patch::Extent;
use crate::search::UNREACHABLE;
use crate::traits::AstarPather;

impl CostSearch {
    /// Least accumulated cost of a path from any cell of `sources` to any
    /// cell of `targets`, using A*.
    ///
    /// Every traversable source starts at cost 0. Returns [`UNREACHABLE`]
    /// if no target can be reached (including when either set has no
    /// traversable cell). Ties in `f` are expanded in row-major cell order,
    /// so repeated runs are reproducible.
    pub fn cost_distance<P: AstarPather>(
        &mut self,
        pather: &P,
        sources: &[Cell],
        targets: &[Cell],
    ) -> Result<f64> {
        let bounds = self.bounds;
        let cur_gen = self.next_generation();
        self.last_expansions = 0;

        // Mark enterable target cells.
        let mut goal: Option<Extent> = None;
        for &t in targets {
            let Some(ti) = bounds.index(t) else {
                continue;
            };
            if !pather.passable(t) {
                continue;
            }
            self.nodes[ti].target = cur_gen;
            match goal.as_mut() {
                Some(ext) => ext.include(t),
                None => goal = Some(Extent::of(t)),
            }
        }
        let Some(goal) = goal else {
            return Ok(UNREACHABLE);
        };

        // Seed sources; blocked cells are never expanded.
        for &s in sources {
            let Some(si) = bounds.index(s) else {
                continue;
            };
            if !pather.passable(s) {
                continue;
            }
            let n = &mut self.nodes[si];
            if n.generation == cur_gen {
                continue;
            }
            n.generation = cur_gen;
            n.g = 0.0;
            self.open.insert(SearchNode {
                idx: si,
                g: 0.0,
                f: pather.estimate(s, &goal),
            });
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let result = 'search: loop {
            if self.open.is_empty() {
                break 'search Ok(UNREACHABLE);
            }
            let current = match self.open.extract_min() {
                Ok(n) => n,
                Err(e) => break 'search Err(e),
            };
            let ci = current.idx;

            if self.nodes[ci].target == cur_gen {
                break 'search Ok(current.g);
            }

            self.last_expansions += 1;
            if let Some(limit) = self.max_expansions {
                if self.last_expansions > limit {
                    log::warn!("cost search gave up after {limit} expansions");
                    break 'search Err(Error::SearchLimitExceeded { limit });
                }
            }

            let cp = bounds.cell(ci);
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = bounds.index(np) else {
                    continue;
                };
                let tentative = current.g + pather.cost(cp, np);

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    // Already reached this generation.
                    if tentative >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                }

                n.g = tentative;
                let f = tentative + pather.estimate(np, &goal);
                match self.open.slot(ni) {
                    Some(slot) => {
                        self.open.decrease_key(slot, tentative, f);
                    }
                    None => {
                        self.open.insert(SearchNode {
                            idx: ni,
                            g: tentative,
                            f,
                        });
                    }
                }
            }
        };

        self.nbuf = nbuf;
        log::trace!(
            "cost search: {} expansions, result {:?}",
            self.last_expansions,
            result
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::euclidean;
    use crate::pather::CostPather;
    use fragnet_core::{BLOCKED, Bounds, Connectivity, CostSurface};
    use rand::RngExt;

    fn search(surface: &CostSurface, conn: Connectivity, a: &[Cell], b: &[Cell]) -> f64 {
        let mut cs = CostSearch::new(surface.bounds());
        cs.cost_distance(&CostPather::new(surface, conn), a, b).unwrap()
    }

    #[test]
    fn opposite_corners_uniform_cost() {
        let s = CostSurface::uniform(Bounds::new(5, 5));
        let a = [Cell::new(0, 0)];
        let b = [Cell::new(4, 4)];
        assert_eq!(search(&s, Connectivity::Four, &a, &b), 8.0);
        assert_eq!(search(&s, Connectivity::Four, &b, &a), 8.0);
        let diag = search(&s, Connectivity::Eight, &a, &b);
        assert!((diag - 4.0 * std::f64::consts::SQRT_2).abs() < 1e-9);
        assert_eq!(diag, search(&s, Connectivity::Eight, &b, &a));
    }

    #[test]
    fn overlapping_sets_cost_nothing() {
        let s = CostSurface::uniform(Bounds::new(3, 3));
        let a = [Cell::new(1, 1), Cell::new(1, 2)];
        let b = [Cell::new(1, 2)];
        assert_eq!(search(&s, Connectivity::Four, &a, &b), 0.0);
    }

    #[test]
    fn enclosed_source_is_unreachable() {
        let x = BLOCKED;
        let s = CostSurface::from_rows(&[
            [1.0, 1.0, 1.0, 1.0, 1.0],
            [1.0, x, x, x, 1.0],
            [1.0, x, 1.0, x, 1.0],
            [1.0, x, x, x, 1.0],
            [1.0, 1.0, 1.0, 1.0, 1.0],
        ])
        .unwrap();
        let inner = [Cell::new(2, 2)];
        let outer = [Cell::new(0, 0)];
        for conn in [Connectivity::Four, Connectivity::Eight] {
            assert_eq!(search(&s, conn, &inner, &outer), UNREACHABLE);
            assert_eq!(search(&s, conn, &outer, &inner), UNREACHABLE);
        }
    }

    #[test]
    fn blocked_targets_are_unreachable() {
        let s = CostSurface::from_rows(&[[1.0, 1.0, BLOCKED]]).unwrap();
        assert_eq!(
            search(&s, Connectivity::Four, &[Cell::new(0, 0)], &[Cell::new(0, 2)]),
            UNREACHABLE
        );
        assert_eq!(search(&s, Connectivity::Four, &[Cell::new(0, 0)], &[]), UNREACHABLE);
    }

    #[test]
    fn detours_around_expensive_cells() {
        let s = CostSurface::from_rows(&[
            [1.0, 1.0, 1.0],
            [1.0, 50.0, 1.0],
            [1.0, 1.0, 1.0],
        ])
        .unwrap();
        let d = search(&s, Connectivity::Four, &[Cell::new(1, 0)], &[Cell::new(1, 2)]);
        assert_eq!(d, 4.0);
    }

    #[test]
    fn expansion_limit_is_reported() {
        let s = CostSurface::uniform(Bounds::new(30, 30));
        let pather = CostPather::new(&s, Connectivity::Four);
        let mut cs = CostSearch::new(s.bounds()).with_max_expansions(Some(5));
        let err = cs
            .cost_distance(&pather, &[Cell::new(0, 0)], &[Cell::new(29, 29)])
            .unwrap_err();
        assert!(matches!(err, Error::SearchLimitExceeded { limit: 5 }));
    }

    #[test]
    fn reused_search_matches_fresh_search() {
        let s = CostSurface::from_rows(&[
            [1.0, 2.0, 3.0, 1.0],
            [4.0, BLOCKED, 1.0, 1.0],
            [1.0, 1.0, 2.0, 5.0],
        ])
        .unwrap();
        let pather = CostPather::new(&s, Connectivity::Eight);
        let mut cs = CostSearch::new(s.bounds());
        let pairs = [
            (Cell::new(0, 0), Cell::new(2, 3)),
            (Cell::new(2, 0), Cell::new(0, 3)),
            (Cell::new(0, 0), Cell::new(2, 3)),
        ];
        for (a, b) in pairs {
            let reused = cs.cost_distance(&pather, &[a], &[b]).unwrap();
            assert_eq!(reused, search(&s, Connectivity::Eight, &[a], &[b]));
        }
    }

    #[test]
    fn never_cheaper_than_scaled_straight_line() {
        let mut rng = rand::rng();
        for _ in 0..20 {
            let weights: Vec<f64> = (0..100)
                .map(|_| {
                    if rng.random_range(0..10) == 0 {
                        BLOCKED
                    } else {
                        rng.random_range(0.5..4.0)
                    }
                })
                .collect();
            let s = CostSurface::new(10, 10, weights).unwrap();
            let a = Cell::new(rng.random_range(0..10), rng.random_range(0..10));
            let b = Cell::new(rng.random_range(0..10), rng.random_range(0..10));
            for conn in [Connectivity::Four, Connectivity::Eight] {
                let d = search(&s, conn, &[a], &[b]);
                let back = search(&s, conn, &[b], &[a]);
                if d == UNREACHABLE {
                    assert_eq!(back, UNREACHABLE);
                } else {
                    assert!(d + 1e-9 >= euclidean(a, b) * s.min_weight());
                    assert!((d - back).abs() < 1e-9);
                }
            }
        }
    }
}
