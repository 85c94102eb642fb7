//! Selection schemes: (anchor slot, current slot, grid) → the set of slots a
//! drag currently covers.
//!
//! A scheme is a named pure function with the fixed [`SchemeFn`] signature.
//! Two are built in — [`linear`] sweeps the grid's flattened chronological
//! order, [`square`] takes the bounding box in (day, time) index space — and
//! hosts can register additional ones by name in a [`SchemeRegistry`].
//!
//! Every scheme must be commutative in its two slot arguments
//! (`resolve(a, b) == resolve(b, a)`, drags work in either direction) and
//! must cover exactly `{anchor}` when the two slots coincide.

use std::collections::{BTreeSet, HashMap};

use crate::error::{Result, SelectError};
use crate::grid::{Grid, TimeSlot};

/// Signature every selection scheme implements.
///
/// `current = None` means the gesture has not moved yet (a bare tap) and
/// covers the singleton `{anchor}`. Both slots must exist in `grid`; a
/// scheme fails with [`SelectError::SlotNotFound`] otherwise — that case is
/// an input-normalizer bug, never silently swallowed.
pub type SchemeFn = fn(TimeSlot, Option<TimeSlot>, &Grid) -> Result<BTreeSet<TimeSlot>>;

/// Look up a slot's grid position, or fail with `SlotNotFound`.
fn position_of(grid: &Grid, slot: &TimeSlot) -> Result<(usize, usize)> {
    grid.position_of(slot)
        .ok_or_else(|| SelectError::SlotNotFound(slot.to_string()))
}

/// Linear scheme: the grid as one flattened chronological sequence (column 0
/// fully, then column 1, …); covers every slot between anchor and current in
/// that sequence, inclusive, in either direction.
pub fn linear(anchor: TimeSlot, current: Option<TimeSlot>, grid: &Grid) -> Result<BTreeSet<TimeSlot>> {
    let (anchor_day, anchor_time) = position_of(grid, &anchor)?;
    let Some(current) = current else {
        return Ok(BTreeSet::from([anchor]));
    };
    let (current_day, current_time) = position_of(grid, &current)?;

    let per_day = grid.slots_per_day();
    let i = anchor_day * per_day + anchor_time;
    let j = current_day * per_day + current_time;
    let (lo, hi) = (i.min(j), i.max(j));

    Ok(grid.iter().skip(lo).take(hi - lo + 1).collect())
}

/// Square scheme: anchor and current as opposite corners of a rectangle in
/// (day, time) index space; covers the full bounding box, inclusive.
pub fn square(anchor: TimeSlot, current: Option<TimeSlot>, grid: &Grid) -> Result<BTreeSet<TimeSlot>> {
    let (anchor_day, anchor_time) = position_of(grid, &anchor)?;
    let Some(current) = current else {
        return Ok(BTreeSet::from([anchor]));
    };
    let (current_day, current_time) = position_of(grid, &current)?;

    let days = anchor_day.min(current_day)..=anchor_day.max(current_day);
    let times = anchor_time.min(current_time)..=anchor_time.max(current_time);

    let mut covered = BTreeSet::new();
    for d in days {
        for t in times.clone() {
            // In-bounds by construction: both corners are grid positions.
            if let Some(slot) = grid.slot_at(d, t) {
                covered.insert(slot);
            }
        }
    }
    Ok(covered)
}

// ── SchemeRegistry ──────────────────────────────────────────────────────────

/// Named scheme lookup. Starts with the two built-ins; hosts register
/// additional schemes under new names (or shadow the built-ins).
#[derive(Debug, Clone)]
pub struct SchemeRegistry {
    schemes: HashMap<String, SchemeFn>,
}

impl SchemeRegistry {
    /// A registry holding `"linear"` and `"square"`.
    pub fn with_builtins() -> Self {
        let mut registry = Self {
            schemes: HashMap::new(),
        };
        registry.register("linear", linear);
        registry.register("square", square);
        registry
    }

    /// Register `scheme` under `name` (case-sensitive), replacing any
    /// previous registration.
    pub fn register(&mut self, name: &str, scheme: SchemeFn) {
        self.schemes.insert(name.to_string(), scheme);
    }

    /// Resolve a scheme by name.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::UnknownScheme`] if `name` is not registered.
    pub fn get(&self, name: &str) -> Result<SchemeFn> {
        self.schemes
            .get(name)
            .copied()
            .ok_or_else(|| SelectError::UnknownScheme(name.to_string()))
    }
}

impl Default for SchemeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridConfig;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn grid(num_days: u32, slots_per_day: u32) -> Grid {
        // hourly_chunks = 1 keeps slot indices equal to hour offsets.
        Grid::build(&GridConfig {
            start_date: Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap(),
            num_days,
            min_time: 0,
            max_time: slots_per_day,
            hourly_chunks: 1,
            selection_scheme: "linear".to_string(),
        })
        .unwrap()
    }

    fn positions(grid: &Grid, covered: &BTreeSet<TimeSlot>) -> BTreeSet<(usize, usize)> {
        covered
            .iter()
            .map(|slot| grid.position_of(slot).unwrap())
            .collect()
    }

    #[test]
    fn test_no_current_is_singleton_anchor() {
        let grid = grid(2, 3);
        let anchor = grid.slot_at(1, 1).unwrap();
        for scheme in [linear as SchemeFn, square as SchemeFn] {
            let covered = scheme(anchor, None, &grid).unwrap();
            assert_eq!(covered, BTreeSet::from([anchor]));
        }
    }

    #[test]
    fn test_square_covers_bounding_box() {
        // Anchor (day 1, time 2), current (day 3, time 0) in a 5×4 grid
        // covers the 3×3 box day ∈ {1,2,3}, time ∈ {0,1,2}.
        let grid = grid(5, 4);
        let anchor = grid.slot_at(1, 2).unwrap();
        let current = grid.slot_at(3, 0).unwrap();
        let covered = square(anchor, Some(current), &grid).unwrap();
        let expected: BTreeSet<(usize, usize)> = (1..=3)
            .flat_map(|d| (0..=2).map(move |t| (d, t)))
            .collect();
        assert_eq!(positions(&grid, &covered), expected);
    }

    #[test]
    fn test_linear_covers_contiguous_run() {
        // Flattened order d0t0,d0t1,d0t2,d1t0,d1t1,d1t2: anchor d0t2 and
        // current d1t0 are adjacent, so linear covers exactly those two.
        let grid = grid(2, 3);
        let anchor = grid.slot_at(0, 2).unwrap();
        let current = grid.slot_at(1, 0).unwrap();
        let covered = linear(anchor, Some(current), &grid).unwrap();
        assert_eq!(
            positions(&grid, &covered),
            BTreeSet::from([(0, 2), (1, 0)])
        );
    }

    #[test]
    fn test_schemes_diverge_on_cross_column_drag() {
        // Same pair as above under square: the 2×3 bounding box of corners
        // (0,2) and (1,0) — all six slots of the grid.
        let grid = grid(2, 3);
        let anchor = grid.slot_at(0, 2).unwrap();
        let current = grid.slot_at(1, 0).unwrap();
        let covered = square(anchor, Some(current), &grid).unwrap();
        assert_eq!(covered.len(), 6);
    }

    #[test]
    fn test_linear_spans_whole_columns_between_endpoints() {
        let grid = grid(3, 4);
        let anchor = grid.slot_at(0, 3).unwrap();
        let current = grid.slot_at(2, 0).unwrap();
        let covered = linear(anchor, Some(current), &grid).unwrap();
        // d0t3, all of d1, d2t0
        assert_eq!(covered.len(), 6);
        assert!(positions(&grid, &covered).contains(&(1, 2)));
    }

    #[test]
    fn test_anchor_outside_grid_is_slot_not_found() {
        let grid = grid(2, 3);
        let foreign = TimeSlot::new(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap());
        let current = grid.slot_at(0, 0).unwrap();
        for scheme in [linear as SchemeFn, square as SchemeFn] {
            let err = scheme(foreign, Some(current), &grid).unwrap_err();
            assert!(matches!(err, SelectError::SlotNotFound(_)), "got: {err}");
            let err = scheme(current, Some(foreign), &grid).unwrap_err();
            assert!(matches!(err, SelectError::SlotNotFound(_)), "got: {err}");
        }
    }

    #[test]
    fn test_registry_builtins_and_unknown() {
        let registry = SchemeRegistry::with_builtins();
        assert!(registry.get("linear").is_ok());
        assert!(registry.get("square").is_ok());
        let err = registry.get("diagonal").unwrap_err();
        assert!(matches!(err, SelectError::UnknownScheme(_)), "got: {err}");
    }

    #[test]
    fn test_registry_custom_scheme() {
        // A scheme that ignores the drag and covers the anchor only.
        fn anchor_only(
            anchor: TimeSlot,
            _current: Option<TimeSlot>,
            grid: &Grid,
        ) -> crate::error::Result<BTreeSet<TimeSlot>> {
            if !grid.contains(&anchor) {
                return Err(SelectError::SlotNotFound(anchor.to_string()));
            }
            Ok(BTreeSet::from([anchor]))
        }

        let mut registry = SchemeRegistry::with_builtins();
        registry.register("anchor-only", anchor_only);
        let scheme = registry.get("anchor-only").unwrap();

        let grid = grid(2, 3);
        let anchor = grid.slot_at(0, 0).unwrap();
        let current = grid.slot_at(1, 2).unwrap();
        let covered = scheme(anchor, Some(current), &grid).unwrap();
        assert_eq!(covered, BTreeSet::from([anchor]));
    }

    proptest! {
        #[test]
        fn prop_schemes_commutative(
            num_days in 1u32..6,
            slots_per_day in 1u32..8,
            a in (0usize..6, 0usize..8),
            b in (0usize..6, 0usize..8),
        ) {
            let grid = grid(num_days, slots_per_day);
            let a = grid.slot_at(a.0 % num_days as usize, a.1 % slots_per_day as usize).unwrap();
            let b = grid.slot_at(b.0 % num_days as usize, b.1 % slots_per_day as usize).unwrap();
            for scheme in [linear as SchemeFn, square as SchemeFn] {
                let forward = scheme(a, Some(b), &grid).unwrap();
                let backward = scheme(b, Some(a), &grid).unwrap();
                prop_assert_eq!(forward, backward);
            }
        }

        #[test]
        fn prop_equal_endpoints_cover_singleton(
            num_days in 1u32..6,
            slots_per_day in 1u32..8,
            a in (0usize..6, 0usize..8),
        ) {
            let grid = grid(num_days, slots_per_day);
            let a = grid.slot_at(a.0 % num_days as usize, a.1 % slots_per_day as usize).unwrap();
            for scheme in [linear as SchemeFn, square as SchemeFn] {
                let covered = scheme(a, Some(a), &grid).unwrap();
                prop_assert_eq!(covered, BTreeSet::from([a]));
            }
        }

        #[test]
        fn prop_covered_always_contains_endpoints(
            num_days in 1u32..6,
            slots_per_day in 1u32..8,
            a in (0usize..6, 0usize..8),
            b in (0usize..6, 0usize..8),
        ) {
            let grid = grid(num_days, slots_per_day);
            let a = grid.slot_at(a.0 % num_days as usize, a.1 % slots_per_day as usize).unwrap();
            let b = grid.slot_at(b.0 % num_days as usize, b.1 % slots_per_day as usize).unwrap();
            for scheme in [linear as SchemeFn, square as SchemeFn] {
                let covered = scheme(a, Some(b), &grid).unwrap();
                prop_assert!(covered.contains(&a));
                prop_assert!(covered.contains(&b));
            }
        }
    }
}
