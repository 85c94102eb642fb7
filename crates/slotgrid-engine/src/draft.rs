//! Draft reduction: (base selection, gesture-covered set, gesture mode) →
//! new draft selection.
//!
//! Pure set algebra over minute-equal [`TimeSlot`]s. The reducer never
//! mutates the base — the caller's selection stays untouched and a fresh
//! set comes back on every application.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::grid::TimeSlot;

/// A set of slots marked "available". Ordered for deterministic iteration;
/// membership is minute-granular time equality (see [`TimeSlot`]).
pub type Selection = BTreeSet<TimeSlot>;

/// What a gesture does to the slots it covers. Fixed for the duration of a
/// single gesture, determined at gesture start by whether the anchor slot
/// was already selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GestureMode {
    /// The gesture selects every slot it covers.
    Add,
    /// The gesture deselects every slot it covers.
    Remove,
}

/// Apply a gesture's covered set to a base selection.
///
/// `Add` unions `covered` into `base`; `Remove` subtracts every slot of
/// `base` that is minute-equal to a slot in `covered`. Applying `Add` with
/// a fully-contained covered set, or `Remove` with a disjoint one, returns
/// a set equal to `base`.
pub fn apply_gesture(base: &Selection, covered: &BTreeSet<TimeSlot>, mode: GestureMode) -> Selection {
    match mode {
        GestureMode::Add => base.union(covered).copied().collect(),
        GestureMode::Remove => base.difference(covered).copied().collect(),
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
