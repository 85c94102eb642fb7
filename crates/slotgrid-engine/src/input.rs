//! Input normalization: raw pointer/touch events → the three primitive
//! events the gesture engine understands (start, move, end).
//!
//! Two input families exist. The **discrete** family ([`PointerAdapter`])
//! already knows which cell an event landed on: press/hover arrive with a
//! resolved slot, and the release may arrive from anywhere on the input
//! surface — the host should source it from the broadest release scope it
//! has, since a drag can end outside every cell. The **continuous** family
//! ([`TouchAdapter`]) streams raw coordinates from a single origin point and
//! resolves them itself: an injected point-to-handle probe finds the cell
//! handle under a coordinate, and a [`CellLookup`] maps handles to slots.
//!
//! The engine never constructs cell handles and never implements geometry;
//! the rendering collaborator mints handles and keeps the lookup current as
//! cells mount and unmount.

use std::collections::HashMap;
use std::hash::Hash;

use crate::engine::GestureEngine;
use crate::error::Result;
use crate::grid::TimeSlot;

// ── PointerAdapter ──────────────────────────────────────────────────────────

/// Adapter for the discrete input family: press, hover-enter, release.
///
/// Stateless — every event already carries its cell identity, so the adapter
/// is a direct mapping onto the engine's primitive events.
#[derive(Debug, Default)]
pub struct PointerAdapter;

impl PointerAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Press on a cell: begins a gesture anchored at `slot`.
    pub fn press(&self, engine: &mut GestureEngine, slot: TimeSlot) -> Result<()> {
        engine.on_start(slot)
    }

    /// Hover-enter on a cell while the button is held.
    pub fn hover(&self, engine: &mut GestureEngine, slot: TimeSlot) -> Result<()> {
        engine.on_move(Some(slot))
    }

    /// Release observed anywhere on the input surface, on a cell or not.
    pub fn release(&self, engine: &mut GestureEngine) -> Result<()> {
        engine.on_end()
    }
}

// ── CellLookup ──────────────────────────────────────────────────────────────

/// Many-to-one mapping from opaque cell handles to slots.
///
/// Populated by the rendering collaborator: insert on cell mount, remove on
/// unmount. Read-only from the engine's perspective; used only to resolve
/// continuous-touch coordinates.
#[derive(Debug, Clone)]
pub struct CellLookup<H> {
    cells: HashMap<H, TimeSlot>,
}

impl<H: Eq + Hash> CellLookup<H> {
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
        }
    }

    /// Record that `handle` currently renders `slot`.
    pub fn insert(&mut self, handle: H, slot: TimeSlot) {
        self.cells.insert(handle, slot);
    }

    /// Forget an unmounted cell.
    pub fn remove(&mut self, handle: &H) {
        self.cells.remove(handle);
    }

    /// The slot `handle` renders, if it is still mounted.
    pub fn resolve(&self, handle: &H) -> Option<TimeSlot> {
        self.cells.get(handle).copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<H: Eq + Hash> Default for CellLookup<H> {
    fn default() -> Self {
        Self::new()
    }
}

// ── TouchAdapter ────────────────────────────────────────────────────────────

/// Point-to-handle probe supplied by the rendering layer: which cell handle,
/// if any, sits under a surface coordinate.
pub type PointProbe<H> = Box<dyn Fn(f64, f64) -> Option<H>>;

/// Adapter for the continuous input family: one origin point streaming
/// coordinate updates.
///
/// Owns the [`CellLookup`] and the injected probe. A coordinate that probes
/// to no handle, or to a handle that has since unmounted, resolves to `None`
/// — the engine treats that as "moved off the grid" and leaves the draft
/// alone.
pub struct TouchAdapter<H> {
    lookup: CellLookup<H>,
    probe: PointProbe<H>,
}

impl<H: Eq + Hash> TouchAdapter<H> {
    pub fn new(probe: impl Fn(f64, f64) -> Option<H> + 'static) -> Self {
        Self {
            lookup: CellLookup::new(),
            probe: Box::new(probe),
        }
    }

    /// The cell lookup, for the rendering collaborator to keep current.
    pub fn lookup_mut(&mut self) -> &mut CellLookup<H> {
        &mut self.lookup
    }

    pub fn lookup(&self) -> &CellLookup<H> {
        &self.lookup
    }

    /// Origin-down on a cell: begins a gesture anchored at `slot`.
    pub fn touch_start(&self, engine: &mut GestureEngine, slot: TimeSlot) -> Result<()> {
        engine.on_start(slot)
    }

    /// Coordinate update: probe the point, resolve the handle, feed the
    /// engine whatever came out.
    pub fn touch_move(&self, engine: &mut GestureEngine, x: f64, y: f64) -> Result<()> {
        let slot = (self.probe)(x, y).and_then(|handle| self.lookup.resolve(&handle));
        engine.on_move(slot)
    }

    /// Origin-up. The tap-without-drag path (no coordinate update ever
    /// observed) is handled by the engine itself, which synthesizes a final
    /// move on the anchor before committing.
    pub fn touch_end(&self, engine: &mut GestureEngine) -> Result<()> {
        engine.on_end()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
