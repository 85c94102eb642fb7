//! The gesture state machine: owns the in-progress gesture and the working
//! draft, and orchestrates scheme resolution and draft reduction in response
//! to normalized input events.
//!
//! The engine is synchronous and single-streamed: every operation completes
//! before returning, and events are expected to arrive serialized from one
//! logical input source. Physical devices routinely deliver stray sequences
//! (a second press before a release, a release with no press, movement off
//! the grid), so those are defined no-ops rather than errors.
//!
//! # States
//!
//! - **Idle** — no gesture. External selection updates land here; the draft
//!   mirrors the authoritative selection.
//! - **Active** — a gesture is in flight. The mode (add/remove) and anchor
//!   are fixed; every move recomputes the draft from the authoritative
//!   selection, the scheme's covered set, and the mode. External selection
//!   updates are ignored until the gesture ends.
//!
//! A completed gesture commits the draft through a one-shot callback and
//! the committed set becomes the new authoritative selection. A cancelled
//! gesture discards the draft and commits nothing.

use crate::draft::{apply_gesture, GestureMode, Selection};
use crate::error::Result;
use crate::grid::{Grid, GridConfig, TimeSlot};
use crate::scheme::{SchemeFn, SchemeRegistry};

/// Transient per-gesture state.
#[derive(Debug, Clone, Copy)]
struct Gesture {
    mode: GestureMode,
    anchor: TimeSlot,
    /// Whether a resolved move has occurred since the gesture started.
    /// A pure tap (start then end, no move) synthesizes one final move on
    /// the anchor so the single-cell change is always applied.
    moved: bool,
}

/// Handler invoked with the final selection when a gesture commits.
pub type CommitHandler = Box<dyn FnMut(&Selection)>;

/// Drag-selection engine for one day-by-time grid.
///
/// Built from a [`GridConfig`] and a [`SchemeRegistry`]; the config's
/// `selection_scheme` is resolved at construction, so a bad scheme name
/// fails at configuration time rather than mid-gesture. The grid is
/// immutable for the engine's lifetime — build a new engine to change it.
pub struct GestureEngine {
    grid: Grid,
    scheme: SchemeFn,
    /// Authoritative selection: the base every draft is computed from.
    selection: Selection,
    /// Working draft — what should render as selected right now.
    draft: Selection,
    gesture: Option<Gesture>,
    on_commit: Option<CommitHandler>,
}

impl std::fmt::Debug for GestureEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureEngine")
            .field("grid", &self.grid)
            .field("selection", &self.selection)
            .field("draft", &self.draft)
            .field("gesture", &self.gesture)
            .field("on_commit", &self.on_commit.as_ref().map(|_| "FnMut"))
            .finish_non_exhaustive()
    }
}

impl GestureEngine {
    /// Build the grid described by `config` and resolve its scheme.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SelectError::InvalidConfig`] for bad grid parameters
    /// and [`crate::SelectError::UnknownScheme`] if `config.selection_scheme`
    /// is not in `registry`.
    pub fn new(config: &GridConfig, registry: &SchemeRegistry) -> Result<Self> {
        let grid = Grid::build(config)?;
        let scheme = registry.get(&config.selection_scheme)?;
        Ok(Self {
            grid,
            scheme,
            selection: Selection::new(),
            draft: Selection::new(),
            gesture: None,
            on_commit: None,
        })
    }

    /// The grid this engine selects over.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The current provisional selection — what the host should render.
    pub fn draft(&self) -> &Selection {
        &self.draft
    }

    /// The authoritative selection the next gesture will start from.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Whether a gesture is in flight.
    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// Register the handler fired exactly once per completed gesture with
    /// the final selection. Replaces any previous handler.
    pub fn set_commit_handler(&mut self, handler: impl FnMut(&Selection) + 'static) {
        self.on_commit = Some(Box::new(handler));
    }

    /// Replace the authoritative selection from the host.
    ///
    /// Only honored while Idle: an in-progress gesture takes precedence over
    /// external updates, which are ignored until the gesture ends (the host
    /// re-supplies its selection after the commit lands).
    pub fn set_selection(&mut self, selection: Selection) {
        if self.gesture.is_some() {
            return;
        }
        self.draft = selection.clone();
        self.selection = selection;
    }

    /// Begin a gesture anchored at `slot`.
    ///
    /// The mode is fixed here for the whole gesture: `Remove` if the anchor
    /// is currently selected, `Add` otherwise. The draft immediately
    /// reflects the single-cell change, before any move arrives. A start
    /// delivered while a gesture is already active is a stray event and is
    /// discarded.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SelectError::SlotNotFound`] if `slot` is not part of
    /// the grid.
    pub fn on_start(&mut self, slot: TimeSlot) -> Result<()> {
        if self.gesture.is_some() {
            return Ok(());
        }

        let covered = (self.scheme)(slot, Some(slot), &self.grid)?;
        let mode = if self.selection.contains(&slot) {
            GestureMode::Remove
        } else {
            GestureMode::Add
        };

        self.draft = apply_gesture(&self.selection, &covered, mode);
        self.gesture = Some(Gesture {
            mode,
            anchor: slot,
            moved: false,
        });
        Ok(())
    }

    /// Update the gesture's current position.
    ///
    /// `None` means the gesture moved off the grid: the draft is left as it
    /// was. A move while Idle is a stray event and is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SelectError::SlotNotFound`] if `slot` is not part of
    /// the grid.
    pub fn on_move(&mut self, slot: Option<TimeSlot>) -> Result<()> {
        let Some(gesture) = self.gesture else {
            return Ok(());
        };
        let Some(slot) = slot else {
            return Ok(());
        };

        let covered = (self.scheme)(gesture.anchor, Some(slot), &self.grid)?;
        self.draft = apply_gesture(&self.selection, &covered, gesture.mode);
        if let Some(gesture) = self.gesture.as_mut() {
            gesture.moved = true;
        }
        Ok(())
    }

    /// End the gesture and commit the draft.
    ///
    /// A pure tap (no resolved move since the start) first applies the
    /// equivalent of a move on the anchor, so the single-cell toggle always
    /// lands. The commit handler fires once with the final selection, which
    /// also becomes the new authoritative selection. An end while Idle is a
    /// stray event and is discarded.
    ///
    /// # Errors
    ///
    /// Propagates scheme resolution failures from the synthesized tap move.
    pub fn on_end(&mut self) -> Result<()> {
        let Some(gesture) = self.gesture else {
            return Ok(());
        };

        if !gesture.moved {
            let covered = (self.scheme)(gesture.anchor, Some(gesture.anchor), &self.grid)?;
            self.draft = apply_gesture(&self.selection, &covered, gesture.mode);
        }

        self.gesture = None;
        self.selection = self.draft.clone();
        if let Some(handler) = self.on_commit.as_mut() {
            handler(&self.selection);
        }
        Ok(())
    }

    /// Abort the in-progress gesture without committing.
    ///
    /// The draft resets to the authoritative selection, which is left
    /// unchanged, and no commit fires. A no-op while Idle. Hosts call this
    /// on focus loss or any other reason a gesture must not land.
    pub fn cancel(&mut self) {
        if self.gesture.take().is_some() {
            self.draft = self.selection.clone();
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
