//! # slotgrid-engine
//!
//! Deterministic drag-selection over day-by-time availability grids.
//!
//! The engine materializes a grid of selectable time slots from a compact
//! time-range configuration, interprets pointer/touch drag gestures as
//! provisional additions or removals against a host-owned selection, and
//! commits the result when the gesture ends. Rendering, styling, and
//! hit-test geometry stay on the host's side of the boundary: the engine
//! consumes resolved cell identities (or resolves them through an injected
//! probe) and surfaces a draft selection for the host to render.
//!
//! ## Modules
//!
//! - [`grid`] — time-range configuration → ordered 2D grid of [`TimeSlot`]s
//! - [`scheme`] — drag endpoints → covered slot set (`linear`, `square`, pluggable)
//! - [`draft`] — (base selection, covered set, mode) → new draft selection
//! - [`engine`] — the gesture state machine orchestrating the above
//! - [`input`] — pointer/touch adapters normalizing raw events
//! - [`error`] — error types
//!
//! ## Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use slotgrid_engine::{GestureEngine, GridConfig, SchemeRegistry};
//!
//! let config = GridConfig {
//!     start_date: Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap(),
//!     num_days: 7,
//!     min_time: 9,
//!     max_time: 17,
//!     hourly_chunks: 2,
//!     selection_scheme: "square".to_string(),
//! };
//! let mut engine = GestureEngine::new(&config, &SchemeRegistry::with_builtins()).unwrap();
//!
//! // Monday 09:00 down, drag to Tuesday 10:00, release.
//! let anchor = engine.grid().slot_at(0, 0).unwrap();
//! let current = engine.grid().slot_at(1, 2).unwrap();
//! engine.on_start(anchor).unwrap();
//! engine.on_move(Some(current)).unwrap();
//! engine.on_end().unwrap();
//!
//! // 2 days × 3 half-hour slots.
//! assert_eq!(engine.selection().len(), 6);
//! ```

pub mod draft;
pub mod engine;
pub mod error;
pub mod grid;
pub mod input;
pub mod scheme;

pub use draft::{apply_gesture, GestureMode, Selection};
pub use engine::{CommitHandler, GestureEngine};
pub use error::SelectError;
pub use grid::{Grid, GridConfig, TimeSlot};
pub use input::{CellLookup, PointProbe, PointerAdapter, TouchAdapter};
pub use scheme::{linear, square, SchemeFn, SchemeRegistry};
