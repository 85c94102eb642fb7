//! Grid materialization: compact time-range configuration → ordered 2D grid
//! of selectable time slots.
//!
//! A [`Grid`] is one column per day, each column an ascending run of
//! [`TimeSlot`]s spaced `60 / hourly_chunks` minutes apart. Construction is
//! pure and deterministic (no system clock access — the caller's
//! `start_date` anchors day 0), and the grid is immutable after build; a
//! configuration change means rebuilding the whole grid.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SelectError;

// ── TimeSlot ────────────────────────────────────────────────────────────────

/// One discrete, selectable instant in the grid.
///
/// Identity is value equality at **minute granularity**: two slots are the
/// same slot iff they fall in the same calendar minute. `Eq`, `Ord`, and
/// `Hash` all operate on the minute key, so standard set types give the
/// selection semantics the engine needs with no extra machinery.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TimeSlot(DateTime<Utc>);

impl TimeSlot {
    /// Wrap an instant as a slot.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// The underlying instant.
    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    /// Minutes since the Unix epoch — the slot's identity key.
    fn minute_key(&self) -> i64 {
        self.0.timestamp().div_euclid(60)
    }
}

impl PartialEq for TimeSlot {
    fn eq(&self, other: &Self) -> bool {
        self.minute_key() == other.minute_key()
    }
}

impl Eq for TimeSlot {}

impl PartialOrd for TimeSlot {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeSlot {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.minute_key().cmp(&other.minute_key())
    }
}

impl Hash for TimeSlot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.minute_key().hash(state);
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

// ── GridConfig ──────────────────────────────────────────────────────────────

/// Compact time-range configuration for [`Grid::build`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Calendar date anchoring day 0. Time-of-day components are discarded.
    pub start_date: DateTime<Utc>,
    /// Number of day columns (≥ 1).
    pub num_days: u32,
    /// First hour of each day covered by the grid (0–23).
    pub min_time: u32,
    /// Hour each day's coverage ends, exclusive (1–24, > `min_time`).
    pub max_time: u32,
    /// Selectable chunks per hour (≥ 1, ≤ 60): 1 = hourly, 4 = quarter-hour.
    pub hourly_chunks: u32,
    /// Name of the selection scheme to resolve drags with.
    #[serde(default = "default_scheme")]
    pub selection_scheme: String,
}

fn default_scheme() -> String {
    "linear".to_string()
}

// ── Grid ────────────────────────────────────────────────────────────────────

/// An ordered day-by-time grid of [`TimeSlot`]s.
///
/// Invariants (guaranteed by [`Grid::build`], relied on by the selection
/// schemes): every column has the same length, slots within a column are
/// strictly ascending, and the grid never changes after construction.
#[derive(Debug, Clone)]
pub struct Grid {
    columns: Vec<Vec<TimeSlot>>,
    index: HashMap<TimeSlot, (usize, usize)>,
}

impl Grid {
    /// Materialize the grid described by `config`.
    ///
    /// Produces `num_days` columns of `(max_time - min_time) * hourly_chunks`
    /// slots each, spaced `60 / hourly_chunks` minutes apart starting at
    /// `min_time:00` of `start_date + d` days.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::InvalidConfig`] if `num_days < 1`,
    /// `hourly_chunks < 1`, `hourly_chunks > 60` (slot identity is
    /// minute-granular, so sub-minute spacing would collapse slots),
    /// `min_time >= max_time`, or `max_time > 24`. No partial grid is ever
    /// produced.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use slotgrid_engine::{Grid, GridConfig};
    ///
    /// let grid = Grid::build(&GridConfig {
    ///     start_date: Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap(),
    ///     num_days: 7,
    ///     min_time: 9,
    ///     max_time: 17,
    ///     hourly_chunks: 2,
    ///     selection_scheme: "linear".to_string(),
    /// })
    /// .unwrap();
    /// assert_eq!(grid.num_days(), 7);
    /// assert_eq!(grid.slots_per_day(), 16);
    /// ```
    pub fn build(config: &GridConfig) -> Result<Self, SelectError> {
        if config.num_days < 1 {
            return Err(SelectError::InvalidConfig(format!(
                "num_days must be >= 1, got {}",
                config.num_days
            )));
        }
        if config.hourly_chunks < 1 {
            return Err(SelectError::InvalidConfig(format!(
                "hourly_chunks must be >= 1, got {}",
                config.hourly_chunks
            )));
        }
        if config.hourly_chunks > 60 {
            return Err(SelectError::InvalidConfig(format!(
                "hourly_chunks must be <= 60 (slot identity is minute-granular), got {}",
                config.hourly_chunks
            )));
        }
        if config.max_time > 24 {
            return Err(SelectError::InvalidConfig(format!(
                "max_time must be <= 24, got {}",
                config.max_time
            )));
        }
        if config.min_time >= config.max_time {
            return Err(SelectError::InvalidConfig(format!(
                "min_time ({}) must be < max_time ({})",
                config.min_time, config.max_time
            )));
        }

        // Only the calendar date of start_date anchors day 0.
        let day_zero = config.start_date.date_naive();
        let slots_per_day = ((config.max_time - config.min_time) * config.hourly_chunks) as usize;
        let step = Duration::seconds(3600 / i64::from(config.hourly_chunks));

        let mut columns = Vec::with_capacity(config.num_days as usize);
        let mut index = HashMap::with_capacity(config.num_days as usize * slots_per_day);

        for d in 0..config.num_days as usize {
            let date = day_zero + Duration::days(d as i64);
            let column_start = date
                .and_hms_opt(config.min_time, 0, 0)
                .map(|naive| Utc.from_utc_datetime(&naive))
                .ok_or_else(|| {
                    SelectError::InvalidConfig(format!("invalid min_time hour {}", config.min_time))
                })?;

            let mut column = Vec::with_capacity(slots_per_day);
            for t in 0..slots_per_day {
                let slot = TimeSlot::new(column_start + step * t as i32);
                index.insert(slot, (d, t));
                column.push(slot);
            }
            columns.push(column);
        }

        Ok(Self { columns, index })
    }

    /// Number of day columns.
    pub fn num_days(&self) -> usize {
        self.columns.len()
    }

    /// Number of slots in every column.
    pub fn slots_per_day(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Total slot count.
    pub fn len(&self) -> usize {
        self.num_days() * self.slots_per_day()
    }

    /// Whether the grid holds no slots (never true for a built grid).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The slots of day column `day`, ascending.
    pub fn column(&self, day: usize) -> Option<&[TimeSlot]> {
        self.columns.get(day).map(Vec::as_slice)
    }

    /// The slot at `(day, time)` indices.
    pub fn slot_at(&self, day: usize, time: usize) -> Option<TimeSlot> {
        self.columns.get(day)?.get(time).copied()
    }

    /// The `(day, time)` indices of `slot`, if it belongs to this grid.
    pub fn position_of(&self, slot: &TimeSlot) -> Option<(usize, usize)> {
        self.index.get(slot).copied()
    }

    /// Whether `slot` belongs to this grid (minute equality).
    pub fn contains(&self, slot: &TimeSlot) -> bool {
        self.index.contains_key(slot)
    }

    /// Index of `slot` in the flattened chronological order (column 0 fully,
    /// then column 1, …).
    pub fn flat_index(&self, slot: &TimeSlot) -> Option<usize> {
        let (day, time) = self.position_of(slot)?;
        Some(day * self.slots_per_day() + time)
    }

    /// All slots in flattened order.
    pub fn iter(&self) -> impl Iterator<Item = TimeSlot> + '_ {
        self.columns.iter().flatten().copied()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
