//! Day/night classification of billable minutes.
//!
//! A minute is classified by the wall-clock hour of its starting instant.
//! Day runs from 07:00 up to but excluding 22:00; everything else is night.

use chrono::{NaiveDateTime, TimeDelta, Timelike};

pub const DAY_START_HOUR: u32 = 7;
pub const NIGHT_START_HOUR: u32 = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    Day,
    Night,
}

impl Shift {
    pub fn of(instant: NaiveDateTime) -> Self {
        let hour = instant.hour();
        if (DAY_START_HOUR..NIGHT_START_HOUR).contains(&hour) {
            Shift::Day
        } else {
            Shift::Night
        }
    }
}

/// Minutes counted per shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinuteSplit {
    pub day: u32,
    pub night: u32,
}

impl MinuteSplit {
    pub fn total(&self) -> u32 {
        self.day + self.night
    }

    fn record(&mut self, instant: NaiveDateTime) {
        match Shift::of(instant) {
            Shift::Day => self.day += 1,
            Shift::Night => self.night += 1,
        }
    }
}

/// Walks `[start, end)` one minute at a time, classifying each step.
///
/// Returns an empty split when `end` is not after `start`. Callers bound the
/// interval length before calling.
pub fn classify_interval(start: NaiveDateTime, end: NaiveDateTime) -> MinuteSplit {
    let mut split = MinuteSplit::default();
    let mut cursor = start;
    while cursor < end {
        split.record(cursor);
        cursor += TimeDelta::minutes(1);
    }
    split
}

/// Classifies `minutes` further minutes beginning at `from` itself.
///
/// This is the billing-floor extrapolation: it is not tied to any real
/// elapsed time.
pub fn extend_from(from: NaiveDateTime, minutes: u32, split: &mut MinuteSplit) {
    let mut cursor = from;
    for _ in 0..minutes {
        split.record(cursor);
        cursor += TimeDelta::minutes(1);
    }
}
