use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A contiguous range of billable minutes priced at a fixed day/night rate pair.
///
/// Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationBand {
    pub min_minutes: u32,
    pub max_minutes: u32,
    /// Rate per minute for minutes classified as day.
    pub day_rate: Decimal,
    /// Rate per minute for minutes classified as night.
    pub night_rate: Decimal,
}

impl DurationBand {
    pub const fn new(min_minutes: u32, max_minutes: u32, day_rate: Decimal, night_rate: Decimal) -> Self {
        Self {
            min_minutes,
            max_minutes,
            day_rate,
            night_rate,
        }
    }

    pub fn contains(&self, total_minutes: u32) -> bool {
        self.min_minutes <= total_minutes && total_minutes <= self.max_minutes
    }
}

impl fmt::Display for DurationBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min_minutes, self.max_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_contains_is_inclusive_on_both_ends() {
        let band = DurationBand::new(241, 480, dec!(2.10), dec!(2.40));
        assert!(!band.contains(240));
        assert!(band.contains(241));
        assert!(band.contains(480));
        assert!(!band.contains(481));
    }

    #[test]
    fn test_label() {
        let band = DurationBand::new(0, 120, dec!(2.25), dec!(2.60));
        assert_eq!(band.to_string(), "0-120");
    }
}
