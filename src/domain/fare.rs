use crate::error::{FareError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Goods and services tax applied to the base fare.
pub const GST_RATE: Decimal = dec!(0.18);

/// Trips shorter than this are billed as if they lasted exactly this long.
pub const MINIMUM_BILLABLE_MINUTES: u32 = 120;

/// Rounds a money amount to a whole number, halves away from zero.
pub fn round_amount(value: Decimal) -> Result<i64> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(FareError::AmountOverflow)
}

/// The priced result of one trip interval.
///
/// `day_minutes + night_minutes == duration_minutes`, and `duration_minutes`
/// is never below [`MINIMUM_BILLABLE_MINUTES`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareBreakdown {
    pub duration_minutes: u32,
    pub day_minutes: u32,
    pub night_minutes: u32,
    pub day_rate: Decimal,
    pub night_rate: Decimal,
    /// Unrounded `day_minutes * day_rate + night_minutes * night_rate`.
    pub base_amount: Decimal,
    /// `round(base_amount * GST_RATE)`.
    pub tax_amount: i64,
    /// `round(base_amount + tax_amount)`.
    pub total_amount: i64,
    /// Label of the duration band that priced the trip, e.g. `121-240`.
    pub band: String,
    pub rate_table_version: String,
}

impl FareBreakdown {
    pub fn hours(&self) -> u32 {
        self.duration_minutes / 60
    }

    pub fn minutes(&self) -> u32 {
        self.duration_minutes % 60
    }

    /// Duration as `HH:MM`.
    pub fn clock_duration(&self) -> String {
        format!("{:02}:{:02}", self.hours(), self.minutes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(duration_minutes: u32) -> FareBreakdown {
        FareBreakdown {
            duration_minutes,
            day_minutes: duration_minutes,
            night_minutes: 0,
            day_rate: dec!(2.25),
            night_rate: dec!(2.60),
            base_amount: dec!(270),
            tax_amount: 49,
            total_amount: 319,
            band: "0-120".to_string(),
            rate_table_version: "test".to_string(),
        }
    }

    #[test]
    fn test_display_split() {
        let fare = breakdown(125);
        assert_eq!(fare.hours(), 2);
        assert_eq!(fare.minutes(), 5);
        assert_eq!(fare.clock_duration(), "02:05");
    }

    #[test]
    fn test_round_amount_halves_away_from_zero() {
        assert_eq!(round_amount(dec!(48.6)).unwrap(), 49);
        assert_eq!(round_amount(dec!(56.16)).unwrap(), 56);
        assert_eq!(round_amount(dec!(656.5)).unwrap(), 657);
        assert_eq!(round_amount(dec!(657.4999)).unwrap(), 657);
        assert_eq!(round_amount(dec!(0)).unwrap(), 0);
    }

    #[test]
    fn test_round_amount_overflow() {
        assert!(matches!(round_amount(Decimal::MAX), Err(FareError::AmountOverflow)));
    }

    #[test]
    fn test_long_trip_clock_duration() {
        assert_eq!(breakdown(1500).clock_duration(), "25:00");
    }
}
