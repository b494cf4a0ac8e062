//! The fare chart shipped with the crate.
//!
//! Rates are per minute and identical for every caller. Bump
//! [`RATE_TABLE_VERSION`] whenever a figure changes.

use crate::domain::band::DurationBand;
use crate::domain::category::{RouteMode, UpliftFlag, ZoneClass};
use crate::domain::ports::RateTableSource;
use crate::domain::rate_table::{COVERAGE_LIMIT_MINUTES, RateBucket, RateTable};
use crate::error::{FareError, Result};
use rust_decimal_macros::dec;
use std::sync::{Arc, OnceLock};

pub const RATE_TABLE_VERSION: &str = "2024.1";

/// Upper bounds of the nine duration bands, shared by every bucket.
const BAND_LIMITS: [u32; 9] = [120, 240, 480, 600, 720, 1080, 1440, 8640, COVERAGE_LIMIT_MINUTES];

macro_rules! bands {
    ($(($day:tt, $night:tt)),+ $(,)?) => {{
        let rates = [$((dec!($day), dec!($night))),+];
        let mut bands = [DurationBand::new(0, 0, dec!(0), dec!(0)); 9];
        let mut min = 0;
        let mut i = 0;
        while i < 9 {
            bands[i] = DurationBand::new(min, BAND_LIMITS[i], rates[i].0, rates[i].1);
            min = BAND_LIMITS[i] + 1;
            i += 1;
        }
        bands
    }};
}

const STANDARD_LOCAL_ROUND_TRIP: [DurationBand; 9] = bands![
    (2.25, 2.60), (2.15, 2.55), (2.10, 2.40), (1.90, 2.35), (1.85, 2.30),
    (1.70, 1.95), (1.50, 1.55), (1.15, 1.15), (1.05, 1.05),
];
const STANDARD_LOCAL_ONE_WAY: [DurationBand; 9] = bands![
    (2.70, 5.55), (2.60, 5.10), (2.40, 4.60), (2.15, 3.15), (2.15, 3.15),
    (2.10, 2.60), (1.80, 1.90), (1.50, 1.50), (1.30, 1.30),
];
const STANDARD_INTERCITY_ROUND_TRIP: [DurationBand; 9] = bands![
    (2.60, 3.05), (2.55, 3.00), (2.25, 2.45), (2.15, 2.40), (2.15, 2.40),
    (2.00, 2.25), (1.70, 1.70), (1.20, 1.20), (1.15, 1.15),
];
const STANDARD_INTERCITY_ONE_WAY: [DurationBand; 9] = bands![
    (6.30, 6.30), (5.90, 5.90), (5.90, 5.90), (5.90, 5.90), (5.90, 5.90),
    (5.20, 5.20), (3.80, 3.80), (3.00, 3.00), (2.15, 2.15),
];
const UPLIFT_LOCAL_ROUND_TRIP: [DurationBand; 9] = bands![
    (2.30, 2.65), (2.20, 2.60), (2.15, 2.45), (1.95, 2.40), (1.90, 2.35),
    (1.75, 2.00), (1.55, 1.60), (1.20, 1.20), (1.10, 1.10),
];
const UPLIFT_LOCAL_ONE_WAY: [DurationBand; 9] = bands![
    (2.75, 5.60), (2.65, 5.15), (2.45, 4.65), (2.20, 3.20), (2.20, 3.20),
    (2.15, 2.65), (1.85, 1.95), (1.55, 1.55), (1.35, 1.35),
];
const UPLIFT_INTERCITY_ROUND_TRIP: [DurationBand; 9] = bands![
    (2.65, 3.10), (2.60, 3.05), (2.30, 2.50), (2.20, 2.45), (2.20, 2.45),
    (2.05, 2.30), (1.75, 1.75), (1.25, 1.25), (1.20, 1.20),
];
const UPLIFT_INTERCITY_ONE_WAY: [DurationBand; 9] = bands![
    (6.35, 6.35), (5.95, 5.95), (5.95, 5.95), (5.95, 5.95), (5.95, 5.95),
    (5.25, 5.25), (3.85, 3.85), (3.05, 3.05), (2.20, 2.20),
];

fn bucket(uplift: UpliftFlag, zone: ZoneClass, route: RouteMode, bands: &[DurationBand]) -> RateBucket {
    RateBucket {
        uplift,
        zone,
        route,
        bands: bands.to_vec(),
    }
}

fn build() -> Result<RateTable> {
    use RouteMode::*;
    use UpliftFlag::*;
    use ZoneClass::*;

    RateTable::new(
        RATE_TABLE_VERSION,
        vec![
            bucket(Standard, Local, RoundTrip, &STANDARD_LOCAL_ROUND_TRIP),
            bucket(Standard, Local, OneWay, &STANDARD_LOCAL_ONE_WAY),
            bucket(Standard, Intercity, RoundTrip, &STANDARD_INTERCITY_ROUND_TRIP),
            bucket(Standard, Intercity, OneWay, &STANDARD_INTERCITY_ONE_WAY),
            bucket(Uplift, Local, RoundTrip, &UPLIFT_LOCAL_ROUND_TRIP),
            bucket(Uplift, Local, OneWay, &UPLIFT_LOCAL_ONE_WAY),
            bucket(Uplift, Intercity, RoundTrip, &UPLIFT_INTERCITY_ROUND_TRIP),
            bucket(Uplift, Intercity, OneWay, &UPLIFT_INTERCITY_ONE_WAY),
        ],
    )
}

/// The built-in table, constructed and validated once per process.
pub fn builtin_table() -> Result<Arc<RateTable>> {
    static TABLE: OnceLock<std::result::Result<Arc<RateTable>, String>> = OnceLock::new();
    TABLE
        .get_or_init(|| build().map(Arc::new).map_err(|e| e.to_string()))
        .clone()
        .map_err(FareError::Configuration)
}

/// [`RateTableSource`] for the shipped fare chart.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinRateTable;

impl RateTableSource for BuiltinRateTable {
    fn load(&self) -> Result<RateTable> {
        builtin_table().map(|table| table.as_ref().clone())
    }

    fn describe(&self) -> String {
        format!("built-in rate table {RATE_TABLE_VERSION}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_valid() {
        let table = builtin_table().unwrap();
        assert_eq!(table.version(), RATE_TABLE_VERSION);
        assert_eq!(table.buckets().len(), 8);
        table.validate().unwrap();
    }

    #[test]
    fn test_builtin_table_is_shared() {
        let a = builtin_table().unwrap();
        let b = builtin_table().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_every_bucket_has_nine_bands() {
        let table = builtin_table().unwrap();
        for bucket in table.buckets() {
            let labels: Vec<String> = bucket.bands.iter().map(|b| b.to_string()).collect();
            assert_eq!(
                labels,
                [
                    "0-120", "121-240", "241-480", "481-600", "601-720", "721-1080", "1081-1440",
                    "1441-8640", "8641-1000000"
                ]
            );
        }
    }

    #[test]
    fn test_reference_rates() {
        let table = builtin_table().unwrap();
        let band = table
            .band_for(UpliftFlag::Standard, ZoneClass::Local, RouteMode::RoundTrip, 120)
            .unwrap();
        assert_eq!((band.day_rate, band.night_rate), (dec!(2.25), dec!(2.60)));

        let band = table
            .band_for(UpliftFlag::Standard, ZoneClass::Intercity, RouteMode::OneWay, 481)
            .unwrap();
        assert_eq!(band.day_rate, dec!(5.90));

        let band = table
            .band_for(UpliftFlag::Uplift, ZoneClass::Local, RouteMode::OneWay, 9000)
            .unwrap();
        assert_eq!(band.day_rate, dec!(1.35));
    }

    #[test]
    fn test_every_minute_matches_exactly_one_band() {
        let table = builtin_table().unwrap();
        for bucket in table.buckets() {
            let mut band_index = 0;
            for minutes in 0..=COVERAGE_LIMIT_MINUTES {
                let matching = bucket.bands.iter().filter(|b| b.contains(minutes)).count();
                assert_eq!(matching, 1, "{minutes} minutes in {bucket:?}");
                if !bucket.bands[band_index].contains(minutes) {
                    band_index += 1;
                }
                assert!(bucket.bands[band_index].contains(minutes));
            }
        }
    }

    #[test]
    fn test_source_describes_version() {
        let source = BuiltinRateTable;
        assert!(source.describe().contains(RATE_TABLE_VERSION));
        assert_eq!(source.load().unwrap().version(), RATE_TABLE_VERSION);
    }
}
