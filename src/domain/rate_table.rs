use super::band::DurationBand;
use super::category::{RouteMode, UpliftFlag, ZoneClass};
use crate::error::{FareError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Every bucket must price trips at least this long.
pub const COVERAGE_LIMIT_MINUTES: u32 = 1_000_000;

/// The ordered bands for one `(uplift, zone, route)` combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBucket {
    pub uplift: UpliftFlag,
    pub zone: ZoneClass,
    pub route: RouteMode,
    pub bands: Vec<DurationBand>,
}

impl RateBucket {
    fn matches(&self, uplift: UpliftFlag, zone: ZoneClass, route: RouteMode) -> bool {
        self.uplift == uplift && self.zone == zone && self.route == route
    }

    fn describe(&self) -> String {
        format!("{}/{}/{}", self.uplift, self.zone, self.route)
    }
}

/// Versioned fare chart keyed by the three trip categories.
///
/// A table is immutable once built. Tables coming from outside the crate
/// (for example a JSON override) must pass [`RateTable::validate`] before an
/// engine will accept them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    version: String,
    buckets: Vec<RateBucket>,
}

impl RateTable {
    /// Builds and validates a table.
    pub fn new(version: impl Into<String>, buckets: Vec<RateBucket>) -> Result<Self> {
        let table = Self {
            version: version.into(),
            buckets,
        };
        table.validate()?;
        Ok(table)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn buckets(&self) -> &[RateBucket] {
        &self.buckets
    }

    /// Returns the ordered bands for a category combination.
    pub fn bands(&self, uplift: UpliftFlag, zone: ZoneClass, route: RouteMode) -> Result<&[DurationBand]> {
        self.buckets
            .iter()
            .find(|bucket| bucket.matches(uplift, zone, route))
            .map(|bucket| bucket.bands.as_slice())
            .ok_or_else(|| {
                FareError::Configuration(format!(
                    "no rate bucket for {uplift}/{zone}/{route} in table {}",
                    self.version
                ))
            })
    }

    /// Selects the first band whose inclusive range contains `total_minutes`.
    pub fn band_for(
        &self,
        uplift: UpliftFlag,
        zone: ZoneClass,
        route: RouteMode,
        total_minutes: u32,
    ) -> Result<&DurationBand> {
        self.bands(uplift, zone, route)?
            .iter()
            .find(|band| band.contains(total_minutes))
            .ok_or_else(|| {
                FareError::Configuration(format!(
                    "no band covers {total_minutes} minutes for {uplift}/{zone}/{route} in table {}",
                    self.version
                ))
            })
    }

    /// Checks that every category combination is present exactly once and
    /// that its bands cover `[0, COVERAGE_LIMIT_MINUTES]` without gaps or
    /// overlaps.
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(FareError::Configuration("rate table version is empty".to_string()));
        }

        for uplift in UpliftFlag::ALL {
            for zone in ZoneClass::ALL {
                for route in RouteMode::ALL {
                    let count = self
                        .buckets
                        .iter()
                        .filter(|bucket| bucket.matches(uplift, zone, route))
                        .count();
                    if count != 1 {
                        return Err(FareError::Configuration(format!(
                            "expected exactly one bucket for {uplift}/{zone}/{route}, found {count}"
                        )));
                    }
                }
            }
        }

        self.buckets.iter().try_for_each(validate_bucket)
    }
}

fn validate_bucket(bucket: &RateBucket) -> Result<()> {
    let name = bucket.describe();
    let (first, last) = match (bucket.bands.first(), bucket.bands.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(FareError::Configuration(format!("bucket {name} has no bands"))),
    };

    if first.min_minutes != 0 {
        return Err(FareError::Configuration(format!(
            "bucket {name} starts at {} instead of 0",
            first.min_minutes
        )));
    }
    if last.max_minutes < COVERAGE_LIMIT_MINUTES {
        return Err(FareError::Configuration(format!(
            "bucket {name} ends at {} instead of covering {COVERAGE_LIMIT_MINUTES}",
            last.max_minutes
        )));
    }

    for band in &bucket.bands {
        if band.min_minutes > band.max_minutes {
            return Err(FareError::Configuration(format!("bucket {name} has inverted band {band}")));
        }
        if band.day_rate < Decimal::ZERO || band.night_rate < Decimal::ZERO {
            return Err(FareError::Configuration(format!("bucket {name} has a negative rate in band {band}")));
        }
    }

    for pair in bucket.bands.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if prev.max_minutes.checked_add(1) != Some(next.min_minutes) {
            return Err(FareError::Configuration(format!(
                "bucket {name} is not contiguous between {prev} and {next}"
            )));
        }
    }

    Ok(())
}
