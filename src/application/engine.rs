use crate::domain::category::{RouteMode, UpliftFlag, ZoneClass};
use crate::domain::fare::{FareBreakdown, GST_RATE, MINIMUM_BILLABLE_MINUTES, round_amount};
use crate::domain::ports::RateTableSource;
use crate::domain::rate_table::{COVERAGE_LIMIT_MINUTES, RateTable};
use crate::domain::shift::{classify_interval, extend_from};
use crate::error::{FareError, Result};
use crate::infrastructure::builtin::builtin_table;
use chrono::{NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Bounds on the intervals the engine agrees to price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineLimits {
    /// Longest interval accepted, in minutes.
    pub max_span_minutes: u32,
    /// How far `end` may precede `start` before the interval is rejected.
    pub skew_tolerance_minutes: u32,
}

impl EngineLimits {
    pub const DEFAULT_MAX_SPAN_DAYS: u32 = 90;

    /// Span limit in days, capped at the minutes every valid table covers.
    pub fn with_max_span_days(days: u32) -> Self {
        Self {
            max_span_minutes: days.saturating_mul(24 * 60).min(COVERAGE_LIMIT_MINUTES),
            ..Self::default()
        }
    }
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            max_span_minutes: Self::DEFAULT_MAX_SPAN_DAYS * 24 * 60,
            skew_tolerance_minutes: 5,
        }
    }
}

/// One trip interval to price, with its categories.
///
/// Timestamps are local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FareQuery {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub uplift: UpliftFlag,
    pub zone: ZoneClass,
    pub route: RouteMode,
}

impl FareQuery {
    pub fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        uplift: UpliftFlag,
        zone: ZoneClass,
        route: RouteMode,
    ) -> Self {
        Self {
            start,
            end,
            uplift,
            zone,
            route,
        }
    }

    /// Builds a query from untyped category values, as submitted by a form.
    ///
    /// Fails with [`FareError::InvalidCategory`] on the first unrecognized value.
    pub fn parse(start: NaiveDateTime, end: NaiveDateTime, uplift: &str, zone: &str, route: &str) -> Result<Self> {
        Ok(Self::new(start, end, uplift.parse()?, zone.parse()?, route.parse()?))
    }
}

/// Prices trip intervals against an immutable rate table.
///
/// The engine holds no mutable state; a single instance can be shared across
/// threads and used by the estimator, trip completion and invoicing alike.
#[derive(Debug, Clone)]
pub struct FareEngine {
    table: Arc<RateTable>,
    limits: EngineLimits,
}

impl FareEngine {
    /// Creates an engine over `table`, which must pass validation.
    pub fn new(table: impl Into<Arc<RateTable>>, limits: EngineLimits) -> Result<Self> {
        let table = table.into();
        table.validate()?;
        Ok(Self { table, limits })
    }

    /// Engine over the built-in rate table with default limits.
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            table: builtin_table()?,
            limits: EngineLimits::default(),
        })
    }

    /// Engine over whatever table `source` provides.
    pub fn from_source(source: &dyn RateTableSource, limits: EngineLimits) -> Result<Self> {
        let table = source.load()?;
        tracing::info!(source = %source.describe(), version = table.version(), "rate table loaded");
        Self::new(table, limits)
    }

    pub fn with_limits(self, limits: EngineLimits) -> Self {
        Self { limits, ..self }
    }

    pub fn table(&self) -> &RateTable {
        &self.table
    }

    /// Prices one trip interval.
    ///
    /// Elapsed time is classified minute by minute into day and night. Trips
    /// shorter than [`MINIMUM_BILLABLE_MINUTES`] are padded forward from
    /// `end`, the padding classified the same way. The final duration picks
    /// the band; tax is rounded from the unrounded base, and the total is the
    /// rounded sum of base and tax.
    pub fn compute_fare(&self, query: &FareQuery) -> Result<FareBreakdown> {
        self.check_interval(query)?;

        let mut split = classify_interval(query.start, query.end);
        if split.total() < MINIMUM_BILLABLE_MINUTES {
            extend_from(query.end, MINIMUM_BILLABLE_MINUTES - split.total(), &mut split);
        }
        let duration_minutes = split.total();

        let band = self
            .table
            .band_for(query.uplift, query.zone, query.route, duration_minutes)
            .inspect_err(|e| tracing::error!(error = %e, "rate table does not cover trip"))?;

        let base_amount = Decimal::from(split.day)
            .checked_mul(band.day_rate)
            .zip(Decimal::from(split.night).checked_mul(band.night_rate))
            .and_then(|(day, night)| day.checked_add(night))
            .ok_or(FareError::AmountOverflow)?;
        let tax_amount = round_amount(
            base_amount
                .checked_mul(GST_RATE)
                .ok_or(FareError::AmountOverflow)?,
        )?;
        let total_amount = round_amount(
            base_amount
                .checked_add(Decimal::from(tax_amount))
                .ok_or(FareError::AmountOverflow)?,
        )?;

        tracing::debug!(
            uplift = %query.uplift,
            zone = %query.zone,
            route = %query.route,
            duration_minutes,
            day_minutes = split.day,
            night_minutes = split.night,
            band = %band,
            total_amount,
            "fare computed"
        );

        Ok(FareBreakdown {
            duration_minutes,
            day_minutes: split.day,
            night_minutes: split.night,
            day_rate: band.day_rate,
            night_rate: band.night_rate,
            base_amount,
            tax_amount,
            total_amount,
            band: band.to_string(),
            rate_table_version: self.table.version().to_string(),
        })
    }

    fn check_interval(&self, query: &FareQuery) -> Result<()> {
        let elapsed = query.end - query.start;
        let tolerance = TimeDelta::minutes(i64::from(self.limits.skew_tolerance_minutes));
        if elapsed < -tolerance {
            return Err(FareError::InvalidInterval(format!(
                "end {} is more than {} minutes before start {}",
                query.end, self.limits.skew_tolerance_minutes, query.start
            )));
        }
        let max_span_minutes = self.limits.max_span_minutes.min(COVERAGE_LIMIT_MINUTES);
        if elapsed > TimeDelta::minutes(i64::from(max_span_minutes)) {
            return Err(FareError::InvalidInterval(format!(
                "interval of {} minutes exceeds the {} minute maximum",
                elapsed.num_minutes(),
                max_span_minutes
            )));
        }
        Ok(())
    }
}
