use super::engine::{FareEngine, FareQuery};
use crate::domain::category::{RouteMode, UpliftFlag, ZoneClass};
use crate::domain::fare::{FareBreakdown, round_amount};
use crate::error::{FareError, Result};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// A trip as the lifecycle manager knows it when the driver ends it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripTicket {
    pub reference: String,
    pub started_at: NaiveDateTime,
    pub uplift: UpliftFlag,
    pub zone: ZoneClass,
    pub route: RouteMode,
}

impl TripTicket {
    fn query(&self, end: NaiveDateTime) -> FareQuery {
        FareQuery::new(self.started_at, end, self.uplift, self.zone, self.route)
    }
}

/// Channel-level charge applied on top of the engine's total.
///
/// This is a caller policy; the engine's figures are never altered by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", content = "factor", rename_all = "lowercase")]
pub enum ServiceCharge {
    #[default]
    None,
    Multiplier(Decimal),
}

impl ServiceCharge {
    /// The multiplier the driver dashboard applies at trip completion.
    pub const DRIVER_CHANNEL: ServiceCharge = ServiceCharge::Multiplier(dec!(1.15));

    pub fn multiplier(factor: Decimal) -> Result<Self> {
        if factor < Decimal::ONE {
            return Err(FareError::Configuration(format!(
                "service charge multiplier {factor} is below 1"
            )));
        }
        Ok(ServiceCharge::Multiplier(factor))
    }

    /// Billed amount for an engine total.
    pub fn apply(&self, total_amount: i64) -> Result<i64> {
        match self {
            ServiceCharge::None => Ok(total_amount),
            ServiceCharge::Multiplier(factor) => round_amount(
                Decimal::from(total_amount)
                    .checked_mul(*factor)
                    .ok_or(FareError::AmountOverflow)?,
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedTrip {
    pub reference: String,
    pub started_at: NaiveDateTime,
    pub completed_at: NaiveDateTime,
    pub breakdown: FareBreakdown,
    pub service_charge: ServiceCharge,
    /// Amount persisted as the trip's bill.
    pub billed_amount: i64,
}

/// Bills trips through a shared [`FareEngine`].
pub struct Biller<'a> {
    engine: &'a FareEngine,
    service_charge: ServiceCharge,
}

impl<'a> Biller<'a> {
    pub fn new(engine: &'a FareEngine) -> Self {
        Self {
            engine,
            service_charge: ServiceCharge::None,
        }
    }

    pub fn with_service_charge(self, service_charge: ServiceCharge) -> Self {
        Self {
            service_charge,
            ..self
        }
    }

    /// Prices a trip ending at `completed_at` and applies the service charge.
    pub fn complete(&self, ticket: &TripTicket, completed_at: NaiveDateTime) -> Result<CompletedTrip> {
        let breakdown = self.engine.compute_fare(&ticket.query(completed_at))?;
        let billed_amount = self.service_charge.apply(breakdown.total_amount)?;
        tracing::info!(
            trip = %ticket.reference,
            total_amount = breakdown.total_amount,
            billed_amount,
            "trip billed"
        );
        Ok(CompletedTrip {
            reference: ticket.reference.clone(),
            started_at: ticket.started_at,
            completed_at,
            breakdown,
            service_charge: self.service_charge,
            billed_amount,
        })
    }

    /// Running estimate for a trip still in progress at `now`.
    ///
    /// `now` may sit a moment before the recorded start when clocks disagree;
    /// the billing floor covers it.
    pub fn live_estimate(&self, ticket: &TripTicket, now: NaiveDateTime) -> Result<FareBreakdown> {
        self.engine.compute_fare(&ticket.query(now))
    }
}
