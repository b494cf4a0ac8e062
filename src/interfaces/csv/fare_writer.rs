use crate::domain::fare::FareBreakdown;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct FareRow<'a> {
    trip: &'a str,
    duration_minutes: u32,
    day_minutes: u32,
    night_minutes: u32,
    day_rate: Decimal,
    night_rate: Decimal,
    base_amount: Decimal,
    tax_amount: i64,
    total_amount: i64,
}

/// Writes priced trips as CSV, one row per trip.
///
/// Decimals are normalized, so `270.00` is written as `270`.
pub struct FareWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> FareWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_fare(&mut self, trip: &str, fare: &FareBreakdown) -> Result<()> {
        self.writer.serialize(FareRow {
            trip,
            duration_minutes: fare.duration_minutes,
            day_minutes: fare.day_minutes,
            night_minutes: fare.night_minutes,
            day_rate: fare.day_rate.normalize(),
            night_rate: fare.night_rate.normalize(),
            base_amount: fare.base_amount.normalize(),
            tax_amount: fare.tax_amount,
            total_amount: fare.total_amount,
        })?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
