use crate::application::engine::FareQuery;
use crate::domain::category::{RouteMode, UpliftFlag, ZoneClass};
use crate::error::{FareError, Result};
use crate::interfaces::timestamp::deserialize_timestamp;
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::io::Read;

/// One row of a trip CSV: `trip,start,end,uplift,zone,route`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct TripRecord {
    pub trip: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub start: NaiveDateTime,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub end: NaiveDateTime,
    pub uplift: UpliftFlag,
    pub zone: ZoneClass,
    pub route: RouteMode,
}

impl TripRecord {
    pub fn query(&self) -> FareQuery {
        FareQuery::new(self.start, self.end, self.uplift, self.zone, self.route)
    }
}

/// Streams trip rows; short or malformed rows surface as per-row errors.
pub struct TripReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> TripReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn trips(self) -> impl Iterator<Item = Result<TripRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(FareError::from))
    }
}
