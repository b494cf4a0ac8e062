//! Domain layer: trip categories, the fare chart, shift classification and
//! the fare breakdown produced for every priced trip.

pub mod band;
pub mod category;
pub mod fare;
pub mod ports;
pub mod rate_table;
pub mod shift;
