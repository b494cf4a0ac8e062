use super::rate_table::RateTable;
use crate::error::Result;

/// Somewhere a rate table can be loaded from.
///
/// Implementations return a table that has already passed
/// [`RateTable::validate`].
pub trait RateTableSource: Send + Sync {
    fn load(&self) -> Result<RateTable>;

    /// Short human-readable origin, used in logs.
    fn describe(&self) -> String;
}

pub type RateTableSourceBox = Box<dyn RateTableSource>;
