use crate::domain::ports::RateTableSource;
use crate::domain::rate_table::RateTable;
use crate::error::Result;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Loads a rate table override from a JSON document.
///
/// The document has the same shape the `table` command prints, so the
/// built-in chart can be dumped, edited and fed back in.
#[derive(Debug, Clone)]
pub struct JsonRateTable {
    path: PathBuf,
}

impl JsonRateTable {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parses and validates a table from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<RateTable> {
        let table: RateTable = serde_json::from_reader(reader)?;
        table.validate()?;
        Ok(table)
    }
}

impl RateTableSource for JsonRateTable {
    fn load(&self) -> Result<RateTable> {
        let file = File::open(&self.path)?;
        Self::from_reader(BufReader::new(file))
    }

    fn describe(&self) -> String {
        format!("rate table file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::{RouteMode, UpliftFlag, ZoneClass};
    use crate::error::FareError;
    use crate::infrastructure::builtin::builtin_table;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_dump_loads_back() {
        let table = builtin_table().unwrap();
        let json = serde_json::to_vec(table.as_ref()).unwrap();
        let loaded = JsonRateTable::from_reader(json.as_slice()).unwrap();
        assert_eq!(&loaded, table.as_ref());
    }

    #[test]
    fn test_load_from_file() {
        let mut table = serde_json::to_value(builtin_table().unwrap().as_ref()).unwrap();
        table["version"] = "custom-7".into();
        table["buckets"][0]["bands"][0]["day_rate"] = "3.00".into();

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{table}").unwrap();

        let source = JsonRateTable::new(file.path());
        let loaded = source.load().unwrap();
        assert_eq!(loaded.version(), "custom-7");
        let band = loaded
            .band_for(UpliftFlag::Standard, ZoneClass::Local, RouteMode::RoundTrip, 60)
            .unwrap();
        assert_eq!(band.day_rate, dec!(3.00));
        assert!(source.describe().contains("rate table file"));
    }

    #[test]
    fn test_broken_coverage_is_rejected() {
        let mut table = serde_json::to_value(builtin_table().unwrap().as_ref()).unwrap();
        table["buckets"][3]["bands"][8]["max_minutes"] = 9000.into();
        let json = table.to_string();

        let result = JsonRateTable::from_reader(json.as_bytes());
        assert!(matches!(result, Err(FareError::Configuration(_))));
    }

    #[test]
    fn test_unknown_category_in_file_is_rejected() {
        let mut table = serde_json::to_value(builtin_table().unwrap().as_ref()).unwrap();
        table["buckets"][0]["zone"] = "suburban".into();
        let json = table.to_string();

        assert!(matches!(
            JsonRateTable::from_reader(json.as_bytes()),
            Err(FareError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = JsonRateTable::new("does/not/exist.json");
        assert!(matches!(source.load(), Err(FareError::Io(_))));
    }
}
