use crate::error::FareError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Surcharge tier, driven by whether the customer asked for a uniformed driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "String")]
pub enum UpliftFlag {
    Standard,
    Uplift,
}

/// Trip geography: within the city or between cities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "String")]
pub enum ZoneClass {
    Local,
    Intercity,
}

/// Pricing track for the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "String")]
pub enum RouteMode {
    RoundTrip,
    OneWay,
}

/// Lowercases and strips separators so that `Round Trip`, `round-trip` and
/// `roundTrip` compare equal.
fn canonical(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

macro_rules! category {
    ($ty:ident, $kind:literal, [$($variant:ident => $wire:literal, $label:literal, [$($alias:literal),+]);+ $(;)?]) => {
        impl $ty {
            pub const ALL: [$ty; 2] = [$($ty::$variant),+];

            /// Canonical name used in configuration files and CSV output.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $wire),+
                }
            }

            /// Label shown to staff and customers.
            pub fn label(&self) -> &'static str {
                match self {
                    $($ty::$variant => $label),+
                }
            }
        }

        impl FromStr for $ty {
            type Err = FareError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match canonical(s).as_str() {
                    $($($alias)|+ => Ok($ty::$variant),)+
                    _ => Err(FareError::InvalidCategory {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $ty {
            type Error = FareError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

category!(UpliftFlag, "uplift flag", [
    Standard => "standard", "No", ["standard", "no"];
    Uplift => "uplift", "Yes", ["uplift", "yes"];
]);

category!(ZoneClass, "zone class", [
    Local => "local", "Instation", ["local", "instation"];
    Intercity => "intercity", "Outstation", ["intercity", "outstation"];
]);

category!(RouteMode, "route mode", [
    RoundTrip => "roundTrip", "Round Trip", ["roundtrip"];
    OneWay => "oneWay", "One Way", ["oneway"];
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        assert_eq!("standard".parse::<UpliftFlag>().unwrap(), UpliftFlag::Standard);
        assert_eq!("uplift".parse::<UpliftFlag>().unwrap(), UpliftFlag::Uplift);
        assert_eq!("local".parse::<ZoneClass>().unwrap(), ZoneClass::Local);
        assert_eq!("intercity".parse::<ZoneClass>().unwrap(), ZoneClass::Intercity);
        assert_eq!("roundTrip".parse::<RouteMode>().unwrap(), RouteMode::RoundTrip);
        assert_eq!("oneWay".parse::<RouteMode>().unwrap(), RouteMode::OneWay);
    }

    #[test]
    fn test_parse_product_aliases() {
        assert_eq!("Yes".parse::<UpliftFlag>().unwrap(), UpliftFlag::Uplift);
        assert_eq!("No".parse::<UpliftFlag>().unwrap(), UpliftFlag::Standard);
        assert_eq!("Outstation".parse::<ZoneClass>().unwrap(), ZoneClass::Intercity);
        assert_eq!(" Instation ".parse::<ZoneClass>().unwrap(), ZoneClass::Local);
        assert_eq!("Round Trip".parse::<RouteMode>().unwrap(), RouteMode::RoundTrip);
        assert_eq!("one-way".parse::<RouteMode>().unwrap(), RouteMode::OneWay);
        assert_eq!("ONE_WAY".parse::<RouteMode>().unwrap(), RouteMode::OneWay);
    }

    #[test]
    fn test_unknown_value_is_invalid_category() {
        let err = "maybe".parse::<UpliftFlag>().unwrap_err();
        match err {
            FareError::InvalidCategory { kind, value } => {
                assert_eq!(kind, "uplift flag");
                assert_eq!(value, "maybe");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!("".parse::<ZoneClass>().is_err());
        assert!("both".parse::<RouteMode>().is_err());
    }

    #[test]
    fn test_serde_uses_canonical_names() {
        assert_eq!(serde_json::to_string(&RouteMode::OneWay).unwrap(), "\"oneWay\"");
        let zone: ZoneClass = serde_json::from_str("\"Outstation\"").unwrap();
        assert_eq!(zone, ZoneClass::Intercity);
        assert!(serde_json::from_str::<UpliftFlag>("\"maybe\"").is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(UpliftFlag::Uplift.label(), "Yes");
        assert_eq!(ZoneClass::Local.label(), "Instation");
        assert_eq!(RouteMode::RoundTrip.label(), "Round Trip");
    }
}
