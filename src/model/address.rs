//! Addresses and the closed city table

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The fixed set of supported cities with their postal codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    Zagreb,
    Split,
    Rijeka,
    Osijek,
    Zadar,
    SlavonskiBrod,
    VelikaGorica,
}

impl City {
    pub const ALL: [City; 7] = [
        City::Zagreb,
        City::Split,
        City::Rijeka,
        City::Osijek,
        City::Zadar,
        City::SlavonskiBrod,
        City::VelikaGorica,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            City::Zagreb => "Zagreb",
            City::Split => "Split",
            City::Rijeka => "Rijeka",
            City::Osijek => "Osijek",
            City::Zadar => "Zadar",
            City::SlavonskiBrod => "Slavonski Brod",
            City::VelikaGorica => "Velika Gorica",
        }
    }

    pub fn postal_code(&self) -> &'static str {
        match self {
            City::Zagreb => "10000",
            City::Split => "21000",
            City::Rijeka => "51000",
            City::Osijek => "31000",
            City::Zadar => "23000",
            City::SlavonskiBrod => "35000",
            City::VelikaGorica => "10410",
        }
    }
}

impl FromStr for City {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::ALL
            .iter()
            .find(|c| c.name() == s)
            .copied()
            .ok_or_else(|| ValidationError::CityNotSupported {
                name: s.to_string(),
                supported: City::ALL
                    .iter()
                    .map(|c| c.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.postal_code())
    }
}

/// A factory address. All fields are known at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub house_number: String,
    pub city: City,
}

impl Address {
    pub fn new(street: impl Into<String>, house_number: impl Into<String>, city: City) -> Self {
        Self {
            street: street.into(),
            house_number: house_number.into(),
            city,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}, {}", self.street, self.house_number, self.city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_cities_parse() {
        assert_eq!("Zagreb".parse::<City>().unwrap(), City::Zagreb);
        assert_eq!("Slavonski Brod".parse::<City>().unwrap(), City::SlavonskiBrod);
        assert_eq!("Velika Gorica".parse::<City>().unwrap(), City::VelikaGorica);
    }

    #[test]
    fn test_unknown_city_rejected() {
        let err = "Atlantis".parse::<City>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Atlantis"));
        assert!(msg.contains("Zagreb"));
    }

    #[test]
    fn test_postal_codes() {
        assert_eq!(City::Zagreb.postal_code(), "10000");
        assert_eq!(City::VelikaGorica.postal_code(), "10410");
    }
}
