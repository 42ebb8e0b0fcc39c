//! Unit conversion.
//!
//! Units are grouped into categories. Linear categories store each unit's
//! factor relative to the category's base unit (meter, kilogram, square
//! meter). Temperature stores Celsius-to-unit formulas, so conversions go
//! through Celsius first.

use crate::calculator::format_general;
use crate::error::{CalcError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitCategory {
    Length,
    Weight,
    Temperature,
    Area,
}

impl UnitCategory {
    pub const ALL: [UnitCategory; 4] = [
        UnitCategory::Length,
        UnitCategory::Weight,
        UnitCategory::Temperature,
        UnitCategory::Area,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Length => "Length",
            Self::Weight => "Weight",
            Self::Temperature => "Temperature",
            Self::Area => "Area",
        }
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy)]
enum Conversion {
    /// Ratio to the category's base unit.
    Factor(f64),
    /// Formula from Celsius to this unit.
    FromCelsius(fn(f64) -> f64),
}

const LENGTH: &[(&str, Conversion)] = &[
    ("m", Conversion::Factor(1.0)),
    ("km", Conversion::Factor(1000.0)),
    ("cm", Conversion::Factor(0.01)),
    ("mm", Conversion::Factor(0.001)),
    ("in", Conversion::Factor(0.0254)),
    ("ft", Conversion::Factor(0.3048)),
];

const WEIGHT: &[(&str, Conversion)] = &[
    ("kg", Conversion::Factor(1.0)),
    ("g", Conversion::Factor(0.001)),
    ("mg", Conversion::Factor(0.000001)),
    ("lb", Conversion::Factor(0.45359237)),
    ("oz", Conversion::Factor(0.028349523125)),
];

const TEMPERATURE: &[(&str, Conversion)] = &[
    ("C", Conversion::FromCelsius(celsius_to_celsius)),
    ("F", Conversion::FromCelsius(celsius_to_fahrenheit)),
    ("K", Conversion::FromCelsius(celsius_to_kelvin)),
];

const AREA: &[(&str, Conversion)] = &[
    ("m2", Conversion::Factor(1.0)),
    ("km2", Conversion::Factor(1_000_000.0)),
    ("cm2", Conversion::Factor(0.0001)),
    ("ha", Conversion::Factor(10_000.0)),
    ("acre", Conversion::Factor(4046.8564224)),
];

fn celsius_to_celsius(c: f64) -> f64 {
    c
}

fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

fn celsius_to_kelvin(c: f64) -> f64 {
    c + 273.15
}

fn table(category: UnitCategory) -> &'static [(&'static str, Conversion)] {
    match category {
        UnitCategory::Length => LENGTH,
        UnitCategory::Weight => WEIGHT,
        UnitCategory::Temperature => TEMPERATURE,
        UnitCategory::Area => AREA,
    }
}

fn lookup(category: UnitCategory, unit: &str) -> Option<Conversion> {
    table(category)
        .iter()
        .find(|(symbol, _)| *symbol == unit)
        .map(|(_, conversion)| *conversion)
}

/// All unit categories, in display order.
pub fn categories() -> &'static [UnitCategory] {
    &UnitCategory::ALL
}

/// Unit symbols of a category, base unit first.
pub fn units_in(category: UnitCategory) -> Vec<&'static str> {
    table(category).iter().map(|(symbol, _)| *symbol).collect()
}

/// The category containing both units, if any.
pub fn category_of(from_unit: &str, to_unit: &str) -> Option<UnitCategory> {
    UnitCategory::ALL.into_iter().find(|&category| {
        lookup(category, from_unit).is_some() && lookup(category, to_unit).is_some()
    })
}

/// Convert `value` from `from_unit` to `to_unit`. Both units must belong to
/// the same category. No rounding is applied.
pub fn convert(value: f64, from_unit: &str, to_unit: &str) -> Result<f64> {
    let unsupported = || CalcError::UnsupportedConversion {
        from: from_unit.to_string(),
        to: to_unit.to_string(),
    };

    // Both units must share a category; this also rejects unknown units
    let category = category_of(from_unit, to_unit).ok_or_else(unsupported)?;
    let from = lookup(category, from_unit).ok_or_else(unsupported)?;
    let to = lookup(category, to_unit).ok_or_else(unsupported)?;

    match (from, to) {
        (Conversion::Factor(from_factor), Conversion::Factor(to_factor)) => {
            Ok(value * from_factor / to_factor)
        }
        (Conversion::FromCelsius(_), Conversion::FromCelsius(from_celsius)) => {
            // Only Celsius-to-unit formulas are stored, so invert to Celsius first
            let celsius = match from_unit {
                "F" => (value - 32.0) * 5.0 / 9.0,
                "K" => value - 273.15,
                _ => value,
            };
            Ok(from_celsius(celsius))
        }
        _ => Err(unsupported()),
    }
}

lazy_static! {
    /// `<value> <unit> to|in <unit>`, e.g. `100 km to ft` or `32F in C`.
    static ref CONVERSION_REQUEST: Regex = Regex::new(
        r"^(?P<value>[+-]?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?) ?(?P<from>[A-Za-z][A-Za-z0-9]*) (?:to|in) (?P<to>[A-Za-z][A-Za-z0-9]*)$"
    ).unwrap();
}

/// A conversion request typed by the user.
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionRequest {
    pub value: f64,
    pub from_unit: String,
    pub to_unit: String,
}

impl ConversionRequest {
    /// Run the conversion and describe it for the history log.
    pub fn run(&self) -> Result<ConversionResult> {
        let value = convert(self.value, &self.from_unit, &self.to_unit)?;
        let display_result = format!("{} {}", format_general(value, 6), self.to_unit);
        let record = format!(
            "{} {} = {}",
            format_general(self.value, 6),
            self.from_unit,
            display_result
        );
        Ok(ConversionResult {
            value,
            display_result,
            record,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConversionResult {
    pub value: f64,
    pub display_result: String,
    pub record: String,
}

/// Recognize a conversion request in already-normalized input.
pub fn parse_request(input: &str) -> Option<ConversionRequest> {
    let caps = CONVERSION_REQUEST.captures(input)?;
    Some(ConversionRequest {
        value: caps["value"].parse().ok()?,
        from_unit: caps["from"].to_string(),
        to_unit: caps["to"].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_known_values() {
        assert!(close(convert(100.0, "C", "F").unwrap(), 212.0));
        assert!(close(convert(0.0, "C", "K").unwrap(), 273.15));
        assert!(close(convert(1000.0, "m", "km").unwrap(), 1.0));
        assert!(close(convert(212.0, "F", "K").unwrap(), 373.15));
        assert!(close(convert(1.0, "lb", "oz").unwrap(), 16.0));
        assert!(close(convert(1.0, "ha", "m2").unwrap(), 10_000.0));
    }

    #[test]
    fn test_cross_category_rejected() {
        let err = convert(1.0, "m", "kg").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conversion);
        assert!(convert(1.0, "m", "parsec").is_err());
        // Units are case-sensitive.
        assert!(convert(1.0, "c", "F").is_err());
    }

    #[test]
    fn test_round_trip_every_pair() {
        for &category in categories() {
            let units = units_in(category);
            for from in &units {
                for to in &units {
                    for value in [-40.0, 0.0, 1.5, 1234.5678] {
                        let there = convert(value, from, to).unwrap();
                        let back = convert(there, to, from).unwrap();
                        assert!(close(back, value), "{category}: {value} {from} -> {to} -> {back}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_identity_conversion() {
        assert_eq!(convert(42.0, "K", "K").unwrap(), 42.0);
        assert_eq!(convert(42.0, "km", "km").unwrap(), 42.0);
    }

    #[test]
    fn test_category_of() {
        assert_eq!(category_of("C", "K"), Some(UnitCategory::Temperature));
        assert_eq!(category_of("acre", "ha"), Some(UnitCategory::Area));
        assert_eq!(category_of("g", "m"), None);
    }

    #[test]
    fn test_parse_request() {
        assert_eq!(
            parse_request("100 km to m"),
            Some(ConversionRequest {
                value: 100.0,
                from_unit: "km".into(),
                to_unit: "m".into()
            })
        );
        assert_eq!(parse_request("-40F in C").unwrap().value, -40.0);
        assert_eq!(parse_request("3+5"), None);
        assert_eq!(parse_request("km to m"), None);
    }

    #[test]
    fn test_request_run() {
        let result = parse_request("100 C to F").unwrap().run().unwrap();
        assert_eq!(result.display_result, "212 F");
        assert_eq!(result.record, "100 C = 212 F");
    }
}
