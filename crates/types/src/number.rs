use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use std::fmt;
use std::str::FromStr;

/// A numeric leaf.
///
/// Numbers are held as exact decimals whenever the magnitude allows it, so that
/// `1`, `1.0` and `1.00` are the same number. Values outside the decimal range
/// (e.g. `1e300`) fall back to a double.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Decimal(Decimal),
    Float(f64),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Decimal(d) => d.to_f64().unwrap_or(f64::NAN),
            Number::Float(f) => *f,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Decimal(d) if d.fract().is_zero() => d.to_i64(),
            Number::Decimal(_) => None,
            Number::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            Number::Float(_) => None,
        }
    }

    /// Numeric equality that ignores the representation: `1 == 1.0`.
    pub fn numeric_eq(&self, other: &Number) -> bool {
        match (self, other) {
            (Number::Decimal(a), Number::Decimal(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }

    /// Parses the textual form produced by a JSON parser.
    pub fn parse(text: &str) -> Option<Number> {
        let text = text.trim();
        if let Ok(d) = Decimal::from_str(text) {
            return Some(Number::Decimal(d));
        }
        if let Ok(d) = Decimal::from_scientific(text) {
            return Some(Number::Decimal(d));
        }
        text.parse::<f64>().ok().map(Number::Float)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.numeric_eq(other)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Decimal(Decimal::from(value))
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Number::Decimal(Decimal::from(value))
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Decimal(Decimal::from(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        // Go through the shortest round-trip text so 0.1 stays 0.1.
        if value.is_finite()
            && let Some(Number::Decimal(d)) = Number::parse(&value.to_string())
        {
            return Number::Decimal(d);
        }
        Decimal::from_f64(value)
            .filter(|_| value.is_finite() && value.abs() < 1e28)
            .map(Number::Decimal)
            .unwrap_or(Number::Float(value))
    }
}

impl From<Decimal> for Number {
    fn from(value: Decimal) -> Self {
        Number::Decimal(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Decimal(d) => write!(f, "{}", d.normalize()),
            Number::Float(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_and_decimal_forms_are_equal() {
        let a = Number::parse("1").unwrap();
        let b = Number::parse("1.00").unwrap();
        assert_eq!(a, b);
        assert_eq!(Number::from(0.1), Number::parse("0.100").unwrap());
    }

    #[test]
    fn test_large_magnitude_falls_back_to_float() {
        let n = Number::parse("1e300").unwrap();
        assert!(matches!(n, Number::Float(_)));
        assert_eq!(n, Number::from(1e300));
    }

    #[test]
    fn test_scientific_notation() {
        let n = Number::parse("2.5e3").unwrap();
        assert_eq!(n.as_i64(), Some(2500));
    }

    #[test]
    fn test_display_is_normalized() {
        assert_eq!(Number::parse("1.500").unwrap().to_string(), "1.5");
        assert_eq!(Number::from(42i64).to_string(), "42");
    }
}
