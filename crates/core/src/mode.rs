use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an actual value is compared with an expected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    /// Exact structural correspondence; sequences in order.
    Equals,
    NotEquals,
    /// Expected is a subset of actual: keys for mappings, distinct elements for
    /// sequences, a substring for strings.
    Contains,
    NotContains,
    /// Same elements as expected, in any order.
    ContainsOnly,
    /// At least one expected element or entry is found.
    ContainsAny,
    /// Containment applied at every level of nesting.
    ContainsDeep,
}

impl MatchType {
    pub fn is_negated(&self) -> bool {
        matches!(self, MatchType::NotEquals | MatchType::NotContains)
    }

    /// The positive form of a negated type; other types map to themselves.
    pub fn positive(&self) -> MatchType {
        match self {
            MatchType::NotEquals => MatchType::Equals,
            MatchType::NotContains => MatchType::Contains,
            other => *other,
        }
    }

    pub fn is_containment(&self) -> bool {
        matches!(
            self,
            MatchType::Contains
                | MatchType::NotContains
                | MatchType::ContainsOnly
                | MatchType::ContainsAny
                | MatchType::ContainsDeep
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            MatchType::Equals => "EQUALS",
            MatchType::NotEquals => "NOT_EQUALS",
            MatchType::Contains => "CONTAINS",
            MatchType::NotContains => "NOT_CONTAINS",
            MatchType::ContainsOnly => "CONTAINS_ONLY",
            MatchType::ContainsAny => "CONTAINS_ANY",
            MatchType::ContainsDeep => "CONTAINS_DEEP",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MatchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EQUALS" | "==" => Ok(MatchType::Equals),
            "NOT_EQUALS" | "!=" => Ok(MatchType::NotEquals),
            "CONTAINS" => Ok(MatchType::Contains),
            "NOT_CONTAINS" | "!CONTAINS" => Ok(MatchType::NotContains),
            "CONTAINS_ONLY" | "CONTAINS ONLY" => Ok(MatchType::ContainsOnly),
            "CONTAINS_ANY" | "CONTAINS ANY" => Ok(MatchType::ContainsAny),
            "CONTAINS_DEEP" | "CONTAINS DEEP" => Ok(MatchType::ContainsDeep),
            other => Err(format!("Unknown match type '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dsl_spellings() {
        assert_eq!("==".parse::<MatchType>().unwrap(), MatchType::Equals);
        assert_eq!("contains only".parse::<MatchType>().unwrap(), MatchType::ContainsOnly);
        assert_eq!("!contains".parse::<MatchType>().unwrap(), MatchType::NotContains);
        assert!("sort of".parse::<MatchType>().is_err());
    }

    #[test]
    fn test_positive_forms() {
        assert_eq!(MatchType::NotEquals.positive(), MatchType::Equals);
        assert_eq!(MatchType::NotContains.positive(), MatchType::Contains);
        assert_eq!(MatchType::ContainsDeep.positive(), MatchType::ContainsDeep);
        assert!(MatchType::NotContains.is_negated());
        assert!(!MatchType::Contains.is_negated());
    }
}
