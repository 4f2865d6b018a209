use anyhow::{bail, Result};
use serde::Deserialize;
use std::fmt;

/// Count range used by tiered rules.
///
/// Syntax: `N`, `<N`, `<=N`, `>N`, `>=N` or `N-M` (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum RangeOp {
    LessThan(u64),
    LessEqual(u64),
    GreaterThan(u64),
    GreaterEqual(u64),
    Equal(u64),
    Between(u64, u64),
}

impl RangeOp {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(val) = s.strip_prefix(">=") {
            Ok(RangeOp::GreaterEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix("<=") {
            Ok(RangeOp::LessEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix('>') {
            Ok(RangeOp::GreaterThan(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix('<') {
            Ok(RangeOp::LessThan(val.trim().parse()?))
        } else if let Some((low, high)) = s.split_once('-') {
            if low.trim().is_empty() {
                bail!("Negative counts are not allowed: {}", s);
            }
            let low: u64 = low.trim().parse()?;
            let high: u64 = high.trim().parse()?;
            if low > high {
                bail!("Range start exceeds end: {}", s);
            }
            Ok(RangeOp::Between(low, high))
        } else {
            Ok(RangeOp::Equal(s.parse()?))
        }
    }

    pub fn matches(&self, value: u64) -> bool {
        match self {
            RangeOp::LessThan(n) => value < *n,
            RangeOp::LessEqual(n) => value <= *n,
            RangeOp::GreaterThan(n) => value > *n,
            RangeOp::GreaterEqual(n) => value >= *n,
            RangeOp::Equal(n) => value == *n,
            RangeOp::Between(low, high) => value >= *low && value <= *high,
        }
    }
}

impl fmt::Display for RangeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeOp::LessThan(n) => write!(f, "<{}", n),
            RangeOp::LessEqual(n) => write!(f, "<={}", n),
            RangeOp::GreaterThan(n) => write!(f, ">{}", n),
            RangeOp::GreaterEqual(n) => write!(f, ">={}", n),
            RangeOp::Equal(n) => write!(f, "{}", n),
            RangeOp::Between(low, high) => write!(f, "{}-{}", low, high),
        }
    }
}

impl TryFrom<String> for RangeOp {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self> {
        RangeOp::parse(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_less_than() {
        let range = RangeOp::parse("<100").unwrap();
        assert!(range.matches(50));
        assert!(!range.matches(100));
        assert!(!range.matches(150));
    }

    #[test]
    fn test_parse_range_less_equal() {
        let range = RangeOp::parse("<=5").unwrap();
        assert!(range.matches(0));
        assert!(range.matches(5));
        assert!(!range.matches(6));
    }

    #[test]
    fn test_parse_range_greater_than() {
        let range = RangeOp::parse(">5").unwrap();
        assert!(!range.matches(5));
        assert!(range.matches(6));
    }

    #[test]
    fn test_parse_range_greater_equal() {
        let range = RangeOp::parse(">= 6").unwrap();
        assert!(!range.matches(5));
        assert!(range.matches(6));
        assert!(range.matches(600));
    }

    #[test]
    fn test_parse_range_equal() {
        let range = RangeOp::parse("0").unwrap();
        assert!(range.matches(0));
        assert!(!range.matches(1));
    }

    #[test]
    fn test_parse_range_between() {
        let range = RangeOp::parse("1-5").unwrap();
        assert!(!range.matches(0));
        assert!(range.matches(1));
        assert!(range.matches(3));
        assert!(range.matches(5));
        assert!(!range.matches(6));
    }

    #[test]
    fn test_parse_range_rejects_garbage() {
        assert!(RangeOp::parse("lots").is_err());
        assert!(RangeOp::parse("-5").is_err());
        assert!(RangeOp::parse("5-1").is_err());
        assert!(RangeOp::parse("1-2-3").is_err());
        assert!(RangeOp::parse("").is_err());
    }

    #[test]
    fn test_display_parses_back() {
        for text in ["<3", "<=3", ">3", ">=3", "3", "1-5"] {
            let range = RangeOp::parse(text).unwrap();
            assert_eq!(range.to_string(), text);
        }
    }
}
