//! Parameterized weighting rules.
//!
//! Each rule turns one raw (or derived) attribute into one weight. Rules are
//! total: malformed input falls back to a rule-specific default instead of
//! failing.

use super::normalize::{parse_count, parse_decimal, SENTINEL};
use super::range::RangeOp;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Scales a star rating: `parse_count(raw, default) * multiplier`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RatingRule {
    pub multiplier: f64,
    /// Value used when the rating cell is malformed
    pub default: i64,
}

impl Default for RatingRule {
    fn default() -> Self {
        Self {
            multiplier: 1.25,
            default: 0,
        }
    }
}

impl RatingRule {
    pub fn weigh(&self, raw: &str) -> f64 {
        parse_count(raw, self.default) as f64 * self.multiplier
    }
}

/// Rewards a value inside `[min, max]`, penalizes anything outside.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BedRangeRule {
    pub min: f64,
    pub max: f64,
    pub inside: f64,
    pub outside: f64,
}

impl Default for BedRangeRule {
    fn default() -> Self {
        Self {
            min: 5.0,
            max: 50.0,
            inside: 1.0,
            outside: -1.0,
        }
    }
}

impl BedRangeRule {
    pub fn weigh(&self, value: f64) -> f64 {
        if (self.min..=self.max).contains(&value) {
            self.inside
        } else {
            self.outside
        }
    }
}

/// One row of a tier table.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Tier {
    pub range: RangeOp,
    pub weight: f64,
}

/// Count-based weighting shared by deficiencies, penalties, incidents and
/// complaints. The first tier whose range matches wins.
///
/// Example YAML:
/// ```yaml
/// tiers:
///   - { range: "0", weight: 1 }
///   - { range: "1-5", weight: -0.25 }
///   - { range: ">5", weight: -1 }
/// unparsable: -1
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TieredRule {
    pub tiers: Vec<Tier>,
    /// Weight for malformed cells and counts no tier covers
    pub unparsable: f64,
}

impl Default for TieredRule {
    fn default() -> Self {
        Self {
            tiers: vec![
                Tier {
                    range: RangeOp::Equal(0),
                    weight: 1.0,
                },
                Tier {
                    range: RangeOp::Between(1, 5),
                    weight: -0.25,
                },
                Tier {
                    range: RangeOp::GreaterThan(5),
                    weight: -1.0,
                },
            ],
            unparsable: -1.0,
        }
    }
}

impl TieredRule {
    pub fn weigh(&self, raw: &str) -> f64 {
        self.weigh_count(parse_count(raw, SENTINEL))
    }

    /// Weigh an already-normalized count. Negative counts are sentinels.
    pub fn weigh_count(&self, count: i64) -> f64 {
        let Ok(count) = u64::try_from(count) else {
            return self.unparsable;
        };
        self.tiers
            .iter()
            .find(|tier| tier.range.matches(count))
            .map_or(self.unparsable, |tier| tier.weight)
    }
}

/// Maps exact cell literals (case-sensitive) to weights.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FlagRule {
    pub values: BTreeMap<String, f64>,
    pub otherwise: f64,
}

impl FlagRule {
    pub fn new<I, S>(values: I, otherwise: f64) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            otherwise,
        }
    }

    pub fn weigh(&self, raw: &str) -> f64 {
        self.values.get(raw).copied().unwrap_or(self.otherwise)
    }
}

/// Awards `weight` when a decimal cell is strictly above `above`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ThresholdRule {
    pub above: f64,
    pub weight: f64,
    pub otherwise: f64,
    /// Value used when the cell is malformed
    pub default: f64,
}

impl Default for ThresholdRule {
    fn default() -> Self {
        Self {
            above: 0.09,
            weight: 1.0,
            otherwise: 0.0,
            default: SENTINEL as f64,
        }
    }
}

impl ThresholdRule {
    pub fn weigh(&self, raw: &str) -> f64 {
        if parse_decimal(raw, self.default) > self.above {
            self.weight
        } else {
            self.otherwise
        }
    }
}
