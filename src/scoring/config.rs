use super::rules::{BedRangeRule, FlagRule, RatingRule, ThresholdRule, TieredRule};
use serde::Deserialize;

/// Main scoring configuration.
///
/// One rule per weighted attribute plus the divisor applied to their sum.
/// Every field is optional in YAML; missing fields keep the built-in table.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   divisor: 5
///   overall_rating: { multiplier: 1.25 }
///   available_beds: { min: 5, max: 50, inside: 1, outside: -1 }
///   abuse:
///     values: { "Y": -1, "N": 1 }
///     otherwise: 0
///   penalties:
///     tiers:
///       - { range: "0", weight: 1 }
///       - { range: "1-5", weight: -0.25 }
///       - { range: ">5", weight: -1 }
///     unparsable: -1
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    /// Scale applied to the factor sum. Historically 5 although there are
    /// ten factors; kept as-is so scores stay comparable with earlier output.
    pub divisor: f64,

    pub overall_rating: RatingRule,

    /// Certified beds minus average residents per day
    pub available_beds: BedRangeRule,

    pub health_deficiencies: TieredRule,

    pub penalties: TieredRule,

    pub abuse: FlagRule,

    /// "Most Recent Health Inspection More Than 2 Years Ago" flag
    pub stale_inspection: FlagRule,

    pub family_council: FlagRule,

    /// Physical therapist staffing hours per resident per day
    pub pt_hours: ThresholdRule,

    pub facility_incidents: TieredRule,

    pub substantiated_complaints: TieredRule,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            divisor: 5.0,
            overall_rating: RatingRule::default(),
            available_beds: BedRangeRule::default(),
            health_deficiencies: TieredRule::default(),
            penalties: TieredRule::default(),
            abuse: FlagRule::new([("Y", -1.0), ("N", 1.0)], 0.0),
            stale_inspection: FlagRule::new([("Y", 1.0), ("N", -1.0)], 0.0),
            family_council: FlagRule::new([("Both", 1.0), ("Resident", 0.0)], 0.0),
            pt_hours: ThresholdRule::default(),
            facility_incidents: TieredRule::default(),
            substantiated_complaints: TieredRule::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::RangeOp;

    #[test]
    fn test_default_scoring_config() {
        let config = ScoringConfig::default();

        assert_eq!(config.divisor, 5.0);
        assert_eq!(config.overall_rating.multiplier, 1.25);
        assert_eq!(config.available_beds.min, 5.0);
        assert_eq!(config.available_beds.max, 50.0);
        assert_eq!(config.penalties.tiers.len(), 3);
        assert_eq!(config.abuse.weigh("Y"), -1.0);
        assert_eq!(config.stale_inspection.weigh("Y"), 1.0);
        assert_eq!(config.family_council.weigh("Resident"), 0.0);
    }

    #[test]
    fn test_partial_scoring_config_parse() {
        let yaml = r#"
divisor: 10
overall_rating:
  multiplier: 2
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.divisor, 10.0);
        assert_eq!(config.overall_rating.multiplier, 2.0);
        assert_eq!(config.overall_rating.default, 0);
        assert_eq!(config.penalties, TieredRule::default());
        assert_eq!(config.abuse, ScoringConfig::default().abuse);
    }

    #[test]
    fn test_tier_table_parse() {
        let yaml = r#"
health_deficiencies:
  tiers:
    - range: "0"
      weight: 2
    - range: "1-10"
      weight: -0.5
    - range: ">10"
      weight: -2
  unparsable: 0
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        let rule = &config.health_deficiencies;
        assert_eq!(rule.tiers[1].range, RangeOp::Between(1, 10));
        assert_eq!(rule.weigh("7"), -0.5);
        assert_eq!(rule.weigh("x"), 0.0);
    }

    #[test]
    fn test_invalid_range_rejected_at_parse() {
        let yaml = r#"
penalties:
  tiers:
    - range: "some"
      weight: 1
"#;
        let result: Result<ScoringConfig, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "bogus: 1\n";
        let result: Result<ScoringConfig, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_scoring_config_parse() {
        let config: ScoringConfig = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, ScoringConfig::default());
    }
}
