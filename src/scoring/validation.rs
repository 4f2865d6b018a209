use super::config::ScoringConfig;
use super::rules::{FlagRule, TieredRule};

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if !config.divisor.is_finite() || config.divisor == 0.0 {
        errors.push(format!(
            "scoring.divisor: must be a finite non-zero number, got {}",
            config.divisor
        ));
    }

    check_finite(
        &mut errors,
        "scoring.overall_rating.multiplier",
        config.overall_rating.multiplier,
    );

    let beds = &config.available_beds;
    check_finite(&mut errors, "scoring.available_beds.min", beds.min);
    check_finite(&mut errors, "scoring.available_beds.max", beds.max);
    check_finite(&mut errors, "scoring.available_beds.inside", beds.inside);
    check_finite(&mut errors, "scoring.available_beds.outside", beds.outside);
    if beds.min > beds.max {
        errors.push(format!(
            "scoring.available_beds: min ({}) exceeds max ({})",
            beds.min, beds.max
        ));
    }

    let tiered = [
        ("health_deficiencies", &config.health_deficiencies),
        ("penalties", &config.penalties),
        ("facility_incidents", &config.facility_incidents),
        ("substantiated_complaints", &config.substantiated_complaints),
    ];
    for (name, rule) in tiered {
        check_tiers(&mut errors, name, rule);
    }

    let flags = [
        ("abuse", &config.abuse),
        ("stale_inspection", &config.stale_inspection),
        ("family_council", &config.family_council),
    ];
    for (name, rule) in flags {
        check_flags(&mut errors, name, rule);
    }

    let pt = &config.pt_hours;
    check_finite(&mut errors, "scoring.pt_hours.above", pt.above);
    check_finite(&mut errors, "scoring.pt_hours.weight", pt.weight);
    check_finite(&mut errors, "scoring.pt_hours.otherwise", pt.otherwise);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_finite(errors: &mut Vec<String>, field: &str, value: f64) {
    if !value.is_finite() {
        errors.push(format!("{}: must be finite, got {}", field, value));
    }
}

fn check_tiers(errors: &mut Vec<String>, name: &str, rule: &TieredRule) {
    if rule.tiers.is_empty() {
        errors.push(format!("scoring.{}.tiers: at least one tier is required", name));
    }
    for (i, tier) in rule.tiers.iter().enumerate() {
        check_finite(
            errors,
            &format!("scoring.{}.tiers[{}].weight", name, i),
            tier.weight,
        );
    }
    check_finite(errors, &format!("scoring.{}.unparsable", name), rule.unparsable);
}

fn check_flags(errors: &mut Vec<String>, name: &str, rule: &FlagRule) {
    for (literal, weight) in &rule.values {
        check_finite(
            errors,
            &format!("scoring.{}.values['{}']", name, literal),
            *weight,
        );
    }
    check_finite(errors, &format!("scoring.{}.otherwise", name), rule.otherwise);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_divisor() {
        let config = ScoringConfig {
            divisor: 0.0,
            ..Default::default()
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring.divisor"));
    }

    #[test]
    fn test_inverted_bed_range() {
        let mut config = ScoringConfig::default();
        config.available_beds.min = 60.0;
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.available_beds"));
    }

    #[test]
    fn test_empty_tiers() {
        let mut config = ScoringConfig::default();
        config.penalties.tiers.clear();
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors, vec!["scoring.penalties.tiers: at least one tier is required"]);
    }

    #[test]
    fn test_non_finite_flag_weight() {
        let mut config = ScoringConfig::default();
        config.abuse.values.insert("Y".to_string(), f64::NAN);
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.abuse.values['Y']"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ScoringConfig {
            divisor: f64::INFINITY, // Error 1
            ..Default::default()
        };
        config.overall_rating.multiplier = f64::NAN; // Error 2
        config.facility_incidents.tiers.clear(); // Error 3
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
