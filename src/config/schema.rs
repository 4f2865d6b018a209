use crate::dataset::ColumnNames;
use crate::scoring::ScoringConfig;
use serde::Deserialize;

/// Contents of `config.yaml`. Every section is optional.
///
/// Example YAML:
/// ```yaml
/// columns:
///   provider_state: "State"
/// scoring:
///   divisor: 5
///   pt_hours: { above: 0.1 }
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Canonical header names
    pub columns: ColumnNames,
    /// Weighting rules and divisor
    pub scoring: ScoringConfig,
}
