use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// Header row lacks one or more required columns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing expected column(s): {}", .columns.join(", "))]
pub struct MissingColumns {
    pub columns: Vec<String>,
}

/// Canonical header names the filter, scoring and output stages look up.
///
/// Defaults match the CMS "Provider Information" dataset.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnNames {
    pub provider_name: String,
    pub provider_address: String,
    pub provider_city: String,
    pub provider_state: String,
    pub provider_zip: String,
    pub certified_beds: String,
    pub residents_per_day: String,
    pub overall_rating: String,
    pub health_deficiencies: String,
    pub penalties: String,
    pub abuse_icon: String,
    pub stale_inspection: String,
    pub family_council: String,
    pub pt_hours: String,
    pub facility_incidents: String,
    pub substantiated_complaints: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            provider_name: "Provider Name".to_string(),
            provider_address: "Provider Address".to_string(),
            provider_city: "Provider City".to_string(),
            provider_state: "Provider State".to_string(),
            provider_zip: "Provider Zip Code".to_string(),
            certified_beds: "Number of Certified Beds".to_string(),
            residents_per_day: "Average Number of Residents per Day".to_string(),
            overall_rating: "Overall Rating".to_string(),
            health_deficiencies: "Rating Cycle 1 Total Number of Health Deficiencies".to_string(),
            penalties: "Total Number of Penalties".to_string(),
            abuse_icon: "Abuse Icon".to_string(),
            stale_inspection: "Most Recent Health Inspection More Than 2 Years Ago".to_string(),
            family_council: "With a Resident and Family Council".to_string(),
            pt_hours: "Reported Physical Therapist Staffing Hours per Resident Per Day"
                .to_string(),
            facility_incidents: "Number of Facility Reported Incidents".to_string(),
            substantiated_complaints: "Number of Substantiated Complaints".to_string(),
        }
    }
}

impl ColumnNames {
    /// Columns read by the scoring engine, in rule order.
    pub fn score_columns(&self) -> [&str; 11] {
        [
            self.overall_rating.as_str(),
            self.certified_beds.as_str(),
            self.residents_per_day.as_str(),
            self.health_deficiencies.as_str(),
            self.penalties.as_str(),
            self.abuse_icon.as_str(),
            self.stale_inspection.as_str(),
            self.family_council.as_str(),
            self.pt_hours.as_str(),
            self.facility_incidents.as_str(),
            self.substantiated_complaints.as_str(),
        ]
    }

    /// Columns the jurisdiction/quality filter reads.
    pub fn filter_columns(&self) -> [&str; 5] {
        [
            self.provider_state.as_str(),
            self.overall_rating.as_str(),
            self.certified_beds.as_str(),
            self.health_deficiencies.as_str(),
            self.penalties.as_str(),
        ]
    }

    /// Columns copied into each output record.
    pub fn output_columns(&self) -> [&str; 10] {
        [
            self.provider_name.as_str(),
            self.provider_address.as_str(),
            self.provider_city.as_str(),
            self.provider_state.as_str(),
            self.provider_zip.as_str(),
            self.certified_beds.as_str(),
            self.residents_per_day.as_str(),
            self.overall_rating.as_str(),
            self.health_deficiencies.as_str(),
            self.penalties.as_str(),
        ]
    }

    /// Union of score, filter and output columns without duplicates.
    pub fn required(&self) -> Vec<&str> {
        let mut required: Vec<&str> = Vec::new();
        let all = self
            .score_columns()
            .into_iter()
            .chain(self.filter_columns())
            .chain(self.output_columns());
        for name in all {
            if !required.contains(&name) {
                required.push(name);
            }
        }
        required
    }
}

/// Position of each required column in one file's header row.
///
/// Built once per input file; lookups of names that were not required return
/// `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    /// Resolve every `required` name against `headers`.
    ///
    /// The first occurrence of a duplicated header wins. Fails with every
    /// unresolved name, each listed once in `required` order.
    pub fn resolve<S: AsRef<str>>(
        headers: &[S],
        required: &[&str],
    ) -> Result<Self, MissingColumns> {
        let mut positions = HashMap::with_capacity(required.len());
        let mut missing: Vec<String> = Vec::new();

        for &name in required {
            if positions.contains_key(name) || missing.iter().any(|m| m == name) {
                continue;
            }
            match headers.iter().position(|h| h.as_ref() == name) {
                Some(pos) => {
                    positions.insert(name.to_string(), pos);
                }
                None => missing.push(name.to_string()),
            }
        }

        if missing.is_empty() {
            Ok(Self { positions })
        } else {
            Err(MissingColumns { columns: missing })
        }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_has_sixteen_unique_names() {
        let columns = ColumnNames::default();
        let required = columns.required();
        assert_eq!(required.len(), 16);
        assert_eq!(required[0], "Overall Rating");
        assert!(required.contains(&"Provider Zip Code"));
    }

    #[test]
    fn test_resolve_positions() {
        let headers = ["A", "Overall Rating", "B", "Total Number of Penalties"];
        let required = ["Total Number of Penalties", "Overall Rating"];
        let index = ColumnIndex::resolve(&headers, &required).unwrap();
        assert_eq!(index.position("Overall Rating"), Some(1));
        assert_eq!(index.position("Total Number of Penalties"), Some(3));
        assert_eq!(index.position("A"), None);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_resolve_first_duplicate_wins() {
        let headers = vec!["X".to_string(), "X".to_string()];
        let index = ColumnIndex::resolve(&headers, &["X"]).unwrap();
        assert_eq!(index.position("X"), Some(0));
    }

    #[test]
    fn test_resolve_reports_every_missing_column_once() {
        let headers = ["Overall Rating"];
        let required = [
            "Abuse Icon",
            "Overall Rating",
            "Total Number of Penalties",
            "Abuse Icon",
        ];
        let err = ColumnIndex::resolve(&headers, &required).unwrap_err();
        assert_eq!(err.columns, vec!["Abuse Icon", "Total Number of Penalties"]);
        assert_eq!(
            err.to_string(),
            "missing expected column(s): Abuse Icon, Total Number of Penalties"
        );
    }

    #[test]
    fn test_column_names_partial_yaml() {
        let yaml = "provider_state: \"State\"\n";
        let columns: ColumnNames = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(columns.provider_state, "State");
        assert_eq!(columns.provider_name, "Provider Name");
    }
}
