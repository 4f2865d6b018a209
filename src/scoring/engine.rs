use super::config::ScoringConfig;
use super::normalize::available_beds;
use crate::dataset::{ColumnIndex, ColumnNames, FacilityRecord};

/// One rule's contribution to a recommendation score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedFactor {
    pub name: &'static str, // e.g. "overall_rating", "penalties"
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    /// Factor sum divided by the configured divisor
    pub score: f64,
    /// All ten factors, in rule order
    pub factors: Vec<WeightedFactor>,
}

impl ScoreResult {
    pub fn factor_sum(&self) -> f64 {
        self.factors.iter().map(|f| f.value).sum()
    }
}

/// Applies the configured weighting rules to facility records.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
    columns: ColumnNames,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig, columns: ColumnNames) -> Self {
        Self { config, columns }
    }

    pub fn columns(&self) -> &ColumnNames {
        &self.columns
    }

    /// Score one record. Never fails: malformed cells lower the score instead.
    pub fn score(&self, record: &FacilityRecord, index: &ColumnIndex) -> ScoreResult {
        let rules = &self.config;
        let cols = &self.columns;
        let cell = |column: &str| record.cell(index, column);

        let beds = available_beds(cell(&cols.certified_beds), cell(&cols.residents_per_day));

        let factors = vec![
            factor("overall_rating", rules.overall_rating.weigh(cell(&cols.overall_rating))),
            factor("available_beds", rules.available_beds.weigh(beds)),
            factor(
                "health_deficiencies",
                rules.health_deficiencies.weigh(cell(&cols.health_deficiencies)),
            ),
            factor("penalties", rules.penalties.weigh(cell(&cols.penalties))),
            factor("abuse", rules.abuse.weigh(cell(&cols.abuse_icon))),
            factor(
                "stale_inspection",
                rules.stale_inspection.weigh(cell(&cols.stale_inspection)),
            ),
            factor(
                "family_council",
                rules.family_council.weigh(cell(&cols.family_council)),
            ),
            factor("pt_hours", rules.pt_hours.weigh(cell(&cols.pt_hours))),
            factor(
                "facility_incidents",
                rules.facility_incidents.weigh(cell(&cols.facility_incidents)),
            ),
            factor(
                "substantiated_complaints",
                rules
                    .substantiated_complaints
                    .weigh(cell(&cols.substantiated_complaints)),
            ),
        ];

        let sum: f64 = factors.iter().map(|f| f.value).sum();
        ScoreResult {
            score: sum / rules.divisor,
            factors,
        }
    }
}

fn factor(name: &'static str, value: f64) -> WeightedFactor {
    WeightedFactor { name, value }
}
