use crate::dataset::{ColumnIndex, ColumnNames, FacilityRecord};
use crate::scoring::normalize::parse_count;

/// Jurisdiction and quality thresholds a facility must meet to be scored.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Two-letter state code, compared case-sensitively after upper-casing
    pub state: String,
    pub min_rating: i64,
    pub min_beds: i64,
    pub max_deficiencies: f64,
    pub max_penalties: f64,
}

impl FilterCriteria {
    /// Criteria that accept every facility in `state`.
    pub fn for_state(state: &str) -> Self {
        Self {
            state: state.to_ascii_uppercase(),
            min_rating: 1,
            min_beds: 0,
            max_deficiencies: f64::INFINITY,
            max_penalties: f64::INFINITY,
        }
    }

    /// Whether `record` passes every threshold.
    ///
    /// Malformed ratings count as 1; malformed bed, deficiency and penalty
    /// counts count as 0.
    pub fn matches(
        &self,
        record: &FacilityRecord,
        index: &ColumnIndex,
        columns: &ColumnNames,
    ) -> bool {
        let cell = |column: &str| record.cell(index, column);

        cell(&columns.provider_state) == self.state
            && parse_count(cell(&columns.overall_rating), 1) >= self.min_rating
            && parse_count(cell(&columns.certified_beds), 0) >= self.min_beds
            && (parse_count(cell(&columns.health_deficiencies), 0) as f64) <= self.max_deficiencies
            && (parse_count(cell(&columns.penalties), 0) as f64) <= self.max_penalties
    }
}
