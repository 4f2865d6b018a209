use crate::dataset::{ColumnIndex, ColumnNames, FacilityRecord};
use serde::{Deserialize, Serialize};

/// One accepted facility as written to the JSON output.
///
/// Values are copied from the source cells verbatim; only the score is numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityOutput {
    pub name: String,
    /// Street, city, state and zip joined with ", "
    pub address: String,
    pub num_beds: String,
    pub residents_per_day: String,
    pub overall_rating: String,
    pub num_deficiencies: String,
    pub num_penalties: String,
    #[serde(rename = "Recommendation Score")]
    pub recommendation_score: f64,
}

impl FacilityOutput {
    pub fn from_record(
        record: &FacilityRecord,
        index: &ColumnIndex,
        columns: &ColumnNames,
        score: f64,
    ) -> Self {
        let cell = |column: &str| record.cell(index, column).to_string();

        let address = [
            &columns.provider_address,
            &columns.provider_city,
            &columns.provider_state,
            &columns.provider_zip,
        ]
        .iter()
        .map(|column| record.cell(index, column))
        .collect::<Vec<_>>()
        .join(", ");

        Self {
            name: cell(&columns.provider_name),
            address,
            num_beds: cell(&columns.certified_beds),
            residents_per_day: cell(&columns.residents_per_day),
            overall_rating: cell(&columns.overall_rating),
            num_deficiencies: cell(&columns.health_deficiencies),
            num_penalties: cell(&columns.penalties),
            recommendation_score: score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FacilityOutput {
        let columns = ColumnNames::default();
        let header = columns.output_columns();
        let index = ColumnIndex::resolve(&header, &header).unwrap();
        let record: FacilityRecord = [
            "Sunrise Care",
            "1 Main St",
            "Reno",
            "NV",
            "89501",
            "40",
            "20.5",
            "5",
            "0",
            "1",
        ]
        .into_iter()
        .collect();
        FacilityOutput::from_record(&record, &index, &columns, 2.65)
    }

    #[test]
    fn test_from_record() {
        let output = sample();
        assert_eq!(output.name, "Sunrise Care");
        assert_eq!(output.address, "1 Main St, Reno, NV, 89501");
        assert_eq!(output.num_beds, "40");
        assert_eq!(output.residents_per_day, "20.5");
        assert_eq!(output.num_penalties, "1");
        assert_eq!(output.recommendation_score, 2.65);
    }

    #[test]
    fn test_json_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        for key in [
            "name",
            "address",
            "num_beds",
            "residents_per_day",
            "overall_rating",
            "num_deficiencies",
            "num_penalties",
            "Recommendation Score",
        ] {
            assert!(keys.contains(&key), "missing key {}", key);
        }
        assert_eq!(keys.len(), 8);
        assert_eq!(json["Recommendation Score"], 2.65);
    }
}
