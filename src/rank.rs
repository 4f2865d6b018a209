use anyhow::Result;
use crate::dataset::{ColumnIndex, FacilityRecord};
use crate::filter::FilterCriteria;
use crate::output::FacilityOutput;
use crate::scoring::{ScoreResult, ScoringEngine};
use std::cmp::Ordering;

/// An accepted facility together with the breakdown of its score.
#[derive(Debug, Clone)]
pub struct RankedFacility {
    pub output: FacilityOutput,
    pub result: ScoreResult,
}

#[derive(Debug, Clone, Default)]
pub struct RankSummary {
    /// Accepted facilities, best score first
    pub facilities: Vec<RankedFacility>,
    pub rows_read: usize,
    pub empty_rows: usize,
    /// Rows that failed the filter
    pub rejected: usize,
}

impl RankSummary {
    /// Keep only the first `limit` facilities; 0 keeps everything.
    pub fn truncate(&mut self, limit: usize) {
        if limit > 0 {
            self.facilities.truncate(limit);
        }
    }

    pub fn outputs(&self) -> Vec<FacilityOutput> {
        self.facilities.iter().map(|f| f.output.clone()).collect()
    }
}

/// Filter, score and rank every record.
///
/// Blank rows are counted and skipped. Accepted facilities are sorted by score
/// descending; ties keep input order. The first read error aborts the run.
pub fn rank_facilities<I>(
    records: I,
    index: &ColumnIndex,
    criteria: &FilterCriteria,
    engine: &ScoringEngine,
) -> Result<RankSummary>
where
    I: IntoIterator<Item = Result<FacilityRecord>>,
{
    let columns = engine.columns();
    let mut summary = RankSummary::default();

    for record in records {
        let record = record?;
        summary.rows_read += 1;

        if record.is_blank() {
            summary.empty_rows += 1;
            continue;
        }

        if !criteria.matches(&record, index, columns) {
            summary.rejected += 1;
            continue;
        }

        let result = engine.score(&record, index);
        let output = FacilityOutput::from_record(&record, index, columns, result.score);
        summary.facilities.push(RankedFacility { output, result });
    }

    log::debug!(
        "Read {} rows: {} accepted, {} rejected, {} empty",
        summary.rows_read,
        summary.facilities.len(),
        summary.rejected,
        summary.empty_rows
    );

    // Stable sort keeps file order for equal scores
    summary.facilities.sort_by(|a, b| {
        b.result
            .score
            .partial_cmp(&a.result.score)
            .unwrap_or(Ordering::Equal)
    });

    Ok(summary)
}
