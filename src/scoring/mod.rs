pub mod config;
pub mod engine;
pub mod normalize;
pub mod range;
pub mod rules;
pub mod validation;

pub use config::ScoringConfig;
pub use engine::{ScoreResult, ScoringEngine, WeightedFactor};
pub use range::RangeOp;
pub use rules::{BedRangeRule, FlagRule, RatingRule, ThresholdRule, Tier, TieredRule};
pub use validation::validate_scoring;
