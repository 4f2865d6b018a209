pub mod formatter;
pub mod record;
pub mod writer;

pub use formatter::{format_facility_detail, format_ranked_table, format_score, should_use_colors};
pub use record::FacilityOutput;
pub use writer::write_json;
