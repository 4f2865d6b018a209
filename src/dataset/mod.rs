pub mod columns;
pub mod reader;
pub mod record;

pub use columns::{ColumnIndex, ColumnNames, MissingColumns};
pub use reader::FacilityReader;
pub use record::FacilityRecord;
