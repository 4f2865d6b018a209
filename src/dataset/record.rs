use super::columns::ColumnIndex;

/// One data row: raw cell text in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacilityRecord {
    cells: Vec<String>,
}

impl FacilityRecord {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Raw text of `column`, or `""` when the column is unknown to `index` or
    /// the row is shorter than the header.
    pub fn cell<'a>(&'a self, index: &ColumnIndex, column: &str) -> &'a str {
        index
            .position(column)
            .and_then(|pos| self.cells.get(pos))
            .map_or("", String::as_str)
    }

    /// True when every cell is empty or whitespace (including a row with no cells).
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for FacilityRecord {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
