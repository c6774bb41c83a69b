use serde::{Deserialize, Serialize};

/// One `tbody tr` of a listing, reduced to the parts an entry is built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    /// Text of the first link inside a cell, if the row has one.
    pub link_text: Option<String>,
    /// Whether the link's parent element is a table cell.
    pub link_in_cell: bool,
    /// Text of the cell right after the link cell.
    pub size_text: Option<String>,
}

#[cfg(test)]
impl RawRow {
    pub fn new(link_text: &str, size_text: &str) -> Self {
        Self {
            link_text: Some(link_text.to_string()),
            link_in_cell: true,
            size_text: Some(size_text.to_string()),
        }
    }
}

/// A directory listing, independent of where it was read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub base_path: String,
    pub rows: Vec<RawRow>,
}
