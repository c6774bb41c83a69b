use thiserror::Error;

/// Why a listing row could not become an entry. The row is skipped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("Invalid link element")]
    MissingLink,

    #[error("Invalid entry - parent directory navigation")]
    ParentDirectory,

    #[error("No title for entry")]
    EmptyTitle,

    #[error("Invalid link cell element")]
    LinkOutsideCell,

    #[error("No size element")]
    MissingSize,
}

/// The page does not look like a listing; nothing gets installed.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Table not found")]
    MissingTable,

    #[error("Heading with base path not found")]
    MissingHeading,

    #[error("Header row not found")]
    MissingHeaderRow,

    #[error("Invalid selector {0:?}: {1}")]
    Selector(&'static str, String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComposeError {
    #[error("At least one source path is required")]
    NoSources,
}
