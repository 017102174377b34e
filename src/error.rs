use thiserror::Error;

/// Why a report could not be generated.
///
/// None of these are fatal: the caller reports them and the user retries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("no dataset loaded")]
    MissingInput,

    #[error("no {0} column selected")]
    MissingColumnSelection(ColumnRole),

    #[error("column '{0}' is not in the dataset")]
    UnknownColumn(String),

    #[error("no numeric grades to summarize")]
    EmptyResult,
}

/// Which of the two selected columns an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Grade,
    Group,
}

impl std::fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnRole::Grade => f.write_str("grade"),
            ColumnRole::Group => f.write_str("group"),
        }
    }
}
