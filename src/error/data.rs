//! Data query errors
//! The aggregator never retries. A failed query is reported once and the
//! caller decides what to do with it.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// The external information source could not be reached.
    SourceUnavailable(String),
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::SourceUnavailable(why) => {
                write!(f, "Data source unavailable: {}", why)
            }
        }
    }
}

impl std::error::Error for DataError {}
