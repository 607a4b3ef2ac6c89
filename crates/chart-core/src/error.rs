use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Invalid chart data JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Chart data must be a JSON array, got {0}")]
    NotAnArray(&'static str),

    #[error("Unknown {kind} value: {value:?}")]
    UnknownChoice { kind: &'static str, value: String },

    #[error("Invalid chart options: {0}")]
    InvalidOptions(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_choice_message() {
        let err = ChartError::UnknownChoice {
            kind: "value format",
            value: "bogus".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown value format value: \"bogus\"");
    }

    #[test]
    fn test_not_an_array_message() {
        let err = ChartError::NotAnArray("object");
        assert_eq!(err.to_string(), "Chart data must be a JSON array, got object");
    }
}
