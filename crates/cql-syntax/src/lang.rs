use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Which surface syntax a filter arrives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterLang {
    #[serde(rename = "cql2-text")]
    Cql2Text,
    #[serde(rename = "cql2-json")]
    Cql2Json,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unknown filter language '{0}', expected 'cql2-text' or 'cql2-json'")]
pub struct InvalidFilterLang(pub String);

impl FromStr for FilterLang {
    type Err = InvalidFilterLang;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cql2-text" => Ok(FilterLang::Cql2Text),
            "cql2-json" => Ok(FilterLang::Cql2Json),
            other => Err(InvalidFilterLang(other.to_string())),
        }
    }
}

impl FilterLang {
    /// Guesses the syntax from the filter itself: JSON filters start with
    /// `{` or `[`, everything else is treated as text.
    pub fn infer(filter: &str) -> Self {
        match filter.trim_start().chars().next() {
            Some('{') | Some('[') => FilterLang::Cql2Json,
            _ => FilterLang::Cql2Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepted_values() {
        assert_eq!("cql2-text".parse::<FilterLang>().unwrap(), FilterLang::Cql2Text);
        assert_eq!("cql2-json".parse::<FilterLang>().unwrap(), FilterLang::Cql2Json);
    }

    #[test]
    fn test_parse_error_names_both_values() {
        let err = "cql3".parse::<FilterLang>().unwrap_err();
        assert!(err.to_string().contains("cql2-text"));
        assert!(err.to_string().contains("cql2-json"));
    }

    #[test]
    fn test_infer() {
        assert_eq!(FilterLang::infer("license = 'x'"), FilterLang::Cql2Text);
        assert_eq!(FilterLang::infer("  {\"op\": \"=\"}"), FilterLang::Cql2Json);
        assert_eq!(FilterLang::infer("[1]"), FilterLang::Cql2Json);
    }
}
