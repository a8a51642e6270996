//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for planning results
///
/// This is a domain concept representing how the output should be formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Panel, discussion transcript, document and execution plan
    Full,
    /// Only the rendered requirements document (default)
    #[default]
    Document,
    /// JSON output
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "document" | "doc" => Ok(Self::Document),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown output format '{other}' (expected full, document or json)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_document() {
        assert_eq!(OutputFormat::default(), OutputFormat::Document);
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&OutputFormat::Full).unwrap();
        assert_eq!(json, "\"full\"");
    }

    #[test]
    fn test_deserialize_lowercase() {
        let format: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, OutputFormat::Json);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Doc".parse::<OutputFormat>(), Ok(OutputFormat::Document));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
