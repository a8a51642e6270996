//! `[output]` section: how finished sessions are printed

use planner_domain::OutputFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Preferred format when `--output` is not given
    pub format: Option<OutputFormat>,
    /// Set to false to strip ANSI colours from console output
    pub color: bool,
}

impl FileOutputConfig {
    /// The command-line choice, then the configured format, then `document`.
    pub fn resolve_format(&self, requested: Option<OutputFormat>) -> OutputFormat {
        requested.or(self.format).unwrap_or_default()
    }
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_section_parses() {
        let config: super::super::FileConfig =
            toml::from_str("[output]\nformat = \"json\"\ncolor = false\n").unwrap();
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
    }

    #[test]
    fn test_resolve_format_precedence() {
        let unset = FileOutputConfig::default();
        assert_eq!(unset.resolve_format(None), OutputFormat::Document);

        let configured = FileOutputConfig {
            format: Some(OutputFormat::Full),
            ..Default::default()
        };
        assert_eq!(configured.resolve_format(None), OutputFormat::Full);
        assert_eq!(
            configured.resolve_format(Some(OutputFormat::Json)),
            OutputFormat::Json
        );
    }
}
