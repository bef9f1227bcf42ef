//! Configuration management for the markup language server.
//!
//! Handles:
//! - Command-line argument parsing
//! - Dialect directory configuration
//! - One-shot checker options

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the markup language server
#[derive(Debug, Parser)]
#[command(name = "markup-ls")]
#[command(about = "Language server for HTML and Blogger XML template files")]
#[command(version)]
pub struct Args {
    /// Validate a single file and print diagnostics instead of serving LSP
    #[arg(long, value_name = "FILE", help = "Validate FILE and exit")]
    pub check: Option<PathBuf>,

    /// Emit checker diagnostics as JSON
    #[arg(long, requires = "check", help = "Print --check diagnostics as JSON")]
    pub json: bool,

    /// Custom dialect directory to search for dialect files
    #[arg(long, help = "Directory containing dialect TOML files")]
    pub dialect_dir: Option<PathBuf>,

    /// Log level for the language server
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// File to validate in one-shot mode
    pub check_file: Option<PathBuf>,
    /// Emit one-shot diagnostics as JSON
    pub json_output: bool,
    /// Custom dialect directories to search
    pub dialect_dirs: Vec<PathBuf>,
    /// Log level
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        // Determine dialect directories
        let mut dialect_dirs = Vec::new();

        // Add user-specified directory if provided
        if let Some(custom_dir) = args.dialect_dir {
            dialect_dirs.push(custom_dir);
        }

        // Add default user config directory
        if let Some(config_dir) = dirs::config_dir() {
            dialect_dirs.push(config_dir.join("markup-ls").join("dialects"));
        }

        Ok(Config {
            check_file: args.check,
            json_output: args.json,
            dialect_dirs,
            log_level: args.log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_dialect_dir_comes_first() {
        let args = Args {
            check: None,
            json: false,
            dialect_dir: Some(PathBuf::from("/tmp/dialects")),
            log_level: "info".to_string(),
        };

        let config = Config::from_args(args).expect("config");
        assert_eq!(config.dialect_dirs[0], PathBuf::from("/tmp/dialects"));
    }

    #[test]
    fn test_log_level_default_and_override() {
        let args = Args::try_parse_from(["markup-ls"]).expect("parse");
        assert_eq!(args.log_level, "info");

        let args =
            Args::try_parse_from(["markup-ls", "--log-level", "debug"]).expect("parse");
        let config = Config::from_args(args).expect("config");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_check_mode_configuration() {
        let args = Args {
            check: Some(PathBuf::from("theme.xml")),
            json: true,
            dialect_dir: None,
            log_level: "warn".to_string(),
        };

        let config = Config::from_args(args).expect("config");
        assert_eq!(config.check_file, Some(PathBuf::from("theme.xml")));
        assert!(config.json_output);
        assert_eq!(config.log_level, "warn");
    }
}
