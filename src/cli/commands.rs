//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Browse a paged remote collection
#[derive(Parser, Debug)]
#[command(name = "remote-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Collection config file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Collection endpoint URL (overrides the config file)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Extra query parameter, KEY=VALUE (repeatable)
    #[arg(short, long = "param", global = true, value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// Page size for the first fetch
    #[arg(long, global = true)]
    pub page_size: Option<u32>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch page 1, then follow each navigation key in order
    Fetch {
        /// Navigation key: first, prev, next, last or a page number (repeatable)
        #[arg(long = "page")]
        pages: Vec<String>,
    },

    /// Validate the collection config
    Validate,

    /// Parse a Link header value
    Links {
        /// The header value, e.g. '<https://...>; rel="next"'
        header: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}

fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fetch_with_pages() {
        let cli = Cli::try_parse_from([
            "remote-pager",
            "--url",
            "https://example.com/api/organization",
            "-p",
            "userId=u1",
            "--page-size",
            "10",
            "fetch",
            "--page",
            "next",
            "--page",
            "3",
        ])
        .unwrap();

        assert_eq!(cli.url.as_deref(), Some("https://example.com/api/organization"));
        assert_eq!(cli.params, vec![("userId".to_string(), "u1".to_string())]);
        assert_eq!(cli.page_size, Some(10));
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Fetch { pages } => assert_eq!(pages, vec!["next", "3"]),
            other => panic!("Expected Fetch, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_malformed_param() {
        let result = Cli::try_parse_from(["remote-pager", "-p", "novalue", "validate"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("a=b=c").unwrap(),
            ("a".to_string(), "b=c".to_string())
        );
        assert!(parse_key_value("=x").is_err());
    }
}
