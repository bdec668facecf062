// ABOUTME: Command-line interface definitions using clap
// ABOUTME: Format resolution falls back to an interactive prompt

use crate::api::DEFAULT_BASE_URL;
use crate::export::Format;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "monex")]
#[command(about = "Export Site24x7 monitors to CSV, JSON, or PDF", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Export format: csv, json, or pdf (prompted when omitted)
    pub format: Option<String>,

    /// Path to the KEY=VALUE credentials file
    #[arg(long, default_value = "zoho_auth.conf")]
    pub auth_file: PathBuf,

    /// Output file path (defaults to monitors.<format>)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Site24x7 API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub api_base: String,

    /// Zoho accounts server URL (overrides the credentials file)
    #[arg(long)]
    pub account_server: Option<String>,
}

impl Cli {
    /// Resolves the export format from the positional argument, prompting
    /// on stdin when absent. Unknown names warn and default to csv.
    pub fn resolve_format(&self) -> Format {
        let name = match &self.format {
            Some(name) => name.clone(),
            None => prompt_format(),
        };

        resolve_format_name(&name)
    }
}

fn resolve_format_name(name: &str) -> Format {
    let name = name.trim();
    if name.is_empty() {
        return Format::Csv;
    }
    match Format::parse(name) {
        Ok(format) => format,
        Err(_) => {
            eprintln!("Warning: unknown format '{}', defaulting to csv", name);
            Format::Csv
        }
    }
}

fn prompt_format() -> String {
    print!("Export format [csv/json/pdf]: ");
    io::stdout().flush().ok();

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(_) => line,
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positional_format() {
        let cli = Cli::try_parse_from(["monex", "json"]).unwrap();
        assert_eq!(cli.resolve_format(), Format::Json);
    }

    #[test]
    fn test_invalid_format_defaults_to_csv() {
        let cli = Cli::try_parse_from(["monex", "xml"]).unwrap();
        assert_eq!(cli.resolve_format(), Format::Csv);
    }

    #[test]
    fn test_empty_prompt_input_defaults_to_csv() {
        assert_eq!(resolve_format_name(""), Format::Csv);
        assert_eq!(resolve_format_name("  \n"), Format::Csv);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["monex"]).unwrap();
        assert_eq!(cli.api_base, DEFAULT_BASE_URL);
        assert_eq!(cli.auth_file, PathBuf::from("zoho_auth.conf"));
        assert!(cli.output.is_none());
        assert!(cli.account_server.is_none());
    }

    #[test]
    fn test_output_override() {
        let cli = Cli::try_parse_from(["monex", "csv", "--output", "/tmp/m.csv"]).unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("/tmp/m.csv")));
    }
}
