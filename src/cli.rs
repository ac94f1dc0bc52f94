//! CLI argument parsing for chars

use crate::length::LengthSpec;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for extracted strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "chars")]
#[command(version)]
#[command(about = "Character sets: extract, enumerate and sample strings", long_about = None)]
pub struct Cli {
    /// Enable debug tracing output to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Configuration file defining custom sets and scan defaults
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print runs of set members found in a file, like strings(1)
    Strings {
        /// File to scan (stdin when absent or `-`)
        file: Option<PathBuf>,

        /// Minimum run length (default: 4, or scan.min_length from the config)
        #[arg(short = 'n', long = "min-length", value_name = "MIN")]
        min_length: Option<usize>,

        /// Character set to match (default: printable, or scan.char_set from the config)
        #[arg(short, long, value_name = "NAME")]
        set: Option<String>,

        /// Prefix each run with its byte offset
        #[arg(short = 'o', long)]
        offsets: bool,

        /// Output format (text or json)
        #[arg(long = "format", value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print random strings drawn from a set
    Random {
        #[arg(short, long, value_name = "NAME", default_value = "alpha_numeric")]
        set: String,

        /// Length of each string: N, A..B, A..=B or A,B,C
        #[arg(short, long, value_name = "LENGTH", default_value = "8")]
        length: LengthSpec,

        /// Never repeat a character within a string
        #[arg(short, long)]
        distinct: bool,

        /// Seed for reproducible output
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,

        /// Number of strings to print
        #[arg(short, long, value_name = "COUNT", default_value = "1")]
        count: usize,
    },

    /// Print every string of the given length over a set
    Enumerate {
        #[arg(short, long, value_name = "NAME")]
        set: String,

        /// Length of each string: N, A..B, A..=B or A,B,C
        #[arg(short, long, value_name = "LENGTH")]
        length: LengthSpec,

        /// Stop after this many strings
        #[arg(long, value_name = "LIMIT")]
        limit: Option<usize>,
    },

    /// List predefined and configured sets
    Sets,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_strings_defaults() {
        let cli = Cli::parse_from(["chars", "strings", "a.out"]);
        assert!(!cli.debug);
        assert!(cli.config.is_none());
        match cli.command {
            Command::Strings {
                file,
                min_length,
                set,
                offsets,
                format,
            } => {
                assert_eq!(file, Some(PathBuf::from("a.out")));
                assert_eq!(min_length, None);
                assert_eq!(set, None);
                assert!(!offsets);
                assert_eq!(format, OutputFormat::Text);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_strings_stdin() {
        let cli = Cli::parse_from(["chars", "strings", "-n", "8", "--format", "json"]);
        match cli.command {
            Command::Strings {
                file,
                min_length,
                format,
                ..
            } => {
                assert!(file.is_none());
                assert_eq!(min_length, Some(8));
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["chars", "sets", "--debug", "--config", "chars.toml"]);
        assert!(cli.debug);
        assert_eq!(cli.config, Some(PathBuf::from("chars.toml")));
        assert!(matches!(cli.command, Command::Sets));
    }

    #[test]
    fn test_cli_random_length_range() {
        let cli = Cli::parse_from([
            "chars", "random", "--set", "hex", "--length", "4..=8", "--distinct", "--seed", "7",
        ]);
        match cli.command {
            Command::Random {
                set,
                length,
                distinct,
                seed,
                count,
            } => {
                assert_eq!(set, "hex");
                assert_eq!(length, LengthSpec::Between(4..=8));
                assert!(distinct);
                assert_eq!(seed, Some(7));
                assert_eq!(count, 1);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_random_defaults() {
        let cli = Cli::parse_from(["chars", "random"]);
        match cli.command {
            Command::Random { set, length, .. } => {
                assert_eq!(set, "alpha_numeric");
                assert_eq!(length, LengthSpec::Exactly(8));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_enumerate_requires_length() {
        let result = Cli::try_parse_from(["chars", "enumerate", "--set", "octal"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_enumerate_limit() {
        let cli = Cli::parse_from([
            "chars", "enumerate", "-s", "octal", "-l", "2", "--limit", "10",
        ]);
        match cli.command {
            Command::Enumerate { set, length, limit } => {
                assert_eq!(set, "octal");
                assert_eq!(length, LengthSpec::Exactly(2));
                assert_eq!(limit, Some(10));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_bad_length() {
        let result = Cli::try_parse_from(["chars", "random", "--length", "abc"]);
        assert!(result.is_err());
    }
}
