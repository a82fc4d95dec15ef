//! Command-line argument parsing.

use std::path::PathBuf;

use thiserror::Error;

/// What the binary should do.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Refresh once, print the result and exit
    Once,
    /// Interactive watch mode (default)
    Watch,
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub command: CliCommand,
    pub config_path: Option<PathBuf>,
    pub verbose: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            command: CliCommand::Watch,
            config_path: None,
            verbose: false,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ArgsError {
    #[error("unknown argument '{0}' (try --help)")]
    Unknown(String),
    #[error("{0} requires a value")]
    MissingValue(&'static str),
}

pub const USAGE: &str = "\
Usage: smogwatch [OPTIONS]

Options:
  --once             Refresh once, print the readings and exit
  --config <PATH>    Read configuration from PATH
  -v, --verbose      Debug logging (RUST_LOG overrides)
  -V, --version      Print version
  -h, --help         Print this help

Watch mode commands:
  r            refresh
  /<keyword>   search sites by name, county or status
  /            open the filter with no keyword
  x            close the filter
  l            list the current readings
  q            quit";

/// Parse command-line arguments.
///
/// `--version` and `--help` win over everything else, as in most CLIs.
///
/// # Examples
///
/// ```
/// use smogwatch::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["smogwatch".to_string(), "--once".to_string()];
/// assert_eq!(parse_args(args.into_iter()).unwrap().command, CliCommand::Once);
/// ```
pub fn parse_args<I>(args: I) -> Result<CliArgs, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut parsed = CliArgs::default();
    let mut early_exit: Option<CliCommand> = None;
    let mut unknown: Option<String> = None;
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => {
                early_exit.get_or_insert(CliCommand::Version);
            }
            "--help" | "-h" => {
                early_exit.get_or_insert(CliCommand::Help);
            }
            "--once" => parsed.command = CliCommand::Once,
            "--verbose" | "-v" => parsed.verbose = true,
            "--config" => {
                let value = args.next().ok_or(ArgsError::MissingValue("--config"))?;
                parsed.config_path = Some(PathBuf::from(value));
            }
            other => {
                if let Some(value) = other.strip_prefix("--config=") {
                    if value.is_empty() {
                        return Err(ArgsError::MissingValue("--config"));
                    }
                    parsed.config_path = Some(PathBuf::from(value));
                } else {
                    unknown.get_or_insert_with(|| other.to_string());
                }
            }
        }
    }

    match (early_exit, unknown) {
        (Some(command), _) => parsed.command = command,
        (None, Some(arg)) => return Err(ArgsError::Unknown(arg)),
        (None, None) => {}
    }
    Ok(parsed)
}
