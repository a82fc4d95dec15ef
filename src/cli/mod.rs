//! Command-line interface.
//!
//! - [`args`] - process arguments (`--once`, `--config`, ...)
//! - [`command`] - watch-mode commands typed on stdin
//!
//! ```ignore
//! use smogwatch::cli::{parse_args, CliCommand};
//!
//! let args = parse_args(std::env::args())?;
//! if args.command == CliCommand::Version {
//!     println!("{}", smogwatch::cli::version_line());
//! }
//! ```

pub mod args;
pub mod command;

pub use args::{parse_args, ArgsError, CliArgs, CliCommand, USAGE};
pub use command::WatchCommand;

/// Crate version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_line() -> String {
    format!("smogwatch {}", VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_line() {
        assert!(version_line().starts_with("smogwatch "));
        assert!(version_line().ends_with(VERSION));
    }
}
