//! Line-oriented driver for the request wizard.
//!
//! Interactive sessions use `rustyline`; setting `REQUEST_WIZARD_CLI_SCRIPT`
//! switches to reading commands from stdin, one per line.

pub mod core;
pub mod io;
pub mod output;
mod shell;

pub use self::core::{CliError, CliMode, CommandError, ShellContext};
pub use shell::{run_cli, SCRIPT_ENV};
