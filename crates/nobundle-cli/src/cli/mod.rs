//! Command-line interface definition.
//!
//! ```text
//! nobundle --input <DIR> [--output <DIR>] [--verbose | --quiet] [--no-color]
//! ```

mod tests;

use std::path::PathBuf;

use clap::{CommandFactory, Parser};

/// Transpiles a vue-cli project into a non-bundled, non node-dependent project.
#[derive(Parser, Debug)]
#[command(
    name = "nobundle",
    version,
    about = "Transpiles a vue-cli project into a non-bundled, non node-dependent project.",
    long_about = "Transpiles a vue-cli project into a non-bundled, non node-dependent project.\n\
                  Every import is rewritten to a path or URL a browser can load directly,\n\
                  using the import options in <input>/imports.config.json.",
    disable_help_flag = true
)]
pub struct Cli {
    /// Project root containing imports.config.json
    #[arg(short, long, value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Output directory [default: <input>/dist]
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Print usage and exit
    #[arg(short, long)]
    pub help: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Shows every rewritten specifier and each file as it is processed.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// `--help`, or nothing at all on the command line.
    pub fn wants_usage(&self) -> bool {
        self.help
            || (self.input.is_none()
                && self.output.is_none()
                && !self.verbose
                && !self.quiet
                && !self.no_color)
    }
}

pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

pub fn print_usage() {
    println!("{}", usage());
}
