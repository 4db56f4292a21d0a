//! nobundle CLI entry point: parse arguments, set up logging, run the build.

use clap::Parser;
use miette::Result;
use nobundle_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // No arguments, or an explicit help flag: usage and a failing exit code.
    if args.wants_usage() {
        cli::print_usage();
        std::process::exit(1);
    }

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    commands::build_execute(&args)
        .await
        .map_err(error::cli_error_to_miette)
}
