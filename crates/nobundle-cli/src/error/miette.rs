//! Conversion from CLI errors to miette reports.

use miette::Report;
use nobundle::Error as BuildError;
use nobundle_config::ConfigError;

use crate::error::CliError;

pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        CliError::Build(e) => build_error_to_miette(e),
        CliError::InvalidArgument(msg) => {
            miette::miette!(help = "Run `nobundle --help` for usage", "{}", msg)
        }
        _ => miette::miette!("{}", err),
    }
}

fn config_error_to_miette(err: ConfigError) -> Report {
    match &err {
        ConfigError::NotFound { file, .. } => miette::miette!(
            help = format!("Create {file} next to package.json; it can start as {{}}"),
            "{}",
            err
        ),
        ConfigError::InvalidPattern { pattern, .. } => miette::miette!(
            help = format!("'{pattern}' is compiled as a regular expression; escape literal dots as \\\\."),
            "{}",
            err
        ),
        _ => miette::miette!("{}", err),
    }
}

fn build_error_to_miette(err: BuildError) -> Report {
    match &err {
        BuildError::Resolution { specifier, .. } => miette::miette!(
            help = format!("Check that the directory '{specifier}' points into exists"),
            "{}",
            err
        ),
        BuildError::Parse { .. } | BuildError::Extract { .. } | BuildError::Component { .. } => {
            miette::miette!(help = "Only plain JavaScript is transformed", "{}", err)
        }
        _ => miette::miette!("{}", err),
    }
}
