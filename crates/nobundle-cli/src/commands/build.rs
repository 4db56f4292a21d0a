//! The build command.

use std::time::Instant;

use nobundle::{BuildOptions, Builder};
use nobundle_config::{CONFIG_FILE_NAME, ConfigDiscovery};

use crate::cli::Cli;
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute a build.
///
/// # Build Process
///
/// 1. Validate the input directory
/// 2. Load `imports.config.json` from it
/// 3. Rewrite and emit every source file, then `index.html`
/// 4. Report bare specifiers that survived and print a summary
///
/// # Errors
///
/// Missing input, missing or invalid configuration, and any failure while
/// transforming a file.
pub async fn execute(args: &Cli) -> Result<()> {
    let start = Instant::now();
    let say = |message: String| {
        if !args.quiet {
            ui::info(&message);
        }
    };

    let input = args
        .input
        .as_deref()
        .ok_or_else(|| CliError::InvalidArgument("Must specify input directory".to_string()))?;
    let input = utils::validate_input(input)?;
    let output = utils::resolve_output(&input, args.output.as_deref());

    say(format!("Loading {CONFIG_FILE_NAME} from {}", input.display()));
    let config = ConfigDiscovery::new(&input).load()?;
    tracing::debug!(
        import_options = config.import_options.len(),
        excluded_libraries = config.excluded_libraries.len(),
        aliases = config.aliases.len(),
        "loaded configuration"
    );
    utils::ensure_output_dir(&output)?;

    say(format!("Building {} into {}", input.display(), output.display()));
    let options = BuildOptions::new(&input).output(&output);
    let report = Builder::new().build_with_config(&options, &config).await?;
    tracing::debug!(
        files = report.files_processed(),
        skipped = report.skipped,
        "build report ready"
    );

    if args.quiet {
        return Ok(());
    }
    for bare in &report.bare_specifiers {
        ui::warning(&format!(
            "{}: '{}' is still a bare specifier; add it to importOptions",
            bare.file, bare.specifier
        ));
    }
    ui::print_build_summary(&report);
    ui::success(&format!(
        "Build complete in {}. The dist directory {} is ready to be deployed.",
        ui::format_duration(start.elapsed()),
        report.output_dir.display()
    ));
    Ok(())
}
