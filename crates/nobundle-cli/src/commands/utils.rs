//! Path helpers shared by commands.

use std::path::{Path, PathBuf};

use nobundle::DEFAULT_OUTPUT_DIR;

use crate::error::{CliError, Result, ResultExt};

/// The input root must be an existing directory.
pub fn validate_input(input: &Path) -> Result<PathBuf> {
    let metadata = std::fs::metadata(input).with_path(input)?;
    if !metadata.is_dir() {
        return Err(CliError::DirectoryNotFound(input.to_path_buf()));
    }
    Ok(input.to_path_buf())
}

/// `output` if given, else `<input>/dist`.
pub fn resolve_output(input: &Path, output: Option<&Path>) -> PathBuf {
    output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.join(DEFAULT_OUTPUT_DIR))
}

/// Create the output directory. An existing non-directory path is rejected.
pub fn ensure_output_dir(out_dir: &Path) -> Result<()> {
    if out_dir.exists() && !out_dir.is_dir() {
        return Err::<(), _>(CliError::InvalidArgument(format!(
            "Output path exists but is not a directory: {}",
            out_dir.display()
        )))
        .with_hint("Pass --output <DIR> to build somewhere else");
    }
    std::fs::create_dir_all(out_dir)
        .context(format!("Cannot create output directory {}", out_dir.display()))
}
