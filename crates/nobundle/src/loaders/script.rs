//! Plain `.js` modules.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{LoadContext, Loader, LoaderTest, copy, read_to_string, write};
use crate::ecma;
use crate::error::Result;
use crate::source_file::SourceFile;

/// Rewrites scripts; pretty-prints app sources and minifies everything else.
///
/// Files listed in `excludedLibraries` are copied byte for byte.
pub struct ScriptLoader;

#[async_trait]
impl Loader for ScriptLoader {
    fn name(&self) -> &'static str {
        "script"
    }

    fn test(&self) -> LoaderTest {
        LoaderTest::Extension("js")
    }

    async fn load(&self, file: &SourceFile, ctx: &mut LoadContext<'_>) -> Result<Vec<PathBuf>> {
        let input = file.path_in(ctx.root);
        let output = file.output_path(ctx.output, &file.file_name());

        if ctx.config.is_excluded_library(&file.file_name()) {
            copy(&input, &output).await?;
            tracing::info!(file = %file, "copied excluded library");
            return Ok(vec![output]);
        }

        let source = read_to_string(&input).await?;
        let module = ctx.pipeline.transform_module(&source, ctx.root, file, None)?;
        ctx.record_bare(file, module.bare_specifiers);

        let code = if file.is_under(&ctx.config.settings.source_dir) {
            module.code
        } else {
            ecma::minify_async(module.code, PathBuf::from(file.relative_path())).await?
        };
        write(&output, code).await?;

        tracing::info!(file = %file, "transformed script");
        Ok(vec![output])
    }
}
