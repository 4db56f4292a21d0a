//! Files copied without transformation.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{LoadContext, Loader, LoaderTest, copy};
use crate::error::Result;
use crate::source_file::SourceFile;

const ASSET_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "svg", "json", "woff", "woff2", "ttf", "otf"];

/// Images, fonts and JSON, copied to the mirrored path.
pub struct AssetLoader;

#[async_trait]
impl Loader for AssetLoader {
    fn name(&self) -> &'static str {
        "asset"
    }

    fn test(&self) -> LoaderTest {
        LoaderTest::OneOf(ASSET_EXTENSIONS)
    }

    async fn load(&self, file: &SourceFile, ctx: &mut LoadContext<'_>) -> Result<Vec<PathBuf>> {
        let output = file.output_path(ctx.output, &file.file_name());
        copy(&file.path_in(ctx.root), &output).await?;
        tracing::debug!(file = %file, "copied asset");
        Ok(vec![output])
    }
}

/// `.ico` files always land at the output root, where browsers look for them.
pub struct IconLoader;

#[async_trait]
impl Loader for IconLoader {
    fn name(&self) -> &'static str {
        "icon"
    }

    fn test(&self) -> LoaderTest {
        LoaderTest::Extension("ico")
    }

    async fn load(&self, file: &SourceFile, ctx: &mut LoadContext<'_>) -> Result<Vec<PathBuf>> {
        let output = ctx.output.join(file.file_name());
        copy(&file.path_in(ctx.root), &output).await?;
        tracing::debug!(file = %file, "copied icon");
        Ok(vec![output])
    }
}
