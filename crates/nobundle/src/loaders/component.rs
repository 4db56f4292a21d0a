//! `.vue` files: compile, rewrite, inline the template, emit script and style.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{LoadContext, Loader, LoaderTest, read_to_string, write};
use crate::error::Result;
use crate::pipeline::{Pipeline, RewriteContext, TransformedModule};
use crate::sfc::{ComponentCompiler, VueCompiler};
use crate::source_file::SourceFile;

pub struct ComponentLoader {
    compiler: Box<dyn ComponentCompiler>,
}

impl ComponentLoader {
    pub fn new(compiler: Box<dyn ComponentCompiler>) -> Self {
        Self { compiler }
    }
}

impl Default for ComponentLoader {
    fn default() -> Self {
        Self::new(Box::new(VueCompiler))
    }
}

struct ComponentOutput {
    module: TransformedModule,
    style: Option<String>,
}

impl ComponentLoader {
    fn transform(
        &self,
        source: &str,
        file: &SourceFile,
        root: &Path,
        pipeline: &Pipeline,
    ) -> Result<ComponentOutput> {
        let path = PathBuf::from(file.relative_path());
        let compiled = self.compiler.compile(source, &path)?;

        let template = match compiled.template {
            Some(markup) => {
                let ctx = RewriteContext::new(root, &file.directory, &path);
                Some(pipeline.rewrite_markup(&markup, &ctx)?)
            }
            None => None,
        };

        let module = pipeline.transform_module(&compiled.script, root, file, template.as_deref())?;
        Ok(ComponentOutput {
            module,
            style: compiled.style,
        })
    }
}

#[async_trait]
impl Loader for ComponentLoader {
    fn name(&self) -> &'static str {
        "component"
    }

    fn test(&self) -> LoaderTest {
        LoaderTest::Extension("vue")
    }

    async fn load(&self, file: &SourceFile, ctx: &mut LoadContext<'_>) -> Result<Vec<PathBuf>> {
        let source = read_to_string(&file.path_in(ctx.root)).await?;
        let ComponentOutput { module, style } =
            self.transform(&source, file, ctx.root, ctx.pipeline)?;
        ctx.record_bare(file, module.bare_specifiers);

        let script_name = format!("{}.js", file.base_name);
        let script_path = file.output_path(ctx.output, &script_name);
        write(&script_path, module.code).await?;
        let mut written = vec![script_path];

        if let Some(css) = style {
            let style_name = format!("{}.css", file.base_name);
            let style_path = file.output_path(ctx.output, &style_name);
            write(&style_path, css).await?;
            ctx.stylesheets.push(file.output_url(&style_name));
            written.push(style_path);
        }

        tracing::info!(file = %file, compiler = self.compiler.name(), "compiled component");
        Ok(written)
    }
}
