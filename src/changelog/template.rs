//! Rendering the document model through minijinja templates.

use std::path::Path;

use minijinja::Environment;
use tracing::debug;

use crate::error::ChangelogError;

use super::document::ChangelogDocument;

/// Name of the entry template, both built in and inside a template directory.
pub const TEMPLATE_NAME: &str = "changelog.md.j2";

const BUILTIN_TEMPLATE: &str = include_str!("../../templates/changelog.md.j2");

/// Renders a [`ChangelogDocument`] to text.
#[derive(Debug)]
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Renderer using the Markdown template shipped with the crate.
    pub fn builtin() -> Result<Self, ChangelogError> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, BUILTIN_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Renderer loading templates from `dir`, which must contain [`TEMPLATE_NAME`].
    ///
    /// Other files in the directory can be pulled in with `include`/`import`.
    pub fn from_dir(dir: &Path) -> Result<Self, ChangelogError> {
        if !dir.is_dir() {
            return Err(ChangelogError::TemplateDirMissing(dir.to_path_buf()));
        }
        debug!(dir = %dir.display(), "Loading templates from directory");

        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(dir));
        Ok(Self { env })
    }

    pub fn render(&self, document: &ChangelogDocument) -> Result<String, ChangelogError> {
        let template = self.env.get_template(TEMPLATE_NAME)?;
        let mut rendered = template.render(document)?;

        if !rendered.ends_with('\n') {
            rendered.push('\n');
        }

        Ok(rendered)
    }
}
