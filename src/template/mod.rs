//! Template store module
//!
//! The templating collaborator: resolves template identifiers to files
//! under the configured directory and renders them through Tera with an
//! empty context. Resolution happens on every request, so templates
//! edited or removed on disk take effect immediately.

use std::path::PathBuf;
use tera::{Context, Tera};
use thiserror::Error;
use tokio::fs;

/// Template resolution and rendering failures
///
/// All variants surface as HTTP 500 at the dispatch layer.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("invalid template id: {0:?}")]
    InvalidId(String),
    #[error("template {0:?} not found")]
    NotFound(String),
    #[error("template {id:?} could not be read: {source}")]
    Unreadable {
        id: String,
        #[source]
        source: std::io::Error,
    },
    #[error("template {id:?} failed to render: {source}")]
    Render {
        id: String,
        #[source]
        source: tera::Error,
    },
}

/// Renders named templates from a directory
///
/// Template resources are files named `<id>.html`. The store holds no
/// cache and no mutable state; each render reads the current file.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Render the named template with an empty context
    pub async fn render(&self, template_id: &str) -> Result<String, TemplateError> {
        if !is_valid_id(template_id) {
            return Err(TemplateError::InvalidId(template_id.to_string()));
        }

        let path = self.dir.join(format!("{template_id}.html"));
        let source = match fs::read_to_string(&path).await {
            Ok(source) => source,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TemplateError::NotFound(template_id.to_string()));
            }
            Err(e) => {
                return Err(TemplateError::Unreadable {
                    id: template_id.to_string(),
                    source: e,
                });
            }
        };

        Tera::one_off(&source, &Context::new(), true).map_err(|e| TemplateError::Render {
            id: template_id.to_string(),
            source: e,
        })
    }
}

/// Template ids are single path components: no separators, no traversal
fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && !id.contains('/')
        && !id.contains('\\')
        && !id.bytes().all(|b| b == b'.')
}
