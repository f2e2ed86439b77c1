use std::path::{Path, PathBuf};
use std::sync::Arc;

use snippetbox_infra::SnippetStore;

/// Application dependencies, built once at startup and shared by every
/// request. Immutable after construction.
#[derive(Clone)]
pub struct AppContext {
    snippets: Arc<dyn SnippetStore>,
    static_dir: PathBuf,
}

impl AppContext {
    pub fn new(snippets: Arc<dyn SnippetStore>, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            snippets,
            static_dir: static_dir.into(),
        }
    }

    pub fn snippets(&self) -> &dyn SnippetStore {
        self.snippets.as_ref()
    }

    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }
}
