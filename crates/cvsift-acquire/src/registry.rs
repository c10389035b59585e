//! Extension → handler dispatch table.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use cvsift_core::Result;

/// Turns one document format into plain text.
pub trait TextHandler: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Lower-case extensions (without the dot) this handler accepts.
    fn extensions(&self) -> &[&'static str];

    fn extract(&self, path: &Path) -> Result<String>;
}

/// Registry of text handlers keyed by file extension.
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn TextHandler>>,
}

impl HandlerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler for all of its extensions, replacing earlier ones.
    pub fn register<H: TextHandler + 'static>(&mut self, handler: H) {
        let handler: Arc<dyn TextHandler> = Arc::new(handler);
        for ext in handler.extensions() {
            self.handlers.insert((*ext).to_string(), handler.clone());
        }
    }

    #[must_use]
    pub fn get_for_extension(&self, ext: &str) -> Option<Arc<dyn TextHandler>> {
        self.handlers.get(&ext.to_lowercase()).cloned()
    }

    #[must_use]
    pub fn get_for_path(&self, path: &Path) -> Option<Arc<dyn TextHandler>> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|ext| self.get_for_extension(ext))
    }

    /// Registered extensions, sorted.
    #[must_use]
    pub fn extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        exts.sort_unstable();
        exts
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
