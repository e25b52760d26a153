use crate::ports::PageGetter;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Scheme name → page getter. Built once at startup and shared read-only by
/// every request.
#[derive(Clone, Default)]
pub struct SchemeTable {
    children: HashMap<String, Arc<dyn PageGetter>>,
}

impl SchemeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scheme(mut self, name: impl Into<String>, getter: Arc<dyn PageGetter>) -> Self {
        self.children.insert(name.into(), getter);
        self
    }

    pub fn get(&self, scheme: &str) -> Option<&Arc<dyn PageGetter>> {
        self.children.get(scheme)
    }

    pub fn contains(&self, scheme: &str) -> bool {
        self.children.contains_key(scheme)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl fmt::Debug for SchemeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("SchemeTable").field("schemes", &names).finish()
    }
}
