//! Cache of resolved extended configurations
//!
//! Owned by the caller and lent to each resolution as `&mut`, so sibling
//! projects that extend the same base only parse it once. Entries keep the
//! diagnostics produced while resolving them; a hit replays those.

use super::resolver::ParsedConfigNode;
use crate::diagnostics::Diagnostic;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct CachedConfig {
    pub node: ParsedConfigNode,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Default)]
pub struct ExtendedConfigCache {
    entries: HashMap<String, CachedConfig>,
}

impl ExtendedConfigCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up by canonical path
    pub fn get(&self, key: &str) -> Option<&CachedConfig> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: String, entry: CachedConfig) {
        self.entries.insert(key, entry);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Drop one entry, e.g. after the document changed on disk
    pub fn invalidate(&mut self, key: &str) -> Option<CachedConfig> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
