//! Session-scoped media resources.
//!
//! Local uploads are backed by files that are only meaningful for the
//! current session. The registry hands out opaque handles for them; a handle
//! stays valid until it is explicitly released or the process exits. There
//! is no background collection: an unreleased handle outlives whatever
//! referenced it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Opaque identifier for a session-scoped media resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandleId(u64);

/// Registry of ephemeral media handles for the current session.
#[derive(Debug, Default)]
pub struct SessionMedia {
    next_id: u64,
    entries: HashMap<HandleId, PathBuf>,
}

impl SessionMedia {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backing file and return its handle.
    pub fn register(&mut self, path: impl Into<PathBuf>) -> HandleId {
        let id = HandleId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, path.into());
        id
    }

    /// The backing path for a live handle.
    pub fn resolve(&self, id: HandleId) -> Option<&Path> {
        self.entries.get(&id).map(PathBuf::as_path)
    }

    /// Release a handle. Returns false if it was already gone.
    pub fn release(&mut self, id: HandleId) -> bool {
        self.entries.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_resolve_release() {
        let mut media = SessionMedia::new();
        let id = media.register("/tmp/filme.mp4");
        assert_eq!(media.resolve(id).unwrap(), Path::new("/tmp/filme.mp4"));

        assert!(media.release(id));
        assert!(media.resolve(id).is_none());
        assert!(!media.release(id));
    }

    #[test]
    fn test_handles_are_distinct() {
        let mut media = SessionMedia::new();
        let a = media.register("/tmp/a.mp4");
        let b = media.register("/tmp/b.mp4");
        assert_ne!(a, b);
        assert_eq!(media.len(), 2);
    }
}
