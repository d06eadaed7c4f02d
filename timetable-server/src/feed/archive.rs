//! Handle to a downloaded schedule archive.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempPath;

/// A schedule archive on disk, as returned by the fetcher.
///
/// The backing temp file is shared by reference count: the fetcher's cache
/// and any snapshot opened from this handle point at the same file, and the
/// file is deleted when the last clone drops. This is what lets an in-flight
/// query keep reading an archive the publisher has already replaced.
#[derive(Clone)]
pub struct FeedArchive {
    path: Arc<TempPath>,
    validator: Option<String>,
}

impl FeedArchive {
    /// Wrap a temp file, taking ownership of its deletion.
    ///
    /// `validator` is the origin's freshness marker for this download, when
    /// it supplied one.
    pub fn new(path: TempPath, validator: Option<String>) -> Self {
        Self {
            path: Arc::new(path),
            validator,
        }
    }

    /// Location of the archive on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The origin's freshness marker for this download.
    pub fn validator(&self) -> Option<&str> {
        self.validator.as_deref()
    }
}

impl fmt::Debug for FeedArchive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedArchive")
            .field("path", &self.path())
            .field("validator", &self.validator)
            .finish()
    }
}
