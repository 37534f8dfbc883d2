use std::path::PathBuf;

/// A lazily materialized marker for the working-directory index file.
///
/// Parsing the index's on-disk format is out of scope here; opening it only confirms the file
/// exists at the expected path and remembers that path for later use by a higher layer.
#[derive(Debug, Clone)]
pub struct Index {
    path: PathBuf,
}

impl Index {
    /// Open the index at `path`, returning `None` if it cannot be opened rather than
    /// propagating an error, matching the lazy-index contract.
    pub(crate) fn open(path: &std::path::Path) -> Option<Self> {
        path.is_file().then(|| Index { path: path.to_path_buf() })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}
