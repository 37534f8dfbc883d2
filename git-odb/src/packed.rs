use std::path::PathBuf;

use git_hash::ObjectId;

use crate::{backend::BindingCell, Backend, Error};

/// The default priority given to the packed backend: lower than loose, since loose objects are
/// the ones most likely to be re-requested shortly after being written.
pub const DEFAULT_PRIORITY: i32 = 50;

/// A backend over the `pack/` directory of a git objects store.
///
/// Decoding pack files, their indices, and delta chains is out of scope here; this backend only
/// notices whether at least one `pack/*.idx` file exists. If none do, it behaves as an empty
/// backend that declines every lookup. If one does, it still declines every lookup: it has no
/// way to honor a `read`, since doing so would require the pack format it doesn't implement.
/// This is a deliberate, permanent stub, not a placeholder awaiting completion.
pub struct PackedBackend {
    pack_dir: PathBuf,
    priority: i32,
    binding: BindingCell,
}

impl PackedBackend {
    /// Open a packed backend rooted at `pack_dir` (typically `<objects>/pack`).
    pub fn at(pack_dir: impl Into<PathBuf>) -> Self {
        PackedBackend { pack_dir: pack_dir.into(), priority: DEFAULT_PRIORITY, binding: BindingCell::default() }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Whether at least one `*.idx` file is present. This is the full extent of what this
    /// backend understands about pack contents.
    pub fn has_any_pack(&self) -> bool {
        let Ok(entries) = std::fs::read_dir(&self.pack_dir) else {
            return false;
        };
        entries.filter_map(|e| e.ok()).any(|entry| entry.path().extension().map_or(false, |ext| ext == "idx"))
    }
}

impl Backend for PackedBackend {
    fn name(&self) -> &str {
        "packed"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn read(&self, _id: &ObjectId) -> Result<Option<crate::RawObject>, Error> {
        Ok(None)
    }

    fn exists(&self, _id: &ObjectId) -> Result<bool, Error> {
        Ok(false)
    }

    fn bound_odb(&self) -> Option<u64> {
        self.binding.get()
    }

    fn bind(&self, odb_id: u64) {
        self.binding.set(odb_id);
    }
}
