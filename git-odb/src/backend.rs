use git_hash::ObjectId;

use crate::{Error, RawObject};

/// Just the `{type, length}` portion of a [`RawObject`], as produced by a header-only read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub kind: crate::Kind,
    pub length: usize,
}

/// A storage provider for raw objects.
///
/// Only [`read`][Backend::read] is mandatory; `exists`, `read_header` and `write` are an
/// optional capability set a concrete backend opts into by overriding the default
/// implementation, which unconditionally reports the capability as unsupported, rather than
/// modeling the capability set as `Option<fn>` fields.
pub trait Backend {
    /// A human-readable name for diagnostics; backends don't need globally unique names.
    fn name(&self) -> &str;

    /// This backend's priority; the [`Odb`][crate::Odb] probes backends in descending priority
    /// order, breaking ties by insertion order.
    fn priority(&self) -> i32;

    /// Look up `id`, returning its full raw bytes on success or `Ok(None)` if this backend
    /// doesn't have it (as distinct from an I/O error, which is propagated).
    fn read(&self, id: &ObjectId) -> Result<Option<RawObject>, Error>;

    /// Whether this backend has `id`, without necessarily reading its bytes. The default
    /// implementation delegates to [`read`][Backend::read].
    fn exists(&self, id: &ObjectId) -> Result<bool, Error> {
        Ok(self.read(id)?.is_some())
    }

    /// Look up only the `{type, length}` header of `id`, if this backend can produce one
    /// without materializing the full payload. Returning `Ok(None)` here means "ask me for a
    /// header and I'll decline", which is different from "I don't have this object": the ODB
    /// treats a declining backend the same way as a backend that was never asked, and falls back
    /// to a full [`read`][Backend::read] cycle.
    fn read_header(&self, _id: &ObjectId) -> Result<Option<Header>, Error> {
        Ok(None)
    }

    /// Whether this backend supports [`read_header`][Backend::read_header] at all. Backends that
    /// return `false` here are skipped entirely during the header-only probe phase, so the
    /// degrade-to-full-read fallback triggers at most once per `read_header` call instead of once
    /// per declining backend.
    fn supports_read_header(&self) -> bool {
        false
    }

    /// Persist `object`, returning its content digest. The default implementation reports this
    /// backend as read-only.
    fn write(&self, _object: &RawObject) -> Result<ObjectId, Error> {
        Err(Error::Other(format!("backend {:?} does not support writing", self.name())))
    }

    /// Whether this backend supports [`write`][Backend::write] at all.
    fn supports_write(&self) -> bool {
        false
    }

    /// Release any resources held by this backend. Called exactly once, when the owning
    /// [`Odb`][crate::Odb] is closed or dropped. The default implementation does nothing.
    fn free(&mut self) {}

    /// The id of the [`Odb`][crate::Odb] this backend is currently bound to, if any. Backends
    /// that can only ever belong to a single database (the common case) use the default, which
    /// reports no binding and therefore never triggers [`Error::Busy`].
    fn bound_odb(&self) -> Option<u64> {
        None
    }

    /// Record that this backend is now bound to the database identified by `odb_id`. The default
    /// implementation does nothing, matching the default, permissive [`bound_odb`][Backend::bound_odb].
    fn bind(&self, _odb_id: u64) {}
}

/// A `Cell`-backed implementation of the binding bookkeeping described in [`Backend::bound_odb`]
/// and [`Backend::bind`], for backends that want to enforce single-ownership.
#[derive(Default)]
pub struct BindingCell(std::cell::Cell<Option<u64>>);

impl BindingCell {
    pub fn get(&self) -> Option<u64> {
        self.0.get()
    }

    pub fn set(&self, odb_id: u64) {
        self.0.set(Some(odb_id));
    }
}
