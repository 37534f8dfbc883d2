use std::sync::atomic::{AtomicU64, Ordering};

use git_hash::ObjectId;

use crate::{backend::Header, Backend, Error, Kind, RawObject};

static NEXT_ODB_ID: AtomicU64 = AtomicU64::new(1);

struct Slot {
    priority: i32,
    insertion_order: u64,
    backend: Box<dyn Backend>,
}

/// A priority-ordered stack of [`Backend`]s that collectively satisfy `exists`, `read`,
/// `read_header` and `write` for objects keyed by their content digest.
///
/// The database itself never parses, validates, hashes, or caches anything; it only dispatches
/// to its backends in priority order (ties broken by insertion order) and reports the first
/// success.
pub struct Odb {
    id: u64,
    backends: Vec<Slot>,
    next_insertion_order: u64,
}

impl Default for Odb {
    fn default() -> Self {
        Self::new()
    }
}

impl Odb {
    /// Create an empty database. An empty database is not itself an error; it simply fails
    /// every subsequent read with [`Error::NotFound`].
    pub fn new() -> Self {
        Odb {
            id: NEXT_ODB_ID.fetch_add(1, Ordering::Relaxed),
            backends: Vec::new(),
            next_insertion_order: 0,
        }
    }

    /// Add `backend` to this database, re-sorting the backend stack by descending priority
    /// (ties keep relative insertion order).
    ///
    /// Fails with [`Error::Busy`] if `backend` reports that it is already bound to a different
    /// database.
    pub fn add_backend(&mut self, backend: Box<dyn Backend>) -> Result<(), Error> {
        if let Some(other) = backend.bound_odb() {
            if other != self.id {
                return Err(Error::Busy);
            }
        }
        backend.bind(self.id);
        let insertion_order = self.next_insertion_order;
        self.next_insertion_order += 1;
        self.backends.push(Slot { priority: backend.priority(), insertion_order, backend });
        // `sort_by` is a stable sort: backends with equal priority keep their relative
        // insertion order.
        self.backends.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.insertion_order.cmp(&b.insertion_order)));
        Ok(())
    }

    /// Iterate the backends currently held, in probe order.
    pub fn backends(&self) -> impl Iterator<Item = &dyn Backend> {
        self.backends.iter().map(|slot| slot.backend.as_ref())
    }

    /// Probe backends in order; return true on the first that confirms the object is present.
    pub fn exists(&self, id: &ObjectId) -> bool {
        self.backends.iter().any(|slot| slot.backend.exists(id).unwrap_or(false))
    }

    /// Probe backends in order; return the first successful read. Fails with
    /// [`Error::NotFound`] iff every backend reports the object absent.
    pub fn read(&self, id: &ObjectId) -> Result<RawObject, Error> {
        for slot in &self.backends {
            if let Some(obj) = slot.backend.read(id)? {
                return Ok(obj);
            }
        }
        Err(Error::NotFound)
    }

    /// Probe backends that advertise header-only support first; if all of them decline or fail,
    /// degrade to a full [`read`][Odb::read] and discard the payload.
    pub fn read_header(&self, id: &ObjectId) -> Result<Header, Error> {
        for slot in &self.backends {
            if !slot.backend.supports_read_header() {
                continue;
            }
            match slot.backend.read_header(id) {
                Ok(Some(header)) => return Ok(header),
                Ok(None) | Err(_) => continue,
            }
        }
        let obj = self.read(id)?;
        Ok(Header { kind: obj.kind, length: obj.length })
    }

    /// Probe backends in order; ask the first that advertises write support. If it fails, try
    /// the next writable backend. Fails if none can write.
    pub fn write(&self, object: &RawObject) -> Result<ObjectId, Error> {
        let mut last_err = None;
        for slot in &self.backends {
            if !slot.backend.supports_write() {
                continue;
            }
            match slot.backend.write(object) {
                Ok(id) => return Ok(id),
                Err(err) => last_err = Some(err),
            }
        }
        Err(last_err.unwrap_or_else(|| Error::Other("no backend in the database supports writing".into())))
    }

    /// Invoke every backend's [`free`][Backend::free] hook and release the collection.
    pub fn close(&mut self) {
        for slot in &mut self.backends {
            slot.backend.free();
        }
        self.backends.clear();
    }
}

impl Drop for Odb {
    fn drop(&mut self) {
        self.close();
    }
}

/// Helper used by [`Backend`] implementations to decide whether a candidate byte slice actually
/// names a loose-representable [`Kind`].
pub(crate) fn loose_kind_from_name(name: &[u8]) -> Option<Kind> {
    Kind::from_name(name)
}
