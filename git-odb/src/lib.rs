//! A pluggable, priority-ordered object database.
//!
//! An [`Odb`] holds zero or more [`Backend`]s and dispatches every lookup and write to them in
//! descending priority order, returning the first backend's answer. The database itself never
//! parses, hashes, compresses, or caches object bytes; those are capabilities of individual
//! backends (see [`loose::LooseBackend`] and [`packed::PackedBackend`]) or of the layer above
//! this crate.

#![deny(rust_2018_idioms)]

mod backend;
mod error;
mod loose;
mod object;
mod packed;
mod store;

pub use backend::{Backend, BindingCell, Header};
pub use error::{Error, ErrorKind};
pub use loose::LooseBackend;
pub use object::{Kind, RawObject};
pub use packed::PackedBackend;
pub use store::Odb;

/// Build the default backend composition described for a standard repository layout: a
/// [`LooseBackend`] rooted at `objects_dir` given loose priority, and (if the directory has any
/// pack present) a [`PackedBackend`] rooted at `objects_dir/pack` given pack priority.
pub fn open(objects_dir: impl Into<std::path::PathBuf>) -> Result<Odb, Error> {
    let objects_dir = objects_dir.into();
    let mut odb = Odb::new();
    odb.add_backend(Box::new(LooseBackend::at(objects_dir.clone())))?;
    let packed = PackedBackend::at(objects_dir.join("pack"));
    if packed.has_any_pack() {
        odb.add_backend(Box::new(packed))?;
    }
    Ok(odb)
}
