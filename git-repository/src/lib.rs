//! Open repositories, look up and create typed objects, and write them back, backed by
//! [`git_odb`] for storage and [`git_hash`] for content addressing.
//!
//! ```no_run
//! # fn main() -> Result<(), git_repository::Error> {
//! let mut repo = git_repository::Repository::open("/path/to/repo/.git")?;
//! let handle = repo.new_object(git_repository::object::Payload::Blob(
//!     git_repository::object::Blob { data: b"hello".to_vec() },
//! ));
//! let digest = repo.write(&handle)?;
//! assert_eq!(repo.lookup(digest, None)?.borrow().digest(), Some(digest));
//! # Ok(())
//! # }
//! ```

#![deny(rust_2018_idioms)]

mod cache;
mod discover;
mod error;
mod index;
pub mod object;
mod repository;
mod source;

pub use error::{Error, ErrorKind};
pub use index::Index;
pub use repository::{Paths, Repository};
