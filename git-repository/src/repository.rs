use std::{cell::RefCell, path::PathBuf, rc::Rc};

use git_hash::ObjectId;
use git_odb::{Kind, Odb, RawObject};

use crate::{cache::Cache, discover, index::Index, object::Object, object::Payload, Error};

/// The resolved on-disk layout of a repository, as produced by discovery.
#[derive(Debug, Clone)]
pub struct Paths {
    pub path_repository: PathBuf,
    pub path_odb: PathBuf,
    pub path_index: Option<PathBuf>,
    pub path_workdir: Option<PathBuf>,
    pub is_bare: bool,
}

/// A repository: owns its path layout, its object database, its typed object cache, and its
/// lazily opened index.
///
/// A `Repository` is not `Sync`; it is designed for single-threaded, cooperative use as described
/// for the object store as a whole. Distinct `Repository` values over the same on-disk directory
/// are independent and share no in-memory state.
pub struct Repository {
    paths: Paths,
    odb: Odb,
    cache: Cache,
    index: RefCell<Option<Index>>,
}

impl Repository {
    /// Discover and open a repository rooted at `path`, inferring bareness from the final path
    /// component.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, Error> {
        let paths = discover::discover(path.as_ref())?;
        Self::from_paths(paths)
    }

    /// Open a repository from explicitly provided paths, applying no basename heuristics.
    pub fn open2(
        git_dir: impl AsRef<std::path::Path>,
        object_directory: Option<&std::path::Path>,
        index_file: Option<&std::path::Path>,
        work_tree: Option<&std::path::Path>,
    ) -> Result<Self, Error> {
        let paths = discover::discover_explicit(git_dir.as_ref(), object_directory, index_file, work_tree)?;
        Self::from_paths(paths)
    }

    fn from_paths(paths: Paths) -> Result<Self, Error> {
        let odb = git_odb::open(paths.path_odb.clone())?;
        Ok(Repository { paths, odb, cache: Cache::new(), index: RefCell::new(None) })
    }

    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    pub fn is_bare(&self) -> bool {
        self.paths.is_bare
    }

    /// Materialize the index on first call, returning a clone of the cached instance on every
    /// later call. A failure to open the index is not propagated; it is simply absent.
    pub fn index(&self) -> Option<Index> {
        if self.index.borrow().is_none() {
            let opened = self.paths.path_index.as_deref().and_then(Index::open);
            *self.index.borrow_mut() = opened;
        }
        self.index.borrow().clone()
    }

    /// Look up `digest`, returning the cached instance if present, else reading it through the
    /// database and parsing it.
    ///
    /// If `expected` is `Some(kind)` and the object on disk has a different kind, this fails with
    /// [`Error::InvalidType`] and leaves the cache unchanged.
    pub fn lookup(&mut self, digest: ObjectId, expected: Option<Kind>) -> Result<Rc<RefCell<Object>>, Error> {
        if let Some(cached) = self.cache.get(&digest) {
            return Ok(cached);
        }

        let raw = self.odb.read(&digest)?;
        if let Some(expected) = expected {
            if raw.kind != expected {
                return Err(Error::InvalidType);
            }
        }

        let payload = Payload::parse(raw.kind, raw.data.as_deref().unwrap_or(&[]))?;
        let object = Rc::new(RefCell::new(Object::cached(raw.kind, digest, payload)));
        self.cache.insert(digest, object.clone());
        Ok(object)
    }

    /// Allocate a new, in-memory typed object. It has no digest and is not cached until its
    /// first successful write.
    pub fn new_object(&self, payload: Payload) -> Rc<RefCell<Object>> {
        Rc::new(RefCell::new(Object::new_in_memory(payload)))
    }

    /// Serialize, hash, and write `handle` through the database, rebinding the cache under its
    /// new digest.
    ///
    /// A no-op (no I/O) if the object is not modified, matching testable property 7.
    pub fn write(&mut self, handle: &Rc<RefCell<Object>>) -> Result<ObjectId, Error> {
        let was_modified = handle.borrow().modified;
        if !was_modified {
            return Ok(handle.borrow().digest.expect("a clean object always carries a digest"));
        }

        let (raw, previous_digest) = {
            let mut object = handle.borrow_mut();
            object.slot.reset_for_write();
            if let Err(err) = object.payload.serialize(&mut object.slot) {
                object.slot.close();
                return Err(err);
            }
            let bytes = object.slot.bytes().to_vec();
            object.slot.close();
            (RawObject::from_bytes(object.kind, bytes), object.digest)
        };

        let new_digest = self.odb.write(&raw)?;

        if let Some(previous_digest) = previous_digest {
            self.cache.remove(&previous_digest);
        }

        {
            let mut object = handle.borrow_mut();
            object.digest = Some(new_digest);
            object.in_memory = false;
            object.modified = false;
        }
        self.cache.insert(new_digest, handle.clone());

        Ok(new_digest)
    }
}

impl Drop for Repository {
    /// Iterates every object still resident in the cache and closes its write buffer. After this
    /// runs, no typed-object handle retained by a caller is valid for further writes.
    fn drop(&mut self) {
        for (_, object) in self.cache.iter() {
            object.borrow_mut().slot.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Blob;

    fn open_repo() -> (tempfile::TempDir, Repository) {
        let dir = tempfile::tempdir().unwrap();
        let git_dir = dir.path().join(".git");
        std::fs::create_dir_all(git_dir.join("objects")).unwrap();
        std::fs::write(git_dir.join("HEAD"), b"ref: refs/heads/main\n").unwrap();
        std::fs::write(git_dir.join("index"), b"").unwrap();
        let repo = Repository::open(&git_dir).unwrap();
        (dir, repo)
    }

    #[test]
    fn writing_a_blob_then_looking_it_up_returns_the_same_instance() {
        let (_dir, mut repo) = open_repo();
        let handle = repo.new_object(Payload::Blob(Blob { data: b"hello".to_vec() }));
        let digest = repo.write(&handle).unwrap();
        assert_eq!(digest.to_hex(), "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0");

        let looked_up = repo.lookup(digest, None).unwrap();
        assert!(Rc::ptr_eq(&handle, &looked_up));
    }

    #[test]
    fn second_lookup_of_an_object_read_from_disk_returns_the_same_instance() {
        let (_dir, mut repo) = open_repo();
        let handle = repo.new_object(Payload::Blob(Blob { data: b"hello".to_vec() }));
        let digest = repo.write(&handle).unwrap();
        drop(handle);

        let first = repo.lookup(digest, None).unwrap();
        let second = repo.lookup(digest, None).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn write_on_a_clean_object_is_a_no_op() {
        let (_dir, mut repo) = open_repo();
        let handle = repo.new_object(Payload::Blob(Blob { data: b"hello".to_vec() }));
        let digest = repo.write(&handle).unwrap();
        assert!(!handle.borrow().modified());

        let second_write = repo.write(&handle).unwrap();
        assert_eq!(digest, second_write);
    }

    #[test]
    fn lookup_with_the_wrong_expected_type_fails_and_leaves_the_cache_unchanged() {
        let (_dir, mut repo) = open_repo();
        let handle = repo.new_object(Payload::Blob(Blob { data: b"hello".to_vec() }));
        let digest = repo.write(&handle).unwrap();
        repo.cache.remove(&digest);

        assert!(matches!(repo.lookup(digest, Some(Kind::Commit)), Err(Error::InvalidType)));
        assert!(repo.cache.get(&digest).is_none());
    }

    #[test]
    fn lookup_of_an_absent_digest_propagates_not_found() {
        let (_dir, mut repo) = open_repo();
        let err = repo.lookup(ObjectId::null(), None).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::NotFound);
    }
}
