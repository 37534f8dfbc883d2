//! Typed objects: the parsed, in-memory form of a raw object plus the envelope bookkeeping that
//! lets the repository track whether it has been written and whether it has pending edits.

mod blob;
mod commit;
mod tag;
mod tree;

pub use blob::Blob;
pub use commit::Commit;
pub use tag::Tag;
pub use tree::{Tree, TreeEntry};

use git_hash::ObjectId;
use git_odb::Kind;

use crate::{source::SourceSlot, Error};

/// The parsed body of a typed object, tagged by its own kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
    Tag(Tag),
}

impl Payload {
    pub fn kind(&self) -> Kind {
        match self {
            Payload::Blob(_) => Kind::Blob,
            Payload::Tree(_) => Kind::Tree,
            Payload::Commit(_) => Kind::Commit,
            Payload::Tag(_) => Kind::Tag,
        }
    }

    pub(crate) fn parse(kind: Kind, bytes: &[u8]) -> Result<Self, Error> {
        match kind {
            Kind::Blob => Blob::parse(bytes).map(Payload::Blob),
            Kind::Tree => Tree::parse(bytes).map(Payload::Tree),
            Kind::Commit => Commit::parse(bytes).map(Payload::Commit),
            Kind::Tag => Tag::parse(bytes).map(Payload::Tag),
            _ => Err(Error::InvalidType),
        }
    }

    pub(crate) fn serialize(&self, slot: &mut SourceSlot) -> Result<(), Error> {
        match self {
            Payload::Blob(blob) => blob.serialize(slot),
            Payload::Tree(tree) => tree.serialize(slot),
            Payload::Commit(commit) => commit.serialize(slot),
            Payload::Tag(tag) => tag.serialize(slot),
        }
    }
}

/// The common header shared by every typed object, mirroring the envelope described for the
/// lookup and write-back pipelines: owning digest, in-memory/modified flags, and a source slot.
///
/// There is no back-reference to the owning repository; callers only ever reach an `Object`
/// through the [`crate::Repository`] methods that produced it, so "owning repository" is implicit
/// in which repository's cache the object's `Rc` lives in rather than a stored pointer.
#[derive(Debug)]
pub struct Object {
    pub(crate) kind: Kind,
    pub(crate) digest: Option<ObjectId>,
    pub(crate) in_memory: bool,
    pub(crate) modified: bool,
    pub(crate) slot: SourceSlot,
    pub(crate) payload: Payload,
}

impl Object {
    pub(crate) fn new_in_memory(payload: Payload) -> Self {
        Object { kind: payload.kind(), digest: None, in_memory: true, modified: true, slot: SourceSlot::new(), payload }
    }

    pub(crate) fn cached(kind: Kind, digest: ObjectId, payload: Payload) -> Self {
        let mut slot = SourceSlot::new();
        slot.close();
        Object { kind, digest: Some(digest), in_memory: false, modified: false, slot, payload }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The object's content digest, or `None` if it has never been written.
    pub fn digest(&self) -> Option<ObjectId> {
        self.digest
    }

    pub fn in_memory(&self) -> bool {
        self.in_memory
    }

    pub fn modified(&self) -> bool {
        self.modified
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// A mutable view of the payload. Taking this marks the object modified, since the caller is
    /// assumed to be about to change it.
    pub fn payload_mut(&mut self) -> &mut Payload {
        self.modified = true;
        &mut self.payload
    }
}
