use git_hash::ObjectId;

use crate::Error;

/// The type tag carried by a raw object, mirroring the on-disk type numbering.
///
/// `Ext1`, `Ext2` and `Bad` are reserved/sentinel values that never legitimately appear as the
/// type of bytes read from a backend; they exist so the numeric type space is total and callers
/// parsing an on-disk type byte always have somewhere to map an unexpected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Ext1,
    Commit,
    Tree,
    Blob,
    Tag,
    Ext2,
    OfsDelta,
    RefDelta,
    Bad,
}

impl Kind {
    /// The lowercase type name used in the hashing header, per the type-name table. Reserved and
    /// bad kinds have no name.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Commit => "commit",
            Kind::Tree => "tree",
            Kind::Blob => "blob",
            Kind::Tag => "tag",
            Kind::OfsDelta => "OFS_DELTA",
            Kind::RefDelta => "REF_DELTA",
            Kind::Ext1 | Kind::Ext2 | Kind::Bad => "",
        }
    }

    /// True for the four kinds that may be hashed and stored as standalone loose objects.
    pub fn is_loose_representable(&self) -> bool {
        matches!(self, Kind::Commit | Kind::Tree | Kind::Blob | Kind::Tag)
    }

    /// Parse a type name as it appears in a loose object header, e.g. `b"blob"`.
    pub fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"commit" => Some(Kind::Commit),
            b"tree" => Some(Kind::Tree),
            b"blob" => Some(Kind::Blob),
            b"tag" => Some(Kind::Tag),
            _ => None,
        }
    }
}

/// The bytes of an object together with enough metadata to hash or store it, exactly as it
/// would be read from or written to a backend.
///
/// `length` and `data` are deliberately independent fields rather than deriving the length from
/// `data`: a backend or caller can construct a `RawObject` with a declared nonzero `length` but
/// no `data`, which [`RawObject::hash`] rejects. The only state considered well-formed is
/// `length == 0` iff `data.is_none()`.
#[derive(Debug, Clone)]
pub struct RawObject {
    pub kind: Kind,
    pub length: usize,
    pub data: Option<Vec<u8>>,
}

impl RawObject {
    /// Construct a raw object from an owned payload, deriving `length` from it.
    pub fn from_bytes(kind: Kind, data: Vec<u8>) -> Self {
        RawObject { kind, length: data.len(), data: Some(data) }
    }

    /// True if this object carries no payload bytes.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Format the canonical pre-image header for this object: the lowercase type name, one
    /// space, the decimal length, and a trailing NUL.
    pub fn header(&self) -> Result<Vec<u8>, Error> {
        if !self.kind.is_loose_representable() {
            return Err(Error::InvalidType);
        }
        Ok(format!("{} {}\0", self.kind.name(), self.length).into_bytes())
    }

    /// Hash this object's canonical pre-image (header followed by payload), producing its digest.
    ///
    /// Fails with [`Error::InvalidType`] if `kind` isn't loose-representable, and with
    /// [`Error::MissingPayload`] if `length` is nonzero but no payload was provided.
    pub fn hash(&self) -> Result<ObjectId, Error> {
        let header = self.header()?;
        match &self.data {
            Some(bytes) => Ok(git_hash::hash_buffers(&[&header, bytes])),
            None if self.length == 0 => Ok(git_hash::hash_buffers(&[&header])),
            None => Err(Error::MissingPayload { length: self.length as u64 }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_format_matches_contract() {
        let obj = RawObject::from_bytes(Kind::Blob, b"hello".to_vec());
        assert_eq!(obj.header().unwrap(), b"blob 5\0");
    }

    #[test]
    fn hash_matches_known_digest() {
        let obj = RawObject::from_bytes(Kind::Blob, b"hello".to_vec());
        assert_eq!(obj.hash().unwrap().to_hex(), "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0");
    }

    #[test]
    fn zero_length_with_no_data_is_fine() {
        let obj = RawObject { kind: Kind::Blob, length: 0, data: None };
        assert!(obj.hash().is_ok());
    }

    #[test]
    fn nonzero_length_with_no_data_is_an_error() {
        let obj = RawObject { kind: Kind::Blob, length: 5, data: None };
        assert!(matches!(obj.hash(), Err(Error::MissingPayload { length: 5 })));
    }

    #[test]
    fn non_loose_kind_cannot_be_hashed() {
        let obj = RawObject::from_bytes(Kind::OfsDelta, vec![1, 2, 3]);
        assert!(matches!(obj.hash(), Err(Error::InvalidType)));
    }
}
