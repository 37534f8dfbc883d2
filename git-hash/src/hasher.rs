use sha1::{Digest, Sha1};

use crate::ObjectId;

/// A thin wrapper around the actual SHA-1 implementation, kept separate so the rest of the
/// workspace never imports the `sha1` crate directly. Only this module knows which digest
/// primitive is configured.
#[derive(Default)]
pub struct Hasher(Sha1);

impl Hasher {
    /// Create a new, empty hasher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed `data` into the running digest. May be called multiple times; the final digest
    /// depends on the concatenation of all fed buffers, in order.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.0.update(data);
        self
    }

    /// Consume the hasher and produce the final 20-byte digest.
    pub fn finish(self) -> ObjectId {
        let bytes = self.0.finalize();
        ObjectId::from_bytes(&bytes).expect("sha1 crate always produces 20 bytes")
    }
}

/// Hash the concatenation of `header` and `payload` in order, as used to derive an object's
/// content-addressed digest from its canonical pre-image.
pub fn hash_buffers(buffers: &[&[u8]]) -> ObjectId {
    let mut hasher = Hasher::new();
    for buf in buffers {
        hasher.update(buf);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_blob_digest() {
        let id = hash_buffers(&[b"blob 5\0", b"hello"]);
        assert_eq!(id.to_hex(), "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0");
    }
}
