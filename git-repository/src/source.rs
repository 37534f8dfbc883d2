use std::io;

use crate::Error;

const INITIAL_CAPACITY: usize = 4096;

/// The per-object write buffer: a growable byte sink used both to hold bytes just read from the
/// database and to accumulate bytes being serialized for a write-back.
///
/// Capacity starts at 4096 bytes and doubles whenever an append would equal or exceed it.
/// `written` tracks how many of the allocated bytes are meaningful, the Rust equivalent of the
/// `write_ptr = raw.data + written_bytes` cursor invariant, expressed as a length rather than a
/// raw pointer since there is no pointer arithmetic to preserve here.
pub struct SourceSlot {
    data: Vec<u8>,
    written: usize,
    open: bool,
}

impl SourceSlot {
    /// A freshly opened, empty slot with the initial 4096-byte capacity.
    pub fn new() -> Self {
        SourceSlot { data: vec![0; INITIAL_CAPACITY], written: 0, open: true }
    }

    /// Install `bytes` as the slot's entire content, as happens when a raw object is read from
    /// the database and handed to a parser.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let written = bytes.len();
        SourceSlot { data: bytes, written, open: true }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// The meaningful bytes written so far.
    pub fn bytes(&self) -> &[u8] {
        &self.data[..self.written]
    }

    /// Append `bytes`, growing capacity geometrically if needed. Doubling repeats until the
    /// buffer can hold the new bytes in one step rather than a single retry, since a single
    /// resize may still be insufficient for a very large append.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.reserve(bytes.len())?;
        self.data[self.written..self.written + bytes.len()].copy_from_slice(bytes);
        self.written += bytes.len();
        Ok(())
    }

    /// Grow via `Vec::try_reserve` rather than infallible growth, so an allocation failure
    /// surfaces as [`Error::OutOfMemory`] instead of aborting the process.
    fn reserve(&mut self, additional: usize) -> Result<(), Error> {
        while self.written + additional > self.data.len() {
            let new_capacity = (self.data.len() * 2).max(INITIAL_CAPACITY);
            let grow_by = new_capacity - self.data.len();
            self.data.try_reserve(grow_by).map_err(|_| Error::OutOfMemory)?;
            self.data.resize(new_capacity, 0);
        }
        Ok(())
    }

    /// Discard any buffered bytes and reopen with a fresh, minimum-capacity buffer, as the
    /// write-back pipeline does before invoking a serializer.
    pub fn reset_for_write(&mut self) {
        self.data = vec![0; INITIAL_CAPACITY];
        self.written = 0;
        self.open = true;
    }

    /// Release the buffered bytes and mark the slot closed.
    pub fn close(&mut self) {
        self.data = Vec::new();
        self.written = 0;
        self.open = false;
    }
}

impl Default for SourceSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl io::Write for SourceSlot {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf).map_err(|err| match err {
            Error::OutOfMemory => io::Error::from(io::ErrorKind::OutOfMemory),
            other => io::Error::other(other.to_string()),
        })?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn appends_grow_capacity_geometrically() {
        let mut slot = SourceSlot::new();
        let chunk = vec![7u8; 5000];
        slot.append(&chunk).unwrap();
        assert_eq!(slot.written(), 5000);
        assert_eq!(slot.bytes(), chunk.as_slice());
    }

    #[test]
    fn write_trait_is_equivalent_to_append() {
        let mut slot = SourceSlot::new();
        write!(slot, "blob {}\0", 5).unwrap();
        assert_eq!(slot.bytes(), b"blob 5\0");
    }

    #[test]
    fn reset_for_write_discards_prior_contents() {
        let mut slot = SourceSlot::new();
        slot.append(b"stale").unwrap();
        slot.reset_for_write();
        assert_eq!(slot.written(), 0);
        assert!(slot.is_open());
    }

    #[test]
    fn close_releases_the_buffer() {
        let mut slot = SourceSlot::new();
        slot.append(b"data").unwrap();
        slot.close();
        assert!(!slot.is_open());
        assert_eq!(slot.written(), 0);
    }
}
