use crate::{source::SourceSlot, Error};

/// An opaque byte payload with no internal structure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Blob {
    pub data: Vec<u8>,
}

impl Blob {
    pub(crate) fn parse(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Blob { data: bytes.to_vec() })
    }

    pub(crate) fn serialize(&self, slot: &mut SourceSlot) -> Result<(), Error> {
        slot.append(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_arbitrary_bytes() {
        let blob = Blob { data: b"hello".to_vec() };
        let mut slot = SourceSlot::new();
        blob.serialize(&mut slot).unwrap();
        assert_eq!(Blob::parse(slot.bytes()).unwrap(), blob);
    }
}
