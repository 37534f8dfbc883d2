use git_hash::{ObjectId, SIZE_OF_SHA1_DIGEST};

use crate::{source::SourceSlot, Error};

/// One entry of a [`Tree`]: a file mode, an entry name, and the digest of the referenced object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: u32,
    pub name: String,
    pub id: ObjectId,
}

/// A flat list of named entries, each pointing at a blob or another tree by digest.
///
/// Serialized as a concatenation of `"<mode> <name>\0"` followed by the entry's 20 raw digest
/// bytes, repeated for every entry in order: the canonical on-disk tree encoding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tree {
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    pub(crate) fn parse(bytes: &[u8]) -> Result<Self, Error> {
        let mut entries = Vec::new();
        let mut rest = bytes;
        while !rest.is_empty() {
            let space_at = rest.iter().position(|b| *b == b' ').ok_or_else(|| Error::Parse("tree entry is missing a mode separator".into()))?;
            let mode = std::str::from_utf8(&rest[..space_at])
                .ok()
                .and_then(|s| u32::from_str_radix(s, 8).ok())
                .ok_or_else(|| Error::Parse("tree entry mode is not valid octal".into()))?;
            let after_mode = &rest[space_at + 1..];
            let nul_at = after_mode.iter().position(|b| *b == 0).ok_or_else(|| Error::Parse("tree entry is missing a name terminator".into()))?;
            let name = std::str::from_utf8(&after_mode[..nul_at]).map_err(|_| Error::Parse("tree entry name is not valid utf-8".into()))?.to_owned();
            let after_name = &after_mode[nul_at + 1..];
            if after_name.len() < SIZE_OF_SHA1_DIGEST {
                return Err(Error::Parse("tree entry is missing its digest bytes".into()));
            }
            let id = ObjectId::from_bytes(&after_name[..SIZE_OF_SHA1_DIGEST]).map_err(|err| Error::Parse(err.to_string()))?;
            entries.push(TreeEntry { mode, name, id });
            rest = &after_name[SIZE_OF_SHA1_DIGEST..];
        }
        Ok(Tree { entries })
    }

    pub(crate) fn serialize(&self, slot: &mut SourceSlot) -> Result<(), Error> {
        use std::io::Write;
        for entry in &self.entries {
            write!(slot, "{:o} {}\0", entry.mode, entry.name)?;
            slot.append(entry.id.as_bytes())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_handful_of_entries() {
        let tree = Tree {
            entries: vec![
                TreeEntry { mode: 0o100644, name: "a.txt".into(), id: ObjectId::null() },
                TreeEntry { mode: 0o040000, name: "subdir".into(), id: ObjectId::from_bytes(&[1; 20]).unwrap() },
            ],
        };
        let mut slot = SourceSlot::new();
        tree.serialize(&mut slot).unwrap();
        assert_eq!(Tree::parse(slot.bytes()).unwrap(), tree);
    }

    #[test]
    fn truncated_entry_is_a_parse_error() {
        assert!(Tree::parse(b"100644 a.txt\0").is_err());
    }
}
