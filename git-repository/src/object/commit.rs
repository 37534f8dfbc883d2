use git_hash::ObjectId;

use crate::{source::SourceSlot, Error};

/// A commit: a pointer to a tree, zero or more parents, authorship lines, and a free-text
/// message.
///
/// Serialized as one `tree <hex>` line, one `parent <hex>` line per parent in order, an `author`
/// line, a `committer` line, a blank line, then the message verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Commit {
    pub tree: ObjectId,
    pub parents: Vec<ObjectId>,
    pub author: String,
    pub committer: String,
    pub message: String,
}

impl Commit {
    pub(crate) fn parse(bytes: &[u8]) -> Result<Self, Error> {
        let text = std::str::from_utf8(bytes).map_err(|_| Error::Parse("commit is not valid utf-8".into()))?;
        let (header, message) = text.split_once("\n\n").ok_or_else(|| Error::Parse("commit is missing the header/message separator".into()))?;

        let mut tree = None;
        let mut parents = Vec::new();
        let mut author = None;
        let mut committer = None;
        for line in header.lines() {
            if let Some(rest) = line.strip_prefix("tree ") {
                tree = Some(parse_hex(rest)?);
            } else if let Some(rest) = line.strip_prefix("parent ") {
                parents.push(parse_hex(rest)?);
            } else if let Some(rest) = line.strip_prefix("author ") {
                author = Some(rest.to_owned());
            } else if let Some(rest) = line.strip_prefix("committer ") {
                committer = Some(rest.to_owned());
            } else {
                return Err(Error::Parse(format!("unrecognized commit header line: {line:?}")));
            }
        }

        Ok(Commit {
            tree: tree.ok_or_else(|| Error::Parse("commit is missing a tree line".into()))?,
            parents,
            author: author.ok_or_else(|| Error::Parse("commit is missing an author line".into()))?,
            committer: committer.ok_or_else(|| Error::Parse("commit is missing a committer line".into()))?,
            message: message.to_owned(),
        })
    }

    pub(crate) fn serialize(&self, slot: &mut SourceSlot) -> Result<(), Error> {
        use std::io::Write;
        write!(slot, "tree {}\n", self.tree.to_hex())?;
        for parent in &self.parents {
            write!(slot, "parent {}\n", parent.to_hex())?;
        }
        write!(slot, "author {}\ncommitter {}\n\n{}", self.author, self.committer, self.message)?;
        Ok(())
    }
}

fn parse_hex(text: &str) -> Result<ObjectId, Error> {
    ObjectId::from_hex(text.as_bytes()).map_err(|err| Error::Parse(err.to_string()))
}
