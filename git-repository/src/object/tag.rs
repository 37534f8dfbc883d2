use git_hash::ObjectId;
use git_odb::Kind;

use crate::{source::SourceSlot, Error};

/// An annotated tag: a pointer to another object of a declared type, a tag name, a tagger line,
/// and a free-text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub target: ObjectId,
    pub target_kind: Kind,
    pub name: String,
    pub tagger: String,
    pub message: String,
}

impl Tag {
    pub(crate) fn parse(bytes: &[u8]) -> Result<Self, Error> {
        let text = std::str::from_utf8(bytes).map_err(|_| Error::Parse("tag is not valid utf-8".into()))?;
        let (header, message) = text.split_once("\n\n").ok_or_else(|| Error::Parse("tag is missing the header/message separator".into()))?;

        let mut target = None;
        let mut target_kind = None;
        let mut name = None;
        let mut tagger = None;
        for line in header.lines() {
            if let Some(rest) = line.strip_prefix("object ") {
                target = Some(ObjectId::from_hex(rest.as_bytes()).map_err(|err| Error::Parse(err.to_string()))?);
            } else if let Some(rest) = line.strip_prefix("type ") {
                target_kind = Some(Kind::from_name(rest.as_bytes()).ok_or_else(|| Error::Parse(format!("unrecognized tag target type: {rest:?}")))?);
            } else if let Some(rest) = line.strip_prefix("tag ") {
                name = Some(rest.to_owned());
            } else if let Some(rest) = line.strip_prefix("tagger ") {
                tagger = Some(rest.to_owned());
            } else {
                return Err(Error::Parse(format!("unrecognized tag header line: {line:?}")));
            }
        }

        Ok(Tag {
            target: target.ok_or_else(|| Error::Parse("tag is missing an object line".into()))?,
            target_kind: target_kind.ok_or_else(|| Error::Parse("tag is missing a type line".into()))?,
            name: name.ok_or_else(|| Error::Parse("tag is missing a tag line".into()))?,
            tagger: tagger.ok_or_else(|| Error::Parse("tag is missing a tagger line".into()))?,
            message: message.to_owned(),
        })
    }

    pub(crate) fn serialize(&self, slot: &mut SourceSlot) -> Result<(), Error> {
        use std::io::Write;
        write!(
            slot,
            "object {}\ntype {}\ntag {}\ntagger {}\n\n{}",
            self.target.to_hex(),
            self.target_kind.name(),
            self.name,
            self.tagger,
            self.message
        )?;
        Ok(())
    }
}
