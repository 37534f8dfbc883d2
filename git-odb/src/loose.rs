use std::{
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};
use git_hash::ObjectId;

use crate::{backend::BindingCell, Backend, Error, Kind, RawObject};

/// The default priority given to the loose-object backend by [`crate::open`]: high enough that
/// loose objects (typically the most recently written, hence most likely to be requested again)
/// are probed before a packed backend.
pub const DEFAULT_PRIORITY: i32 = 100;

/// A backend storing each object as its own zlib-deflated file, named by the digest-path format
/// (`<objects>/aa/bbbb…`).
pub struct LooseBackend {
    objects_dir: PathBuf,
    priority: i32,
    binding: BindingCell,
}

impl LooseBackend {
    /// Open a loose-object backend rooted at `objects_dir`. Never fails: a missing directory
    /// simply means every subsequent read declines. The directory is created lazily on first
    /// successful write.
    pub fn at(objects_dir: impl Into<PathBuf>) -> Self {
        LooseBackend { objects_dir: objects_dir.into(), priority: DEFAULT_PRIORITY, binding: BindingCell::default() }
    }

    /// Override the default priority given to this backend when it is added to an [`Odb`][crate::Odb].
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    fn path_for(&self, id: &ObjectId) -> PathBuf {
        let (dir, file) = id.to_path_components();
        self.objects_dir.join(dir).join(file)
    }

    fn read_compressed(path: &Path) -> Result<Option<Vec<u8>>, Error> {
        match fs::File::open(path) {
            Ok(file) => {
                let mut decoder = ZlibDecoder::new(file);
                let mut out = Vec::new();
                decoder.read_to_end(&mut out)?;
                Ok(Some(out))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

impl Backend for LooseBackend {
    fn name(&self) -> &str {
        "loose"
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn read(&self, id: &ObjectId) -> Result<Option<RawObject>, Error> {
        let path = self.path_for(id);
        let decoded = match Self::read_compressed(&path)? {
            Some(bytes) => bytes,
            None => return Ok(None),
        };
        let nul_at = decoded.iter().position(|b| *b == 0).ok_or_else(|| Error::Other("loose object has no header terminator".into()))?;
        let (header, payload) = decoded.split_at(nul_at);
        let payload = &payload[1..];
        let mut parts = header.splitn(2, |b| *b == b' ');
        let type_name = parts.next().unwrap_or_default();
        let length: usize = parts
            .next()
            .and_then(|s| std::str::from_utf8(s).ok())
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| Error::Other("loose object header has an invalid length".into()))?;
        let kind = Kind::from_name(type_name).ok_or(Error::InvalidType)?;
        if payload.len() != length {
            return Err(Error::InflatedLengthMismatch { expected: length as u64, actual: payload.len() as u64 });
        }
        Ok(Some(RawObject { kind, length, data: Some(payload.to_vec()) }))
    }

    fn exists(&self, id: &ObjectId) -> Result<bool, Error> {
        Ok(self.path_for(id).is_file())
    }

    fn write(&self, object: &RawObject) -> Result<ObjectId, Error> {
        let id = object.hash()?;
        let path = self.path_for(&id);
        if path.is_file() {
            // Same digest implies same canonical bytes; no need to write again.
            return Ok(id);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let header = object.header()?;
        let mut encoder = ZlibEncoder::new(fs::File::create(&path)?, Compression::default());
        encoder.write_all(&header)?;
        if let Some(data) = &object.data {
            encoder.write_all(data)?;
        }
        encoder.finish()?;
        Ok(id)
    }

    fn supports_write(&self) -> bool {
        true
    }

    fn bound_odb(&self) -> Option<u64> {
        self.binding.get()
    }

    fn bind(&self, odb_id: u64) {
        self.binding.set(odb_id);
    }
}

// `read_header` is deliberately not implemented here: this backend always declines header-only
// reads, so the `Odb` exercises its read-and-discard fallback.
