//! Input sources.
//!
//! A [`Source`] is opened cheaply (only metadata is read) and its body is
//! loaded on first use. Bodies are never modified after loading.

use std::fmt;
use std::hash::Hasher;
use std::io;
use std::path::Path;
use std::sync::OnceLock;

use rustc_hash::FxHasher;
use tracing::trace;

/// Error opening or reading a source.
#[derive(Debug)]
pub enum SourceError {
    /// Underlying I/O failure.
    Io { filename: String, error: io::Error },
    /// The file is larger than positions can address.
    TooLarge { filename: String, len: u64 },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Io { filename, error } => write!(f, "{filename}: {error}"),
            SourceError::TooLarge { filename, len } => write!(
                f,
                "{filename}: file is too large ({len} bytes, max {} bytes)",
                u32::MAX
            ),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Io { error, .. } => Some(error),
            SourceError::TooLarge { .. } => None,
        }
    }
}

/// An input source file or in-memory buffer.
pub struct Source {
    filename: String,
    len: u32,
    body: OnceLock<Box<[u8]>>,
    line_offsets: OnceLock<Vec<u32>>,
    checksum: OnceLock<u64>,
}

impl Source {
    /// Open a file. Only its metadata is read; see [`Source::body`].
    pub fn open_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let filename = path.display().to_string();
        let meta = std::fs::metadata(path).map_err(|error| SourceError::Io {
            filename: filename.clone(),
            error,
        })?;
        let len = u32::try_from(meta.len()).map_err(|_| SourceError::TooLarge {
            filename: filename.clone(),
            len: meta.len(),
        })?;
        trace!(%filename, len, "opened source");
        Ok(Source {
            filename,
            len,
            body: OnceLock::new(),
            line_offsets: OnceLock::new(),
            checksum: OnceLock::new(),
        })
    }

    /// Create a source from bytes already in memory.
    ///
    /// Bodies longer than `u32::MAX` bytes are truncated.
    pub fn open_data(filename: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        let mut body = body.into();
        let len = u32::try_from(body.len()).unwrap_or(u32::MAX);
        body.truncate(len as usize);
        let cell = OnceLock::new();
        let _ = cell.set(body.into_boxed_slice());
        Source {
            filename: filename.into(),
            len,
            body: cell,
            line_offsets: OnceLock::new(),
            checksum: OnceLock::new(),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Body length in bytes, known before the body is loaded.
    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the body has been loaded yet.
    pub fn is_loaded(&self) -> bool {
        self.body.get().is_some()
    }

    /// The body, reading the file on first call.
    pub fn body(&self) -> Result<&[u8], SourceError> {
        if let Some(body) = self.body.get() {
            return Ok(&body[..]);
        }
        let mut bytes = std::fs::read(&self.filename).map_err(|error| SourceError::Io {
            filename: self.filename.clone(),
            error,
        })?;
        // keep the length observed at open time
        bytes.truncate(self.len as usize);
        trace!(filename = %self.filename, len = bytes.len(), "loaded source body");
        // a racing loader may have won; either body is the same file
        let _ = self.body.set(bytes.into_boxed_slice());
        Ok(self.body.get().map_or(&[][..], |b| &b[..]))
    }

    /// 64-bit content fingerprint of the body.
    pub fn checksum(&self) -> Result<u64, SourceError> {
        if let Some(&sum) = self.checksum.get() {
            return Ok(sum);
        }
        let mut hasher = FxHasher::default();
        for chunk in self.body()?.chunks(CHECKSUM_CHUNK) {
            hasher.write(chunk);
        }
        hasher.write_u32(self.len);
        let sum = hasher.finish();
        let _ = self.checksum.set(sum);
        Ok(sum)
    }

    /// Byte offset of the start of each line. `offsets[0]` is always 0.
    pub fn line_offsets(&self) -> Result<&[u32], SourceError> {
        if let Some(offs) = self.line_offsets.get() {
            return Ok(offs.as_slice());
        }
        let body = self.body()?;
        let mut offs = Vec::with_capacity(256);
        offs.push(0);
        for (i, &b) in body.iter().enumerate() {
            if b == b'\n' {
                // body.len() <= u32::MAX
                offs.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        let _ = self.line_offsets.set(offs);
        Ok(self.line_offsets.get().map_or(&[][..], Vec::as_slice))
    }

    /// Contents of 1-based `line`, without its trailing newline.
    ///
    /// Returns `Ok(None)` for line 0 or lines past the end.
    pub fn line_bytes(&self, line: u32) -> Result<Option<&[u8]>, SourceError> {
        if line == 0 {
            return Ok(None);
        }
        let offs = self.line_offsets()?;
        let idx = (line - 1) as usize;
        let Some(&start) = offs.get(idx) else {
            return Ok(None);
        };
        let body = self.body()?;
        let end = match offs.get(idx + 1) {
            Some(&next) => next as usize - 1,
            None => body.len(),
        };
        Ok(body.get(start as usize..end))
    }
}

/// Bytes hashed per step when fingerprinting a body.
const CHECKSUM_CHUNK: usize = 64 * 1024;

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("filename", &self.filename)
            .field("len", &self.len)
            .field("loaded", &self.is_loaded())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
