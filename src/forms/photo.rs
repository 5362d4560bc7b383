//! Comment photo handling
//!
//! A photo is accepted when its size is at or below the configured ceiling
//! (5 MiB by default) and is then encoded to a `data:` URI. Encoding may read
//! the file from disk, so it runs off the caller's thread. The ceiling is
//! checked again against the bytes actually read, since a file on disk can
//! change between picking and reading.

use crate::error::{FolioError, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::ImageFormat;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Fallback MIME type for files that are not a recognised image
const OCTET_STREAM: &str = "application/octet-stream";

/// Photo encoded as a `data:<mime>;base64,<payload>` URI
///
/// Cheap to clone; snapshots and comments share the encoded payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Photo(Arc<str>);

impl Photo {
    /// The full data URI
    pub fn data_uri(&self) -> &str {
        &self.0
    }

    /// MIME type declared in the URI
    pub fn mime_type(&self) -> &str {
        self.0
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .unwrap_or(OCTET_STREAM)
    }
}

/// Where the bytes of a picked file come from
#[derive(Debug, Clone)]
enum Source {
    Bytes(Vec<u8>),
    Path(PathBuf),
}

/// A file chosen in the photo picker
#[derive(Debug, Clone)]
pub struct PhotoFile {
    name: String,
    size: u64,
    source: Source,
}

impl PhotoFile {
    /// Wrap in-memory bytes
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            source: Source::Bytes(bytes),
        }
    }

    /// Reference a file on disk; only its metadata is read here
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let size = std::fs::metadata(&path)?.len();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            name,
            size,
            source: Source::Path(path),
        })
    }

    /// File name as reported by the picker
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Reject files larger than `limit` bytes; `limit` itself is accepted
pub fn check_size(file: &PhotoFile, limit: u64) -> Result<()> {
    within_limit(file.size, limit)
}

fn within_limit(size: u64, limit: u64) -> Result<()> {
    if size > limit {
        return Err(FolioError::PhotoTooLarge { size, limit });
    }
    Ok(())
}

/// Read at most `limit + 1` bytes of the file and encode them as a data URI
///
/// Fails with `PhotoTooLarge` if more than `limit` bytes are available.
pub fn encode_data_uri(file: &PhotoFile, limit: u64) -> Result<Photo> {
    let bytes = match &file.source {
        Source::Bytes(bytes) => {
            within_limit(bytes.len() as u64, limit)?;
            bytes.clone()
        }
        Source::Path(path) => read_capped(path, limit)?,
    };

    let mime = sniff_mime(&bytes, Path::new(&file.name));
    debug!(
        "Encoding photo {} ({} bytes) as {}",
        file.name,
        bytes.len(),
        mime
    );
    let uri = format!("data:{mime};base64,{}", STANDARD.encode(&bytes));
    Ok(Photo(Arc::from(uri)))
}

/// Read `path` without ever buffering more than `limit + 1` bytes
fn read_capped(path: &Path, limit: u64) -> Result<Vec<u8>> {
    let handle = File::open(path).map_err(|e| FolioError::PhotoDecodeFailed(Box::new(e)))?;
    let mut bytes = Vec::new();
    handle
        .take(limit.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|e| FolioError::PhotoDecodeFailed(Box::new(e)))?;

    // Size reported is a lower bound once the cap is hit
    if let Err(e) = within_limit(bytes.len() as u64, limit) {
        warn!("{} grew past the limit after it was picked", path.display());
        return Err(e);
    }
    Ok(bytes)
}

/// MIME type from magic bytes, then the extension, then octet-stream
fn sniff_mime(bytes: &[u8], name: &Path) -> &'static str {
    image::guess_format(bytes)
        .or_else(|_| ImageFormat::from_path(name))
        .map_or(OCTET_STREAM, |format| format.to_mime_type())
}
