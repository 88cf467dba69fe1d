//! Content-addressed image files.
//!
//! Images are identified by the SHA-256 of their bytes. The store keeps a
//! symlink named `<hex digest>_<file name>` in the database's image
//! directory pointing at the original file; the database row records the
//! link path so every distinct content is tracked exactly once.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::StoreError;

const CHUNK_SIZE: usize = 64 * 1024; // 64 KB

/// SHA-256 of a file as lowercase hex, read in 64 KiB chunks.
pub fn hash_file(path: &Path) -> Result<String, StoreError> {
    let read_err = |source| StoreError::ImageRead {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = File::open(path).map_err(read_err)?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK_SIZE];

    loop {
        let n = reader.read(&mut buf).map_err(read_err)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// MIME type and content encoding guessed from a file name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeGuess {
    pub mimetype: Option<&'static str>,
    pub encoding: Option<&'static str>,
}

fn encoding_for(ext: &str) -> Option<&'static str> {
    match ext {
        "gz" => Some("gzip"),
        "bz2" => Some("bzip2"),
        "xz" => Some("xz"),
        "br" => Some("br"),
        "Z" => Some("compress"),
        _ => None,
    }
}

fn mimetype_for(ext: &str) -> Option<&'static str> {
    let mime = match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" | "jpe" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        "ico" => "image/vnd.microsoft.icon",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "avif" => "image/avif",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => return None,
    };
    Some(mime)
}

/// Guess the type of a file from its name.
///
/// A trailing compression suffix is reported as the encoding and the
/// extension before it picks the MIME type (`scan.png.gz` → `image/png`,
/// `gzip`).
pub fn guess_type(path: &Path) -> TypeGuess {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return TypeGuess::default();
    };
    let mut stem = name;
    let mut encoding = None;
    if let Some((rest, ext)) = name.rsplit_once('.') {
        if let Some(enc) = encoding_for(ext) {
            encoding = Some(enc);
            stem = rest;
        }
    }
    let mimetype = stem.rsplit_once('.').and_then(|(_, ext)| mimetype_for(ext));
    TypeGuess { mimetype, encoding }
}

/// A source file that has been read and digested but not yet placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedImage {
    pub source: PathBuf,
    pub hash: String,
}

/// The per-database image directory.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the image directory if needed.
    pub fn ensure_dir(&self) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Resolve and digest a source file.
    pub fn hash_source(&self, source: &Path) -> Result<HashedImage, StoreError> {
        let source = std::path::absolute(source).map_err(|e| StoreError::ImageRead {
            path: source.to_path_buf(),
            source: e,
        })?;
        let hash = hash_file(&source)?;
        Ok(HashedImage { source, hash })
    }

    /// Path of the link for an image inside the store.
    pub fn link_path(&self, image: &HashedImage) -> PathBuf {
        let name = image
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.dir.join(format!("{}_{}", image.hash, name))
    }

    /// Link the source file into the store and return the link path.
    ///
    /// A link that already exists under the same name is reused.
    pub fn place(&self, image: &HashedImage) -> Result<PathBuf, StoreError> {
        let link = self.link_path(image);
        if link.symlink_metadata().is_ok() {
            log::debug!("Reusing image link {}", link.display());
            return Ok(link);
        }
        self.ensure_dir()?;
        make_link(&image.source, &link).map_err(|source| StoreError::ImagePlacement {
            link: link.clone(),
            target: image.source.clone(),
            source,
        })?;
        log::debug!("Linked {} -> {}", link.display(), image.source.display());
        Ok(link)
    }
}

#[cfg(unix)]
fn make_link(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(not(unix))]
fn make_link(target: &Path, link: &Path) -> std::io::Result<()> {
    std::fs::copy(target, link).map(|_| ())
}
