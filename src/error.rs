//! Error types for archive access and entry extraction.
//!
//! Everything in this crate reports failure through [`VfsError`]. The
//! host-facing surface in [`crate::RarVfs`] never exposes these values:
//! per the VFS contract every failure collapses to an absent result
//! (`None`) there, and the detail is only logged. The structured variants
//! exist for implementers and tests.

use std::fmt;
use std::io;

/// Error type for RAR VFS operations.
#[derive(Debug)]
pub enum VfsError {
    /// The path is not of the form `rar://archive_path:entry_path`.
    ///
    /// Either the scheme prefix did not match (case-insensitively) or the
    /// colon separating archive path from entry path is missing.
    PathSyntax,

    /// The file does not carry a recognized RAR signature.
    ///
    /// Raised for arbitrary non-archive files and for RAR5 containers
    /// (`Rar!\x1a\x07\x01\x00`), which this reader does not handle.
    InvalidSignature,

    /// A header block is malformed or truncated.
    InvalidHeader,

    /// A parser was handed fewer bytes than the structure requires.
    BufferTooSmall {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        have: usize,
    },

    /// The header walk ended without a matching entry name.
    EntryNotFound,

    /// The entry uses a compression method the configured engine cannot
    /// decode. The `u8` value is the method byte (`0x30` = store,
    /// `0x31`-`0x35` = the general compressor's levels).
    MethodNotSupported(u8),

    /// An I/O error from the underlying container file.
    Io(io::Error),
}

impl fmt::Display for VfsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathSyntax => write!(f, "Path is not a rar:// composite path"),
            Self::InvalidSignature => write!(f, "Invalid RAR signature"),
            Self::InvalidHeader => write!(f, "Invalid or malformed header"),
            Self::BufferTooSmall { needed, have } => {
                write!(f, "Buffer too small: need {} bytes, have {}", needed, have)
            }
            Self::EntryNotFound => write!(f, "Entry not found in archive"),
            Self::MethodNotSupported(m) => {
                write!(f, "Compression method not supported (method: 0x{:02x})", m)
            }
            Self::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for VfsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for VfsError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, VfsError>;
