//! Marker header parser - RAR signature.
//!
//! The marker is the first bytes of a RAR container.
//! RAR 1.5-4.x: 0x52 0x61 0x72 0x21 0x1A 0x07 0x00
//! RAR 5.0+:    0x52 0x61 0x72 0x21 0x1A 0x07 0x01 0x00
//! RAR 1.4:     0x52 0x45 0x7E 0x5E ("RE~^")

use crate::error::{Result, VfsError};

/// RAR 1.5-4.x magic signature.
pub const RAR4_SIGNATURE: [u8; 7] = [0x52, 0x61, 0x72, 0x21, 0x1A, 0x07, 0x00];

/// RAR5 magic signature.
pub const RAR5_SIGNATURE: [u8; 8] = [0x52, 0x61, 0x72, 0x21, 0x1A, 0x07, 0x01, 0x00];

/// Ancient RAR 1.4 signature.
pub const OLD_SIGNATURE: [u8; 4] = [0x52, 0x45, 0x7E, 0x5E];

/// Container format distinguished by the marker.
///
/// The format matters past the signature: old-format archives seed the
/// unpacked-data checksum with 0 instead of 0xFFFF_FFFF, and their
/// pre-1.5 header layout is not parsed by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// RAR 1.4 old-style container.
    Old14,
    /// RAR 1.5 through 4.x.
    Standard,
}

#[derive(Debug, Clone)]
pub struct MarkerHeader {
    pub format: ArchiveFormat,
    /// Bytes the marker occupies; the main header starts here.
    pub size: u64,
}

pub struct MarkerHeaderParser;

impl MarkerHeaderParser {
    /// Bytes needed to classify any of the known signatures.
    pub const READ_SIZE: usize = 8;

    pub fn parse(buffer: &[u8]) -> Result<MarkerHeader> {
        if buffer.len() >= 8 && buffer[..8] == RAR5_SIGNATURE {
            // RAR5 container; this reader handles the 1.5-4.x format only.
            return Err(VfsError::InvalidSignature);
        }
        if buffer.len() >= 7 && buffer[..7] == RAR4_SIGNATURE {
            return Ok(MarkerHeader {
                format: ArchiveFormat::Standard,
                size: RAR4_SIGNATURE.len() as u64,
            });
        }
        if buffer.len() >= 4 && buffer[..4] == OLD_SIGNATURE {
            return Ok(MarkerHeader {
                format: ArchiveFormat::Old14,
                size: OLD_SIGNATURE.len() as u64,
            });
        }
        Err(VfsError::InvalidSignature)
    }
}
