//! Main archive header parser.
//!
//! The main header (type 0x73) follows the marker and carries
//! archive-level flags; the solid flag feeds the extraction context.

use crate::error::{Result, VfsError};

/// Main archive header type constant.
pub const MAIN_HEADER_TYPE: u8 = 0x73;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainHeader {
    pub crc: u16,
    pub flags: u16,
    pub head_size: u16,
    // Parsed flags
    pub is_volume: bool,
    pub has_comment: bool,
    pub is_locked: bool,
    pub is_solid: bool,
    pub is_new_numbering: bool,
    pub has_recovery: bool,
    pub is_encrypted: bool,
    pub is_first_volume: bool,
}

pub struct MainHeaderParser;

impl MainHeaderParser {
    pub const HEADER_SIZE: usize = 13;

    pub fn parse(buffer: &[u8]) -> Result<MainHeader> {
        if buffer.len() < Self::HEADER_SIZE {
            return Err(VfsError::BufferTooSmall {
                needed: Self::HEADER_SIZE,
                have: buffer.len(),
            });
        }

        let crc = u16::from_le_bytes([buffer[0], buffer[1]]);
        let header_type = buffer[2];
        let flags = u16::from_le_bytes([buffer[3], buffer[4]]);
        let head_size = u16::from_le_bytes([buffer[5], buffer[6]]);
        // bytes 7..13: reserved1 (u16) + reserved2 (u32), unused

        if header_type != MAIN_HEADER_TYPE {
            return Err(VfsError::InvalidHeader);
        }

        Ok(MainHeader {
            crc,
            flags,
            head_size,
            is_volume: (flags & 0x0001) != 0,
            has_comment: (flags & 0x0002) != 0,
            is_locked: (flags & 0x0004) != 0,
            is_solid: (flags & 0x0008) != 0,
            is_new_numbering: (flags & 0x0010) != 0,
            has_recovery: (flags & 0x0040) != 0,
            is_encrypted: (flags & 0x0080) != 0,
            is_first_volume: (flags & 0x0100) != 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_main_header() {
        let buffer = [
            0x00, 0x00, // crc
            0x73, // type
            0x08, 0x00, // flags (solid)
            0x0D, 0x00, // head_size = 13
            0x00, 0x00, // reserved1
            0x00, 0x00, 0x00, 0x00, // reserved2
        ];
        let header = MainHeaderParser::parse(&buffer).unwrap();
        assert_eq!(header.head_size, 13);
        assert!(header.is_solid);
        assert!(!header.is_volume);
    }

    #[test]
    fn test_wrong_type_rejected() {
        let mut buffer = [0u8; 13];
        buffer[2] = 0x74;
        assert!(matches!(
            MainHeaderParser::parse(&buffer),
            Err(VfsError::InvalidHeader)
        ));
    }
}
