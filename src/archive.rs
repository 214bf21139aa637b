//! Archive reader - sequential walk over a RAR container's header stream.
//!
//! An [`Archive`] owns the opened container file and a read position.
//! [`Archive::next_header`] yields header records strictly in on-disk
//! order; advancing past an entry's payload is explicit via
//! [`Archive::skip_to_next`], so a directory scan never touches payload
//! bytes. Handles are never shared: every resolution and every directory
//! scan opens its own.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{Result, VfsError};
use crate::parsing::file_header::{EntryHeader, EntryHeaderParser, ENTRY_HEADER_TYPE};
use crate::parsing::{ArchiveFormat, MainHeaderParser, MarkerHeaderParser};

/// End-of-archive block type.
const END_HEADER_TYPE: u8 = 0x7B;
/// Blocks with this flag carry a data area whose 32-bit size follows the
/// block prefix.
const LONG_BLOCK_FLAG: u16 = 0x8000;
/// Generic block prefix: crc(2) + type(1) + flags(2) + head_size(2).
const BLOCK_PREFIX_SIZE: u64 = 7;

/// One entry's parsed header plus its position within the container.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub entry: EntryHeader,
    /// First byte of the packed payload.
    pub data_offset: u64,
    /// First byte of the following header block.
    pub next_offset: u64,
}

/// One record of the header stream.
///
/// End-of-archive is reported as the end of iteration, not as a record.
/// `Other` covers every block kind the walk does not interpret (comment,
/// recovery, service blocks); its only use is skipping.
#[derive(Debug, Clone)]
pub enum HeaderRecord {
    /// A file or directory entry.
    File(FileRecord),
    /// Any other block kind.
    Other { next_offset: u64 },
}

impl HeaderRecord {
    /// Offset of the following header block, authoritative for skipping
    /// whether or not the current block's payload was consumed.
    pub fn next_offset(&self) -> u64 {
        match self {
            Self::File(file) => file.next_offset,
            Self::Other { next_offset } => *next_offset,
        }
    }
}

/// An opened RAR container.
pub struct Archive {
    file: File,
    length: u64,
    position: u64,
    format: ArchiveFormat,
    solid: bool,
}

impl Archive {
    /// Open a container and validate its signature.
    ///
    /// Fails with [`VfsError::Io`] when the path cannot be read and with
    /// [`VfsError::InvalidSignature`] when it can but is not a RAR
    /// archive. For standard archives the main header is consumed here;
    /// the position afterwards is the first entry block.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let length = file.metadata()?.len();

        let mut marker_buf = [0u8; MarkerHeaderParser::READ_SIZE];
        let got = read_up_to(&mut file, &mut marker_buf)?;
        let marker = MarkerHeaderParser::parse(&marker_buf[..got])?;

        let mut archive = Self {
            file,
            length,
            position: marker.size,
            format: marker.format,
            solid: false,
        };

        if marker.format == ArchiveFormat::Standard {
            let start = archive.position;
            let mut head_buf = [0u8; MainHeaderParser::HEADER_SIZE];
            archive.read_exact_at(start, &mut head_buf)?;
            let main = MainHeaderParser::parse(&head_buf)?;
            if (main.head_size as usize) < MainHeaderParser::HEADER_SIZE {
                return Err(VfsError::InvalidHeader);
            }
            archive.solid = main.is_solid;
            archive.position = start + main.head_size as u64;
        }

        Ok(archive)
    }

    /// Read the next header record in on-disk order.
    ///
    /// `Ok(None)` signals the end of the stream: an end-of-archive block
    /// or a clean end of file. After a `File` record the position is at
    /// the payload start; the payload itself is not consumed.
    pub fn next_header(&mut self) -> Result<Option<HeaderRecord>> {
        let block_start = self.position;
        if block_start
            .checked_add(BLOCK_PREFIX_SIZE)
            .map_or(true, |end| end > self.length)
        {
            return Ok(None);
        }

        let mut prefix = [0u8; BLOCK_PREFIX_SIZE as usize];
        self.read_exact_at(block_start, &mut prefix)?;
        let header_type = prefix[2];
        let flags = u16::from_le_bytes([prefix[3], prefix[4]]);
        let head_size = u16::from_le_bytes([prefix[5], prefix[6]]) as u64;

        if header_type == END_HEADER_TYPE {
            return Ok(None);
        }
        if head_size < BLOCK_PREFIX_SIZE {
            return Err(VfsError::InvalidHeader);
        }

        if header_type == ENTRY_HEADER_TYPE {
            let available = self.length - block_start;
            let mut header_buf = vec![0u8; head_size.min(available) as usize];
            self.read_exact_at(block_start, &mut header_buf)?;
            let entry = EntryHeaderParser::parse(&header_buf)?;

            let data_offset = block_start
                .checked_add(head_size)
                .ok_or(VfsError::InvalidHeader)?;
            let next_offset = data_offset
                .checked_add(entry.packed_size)
                .ok_or(VfsError::InvalidHeader)?;

            self.position = data_offset;
            return Ok(Some(HeaderRecord::File(FileRecord {
                entry,
                data_offset,
                next_offset,
            })));
        }

        // Uninterpreted block kind. Its data area size, if any, is the
        // 32-bit ADD_SIZE field right after the prefix.
        let mut next_offset = block_start
            .checked_add(head_size)
            .ok_or(VfsError::InvalidHeader)?;
        if flags & LONG_BLOCK_FLAG != 0 {
            let mut add = [0u8; 4];
            self.read_exact_at(block_start + BLOCK_PREFIX_SIZE, &mut add)?;
            next_offset = next_offset
                .checked_add(u32::from_le_bytes(add) as u64)
                .ok_or(VfsError::InvalidHeader)?;
        }

        self.position = block_start + head_size;
        Ok(Some(HeaderRecord::Other { next_offset }))
    }

    /// Advance the read position to the record's next-header offset,
    /// discarding the current block's payload.
    pub fn skip_to_next(&mut self, record: &HeaderRecord) -> Result<()> {
        self.seek_to(record.next_offset())
    }

    /// Position the read cursor at the start of the entry's packed
    /// payload, ready for extraction.
    pub fn seek_to_payload(&mut self, record: &FileRecord) -> Result<()> {
        self.seek_to(record.next_offset - record.entry.packed_size)
    }

    /// Read from the current position, advancing it. A short count only
    /// means the read straddled a buffer boundary; zero means end of file.
    pub(crate) fn read_source(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.file.seek(SeekFrom::Start(self.position))?;
        let got = self.file.read(buf)?;
        self.position += got as u64;
        Ok(got)
    }

    /// Whether the container uses the ancient RAR 1.4 layout.
    pub fn is_old_format(&self) -> bool {
        self.format == ArchiveFormat::Old14
    }

    /// Solid flag from the main archive header.
    pub fn is_solid(&self) -> bool {
        self.solid
    }

    /// Total container length in bytes.
    pub fn length(&self) -> u64 {
        self.length
    }

    fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.file.seek(SeekFrom::Start(offset))?;
        self.position = offset;
        Ok(())
    }

    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<()> {
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.read_exact(buf)?;
        Ok(())
    }
}

/// Read until `buf` is full or the source ends; returns the byte count.
fn read_up_to(file: &mut File, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match file.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
