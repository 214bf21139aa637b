//! Extraction context and the decompression capability boundary.
//!
//! The general-purpose decompressor is an external collaborator: this
//! crate drives it through the [`Unpacker`] trait and owns only the
//! plumbing around it - the bounded source window over the archive, the
//! destination buffer sized to the entry's full uncompressed size, and
//! the running checksums. Stored entries never reach the engine; the
//! [`unstore`] loop copies them verbatim.

use crate::archive::{Archive, FileRecord};
use crate::crc32::crc32_update;
use crate::error::{Result, VfsError};

/// Chunk size for the stored-copy loop.
const UNSTORE_CHUNK: usize = 0x10000;

/// Per-extraction state binding one entry's byte-range window to a
/// destination buffer.
///
/// Lives for exactly one entry's extraction: built after the resolver
/// has positioned the archive at the payload start, handed to the
/// stored-copy loop or the general engine, then taken apart with
/// [`UnpackContext::into_parts`].
pub struct UnpackContext {
    archive: Archive,
    dest: Vec<u8>,
    write_pos: usize,
    packed_left: u64,
    /// Running CRC of unpacked bytes, seeded 0 for old-format archives
    /// and 0xFFFF_FFFF otherwise.
    unp_crc: u32,
    /// Running CRC of packed bytes read from the window.
    packed_crc: u32,
    method: u8,
    /// Cipher version the engine should use; 0 means the entry is not
    /// encrypted. Always paired with an empty password here.
    cipher_version: u8,
    salt: Option<[u8; 8]>,
}

impl UnpackContext {
    /// Bind `archive`'s current read position to a fresh destination
    /// buffer for `record`'s entry. The caller must already have
    /// positioned the archive at the payload start.
    pub fn new(archive: Archive, record: &FileRecord) -> Self {
        let entry = &record.entry;
        let unp_crc = if archive.is_old_format() { 0 } else { 0xFFFFFFFF };
        Self {
            dest: vec![0u8; entry.unpacked_size as usize],
            write_pos: 0,
            packed_left: entry.packed_size,
            unp_crc,
            packed_crc: 0xFFFFFFFF,
            method: entry.method,
            cipher_version: if entry.is_encrypted { entry.version } else { 0 },
            salt: entry.salt,
            archive,
        }
    }

    /// Read packed bytes from the entry's window into `buf`.
    ///
    /// Never reads past the packed size; returns 0 once the window (or
    /// the container) is exhausted.
    pub fn read_source(&mut self, buf: &mut [u8]) -> Result<usize> {
        let want = (buf.len() as u64).min(self.packed_left) as usize;
        if want == 0 {
            return Ok(0);
        }
        let got = self.archive.read_source(&mut buf[..want])?;
        self.packed_left -= got as u64;
        self.packed_crc = crc32_update(self.packed_crc, &buf[..got]);
        Ok(got)
    }

    /// Append unpacked bytes to the destination buffer.
    ///
    /// Writes are capped at the buffer end; the count produced is not
    /// checked against the expected size anywhere, so short engine
    /// output leaves the tail zero-filled.
    pub fn write_dest(&mut self, data: &[u8]) {
        let room = self.dest.len() - self.write_pos;
        let n = data.len().min(room);
        self.dest[self.write_pos..self.write_pos + n].copy_from_slice(&data[..n]);
        self.write_pos += n;
        self.unp_crc = crc32_update(self.unp_crc, &data[..n]);
    }

    /// Full uncompressed size of the entry (= destination buffer length).
    pub fn expected_size(&self) -> u64 {
        self.dest.len() as u64
    }

    /// Unpacked bytes produced so far.
    pub fn bytes_written(&self) -> u64 {
        self.write_pos as u64
    }

    /// Entry's compression method byte.
    pub fn method(&self) -> u8 {
        self.method
    }

    /// Cipher version for encrypted entries, 0 otherwise.
    pub fn cipher_version(&self) -> u8 {
        self.cipher_version
    }

    /// Decryption password. Structurally wired, always empty here.
    pub fn password(&self) -> &str {
        ""
    }

    /// Encryption salt from the entry header, if present.
    pub fn salt(&self) -> Option<[u8; 8]> {
        self.salt
    }

    /// Running CRC accumulator over the unpacked bytes.
    pub fn unpacked_crc(&self) -> u32 {
        self.unp_crc
    }

    /// Disassemble into the filled buffer and the archive handle.
    pub fn into_parts(self) -> (Vec<u8>, Archive) {
        (self.dest, self.archive)
    }
}

/// Copy a stored entry's payload verbatim into the destination buffer,
/// reading the window in bounded chunks.
pub fn unstore(ctx: &mut UnpackContext) -> Result<()> {
    let mut chunk = vec![0u8; UNSTORE_CHUNK];
    loop {
        let got = ctx.read_source(&mut chunk)?;
        if got == 0 {
            break;
        }
        ctx.write_dest(&chunk[..got]);
    }
    Ok(())
}

/// The general-purpose decompressor, supplied by the host.
///
/// Invoked exactly once per resolved non-stored entry. The engine pulls
/// packed bytes through [`UnpackContext::read_source`] and pushes
/// unpacked bytes through [`UnpackContext::write_dest`] until it has
/// produced [`UnpackContext::expected_size`] bytes or its input ends.
pub trait Unpacker {
    /// Decompress one entry. `version` is the unpacker version from the
    /// entry header; `solid` tells the engine to keep prior window state.
    fn unpack(&self, ctx: &mut UnpackContext, version: u8, solid: bool) -> Result<()>;
}

/// Default engine for hosts that only need stored entries; rejects every
/// method it is asked to decode.
pub struct NoDecompressor;

impl Unpacker for NoDecompressor {
    fn unpack(&self, ctx: &mut UnpackContext, _version: u8, _solid: bool) -> Result<()> {
        Err(VfsError::MethodNotSupported(ctx.method()))
    }
}
