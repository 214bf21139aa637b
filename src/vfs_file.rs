//! In-memory file handle over one fully extracted entry.
//!
//! Once built, the handle never touches the archive or the decompressor
//! again: reads and seeks operate on the owned buffer and a cursor. The
//! buffer, and the archive handle the entry came from, are released
//! together when the handle is dropped.

use std::io;

use crate::archive::Archive;

/// Origin for [`VfsFile::seek`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    /// Absolute offset from the start of the buffer.
    Start,
    /// Relative to the current cursor.
    Current,
    /// Relative to the end of the buffer.
    End,
}

/// A seekable read-only view of one decompressed entry.
pub struct VfsFile {
    buffer: Vec<u8>,
    offset: i64,
    /// Keeps the container open for the handle's lifetime.
    _archive: Archive,
}

impl VfsFile {
    pub(crate) fn new(buffer: Vec<u8>, archive: Archive) -> Self {
        Self {
            buffer,
            offset: 0,
            _archive: archive,
        }
    }

    /// Copy up to `dest.len()` bytes from the cursor position, advancing
    /// the cursor. Returns the count copied; a cursor at or past the end
    /// of the buffer (or negative) reads 0 bytes, never an error.
    pub fn read(&mut self, dest: &mut [u8]) -> usize {
        let len = self.buffer.len() as i64;
        if self.offset < 0 || self.offset >= len {
            return 0;
        }
        let start = self.offset as usize;
        let n = dest.len().min(self.buffer.len() - start);
        dest[..n].copy_from_slice(&self.buffer[start..start + n]);
        self.offset += n as i64;
        n
    }

    /// Set the cursor unconditionally. No bounds clamping: offsets past
    /// the end and negative offsets are stored as-is, and reads there
    /// return 0 bytes. Never fails.
    pub fn seek(&mut self, offset: i64, whence: Whence) {
        self.offset = match whence {
            Whence::Start => offset,
            Whence::Current => self.offset.saturating_add(offset),
            Whence::End => (self.buffer.len() as i64).saturating_add(offset),
        };
    }

    /// Current cursor position. Reports whatever [`VfsFile::seek`] set,
    /// including out-of-range values.
    pub fn tell(&self) -> i64 {
        self.offset
    }

    /// Reset the cursor to the start of the buffer.
    pub fn rewind(&mut self) {
        self.offset = 0;
    }

    /// Total size of the decompressed entry in bytes.
    pub fn length(&self) -> u64 {
        self.buffer.len() as u64
    }
}

impl io::Read for VfsFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(VfsFile::read(self, buf))
    }
}
