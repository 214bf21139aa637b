//! The host-facing VFS surface.
//!
//! [`RarVfs`] is constructed once by the host and issues file handles
//! for composite `rar://archive:entry` paths. Per the VFS contract every
//! failure - bad path syntax, unreadable or unrecognized container,
//! missing entry, undecodable method - collapses to an absent result;
//! the structured detail is only logged.

use log::{debug, trace};

use crate::archive::Archive;
use crate::error::{Result, VfsError};
use crate::scheme;
use crate::unpack::{unstore, NoDecompressor, UnpackContext, Unpacker};
use crate::vfs_file::VfsFile;
use crate::walk::{collect_entry_names, find_entry};

const SCHEMES: &[&str] = &[scheme::SCHEME];

/// Read-only VFS over RAR archive entries.
pub struct RarVfs {
    unpacker: Box<dyn Unpacker>,
}

impl RarVfs {
    /// A VFS that can serve stored entries only; compressed entries fail
    /// to open until a general decompressor is supplied via
    /// [`RarVfs::with_unpacker`].
    pub fn new() -> Self {
        Self::with_unpacker(Box::new(NoDecompressor))
    }

    /// A VFS using `unpacker` as its general decompression engine.
    pub fn with_unpacker(unpacker: Box<dyn Unpacker>) -> Self {
        Self { unpacker }
    }

    /// Scheme prefixes this VFS serves.
    pub fn schemes(&self) -> &'static [&'static str] {
        SCHEMES
    }

    /// This VFS never streams; entries are materialized in full.
    pub fn is_streaming(&self) -> bool {
        false
    }

    /// Whether `path` names an archive container, judged by extension.
    pub fn is_container(&self, path: &str) -> bool {
        scheme::is_container(path)
    }

    /// Open one entry as a seekable in-memory file.
    ///
    /// Resolves the entry inside the archive, extracts it in full on the
    /// calling thread, and returns a handle whose reads and seeks never
    /// touch the archive again. `None` on any failure.
    pub fn open(&self, path: &str) -> Option<VfsFile> {
        match self.open_entry(path) {
            Ok(file) => Some(file),
            Err(err) => {
                debug!("open {} failed: {}", path, err);
                None
            }
        }
    }

    fn open_entry(&self, path: &str) -> Result<VfsFile> {
        let split = scheme::parse(path).ok_or(VfsError::PathSyntax)?;
        trace!("resolving {} in {}", split.entry, split.archive);

        let mut archive = Archive::open(split.archive)?;
        let record = find_entry(&mut archive, split.entry)?.ok_or(VfsError::EntryNotFound)?;
        archive.seek_to_payload(&record)?;

        let mut ctx = UnpackContext::new(archive, &record);
        if record.entry.is_stored() {
            unstore(&mut ctx)?;
        } else {
            self.unpacker
                .unpack(&mut ctx, record.entry.version, record.entry.is_solid)?;
        }
        trace!(
            "extracted {} ({} of {} bytes)",
            record.entry.name,
            ctx.bytes_written(),
            ctx.expected_size()
        );

        let (buffer, archive) = ctx.into_parts();
        Ok(VfsFile::new(buffer, archive))
    }

    /// Enumerate an archive's entries as composite paths.
    ///
    /// One header walk with payload skips only; directory entries are
    /// excluded and on-disk order is preserved. An archive without
    /// qualifying entries yields an empty vector; an unreadable or
    /// unrecognized container yields `None`.
    pub fn scandir(&self, archive_path: &str) -> Option<Vec<String>> {
        match self.scan(archive_path) {
            Ok(paths) => Some(paths),
            Err(err) => {
                debug!("scandir {} failed: {}", archive_path, err);
                None
            }
        }
    }

    fn scan(&self, archive_path: &str) -> Result<Vec<String>> {
        let mut archive = Archive::open(archive_path)?;
        let names = collect_entry_names(&mut archive)?;
        Ok(names
            .into_iter()
            .map(|name| scheme::compose(archive_path, &name))
            .collect())
    }
}

impl Default for RarVfs {
    fn default() -> Self {
        Self::new()
    }
}
