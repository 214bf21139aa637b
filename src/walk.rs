//! Header-stream walks: entry resolution and directory listing.

use crate::archive::{Archive, FileRecord, HeaderRecord};
use crate::error::Result;

/// Find the first non-directory entry whose name equals `target`
/// byte-for-byte.
///
/// Walks the header stream in strict on-disk order; directory entries
/// and uninterpreted blocks are skipped without touching their payloads.
/// On a match the record is returned as-is - the payload is not consumed
/// and the caller positions the cursor itself before extraction. With
/// duplicate names the earliest entry wins.
pub fn find_entry(archive: &mut Archive, target: &str) -> Result<Option<FileRecord>> {
    while let Some(record) = archive.next_header()? {
        match record {
            HeaderRecord::File(file) if !file.entry.is_directory && file.entry.name == target => {
                return Ok(Some(file));
            }
            other => archive.skip_to_next(&other)?,
        }
    }
    Ok(None)
}

/// Collect the names of all non-directory entries, in on-disk order.
///
/// One full pass over the header stream using skips only; no payload is
/// ever decompressed. An archive without qualifying entries yields an
/// empty vector.
pub fn collect_entry_names(archive: &mut Archive) -> Result<Vec<String>> {
    let mut names = Vec::new();
    while let Some(record) = archive.next_header()? {
        if let HeaderRecord::File(file) = &record {
            if !file.entry.is_directory {
                names.push(file.entry.name.clone());
            }
        }
        archive.skip_to_next(&record)?;
    }
    Ok(names)
}
