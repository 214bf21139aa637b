//! Composite `rar://archive_path:entry_path` paths.
//!
//! The scheme prefix matches case-insensitively; the first colon after
//! the prefix splits archive path from entry path, so archive paths
//! containing a colon are not addressable through this scheme.

/// The scheme prefix this VFS serves.
pub const SCHEME: &str = "rar://";

/// A composite path split into its archive and entry parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemePath<'a> {
    /// Path of the archive container on disk.
    pub archive: &'a str,
    /// Path of the entry inside the archive.
    pub entry: &'a str,
}

/// Split a composite path. `None` when the scheme prefix does not match
/// or the separating colon is missing.
pub fn parse(path: &str) -> Option<SchemePath<'_>> {
    let prefix = path.get(..SCHEME.len())?;
    if !prefix.eq_ignore_ascii_case(SCHEME) {
        return None;
    }
    let rest = &path[SCHEME.len()..];
    let colon = rest.find(':')?;
    Some(SchemePath {
        archive: &rest[..colon],
        entry: &rest[colon + 1..],
    })
}

/// Render an archive path and entry name back into composite form.
pub fn compose(archive: &str, entry: &str) -> String {
    format!("{SCHEME}{archive}:{entry}")
}

/// Whether `path` names an archive container this VFS can open, judged
/// by extension alone.
pub fn is_container(path: &str) -> bool {
    path.rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("rar"))
}
