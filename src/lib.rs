//! Read-only VFS access to entries inside RAR archives.
//!
//! A composite path of the form `rar://archive_path:entry_path` resolves
//! to one entry inside a RAR container. Opening it extracts the entry in
//! full into memory and returns a seekable file handle; directory
//! enumeration lists an archive's entries back in composite form.
//!
//! Supports RAR 1.5-4.x containers. The general-purpose decompressor is
//! not part of this crate: stored entries work out of the box, and hosts
//! plug an engine for compressed methods through the [`Unpacker`] trait.
//!
//! ```rust,no_run
//! use rar_vfs::RarVfs;
//!
//! let vfs = RarVfs::new();
//! if let Some(mut file) = vfs.open("rar://album.rar:track01.flac") {
//!     let mut head = [0u8; 64];
//!     let n = file.read(&mut head);
//!     println!("{} of {} bytes", n, file.length());
//! }
//! ```

mod archive;
pub mod crc32;
pub mod error;
pub mod parsing;
pub mod scheme;
mod unpack;
mod vfs;
mod vfs_file;
mod walk;

pub use archive::{Archive, FileRecord, HeaderRecord};
pub use error::{Result, VfsError};
pub use unpack::{unstore, NoDecompressor, UnpackContext, Unpacker};
pub use vfs::RarVfs;
pub use vfs_file::{VfsFile, Whence};
pub use walk::{collect_entry_names, find_entry};
