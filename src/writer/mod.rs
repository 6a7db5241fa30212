//! Binary serialization of a filesystem tree.
//!
//! # Layout
//!
//! ```plain
//! directory ::= NAME COUNT text* program* directory* "End" NAME
//! text      ::= NAME LENGTH CONTENT
//! program   ::= NAME CPU MEMORY
//! ```
//!
//! `NAME` is the 11-byte [`Name`](crate::filesystem::Name). `COUNT`,
//! `LENGTH`, `CPU` and `MEMORY` are 4-byte integers in native byte order.
//! `CONTENT` is exactly `LENGTH` raw bytes. The closing `NAME` repeats the
//! opening one. The stream is a single directory record for the root.

mod binary_writer;
mod trace;

pub use binary_writer::{BinaryWriter, WriterError};
pub use trace::{Trace, TraceLabel};

/// Marker opening the sentinel that closes every directory record.
pub const END_MARKER: &[u8; 3] = b"End";
