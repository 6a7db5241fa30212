//! In-memory filesystem tree.
//!
//! A tree is made of three kinds of nodes sharing a fixed width [`Name`]:
//! text files, program files and directories. Directories own their
//! children; navigation upwards goes through [`FileSystem`].

mod directory;
mod name;
mod node;
mod tree;

pub use directory::Directory;
pub use name::{InvalidKindTagError, KindTag, Name, NameError};
#[cfg(test)]
pub use name::{BASE_LEN, NAME_LEN};
pub use node::{Node, NodeRef, ProgramFile, TextFile, TextFileError};
pub use tree::FileSystem;
