use snafu::Snafu;
use tracing::debug;

use crate::filesystem::{Directory, NameError, Node, ProgramFile, TextFile, TextFileError};

/// An in-memory filesystem tree together with the current working directory.
///
/// Directories never point at their parents. The working directory is kept
/// as the path of subdirectory indices leading to it from the root, and the
/// parent of the working directory is whatever the path resolves to one step
/// shorter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSystem {
    root: Directory,
    cursor: Vec<usize>,
}

impl FileSystem {
    pub fn new() -> Self {
        Self {
            root: Directory::root(),
            cursor: Vec::new(),
        }
    }

    pub fn root(&self) -> &Directory {
        &self.root
    }

    /// Number of directories between the root and the working directory.
    pub fn depth(&self) -> usize {
        self.cursor.len()
    }

    pub fn working_directory(&self) -> &Directory {
        let mut current = &self.root;
        for &index in &self.cursor {
            match current.subdirectory(index) {
                Some(next) => current = next,
                None => break,
            }
        }
        current
    }

    fn working_directory_mut(&mut self) -> &mut Directory {
        let mut current = &mut self.root;
        for &index in &self.cursor {
            if index >= current.subdirectories().len() {
                break;
            }
            current = &mut current.subdirectories_mut()[index];
        }
        current
    }

    /// Attaches `node` to the working directory and returns its index among
    /// the working directory's children of the same kind.
    ///
    /// Attaching a directory also makes it the working directory.
    pub fn attach(&mut self, node: Node) -> usize {
        debug!("Attaching {} at depth {}", node.name(), self.depth());
        let enters = matches!(node, Node::Directory(_));
        let index = self.working_directory_mut().attach(node);
        if enters {
            self.cursor.push(index);
            debug!("Entered directory at depth {}", self.depth());
        }
        index
    }

    /// Creates a directory inside the working directory and enters it.
    pub fn create_directory(&mut self, base: &str) -> Result<&Directory, NameError> {
        let directory = Directory::new(base)?;
        self.attach(directory.into());
        Ok(self.working_directory())
    }

    pub fn create_text_file(
        &mut self,
        base: &str,
        content: impl Into<Vec<u8>>,
    ) -> Result<&TextFile, TextFileError> {
        let file = TextFile::new(base, content)?;
        let index = self.attach(file.into());
        Ok(&self.working_directory().text_files()[index])
    }

    pub fn create_program_file(
        &mut self,
        base: &str,
        cpu_requirement: u32,
        memory_requirement: u32,
    ) -> Result<&ProgramFile, NameError> {
        let file = ProgramFile::new(base, cpu_requirement, memory_requirement)?;
        let index = self.attach(file.into());
        Ok(&self.working_directory().program_files()[index])
    }

    /// Moves the working directory to its parent and returns the parent.
    ///
    /// Fails at the root, leaving the working directory where it was.
    pub fn ascend(&mut self) -> Result<&Directory, NoParentError> {
        if self.cursor.pop().is_none() {
            return NoParentSnafu {
                name: self.root.name().to_string(),
            }
            .fail();
        }
        let parent = self.working_directory();
        debug!("Ascended to {}", parent.name());
        Ok(parent)
    }
}

impl Default for FileSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("Directory '{}' has no parent", name))]
pub struct NoParentError {
    name: String,
}
