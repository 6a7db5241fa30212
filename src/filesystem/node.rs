use std::fmt;

use snafu::{ResultExt, Snafu, ensure};

use crate::filesystem::{Directory, KindTag, Name, NameError};

/// A leaf holding raw text bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFile {
    name: Name,
    content: Vec<u8>,
}

impl TextFile {
    pub fn new(base: &str, content: impl Into<Vec<u8>>) -> Result<Self, TextFileError> {
        let name = Name::new(base, KindTag::TextFile).context(InvalidNameSnafu)?;
        let content = content.into();
        ensure!(
            u32::try_from(content.len()).is_ok(),
            ContentTooLargeSnafu {
                name: name.to_string(),
                len: content.len(),
            }
        );
        Ok(Self { name, content })
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Length of the content as stored in the length field.
    pub fn content_len(&self) -> u32 {
        // Bounded in `new`.
        self.content.len() as u32
    }
}

/// A leaf carrying the resources a program needs to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramFile {
    name: Name,
    cpu_requirement: u32,
    memory_requirement: u32,
}

impl ProgramFile {
    pub fn new(
        base: &str,
        cpu_requirement: u32,
        memory_requirement: u32,
    ) -> Result<Self, NameError> {
        Ok(Self {
            name: Name::new(base, KindTag::ProgramFile)?,
            cpu_requirement,
            memory_requirement,
        })
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn cpu_requirement(&self) -> u32 {
        self.cpu_requirement
    }

    pub fn memory_requirement(&self) -> u32 {
        self.memory_requirement
    }
}

/// Any entry of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    TextFile(TextFile),
    ProgramFile(ProgramFile),
    Directory(Directory),
}

impl Node {
    pub fn name(&self) -> &Name {
        match self {
            Node::TextFile(file) => file.name(),
            Node::ProgramFile(file) => file.name(),
            Node::Directory(directory) => directory.name(),
        }
    }
}

impl From<TextFile> for Node {
    fn from(file: TextFile) -> Self {
        Node::TextFile(file)
    }
}

impl From<ProgramFile> for Node {
    fn from(file: ProgramFile) -> Self {
        Node::ProgramFile(file)
    }
}

impl From<Directory> for Node {
    fn from(directory: Directory) -> Self {
        Node::Directory(directory)
    }
}

/// Borrowed view of any entry of the tree.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    TextFile(&'a TextFile),
    ProgramFile(&'a ProgramFile),
    Directory(&'a Directory),
}

impl<'a> NodeRef<'a> {
    pub fn name(&self) -> &'a Name {
        match self {
            NodeRef::TextFile(file) => file.name(),
            NodeRef::ProgramFile(file) => file.name(),
            NodeRef::Directory(directory) => directory.name(),
        }
    }
}

/// Display adapter returned by [`Directory::describe`].
///
/// Directories list their immediate text and program files; subdirectories
/// only count towards the total.
pub struct Describe<'a>(NodeRef<'a>);

impl<'a> Describe<'a> {
    pub(super) fn directory(directory: &'a Directory) -> Self {
        Describe(NodeRef::Directory(directory))
    }
}

impl fmt::Display for Describe<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            NodeRef::TextFile(file) => {
                writeln!(f, "Text File:\t{}", file.name())?;
                writeln!(f, "size: {}", file.content_len())?;
                writeln!(f, "contents: {}", String::from_utf8_lossy(file.content()))
            }
            NodeRef::ProgramFile(file) => writeln!(
                f,
                "Program File:\t{} contents: cpu req: {}, mem req: {}",
                file.name(),
                file.cpu_requirement(),
                file.memory_requirement()
            ),
            NodeRef::Directory(directory) => {
                writeln!(
                    f,
                    "Directory:\t{} Contains {}",
                    directory.name(),
                    directory.child_count()
                )?;
                for child in directory.children() {
                    if !matches!(child, NodeRef::Directory(_)) {
                        write!(f, "{}", Describe(child))?;
                    }
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Snafu)]
pub enum TextFileError {
    #[snafu(display("Invalid text file name"))]
    InvalidName { source: NameError },
    #[snafu(display(
        "Contents of '{}' are {} bytes long, which does not fit the length field",
        name,
        len
    ))]
    ContentTooLarge { name: String, len: usize },
}
