use tracing::debug;

use crate::filesystem::node::{Describe, NodeRef};
use crate::filesystem::{KindTag, Name, NameError, Node, ProgramFile, TextFile};

/// A directory exclusively owning its children.
///
/// Children are kept in three ordered collections. The child count is only
/// ever changed together with an insertion, so it always equals the total
/// length of the three collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    name: Name,
    child_count: u32,
    text_files: Vec<TextFile>,
    program_files: Vec<ProgramFile>,
    subdirectories: Vec<Directory>,
}

impl Directory {
    pub fn new(base: &str) -> Result<Self, NameError> {
        Ok(Self::with_name(Name::new(base, KindTag::Directory)?))
    }

    pub fn root() -> Self {
        Self::with_name(Name::root())
    }

    fn with_name(name: Name) -> Self {
        Self {
            name,
            child_count: 0,
            text_files: Vec::new(),
            program_files: Vec::new(),
            subdirectories: Vec::new(),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn child_count(&self) -> u32 {
        self.child_count
    }

    pub fn text_files(&self) -> &[TextFile] {
        &self.text_files
    }

    pub fn program_files(&self) -> &[ProgramFile] {
        &self.program_files
    }

    pub fn subdirectories(&self) -> &[Directory] {
        &self.subdirectories
    }

    /// Attaches `file` and returns its index among the text files.
    pub fn attach_text_file(&mut self, file: TextFile) -> usize {
        debug!("Attaching text file {} to {}", file.name(), self.name);
        self.text_files.push(file);
        self.child_count += 1;
        self.text_files.len() - 1
    }

    /// Attaches `file` and returns its index among the program files.
    pub fn attach_program_file(&mut self, file: ProgramFile) -> usize {
        debug!("Attaching program file {} to {}", file.name(), self.name);
        self.program_files.push(file);
        self.child_count += 1;
        self.program_files.len() - 1
    }

    /// Attaches `directory` and returns its index among the subdirectories.
    pub fn attach_subdirectory(&mut self, directory: Directory) -> usize {
        debug!("Attaching directory {} to {}", directory.name(), self.name);
        self.subdirectories.push(directory);
        self.child_count += 1;
        self.subdirectories.len() - 1
    }

    /// Attaches any node, returning its index within the collection of its kind.
    pub fn attach(&mut self, node: Node) -> usize {
        match node {
            Node::TextFile(file) => self.attach_text_file(file),
            Node::ProgramFile(file) => self.attach_program_file(file),
            Node::Directory(directory) => self.attach_subdirectory(directory),
        }
    }

    /// All children in stream order: text files, program files, then
    /// subdirectories, each in attachment order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.text_files
            .iter()
            .map(NodeRef::TextFile)
            .chain(self.program_files.iter().map(NodeRef::ProgramFile))
            .chain(self.subdirectories.iter().map(NodeRef::Directory))
    }

    pub(super) fn subdirectory(&self, index: usize) -> Option<&Directory> {
        self.subdirectories.get(index)
    }

    pub(super) fn subdirectories_mut(&mut self) -> &mut [Directory] {
        &mut self.subdirectories
    }

    /// Human readable summary of this directory and its immediate files.
    pub fn describe(&self) -> Describe<'_> {
        Describe::directory(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_total(directory: &Directory) -> usize {
        directory.text_files().len()
            + directory.program_files().len()
            + directory.subdirectories().len()
    }

    #[test]
    fn fresh_directory_is_empty() {
        let directory = Directory::new("empty").unwrap();
        assert_eq!(directory.child_count(), 0);
        assert_eq!(live_total(&directory), 0);
    }

    #[test]
    fn child_count_tracks_every_attach() {
        let mut directory = Directory::root();

        directory.attach_text_file(TextFile::new("a", "1").unwrap());
        assert_eq!(directory.child_count() as usize, live_total(&directory));

        directory.attach_program_file(ProgramFile::new("b", 1, 1).unwrap());
        assert_eq!(directory.child_count() as usize, live_total(&directory));

        directory.attach_subdirectory(Directory::new("c").unwrap());
        assert_eq!(directory.child_count() as usize, live_total(&directory));

        directory.attach(TextFile::new("d", "2").unwrap().into());
        directory.attach(Directory::new("e").unwrap().into());
        assert_eq!(directory.child_count(), 5);
        assert_eq!(directory.child_count() as usize, live_total(&directory));
    }

    #[test]
    fn siblings_keep_attachment_order_and_allow_duplicates() {
        let mut directory = Directory::root();
        for content in ["first", "second", "third"] {
            directory.attach_text_file(TextFile::new("same", content).unwrap());
        }

        let contents: Vec<&[u8]> = directory.text_files().iter().map(|f| f.content()).collect();
        assert_eq!(contents, vec![&b"first"[..], &b"second"[..], &b"third"[..]]);
        assert_eq!(directory.child_count(), 3);
    }

    #[test]
    fn children_are_grouped_by_kind() {
        let mut directory = Directory::root();
        directory.attach(Directory::new("dir").unwrap().into());
        directory.attach(ProgramFile::new("prog", 1, 1).unwrap().into());
        directory.attach(TextFile::new("text1", "").unwrap().into());
        directory.attach(TextFile::new("text2", "").unwrap().into());

        let names: Vec<String> = directory.children().map(|c| c.name().to_string()).collect();
        assert_eq!(names, vec!["text1.t", "text2.t", "prog.p", "dir.d"]);
        assert_eq!(directory.children().count(), directory.child_count() as usize);
    }

    #[test]
    fn attach_returns_index_within_kind() {
        let mut directory = Directory::root();
        assert_eq!(directory.attach(TextFile::new("a", "").unwrap().into()), 0);
        assert_eq!(directory.attach(ProgramFile::new("b", 0, 0).unwrap().into()), 0);
        assert_eq!(directory.attach(TextFile::new("c", "").unwrap().into()), 1);
    }

    #[test]
    fn attach_subdirectory_returns_its_index() {
        let mut directory = Directory::root();
        assert_eq!(directory.attach_subdirectory(Directory::new("x").unwrap()), 0);
        directory.attach_text_file(TextFile::new("t", "").unwrap());
        assert_eq!(directory.attach_subdirectory(Directory::new("y").unwrap()), 1);
        assert_eq!(directory.subdirectory(1).map(|d| d.name().base()), Some("y"));
    }
}
