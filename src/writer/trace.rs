use std::fmt;

use derive_more::Display;

use crate::filesystem::Name;

/// What a traced field of the stream holds.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum TraceLabel {
    #[display("Directory:\t{_0}")]
    DirectoryOpen(Name),
    #[display("Directory {} contains {count} files/directories", name.base())]
    ChildCount { name: Name, count: u32 },
    #[display("Filename:\t{_0}\tType: Text file")]
    TextFileName(Name),
    #[display("Size of text file: {_0} byte")]
    TextLength(u32),
    #[display("Contents of text file: {_0}")]
    TextContents(String),
    #[display("Filename:\t{_0}\tType: Program")]
    ProgramFileName(Name),
    #[display("CPU Requirement: {_0}")]
    CpuRequirement(u32),
    #[display("Memory Requirement: {_0}")]
    MemoryRequirement(u32),
    #[display("End of directory {_0}")]
    DirectoryEnd(Name),
}

/// A field of the stream together with the offset it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    pub offset: u64,
    pub label: TraceLabel,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:\t{}", self.offset, self.label)
    }
}

/// Human readable listing of everything the writer emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    pub(super) fn push(&mut self, offset: u64, label: TraceLabel) {
        self.entries.push(TraceEntry { offset, label });
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.entries() {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}
