use std::io::{self, Write};

use count_write::CountWrite;
use snafu::{ResultExt, Snafu};
use tracing::{debug, info};

use crate::filesystem::{Directory, NodeRef, ProgramFile, TextFile};
use crate::writer::{END_MARKER, Trace, TraceLabel};

/// Depth-first serializer for a directory tree.
///
/// Every directory record is its name, its child count, the records of its
/// text files, program files and subdirectories in that order, and finally
/// the `End` marker followed by its name again. Integers are 4 bytes wide in
/// native byte order.
///
/// The writer is consumed by [`BinaryWriter::write`], so a tree can only be
/// flushed through it once.
pub struct BinaryWriter<W: Write> {
    sink: CountWrite<W>,
    trace: Trace,
}

impl<W: Write> BinaryWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: CountWrite::from(sink),
            trace: Trace::default(),
        }
    }

    /// Serializes `root` and its whole subtree, returning the sink and the
    /// offset trace of every emitted field.
    pub fn write(mut self, root: &Directory) -> Result<(W, Trace), WriterError> {
        debug!("Serializing tree rooted at {}", root.name());
        self.write_node(NodeRef::Directory(root))?;

        let offset = self.position();
        self.sink.flush().context(FlushSnafu { offset })?;
        info!("Wrote {} bytes", offset);

        Ok((self.sink.into_inner(), self.trace))
    }

    fn position(&self) -> u64 {
        self.sink.count()
    }

    /// Writes the record of `node`: its name, then the fields of its kind.
    fn write_node(&mut self, node: NodeRef<'_>) -> Result<(), WriterError> {
        let name = *node.name();
        match node {
            NodeRef::TextFile(file) => {
                self.emit(TraceLabel::TextFileName(name), name.as_bytes())?;
                self.write_text_body(file)
            }
            NodeRef::ProgramFile(file) => {
                self.emit(TraceLabel::ProgramFileName(name), name.as_bytes())?;
                self.write_program_body(file)
            }
            NodeRef::Directory(directory) => {
                self.emit(TraceLabel::DirectoryOpen(name), name.as_bytes())?;
                self.write_directory_body(directory)
            }
        }
    }

    fn write_directory_body(&mut self, directory: &Directory) -> Result<(), WriterError> {
        let name = *directory.name();
        let count = directory.child_count();
        self.emit(TraceLabel::ChildCount { name, count }, &count.to_ne_bytes())?;

        for child in directory.children() {
            self.write_node(child)?;
        }

        let offset = self.position();
        self.trace.push(offset, TraceLabel::DirectoryEnd(name));
        self.put(END_MARKER)?;
        self.put(name.as_bytes())
    }

    fn write_text_body(&mut self, file: &TextFile) -> Result<(), WriterError> {
        let content = file.content();
        let len = file.content_len();
        self.emit(TraceLabel::TextLength(len), &len.to_ne_bytes())?;
        self.emit(
            TraceLabel::TextContents(String::from_utf8_lossy(content).into_owned()),
            content,
        )
    }

    fn write_program_body(&mut self, file: &ProgramFile) -> Result<(), WriterError> {
        let cpu = file.cpu_requirement();
        self.emit(TraceLabel::CpuRequirement(cpu), &cpu.to_ne_bytes())?;
        let memory = file.memory_requirement();
        self.emit(TraceLabel::MemoryRequirement(memory), &memory.to_ne_bytes())
    }

    /// Records `label` at the current position, then writes `bytes`.
    fn emit(&mut self, label: TraceLabel, bytes: &[u8]) -> Result<(), WriterError> {
        let offset = self.position();
        debug!("{}: {}", offset, label);
        self.trace.push(offset, label);
        self.put(bytes)
    }

    fn put(&mut self, bytes: &[u8]) -> Result<(), WriterError> {
        let offset = self.position();
        self.sink.write_all(bytes).context(SinkSnafu { offset })
    }
}

#[derive(Debug, Snafu)]
pub enum WriterError {
    #[snafu(display("Failed to write to the output at byte {}", offset))]
    SinkError { offset: u64, source: io::Error },
    #[snafu(display("Failed to flush the output after {} bytes", offset))]
    FlushError { offset: u64, source: io::Error },
}
