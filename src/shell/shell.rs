use std::io::{self, BufRead, Write};

use colored::Colorize;
use snafu::{ResultExt, Snafu};
use tracing::{debug, info, warn};

use crate::filesystem::{FileSystem, KindTag};
use crate::shell::command::{Command, FileNameError, VALID_OPTIONS, parse_file_name};

const WELCOME: &str = "Welcome to RUFS. Enter one of the following commands:";

/// Line oriented command loop building a [`FileSystem`].
///
/// Reads commands from `input` and writes prompts and messages to `output`.
/// Running out of input ends the session the same way `quit` does.
pub struct Shell<R, W> {
    input: R,
    output: W,
    colorize: bool,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            colorize: false,
        }
    }

    pub fn with_color(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn run(&mut self, fs: &mut FileSystem) -> Result<(), ShellError> {
        info!("Starting interactive session");
        writeln!(self.output, "{WELCOME}").context(PromptSnafu)?;
        writeln!(self.output, "{VALID_OPTIONS}").context(PromptSnafu)?;

        loop {
            let prompt = format!("Command({})", fs.working_directory().name().base());
            let Some(line) = self.prompt(&prompt)? else {
                debug!("Input exhausted");
                break;
            };

            let keep_going = match Command::from(line.as_str()) {
                Command::CreateDirectory => self.create_directory(fs)?,
                Command::CreateFile => self.create_file(fs)?,
                Command::EndDirectory => self.end_directory(fs)?,
                Command::Print => {
                    write!(self.output, "{}", fs.working_directory().describe())
                        .context(PromptSnafu)?;
                    true
                }
                Command::Quit => false,
                Command::Empty => true,
                Command::Unknown(command) => {
                    warn!("Unknown command '{}'", command);
                    self.error(&format!("{command} INPUT DOES NOT MATCH A VALID COMMAND"))?;
                    writeln!(self.output, "{VALID_OPTIONS}").context(PromptSnafu)?;
                    true
                }
            };
            if !keep_going {
                break;
            }
        }

        info!("Session ended");
        Ok(())
    }

    /// Returns `false` when input ran out while prompting.
    fn create_directory(&mut self, fs: &mut FileSystem) -> Result<bool, ShellError> {
        let Some(base) = self.prompt("Enter Directory name")? else {
            return Ok(false);
        };
        match fs.create_directory(base.trim()) {
            Ok(directory) => debug!("Created directory {}", directory.name()),
            Err(e) => {
                warn!("Rejected directory name: {}", e);
                self.error("INCORRECT FILENAME FORMAT")?;
            }
        }
        Ok(true)
    }

    fn create_file(&mut self, fs: &mut FileSystem) -> Result<bool, ShellError> {
        let Some(input) = self.prompt("Enter filename")? else {
            return Ok(false);
        };

        let (base, kind) = match parse_file_name(&input) {
            Ok(parsed) => parsed,
            Err(FileNameError::Malformed { .. }) => {
                warn!("Malformed file name '{}'", input);
                self.error("INCORRECT FILENAME FORMAT")?;
                return Ok(true);
            }
            Err(e @ FileNameError::InvalidKind { .. }) => {
                warn!("{}", e);
                self.error("INVALID FILE EX")?;
                return Ok(true);
            }
        };

        match kind {
            KindTag::TextFile => {
                let Some(content) = self.prompt_bytes("Please enter file contents")? else {
                    return Ok(false);
                };
                if let Err(e) = fs.create_text_file(base, content) {
                    warn!("Rejected text file: {}", e);
                    self.error("INCORRECT FILENAME FORMAT")?;
                }
            }
            KindTag::ProgramFile => {
                let Some(cpu) = self.prompt_number("Enter CPU requirements")? else {
                    return Ok(false);
                };
                let Some(memory) = self.prompt_number("Enter memory requirements")? else {
                    return Ok(false);
                };
                let (Some(cpu), Some(memory)) = (cpu, memory) else {
                    self.error("INVALID NUMBER")?;
                    return Ok(true);
                };
                if let Err(e) = fs.create_program_file(base, cpu, memory) {
                    warn!("Rejected program file: {}", e);
                    self.error("INCORRECT FILENAME FORMAT")?;
                }
            }
            KindTag::Directory => {
                warn!("Directories cannot be created as files");
                self.error("INVALID FILE EX")?;
            }
        }
        Ok(true)
    }

    fn end_directory(&mut self, fs: &mut FileSystem) -> Result<bool, ShellError> {
        if let Err(e) = fs.ascend() {
            warn!("{}", e);
            self.error("HAS NO PREV")?;
        }
        Ok(true)
    }

    /// Prompts for a non-negative integer. The inner `None` marks input that
    /// did not parse.
    fn prompt_number(&mut self, text: &str) -> Result<Option<Option<u32>>, ShellError> {
        let Some(line) = self.prompt(text)? else {
            return Ok(None);
        };
        let parsed = line.trim().parse::<u32>().ok();
        if parsed.is_none() {
            warn!("'{}' is not a non-negative integer", line.trim());
        }
        Ok(Some(parsed))
    }

    /// Like [`Shell::prompt_bytes`], decoding the line lossily. Commands,
    /// names and numbers are ASCII, so invalid bytes there only ever fail to
    /// match.
    fn prompt(&mut self, text: &str) -> Result<Option<String>, ShellError> {
        let line = self.prompt_bytes(text)?;
        Ok(line.map(|line| String::from_utf8_lossy(&line).into_owned()))
    }

    /// Writes `text>` and reads one line as raw bytes, without its line
    /// ending.
    fn prompt_bytes(&mut self, text: &str) -> Result<Option<Vec<u8>>, ShellError> {
        write!(self.output, "{text}>").context(PromptSnafu)?;
        self.output.flush().context(PromptSnafu)?;

        let mut line = Vec::new();
        let read = self.input.read_until(b'\n', &mut line).context(ReadSnafu)?;
        if read == 0 {
            return Ok(None);
        }
        if line.ends_with(b"\n") {
            line.pop();
            if line.ends_with(b"\r") {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    fn error(&mut self, message: &str) -> Result<(), ShellError> {
        let message = format!("***{message}***");
        let result = if self.colorize {
            writeln!(self.output, "{}", message.as_str().red())
        } else {
            writeln!(self.output, "{message}")
        };
        result.context(PromptSnafu)
    }
}

#[derive(Debug, Snafu)]
pub enum ShellError {
    #[snafu(display("Failed to write to the console"))]
    PromptError { source: io::Error },
    #[snafu(display("Failed to read from the console"))]
    ReadError { source: io::Error },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_session(script: &str) -> (FileSystem, String) {
        run_byte_session(script.as_bytes())
    }

    fn run_byte_session(script: &[u8]) -> (FileSystem, String) {
        let mut fs = FileSystem::new();
        let mut shell = Shell::new(Cursor::new(script.to_vec()), Vec::new());
        shell.run(&mut fs).expect("Session should not fail");
        let output = String::from_utf8(shell.into_output()).unwrap();
        (fs, output)
    }

    #[test]
    fn quit_on_empty_session() {
        let (fs, output) = run_session("quit\n");
        assert_eq!(fs.root().child_count(), 0);
        assert!(output.starts_with(WELCOME));
        assert!(output.ends_with("Command(root)>"));
    }

    #[test]
    fn end_of_input_acts_as_quit() {
        let (fs, _) = run_session("CreateDir\nSUB\n");
        assert_eq!(fs.root().child_count(), 1);
        assert_eq!(fs.working_directory().name().base(), "SUB");
    }

    #[test]
    fn builds_nested_tree() {
        let script = "CreateFile\nNOTES.t\nhi\n\
                      CreateDir\nSUB\n\
                      CreateFile\nJOB.p\n4\n1024\n\
                      EndDir\n\
                      quit\n";
        let (fs, output) = run_session(script);

        let root = fs.root();
        assert_eq!(root.child_count(), 2);
        assert_eq!(root.text_files()[0].content(), b"hi");
        let sub = &root.subdirectories()[0];
        assert_eq!(sub.name().base(), "SUB");
        assert_eq!(sub.program_files()[0].cpu_requirement(), 4);
        assert_eq!(sub.program_files()[0].memory_requirement(), 1024);
        assert!(output.contains("Command(SUB)>"));
        assert_eq!(fs.depth(), 0);
    }

    #[test]
    fn text_contents_keep_inner_whitespace() {
        let (fs, _) = run_session("CreateFile\nNOTES.t\n  spaced out  \r\nquit\n");
        assert_eq!(fs.root().text_files()[0].content(), b"  spaced out  ");
    }

    #[test]
    fn non_utf8_contents_are_kept_verbatim() {
        let script = b"CreateFile\nNOTES.t\nhi\nCreateFile\nRAW.t\n\xff\xfe\nquit\n";
        let (fs, output) = run_byte_session(script);

        let files = fs.root().text_files();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].content(), b"hi");
        assert_eq!(files[1].name().base(), "RAW");
        assert_eq!(files[1].content(), &[0xff, 0xfe]);
        assert!(!output.contains("***"));
    }

    #[test]
    fn invalid_bytes_in_commands_do_not_end_session() {
        let (fs, output) = run_byte_session(b"Create\xffDir\nCreateDir\nSUB\nquit\n");
        assert!(output.contains("INPUT DOES NOT MATCH A VALID COMMAND"));
        assert_eq!(fs.root().child_count(), 1);
    }

    #[test]
    fn end_dir_at_root_reports_missing_parent() {
        let (fs, output) = run_session("EndDir\nquit\n");
        assert!(output.contains("***HAS NO PREV***"));
        assert_eq!(fs.depth(), 0);
    }

    #[test]
    fn unknown_command_lists_options() {
        let (_, output) = run_session("ls\nquit\n");
        assert!(output.contains("***ls INPUT DOES NOT MATCH A VALID COMMAND***"));
        assert_eq!(output.matches(VALID_OPTIONS).count(), 2);
    }

    #[test]
    fn invalid_file_names_leave_tree_untouched() {
        let (fs, output) =
            run_session("CreateFile\nnoextension\nCreateFile\nfile.x\nCreateFile\ndir.d\nquit\n");
        assert_eq!(fs.root().child_count(), 0);
        assert_eq!(output.matches("***INCORRECT FILENAME FORMAT***").count(), 1);
        assert_eq!(output.matches("***INVALID FILE EX***").count(), 2);
    }

    #[test]
    fn invalid_requirements_are_rejected() {
        let (fs, output) = run_session("CreateFile\nJOB.p\nfour\n1024\nCreateFile\nJOB.p\n-1\n2\nquit\n");
        assert_eq!(fs.root().child_count(), 0);
        assert_eq!(output.matches("***INVALID NUMBER***").count(), 2);
    }

    #[test]
    fn print_describes_working_directory() {
        let (_, output) = run_session("CreateFile\nNOTES.t\nhi\nprint\nquit\n");
        assert!(output.contains("Directory:\troot.d Contains 1"));
        assert!(output.contains("contents: hi"));
    }

    #[test]
    fn blank_lines_are_ignored() {
        let (fs, output) = run_session("\n   \nquit\n");
        assert_eq!(fs.root().child_count(), 0);
        assert!(!output.contains("***"));
    }
}
