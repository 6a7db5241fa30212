use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

use snafu::Snafu;
use snafu::prelude::*;
use supports_color::Stream;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::ext::BestEffortPathExt;
use crate::filesystem::{Directory, FileSystem};
use crate::shell::{Shell, ShellError};
use crate::writer::{BinaryWriter, Trace, WriterError};

pub struct Application;

impl Application {
    pub fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        debug!("Runtime config: {:?}", app_config);

        let colorize = supports_color::on(Stream::Stdout).is_some();
        if colorize {
            colored::control::set_override(true);
        }

        Self::run_session(&app_config, io::stdin().lock(), io::stdout().lock(), colorize)?;
        Ok(())
    }

    /// Runs one shell session on `input`/`output`, writes the resulting tree
    /// to the configured file and returns the trace of the write.
    pub fn run_session<R: BufRead, W: Write>(
        app_config: &RuntimeConfig,
        input: R,
        output: W,
        colorize: bool,
    ) -> Result<Trace, ApplicationError> {
        let mut fs = FileSystem::new();
        let mut shell = Shell::new(input, output).with_color(colorize);
        shell.run(&mut fs).context(ShellSnafu)?;
        let mut output = shell.into_output();

        let root = fs.root();
        info!("Tree complete with {} top level entries", root.child_count());
        let trace = Self::write_tree(&app_config.output, root)?;

        if app_config.print_trace {
            write!(output, "{trace}").context(PrintTraceSnafu)?;
            output.flush().context(PrintTraceSnafu)?;
        }
        Ok(trace)
    }

    fn write_tree(path: &Path, root: &Directory) -> Result<Trace, ApplicationError> {
        info!("Writing tree to {}", path.best_effort_path_display());
        let file = File::create(path).context(CreateOutputSnafu {
            path: path.best_effort_path_display(),
        })?;

        let (_, trace) = BinaryWriter::new(BufWriter::new(file))
            .write(root)
            .context(WriteSnafu {
                path: path.best_effort_path_display(),
            })?;
        Ok(trace)
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered during the interactive session"))]
    ShellError { source: ShellError },
    #[snafu(display("Failed to create the output file: {}", path))]
    CreateOutputError { path: String, source: io::Error },
    #[snafu(display("Failed to write the tree to {}", path))]
    WriteError { path: String, source: WriterError },
    #[snafu(display("Failed to print the trace"))]
    PrintTraceError { source: io::Error },
}
