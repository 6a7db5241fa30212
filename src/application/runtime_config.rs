use std::path::PathBuf;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// File the serialized tree is written to.
    pub output: PathBuf,
    /// Print the offset trace once the tree is written.
    pub print_trace: bool,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            output: cli.output,
            print_trace: !cli.no_trace,
        }
    }
}
