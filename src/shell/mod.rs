//! Interactive front end driving the filesystem tree.

mod command;
mod shell;

pub use shell::{Shell, ShellError};
