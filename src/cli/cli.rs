use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

/// Build a filesystem tree interactively and write it out as a binary image.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// File the binary image is written to
    pub output: PathBuf,
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Do not print the byte offset listing after writing
    #[clap(long)]
    pub no_trace: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::RuntimeConfig;

    #[test]
    fn parses_defaults() {
        let cli = Cli::try_parse_from(["rufs", "out.bin"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("out.bin"));
        assert_eq!(cli.log_level, LogLevel::Warn);
        assert!(!cli.no_trace);

        let config = RuntimeConfig::from(cli);
        assert!(config.print_trace);
    }

    #[test]
    fn parses_flags() {
        let cli =
            Cli::try_parse_from(["rufs", "image.rufs", "--log-level", "silent", "--no-trace"])
                .unwrap();
        assert_eq!(cli.log_level, LogLevel::Silent);
        assert!(!RuntimeConfig::from(cli).print_trace);
    }

    #[test]
    fn output_is_required() {
        assert!(Cli::try_parse_from(["rufs"]).is_err());
    }
}
