use snafu::{OptionExt, ResultExt, Snafu};

use crate::filesystem::{InvalidKindTagError, KindTag};

pub const VALID_OPTIONS: &str = "CreateDir or CreateFile or EndDir or quit";

/// A single line typed at the command prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateDirectory,
    CreateFile,
    EndDirectory,
    Print,
    Quit,
    Empty,
    Unknown(String),
}

impl From<&str> for Command {
    fn from(line: &str) -> Self {
        match line.trim() {
            "CreateDir" => Command::CreateDirectory,
            "CreateFile" => Command::CreateFile,
            "EndDir" => Command::EndDirectory,
            "print" => Command::Print,
            "quit" => Command::Quit,
            "" => Command::Empty,
            other => Command::Unknown(other.to_string()),
        }
    }
}

/// Splits a dotted file name such as `notes.txt` into its base and kind tag.
///
/// Empty segments are skipped, the first remaining segment is the base and
/// the first character of the second one is the tag. Anything after the
/// second segment is ignored.
pub fn parse_file_name(input: &str) -> Result<(&str, KindTag), FileNameError> {
    let mut segments = input.trim().split('.').filter(|s| !s.is_empty());
    let base = segments.next().context(MalformedSnafu { input })?;
    let tag = segments
        .next()
        .and_then(|extension| extension.chars().next())
        .context(MalformedSnafu { input })?;
    let kind = KindTag::try_from(tag).context(InvalidKindSnafu)?;
    Ok((base, kind))
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum FileNameError {
    #[snafu(display("'{}' is not of the form name.extension", input))]
    Malformed { input: String },
    #[snafu(display("Unrecognized file extension"))]
    InvalidKind { source: InvalidKindTagError },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("CreateDir", Command::CreateDirectory)]
    #[case("  CreateFile  ", Command::CreateFile)]
    #[case("EndDir", Command::EndDirectory)]
    #[case("print", Command::Print)]
    #[case("quit\n", Command::Quit)]
    #[case("   ", Command::Empty)]
    #[case("createdir", Command::Unknown("createdir".to_string()))]
    fn commands_parse(#[case] line: &str, #[case] expected: Command) {
        assert_eq!(Command::from(line), expected);
    }

    #[rstest]
    #[case("notes.t", "notes", KindTag::TextFile)]
    #[case("notes.txt", "notes", KindTag::TextFile)]
    #[case("job.p", "job", KindTag::ProgramFile)]
    #[case("..job..p", "job", KindTag::ProgramFile)]
    #[case("a.t.p", "a", KindTag::TextFile)]
    #[case("dir.d", "dir", KindTag::Directory)]
    fn file_names_parse(#[case] input: &str, #[case] base: &str, #[case] kind: KindTag) {
        assert_eq!(parse_file_name(input), Ok((base, kind)));
    }

    #[rstest]
    #[case("")]
    #[case("notes")]
    #[case(".t")]
    #[case("notes.")]
    fn malformed_file_names_are_rejected(#[case] input: &str) {
        assert!(matches!(
            parse_file_name(input),
            Err(FileNameError::Malformed { .. })
        ));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(matches!(
            parse_file_name("notes.x"),
            Err(FileNameError::InvalidKind { .. })
        ));
    }
}
