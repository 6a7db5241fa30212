use std::fmt;

use derive_more::Display;
use snafu::Snafu;

/// Number of bytes reserved for the base of a name.
pub const BASE_LEN: usize = 8;
/// Total width of a serialized name.
pub const NAME_LEN: usize = 11;

const SEPARATOR: u8 = b'.';
const PADDING: u8 = b'\0';

/// Single-character extension stored inside every name, selecting the node variant.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindTag {
    #[display("d")]
    Directory,
    #[display("t")]
    TextFile,
    #[display("p")]
    ProgramFile,
}

impl KindTag {
    pub fn as_byte(self) -> u8 {
        match self {
            KindTag::Directory => b'd',
            KindTag::TextFile => b't',
            KindTag::ProgramFile => b'p',
        }
    }
}

impl TryFrom<char> for KindTag {
    type Error = InvalidKindTagError;

    fn try_from(tag: char) -> Result<Self, Self::Error> {
        match tag {
            'd' => Ok(KindTag::Directory),
            't' => Ok(KindTag::TextFile),
            'p' => Ok(KindTag::ProgramFile),
            _ => InvalidKindTagSnafu { tag }.fail(),
        }
    }
}

/// Fixed 11-byte node identifier: `base[0..8] | '.' | tag | '\0'`.
///
/// The base is null padded. Bases longer than [`BASE_LEN`] bytes are cut
/// down to their first [`BASE_LEN`] bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Name {
    bytes: [u8; NAME_LEN],
    kind: KindTag,
}

impl Name {
    pub fn new(base: &str, kind: KindTag) -> Result<Self, NameError> {
        if let Some(character) = base.chars().find(|c| !is_printable(*c)) {
            return NonPrintableBaseSnafu {
                base: base.to_string(),
                character,
            }
            .fail();
        }

        // Printable ASCII only, so slicing on bytes never splits a character.
        let base = &base.as_bytes()[..base.len().min(BASE_LEN)];

        let mut bytes = [PADDING; NAME_LEN];
        bytes[..base.len()].copy_from_slice(base);
        bytes[BASE_LEN] = SEPARATOR;
        bytes[BASE_LEN + 1] = kind.as_byte();
        Ok(Self { bytes, kind })
    }

    pub const fn root() -> Self {
        Self {
            bytes: *b"root\0\0\0\0.d\0",
            kind: KindTag::Directory,
        }
    }

    pub fn as_bytes(&self) -> &[u8; NAME_LEN] {
        &self.bytes
    }

    /// The base without its null padding.
    pub fn base(&self) -> &str {
        let end = self.bytes[..BASE_LEN]
            .iter()
            .position(|b| *b == PADDING)
            .unwrap_or(BASE_LEN);
        // Only printable ASCII is ever stored in the base.
        std::str::from_utf8(&self.bytes[..end]).unwrap_or_default()
    }

    pub fn kind(&self) -> KindTag {
        self.kind
    }
}

fn is_printable(c: char) -> bool {
    c.is_ascii_graphic() || c == ' '
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.base(), self.kind())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Name").field(&self.to_string()).finish()
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(display("'{}' is not a known file kind, expected one of d, t, p", tag))]
pub struct InvalidKindTagError {
    tag: char,
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum NameError {
    #[snafu(display("Name '{}' contains the non printable character {:?}", base, character))]
    NonPrintableBase { base: String, character: char },
}
