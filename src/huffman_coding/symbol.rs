use std::fmt::{self, Display, Formatter};

/// Header code of the end-of-stream symbol. Byte symbols use their own value.
pub const PSEUDO_EOF_CODE: u16 = 256;

/// One symbol of the coding alphabet: a byte, or the end-of-stream marker that follows the
/// last byte of every encoded stream. The marker sorts after every byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Byte(u8),
    PseudoEof,
}

impl Symbol {
    /// Numeric code used in the frequency header.
    pub fn code(self) -> u16 {
        match self {
            Symbol::Byte(b) => b as u16,
            Symbol::PseudoEof => PSEUDO_EOF_CODE,
        }
    }

    /// Inverse of [`Symbol::code`]. Returns None for codes above 256.
    pub fn from_code(code: u16) -> Option<Symbol> {
        match code {
            0..=255 => Some(Symbol::Byte(code as u8)),
            PSEUDO_EOF_CODE => Some(Symbol::PseudoEof),
            _ => None,
        }
    }
}

impl From<u8> for Symbol {
    fn from(b: u8) -> Self {
        Symbol::Byte(b)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Byte(b) if b.is_ascii_graphic() => write!(f, "'{}'", *b as char),
            Symbol::Byte(b) => write!(f, "0x{:02x}", b),
            Symbol::PseudoEof => write!(f, "EOF"),
        }
    }
}
