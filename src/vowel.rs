//! # Vowel Decomposition
//!
//! Splits a vowel-tier token into the IPA symbols it is made of.
//!
//! One character is a monophthong, two a diphthong, three a triphthong; longer
//! tokens are split the same way. Each symbol later receives its own formant
//! measurement and its own output row.
//!
//! ## Known Limitation
//! Splitting works on Unicode scalar values (`char`), not grapheme clusters.
//! A symbol written with combining marks, such as `ẽ` as `e` + U+0303, becomes
//! two symbols and consumes two formant points. Annotators must use
//! precomposed characters where one exists.

const ZERO_WIDTH_SPACE: char = '\u{200b}';
const LENGTH_MARK: char = 'ː';

/// Characters ignored at either end of a token.
fn is_insignificant(c: char) -> bool {
    c.is_whitespace() || c == ZERO_WIDTH_SPACE || c == LENGTH_MARK
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VowelKind {
    /// Stripped token is empty; no rows are produced
    Empty,
    Monophthong,
    Diphthong,
    Triphthong,
    /// More than three symbols
    Polyphthong(usize),
}

/// A vowel token split into its symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition {
    /// The token with insignificant characters stripped from both ends
    pub full_text: String,
    pub symbols: Vec<char>,
}

impl Decomposition {
    pub fn kind(&self) -> VowelKind {
        match self.symbols.len() {
            0 => VowelKind::Empty,
            1 => VowelKind::Monophthong,
            2 => VowelKind::Diphthong,
            3 => VowelKind::Triphthong,
            n => VowelKind::Polyphthong(n),
        }
    }

    pub fn is_multi_symbol(&self) -> bool {
        self.symbols.len() > 1
    }
}

/// Strip a raw vowel token and split it into symbols.
pub fn decompose(raw_text: &str) -> Decomposition {
    let full_text = raw_text.trim_matches(is_insignificant).to_string();
    let symbols = full_text.chars().collect();
    Decomposition { full_text, symbols }
}
