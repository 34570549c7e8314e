use crate::formant::FormantTriple;

/// Column names of the output table, in order.
pub const HEADER: [&str; 10] = [
    "Sample", "Speaker", "Gender", "Word", "Vowel", "IPA", "F1(Hz)", "F2(Hz)", "F3(Hz)", "Duration",
];

/// Speaker identity stamped on every row of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Speaker {
    pub id: String,
    pub gender: String,
}

/// One output row: a single IPA symbol with its formants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub sample: String,
    pub speaker: String,
    pub gender: String,
    pub word: String,
    /// Whole stripped token for diphthongs and longer, else the symbol itself
    pub vowel: String,
    pub ipa: String,
    pub f1: String,
    pub f2: String,
    pub f3: String,
    /// Fixed-point seconds, six decimals
    pub duration: String,
}

impl Row {
    /// Field values in [`HEADER`] order.
    pub fn fields(&self) -> [&str; 10] {
        [
            self.sample.as_str(),
            self.speaker.as_str(),
            self.gender.as_str(),
            self.word.as_str(),
            self.vowel.as_str(),
            self.ipa.as_str(),
            self.f1.as_str(),
            self.f2.as_str(),
            self.f3.as_str(),
            self.duration.as_str(),
        ]
    }
}

/// Everything needed to build the row for one symbol.
pub struct RowParts<'a> {
    pub sample: &'a str,
    pub word: &'a str,
    pub vowel_full_text: &'a str,
    pub ipa: char,
    pub is_multi_symbol: bool,
    pub formants: FormantTriple<'a>,
    pub duration: f64,
}

pub fn assemble(speaker: &Speaker, parts: RowParts<'_>) -> Row {
    let ipa = parts.ipa.to_string();
    let vowel = if parts.is_multi_symbol {
        parts.vowel_full_text.to_string()
    } else {
        ipa.clone()
    };

    Row {
        sample: parts.sample.to_string(),
        speaker: speaker.id.clone(),
        gender: speaker.gender.clone(),
        word: parts.word.to_string(),
        vowel,
        ipa,
        f1: parts.formants.f1.to_string(),
        f2: parts.formants.f2.to_string(),
        f3: parts.formants.f3.to_string(),
        duration: format_duration(parts.duration),
    }
}

pub fn format_duration(seconds: f64) -> String {
    format!("{:.6}", seconds)
}
