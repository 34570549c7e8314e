//! # Sample Processing
//!
//! Turns the tiers of one annotated file into output rows.
//!
//! ## Pipeline
//! For each vowel interval, in tier order:
//! 1. Resolve the enclosing word (`word::resolve_word`)
//! 2. Split the token into symbols (`vowel::decompose`)
//! 3. Give each symbol the next formant triple (`formant::FormantAligner`)
//! 4. Build one row per symbol (`row::assemble`)
//!
//! After the last vowel the aligner must have consumed every formant point.
//! Any failure discards the whole sample; rows are never returned partially.

use std::path::Path;

use tracing::debug;

use crate::encoding::Encoding;
use crate::error::TableError;
use crate::formant::FormantAligner;
use crate::row::{assemble, Row, RowParts, Speaker};
use crate::textgrid::read_textgrid;
use crate::tiers::TierSet;
use crate::vowel::decompose;
use crate::word::resolve_word;

/// Read a TextGrid file and validate its tier layout.
pub fn load_sample(path: &Path, encoding: Encoding) -> Result<TierSet, TableError> {
    let grid = read_textgrid(path, encoding)?;
    TierSet::from_textgrid(&grid)
}

/// Build the rows for one sample.
pub fn process_sample(
    tiers: &TierSet,
    sample: &str,
    speaker: &Speaker,
) -> Result<Vec<Row>, TableError> {
    debug!(
        sample,
        words = %tiers.word.iter().map(|w| w.text.as_str()).collect::<Vec<_>>().join(" "),
        vowels = tiers.vowel.len(),
        formant_sets = tiers.f1.len(),
        "Aligning sample"
    );

    let mut aligner = FormantAligner::new(&tiers.f1, &tiers.f2, &tiers.f3);
    let mut rows = Vec::with_capacity(tiers.f1.len());
    let mut visited = 0;

    for vowel in &tiers.vowel {
        let word = resolve_word(&tiers.word, vowel);
        let decomposition = decompose(&vowel.text);
        debug!(
            vowel = %decomposition.full_text,
            start = vowel.start_time,
            word,
            kind = ?decomposition.kind(),
            "Vowel"
        );

        let is_multi_symbol = decomposition.is_multi_symbol();
        for &ipa in &decomposition.symbols {
            let formants = aligner.next_triple(sample)?;
            rows.push(assemble(
                speaker,
                RowParts {
                    sample,
                    word,
                    vowel_full_text: &decomposition.full_text,
                    ipa,
                    is_multi_symbol,
                    formants,
                    duration: vowel.duration(),
                },
            ));
        }
        visited += 1;
    }

    if visited != tiers.vowel.len() {
        return Err(TableError::ConsistencyError {
            sample: sample.to_string(),
            message: format!(
                "visited {} of {} vowel intervals",
                visited,
                tiers.vowel.len()
            ),
        });
    }
    aligner.finish(sample)?;

    Ok(rows)
}
