use crate::textgrid::Interval;

/// Find the word a vowel belongs to.
///
/// Scans the word tier from the end and returns the text of the latest word
/// starting at or before the vowel. Returns an empty string when no word
/// qualifies.
///
/// Relies on word intervals being ordered by start time and on every word
/// containing at least one vowel; neither is checked. A vowel lying in a gap
/// between words is attributed to the preceding word.
pub fn resolve_word<'a>(words: &'a [Interval], vowel: &Interval) -> &'a str {
    words
        .iter()
        .rev()
        .find(|word| word.start_time <= vowel.start_time)
        .map(|word| word.text.as_str())
        .unwrap_or("")
}
