use crate::error::TableError;
use crate::textgrid::Point;

/// One F1/F2/F3 measurement, as written on the point tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormantTriple<'a> {
    pub f1: &'a str,
    pub f2: &'a str,
    pub f3: &'a str,
}

/// Hands out formant points in tier order, one triple per vowel symbol.
///
/// Pairing is purely positional: the n-th symbol of the file gets the n-th
/// point of each formant tier, whatever their times. A wrong symbol count
/// upstream shifts every later pairing, and only [`FormantAligner::finish`]
/// notices.
pub struct FormantAligner<'a> {
    f1: &'a [Point],
    f2: &'a [Point],
    f3: &'a [Point],
    cursor: usize,
}

impl<'a> FormantAligner<'a> {
    pub fn new(f1: &'a [Point], f2: &'a [Point], f3: &'a [Point]) -> Self {
        Self { f1, f2, f3, cursor: 0 }
    }

    /// Number of triples handed out so far.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Take the next triple, failing if any formant tier has run out.
    pub fn next_triple(&mut self, sample: &str) -> Result<FormantTriple<'a>, TableError> {
        let i = self.cursor;
        match (self.f1.get(i), self.f2.get(i), self.f3.get(i)) {
            (Some(f1), Some(f2), Some(f3)) => {
                self.cursor += 1;
                Ok(FormantTriple {
                    f1: &f1.text,
                    f2: &f2.text,
                    f3: &f3.text,
                })
            }
            _ => Err(TableError::ConsistencyError {
                sample: sample.to_string(),
                message: format!(
                    "vowel symbol {} has no formant point (F1: {}, F2: {}, F3: {} points)",
                    i + 1,
                    self.f1.len(),
                    self.f2.len(),
                    self.f3.len()
                ),
            }),
        }
    }

    /// Check that every formant point was consumed. Returns the symbol count.
    pub fn finish(self, sample: &str) -> Result<usize, TableError> {
        let (n1, n2, n3) = (self.f1.len(), self.f2.len(), self.f3.len());
        if n1 != n2 || n1 != n3 {
            return Err(TableError::ConsistencyError {
                sample: sample.to_string(),
                message: format!(
                    "formant tiers differ in length (F1: {}, F2: {}, F3: {})",
                    n1, n2, n3
                ),
            });
        }
        let consumed = self.position();
        if consumed != n1 {
            return Err(TableError::ConsistencyError {
                sample: sample.to_string(),
                message: format!(
                    "formant count ({}) does not match vowel symbol count ({})",
                    n1, consumed
                ),
            });
        }
        Ok(consumed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(values: &[&str]) -> Vec<Point> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Point::new(i as f64 * 0.1, *v))
            .collect()
    }

    #[test]
    fn test_sequential_pairing() {
        let (f1, f2, f3) = (points(&["1", "2"]), points(&["10", "20"]), points(&["100", "200"]));
        let mut aligner = FormantAligner::new(&f1, &f2, &f3);
        assert_eq!(
            aligner.next_triple("s").unwrap(),
            FormantTriple { f1: "1", f2: "10", f3: "100" }
        );
        assert_eq!(
            aligner.next_triple("s").unwrap(),
            FormantTriple { f1: "2", f2: "20", f3: "200" }
        );
        assert_eq!(aligner.position(), 2);
        assert_eq!(aligner.finish("s").unwrap(), 2);
    }

    #[test]
    fn test_pairing_ignores_point_times() {
        let f1 = vec![Point::new(9.0, "late"), Point::new(0.1, "early")];
        let mut aligner = FormantAligner::new(&f1, &f1, &f1);
        assert_eq!(aligner.next_triple("s").unwrap().f1, "late");
    }

    #[test]
    fn test_running_out_is_consistency_error() {
        let f = points(&["1"]);
        let mut aligner = FormantAligner::new(&f, &f, &f);
        aligner.next_triple("s").unwrap();
        let err = aligner.next_triple("s").unwrap_err();
        assert!(err.is_consistency());
        assert_eq!(aligner.position(), 1);
    }

    #[test]
    fn test_leftover_points_fail_finish() {
        let f = points(&["1", "2"]);
        let mut aligner = FormantAligner::new(&f, &f, &f);
        aligner.next_triple("s").unwrap();
        let err = aligner.finish("s").unwrap_err();
        assert!(err.is_consistency());
        assert!(err.to_string().contains("formant count (2) does not match vowel symbol count (1)"));
    }

    #[test]
    fn test_unequal_formant_tiers_fail_finish() {
        let (f1, f2) = (points(&["1"]), points(&["1", "2"]));
        let mut aligner = FormantAligner::new(&f1, &f2, &f1);
        aligner.next_triple("s").unwrap();
        assert!(aligner.finish("s").unwrap_err().is_consistency());
    }

    #[test]
    fn test_short_middle_tier_fails_early() {
        let (f1, f2) = (points(&["1", "2"]), points(&["1"]));
        let mut aligner = FormantAligner::new(&f1, &f2, &f1);
        aligner.next_triple("s").unwrap();
        assert!(aligner.next_triple("s").is_err());
    }
}
