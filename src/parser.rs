use crate::error::TableError;
use crate::lexer::{tokenize, LocatedToken, Token};
use crate::textgrid::{Interval, Point, TextGrid, Tier, TierEntries};

/// Parser for the value stream of a TextGrid file.
///
/// Both the long ("ooTextFile") and short ("ooTextFile short") layouts carry
/// the same values in the same order once labels are dropped by the lexer:
///
/// ```text
/// file type, object class, xmin, xmax, <exists>, tier count,
///   per tier: class, name, xmin, xmax, entry count,
///     per interval: xmin, xmax, text
///     per point:    time, mark
/// ```
pub struct Parser {
    tokens: Vec<LocatedToken>,
    position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<LocatedToken>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    fn advance(&mut self) -> Option<&LocatedToken> {
        let token = self.tokens.get(self.position);
        self.position += 1;
        token
    }

    /// Line to blame when input runs out
    fn last_line(&self) -> usize {
        self.tokens.last().map(|t| t.line).unwrap_or(1)
    }

    fn next_token(&mut self, expected: &str) -> Result<(Token, usize), TableError> {
        let last_line = self.last_line();
        match self.advance() {
            Some(t) => Ok((t.token.clone(), t.line)),
            None => Err(TableError::ParseError {
                line: last_line,
                message: format!("Unexpected end of file, expected {}", expected),
            }),
        }
    }

    fn expect_number(&mut self, expected: &str) -> Result<f64, TableError> {
        match self.next_token(expected)? {
            (Token::Number(n), _) => Ok(n),
            (other, line) => Err(TableError::ParseError {
                line,
                message: format!("Expected {}, found {}", expected, other.describe()),
            }),
        }
    }

    fn expect_string(&mut self, expected: &str) -> Result<String, TableError> {
        match self.next_token(expected)? {
            (Token::Str(s), _) => Ok(s),
            (other, line) => Err(TableError::ParseError {
                line,
                message: format!("Expected {}, found {}", expected, other.describe()),
            }),
        }
    }

    fn expect_count(&mut self, expected: &str) -> Result<usize, TableError> {
        let line = self.tokens.get(self.position).map(|t| t.line).unwrap_or(self.last_line());
        let n = self.expect_number(expected)?;
        if n < 0.0 || n.fract() != 0.0 {
            return Err(TableError::ParseError {
                line,
                message: format!("Expected {} to be a whole number, found {}", expected, n),
            });
        }
        // Every counted item takes at least one more token
        let remaining = self.tokens.len().saturating_sub(self.position);
        if n > remaining as f64 {
            return Err(TableError::ParseError {
                line,
                message: format!(
                    "{} of {} exceeds the {} values left in the file",
                    expected, n, remaining
                ),
            });
        }
        Ok(n as usize)
    }

    pub fn parse_textgrid(&mut self) -> Result<TextGrid, TableError> {
        let file_type = self.expect_string("file type")?;
        if !file_type.starts_with("ooTextFile") {
            return Err(TableError::ParseError {
                line: 1,
                message: format!("Not a Praat text file (file type '{}')", file_type),
            });
        }

        let object_class = self.expect_string("object class")?;
        if object_class != "TextGrid" {
            return Err(TableError::ParseError {
                line: 1,
                message: format!("Expected object class 'TextGrid', found '{}'", object_class),
            });
        }

        let xmin = self.expect_number("xmin")?;
        let xmax = self.expect_number("xmax")?;

        let tier_count = match self.next_token("tiers flag")? {
            (Token::Flag(flag), _) if flag == "exists" => self.expect_count("tier count")?,
            (Token::Flag(flag), _) if flag == "absent" => 0,
            (other, line) => {
                return Err(TableError::ParseError {
                    line,
                    message: format!("Expected <exists> or <absent>, found {}", other.describe()),
                });
            }
        };

        let mut tiers = Vec::with_capacity(tier_count);
        for _ in 0..tier_count {
            tiers.push(self.parse_tier()?);
        }

        Ok(TextGrid { xmin, xmax, tiers })
    }

    fn parse_tier(&mut self) -> Result<Tier, TableError> {
        let (class, class_line) = match self.next_token("tier class")? {
            (Token::Str(s), line) => (s, line),
            (other, line) => {
                return Err(TableError::ParseError {
                    line,
                    message: format!("Expected tier class, found {}", other.describe()),
                });
            }
        };
        let name = self.expect_string("tier name")?;
        let xmin = self.expect_number("tier xmin")?;
        let xmax = self.expect_number("tier xmax")?;
        let count = self.expect_count("entry count")?;

        let entries = match class.as_str() {
            "IntervalTier" => {
                let mut intervals = Vec::with_capacity(count);
                for _ in 0..count {
                    let start = self.expect_number("interval xmin")?;
                    let end = self.expect_number("interval xmax")?;
                    let text = self.expect_string("interval text")?;
                    intervals.push(Interval::new(start, end, text));
                }
                TierEntries::Intervals(intervals)
            }
            "TextTier" | "PointTier" => {
                let mut points = Vec::with_capacity(count);
                for _ in 0..count {
                    let time = self.expect_number("point time")?;
                    let mark = self.expect_string("point mark")?;
                    points.push(Point::new(time, mark));
                }
                TierEntries::Points(points)
            }
            other => {
                return Err(TableError::ParseError {
                    line: class_line,
                    message: format!("Unknown tier class '{}'", other),
                });
            }
        };

        Ok(Tier {
            name,
            xmin,
            xmax,
            entries,
        })
    }
}

/// Parse TextGrid text (long or short layout).
pub fn parse(source: &str) -> Result<TextGrid, TableError> {
    let tokens = tokenize(source)?;
    Parser::new(tokens).parse_textgrid()
}
