use crate::error::TableError;

/// Value tokens of the Praat text format.
///
/// Labels such as `xmin =` or `intervals: size =`, bracketed indices like
/// `[3]`, and `!` comments carry no data and never become tokens. This is what
/// lets the long and the short file layouts share one parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Str(String),      // "text", with "" as an escaped quote
    Number(f64),      // 0.25, -1, 3e-2
    Flag(String),     // <exists>, <absent>
}

impl Token {
    pub fn describe(&self) -> String {
        match self {
            Token::Str(s) => format!("string \"{}\"", s),
            Token::Number(n) => format!("number {}", n),
            Token::Flag(f) => format!("flag <{}>", f),
        }
    }
}

/// A token with the line it starts on
#[derive(Debug, Clone)]
pub struct LocatedToken {
    pub token: Token,
    pub line: usize,
}

/// Lexer for TextGrid text
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    pub fn tokenize(&mut self) -> Result<Vec<LocatedToken>, TableError> {
        let mut tokens = Vec::new();

        while let Some(&c) = self.peek() {
            let line = self.line;

            match c {
                _ if c.is_whitespace() => {
                    self.advance();
                }
                '"' => {
                    self.advance();
                    let text = self.read_string(line)?;
                    tokens.push(LocatedToken { token: Token::Str(text), line });
                }
                '<' => {
                    self.advance();
                    let flag = self.read_flag(line)?;
                    tokens.push(LocatedToken { token: Token::Flag(flag), line });
                }
                '[' => self.skip_until(']'),
                '!' => self.skip_until('\n'),
                _ if starts_number(c) => {
                    let word = self.read_word();
                    match word.parse::<f64>() {
                        Ok(n) => tokens.push(LocatedToken { token: Token::Number(n), line }),
                        Err(_) if c.is_ascii_digit() => {
                            return Err(TableError::ParseError {
                                line,
                                message: format!("Malformed number '{}'", word),
                            });
                        }
                        // A lone sign or dot is punctuation, not a value
                        Err(_) => {}
                    }
                }
                '=' => {
                    self.advance();
                }
                _ => self.skip_label(),
            }
        }

        Ok(tokens)
    }

    fn read_string(&mut self, start_line: usize) -> Result<String, TableError> {
        let mut text = String::new();
        loop {
            match self.advance() {
                Some('"') => {
                    if let Some(&'"') = self.peek() {
                        self.advance();
                        text.push('"');
                    } else {
                        return Ok(text);
                    }
                }
                Some(c) => text.push(c),
                None => {
                    return Err(TableError::ParseError {
                        line: start_line,
                        message: "Unterminated string".to_string(),
                    });
                }
            }
        }
    }

    fn read_flag(&mut self, start_line: usize) -> Result<String, TableError> {
        let mut flag = String::new();
        loop {
            match self.advance() {
                Some('>') => return Ok(flag),
                Some(c) if c == '\n' || c == '"' => break,
                Some(c) => flag.push(c),
                None => break,
            }
        }
        Err(TableError::ParseError {
            line: start_line,
            message: format!("Unterminated flag '<{}'", flag),
        })
    }

    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(&c) = self.peek() {
            if c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E') {
                word.push(c);
                self.advance();
            } else {
                break;
            }
        }
        word
    }

    fn skip_label(&mut self) {
        while let Some(&c) = self.peek() {
            if c.is_whitespace() || matches!(c, '"' | '<' | '[' | '!' | '=') {
                break;
            }
            self.advance();
        }
    }

    fn skip_until(&mut self, end: char) {
        while let Some(c) = self.advance() {
            if c == end {
                break;
            }
        }
    }
}

fn starts_number(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '.')
}

/// Tokenize TextGrid text into value tokens
pub fn tokenize(input: &str) -> Result<Vec<LocatedToken>, TableError> {
    Lexer::new(input).tokenize()
}
