//! Line based input with one line of lookahead.
//!
//! Line oriented text formats (like ASCII STL) are parsed line by line: each
//! line is split into whitespace separated tokens and grammar rules look at
//! the first token(s) to decide what to do. To decide whether a repeated
//! construct continues, a rule needs to look at the next line without
//! consuming it. That's what [`Input::peek_line`] is for; the line is
//! buffered until it is consumed by [`Input::next_line`].

use std::io::{self, BufRead};

use failure::Fail;


/// Placeholder used in error messages when a line has fewer tokens than
/// expected.
pub const END_OF_LINE: &str = "end of line";


#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "IO error: {}", _0)]
    Io(io::Error),

    /// The input ended while the grammar still expected a line.
    #[fail(display = "unexpected end of input after line {}", line)]
    UnexpectedEndOfInput {
        line: usize,
    },

    /// A line did not start with the keyword(s) required at this position.
    #[fail(display = "parse error on line {}: expected {:?}, found {:?}", line, expected, found)]
    UnexpectedToken {
        line: usize,
        expected: String,
        found: String,
    },

    /// A numeric field could not be parsed as float.
    #[fail(display = "parse error on line {}: invalid number {:?}", line, text)]
    InvalidNumber {
        line: usize,
        text: String,
    },

    /// A polygon did not have the number of vertices the format requires.
    #[fail(
        display = "parse error on line {}: expected {} vertices, found {}",
        line, expected, found
    )]
    InvalidVertexCount {
        line: usize,
        expected: usize,
        found: usize,
    },
}

impl Error {
    /// Returns the 1-based line number this error refers to. `None` for IO
    /// errors.
    pub fn line(&self) -> Option<usize> {
        match *self {
            Error::Io(_) => None,
            Error::UnexpectedEndOfInput { line }
            | Error::UnexpectedToken { line, .. }
            | Error::InvalidNumber { line, .. }
            | Error::InvalidVertexCount { line, .. } => Some(line),
        }
    }
}

impl From<io::Error> for Error {
    fn from(src: io::Error) -> Self {
        Error::Io(src)
    }
}


// ===========================================================================
// ===== Line
// ===========================================================================

/// One non-empty line of input, split into whitespace separated tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    no: usize,
    tokens: Vec<String>,
}

impl Line {
    /// Tokenizes `text`. Returns `None` if the line only contains whitespace.
    pub fn new(no: usize, text: &str) -> Option<Self> {
        let tokens = text.split_whitespace().map(String::from).collect::<Vec<_>>();
        if tokens.is_empty() {
            None
        } else {
            Some(Self { no, tokens })
        }
    }

    /// The 1-based line number in the source.
    pub fn no(&self) -> usize {
        self.no
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The first token. Lines are never empty, so this always exists.
    pub fn first(&self) -> &str {
        &self.tokens[0]
    }

    /// Returns the token at `idx` or [`END_OF_LINE`] if the line is shorter.
    pub fn token_or_eol(&self, idx: usize) -> &str {
        self.tokens.get(idx).map(|s| s.as_str()).unwrap_or(END_OF_LINE)
    }

    /// All tokens joined by a single space.
    pub fn joined(&self) -> String {
        self.tokens.join(" ")
    }

    /// Creates an `UnexpectedToken` error for this line.
    pub fn unexpected(&self, expected: impl Into<String>, found: impl Into<String>) -> Error {
        Error::UnexpectedToken {
            line: self.no,
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Requires the token at `idx` to be `keyword`.
    pub fn expect_token(&self, idx: usize, keyword: &str) -> Result<(), Error> {
        let found = self.token_or_eol(idx);
        if found != keyword {
            return Err(self.unexpected(keyword, found));
        }

        Ok(())
    }

    /// Parses the token at `idx` as float.
    pub fn float(&self, idx: usize) -> Result<f64, Error> {
        let text = self.tokens.get(idx).ok_or_else(|| self.unexpected("number", END_OF_LINE))?;
        text.parse::<f64>().map_err(|_| Error::InvalidNumber {
            line: self.no,
            text: text.clone(),
        })
    }

    /// Parses the tokens starting at `idx` as three floats. The line has to
    /// end after those three tokens.
    pub fn vec3(&self, idx: usize) -> Result<[f64; 3], Error> {
        let out = [self.float(idx)?, self.float(idx + 1)?, self.float(idx + 2)?];
        if let Some(surplus) = self.tokens.get(idx + 3) {
            return Err(self.unexpected(END_OF_LINE, surplus.as_str()));
        }

        Ok(out)
    }
}


// ===========================================================================
// ===== Input
// ===========================================================================

/// A source of tokenized lines with one line of lookahead.
///
/// Lines that only consist of whitespace are skipped and never returned by
/// either method.
pub trait Input {
    /// Returns the next line without consuming it. Calling this method
    /// multiple times without calling `next_line` returns the same line.
    fn peek_line(&mut self) -> Result<&Line, Error>;

    /// Consumes and returns the next line.
    fn next_line(&mut self) -> Result<Line, Error>;

    /// The number of the line consumed last (0 if nothing was consumed).
    fn line_no(&self) -> usize;

    /// Checks whether the first token of the next line is `keyword` without
    /// consuming the line.
    fn is_next(&mut self, keyword: &str) -> Result<bool, Error> {
        Ok(self.peek_line()?.first() == keyword)
    }

    /// Consumes the next line and requires its first token to be `keyword`.
    fn expect_keyword(&mut self, keyword: &str) -> Result<Line, Error> {
        let line = self.next_line()?;
        line.expect_token(0, keyword)?;
        Ok(line)
    }

    /// Consumes the next line and requires it to consist of exactly the
    /// given keywords (e.g. `["outer", "loop"]`).
    fn expect_keywords(&mut self, keywords: &[&str]) -> Result<Line, Error> {
        let line = self.next_line()?;
        if line.tokens() != keywords {
            return Err(line.unexpected(keywords.join(" "), line.joined()));
        }

        Ok(line)
    }
}

/// An [`Input`] reading from a `BufRead`.
#[derive(Debug)]
pub struct LineBuffer<R: BufRead> {
    reader: R,
    buf: String,

    /// The lookahead slot. Filled by `peek_line`, emptied by `next_line`.
    peeked: Option<Line>,

    /// Number of physical lines read from `reader` so far (including blank
    /// lines and the line in `peeked`).
    lines_read: usize,
    line_no: usize,
}

impl<R: BufRead> LineBuffer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            peeked: None,
            lines_read: 0,
            line_no: 0,
        }
    }

    /// Reads lines from the underlying reader until one with at least one
    /// token is found.
    fn read_non_blank(&mut self) -> Result<Line, Error> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Err(Error::UnexpectedEndOfInput { line: self.lines_read });
            }
            self.lines_read += 1;

            if let Some(line) = Line::new(self.lines_read, &self.buf) {
                return Ok(line);
            }
        }
    }
}

impl<R: BufRead> Input for LineBuffer<R> {
    fn peek_line(&mut self) -> Result<&Line, Error> {
        let line = match self.peeked.take() {
            Some(line) => line,
            None => self.read_non_blank()?,
        };

        Ok(self.peeked.get_or_insert(line))
    }

    fn next_line(&mut self) -> Result<Line, Error> {
        let line = match self.peeked.take() {
            Some(line) => line,
            None => self.read_non_blank()?,
        };
        self.line_no = line.no();

        Ok(line)
    }

    fn line_no(&self) -> usize {
        self.line_no
    }
}
