//! Extraction of normalised words from text.
//!
//! A line is split on every run of characters that are neither ASCII
//! letters nor apostrophes. Each piece is lower-cased and stripped of its
//! apostrophes; empty pieces are dropped.
//!
//! Lines end at `\n`, `\r` or `\r\n`. Bytes that are not valid UTF-8 are
//! replaced, so they separate words like any other punctuation.

use std::io::{self, BufRead, ErrorKind};

use crate::base::LineNumber;

/// A normalised word and the (1-based) line where it was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub word: String,
    pub line: LineNumber,
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '\''
}

/// Normalised words of a single line
pub fn words(line: &str) -> impl Iterator<Item = String> + '_ {
    line.split(|c: char| !is_word_char(c))
        .map(|piece| {
            piece
                .chars()
                .filter(|c| *c != '\'')
                .map(|c| c.to_ascii_lowercase())
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
}

/// Iterates over the tokens of a reader, line by line
pub struct Tokens<R> {
    reader: R,
    line: LineNumber,
    buffer: Vec<u8>,
    /// A `\r` ended the previous line, so a leading `\n` is skipped
    after_cr: bool,
    pending: std::vec::IntoIter<String>,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buffer: Vec::new(),
            after_cr: false,
            pending: Vec::new().into_iter(),
        }
    }

    /// Reads the next line (without its terminator) into the buffer,
    /// returns false at the end of the input
    fn read_line(&mut self) -> io::Result<bool> {
        self.buffer.clear();
        let mut terminated = false;
        while !terminated {
            let (used, ended) = {
                let available = match self.reader.fill_buf() {
                    Ok(available) => available,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                };
                if available.is_empty() {
                    return Ok(!self.buffer.is_empty());
                }
                if self.after_cr {
                    self.after_cr = false;
                    if available[0] == b'\n' {
                        (1, false)
                    } else {
                        (0, false)
                    }
                } else {
                    match available.iter().position(|b| *b == b'\n' || *b == b'\r') {
                        Some(ix) => {
                            self.buffer.extend_from_slice(&available[..ix]);
                            self.after_cr = available[ix] == b'\r';
                            (ix + 1, true)
                        }
                        None => {
                            self.buffer.extend_from_slice(available);
                            (available.len(), false)
                        }
                    }
                }
            };
            self.reader.consume(used);
            terminated = ended;
        }
        Ok(true)
    }
}

impl<R: BufRead> Iterator for Tokens<R> {
    type Item = io::Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(word) = self.pending.next() {
                return Some(Ok(Token {
                    word,
                    line: self.line,
                }));
            }

            match self.read_line() {
                Ok(true) => {
                    self.line += 1;
                    let text = String::from_utf8_lossy(&self.buffer);
                    self.pending = words(&text).collect::<Vec<_>>().into_iter();
                }
                Ok(false) => return None,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
