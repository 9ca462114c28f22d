//! Line tokenizer
//!
//! Splits one line of machine code into address words (`G01`, `X-12.5`,
//! `F600`) without a pattern engine. A word is a single letter followed by an
//! optional signed decimal number; a letter glued to another letter starts an
//! opaque token instead, so `G1` is never found inside `XG1` or `G10`.
//! Semicolon comments end the code part of a line and parenthesised comments
//! are skipped.

use std::ops::Range;

/// Motion code for a cutting (linear interpolation) move
pub const CUT_MOTION: u32 = 1;
/// Motion code for a rapid traverse
pub const RAPID_TRAVERSE: u32 = 0;
/// Code for a timed dwell
pub const DWELL: u32 = 4;

/// One address word inside a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word<'a> {
    /// Address letter, uppercased
    pub letter: char,
    /// Raw numeric text following the letter (may be empty)
    pub value: &'a str,
    /// Byte range of the whole word in the source line
    pub span: Range<usize>,
    /// Byte range of `value` in the source line
    pub value_span: Range<usize>,
}

impl Word<'_> {
    /// Numeric value as a float
    pub fn number(&self) -> Option<f64> {
        if self.value.is_empty() {
            return None;
        }
        self.value.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Numeric value as an unsigned integer code (`G01` -> 1)
    pub fn code(&self) -> Option<u32> {
        if self.value.is_empty() || !self.value.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.value.parse::<u32>().ok()
    }

    /// Whether this is the `G` word with the given code
    pub fn is_g(&self, code: u32) -> bool {
        self.letter == 'G' && self.code() == Some(code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    Paren,
}

/// Tokenized view of a single line
#[derive(Debug, Clone)]
pub struct LineTokens<'a> {
    line: &'a str,
    words: Vec<Word<'a>>,
    comment_start: Option<usize>,
}

impl<'a> LineTokens<'a> {
    /// Scan a line
    pub fn scan(line: &'a str) -> Self {
        let bytes = line.as_bytes();
        let mut words = Vec::new();
        let mut comment_start = None;
        let mut state = State::Code;
        let mut i = 0;

        while i < bytes.len() {
            let b = bytes[i];
            match state {
                State::Paren => {
                    if b == b')' {
                        state = State::Code;
                    }
                    i += 1;
                }
                State::Code => {
                    if b == b';' {
                        comment_start = Some(i);
                        break;
                    } else if b == b'(' {
                        state = State::Paren;
                        i += 1;
                    } else if b.is_ascii_alphabetic() {
                        let start = i;
                        let mut letters_end = i + 1;
                        while letters_end < bytes.len() && bytes[letters_end].is_ascii_alphabetic()
                        {
                            letters_end += 1;
                        }
                        let number_end = scan_number(bytes, letters_end);

                        // A lone letter is an address; a run of letters is opaque text
                        if letters_end - start == 1 {
                            words.push(Word {
                                letter: (b as char).to_ascii_uppercase(),
                                value: &line[letters_end..number_end],
                                span: start..number_end,
                                value_span: letters_end..number_end,
                            });
                        }
                        i = number_end;
                    } else {
                        // Skip whitespace, stray digits and any non-ASCII character whole
                        i += line[i..].chars().next().map_or(1, char::len_utf8);
                    }
                }
            }
        }

        Self {
            line,
            words,
            comment_start,
        }
    }

    /// The source line
    pub fn line(&self) -> &'a str {
        self.line
    }

    /// Address words in order of appearance
    pub fn words(&self) -> &[Word<'a>] {
        &self.words
    }

    /// Code part of the line (everything before a `;` comment)
    pub fn code(&self) -> &'a str {
        match self.comment_start {
            Some(pos) => &self.line[..pos],
            None => self.line,
        }
    }

    /// First word carrying a command (skipping a leading `N` line label)
    pub fn command_word(&self) -> Option<&Word<'a>> {
        let mut iter = self.words.iter();
        match iter.next() {
            Some(w) if w.letter == 'N' => iter.next(),
            first => first,
        }
    }

    /// First word with the given address letter
    pub fn find(&self, letter: char) -> Option<&Word<'a>> {
        self.words.iter().find(|w| w.letter == letter)
    }

    /// Numeric value of the first word with the given letter
    pub fn axis(&self, letter: char) -> Option<f64> {
        self.find(letter).and_then(Word::number)
    }

    /// Whether any word is `G<code>`
    pub fn has_g(&self, code: u32) -> bool {
        self.words.iter().any(|w| w.is_g(code))
    }

    /// Whether the line contains a cut-motion command anywhere
    pub fn is_cut_move(&self) -> bool {
        self.has_g(CUT_MOTION)
    }

    /// Whether the line's command is a rapid traverse
    pub fn is_rapid(&self) -> bool {
        self.command_word().is_some_and(|w| w.is_g(RAPID_TRAVERSE))
    }

    /// Whether the line's command is a dwell
    pub fn is_dwell(&self) -> bool {
        self.command_word().is_some_and(|w| w.is_g(DWELL))
    }
}

/// Consume a signed decimal starting at `pos`, returning the end offset
fn scan_number(bytes: &[u8], pos: usize) -> usize {
    let mut end = pos;
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let digits_start = end;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }

    let has_digit = bytes[digits_start..end].iter().any(u8::is_ascii_digit);
    if has_digit {
        end
    } else {
        pos
    }
}

/// Strip a leading `N<digits>` label followed by whitespace
///
/// A label that is the whole line is left alone.
pub fn strip_line_label(line: &str) -> &str {
    let trimmed = line.trim_start();
    let bytes = trimmed.as_bytes();
    if bytes.len() < 2 || !matches!(bytes[0], b'N' | b'n') {
        return line;
    }

    let digits_end = 1 + bytes[1..].iter().take_while(|b| b.is_ascii_digit()).count();
    if digits_end == 1 {
        return line;
    }

    let rest = &trimmed[digits_end..];
    let after_ws = rest.trim_start();
    if after_ws.len() == rest.len() || after_ws.is_empty() {
        return line;
    }
    after_ws
}

/// Whether a trimmed line is nothing but an `N<digits>` label
pub fn is_label_only(line: &str) -> bool {
    let trimmed = line.trim();
    let bytes = trimmed.as_bytes();
    bytes.len() >= 2
        && matches!(bytes[0], b'N' | b'n')
        && bytes[1..].iter().all(u8::is_ascii_digit)
}

/// Whether a line holds nothing but a comment
///
/// Either a `;` comment, or parenthesised comments with no address word
/// outside them.
pub fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with(';')
        || (trimmed.starts_with('(') && LineTokens::scan(trimmed).words().is_empty())
}
