/// Fixed two-character delimiters, checked before anything else.
const PAIR_DELIMITERS: [&str; 4] = ["{{", "}}", "&&", "||"];

/// Single characters that always stand alone as a token.
const CHAR_DELIMITERS: &str = "-+*/%(),";

/// The whitespace set of the scripting languages this syntax comes from:
/// ASCII blanks, no-break spaces, the Unicode space separators, line and
/// paragraph separators, and the byte order mark. U+0085 is not included.
pub(crate) const fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{b}'
            | '\u{c}'
            | '\r'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}

/// An unclassified slice of the source text.
///
/// Classification happens in the parser; the tokenizer only decides where one
/// token ends and the next begins.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Token<'a> {
    text: &'a str,
    /// Line of the first byte (1-indexed)
    line: usize,
    /// Byte column of the first byte (1-indexed)
    column: usize,
}

impl<'a> Token<'a> {
    pub const fn as_str(&self) -> &'a str {
        self.text
    }

    pub const fn line(&self) -> usize {
        self.line
    }

    pub const fn column(&self) -> usize {
        self.column
    }

    pub fn is_whitespace(&self) -> bool {
        self.text.starts_with(is_whitespace)
    }
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text)
    }
}

struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// The starting location of the current line
    line_start_pos: usize,
    /// Start of the run of plain text being accumulated, if any.
    text_start: Option<(usize, usize, usize)>,
    tokens: Vec<Token<'a>>,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Tokenizer {
            input,
            pos: 0,
            line: 1,
            line_start_pos: 0,
            text_start: None,
            tokens: Vec::new(),
        }
    }

    #[inline]
    fn current_column(&self) -> usize {
        self.pos - self.line_start_pos + 1
    }

    fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn rest(&self) -> &'a str {
        self.input.get(self.pos..).unwrap_or_default()
    }

    /// Advances the position by one character, tracking newlines.
    #[inline]
    fn advance_by_char(&mut self, current_char: char) {
        let char_len = current_char.len_utf8();
        if current_char == '\n' {
            self.line += 1;
            self.line_start_pos = self.pos + char_len;
        }
        self.pos += char_len;
    }

    /// Length in bytes of the delimiter starting at the current position.
    ///
    /// Alternatives are tried in a fixed order and the first one that matches
    /// wins, so `"a"` is a string delimiter but a lone `"` is plain text.
    fn delimiter_len(&self) -> Option<usize> {
        let rest = self.rest();
        if PAIR_DELIMITERS.iter().any(|pair| rest.starts_with(pair)) {
            return Some(2);
        }

        let first = rest.chars().next()?;
        if CHAR_DELIMITERS.contains(first) {
            return Some(1);
        }
        if first == '"' || first == '\'' {
            // A quoted run ends at the next identical quote; unmatched quotes are text.
            return rest
                .get(1..)
                .and_then(|inner| inner.find(first))
                .map(|end| end + 2);
        }
        if is_whitespace(first) {
            return Some(
                rest.find(|c: char| !is_whitespace(c))
                    .unwrap_or(rest.len()),
            );
        }
        None
    }

    fn push_token(&mut self, start: usize, line: usize, column: usize) {
        if let Some(text) = self.input.get(start..self.pos) {
            if !text.is_empty() {
                self.tokens.push(Token { text, line, column });
            }
        }
    }

    fn flush_text(&mut self) {
        if let Some((start, line, column)) = self.text_start.take() {
            self.push_token(start, line, column);
        }
    }

    fn run(mut self) -> Vec<Token<'a>> {
        while !self.eof() {
            if let Some(len) = self.delimiter_len() {
                self.flush_text();

                let (start, line, column) = (self.pos, self.line, self.current_column());
                let end = self.pos + len;
                while self.pos < end {
                    match self.rest().chars().next() {
                        Some(current_char) => self.advance_by_char(current_char),
                        None => break,
                    }
                }
                self.push_token(start, line, column);
                continue;
            }

            if self.text_start.is_none() {
                self.text_start = Some((self.pos, self.line, self.current_column()));
            }
            match self.rest().chars().next() {
                Some(current_char) => self.advance_by_char(current_char),
                None => break,
            }
        }
        self.flush_text();
        self.tokens
    }
}

/// Split `source` into tokens.
///
/// Delimiters are `{{`, `}}`, `&&`, `||`, each of `- + * / % ( ) ,`, quoted
/// runs (`"..."` or `'...'`, no escapes, may span lines) and maximal runs of
/// whitespace. Everything in between is kept as contiguous text. Tokenizing
/// never fails; malformed input surfaces later as a parse error.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    Tokenizer::new(source).run()
}
