use crate::classify::is_preserved_comment;
use crate::models::RemovalRecord;

/// Quote context carried across lines while scanning a file.
///
/// Only the triple-quoted states survive a line boundary on their own;
/// `Single`/`Double` survive it only when the line ends inside a backslash
/// escape (explicit string continuation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    None,
    Single,
    Double,
    TripleSingle,
    TripleDouble,
}

/// Result of stripping one file.
#[derive(Debug)]
pub struct StripResult {
    /// Cleaned source text
    pub cleaned: String,
    /// One record per removed comment, in line order
    pub removed: Vec<RemovalRecord>,
}

struct Scanner {
    state: QuoteState,
}

impl Scanner {
    fn new() -> Self {
        Scanner {
            state: QuoteState::None,
        }
    }

    /// Scan one line, updating the quote state, and return the byte offset
    /// of the first `#` that lies outside any string literal.
    ///
    /// Every delimiter this scanner matches is ASCII, so the returned
    /// offset is always a char boundary.
    fn find_comment_start(&mut self, line: &str) -> Option<usize> {
        let bytes = line.as_bytes();
        let len = bytes.len();
        let mut i = 0;
        let mut escaped_eol = false;

        while i < len {
            match self.state {
                QuoteState::None => match bytes[i] {
                    b'#' => return Some(i),
                    b'\'' if is_triple_quote(bytes, i, b'\'') => {
                        self.state = QuoteState::TripleSingle;
                        i += 3;
                    }
                    b'"' if is_triple_quote(bytes, i, b'"') => {
                        self.state = QuoteState::TripleDouble;
                        i += 3;
                    }
                    b'\'' => {
                        self.state = QuoteState::Single;
                        i += 1;
                    }
                    b'"' => {
                        self.state = QuoteState::Double;
                        i += 1;
                    }
                    _ => i += 1,
                },
                QuoteState::Single | QuoteState::Double => {
                    let quote = if self.state == QuoteState::Single {
                        b'\''
                    } else {
                        b'"'
                    };
                    if bytes[i] == b'\\' {
                        if i + 1 >= len {
                            escaped_eol = true;
                        }
                        i += 2; // skip escaped char
                    } else if bytes[i] == quote {
                        self.state = QuoteState::None;
                        i += 1;
                    } else {
                        i += 1;
                    }
                }
                QuoteState::TripleSingle | QuoteState::TripleDouble => {
                    let quote = if self.state == QuoteState::TripleSingle {
                        b'\''
                    } else {
                        b'"'
                    };
                    if bytes[i] == b'\\' {
                        i += 2; // skip escaped char
                    } else if is_triple_quote(bytes, i, quote) {
                        self.state = QuoteState::None;
                        i += 3;
                    } else {
                        i += 1;
                    }
                }
            }
        }

        // A single-quoted string cannot span lines unless the line ended in
        // a backslash continuation.
        if !escaped_eol && matches!(self.state, QuoteState::Single | QuoteState::Double) {
            self.state = QuoteState::None;
        }

        None
    }
}

fn is_triple_quote(bytes: &[u8], i: usize, quote: u8) -> bool {
    bytes.len() >= i + 3 && bytes[i] == quote && bytes[i + 1] == quote && bytes[i + 2] == quote
}

/// Strip unpreserved `#` comments from `source`.
///
/// Lines are never deleted: a line that was entirely a comment becomes an
/// empty line, so line numbers in the output match the input. Lines with no
/// live `#` pass through byte for byte; truncated lines also lose the
/// trailing whitespace the removal left behind.
pub fn strip_source(source: &str, file_path: &str) -> StripResult {
    let mut scanner = Scanner::new();
    let mut removed = Vec::new();
    let mut cleaned = String::with_capacity(source.len());

    for (idx, line) in source.split('\n').enumerate() {
        if idx > 0 {
            cleaned.push('\n');
        }

        match scanner.find_comment_start(line) {
            Some(pos) => {
                let comment = line[pos..].trim_end_matches('\r');
                if is_preserved_comment(comment) {
                    cleaned.push_str(line);
                } else {
                    removed.push(RemovalRecord {
                        file_path: file_path.to_string(),
                        line_number: idx + 1,
                        comment_text: comment.to_string(),
                    });
                    cleaned.push_str(line[..pos].trim_end());
                }
            }
            None => cleaned.push_str(line),
        }
    }

    StripResult { cleaned, removed }
}
