/// Characters that separate tokens on a line.
pub const DELIMS: &[u8] = b" \n\t\r\x07\x08";

/// A script line after tokenizing.
#[derive(Debug, Eq, PartialEq)]
pub enum Line<'a> {
    /// Empty, or delimiters only.
    Blank,
    /// First token starts with `#`.
    Comment,
    /// An opcode and whatever tokens followed it.
    Instruction {
        opcode: &'a str,
        operands: Vec<&'a str>,
    },
}

impl<'a> Line<'a> {
    /// Tokenize and classify one line.
    pub fn parse(line: &'a str) -> Self {
        let mut lexer = Lexer::new(line);
        match lexer.next_token() {
            None => Line::Blank,
            Some(first) if first.starts_with('#') => Line::Comment,
            Some(opcode) => Line::Instruction {
                opcode,
                operands: lexer.collect(),
            },
        }
    }
}

pub struct Lexer<'a> {
    line: &'a str,
    cursor: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(line: &'a str) -> Self {
        Lexer { line, cursor: 0 }
    }

    /// Next run of non-delimiter bytes, or `None` once only delimiters are
    /// left on the line.
    pub fn next_token(&mut self) -> Option<&'a str> {
        self.trim();

        let start_pos = self.cursor;
        while let Some(ch) = self.next_char(false) {
            if is_delim(ch) {
                self.cursor -= 1;
                break;
            }
        }

        if start_pos == self.cursor {
            None
        } else {
            // Delimiters are ASCII, so both ends sit on char boundaries
            Some(&self.line[start_pos..self.cursor])
        }
    }

    /// Skip delimiters
    fn trim(&mut self) {
        while let Some(ch) = self.next_char(true) {
            if !is_delim(ch) {
                break;
            }
            self.cursor += 1;
        }
    }

    /// Byte under the cursor; `peek` leaves the cursor where it is
    fn next_char(&mut self, peek: bool) -> Option<u8> {
        let ch = *self.line.as_bytes().get(self.cursor)?;
        if !peek {
            self.cursor += 1;
        }
        Some(ch)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.next_token()
    }
}

fn is_delim(ch: u8) -> bool {
    DELIMS.contains(&ch)
}
