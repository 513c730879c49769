use std::fmt::{Display, Formatter};

/// Location of a token in the WKT input.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    /// Byte offset from the start of the input.
    pub offset: usize,
    /// Line number, starting from 1.
    pub line: usize,
    /// Column in characters, starting from 1.
    pub column: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// Keyword, dimension tag or number. Which one is decided by the parser.
    Atom,
    LeftParen,
    RightParen,
    Comma,
    Eof,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub position: Position,
}

impl Token<'_> {
    /// Text of the token as shown in error messages.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("'{}'", self.text),
        }
    }

    pub fn is_atom(&self, value: &str) -> bool {
        self.kind == TokenKind::Atom && self.text.eq_ignore_ascii_case(value)
    }
}

fn finish_atom<'a>(
    input: &'a str,
    tokens: &mut Vec<Token<'a>>,
    start: &mut Option<Position>,
    end: usize,
) {
    if let Some(position) = start.take() {
        tokens.push(Token {
            kind: TokenKind::Atom,
            text: &input[position.offset..end],
            position,
        });
    }
}

/// Splits the input into tokens. The last token is always [`TokenKind::Eof`].
pub(crate) fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = vec![];
    let mut line = 1;
    let mut column = 1;
    let mut atom_start: Option<Position> = None;

    for (offset, c) in input.char_indices() {
        let position = Position {
            offset,
            line,
            column,
        };

        let punctuation = match c {
            '(' => Some(TokenKind::LeftParen),
            ')' => Some(TokenKind::RightParen),
            ',' => Some(TokenKind::Comma),
            _ => None,
        };

        if let Some(kind) = punctuation {
            finish_atom(input, &mut tokens, &mut atom_start, offset);
            tokens.push(Token {
                kind,
                text: &input[offset..offset + 1],
                position,
            });
        } else if c.is_whitespace() {
            finish_atom(input, &mut tokens, &mut atom_start, offset);
        } else if atom_start.is_none() {
            atom_start = Some(position);
        }

        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }

    finish_atom(input, &mut tokens, &mut atom_start, input.len());
    tokens.push(Token {
        kind: TokenKind::Eof,
        text: "",
        position: Position {
            offset: input.len(),
            line,
            column,
        },
    });

    tokens
}
