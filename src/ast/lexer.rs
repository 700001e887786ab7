use std::fmt;

/// The position of a token, anchored at its first byte.
///
/// `offset` is a 0-based byte index into the source; `line` and `column` are 1-based and count
/// decoded runes, so multi-byte characters advance the column by one.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

/// The kind of a [Token] produced by the [Lexer].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenKind {
    Name,
    Int,
    Float,
    String,
    Bang,
    Dollar,
    ParenL,
    ParenR,
    Colon,
    Equals,
    At,
    BracketL,
    BracketR,
    BraceL,
    BraceR,
    Pipe,
    Spread,
    Eof,
    /// Runs of insignificant runes. Never produced by [`Lexer::next`]; used internally to reset
    /// the token start after skipping.
    Ignorable,
    /// A malformed construct. Produced once, after which the lexer refuses to advance.
    Illegal,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Name => "NAME",
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::String => "STRING",
            TokenKind::Bang => "BANG",
            TokenKind::Dollar => "DOLLAR",
            TokenKind::ParenL => "PAREN_L",
            TokenKind::ParenR => "PAREN_R",
            TokenKind::Colon => "COLON",
            TokenKind::Equals => "EQUALS",
            TokenKind::At => "AT",
            TokenKind::BracketL => "BRACKET_L",
            TokenKind::BracketR => "BRACKET_R",
            TokenKind::BraceL => "BRACE_L",
            TokenKind::BraceR => "BRACE_R",
            TokenKind::Pipe => "PIPE",
            TokenKind::Spread => "SPREAD",
            TokenKind::Eof => "EOF",
            TokenKind::Ignorable => "IGNORABLE",
            TokenKind::Illegal => "ILLEGAL",
        };
        f.write_str(name)
    }
}

/// A single token scanned from the source text.
///
/// `value` is the exact source slice for the value-carrying kinds (NAME, INT, FLOAT, and STRING,
/// which keeps its surrounding quotes); it is empty for punctuators, EOF, and ILLEGAL.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub value: &'a str,
    pub pos: Position,
}

impl Default for Token<'_> {
    fn default() -> Self {
        Token {
            kind: TokenKind::Eof,
            value: "",
            pos: Position::default(),
        }
    }
}

const EOF_RUNE: char = '\0';

/// A decoded rune together with its encoded byte width.
#[derive(Debug, Clone, Copy)]
struct Rune {
    r: char,
    width: u8,
}

impl Default for Rune {
    fn default() -> Self {
        Rune {
            r: EOF_RUNE,
            width: 0,
        }
    }
}

/// A pull-based lexer over a UTF-8 source text.
///
/// The caller passes a mutable [Token] slot to [`Lexer::next`], which fills it and reports whether
/// a token was produced. EOF is produced once the input is exhausted and then on every subsequent
/// call; after an ILLEGAL token the lexer stops producing and `next` returns `false`.
///
/// Decoded runes move through a three-slot ring so that a rune can be inspected before it is
/// consumed; the token value always ends before any rune still buffered in the ring.
pub struct Lexer<'a> {
    input: &'a str,
    /// Byte offset past every decoded rune, including runes still buffered in the ring.
    pos: usize,
    /// Line and column of the next rune to be consumed, both 1-based.
    line: usize,
    column: usize,
    /// Start of the token currently being scanned.
    start: Position,
    ring: [Rune; 3],
    /// Index of the next buffered rune in `ring`, or -1 when the ring holds no lookahead.
    peek_count: i8,
    error: Option<&'static str>,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            pos: 0,
            line: 1,
            column: 1,
            start: Position::default(),
            ring: [Rune::default(); 3],
            peek_count: -1,
            error: None,
            done: false,
        }
    }

    /// Scan the next token into `slot`. Returns `false` once the lexer has failed.
    pub fn next(&mut self, slot: &mut Token<'a>) -> bool {
        if self.done {
            return false;
        }
        self.skip_insignificant(slot);
        let r = self.peek();
        if r == EOF_RUNE && self.peek_count < 0 {
            self.emit(TokenKind::Eof, slot);
            return true;
        }
        match r {
            '!' => self.punctuator(TokenKind::Bang, slot),
            '$' => self.punctuator(TokenKind::Dollar, slot),
            '(' => self.punctuator(TokenKind::ParenL, slot),
            ')' => self.punctuator(TokenKind::ParenR, slot),
            ':' => self.punctuator(TokenKind::Colon, slot),
            '=' => self.punctuator(TokenKind::Equals, slot),
            '@' => self.punctuator(TokenKind::At, slot),
            '[' => self.punctuator(TokenKind::BracketL, slot),
            ']' => self.punctuator(TokenKind::BracketR, slot),
            '{' => self.punctuator(TokenKind::BraceL, slot),
            '}' => self.punctuator(TokenKind::BraceR, slot),
            '|' => self.punctuator(TokenKind::Pipe, slot),
            '.' => {
                if self.run_spread() {
                    self.emit(TokenKind::Spread, slot);
                } else {
                    self.fail("malformed spread operator", slot);
                }
            }
            '"' => {
                if self.run_string() {
                    self.emit(TokenKind::String, slot);
                } else {
                    self.fail("unterminated string", slot);
                }
            }
            _ => {
                if !self.lex_value(slot) {
                    self.fail("unexpected character", slot);
                }
            }
        }
        true
    }

    /// The description recorded for the ILLEGAL token, if the lexer has failed.
    pub fn error_description(&self) -> Option<&'static str> {
        self.error
    }

    /// The position of the next unconsumed rune.
    pub fn position(&self) -> Position {
        Position {
            offset: self.pos - self.buffered_width(),
            line: self.line,
            column: self.column,
        }
    }

    fn punctuator(&mut self, kind: TokenKind, slot: &mut Token<'a>) {
        self.advance();
        self.emit(kind, slot);
    }

    fn fail(&mut self, desc: &'static str, slot: &mut Token<'a>) {
        if self.error.is_none() {
            self.error = Some(desc);
        }
        self.emit(TokenKind::Illegal, slot);
        self.done = true;
    }

    /// Total byte width of the runes decoded into the ring but not yet consumed.
    fn buffered_width(&self) -> usize {
        let mut width = 0;
        let mut idx = self.peek_count;
        while idx >= 0 {
            width += self.ring[idx as usize].width as usize;
            idx -= 1;
        }
        width
    }

    /// Fill `slot` with the token spanning from the recorded start to the current position,
    /// excluding any runes still buffered in the ring. IGNORABLE only resets the token start.
    fn emit(&mut self, kind: TokenKind, slot: &mut Token<'a>) {
        let end = self.pos - self.buffered_width();
        if kind != TokenKind::Ignorable {
            slot.kind = kind;
            slot.value = match kind {
                TokenKind::Name | TokenKind::Int | TokenKind::Float | TokenKind::String => {
                    &self.input[self.start.offset..end]
                }
                _ => "",
            };
            slot.pos = self.start;
        }
        self.start = Position {
            offset: end,
            line: self.line,
            column: self.column,
        };
    }

    /// Returns the next unconsumed rune without consuming it, decoding from the input when the
    /// ring holds no lookahead. EOF neither decodes nor buffers anything.
    fn peek(&mut self) -> char {
        if self.peek_count >= 0 {
            return self.ring[self.peek_count as usize].r;
        }
        if self.pos >= self.input.len() {
            return EOF_RUNE;
        }
        let r = match self.input[self.pos..].chars().next() {
            Some(r) => r,
            None => return EOF_RUNE,
        };
        let width = r.len_utf8() as u8;
        self.ring[2] = self.ring[1];
        self.ring[1] = self.ring[0];
        self.ring[0] = Rune { r, width };
        self.peek_count = 0;
        self.pos += width as usize;
        r
    }

    fn advance(&mut self) {
        match self.peek() {
            '\n' => {
                self.line += 1;
                self.column = 1;
            }
            EOF_RUNE if self.peek_count < 0 => return,
            _ => self.column += 1,
        }
        if self.peek_count >= 0 {
            self.peek_count -= 1;
        }
    }

    fn next_rune(&mut self) -> char {
        let r = self.peek();
        self.advance();
        r
    }

    fn at_eof(&mut self) -> bool {
        self.peek() == EOF_RUNE && self.peek_count < 0
    }

    fn skip_insignificant(&mut self, slot: &mut Token<'a>) {
        loop {
            match self.peek() {
                '\t' | ' ' | '\n' | '\r' | ',' => self.advance(),
                _ => break,
            }
        }
        self.emit(TokenKind::Ignorable, slot);
    }

    /// `...`; the leading dot has been peeked, not consumed.
    fn run_spread(&mut self) -> bool {
        for _ in 0..3 {
            if self.next_rune() != '.' {
                return false;
            }
        }
        true
    }

    fn lex_value(&mut self, slot: &mut Token<'a>) -> bool {
        let r = self.peek();
        if r.is_ascii_digit() || r == '-' || r == '+' {
            return self.lex_number(slot);
        }
        if self.run_name() {
            self.emit(TokenKind::Name, slot);
            true
        } else {
            false
        }
    }

    /// Optional sign, digits, optional fraction, optional exponent with a required sign.
    fn lex_number(&mut self, slot: &mut Token<'a>) -> bool {
        if matches!(self.peek(), '-' | '+') {
            self.advance();
        }
        if !self.run_digits() {
            self.error = Some("malformed number");
            return false;
        }
        let mut kind = TokenKind::Int;
        if self.peek() == '.' {
            self.advance();
            if !self.run_digits() {
                self.error = Some("malformed number");
                return false;
            }
            kind = TokenKind::Float;
        }
        if matches!(self.peek(), 'e' | 'E') {
            kind = TokenKind::Float;
            self.advance();
            if !matches!(self.next_rune(), '-' | '+') {
                self.error = Some("malformed number");
                return false;
            }
            if !self.run_digits() {
                self.error = Some("malformed number");
                return false;
            }
        }
        self.emit(kind, slot);
        true
    }

    fn run_digits(&mut self) -> bool {
        if !self.next_rune().is_ascii_digit() {
            return false;
        }
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        true
    }

    /// `[_A-Za-z][_0-9A-Za-z]*`
    fn run_name(&mut self) -> bool {
        if !matches!(self.next_rune(), '_' | 'A'..='Z' | 'a'..='z') {
            return false;
        }
        loop {
            match self.peek() {
                '_' | '0'..='9' | 'A'..='Z' | 'a'..='z' => self.advance(),
                _ => return true,
            }
        }
    }

    fn run_string(&mut self) -> bool {
        if self.next_rune() != '"' {
            return false;
        }
        loop {
            if self.at_eof() {
                self.error = Some("unterminated string");
                return false;
            }
            match self.peek() {
                '"' => break,
                '\\' => {
                    if !self.run_escape_sequence() {
                        return false;
                    }
                }
                '\n' | '\r' => {
                    self.error = Some("raw newline in string");
                    return false;
                }
                _ => self.advance(),
            }
        }
        self.advance();
        true
    }

    /// One of `\" \\ \/ \b \f \n \r \t` or `\uXXXX` with four case-insensitive hex digits.
    fn run_escape_sequence(&mut self) -> bool {
        self.advance();
        match self.peek() {
            'u' => {
                self.advance();
                for _ in 0..4 {
                    if !self.next_rune().is_ascii_hexdigit() {
                        self.error = Some("bad escape sequence");
                        return false;
                    }
                }
                true
            }
            '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't' => {
                self.advance();
                true
            }
            _ => {
                self.error = Some("bad escape sequence");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(source: &str) -> Vec<Token<'_>> {
        let mut lexer = Lexer::new(source);
        let mut out = Vec::new();
        let mut tok = Token::default();
        while lexer.next(&mut tok) {
            let done = matches!(tok.kind, TokenKind::Eof | TokenKind::Illegal);
            out.push(tok.clone());
            if done {
                break;
            }
        }
        out
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        collect(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn punctuators() {
        assert_eq!(
            kinds("! $ ( ) : = @ [ ] { } |"),
            vec![
                TokenKind::Bang,
                TokenKind::Dollar,
                TokenKind::ParenL,
                TokenKind::ParenR,
                TokenKind::Colon,
                TokenKind::Equals,
                TokenKind::At,
                TokenKind::BracketL,
                TokenKind::BracketR,
                TokenKind::BraceL,
                TokenKind::BraceR,
                TokenKind::Pipe,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn names() {
        let tokens = collect("hello _World x1,y2");
        assert_eq!(tokens[0].kind, TokenKind::Name);
        assert_eq!(tokens[0].value, "hello");
        assert_eq!(tokens[1].value, "_World");
        assert_eq!(tokens[2].value, "x1");
        assert_eq!(tokens[3].value, "y2");
        assert_eq!(tokens[4].kind, TokenKind::Eof);
    }

    #[test]
    fn spread() {
        assert_eq!(kinds("..."), vec![TokenKind::Spread, TokenKind::Eof]);
        assert_eq!(kinds(".."), vec![TokenKind::Illegal]);
    }

    #[test]
    fn numbers() {
        let tokens = collect("0 123 -42 +7 1.5 -123.142 123e+142 1.5E-3");
        let got: Vec<(TokenKind, &str)> = tokens.iter().map(|t| (t.kind, t.value)).collect();
        assert_eq!(
            got,
            vec![
                (TokenKind::Int, "0"),
                (TokenKind::Int, "123"),
                (TokenKind::Int, "-42"),
                (TokenKind::Int, "+7"),
                (TokenKind::Float, "1.5"),
                (TokenKind::Float, "-123.142"),
                (TokenKind::Float, "123e+142"),
                (TokenKind::Float, "1.5E-3"),
                (TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn exponent_requires_sign() {
        assert_eq!(kinds("1e10"), vec![TokenKind::Illegal]);
    }

    #[test]
    fn sign_requires_digits() {
        assert_eq!(kinds("+a"), vec![TokenKind::Illegal]);
    }

    #[test]
    fn strings() {
        let tokens = collect(r#""hello world" "" "a\"b" "xéy" "esc\n\t""#);
        assert_eq!(tokens[0].value, r#""hello world""#);
        assert_eq!(tokens[1].value, r#""""#);
        assert_eq!(tokens[2].value, r#""a\"b""#);
        assert_eq!(tokens[3].value, r#""xéy""#);
        assert_eq!(tokens[4].value, r#""esc\n\t""#);
        assert!(tokens.iter().take(5).all(|t| t.kind == TokenKind::String));
    }

    #[test]
    fn bad_strings() {
        assert_eq!(kinds("\"open"), vec![TokenKind::Illegal]);
        assert_eq!(kinds("\"a\nb\""), vec![TokenKind::Illegal]);
        assert_eq!(kinds(r#""\q""#), vec![TokenKind::Illegal]);
        assert_eq!(kinds(r#""\u12g4""#), vec![TokenKind::Illegal]);
    }

    #[test]
    fn error_descriptions() {
        let mut lexer = Lexer::new("\"open");
        let mut tok = Token::default();
        assert!(lexer.next(&mut tok));
        assert_eq!(tok.kind, TokenKind::Illegal);
        assert_eq!(lexer.error_description(), Some("unterminated string"));
        // terminal: no further tokens after ILLEGAL
        assert!(!lexer.next(&mut tok));
    }

    #[test]
    fn eof_repeats() {
        let mut lexer = Lexer::new("  ,\n");
        let mut tok = Token::default();
        for _ in 0..3 {
            assert!(lexer.next(&mut tok));
            assert_eq!(tok.kind, TokenKind::Eof);
        }
    }

    #[test]
    fn positions_are_one_based_and_anchored() {
        let tokens = collect("query {\n  hero\n}");
        assert_eq!(tokens[0].pos, Position { offset: 0, line: 1, column: 1 });
        assert_eq!(tokens[1].pos, Position { offset: 6, line: 1, column: 7 });
        assert_eq!(tokens[2].pos, Position { offset: 10, line: 2, column: 3 });
        assert_eq!(tokens[3].pos, Position { offset: 15, line: 3, column: 1 });
    }

    #[test]
    fn positions_are_monotonic() {
        let tokens = collect("query Q($v: Int) { a(x: 1.5, y: \"z\") @d { b } }");
        for pair in tokens.windows(2) {
            if pair[1].kind == TokenKind::Eof {
                continue;
            }
            assert!(pair[0].pos.offset < pair[1].pos.offset);
            assert!(
                pair[0].pos.line < pair[1].pos.line
                    || (pair[0].pos.line == pair[1].pos.line
                        && pair[0].pos.column < pair[1].pos.column)
            );
        }
    }

    #[test]
    fn tokens_cover_all_significant_bytes() {
        let source = "query Q {\n  hero(ep: JEDI, height: 1.72) {\n    name\n  }\n}";
        let is_ignorable = |c: char| matches!(c, '\t' | ' ' | '\n' | '\r' | ',');
        let tokens = collect(source);
        let mut cursor = 0;
        for tok in &tokens {
            if tok.kind == TokenKind::Eof {
                break;
            }
            // everything between two tokens is an ignored run
            assert!(source[cursor..tok.pos.offset].chars().all(is_ignorable));
            let width = match tok.kind {
                TokenKind::Spread => 3,
                _ if tok.value.is_empty() => 1,
                _ => tok.value.len(),
            };
            if !tok.value.is_empty() {
                assert_eq!(&source[tok.pos.offset..tok.pos.offset + width], tok.value);
            }
            cursor = tok.pos.offset + width;
        }
        assert!(source[cursor..].chars().all(is_ignorable));
    }

    #[test]
    fn multibyte_runes_advance_one_column() {
        let tokens = collect("\"héllo\" name");
        assert_eq!(tokens[0].value, "\"héllo\"");
        // 7 runes for the string token, one space
        assert_eq!(tokens[1].pos.line, 1);
        assert_eq!(tokens[1].pos.column, 9);
    }
}
