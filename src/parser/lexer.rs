//! Lexer (tokenizer) for MiniJava source code
//!
//! Converts raw source bytes into a flat [`Token`] stream consumed by the parser.
//! Input is treated as ASCII; every byte outside it is an unrecognized character.
//! The lexer never fails: unknown characters and malformed operators become
//! [`TokenKind::Error`] tokens in-band, and scanning carries on past them.
//! The stream always ends with exactly one [`TokenKind::Eof`] token.

use super::ast::SourceLocation;
use rustc_hash::FxHashMap;
use std::fmt;
use thiserror::Error;

/// Characters after which a `-` directly followed by a digit is folded into
/// the integer literal instead of being lexed as a binary minus.
const NEGATIVE_LITERAL_TRIGGERS: &[u8] = b"(=<>+-*/%!&|, \t\n\r";

/// Lexical problems reported in-band as error tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum LexErrorKind {
    #[error("unrecognized character {}", describe_byte(.0))]
    UnexpectedCharacter(u8),
    #[error("expected '&' after '&'")]
    LoneAmpersand,
    #[error("expected '|' after '|'")]
    LonePipe,
}

fn describe_byte(byte: &u8) -> String {
    if byte.is_ascii_graphic() {
        format!("'{}'", *byte as char)
    } else {
        format!("0x{:02X}", byte)
    }
}

/// All token categories produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Class,
    Public,
    Static,
    Void,
    Main,
    Extends,
    Return,
    If,
    Else,
    While,
    New,
    This,
    Assert,
    Int,
    Boolean,
    True,
    False,
    System,
    Out,
    Println,
    Length,

    // Literals and names
    IntegerLiteral,
    Identifier,

    // Operators
    AndAnd,  // &&
    OrOr,    // ||
    Lt,      // <
    Gt,      // >
    EqEq,    // ==
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %
    Bang,    // !
    Eq,      // =
    NotEq,   // !=
    Le,      // <=
    Ge,      // >=

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]
    Semicolon, // ;
    Comma,     // ,
    Dot,       // .

    Eof,
    Error(LexErrorKind),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Class => write!(f, "'class'"),
            TokenKind::Public => write!(f, "'public'"),
            TokenKind::Static => write!(f, "'static'"),
            TokenKind::Void => write!(f, "'void'"),
            TokenKind::Main => write!(f, "'main'"),
            TokenKind::Extends => write!(f, "'extends'"),
            TokenKind::Return => write!(f, "'return'"),
            TokenKind::If => write!(f, "'if'"),
            TokenKind::Else => write!(f, "'else'"),
            TokenKind::While => write!(f, "'while'"),
            TokenKind::New => write!(f, "'new'"),
            TokenKind::This => write!(f, "'this'"),
            TokenKind::Assert => write!(f, "'assert'"),
            TokenKind::Int => write!(f, "'int'"),
            TokenKind::Boolean => write!(f, "'boolean'"),
            TokenKind::True => write!(f, "'true'"),
            TokenKind::False => write!(f, "'false'"),
            TokenKind::System => write!(f, "'System'"),
            TokenKind::Out => write!(f, "'out'"),
            TokenKind::Println => write!(f, "'println'"),
            TokenKind::Length => write!(f, "'length'"),
            TokenKind::IntegerLiteral => write!(f, "integer literal"),
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::AndAnd => write!(f, "'&&'"),
            TokenKind::OrOr => write!(f, "'||'"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::EqEq => write!(f, "'=='"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Percent => write!(f, "'%'"),
            TokenKind::Bang => write!(f, "'!'"),
            TokenKind::Eq => write!(f, "'='"),
            TokenKind::NotEq => write!(f, "'!='"),
            TokenKind::Le => write!(f, "'<='"),
            TokenKind::Ge => write!(f, "'>='"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Dot => write!(f, "'.'"),
            TokenKind::Eof => write!(f, "end of file"),
            TokenKind::Error(err) => write!(f, "invalid token ({})", err),
        }
    }
}

/// A single lexeme with its category and the position where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn column(&self) -> usize {
        self.location.column
    }

    /// The lexical error carried by this token, if it is an error token.
    pub fn lex_error(&self) -> Option<LexErrorKind> {
        match self.kind {
            TokenKind::Error(err) => Some(err),
            _ => None,
        }
    }

    /// User-facing report for an error token, `None` for any other token.
    pub fn lex_error_message(&self) -> Option<String> {
        self.lex_error().map(|err| {
            format!(
                "Lexical error at line {}, column {}: {}",
                self.line(),
                self.column(),
                err
            )
        })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::IntegerLiteral => write!(f, "integer literal {}", self.lexeme),
            kind => write!(f, "{}", kind),
        }
    }
}

fn keyword_table() -> FxHashMap<&'static str, TokenKind> {
    let mut keywords = FxHashMap::default();
    keywords.insert("class", TokenKind::Class);
    keywords.insert("public", TokenKind::Public);
    keywords.insert("static", TokenKind::Static);
    keywords.insert("void", TokenKind::Void);
    keywords.insert("main", TokenKind::Main);
    keywords.insert("extends", TokenKind::Extends);
    keywords.insert("return", TokenKind::Return);
    keywords.insert("if", TokenKind::If);
    keywords.insert("else", TokenKind::Else);
    keywords.insert("while", TokenKind::While);
    keywords.insert("new", TokenKind::New);
    keywords.insert("this", TokenKind::This);
    keywords.insert("assert", TokenKind::Assert);
    keywords.insert("int", TokenKind::Int);
    keywords.insert("boolean", TokenKind::Boolean);
    keywords.insert("true", TokenKind::True);
    keywords.insert("false", TokenKind::False);
    keywords.insert("System", TokenKind::System);
    keywords.insert("out", TokenKind::Out);
    keywords.insert("println", TokenKind::Println);
    keywords.insert("length", TokenKind::Length);
    keywords
}

/// Tokenize `source` in one go. Accepts text or raw bytes.
pub fn tokenize(source: impl AsRef<[u8]>) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

/// All error tokens in a token stream, in source order.
pub fn lexical_errors(tokens: &[Token]) -> Vec<&Token> {
    tokens.iter().filter(|t| t.lex_error().is_some()).collect()
}

/// Lexer for MiniJava source code
pub struct Lexer {
    input: Vec<u8>,
    position: usize,
    line: usize,
    column: usize,
    keywords: FxHashMap<&'static str, TokenKind>,
}

impl Lexer {
    /// Create a new lexer over the given source bytes.
    pub fn new(input: impl AsRef<[u8]>) -> Self {
        Self {
            input: input.as_ref().to_vec(),
            position: 0,
            line: 1,
            column: 1,
            keywords: keyword_table(),
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments();

            if self.is_at_end() {
                tokens.push(Token::new(TokenKind::Eof, "", self.current_location()));
                break;
            }

            tokens.push(self.next_token());
        }

        tokens
    }

    /// Get next token. Only called when input remains.
    fn next_token(&mut self) -> Token {
        let loc = self.current_location();
        let start = self.position;

        if self.peek() == Some(b'-') && self.folds_negative_literal() {
            self.advance(); // '-'
            self.consume_digits();
            return self.token_from(TokenKind::IntegerLiteral, start, loc);
        }

        let Some(ch) = self.advance() else {
            return Token::new(TokenKind::Eof, "", loc);
        };

        let kind = match ch {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == b'_') {
                    self.advance();
                }
                let text = self.text_from(start);
                let kind = self
                    .keywords
                    .get(text.as_str())
                    .copied()
                    .unwrap_or(TokenKind::Identifier);
                return Token::new(kind, text, loc);
            }
            b'0'..=b'9' => {
                self.consume_digits();
                TokenKind::IntegerLiteral
            }

            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b'.' => TokenKind::Dot,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,

            b'!' => self.either(b'=', TokenKind::NotEq, TokenKind::Bang),
            b'=' => self.either(b'=', TokenKind::EqEq, TokenKind::Eq),
            b'<' => self.either(b'=', TokenKind::Le, TokenKind::Lt),
            b'>' => self.either(b'=', TokenKind::Ge, TokenKind::Gt),
            b'&' => self.either(
                b'&',
                TokenKind::AndAnd,
                TokenKind::Error(LexErrorKind::LoneAmpersand),
            ),
            b'|' => self.either(
                b'|',
                TokenKind::OrOr,
                TokenKind::Error(LexErrorKind::LonePipe),
            ),

            other => TokenKind::Error(LexErrorKind::UnexpectedCharacter(other)),
        };

        self.token_from(kind, start, loc)
    }

    /// Consume `second` if it is next and return `doubled`, else `single`.
    fn either(&mut self, second: u8, doubled: TokenKind, single: TokenKind) -> TokenKind {
        if self.peek() == Some(second) {
            self.advance();
            doubled
        } else {
            single
        }
    }

    /// A `-` starts a negative literal when a digit follows and the minus
    /// cannot be a binary operator at this position.
    fn folds_negative_literal(&self) -> bool {
        if !self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) {
            return false;
        }

        match self.position.checked_sub(1) {
            None => true,
            Some(prev) => NEGATIVE_LITERAL_TRIGGERS.contains(&self.input[prev]),
        }
    }

    fn consume_digits(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Source text since `start`. Only error tokens can hold non-ASCII bytes.
    fn text_from(&self, start: usize) -> String {
        String::from_utf8_lossy(&self.input[start..self.position]).into_owned()
    }

    fn token_from(&self, kind: TokenKind, start: usize, loc: SourceLocation) -> Token {
        Token::new(kind, self.text_from(start), loc)
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r' | b'\n') => {
                    self.advance();
                }
                Some(b'/') => {
                    if self.peek_ahead(1) == Some(b'/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some(b'*') {
                        self.skip_block_comment();
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
    }

    /// Skip single-line comment (// ...), leaving the newline in place
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == b'\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skip a nested block comment (/* ... /* ... */ ... */).
    ///
    /// An unterminated comment silently runs to end of input.
    fn skip_block_comment(&mut self) {
        self.advance(); // skip '/'
        self.advance(); // skip '*'
        let mut depth = 1usize;

        while depth > 0 && !self.is_at_end() {
            if self.peek() == Some(b'/') && self.peek_ahead(1) == Some(b'*') {
                self.advance();
                self.advance();
                depth += 1;
            } else if self.peek() == Some(b'*') && self.peek_ahead(1) == Some(b'/') {
                self.advance();
                self.advance();
                depth -= 1;
            } else {
                self.advance();
            }
        }
    }

    /// Peek at current byte without consuming
    fn peek(&self) -> Option<u8> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n bytes
    fn peek_ahead(&self, n: usize) -> Option<u8> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next byte
    fn advance(&mut self) -> Option<u8> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_class_header() {
        let tokens = tokenize("class TestClass {\n  public static void main() {");

        assert_eq!(tokens[0].kind, TokenKind::Class);
        assert_eq!(tokens[0].lexeme, "class");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].lexeme, "TestClass");
        assert_eq!(tokens[2].kind, TokenKind::LBrace);
        assert_eq!(tokens[3].kind, TokenKind::Public);
        assert_eq!(tokens[3].location, SourceLocation::new(2, 3));
        assert_eq!(tokens[5].kind, TokenKind::Void);
        assert_eq!(tokens[6].kind, TokenKind::Main);
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(
            kinds("System system Class length"),
            vec![
                TokenKind::System,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Length,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("&& || == != <= >= < > = !"),
            vec![
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Eq,
                TokenKind::Bang,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_negative_literal_at_start_of_input() {
        let tokens = tokenize("-123");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::IntegerLiteral);
        assert_eq!(tokens[0].lexeme, "-123");
        assert_eq!(tokens[0].column(), 1);
    }

    #[test]
    fn test_negative_literal_after_assignment() {
        let tokens = tokenize("int x = -123;");
        assert!(tokens
            .iter()
            .any(|t| t.kind == TokenKind::IntegerLiteral && t.lexeme == "-123"));
    }

    #[test]
    fn test_minus_after_identifier_is_binary() {
        let tokens = tokenize("x-1");
        assert_eq!(tokens[1].kind, TokenKind::Minus);
        assert_eq!(tokens[2].lexeme, "1");
    }

    #[test]
    fn test_minus_followed_by_space_is_binary() {
        let tokens = tokenize("x - 123");
        assert_eq!(tokens[1].kind, TokenKind::Minus);
        assert_eq!(tokens[2].kind, TokenKind::IntegerLiteral);
        assert_eq!(tokens[2].lexeme, "123");
    }

    #[test]
    fn test_nested_block_comment() {
        let tokens = tokenize("/* a /* b */ c */x");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].lexeme, "x");
        assert_eq!(tokens[0].column(), 18);
    }

    #[test]
    fn test_unterminated_block_comment() {
        assert_eq!(kinds("x /* /* never closed */"), vec![TokenKind::Identifier, TokenKind::Eof]);
    }

    #[test]
    fn test_line_comment() {
        let tokens = tokenize("a // comment\nb");
        assert_eq!(tokens[0].lexeme, "a");
        assert_eq!(tokens[1].lexeme, "b");
        assert_eq!(tokens[1].location, SourceLocation::new(2, 1));
    }

    #[test]
    fn test_error_tokens_do_not_stop_scanning() {
        let tokens = tokenize("a & b # c | d");
        let errors = lexical_errors(&tokens);

        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].lex_error(), Some(LexErrorKind::LoneAmpersand));
        assert_eq!(
            errors[1].lex_error(),
            Some(LexErrorKind::UnexpectedCharacter(b'#'))
        );
        assert_eq!(errors[1].column(), 7);
        assert_eq!(errors[2].lex_error(), Some(LexErrorKind::LonePipe));
        assert_eq!(tokens.last().map(|t| t.lexeme.as_str()), Some(""));
        assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Identifier).count(), 4);
    }

    #[test]
    fn test_non_ascii_bytes_are_errors() {
        let tokens = tokenize("x é y");
        let errors = lexical_errors(&tokens);

        // 'é' is two bytes in UTF-8
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].lex_error(), Some(LexErrorKind::UnexpectedCharacter(0xC3)));
        assert_eq!(errors[1].lex_error(), Some(LexErrorKind::UnexpectedCharacter(0xA9)));
        assert_eq!(errors[1].column(), 4);

        let y = &tokens[tokens.len() - 2];
        assert_eq!(y.lexeme, "y");
        assert_eq!(y.column(), 6);
    }

    #[test]
    fn test_invalid_utf8_is_tokenized() {
        let tokens = tokenize(b"int \xE9x;");

        assert_eq!(tokens[0].kind, TokenKind::Int);
        assert_eq!(tokens[1].lex_error(), Some(LexErrorKind::UnexpectedCharacter(0xE9)));
        assert_eq!(tokens[1].lexeme, "\u{FFFD}");
        assert_eq!(tokens[2].lexeme, "x");
        assert_eq!(tokens[2].column(), 6);
    }

    #[test]
    fn test_lex_error_message() {
        let tokens = tokenize(b"a\n  \xC2\xB5 #");
        let messages: Vec<String> = tokens.iter().filter_map(Token::lex_error_message).collect();

        assert_eq!(
            messages,
            vec![
                "Lexical error at line 2, column 3: unrecognized character 0xC2",
                "Lexical error at line 2, column 4: unrecognized character 0xB5",
                "Lexical error at line 2, column 6: unrecognized character '#'",
            ]
        );
        assert_eq!(tokens[0].lex_error_message(), None);
    }
}
