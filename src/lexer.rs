use crate::error::Span;
use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    LeftParen,
    RightParen,
    Minus,
    Plus,
    Slash,
    Star,

    /// A run of ASCII digits. A sign is attached by the parser, not here.
    Digits,

    /// Any character outside the language, reported by the parser.
    Unknown,

    Eof,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: String, span: Span) -> Self {
        Self {
            token_type,
            lexeme,
            span,
        }
    }

    pub fn is_operator(&self) -> bool {
        matches!(
            self.token_type,
            TokenType::Plus | TokenType::Minus | TokenType::Star | TokenType::Slash
        )
    }
}

pub struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            start: 0,
            current: 0,
        }
    }

    /// Scanning cannot fail: unrecognised characters become `Unknown` tokens.
    pub fn scan_tokens(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        self.tokens.push(Token::new(
            TokenType::Eof,
            String::new(),
            Span::single(self.current),
        ));

        trace!("scanned {} tokens", self.tokens.len());
        self.tokens
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn scan_token(&mut self) {
        let c = self.advance();

        match c {
            '(' => self.add_token(TokenType::LeftParen),
            ')' => self.add_token(TokenType::RightParen),
            '-' => self.add_token(TokenType::Minus),
            '+' => self.add_token(TokenType::Plus),
            '*' => self.add_token(TokenType::Star),
            '/' => self.add_token(TokenType::Slash),
            ' ' | '\r' | '\t' | '\n' => {}
            c if c.is_ascii_digit() => self.digits(),
            _ => self.add_token(TokenType::Unknown),
        }
    }

    fn advance(&mut self) -> char {
        match self.source[self.current..].chars().next() {
            Some(c) => {
                self.current += c.len_utf8();
                c
            }
            None => '\0',
        }
    }

    fn peek(&self) -> char {
        self.source[self.current..].chars().next().unwrap_or('\0')
    }

    fn digits(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        self.add_token(TokenType::Digits);
    }

    fn add_token(&mut self, token_type: TokenType) {
        let text = &self.source[self.start..self.current];
        self.tokens.push(Token::new(
            token_type,
            text.to_string(),
            Span::new(self.start, self.current),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(source: &str) -> Vec<TokenType> {
        Lexer::new(source)
            .scan_tokens()
            .into_iter()
            .map(|t| t.token_type)
            .collect()
    }

    #[test]
    fn scans_expression() {
        assert_eq!(
            types("(* 2 (+ 3 4))"),
            vec![
                TokenType::LeftParen,
                TokenType::Star,
                TokenType::Digits,
                TokenType::LeftParen,
                TokenType::Plus,
                TokenType::Digits,
                TokenType::Digits,
                TokenType::RightParen,
                TokenType::RightParen,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn sign_is_a_separate_token() {
        let tokens = Lexer::new("-42").scan_tokens();
        assert_eq!(tokens[0].token_type, TokenType::Minus);
        assert_eq!(tokens[1].token_type, TokenType::Digits);
        assert_eq!(tokens[1].lexeme, "42");
        assert_eq!(tokens[0].span.end, tokens[1].span.start);
    }

    #[test]
    fn unknown_characters_are_kept() {
        let tokens = Lexer::new("(^ 2 2)").scan_tokens();
        assert_eq!(tokens[1].token_type, TokenType::Unknown);
        assert_eq!(tokens[1].lexeme, "^");
        assert_eq!(tokens[1].span, Span::new(1, 2));
    }

    #[test]
    fn multibyte_unknown_spans_whole_char() {
        let tokens = Lexer::new("λ").scan_tokens();
        assert_eq!(tokens[0].token_type, TokenType::Unknown);
        assert_eq!(tokens[0].span, Span::new(0, 2));
        assert_eq!(tokens[1].span, Span::single(2));
    }

    #[test]
    fn empty_input_is_just_eof() {
        assert_eq!(types("  \t "), vec![TokenType::Eof]);
    }
}
