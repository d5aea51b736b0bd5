use crate::ast::{Node, Tag};
use crate::error::{Expected, ParseError, Span};
use crate::lexer::{Lexer, Token, TokenType};
use log::debug;

// Grammar
// number   : /-?[0-9]+/ ;
// operator : '+' | '-' | '*' | '/' ;
// expr     : <number> | '(' <operator> <expr>+ ')' ;
// program  : /^/ <operator> <expr>+ /$/
//          | /^/ '(' <operator> <expr>+ ')' /$/ ;

/// Parse one line of input into a syntax tree rooted at a `Program` node.
pub fn parse(source: &str) -> Result<Node, ParseError> {
    let tokens = Lexer::new(source).scan_tokens();
    let program = Parser::new(tokens).parse()?;
    debug!(
        "parsed {:?} into {} nodes",
        source,
        crate::ast::count_nodes(&program)
    );
    Ok(program)
}

/// Deepest parenthesis nesting accepted, counting a top-level '('.
/// Parsing and evaluation recurse once per level.
pub const MAX_NESTING: usize = 256;

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            current: 0,
            depth: 0,
        }
    }

    pub fn parse(&mut self) -> Result<Node, ParseError> {
        let mut children = Vec::new();

        if self.check(TokenType::LeftParen) {
            // Fully parenthesised line: the '(' stands in for the start anchor.
            self.depth = 1;
            children.push(self.punctuation());
            children.push(self.operator(&[Expected::Operator])?);
            children.extend(self.operands(Expected::CloseParen)?);
            children.push(self.close_paren()?);
        } else {
            children.push(Node::leaf(Tag::Anchor, "", Span::new(0, 0)));
            children.push(self.operator(&[Expected::Operator, Expected::OpenParen])?);
            children.extend(self.operands(Expected::EndOfInput)?);
        }

        children.push(self.end_of_input()?);
        Ok(Node::branch(Tag::Program, children))
    }

    fn expr(&mut self) -> Result<Node, ParseError> {
        if self.check(TokenType::LeftParen) {
            if self.depth >= MAX_NESTING {
                // Only a number may appear at the deepest level.
                let help = format!(
                    "expressions may be nested at most {} levels deep",
                    MAX_NESTING
                );
                return Err(self.error_here(vec![Expected::Number]).with_help(help));
            }

            self.depth += 1;
            let open = self.punctuation();
            let operator = self.operator(&[Expected::Operator])?;

            let mut children = vec![open, operator];
            children.extend(self.operands(Expected::CloseParen)?);
            children.push(self.close_paren()?);
            self.depth -= 1;
            Ok(Node::branch(Tag::Expr, children))
        } else if self.at_number() {
            Ok(self.number())
        } else {
            Err(self.error_here(vec![Expected::Number, Expected::OpenParen]))
        }
    }

    /// One or more expressions, stopping at whatever `terminator` the caller expects next.
    fn operands(&mut self, terminator: Expected) -> Result<Vec<Node>, ParseError> {
        let mut operands = vec![self.expr()?];

        while self.at_expr_start() {
            operands.push(self.expr()?);
        }

        let terminated = match terminator {
            Expected::CloseParen => self.check(TokenType::RightParen),
            _ => self.check(TokenType::Eof),
        };
        if !terminated {
            return Err(self.error_here(vec![Expected::Number, Expected::OpenParen, terminator]));
        }

        Ok(operands)
    }

    fn operator(&mut self, expected: &[Expected]) -> Result<Node, ParseError> {
        if self.peek().is_operator() {
            let token = self.advance();
            return Ok(Node::leaf(Tag::Operator, token.lexeme.clone(), token.span));
        }

        let error = self.error_here(expected.to_vec());
        if self.check(TokenType::Unknown) {
            let help = format!(
                "'{}' is not an operator; the supported operators are +, -, * and /",
                self.peek().lexeme
            );
            Err(error.with_help(help))
        } else {
            Err(error)
        }
    }

    fn number(&mut self) -> Node {
        if self.check(TokenType::Minus) {
            let sign = self.advance().span;
            let digits = self.advance();
            return Node::leaf(
                Tag::Number,
                format!("-{}", digits.lexeme),
                sign.to(digits.span),
            );
        }
        let digits = self.advance();
        Node::leaf(Tag::Number, digits.lexeme.clone(), digits.span)
    }

    fn punctuation(&mut self) -> Node {
        let token = self.advance();
        Node::leaf(Tag::Char, token.lexeme.clone(), token.span)
    }

    fn close_paren(&mut self) -> Result<Node, ParseError> {
        if self.check(TokenType::RightParen) {
            Ok(self.punctuation())
        } else {
            Err(self.error_here(vec![Expected::CloseParen]))
        }
    }

    fn end_of_input(&mut self) -> Result<Node, ParseError> {
        if self.check(TokenType::Eof) {
            let span = self.peek().span;
            Ok(Node::leaf(Tag::Anchor, "", Span::new(span.start, span.start)))
        } else {
            Err(self
                .error_here(vec![Expected::EndOfInput])
                .with_help("only one top-level expression is allowed per line".to_string()))
        }
    }

    fn at_expr_start(&self) -> bool {
        self.check(TokenType::LeftParen) || self.at_number()
    }

    /// Digits, or a '-' written directly against digits.
    fn at_number(&self) -> bool {
        match self.peek().token_type {
            TokenType::Digits => true,
            TokenType::Minus => self
                .tokens
                .get(self.current + 1)
                .map(|next| {
                    next.token_type == TokenType::Digits && next.span.start == self.peek().span.end
                })
                .unwrap_or(false),
            _ => false,
        }
    }

    fn error_here(&self, expected: Vec<Expected>) -> ParseError {
        let token = self.peek();
        let found = match token.token_type {
            TokenType::Eof => None,
            _ => Some(token.lexeme.clone()),
        };
        let error = ParseError::new(token.span, expected, found);

        let next = self.tokens.get(self.current + 1).map(|t| t.token_type);
        if token.token_type == TokenType::Minus && next == Some(TokenType::Digits) {
            error.with_help("negative numbers are written without a space, e.g. -5".to_string())
        } else {
            error
        }
    }

    fn check(&self, token_type: TokenType) -> bool {
        self.peek().token_type == token_type
    }

    fn advance(&mut self) -> &Token {
        if !self.check(TokenType::Eof) {
            self.current += 1;
        }
        self.previous()
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::count_nodes;

    fn tags(node: &Node) -> Vec<Tag> {
        node.children.iter().map(|c| c.tag).collect()
    }

    #[test]
    fn bare_program_shape() {
        let tree = parse("+ 1 (* 2 3)").unwrap();
        assert_eq!(tree.tag, Tag::Program);
        assert_eq!(
            tags(&tree),
            vec![Tag::Anchor, Tag::Operator, Tag::Number, Tag::Expr, Tag::Anchor]
        );
        assert_eq!(tree.children[1].contents, "+");
    }

    #[test]
    fn parenthesised_program_keeps_operator_second() {
        let tree = parse("(+ 2 2)").unwrap();
        assert_eq!(
            tags(&tree),
            vec![
                Tag::Char,
                Tag::Operator,
                Tag::Number,
                Tag::Number,
                Tag::Char,
                Tag::Anchor
            ]
        );
        assert_eq!(tree.children[0].contents, "(");
        assert_eq!(tree.operands().count(), 2);
    }

    #[test]
    fn nested_expr_shape() {
        let tree = parse("(* 2 (+ 3 4))").unwrap();
        let inner = &tree.children[3];
        assert_eq!(inner.tag, Tag::Expr);
        assert_eq!(
            tags(inner),
            vec![Tag::Char, Tag::Operator, Tag::Number, Tag::Number, Tag::Char]
        );
        assert_eq!(count_nodes(&tree), 12);
    }

    #[test]
    fn minus_against_digits_is_a_literal() {
        let tree = parse("(+ -5 3)").unwrap();
        assert_eq!(tree.children[2].contents, "-5");
        assert_eq!(tree.children[2].span, Span::new(3, 5));
    }

    #[test]
    fn minus_after_paren_is_the_operator() {
        let tree = parse("(-5 3)").unwrap();
        assert_eq!(tree.children[1].contents, "-");
        assert_eq!(tree.children[2].contents, "5");
    }

    #[test]
    fn spaced_minus_is_not_a_number() {
        let error = parse("(+ - 5)").unwrap_err();
        assert_eq!(error.expected, vec![Expected::Number, Expected::OpenParen]);
        assert_eq!(error.found.as_deref(), Some("-"));
        assert!(error.help.is_some());
    }

    #[test]
    fn unknown_operator_is_a_syntax_error() {
        let error = parse("(^ 2 2)").unwrap_err();
        assert_eq!(error.expected, vec![Expected::Operator]);
        assert_eq!(error.span, Span::new(1, 2));
        assert_eq!(error.found.as_deref(), Some("^"));
    }

    #[test]
    fn missing_operand() {
        let error = parse("(+)").unwrap_err();
        assert_eq!(error.expected, vec![Expected::Number, Expected::OpenParen]);
        assert_eq!(error.found.as_deref(), Some(")"));
    }

    #[test]
    fn unclosed_paren_reports_end_of_input() {
        let error = parse("(+ 1 2").unwrap_err();
        assert_eq!(
            error.expected,
            vec![Expected::Number, Expected::OpenParen, Expected::CloseParen]
        );
        assert_eq!(error.found, None);
        assert_eq!(error.span, Span::single(6));
    }

    #[test]
    fn trailing_input_after_parenthesised_program() {
        let error = parse("(+ 1 2) 3").unwrap_err();
        assert_eq!(error.expected, vec![Expected::EndOfInput]);
        assert_eq!(error.found.as_deref(), Some("3"));
    }

    fn nested(levels: usize) -> String {
        "(+ ".repeat(levels) + "1" + &")".repeat(levels)
    }

    #[test]
    fn nesting_up_to_the_limit_parses() {
        let tree = parse(&nested(MAX_NESTING)).unwrap();
        assert_eq!(count_nodes(&tree), 1 + 5 + (MAX_NESTING - 1) * 4);
    }

    #[test]
    fn nesting_past_the_limit_is_a_syntax_error() {
        let error = parse(&nested(MAX_NESTING + 1)).unwrap_err();
        assert_eq!(error.expected, vec![Expected::Number]);
        assert_eq!(error.found.as_deref(), Some("("));
        assert_eq!(error.span, Span::single(3 * MAX_NESTING));
        assert!(error.help.unwrap().contains(&MAX_NESTING.to_string()));
    }

    #[test]
    fn bare_form_nesting_counts_from_first_paren() {
        let source = "+ ".to_string() + &nested(MAX_NESTING);
        assert!(parse(&source).is_ok());
        let source = "+ ".to_string() + &nested(MAX_NESTING + 1);
        assert!(parse(&source).is_err());
    }

    #[test]
    fn empty_input() {
        let error = parse("").unwrap_err();
        assert_eq!(error.expected, vec![Expected::Operator, Expected::OpenParen]);
        assert_eq!(error.found, None);
    }
}
