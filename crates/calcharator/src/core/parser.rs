//! Expression tokenizer and recursive descent parser

use crate::core::{CalcError, CalcResult, Constant, Function, Operation};

/// Token types from lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Binary operator (also unary `-` / `+`)
    Operator(Operation),
    /// Function or constant name
    Ident(String),
    /// Left parenthesis
    LeftParen,
    /// Right parenthesis
    RightParen,
}

impl Token {
    /// Returns true if this token is an operator
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    /// Returns true if this token is a number
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    fn describe(&self) -> String {
        match self {
            Self::Number(n) => format!("number {n}"),
            Self::Operator(op) => format!("'{}'", op.symbol()),
            Self::Ident(name) => format!("'{name}'"),
            Self::LeftParen => "'('".into(),
            Self::RightParen => "')'".into(),
        }
    }
}

/// Abstract Syntax Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal (constants are folded into this)
    Number(f64),
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Operation,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Unary negation
    Negate(Box<AstNode>),
    /// Function application
    Call {
        /// The function
        function: Function,
        /// Its single argument
        arg: Box<AstNode>,
    },
}

impl AstNode {
    /// Creates a new number node
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: Operation, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::Negate(Box::new(inner))
    }

    /// Creates a new function call node
    #[must_use]
    pub fn call(function: Function, arg: AstNode) -> Self {
        Self::Call {
            function,
            arg: Box::new(arg),
        }
    }
}

/// Tokenizer for converting expression strings to tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the remaining input
    #[must_use]
    pub fn remaining(&self) -> &str {
        &self.input[self.pos..]
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let token = match ch {
            '0'..='9' | '.' => self.read_number()?,
            'a'..='z' | 'A'..='Z' => self.read_ident(),
            '(' => {
                self.advance();
                Token::LeftParen
            }
            ')' => {
                self.advance();
                Token::RightParen
            }
            _ => match Operation::from_char(ch) {
                Some(op) => {
                    self.advance();
                    Token::Operator(op)
                }
                None => return Err(CalcError::UnexpectedCharacter(ch)),
            },
        };

        Ok(Some(token))
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> CalcResult<Token> {
        let start = self.pos;

        // Consume every digit and dot so "1.2.3" is reported whole
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() || ch == '.' {
                self.advance();
            } else {
                break;
            }
        }

        let num_str = &self.input[start..self.pos];
        if num_str == "." || num_str.matches('.').count() > 1 {
            return Err(CalcError::InvalidNumber(num_str.to_string()));
        }
        let value: f64 = num_str
            .parse()
            .map_err(|_| CalcError::InvalidNumber(num_str.to_string()))?;

        Ok(Token::Number(value))
    }

    fn read_ident(&mut self) -> Token {
        let start = self.pos;
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() {
                self.advance();
            } else {
                break;
            }
        }
        Token::Ident(self.input[start..self.pos].to_ascii_lowercase())
    }
}

/// Recursive descent parser for expressions
///
/// Grammar:
/// ```text
/// expression ::= term (('+' | '-') term)*
/// term       ::= unary (('*' | '/' | '%') unary)*
/// unary      ::= ('-' | '+') unary | power
/// power      ::= primary ('^' unary)?          // right associative
/// primary    ::= NUMBER | IDENT '(' expression ')' | IDENT | '(' expression ')'
/// ```
///
/// `-2^2` is `-(2^2)`, and `2^-1` is accepted.
///
/// Nesting is capped at [`MAX_DEPTH`]: every group, unary operator and
/// chained binary operator counts one level.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

/// Deepest syntax tree the parser builds
pub const MAX_DEPTH: usize = 256;

impl Parser {
    /// Creates a new parser from tokens
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parses a string expression into an AST
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        let mut tokenizer = Tokenizer::new(input);
        let tokens = tokenizer.tokenize()?;
        Self::new(tokens).parse()
    }

    /// Parses all tokens into an AST
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let ast = self.parse_expression()?;

        match self.current() {
            None => Ok(ast),
            Some(Token::RightParen) => Err(CalcError::syntax("unmatched ')'")),
            Some(token) => Err(CalcError::syntax(format!(
                "unexpected {} at token {}",
                token.describe(),
                self.pos + 1
            ))),
        }
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn deepen(&mut self) -> CalcResult<()> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::syntax("expression nested too deeply"));
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_expression(&mut self) -> CalcResult<AstNode> {
        let saved = self.depth;
        let result = self.parse_sum();
        self.depth = saved;
        result
    }

    fn parse_sum(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_term()?;

        while let Some(Token::Operator(op @ (Operation::Add | Operation::Subtract))) =
            self.current()
        {
            let op = *op;
            self.advance();
            self.deepen()?;
            let right = self.parse_term()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> CalcResult<AstNode> {
        let saved = self.depth;
        let result = self.parse_product();
        self.depth = saved;
        result
    }

    fn parse_product(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_unary()?;

        while let Some(Token::Operator(
            op @ (Operation::Multiply | Operation::Divide | Operation::Modulo),
        )) = self.current()
        {
            let op = *op;
            self.advance();
            self.deepen()?;
            let right = self.parse_unary()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> CalcResult<AstNode> {
        let saved = self.depth;
        self.deepen()?;
        let result = self.parse_signed();
        self.depth = saved;
        result
    }

    fn parse_signed(&mut self) -> CalcResult<AstNode> {
        match self.current() {
            Some(Token::Operator(Operation::Subtract)) => {
                self.advance();
                Ok(AstNode::negate(self.parse_unary()?))
            }
            Some(Token::Operator(Operation::Add)) => {
                self.advance();
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> CalcResult<AstNode> {
        let base = self.parse_primary()?;

        if matches!(self.current(), Some(Token::Operator(Operation::Power))) {
            self.advance();
            let exponent = self.parse_unary()?;
            return Ok(AstNode::binary(base, Operation::Power, exponent));
        }

        Ok(base)
    }

    fn parse_primary(&mut self) -> CalcResult<AstNode> {
        let token = self
            .advance()
            .ok_or_else(|| CalcError::syntax("unexpected end of expression"))?;

        match token {
            Token::Number(n) => Ok(AstNode::number(n)),
            Token::LeftParen => self.parse_group(),
            Token::Ident(name) => {
                if matches!(self.current(), Some(Token::LeftParen)) {
                    let function =
                        Function::from_name(&name).ok_or(CalcError::UnknownFunction(name))?;
                    self.advance();
                    let arg = self.parse_group()?;
                    Ok(AstNode::call(function, arg))
                } else {
                    Constant::from_name(&name)
                        .map(|c| AstNode::number(c.value()))
                        .ok_or(CalcError::UnknownIdentifier(name))
                }
            }
            other => Err(CalcError::syntax(format!(
                "unexpected {}",
                other.describe()
            ))),
        }
    }

    /// Parses the inside of a group whose `(` was already consumed
    fn parse_group(&mut self) -> CalcResult<AstNode> {
        if matches!(self.current(), Some(Token::RightParen)) {
            return Err(CalcError::syntax("empty parentheses"));
        }
        let expr = self.parse_expression()?;
        match self.advance() {
            Some(Token::RightParen) => Ok(expr),
            Some(t) => Err(CalcError::syntax(format!(
                "expected ')' but found {}",
                t.describe()
            ))),
            None => Err(CalcError::syntax("unclosed parenthesis")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Tokenizer tests =====

    #[test]
    fn test_tokenize_expression() {
        let mut t = Tokenizer::new("2 + 3 * 4");
        let tokens = t.tokenize().unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(2.0),
                Token::Operator(Operation::Add),
                Token::Number(3.0),
                Token::Operator(Operation::Multiply),
                Token::Number(4.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_function_call() {
        let mut t = Tokenizer::new("sin(30)");
        let tokens = t.tokenize().unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("sin".into()),
                Token::LeftParen,
                Token::Number(30.0),
                Token::RightParen,
            ]
        );
    }

    #[test]
    fn test_tokenize_log10_keeps_digits_in_name() {
        let mut t = Tokenizer::new("log10(100)");
        let tokens = t.tokenize().unwrap();
        assert_eq!(tokens[0], Token::Ident("log10".into()));
    }

    #[test]
    fn test_tokenize_leading_decimal() {
        let mut t = Tokenizer::new(".5");
        assert_eq!(t.tokenize().unwrap(), vec![Token::Number(0.5)]);
    }

    #[test]
    fn test_tokenize_trailing_decimal() {
        let mut t = Tokenizer::new("5.");
        assert_eq!(t.tokenize().unwrap(), vec![Token::Number(5.0)]);
    }

    #[test]
    fn test_tokenize_invalid_char() {
        let mut t = Tokenizer::new("2 @ 3");
        assert_eq!(t.tokenize(), Err(CalcError::UnexpectedCharacter('@')));
    }

    #[test]
    fn test_tokenize_double_dot_number() {
        let mut t = Tokenizer::new("1.2.3");
        assert_eq!(t.tokenize(), Err(CalcError::InvalidNumber("1.2.3".into())));
    }

    #[test]
    fn test_tokenize_lone_dot() {
        let mut t = Tokenizer::new(".");
        assert_eq!(t.tokenize(), Err(CalcError::InvalidNumber(".".into())));
    }

    #[test]
    fn test_tokenizer_remaining() {
        let mut t = Tokenizer::new("1 + 2");
        t.next_token().unwrap();
        assert_eq!(t.remaining(), " + 2");
    }

    #[test]
    fn test_token_predicates() {
        assert!(Token::Operator(Operation::Add).is_operator());
        assert!(!Token::Number(1.0).is_operator());
        assert!(Token::Number(1.0).is_number());
        assert!(!Token::LeftParen.is_number());
    }

    // ===== Parser tests =====

    #[test]
    fn test_parse_precedence_mul_over_add() {
        let ast = Parser::parse_str("2+3*4").unwrap();
        assert_eq!(
            ast,
            AstNode::binary(
                AstNode::number(2.0),
                Operation::Add,
                AstNode::binary(AstNode::number(3.0), Operation::Multiply, AstNode::number(4.0))
            )
        );
    }

    #[test]
    fn test_parse_power_right_associative() {
        let ast = Parser::parse_str("2^3^2").unwrap();
        assert_eq!(
            ast,
            AstNode::binary(
                AstNode::number(2.0),
                Operation::Power,
                AstNode::binary(AstNode::number(3.0), Operation::Power, AstNode::number(2.0))
            )
        );
    }

    #[test]
    fn test_parse_unary_minus_binds_looser_than_power() {
        let ast = Parser::parse_str("-2^2").unwrap();
        assert_eq!(
            ast,
            AstNode::negate(AstNode::binary(
                AstNode::number(2.0),
                Operation::Power,
                AstNode::number(2.0)
            ))
        );
    }

    #[test]
    fn test_parse_negative_exponent() {
        let ast = Parser::parse_str("2^-1").unwrap();
        assert_eq!(
            ast,
            AstNode::binary(
                AstNode::number(2.0),
                Operation::Power,
                AstNode::negate(AstNode::number(1.0))
            )
        );
    }

    #[test]
    fn test_parse_unary_plus() {
        assert_eq!(Parser::parse_str("+5").unwrap(), AstNode::number(5.0));
    }

    #[test]
    fn test_parse_function_call() {
        let ast = Parser::parse_str("sqrt(16)").unwrap();
        assert_eq!(ast, AstNode::call(Function::Sqrt, AstNode::number(16.0)));
    }

    #[test]
    fn test_parse_constant() {
        assert_eq!(
            Parser::parse_str("pi").unwrap(),
            AstNode::number(std::f64::consts::PI)
        );
    }

    #[test]
    fn test_parse_case_insensitive_names() {
        assert_eq!(
            Parser::parse_str("SIN(0)").unwrap(),
            AstNode::call(Function::Sin, AstNode::number(0.0))
        );
    }

    #[test]
    fn test_parse_nested_parentheses() {
        let ast = Parser::parse_str("((2 + 3))").unwrap();
        assert!(matches!(
            ast,
            AstNode::BinaryOp {
                op: Operation::Add,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_deep_nesting_is_syntax_error() {
        let input = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(
            Parser::parse_str(&input),
            Err(CalcError::syntax("expression nested too deeply"))
        );

        let negations = format!("{}1", "-".repeat(10_000));
        assert!(Parser::parse_str(&negations).is_err());

        let powers = format!("2{}", "^2".repeat(10_000));
        assert!(Parser::parse_str(&powers).is_err());

        let chain = format!("1{}", "+1".repeat(10_000));
        assert!(Parser::parse_str(&chain).is_err());
    }

    #[test]
    fn test_parse_moderate_nesting() {
        let input = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(Parser::parse_str(&input).unwrap(), AstNode::number(1.0));

        let chain = format!("1{}", "+1".repeat(100));
        assert!(Parser::parse_str(&chain).is_ok());
    }

    #[test]
    fn test_depth_resets_between_siblings() {
        let group = format!("{}1{}", "(".repeat(50), ")".repeat(50));
        let input = vec![group; 10].join("*");
        assert!(Parser::parse_str(&input).is_ok());
    }

    #[test]
    fn test_parse_empty_expression() {
        assert_eq!(Parser::parse_str(""), Err(CalcError::EmptyExpression));
        assert_eq!(Parser::parse_str("   "), Err(CalcError::EmptyExpression));
    }

    #[test]
    fn test_parse_missing_operand() {
        assert_eq!(
            Parser::parse_str("2+"),
            Err(CalcError::syntax("unexpected end of expression"))
        );
    }

    #[test]
    fn test_parse_unclosed_paren() {
        assert_eq!(
            Parser::parse_str("(2 + 3"),
            Err(CalcError::syntax("unclosed parenthesis"))
        );
        assert_eq!(
            Parser::parse_str("sin("),
            Err(CalcError::syntax("unexpected end of expression"))
        );
    }

    #[test]
    fn test_parse_unmatched_close_paren() {
        assert_eq!(
            Parser::parse_str("2 + 3)"),
            Err(CalcError::syntax("unmatched ')'"))
        );
    }

    #[test]
    fn test_parse_empty_parentheses() {
        assert_eq!(
            Parser::parse_str("()"),
            Err(CalcError::syntax("empty parentheses"))
        );
    }

    #[test]
    fn test_parse_consecutive_operators() {
        assert!(matches!(
            Parser::parse_str("2 * / 3"),
            Err(CalcError::Syntax(_))
        ));
    }

    #[test]
    fn test_parse_unknown_function() {
        assert_eq!(
            Parser::parse_str("foo(1)"),
            Err(CalcError::UnknownFunction("foo".into()))
        );
    }

    #[test]
    fn test_parse_unknown_identifier() {
        assert_eq!(
            Parser::parse_str("sin"),
            Err(CalcError::UnknownIdentifier("sin".into()))
        );
    }

    #[test]
    fn test_parse_adjacent_numbers_rejected() {
        let err = Parser::parse_str("2 3").unwrap_err();
        assert_eq!(err, CalcError::syntax("unexpected number 3 at token 2"));
    }

    #[test]
    fn test_parser_parse_empty_tokens() {
        let mut parser = Parser::new(vec![]);
        assert_eq!(parser.parse(), Err(CalcError::EmptyExpression));
    }
}
