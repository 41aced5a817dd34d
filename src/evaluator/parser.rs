use super::lexer::{Lexer, Token, TokenKind, parse_error};
use crate::ast::{BinaryOp, Expression, UnaryOp, Value};
use crate::error::EvaluationError;

/// Recursive-descent parser producing an [`Expression`] tree.
///
/// Grammar, loosest binding first:
///
/// ```text
/// conditional    := logical_or ("?" conditional ":" conditional)?
/// logical_or     := logical_and ("||" logical_and)*
/// logical_and    := equality ("&&" equality)*
/// equality       := comparison (("==" | "!=" | "===" | "!==") comparison)*
/// comparison     := additive (("<" | "<=" | ">" | ">=") additive)*
/// additive       := multiplicative (("+" | "-") multiplicative)*
/// multiplicative := unary (("*" | "/" | "%") unary)*
/// unary          := ("-" | "+" | "!") unary | power
/// power          := postfix ("**" unary)?
/// postfix        := primary ("(" args ")" | "." ident | "[" conditional "]")*
/// primary        := number | string | true | false | null | ident
///                 | "(" conditional ")" | "[" args "]"
/// ```
///
/// Every later walk over the tree recurses, so the parser bounds both the
/// depth of the tree it builds and how often a bracket or ternary re-enters
/// `conditional`. Inputs past either bound fail as parse errors.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    nesting: usize,
}

/// Deepest expression tree the parser will build.
pub const MAX_EXPRESSION_DEPTH: usize = 128;
/// Deepest nesting of brackets, call arguments and ternaries.
pub const MAX_EXPRESSION_NESTING: usize = 32;

impl Parser {
    pub fn parse(input: &str) -> Result<Expression, EvaluationError> {
        let tokens = Lexer::tokenize(input)?;
        let mut parser = Parser {
            tokens,
            pos: 0,
            depth: 0,
            nesting: 0,
        };
        if parser.check(&TokenKind::Eof) {
            return Err(parse_error("empty expression", 0));
        }
        let expression = parser.conditional()?;
        if !parser.check(&TokenKind::Eof) {
            let token = parser.peek();
            return Err(parse_error(
                &format!("unexpected '{}'", token.kind),
                token.position,
            ));
        }
        Ok(expression)
    }

    fn conditional(&mut self) -> Result<Expression, EvaluationError> {
        let (depth, nesting) = (self.depth, self.nesting);
        self.nesting += 1;
        if self.nesting > MAX_EXPRESSION_NESTING {
            return Err(self.too_deep());
        }

        let condition = self.logical_or()?;
        let expression = if self.eat(&TokenKind::Question) {
            self.deepen()?;
            let then_branch = self.conditional()?;
            self.expect(&TokenKind::Colon)?;
            let else_branch = self.conditional()?;
            Expression::Conditional {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            }
        } else {
            condition
        };

        self.depth = depth;
        self.nesting = nesting;
        Ok(expression)
    }

    fn logical_or(&mut self) -> Result<Expression, EvaluationError> {
        self.binary_level(Self::logical_and, |kind| match kind {
            TokenKind::OrOr => Some(BinaryOp::Or),
            _ => None,
        })
    }

    fn logical_and(&mut self) -> Result<Expression, EvaluationError> {
        self.binary_level(Self::equality, |kind| match kind {
            TokenKind::AndAnd => Some(BinaryOp::And),
            _ => None,
        })
    }

    fn equality(&mut self) -> Result<Expression, EvaluationError> {
        self.binary_level(Self::comparison, |kind| match kind {
            TokenKind::EqualEqual => Some(BinaryOp::Equal),
            TokenKind::BangEqual => Some(BinaryOp::NotEqual),
            TokenKind::EqualEqualEqual => Some(BinaryOp::StrictEqual),
            TokenKind::BangEqualEqual => Some(BinaryOp::StrictNotEqual),
            _ => None,
        })
    }

    fn comparison(&mut self) -> Result<Expression, EvaluationError> {
        self.binary_level(Self::additive, |kind| match kind {
            TokenKind::Less => Some(BinaryOp::Less),
            TokenKind::LessEqual => Some(BinaryOp::LessOrEqual),
            TokenKind::Greater => Some(BinaryOp::Greater),
            TokenKind::GreaterEqual => Some(BinaryOp::GreaterOrEqual),
            _ => None,
        })
    }

    fn additive(&mut self) -> Result<Expression, EvaluationError> {
        self.binary_level(Self::multiplicative, |kind| match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Subtract),
            _ => None,
        })
    }

    fn multiplicative(&mut self) -> Result<Expression, EvaluationError> {
        self.binary_level(Self::unary, |kind| match kind {
            TokenKind::Star => Some(BinaryOp::Multiply),
            TokenKind::Slash => Some(BinaryOp::Divide),
            TokenKind::Percent => Some(BinaryOp::Remainder),
            _ => None,
        })
    }

    /// Parses one left-associative precedence level.
    fn binary_level(
        &mut self,
        operand: fn(&mut Self) -> Result<Expression, EvaluationError>,
        operator: fn(&TokenKind) -> Option<BinaryOp>,
    ) -> Result<Expression, EvaluationError> {
        let depth = self.depth;
        let mut left = operand(self)?;
        while let Some(op) = operator(&self.peek().kind) {
            self.advance();
            // Each operator wraps the chain so far one level deeper.
            self.deepen()?;
            let right = operand(self)?;
            left = Expression::Binary(op, Box::new(left), Box::new(right));
        }
        self.depth = depth;
        Ok(left)
    }

    fn unary(&mut self) -> Result<Expression, EvaluationError> {
        let op = match self.peek().kind {
            TokenKind::Minus => UnaryOp::Negate,
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.power(),
        };
        self.advance();
        let depth = self.depth;
        self.deepen()?;
        let operand = self.unary()?;
        self.depth = depth;
        Ok(Expression::Unary(op, Box::new(operand)))
    }

    fn power(&mut self) -> Result<Expression, EvaluationError> {
        let base = self.postfix()?;
        if self.eat(&TokenKind::StarStar) {
            let depth = self.depth;
            self.deepen()?;
            let exponent = self.unary()?;
            self.depth = depth;
            return Ok(Expression::Binary(
                BinaryOp::Power,
                Box::new(base),
                Box::new(exponent),
            ));
        }
        Ok(base)
    }

    fn postfix(&mut self) -> Result<Expression, EvaluationError> {
        let depth = self.depth;
        let mut expr = self.primary()?;
        loop {
            let position = self.peek().position;
            if matches!(
                self.peek().kind,
                TokenKind::LParen | TokenKind::Dot | TokenKind::LBracket
            ) {
                self.deepen()?;
            }
            if self.eat(&TokenKind::LParen) {
                let Expression::Symbol(callee) = expr else {
                    return Err(parse_error("only named helpers can be called", position));
                };
                let args = self.arguments(&TokenKind::RParen)?;
                expr = Expression::Call { callee, args };
            } else if self.eat(&TokenKind::Dot) {
                let property = self.identifier()?;
                expr = Expression::Member {
                    object: Box::new(expr),
                    property,
                };
            } else if self.eat(&TokenKind::LBracket) {
                let index = self.conditional()?;
                self.expect(&TokenKind::RBracket)?;
                expr = Expression::Index {
                    object: Box::new(expr),
                    index: Box::new(index),
                };
            } else {
                self.depth = depth;
                return Ok(expr);
            }
        }
    }

    fn primary(&mut self) -> Result<Expression, EvaluationError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Number(n) => Ok(Expression::Literal(Value::Number(n))),
            TokenKind::String(s) => Ok(Expression::Literal(Value::String(s))),
            TokenKind::Identifier(name) => Ok(match name.as_str() {
                "true" => Expression::Literal(Value::Bool(true)),
                "false" => Expression::Literal(Value::Bool(false)),
                "null" => Expression::Literal(Value::Null),
                _ => Expression::Symbol(name),
            }),
            TokenKind::LParen => {
                let inner = self.conditional()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::LBracket => {
                let depth = self.depth;
                self.deepen()?;
                let items = self.arguments(&TokenKind::RBracket)?;
                self.depth = depth;
                Ok(Expression::Array(items))
            }
            other => Err(parse_error(
                &format!("unexpected '{}'", other),
                token.position,
            )),
        }
    }

    /// Parses a comma-separated list up to and including `close`.
    fn arguments(&mut self, close: &TokenKind) -> Result<Vec<Expression>, EvaluationError> {
        let mut items = Vec::new();
        if self.eat(close) {
            return Ok(items);
        }
        loop {
            items.push(self.conditional()?);
            if self.eat(close) {
                return Ok(items);
            }
            self.expect(&TokenKind::Comma)?;
        }
    }

    fn identifier(&mut self) -> Result<String, EvaluationError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Identifier(name) => Ok(name),
            other => Err(parse_error(
                &format!("expected a property name, found '{}'", other),
                token.position,
            )),
        }
    }

    fn deepen(&mut self) -> Result<(), EvaluationError> {
        self.depth += 1;
        if self.depth > MAX_EXPRESSION_DEPTH {
            return Err(self.too_deep());
        }
        Ok(())
    }

    fn too_deep(&self) -> EvaluationError {
        parse_error("expression nested too deeply", self.peek().position)
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), EvaluationError> {
        if self.eat(kind) {
            Ok(())
        } else {
            let token = self.peek();
            Err(parse_error(
                &format!("expected '{}', found '{}'", kind, token.kind),
                token.position,
            ))
        }
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.peek().kind == kind
    }

    fn peek(&self) -> &Token {
        // The token stream always ends with Eof, and `advance` never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }
}
