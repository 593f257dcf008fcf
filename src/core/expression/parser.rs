use super::lexer::{Token, TokenKind, tokenize};
use super::{BinaryOp, EvalError, Expr, UnaryOp};

/// Deepest expression tree the parser builds. Evaluation and drop recurse
/// over the tree, so this also bounds their stack use.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parses `source` into an expression tree.
pub fn parse(source: &str) -> Result<Expr, EvalError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        tokens,
        cursor: 0,
        depth: 0,
    };
    let expr = parser.parse_additive()?;
    let trailing = parser.peek();
    if trailing.kind != TokenKind::Eof {
        return Err(EvalError::Parse {
            position: trailing.position,
            message: "unexpected trailing input".to_owned(),
        });
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        // The token stream always ends with `Eof`, which is never consumed.
        &self.tokens[self.cursor.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.cursor += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<(), EvalError> {
        let token = self.advance();
        if token.kind == kind {
            Ok(())
        } else {
            Err(EvalError::Parse {
                position: token.position,
                message: format!("expected {what}"),
            })
        }
    }

    /// Counts one more level of tree depth below the current node.
    fn descend(&mut self) -> Result<(), EvalError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(EvalError::Parse {
                position: self.peek().position,
                message: "expression nested too deeply".to_owned(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    // Each operator of a left-associative chain adds a level to the tree, so
    // long chains count towards the depth just like parentheses do.
    fn parse_additive(&mut self) -> Result<Expr, EvalError> {
        let depth = self.depth;
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            self.descend()?;
            let rhs = self.parse_multiplicative()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        self.depth = depth;
        Ok(lhs)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, EvalError> {
        let depth = self.depth;
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::DoubleSlash => BinaryOp::FloorDiv,
                TokenKind::Percent => BinaryOp::Mod,
                _ => break,
            };
            self.advance();
            self.descend()?;
            let rhs = self.parse_unary()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        self.depth = depth;
        Ok(lhs)
    }

    // Every nested subexpression passes through here: parenthesized groups,
    // call arguments, unary operands and `**` exponents.
    fn parse_unary(&mut self) -> Result<Expr, EvalError> {
        self.descend()?;
        let expr = self.parse_signed()?;
        self.depth -= 1;
        Ok(expr)
    }

    fn parse_signed(&mut self) -> Result<Expr, EvalError> {
        let op = match self.peek().kind {
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Minus => UnaryOp::Neg,
            _ => return self.parse_power(),
        };
        self.advance();
        let operand = self.parse_unary()?;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    /// `**` binds tighter than a unary sign on its left and accepts one on its
    /// right, so `-2**-1` parses as `-(2**(-1))`.
    fn parse_power(&mut self) -> Result<Expr, EvalError> {
        let base = self.parse_primary()?;
        if self.peek().kind != TokenKind::DoubleStar {
            return Ok(base);
        }
        self.advance();
        let exponent = self.parse_unary()?;
        Ok(Expr::binary(BinaryOp::Pow, base, exponent))
    }

    fn parse_primary(&mut self) -> Result<Expr, EvalError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Number(value) => Ok(Expr::Number(value)),
            TokenKind::Ident(name) => {
                if self.peek().kind != TokenKind::LParen {
                    return Ok(Expr::Name(name));
                }
                self.advance();
                let args = self.parse_arguments()?;
                Ok(Expr::Call { name, args })
            }
            TokenKind::LParen => {
                let inner = self.parse_additive()?;
                self.expect(TokenKind::RParen, "`)`")?;
                Ok(inner)
            }
            TokenKind::Eof => Err(EvalError::Parse {
                position: token.position,
                message: "unexpected end of expression".to_owned(),
            }),
            _ => Err(EvalError::Parse {
                position: token.position,
                message: "expected a number, name or `(`".to_owned(),
            }),
        }
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expr>, EvalError> {
        let mut args = Vec::new();
        if self.peek().kind == TokenKind::RParen {
            self.advance();
            return Ok(args);
        }
        loop {
            args.push(self.parse_additive()?);
            match self.peek().kind {
                TokenKind::Comma => {
                    self.advance();
                    // Trailing comma before `)` is accepted.
                    if self.peek().kind == TokenKind::RParen {
                        self.advance();
                        return Ok(args);
                    }
                }
                _ => {
                    self.expect(TokenKind::RParen, "`,` or `)`")?;
                    return Ok(args);
                }
            }
        }
    }
}
