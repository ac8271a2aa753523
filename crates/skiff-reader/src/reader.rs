use skiff_core::{SkiffError, Span, Value};

use crate::lexer::{tokenize, SpannedToken, Token};

struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<SpannedToken>) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    /// Span of the upcoming token, or of the last one at end of input.
    fn span(&self) -> Span {
        match self.tokens.get(self.pos).or_else(|| self.tokens.last()) {
            Some(t) => t.span,
            None => Span::new(1, 1),
        }
    }

    fn advance(&mut self) -> Option<&SpannedToken> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn parse_expr(&mut self) -> Result<Value, SkiffError> {
        let span = self.span();
        match self.peek() {
            None => Err(SkiffError::Parser {
                message: "unexpected end of input".to_string(),
                span,
            }),
            Some(Token::LParen) => self.parse_list(),
            Some(Token::Quote) => {
                self.advance();
                let inner = self.parse_expr().map_err(|_| SkiffError::Parser {
                    message: "quote (') requires an expression after it".to_string(),
                    span,
                })?;
                Ok(Value::List(vec![Value::symbol("quote"), inner]))
            }
            Some(_) => self.parse_atom(),
        }
    }

    fn parse_list(&mut self) -> Result<Value, SkiffError> {
        let open_span = self.span();
        self.advance(); // opening paren
        let mut items = Vec::new();
        loop {
            if self.peek().is_none() {
                return Err(SkiffError::Parser {
                    message: "unterminated list".to_string(),
                    span: open_span,
                });
            }
            if self.peek() == Some(&Token::RParen) {
                self.advance();
                return Ok(Value::List(items));
            }
            // Dotted tail: only after at least one head element, with
            // exactly one expression before the closing paren.
            if self.peek() == Some(&Token::Dot) {
                let dot_span = self.span();
                if items.is_empty() {
                    return Err(SkiffError::Parser {
                        message: "`.` requires an element before it".to_string(),
                        span: dot_span,
                    });
                }
                self.advance();
                let tail = self.parse_expr()?;
                if self.peek() != Some(&Token::RParen) {
                    return Err(SkiffError::Parser {
                        message: "expected `)` after dotted tail".to_string(),
                        span: self.span(),
                    });
                }
                self.advance();
                return Ok(Value::dotted(items, tail));
            }
            items.push(self.parse_expr()?);
        }
    }

    fn parse_atom(&mut self) -> Result<Value, SkiffError> {
        let span = self.span();
        match self.advance() {
            Some(SpannedToken {
                token: Token::Number(n),
                ..
            }) => Ok(Value::Number(n.clone())),
            Some(SpannedToken {
                token: Token::String(s),
                ..
            }) => Ok(Value::String(s.clone())),
            Some(SpannedToken {
                token: Token::Symbol(s),
                ..
            }) => Ok(Value::Symbol(s.clone())),
            Some(SpannedToken {
                token: Token::Bool(b),
                ..
            }) => Ok(Value::Bool(*b)),
            Some(SpannedToken {
                token: Token::RParen,
                ..
            }) => Err(SkiffError::Parser {
                message: "unexpected closing `)`".to_string(),
                span,
            }),
            Some(SpannedToken {
                token: Token::Dot, ..
            }) => Err(SkiffError::Parser {
                message: "`.` is only valid inside a list".to_string(),
                span,
            }),
            _ => Err(SkiffError::Parser {
                message: "unexpected token".to_string(),
                span,
            }),
        }
    }
}

/// Parse exactly one expression; trailing input is an error.
pub fn read(input: &str) -> Result<Value, SkiffError> {
    let mut parser = Parser::new(tokenize(input)?);
    let expr = parser.parse_expr()?;
    if parser.peek().is_some() {
        return Err(SkiffError::Parser {
            message: "unexpected input after expression".to_string(),
            span: parser.span(),
        });
    }
    Ok(expr)
}

/// Parse a whole program: zero or more whitespace-separated expressions.
pub fn read_many(input: &str) -> Result<Vec<Value>, SkiffError> {
    let mut parser = Parser::new(tokenize(input)?);
    let mut exprs = Vec::new();
    while parser.peek().is_some() {
        exprs.push(parser.parse_expr()?);
    }
    Ok(exprs)
}
