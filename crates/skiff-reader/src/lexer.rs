use num_bigint::BigInt;
use skiff_core::{SkiffError, Span};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LParen,
    RParen,
    Quote,
    Dot,
    Number(BigInt),
    String(String),
    Symbol(String),
    Bool(bool),
}

#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

/// Non-initial symbol characters additionally allow digits.
const SYMBOL_CHARS: &str = "!$%&|*+-/:<=>?@^_~#";

fn is_symbol_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || SYMBOL_CHARS.contains(ch)
}

/// Split source text into spanned tokens.
///
/// The grammar has no comments and no string escapes: a `"` always
/// delimits, and `\` inside a string is an ordinary character. Numeric
/// literals are unsigned digit runs; `-5` lexes as the symbol `-5`.
pub fn tokenize(input: &str) -> Result<Vec<SpannedToken>, SkiffError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    let mut line = 1;
    let mut col = 1;

    while i < chars.len() {
        let ch = chars[i];
        let span = Span::new(line, col);

        match ch {
            ' ' | '\t' | '\r' => {
                i += 1;
                col += 1;
            }
            '\n' => {
                i += 1;
                line += 1;
                col = 1;
            }
            '(' => {
                i += 1;
                col += 1;
                tokens.push(SpannedToken {
                    token: Token::LParen,
                    span,
                });
            }
            ')' => {
                i += 1;
                col += 1;
                tokens.push(SpannedToken {
                    token: Token::RParen,
                    span,
                });
            }
            '\'' => {
                i += 1;
                col += 1;
                tokens.push(SpannedToken {
                    token: Token::Quote,
                    span,
                });
            }
            '.' => {
                i += 1;
                col += 1;
                tokens.push(SpannedToken {
                    token: Token::Dot,
                    span,
                });
            }
            '"' => {
                let mut text = String::new();
                i += 1;
                col += 1;
                while i < chars.len() && chars[i] != '"' {
                    if chars[i] == '\n' {
                        line += 1;
                        col = 1;
                    } else {
                        col += 1;
                    }
                    text.push(chars[i]);
                    i += 1;
                }
                if i >= chars.len() {
                    return Err(SkiffError::Parser {
                        message: "unterminated string".to_string(),
                        span,
                    });
                }
                i += 1; // closing quote
                col += 1;
                tokens.push(SpannedToken {
                    token: Token::String(text),
                    span,
                });
            }
            '0'..='9' => {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                    col += 1;
                }
                let digits: String = chars[start..i].iter().collect();
                let n: BigInt = digits.parse().map_err(|_| SkiffError::Parser {
                    message: format!("invalid number `{digits}`"),
                    span,
                })?;
                tokens.push(SpannedToken {
                    token: Token::Number(n),
                    span,
                });
            }
            ch if is_symbol_start(ch) => {
                let start = i;
                i += 1;
                col += 1;
                while i < chars.len() && (is_symbol_start(chars[i]) || chars[i].is_ascii_digit()) {
                    i += 1;
                    col += 1;
                }
                let name: String = chars[start..i].iter().collect();
                let token = match name.as_str() {
                    "#t" => Token::Bool(true),
                    "#f" => Token::Bool(false),
                    _ => Token::Symbol(name),
                };
                tokens.push(SpannedToken { token, span });
            }
            other => {
                return Err(SkiffError::Parser {
                    message: format!("unexpected character `{other}`"),
                    span,
                });
            }
        }
    }

    Ok(tokens)
}
