//! Math check (`spec.md` §4.7): extract `<expr> = <number>`
//! sub-expressions, evaluate `expr` with a recursive-descent parser
//! restricted to `{+, −, ×, ÷, **, grouping, decimal literals}`, and flag
//! mismatches against the stated value (tolerance 0.001).

use std::sync::OnceLock;

use hive_core::{IssueKind, VerificationIssue};
use regex::Regex;

const TOLERANCE: f64 = 0.001;

fn expression_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d+(?:\.\d+)?(?:\s*(?:\*\*|[+\-*/×÷])\s*\d+(?:\.\d+)?)+)\s*=\s*(\d+(?:\.\d+)?)")
            .expect("valid math expression pattern")
    })
}

/// Evaluate every `<expr> = <number>` occurrence in `text`, returning an
/// issue (and a corrected replacement) for each mismatch beyond
/// `TOLERANCE`, plus this check's own confidence: 0.95 if every
/// expression checked out, 0.6 if any mismatched.
#[must_use]
pub fn verify_math(text: &str) -> (Vec<VerificationIssue>, Option<String>, f64) {
    let mut issues = Vec::new();
    let mut corrected = text.to_owned();

    for captures in expression_pattern().captures_iter(text) {
        let expression = captures[1].trim().to_owned();
        let stated_raw = &captures[2];
        let Some(computed) = evaluate(&expression) else {
            continue;
        };
        let Ok(stated) = stated_raw.parse::<f64>() else {
            continue;
        };

        if (computed - stated).abs() > TOLERANCE {
            corrected = corrected.replacen(stated_raw, &format_number(computed), 1);
            let issue = VerificationIssue::new(IssueKind::MathError, format!("{expression} = {stated}"), 3)
                .with_correction_hint(format_number(computed));
            issues.push(issue);
        }
    }

    let confidence = if issues.is_empty() { 0.95 } else { 0.6 };
    let corrected = if issues.is_empty() { None } else { Some(corrected) };
    (issues, corrected, confidence)
}

fn format_number(value: f64) -> String {
    if (value.fract()).abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Evaluate a `{+, −, ×, ÷, **, grouping, decimal literals}` expression,
/// returning `None` on any parse error.
#[must_use]
pub fn evaluate(expr: &str) -> Option<f64> {
    let tokens = tokenize(expr)?;
    let mut parser = Parser { tokens: &tokens, pos: 0 };
    let value = parser.parse_expr()?;
    if parser.pos != parser.tokens.len() {
        return None;
    }
    Some(value)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    DoubleStar,
    LParen,
    RParen,
}

fn tokenize(expr: &str) -> Option<Vec<Token>> {
    let chars: Vec<char> = expr.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' => i += 1,
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' | '−' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '×' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '÷' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    tokens.push(Token::DoubleStar);
                    i += 2;
                } else {
                    tokens.push(Token::Star);
                    i += 1;
                }
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let number: String = chars[start..i].iter().collect();
                tokens.push(Token::Number(number.parse().ok()?));
            }
            _ => return None,
        }
    }

    Some(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    // expr := term (('+' | '-') term)*
    fn parse_expr(&mut self) -> Option<f64> {
        let mut value = self.parse_term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.advance();
                    value += self.parse_term()?;
                }
                Some(Token::Minus) => {
                    self.advance();
                    value -= self.parse_term()?;
                }
                _ => break,
            }
        }
        Some(value)
    }

    // term := power (('*' | '/') power)*
    fn parse_term(&mut self) -> Option<f64> {
        let mut value = self.parse_power()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.advance();
                    value *= self.parse_power()?;
                }
                Some(Token::Slash) => {
                    self.advance();
                    let divisor = self.parse_power()?;
                    if divisor == 0.0 {
                        return None;
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }
        Some(value)
    }

    // power := unary ('**' power)?  (right-associative)
    fn parse_power(&mut self) -> Option<f64> {
        let base = self.parse_unary()?;
        if matches!(self.peek(), Some(Token::DoubleStar)) {
            self.advance();
            let exponent = self.parse_power()?;
            return Some(base.powf(exponent));
        }
        Some(base)
    }

    // unary := '-' unary | primary
    fn parse_unary(&mut self) -> Option<f64> {
        if matches!(self.peek(), Some(Token::Minus)) {
            self.advance();
            return Some(-self.parse_unary()?);
        }
        self.parse_primary()
    }

    // primary := NUMBER | '(' expr ')'
    fn parse_primary(&mut self) -> Option<f64> {
        match self.advance()? {
            Token::Number(value) => Some(value),
            Token::LParen => {
                let value = self.parse_expr()?;
                if !matches!(self.advance(), Some(Token::RParen)) {
                    return None;
                }
                Some(value)
            }
            _ => None,
        }
    }
}
