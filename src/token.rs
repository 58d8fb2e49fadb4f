//! Tokens produced by the tokenizer and the binary operators they name.

use std::fmt;

/// A lexical token of the postfix language.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// Unary negation, written `~`.
    Negate,
    Assign,
    EndOfLine,
    Number(f64),
    Variable(String),
    /// Any character outside the token alphabet.
    Invalid(char),
}

impl Token {
    pub fn operator(c: char) -> Option<Token> {
        match c {
            '+' => Some(Token::Add),
            '-' => Some(Token::Subtract),
            '*' => Some(Token::Multiply),
            '/' => Some(Token::Divide),
            '~' => Some(Token::Negate),
            '=' => Some(Token::Assign),
            '\n' => Some(Token::EndOfLine),
            _ => None,
        }
    }

    pub fn binary_op(&self) -> Option<BinaryOp> {
        match self {
            Token::Add => Some(BinaryOp::Add),
            Token::Subtract => Some(BinaryOp::Subtract),
            Token::Multiply => Some(BinaryOp::Multiply),
            Token::Divide => Some(BinaryOp::Divide),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Add => write!(f, "`+`"),
            Token::Subtract => write!(f, "`-`"),
            Token::Multiply => write!(f, "`*`"),
            Token::Divide => write!(f, "`/`"),
            Token::Negate => write!(f, "`~`"),
            Token::Assign => write!(f, "`=`"),
            Token::EndOfLine => write!(f, "end of line"),
            Token::Number(n) => write!(f, "number {}", n),
            Token::Variable(name) => write!(f, "variable `{}`", name),
            Token::Invalid(c) => write!(f, "{:?}", c),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    /// Combines two operands in textual order: `lhs rhs op`.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Subtract => lhs - rhs,
            BinaryOp::Multiply => lhs * rhs,
            BinaryOp::Divide => lhs / rhs,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Subtract => '-',
            BinaryOp::Multiply => '*',
            BinaryOp::Divide => '/',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_characters_map_to_tokens() {
        assert_eq!(Token::operator('+'), Some(Token::Add));
        assert_eq!(Token::operator('-'), Some(Token::Subtract));
        assert_eq!(Token::operator('~'), Some(Token::Negate));
        assert_eq!(Token::operator('='), Some(Token::Assign));
        assert_eq!(Token::operator('\n'), Some(Token::EndOfLine));
        assert_eq!(Token::operator('^'), None);
        assert_eq!(Token::operator(' '), None);
    }

    #[test]
    fn only_arithmetic_tokens_are_binary() {
        assert_eq!(Token::Divide.binary_op(), Some(BinaryOp::Divide));
        assert_eq!(Token::Negate.binary_op(), None);
        assert_eq!(Token::Assign.binary_op(), None);
        assert_eq!(Token::Number(1.0).binary_op(), None);
    }

    #[test]
    fn subtract_and_divide_respect_operand_order() {
        assert_eq!(BinaryOp::Subtract.apply(10.0, 4.0), 6.0);
        assert_eq!(BinaryOp::Divide.apply(1.0, 4.0), 0.25);
        assert!(BinaryOp::Divide.apply(1.0, 0.0).is_infinite());
    }

    #[test]
    fn display_names_tokens_for_diagnostics() {
        assert_eq!(Token::EndOfLine.to_string(), "end of line");
        assert_eq!(Token::Variable("x1".into()).to_string(), "variable `x1`");
        assert_eq!(Token::Invalid('#').to_string(), "'#'");
        assert_eq!(Token::Assign.to_string(), "`=`");
    }
}
