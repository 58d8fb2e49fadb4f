//! # Evaluator
//!
//! A pushdown acceptor for one line of postfix input.
//!
//! Each call to [`Evaluator::evaluate`] starts in [`State::Start`] with an
//! empty [`OperandStack`] and the target set to `it`, then reads tokens
//! until it reaches [`State::Accept`] or [`State::Reject`]:
//!
//! | State               | Takes                                  | Goes to             |
//! |---------------------|----------------------------------------|---------------------|
//! | `Start`             | number, variable                       | `AfterFirstOperand` |
//! | `AfterFirstOperand` | number, variable, `=` (after a name), `~` | `Accumulating`   |
//! | `AfterFirstOperand` | end of line                            | `Committing`        |
//! | `Accumulating`      | number, variable, `~`, `+ - * /`       | `Accumulating`      |
//! | `Accumulating`      | end of line                            | `Committing`        |
//! | `Committing`        | (nothing; stores the top of the stack) | `Accept`            |
//!
//! Committing stores the popped value first; values still left below it
//! then reject the line. Anything else rejects the line. A rejected line is reported as a
//! [`Diagnostic`] and the rest of it is skipped.
use crate::diagnostic::{Diagnostic, Rejection};
use crate::error::{EvalError, InputError};
use crate::format::format_value;
use crate::source::LineSource;
use crate::symtab::{SymbolTable, DEFAULT_TARGET};
use crate::token::{BinaryOp, Token};
use crate::tokenizer::Tokenizer;

pub struct Step {
    pub operation: String,
    pub result: f64,
}

pub struct EvaluationTrace {
    pub steps: Vec<Step>,
    pub detailed_mode: bool,
}

impl EvaluationTrace {
    pub fn new(detailed_mode: bool) -> Self {
        EvaluationTrace {
            steps: Vec::new(),
            detailed_mode,
        }
    }

    pub fn add_step(&mut self, operation: String, result: f64) {
        if self.detailed_mode {
            self.steps.push(Step { operation, result });
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum State {
    Start,
    /// One operand read; `name` is set when it was a variable.
    AfterFirstOperand { name: Option<String> },
    Accumulating,
    Committing,
    Accept(f64),
    Reject(Rejection),
}

#[derive(Debug, Default)]
pub struct OperandStack {
    values: Vec<f64>,
}

impl OperandStack {
    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn pop(&mut self) -> Option<f64> {
        self.values.pop()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn negate_top(&mut self) -> Result<f64, Rejection> {
        let top = self.values.last_mut().ok_or(Rejection::Underflow {
            op: '~',
            needed: 1,
            found: 0,
        })?;
        *top = -*top;
        Ok(*top)
    }

    /// Pops the right operand, then the left, and pushes `lhs op rhs`.
    /// Returns `(lhs, rhs, result)`.
    pub fn combine(&mut self, op: BinaryOp) -> Result<(f64, f64, f64), Rejection> {
        let len = self.values.len();
        if len < 2 {
            return Err(Rejection::Underflow {
                op: op.symbol(),
                needed: 2,
                found: len,
            });
        }
        let operands = self.values.split_off(len - 2);
        let (lhs, rhs) = (operands[0], operands[1]);
        let result = op.apply(lhs, rhs);
        self.values.push(result);
        Ok((lhs, rhs, result))
    }
}

fn unexpected(token: Token, state: &'static str) -> State {
    match token {
        Token::Invalid(c) => State::Reject(Rejection::Lexical(c)),
        other => State::Reject(Rejection::UnexpectedToken {
            found: other.to_string(),
            state,
        }),
    }
}

pub struct Evaluator<S> {
    tokenizer: Tokenizer<S>,
    symbols: SymbolTable,
}

impl<S: LineSource> Evaluator<S> {
    pub fn new(source: S) -> Self {
        Self::with_tokenizer(Tokenizer::new(source))
    }

    pub fn with_tokenizer(tokenizer: Tokenizer<S>) -> Self {
        Self {
            tokenizer,
            symbols: SymbolTable::new(),
        }
    }

    /// Evaluates the next line and returns the value stored in its target.
    pub fn evaluate(&mut self) -> Result<f64, EvalError> {
        let mut trace = EvaluationTrace::new(false);
        self.evaluate_traced(&mut trace)
    }

    pub fn evaluate_traced(&mut self, trace: &mut EvaluationTrace) -> Result<f64, EvalError> {
        let mut stack = OperandStack::default();
        let mut target = DEFAULT_TARGET.to_string();
        let mut state = State::Start;

        loop {
            log::trace!("state {:?}, stack depth {}", state, stack.len());
            state = match state {
                State::Start => self.start(&mut stack, trace)?,
                State::AfterFirstOperand { name } => {
                    self.after_first_operand(name, &mut stack, &mut target, trace)?
                }
                State::Accumulating => self.accumulating(&mut stack, trace)?,
                State::Committing => self.commit(&mut stack, &target, trace),
                State::Accept(value) => {
                    log::debug!("accepted {} = {}", target, value);
                    return Ok(value);
                }
                State::Reject(kind) => return Err(EvalError::Rejected(self.reject(kind))),
            };
        }
    }

    fn start(
        &mut self,
        stack: &mut OperandStack,
        trace: &mut EvaluationTrace,
    ) -> Result<State, InputError> {
        Ok(match self.tokenizer.next_token()? {
            Token::Number(value) => {
                stack.push(value);
                State::AfterFirstOperand { name: None }
            }
            Token::Variable(name) => {
                stack.push(self.read_variable(&name, trace));
                State::AfterFirstOperand { name: Some(name) }
            }
            other => unexpected(other, "at start of expression"),
        })
    }

    fn after_first_operand(
        &mut self,
        name: Option<String>,
        stack: &mut OperandStack,
        target: &mut String,
        trace: &mut EvaluationTrace,
    ) -> Result<State, InputError> {
        let token = self.tokenizer.next_token()?;
        Ok(match token {
            Token::Number(value) => {
                stack.push(value);
                State::Accumulating
            }
            Token::Variable(other) => {
                stack.push(self.read_variable(&other, trace));
                State::Accumulating
            }
            Token::Assign => match name {
                Some(name) => {
                    stack.pop();
                    *target = name;
                    State::Accumulating
                }
                None => unexpected(Token::Assign, "after a number"),
            },
            Token::Negate => self.negate(stack, trace),
            Token::EndOfLine => State::Committing,
            other => match other.binary_op() {
                Some(op) => State::Reject(Rejection::Underflow {
                    op: op.symbol(),
                    needed: 2,
                    found: stack.len(),
                }),
                None => unexpected(other, "after first operand"),
            },
        })
    }

    fn accumulating(
        &mut self,
        stack: &mut OperandStack,
        trace: &mut EvaluationTrace,
    ) -> Result<State, InputError> {
        let token = self.tokenizer.next_token()?;
        Ok(match token {
            Token::Number(value) => {
                stack.push(value);
                State::Accumulating
            }
            Token::Variable(name) => {
                stack.push(self.read_variable(&name, trace));
                State::Accumulating
            }
            Token::Negate => self.negate(stack, trace),
            Token::EndOfLine => State::Committing,
            other => match other.binary_op() {
                Some(op) => match stack.combine(op) {
                    Ok((lhs, rhs, result)) => {
                        trace.add_step(
                            format!("{} {} {}", format_value(lhs), op.symbol(), format_value(rhs)),
                            result,
                        );
                        State::Accumulating
                    }
                    Err(rejection) => State::Reject(rejection),
                },
                None => unexpected(other, "inside expression"),
            },
        })
    }

    fn commit(&mut self, stack: &mut OperandStack, target: &str, trace: &mut EvaluationTrace) -> State {
        let Some(value) = stack.pop() else {
            return State::Reject(Rejection::NothingToCommit);
        };
        // The store happens even when leftovers reject the line.
        self.symbols.assign(target, value);
        trace.add_step(format!("{} = {}", target, format_value(value)), value);
        if !stack.is_empty() {
            return State::Reject(Rejection::Residual(stack.len() + 1));
        }
        State::Accept(value)
    }

    fn negate(&mut self, stack: &mut OperandStack, trace: &mut EvaluationTrace) -> State {
        match stack.negate_top() {
            Ok(value) => {
                trace.add_step(format!("~ {}", format_value(-value)), value);
                State::Accumulating
            }
            Err(rejection) => State::Reject(rejection),
        }
    }

    fn read_variable(&mut self, name: &str, trace: &mut EvaluationTrace) -> f64 {
        let value = self.symbols.fetch(name);
        trace.add_step(name.to_string(), value);
        value
    }

    fn reject(&mut self, kind: Rejection) -> Diagnostic {
        let column = self.tokenizer.position().saturating_sub(1);
        let diagnostic = Diagnostic::new(kind, self.tokenizer.current_line(), column);
        log::debug!("rejected at column {}: {}", column, diagnostic);
        self.tokenizer.flush();
        diagnostic
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn tokenizer(&self) -> &Tokenizer<S> {
        &self.tokenizer
    }

    pub fn source_mut(&mut self) -> &mut S {
        self.tokenizer.source_mut()
    }
}
