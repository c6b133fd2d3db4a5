//! The evaluator: reduces syntax-tree nodes to runtime values.

use std::rc::Rc;

use monkey_lexer::Lexer;
use monkey_parser::Parser;
use monkey_syntax::ast::*;
use monkey_syntax::error::Result;
use tracing::{debug, trace, warn};

use crate::builtins;
use crate::config::EvalConfig;
use crate::env::Env;
use crate::value::{Function, Value};

/// Evaluates `$e` and returns it from the enclosing function when it is an
/// `Error` or a `ReturnValue`.
macro_rules! forward {
    ($e:expr) => {{
        let value = $e;
        if value.is_abrupt() {
            return value;
        }
        value
    }};
}

#[derive(Debug, Default)]
pub struct Interpreter {
    config: EvalConfig,
    /// Number of user function calls currently on the stack
    depth: usize,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EvalConfig) -> Self {
        Self { config, depth: 0 }
    }

    /// Lexes, parses and evaluates `source` in a fresh environment.
    pub fn run(&mut self, source: &str) -> Result<Value> {
        let tokens = Lexer::new(source).tokenize()?;
        let program = Parser::new(tokens).parse_program()?;
        Ok(self.eval_program(&program, &Env::new()))
    }

    /// Evaluates a program. A trailing `ReturnValue` is unwrapped; the first
    /// `Error` stops evaluation and is the result.
    pub fn eval_program(&mut self, program: &Program, env: &Env) -> Value {
        debug!(statements = program.statements.len(), "evaluating program");
        self.depth = 0;
        let mut result = Value::Null;
        for stmt in &program.statements {
            result = self.eval_statement(stmt, env);
            match result {
                Value::ReturnValue(inner) => {
                    result = *inner;
                    break;
                }
                Value::Error(ref msg) => {
                    debug!(error = %msg, "program stopped on error");
                    break;
                }
                _ => {}
            }
        }
        debug!(result = result.type_name(), "program finished");
        result
    }

    /// Evaluates a block in `env`. Unlike a program, a `ReturnValue` is kept
    /// wrapped so it can keep travelling outward to the call boundary.
    pub fn eval_block(&mut self, block: &BlockStatement, env: &Env) -> Value {
        let mut result = Value::Null;
        for stmt in &block.statements {
            result = forward!(self.eval_statement(stmt, env));
        }
        result
    }

    pub fn eval_statement(&mut self, stmt: &Statement, env: &Env) -> Value {
        match stmt {
            Statement::Let { name, value } => {
                let value = forward!(self.eval_expression(value, env));
                env.set(name.as_str(), value);
                Value::Null
            }
            Statement::Return(expr) => {
                let value = forward!(self.eval_expression(expr, env));
                Value::ReturnValue(Box::new(value))
            }
            Statement::Expression(expr) => self.eval_expression(expr, env),
        }
    }

    pub fn eval_expression(&mut self, expr: &Expression, env: &Env) -> Value {
        match expr {
            Expression::IntegerLiteral(n) => Value::Integer(*n),
            Expression::StringLiteral(s) => Value::Str(s.clone()),
            Expression::BooleanLiteral(b) => Value::from(*b),
            Expression::Identifier(name) => eval_identifier(name, env),
            Expression::Prefix { operator, right } => {
                let right = forward!(self.eval_expression(right, env));
                eval_prefix(*operator, right)
            }
            Expression::Infix { left, operator, right } => {
                let left = forward!(self.eval_expression(left, env));
                let right = forward!(self.eval_expression(right, env));
                eval_infix(*operator, &left, &right)
            }
            Expression::If { condition, consequence, alternative } => {
                let condition = forward!(self.eval_expression(condition, env));
                if condition.is_truthy() {
                    self.eval_block(consequence, env)
                } else if let Some(alt) = alternative {
                    self.eval_block(alt, env)
                } else {
                    Value::Null
                }
            }
            Expression::Function(literal) => Value::Function(Rc::new(Function {
                parameters: literal.parameters.clone(),
                body: Rc::clone(&literal.body),
                env: env.clone(),
            })),
            Expression::Call { function, arguments } => {
                let callee = forward!(self.eval_expression(function, env));
                let mut args = Vec::with_capacity(arguments.len());
                for arg in arguments {
                    args.push(forward!(self.eval_expression(arg, env)));
                }
                self.apply_function(&callee, &args)
            }
        }
    }

    /// Calls a function value. This is the only place a `ReturnValue` is
    /// stripped inside a program.
    pub fn apply_function(&mut self, callee: &Value, args: &[Value]) -> Value {
        match callee {
            Value::Function(func) => {
                if func.parameters.len() != args.len() {
                    return Value::error(format!(
                        "wrong number of arguments: got={}, want={}",
                        args.len(),
                        func.parameters.len()
                    ));
                }
                if let Some(limit) = self.config.max_call_depth {
                    if self.depth >= limit {
                        warn!(limit, "call depth limit reached");
                        return Value::error(format!("maximum call depth exceeded: {}", limit));
                    }
                }
                trace!(params = ?func.parameters, depth = self.depth, "calling function");
                let call_env = Env::new_enclosed(&func.env);
                for (param, arg) in func.parameters.iter().zip(args) {
                    call_env.set(param.as_str(), arg.clone());
                }
                self.depth += 1;
                let result = self.eval_block(&func.body, &call_env);
                self.depth -= 1;
                result.unwrap_return()
            }
            Value::Builtin(builtin) => {
                trace!(builtin = builtin.name, args = args.len(), "calling builtin");
                (builtin.func)(args)
            }
            other => Value::error(format!("not a function: {}", other.type_name())),
        }
    }
}

fn eval_identifier(name: &str, env: &Env) -> Value {
    env.get(name)
        .or_else(|| builtins::lookup(name))
        .unwrap_or_else(|| Value::error(format!("identifier not found: {}", name)))
}

fn eval_prefix(operator: PrefixOperator, right: Value) -> Value {
    match operator {
        PrefixOperator::Bang => Value::from(!right.is_truthy()),
        PrefixOperator::Minus => match right {
            Value::Integer(n) => Value::Integer(n.wrapping_neg()),
            other => Value::error(format!("unknown operator: -{}", other.type_name())),
        },
    }
}

fn eval_infix(operator: InfixOperator, left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => eval_integer_infix(operator, *a, *b),
        (Value::Str(a), Value::Str(b)) => match operator {
            InfixOperator::Plus => Value::Str(format!("{}{}", a, b)),
            InfixOperator::Eq => Value::from(a == b),
            InfixOperator::NotEq => Value::from(a != b),
            _ => unknown_operator(operator, left, right),
        },
        _ if left.type_name() != right.type_name() => Value::error(format!(
            "type mismatch: {} {} {}",
            left.type_name(),
            operator,
            right.type_name()
        )),
        // same type, neither integer nor string: only equality is defined
        _ => match operator {
            InfixOperator::Eq => Value::from(left == right),
            InfixOperator::NotEq => Value::from(left != right),
            _ => unknown_operator(operator, left, right),
        },
    }
}

fn eval_integer_infix(operator: InfixOperator, a: i64, b: i64) -> Value {
    match operator {
        InfixOperator::Plus => Value::Integer(a.wrapping_add(b)),
        InfixOperator::Minus => Value::Integer(a.wrapping_sub(b)),
        InfixOperator::Asterisk => Value::Integer(a.wrapping_mul(b)),
        InfixOperator::Slash => {
            if b == 0 {
                Value::error("division by zero")
            } else {
                Value::Integer(a.wrapping_div(b))
            }
        }
        InfixOperator::Lt => Value::from(a < b),
        InfixOperator::Gt => Value::from(a > b),
        InfixOperator::Eq => Value::from(a == b),
        InfixOperator::NotEq => Value::from(a != b),
    }
}

fn unknown_operator(operator: InfixOperator, left: &Value, right: &Value) -> Value {
    Value::error(format!(
        "unknown operator: {} {} {}",
        left.type_name(),
        operator,
        right.type_name()
    ))
}
