//! Runtime values for the Monkey interpreter.

use std::fmt;
use std::rc::Rc;

use monkey_syntax::ast::BlockStatement;

use crate::env::Env;

/// Signature shared by every native builtin.
pub type BuiltinFn = fn(&[Value]) -> Value;

/// A runtime value.
///
/// `Error` and `ReturnValue` are ordinary values: the evaluator forwards them
/// out of every composite node instead of unwinding the host stack.
#[derive(Clone)]
pub enum Value {
    /// A 64-bit signed integer
    Integer(i64),
    /// `true` or `false`
    Boolean(bool),
    /// An immutable UTF-8 string
    Str(String),
    /// The absence of a value
    Null,
    /// An evaluation failure carrying its message
    Error(String),
    /// A value produced by `return`, unwrapped at the call boundary
    ReturnValue(Box<Value>),
    /// A user-defined closure
    Function(Rc<Function>),
    /// A native function from the builtin registry
    Builtin(Builtin),
}

/// A closure: parameters, body and the environment it was defined in.
pub struct Function {
    pub parameters: Vec<String>,
    pub body: Rc<BlockStatement>,
    /// Shared with the defining scope, not copied.
    pub env: Env,
}

/// A native function with a stable name.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl Value {
    pub const TRUE: Value = Value::Boolean(true);
    pub const FALSE: Value = Value::Boolean(false);

    pub fn error(msg: impl Into<String>) -> Value {
        Value::Error(msg.into())
    }

    /// The type tag used in error messages and by the `type` builtin.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::Str(_) => "STRING",
            Value::Null => "NULL",
            Value::Error(_) => "ERROR",
            Value::ReturnValue(_) => "RETURN_VALUE",
            Value::Function(_) => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
        }
    }

    /// Only `false` and `null` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false) | Value::Null)
    }

    /// True for values that must stop evaluation of sibling nodes.
    pub fn is_abrupt(&self) -> bool {
        matches!(self, Value::Error(_) | Value::ReturnValue(_))
    }

    /// Strips a `ReturnValue` wrapper, leaving any other value untouched.
    pub fn unwrap_return(self) -> Value {
        match self {
            Value::ReturnValue(inner) => *inner,
            other => other,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        if b {
            Value::TRUE
        } else {
            Value::FALSE
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::ReturnValue(a), Value::ReturnValue(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Str(s) => write!(f, "{}", s),
            Value::Null => write!(f, "null"),
            Value::Error(msg) => write!(f, "ERROR: {}", msg),
            Value::ReturnValue(inner) => write!(f, "{}", inner),
            Value::Function(func) => write!(f, "{}", func),
            Value::Builtin(_) => write!(f, "fn() {{ builtin function }}"),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn({}) {{\n{}\n}}", self.parameters.join(", "), self.body)
    }
}

// Closures can reach themselves through their environment, so Debug never
// descends into `env`.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => f.debug_tuple("Integer").field(n).finish(),
            Value::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Null => write!(f, "Null"),
            Value::Error(msg) => f.debug_tuple("Error").field(msg).finish(),
            Value::ReturnValue(inner) => f.debug_tuple("ReturnValue").field(inner).finish(),
            Value::Function(func) => write!(f, "Function({})", func.parameters.join(", ")),
            Value::Builtin(b) => write!(f, "Builtin({})", b.name),
        }
    }
}
