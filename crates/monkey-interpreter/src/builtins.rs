//! Builtin registry.
//!
//! Builtins are consulted only after an identifier misses in the whole
//! environment chain, so a user `let len = ...` shadows the native `len`.

use crate::value::{Builtin, Value};

const BUILTINS: &[Builtin] = &[
    Builtin { name: "len", func: len },
    Builtin { name: "puts", func: puts },
    Builtin { name: "type", func: type_of },
    Builtin { name: "str", func: to_str },
    Builtin { name: "int", func: int },
    Builtin { name: "upper", func: upper },
    Builtin { name: "lower", func: lower },
    Builtin { name: "trim", func: trim },
];

/// Returns the builtin registered under `name`, if any.
pub fn lookup(name: &str) -> Option<Value> {
    BUILTINS
        .iter()
        .find(|b| b.name == name)
        .map(|b| Value::Builtin(*b))
}

/// Names of all registered builtins, in registration order.
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|b| b.name)
}

fn wrong_arity(got: usize, want: usize) -> Value {
    Value::error(format!("wrong number of arguments. got={}, want={}", got, want))
}

fn unsupported(builtin: &str, arg: &Value) -> Value {
    Value::error(format!(
        "argument to `{}` not supported, got {}",
        builtin,
        arg.type_name()
    ))
}

/// Length of a string in characters.
fn len(args: &[Value]) -> Value {
    match args {
        [Value::Str(s)] => Value::Integer(s.chars().count() as i64),
        [other] => unsupported("len", other),
        _ => wrong_arity(args.len(), 1),
    }
}

/// Prints each argument on its own line.
fn puts(args: &[Value]) -> Value {
    for arg in args {
        println!("{}", arg);
    }
    Value::Null
}

fn type_of(args: &[Value]) -> Value {
    match args {
        [v] => Value::Str(v.type_name().to_string()),
        _ => wrong_arity(args.len(), 1),
    }
}

fn to_str(args: &[Value]) -> Value {
    match args {
        [v] => Value::Str(v.to_string()),
        _ => wrong_arity(args.len(), 1),
    }
}

fn int(args: &[Value]) -> Value {
    match args {
        [Value::Integer(n)] => Value::Integer(*n),
        [Value::Str(s)] => match s.trim().parse::<i64>() {
            Ok(n) => Value::Integer(n),
            Err(_) => Value::error(format!("could not parse {:?} as integer", s)),
        },
        [other] => unsupported("int", other),
        _ => wrong_arity(args.len(), 1),
    }
}

fn map_str(name: &str, args: &[Value], f: fn(&str) -> String) -> Value {
    match args {
        [Value::Str(s)] => Value::Str(f(s)),
        [other] => unsupported(name, other),
        _ => wrong_arity(args.len(), 1),
    }
}

fn upper(args: &[Value]) -> Value {
    map_str("upper", args, str::to_uppercase)
}

fn lower(args: &[Value]) -> Value {
    map_str("lower", args, str::to_lowercase)
}

fn trim(args: &[Value]) -> Value {
    map_str("trim", args, |s| s.trim().to_string())
}
