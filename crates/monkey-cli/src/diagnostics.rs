use owo_colors::OwoColorize;

use monkey_syntax::error::Error as SyntaxError;

use crate::CliError;

/// Prints `err` to stderr, with the offending source line for syntax errors
/// and a hint for runtime errors.
pub fn report(err: &CliError) {
    match err {
        CliError::Io { .. } => {
            eprintln!("{}: {}", "error".red().bold(), err.to_string().red());
        }
        CliError::Syntax { stage, code, error } => render_syntax_error(stage, code, error),
        CliError::Runtime(msg) => {
            eprintln!("{}: {}", "Runtime error".red().bold(), msg.red());
            if let Some(hint) = hint_for(msg) {
                eprintln!("{}", format!("Help: {}", hint).yellow());
            }
        }
    }
}

fn render_syntax_error(stage: &str, code: &str, err: &SyntaxError) {
    eprintln!("{}: {}", stage.red().bold(), err.msg.red());
    if let (Some(line), Some(col)) = (err.line, err.col) {
        eprintln!("  --> line {}, column {}", line, col);
        if let Some(src_line) = code.lines().nth(line.saturating_sub(1)) {
            let gutter = format!("{:3} | ", line);
            eprintln!("     |");
            eprintln!("{}{}", gutter.bright_black(), src_line);
            eprintln!("{}", caret_line(gutter.len(), col).red());
            eprintln!("     |");
        }
    }
    if let Some(hint) = hint_for(&err.msg) {
        eprintln!("{}", format!("Help: {}", hint).yellow());
    }
}

fn caret_line(indent: usize, col: usize) -> String {
    let mut marker = " ".repeat(indent + col.saturating_sub(1));
    marker.push_str("^ error here");
    marker
}

/// A short suggestion keyed on the family of an error message.
pub fn hint_for(msg: &str) -> Option<&'static str> {
    let hint = if msg.starts_with("identifier not found") {
        "Did you forget to bind this name with 'let'?"
    } else if msg.starts_with("type mismatch") {
        "Both operands must have the same type, e.g. 1 + 2 or \"a\" + \"b\"."
    } else if msg.starts_with("unknown operator") {
        "Integers support + - * / < > == !=; strings support + == !=; other values only == and !=."
    } else if msg.starts_with("not a function") {
        "Only fn literals and builtins can be called."
    } else if msg.starts_with("wrong number of arguments") {
        "Check how many parameters the function declares."
    } else if msg.starts_with("argument to") {
        "Call type(x) to see what kind of value you passed."
    } else if msg == "division by zero" {
        "Check the divisor before dividing."
    } else if msg.starts_with("maximum call depth exceeded") {
        "Make sure the recursion has a base case, or raise --max-depth."
    } else if msg.starts_with("no prefix parse function") {
        "An expression was expected here."
    } else if msg.starts_with("expected next token") {
        "Check for a missing parenthesis, brace or '='."
    } else if msg.starts_with("Unterminated string") {
        "Make sure every \" has a matching closing \"."
    } else {
        return None;
    };
    Some(hint)
}
