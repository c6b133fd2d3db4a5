use std::io::{self, BufRead, Write};

use owo_colors::OwoColorize;
use monkey_interpreter::{builtins, Env, Interpreter, Value};
use monkey_lexer::Lexer;
use monkey_syntax::token::TokenKind;

use crate::{diagnostics, evaluate};

pub fn start_repl(mut interpreter: Interpreter) {
    println!("{}", "Monkey REPL. Type :help for help, :quit to exit.".bold().green());

    let mut env = Env::new();
    let mut buffer = String::new();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        let prompt = if buffer.is_empty() { ">> " } else { ".. " };
        print!("{}", prompt.cyan());
        let _ = io::stdout().flush();

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => {
                println!("\nGoodbye.");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("{}: {}", "input error".red(), e);
                break;
            }
        }
        let trimmed = line.trim();

        if buffer.is_empty() {
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.starts_with(':') {
                match trimmed {
                    ":quit" | ":q" => {
                        println!("Goodbye.");
                        break;
                    }
                    ":help" | ":h" => print_help(),
                    ":vars" => print_vars(&env),
                    ":reset" => {
                        env = Env::new();
                        println!("{}", "State reset.".yellow());
                    }
                    _ => println!("{}", "Unknown command. Type :help.".red()),
                }
                continue;
            }
        }

        buffer.push_str(&line);
        if !is_complete(&buffer) {
            continue;
        }

        match evaluate(&mut interpreter, &buffer, &env) {
            Ok(Value::Null) => {}
            Ok(value) => println!("{}", value.to_string().bright_blue()),
            Err(err) => diagnostics::report(&err),
        }
        buffer.clear();
    }
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  {}   Show this help", ":help".yellow());
    println!("  {}   Exit the REPL", ":quit".yellow());
    println!("  {}   List top-level bindings", ":vars".yellow());
    println!("  {}  Forget all bindings", ":reset".yellow());
    println!("Input continues until parentheses and braces balance.");
    let names: Vec<&str> = builtins::names().collect();
    println!("Builtins: {}", names.join(", ").bright_black());
}

fn print_vars(env: &Env) {
    let vars = env.bindings();
    if vars.is_empty() {
        println!("{}", "<no vars>".dimmed());
        return;
    }
    for (name, value) in vars {
        println!("{} = {}", name.yellow(), value.to_string().bright_blue());
    }
}

/// True once every `(` and `{` in `input` is closed. Lex errors other than
/// an open string literal count as complete so they get reported.
fn is_complete(input: &str) -> bool {
    let tokens = match Lexer::new(input).tokenize() {
        Ok(tokens) => tokens,
        Err(e) => return !e.msg.starts_with("Unterminated string"),
    };
    let mut depth = 0i32;
    for tk in &tokens {
        match tk.kind {
            TokenKind::LParen | TokenKind::LBrace => depth += 1,
            TokenKind::RParen | TokenKind::RBrace => depth -= 1,
            _ => {}
        }
    }
    depth <= 0
}
