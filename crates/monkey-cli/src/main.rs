mod diagnostics;
mod repl;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;
use std::thread;

use clap::Parser as ClapParser;
use monkey_interpreter::{Env, EvalConfig, Interpreter, Value};
use monkey_lexer::Lexer;
use monkey_parser::Parser;
use monkey_syntax::error::Error as SyntaxError;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Stack of the evaluation thread. Monkey calls recurse on the host stack.
const EVAL_STACK_SIZE: usize = 256 * 1024 * 1024;

/// Run Monkey scripts or start an interactive session
#[derive(ClapParser, Debug, Clone)]
#[command(name = "monkey", version, about)]
struct Cli {
    /// Script to run; starts the REPL when omitted
    path: Option<PathBuf>,

    /// Evaluate an inline program instead of a file
    #[arg(short, long, value_name = "SOURCE", conflicts_with = "path")]
    eval: Option<String>,

    /// Maximum nesting of function calls (unlimited when unset)
    #[arg(long, env = "MONKEY_MAX_DEPTH")]
    max_depth: Option<usize>,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A lex or parse failure; `code` is the text it was found in.
    #[error("{error}")]
    Syntax {
        stage: &'static str,
        code: String,
        error: SyntaxError,
    },

    #[error("{0}")]
    Runtime(String),
}

/// Lexes, parses and evaluates `code` in `env`. A final `Error` value
/// becomes `CliError::Runtime`.
pub fn evaluate(interp: &mut Interpreter, code: &str, env: &Env) -> Result<Value, CliError> {
    let syntax = |stage, error| CliError::Syntax {
        stage,
        code: code.to_string(),
        error,
    };
    let tokens = Lexer::new(code).tokenize().map_err(|e| syntax("Lex error", e))?;
    let program = Parser::new(tokens)
        .parse_program()
        .map_err(|e| syntax("Parse error", e))?;
    match interp.eval_program(&program, env) {
        Value::Error(msg) => Err(CliError::Runtime(msg)),
        value => Ok(value),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MONKEY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run_source(interp: &mut Interpreter, code: &str) -> Result<(), CliError> {
    let value = evaluate(interp, code, &Env::new())?;
    if value != Value::Null {
        println!("{}", value);
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = EvalConfig::new();
    if let Some(depth) = cli.max_depth {
        config = config.with_max_call_depth(depth);
    }
    let mut interp = Interpreter::with_config(config);

    if let Some(code) = cli.eval {
        return run_source(&mut interp, &code);
    }
    match cli.path {
        Some(path) => {
            let code = fs::read_to_string(&path).map_err(|source| CliError::Io {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), bytes = code.len(), "running script");
            run_source(&mut interp, &code)
        }
        None => {
            repl::start_repl(interp);
            Ok(())
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let spawned = thread::Builder::new()
        .name("monkey-eval".into())
        .stack_size(EVAL_STACK_SIZE)
        .spawn({
            let cli = cli.clone();
            move || run(cli)
        });
    let result = match spawned {
        Ok(handle) => handle.join().unwrap_or_else(|_| process::exit(101)),
        Err(e) => {
            tracing::warn!("failed to spawn evaluation thread ({e}), running on the main thread");
            run(cli)
        }
    };
    if let Err(err) = result {
        diagnostics::report(&err);
        process::exit(1);
    }
}
