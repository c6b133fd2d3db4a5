use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};

use clap::{ArgAction, Parser};
use serde::Serialize;

use monkey_interpreter::{Env, EvalConfig, Interpreter, Value};
use monkey_lexer::Lexer;
use monkey_parser::Parser as MonkeyParser;

#[derive(Parser, Debug)]
#[command(name = "monkey-bench", about = "Run Monkey benchmarks")]
struct Cli {
    /// Specific test(s) to run by name, e.g. fibonacci. Runs every discovered script when omitted.
    #[arg(short = 't', long = "test", action = ArgAction::Append)]
    tests: Vec<String>,

    /// Iterations per test (measured)
    #[arg(short = 'n', long = "iterations", default_value_t = 10)]
    iterations: u32,

    /// Warmup iterations (not measured)
    #[arg(short = 'w', long = "warmup", default_value_t = 2)]
    warmup: u32,

    /// Output JSON file path; default: benchmark/results/<timestamp>.json
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Also discover scripts under demos/
    #[arg(long = "include-demos", default_value_t = false)]
    include_demos: bool,

    /// Call depth limit used while evaluating (unlimited when unset)
    #[arg(long = "max-depth", env = "MONKEY_MAX_DEPTH")]
    max_depth: Option<usize>,

    /// List discovered tests and exit
    #[arg(long = "list", default_value_t = false)]
    list: bool,
}

#[derive(Debug, Serialize)]
struct BenchResult {
    name: String,
    iterations: u32,
    avg_total_ms: f64,
    min_total_ms: f64,
    max_total_ms: f64,
    avg_lex_ms: f64,
    avg_parse_ms: f64,
    avg_eval_ms: f64,
    result: String,
}

#[derive(Debug, Serialize)]
struct OutputDoc {
    timestamp: String,
    monkey_version: String,
    benchmarks: Vec<BenchResult>,
}

#[derive(Debug, Clone)]
struct ScriptCase {
    name: String,
    path: PathBuf,
}

#[derive(Debug, Default)]
struct Timings {
    totals: Vec<f64>,
    lexes: Vec<f64>,
    parses: Vec<f64>,
    evals: Vec<f64>,
}

fn workspace_root() -> PathBuf {
    // crates/monkey-bench -> crates -> root
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest
        .ancestors()
        .nth(2)
        .map(Path::to_path_buf)
        .unwrap_or(manifest)
}

fn discover_scripts(include_demos: bool) -> Vec<ScriptCase> {
    let root = workspace_root();
    let mut out = Vec::new();

    let mut candidates = vec![root.join("benchmark/scripts")];
    if include_demos {
        candidates.push(root.join("demos"));
    }

    for dir in candidates {
        let Ok(entries) = fs::read_dir(&dir) else { continue };
        for e in entries.flatten() {
            let p = e.path();
            if p.extension().and_then(|s| s.to_str()) == Some("monkey") {
                let name = p.file_stem().and_then(|s| s.to_str()).unwrap_or("").to_string();
                out.push(ScriptCase { name, path: p });
            }
        }
    }

    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}

/// Runs one full lex/parse/eval pass, returning the final value and the
/// time spent in each stage.
fn run_once(src: &str, config: &EvalConfig) -> Result<(Value, [Duration; 3]), String> {
    let mut t = Instant::now();
    let tokens = Lexer::new(src).tokenize().map_err(|e| format!("lex error: {}", e))?;
    let t_lex = t.elapsed();

    t = Instant::now();
    let program = MonkeyParser::new(tokens)
        .parse_program()
        .map_err(|e| format!("parse error: {}", e))?;
    let t_parse = t.elapsed();

    t = Instant::now();
    let value = Interpreter::with_config(config.clone()).eval_program(&program, &Env::new());
    let t_eval = t.elapsed();

    if let Value::Error(msg) = &value {
        return Err(format!("runtime error: {}", msg));
    }
    Ok((value, [t_lex, t_parse, t_eval]))
}

fn measure_script(src: &str, iterations: u32, warmup: u32, config: &EvalConfig) -> Result<(Timings, Value), String> {
    for _ in 0..warmup {
        run_once(src, config)?;
    }

    let mut timings = Timings::default();
    let mut last = Value::Null;
    for _ in 0..iterations {
        let t0 = Instant::now();
        let (value, [lex, parse, eval]) = run_once(src, config)?;
        timings.totals.push(dur_ms(t0.elapsed()));
        timings.lexes.push(dur_ms(lex));
        timings.parses.push(dur_ms(parse));
        timings.evals.push(dur_ms(eval));
        last = value;
    }
    Ok((timings, last))
}

fn dur_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

fn stats(vals: &[f64]) -> (f64, f64, f64) {
    if vals.is_empty() {
        return (0.0, 0.0, 0.0);
    }
    let min = vals.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = vals.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let avg = vals.iter().sum::<f64>() / (vals.len() as f64);
    (avg, min, max)
}

fn fail(msg: String) -> ! {
    eprintln!("{}", msg);
    process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    let config = match cli.max_depth {
        Some(depth) => EvalConfig::new().with_max_call_depth(depth),
        None => EvalConfig::new(),
    };

    let mut scripts = discover_scripts(cli.include_demos);

    if cli.list {
        println!("Discovered tests:");
        for s in &scripts {
            println!("- {} ({})", s.name, s.path.display());
        }
        return;
    }

    if !cli.tests.is_empty() {
        let wanted: HashSet<_> = cli.tests.iter().map(|s| s.to_lowercase()).collect();
        scripts.retain(|s| wanted.contains(&s.name.to_lowercase()));
        if scripts.is_empty() {
            eprintln!("No matching tests. Use --list to see available.");
            process::exit(2);
        }
    }

    if scripts.is_empty() {
        eprintln!("No .monkey scripts found in benchmark/scripts.");
        process::exit(2);
    }

    let mut results = Vec::new();

    for case in &scripts {
        let src = fs::read_to_string(&case.path)
            .unwrap_or_else(|e| fail(format!("Failed to read {}: {}", case.path.display(), e)));
        let (timings, value) = match measure_script(&src, cli.iterations, cli.warmup, &config) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("{:>12}: skipped ({})", case.name, e);
                continue;
            }
        };
        let (avg_t, min_t, max_t) = stats(&timings.totals);
        let (avg_l, _, _) = stats(&timings.lexes);
        let (avg_p, _, _) = stats(&timings.parses);
        let (avg_e, _, _) = stats(&timings.evals);

        println!(
            "{:>12}: total avg={:.3}ms min={:.3}ms max={:.3}ms | lex={:.3}ms parse={:.3}ms eval={:.3}ms",
            case.name, avg_t, min_t, max_t, avg_l, avg_p, avg_e
        );

        results.push(BenchResult {
            name: case.name.clone(),
            iterations: cli.iterations,
            avg_total_ms: avg_t,
            min_total_ms: min_t,
            max_total_ms: max_t,
            avg_lex_ms: avg_l,
            avg_parse_ms: avg_p,
            avg_eval_ms: avg_e,
            result: value.to_string(),
        });
    }

    let out_path = match cli.output {
        Some(p) => p,
        None => {
            // Windows-safe filename timestamp
            let ts_file = chrono::Utc::now().format("%Y-%m-%d_%H-%M-%SZ").to_string();
            workspace_root()
                .join("benchmark/results")
                .join(format!("{}.json", ts_file))
        }
    };

    let doc = OutputDoc {
        timestamp: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        monkey_version: env!("CARGO_PKG_VERSION").to_string(),
        benchmarks: results,
    };

    let json = serde_json::to_string_pretty(&doc)
        .unwrap_or_else(|e| fail(format!("Failed to serialize results: {}", e)));
    if let Some(parent) = out_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            fail(format!("Failed to create {}: {}", parent.display(), e));
        }
    }
    if let Err(e) = fs::write(&out_path, json) {
        fail(format!("Failed to write {}: {}", out_path.display(), e));
    }

    println!("\nSaved results to {}", out_path.display());
}
