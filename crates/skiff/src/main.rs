use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use skiff_core::Value;
use skiff_eval::Interpreter;

#[derive(Parser)]
#[command(name = "skiff", about = "skiff: a small Scheme interpreter", version)]
struct Cli {
    /// Script to execute; starts a REPL when omitted
    file: Option<String>,

    /// Arguments exposed to the script as the list `args`
    script_args: Vec<String>,

    /// Suppress the REPL banner
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    let interpreter = Interpreter::new();

    match &cli.file {
        Some(file) => run_script(&interpreter, file, &cli.script_args),
        None => repl(&interpreter, cli.quiet),
    }
}

/// Batch mode: bind `args`, evaluate `(load <script>)`, and report the
/// final value or the error on stderr.
fn run_script(interpreter: &Interpreter, file: &str, script_args: &[String]) {
    let args = script_args
        .iter()
        .map(|arg| Value::String(arg.clone()))
        .collect();
    interpreter.global_env.define("args", Value::List(args));

    let load = Value::List(vec![
        Value::symbol("load"),
        Value::String(file.to_string()),
    ]);
    match interpreter.eval(&load) {
        Ok(value) => eprintln!("{value}"),
        Err(e) => eprintln!("{e}"),
    }
}

fn repl(interpreter: &Interpreter, quiet: bool) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("failed to start line editor: {e}");
            return;
        }
    };
    let history_path = dirs::home_dir().map(|home| home.join(".skiff_history"));
    if let Some(path) = &history_path {
        let _ = rl.load_history(path);
    }

    if !quiet {
        println!("skiff v{}", env!("CARGO_PKG_VERSION"));
        println!("Type quit to exit\n");
    }

    loop {
        match rl.readline("skiff> ") {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                if input == "quit" {
                    break;
                }
                let _ = rl.add_history_entry(input);
                // Errors render to stdout like any other result.
                match interpreter.eval_str(input) {
                    Ok(value) => println!("{value}"),
                    Err(e) => println!("{e}"),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{e}");
                break;
            }
        }
    }

    if let Some(path) = &history_path {
        let _ = rl.save_history(path);
    }
    println!("Goodbye!");
}
