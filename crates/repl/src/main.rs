//! lispr - read-eval-print loop for the Lisp interpreter.
//!
//! Usage:
//!   lispr                # start with an empty global environment
//!   lispr prelude.lisp   # load definitions from a file first
//!   lispr p              # shorthand for `lispr prelude.lisp`

mod source;

use clap::Parser as ClapParser;
use lisp_runtime::{Arena, DEFAULT_NCELLS, Interpreter};
use source::{Chained, InteractiveSource, PromptState};
use std::path::PathBuf;
use std::process;

#[derive(ClapParser)]
#[command(name = "lispr")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Read-eval-print loop for the Lisp interpreter", long_about = None)]
struct Args {
    /// File to load before entering the REPL. `p` is shorthand for `prelude.lisp`.
    file: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let prelude_path = args.file.map(|f| if f == "p" { PathBuf::from("prelude.lisp") } else { PathBuf::from(f) });

    let ncells = match std::env::var("LISP_NCELLS") {
        Ok(s) => match s.parse::<usize>() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(value = %s, "LISP_NCELLS did not parse as a usize, using the default");
                DEFAULT_NCELLS
            }
        },
        Err(_) => DEFAULT_NCELLS,
    };
    tracing::info!(ncells, "arena configured");

    let file = prelude_path.as_deref().and_then(|path| match source::FileSource::open(path) {
        Ok(f) => Some(f),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not open prelude file, skipping");
            None
        }
    });

    let state = PromptState::new();
    let interactive = match InteractiveSource::new(state.clone()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: could not start the line editor: {e}");
            process::exit(1);
        }
    };
    let input = Chained::new(file, interactive);

    let arena = Arena::new(ncells);
    let mut interp = Interpreter::new(arena, Box::new(input), Box::new(std::io::stdout()));

    run(&mut interp, &state);
}

fn run(interp: &mut Interpreter, state: &PromptState) {
    loop {
        state.set_free_cells(interp.arena.free_cells());
        state.mark_fresh();

        let expr = match interp.read_top_level() {
            Ok(Some(expr)) => expr,
            Ok(None) => break,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match interp.eval(expr, interp.global_env) {
            Ok(value) => {
                let names = interp.prim_names();
                let mut line = Vec::new();
                lisp_runtime::printer::print_value(&interp.arena, &names, value, &mut line)
                    .expect("printing to an in-memory buffer does not fail");
                line.push(b'\n');
                interp.output().write_all(&line).expect("writing to stdout does not fail");
            }
            Err(signal) => println!("ERR {}", signal.code()),
        }

        lisp_runtime::reclaim::reclaim(&mut interp.arena, interp.global_env);
    }
}
