use anyhow::{Context, Result, anyhow};
use argh::FromArgs;
use std::fs::File;
use std::io::BufReader;
use wish::Interpreter;
use wish::io_adapters::{BatchSource, EditorSource};

#[derive(FromArgs)]
/// A minimal command interpreter.
struct Args {
    #[argh(positional)]
    /// script to run without prompting; commands are read interactively when omitted.
    batch_file: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    if let Err(err) = run() {
        log::error!("{err:#}");
        wish::report_error(&mut std::io::stderr());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let argv: Vec<String> = std::env::args().collect();
    let (program, rest) = argv.split_first().context("missing program name")?;
    let rest: Vec<&str> = rest.iter().map(String::as_str).collect();
    // Help requests and unknown flags are invocation errors like any other.
    let args = Args::from_args(&[program.as_str()], &rest)
        .map_err(|early| anyhow!("invalid invocation: {}", early.output.trim_end()))?;

    let mut interpreter = Interpreter::default();
    match args.batch_file {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("cannot open {path}"))?;
            interpreter.run(&mut BatchSource::new(BufReader::new(file)));
        }
        None => {
            let mut source = EditorSource::new().context("cannot initialise the terminal")?;
            interpreter.run(&mut source);
        }
    }
    Ok(())
}
