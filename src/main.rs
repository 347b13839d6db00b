use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
    process,
};

use clap::{error::ErrorKind, Parser};
use monty::{Config, Error, Interpreter, Mode};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "monty", version)]
#[command(about = "Run a monty bytecode script")]
struct Cli {
    /// Script to run
    file: PathBuf,

    /// Start the chain in queue mode instead of stack mode
    #[arg(long)]
    queue: bool,

    /// Log more (-v debug, -vv trace). RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "monty=debug",
        _ => "monty=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn execute(cli: &Cli) -> anyhow::Result<i32> {
    let file = File::open(&cli.file).map_err(|source| Error::OpenFile {
        path: cli.file.clone(),
        source,
    })?;

    let mode = if cli.queue { Mode::Queue } else { Mode::Stack };
    let mut vm = Interpreter::new(Config::new().with_initial_mode(mode));

    debug!(file = %cli.file.display(), %mode, "running script");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let code = vm.run(BufReader::new(file), &mut out)?;

    Ok(code)
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(_) => {
            eprintln!("USAGE: monty file");
            process::exit(1);
        }
    };

    init_logging(cli.verbose);

    match execute(&cli) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("{}", err);
            let code = match err.downcast_ref::<Error>() {
                Some(err) => {
                    if let Some(line) = err.line() {
                        debug!(line, "script failed");
                    }
                    err.exit_code()
                }
                None => 1,
            };
            process::exit(code);
        }
    }
}
