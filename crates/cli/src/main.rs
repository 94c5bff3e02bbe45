use std::io::{self, BufWriter};
use std::process;

use clap::{Parser, ValueEnum};
use tracing::Level;

use matcalc_core::{OutputFormat, ReaderSource, Session, SessionConfig, SessionEnd};

/// Diagnostic format for the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputArg {
    Text,
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Text => OutputFormat::Text,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

/// Interactive 4x4 matrix calculator.
#[derive(Parser)]
#[command(name = "matcalc", version, about = "Interactive 4x4 matrix calculator")]
struct Cli {
    /// Diagnostic format (text or json)
    #[arg(long, default_value = "text", value_enum)]
    output: OutputArg,

    /// Do not print the welcome banner
    #[arg(long)]
    quiet: bool,

    /// Log interpreter decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let config = SessionConfig {
        banner: !cli.quiet,
        format: cli.output.into(),
    };

    let stdin = io::stdin();
    let mut source = ReaderSource::new(stdin.lock());
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let mut session = Session::new(config);
    match session.run(&mut source, &mut out) {
        Ok(SessionEnd::Stopped) => {}
        Ok(SessionEnd::Fatal(e)) => {
            tracing::debug!(error = %e, "session ended on fatal input error");
        }
        Err(e) => {
            drop(out);
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}
