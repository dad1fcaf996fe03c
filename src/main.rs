//! anno-sweep: point-in-interval annotation of genomic positions
//!
//! Usage: anno-sweep <COMMAND> [OPTIONS]

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process;

use anno_sweep::commands::AnnotateCommand;
use anno_sweep::records::RecordError;

#[derive(Parser)]
#[command(name = "anno-sweep")]
#[command(version)]
#[command(about = "Report the annotation intervals that genomic point queries fall inside", long_about = None)]
struct Cli {
    /// Number of threads to use (default: number of CPUs)
    #[arg(long, short = 't', global = true)]
    threads: Option<usize>,

    /// Load annotation records whose end field does not exceed their start
    /// field instead of failing. Such records never match any position.
    #[arg(long, global = true)]
    allow_degenerate: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report every annotation interval containing each query position
    Annotate {
        /// Annotation file: tab-delimited, at least 5 fields
        /// (chrom, -, -, start, end-exclusive, ...)
        #[arg(short = 'a', long)]
        annotations: PathBuf,

        /// Query file: tab-delimited chrom and position (use - for stdin)
        #[arg(short = 'q', long)]
        queries: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sweep chromosomes one at a time on the calling thread
        #[arg(long)]
        sequential: bool,

        /// Print run statistics to stderr
        #[arg(long)]
        stats: bool,
    },
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = simple_logger::SimpleLogger::new()
        .with_level(log_level(cli.verbose))
        .init()
    {
        eprintln!("Error: failed to initialize logger: {}", e);
        process::exit(1);
    }

    // Must be set before any parsing occurs
    if cli.allow_degenerate {
        anno_sweep::config::set_allow_degenerate(true);
    }

    if let Some(n) = cli.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
        {
            eprintln!("Error: failed to initialize thread pool: {}", e);
            process::exit(1);
        }
    }

    let result = match cli.command {
        Commands::Annotate {
            annotations,
            queries,
            output,
            sequential,
            stats,
        } => run_annotate(annotations, queries, output, sequential, stats),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_annotate(
    annotations: PathBuf,
    queries: PathBuf,
    output: Option<PathBuf>,
    sequential: bool,
    stats: bool,
) -> Result<(), RecordError> {
    let mut cmd = AnnotateCommand::new();
    cmd.parallel = !sequential;
    cmd.stats = stats;

    match output {
        Some(path) => {
            let file = File::create(&path)?;
            cmd.run(&annotations, &queries, file)?;
        }
        None => {
            let stdout = io::stdout();
            let handle = stdout.lock();
            cmd.run(&annotations, &queries, handle)?;
        }
    }

    Ok(())
}
