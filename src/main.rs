use anyhow::Result;
use clap::builder::TypedValueParser;
use clap::Parser;
use sequence_db::import::{import_file, DEFAULT_BATCH_SIZE};
use sequence_db::{Menu, SequenceDb, DEFAULT_MINIMUM_OVERLAP};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sequence-db")]
#[command(about = "Interactive in-memory DNA sequence database")]
struct Args {
    #[arg(short = 'm', long, default_value_t = DEFAULT_MINIMUM_OVERLAP,
          value_parser = clap::value_parser!(u64).range(1..).map(|v| v as usize),
          help = "Minimum overlap length for the overlap command")]
    min_overlap: usize,

    #[arg(short = 'l', long = "load",
          help = "Plain or FASTA file (.gz allowed) to import before the menu starts")]
    load: Vec<PathBuf>,

    #[arg(short = 'b', long, default_value_t = DEFAULT_BATCH_SIZE,
          help = "Batch size for importing")]
    batch_size: usize,

    #[arg(short = 'v', long, default_value = "false", help = "Verbose logging")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 日志写到 stderr，stdout 留给菜单
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut db = SequenceDb::new();
    for path in &args.load {
        import_file(&mut db, path, args.batch_size)?;
    }
    if !args.load.is_empty() {
        info!("Database holds {} sequences", db.len());
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(&mut db, stdin.lock(), BufWriter::new(stdout.lock()), args.min_overlap).run()?;

    Ok(())
}
