use anyhow::{Context, Result};
use chars::cli::{Cli, Command, OutputFormat};
use chars::config::CharsConfig;
use chars::{predefined, CharSet, LengthSpec, SubstringRecord};
use clap::Parser;
use memmap2::Mmap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Bytes to scan: a mapped file or a buffered stream
enum Input {
    Mapped(Mmap),
    Buffered(Vec<u8>),
}

impl Input {
    fn open(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) if path != Path::new("-") => path,
            _ => {
                let mut buffer = Vec::new();
                io::stdin()
                    .lock()
                    .read_to_end(&mut buffer)
                    .context("Failed to read stdin")?;
                return Ok(Input::Buffered(buffer));
            }
        };

        let file = File::open(path)
            .with_context(|| format!("Failed to open file: {}", path.display()))?;
        let len = file
            .metadata()
            .with_context(|| format!("Failed to stat file: {}", path.display()))?
            .len();
        if len == 0 {
            return Ok(Input::Buffered(Vec::new()));
        }

        let mmap = unsafe { Mmap::map(&file) }
            .with_context(|| format!("Failed to memory-map file: {}", path.display()))?;
        Ok(Input::Mapped(mmap))
    }

    fn as_bytes(&self) -> &[u8] {
        match self {
            Input::Mapped(mmap) => mmap,
            Input::Buffered(buffer) => buffer,
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<CharsConfig> {
    match path {
        Some(path) => CharsConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(CharsConfig::default()),
    }
}

fn run_strings(
    config: &CharsConfig,
    file: Option<PathBuf>,
    min_length: Option<usize>,
    set: Option<String>,
    offsets: bool,
    format: OutputFormat,
) -> Result<()> {
    let set = match set {
        Some(name) => config.resolve_set(&name)?,
        None => config.scan_set()?,
    };
    let min_length = min_length.unwrap_or(config.scan.min_length);
    let input = Input::open(file.as_deref())?;

    let runs = set.scanner(min_length).scan(input.as_bytes());
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match format {
        OutputFormat::Text => {
            for run in runs {
                if offsets {
                    writeln!(out, "{:>8} {}", run.offset, run.to_str_lossy())?;
                } else {
                    writeln!(out, "{}", run.to_str_lossy())?;
                }
            }
        }
        OutputFormat::Json => {
            let records: Vec<SubstringRecord> = runs.map(SubstringRecord::from).collect();
            serde_json::to_writer_pretty(&mut out, &records)?;
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn run_random(
    set: &CharSet,
    length: &LengthSpec,
    distinct: bool,
    seed: Option<u64>,
    count: usize,
) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for _ in 0..count {
        let string = if distinct {
            set.random_distinct_string(length.clone(), &mut rng)?
        } else {
            set.random_string(length.clone(), &mut rng)?
        };
        writeln!(out, "{}", string)?;
    }

    out.flush()?;
    Ok(())
}

fn run_enumerate(set: &CharSet, length: LengthSpec, limit: Option<usize>) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for string in set.strings_of_length(length).take(limit.unwrap_or(usize::MAX)) {
        writeln!(out, "{}", string)?;
    }

    out.flush()?;
    Ok(())
}

fn run_sets(config: &CharsConfig) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for name in predefined::NAMES {
        if let Some(set) = predefined::by_name(name) {
            writeln!(out, "{:<22} {:>3}  {:?}", name, set.len(), set)?;
        }
    }
    for name in config.sets.keys() {
        let set = config.resolve_set(name)?;
        writeln!(out, "{:<22} {:>3}  {:?}", name, set.len(), set)?;
    }

    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = load_config(args.config.as_deref())?;
    debug!(custom_sets = config.sets.len(), "configuration ready");

    match args.command {
        Command::Strings {
            file,
            min_length,
            set,
            offsets,
            format,
        } => run_strings(&config, file, min_length, set, offsets, format),
        Command::Random {
            set,
            length,
            distinct,
            seed,
            count,
        } => run_random(&config.resolve_set(&set)?, &length, distinct, seed, count),
        Command::Enumerate { set, length, limit } => {
            run_enumerate(&config.resolve_set(&set)?, length, limit)
        }
        Command::Sets => run_sets(&config),
    }
}
