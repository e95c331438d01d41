//! vmmgr - demand-paged virtual memory manager
//!
//! Usage: vmmgr [OPTIONS] <INPUT>
//!
//! Reads one logical address per line from INPUT, translates each through
//! the TLB and page table (faulting pages in from the backing store), and
//! writes `logical,physical,value` lines plus the fault and TLB hit rates
//! to the output file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use demand_pager::constants::*;
use demand_pager::io::{InputBatch, OutputWriter};
use demand_pager::{BackingStore, Config, Result, Translator};

#[derive(Parser)]
#[command(name = "vmmgr")]
#[command(about = "Translate logical addresses through a TLB and a demand-paged page table")]
#[command(version)]
struct Cli {
    /// File of logical addresses, one decimal integer per line
    input: PathBuf,

    /// Binary file holding the whole virtual address space
    #[arg(long, default_value = DEFAULT_BACKING_STORE)]
    backing_store: PathBuf,

    /// Where to write translation records and rates
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Number of physical frames
    #[arg(long, default_value_t = NUM_FRAMES)]
    frames: usize,

    /// Number of TLB entries
    #[arg(long, default_value_t = TLB_CAPACITY)]
    tlb_size: usize,

    /// Do not echo translations to stdout
    #[arg(short, long)]
    quiet: bool,

    /// Print detailed translation information to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            input: cli.input,
            backing_store: cli.backing_store,
            output: cli.output,
            frames: cli.frames,
            tlb_capacity: cli.tlb_size,
            quiet: cli.quiet,
            verbose: cli.verbose,
        }
    }
}

fn main() -> ExitCode {
    let config = Config::from(Cli::parse());

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

/// Main logic separated from main() for cleaner error handling
fn run(config: &Config) -> Result<()> {
    config.validate()?;

    if config.verbose {
        eprintln!("=== vmmgr ===");
        eprintln!("Input file:    {}", config.input.display());
        eprintln!("Backing store: {}", config.backing_store.display());
        eprintln!("Output file:   {}", config.output.display());
        eprintln!("Frames:        {}", config.frames);
        eprintln!("TLB entries:   {}", config.tlb_capacity);
        eprintln!();
    }

    // Setup: store, input, output. Any failure here ends the run before translating.
    let store = BackingStore::open(&config.backing_store)?;
    if config.verbose {
        if let Some(path) = store.path() {
            eprintln!("Mapped {} ({} bytes)", path.display(), store.len());
        }
    }
    let batch = InputBatch::from_file(&config.input)?;
    let mut out = OutputWriter::create(&config.output)?;

    for skipped in &batch.skipped {
        eprintln!(
            "warning: {}:{}: skipping malformed address '{}'",
            config.input.display(),
            skipped.line,
            skipped.text
        );
    }

    if config.verbose {
        eprintln!("Logical addresses to translate: {}", batch.addresses.len());
        eprintln!();
    }

    let mut translator = Translator::new(&store, config.frames, config.tlb_capacity);

    for &raw in &batch.addresses {
        let record = match translator.translate(raw) {
            Ok(record) => record,
            Err(e) => {
                // Keep the records translated so far
                out.flush()?;
                return Err(e);
            }
        };
        out.write_record(&record)?;

        if !config.quiet {
            println!(
                "Virtual address: {}, Physical Address: {}, Value: {}",
                record.logical.raw, record.physical, record.value
            );
        }
        if config.verbose {
            eprintln!("{} -> frame {} [{}]", record.logical, record.frame, record.access);
        }
    }

    let counters = *translator.counters();
    let report = counters.report();
    out.finish(&report)?;

    if !config.quiet {
        print!("{}", report);
    }

    if config.verbose {
        eprintln!();
        eprintln!("=== Summary ===");
        eprintln!("Addresses translated: {}", counters.total);
        eprintln!("TLB hits:             {}", counters.tlb_hits);
        eprintln!("Page table hits:      {}", counters.table_hits);
        eprintln!("Page faults:          {}", counters.faults());
        eprintln!("Frames in use:        {}/{}", translator.frames_used(), config.frames);
        eprintln!("Lines skipped:        {}", batch.skipped.len());
        eprintln!("Results written to:   {}", config.output.display());
    }

    Ok(())
}
