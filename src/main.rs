use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgGroup, Parser};
use log::{error, info};

use word_tracker::base::{BoxResult, REPOSITORY_FILE};
use word_tracker::format::{self, OutputMode};
use word_tracker::index::{source_id, WordIndex};
use word_tracker::store::IndexStore;

#[derive(Parser, Debug)]
#[command(
    name = "word-tracker",
    about = "Indexes the words of a text file and reports where they occur",
    version
)]
#[command(group(ArgGroup::new("mode").required(true).args(["pf", "pl", "po"])))]
struct Cli {
    /// Text file to index
    input: PathBuf,

    /// Print the file names where each word appears
    #[arg(long)]
    pf: bool,

    /// Print the file names and line numbers
    #[arg(long)]
    pl: bool,

    /// Print the file names, line numbers and number of occurrences
    #[arg(long)]
    po: bool,

    /// Write the report to this file instead of the standard output
    #[arg(short = 'f', long = "output")]
    output: Option<PathBuf>,

    /// Repository accumulating the index across runs
    #[arg(long, env = "WORD_TRACKER_REPOSITORY", default_value = REPOSITORY_FILE)]
    repository: PathBuf,

    /// Show debug messages
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl Cli {
    fn mode(&self) -> OutputMode {
        if self.pf {
            OutputMode::Files
        } else if self.pl {
            OutputMode::Lines
        } else {
            OutputMode::Occurrences
        }
    }
}

/// Initialize the logger (RUST_LOG takes precedence)
fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: &Cli) -> BoxResult<()> {
    let store = IndexStore::new(&cli.repository);
    let mut index = WordIndex::from_tree(store.load());

    // Nothing is saved if the input cannot be read
    index.index_file(&cli.input)?;

    // The report is produced even when the repository cannot be written
    if let Err(e) = store.save(index.tree()) {
        error!("Could not save repository: {}", e);
    }

    let source = source_id(&cli.input);
    let mode = cli.mode();
    info!("Displaying {:?} format", mode);
    let report = format::render(index.records_in(&source), &source, mode);

    format::write_report(&report, cli.output.as_deref())?;
    if let Some(output) = &cli.output {
        info!("Report written to {}", output.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
