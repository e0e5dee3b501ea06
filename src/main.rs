use anyhow::Context;
use clap::Parser;
use crossword_csp::{find_fill, render_grid, FillConfig, Puzzle, WordList};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Fill a crossword structure with words from a word list.
#[derive(Parser, Debug)]
#[command(name = "crossword-csp", version, about)]
struct Cli {
    /// Structure file: one line per row, `_` for open cells, anything else for blocks.
    structure: PathBuf,

    /// Word list: one word per line.
    words: PathBuf,

    /// Also write the filled grid to this file.
    output: Option<PathBuf>,

    /// Skip the arc-consistency pass before searching.
    #[arg(long, default_value_t = false)]
    skip_arc_consistency: bool,

    /// Give up after trying this many (slot, word) choices.
    #[arg(long)]
    state_limit: Option<u64>,

    /// Print fill statistics.
    #[arg(long, default_value_t = false)]
    stats: bool,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let structure = fs::read_to_string(&cli.structure)
        .with_context(|| format!("reading structure from {}", cli.structure.display()))?;
    let puzzle = Puzzle::from_structure(&structure)
        .with_context(|| format!("parsing structure in {}", cli.structure.display()))?;

    let word_list = fs::read_to_string(&cli.words)
        .with_context(|| format!("reading words from {}", cli.words.display()))?;
    let words = WordList::parse(&word_list)
        .with_context(|| format!("parsing words in {}", cli.words.display()))?;

    let mut config = FillConfig::default().with_initial_arc_consistency(!cli.skip_arc_consistency);
    if let Some(limit) = cli.state_limit {
        config = config.with_state_limit(limit);
    }

    let result = match find_fill(&puzzle, &words, &config) {
        Ok(result) => result,
        Err(error) => {
            log::debug!("fill failed: {} ({:?})", error, error.statistics);
            println!("No solution.");
            return Ok(ExitCode::FAILURE);
        }
    };

    let display_grid = render_grid(&puzzle, &words, &result.assignment);

    if cli.stats {
        println!("{:?}", result.statistics);
    }
    println!("{}", display_grid);

    if let Some(output) = &cli.output {
        fs::write(output, &display_grid)
            .with_context(|| format!("writing grid to {}", output.display()))?;
        log::info!("written grid to {}", output.display());
    }

    Ok(ExitCode::SUCCESS)
}
