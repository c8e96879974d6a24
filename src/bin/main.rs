use clap::{Args, Parser, Subcommand};
use crossterm::style::Stylize;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use t9_core::core::encoder::WordEncoder;
use t9_core::core::keypad::KeypadLayout;
use t9_core::{KeypadEngine, Settings, T9Error};

/// Build and query a T9 keypad stem index.
#[derive(Parser, Debug)]
#[clap(name = "t9_engine", version)]
struct Cli {
    /// Log more (-v info, -vv debug). RUST_LOG overrides.
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Derive numpad.json and inverted_index.json from the word list.
    Build(BuildArgs),
    /// Print the words registered under a digit string.
    Query {
        digits: String,
        #[clap(flatten)]
        artifacts: ArtifactArgs,
    },
    /// Print the keypad encoding of each word.
    Encode { words: Vec<String> },
    /// Print the keypad layout.
    Layout,
    /// Read digit strings from stdin and print matches for each line.
    Session(ArtifactArgs),
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Word list, one word per line.
    #[clap(short, long)]
    words: Option<PathBuf>,

    #[clap(long)]
    layout_out: Option<PathBuf>,

    #[clap(long)]
    index_out: Option<PathBuf>,

    /// Also write a bincode snapshot of layout + index here.
    #[clap(long)]
    snapshot: Option<PathBuf>,

    /// Shortest stem to index.
    #[clap(long, default_value_t = 1)]
    min_stem: usize,
}

#[derive(Args, Debug)]
struct ArtifactArgs {
    #[clap(long)]
    layout: Option<PathBuf>,

    #[clap(long)]
    index: Option<PathBuf>,

    /// Load this snapshot instead of the JSON artifacts.
    #[clap(long)]
    snapshot: Option<PathBuf>,
}

impl ArtifactArgs {
    fn apply(self, settings: &mut Settings) {
        if let Some(p) = self.layout {
            settings.layout_out = p;
        }
        if let Some(p) = self.index {
            settings.index_out = p;
        }
        settings.snapshot = self.snapshot;
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), T9Error> {
    let mut settings = Settings::from_env();
    match command {
        Command::Build(args) => {
            if let Some(p) = args.words {
                settings.word_list = p;
            }
            if let Some(p) = args.layout_out {
                settings.layout_out = p;
            }
            if let Some(p) = args.index_out {
                settings.index_out = p;
            }
            settings.snapshot = args.snapshot;
            settings.min_stem_length = args.min_stem;

            let (engine, stats) = KeypadEngine::from_word_list(&settings)?;
            engine.save(&settings)?;
            println!(
                "{} {} words, {} stems -> {}",
                "built".green().bold(),
                stats.words_indexed,
                stats.stems,
                settings.index_out.display()
            );
            if stats.words_discarded > 0 {
                println!("  {} words had no keypad letters", stats.words_discarded);
            }
        }
        Command::Query { digits, artifacts } => {
            artifacts.apply(&mut settings);
            let engine = KeypadEngine::open(&settings)?;
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            for word in engine.lookup(&digits)? {
                writeln!(out, "{word}")?;
            }
            out.flush()?;
        }
        Command::Encode { words } => {
            let encoder = WordEncoder::new(&KeypadLayout::build(&settings.layout)?);
            for word in &words {
                println!("{word}\t{}", encoder.encode(word));
            }
        }
        Command::Layout => {
            let layout = KeypadLayout::build(&settings.layout)?;
            for (digit, letters) in layout.groups() {
                println!("{}  {letters}", digit.to_string().bold());
            }
        }
        Command::Session(artifacts) => {
            artifacts.apply(&mut settings);
            // Loaded once; every line below reads the same snapshot.
            let engine = KeypadEngine::open(&settings)?;
            session(&engine)?;
        }
    }
    Ok(())
}

fn session(engine: &KeypadEngine) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let digits = line.trim();
        if digits.is_empty() {
            continue;
        }
        match engine.lookup(digits) {
            Ok([]) => writeln!(stdout, "{digits}: {}", "(no match)".dim())?,
            Ok(words) => writeln!(stdout, "{digits}: {}", words.join(" "))?,
            Err(e) => writeln!(stdout, "{} {e}", "invalid:".yellow())?,
        }
        stdout.flush()?;
    }
    Ok(())
}
