use clap::{Parser, Subcommand};

use vilex_cli::commands::{self, build_ops, classify_ops, config_ops, table_ops};
use vilex_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(
    name = "vilextool",
    about = "Vietnamese lexicon curation and Telex safe-word table builder"
)]
struct Cli {
    /// Custom settings TOML (see `config export-settings`)
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Custom blacklist and loanword TOML (see `config export-exclusions`)
    #[arg(long, global = true)]
    exclusions: Option<String>,
    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Output format: bin, rust or both
    #[arg(long, default_value = "bin")]
    format: String,
    /// Key notation in the Rust table: symbolic or numeric
    #[arg(long, default_value = "symbolic")]
    notation: String,
    /// Rust table path, relative to the current directory (default: safe_words.rs in the output directory)
    #[arg(long)]
    rust_out: Option<String>,
    /// Write a JSON report of the run
    #[arg(long)]
    report: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Split a raw Vietnamese wordlist into curated and rejected lists
    Classify {
        /// Raw wordlist, one entry per line
        input: String,
        /// Curated output file
        curated_out: String,
        /// Rejected output file
        rejected_out: String,
        /// Write a JSON report of the run
        #[arg(long)]
        report: Option<String>,
    },
    /// Build safe-word tables from a corpus and a curated vocabulary
    Build {
        /// Corpus file: `english_word telex_output` per line
        #[arg(long)]
        corpus: String,
        /// Curated Vietnamese vocabulary
        #[arg(long)]
        vocabulary: String,
        /// Output directory for the tables
        #[arg(long)]
        out_dir: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Classify, then build from the curated list, all in one work directory
    Pipeline {
        /// Raw wordlist
        #[arg(long)]
        raw: String,
        /// Corpus file
        #[arg(long)]
        corpus: String,
        /// Directory for the curated lists and the tables
        #[arg(long)]
        work_dir: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show per-length record counts of a table directory
    Info {
        /// Table directory
        dir: String,
    },
    /// Check whether a word is in the safe tables
    Lookup {
        /// Table directory
        dir: String,
        /// English word
        word: String,
    },
    /// Re-read tables and check integrity, ordering and collisions
    Verify {
        /// Table directory
        dir: String,
        /// Corpus to check for collisions
        #[arg(long, requires = "vocabulary")]
        corpus: Option<String>,
        /// Curated vocabulary to check for collisions
        #[arg(long, requires = "corpus")]
        vocabulary: Option<String>,
    },
    /// Explain the classification of a word and, with OUTPUT, its resolution (JSON)
    Explain {
        /// Word to explain
        word: String,
        /// Telex output of the word
        output: Option<String>,
        /// Curated vocabulary for the oracle
        #[arg(long)]
        vocabulary: Option<String>,
    },
    /// Export or validate configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Export default settings as TOML
    ExportSettings,
    /// Export default blacklist and loanwords as TOML
    ExportExclusions,
    /// Validate a custom settings TOML file
    ValidateSettings {
        /// Path to the TOML file
        file: String,
    },
    /// Validate a custom exclusions TOML file
    ValidateExclusions {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    commands::init_config(cli.settings.as_deref(), cli.exclusions.as_deref());

    match cli.command {
        Command::Classify {
            input,
            curated_out,
            rejected_out,
            report,
        } => classify_ops::classify(&input, &curated_out, &rejected_out, report.as_deref()),
        Command::Build {
            corpus,
            vocabulary,
            out_dir,
            output,
        } => {
            let opts =
                build_ops::build_options(&output.format, &output.notation, output.rust_out.as_deref());
            build_ops::build(&corpus, &vocabulary, &out_dir, &opts, output.report.as_deref());
        }
        Command::Pipeline {
            raw,
            corpus,
            work_dir,
            output,
        } => {
            let opts =
                build_ops::build_options(&output.format, &output.notation, output.rust_out.as_deref());
            build_ops::pipeline(&raw, &corpus, &work_dir, &opts, output.report.as_deref());
        }
        Command::Info { dir } => table_ops::info(&dir),
        Command::Lookup { dir, word } => table_ops::lookup(&dir, &word),
        Command::Verify {
            dir,
            corpus,
            vocabulary,
        } => table_ops::verify(&dir, corpus.as_deref(), vocabulary.as_deref()),
        Command::Explain {
            word,
            output,
            vocabulary,
        } => table_ops::explain_cmd(&word, output.as_deref(), vocabulary.as_deref()),
        Command::Config { action } => match action {
            ConfigAction::ExportSettings => config_ops::settings_export(),
            ConfigAction::ExportExclusions => config_ops::exclusions_export(),
            ConfigAction::ValidateSettings { file } => config_ops::settings_validate(&file),
            ConfigAction::ValidateExclusions { file } => config_ops::exclusions_validate(&file),
        },
    }
}
