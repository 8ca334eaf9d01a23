//! namecast: command-line interface
//!
//! Classify names, answer the questionnaire interactively, and fit models.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use dialoguer::Select;
use tracing::debug;

use namecast::config::{Config, build_refiner};
use namecast::form::parse_answer_list;
use namecast::{
    NameClassifier, NamecastError, NgramConfig, NgramModel, Question, Refiner, score_questionnaire,
};

/// Likert scale labels, index 0 is answer 1.
const LIKERT_ITEMS: [&str; 5] = [
    "1 - Strongly disagree",
    "2 - Disagree",
    "3 - Neutral",
    "4 - Agree",
    "5 - Strongly agree",
];

/// Namecast CLI
#[derive(Parser)]
#[command(name = "namecast")]
#[command(version = namecast::PKG_VERSION)]
#[command(about = "Name classification with questionnaire refinement")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long, env = "NAMECAST_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Model file, overriding `model.path` from the configuration.
    #[arg(short, long, env = "NAMECAST_MODEL", global = true)]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify a name
    Classify {
        /// Name to classify
        name: String,
    },

    /// Classify a name, then refine it with questionnaire answers
    Refine {
        /// Name to classify
        name: String,
        /// Comma-separated answers (1-5), one per question; prompts if omitted
        #[arg(short, long)]
        answers: Option<String>,
    },

    /// Score questionnaire answers without classifying
    Score {
        /// Comma-separated answers (1-5), one per question
        #[arg(short, long)]
        answers: String,
    },

    /// Fit a model from a CSV file with `name` and label columns
    Train {
        /// Training data
        data: PathBuf,
        /// Where to write the fitted model
        #[arg(short, long)]
        output: PathBuf,
        /// Column holding the label
        #[arg(long, default_value = "label")]
        label_column: String,
        /// Shortest character n-gram
        #[arg(long, default_value_t = 1)]
        min_n: usize,
        /// Longest character n-gram
        #[arg(long, default_value_t = 3)]
        max_n: usize,
        /// Additive smoothing constant
        #[arg(long, default_value_t = 1.0)]
        alpha: f64,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Classify { ref name } => {
            let refiner = load_refiner(&args)?;
            let classified = refiner.classify(name)?;
            println!("{}", serde_json::to_string_pretty(&classified)?);
        }

        Command::Refine {
            ref name,
            ref answers,
        } => {
            let refiner = load_refiner(&args)?;
            let classified = refiner.classify(name)?;
            let c = &classified.classification;
            eprintln!(
                "{}: {} ({:.1}%){}",
                c.name,
                c.label,
                c.confidence * 100.0,
                if classified.ambiguous {
                    " [ambiguous name]"
                } else {
                    ""
                }
            );

            let responses = match answers {
                Some(list) => parse_answer_list(list, refiner.catalog())?,
                None => ask(refiner.catalog().questions())?,
            };
            let combined = refiner.refine(c, &responses)?;
            println!("{}", serde_json::to_string_pretty(&combined)?);
        }

        Command::Score { ref answers } => {
            let catalog = load_config(&args)?.catalog()?;
            let responses = parse_answer_list(answers, &catalog)?;
            println!("{:.4}", score_questionnaire(&responses, &catalog)?);
        }

        Command::Train {
            ref data,
            ref output,
            ref label_column,
            min_n,
            max_n,
            alpha,
        } => {
            let model = train(
                data,
                label_column,
                NgramConfig::new().ngram_range(min_n, max_n).alpha(alpha),
            )?;
            model.save(output)?;
            eprintln!(
                "wrote {} ({} n-grams, labels {:?})",
                output.display(),
                model.vocabulary_size(),
                model.labels()
            );
        }
    }

    Ok(())
}

/// Load configuration, falling back to defaults when no file exists and
/// none was requested explicitly.
fn load_config(args: &Args) -> namecast::Result<Config> {
    let mut config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) if args.config.is_none() => {
            debug!(error = %e, "no configuration file, using defaults");
            Config::default()
        }
        Err(e) => return Err(e),
    };
    if let Some(ref model) = args.model {
        config.model.path = Some(model.clone());
    }
    Ok(config)
}

fn load_refiner(args: &Args) -> namecast::Result<Refiner> {
    build_refiner(&load_config(args)?)
}

/// Prompt for each question in order.
fn ask(questions: &[Question]) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut responses = Vec::with_capacity(questions.len());
    for question in questions {
        let choice = Select::new()
            .with_prompt(format!("{}. {}", question.id, question.text))
            .items(&LIKERT_ITEMS[..])
            .default(2)
            .interact()?;
        // `choice` indexes LIKERT_ITEMS, so it is at most 4.
        responses.push(choice as u8 + 1);
    }
    Ok(responses)
}

fn train(data: &Path, label_column: &str, config: NgramConfig) -> namecast::Result<NgramModel> {
    let content = fs::read_to_string(data).map_err(|e| {
        NamecastError::InvalidInput(format!("Failed to read training data {data:?}: {e}"))
    })?;
    let samples = NgramModel::samples_from_csv(&content, label_column)?;
    NgramModel::fit(samples, config)
}
