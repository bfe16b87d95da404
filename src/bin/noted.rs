use std::{
    io::{self, Read},
    path::PathBuf,
};

use clap::{Parser, Subcommand};
use noted::{config::EvaluatorConfig, Error, InternalResult, ModuleKey, NoteEvaluator};
use rand::{rngs::StdRng, SeedableRng};
use strum::IntoEnumIterator;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a note and print the rendered HTML
    Eval {
        /// Note file; reads stdin when omitted
        file: Option<PathBuf>,

        /// Note color exposed as {Note.color}
        #[arg(short, long, default_value = "#8B5CF6")]
        color: String,

        /// Path to config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Seed for random numbers and module colors
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List the module tokens a note can use
    Modules,
}

async fn eval(
    file: Option<&PathBuf>,
    color: &str,
    config: Option<&PathBuf>,
    json: bool,
    seed: Option<u64>,
) -> InternalResult<()> {
    let config = match config {
        Some(path) => EvaluatorConfig::from_file(path)?,
        None => EvaluatorConfig::default(),
    };
    info!("config loaded.");
    debug!("config: {:?}", config);

    let content = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let evaluator = NoteEvaluator::from_config(&config);
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let result = evaluator
        .evaluate_with_rng(Some(content.as_str()), color, &mut rng)
        .await;

    if json {
        let rendered = serde_json::to_string_pretty(&result)
            .map_err(|e| Error::internal(format!("Failed to serialize result: {}", e)))?;
        println!("{}", rendered);
    } else {
        println!("{}", result);
    }
    Ok(())
}

fn modules() {
    for key in ModuleKey::iter() {
        println!("{{{:<15} {}", format!("{}}}", key), key.description());
    }
    println!("{{{:<15} {}", "Encode(TEXT)}", "SHA-256 of TEXT");
    println!("{{{:<15} {}", "js(EXPR)}", "runs EXPR, reports OK. or Error.");
    println!("{{{:<15} {}", "Memorize(Q:A)}", "flashcard with Q shown and A hidden");
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Eval {
            file,
            color,
            config,
            json,
            seed,
        } => eval(file.as_ref(), color, config.as_ref(), *json, *seed).await,
        Command::Modules => {
            modules();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
