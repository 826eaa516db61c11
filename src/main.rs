//! Chess Winner Prediction CLI
//!
//! A classical machine learning tool for predicting chess match winners
//! from Lichess game records.

use chesspred::{Config, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chesspred")]
#[command(about = "Chess match winner prediction from Lichess game records", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new project with default config
    Init,
    /// Show the schema and winner distribution of the game CSV
    Inspect,
    /// Report feature correlations against the win indicators
    Analyze,
    /// Preprocess the games and compare classifier candidates
    Train {
        /// Model family to sweep
        #[arg(long, default_value = "all")]
        model: ModelKind,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Clone, Debug)]
enum ModelKind {
    Knn,
    Tree,
    NaiveBayes,
    All,
}

impl std::str::FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "knn" => Ok(ModelKind::Knn),
            "tree" => Ok(ModelKind::Tree),
            "nb" | "naive-bayes" => Ok(ModelKind::NaiveBayes),
            "all" => Ok(ModelKind::All),
            _ => Err(format!("Unknown model: {}. Use knn, tree, nb, or all.", s)),
        }
    }
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use table or json.", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    // Run command
    let result = match cli.command {
        Commands::Init => commands::init(&cli.config),
        Commands::Inspect => commands::inspect(&config),
        Commands::Analyze => commands::analyze(&config),
        Commands::Train { model, format } => commands::train(&config, model, format),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use chesspred::analysis::correlations;
    use chesspred::data::load_csv;
    use chesspred::pipeline::target::{BLACK_WINS, WHITE_WINS};
    use chesspred::pipeline::{Pipeline, Stage, TargetEncoder};
    use chesspred::training::{self, CandidateResult, Dataset};
    use std::collections::BTreeMap;

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        println!("\nNext steps:");
        println!("  1. Edit {} to point data.csv_path at your games CSV", config_path);
        println!("  2. Run 'chesspred inspect' to check the data");
        println!("  3. Run 'chesspred analyze' to see feature correlations");
        println!("  4. Run 'chesspred train' to compare classifiers");

        Ok(())
    }

    pub fn inspect(config: &Config) -> Result<()> {
        let table = load_csv(&config.data.csv_path)?;

        println!("Dataset");
        println!("───────────────────────────────");
        println!("  Path:     {}", config.data.csv_path);
        println!("  Rows:     {}", table.num_rows());
        println!("  Columns:  {}", table.num_columns());

        println!("\nSchema");
        println!("───────────────────────────────");
        for column in table.columns() {
            println!("  {:<20} {}", column.name(), column.kind());
        }

        let target = table.require(&config.pipeline.target_column)?;
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for value in target.values() {
            let label = value
                .category()
                .unwrap_or_else(|| "<missing>".to_string());
            *counts.entry(label).or_insert(0) += 1;
        }

        println!("\nWinner distribution");
        println!("───────────────────────────────");
        for (label, count) in &counts {
            println!(
                "  {:<12} {:>6} ({:.1}%)",
                label,
                count,
                *count as f64 / table.num_rows() as f64 * 100.0
            );
        }

        Ok(())
    }

    pub fn analyze(config: &Config) -> Result<()> {
        let table = load_csv(&config.data.csv_path)?;

        let target = TargetEncoder::from_config(&config.pipeline);
        let table = target.fit(&table)?.transform(table)?;

        // Keep the win indicators in the table so they can be correlated
        let mut pipeline_config = config.pipeline.clone();
        pipeline_config.corr = false;

        let mut pipeline = Pipeline::preprocessing(&pipeline_config);
        let table = pipeline.fit_transform(table)?;

        for indicator in [WHITE_WINS, BLACK_WINS] {
            let report = correlations(&table, indicator)?;
            println!("{}", report);
        }

        Ok(())
    }

    pub fn train(config: &Config, model: ModelKind, format: OutputFormat) -> Result<()> {
        let table = load_csv(&config.data.csv_path)?;

        let target = TargetEncoder::from_config(&config.pipeline);
        let table = target.fit(&table)?.transform(table)?;
        println!("{} decisive games after dropping draws", table.num_rows());

        let mut pipeline = Pipeline::preprocessing(&config.pipeline);
        let table = pipeline.fit_transform(table)?;

        let dataset = Dataset::from_table(&table, &config.pipeline.target_column)?;
        println!("Features: {}", dataset.feature_names.join(", "));

        let split = dataset.split(&config.split)?;

        let mut results: Vec<CandidateResult> = Vec::new();
        match model {
            ModelKind::Knn => results.extend(training::sweep_knn(&split, &config.models)?),
            ModelKind::Tree => results.extend(training::sweep_tree(&split, &config.models)?),
            ModelKind::NaiveBayes => results.extend(training::sweep_naive_bayes(&split)?),
            ModelKind::All => {
                results.extend(training::sweep_knn(&split, &config.models)?);
                results.extend(training::sweep_tree(&split, &config.models)?);
                results.extend(training::sweep_naive_bayes(&split)?);
            }
        }

        let best = training::best_candidate(&results);

        match format {
            OutputFormat::Table => {
                println!("\n=== Model Comparison ===\n");
                println!(
                    "{:<12} {:<16} {:>10} {:>10}",
                    "Model", "Params", "Train%", "Test%"
                );
                println!("{}", "-".repeat(52));
                for (i, r) in results.iter().enumerate() {
                    let marker = if Some(i) == best { " *" } else { "" };
                    println!(
                        "{:<12} {:<16} {:>9.1}% {:>9.1}%{}",
                        r.model,
                        r.params,
                        r.train_accuracy * 100.0,
                        r.test_accuracy * 100.0,
                        marker
                    );
                }
                if let Some(i) = best {
                    let r = &results[i];
                    println!("\nBest candidate:");
                    println!("  Model:          {}", r.model);
                    println!("  Params:         {}", r.params);
                    println!("  Test accuracy:  {:.1}%", r.test_accuracy * 100.0);
                }
            }
            OutputFormat::Json => {
                let entries: Vec<serde_json::Value> = results
                    .iter()
                    .map(|r| {
                        serde_json::json!({
                            "model": r.model,
                            "params": r.params,
                            "train_accuracy": r.train_accuracy,
                            "test_accuracy": r.test_accuracy,
                        })
                    })
                    .collect();
                let json = serde_json::json!({
                    "results": entries,
                    "best": best.map(|i| serde_json::json!({
                        "model": results[i].model,
                        "params": results[i].params,
                        "test_accuracy": results[i].test_accuracy,
                    })),
                });
                println!("{}", serde_json::to_string_pretty(&json).unwrap());
            }
        }

        Ok(())
    }
}
