//! @ai:module:intent CLI for the TamilNadai benchmark
//! @ai:module:layer presentation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tamilnadai_bench::{
    config::{split_filter, BenchmarkConfig},
    dataset::{filter_split, DatasetLoader, DatasetLoaderTrait, DatasetSummary, GoldRecord},
    metrics::{round_to, RunMetadata, Scorecard, Scorer, ScorerTrait},
    report::{
        find_scorecards, load_scorecard, render_summary, JsonReporter, JsonReporterTrait,
        ReportGenerator,
    },
    runner::{
        has_api_key, lookup_model, resolve_api_key, run_timestamp, EvaluationRunner,
        HttpModelClient, MockModelClient, ModelClientTrait, ModelSpec, RequestPacer, RunFiles,
        RunOutcome, SUPPORTED_MODELS,
    },
};

#[derive(Parser)]
#[command(name = "tamilnadai-bench")]
#[command(about = "TamilNadai benchmark for Tamil grammar error detection and correction")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a predictions file against the gold standard
    Score {
        /// Path to gold standard JSONL
        #[arg(long)]
        gold: PathBuf,

        /// Path to model predictions JSONL
        #[arg(long)]
        predictions: PathBuf,

        /// Evaluate only this split (test/validation)
        #[arg(long)]
        split: Option<String>,

        /// Print the scorecard as JSON instead of the summary
        #[arg(long)]
        json: bool,

        /// Also write JSON, Markdown and chart reports to this directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Query a model on the dataset, then score its predictions
    Run {
        /// Model to evaluate (see `models`)
        #[arg(short, long)]
        model: Option<String>,

        /// Dataset split to evaluate (test/validation/all)
        #[arg(long)]
        split: Option<String>,

        /// API key (falls back to the provider env variable, then the .env file)
        #[arg(long)]
        api_key: Option<String>,

        /// Max number of examples
        #[arg(long)]
        limit: Option<usize>,

        /// Seconds between API calls
        #[arg(long)]
        delay: Option<f64>,

        /// Echo every sentence back instead of calling a model
        #[arg(long)]
        dry_run: bool,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Results directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render Markdown and chart reports for saved scorecards
    Report {
        /// A `*_score.json` file or a directory to search for them
        #[arg(short, long)]
        scorecard: PathBuf,

        /// Output directory (defaults to next to each scorecard)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List supported models and whether an API key is available
    Models {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Load a gold dataset and print its composition
    Validate {
        /// Path to gold standard JSONL
        #[arg(long)]
        gold: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "benchmark.toml")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tamilnadai_bench=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Score {
            gold,
            predictions,
            split,
            json,
            output,
        } => score(ScoreArgs {
            gold,
            predictions,
            split,
            json,
            output,
        }),
        Commands::Run {
            model,
            split,
            api_key,
            limit,
            delay,
            dry_run,
            config,
            output,
        } => {
            run_evaluation(RunArgs {
                model,
                split,
                api_key,
                limit,
                delay,
                dry_run,
                config,
                output,
            })
            .await
        }
        Commands::Report { scorecard, output } => generate_reports(scorecard, output),
        Commands::Models { config } => list_models(config),
        Commands::Validate { gold, json } => validate(gold, json),
        Commands::Init { output } => init_config(output),
    }
}

struct ScoreArgs {
    gold: PathBuf,
    predictions: PathBuf,
    split: Option<String>,
    json: bool,
    output: Option<PathBuf>,
}

/// @ai:intent Score an existing predictions file
/// @ai:effects fs:read, fs:write
fn score(args: ScoreArgs) -> Result<()> {
    let loader = DatasetLoader::new();
    let mut gold = loader.load_gold(&args.gold)?;

    if let Some(split) = args.split.as_deref().and_then(split_filter) {
        gold = filter_split(gold, Some(split));
        tracing::info!("Filtering to split={}: {} records", split, gold.len());
    }

    let predictions = loader.load_predictions(&args.predictions)?;
    let report = Scorer::new().score(&gold, &predictions);
    let scorecard = Scorecard::offline(report);

    if args.json {
        println!("{}", JsonReporter::new().render(&scorecard)?);
    } else {
        print!("{}", render_summary(&scorecard)?);
    }

    if let Some(dir) = args.output {
        ReportGenerator::new().generate_all(&scorecard, &dir)?;
    }

    Ok(())
}

struct RunArgs {
    model: Option<String>,
    split: Option<String>,
    api_key: Option<String>,
    limit: Option<usize>,
    delay: Option<f64>,
    dry_run: bool,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
}

/// @ai:intent Query a model over the dataset, save predictions and the scorecard
/// @ai:effects network, fs:read, fs:write
async fn run_evaluation(args: RunArgs) -> Result<()> {
    let mut config = BenchmarkConfig::load_or_default(args.config.as_deref())?;

    if let Some(model) = args.model {
        config.api.model = model;
    }
    if let Some(split) = args.split {
        config.run.split = split;
    }
    if let Some(limit) = args.limit {
        config.run.limit = Some(limit);
    }
    if let Some(delay) = args.delay {
        config.api.delay_secs = delay;
    }
    if let Some(output) = args.output {
        config.paths.results_dir = output;
    }
    config.run.dry_run |= args.dry_run;

    let spec = lookup_model(&config.api.model)?;

    let loader = DatasetLoader::new();
    let gold = loader.load_gold(&config.paths.dataset)?;
    let mut gold = filter_split(gold, config.run.split_filter());
    if let Some(limit) = config.run.limit.filter(|n| *n > 0) {
        gold.truncate(limit);
    }

    let split_label = config.run.split_filter().unwrap_or("all").to_string();
    tracing::info!("Model: {} ({})", spec.id, spec.provider);
    tracing::info!("Split: {}", split_label);
    tracing::info!("Examples: {}", gold.len());

    std::fs::create_dir_all(&config.paths.results_dir).with_context(|| {
        format!(
            "Failed to create results directory: {}",
            config.paths.results_dir.display()
        )
    })?;
    let timestamp = run_timestamp();
    let files = RunFiles::new(&config.paths.results_dir, spec.id, &timestamp);
    let pacer = RequestPacer::from_secs_f64(config.api.delay_secs);

    let outcome = if config.run.dry_run {
        tracing::info!("Running in dry-run mode");
        execute(MockModelClient::echo(), pacer, &gold, &files.predictions).await?
    } else {
        let api_key = resolve_api_key(spec, args.api_key.as_deref(), &config.paths.env_file)?;
        let client = HttpModelClient::new(spec, api_key, &config.api)?;
        execute(client, pacer, &gold, &files.predictions).await?
    };
    tracing::info!("Predictions saved to: {}", files.predictions.display());

    let report = Scorer::new().score(&gold, &outcome.predictions);
    let scorecard = Scorecard::with_metadata(
        report,
        RunMetadata {
            model: spec.id.to_string(),
            provider: spec.provider.to_string(),
            split: split_label,
            total_examples: gold.len(),
            errors: outcome.errors,
            elapsed_seconds: round_to(outcome.elapsed.as_secs_f64(), 1),
            timestamp,
        },
    );

    JsonReporter::new().generate(&scorecard, &files.scorecard)?;
    tracing::info!("Scorecard saved to: {}", files.scorecard.display());
    ReportGenerator::new().render_beside(&scorecard, &files.scorecard, None)?;

    print!("{}", render_summary(&scorecard)?);
    Ok(())
}

/// @ai:intent Run the evaluation loop with a predictions file as the sink
/// @ai:effects network, fs:write
async fn execute<C: ModelClientTrait>(
    client: C,
    pacer: RequestPacer,
    gold: &[GoldRecord],
    predictions_path: &Path,
) -> Result<RunOutcome> {
    let file = File::create(predictions_path).with_context(|| {
        format!(
            "Failed to create predictions file: {}",
            predictions_path.display()
        )
    })?;
    let mut sink = BufWriter::new(file);

    let runner = EvaluationRunner::new(Arc::new(client), pacer);
    runner.run(gold, &mut sink).await
}

/// @ai:intent Render reports for one scorecard or every scorecard under a directory
/// @ai:effects fs:read, fs:write
fn generate_reports(scorecard: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let sources = if scorecard.is_dir() {
        find_scorecards(&scorecard)
    } else {
        vec![scorecard.clone()]
    };

    if sources.is_empty() {
        tracing::warn!("No scorecards found under {}", scorecard.display());
        return Ok(());
    }

    let reporter = ReportGenerator::new();
    for source in &sources {
        let card = load_scorecard(source)?;
        for path in reporter.render_beside(&card, source, output.as_deref())? {
            println!("  {}", path.display());
        }
    }

    println!("Rendered {} scorecard(s)", sources.len());
    Ok(())
}

/// @ai:intent List the model registry with key availability
/// @ai:effects env, fs:read
fn list_models(config: Option<PathBuf>) -> Result<()> {
    let config = BenchmarkConfig::load_or_default(config.as_deref())?;

    println!("{:<30} {:<10} {:<20} {:<6}", "Model", "Provider", "Key", "Ready");
    println!("{}", "-".repeat(70));

    for spec in SUPPORTED_MODELS {
        println!(
            "{:<30} {:<10} {:<20} {:<6}",
            spec.id,
            spec.provider.as_str(),
            spec.env_key,
            availability(spec, &config.paths.env_file)
        );
    }

    Ok(())
}

fn availability(spec: &ModelSpec, env_file: &Path) -> &'static str {
    if has_api_key(spec, env_file) {
        "yes"
    } else {
        "no"
    }
}

/// @ai:intent Load the gold dataset and print its composition
/// @ai:effects fs:read
fn validate(gold: PathBuf, json: bool) -> Result<()> {
    let records = DatasetLoader::new().load_gold(&gold)?;
    let summary = DatasetSummary::from_records(&records);

    if json {
        let rendered =
            serde_json::to_string_pretty(&summary).context("Failed to serialize dataset summary")?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("Dataset validation passed!");
    println!("Total records: {}", summary.total);
    println!(
        "  Error examples:   {} ({:.1}%)",
        summary.error_examples,
        summary.percent_of_total(summary.error_examples)
    );
    println!(
        "  Correct examples: {} ({:.1}%)",
        summary.correct_examples,
        summary.percent_of_total(summary.correct_examples)
    );
    println!("  Needs review:     {}", summary.needs_review);

    print_breakdown("Split", &summary, &summary.by_split);
    print_breakdown("Category", &summary, &summary.by_category);
    print_breakdown("Origin", &summary, &summary.by_origin);
    if !summary.by_error_type.is_empty() {
        print_breakdown("Error type", &summary, &summary.by_error_type);
    }

    Ok(())
}

fn print_breakdown(
    title: &str,
    summary: &DatasetSummary,
    counts: &std::collections::BTreeMap<String, usize>,
) {
    println!();
    println!("{}:", title);
    for (name, count) in DatasetSummary::most_common(counts) {
        println!(
            "  {:<30} {:>6} ({:.1}%)",
            name,
            count,
            summary.percent_of_total(count)
        );
    }
}

/// @ai:intent Initialize default configuration file
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    let config = BenchmarkConfig::default();
    config.save(&output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}
