use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use recruit_ai::config::AppConfig;
use recruit_ai::error::AppError;
use recruit_ai::export::write_chains_csv_path;
use recruit_ai::telemetry;
use recruit_ai::workflows::screening::{
    BatchConfig, BatchOrchestrator, BatchReportSummary, JobCatalog, MemoryCandidateStore,
    StaticJobCatalog,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Recruitment Screening Engine",
    about = "Generate and score synthetic candidate pools for a job catalog",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a full candidate generation and screening batch
    Generate(GenerateArgs),
}

#[derive(Args, Debug, Default)]
struct GenerateArgs {
    /// Override the configured number of candidates per requisition
    #[arg(long)]
    candidates_per_job: Option<usize>,
    /// Seed for a reproducible batch (defaults to a random run)
    #[arg(long)]
    seed: Option<u64>,
    /// Requisition catalog JSON file (defaults to the built-in roles)
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Write every persisted candidate chain to a CSV file
    #[arg(long)]
    export_csv: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Generate(args) => run_generate(&config, args),
    }
}

fn run_generate(config: &AppConfig, args: GenerateArgs) -> Result<(), AppError> {
    let catalog = match &args.catalog {
        Some(path) => StaticJobCatalog::from_json_path(path)?,
        None => StaticJobCatalog::standard(),
    };
    let jobs = catalog.requirements()?;

    let batch_config = BatchConfig {
        candidates_per_job: args
            .candidates_per_job
            .unwrap_or(config.generation.candidates_per_job),
        seed: args.seed.or(config.generation.seed),
        ..BatchConfig::default()
    };

    info!(
        jobs = jobs.len(),
        candidates_per_job = batch_config.candidates_per_job,
        seeded = batch_config.seed.is_some(),
        "starting screening batch"
    );

    let store = Arc::new(MemoryCandidateStore::default());
    let orchestrator = BatchOrchestrator::new(Arc::clone(&store));
    let outcome = orchestrator.run(&jobs, &batch_config, Utc::now());

    render_summary(&outcome.summary());

    if let Some(path) = &args.export_csv {
        let chains = store.chains();
        write_chains_csv_path(path, &chains)?;
        info!(
            path = %path.display(),
            rows = chains.len(),
            "exported candidate chains"
        );
    }

    Ok(())
}

fn render_summary(summary: &BatchReportSummary) {
    println!("Screening batch summary");

    println!("\nPer requisition");
    for job in &summary.jobs {
        println!(
            "- [{}] {}: {} generated, {} eligible ({:.1}%), {} failed{}",
            job.job_id,
            job.title,
            job.generated,
            job.eligible,
            job.eligibility_rate_pct,
            job.failed,
            format_means(
                job.mean_ai_score,
                job.mean_test_score,
                job.mean_composite_score
            )
        );
    }

    let totals = &summary.totals;
    println!(
        "\nTotals: {} generated, {} eligible ({:.1}%), {} failed{}",
        totals.generated,
        totals.eligible,
        totals.eligibility_rate_pct,
        totals.failed,
        format_means(
            totals.mean_ai_score,
            totals.mean_test_score,
            totals.mean_composite_score
        )
    );
}

fn format_means(ai: Option<f64>, test: Option<f64>, composite: Option<f64>) -> String {
    let mut parts = Vec::new();
    if let Some(score) = ai {
        parts.push(format!("mean AI {score:.1}"));
    }
    if let Some(score) = test {
        parts.push(format!("mean test {score:.1}"));
    }
    if let Some(score) = composite {
        parts.push(format!("mean composite {score:.1}"));
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!(" | {}", parts.join(", "))
    }
}
