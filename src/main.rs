use analytics::{AnalyticsEngine, PipelineReport, format_summary, partition_games, summary_headers};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::{Settings, init_tracing, load_config};
use core_types::{DerivedOpponentMetrics, GameRecord, Stat};
use forecaster::{Forecast, predict_future_stats};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::info;

/// Per-opponent box-score summaries and stat forecasts for a single player.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file. Missing files fall back to defaults.
    #[arg(long, short, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Totals and averages per opponent for any list of stat columns.
    Summary(SummaryArgs),
    /// Total and average points per opponent, highest total first.
    Points,
    /// The ranked table of tracked averages and combined metrics.
    Ranking(OutputArgs),
    /// Games the player sat out.
    Inactive,
    /// Train the forecaster and predict against one opponent.
    Predict(PredictArgs),
}

#[derive(Parser)]
struct SummaryArgs {
    /// Comma-separated stat columns (e.g. "PTS,AST,FG%").
    #[arg(long, value_delimiter = ',', default_value = "PTS,AST,TRB,3P,STL,BLK")]
    stats: Vec<Stat>,
}

#[derive(Args)]
struct OutputArgs {
    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct PredictArgs {
    /// Opponent code, e.g. "BOS". Historical codes such as "PHO" are accepted.
    #[arg(long, short)]
    opponent: String,

    #[command(flatten)]
    output: OutputArgs,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let settings = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {:?}", cli.config))?;
    let _guard = init_tracing(&settings.logging)?;
    info!(
        "Reading {} season files from {:?}",
        settings.data.season_files.len(),
        settings.data.directory
    );

    match cli.command {
        Commands::Summary(args) => handle_summary(&settings, &args.stats),
        Commands::Points => handle_points(&settings),
        Commands::Ranking(args) => handle_ranking(&settings, args.json),
        Commands::Inactive => handle_inactive(&settings),
        Commands::Predict(args) => handle_predict(&settings, &args.opponent, args.output.json),
    }
}

fn load_games(settings: &Settings) -> Result<Vec<GameRecord>> {
    loader::load_seasons(&settings.data.directory, &settings.data.season_files).with_context(|| {
        format!(
            "Failed to load season files from {:?}",
            settings.data.directory
        )
    })
}

fn run_pipeline(settings: &Settings) -> Result<PipelineReport> {
    let games = load_games(settings)?;
    AnalyticsEngine::new()
        .run(&games)
        .context("Failed to aggregate games by opponent")
}

fn new_table(headers: Vec<String>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(headers);
    table
}

fn cell(value: Option<Decimal>) -> String {
    analytics::format::format_value(value)
}

/// The handler for the `summary` command.
fn handle_summary(settings: &Settings, stats: &[Stat]) -> Result<()> {
    let games = load_games(settings)?;
    let partitioned = partition_games(&games);
    let summaries = analytics::team_summary(&partitioned.active, stats);

    let mut table = new_table(summary_headers(stats));
    for summary in &summaries {
        table.add_row(format_summary(summary, stats));
    }
    println!("{table}");
    Ok(())
}

/// The handler for the `points` command.
fn handle_points(settings: &Settings) -> Result<()> {
    let games = load_games(settings)?;
    let partitioned = partition_games(&games);

    let mut table = new_table(vec![
        "Opponent".to_string(),
        "Total Points".to_string(),
        "Average Points".to_string(),
    ]);
    for row in analytics::points_summary(&partitioned.active) {
        table.add_row(vec![row.opponent, cell(row.total_points), cell(row.average_points)]);
    }
    println!("{table}");
    Ok(())
}

fn ranking_table(rows: &[DerivedOpponentMetrics]) -> Table {
    let mut headers = vec!["Opponent".to_string()];
    headers.extend(core_types::FEATURE_NAMES.iter().map(|name| name.to_string()));

    let mut table = new_table(headers);
    for row in rows {
        let mut cells = vec![row.opponent.clone()];
        cells.extend(row.values().into_iter().map(cell));
        table.add_row(cells);
    }
    table
}

/// The handler for the `ranking` command.
fn handle_ranking(settings: &Settings, json: bool) -> Result<()> {
    let report = run_pipeline(settings)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.ranking)?);
    } else {
        println!("{}", ranking_table(&report.ranking));
    }
    Ok(())
}

/// The handler for the `inactive` command.
fn handle_inactive(settings: &Settings) -> Result<()> {
    let report = run_pipeline(settings)?;

    let mut table = new_table(vec![
        "Season".to_string(),
        "Date".to_string(),
        "Opponent".to_string(),
    ]);
    for game in &report.inactive {
        table.add_row(vec![
            game.season.clone(),
            game.date.map(|d| d.to_string()).unwrap_or_default(),
            game.opponent.clone().unwrap_or_default(),
        ]);
    }
    println!("{table}");
    println!(
        "{} of {} games inactive",
        report.inactive.len(),
        report.total_games
    );
    Ok(())
}

/// The handler for the `predict` command.
fn handle_predict(settings: &Settings, opponent: &str, json: bool) -> Result<()> {
    let report = run_pipeline(settings)?;
    let forecast = predict_future_stats(&report.ranking, opponent, &settings.model)
        .context("Failed to train the forecaster")?;

    match (forecast, json) {
        (None, true) => println!("null"),
        (None, false) => println!("No data for opponent '{opponent}'."),
        (Some(forecast), true) => println!("{}", serde_json::to_string_pretty(&forecast)?),
        (Some(forecast), false) => print_forecast(&forecast),
    }
    Ok(())
}

fn print_forecast(forecast: &Forecast) {
    let evaluation = &forecast.evaluation;
    println!(
        "Trained on {} opponents, evaluated on {}.",
        evaluation.train_rows, evaluation.test_rows
    );
    println!("Root Mean Squared Error (RMSE): {:.4}", evaluation.rmse);
    println!("Mean Absolute Error (MAE): {:.4}", evaluation.mae);
    println!("Baseline Root Mean Squared Error (RMSE): {:.4}", evaluation.baseline_rmse);
    println!("Baseline Mean Absolute Error (MAE): {:.4}", evaluation.baseline_mae);

    let mut table = new_table(vec!["Stat".to_string(), format!("vs {}", forecast.opponent)]);
    for (name, value) in forecast.projection.named_values() {
        table.add_row(vec![name.to_string(), format!("{value:.2}")]);
    }
    println!("{table}");
}
