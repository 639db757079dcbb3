//! Dividend Projection CLI
//!
//! Command-line interface for running reinvestment projections

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use dividend_projection::{
    chart::{period_label, sample_history},
    portfolio::load_holdings,
    securities::DEFAULT_CATALOG_PATH,
    LocalCatalog, Portfolio, ProjectionEngine, ProjectionInput, ScenarioResults, ScenarioRunner,
    SecurityLookup, SimulationConfig, ViewMode,
};

#[derive(Parser)]
#[command(name = "dividend-projection")]
#[command(version, about = "Project how long dividend reinvestment takes to reach a target.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a single reinvestment rate.
    Project(ProjectArgs),
    /// Compare reinvestment scenarios side by side.
    Scenarios(ScenarioArgs),
    /// Seed a comparison from a holdings CSV.
    Portfolio(PortfolioArgs),
    /// Search the security catalog.
    Search(SearchArgs),
}

#[derive(Args)]
struct ProjectArgs {
    /// Starting capital.
    #[arg(long)]
    capital: f64,
    /// Starting monthly dividend income.
    #[arg(long)]
    dividend: f64,
    /// Percent of each dividend reinvested.
    #[arg(long)]
    rate: f64,
    /// Capital to reach.
    #[arg(long)]
    target: f64,
    /// Chart granularity for the printed table.
    #[arg(long, default_value = "quarterly")]
    view: ViewMode,
    /// Write the full monthly history to this CSV file.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct ScenarioArgs {
    /// JSON config with inputs and scenarios.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override starting capital.
    #[arg(long)]
    capital: Option<f64>,
    /// Override starting monthly dividend.
    #[arg(long)]
    dividend: Option<f64>,
    /// Override target capital.
    #[arg(long)]
    target: Option<f64>,
    /// Write every scenario's monthly history to this CSV file.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct PortfolioArgs {
    /// Holdings CSV (symbol,name,shares,price,dividend_yield,frequency,manual_dividend).
    #[arg(long)]
    holdings: PathBuf,
    /// Capital to reach.
    #[arg(long)]
    target: f64,
    /// JSON config supplying scenarios and projection settings.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct SearchArgs {
    /// Symbol or name fragment.
    query: String,
    /// Catalog CSV; defaults to data/securities.csv, then the built-in list.
    #[arg(long)]
    catalog: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Project(args) => cmd_project(args),
        Commands::Scenarios(args) => cmd_scenarios(args),
        Commands::Portfolio(args) => cmd_portfolio(args),
        Commands::Search(args) => cmd_search(args),
    }
}

fn cmd_project(args: ProjectArgs) -> Result<()> {
    let input = ProjectionInput::new(args.capital, args.dividend, args.rate, args.target);
    let result = ProjectionEngine::default()
        .try_project(&input)
        .context("cannot project these inputs")?;

    let (years, months) = result.duration();
    println!("Reinvesting {:.0}% of dividends", args.rate);
    if result.target_reached(args.target) {
        println!("  Target reached in {} months ({}y {}m)", result.months, years, months);
    } else {
        println!("  Target not reached within {} months", result.months);
    }
    println!("  Final capital: {:.0}", result.final_capital);
    println!();

    let today = Local::now().date_naive();
    println!("{:>6} {:>7} {:>16} {:>14}", "Month", "Period", "Capital", "Dividend");
    println!("{}", "-".repeat(46));
    for point in sample_history(&result.history, args.view) {
        println!(
            "{:>6} {:>7} {:>16} {:>14}",
            point.month,
            period_label(today, point.month),
            point.capital,
            point.monthly_dividend,
        );
    }

    if let Some(path) = args.output {
        let mut writer = history_writer(&path)?;
        for point in &result.history {
            writer.write_record(&[
                "single".to_string(),
                point.month.to_string(),
                point.capital.to_string(),
                point.monthly_dividend.to_string(),
            ])?;
        }
        writer.flush()?;
        println!("\nFull history written to: {}", path.display());
    }

    Ok(())
}

fn cmd_scenarios(args: ScenarioArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_json_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(capital) = args.capital {
        config.initial_capital = capital;
    }
    if let Some(dividend) = args.dividend {
        config.monthly_dividend = dividend;
    }
    if let Some(target) = args.target {
        config.target_amount = target;
    }

    let results = run_comparison(&config)?;

    if let Some(path) = args.output {
        write_results_csv(&path, &results)?;
        println!("\nScenario histories written to: {}", path.display());
    }

    Ok(())
}

fn cmd_portfolio(args: PortfolioArgs) -> Result<()> {
    let holdings = load_holdings(&args.holdings)
        .with_context(|| format!("failed to load holdings {}", args.holdings.display()))?;
    let portfolio = Portfolio::new(holdings);

    println!("Portfolio: {} holdings", portfolio.holdings.len());
    println!("  Total value:     {:.0}", portfolio.total_value());
    println!("  Annual dividend: {:.0}", portfolio.total_annual_dividend());
    println!("  Monthly income:  {:.0}", portfolio.monthly_dividend());
    println!("  Yield:           {:.2}%", portfolio.dividend_yield_pct());
    println!();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_json_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    let inputs = portfolio.simulation_inputs(args.target);
    config.initial_capital = inputs.initial_capital;
    config.monthly_dividend = inputs.monthly_dividend;
    config.target_amount = inputs.target_amount;

    run_comparison(&config)?;
    Ok(())
}

fn cmd_search(args: SearchArgs) -> Result<()> {
    let catalog = match &args.catalog {
        Some(path) => LocalCatalog::from_csv_path(path)
            .with_context(|| format!("failed to load catalog {}", path.display()))?,
        None if Path::new(DEFAULT_CATALOG_PATH).exists() => {
            LocalCatalog::from_csv_path(DEFAULT_CATALOG_PATH)
                .with_context(|| format!("failed to load catalog {}", DEFAULT_CATALOG_PATH))?
        }
        None => LocalCatalog::builtin(),
    };

    let results = catalog.lookup(&args.query);
    if results.is_empty() {
        println!("No matches for \"{}\"", args.query);
        return Ok(());
    }

    println!("{:<10} {:<48} {:>10} {:>7} {:>4}", "Symbol", "Name", "Price", "Yield", "ETF");
    println!("{}", "-".repeat(83));
    for s in results {
        println!(
            "{:<10} {:<48} {:>10.2} {:>6.2}% {:>4}",
            s.symbol,
            s.name,
            s.price,
            s.dividend_yield,
            if s.is_etf { "yes" } else { "" },
        );
    }

    Ok(())
}

/// Run and print a scenario comparison
fn run_comparison(config: &SimulationConfig) -> Result<ScenarioResults> {
    let inputs = config.inputs();
    if !inputs.is_valid() {
        bail!(
            "capital, monthly dividend and target must all be positive (got {}, {}, {})",
            inputs.initial_capital,
            inputs.monthly_dividend,
            inputs.target_amount
        );
    }

    let runner = ScenarioRunner::with_config(config.projection);
    let results = runner.run_scenarios(&inputs, &config.scenarios);

    println!(
        "Capital {:.0}, monthly dividend {:.0}, target {:.0}",
        inputs.initial_capital, inputs.monthly_dividend, inputs.target_amount
    );
    println!("{:<10} {:>6} {:>8} {:>12} {:>18}", "Scenario", "Rate", "Months", "Duration", "Final capital");
    println!("{}", "-".repeat(58));
    for r in results.iter() {
        let duration = if r.target_reached { r.display_text.clone() } else { "not reached".to_string() };
        println!(
            "{:<10} {:>5.0}% {:>8} {:>12} {:>18.0}",
            r.scenario.name, r.scenario.rate, r.months, duration, r.final_capital,
        );
    }

    if let Some(best) = results.fastest() {
        println!("\nFastest: {} ({})", best.scenario.name, best.display_text);
    }

    Ok(results)
}

fn history_writer(path: &Path) -> Result<csv::Writer<std::fs::File>> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("unable to create {}", path.display()))?;
    writer.write_record(["Scenario", "Month", "Capital", "MonthlyDividend"])?;
    Ok(writer)
}

fn write_results_csv(path: &Path, results: &ScenarioResults) -> Result<()> {
    let mut writer = history_writer(path)?;
    for r in results.iter() {
        for point in &r.history {
            writer.write_record(&[
                r.scenario.id.clone(),
                point.month.to_string(),
                point.capital.to_string(),
                point.monthly_dividend.to_string(),
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}
