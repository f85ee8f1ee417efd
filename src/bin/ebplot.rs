use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ebplot::config::ChartConfig;
use ebplot::models::Timestep;
use ebplot::results::ResultSource;
use ebplot::{stats, storage, viz};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ebplot",
    version,
    about = "Plot commodity balances of energy-system optimization results"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plot one commodity balance (and optionally print series statistics).
    Plot(PlotArgs),
    /// Plot every configured (commodity, site) for every configured period.
    Periods(PeriodsArgs),
}

#[derive(Args, Debug)]
struct PlotArgs {
    /// Results file (JSON).
    #[arg(short, long)]
    results: PathBuf,
    /// Commodity to plot (e.g., Elec).
    #[arg(short, long)]
    commodity: String,
    /// Site to plot.
    #[arg(short, long)]
    site: String,
    /// Inclusive timestep range START:END. Defaults to the full horizon.
    #[arg(short, long)]
    timesteps: Option<String>,
    /// Chart configuration (JSON).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output path (.svg or .png).
    #[arg(short, long)]
    out: PathBuf,
    /// Width of the plot (overrides the config).
    #[arg(long)]
    width: Option<u32>,
    /// Height of the plot (overrides the config).
    #[arg(long)]
    height: Option<u32>,
    /// Print per-series statistics of the reshaped balance to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

#[derive(Args, Debug)]
struct PeriodsArgs {
    /// Results file (JSON).
    #[arg(short, long)]
    results: PathBuf,
    /// Chart configuration (JSON) listing plots and periods.
    #[arg(long)]
    config: PathBuf,
    /// Base directory for the timestamped result directory.
    #[arg(long, default_value = "result")]
    out_dir: PathBuf,
    /// Result name, used for the directory and as file prefix.
    #[arg(long, default_value = "ebplot")]
    name: String,
    /// Also write each reshaped balance as CSV.
    #[arg(long, default_value_t = false)]
    csv: bool,
    /// Also write each reshaped balance as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn parse_range(s: &str) -> Option<Vec<Timestep>> {
    let (a, b) = s.split_once(':')?;
    let start = a.trim().parse::<Timestep>().ok()?;
    let end = b.trim().parse::<Timestep>().ok()?;
    (start <= end).then(|| (start..=end).collect())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Plot(args) => cmd_plot(args),
        Command::Periods(args) => cmd_periods(args),
    }
}

fn cmd_plot(args: PlotArgs) -> Result<()> {
    let results = storage::load_results(&args.results)?;
    let config = match args.config.as_ref() {
        Some(path) => storage::load_config(path)?,
        None => ChartConfig::default(),
    };
    let timesteps = match &args.timesteps {
        Some(s) => parse_range(s)
            .ok_or_else(|| anyhow::anyhow!("invalid --timesteps, expected START:END"))?,
        None => results.timesteps(),
    };

    let fig = viz::figure(
        &results,
        &config.color_map(),
        &args.commodity,
        &args.site,
        Some(&timesteps),
        &config.figure_options(),
    )?;
    let width = args.width.unwrap_or(config.width);
    let height = args.height.unwrap_or(config.height);
    fig.save(&args.out, width, height, &config.locale)?;
    eprintln!("Wrote plot to {}", args.out.display());

    if args.stats {
        let balance = viz::sorted_balance(&results, &args.commodity, &args.site, &timesteps)?;
        let sides = [("created", &balance.created), ("consumed", &balance.consumed)];
        for (side, table) in sides {
            for s in stats::table_summary(table) {
                println!(
                    "{} • {}  count={}  min={} max={} mean={} std={}",
                    side,
                    s.name,
                    s.count,
                    fmt_opt(s.min),
                    fmt_opt(s.max),
                    fmt_opt(s.mean),
                    fmt_opt(s.std)
                );
            }
        }
    }

    Ok(())
}

fn cmd_periods(args: PeriodsArgs) -> Result<()> {
    let results = storage::load_results(&args.results)?;
    let config = storage::load_config(&args.config)?;
    if config.plots.is_empty() {
        anyhow::bail!("config {} lists no plots", args.config.display());
    }
    let result_dir = storage::prepare_result_directory(&args.out_dir, &args.name)?;
    let colors = config.color_map();
    let options = config.figure_options();
    let horizon = results.timesteps();
    let prefix = config.title_prefix.clone().unwrap_or_else(|| args.name.clone());

    for target in &config.plots {
        for (period, timesteps) in config.period_timesteps(&horizon) {
            let fig = viz::figure(
                &results,
                &colors,
                &target.commodity,
                &target.site,
                Some(&timesteps),
                &options,
            )
            .with_context(|| {
                format!("plotting {} in {} ({})", target.commodity, target.site, period)
            })?;
            let file = result_dir.join(format!(
                "{}-{}-{}-{}.png",
                prefix, target.commodity, target.site, period
            ));
            fig.save(&file, config.width, config.height, &config.locale)?;
        }
        if args.csv || args.json {
            let balance =
                viz::sorted_balance(&results, &target.commodity, &target.site, &horizon)?;
            let stem = format!("{}-{}-{}", prefix, target.commodity, target.site);
            if args.csv {
                storage::save_balance_csv(&balance, result_dir.join(format!("{}.csv", stem)))?;
            }
            if args.json {
                storage::save_balance_json(&balance, result_dir.join(format!("{}.json", stem)))?;
            }
        }
    }
    eprintln!("Wrote results to {}", result_dir.display());
    Ok(())
}
