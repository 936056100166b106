use airvision_core::PolicyLevers;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "airvision", about = "Delhi-NCR air quality: live, forecast, sources and policy what-ifs")]
pub struct Cli {
    /// JSON config file; defaults apply when omitted.
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Override the models directory from the config.
    #[arg(long, global = true)]
    pub models_dir: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Live AQI and health advisory for a city.
    Live {
        #[arg(long)]
        city: Option<String>,
    },
    /// Forecast anchored to today's live reading.
    Forecast,
    /// Source attribution from the classifier's importances.
    Sources,
    /// What-if policy simulation.
    Policy(LeverArgs),
    /// Station readings across NCR.
    Map,
    /// Full daily snapshot.
    Snapshot(LeverArgs),
    /// Prometheus text exposition of a snapshot.
    Metrics,
}

#[derive(Debug, Clone, Args)]
pub struct LeverArgs {
    /// Traffic emission reduction, percent (0-60).
    #[arg(long)]
    pub traffic: Option<f64>,
    /// Dust control measures, percent (0-60).
    #[arg(long)]
    pub dust: Option<f64>,
    /// Industrial emission reduction, percent (0-60).
    #[arg(long)]
    pub industry: Option<f64>,
    /// Photochemical reduction, percent (0-60).
    #[arg(long)]
    pub photochemical: Option<f64>,
}

impl LeverArgs {
    /// Flags override the configured levers one by one.
    pub fn apply(&self, base: PolicyLevers) -> PolicyLevers {
        PolicyLevers::new(
            self.traffic.unwrap_or(base.traffic),
            self.dust.unwrap_or(base.dust_stubble),
            self.industry.unwrap_or(base.industry),
            self.photochemical.unwrap_or(base.photochemical),
        )
    }
}
