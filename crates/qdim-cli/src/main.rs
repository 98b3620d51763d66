//! CLI for qdim — predict, simulate and score two-stage gamble choices.

mod commands;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "qdim")]
#[command(about = "qdim — quantum dynamic interference model for two-stage gambles")]
#[command(version = qdim_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Model parameters, either as flags or from a JSON file.
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// JSON file with {"alpha","lambda","w1","m","gamma"}; overrides the flags below
    #[arg(long)]
    model: Option<String>,

    /// Utility curvature
    #[arg(long, default_value = "1.0", allow_hyphen_values = true)]
    alpha: f64,

    /// Loss aversion
    #[arg(long, default_value = "1.0", allow_hyphen_values = true)]
    lambda: f64,

    /// Decision weight on the second-stage win
    #[arg(long, default_value = "0.5", allow_hyphen_values = true)]
    w1: f64,

    /// Probability of repeating the planned choice
    #[arg(long, default_value = "0.5", allow_hyphen_values = true)]
    m: f64,

    /// Belief/action entanglement
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    gamma: f64,

    /// Evolution time t in U = exp(-i·t·H) (default π/2)
    #[arg(long, allow_hyphen_values = true)]
    time: Option<f64>,

    /// Plan probability rule
    #[arg(long, default_value = "marginal", value_parser = ["marginal", "conditional"])]
    plan_rule: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict plan/final acceptance and the joint response distribution for one gamble
    Predict {
        #[command(flatten)]
        model: ModelArgs,

        /// First-stage outcomes as "win,loss"
        #[arg(long, default_value = "2,-1", allow_hyphen_values = true)]
        outcomes1: String,

        /// Second-stage outcomes as "win,loss"
        #[arg(long, default_value = "2,-1", allow_hyphen_values = true)]
        outcomes2: String,

        /// Evaluate the branch where the first gamble was lost
        #[arg(long)]
        lost: bool,

        /// Also print P(accept | win), P(accept | loss), P(accept | unknown)
        #[arg(long)]
        sure_thing: bool,

        /// Print machine-readable JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Simulate response counts for every entry of a design file
    Simulate {
        #[command(flatten)]
        model: ModelArgs,

        /// JSON array of {"outcomes1","outcomes2","won_first","n"}
        #[arg(long)]
        design: String,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Write conditions JSON here instead of stdout
        #[arg(long)]
        output: Option<String>,
    },

    /// Log-likelihood of observed counts, per condition and in total
    Loglik {
        #[command(flatten)]
        model: ModelArgs,

        /// JSON array of {"outcomes1","outcomes2","won_first","n","data"}
        #[arg(long)]
        data: String,

        /// Print machine-readable JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Profile the log-likelihood over one parameter, others held fixed
    Profile {
        #[command(flatten)]
        model: ModelArgs,

        /// JSON array of observed conditions
        #[arg(long)]
        data: String,

        /// Parameter to scan: alpha, lambda, w1, m, gamma
        #[arg(long)]
        parameter: String,

        /// Grid lower bound (default: model value − 20%)
        #[arg(long, allow_hyphen_values = true)]
        min: Option<f64>,

        /// Grid upper bound (default: model value + 20%)
        #[arg(long, allow_hyphen_values = true)]
        max: Option<f64>,

        /// Number of grid points
        #[arg(long, default_value = "41")]
        steps: usize,

        /// Write the profile as JSON
        #[arg(long)]
        output: Option<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Predict {
            model,
            outcomes1,
            outcomes2,
            lost,
            sure_thing,
            json,
        } => commands::predict::run(commands::predict::PredictCommandConfig {
            model: &model,
            outcomes1: &outcomes1,
            outcomes2: &outcomes2,
            won_first: !lost,
            sure_thing,
            json,
        }),
        Commands::Simulate {
            model,
            design,
            seed,
            output,
        } => commands::simulate::run(&model, &design, seed, output.as_deref()),
        Commands::Loglik { model, data, json } => commands::loglik::run(&model, &data, json),
        Commands::Profile {
            model,
            data,
            parameter,
            min,
            max,
            steps,
            output,
        } => commands::profile::run(commands::profile::ProfileCommandConfig {
            model: &model,
            data_path: &data,
            parameter: &parameter,
            min,
            max,
            steps,
            output_path: output.as_deref(),
        }),
    }
}
