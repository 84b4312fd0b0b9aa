mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::life_goals::{GoalArgs, RetirementArgs};
use commands::quick_tools::{CashFlowsArgs, SingleAmountArgs, WeightedReturnsArgs};
use commands::sip::{SipDelayArgs, SipGrowthArgs, SipNeedArgs};
use commands::withdrawal::SwpArgs;

/// Personal-finance planning calculators
#[derive(Parser)]
#[command(
    name = "fincalc",
    version,
    about = "Personal-finance planning calculators",
    long_about = "A CLI for goal planning, SIP and SWP projections and quick \
                  time-value tools with decimal precision. Rates are annual \
                  percentages (12 means 12%)."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Emit debug diagnostics on stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Size a retirement corpus and the contributions that build it
    Retirement(RetirementArgs),
    /// Plan an education, marriage or other lump-sum goal
    Goal(GoalArgs),
    /// Project a monthly SIP with optional yearly step-up
    SipGrowth(SipGrowthArgs),
    /// Solve the monthly SIP that reaches a target
    SipNeed(SipNeedArgs),
    /// Cost of starting a SIP late
    SipDelay(SipDelayArgs),
    /// Simulate a systematic withdrawal plan
    Swp(SwpArgs),
    /// Present or future value of a single amount
    SingleAmount(SingleAmountArgs),
    /// Value a set of irregular cash flows
    CashFlows(CashFlowsArgs),
    /// Blend per-asset returns into one portfolio rate
    WeightedReturns(WeightedReturnsArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    tracing::debug!(output = ?cli.output, "fincalc starting");

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Retirement(args) => commands::life_goals::run_retirement(args),
        Commands::Goal(args) => commands::life_goals::run_goal(args),
        Commands::SipGrowth(args) => commands::sip::run_sip_growth(args),
        Commands::SipNeed(args) => commands::sip::run_sip_need(args),
        Commands::SipDelay(args) => commands::sip::run_sip_delay(args),
        Commands::Swp(args) => commands::withdrawal::run_swp(args),
        Commands::SingleAmount(args) => commands::quick_tools::run_single_amount(args),
        Commands::CashFlows(args) => commands::quick_tools::run_cash_flows(args),
        Commands::WeightedReturns(args) => commands::quick_tools::run_weighted_returns(args),
        Commands::Version => {
            println!("fincalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
