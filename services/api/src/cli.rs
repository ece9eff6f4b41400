use crate::estimate::{run_estimate, run_model_report, EstimateArgs, ModelArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use house_price::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "House Price Predictor",
    about = "Serve the house price form or run one-off estimates from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP form host (default command)
    Serve(ServeArgs),
    /// Estimate a single property and print the price analysis
    Estimate(EstimateArgs),
    /// Report whether the model loads and which features it expects
    Model(ModelArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured model artifact path
    #[arg(long)]
    pub(crate) model_path: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Estimate(args) => run_estimate(args),
        Command::Model(args) => run_model_report(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use house_price::estimator::FurnishingStatus;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["house-price-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn estimate_uses_form_defaults() {
        let cli = Cli::try_parse_from(["house-price-api", "estimate"]).expect("parses");
        let Some(Command::Estimate(args)) = cli.command else {
            panic!("expected estimate command");
        };
        let input = args.raw_input();
        assert_eq!(input.area, 1500.0);
        assert_eq!(input.bedrooms, 3);
        assert_eq!(input.mainroad, "Yes");
        assert_eq!(input.furnishing_status, FurnishingStatus::Unfurnished);
    }

    #[test]
    fn estimate_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "house-price-api",
            "estimate",
            "--area",
            "2400",
            "--guestroom",
            "No",
            "--furnishing-status",
            "Semi",
        ])
        .expect("parses");
        let Some(Command::Estimate(args)) = cli.command else {
            panic!("expected estimate command");
        };
        let input = args.raw_input();
        assert_eq!(input.area, 2400.0);
        assert_eq!(input.guestroom, "No");
        assert_eq!(input.furnishing_status, FurnishingStatus::Semi);
    }

    #[test]
    fn amenity_flags_only_accept_yes_or_no() {
        let result = Cli::try_parse_from(["house-price-api", "estimate", "--basement", "maybe"]);
        assert!(result.is_err());
    }
}
