use crate::infra::{parse_furnishing, resolve_model_path};
use chrono::Local;
use clap::Args;
use house_price::error::AppError;
use house_price::estimator::form::feature_label;
use house_price::estimator::{
    format_currency, EstimateError, FurnishingStatus, ModelSlot, ModelStatus, PriceEstimate,
    PriceEstimator, RawInput, INFERENCE_HINT,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// Living area in square feet (500-10000)
    #[arg(long, default_value_t = 1500.0)]
    pub(crate) area: f64,
    /// Number of bedrooms (1-10)
    #[arg(long, default_value_t = 3)]
    pub(crate) bedrooms: u8,
    /// Number of bathrooms in 0.5 steps (1.0-10.0)
    #[arg(long, default_value_t = 2.0)]
    pub(crate) bathrooms: f64,
    /// Number of stories (1-10)
    #[arg(long, default_value_t = 2)]
    pub(crate) stories: u8,
    /// Fronts a main road
    #[arg(long, default_value = "Yes", value_parser = ["Yes", "No"])]
    pub(crate) mainroad: String,
    /// Has a guest room
    #[arg(long, default_value = "Yes", value_parser = ["Yes", "No"])]
    pub(crate) guestroom: String,
    /// Has a basement
    #[arg(long, default_value = "Yes", value_parser = ["Yes", "No"])]
    pub(crate) basement: String,
    /// Has hot water heating
    #[arg(long, default_value = "Yes", value_parser = ["Yes", "No"])]
    pub(crate) hotwaterheating: String,
    /// Has air conditioning
    #[arg(long, default_value = "Yes", value_parser = ["Yes", "No"])]
    pub(crate) airconditioning: String,
    /// Parking spots (0-5)
    #[arg(long, default_value_t = 2)]
    pub(crate) parking: u8,
    /// Located in a preferred area
    #[arg(long, default_value = "Yes", value_parser = ["Yes", "No"])]
    pub(crate) prefarea: String,
    /// Unfurnished, Semi, or Furnished
    #[arg(long, default_value = "Unfurnished", value_parser = parse_furnishing)]
    pub(crate) furnishing_status: FurnishingStatus,
    /// Print the estimate as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
    /// Override the configured model artifact path
    #[arg(long)]
    pub(crate) model_path: Option<PathBuf>,
}

impl EstimateArgs {
    pub(crate) fn raw_input(&self) -> RawInput {
        RawInput {
            area: self.area,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            stories: self.stories,
            mainroad: self.mainroad.clone(),
            guestroom: self.guestroom.clone(),
            basement: self.basement.clone(),
            hotwaterheating: self.hotwaterheating.clone(),
            airconditioning: self.airconditioning.clone(),
            parking: self.parking,
            prefarea: self.prefarea.clone(),
            furnishing_status: self.furnishing_status,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct ModelArgs {
    /// Override the configured model artifact path
    #[arg(long)]
    pub(crate) model_path: Option<PathBuf>,
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let input = args.raw_input();
    input.validate()?;

    let model_path = resolve_model_path(args.model_path)?;
    let estimator = PriceEstimator::new(ModelSlot::load(&model_path));

    let estimate = match estimator.estimate(&input) {
        Ok(estimate) => estimate,
        Err(err @ EstimateError::Inference(_)) => {
            eprintln!("{INFERENCE_HINT}");
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    if args.json {
        let rendered = serde_json::to_string_pretty(&estimate.view())
            .map_err(|err| AppError::Io(err.into()))?;
        println!("{rendered}");
    } else {
        render_estimate(&estimate);
    }

    Ok(())
}

pub(crate) fn run_model_report(args: ModelArgs) -> Result<(), AppError> {
    let model_path = resolve_model_path(args.model_path)?;
    let status = ModelSlot::load(&model_path).status();
    render_model_status(&status, &model_path);
    Ok(())
}

fn render_estimate(estimate: &PriceEstimate) {
    let tier = estimate.tier();

    println!("House price estimate");
    println!("Generated {}", Local::now().format("%Y-%m-%d %H:%M"));
    println!();
    println!("Predicted price:  {}", format_currency(estimate.prediction));
    println!("Confidence range: ±{}", format_currency(estimate.band()));
    println!("Price tier:       {}", tier.label());
    println!("\nPrice analysis");
    println!("- {}", tier.advisory());

    println!("\nProperty details used for prediction");
    for (name, value) in estimate.features.entries() {
        println!("- {}: {}", feature_label(name), value);
    }
}

fn render_model_status(status: &ModelStatus, model_path: &std::path::Path) {
    println!("Model information");
    println!("Artifact: {}", model_path.display());

    if !status.loaded {
        println!("Status: not loaded");
        println!("- {}", status.message);
        return;
    }

    println!("Status: {}", status.message);
    if let Some(loaded_at) = status.loaded_at {
        println!(
            "Loaded at: {}",
            loaded_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
        );
    }

    match &status.features {
        Some(features) => {
            println!("\nFeatures used");
            for (position, feature) in features.iter().enumerate() {
                println!("{:>2}. {}", position + 1, feature);
            }
        }
        None => println!("\nFeatures used: not recorded in the artifact"),
    }
}
