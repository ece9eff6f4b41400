//! HTML rendering for the single-page estimate form.

use std::fmt::Write as _;

use super::classifier::AdvisorySeverity;
use super::domain::{
    FieldBounds, FurnishingStatus, RawInput, AREA_BOUNDS, BATHROOM_BOUNDS, BEDROOM_BOUNDS, NO,
    PARKING_BOUNDS, STORY_BOUNDS, YES,
};
use super::registry::ModelStatus;
use super::service::{EstimateError, PriceEstimate, INFERENCE_HINT};

const STYLE: &str = "body{font-family:sans-serif;margin:0;display:flex}\
aside{width:18rem;padding:1rem;background:#f0f2f6;min-height:100vh}\
main{flex:1;padding:1rem 2rem}.columns{display:flex;gap:2rem}.columns>div{flex:1}\
label{display:block;margin-top:.6rem}input,select{width:100%}\
.success{color:#0f5132;background:#d1e7dd}.info{color:#055160;background:#cff4fc}\
.warning{color:#664d03;background:#fff3cd}.error{color:#842029;background:#f8d7da}\
.success,.info,.warning,.error{padding:.6rem;border-radius:.3rem}\
.metrics{display:flex;gap:2rem}.metric strong{display:block;font-size:1.6rem}";

/// What happened on the latest submission, if anything.
#[derive(Debug)]
pub enum FormOutcome<'a> {
    Estimate(&'a PriceEstimate),
    Rejected(String),
    Failed(&'a EstimateError),
}

/// One full render of the page: side panel, form, and optional result.
#[derive(Debug)]
pub struct FormPage<'a> {
    pub status: &'a ModelStatus,
    pub input: &'a RawInput,
    pub outcome: Option<FormOutcome<'a>>,
}

impl<'a> FormPage<'a> {
    pub fn new(status: &'a ModelStatus, input: &'a RawInput) -> Self {
        Self {
            status,
            input,
            outcome: None,
        }
    }

    pub fn with_outcome(mut self, outcome: FormOutcome<'a>) -> Self {
        self.outcome = Some(outcome);
        self
    }

    pub fn render(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
        html.push_str("<title>House Price Predictor</title>");
        writeln!(html, "<style>{STYLE}</style></head><body>").expect("write head");

        render_side_panel(&mut html, self.status);

        html.push_str("<main><h1>House Price Prediction App</h1>");
        html.push_str("<p>Enter the house details below to get a price prediction</p>");

        if self.status.loaded {
            render_form(&mut html, self.input);
            if let Some(outcome) = &self.outcome {
                render_outcome(&mut html, outcome);
            }
        } else {
            writeln!(
                html,
                "<div class=\"error\">{}</div>",
                escape_html(&self.status.message)
            )
            .expect("write load error");
            html.push_str(
                "<div class=\"warning\">Model could not be loaded. Please check the model file.</div>",
            );
        }

        html.push_str("<hr><p><strong>Note:</strong> This prediction is based on historical data and should be used as a rough estimate only.</p>");
        html.push_str("</main></body></html>");
        html
    }
}

fn render_side_panel(html: &mut String, status: &ModelStatus) {
    html.push_str("<aside><h2>Model Information</h2>");
    if status.loaded {
        html.push_str("<div class=\"success\">Model loaded successfully</div>");
        if let Some(features) = &status.features {
            html.push_str("<p><strong>Features used:</strong></p><ul>");
            for feature in features {
                writeln!(html, "<li>{}</li>", escape_html(feature)).expect("write feature");
            }
            html.push_str("</ul>");
        }
    } else {
        html.push_str("<div class=\"error\">Model not loaded</div>");
    }

    html.push_str("<hr><p><strong>Instructions:</strong></p><ol>");
    html.push_str("<li>Fill in the house details</li>");
    html.push_str("<li>Click 'Predict House Price'</li>");
    html.push_str("<li>View the estimated price</li></ol>");
    html.push_str("<hr><p><strong>Tips:</strong></p><ul>");
    html.push_str("<li>Ensure all fields are filled accurately</li>");
    html.push_str("<li>Check that the configured model file exists</li>");
    html.push_str("<li>Retrain the model if the feature list above does not match the form</li>");
    html.push_str("</ul></aside>");
}

fn render_form(html: &mut String, input: &RawInput) {
    html.push_str("<h2 style=\"text-align:center\">House Features</h2>");
    html.push_str("<form method=\"post\" action=\"/predict\"><div class=\"columns\"><div>");

    number_input(html, "area", "Area (sq ft)", input.area, AREA_BOUNDS);
    number_input(
        html,
        "bedrooms",
        "Number of Bedrooms",
        f64::from(input.bedrooms),
        BEDROOM_BOUNDS,
    );
    number_input(
        html,
        "bathrooms",
        "Number of Bathrooms",
        input.bathrooms,
        BATHROOM_BOUNDS,
    );
    number_input(
        html,
        "stories",
        "Number of Stories",
        f64::from(input.stories),
        STORY_BOUNDS,
    );
    yes_no_select(html, "mainroad", "Main Road", &input.mainroad);
    yes_no_select(html, "guestroom", "Guest Room", &input.guestroom);

    html.push_str("</div><div>");

    yes_no_select(html, "basement", "Basement", &input.basement);
    yes_no_select(
        html,
        "hotwaterheating",
        "Hot Water Heating",
        &input.hotwaterheating,
    );
    yes_no_select(
        html,
        "airconditioning",
        "Air Conditioning",
        &input.airconditioning,
    );
    number_input(
        html,
        "parking",
        "Parking Spots",
        f64::from(input.parking),
        PARKING_BOUNDS,
    );
    yes_no_select(html, "prefarea", "Preferred Area", &input.prefarea);
    furnishing_select(html, input.furnishing_status);

    html.push_str("</div></div>");
    html.push_str("<p><button type=\"submit\">Predict House Price</button></p></form>");
}

fn number_input(html: &mut String, name: &str, label: &str, value: f64, bounds: FieldBounds) {
    writeln!(
        html,
        "<label for=\"{name}\">{label}</label>\
         <input type=\"number\" id=\"{name}\" name=\"{name}\" min=\"{}\" max=\"{}\" step=\"{}\" value=\"{}\" required>",
        bounds.min, bounds.max, bounds.step, value
    )
    .expect("write number input");
}

fn yes_no_select(html: &mut String, name: &str, label: &str, current: &str) {
    writeln!(
        html,
        "<label for=\"{name}\">{label}</label><select id=\"{name}\" name=\"{name}\">"
    )
    .expect("write select");
    for choice in [YES, NO] {
        let selected = if choice == current { " selected" } else { "" };
        writeln!(html, "<option{selected}>{choice}</option>").expect("write option");
    }
    html.push_str("</select>");
}

fn furnishing_select(html: &mut String, current: FurnishingStatus) {
    html.push_str("<label for=\"furnishing_status\">Furnishing Status</label>");
    html.push_str("<select id=\"furnishing_status\" name=\"furnishing_status\">");
    for status in FurnishingStatus::ordered() {
        let selected = if status == current { " selected" } else { "" };
        writeln!(html, "<option{selected}>{}</option>", status.label()).expect("write option");
    }
    html.push_str("</select>");
}

fn render_outcome(html: &mut String, outcome: &FormOutcome<'_>) {
    match outcome {
        FormOutcome::Estimate(estimate) => render_estimate(html, estimate),
        FormOutcome::Rejected(message) => {
            writeln!(
                html,
                "<div class=\"error\">Invalid input: {}</div>",
                escape_html(message)
            )
            .expect("write rejection");
        }
        FormOutcome::Failed(error) => {
            writeln!(html, "<div class=\"error\">{}</div>", escape_html(&error.to_string()))
                .expect("write failure");
            if matches!(error, EstimateError::Inference(_)) {
                writeln!(html, "<div class=\"info\">{INFERENCE_HINT}</div>")
                    .expect("write hint");
            }
        }
    }
}

fn render_estimate(html: &mut String, estimate: &PriceEstimate) {
    let tier = estimate.tier();
    html.push_str("<div class=\"success\">Prediction Complete!</div>");
    writeln!(
        html,
        "<div class=\"metrics\"><div class=\"metric\">Predicted Price<strong>{}</strong></div>\
         <div class=\"metric\">Confidence Range<strong>±{}</strong></div></div>",
        format_currency(estimate.prediction),
        format_currency(estimate.band())
    )
    .expect("write metrics");

    let class = match tier.severity() {
        AdvisorySeverity::Info => "info",
        AdvisorySeverity::Warning => "warning",
    };
    writeln!(
        html,
        "<h3>Price Analysis</h3><div class=\"{class}\" data-tier=\"{}\">{}</div>",
        tier.label(),
        tier.advisory()
    )
    .expect("write advisory");

    html.push_str("<details><summary>Input Summary</summary>");
    html.push_str("<p><strong>Property Details Used for Prediction:</strong></p><ul>");
    for (name, value) in estimate.features.entries() {
        writeln!(html, "<li>{}: {}</li>", feature_label(name), value).expect("write feature");
    }
    html.push_str("</ul></details>");
}

/// Render a currency amount as `$1,234,567`, rounded half away from zero.
/// Negative amounts carry the sign ahead of the symbol: `-$2,500`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${amount}");
    }

    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Human label for a training column, e.g. `hotwaterheating` → `Hotwaterheating`.
pub fn feature_label(name: &str) -> String {
    name.replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
