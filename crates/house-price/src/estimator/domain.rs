use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Literal emitted by the amenity selectors for a present amenity.
pub const YES: &str = "Yes";
/// Literal emitted by the amenity selectors for a missing amenity.
pub const NO: &str = "No";

pub const FEATURE_COUNT: usize = 12;

/// Column order the regression model was trained on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "area",
    "bedrooms",
    "bathrooms",
    "stories",
    "mainroad",
    "guestroom",
    "basement",
    "hotwaterheating",
    "airconditioning",
    "parking",
    "prefarea",
    "furnishingstatus",
];

/// Furnishing level offered by the form, encoded ordinally for the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FurnishingStatus {
    #[default]
    Unfurnished,
    Semi,
    Furnished,
}

impl FurnishingStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Unfurnished, Self::Semi, Self::Furnished]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Unfurnished => "Unfurnished",
            Self::Semi => "Semi",
            Self::Furnished => "Furnished",
        }
    }

    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Unfurnished => 0,
            Self::Semi => 1,
            Self::Furnished => 2,
        }
    }
}

impl fmt::Display for FurnishingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FurnishingStatus {
    type Err = InputError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|status| status.label() == value.trim())
            .ok_or_else(|| InputError::UnknownChoice {
                field: "furnishing_status",
                value: value.to_string(),
            })
    }
}

/// House attributes exactly as submitted through the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    pub area: f64,
    pub bedrooms: u8,
    pub bathrooms: f64,
    pub stories: u8,
    pub mainroad: String,
    pub guestroom: String,
    pub basement: String,
    pub hotwaterheating: String,
    pub airconditioning: String,
    pub parking: u8,
    pub prefarea: String,
    #[serde(alias = "furnishingstatus", alias = "furnishingStatus")]
    pub furnishing_status: FurnishingStatus,
}

impl Default for RawInput {
    fn default() -> Self {
        Self {
            area: 1500.0,
            bedrooms: 3,
            bathrooms: 2.0,
            stories: 2,
            mainroad: YES.to_string(),
            guestroom: YES.to_string(),
            basement: YES.to_string(),
            hotwaterheating: YES.to_string(),
            airconditioning: YES.to_string(),
            parking: 2,
            prefarea: YES.to_string(),
            furnishing_status: FurnishingStatus::Unfurnished,
        }
    }
}

/// Inclusive numeric bounds of a form widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

pub const AREA_BOUNDS: FieldBounds = FieldBounds {
    min: 500.0,
    max: 10_000.0,
    step: 1.0,
};
pub const BEDROOM_BOUNDS: FieldBounds = FieldBounds {
    min: 1.0,
    max: 10.0,
    step: 1.0,
};
pub const BATHROOM_BOUNDS: FieldBounds = FieldBounds {
    min: 1.0,
    max: 10.0,
    step: 0.5,
};
pub const STORY_BOUNDS: FieldBounds = FieldBounds {
    min: 1.0,
    max: 10.0,
    step: 1.0,
};
pub const PARKING_BOUNDS: FieldBounds = FieldBounds {
    min: 0.0,
    max: 5.0,
    step: 1.0,
};

impl RawInput {
    /// The amenity selectors in form order, paired with their field names.
    pub fn amenities(&self) -> [(&'static str, &str); 6] {
        [
            ("mainroad", self.mainroad.as_str()),
            ("guestroom", self.guestroom.as_str()),
            ("basement", self.basement.as_str()),
            ("hotwaterheating", self.hotwaterheating.as_str()),
            ("airconditioning", self.airconditioning.as_str()),
            ("prefarea", self.prefarea.as_str()),
        ]
    }

    /// Enforce the widget constraints so only enumerated literals and in-range
    /// numbers reach the encoder.
    pub fn validate(&self) -> Result<(), InputError> {
        check_bounds("area", self.area, AREA_BOUNDS)?;
        check_bounds("bedrooms", f64::from(self.bedrooms), BEDROOM_BOUNDS)?;
        check_bounds("bathrooms", self.bathrooms, BATHROOM_BOUNDS)?;
        check_step("bathrooms", self.bathrooms, BATHROOM_BOUNDS)?;
        check_bounds("stories", f64::from(self.stories), STORY_BOUNDS)?;
        check_bounds("parking", f64::from(self.parking), PARKING_BOUNDS)?;

        for (field, value) in self.amenities() {
            if value != YES && value != NO {
                return Err(InputError::UnknownChoice {
                    field,
                    value: value.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// A form submission decoded field by field.
///
/// `input` keeps every value that decoded, with form defaults standing in for
/// the rest, so a rejected page can be re-rendered with the user's entries.
#[derive(Debug, Clone, PartialEq)]
pub struct FormFields {
    pub input: RawInput,
    pub error: Option<InputError>,
}

impl FormFields {
    pub fn decode<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut input = RawInput::default();
        let mut seen = [false; FEATURE_COUNT];
        let mut error = None;

        for (key, value) in pairs {
            let outcome = match key {
                "area" => parse_number("area", value).map(|parsed| input.area = parsed),
                "bedrooms" => parse_count("bedrooms", value).map(|parsed| input.bedrooms = parsed),
                "bathrooms" => {
                    parse_number("bathrooms", value).map(|parsed| input.bathrooms = parsed)
                }
                "stories" => parse_count("stories", value).map(|parsed| input.stories = parsed),
                "mainroad" => assign(&mut input.mainroad, value),
                "guestroom" => assign(&mut input.guestroom, value),
                "basement" => assign(&mut input.basement, value),
                "hotwaterheating" => assign(&mut input.hotwaterheating, value),
                "airconditioning" => assign(&mut input.airconditioning, value),
                "parking" => parse_count("parking", value).map(|parsed| input.parking = parsed),
                "prefarea" => assign(&mut input.prefarea, value),
                "furnishing_status" | "furnishingstatus" | "furnishingStatus" => value
                    .parse::<FurnishingStatus>()
                    .map(|parsed| input.furnishing_status = parsed),
                _ => continue,
            };

            if let Some(position) = FEATURE_NAMES
                .iter()
                .position(|name| *name == key.to_ascii_lowercase().replace('_', ""))
            {
                seen[position] = true;
            }
            if let Err(err) = outcome {
                error.get_or_insert(err);
            }
        }

        if error.is_none() {
            if let Some(position) = seen.iter().position(|present| !present) {
                error = Some(InputError::Missing {
                    field: field_name(position),
                });
            }
        }

        Self { input, error }
    }

    pub fn into_result(self) -> Result<RawInput, (RawInput, InputError)> {
        match self.error {
            None => Ok(self.input),
            Some(err) => Err((self.input, err)),
        }
    }
}

fn assign(slot: &mut String, value: &str) -> Result<(), InputError> {
    *slot = value.to_string();
    Ok(())
}

fn field_name(position: usize) -> &'static str {
    match FEATURE_NAMES[position] {
        "furnishingstatus" => "furnishing_status",
        name => name,
    }
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, InputError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| InputError::NotANumber {
            field,
            value: value.to_string(),
        })
}

fn parse_count(field: &'static str, value: &str) -> Result<u8, InputError> {
    value
        .trim()
        .parse::<u8>()
        .map_err(|_| InputError::NotANumber {
            field,
            value: value.to_string(),
        })
}

fn check_bounds(field: &'static str, value: f64, bounds: FieldBounds) -> Result<(), InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite { field });
    }
    if value < bounds.min || value > bounds.max {
        return Err(InputError::OutOfRange {
            field,
            value,
            min: bounds.min,
            max: bounds.max,
        });
    }
    Ok(())
}

fn check_step(field: &'static str, value: f64, bounds: FieldBounds) -> Result<(), InputError> {
    let steps = (value - bounds.min) / bounds.step;
    if (steps - steps.round()).abs() > 1e-9 {
        return Err(InputError::OffStep {
            field,
            value,
            step: bounds.step,
        });
    }
    Ok(())
}

/// Rejection raised when a submission falls outside the form's widget domains.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} must move in increments of {step} (got {value})")]
    OffStep {
        field: &'static str,
        value: f64,
        step: f64,
    },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} does not accept '{value}'")]
    UnknownChoice { field: &'static str, value: String },
    #[error("{field} expects a number (got '{value}')")]
    NotANumber { field: &'static str, value: String },
    #[error("{field} is missing from the submission")]
    Missing { field: &'static str },
}

/// Fixed-order numeric features handed to the model provider.
///
/// Serializes as a map whose keys follow the training column order, so the
/// echo shown to users matches what the model consumed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureRecord {
    pub area: f64,
    pub bedrooms: u8,
    pub bathrooms: f64,
    pub stories: u8,
    pub mainroad: u8,
    pub guestroom: u8,
    pub basement: u8,
    pub hotwaterheating: u8,
    pub airconditioning: u8,
    pub parking: u8,
    pub prefarea: u8,
    pub furnishingstatus: u8,
}

impl FeatureRecord {
    pub const fn names() -> &'static [&'static str; FEATURE_COUNT] {
        &FEATURE_NAMES
    }

    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        [
            self.area,
            f64::from(self.bedrooms),
            self.bathrooms,
            f64::from(self.stories),
            f64::from(self.mainroad),
            f64::from(self.guestroom),
            f64::from(self.basement),
            f64::from(self.hotwaterheating),
            f64::from(self.airconditioning),
            f64::from(self.parking),
            f64::from(self.prefarea),
            f64::from(self.furnishingstatus),
        ]
    }

    pub fn entries(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_NAMES.into_iter().zip(self.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        RawInput::default().validate().expect("form defaults are valid");
    }

    #[test]
    fn rejects_area_outside_widget_bounds() {
        let input = RawInput {
            area: 499.0,
            ..RawInput::default()
        };
        let err = input.validate().expect_err("area below minimum");
        assert!(matches!(err, InputError::OutOfRange { field: "area", .. }));
    }

    #[test]
    fn rejects_bathrooms_off_half_step() {
        let input = RawInput {
            bathrooms: 2.25,
            ..RawInput::default()
        };
        let err = input.validate().expect_err("quarter baths not offered");
        assert!(matches!(
            err,
            InputError::OffStep {
                field: "bathrooms",
                ..
            }
        ));

        let half = RawInput {
            bathrooms: 2.5,
            ..RawInput::default()
        };
        half.validate().expect("half baths are offered");
    }

    #[test]
    fn rejects_non_literal_amenity_values() {
        let input = RawInput {
            basement: "yes".to_string(),
            ..RawInput::default()
        };
        let err = input.validate().expect_err("selectors only emit Yes/No");
        assert_eq!(
            err,
            InputError::UnknownChoice {
                field: "basement",
                value: "yes".to_string()
            }
        );
    }

    #[test]
    fn rejects_non_finite_area() {
        let input = RawInput {
            area: f64::NAN,
            ..RawInput::default()
        };
        assert_eq!(
            input.validate(),
            Err(InputError::NotFinite { field: "area" })
        );
    }

    #[test]
    fn parking_allows_zero_but_not_six() {
        let none = RawInput {
            parking: 0,
            ..RawInput::default()
        };
        none.validate().expect("zero spots allowed");

        let too_many = RawInput {
            parking: 6,
            ..RawInput::default()
        };
        assert!(too_many.validate().is_err());
    }

    #[test]
    fn furnishing_status_parses_form_labels() {
        assert_eq!(
            "Semi".parse::<FurnishingStatus>(),
            Ok(FurnishingStatus::Semi)
        );
        assert!("Partly".parse::<FurnishingStatus>().is_err());
    }

    #[test]
    fn raw_input_accepts_compact_furnishing_key() {
        let payload = serde_json::json!({
            "area": 1500.0,
            "bedrooms": 3,
            "bathrooms": 2.0,
            "stories": 2,
            "mainroad": "Yes",
            "guestroom": "No",
            "basement": "No",
            "hotwaterheating": "No",
            "airconditioning": "Yes",
            "parking": 2,
            "prefarea": "No",
            "furnishingstatus": "Furnished"
        });
        let input: RawInput = serde_json::from_value(payload).expect("payload deserializes");
        assert_eq!(input.furnishing_status, FurnishingStatus::Furnished);
    }

    const FULL_FORM: [(&str, &str); 12] = [
        ("area", "2400"),
        ("bedrooms", "4"),
        ("bathrooms", "2.5"),
        ("stories", "3"),
        ("mainroad", "Yes"),
        ("guestroom", "No"),
        ("basement", "No"),
        ("hotwaterheating", "No"),
        ("airconditioning", "Yes"),
        ("parking", "1"),
        ("prefarea", "No"),
        ("furnishing_status", "Semi"),
    ];

    #[test]
    fn form_fields_decode_complete_submission() {
        let input = FormFields::decode(FULL_FORM)
            .into_result()
            .expect("complete form decodes");
        assert_eq!(input.area, 2400.0);
        assert_eq!(input.bathrooms, 2.5);
        assert_eq!(input.guestroom, "No");
        assert_eq!(input.furnishing_status, FurnishingStatus::Semi);
    }

    #[test]
    fn undecodable_field_keeps_the_other_entries() {
        let pairs = FULL_FORM.map(|(key, value)| match key {
            "bathrooms" => (key, "lots"),
            _ => (key, value),
        });

        let (input, err) = FormFields::decode(pairs)
            .into_result()
            .expect_err("bathrooms is not numeric");

        assert_eq!(
            err,
            InputError::NotANumber {
                field: "bathrooms",
                value: "lots".to_string(),
            }
        );
        assert_eq!(input.area, 2400.0);
        assert_eq!(input.bedrooms, 4);
        assert_eq!(input.bathrooms, RawInput::default().bathrooms);
        assert_eq!(input.furnishing_status, FurnishingStatus::Semi);
    }

    #[test]
    fn absent_field_is_reported_by_name() {
        let pairs = FULL_FORM
            .into_iter()
            .filter(|(key, _)| *key != "furnishing_status");

        let (_, err) = FormFields::decode(pairs)
            .into_result()
            .expect_err("furnishing missing");
        assert_eq!(err.to_string(), "furnishing_status is missing from the submission");
    }
}
