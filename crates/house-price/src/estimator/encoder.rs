use super::domain::{FeatureRecord, RawInput, YES};

/// Map the submitted form onto the model's training columns.
///
/// Numeric widgets pass through, amenity selectors become `1` only for the
/// literal `"Yes"`, and furnishing is encoded ordinally.
pub fn encode(raw: &RawInput) -> FeatureRecord {
    FeatureRecord {
        area: raw.area,
        bedrooms: raw.bedrooms,
        bathrooms: raw.bathrooms,
        stories: raw.stories,
        mainroad: flag(&raw.mainroad),
        guestroom: flag(&raw.guestroom),
        basement: flag(&raw.basement),
        hotwaterheating: flag(&raw.hotwaterheating),
        airconditioning: flag(&raw.airconditioning),
        parking: raw.parking,
        prefarea: flag(&raw.prefarea),
        furnishingstatus: raw.furnishing_status.ordinal(),
    }
}

fn flag(value: &str) -> u8 {
    u8::from(value == YES)
}
