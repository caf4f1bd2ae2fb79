//! Identify traits to engagement-platform user-profile fields.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use clevertap_core::{PropertyMap, PropertyValue};

pub const IDENTITY: &str = "Identity";
pub const EMAIL: &str = "Email";
pub const NAME: &str = "Name";
pub const PHONE: &str = "Phone";
pub const GENDER: &str = "Gender";
pub const DOB: &str = "DOB";
pub const COMPANY_ID: &str = "companyId";
pub const COMPANY_NAME: &str = "companyName";

/// Date format of string birthdays, e.g. `1990-05-17`.
pub const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

/// Nested trait maps that are flattened one level into the profile. Every
/// other nested map is dropped.
const FLATTENED_TRAITS: [&str; 2] = ["address", "company"];

/// Build the outbound profile for an identify call.
///
/// Well-known traits are renamed to profile fields (`email` to `Email`, and
/// so on) and consumed. `gender` is normalised to `M`/`F` and `birthday` is
/// parsed to a date; values that cannot be interpreted are omitted. The
/// remaining scalar traits are copied as-is, and `address`/`company` maps
/// are flattened with `id` and `name` renamed to `companyId`/`companyName`.
pub fn map_profile(user_id: Option<&str>, traits: &PropertyMap) -> PropertyMap {
    let mut remaining = traits.clone();
    let mut profile = PropertyMap::new();

    if let Some(user_id) = user_id {
        profile.insert(IDENTITY.to_string(), PropertyValue::from(user_id));
        remaining.remove("userId");
        remaining.remove("user_id");
    }

    for (trait_key, field) in [("email", EMAIL), ("name", NAME), ("phone", PHONE)] {
        if let Some(value) = take_string(&mut remaining, trait_key) {
            profile.insert(field.to_string(), PropertyValue::String(value));
        }
    }

    if let Some(gender) = take_string(&mut remaining, "gender") {
        if let Some(code) = gender_code(&gender) {
            profile.insert(GENDER.to_string(), PropertyValue::from(code));
        }
    }

    if let Some(dob) = take_birthday(&mut remaining) {
        profile.insert(DOB.to_string(), PropertyValue::Date(dob));
    }

    for (key, value) in remaining {
        match value {
            PropertyValue::Map(nested) if FLATTENED_TRAITS.contains(&key.as_str()) => {
                flatten_into(&mut profile, nested);
            }
            PropertyValue::Map(_) => {}
            other => {
                profile.insert(key, other);
            }
        }
    }

    profile
}

/// Normalise a free-form gender to the platform's single-letter code.
pub fn gender_code(raw: &str) -> Option<&'static str> {
    match raw.to_lowercase().as_str() {
        "male" | "m" => Some("M"),
        "female" | "f" => Some("F"),
        _ => None,
    }
}

/// Parse a `YYYY-MM-DD` birthday to midnight UTC.
pub fn parse_birthday(raw: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(raw, BIRTHDAY_FORMAT).ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight))
}

/// Remove `key` if it holds a string. Non-string values stay in place.
fn take_string(traits: &mut PropertyMap, key: &str) -> Option<String> {
    match traits.remove(key)? {
        PropertyValue::String(s) => Some(s),
        other => {
            traits.insert(key.to_string(), other);
            None
        }
    }
}

// String and date birthdays are consumed even when the string does not
// parse; other shapes fall through to the generic copy.
fn take_birthday(traits: &mut PropertyMap) -> Option<DateTime<Utc>> {
    match traits.remove("birthday")? {
        PropertyValue::String(s) => parse_birthday(&s),
        PropertyValue::Date(d) => Some(d),
        other => {
            traits.insert("birthday".to_string(), other);
            None
        }
    }
}

fn flatten_into(profile: &mut PropertyMap, nested: PropertyMap) {
    for (sub_key, sub_value) in nested {
        let field = match sub_key.as_str() {
            "id" => COMPANY_ID.to_string(),
            "name" => COMPANY_NAME.to_string(),
            _ => sub_key,
        };
        profile.insert(field, sub_value);
    }
}
