use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Identifies entities that expose a stable opaque identifier.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Sum of the amounts of `items`.
pub fn total_amount<T: Amounted>(items: &[T]) -> f64 {
    items.iter().map(Amounted::amount).sum()
}

/// Returns true when `value` is usable as a money amount (finite and not negative).
pub fn is_valid_amount(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Returns true when `value` is a usable starting debt (finite and strictly positive).
pub fn is_positive_amount(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Decodes a stored amount without failing the whole snapshot.
///
/// Numbers and numeric text are taken as-is; `null`, blank or non-numeric values decode
/// as NaN so load-time checks can report and zero them.
pub(crate) fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match Option::<RawAmount>::deserialize(deserializer)? {
        Some(RawAmount::Number(value)) => value,
        Some(RawAmount::Text(text)) => text.trim().parse::<f64>().unwrap_or(f64::NAN),
        Some(RawAmount::Other(_)) | None => f64::NAN,
    };
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "lenient_amount")]
        value: f64,
    }

    fn decode(json: &str) -> f64 {
        serde_json::from_str::<Holder>(json).unwrap().value
    }

    #[test]
    fn lenient_amount_accepts_numbers_and_numeric_text() {
        assert_eq!(decode(r#"{"value": 12.5}"#), 12.5);
        assert_eq!(decode(r#"{"value": " 40 "}"#), 40.0);
        assert_eq!(decode("{}"), 0.0);
    }

    #[test]
    fn lenient_amount_marks_unreadable_values_as_nan() {
        assert!(decode(r#"{"value": null}"#).is_nan());
        assert!(decode(r#"{"value": ""}"#).is_nan());
        assert!(decode(r#"{"value": true}"#).is_nan());
    }

    #[test]
    fn amount_predicates_reject_non_finite_values() {
        assert!(is_valid_amount(0.0));
        assert!(!is_valid_amount(-0.01));
        assert!(!is_valid_amount(f64::NAN));
        assert!(!is_positive_amount(0.0));
        assert!(is_positive_amount(0.5));
        assert!(!is_positive_amount(f64::INFINITY));
    }
}
