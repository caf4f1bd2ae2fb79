//! Scalar-only filtering of trait and property maps.

use clevertap_core::PropertyMap;

/// Keep only string, number and boolean entries. Nested maps, sequences,
/// dates and nulls are dropped without notice. An absent map yields an
/// empty one.
pub fn sanitize(properties: Option<&PropertyMap>) -> PropertyMap {
    properties
        .map(|props| {
            props
                .iter()
                .filter(|(_, v)| v.is_scalar())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use clevertap_core::{property_map, PropertyValue};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_drops_non_scalar_values() {
        let mut input = property_map(json!({
            "plan": "pro",
            "seats": 5,
            "trial": false,
            "address": {"city": "Pune"},
            "tags": ["a"],
            "deleted_at": null
        }))
        .unwrap();
        input.insert("signed_up".into(), PropertyValue::Date(Utc::now()));

        let out = sanitize(Some(&input));
        assert_eq!(
            out,
            property_map(json!({"plan": "pro", "seats": 5, "trial": false})).unwrap()
        );
    }

    #[test]
    fn test_absent_and_empty_inputs() {
        assert!(sanitize(None).is_empty());
        assert!(sanitize(Some(&PropertyMap::new())).is_empty());
    }

    fn scalar_strategy() -> impl Strategy<Value = PropertyValue> {
        prop_oneof![
            "[a-z]{0,8}".prop_map(PropertyValue::from),
            any::<i64>().prop_map(PropertyValue::from),
            any::<bool>().prop_map(PropertyValue::from),
        ]
    }

    proptest! {
        #[test]
        fn sanitize_is_idempotent_on_scalar_maps(
            entries in prop::collection::btree_map("[a-z_]{1,10}", scalar_strategy(), 0..12)
        ) {
            let once = sanitize(Some(&entries));
            prop_assert_eq!(&once, &entries);
            prop_assert_eq!(sanitize(Some(&once)), once);
        }
    }
}
