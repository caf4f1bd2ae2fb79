//! "Order Completed" properties to the platform's charged-event shape.

use clevertap_core::{PropertyMap, PropertyValue};

pub const CHARGED_ID: &str = "Charged ID";
pub const AMOUNT: &str = "Amount";

/// Charge details plus line items, as recorded by the SDK's charged-event
/// call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChargedEvent {
    pub details: PropertyMap,
    pub items: Vec<PropertyMap>,
}

/// Split order properties into charge details and line items.
///
/// `order_id` and `revenue` become `Charged ID` and `Amount`; `products`
/// becomes the item list with each `product_id` renamed to `id`. Any other
/// nested map or sequence is dropped since the SDK only accepts flat
/// details.
pub fn map_charged_event(properties: &PropertyMap) -> ChargedEvent {
    let mut charge = ChargedEvent::default();

    for (key, value) in properties {
        if key == "products" {
            if let Some(items) = line_items(value) {
                charge.items = items;
                continue;
            }
        }

        if matches!(value, PropertyValue::Map(_) | PropertyValue::Sequence(_)) {
            continue;
        }

        let field = match key.as_str() {
            "order_id" => CHARGED_ID,
            "revenue" => AMOUNT,
            other => other,
        };
        charge.details.insert(field.to_string(), value.clone());
    }

    charge
}

// Only a sequence made entirely of maps is a product list.
fn line_items(value: &PropertyValue) -> Option<Vec<PropertyMap>> {
    let PropertyValue::Sequence(products) = value else {
        return None;
    };
    products
        .iter()
        .map(|product| product.as_map().map(rename_product_id))
        .collect()
}

fn rename_product_id(product: &PropertyMap) -> PropertyMap {
    product
        .iter()
        .map(|(k, v)| {
            let key = if k == "product_id" { "id" } else { k.as_str() };
            (key.to_string(), v.clone())
        })
        .collect()
}
