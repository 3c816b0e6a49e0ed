//! Decoding of untyped product payloads at the context boundary.
//!
//! The product shape is checked first with the variant list left untyped, so
//! a malformed variant is reported against its index rather than as a
//! generic product mismatch.

use serde::Deserialize;
use serde_json::Value;
use shopfeed_core::{Condition, Product, ProductImage, ProductTranslation, Variant};

use crate::error::ContextError;

#[derive(Debug, Deserialize)]
struct RawProduct {
    code: String,
    variants: Vec<Value>,
    #[serde(default)]
    translations: Vec<ProductTranslation>,
    #[serde(default)]
    images: Vec<ProductImage>,
    #[serde(default)]
    condition: Option<Condition>,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    gtin: Option<String>,
    #[serde(default)]
    mpn: Option<String>,
    #[serde(default)]
    size: Option<String>,
    #[serde(default)]
    color: Option<String>,
}

/// Decodes `payload` into a [`Product`].
///
/// # Errors
///
/// Returns [`ContextError::TypeMismatch`] if the payload is not product
/// shaped, or [`ContextError::InvariantViolation`] for the first variant that
/// is not variant shaped.
pub(crate) fn decode_product(payload: &Value) -> Result<Product, ContextError> {
    let raw = RawProduct::deserialize(payload).map_err(|e| ContextError::TypeMismatch {
        reason: e.to_string(),
    })?;

    let variants = raw
        .variants
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value::<Variant>(value).map_err(|e| {
                ContextError::InvariantViolation {
                    product: raw.code.clone(),
                    index,
                    reason: e.to_string(),
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Product {
        code: raw.code,
        variants,
        translations: raw.translations,
        images: raw.images,
        condition: raw.condition,
        brand: raw.brand,
        gtin: raw.gtin,
        mpn: raw.mpn,
        size: raw.size,
        color: raw.color,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decode_product_accepts_minimal_payload() {
        let product = decode_product(&json!({
            "code": "MUG",
            "variants": [{ "code": "MUG_WHITE" }, { "code": "MUG_BLACK" }]
        }))
        .unwrap();
        assert_eq!(product.code, "MUG");
        let codes: Vec<_> = product.variants.iter().map(|v| v.code.as_str()).collect();
        assert_eq!(codes, ["MUG_WHITE", "MUG_BLACK"]);
    }

    #[test]
    fn decode_product_rejects_non_object() {
        let err = decode_product(&json!(["not", "a", "product"])).unwrap_err();
        assert!(matches!(err, ContextError::TypeMismatch { .. }));
    }

    #[test]
    fn decode_product_rejects_missing_code() {
        let err = decode_product(&json!({ "variants": [] })).unwrap_err();
        assert!(
            matches!(err, ContextError::TypeMismatch { ref reason } if reason.contains("code")),
            "got: {err:?}"
        );
    }

    #[test]
    fn decode_product_rejects_unknown_condition() {
        let err = decode_product(&json!({
            "code": "MUG",
            "variants": [],
            "condition": "broken"
        }))
        .unwrap_err();
        assert!(
            matches!(err, ContextError::TypeMismatch { ref reason } if reason.contains("unknown condition \"broken\"")),
            "got: {err:?}"
        );
    }

    #[test]
    fn decode_product_reports_malformed_variant_index() {
        let err = decode_product(&json!({
            "code": "MUG",
            "variants": [{ "code": "MUG_WHITE" }, { "sku": 42 }]
        }))
        .unwrap_err();
        assert!(
            matches!(
                err,
                ContextError::InvariantViolation { ref product, index: 1, .. } if product == "MUG"
            ),
            "got: {err:?}"
        );
    }
}
