//! Catalog entities and the write-side DTOs sent to the product resource.

use bon::Builder;
use serde::{Deserialize, Deserializer, Serialize};

/// Decodes an identifier that the remote service may send as a JSON number or string.
pub(crate) fn id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}

/// Product category as embedded in a [`Product`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    pub name: String,
}

/// A product as decoded from the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    pub title: String,
    pub price: f64,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub category: Category,
}

/// A [`Product`] plus the client-side `taxes` field.
///
/// Serialized flat, so the JSON shape is the product's fields plus `taxes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductWithTax {
    #[serde(flatten)]
    pub product: Product,
    pub taxes: f64,
}

/// Body of a product creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductDto {
    #[builder(into)]
    pub title: String,
    pub price: f64,
    #[builder(into)]
    pub description: String,
    #[builder(default)]
    pub images: Vec<String>,
    pub category_id: u64,
}

/// Sparse patch for an existing product. Unset fields are left out of the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,
}

impl UpdateProductDto {
    /// Returns `true` if the patch would not change anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.images.is_none()
            && self.category_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_numeric_ids_decode_as_strings() {
        let p: Product = serde_json::from_value(json!({
            "id": 4,
            "title": "Chair",
            "price": 120,
            "description": "wood",
            "images": ["a.png"],
            "category": {"id": 2, "name": "Furniture"}
        }))
        .unwrap();
        assert_eq!(p.id, "4");
        assert_eq!(p.category.id, "2");
        assert!((p.price - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_product_missing_images_defaults_empty() {
        let p: Product = serde_json::from_value(json!({
            "id": "x",
            "title": "t",
            "price": 1.5,
            "description": "d",
            "category": {"id": "c", "name": "n"}
        }))
        .unwrap();
        assert!(p.images.is_empty());
    }

    #[test]
    fn test_product_with_tax_serializes_flat() {
        let p = ProductWithTax {
            product: Product {
                id: "1".into(),
                title: "Lamp".into(),
                price: 100.0,
                description: "bright".into(),
                images: vec![],
                category: Category {
                    id: "3".into(),
                    name: "Home".into(),
                },
            },
            taxes: 19.0,
        };
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["title"], "Lamp");
        assert_eq!(v["taxes"], 19.0);
        assert!(v.get("product").is_none());
    }

    #[test]
    fn test_create_dto_uses_camel_case_category() {
        let dto = CreateProductDto::builder()
            .title("new product")
            .price(100.0)
            .description("blablabla")
            .images(vec!["img".into()])
            .category_id(123)
            .build();
        let v = serde_json::to_value(&dto).unwrap();
        assert_eq!(
            v,
            json!({
                "title": "new product",
                "price": 100.0,
                "description": "blablabla",
                "images": ["img"],
                "categoryId": 123
            })
        );
    }

    #[test]
    fn test_update_dto_omits_unset_fields() {
        let dto = UpdateProductDto::builder().title("act product").build();
        let v = serde_json::to_value(&dto).unwrap();
        assert_eq!(v, json!({"title": "act product"}));
        assert!(!dto.is_empty());
        assert!(UpdateProductDto::default().is_empty());
    }
}
