use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationErrors;
use crate::model::common::non_blank;
use crate::model::{generate_id, Id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Baju,
    Celana,
    Aksesoris,
    Jaket,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Baju,
        Category::Celana,
        Category::Aksesoris,
        Category::Jaket,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Baju => "baju",
            Category::Celana => "celana",
            Category::Aksesoris => "aksesoris",
            Category::Jaket => "jaket",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not a valid enum value for path `category`.", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Id,
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Owning garment, if the product was created under one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub garment: Option<Id>,
}

impl Product {
    /// Overwrite every user-editable field. The garment back-reference is kept.
    pub fn apply(&mut self, fields: ProductFields) {
        self.name = fields.name;
        self.brand = fields.brand;
        self.price = fields.price;
        self.color = fields.color;
        self.category = fields.category;
    }
}

/// Product input as submitted by a form.
///
/// Every field is kept as raw text so that missing values and type problems
/// are reported together as validation messages instead of a rejected request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductForm {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub price: Option<String>,
    pub color: Option<String>,
    pub category: Option<String>,
}

/// A product's editable fields after validation
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub color: String,
    pub category: Option<Category>,
}

impl ProductFields {
    pub fn into_product(self, garment: Option<Id>) -> Product {
        Product {
            id: generate_id(),
            name: self.name,
            brand: self.brand,
            price: self.price,
            color: self.color,
            category: self.category,
            garment,
        }
    }
}

impl ProductForm {
    /// Validate in schema field order: name, brand, price, color, category.
    pub fn validate(&self) -> Result<ProductFields, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = required(&mut errors, "name", &self.name);
        let brand = required(&mut errors, "brand", &self.brand);
        let price = match non_blank(&self.price) {
            None => {
                errors.push("price", required_message("price"));
                None
            }
            Some(raw) => match raw.parse::<f64>() {
                Ok(value) if !value.is_finite() => {
                    errors.push("price", cast_message(&raw));
                    None
                }
                Ok(value) if value < 0.0 => {
                    errors.push(
                        "price",
                        format!(
                            "Path `price` ({}) is less than minimum allowed value (0).",
                            raw
                        ),
                    );
                    None
                }
                Ok(value) => Some(value),
                Err(_) => {
                    errors.push("price", cast_message(&raw));
                    None
                }
            },
        };
        let color = required(&mut errors, "color", &self.color);
        let category = match non_blank(&self.category) {
            None => None,
            Some(raw) => match raw.parse::<Category>() {
                Ok(category) => Some(category),
                Err(e) => {
                    errors.push("category", e.to_string());
                    None
                }
            },
        };

        match (name, brand, price, color) {
            (Some(name), Some(brand), Some(price), Some(color)) if errors.is_empty() => {
                Ok(ProductFields {
                    name,
                    brand,
                    price,
                    color,
                    category,
                })
            }
            _ => Err(errors),
        }
    }
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            name: Some(product.name.clone()),
            brand: Some(product.brand.clone()),
            price: Some(product.price.to_string()),
            color: Some(product.color.clone()),
            category: product.category.map(|c| c.to_string()),
        }
    }
}

pub(crate) fn required_message(field: &str) -> String {
    format!("Path `{}` is required.", field)
}

fn cast_message(raw: &str) -> String {
    format!("Cast to Number failed for value \"{}\" at path \"price\"", raw)
}

pub(crate) fn required(
    errors: &mut ValidationErrors,
    field: &str,
    value: &Option<String>,
) -> Option<String> {
    required_with(errors, field, value, required_message(field))
}

/// Like [`required`], with the message a schema sets for that field
pub(crate) fn required_with(
    errors: &mut ValidationErrors,
    field: &str,
    value: &Option<String>,
    message: impl Into<String>,
) -> Option<String> {
    let value = non_blank(value);
    if value.is_none() {
        errors.push(field, message);
    }
    value
}
