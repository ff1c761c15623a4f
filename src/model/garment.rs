use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::model::common::non_blank;
use crate::model::product::required_with;
use crate::model::{generate_id, Id, Product};

pub const NAME_REQUIRED: &str = "Nama Tidak Boleh Kosong";
pub const CONTACT_REQUIRED: &str = "Kontak Tidak Boleh Kosong";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Garment {
    pub id: Id,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub contact: String,
    /// Owned products, in the order they were linked
    #[serde(default)]
    pub products: Vec<Id>,
}

impl Garment {
    pub fn owns(&self, product_id: &Id) -> bool {
        self.products.contains(product_id)
    }

    /// Append a product reference. Linking the same product twice is a no-op.
    pub fn link_product(&mut self, product_id: Id) {
        if !self.owns(&product_id) {
            self.products.push(product_id);
        }
    }

    /// Remove a product reference, returning whether it was present.
    pub fn unlink_product(&mut self, product_id: &Id) -> bool {
        let before = self.products.len();
        self.products.retain(|id| id != product_id);
        self.products.len() != before
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GarmentForm {
    pub name: Option<String>,
    pub location: Option<String>,
    pub contact: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GarmentFields {
    pub name: String,
    pub location: Option<String>,
    pub contact: String,
}

impl GarmentForm {
    pub fn validate(&self) -> Result<GarmentFields, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = required_with(&mut errors, "name", &self.name, NAME_REQUIRED);
        let location = non_blank(&self.location);
        let contact = required_with(&mut errors, "contact", &self.contact, CONTACT_REQUIRED);

        match (name, contact) {
            (Some(name), Some(contact)) => Ok(GarmentFields {
                name,
                location,
                contact,
            }),
            _ => Err(errors),
        }
    }
}

impl GarmentFields {
    pub fn into_garment(self) -> Garment {
        Garment {
            id: generate_id(),
            name: self.name,
            location: self.location,
            contact: self.contact,
            products: Vec::new(),
        }
    }
}

/// A garment together with the products its `products` list resolves to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulatedGarment {
    pub garment: Garment,
    pub products: Vec<Product>,
}

impl PopulatedGarment {
    /// Order `found` by the garment's reference list, dropping references
    /// that no longer resolve.
    pub fn assemble(garment: Garment, found: Vec<Product>) -> Self {
        let mut found = found;
        let products = garment
            .products
            .iter()
            .filter_map(|id| {
                let pos = found.iter().position(|p| &p.id == id)?;
                Some(found.swap_remove(pos))
            })
            .collect();
        Self { garment, products }
    }
}
