//! A postal code the store delivers to, with its delivery fee.

use serde::{Deserialize, Serialize};

super::record_id!(AreaId, "area");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceArea {
    pub id: AreaId,
    pub name: String,
    /// Unique across areas.
    pub postal_code: String,
    pub delivery_fee: f64,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct AreaDraft {
    pub name: String,
    pub postal_code: String,
    pub delivery_fee: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AreaPatch {
    pub name: Option<String>,
    pub delivery_fee: Option<f64>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AreaFilter {
    PostalCode(String),
    Active,
}
