//! Wire types for the interest-record endpoints

use serde::{Deserialize, Serialize};

/// How the user asked to be contacted about a lead submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    Email,
    Phone,
    Whatsapp,
}

/// A lead-registration submission targeting a project.
///
/// Created by a form submission, destroyed by explicit removal, never
/// mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestedProject {
    pub user_id: String,
    pub project_id: u64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub preferred_contact: ContactMethod,
    pub name_ar: String,
    pub name_en: String,
    pub price: f64,
    pub location: String,
    pub main_image_url: Option<String>,
}

/// A lead-registration submission targeting a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestedUnit {
    pub user_id: String,
    pub unit_id: u64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub preferred_contact: ContactMethod,
    pub name_ar: String,
    pub name_en: String,
    pub price: f64,
    pub location: String,
    pub main_image_url: Option<String>,
}

/// The complete interest-record set as of the last fetch, replaced wholesale
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestedSnapshot {
    pub interested_projects: Vec<InterestedProject>,
    pub interested_units: Vec<InterestedUnit>,
    pub total_projects: u32,
    pub total_units: u32,
}
