//! Wire types for the favorites endpoints

use serde::{Deserialize, Serialize};

/// A project the user has bookmarked.
///
/// Identity is `(user_id, project_id)`; the remaining fields are display
/// data denormalized by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteProject {
    pub user_id: String,
    pub project_id: u64,
    pub name_ar: String,
    pub name_en: String,
    pub price: f64,
    pub location: String,
    pub main_image_url: Option<String>,
}

/// A property unit the user has bookmarked, keyed by `unit_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteUnit {
    pub user_id: String,
    pub unit_id: u64,
    pub name_ar: String,
    pub name_en: String,
    pub price: f64,
    pub location: String,
    pub main_image_url: Option<String>,
}

/// The complete, server-authoritative favorites set as of the last fetch.
///
/// Always replaced wholesale; the client never patches it incrementally, so
/// counts and membership can never drift from server state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesSnapshot {
    pub favorite_projects: Vec<FavoriteProject>,
    pub favorite_units: Vec<FavoriteUnit>,
    pub total_projects: u32,
    pub total_units: u32,
}

/// Request body for adding a project to favorites
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProjectFavorite {
    pub user_id: String,
    pub project_id: u64,
    pub is_available: bool,
}

/// Request body for adding a unit to favorites
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddUnitFavorite {
    pub user_id: String,
    pub unit_id: u64,
    pub is_available: bool,
}
