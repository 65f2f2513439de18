//! Concert and performer DTOs

use chrono::NaiveDateTime;
use domain_concert::Genre;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcertDto {
    pub id: i64,
    pub name: String,
    pub image_name: Option<String>,
    pub blurb: Option<String>,
    pub dates: Vec<NaiveDateTime>,
    pub performers: Vec<PerformerDto>,
}

/// Reduced projection used for concert listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcertSummaryDto {
    pub id: i64,
    pub name: String,
    pub image_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformerDto {
    pub id: i64,
    pub name: String,
    pub image_name: Option<String>,
    pub genre: Genre,
    pub blurb: Option<String>,
}
