// src/domain/listing.rs
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PropertyType {
    Condo,
    House,
    Land,
    Apartment,
    Villa,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Condo => "Condo",
            PropertyType::House => "House",
            PropertyType::Land => "Land",
            PropertyType::Apartment => "Apartment",
            PropertyType::Villa => "Villa",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Condo" => Ok(PropertyType::Condo),
            "House" => Ok(PropertyType::House),
            "Land" => Ok(PropertyType::Land),
            "Apartment" => Ok(PropertyType::Apartment),
            "Villa" => Ok(PropertyType::Villa),
            other => Err(format!("unknown property type {other:?}")),
        }
    }
}

/// Transaction kind of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    Sale,
    Rent,
}

impl ListingType {
    /// Human label used in synthesized descriptions ("for Sale", "for Rent").
    pub fn label(&self) -> &'static str {
        match self {
            ListingType::Sale => "Sale",
            ListingType::Rent => "Rent",
        }
    }
}

impl FromStr for ListingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sale" => Ok(ListingType::Sale),
            "rent" => Ok(ListingType::Rent),
            other => Err(format!("unknown listing type {other:?}")),
        }
    }
}

/// The read-only subset of a listing needed for link previews.
/// Field names follow the `properties` table columns.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListingPreview {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<String>,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub listing_type: ListingType,
    pub city: Option<String>,
}

impl ListingPreview {
    /// Free-text description, if it has any visible content.
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
    }

    /// First listed image; a blank first entry means no cover.
    pub fn cover_image(&self) -> Option<&str> {
        self.images
            .first()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SitemapEntry {
    pub slug: String,
    pub updated_at: Option<DateTime<Utc>>,
}
