//! Typed records returned by the content API.
//!
//! Every field is optional: the API omits fields freely and the card layer
//! decides what to show. A record that does not fit its category's shape is
//! kept as [`Record::Raw`] so nothing is dropped silently.

use crate::api::{Category, FetchError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub full_name: Option<String>,
    pub nickname: Option<String>,
    pub hogwarts_house: Option<String>,
    pub interpreted_by: Option<String>,
    pub birthdate: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
    pub image: Option<String>,
    pub index: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    pub spell: Option<String>,
    #[serde(rename = "use")]
    pub usage: Option<String>,
    pub index: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct House {
    pub house: Option<String>,
    pub emoji: Option<String>,
    pub founder: Option<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    pub animal: Option<String>,
    pub index: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub number: Option<u32>,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub release_date: Option<String>,
    pub description: Option<String>,
    pub pages: Option<u32>,
    pub cover: Option<String>,
    pub index: Option<u32>,
}

/// One result record, tagged by the category it was fetched from.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Character(Character),
    Spell(Spell),
    House(House),
    Book(Book),
    /// A record that did not decode into its category's shape.
    Raw(Value),
}

impl Record {
    /// Decode one JSON object as a record of `category`, falling back to
    /// [`Record::Raw`] when the shape does not match.
    pub fn decode(category: Category, value: Value) -> Self {
        let decoded = match category {
            Category::Characters => serde_json::from_value(value.clone()).map(Record::Character),
            Category::Spells => serde_json::from_value(value.clone()).map(Record::Spell),
            Category::Houses => serde_json::from_value(value.clone()).map(Record::House),
            Category::Books => serde_json::from_value(value.clone()).map(Record::Book),
        };

        decoded.unwrap_or_else(|e| {
            warn!(%category, error = %e, "record did not match category shape, keeping raw");
            Record::Raw(value)
        })
    }

    /// The category this record belongs to, if it decoded into one.
    pub fn category(&self) -> Option<Category> {
        match self {
            Record::Character(_) => Some(Category::Characters),
            Record::Spell(_) => Some(Category::Spells),
            Record::House(_) => Some(Category::Houses),
            Record::Book(_) => Some(Category::Books),
            Record::Raw(_) => None,
        }
    }
}

/// Parse a response body into records of `category`.
///
/// The body must be a JSON array; anything else is a [`FetchError::Parse`].
pub fn decode_records(category: Category, body: &str) -> Result<Vec<Record>, FetchError> {
    let values: Vec<Value> =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    Ok(values
        .into_iter()
        .map(|value| Record::decode(category, value))
        .collect())
}
