//! # Cards
//!
//! Pure mapping from a [`Record`] to the fields a card displays.
//!
//! | Category   | Title                    | Details (only when present)                  |
//! |------------|--------------------------|----------------------------------------------|
//! | characters | full name                | nickname, house, actor, birthdate            |
//! | spells     | spell name               | use                                          |
//! | houses     | emoji + house name       | founder, colors, animal                      |
//! | books      | title                    | original title (if different), release, pages|
//!
//! Records that did not decode are shown as pretty-printed JSON.

use crate::api::{Book, Character, House, Record, Spell};

pub const UNKNOWN_CHARACTER: &str = "Unknown";
pub const UNKNOWN_SPELL: &str = "Unknown Spell";
pub const UNKNOWN_HOUSE: &str = "Unknown House";
pub const UNKNOWN_BOOK: &str = "Unknown Book";
pub const UNKNOWN_RECORD: &str = "Unknown Record";

/// One secondary line on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardField {
    pub label: Option<&'static str>,
    pub value: String,
}

impl CardField {
    fn labeled(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label: Some(label),
            value: value.into(),
        }
    }

    fn plain(value: impl Into<String>) -> Self {
        Self {
            label: None,
            value: value.into(),
        }
    }

    /// `Label: value`, or just the value for unlabeled fields.
    pub fn text(&self) -> String {
        match self.label {
            Some(label) => format!("{}: {}", label, self.value),
            None => self.value.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub details: Vec<CardField>,
}

impl Card {
    pub fn from_record(record: &Record) -> Self {
        match record {
            Record::Character(c) => character_card(c),
            Record::Spell(s) => spell_card(s),
            Record::House(h) => house_card(h),
            Record::Book(b) => book_card(b),
            Record::Raw(value) => {
                let dump = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
                Card {
                    title: UNKNOWN_RECORD.to_string(),
                    details: dump.lines().map(CardField::plain).collect(),
                }
            }
        }
    }

    /// Detail lines as display text.
    pub fn detail_lines(&self) -> Vec<String> {
        self.details.iter().map(CardField::text).collect()
    }
}

/// Treat blank strings as missing.
fn present(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn character_card(c: &Character) -> Card {
    let mut details = Vec::new();
    if let Some(nickname) = present(c.nickname.as_ref()) {
        details.push(CardField::plain(format!("\"{}\"", nickname)));
    }
    if let Some(house) = present(c.hogwarts_house.as_ref()) {
        details.push(CardField::labeled("House", house));
    }
    if let Some(actor) = present(c.interpreted_by.as_ref()) {
        details.push(CardField::labeled("Actor", actor));
    }
    if let Some(born) = present(c.birthdate.as_ref()) {
        details.push(CardField::labeled("Born", born));
    }

    Card {
        title: present(c.full_name.as_ref())
            .unwrap_or(UNKNOWN_CHARACTER)
            .to_string(),
        details,
    }
}

fn spell_card(s: &Spell) -> Card {
    let mut details = Vec::new();
    if let Some(usage) = present(s.usage.as_ref()) {
        details.push(CardField::labeled("Use", usage));
    }

    Card {
        title: present(s.spell.as_ref()).unwrap_or(UNKNOWN_SPELL).to_string(),
        details,
    }
}

fn house_card(h: &House) -> Card {
    let name = present(h.house.as_ref()).unwrap_or(UNKNOWN_HOUSE);
    let title = match present(h.emoji.as_ref()) {
        Some(emoji) => format!("{} {}", emoji, name),
        None => name.to_string(),
    };

    let mut details = Vec::new();
    if let Some(founder) = present(h.founder.as_ref()) {
        details.push(CardField::labeled("Founder", founder));
    }
    let colors: Vec<&str> = h
        .colors
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();
    if !colors.is_empty() {
        details.push(CardField::labeled("Colors", colors.join(", ")));
    }
    if let Some(animal) = present(h.animal.as_ref()) {
        details.push(CardField::labeled("Animal", animal));
    }

    Card { title, details }
}

fn book_card(b: &Book) -> Card {
    let title = present(b.title.as_ref());

    let mut details = Vec::new();
    if let Some(original) = present(b.original_title.as_ref()) {
        if Some(original) != title {
            details.push(CardField::labeled("Original Title", original));
        }
    }
    if let Some(released) = present(b.release_date.as_ref()) {
        details.push(CardField::labeled("Released", released));
    }
    if let Some(pages) = b.pages {
        details.push(CardField::labeled("Pages", pages.to_string()));
    }

    Card {
        title: title.unwrap_or(UNKNOWN_BOOK).to_string(),
        details,
    }
}
