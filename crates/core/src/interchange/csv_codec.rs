//! CSV rendering and lenient parsing of wish rows.

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::collections::HashMap;

use crate::constants::{CSV_TIMESTAMP_FORMAT, UNTITLED_WISH};
use crate::errors::{Error, InterchangeError, Result};
use crate::wishes::{NewWish, Wish, WishDefaults};

/// Column order of exported files.
pub const CSV_HEADERS: [&str; 10] = [
    "id",
    "title",
    "description",
    "price",
    "currency",
    "image",
    "link",
    "owner",
    "bought",
    "created_at",
];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Layouts accepted for `created_at` on import.
const IMPORT_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
];

/// Serializes wishes, in the order given, with a header row.
pub fn render_csv(wishes: &[Wish]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    for wish in wishes {
        let price = wish.price.map(|p| p.to_string()).unwrap_or_default();
        let created_at = wish
            .created_at
            .map(|ts| ts.format(CSV_TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default();
        let id = wish.id.to_string();
        writer.write_record([
            id.as_str(),
            wish.title.as_str(),
            wish.description.as_str(),
            price.as_str(),
            wish.currency.as_str(),
            wish.image.as_str(),
            wish.link.as_str(),
            wish.owner.as_str(),
            if wish.bought { "1" } else { "0" },
            created_at.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| Error::Unexpected(format!("Failed to flush CSV: {}", e)))
}

/// Parses an uploaded CSV into insertable rows.
///
/// The whole document is read before anything is returned, so a syntax error
/// anywhere rejects the file as a unit. Individual cells are coerced leniently.
pub fn parse_csv(content: &[u8], defaults: &WishDefaults) -> Result<Vec<NewWish>> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
    let text = std::str::from_utf8(content)
        .map_err(|e| InterchangeError::Encoding(e.to_string()))?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let columns: HashMap<String, usize> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.trim().to_ascii_lowercase(), idx))
        .collect();

    let mut wishes = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = Row {
            record: &record,
            columns: &columns,
        };
        wishes.push(row.into_new_wish(defaults));
    }
    Ok(wishes)
}

struct Row<'a> {
    record: &'a StringRecord,
    columns: &'a HashMap<String, usize>,
}

impl Row<'_> {
    fn cell(&self, name: &str) -> &str {
        self.columns
            .get(name)
            .and_then(|idx| self.record.get(*idx))
            .unwrap_or("")
    }

    fn non_blank(&self, name: &str) -> Option<String> {
        let value = self.cell(name).trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    fn into_new_wish(self, defaults: &WishDefaults) -> NewWish {
        let price = self
            .cell("price")
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite());
        let bought = {
            let raw = self.cell("bought").trim();
            raw == "1" || raw.eq_ignore_ascii_case("true")
        };

        NewWish {
            title: self
                .non_blank("title")
                .unwrap_or_else(|| UNTITLED_WISH.to_string()),
            description: self.cell("description").to_string(),
            price,
            currency: self
                .non_blank("currency")
                .unwrap_or_else(|| defaults.currency.clone()),
            image: self.cell("image").trim().to_string(),
            link: self.cell("link").trim().to_string(),
            owner: self
                .non_blank("owner")
                .unwrap_or_else(|| defaults.owner.clone()),
            bought,
            created_at: parse_timestamp(self.cell("created_at")),
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    IMPORT_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}
