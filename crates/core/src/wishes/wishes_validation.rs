//! Validation and normalization of incoming wish payloads.

use url::Url;

use super::wishes_model::{NewWish, PriceInput, WishDefaults, WishInput, WishPatch};
use crate::constants::UPLOADS_PREFIX;
use crate::errors::{Result, ValidationError};

/// Validates a full creation payload. Only `title` is mandatory; every other
/// field falls back to its default.
pub fn normalize_new(input: WishInput, defaults: &WishDefaults) -> Result<NewWish> {
    let title = input
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ValidationError::MissingField("title".to_string()))?
        .to_string();

    let image = normalize_url("image", input.image, true)?;
    let link = normalize_url("link", input.link, false)?;
    let price = parse_price(input.price.as_ref())?;

    Ok(NewWish {
        title,
        description: input.description.unwrap_or_default(),
        price,
        currency: non_blank(input.currency).unwrap_or_else(|| defaults.currency.clone()),
        image: image.unwrap_or_default(),
        link: link.unwrap_or_default(),
        owner: non_blank(input.owner).unwrap_or_else(|| defaults.owner.clone()),
        bought: input.bought.map(|b| b.is_truthy()).unwrap_or(false),
        created_at: None,
    })
}

/// Validates a partial update. Absent fields stay absent so the stored value
/// is kept.
pub fn normalize_patch(input: WishInput) -> Result<WishPatch> {
    let title = match input.title {
        Some(t) => {
            let t = t.trim();
            if t.is_empty() {
                return Err(ValidationError::MissingField("title".to_string()).into());
            }
            Some(t.to_string())
        }
        None => None,
    };

    let image = normalize_url("image", input.image, true)?;
    let link = normalize_url("link", input.link, false)?;
    let price = parse_price(input.price.as_ref())?;

    Ok(WishPatch {
        title,
        description: input.description,
        price,
        currency: non_blank(input.currency),
        image,
        link,
        owner: non_blank(input.owner),
        bought: input.bought.map(|b| b.is_truthy()),
    })
}

/// Parses a client price. Blank means "no price"; anything else must be a
/// finite number.
pub fn parse_price(price: Option<&PriceInput>) -> Result<Option<f64>> {
    let value = match price {
        None => return Ok(None),
        Some(PriceInput::Number(n)) => *n,
        Some(PriceInput::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<f64>()
                .map_err(|_| ValidationError::InvalidNumber("price".to_string()))?
        }
    };
    if !value.is_finite() {
        return Err(ValidationError::InvalidNumber("price".to_string()).into());
    }
    Ok(Some(value))
}

/// Accepts an absolute URL, or for images a path under the uploads prefix.
/// An empty string is kept as-is: it clears the field.
pub fn is_valid_reference(value: &str, allow_upload_path: bool) -> bool {
    if value.is_empty() {
        return true;
    }
    if allow_upload_path && value.starts_with(UPLOADS_PREFIX) {
        return true;
    }
    Url::parse(value).is_ok()
}

fn normalize_url(
    field: &str,
    value: Option<String>,
    allow_upload_path: bool,
) -> Result<Option<String>> {
    match value {
        None => Ok(None),
        Some(v) => {
            let v = v.trim().to_string();
            if is_valid_reference(&v, allow_upload_path) {
                Ok(Some(v))
            } else {
                Err(ValidationError::InvalidUrl(field.to_string()).into())
            }
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
