// Response parser - the single place the output contract is enforced
//
// The provider is asked for a bare JSON object. Whatever comes back is
// trimmed and parsed strictly; there is no fence stripping and no attempt to
// dig a JSON object out of surrounding prose.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ParseError;
use crate::models::TrackPick;

const ARTISTS_FIELD: &str = "artists";
const TRACKS_FIELD: &str = "tracks";

/// Parse `raw` and return the non-empty list stored under `field`.
///
/// A missing or null field is treated the same as an empty list. Model
/// order is kept.
fn parse_selection<T: DeserializeOwned>(
    raw: &str,
    field: &'static str,
) -> Result<Vec<T>, ParseError> {
    let malformed = |reason: String| ParseError::Malformed {
        raw: raw.to_string(),
        reason,
    };

    let document: Value =
        serde_json::from_str(raw.trim()).map_err(|e| malformed(e.to_string()))?;

    let object = document
        .as_object()
        .ok_or_else(|| malformed("expected a JSON object".to_string()))?;

    let items: Vec<T> = match object.get(field) {
        None | Some(Value::Null) => Vec::new(),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| malformed(format!("invalid '{}' field: {}", field, e)))?,
    };

    if items.is_empty() {
        return Err(ParseError::Empty { field });
    }

    Ok(items)
}

/// Stage 1 answer: `{"artists": [name, ...]}`
pub fn parse_artists(raw: &str) -> Result<Vec<String>, ParseError> {
    parse_selection(raw, ARTISTS_FIELD)
}

/// Stage 2 answer: `{"tracks": [{"artist", "title"}, ...]}`
pub fn parse_tracks(raw: &str) -> Result<Vec<TrackPick>, ParseError> {
    parse_selection(raw, TRACKS_FIELD)
}
