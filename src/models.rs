// Library and recommendation data types
//
// Everything here is a request-scoped snapshot: artists come from the media
// server, selections come back from the model, nothing is mutated in place.

use serde::{Deserialize, Serialize};

/// Artist as reported by the media server catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl Artist {
    pub fn new(id: impl Into<String>, name: impl Into<String>, genres: &[&str]) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_number: Option<i32>,
    /// Media server key, used to find the track again at playlist time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Track {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            duration_ms: None,
            track_number: None,
            key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// Albums and tracks for a set of artists, keyed by artist name.
///
/// Artists keep insertion order so the rendered prompt follows the order in
/// which the caller fetched them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackCatalog {
    entries: Vec<(String, Vec<Album>)>,
}

impl TrackCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the albums for an artist
    pub fn insert(&mut self, artist: impl Into<String>, albums: Vec<Album>) {
        let artist = artist.into();
        match self.entries.iter_mut().find(|(name, _)| *name == artist) {
            Some(entry) => entry.1 = albums,
            None => self.entries.push((artist, albums)),
        }
    }

    /// Merge another catalog into this one, later entries win
    pub fn extend(&mut self, other: TrackCatalog) {
        for (artist, albums) in other.entries {
            self.insert(artist, albums);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Album])> {
        self.entries
            .iter()
            .map(|(name, albums)| (name.as_str(), albums.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One `{artist, title}` pick returned by track selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackPick {
    pub artist: String,
    pub title: String,
}

impl TrackPick {
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
        }
    }
}

/// Playlist as created on the media server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: Option<String>,
    pub title: String,
    pub track_count: usize,
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_min_tracks() -> u32 {
    30
}

fn default_max_tracks() -> u32 {
    50
}

/// Body of `POST /recommendations`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistRequest {
    pub prompt: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_min_tracks")]
    pub min_tracks: u32,
    #[serde(default = "default_max_tracks")]
    pub max_tracks: u32,
}

impl PlaylistRequest {
    /// Check the track bounds, returning a message for the first violation
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=100).contains(&self.min_tracks) {
            return Err(format!(
                "min_tracks must be between 1 and 100, got {}",
                self.min_tracks
            ));
        }
        if !(1..=200).contains(&self.max_tracks) {
            return Err(format!(
                "max_tracks must be between 1 and 200, got {}",
                self.max_tracks
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistResponse {
    pub name: String,
    pub track_count: usize,
    pub artists: Vec<String>,
    pub id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_catalog_keeps_insertion_order() {
        let mut catalog = TrackCatalog::new();
        catalog.insert("Zeta", vec![]);
        catalog.insert("Alpha", vec![]);
        catalog.insert(
            "Zeta",
            vec![Album {
                name: "Z".into(),
                year: None,
                tracks: vec![],
            }],
        );

        let entries: Vec<(&str, usize)> = catalog
            .iter()
            .map(|(name, albums)| (name, albums.len()))
            .collect();
        assert_eq!(entries, vec![("Zeta", 1), ("Alpha", 0)]);
    }

    #[test]
    fn test_playlist_request_defaults() {
        let request: PlaylistRequest = serde_json::from_str(r#"{"prompt": "rainy day"}"#).unwrap();
        assert_eq!(request.model, "gpt-4");
        assert_eq!(request.min_tracks, 30);
        assert_eq!(request.max_tracks, 50);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_playlist_request_rejects_out_of_range() {
        let request: PlaylistRequest =
            serde_json::from_str(r#"{"prompt": "x", "max_tracks": 500}"#).unwrap();
        assert!(request.validate().unwrap_err().contains("max_tracks"));
    }

    #[test]
    fn test_artist_missing_name_deserializes_empty() {
        let artist: Artist = serde_json::from_str(r#"{"id": "7"}"#).unwrap();
        assert!(artist.name.is_empty());
        assert!(artist.genres.is_empty());
    }
}
