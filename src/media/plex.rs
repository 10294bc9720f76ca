// Plex media server client
//
// Talks to the Plex HTTP API with JSON responses. Only the music library is
// used: the first library section of type "artist".

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::matching::{best_track_match, MATCH_THRESHOLD};
use super::MediaLibrary;
use crate::error::MediaError;
use crate::models::{Album, Artist, Playlist, Track, TrackCatalog, TrackPick};

const ARTIST_TYPE: &str = "8";
const LIBRARY_URI: &str = "com.plexapp.plugins.library/library/metadata";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(rename = "MediaContainer")]
    container: T,
}

#[derive(Debug, Default, Deserialize)]
struct SectionList {
    #[serde(rename = "Directory", default)]
    directories: Vec<Section>,
}

#[derive(Debug, Deserialize)]
struct Section {
    key: String,
    #[serde(rename = "type")]
    section_type: String,
}

#[derive(Debug, Default, Deserialize)]
struct MetadataList {
    #[serde(rename = "Metadata", default)]
    items: Vec<Metadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Metadata {
    rating_key: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    duration: Option<i64>,
    #[serde(default)]
    index: Option<i32>,
    #[serde(default)]
    leaf_count: Option<usize>,
    #[serde(rename = "Genre", default)]
    genres: Vec<Tag>,
}

#[derive(Debug, Deserialize)]
struct Tag {
    tag: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Identity {
    machine_identifier: String,
}

pub struct PlexClient {
    base_url: String,
    token: String,
    client: Client,
}

impl PlexClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            client,
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, MediaError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .header(header::ACCEPT, "application/json")
            .header("X-Plex-Token", &self.token)
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MediaError::Status {
                status: response.status(),
                path: path.to_string(),
            });
        }

        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.container)
    }

    async fn music_section(&self) -> Result<String, MediaError> {
        let sections: SectionList = self.get("/library/sections", &[]).await?;
        sections
            .directories
            .into_iter()
            .find(|section| section.section_type == "artist")
            .map(|section| section.key)
            .ok_or(MediaError::NoMusicSection)
    }

    async fn children(&self, rating_key: &str) -> Result<Vec<Metadata>, MediaError> {
        let list: MetadataList = self
            .get(&format!("/library/metadata/{}/children", rating_key), &[])
            .await?;
        Ok(list.items)
    }

    /// First artist whose title matches the search
    async fn find_artist(&self, name: &str) -> Result<Option<Metadata>, MediaError> {
        let section = self.music_section().await?;
        let list: MetadataList = self
            .get(
                &format!("/library/sections/{}/all", section),
                &[("type", ARTIST_TYPE), ("title", name)],
            )
            .await?;
        Ok(list.items.into_iter().next())
    }

    async fn artist_albums(&self, artist: &Metadata) -> Result<Vec<Album>, MediaError> {
        let mut albums = Vec::new();
        for album in self.children(&artist.rating_key).await? {
            let tracks = self
                .children(&album.rating_key)
                .await?
                .into_iter()
                .map(|track| Track {
                    title: track.title,
                    duration_ms: track.duration,
                    track_number: track.index,
                    key: Some(track.rating_key),
                })
                .collect();

            albums.push(Album {
                name: album.title,
                year: album.year,
                tracks,
            });
        }
        Ok(albums)
    }

    async fn machine_identifier(&self) -> Result<String, MediaError> {
        let identity: Identity = self.get("/identity", &[]).await?;
        Ok(identity.machine_identifier)
    }

    /// Resolve picks to library rating keys, keeping pick order
    async fn match_picks(&self, picks: &[TrackPick]) -> Result<Vec<String>, MediaError> {
        // Albums per artist, fetched once per call
        let mut albums_by_artist: HashMap<String, Option<Vec<Album>>> = HashMap::new();
        let mut matched = Vec::new();

        for pick in picks {
            if !albums_by_artist.contains_key(&pick.artist) {
                let albums = match self.find_artist(&pick.artist).await? {
                    Some(artist) => Some(self.artist_albums(&artist).await?),
                    None => None,
                };
                albums_by_artist.insert(pick.artist.clone(), albums);
            }

            let Some(albums) = albums_by_artist.get(&pick.artist).and_then(Option::as_ref) else {
                warn!(artist = %pick.artist, "artist not found");
                continue;
            };

            let found = albums
                .iter()
                .find_map(|album| best_track_match(&album.tracks, &pick.title, MATCH_THRESHOLD))
                .and_then(|track| track.key.clone());

            match found {
                Some(key) => {
                    debug!(artist = %pick.artist, title = %pick.title, %key, "matched track");
                    matched.push(key);
                }
                None => {
                    warn!(artist = %pick.artist, title = %pick.title, "no matching track found")
                }
            }
        }

        Ok(matched)
    }
}

#[async_trait]
impl MediaLibrary for PlexClient {
    async fn get_all_artists(&self) -> Result<Vec<Artist>, MediaError> {
        let section = self.music_section().await?;
        let list: MetadataList = self
            .get(
                &format!("/library/sections/{}/all", section),
                &[("type", ARTIST_TYPE)],
            )
            .await?;

        Ok(list
            .items
            .into_iter()
            .map(|item| Artist {
                id: item.rating_key,
                name: item.title,
                genres: item.genres.into_iter().map(|g| g.tag).collect(),
            })
            .collect())
    }

    async fn get_artist_tracks(&self, artist_name: &str) -> Result<TrackCatalog, MediaError> {
        let mut catalog = TrackCatalog::new();
        match self.find_artist(artist_name).await? {
            Some(artist) => {
                let albums = self.artist_albums(&artist).await?;
                catalog.insert(artist_name, albums);
            }
            None => warn!(artist = %artist_name, "artist not found in library"),
        }
        Ok(catalog)
    }

    async fn create_curated_playlist(
        &self,
        name: &str,
        picks: &[TrackPick],
    ) -> Result<Playlist, MediaError> {
        let keys = self.match_picks(picks).await?;
        if keys.is_empty() {
            return Err(MediaError::NoMatches);
        }

        let machine = self.machine_identifier().await?;
        let uri = format!("server://{}/{}/{}", machine, LIBRARY_URI, keys.join(","));

        let response = self
            .client
            .post(format!("{}/playlists", self.base_url))
            .header(header::ACCEPT, "application/json")
            .header("X-Plex-Token", &self.token)
            .query(&[
                ("type", "audio"),
                ("title", name),
                ("smart", "0"),
                ("uri", uri.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MediaError::Status {
                status: response.status(),
                path: "/playlists".to_string(),
            });
        }

        let envelope: Envelope<MetadataList> = response.json().await?;
        let created = envelope.container.items.into_iter().next();

        let playlist = Playlist {
            id: created.as_ref().map(|p| p.rating_key.clone()),
            title: created
                .as_ref()
                .map(|p| p.title.clone())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| name.to_string()),
            track_count: created
                .and_then(|p| p.leaf_count)
                .unwrap_or(keys.len()),
        };

        info!(title = %playlist.title, tracks = playlist.track_count, "created playlist");
        Ok(playlist)
    }
}
