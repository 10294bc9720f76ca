// Media server integration
//
// The recommender only needs three things from the library: the artist
// catalog, the albums/tracks of a given artist, and a way to turn picks
// into a playlist.

pub mod matching;
pub mod plex;

use async_trait::async_trait;

use crate::error::MediaError;
use crate::models::{Artist, Playlist, TrackCatalog, TrackPick};

pub use plex::PlexClient;

#[async_trait]
pub trait MediaLibrary: Send + Sync {
    async fn get_all_artists(&self) -> Result<Vec<Artist>, MediaError>;

    /// Albums and tracks for one artist; empty if the artist is unknown
    async fn get_artist_tracks(&self, artist_name: &str) -> Result<TrackCatalog, MediaError>;

    /// Create a playlist from picks, in pick order, skipping unmatched ones
    async fn create_curated_playlist(
        &self,
        name: &str,
        picks: &[TrackPick],
    ) -> Result<Playlist, MediaError>;
}
