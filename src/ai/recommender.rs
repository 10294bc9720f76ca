// Two-stage playlist recommender
//
// Stage 1 narrows the artist catalog, stage 2 narrows the selected artists'
// tracks. Each call is: resolve model, build prompt, complete, parse. The
// caller fetches track catalogs between the stages and owns any retry.

use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use super::completion::{
    CompletionBackend, CompletionRequest, ARTIST_MAX_TOKENS, NAME_MAX_TOKENS, TEMPERATURE,
    TRACK_MAX_TOKENS,
};
use super::context_builder::LibraryContextBuilder;
use super::model_router::ModelRouter;
use super::response_parser::{parse_artists, parse_tracks};
use super::system_prompt::{
    artist_selection_prompt, track_selection_prompt, Cardinality, PLAYLIST_NAME_PROMPT,
    PLAYLIST_TRACKS, SINGLE_STAGE_ARTISTS, TWO_STAGE_ARTISTS,
};
use crate::error::{ParseError, RecommendationError, Stage};
use crate::models::{Artist, TrackCatalog, TrackPick};

const FALLBACK_NAME_PREFIX: &str = "AI Playlist: ";
const MAX_FALLBACK_NAME_CHARS: usize = 60;

pub struct Recommender {
    backend: Arc<dyn CompletionBackend>,
    router: ModelRouter,
}

impl Recommender {
    pub fn new(backend: Arc<dyn CompletionBackend>, router: ModelRouter) -> Self {
        Self { backend, router }
    }

    /// Stage 1: pick 10-15 artists for the theme
    #[instrument(skip(self, artists), fields(artists = artists.len()))]
    pub async fn select_artists(
        &self,
        theme: &str,
        artists: &[Artist],
        model: &str,
    ) -> Result<Vec<String>, RecommendationError> {
        self.pick_artists(theme, artists, model, TWO_STAGE_ARTISTS).await
    }

    /// Single-stage shortcut: a looser 15-20 artist pick with no track refinement
    #[instrument(skip(self, artists), fields(artists = artists.len()))]
    pub async fn get_recommendations(
        &self,
        theme: &str,
        artists: &[Artist],
        model: &str,
    ) -> Result<Vec<String>, RecommendationError> {
        self.pick_artists(theme, artists, model, SINGLE_STAGE_ARTISTS).await
    }

    /// Stage 2: pick 20-30 tracks from the selected artists' catalogs
    #[instrument(skip(self, catalog), fields(artists = catalog.len()))]
    pub async fn select_tracks(
        &self,
        theme: &str,
        catalog: &TrackCatalog,
        model: &str,
    ) -> Result<Vec<TrackPick>, RecommendationError> {
        let context = LibraryContextBuilder::track_context(catalog);
        let request = self.request(
            model,
            track_selection_prompt(PLAYLIST_TRACKS),
            LibraryContextBuilder::user_message(&context, theme),
            TRACK_MAX_TOKENS,
        );

        let raw = self.complete(Stage::TrackSelection, &request).await?;
        let tracks = self.checked(Stage::TrackSelection, &raw, parse_tracks(&raw))?;
        info!(count = tracks.len(), ?tracks, "selected tracks");
        Ok(tracks)
    }

    /// Ask the model for a short playlist title.
    ///
    /// A blank answer falls back to a name derived from the theme.
    #[instrument(skip(self))]
    pub async fn generate_playlist_name(
        &self,
        theme: &str,
        model: &str,
    ) -> Result<String, RecommendationError> {
        let request = self.request(
            model,
            PLAYLIST_NAME_PROMPT.to_string(),
            format!("Create a playlist name for: {}", theme),
            NAME_MAX_TOKENS,
        );

        let raw = self.complete(Stage::PlaylistName, &request).await?;
        let name = clean_playlist_name(&raw);
        if name.is_empty() {
            return Ok(fallback_playlist_name(theme));
        }
        Ok(name)
    }

    async fn pick_artists(
        &self,
        theme: &str,
        artists: &[Artist],
        model: &str,
        count: Cardinality,
    ) -> Result<Vec<String>, RecommendationError> {
        let context = LibraryContextBuilder::artist_context(artists);
        let request = self.request(
            model,
            artist_selection_prompt(count),
            LibraryContextBuilder::user_message(&context, theme),
            ARTIST_MAX_TOKENS,
        );

        let raw = self.complete(Stage::ArtistSelection, &request).await?;
        let selected = self.checked(Stage::ArtistSelection, &raw, parse_artists(&raw))?;
        info!(count = selected.len(), ?selected, "selected artists");
        Ok(selected)
    }

    fn request(
        &self,
        alias: &str,
        system: String,
        user: String,
        max_tokens: u32,
    ) -> CompletionRequest {
        CompletionRequest {
            model: self.router.resolve(alias).to_string(),
            system,
            user,
            max_tokens,
            temperature: TEMPERATURE,
        }
    }

    async fn complete(
        &self,
        stage: Stage,
        request: &CompletionRequest,
    ) -> Result<String, RecommendationError> {
        debug!(%stage, model = %request.model, "requesting completion");
        match self.backend.complete(request).await {
            Ok(raw) => {
                debug!(%stage, raw = %raw, "raw LLM response");
                Ok(raw)
            }
            Err(source) => {
                error!(%stage, error = %source, "completion request failed");
                Err(RecommendationError::Transport { stage, source })
            }
        }
    }

    /// Log a parse failure with the raw answer, then tag it with its stage
    fn checked<T>(
        &self,
        stage: Stage,
        raw: &str,
        parsed: Result<Vec<T>, ParseError>,
    ) -> Result<Vec<T>, RecommendationError> {
        parsed.map_err(|e| {
            error!(%stage, error = %e, received = %raw, "could not use LLM response");
            RecommendationError::from_parse(stage, e)
        })
    }
}

/// Trim whitespace and any quotes the model wrapped the title in
fn clean_playlist_name(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}

fn fallback_playlist_name(theme: &str) -> String {
    format!("{}{}", FALLBACK_NAME_PREFIX, theme.trim())
        .chars()
        .take(MAX_FALLBACK_NAME_CHARS)
        .collect()
}
