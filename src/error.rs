// Error types shared across the crate
//
// Recommendation failures keep "unparseable answer" and "parsed but empty
// answer" apart so callers can decide whether a retry is worth it.

use std::fmt;
use thiserror::Error;

/// Which pipeline step produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ArtistSelection,
    TrackSelection,
    PlaylistName,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ArtistSelection => "artist selection",
            Stage::TrackSelection => "track selection",
            Stage::PlaylistName => "playlist naming",
        };
        f.write_str(name)
    }
}

/// Failure talking to a completion provider
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("no API key configured for provider '{0}'")]
    MissingCredentials(&'static str),

    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("provider returned no completion")]
    EmptyCompletion,
}

/// Contract violations detected by the response parser
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed response ({reason}): {raw}")]
    Malformed { raw: String, reason: String },

    #[error("no {field} found in response")]
    Empty { field: &'static str },
}

#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("{stage} failed: {source}")]
    Transport {
        stage: Stage,
        #[source]
        source: CompletionError,
    },

    #[error("{stage} returned a malformed response ({reason}): {raw}")]
    MalformedResponse {
        stage: Stage,
        raw: String,
        reason: String,
    },

    #[error("{stage} returned no {field}")]
    EmptyResult { stage: Stage, field: &'static str },
}

impl RecommendationError {
    pub fn stage(&self) -> Stage {
        match self {
            Self::Transport { stage, .. }
            | Self::MalformedResponse { stage, .. }
            | Self::EmptyResult { stage, .. } => *stage,
        }
    }

    pub(crate) fn from_parse(stage: Stage, error: ParseError) -> Self {
        match error {
            ParseError::Malformed { raw, reason } => Self::MalformedResponse { stage, raw, reason },
            ParseError::Empty { field } => Self::EmptyResult { stage, field },
        }
    }
}

/// Failure talking to the media server
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("media server request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("media server error {status} for {path}")]
    Status {
        status: reqwest::StatusCode,
        path: String,
    },

    #[error("no music library section found on the media server")]
    NoMusicSection,

    #[error("no tracks could be matched from recommendations")]
    NoMatches,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },

    #[error("could not read env file: {0}")]
    DotEnv(#[from] dotenvy::Error),
}
