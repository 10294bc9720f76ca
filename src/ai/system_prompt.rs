// System prompts for the playlist curator
//
// The output schema is described in prose. Providers are treated as plain
// text generators, so the response parser is what actually enforces it.

use std::fmt;

/// Inclusive range of items the model is asked to return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cardinality {
    pub min: usize,
    pub max: usize,
}

impl Cardinality {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Artist count for the first stage of the two-stage pipeline
pub const TWO_STAGE_ARTISTS: Cardinality = Cardinality::new(10, 15);

/// Artist count for the single-stage shortcut
pub const SINGLE_STAGE_ARTISTS: Cardinality = Cardinality::new(15, 20);

/// Track count for the second stage
pub const PLAYLIST_TRACKS: Cardinality = Cardinality::new(20, 30);

/// Instruction for picking artists out of the library
pub fn artist_selection_prompt(count: Cardinality) -> String {
    format!(
        r#"You are a multilingual music curator helping to create playlists.
Your responses must ALWAYS be in English, even when the prompt is in another language.
Analyze the available artists and their genres, then select the most appropriate ones for the requested playlist.

You must ALWAYS respond with valid JSON only, in this exact format:
{{"artists": ["Artist1", "Artist2", "Artist3"]}}

Do not add any explanations, markdown or other text - just the JSON object.
Select {count} artists that match the mood/theme, only from the provided list."#
    )
}

/// Instruction for picking tracks out of the selected artists' albums
pub fn track_selection_prompt(count: Cardinality) -> String {
    format!(
        r#"You are a multilingual music curator creating a cohesive playlist.
Your responses must ALWAYS be in English and contain ONLY a valid JSON object.

Based on the available tracks and the playlist theme, select specific songs that:
1. Flow well together
2. Match the requested mood/theme
3. Create a balanced representation of artists

You must respond with ONLY a JSON object in this exact format:
{{
    "tracks": [
        {{"artist": "artist name", "title": "track title"}}
    ]
}}

Select {count} tracks total. Do not add any explanations, markdown or additional text."#
    )
}

pub const PLAYLIST_NAME_PROMPT: &str = r#"You are a creative music curator naming playlists.
Your responses must ALWAYS be in English, even when the prompt is in another language.
Reply with a short, catchy playlist name of at most six words.
Respond with the name only: no quotes, no explanations, no punctuation at the end."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artist_prompt_embeds_cardinality_and_schema() {
        let prompt = artist_selection_prompt(TWO_STAGE_ARTISTS);
        assert!(prompt.contains("Select 10-15 artists"));
        assert!(prompt.contains(r#"{"artists": ["Artist1", "Artist2", "Artist3"]}"#));
        assert!(prompt.contains("ALWAYS be in English"));
        assert!(prompt.contains("only from the provided list"));

        let loose = artist_selection_prompt(SINGLE_STAGE_ARTISTS);
        assert!(loose.contains("Select 15-20 artists"));
    }

    #[test]
    fn test_track_prompt_embeds_schema() {
        let prompt = track_selection_prompt(PLAYLIST_TRACKS);
        assert!(prompt.contains("Select 20-30 tracks"));
        assert!(prompt.contains(r#"{"artist": "artist name", "title": "track title"}"#));
        assert!(prompt.contains("Flow well together"));
    }
}
