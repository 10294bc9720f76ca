// Library context builder for AI consumption
//
// Renders the artist catalog or the per-artist track catalog as plain text
// for the user message. Output is deterministic: same catalog, same text.

use crate::models::{Artist, TrackCatalog};
use std::fmt::Write;

pub struct LibraryContextBuilder;

impl LibraryContextBuilder {
    /// One `name - genre, genre` line per named artist
    pub fn artist_context(artists: &[Artist]) -> String {
        let lines: Vec<String> = artists
            .iter()
            .filter(|artist| !artist.name.is_empty())
            .map(|artist| format!("{} - {}", artist.name, artist.genres.join(", ")))
            .collect();

        format!("Available artists and their genres:\n{}", lines.join("\n"))
    }

    /// Artists, their albums and each album's track titles, in catalog order
    pub fn track_context(catalog: &TrackCatalog) -> String {
        let mut context = String::from("Available tracks by artist:\n");
        for (artist, albums) in catalog.iter() {
            let _ = writeln!(context, "\n{}:", artist);
            for album in albums {
                let _ = writeln!(context, "Album: {}", album.name);
                for track in &album.tracks {
                    let _ = writeln!(context, "- {}", track.title);
                }
            }
        }
        context
    }

    /// Wrap a context block and the user's theme into the user message
    pub fn user_message(context: &str, theme: &str) -> String {
        format!("Context: {}\n\nCreate a playlist for: {}", context, theme)
    }
}
