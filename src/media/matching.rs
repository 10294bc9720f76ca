// Fuzzy title matching
//
// Models paraphrase titles ("Song 2" vs "Song 2 - Remastered"), so picks are
// matched against the library by similarity rather than equality.

use crate::models::Track;

/// Minimum similarity for a library track to count as a match
pub const MATCH_THRESHOLD: f64 = 0.6;

/// Similarity in `0.0..=1.0`: twice the longest common subsequence over the
/// combined length, computed on lower-cased characters.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    // Single-row LCS table
    let mut row = vec![0usize; b.len() + 1];
    for ca in &a {
        let mut diagonal = 0;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }

    2.0 * row[b.len()] as f64 / total as f64
}

/// Best-scoring track at or above `threshold`; ties keep the earlier track
pub fn best_track_match<'a>(tracks: &'a [Track], title: &str, threshold: f64) -> Option<&'a Track> {
    let mut best: Option<(&Track, f64)> = None;
    for track in tracks {
        let score = similarity(&track.title, title);
        if score >= threshold && best.map_or(true, |(_, b)| score > b) {
            best = Some((track, score));
        }
    }
    best.map(|(track, _)| track)
}
