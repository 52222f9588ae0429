//! Medicine search for the billing screen.

use strsim::{jaro_winkler, normalized_levenshtein};

use crate::models::Batch;

/// Minimum similarity for a fuzzy hit.
pub const FUZZY_THRESHOLD: f64 = 0.75;

/// Find batches by medication name or batch id.
///
/// Case-insensitive substring hits come first in inventory order,
/// followed by fuzzy name matches ranked by similarity. At most `limit`
/// batches are returned. An empty query lists the first `limit` batches.
pub fn lookup_batches<'a>(available: &'a [Batch], query: &str, limit: usize) -> Vec<&'a Batch> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return available.iter().take(limit).collect();
    }

    let mut hits: Vec<&Batch> = Vec::new();
    let mut fuzzy: Vec<(f64, usize)> = Vec::new();

    for (index, batch) in available.iter().enumerate() {
        let name = batch.med_name.to_lowercase();
        if name.contains(&query) || batch.batch_id.to_lowercase().contains(&query) {
            hits.push(batch);
            continue;
        }

        let score = similarity(&query, &name);
        if score >= FUZZY_THRESHOLD {
            fuzzy.push((score, index));
        }
    }

    // Highest score first; ties keep inventory order
    fuzzy.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal).then(a.1.cmp(&b.1)));

    hits.extend(fuzzy.into_iter().map(|(_, index)| &available[index]));
    hits.truncate(limit);
    hits
}

fn similarity(a: &str, b: &str) -> f64 {
    jaro_winkler(a, b) * 0.6 + normalized_levenshtein(a, b) * 0.4
}
