//! Educational quality scoring and ranking.
//!
//! The final score of an item is
//!
//! ```text
//! min(1.0, base_quality_score + source_bonus(source_name) + content_type_bonus(content_type))
//! ```
//!
//! Both bonus tables are fixed trust priors. Sources and content types missing
//! from a table get no bonus.

use crate::models::{ContentItem, ContentType, ScoredItem};

/// Maximum number of ranked results kept
pub const MAX_RESULTS: usize = 10;

/// Bonus by source display name; domain specialists rank above generalists
pub const SOURCE_BONUS: &[(&str, f64)] = &[
    ("Wikipedia", 0.10),
    ("Brasil Escola", 0.15),
    ("Só Matemática", 0.20),
];

/// Bonus by content type; specialized material ranks above generic links
pub const CONTENT_TYPE_BONUS: &[(ContentType, f64)] = &[
    (ContentType::Encyclopedia, 0.10),
    (ContentType::EducationalPortal, 0.15),
    (ContentType::Mathematics, 0.20),
];

/// Bonus for a source name
pub fn source_bonus(source_name: &str) -> f64 {
    SOURCE_BONUS
        .iter()
        .find(|(name, _)| *name == source_name)
        .map_or(0.0, |(_, bonus)| *bonus)
}

/// Bonus for a content type
pub fn content_type_bonus(content_type: ContentType) -> f64 {
    CONTENT_TYPE_BONUS
        .iter()
        .find(|(kind, _)| *kind == content_type)
        .map_or(0.0, |(_, bonus)| *bonus)
}

/// Final educational score of one item, capped at 1.0
pub fn educational_score(item: &ContentItem) -> f64 {
    let score = item.base_quality_score
        + source_bonus(&item.source_name)
        + content_type_bonus(item.content_type);
    score.min(1.0)
}

/// Score, sort and truncate candidates
///
/// The sort is stable, so equal scores keep the order they arrived in.
/// Truncation to [`MAX_RESULTS`] happens after sorting.
pub fn rank(candidates: Vec<ContentItem>) -> Vec<ScoredItem> {
    let mut scored: Vec<ScoredItem> = candidates
        .into_iter()
        .map(|item| ScoredItem {
            final_educational_score: educational_score(&item),
            item,
        })
        .collect();

    scored.sort_by(|a, b| b.final_educational_score.total_cmp(&a.final_educational_score));
    scored.truncate(MAX_RESULTS);
    scored
}

/// Mean final score, 0.0 for an empty list
pub fn overall_quality(results: &[ScoredItem]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    results.iter().map(|r| r.final_educational_score).sum::<f64>() / results.len() as f64
}
