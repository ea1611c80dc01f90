//! Human-readable summaries of ranked results.

use std::collections::BTreeSet;

use super::rank::overall_quality;
use crate::models::ScoredItem;

/// Summarize ranked results for a query
///
/// Reports the result count, the number of distinct sources among the
/// results, and the mean score as a percentage with one decimal place.
pub fn summarize(query: &str, results: &[ScoredItem]) -> String {
    if results.is_empty() {
        return format!("No educational results found for '{}'", query);
    }

    let sources: BTreeSet<&str> = results
        .iter()
        .map(|r| r.item.source_name.as_str())
        .collect();

    format!(
        "Found {} educational results about '{}' across {} sources. Average quality: {:.1}%",
        results.len(),
        query,
        sources.len(),
        overall_quality(results) * 100.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentType;
    use crate::search::rank::rank;
    use crate::sources::mock::make_item;

    #[test]
    fn test_empty_summary() {
        assert_eq!(
            summarize("buracos negros", &[]),
            "No educational results found for 'buracos negros'"
        );
    }

    #[test]
    fn test_summary_counts_distinct_sources() {
        let ranked = rank(vec![
            make_item("a", "Other", ContentType::Mathematics, 0.9),
            make_item("b", "Other", ContentType::Mathematics, 0.5),
            make_item("c", "Second", ContentType::Mathematics, 0.7),
        ]);

        assert_eq!(
            summarize("derivada", &ranked),
            "Found 3 educational results about 'derivada' across 2 sources. Average quality: 86.7%"
        );
    }

    #[test]
    fn test_summary_is_deterministic() {
        let items = vec![
            make_item("a", "Wikipedia", ContentType::Encyclopedia, 0.8),
            make_item("b", "Brasil Escola", ContentType::EducationalPortal, 0.7),
        ];
        let first = summarize("q", &rank(items.clone()));
        let second = summarize("q", &rank(items));
        assert_eq!(first, second);
    }
}
