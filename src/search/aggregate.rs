//! Merging per-source results into one candidate list.

use std::collections::BTreeSet;

use crate::models::{ContentItem, SourceResult};

/// Candidates and source bookkeeping gathered from one dispatch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    /// Every item from every successful source
    pub candidates: Vec<ContentItem>,

    /// Sources that completed without error
    pub sources_searched: BTreeSet<String>,

    /// Sources that failed or timed out
    pub sources_failed: BTreeSet<String>,
}

/// Merge source results
///
/// Items keep their per-source order and sources are appended in the order
/// given. Nothing is deduplicated here: the same URL from two sources stays
/// twice. A source that succeeded with no items still counts as searched.
pub fn aggregate(results: Vec<SourceResult>) -> Aggregation {
    let mut aggregation = Aggregation::default();

    for result in results {
        match result.error {
            Some(_) => {
                aggregation.sources_failed.insert(result.source_id);
            }
            None => {
                aggregation.sources_searched.insert(result.source_id);
                aggregation.candidates.extend(result.items);
            }
        }
    }

    aggregation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentType, SourceFailure};
    use crate::sources::mock::make_item;

    #[test]
    fn test_partitions_sources() {
        let results = vec![
            SourceResult::success(
                "wikipedia",
                vec![
                    make_item("a", "Wikipedia", ContentType::Encyclopedia, 0.9),
                    make_item("b", "Wikipedia", ContentType::Encyclopedia, 0.8),
                ],
            ),
            SourceResult::failure("duckduckgo", SourceFailure::Timeout),
            SourceResult::success("so_matematica", vec![]),
            SourceResult::failure("brasil_escola", SourceFailure::AdapterFailure("x".into())),
        ];

        let aggregation = aggregate(results);

        assert_eq!(
            aggregation.sources_searched,
            BTreeSet::from(["wikipedia".to_string(), "so_matematica".to_string()])
        );
        assert_eq!(
            aggregation.sources_failed,
            BTreeSet::from(["duckduckgo".to_string(), "brasil_escola".to_string()])
        );
        assert!(aggregation
            .sources_searched
            .is_disjoint(&aggregation.sources_failed));
        let titles: Vec<_> = aggregation.candidates.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[test]
    fn test_keeps_duplicate_urls() {
        let item = make_item("same", "A", ContentType::Generic, 0.5);
        let results = vec![
            SourceResult::success("a", vec![item.clone()]),
            SourceResult::success("b", vec![item]),
        ];

        let aggregation = aggregate(results);
        assert_eq!(aggregation.candidates.len(), 2);
        assert_eq!(aggregation.candidates[0].url, aggregation.candidates[1].url);
    }

    #[test]
    fn test_empty_input() {
        let aggregation = aggregate(Vec::new());
        assert!(aggregation.candidates.is_empty());
        assert!(aggregation.sources_searched.is_empty());
        assert!(aggregation.sources_failed.is_empty());
    }
}
