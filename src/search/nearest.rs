//! Deep-link support: pick the result closest to a requested playback second.

use super::SearchResult;

/// Index of the result whose start second is nearest to `target_sec`.
///
/// Ties keep the earliest result. An exact hit short-circuits the scan.
/// Returns `None` when there are no results.
pub fn nearest_result(results: &[SearchResult], target_sec: u64) -> Option<usize> {
    if results.is_empty() {
        return None;
    }

    let mut best_idx = 0;
    let mut best_distance = u64::MAX;
    for (idx, result) in results.iter().enumerate() {
        let distance = result.start_sec.abs_diff(target_sec);
        if distance < best_distance {
            best_distance = distance;
            best_idx = idx;
            if distance == 0 {
                break;
            }
        }
    }

    Some(best_idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchResult;

    fn result_at(start_sec: u64) -> SearchResult {
        SearchResult {
            episode_key: "s1e1".to_string(),
            cue_index: 1,
            start_sec,
            end_sec: start_sec + 2,
            time: String::new(),
            text: String::new(),
            youtube_url: String::new(),
            embed_url: String::new(),
        }
    }

    #[test]
    fn test_empty_results_give_none() {
        assert_eq!(nearest_result(&[], 10), None);
    }

    #[test]
    fn test_picks_closest_start() {
        let results = vec![result_at(5), result_at(40), result_at(41)];
        assert_eq!(nearest_result(&results, 42), Some(2));
        assert_eq!(nearest_result(&results, 6), Some(0));
    }

    #[test]
    fn test_exact_match_wins() {
        let results = vec![result_at(5), result_at(12), result_at(12)];
        assert_eq!(nearest_result(&results, 12), Some(1));
    }

    #[test]
    fn test_tie_keeps_earliest() {
        let results = vec![result_at(10), result_at(14)];
        assert_eq!(nearest_result(&results, 12), Some(0));
    }

    #[test]
    fn test_target_before_all_results() {
        let results = vec![result_at(30), result_at(60)];
        assert_eq!(nearest_result(&results, 0), Some(0));
    }
}
