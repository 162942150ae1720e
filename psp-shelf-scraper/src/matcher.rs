//! Title matching for search results.
//!
//! Curated titles rarely match RAWG names byte-for-byte (subtitles,
//! punctuation, regional names), so a search fallback picks the closest
//! candidate by edit distance and rejects anything too far off.

use crate::types::GameRecord;

/// Levenshtein distance between `a` and `b`, counted in chars.
///
/// Case-sensitive: callers lowercase both sides first.
pub fn distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Pick the candidate whose name best matches `target`.
///
/// A case-insensitive exact name match wins outright (first one in order).
/// Otherwise the closest candidate is accepted only if its distance is
/// strictly below half the target's length; ties keep the earlier
/// candidate.
pub fn select_best_match<'a>(target: &str, candidates: &'a [GameRecord]) -> Option<&'a GameRecord> {
    if candidates.is_empty() {
        return None;
    }

    // Threshold uses the title as given; lowercasing can add chars (İ -> i̇).
    let target_len = target.chars().count();
    let target = target.to_lowercase();

    if let Some(exact) = candidates
        .iter()
        .find(|c| c.name.to_lowercase() == target)
    {
        return Some(exact);
    }

    let (best, score) = candidates
        .iter()
        .map(|c| (c, distance(&target, &c.name.to_lowercase())))
        .fold(None, |best: Option<(&GameRecord, usize)>, (c, d)| match best {
            Some((_, bd)) if bd <= d => best,
            _ => Some((c, d)),
        })?;

    // score < len / 2, kept in integers
    if score * 2 < target_len {
        log::debug!(
            "Accepted \"{}\" for \"{}\" (distance {})",
            best.name,
            target,
            score
        );
        Some(best)
    } else {
        log::debug!(
            "Rejected closest candidate \"{}\" for \"{}\" (distance {}, length {})",
            best.name,
            target,
            score,
            target_len
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, name: &str) -> GameRecord {
        GameRecord {
            id,
            slug: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            description: None,
            released: None,
            rating: 0.0,
            rating_top: 0,
            ratings_count: 0,
            metacritic: None,
            image: None,
            platforms: vec![],
            genres: vec![],
        }
    }

    #[test]
    fn distance_to_self_is_zero() {
        for s in ["", "a", "Patapon", "Crisis Core: Final Fantasy VII"] {
            assert_eq!(distance(s, s), 0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            ("kitten", "sitting"),
            ("", "abc"),
            ("lumines", "lumines ii"),
            ("god of war", "gods of warr"),
        ];
        for (a, b) in pairs {
            assert_eq!(distance(a, b), distance(b, a), "{a} / {b}");
        }
    }

    #[test]
    fn distance_from_empty_is_length() {
        assert_eq!(distance("", "abc"), 3);
        assert_eq!(distance("abc", ""), 3);
    }

    #[test]
    fn distance_kitten_sitting() {
        assert_eq!(distance("kitten", "sitting"), 3);
    }

    #[test]
    fn distance_is_case_sensitive() {
        assert_eq!(distance("Lumines", "lumines"), 1);
    }

    #[test]
    fn distance_counts_chars_not_bytes() {
        assert_eq!(distance("pokémon", "pokemon"), 1);
    }

    #[test]
    fn no_candidates_no_match() {
        assert!(select_best_match("Final Fantasy", &[]).is_none());
    }

    #[test]
    fn exact_match_beats_closer_inexact() {
        let candidates = vec![
            record(1, "Crisis Core"),
            record(2, "Crisis Core: Final Fantasy VII"),
        ];
        let best = select_best_match("Crisis Core", &candidates).unwrap();
        assert_eq!(best.id, 1);
    }

    #[test]
    fn exact_match_is_case_insensitive_and_wins_over_order() {
        let candidates = vec![record(1, "Lumines II"), record(2, "LUMINES")];
        let best = select_best_match("Lumines", &candidates).unwrap();
        assert_eq!(best.id, 2);
    }

    #[test]
    fn first_exact_match_wins() {
        let candidates = vec![record(1, "Daxter"), record(2, "daxter")];
        assert_eq!(select_best_match("DAXTER", &candidates).unwrap().id, 1);
    }

    #[test]
    fn close_misspelling_is_accepted() {
        let candidates = vec![record(7, "Gods of Warr")];
        let best = select_best_match("God of War", &candidates).unwrap();
        assert_eq!(best.id, 7);
    }

    #[test]
    fn short_target_rejects_unrelated_candidate() {
        let candidates = vec![record(1, "Completely Unrelated Title")];
        assert!(select_best_match("Go", &candidates).is_none());
    }

    #[test]
    fn closest_candidate_is_chosen() {
        let candidates = vec![
            record(1, "Patapon 3"),
            record(2, "Patapon 2"),
            record(3, "Patapon 2: Don Chaka"),
        ];
        let best = select_best_match("Patapon 2!", &candidates).unwrap();
        assert_eq!(best.id, 2);
    }

    #[test]
    fn ties_keep_earlier_candidate() {
        let candidates = vec![record(1, "Lumines X"), record(2, "Lumines Y")];
        let best = select_best_match("Lumines Z", &candidates).unwrap();
        assert_eq!(best.id, 1);
    }

    // Threshold is strict: distance must be < len / 2.
    #[test]
    fn distance_equal_to_half_length_is_rejected() {
        // "abcd" (len 4) vs "abxy": distance 2, 2 < 2 is false
        let candidates = vec![record(1, "abxy")];
        assert!(select_best_match("abcd", &candidates).is_none());
        // "abcde" (len 5) vs "abcxy": distance 2, 2 < 2.5 is true
        let candidates = vec![record(1, "abcxy")];
        assert!(select_best_match("abcde", &candidates).is_some());
    }

    #[test]
    fn threshold_counts_title_before_lowercasing() {
        // "İİİİ" is 4 chars but lowercases to 8 ("i\u{307}" each).
        let candidates = vec![record(1, "İİii")];
        assert!(select_best_match("İİİİ", &candidates).is_none());
        let candidates = vec![record(2, "İİİi")];
        assert_eq!(select_best_match("İİİİ", &candidates).unwrap().id, 2);
    }

    #[test]
    fn selection_is_deterministic() {
        let candidates = vec![
            record(1, "Ratchet & Clank: Size Matters"),
            record(2, "Secret Agent Clank"),
        ];
        let a = select_best_match("Ratchet and Clank Size Matters", &candidates).map(|r| r.id);
        let b = select_best_match("Ratchet and Clank Size Matters", &candidates).map(|r| r.id);
        assert_eq!(a, b);
        assert_eq!(a, Some(1));
    }
}
