//! Scoreboard ranking.
//!
//! Display order follows the chosen [`SortPreference`]. The top-score summary
//! is always the global maximum percent over every record, so switching the
//! sort never changes which rows are highlighted.

use std::cmp::Ordering;

use serde::Serialize;

use crate::{ScoreRecord, SortPreference};

/// Rounded percentage of correct answers, halves rounded up. Zero when the
/// record has no questions.
pub fn percent(record: &ScoreRecord) -> u32 {
    if record.total == 0 {
        return 0;
    }

    let correct = u64::from(record.correct);
    let total = u64::from(record.total);
    ((200 * correct + total) / (2 * total)) as u32
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub record: ScoreRecord,
    pub percent: u32,
    pub is_top: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TopScore {
    pub percent: u32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreboardView {
    pub preference: SortPreference,
    pub entries: Vec<RankedEntry>,
    /// `None` when there are no records.
    pub top: Option<TopScore>,
}

impl ScoreboardView {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Order `records` by `preference` and flag the top scorers.
pub fn rank(records: &[ScoreRecord], preference: SortPreference) -> ScoreboardView {
    let top_percent = records.iter().map(percent).max();

    let mut entries: Vec<RankedEntry> = records
        .iter()
        .map(|record| {
            let percent = percent(record);
            RankedEntry {
                record: record.clone(),
                percent,
                is_top: Some(percent) == top_percent,
            }
        })
        .collect();

    entries.sort_by(|a, b| compare(&a.record, &b.record, preference));

    let top = top_percent.map(|percent| TopScore {
        percent,
        count: entries.iter().filter(|e| e.is_top).count(),
    });

    ScoreboardView {
        preference,
        entries,
        top,
    }
}

fn compare(a: &ScoreRecord, b: &ScoreRecord, preference: SortPreference) -> Ordering {
    match preference {
        SortPreference::Newest => b.timestamp.cmp(&a.timestamp),
        SortPreference::Oldest => a.timestamp.cmp(&b.timestamp),
        SortPreference::Highest => {
            compare_ratio(b, a).then_with(|| b.timestamp.cmp(&a.timestamp))
        }
        SortPreference::Lowest => {
            compare_ratio(a, b).then_with(|| a.timestamp.cmp(&b.timestamp))
        }
    }
}

/// Exact comparison of `correct / total`; an empty record counts as zero.
fn compare_ratio(a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
    let (a_num, a_den) = ratio_parts(a);
    let (b_num, b_den) = ratio_parts(b);
    (a_num * b_den).cmp(&(b_num * a_den))
}

fn ratio_parts(record: &ScoreRecord) -> (u64, u64) {
    if record.total == 0 {
        (0, 1)
    } else {
        (u64::from(record.correct), u64::from(record.total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, correct: u32, total: u32, timestamp: i64) -> ScoreRecord {
        ScoreRecord::with_timestamp(name, correct, total, timestamp).unwrap()
    }

    fn names(view: &ScoreboardView) -> Vec<&str> {
        view.entries.iter().map(|e| e.record.name.as_str()).collect()
    }

    fn scenario() -> Vec<ScoreRecord> {
        vec![
            record("A", 7, 10, 1_000),
            record("B", 9, 10, 2_000),
            record("C", 5, 10, 3_000),
        ]
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(percent(&record("x", 7, 10, 0)), 70);
        assert_eq!(percent(&record("x", 1, 3, 0)), 33);
        assert_eq!(percent(&record("x", 2, 3, 0)), 67);
        assert_eq!(percent(&record("x", 1, 8, 0)), 13); // 12.5 rounds up
        assert_eq!(percent(&record("x", 10, 10, 0)), 100);
    }

    #[test]
    fn test_percent_of_empty_record_is_zero() {
        assert_eq!(percent(&record("x", 0, 0, 0)), 0);
    }

    #[test]
    fn test_highest_orders_by_ratio() {
        let view = rank(&scenario(), SortPreference::Highest);

        assert_eq!(names(&view), vec!["B", "A", "C"]);
        assert_eq!(view.top, Some(TopScore { percent: 90, count: 1 }));
    }

    #[test]
    fn test_newest_keeps_same_top_score() {
        let view = rank(&scenario(), SortPreference::Newest);

        assert_eq!(names(&view), vec!["C", "B", "A"]);
        assert_eq!(view.top, Some(TopScore { percent: 90, count: 1 }));
        assert!(view.entries[1].is_top);
        assert!(!view.entries[0].is_top);
    }

    #[test]
    fn test_oldest_and_lowest() {
        let records = scenario();

        assert_eq!(names(&rank(&records, SortPreference::Oldest)), vec!["A", "B", "C"]);
        assert_eq!(names(&rank(&records, SortPreference::Lowest)), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_tied_top_scores_are_all_flagged() {
        let records = vec![record("A", 10, 10, 1), record("B", 10, 10, 2)];

        for pref in SortPreference::ALL {
            let view = rank(&records, pref);
            assert_eq!(view.top, Some(TopScore { percent: 100, count: 2 }));
            assert!(view.entries.iter().all(|e| e.is_top));
        }
    }

    #[test]
    fn test_ratio_ties_break_on_timestamp() {
        let records = vec![
            record("early", 1, 2, 10),
            record("late", 5, 10, 20),
            record("best", 3, 3, 5),
        ];

        assert_eq!(
            names(&rank(&records, SortPreference::Highest)),
            vec!["best", "late", "early"]
        );
        assert_eq!(
            names(&rank(&records, SortPreference::Lowest)),
            vec!["early", "late", "best"]
        );
    }

    #[test]
    fn test_ratio_compares_exactly_not_by_rounded_percent() {
        // 66.6..% and 67% both round to 67
        let records = vec![record("two_thirds", 2, 3, 1), record("sixty_seven", 67, 100, 2)];

        let view = rank(&records, SortPreference::Highest);
        assert_eq!(names(&view), vec!["sixty_seven", "two_thirds"]);
        assert_eq!(view.top, Some(TopScore { percent: 67, count: 2 }));
    }

    #[test]
    fn test_empty_records() {
        let view = rank(&[], SortPreference::Highest);

        assert!(view.is_empty());
        assert_eq!(view.top, None);
    }

    #[test]
    fn test_zero_total_record_ranks_as_zero() {
        let records = vec![record("none", 0, 0, 1), record("one", 1, 4, 2)];

        let view = rank(&records, SortPreference::Lowest);
        assert_eq!(names(&view), vec!["none", "one"]);
        assert_eq!(view.entries[0].percent, 0);
        assert_eq!(view.top, Some(TopScore { percent: 25, count: 1 }));
    }

    #[test]
    fn test_rank_is_permutation_and_idempotent() {
        let records = vec![
            record("a", 3, 4, 40),
            record("b", 0, 4, 10),
            record("c", 3, 4, 30),
            record("d", 4, 4, 20),
            record("e", 0, 0, 50),
        ];

        for pref in SortPreference::ALL {
            let first = rank(&records, pref);
            let second = rank(&records, pref);
            assert_eq!(first, second);
            assert_eq!(first.len(), records.len());

            let mut ranked: Vec<ScoreRecord> =
                first.entries.iter().map(|e| e.record.clone()).collect();
            let mut original = records.clone();
            ranked.sort_by_key(|r| r.timestamp);
            original.sort_by_key(|r| r.timestamp);
            assert_eq!(ranked, original);
        }
    }

    #[test]
    fn test_top_score_independent_of_preference() {
        let records = vec![
            record("a", 3, 4, 40),
            record("b", 1, 4, 10),
            record("c", 3, 4, 30),
        ];

        let tops: Vec<Option<TopScore>> = SortPreference::ALL
            .iter()
            .map(|pref| rank(&records, *pref).top)
            .collect();

        assert!(tops.iter().all(|t| *t == Some(TopScore { percent: 75, count: 2 })));
    }
}
