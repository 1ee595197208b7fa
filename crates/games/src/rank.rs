use crate::LeaderboardEntry;
use std::cmp::Ordering;

/// Total order for leaderboard entries.
///
/// Higher score first; among equal scores the faster time wins, with
/// untimed entries sorting after every timed one; remaining ties go to
/// the more recent entry. The SQL already orders rows this way, and the
/// in-memory sort re-asserts the same order before ranks are assigned.
pub fn rank(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| match (a.time_taken, b.time_taken) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| b.created_at.cmp(&a.created_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlayerView;
    use chrono::DateTime;
    use chrono::Utc;
    use sgs_core::ID;

    fn entry(score: i32, time_taken: Option<i32>, created_at: DateTime<Utc>) -> LeaderboardEntry {
        LeaderboardEntry {
            rank: 0,
            user: PlayerView {
                id: ID::default(),
                name: "player".into(),
                avatar: "P".into(),
            },
            score,
            time_taken,
            accuracy: None,
            created_at,
        }
    }

    #[test]
    fn score_then_time_then_recency() {
        let now = Utc::now();
        let mut entries = vec![
            entry(100, Some(10), now),
            entry(100, Some(5), now),
            entry(90, Some(1), now),
        ];
        entries.sort_by(rank);
        let order: Vec<_> = entries.iter().map(|e| (e.score, e.time_taken)).collect();
        assert_eq!(
            order,
            vec![(100, Some(5)), (100, Some(10)), (90, Some(1))]
        );
    }

    #[test]
    fn untimed_entries_sort_last_within_a_score() {
        let now = Utc::now();
        let mut entries = vec![entry(50, None, now), entry(50, Some(60), now)];
        entries.sort_by(rank);
        assert_eq!(entries[0].time_taken, Some(60));
        assert_eq!(entries[1].time_taken, None);
    }

    #[test]
    fn recency_breaks_full_ties() {
        let older = Utc::now();
        let newer = older + chrono::Duration::seconds(30);
        let mut entries = vec![entry(70, None, older), entry(70, None, newer)];
        entries.sort_by(rank);
        assert_eq!(entries[0].created_at, newer);
    }
}
