//! Choosing the representative a new complaint should join.

use crate::domain::complaint::Complaint;
use crate::domain::foundation::ComplaintId;

use super::ClusterKey;

/// Where a new complaint lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterDecision {
    /// Attach as a duplicate of this representative.
    Join(ComplaintId),
    /// Become a new representative.
    StartNew,
}

/// Picks the cluster for a new complaint.
///
/// Among `candidates` that are active representatives for `key`, the most
/// recently created wins, ties broken by the greater id. Candidates that do
/// not match are ignored, so callers may pass a loosely filtered list.
pub fn resolve_cluster(key: Option<&ClusterKey>, candidates: &[Complaint]) -> ClusterDecision {
    let Some(key) = key else {
        return ClusterDecision::StartNew;
    };

    candidates
        .iter()
        .filter(|c| c.is_active_representative() && key.matches(c))
        .max_by(|a, b| {
            a.created_at()
                .cmp(b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        })
        .map(|rep| ClusterDecision::Join(*rep.id()))
        .unwrap_or(ClusterDecision::StartNew)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::complaint::{
        Category, ComplaintDraft, ComplaintType, Priority, Transition,
    };
    use crate::domain::foundation::{Role, Timestamp, UserId};

    fn draft(kind: ComplaintType, subcategory: &str) -> ComplaintDraft {
        ComplaintDraft::new(
            UserId::new("resident-1").unwrap(),
            kind,
            "2",
            None,
            Category::Electrical,
            subcategory,
            None,
            None,
        )
        .unwrap()
    }

    fn rep_at(hours_ago: i64) -> Complaint {
        draft(ComplaintType::CommonArea, "Light not working")
            .into_representative(Priority::Low, Timestamp::now().minus_hours(hours_ago))
    }

    fn key() -> ClusterKey {
        draft(ComplaintType::CommonArea, "Light not working")
            .cluster_key()
            .unwrap()
    }

    #[test]
    fn no_key_always_starts_new() {
        assert_eq!(resolve_cluster(None, &[rep_at(1)]), ClusterDecision::StartNew);
    }

    #[test]
    fn empty_candidates_start_new() {
        assert_eq!(resolve_cluster(Some(&key()), &[]), ClusterDecision::StartNew);
    }

    #[test]
    fn most_recent_active_representative_wins() {
        let older = rep_at(5);
        let newer = rep_at(1);
        let decision = resolve_cluster(Some(&key()), &[older, newer.clone()]);
        assert_eq!(decision, ClusterDecision::Join(*newer.id()));
    }

    #[test]
    fn ties_break_on_greater_id() {
        let now = Timestamp::now();
        let a = draft(ComplaintType::CommonArea, "Light not working")
            .into_representative(Priority::Low, now);
        let b = draft(ComplaintType::CommonArea, "Light not working")
            .into_representative(Priority::Low, now);
        let expected = if a.id() > b.id() { *a.id() } else { *b.id() };

        assert_eq!(
            resolve_cluster(Some(&key()), &[a.clone(), b.clone()]),
            ClusterDecision::Join(expected)
        );
        assert_eq!(
            resolve_cluster(Some(&key()), &[b, a]),
            ClusterDecision::Join(expected)
        );
    }

    #[test]
    fn terminal_representatives_are_not_joined() {
        let mut rejected = rep_at(1);
        rejected
            .apply(
                Transition::Reject { reason: "duplicate of old ticket".into() },
                &UserId::new("admin").unwrap(),
                Role::Admin,
                None,
                Timestamp::now(),
            )
            .unwrap();
        assert_eq!(
            resolve_cluster(Some(&key()), &[rejected]),
            ClusterDecision::StartNew
        );
    }

    #[test]
    fn mismatched_and_duplicate_candidates_are_ignored() {
        let rep = rep_at(3);
        let other_fault = draft(ComplaintType::CommonArea, "Fan not working")
            .into_representative(Priority::Low, Timestamp::now());
        let dup = draft(ComplaintType::CommonArea, "Light not working").into_duplicate(
            *rep.id(),
            Priority::Low,
            Timestamp::now(),
        );

        assert_eq!(
            resolve_cluster(Some(&key()), &[other_fault, dup, rep.clone()]),
            ClusterDecision::Join(*rep.id())
        );
    }
}
