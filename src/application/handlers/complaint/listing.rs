//! Listing rows that name the people behind a complaint.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::domain::complaint::{ComplaintError, ComplaintView};
use crate::domain::foundation::UserId;
use crate::domain::user::{Specialization, UserProfile};
use crate::ports::UserDirectory;

/// Directory details shown next to a complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonSummary {
    pub id: UserId,
    pub full_name: String,
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<Specialization>,
}

impl From<&UserProfile> for PersonSummary {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id.clone(),
            full_name: profile.full_name.clone(),
            email: profile.email.clone(),
            specialization: profile.specialization,
        }
    }
}

/// A complaint row in a queue or task list.
///
/// Serializes as the complaint's own fields plus `reporter` and, on admin
/// queues, `assignee`. A user missing from the directory is `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplaintListing {
    #[serde(flatten)]
    pub complaint: ComplaintView,
    pub reporter: Option<PersonSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<PersonSummary>,
}

/// Which people a listing names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum People {
    Reporter,
    ReporterAndAssignee,
}

/// Decorates `views` with directory details, fetching all users in one lookup.
pub(crate) async fn attach_people(
    users: &dyn UserDirectory,
    views: Vec<ComplaintView>,
    people: People,
) -> Result<Vec<ComplaintListing>, ComplaintError> {
    let with_assignee = people == People::ReporterAndAssignee;
    let assignee_of = |view: &ComplaintView| {
        if with_assignee {
            view.assigned_worker_id.clone()
        } else {
            None
        }
    };

    let ids: Vec<UserId> = views
        .iter()
        .flat_map(|v| std::iter::once(v.author_id.clone()).chain(assignee_of(v)))
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let directory: HashMap<UserId, PersonSummary> = if ids.is_empty() {
        HashMap::new()
    } else {
        users
            .find_by_ids(&ids)
            .await?
            .iter()
            .map(|profile| (profile.id.clone(), PersonSummary::from(profile)))
            .collect()
    };

    Ok(views
        .into_iter()
        .map(|view| {
            let reporter = directory.get(&view.author_id).cloned();
            let assignee = assignee_of(&view).and_then(|id| directory.get(&id).cloned());
            ComplaintListing {
                complaint: view,
                reporter,
                assignee,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserDirectory;
    use crate::domain::complaint::{
        Category, ComplaintDraft, ComplaintType, Priority, Transition,
    };
    use crate::domain::foundation::{Role, Timestamp};

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    fn view(author: &str, worker: Option<&str>) -> ComplaintView {
        let mut c = ComplaintDraft::new(
            uid(author),
            ComplaintType::CommonArea,
            "1",
            None,
            Category::Plumbing,
            "Broken pipe",
            None,
            None,
        )
        .unwrap()
        .into_representative(Priority::Low, Timestamp::now());
        if let Some(worker) = worker {
            c.apply(
                Transition::Approve {
                    worker_id: uid(worker),
                },
                &uid("admin-1"),
                Role::Admin,
                None,
                Timestamp::now(),
            )
            .unwrap();
        }
        ComplaintView::of_representative(&c).unwrap()
    }

    fn directory() -> InMemoryUserDirectory {
        InMemoryUserDirectory::with_users([
            UserProfile::resident(uid("r1"), "Rina", "1", "101").with_email("rina@example.org"),
            UserProfile::worker(uid("w1"), "Asha Rao", Specialization::Plumber),
        ])
    }

    #[tokio::test]
    async fn names_reporter_and_assignee() {
        let rows = attach_people(
            &directory(),
            vec![view("r1", Some("w1"))],
            People::ReporterAndAssignee,
        )
        .await
        .unwrap();

        let reporter = rows[0].reporter.as_ref().unwrap();
        assert_eq!(reporter.full_name, "Rina");
        assert_eq!(reporter.email.as_deref(), Some("rina@example.org"));
        let assignee = rows[0].assignee.as_ref().unwrap();
        assert_eq!(assignee.full_name, "Asha Rao");
        assert_eq!(assignee.specialization, Some(Specialization::Plumber));
    }

    #[tokio::test]
    async fn reporter_only_leaves_assignee_out() {
        let rows = attach_people(&directory(), vec![view("r1", Some("w1"))], People::Reporter)
            .await
            .unwrap();

        assert!(rows[0].reporter.is_some());
        assert!(rows[0].assignee.is_none());
    }

    #[tokio::test]
    async fn unknown_users_stay_empty() {
        let rows = attach_people(
            &directory(),
            vec![view("stranger", None)],
            People::ReporterAndAssignee,
        )
        .await
        .unwrap();

        assert!(rows[0].reporter.is_none());
        assert!(rows[0].assignee.is_none());
    }

    #[tokio::test]
    async fn serializes_flat_with_people() {
        let rows = attach_people(
            &directory(),
            vec![view("r1", Some("w1"))],
            People::ReporterAndAssignee,
        )
        .await
        .unwrap();

        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["status"], "Assigned");
        assert_eq!(json["count"], 1);
        assert_eq!(json["reporter"]["full_name"], "Rina");
        assert_eq!(json["assignee"]["specialization"], "plumber");
    }
}
