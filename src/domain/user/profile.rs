//! Read-only user profile.

use serde::{Deserialize, Serialize};

use crate::domain::complaint::Category;
use crate::domain::foundation::{Role, UserId};

use super::Specialization;

/// A user record from the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
    /// Residents only.
    pub floor: Option<String>,
    /// Residents only.
    pub room: Option<String>,
    /// Workers only.
    pub specialization: Option<Specialization>,
    pub is_active: bool,
}

impl UserProfile {
    pub fn resident(id: UserId, full_name: impl Into<String>, floor: &str, room: &str) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            email: None,
            role: Role::Resident,
            floor: Some(floor.to_string()),
            room: Some(room.to_string()),
            specialization: None,
            is_active: true,
        }
    }

    pub fn worker(id: UserId, full_name: impl Into<String>, specialization: Specialization) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            email: None,
            role: Role::Worker,
            floor: None,
            room: None,
            specialization: Some(specialization),
            is_active: true,
        }
    }

    pub fn admin(id: UserId, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            email: None,
            role: Role::Admin,
            floor: None,
            room: None,
            specialization: None,
            is_active: true,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// True if this user may be assigned a task.
    pub fn is_assignable_worker(&self) -> bool {
        self.role == Role::Worker && self.is_active
    }

    pub fn handles(&self, category: Category) -> bool {
        match (self.specialization, Specialization::for_category(category)) {
            (Some(mine), Some(needed)) => mine == needed,
            _ => false,
        }
    }
}

/// Orders active workers so that specialists for `category` come first,
/// then by name. Without a category, ordering is by name only.
pub fn rank_workers_for(mut workers: Vec<UserProfile>, category: Option<Category>) -> Vec<UserProfile> {
    workers.retain(UserProfile::is_assignable_worker);
    workers.sort_by(|a, b| {
        let a_match = category.map_or(false, |c| a.handles(c));
        let b_match = category.map_or(false, |c| b.handles(c));
        b_match
            .cmp(&a_match)
            .then_with(|| a.full_name.cmp(&b.full_name))
    });
    workers
}
