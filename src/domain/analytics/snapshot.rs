//! Admin dashboard counters computed from representative complaints.

use serde::Serialize;

use crate::domain::complaint::{Complaint, ComplaintStatus};

/// Counters over representatives plus the average time to resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSnapshot {
    pub total_complaints: u64,
    pub resolved_complaints: u64,
    /// Assigned or In Progress.
    pub in_progress: u64,
    pub pending_complaints: u64,
    pub active_workers: u64,
    /// Mean hours from creation to acceptance, rounded to 2 decimals.
    pub avg_resolution_time: f64,
}

impl AnalyticsSnapshot {
    /// Aggregates over `complaints`; duplicates are skipped.
    pub fn compute<'a, I>(complaints: I, active_workers: u64) -> Self
    where
        I: IntoIterator<Item = &'a Complaint>,
    {
        let mut snapshot = Self {
            total_complaints: 0,
            resolved_complaints: 0,
            in_progress: 0,
            pending_complaints: 0,
            active_workers,
            avg_resolution_time: 0.0,
        };
        let mut resolved_hours = 0.0;
        let mut resolved_samples = 0u64;

        for complaint in complaints {
            let Some(lifecycle) = complaint.lifecycle() else {
                continue;
            };
            snapshot.total_complaints += 1;
            match lifecycle.status {
                ComplaintStatus::Completed => {
                    snapshot.resolved_complaints += 1;
                    if let Some(resolved_at) = lifecycle.resolved_at {
                        resolved_hours += resolved_at.hours_since(complaint.created_at());
                        resolved_samples += 1;
                    }
                }
                ComplaintStatus::Assigned | ComplaintStatus::InProgress => {
                    snapshot.in_progress += 1
                }
                ComplaintStatus::Pending => snapshot.pending_complaints += 1,
                _ => {}
            }
        }

        if resolved_samples > 0 {
            let mean = resolved_hours / resolved_samples as f64;
            snapshot.avg_resolution_time = (mean * 100.0).round() / 100.0;
        }
        snapshot
    }
}
