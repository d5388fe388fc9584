//! PostgreSQL implementation of ComplaintRepository and ComplaintReader.
//!
//! Cluster uniqueness is enforced by the partial unique index
//! `complaints_active_cluster_key`; lifecycle writes compare-and-set on
//! `version`. Both surface as `ConcurrencyConflict` when a race is lost.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use std::fmt::Display;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::clustering::ClusterKey;
use crate::domain::complaint::{
    Complaint, ComplaintStatus, Lifecycle, Membership, Subcategory, TransitionAction,
    TransitionRecord,
};
use crate::domain::foundation::{
    ComplaintId, DomainError, ErrorCode, Timestamp, TransitionId, UserId,
};
use crate::ports::{ComplaintReader, ComplaintRepository, RepresentativeFilter};

const COMPLAINT_COLUMNS: &str = r#"
    id, author_id, complaint_type, floor, room, category, subcategory,
    description, media_url, priority, representative_id, status, count,
    assigned_worker_id, outcome, rejection_reason, resolution, resolved_at,
    version, created_at, updated_at
"#;

/// PostgreSQL-backed complaint store.
#[derive(Clone)]
pub struct PostgresComplaintStore {
    pool: PgPool,
}

impl PostgresComplaintStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_where(
        &self,
        clause: &str,
        bind: impl FnOnce(
            sqlx::query::Query<'_, Postgres, sqlx::postgres::PgArguments>,
        ) -> sqlx::query::Query<'_, Postgres, sqlx::postgres::PgArguments>,
        context: &str,
    ) -> Result<Vec<Complaint>, DomainError> {
        let sql = format!(
            "SELECT {} FROM complaints WHERE {} ORDER BY created_at DESC, id DESC",
            COMPLAINT_COLUMNS, clause
        );
        let rows = bind(sqlx::query(&sql))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error(context, e))?;
        rows.into_iter().map(row_to_complaint).collect()
    }
}

#[async_trait]
impl ComplaintRepository for PostgresComplaintStore {
    async fn insert_representative(&self, complaint: &Complaint) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| db_error("begin", e))?;
        insert_complaint(&mut tx, complaint).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict(format!(
                    "An active representative already exists for {}",
                    complaint.cluster_key().map(|k| k.to_string()).unwrap_or_default()
                ))
            } else {
                db_error("Failed to insert complaint", e)
            }
        })?;
        tx.commit().await.map_err(|e| db_error("commit", e))?;
        Ok(())
    }

    async fn attach_duplicate(&self, duplicate: &Complaint) -> Result<u32, DomainError> {
        let rep_id = *duplicate.representative_id().ok_or_else(|| {
            DomainError::new(
                ErrorCode::InternalError,
                "attach_duplicate called with a representative",
            )
        })?;
        let key = duplicate.cluster_key().ok_or_else(|| {
            DomainError::new(
                ErrorCode::InternalError,
                "attach_duplicate called with a personal_room complaint",
            )
        })?;

        let mut tx = self.pool.begin().await.map_err(|e| db_error("begin", e))?;

        let row = sqlx::query(
            r#"
            UPDATE complaints
               SET count = count + 1, updated_at = $5
             WHERE id = $1
               AND representative_id IS NULL
               AND status NOT IN ('Rejected', 'Completed')
               AND floor = $2 AND category = $3 AND subcategory = $4
            RETURNING count
            "#,
        )
        .bind(rep_id.as_uuid())
        .bind(key.floor.as_str())
        .bind(key.category.as_str())
        .bind(key.subcategory.as_str())
        .bind(duplicate.created_at().as_datetime())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to bump cluster count", e))?;

        let Some(row) = row else {
            return Err(DomainError::conflict(format!(
                "Representative {} is no longer active for {}",
                rep_id, key
            )));
        };
        let count: i32 = row.get("count");

        insert_complaint(&mut tx, duplicate)
            .await
            .map_err(|e| db_error("Failed to insert duplicate", e))?;
        tx.commit().await.map_err(|e| db_error("commit", e))?;

        Ok(count as u32)
    }

    async fn apply_transition(
        &self,
        complaint: &Complaint,
        expected_version: u64,
        record: &TransitionRecord,
    ) -> Result<(), DomainError> {
        let lifecycle = complaint.lifecycle().ok_or_else(|| {
            DomainError::new(ErrorCode::NotRepresentative, "Duplicates have no lifecycle")
                .with_detail("complaint_id", complaint.id().to_string())
        })?;

        let mut tx = self.pool.begin().await.map_err(|e| db_error("begin", e))?;

        // count is left alone; attach_duplicate owns it.
        let result = sqlx::query(
            r#"
            UPDATE complaints SET
                status = $3,
                assigned_worker_id = $4,
                outcome = $5,
                rejection_reason = $6,
                resolution = $7,
                resolved_at = $8,
                version = $9,
                updated_at = $10
            WHERE id = $1 AND version = $2 AND representative_id IS NULL
            "#,
        )
        .bind(complaint.id().as_uuid())
        .bind(expected_version as i64)
        .bind(lifecycle.status.as_str())
        .bind(lifecycle.assigned_worker_id.as_ref().map(|w| w.as_str()))
        .bind(lifecycle.outcome.map(|o| o.as_str()))
        .bind(lifecycle.rejection_reason.as_deref())
        .bind(lifecycle.resolution.as_deref())
        .bind(lifecycle.resolved_at.map(|t| *t.as_datetime()))
        .bind(lifecycle.version as i64)
        .bind(complaint.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to update complaint", e))?;

        if result.rows_affected() == 0 {
            let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM complaints WHERE id = $1")
                .bind(complaint.id().as_uuid())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to check complaint", e))?;
            return Err(match exists {
                None => DomainError::new(ErrorCode::ComplaintNotFound, "Complaint not found")
                    .with_detail("complaint_id", complaint.id().to_string()),
                Some(_) => DomainError::conflict(format!(
                    "Complaint {} changed since it was read",
                    complaint.id()
                ))
                .with_detail("expected_version", expected_version.to_string()),
            });
        }

        sqlx::query(
            r#"
            INSERT INTO complaint_transitions (
                id, complaint_id, action, from_status, to_status, actor_id,
                actor_role, rationale, outcome, proof_media, occurred_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.complaint_id.as_uuid())
        .bind(record.action.as_str())
        .bind(record.from_status.as_str())
        .bind(record.to_status.as_str())
        .bind(record.actor_id.as_str())
        .bind(record.actor_role.as_str())
        .bind(record.rationale.as_deref())
        .bind(record.outcome.map(|o| o.as_str()))
        .bind(record.proof_media.as_deref())
        .bind(record.occurred_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to record transition", e))?;

        tx.commit().await.map_err(|e| db_error("commit", e))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &ComplaintId) -> Result<Option<Complaint>, DomainError> {
        let sql = format!("SELECT {} FROM complaints WHERE id = $1", COMPLAINT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch complaint", e))?;
        row.map(row_to_complaint).transpose()
    }
}

#[async_trait]
impl ComplaintReader for PostgresComplaintStore {
    async fn find_active_representatives(
        &self,
        key: &ClusterKey,
    ) -> Result<Vec<Complaint>, DomainError> {
        let floor = key.floor.clone();
        let category = key.category.as_str();
        let subcategory = key.subcategory.as_str().to_string();
        self.fetch_where(
            "representative_id IS NULL AND complaint_type = 'common_area' \
             AND status NOT IN ('Rejected', 'Completed') \
             AND floor = $1 AND category = $2 AND subcategory = $3",
            move |q| q.bind(floor).bind(category).bind(subcategory),
            "Failed to find cluster representatives",
        )
        .await
    }

    async fn list_by_author(&self, author_id: &UserId) -> Result<Vec<Complaint>, DomainError> {
        let author = author_id.as_str().to_string();
        self.fetch_where(
            "author_id = $1",
            move |q| q.bind(author),
            "Failed to list complaints by author",
        )
        .await
    }

    async fn list_representatives(
        &self,
        filter: &RepresentativeFilter,
    ) -> Result<Vec<Complaint>, DomainError> {
        let status = filter.status.map(|s| s.as_str());
        let worker = filter
            .assigned_worker_id
            .as_ref()
            .map(|w| w.as_str().to_string());
        self.fetch_where(
            "representative_id IS NULL \
             AND ($1::TEXT IS NULL OR status = $1) \
             AND ($2::TEXT IS NULL OR assigned_worker_id = $2)",
            move |q| q.bind(status).bind(worker),
            "Failed to list representatives",
        )
        .await
    }

    async fn find_by_ids(&self, ids: &[ComplaintId]) -> Result<Vec<Complaint>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        self.fetch_where(
            "id = ANY($1)",
            move |q| q.bind(uuids),
            "Failed to fetch complaints",
        )
        .await
    }

    async fn list_duplicates(
        &self,
        representative_id: &ComplaintId,
    ) -> Result<Vec<Complaint>, DomainError> {
        let rep = *representative_id.as_uuid();
        self.fetch_where(
            "representative_id = $1",
            move |q| q.bind(rep),
            "Failed to list duplicates",
        )
        .await
    }

    async fn transition_history(
        &self,
        complaint_id: &ComplaintId,
    ) -> Result<Vec<TransitionRecord>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, complaint_id, action, from_status, to_status, actor_id,
                   actor_role, rationale, outcome, proof_media, occurred_at
            FROM complaint_transitions
            WHERE complaint_id = $1
            ORDER BY occurred_at ASC, id ASC
            "#,
        )
        .bind(complaint_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch transition history", e))?;

        rows.into_iter().map(row_to_transition).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Row mapping
// ════════════════════════════════════════════════════════════════════════════════

async fn insert_complaint(
    tx: &mut Transaction<'_, Postgres>,
    complaint: &Complaint,
) -> Result<(), sqlx::Error> {
    let lifecycle = complaint.lifecycle();
    sqlx::query(
        r#"
        INSERT INTO complaints (
            id, author_id, complaint_type, floor, room, category, subcategory,
            description, media_url, priority, representative_id, status, count,
            assigned_worker_id, outcome, rejection_reason, resolution, resolved_at,
            version, created_at, updated_at
        ) VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
            $14, $15, $16, $17, $18, $19, $20, $21
        )
        "#,
    )
    .bind(complaint.id().as_uuid())
    .bind(complaint.author_id().as_str())
    .bind(complaint.complaint_type().as_str())
    .bind(complaint.floor())
    .bind(complaint.room())
    .bind(complaint.category().as_str())
    .bind(complaint.subcategory().as_str())
    .bind(complaint.description())
    .bind(complaint.media_url())
    .bind(complaint.priority().as_str())
    .bind(complaint.representative_id().map(|id| *id.as_uuid()))
    .bind(lifecycle.map(|l| l.status.as_str()))
    .bind(lifecycle.map(|l| l.count as i32))
    .bind(lifecycle.and_then(|l| l.assigned_worker_id.as_ref().map(|w| w.as_str())))
    .bind(lifecycle.and_then(|l| l.outcome.map(|o| o.as_str())))
    .bind(lifecycle.and_then(|l| l.rejection_reason.as_deref()))
    .bind(lifecycle.and_then(|l| l.resolution.as_deref()))
    .bind(lifecycle.and_then(|l| l.resolved_at.map(|t| *t.as_datetime())))
    .bind(lifecycle.map(|l| l.version as i64))
    .bind(complaint.created_at().as_datetime())
    .bind(complaint.updated_at().as_datetime())
    .execute(&mut **tx)
    .await?;
    Ok(())
}

fn row_to_complaint(row: PgRow) -> Result<Complaint, DomainError> {
    let id: Uuid = row.get("id");
    let representative_id: Option<Uuid> = row.get("representative_id");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
    let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");

    let membership = match representative_id {
        Some(rep) => Membership::Duplicate {
            representative_id: ComplaintId::from_uuid(rep),
        },
        None => {
            let status: Option<String> = row.get("status");
            let count: Option<i32> = row.get("count");
            let version: Option<i64> = row.get("version");
            let worker: Option<String> = row.get("assigned_worker_id");
            let outcome: Option<String> = row.get("outcome");
            let resolved_at: Option<chrono::DateTime<chrono::Utc>> = row.get("resolved_at");
            Membership::Representative(Lifecycle {
                status: parse_column("status", &status.unwrap_or_default())?,
                count: count.unwrap_or(1) as u32,
                assigned_worker_id: worker.map(UserId::new).transpose()?,
                outcome: outcome.map(|o| parse_column("outcome", &o)).transpose()?,
                rejection_reason: row.get("rejection_reason"),
                resolution: row.get("resolution"),
                resolved_at: resolved_at.map(Timestamp::from_datetime),
                version: version.unwrap_or(1) as u64,
            })
        }
    };

    let author: String = row.get("author_id");
    let complaint_type: String = row.get("complaint_type");
    let category: String = row.get("category");
    let subcategory: String = row.get("subcategory");
    let priority: String = row.get("priority");

    Ok(Complaint::reconstitute(
        ComplaintId::from_uuid(id),
        UserId::new(author)?,
        parse_column("complaint_type", &complaint_type)?,
        row.get("floor"),
        row.get("room"),
        parse_column("category", &category)?,
        Subcategory::from_trusted(subcategory),
        row.get("description"),
        row.get("media_url"),
        parse_column("priority", &priority)?,
        membership,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

fn row_to_transition(row: PgRow) -> Result<TransitionRecord, DomainError> {
    let id: Uuid = row.get("id");
    let complaint_id: Uuid = row.get("complaint_id");
    let action: String = row.get("action");
    let from_status: String = row.get("from_status");
    let to_status: String = row.get("to_status");
    let actor_id: String = row.get("actor_id");
    let actor_role: String = row.get("actor_role");
    let outcome: Option<String> = row.get("outcome");
    let occurred_at: chrono::DateTime<chrono::Utc> = row.get("occurred_at");

    Ok(TransitionRecord {
        id: TransitionId::from_uuid(id),
        complaint_id: ComplaintId::from_uuid(complaint_id),
        action: TransitionAction::parse(&action).ok_or_else(|| {
            DomainError::database(format!("Unknown transition action in database: {}", action))
        })?,
        from_status: parse_column::<ComplaintStatus>("from_status", &from_status)?,
        to_status: parse_column::<ComplaintStatus>("to_status", &to_status)?,
        actor_id: UserId::new(actor_id)?,
        actor_role: parse_column("actor_role", &actor_role)?,
        rationale: row.get("rationale"),
        outcome: outcome.map(|o| parse_column("outcome", &o)).transpose()?,
        proof_media: row.get("proof_media"),
        occurred_at: Timestamp::from_datetime(occurred_at),
    })
}

/// Parses a stored enum column, reporting corrupt values as database errors.
pub(super) fn parse_column<T>(column: &str, value: &str) -> Result<T, DomainError>
where
    T: FromStr,
    T::Err: Display,
{
    value.parse::<T>().map_err(|e| {
        DomainError::database(format!("Invalid {} in database '{}': {}", column, value, e))
    })
}

pub(super) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::database(format!("{}: {}", context, e))
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}
