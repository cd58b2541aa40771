//! Maintenance records repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, QueryBuilder};

use super::{pagination, MaintenanceStore};
use crate::{
    error::{AppError, AppResult},
    models::{
        enums::MaintenanceStatus,
        maintenance::{
            CreateMaintenance, MaintenanceQuery, MaintenanceRecord, StatusUpdate, UpdateMaintenance,
        },
    },
};

#[derive(Clone)]
pub struct MaintenanceRepository {
    pool: Pool<Postgres>,
}

impl MaintenanceRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

const CLOSED_STATUSES: [MaintenanceStatus; 2] =
    [MaintenanceStatus::Completed, MaintenanceStatus::Cancelled];

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &MaintenanceQuery) {
    builder.push(" WHERE 1=1");

    if let Some(asset_id) = query.asset_id {
        builder.push(" AND asset_id = ").push_bind(asset_id);
    }
    if let Some(priority) = query.priority {
        builder.push(" AND priority = ").push_bind(priority);
    }
    if let Some(status) = query.status {
        builder.push(" AND status = ").push_bind(status);
    }
    match query.is_open {
        Some(true) => {
            builder
                .push(" AND status NOT IN (")
                .push_bind(CLOSED_STATUSES[0])
                .push(", ")
                .push_bind(CLOSED_STATUSES[1])
                .push(")");
        }
        Some(false) => {
            builder
                .push(" AND status IN (")
                .push_bind(CLOSED_STATUSES[0])
                .push(", ")
                .push_bind(CLOSED_STATUSES[1])
                .push(")");
        }
        None => {}
    }
    if let Some(user_id) = query.created_by_id {
        builder.push(" AND created_by_id = ").push_bind(user_id);
    }
    if let Some(after) = query.created_after {
        builder.push(" AND created_at::date >= ").push_bind(after);
    }
    if let Some(before) = query.created_before {
        builder.push(" AND created_at::date <= ").push_bind(before);
    }
    if let Some(ref search) = query.search {
        let pattern = format!("%{}%", search.trim());
        builder
            .push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR resolution ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

#[async_trait]
impl MaintenanceStore for MaintenanceRepository {
    async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceRecord> {
        sqlx::query_as::<_, MaintenanceRecord>("SELECT * FROM maintenance_records WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance record {} not found", id)))
    }

    async fn list(&self, query: &MaintenanceQuery) -> AppResult<(Vec<MaintenanceRecord>, i64)> {
        let (_, per_page, offset) = pagination(query.page, query.per_page);

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM maintenance_records");
        push_filters(&mut count, query);
        let total = count.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::<Postgres>::new("SELECT * FROM maintenance_records");
        push_filters(&mut select, query);
        select
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(per_page)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = select
            .build_query_as::<MaintenanceRecord>()
            .fetch_all(&self.pool)
            .await?;
        Ok((rows, total))
    }

    async fn list_open(&self) -> AppResult<Vec<MaintenanceRecord>> {
        let rows = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            SELECT * FROM maintenance_records
            WHERE status NOT IN ('completed', 'cancelled')
            ORDER BY scheduled_date, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_for_asset(&self, asset_id: i32) -> AppResult<Vec<MaintenanceRecord>> {
        let rows = sqlx::query_as::<_, MaintenanceRecord>(
            "SELECT * FROM maintenance_records WHERE asset_id = $1 ORDER BY scheduled_date DESC, id DESC",
        )
        .bind(asset_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create(&self, data: &CreateMaintenance) -> AppResult<MaintenanceRecord> {
        let row = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            INSERT INTO maintenance_records (
                asset_id, maintenance_type_id, title, description, priority,
                scheduled_date, created_by_id, technician
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(data.asset_id)
        .bind(data.maintenance_type_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.priority.unwrap_or_default())
        .bind(data.scheduled_date)
        .bind(data.created_by_id)
        .bind(&data.technician)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, data: &UpdateMaintenance) -> AppResult<MaintenanceRecord> {
        let mut builder =
            QueryBuilder::<Postgres>::new("UPDATE maintenance_records SET updated_at = ");
        builder.push_bind(Utc::now());

        macro_rules! set_field {
            ($field:expr, $column:literal) => {
                if let Some(ref value) = $field {
                    builder.push(concat!(", ", $column, " = ")).push_bind(value.clone());
                }
            };
        }

        set_field!(data.title, "title");
        set_field!(data.description, "description");
        set_field!(data.priority, "priority");
        set_field!(data.scheduled_date, "scheduled_date");
        set_field!(data.maintenance_type_id, "maintenance_type_id");
        set_field!(data.technician, "technician");
        set_field!(data.resolution, "resolution");

        builder.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        builder
            .build_query_as::<MaintenanceRecord>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance record {} not found", id)))
    }

    async fn apply_status(
        &self,
        id: i32,
        expected: MaintenanceStatus,
        update: &StatusUpdate,
    ) -> AppResult<MaintenanceRecord> {
        let updated = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            UPDATE maintenance_records
            SET status = $1, completed_date = $2, cost = $3, resolution = $4, updated_at = NOW()
            WHERE id = $5 AND status = $6
            RETURNING *
            "#,
        )
        .bind(update.status)
        .bind(update.completed_date)
        .bind(update.cost)
        .bind(&update.resolution)
        .bind(id)
        .bind(expected)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(record) = updated {
            return Ok(record);
        }

        // Nothing matched: either the record is gone or its status moved on
        let current: Option<MaintenanceStatus> =
            sqlx::query_scalar("SELECT status FROM maintenance_records WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        match current {
            Some(status) => Err(AppError::Conflict(format!(
                "Maintenance record {} changed from {} to {} concurrently",
                id, expected, status
            ))),
            None => Err(AppError::NotFound(format!("Maintenance record {} not found", id))),
        }
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM maintenance_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Maintenance record {} not found", id)));
        }
        Ok(())
    }
}
