//! Assets repository for database operations

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres, QueryBuilder};

use super::{pagination, AssetStore};
use crate::{
    error::{AppError, AppResult},
    models::asset::{
        Asset, AssetQuery, CreateAsset, UpdateAsset, DEFAULT_DEPRECIATION_RATE,
        DEFAULT_WARRANTY_MONTHS,
    },
};

#[derive(Clone)]
pub struct AssetsRepository {
    pool: Pool<Postgres>,
}

impl AssetsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Append the WHERE clause for an asset query
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &AssetQuery) {
    builder.push(" WHERE 1=1");

    if let Some(status_id) = query.status_id {
        builder.push(" AND a.status_id = ").push_bind(status_id);
    }
    if let Some(model_id) = query.model_id {
        builder.push(" AND a.model_id = ").push_bind(model_id);
    }
    if let Some(manufacturer_id) = query.manufacturer_id {
        builder.push(" AND m.manufacturer_id = ").push_bind(manufacturer_id);
    }
    if let Some(category_id) = query.category_id {
        builder.push(" AND m.category_id = ").push_bind(category_id);
    }
    if let Some(user_id) = query.assigned_to_id {
        builder.push(" AND a.assigned_to_id = ").push_bind(user_id);
    }
    match query.unassigned {
        Some(true) => {
            builder.push(" AND a.assigned_to_id IS NULL");
        }
        Some(false) => {
            builder.push(" AND a.assigned_to_id IS NOT NULL");
        }
        None => {}
    }
    if let Some(after) = query.purchased_after {
        builder.push(" AND a.purchase_date >= ").push_bind(after);
    }
    if let Some(before) = query.purchased_before {
        builder.push(" AND a.purchase_date <= ").push_bind(before);
    }
    if let Some(ref search) = query.search {
        let pattern = format!("%{}%", search.trim());
        builder
            .push(" AND (a.asset_tag ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR a.serial_number ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR a.notes ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

#[async_trait]
impl AssetStore for AssetsRepository {
    /// Get asset by ID
    async fn get_by_id(&self, id: i32) -> AppResult<Asset> {
        sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
    }

    async fn list(&self, query: &AssetQuery) -> AppResult<(Vec<Asset>, i64)> {
        let (_, per_page, offset) = pagination(query.page, query.per_page);

        let mut count = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM assets a JOIN asset_models m ON m.id = a.model_id",
        );
        push_filters(&mut count, query);
        let total = count.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::<Postgres>::new(
            "SELECT a.* FROM assets a JOIN asset_models m ON m.id = a.model_id",
        );
        push_filters(&mut select, query);
        select
            .push(" ORDER BY ")
            .push(query.sort.unwrap_or_default().order_by())
            .push(" LIMIT ")
            .push_bind(per_page)
            .push(" OFFSET ")
            .push_bind(offset);

        let assets = select.build_query_as::<Asset>().fetch_all(&self.pool).await?;
        Ok((assets, total))
    }

    async fn list_all(&self) -> AppResult<Vec<Asset>> {
        let rows = sqlx::query_as::<_, Asset>("SELECT * FROM assets ORDER BY asset_tag")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create(&self, data: &CreateAsset) -> AppResult<Asset> {
        let row = sqlx::query_as::<_, Asset>(
            r#"
            INSERT INTO assets (
                asset_tag, serial_number, model_id, status_id, purchase_date, purchase_cost,
                warranty_months, depreciation_rate, residual_value, assigned_to_id,
                company_id, site_id, location, ip_address, mac_address, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(&data.asset_tag)
        .bind(&data.serial_number)
        .bind(data.model_id)
        .bind(data.status_id)
        .bind(data.purchase_date)
        .bind(data.purchase_cost)
        .bind(data.warranty_months.unwrap_or(DEFAULT_WARRANTY_MONTHS))
        .bind(data.depreciation_rate.unwrap_or(DEFAULT_DEPRECIATION_RATE))
        .bind(data.residual_value.unwrap_or(Decimal::ZERO))
        .bind(data.assigned_to_id)
        .bind(data.company_id)
        .bind(data.site_id)
        .bind(&data.location)
        .bind(&data.ip_address)
        .bind(&data.mac_address)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, data: &UpdateAsset) -> AppResult<Asset> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE assets SET updated_at = ");
        builder.push_bind(Utc::now());

        macro_rules! set_field {
            ($field:expr, $column:literal) => {
                if let Some(ref value) = $field {
                    builder.push(concat!(", ", $column, " = ")).push_bind(value.clone());
                }
            };
        }

        set_field!(data.asset_tag, "asset_tag");
        set_field!(data.serial_number, "serial_number");
        set_field!(data.model_id, "model_id");
        set_field!(data.status_id, "status_id");
        set_field!(data.purchase_date, "purchase_date");
        set_field!(data.purchase_cost, "purchase_cost");
        set_field!(data.warranty_months, "warranty_months");
        set_field!(data.depreciation_rate, "depreciation_rate");
        set_field!(data.residual_value, "residual_value");
        set_field!(data.company_id, "company_id");
        set_field!(data.site_id, "site_id");
        set_field!(data.location, "location");
        set_field!(data.ip_address, "ip_address");
        set_field!(data.mac_address, "mac_address");
        set_field!(data.notes, "notes");

        builder.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        builder
            .build_query_as::<Asset>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
    }

    async fn set_assignee(&self, id: i32, user_id: Option<i32>) -> AppResult<Asset> {
        sqlx::query_as::<_, Asset>(
            "UPDATE assets SET assigned_to_id = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(user_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
    }

    async fn set_last_audit(&self, id: i32, audit_date: NaiveDate) -> AppResult<Asset> {
        sqlx::query_as::<_, Asset>(
            "UPDATE assets SET last_audit = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(audit_date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Asset {} not found", id)));
        }
        Ok(())
    }
}
