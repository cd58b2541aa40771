//! Reference tables: categories, manufacturers, models, statuses,
//! maintenance types, companies, sites, departments and users

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::ReferenceStore;
use crate::{
    error::{AppError, AppResult},
    models::reference::*,
};

#[derive(Clone)]
pub struct ReferenceRepository {
    pool: Pool<Postgres>,
}

impl ReferenceRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReferenceStore for ReferenceRepository {
    async fn exists(&self, kind: ReferenceKind, id: i32) -> AppResult<bool> {
        let query = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", kind.table());
        let found: bool = sqlx::query_scalar(&query)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(found)
    }

    async fn delete(&self, kind: ReferenceKind, id: i32) -> AppResult<()> {
        let query = format!("DELETE FROM {} WHERE id = $1", kind.table());
        let result = sqlx::query(&query).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("{} {} not found", kind.label(), id)));
        }
        Ok(())
    }

    // ---- Catalog ----

    async fn list_categories(&self) -> AppResult<Vec<AssetCategory>> {
        let rows = sqlx::query_as::<_, AssetCategory>("SELECT * FROM asset_categories ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_category(&self, data: &CreateAssetCategory) -> AppResult<AssetCategory> {
        let row = sqlx::query_as::<_, AssetCategory>(
            r#"
            INSERT INTO asset_categories (name, description, icon)
            VALUES ($1, $2, COALESCE($3, 'laptop'))
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.icon)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_manufacturers(&self) -> AppResult<Vec<Manufacturer>> {
        let rows = sqlx::query_as::<_, Manufacturer>("SELECT * FROM manufacturers ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_manufacturer(&self, data: &CreateManufacturer) -> AppResult<Manufacturer> {
        let row = sqlx::query_as::<_, Manufacturer>(
            r#"
            INSERT INTO manufacturers (name, support_url, support_phone)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.support_url)
        .bind(&data.support_phone)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_models(&self) -> AppResult<Vec<AssetModel>> {
        let rows = sqlx::query_as::<_, AssetModel>(
            r#"
            SELECT am.* FROM asset_models am
            JOIN manufacturers mf ON mf.id = am.manufacturer_id
            ORDER BY mf.name, am.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_model(&self, data: &CreateAssetModel) -> AppResult<AssetModel> {
        let row = sqlx::query_as::<_, AssetModel>(
            r#"
            INSERT INTO asset_models (manufacturer_id, category_id, name, model_number, typical_lifespan_months)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(data.manufacturer_id)
        .bind(data.category_id)
        .bind(&data.name)
        .bind(&data.model_number)
        .bind(data.typical_lifespan_months)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_statuses(&self) -> AppResult<Vec<AssetStatus>> {
        let rows = sqlx::query_as::<_, AssetStatus>("SELECT * FROM asset_statuses ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_status(&self, data: &CreateAssetStatus) -> AppResult<AssetStatus> {
        let row = sqlx::query_as::<_, AssetStatus>(
            r#"
            INSERT INTO asset_statuses (name, is_active, color)
            VALUES ($1, COALESCE($2, TRUE), COALESCE($3, '#999999'))
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.is_active)
        .bind(&data.color)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    // ---- Maintenance types ----

    async fn list_maintenance_types(&self) -> AppResult<Vec<MaintenanceType>> {
        let rows = sqlx::query_as::<_, MaintenanceType>("SELECT * FROM maintenance_types ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_maintenance_type(&self, data: &CreateMaintenanceType) -> AppResult<MaintenanceType> {
        let row = sqlx::query_as::<_, MaintenanceType>(
            r#"
            INSERT INTO maintenance_types (name, description, recommended_frequency_months)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.recommended_frequency_months)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    // ---- Organisation ----

    async fn list_companies(&self) -> AppResult<Vec<Company>> {
        let rows = sqlx::query_as::<_, Company>("SELECT * FROM companies ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_company(&self, data: &CreateCompany) -> AppResult<Company> {
        let row = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (
                name, tax_id, address, contact_email, contact_phone,
                contract_start_date, contract_end_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.tax_id)
        .bind(&data.address)
        .bind(&data.contact_email)
        .bind(&data.contact_phone)
        .bind(data.contract_start_date)
        .bind(data.contract_end_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_sites(&self) -> AppResult<Vec<Site>> {
        let rows = sqlx::query_as::<_, Site>("SELECT * FROM sites ORDER BY company_id, name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_site(&self, data: &CreateSite) -> AppResult<Site> {
        let row = sqlx::query_as::<_, Site>(
            r#"
            INSERT INTO sites (company_id, name, address, primary_contact)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(data.company_id)
        .bind(&data.name)
        .bind(&data.address)
        .bind(&data.primary_contact)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_departments(&self) -> AppResult<Vec<Department>> {
        let rows = sqlx::query_as::<_, Department>("SELECT * FROM departments ORDER BY company_id, name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_department(&self, data: &CreateDepartment) -> AppResult<Department> {
        let row = sqlx::query_as::<_, Department>(
            r#"
            INSERT INTO departments (company_id, name, cost_center)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(data.company_id)
        .bind(&data.name)
        .bind(&data.cost_center)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    // ---- Users ----

    async fn list_users(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY username")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_user(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    async fn create_user(&self, data: &CreateUser) -> AppResult<User> {
        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                username, email, first_name, last_name, phone,
                company_id, department_id, is_asset_manager
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, FALSE))
            RETURNING *
            "#,
        )
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.phone)
        .bind(data.company_id)
        .bind(data.department_id)
        .bind(data.is_asset_manager)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
