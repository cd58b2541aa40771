//! Repository layer for database operations
//!
//! Services only see the store traits below; the Postgres implementations
//! live in the submodules.

pub mod assets;
pub mod maintenance;
pub mod reference;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        asset::{Asset, AssetQuery, CreateAsset, UpdateAsset},
        enums::MaintenanceStatus,
        maintenance::{
            CreateMaintenance, MaintenanceQuery, MaintenanceRecord, StatusUpdate, UpdateMaintenance,
        },
        reference::*,
    },
};

/// Default page size for list endpoints
pub const DEFAULT_PER_PAGE: i64 = 20;
pub const MAX_PER_PAGE: i64 = 200;

/// Normalize `page` / `per_page` into `(page, per_page, offset)`
pub fn pagination(page: Option<i64>, per_page: Option<i64>) -> (i64, i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
    (page, per_page, (page - 1) * per_page)
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn get_by_id(&self, id: i32) -> AppResult<Asset>;

    /// Filtered page of assets plus the total match count
    async fn list(&self, query: &AssetQuery) -> AppResult<(Vec<Asset>, i64)>;

    /// Every asset, ordered by tag
    async fn list_all(&self) -> AppResult<Vec<Asset>>;

    async fn create(&self, data: &CreateAsset) -> AppResult<Asset>;

    async fn update(&self, id: i32, data: &UpdateAsset) -> AppResult<Asset>;

    async fn set_assignee(&self, id: i32, user_id: Option<i32>) -> AppResult<Asset>;

    async fn set_last_audit(&self, id: i32, audit_date: NaiveDate) -> AppResult<Asset>;

    /// Deleting an asset cascades to its maintenance records
    async fn delete(&self, id: i32) -> AppResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaintenanceStore: Send + Sync {
    async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceRecord>;

    async fn list(&self, query: &MaintenanceQuery) -> AppResult<(Vec<MaintenanceRecord>, i64)>;

    /// Records not yet completed or cancelled, oldest schedule first
    async fn list_open(&self) -> AppResult<Vec<MaintenanceRecord>>;

    async fn list_for_asset(&self, asset_id: i32) -> AppResult<Vec<MaintenanceRecord>>;

    async fn create(&self, data: &CreateMaintenance) -> AppResult<MaintenanceRecord>;

    async fn update(&self, id: i32, data: &UpdateMaintenance) -> AppResult<MaintenanceRecord>;

    /// Writes the update only while the record still has status `expected`;
    /// fails with `Conflict` when another change got there first
    async fn apply_status(
        &self,
        id: i32,
        expected: MaintenanceStatus,
        update: &StatusUpdate,
    ) -> AppResult<MaintenanceRecord>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceStore: Send + Sync {
    async fn exists(&self, kind: ReferenceKind, id: i32) -> AppResult<bool>;

    /// Fails with `InvalidReference` when a protected relation still points at the row
    async fn delete(&self, kind: ReferenceKind, id: i32) -> AppResult<()>;

    async fn list_categories(&self) -> AppResult<Vec<AssetCategory>>;
    async fn create_category(&self, data: &CreateAssetCategory) -> AppResult<AssetCategory>;

    async fn list_manufacturers(&self) -> AppResult<Vec<Manufacturer>>;
    async fn create_manufacturer(&self, data: &CreateManufacturer) -> AppResult<Manufacturer>;

    async fn list_models(&self) -> AppResult<Vec<AssetModel>>;
    async fn create_model(&self, data: &CreateAssetModel) -> AppResult<AssetModel>;

    async fn list_statuses(&self) -> AppResult<Vec<AssetStatus>>;
    async fn create_status(&self, data: &CreateAssetStatus) -> AppResult<AssetStatus>;

    async fn list_maintenance_types(&self) -> AppResult<Vec<MaintenanceType>>;
    async fn create_maintenance_type(&self, data: &CreateMaintenanceType) -> AppResult<MaintenanceType>;

    async fn list_companies(&self) -> AppResult<Vec<Company>>;
    async fn create_company(&self, data: &CreateCompany) -> AppResult<Company>;

    async fn list_sites(&self) -> AppResult<Vec<Site>>;
    async fn create_site(&self, data: &CreateSite) -> AppResult<Site>;

    async fn list_departments(&self) -> AppResult<Vec<Department>>;
    async fn create_department(&self, data: &CreateDepartment) -> AppResult<Department>;

    async fn list_users(&self) -> AppResult<Vec<User>>;
    async fn get_user(&self, id: i32) -> AppResult<User>;
    async fn create_user(&self, data: &CreateUser) -> AppResult<User>;
}

/// Main repository struct holding the database pool and the stores built on it
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub assets: Arc<dyn AssetStore>,
    pub maintenance: Arc<dyn MaintenanceStore>,
    pub reference: Arc<dyn ReferenceStore>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            assets: Arc::new(assets::AssetsRepository::new(pool.clone())),
            maintenance: Arc::new(maintenance::MaintenanceRepository::new(pool.clone())),
            reference: Arc::new(reference::ReferenceRepository::new(pool.clone())),
            pool,
        }
    }

    /// Round-trip to the database
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination() {
        assert_eq!(pagination(None, None), (1, DEFAULT_PER_PAGE, 0));
        assert_eq!(pagination(Some(3), Some(10)), (3, 10, 20));
        assert_eq!(pagination(Some(0), Some(5000)), (1, MAX_PER_PAGE, 0));
    }
}
