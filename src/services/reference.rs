//! Reference data service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::reference::*,
    repository::ReferenceStore,
};

#[derive(Clone)]
pub struct ReferenceService {
    store: Arc<dyn ReferenceStore>,
}

impl ReferenceService {
    pub fn new(store: Arc<dyn ReferenceStore>) -> Self {
        Self { store }
    }

    /// Delete a reference row; rows still used by assets or maintenance are kept
    pub async fn delete(&self, kind: ReferenceKind, id: i32) -> AppResult<()> {
        self.store.delete(kind, id).await?;
        tracing::info!(kind = kind.label(), id, "Reference entry deleted");
        Ok(())
    }

    pub async fn list_categories(&self) -> AppResult<Vec<AssetCategory>> {
        self.store.list_categories().await
    }

    pub async fn create_category(&self, data: &CreateAssetCategory) -> AppResult<AssetCategory> {
        data.validate()?;
        self.store.create_category(data).await
    }

    pub async fn list_manufacturers(&self) -> AppResult<Vec<Manufacturer>> {
        self.store.list_manufacturers().await
    }

    pub async fn create_manufacturer(&self, data: &CreateManufacturer) -> AppResult<Manufacturer> {
        data.validate()?;
        self.store.create_manufacturer(data).await
    }

    pub async fn list_models(&self) -> AppResult<Vec<AssetModel>> {
        self.store.list_models().await
    }

    pub async fn create_model(&self, data: &CreateAssetModel) -> AppResult<AssetModel> {
        data.validate()?;
        self.store.create_model(data).await
    }

    pub async fn list_statuses(&self) -> AppResult<Vec<AssetStatus>> {
        self.store.list_statuses().await
    }

    pub async fn create_status(&self, data: &CreateAssetStatus) -> AppResult<AssetStatus> {
        data.validate()?;
        self.store.create_status(data).await
    }

    pub async fn list_maintenance_types(&self) -> AppResult<Vec<MaintenanceType>> {
        self.store.list_maintenance_types().await
    }

    pub async fn create_maintenance_type(
        &self,
        data: &CreateMaintenanceType,
    ) -> AppResult<MaintenanceType> {
        data.validate()?;
        self.store.create_maintenance_type(data).await
    }

    pub async fn list_companies(&self) -> AppResult<Vec<Company>> {
        self.store.list_companies().await
    }

    pub async fn create_company(&self, data: &CreateCompany) -> AppResult<Company> {
        data.validate()?;
        if let (Some(start), Some(end)) = (data.contract_start_date, data.contract_end_date) {
            if end < start {
                return Err(AppError::Validation(
                    "Contract end date is before its start date".to_string(),
                ));
            }
        }
        self.store.create_company(data).await
    }

    pub async fn list_sites(&self) -> AppResult<Vec<Site>> {
        self.store.list_sites().await
    }

    pub async fn create_site(&self, data: &CreateSite) -> AppResult<Site> {
        data.validate()?;
        self.store.create_site(data).await
    }

    pub async fn list_departments(&self) -> AppResult<Vec<Department>> {
        self.store.list_departments().await
    }

    pub async fn create_department(&self, data: &CreateDepartment) -> AppResult<Department> {
        data.validate()?;
        self.store.create_department(data).await
    }

    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.store.list_users().await
    }

    pub async fn get_user(&self, id: i32) -> AppResult<User> {
        self.store.get_user(id).await
    }

    pub async fn create_user(&self, data: &CreateUser) -> AppResult<User> {
        data.validate()?;
        let user = self.store.create_user(data).await?;
        tracing::info!(user_id = user.id, username = %user.username, "User created");
        Ok(user)
    }
}
