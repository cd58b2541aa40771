//! Maintenance service: work orders and their status lifecycle

use std::sync::Arc;

use validator::Validate;

use crate::{
    clock::Clock,
    error::{AppError, AppResult},
    lifecycle::{plan_transition, TransitionPolicy},
    models::{
        maintenance::{
            CreateMaintenance, MaintenanceDetails, MaintenanceList, MaintenanceQuery, StatusChange,
            UpdateMaintenance,
        },
        reference::ReferenceKind,
    },
    repository::{pagination, AssetStore, MaintenanceStore, ReferenceStore},
};

#[derive(Clone)]
pub struct MaintenanceService {
    store: Arc<dyn MaintenanceStore>,
    assets: Arc<dyn AssetStore>,
    reference: Arc<dyn ReferenceStore>,
    policy: Arc<dyn TransitionPolicy>,
    clock: Arc<dyn Clock>,
}

impl MaintenanceService {
    pub fn new(
        store: Arc<dyn MaintenanceStore>,
        assets: Arc<dyn AssetStore>,
        reference: Arc<dyn ReferenceStore>,
        policy: Arc<dyn TransitionPolicy>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            assets,
            reference,
            policy,
            clock,
        }
    }

    async fn ensure_exists(&self, kind: ReferenceKind, id: Option<i32>) -> AppResult<()> {
        if let Some(id) = id {
            if !self.reference.exists(kind, id).await? {
                return Err(AppError::InvalidReference(format!(
                    "{} {} does not exist",
                    kind.label(),
                    id
                )));
            }
        }
        Ok(())
    }

    pub async fn list(&self, query: &MaintenanceQuery) -> AppResult<MaintenanceList> {
        let (page, per_page, _) = pagination(query.page, query.per_page);
        let (records, total) = self.store.list(query).await?;
        let today = self.clock.today();

        Ok(MaintenanceList {
            items: records
                .into_iter()
                .map(|r| MaintenanceDetails::new(r, today))
                .collect(),
            total,
            page,
            per_page,
        })
    }

    pub async fn get(&self, id: i32) -> AppResult<MaintenanceDetails> {
        let record = self.store.get_by_id(id).await?;
        Ok(MaintenanceDetails::new(record, self.clock.today()))
    }

    /// Maintenance history of one asset
    pub async fn list_for_asset(&self, asset_id: i32) -> AppResult<Vec<MaintenanceDetails>> {
        // 404 for an unknown asset rather than an empty list
        self.assets.get_by_id(asset_id).await?;

        let today = self.clock.today();
        let records = self.store.list_for_asset(asset_id).await?;
        Ok(records
            .into_iter()
            .map(|r| MaintenanceDetails::new(r, today))
            .collect())
    }

    pub async fn create(&self, data: &CreateMaintenance) -> AppResult<MaintenanceDetails> {
        data.validate()?;

        match self.assets.get_by_id(data.asset_id).await {
            Ok(_) => {}
            Err(AppError::NotFound(_)) => {
                return Err(AppError::InvalidReference(format!(
                    "Asset {} does not exist",
                    data.asset_id
                )));
            }
            Err(e) => return Err(e),
        }
        self.ensure_exists(ReferenceKind::MaintenanceType, data.maintenance_type_id)
            .await?;
        self.ensure_exists(ReferenceKind::User, data.created_by_id).await?;

        let record = self.store.create(data).await?;
        tracing::info!(
            maintenance_id = record.id,
            asset_id = record.asset_id,
            priority = %record.priority,
            "Maintenance record created"
        );
        Ok(MaintenanceDetails::new(record, self.clock.today()))
    }

    pub async fn update(&self, id: i32, data: &UpdateMaintenance) -> AppResult<MaintenanceDetails> {
        data.validate()?;
        self.ensure_exists(ReferenceKind::MaintenanceType, data.maintenance_type_id.flatten())
            .await?;

        let record = self.store.update(id, data).await?;
        Ok(MaintenanceDetails::new(record, self.clock.today()))
    }

    /// Move a record to another status under the configured transition policy
    pub async fn change_status(&self, id: i32, change: &StatusChange) -> AppResult<MaintenanceDetails> {
        let record = self.store.get_by_id(id).await?;
        let today = self.clock.today();

        let update = match plan_transition(self.policy.as_ref(), &record, change, today) {
            Ok(update) => update,
            Err(e) => {
                tracing::warn!(
                    maintenance_id = id,
                    from = %record.status,
                    to = %change.status,
                    policy = self.policy.name(),
                    "Status change rejected: {}",
                    e
                );
                return Err(e);
            }
        };

        let updated = self.store.apply_status(id, record.status, &update).await?;
        tracing::info!(
            maintenance_id = id,
            from = %record.status,
            to = %updated.status,
            "Maintenance status changed"
        );
        Ok(MaintenanceDetails::new(updated, today))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.store.delete(id).await?;
        tracing::info!(maintenance_id = id, "Maintenance record deleted");
        Ok(())
    }

    /// Open records whose scheduled date has passed
    pub async fn overdue(&self) -> AppResult<Vec<MaintenanceDetails>> {
        let today = self.clock.today();
        let records = self.store.list_open().await?;
        Ok(records
            .into_iter()
            .filter(|r| r.is_overdue(today))
            .map(|r| MaintenanceDetails::new(r, today))
            .collect())
    }
}
