//! Asset service: writes, derived fields and inventory reports

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    clock::Clock,
    config::ReportsConfig,
    error::{AppError, AppResult},
    models::{
        asset::{
            Asset, AssetDetails, AssetList, AssetQuery, CreateAsset, UpdateAsset, ValuationSummary,
        },
        reference::ReferenceKind,
    },
    repository::{pagination, AssetStore, ReferenceStore},
    valuation::Valuator,
};

#[derive(Clone)]
pub struct AssetsService {
    store: Arc<dyn AssetStore>,
    reference: Arc<dyn ReferenceStore>,
    valuator: Valuator,
    clock: Arc<dyn Clock>,
    reports: ReportsConfig,
}

impl AssetsService {
    pub fn new(
        store: Arc<dyn AssetStore>,
        reference: Arc<dyn ReferenceStore>,
        valuator: Valuator,
        clock: Arc<dyn Clock>,
        reports: ReportsConfig,
    ) -> Self {
        Self {
            store,
            reference,
            valuator,
            clock,
            reports,
        }
    }

    fn details(&self, asset: Asset, today: NaiveDate) -> AssetDetails {
        let valuation = self.valuator.appraise(&asset, today);
        AssetDetails { asset, valuation }
    }

    /// Search assets
    pub async fn list(&self, query: &AssetQuery) -> AppResult<AssetList> {
        let (page, per_page, _) = pagination(query.page, query.per_page);
        let (assets, total) = self.store.list(query).await?;
        let today = self.clock.today();

        Ok(AssetList {
            items: assets.into_iter().map(|a| self.details(a, today)).collect(),
            total,
            page,
            per_page,
        })
    }

    pub async fn get(&self, id: i32) -> AppResult<AssetDetails> {
        let asset = self.store.get_by_id(id).await?;
        Ok(self.details(asset, self.clock.today()))
    }

    pub async fn create(&self, data: &CreateAsset) -> AppResult<AssetDetails> {
        data.validate()?;
        data.check_values()?;

        let asset = self.store.create(data).await?;
        tracing::info!(asset_id = asset.id, asset_tag = %asset.asset_tag, "Asset created");
        Ok(self.details(asset, self.clock.today()))
    }

    pub async fn update(&self, id: i32, data: &UpdateAsset) -> AppResult<AssetDetails> {
        data.validate()?;
        data.check_values()?;

        let asset = self.store.update(id, data).await?;
        tracing::info!(asset_id = id, "Asset updated");
        Ok(self.details(asset, self.clock.today()))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.store.delete(id).await?;
        tracing::info!(asset_id = id, "Asset deleted");
        Ok(())
    }

    /// Assign the asset to a user, or clear the assignment
    pub async fn assign(&self, id: i32, user_id: Option<i32>) -> AppResult<AssetDetails> {
        if let Some(user_id) = user_id {
            if !self.reference.exists(ReferenceKind::User, user_id).await? {
                return Err(AppError::InvalidReference(format!("User {} does not exist", user_id)));
            }
        }

        let asset = self.store.set_assignee(id, user_id).await?;
        match user_id {
            Some(user_id) => tracing::info!(asset_id = id, user_id, "Asset assigned"),
            None => tracing::info!(asset_id = id, "Asset unassigned"),
        }
        Ok(self.details(asset, self.clock.today()))
    }

    /// Record an audit, today unless a date is given
    pub async fn audit(&self, id: i32, audit_date: Option<NaiveDate>) -> AppResult<AssetDetails> {
        let today = self.clock.today();
        let audit_date = audit_date.unwrap_or(today);
        if audit_date > today {
            return Err(AppError::Validation("Audit date cannot be in the future".to_string()));
        }

        let asset = self.store.set_last_audit(id, audit_date).await?;
        tracing::info!(asset_id = id, %audit_date, "Asset audited");
        Ok(self.details(asset, today))
    }

    /// Assets whose warranty ends between today and `today + days`
    pub async fn warranty_expiring(&self, days: Option<i64>) -> AppResult<Vec<AssetDetails>> {
        let window = report_days(days.unwrap_or(self.reports.warranty_window_days))?;
        let today = self.clock.today();
        let until = today
            .checked_add_days(window)
            .ok_or_else(|| AppError::BadRequest("days is out of range".to_string()))?;

        let assets = self.store.list_all().await?;
        Ok(assets
            .into_iter()
            .map(|a| self.details(a, today))
            .filter(|d| {
                d.valuation
                    .warranty_expiry
                    .is_some_and(|expiry| expiry >= today && expiry <= until)
            })
            .collect())
    }

    /// Assets never audited, or last audited more than `days` ago
    pub async fn needs_audit(&self, days: Option<i64>) -> AppResult<Vec<AssetDetails>> {
        let interval = report_days(days.unwrap_or(self.reports.audit_interval_days))?;
        let today = self.clock.today();
        let threshold = today
            .checked_sub_days(interval)
            .ok_or_else(|| AppError::BadRequest("days is out of range".to_string()))?;

        let assets = self.store.list_all().await?;
        Ok(assets
            .into_iter()
            .filter(|a| a.last_audit.map_or(true, |audited| audited < threshold))
            .map(|a| self.details(a, today))
            .collect())
    }

    pub async fn valuation_summary(&self) -> AppResult<ValuationSummary> {
        let today = self.clock.today();
        let assets = self.store.list_all().await?;

        let mut total_purchase_cost = Decimal::ZERO;
        let mut total_current_value = Decimal::ZERO;
        for asset in &assets {
            total_purchase_cost += asset.purchase_cost.unwrap_or(Decimal::ZERO);
            total_current_value += self.valuator.appraise(asset, today).current_value;
        }

        Ok(ValuationSummary {
            asset_count: assets.len() as i64,
            total_purchase_cost,
            total_current_value,
            strategy: self.valuator.strategy_name().to_string(),
            as_of: today,
        })
    }
}

fn report_days(days: i64) -> AppResult<Days> {
    u64::try_from(days)
        .map(Days::new)
        .map_err(|_| AppError::BadRequest("days must not be negative".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::FixedClock,
        repository::{MockAssetStore, MockReferenceStore},
        valuation::{DecliningBalance, WarrantyStatus},
    };
    use chrono::{TimeZone, Utc};
    use mockall::predicate::eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn asset(id: i32, tag: &str) -> Asset {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Asset {
            id,
            asset_tag: tag.to_string(),
            serial_number: None,
            model_id: 1,
            status_id: 1,
            purchase_date: None,
            purchase_cost: None,
            warranty_months: 12,
            depreciation_rate: 20.0,
            residual_value: Decimal::ZERO,
            assigned_to_id: None,
            company_id: None,
            site_id: None,
            location: None,
            ip_address: None,
            mac_address: None,
            last_audit: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn purchased(id: i32, tag: &str, on: NaiveDate, cost: i64) -> Asset {
        Asset {
            purchase_date: Some(on),
            purchase_cost: Some(Decimal::new(cost, 0)),
            ..asset(id, tag)
        }
    }

    fn service(store: MockAssetStore, reference: MockReferenceStore, today: NaiveDate) -> AssetsService {
        AssetsService::new(
            Arc::new(store),
            Arc::new(reference),
            Valuator::default(),
            Arc::new(FixedClock(today)),
            ReportsConfig::default(),
        )
    }

    fn create_request(tag: &str) -> CreateAsset {
        CreateAsset {
            asset_tag: tag.to_string(),
            serial_number: Some("SN-1234".to_string()),
            model_id: 1,
            status_id: 1,
            purchase_date: Some(date(2023, 7, 1)),
            purchase_cost: Some(Decimal::new(1000, 0)),
            warranty_months: Some(36),
            depreciation_rate: None,
            residual_value: None,
            assigned_to_id: None,
            company_id: None,
            site_id: None,
            location: Some("HQ floor 2".to_string()),
            ip_address: None,
            mac_address: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_get_computes_derived_fields() {
        let mut store = MockAssetStore::new();
        store
            .expect_get_by_id()
            .with(eq(5))
            .returning(|id| Ok(purchased(id, "LT-0005", date(2023, 7, 1), 1000)));

        let svc = service(store, MockReferenceStore::new(), date(2024, 7, 1));
        let details = svc.get(5).await.unwrap();

        assert_eq!(details.valuation.age_in_months, 12);
        assert_eq!(details.valuation.current_value, Decimal::new(800, 0));
        assert_eq!(details.valuation.warranty_expiry, Some(date(2024, 7, 1)));
        assert_eq!(
            details.valuation.warranty_status,
            WarrantyStatus::Active { days_remaining: 0 }
        );
    }

    #[tokio::test]
    async fn test_asset_without_purchase_data() {
        let mut store = MockAssetStore::new();
        store.expect_get_by_id().returning(|id| Ok(asset(id, "SRV-01")));

        let svc = service(store, MockReferenceStore::new(), date(2024, 7, 1));
        let details = svc.get(1).await.unwrap();

        assert_eq!(details.valuation.warranty_expiry, None);
        assert_eq!(details.valuation.age_in_months, 0);
        assert_eq!(details.valuation.current_value, Decimal::ZERO);
        assert_eq!(details.valuation.warranty_status, WarrantyStatus::Unknown);
    }

    #[tokio::test]
    async fn test_zero_cost_reads_back_as_zero() {
        let mut store = MockAssetStore::new();
        store.expect_create().returning(|data| {
            Ok(Asset {
                purchase_date: data.purchase_date,
                purchase_cost: data.purchase_cost,
                depreciation_rate: data.depreciation_rate.unwrap_or(20.0),
                ..asset(9, &data.asset_tag)
            })
        });

        let svc = service(store, MockReferenceStore::new(), date(2026, 3, 1));
        let mut data = create_request("DONATED-1");
        data.purchase_cost = Some(Decimal::ZERO);
        data.depreciation_rate = Some(55.5);

        let details = svc.create(&data).await.unwrap();
        assert_eq!(details.valuation.current_value, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_create_rejects_negative_cost_before_storing() {
        let mut store = MockAssetStore::new();
        store.expect_create().never();

        let svc = service(store, MockReferenceStore::new(), date(2024, 1, 1));
        let mut data = create_request("LT-0100");
        data.purchase_cost = Some(Decimal::new(-1000, 0));

        assert!(matches!(svc.create(&data).await, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_assign_unknown_user() {
        let mut store = MockAssetStore::new();
        store.expect_set_assignee().never();
        let mut reference = MockReferenceStore::new();
        reference
            .expect_exists()
            .with(eq(ReferenceKind::User), eq(42))
            .returning(|_, _| Ok(false));

        let svc = service(store, reference, date(2024, 1, 1));
        assert!(matches!(svc.assign(1, Some(42)).await, Err(AppError::InvalidReference(_))));
    }

    #[tokio::test]
    async fn test_unassign_skips_user_lookup() {
        let mut store = MockAssetStore::new();
        store
            .expect_set_assignee()
            .with(eq(3), eq(None))
            .returning(|id, _| Ok(asset(id, "LT-0003")));
        let mut reference = MockReferenceStore::new();
        reference.expect_exists().never();

        let svc = service(store, reference, date(2024, 1, 1));
        let details = svc.assign(3, None).await.unwrap();
        assert_eq!(details.asset.assigned_to_id, None);
    }

    #[tokio::test]
    async fn test_audit_defaults_to_today() {
        let today = date(2024, 9, 30);
        let mut store = MockAssetStore::new();
        store
            .expect_set_last_audit()
            .with(eq(2), eq(today))
            .returning(|id, audited| {
                Ok(Asset {
                    last_audit: Some(audited),
                    ..asset(id, "LT-0002")
                })
            });

        let svc = service(store, MockReferenceStore::new(), today);
        let details = svc.audit(2, None).await.unwrap();
        assert_eq!(details.asset.last_audit, Some(today));

        assert!(svc.audit(2, Some(date(2024, 10, 1))).await.is_err());
    }

    #[tokio::test]
    async fn test_warranty_expiring_window() {
        let today = date(2024, 6, 1);
        let mut store = MockAssetStore::new();
        store.expect_list_all().returning(|| {
            Ok(vec![
                // expires 2024-06-01, today
                purchased(1, "A-TODAY", date(2023, 6, 1), 500),
                // expires 2024-07-01, exactly 30 days out
                purchased(2, "A-EDGE", date(2023, 7, 1), 500),
                // expires 2024-07-02, outside the window
                purchased(3, "A-LATER", date(2023, 7, 2), 500),
                // expired yesterday
                purchased(4, "A-GONE", date(2023, 5, 31), 500),
                asset(5, "A-UNKNOWN"),
            ])
        });

        let svc = service(store, MockReferenceStore::new(), today);
        let tags: Vec<_> = svc
            .warranty_expiring(None)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.asset.asset_tag)
            .collect();
        assert_eq!(tags, vec!["A-TODAY", "A-EDGE"]);
    }

    #[tokio::test]
    async fn test_needs_audit() {
        let today = date(2024, 12, 31);
        let mut store = MockAssetStore::new();
        store.expect_list_all().returning(move || {
            Ok(vec![
                asset(1, "NEVER"),
                Asset {
                    last_audit: Some(date(2024, 10, 1)),
                    ..asset(2, "RECENT")
                },
                Asset {
                    last_audit: Some(date(2024, 7, 4)),
                    ..asset(3, "ON-THRESHOLD")
                },
                Asset {
                    last_audit: Some(date(2024, 7, 3)),
                    ..asset(4, "STALE")
                },
            ])
        });

        let svc = service(store, MockReferenceStore::new(), today);
        // threshold = 2024-12-31 - 180 days = 2024-07-04
        let tags: Vec<_> = svc
            .needs_audit(None)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.asset.asset_tag)
            .collect();
        assert_eq!(tags, vec!["NEVER", "STALE"]);
    }

    #[tokio::test]
    async fn test_negative_report_window() {
        let svc = service(MockAssetStore::new(), MockReferenceStore::new(), date(2024, 1, 1));
        assert!(matches!(svc.needs_audit(Some(-1)).await, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_oversized_report_window() {
        let mut store = MockAssetStore::new();
        store.expect_list_all().never();

        let svc = service(store, MockReferenceStore::new(), date(2024, 1, 1));
        assert!(matches!(
            svc.warranty_expiring(Some(i64::MAX)).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            svc.needs_audit(Some(i64::MAX)).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            svc.warranty_expiring(Some(1_000_000_000)).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_valuation_summary_uses_configured_strategy() {
        let mut store = MockAssetStore::new();
        store.expect_list_all().returning(|| {
            Ok(vec![
                purchased(1, "A", date(2022, 1, 1), 1000),
                purchased(2, "B", date(2023, 1, 1), 1000),
                asset(3, "C"),
            ])
        });

        let svc = AssetsService::new(
            Arc::new(store),
            Arc::new(MockReferenceStore::new()),
            Valuator::new(Arc::new(DecliningBalance)),
            Arc::new(FixedClock(date(2024, 1, 1))),
            ReportsConfig::default(),
        );
        let summary = svc.valuation_summary().await.unwrap();

        assert_eq!(summary.asset_count, 3);
        assert_eq!(summary.total_purchase_cost, Decimal::new(2000, 0));
        // 1000 * 0.8^2 + 1000 * 0.8
        assert_eq!(summary.total_current_value, Decimal::new(1440, 0));
        assert_eq!(summary.strategy, "declining_balance");
    }
}
