//! API handlers for the asset server REST endpoints

pub mod assets;
pub mod health;
pub mod maintenance;
pub mod openapi;
pub mod reference;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::AppState;

/// Routes served under `/api/v1`
pub fn routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Assets
        .route("/assets", get(assets::list_assets).post(assets::create_asset))
        .route("/assets/warranty-expiring", get(assets::warranty_expiring))
        .route("/assets/needs-audit", get(assets::needs_audit))
        .route("/assets/valuation-summary", get(assets::valuation_summary))
        .route(
            "/assets/:id",
            get(assets::get_asset)
                .put(assets::update_asset)
                .delete(assets::delete_asset),
        )
        .route("/assets/:id/assignment", put(assets::assign_asset))
        .route("/assets/:id/audit", post(assets::audit_asset))
        .route("/assets/:id/maintenance", get(assets::asset_maintenance))
        // Maintenance
        .route(
            "/maintenance",
            get(maintenance::list_maintenance).post(maintenance::create_maintenance),
        )
        .route("/maintenance/overdue", get(maintenance::overdue_maintenance))
        .route(
            "/maintenance/:id",
            get(maintenance::get_maintenance)
                .put(maintenance::update_maintenance)
                .delete(maintenance::delete_maintenance),
        )
        .route("/maintenance/:id/status", post(maintenance::change_status))
        // Catalog
        .route(
            "/categories",
            get(reference::list_categories).post(reference::create_category),
        )
        .route("/categories/:id", delete(reference::delete_category))
        .route(
            "/manufacturers",
            get(reference::list_manufacturers).post(reference::create_manufacturer),
        )
        .route("/manufacturers/:id", delete(reference::delete_manufacturer))
        .route(
            "/asset-models",
            get(reference::list_asset_models).post(reference::create_asset_model),
        )
        .route("/asset-models/:id", delete(reference::delete_asset_model))
        .route(
            "/asset-statuses",
            get(reference::list_asset_statuses).post(reference::create_asset_status),
        )
        .route("/asset-statuses/:id", delete(reference::delete_asset_status))
        .route(
            "/maintenance-types",
            get(reference::list_maintenance_types).post(reference::create_maintenance_type),
        )
        .route(
            "/maintenance-types/:id",
            delete(reference::delete_maintenance_type),
        )
        // Organisation
        .route(
            "/companies",
            get(reference::list_companies).post(reference::create_company),
        )
        .route("/companies/:id", delete(reference::delete_company))
        .route("/sites", get(reference::list_sites).post(reference::create_site))
        .route("/sites/:id", delete(reference::delete_site))
        .route(
            "/departments",
            get(reference::list_departments).post(reference::create_department),
        )
        .route("/departments/:id", delete(reference::delete_department))
        .route("/users", get(reference::list_users).post(reference::create_user))
        .route(
            "/users/:id",
            get(reference::get_user).delete(reference::delete_user),
        )
        .with_state(state)
}
