//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{assets, health, maintenance, reference};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Asset Server API",
        version = "1.0.0",
        description = "IT asset inventory, warranty, depreciation and maintenance REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Assets
        assets::list_assets,
        assets::get_asset,
        assets::create_asset,
        assets::update_asset,
        assets::delete_asset,
        assets::assign_asset,
        assets::audit_asset,
        assets::asset_maintenance,
        // Reports
        assets::warranty_expiring,
        assets::needs_audit,
        assets::valuation_summary,
        // Maintenance
        maintenance::list_maintenance,
        maintenance::get_maintenance,
        maintenance::create_maintenance,
        maintenance::update_maintenance,
        maintenance::change_status,
        maintenance::delete_maintenance,
        maintenance::overdue_maintenance,
        // Catalog
        reference::list_categories,
        reference::create_category,
        reference::delete_category,
        reference::list_manufacturers,
        reference::create_manufacturer,
        reference::delete_manufacturer,
        reference::list_asset_models,
        reference::create_asset_model,
        reference::delete_asset_model,
        reference::list_asset_statuses,
        reference::create_asset_status,
        reference::delete_asset_status,
        reference::list_maintenance_types,
        reference::create_maintenance_type,
        reference::delete_maintenance_type,
        // Organisation
        reference::list_companies,
        reference::create_company,
        reference::delete_company,
        reference::list_sites,
        reference::create_site,
        reference::delete_site,
        reference::list_departments,
        reference::create_department,
        reference::delete_department,
        reference::list_users,
        reference::get_user,
        reference::create_user,
        reference::delete_user,
    ),
    components(
        schemas(
            // Assets
            crate::models::asset::Asset,
            crate::models::asset::AssetDetails,
            crate::models::asset::AssetList,
            crate::models::asset::AssetSort,
            crate::models::asset::CreateAsset,
            crate::models::asset::UpdateAsset,
            crate::models::asset::AssignAsset,
            crate::models::asset::AuditAsset,
            crate::models::asset::ValuationSummary,
            crate::valuation::Valuation,
            // Maintenance
            crate::models::enums::Priority,
            crate::models::enums::MaintenanceStatus,
            crate::models::maintenance::MaintenanceRecord,
            crate::models::maintenance::MaintenanceDetails,
            crate::models::maintenance::MaintenanceList,
            crate::models::maintenance::CreateMaintenance,
            crate::models::maintenance::UpdateMaintenance,
            crate::models::maintenance::StatusChange,
            // Reference data
            crate::models::reference::AssetCategory,
            crate::models::reference::CreateAssetCategory,
            crate::models::reference::Manufacturer,
            crate::models::reference::CreateManufacturer,
            crate::models::reference::AssetModel,
            crate::models::reference::CreateAssetModel,
            crate::models::reference::AssetStatus,
            crate::models::reference::CreateAssetStatus,
            crate::models::reference::MaintenanceType,
            crate::models::reference::CreateMaintenanceType,
            crate::models::reference::Company,
            crate::models::reference::CreateCompany,
            crate::models::reference::Site,
            crate::models::reference::CreateSite,
            crate::models::reference::Department,
            crate::models::reference::CreateDepartment,
            crate::models::reference::User,
            crate::models::reference::CreateUser,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "assets", description = "Asset inventory"),
        (name = "reports", description = "Warranty, audit and valuation reports"),
        (name = "maintenance", description = "Maintenance records and status changes"),
        (name = "catalog", description = "Categories, manufacturers, models, statuses and maintenance types"),
        (name = "organisation", description = "Companies, sites, departments and users")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_asset_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/assets/{id}"));
        assert!(doc.paths.paths.contains_key("/maintenance/{id}/status"));
        assert!(doc.paths.paths.contains_key("/users/{id}"));
    }
}
