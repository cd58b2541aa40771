//! Asset API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        asset::{
            AssetDetails, AssetList, AssetQuery, AssignAsset, AuditAsset, CreateAsset, ReportQuery,
            UpdateAsset, ValuationSummary,
        },
        maintenance::MaintenanceDetails,
    },
};

/// List assets with filters and pagination
#[utoipa::path(
    get,
    path = "/assets",
    tag = "assets",
    params(AssetQuery),
    responses(
        (status = 200, description = "Asset page", body = AssetList)
    )
)]
pub async fn list_assets(
    State(state): State<crate::AppState>,
    Query(query): Query<AssetQuery>,
) -> AppResult<Json<AssetList>> {
    let assets = state.services.assets.list(&query).await?;
    Ok(Json(assets))
}

/// Get asset by ID, with warranty and value as of today
#[utoipa::path(
    get,
    path = "/assets/{id}",
    tag = "assets",
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset details", body = AssetDetails),
        (status = 404, description = "Asset not found")
    )
)]
pub async fn get_asset(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AssetDetails>> {
    let asset = state.services.assets.get(id).await?;
    Ok(Json(asset))
}

/// Create asset
#[utoipa::path(
    post,
    path = "/assets",
    tag = "assets",
    request_body = CreateAsset,
    responses(
        (status = 201, description = "Asset created", body = AssetDetails),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Duplicate tag or unknown reference")
    )
)]
pub async fn create_asset(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateAsset>,
) -> AppResult<(StatusCode, Json<AssetDetails>)> {
    let asset = state.services.assets.create(&data).await?;
    Ok((StatusCode::CREATED, Json(asset)))
}

/// Update asset
#[utoipa::path(
    put,
    path = "/assets/{id}",
    tag = "assets",
    params(("id" = i32, Path, description = "Asset ID")),
    request_body = UpdateAsset,
    responses(
        (status = 200, description = "Asset updated", body = AssetDetails),
        (status = 404, description = "Asset not found")
    )
)]
pub async fn update_asset(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateAsset>,
) -> AppResult<Json<AssetDetails>> {
    let asset = state.services.assets.update(id, &data).await?;
    Ok(Json(asset))
}

/// Delete asset and its maintenance history
#[utoipa::path(
    delete,
    path = "/assets/{id}",
    tag = "assets",
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 204, description = "Asset deleted"),
        (status = 404, description = "Asset not found")
    )
)]
pub async fn delete_asset(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.assets.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Assign the asset to a user (`null` unassigns)
#[utoipa::path(
    put,
    path = "/assets/{id}/assignment",
    tag = "assets",
    params(("id" = i32, Path, description = "Asset ID")),
    request_body = AssignAsset,
    responses(
        (status = 200, description = "Assignment updated", body = AssetDetails),
        (status = 409, description = "Unknown user")
    )
)]
pub async fn assign_asset(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<AssignAsset>,
) -> AppResult<Json<AssetDetails>> {
    let asset = state.services.assets.assign(id, data.user_id).await?;
    Ok(Json(asset))
}

/// Record a physical audit
#[utoipa::path(
    post,
    path = "/assets/{id}/audit",
    tag = "assets",
    params(("id" = i32, Path, description = "Asset ID")),
    request_body = AuditAsset,
    responses(
        (status = 200, description = "Audit recorded", body = AssetDetails),
        (status = 400, description = "Audit date in the future")
    )
)]
pub async fn audit_asset(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    data: Option<Json<AuditAsset>>,
) -> AppResult<Json<AssetDetails>> {
    let audit_date = data.and_then(|Json(d)| d.audit_date);
    let asset = state.services.assets.audit(id, audit_date).await?;
    Ok(Json(asset))
}

/// Maintenance history of an asset
#[utoipa::path(
    get,
    path = "/assets/{id}/maintenance",
    tag = "assets",
    params(("id" = i32, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Maintenance records", body = Vec<MaintenanceDetails>),
        (status = 404, description = "Asset not found")
    )
)]
pub async fn asset_maintenance(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<MaintenanceDetails>>> {
    let records = state.services.maintenance.list_for_asset(id).await?;
    Ok(Json(records))
}

/// Assets whose warranty ends within the window
#[utoipa::path(
    get,
    path = "/assets/warranty-expiring",
    tag = "reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "Assets with expiring warranty", body = Vec<AssetDetails>)
    )
)]
pub async fn warranty_expiring(
    State(state): State<crate::AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<Vec<AssetDetails>>> {
    let assets = state.services.assets.warranty_expiring(query.days).await?;
    Ok(Json(assets))
}

/// Assets due for an audit
#[utoipa::path(
    get,
    path = "/assets/needs-audit",
    tag = "reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "Assets needing an audit", body = Vec<AssetDetails>)
    )
)]
pub async fn needs_audit(
    State(state): State<crate::AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<Vec<AssetDetails>>> {
    let assets = state.services.assets.needs_audit(query.days).await?;
    Ok(Json(assets))
}

/// Purchase cost and current value across the inventory
#[utoipa::path(
    get,
    path = "/assets/valuation-summary",
    tag = "reports",
    responses(
        (status = 200, description = "Inventory valuation", body = ValuationSummary)
    )
)]
pub async fn valuation_summary(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ValuationSummary>> {
    let summary = state.services.assets.valuation_summary().await?;
    Ok(Json(summary))
}
