//! Maintenance API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::maintenance::{
        CreateMaintenance, MaintenanceDetails, MaintenanceList, MaintenanceQuery, StatusChange,
        UpdateMaintenance,
    },
};

/// List maintenance records
#[utoipa::path(
    get,
    path = "/maintenance",
    tag = "maintenance",
    params(MaintenanceQuery),
    responses(
        (status = 200, description = "Maintenance page", body = MaintenanceList)
    )
)]
pub async fn list_maintenance(
    State(state): State<crate::AppState>,
    Query(query): Query<MaintenanceQuery>,
) -> AppResult<Json<MaintenanceList>> {
    let records = state.services.maintenance.list(&query).await?;
    Ok(Json(records))
}

/// Get maintenance record by ID
#[utoipa::path(
    get,
    path = "/maintenance/{id}",
    tag = "maintenance",
    params(("id" = i32, Path, description = "Maintenance record ID")),
    responses(
        (status = 200, description = "Maintenance record", body = MaintenanceDetails),
        (status = 404, description = "Record not found")
    )
)]
pub async fn get_maintenance(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MaintenanceDetails>> {
    let record = state.services.maintenance.get(id).await?;
    Ok(Json(record))
}

/// Open a maintenance record
#[utoipa::path(
    post,
    path = "/maintenance",
    tag = "maintenance",
    request_body = CreateMaintenance,
    responses(
        (status = 201, description = "Record created", body = MaintenanceDetails),
        (status = 409, description = "Unknown asset, type or user")
    )
)]
pub async fn create_maintenance(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateMaintenance>,
) -> AppResult<(StatusCode, Json<MaintenanceDetails>)> {
    let record = state.services.maintenance.create(&data).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Update a maintenance record
#[utoipa::path(
    put,
    path = "/maintenance/{id}",
    tag = "maintenance",
    params(("id" = i32, Path, description = "Maintenance record ID")),
    request_body = UpdateMaintenance,
    responses(
        (status = 200, description = "Record updated", body = MaintenanceDetails),
        (status = 404, description = "Record not found")
    )
)]
pub async fn update_maintenance(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateMaintenance>,
) -> AppResult<Json<MaintenanceDetails>> {
    let record = state.services.maintenance.update(id, &data).await?;
    Ok(Json(record))
}

/// Change the status of a maintenance record
#[utoipa::path(
    post,
    path = "/maintenance/{id}/status",
    tag = "maintenance",
    params(("id" = i32, Path, description = "Maintenance record ID")),
    request_body = StatusChange,
    responses(
        (status = 200, description = "Status changed", body = MaintenanceDetails),
        (status = 400, description = "Cost given outside completion"),
        (status = 422, description = "Transition not allowed")
    )
)]
pub async fn change_status(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(change): Json<StatusChange>,
) -> AppResult<Json<MaintenanceDetails>> {
    let record = state.services.maintenance.change_status(id, &change).await?;
    Ok(Json(record))
}

/// Delete a maintenance record
#[utoipa::path(
    delete,
    path = "/maintenance/{id}",
    tag = "maintenance",
    params(("id" = i32, Path, description = "Maintenance record ID")),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 404, description = "Record not found")
    )
)]
pub async fn delete_maintenance(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.maintenance.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Open records past their scheduled date
#[utoipa::path(
    get,
    path = "/maintenance/overdue",
    tag = "maintenance",
    responses(
        (status = 200, description = "Overdue records", body = Vec<MaintenanceDetails>)
    )
)]
pub async fn overdue_maintenance(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<MaintenanceDetails>>> {
    let records = state.services.maintenance.overdue().await?;
    Ok(Json(records))
}
