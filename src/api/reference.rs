//! Reference data API endpoints: catalog, organisation and users

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{error::AppResult, models::reference::*};

/// List categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "catalog",
    responses(
        (status = 200, description = "Asset category list", body = Vec<AssetCategory>)
    )
)]
pub async fn list_categories(State(state): State<crate::AppState>) -> AppResult<Json<Vec<AssetCategory>>> {
    let rows = state.services.reference.list_categories().await?;
    Ok(Json(rows))
}

/// Create asset category
#[utoipa::path(
    post,
    path = "/categories",
    tag = "catalog",
    request_body = CreateAssetCategory,
    responses(
        (status = 201, description = "Asset category created", body = AssetCategory),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Duplicate name or unknown reference")
    )
)]
pub async fn create_category(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateAssetCategory>,
) -> AppResult<(StatusCode, Json<AssetCategory>)> {
    let row = state.services.reference.create_category(&data).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Delete asset category
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "catalog",
    params(("id" = i32, Path, description = "Asset category ID")),
    responses(
        (status = 204, description = "Asset category deleted"),
        (status = 404, description = "Asset category not found"),
        (status = 409, description = "Asset category still in use")
    )
)]
pub async fn delete_category(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.reference.delete(ReferenceKind::Category, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List manufacturers
#[utoipa::path(
    get,
    path = "/manufacturers",
    tag = "catalog",
    responses(
        (status = 200, description = "Manufacturer list", body = Vec<Manufacturer>)
    )
)]
pub async fn list_manufacturers(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Manufacturer>>> {
    let rows = state.services.reference.list_manufacturers().await?;
    Ok(Json(rows))
}

/// Create manufacturer
#[utoipa::path(
    post,
    path = "/manufacturers",
    tag = "catalog",
    request_body = CreateManufacturer,
    responses(
        (status = 201, description = "Manufacturer created", body = Manufacturer),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Duplicate name or unknown reference")
    )
)]
pub async fn create_manufacturer(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateManufacturer>,
) -> AppResult<(StatusCode, Json<Manufacturer>)> {
    let row = state.services.reference.create_manufacturer(&data).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Delete manufacturer
#[utoipa::path(
    delete,
    path = "/manufacturers/{id}",
    tag = "catalog",
    params(("id" = i32, Path, description = "Manufacturer ID")),
    responses(
        (status = 204, description = "Manufacturer deleted"),
        (status = 404, description = "Manufacturer not found"),
        (status = 409, description = "Manufacturer still in use")
    )
)]
pub async fn delete_manufacturer(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.reference.delete(ReferenceKind::Manufacturer, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List asset models
#[utoipa::path(
    get,
    path = "/asset-models",
    tag = "catalog",
    responses(
        (status = 200, description = "Asset model list", body = Vec<AssetModel>)
    )
)]
pub async fn list_asset_models(State(state): State<crate::AppState>) -> AppResult<Json<Vec<AssetModel>>> {
    let rows = state.services.reference.list_models().await?;
    Ok(Json(rows))
}

/// Create asset model
#[utoipa::path(
    post,
    path = "/asset-models",
    tag = "catalog",
    request_body = CreateAssetModel,
    responses(
        (status = 201, description = "Asset model created", body = AssetModel),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Duplicate name or unknown reference")
    )
)]
pub async fn create_asset_model(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateAssetModel>,
) -> AppResult<(StatusCode, Json<AssetModel>)> {
    let row = state.services.reference.create_model(&data).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Delete asset model
#[utoipa::path(
    delete,
    path = "/asset-models/{id}",
    tag = "catalog",
    params(("id" = i32, Path, description = "Asset model ID")),
    responses(
        (status = 204, description = "Asset model deleted"),
        (status = 404, description = "Asset model not found"),
        (status = 409, description = "Asset model still in use")
    )
)]
pub async fn delete_asset_model(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.reference.delete(ReferenceKind::AssetModel, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List asset statuses
#[utoipa::path(
    get,
    path = "/asset-statuses",
    tag = "catalog",
    responses(
        (status = 200, description = "Asset status list", body = Vec<AssetStatus>)
    )
)]
pub async fn list_asset_statuses(State(state): State<crate::AppState>) -> AppResult<Json<Vec<AssetStatus>>> {
    let rows = state.services.reference.list_statuses().await?;
    Ok(Json(rows))
}

/// Create asset status
#[utoipa::path(
    post,
    path = "/asset-statuses",
    tag = "catalog",
    request_body = CreateAssetStatus,
    responses(
        (status = 201, description = "Asset status created", body = AssetStatus),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Duplicate name or unknown reference")
    )
)]
pub async fn create_asset_status(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateAssetStatus>,
) -> AppResult<(StatusCode, Json<AssetStatus>)> {
    let row = state.services.reference.create_status(&data).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Delete asset status
#[utoipa::path(
    delete,
    path = "/asset-statuses/{id}",
    tag = "catalog",
    params(("id" = i32, Path, description = "Asset status ID")),
    responses(
        (status = 204, description = "Asset status deleted"),
        (status = 404, description = "Asset status not found"),
        (status = 409, description = "Asset status still in use")
    )
)]
pub async fn delete_asset_status(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.reference.delete(ReferenceKind::AssetStatus, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List maintenance types
#[utoipa::path(
    get,
    path = "/maintenance-types",
    tag = "catalog",
    responses(
        (status = 200, description = "Maintenance type list", body = Vec<MaintenanceType>)
    )
)]
pub async fn list_maintenance_types(State(state): State<crate::AppState>) -> AppResult<Json<Vec<MaintenanceType>>> {
    let rows = state.services.reference.list_maintenance_types().await?;
    Ok(Json(rows))
}

/// Create maintenance type
#[utoipa::path(
    post,
    path = "/maintenance-types",
    tag = "catalog",
    request_body = CreateMaintenanceType,
    responses(
        (status = 201, description = "Maintenance type created", body = MaintenanceType),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Duplicate name or unknown reference")
    )
)]
pub async fn create_maintenance_type(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateMaintenanceType>,
) -> AppResult<(StatusCode, Json<MaintenanceType>)> {
    let row = state.services.reference.create_maintenance_type(&data).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Delete maintenance type
#[utoipa::path(
    delete,
    path = "/maintenance-types/{id}",
    tag = "catalog",
    params(("id" = i32, Path, description = "Maintenance type ID")),
    responses(
        (status = 204, description = "Maintenance type deleted"),
        (status = 404, description = "Maintenance type not found"),
        (status = 409, description = "Maintenance type still in use")
    )
)]
pub async fn delete_maintenance_type(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.reference.delete(ReferenceKind::MaintenanceType, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List companies
#[utoipa::path(
    get,
    path = "/companies",
    tag = "organisation",
    responses(
        (status = 200, description = "Company list", body = Vec<Company>)
    )
)]
pub async fn list_companies(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Company>>> {
    let rows = state.services.reference.list_companies().await?;
    Ok(Json(rows))
}

/// Create company
#[utoipa::path(
    post,
    path = "/companies",
    tag = "organisation",
    request_body = CreateCompany,
    responses(
        (status = 201, description = "Company created", body = Company),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Duplicate name or unknown reference")
    )
)]
pub async fn create_company(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateCompany>,
) -> AppResult<(StatusCode, Json<Company>)> {
    let row = state.services.reference.create_company(&data).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Delete company
#[utoipa::path(
    delete,
    path = "/companies/{id}",
    tag = "organisation",
    params(("id" = i32, Path, description = "Company ID")),
    responses(
        (status = 204, description = "Company deleted"),
        (status = 404, description = "Company not found"),
        (status = 409, description = "Company still in use")
    )
)]
pub async fn delete_company(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.reference.delete(ReferenceKind::Company, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List sites
#[utoipa::path(
    get,
    path = "/sites",
    tag = "organisation",
    responses(
        (status = 200, description = "Site list", body = Vec<Site>)
    )
)]
pub async fn list_sites(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Site>>> {
    let rows = state.services.reference.list_sites().await?;
    Ok(Json(rows))
}

/// Create site
#[utoipa::path(
    post,
    path = "/sites",
    tag = "organisation",
    request_body = CreateSite,
    responses(
        (status = 201, description = "Site created", body = Site),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Duplicate name or unknown reference")
    )
)]
pub async fn create_site(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateSite>,
) -> AppResult<(StatusCode, Json<Site>)> {
    let row = state.services.reference.create_site(&data).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Delete site
#[utoipa::path(
    delete,
    path = "/sites/{id}",
    tag = "organisation",
    params(("id" = i32, Path, description = "Site ID")),
    responses(
        (status = 204, description = "Site deleted"),
        (status = 404, description = "Site not found"),
        (status = 409, description = "Site still in use")
    )
)]
pub async fn delete_site(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.reference.delete(ReferenceKind::Site, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List departments
#[utoipa::path(
    get,
    path = "/departments",
    tag = "organisation",
    responses(
        (status = 200, description = "Department list", body = Vec<Department>)
    )
)]
pub async fn list_departments(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Department>>> {
    let rows = state.services.reference.list_departments().await?;
    Ok(Json(rows))
}

/// Create department
#[utoipa::path(
    post,
    path = "/departments",
    tag = "organisation",
    request_body = CreateDepartment,
    responses(
        (status = 201, description = "Department created", body = Department),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Duplicate name or unknown reference")
    )
)]
pub async fn create_department(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateDepartment>,
) -> AppResult<(StatusCode, Json<Department>)> {
    let row = state.services.reference.create_department(&data).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Delete department
#[utoipa::path(
    delete,
    path = "/departments/{id}",
    tag = "organisation",
    params(("id" = i32, Path, description = "Department ID")),
    responses(
        (status = 204, description = "Department deleted"),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Department still in use")
    )
)]
pub async fn delete_department(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.reference.delete(ReferenceKind::Department, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List users
#[utoipa::path(
    get,
    path = "/users",
    tag = "organisation",
    responses(
        (status = 200, description = "User list", body = Vec<User>)
    )
)]
pub async fn list_users(State(state): State<crate::AppState>) -> AppResult<Json<Vec<User>>> {
    let rows = state.services.reference.list_users().await?;
    Ok(Json(rows))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "organisation",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<User>> {
    let user = state.services.reference.get_user(id).await?;
    Ok(Json(user))
}

/// Create user
#[utoipa::path(
    post,
    path = "/users",
    tag = "organisation",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Duplicate name or unknown reference")
    )
)]
pub async fn create_user(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let row = state.services.reference.create_user(&data).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// Delete user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "organisation",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found"),
        (status = 409, description = "User still in use")
    )
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.reference.delete(ReferenceKind::User, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
