//! Reference entities: catalog, organisation and maintenance types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AssetCategory {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// UI icon name
    pub icon: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAssetCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(max = 50))]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Manufacturer {
    pub id: i32,
    pub name: String,
    pub support_url: Option<String>,
    pub support_phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateManufacturer {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(url)]
    pub support_url: Option<String>,
    #[validate(length(max = 20))]
    pub support_phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AssetModel {
    pub id: i32,
    pub manufacturer_id: i32,
    pub category_id: Option<i32>,
    pub name: String,
    pub model_number: Option<String>,
    /// Expected service life, in months
    pub typical_lifespan_months: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAssetModel {
    pub manufacturer_id: i32,
    pub category_id: Option<i32>,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 50))]
    pub model_number: Option<String>,
    #[validate(range(min = 0))]
    pub typical_lifespan_months: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AssetStatus {
    pub id: i32,
    pub name: String,
    /// Whether assets in this status count as deployed
    pub is_active: bool,
    /// Hex color, e.g. `#999999`
    pub color: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAssetStatus {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    pub is_active: Option<bool>,
    #[validate(length(equal = 7, message = "Color must look like #RRGGBB"))]
    pub color: Option<String>,
}

// ---------------------------------------------------------------------------
// Maintenance types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceType {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub recommended_frequency_months: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMaintenanceType {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub recommended_frequency_months: Option<i32>,
}

// ---------------------------------------------------------------------------
// Organisation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Company {
    pub id: i32,
    pub name: String,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub contract_start_date: Option<NaiveDate>,
    pub contract_end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCompany {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 50))]
    pub tax_id: Option<String>,
    pub address: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub contact_email: Option<String>,
    #[validate(length(max = 20))]
    pub contact_phone: Option<String>,
    pub contract_start_date: Option<NaiveDate>,
    pub contract_end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Site {
    pub id: i32,
    pub company_id: i32,
    pub name: String,
    pub address: String,
    pub primary_contact: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSite {
    pub company_id: i32,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub address: String,
    #[validate(length(max = 100))]
    pub primary_contact: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Department {
    pub id: i32,
    pub company_id: i32,
    pub name: String,
    pub cost_center: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDepartment {
    pub company_id: i32,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 50))]
    pub cost_center: Option<String>,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// A person assets can be assigned to
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub company_id: Option<i32>,
    pub department_id: Option<i32>,
    pub is_asset_manager: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 3, max = 150, message = "Username must be 3-150 characters"))]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    pub company_id: Option<i32>,
    pub department_id: Option<i32>,
    pub is_asset_manager: Option<bool>,
}

/// Which reference table an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Category,
    Manufacturer,
    AssetModel,
    AssetStatus,
    MaintenanceType,
    Company,
    Site,
    Department,
    User,
}

impl ReferenceKind {
    pub fn table(self) -> &'static str {
        match self {
            ReferenceKind::Category => "asset_categories",
            ReferenceKind::Manufacturer => "manufacturers",
            ReferenceKind::AssetModel => "asset_models",
            ReferenceKind::AssetStatus => "asset_statuses",
            ReferenceKind::MaintenanceType => "maintenance_types",
            ReferenceKind::Company => "companies",
            ReferenceKind::Site => "sites",
            ReferenceKind::Department => "departments",
            ReferenceKind::User => "users",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReferenceKind::Category => "Asset category",
            ReferenceKind::Manufacturer => "Manufacturer",
            ReferenceKind::AssetModel => "Asset model",
            ReferenceKind::AssetStatus => "Asset status",
            ReferenceKind::MaintenanceType => "Maintenance type",
            ReferenceKind::Company => "Company",
            ReferenceKind::Site => "Site",
            ReferenceKind::Department => "Department",
            ReferenceKind::User => "User",
        }
    }
}
