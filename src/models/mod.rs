//! Data models for the asset server

pub mod asset;
pub mod enums;
pub mod maintenance;
pub mod reference;

// Re-export commonly used types
pub use asset::{Asset, AssetDetails};
pub use enums::{MaintenanceStatus, Priority};
pub use maintenance::{DaysOpen, MaintenanceDetails, MaintenanceRecord};
pub use reference::ReferenceKind;
