//! Business logic services

pub mod assets;
pub mod maintenance;
pub mod reference;

use std::sync::Arc;

use crate::{
    clock::Clock,
    config::AppConfig,
    lifecycle::policy_for,
    repository::Repository,
    valuation::{strategy_for, Valuator},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub assets: assets::AssetsService,
    pub maintenance: maintenance::MaintenanceService,
    pub reference: reference::ReferenceService,
}

impl Services {
    /// Create all services over the given repository
    pub fn new(repository: &Repository, config: &AppConfig, clock: Arc<dyn Clock>) -> Self {
        let valuator = Valuator::new(strategy_for(config.valuation.strategy));
        let policy = policy_for(config.maintenance.transition_policy);
        tracing::info!(
            valuation = valuator.strategy_name(),
            transition_policy = policy.name(),
            "Services configured"
        );

        Self {
            assets: assets::AssetsService::new(
                repository.assets.clone(),
                repository.reference.clone(),
                valuator,
                clock.clone(),
                config.reports.clone(),
            ),
            maintenance: maintenance::MaintenanceService::new(
                repository.maintenance.clone(),
                repository.assets.clone(),
                repository.reference.clone(),
                policy,
                clock,
            ),
            reference: reference::ReferenceService::new(repository.reference.clone()),
        }
    }
}
