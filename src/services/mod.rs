//! Services module
//!
//! This module contains the clients for external collaborators

pub mod backend;

// Re-export commonly used services
pub use backend::{
    BackendService, CombinedParse, HealthStatus, PatientBackend, PatientLookup, QuestionAnswer, TurnRequest,
};

use tracing::warn;
use crate::config::settings::Settings;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone, Debug)]
pub struct ServiceFactory {
    pub backend: BackendService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: &Settings) -> Result<Self> {
        let backend = BackendService::new(&settings.backend)?;

        Ok(Self { backend })
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        match self.backend.health_check().await {
            Ok(status) => ServiceHealthStatus {
                backend_reachable: true,
                backend_status: Some(status.status),
                model_trained: status.model_trained,
            },
            Err(e) => {
                warn!(error = %e, base_url = self.backend.base_url(), "Backend health check failed");
                ServiceHealthStatus {
                    backend_reachable: false,
                    backend_status: None,
                    model_trained: None,
                }
            }
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub backend_reachable: bool,
    pub backend_status: Option<String>,
    pub model_trained: Option<bool>,
}

impl ServiceHealthStatus {
    /// Check if the backend is up and ready to predict
    pub fn is_healthy(&self) -> bool {
        self.backend_reachable
            && self.backend_status.as_deref() == Some("ok")
            && self.model_trained != Some(false)
    }

    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.backend_reachable {
            issues.push("Prediction backend unreachable".to_string());
        } else if self.backend_status.as_deref() != Some("ok") {
            issues.push(format!(
                "Prediction backend reports status {:?}",
                self.backend_status.as_deref().unwrap_or("unknown")
            ));
        }
        if self.model_trained == Some(false) {
            issues.push("Prediction model not trained".to_string());
        }

        issues
    }
}
