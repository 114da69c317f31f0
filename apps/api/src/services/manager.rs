//! Availability resolution and lazy construction of AI service instances.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::ApiConfig;
use crate::services::backends::composite::DelegatingService;
use crate::services::backends::gemini::GeminiClient;
use crate::services::backends::huggingface::HuggingFaceClient;
use crate::services::backends::openai::OpenAiClient;
use crate::services::registry::{self, BackendKind, CredentialSource, ServiceDescriptor};
use crate::services::{GenerateError, TextGenerator};

/// Why a named service could not be resolved to an instance.
///
/// Callers can tell "not configured" apart from "failed to construct"
/// without catching anything.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("unknown service '{0}'")]
    UnknownService(String),

    #[error("no credential configured for service '{service}'")]
    MissingCredential { service: &'static str },

    #[error("no dependency of service '{service}' is available")]
    DependenciesUnavailable { service: &'static str },

    #[error("failed to construct service '{service}'")]
    ConstructionFailed {
        service: &'static str,
        #[source]
        source: GenerateError,
    },
}

/// Owns the availability and instance caches for the process lifetime.
///
/// Constructed once at startup and held in the application state; there is
/// no global. Both caches are memoized for the life of the process: a
/// service found unavailable stays unavailable until restart, and at most
/// one instance per name is ever constructed.
pub struct ServiceManager {
    config: ApiConfig,
    availability: Mutex<HashMap<String, bool>>,
    instances: Mutex<HashMap<&'static str, Arc<dyn TextGenerator>>>,
}

impl ServiceManager {
    pub fn new(config: ApiConfig) -> Self {
        debug!("initializing service manager");
        ServiceManager {
            config,
            availability: Mutex::new(HashMap::new()),
            instances: Mutex::new(HashMap::new()),
        }
    }

    /// Whether the named service can be resolved: its credentials are
    /// present and, for composite services, at least one dependency is
    /// itself available. Memoized per name.
    pub fn is_available(&self, name: &str) -> bool {
        if let Some(&cached) = self.availability.lock().unwrap().get(name) {
            return cached;
        }

        if self.instances.lock().unwrap().contains_key(name) {
            self.availability.lock().unwrap().insert(name.to_string(), true);
            return true;
        }

        // Dependency checks recurse through `is_available`; the lock is not
        // held across the recursion. The registry must stay acyclic.
        let available = match registry::descriptor(name) {
            None => false,
            Some(desc) => match self.check(desc) {
                Ok(()) => true,
                Err(e) => {
                    warn!("service '{name}' is unavailable: {e}");
                    false
                }
            },
        };

        self.availability
            .lock()
            .unwrap()
            .insert(name.to_string(), available);
        available
    }

    /// Returns the singleton instance for `name`, constructing it on first
    /// use. Construction failures are logged and returned, never fatal.
    pub fn get(&self, name: &str) -> Result<Arc<dyn TextGenerator>, ResolveError> {
        if let Some(existing) = self.instances.lock().unwrap().get(name) {
            return Ok(existing.clone());
        }

        let desc = registry::descriptor(name)
            .ok_or_else(|| ResolveError::UnknownService(name.to_string()))?;

        if !self.is_available(name) {
            return Err(self
                .check(desc)
                .err()
                .unwrap_or(ResolveError::MissingCredential { service: desc.name }));
        }

        let instance = match self.construct(desc) {
            Ok(instance) => instance,
            Err(e) => {
                error!("failed to load service '{name}': {e}");
                return Err(e);
            }
        };
        debug!("service '{name}' loaded");

        let mut instances = self.instances.lock().unwrap();
        Ok(instances.entry(desc.name).or_insert(instance).clone())
    }

    /// Registry names that currently resolve as available. Diagnostics only.
    pub fn available_services(&self) -> Vec<&'static str> {
        registry::REGISTRY
            .iter()
            .map(|d| d.name)
            .filter(|name| self.is_available(name))
            .collect()
    }

    /// Evaluates a descriptor's preconditions without touching the caches.
    fn check(&self, desc: &ServiceDescriptor) -> Result<(), ResolveError> {
        if !desc.credentials.is_empty() && self.resolve_credential(desc).is_none() {
            return Err(ResolveError::MissingCredential { service: desc.name });
        }

        if !desc.depends_on.is_empty()
            && !desc.depends_on.iter().any(|dep| self.is_available(dep))
        {
            return Err(ResolveError::DependenciesUnavailable { service: desc.name });
        }

        Ok(())
    }

    /// Walks the descriptor's credential sources in order; the first
    /// non-empty value wins. Config paths take precedence over environment
    /// variables by their position in the registry.
    fn resolve_credential(&self, desc: &ServiceDescriptor) -> Option<String> {
        for source in desc.credentials {
            let value = match source {
                CredentialSource::ConfigPath(section, key) => {
                    self.config.lookup(section, key).map(str::to_string)
                }
                CredentialSource::EnvVar(var) => std::env::var(var)
                    .ok()
                    .filter(|v| !v.trim().is_empty()),
            };
            if let Some(value) = value {
                debug!("resolved credential for '{}' from {source:?}", desc.name);
                return Some(value);
            }
        }
        None
    }

    fn construct(
        &self,
        desc: &ServiceDescriptor,
    ) -> Result<Arc<dyn TextGenerator>, ResolveError> {
        let failed = |source: GenerateError| ResolveError::ConstructionFailed {
            service: desc.name,
            source,
        };

        match desc.backend {
            BackendKind::Gemini => {
                let api_key = self
                    .resolve_credential(desc)
                    .ok_or(ResolveError::MissingCredential { service: desc.name })?;
                Ok(Arc::new(
                    GeminiClient::new(api_key).map_err(|e| failed(e.into()))?,
                ))
            }
            BackendKind::HuggingFace => {
                let api_key = self
                    .resolve_credential(desc)
                    .ok_or(ResolveError::MissingCredential { service: desc.name })?;
                Ok(Arc::new(
                    HuggingFaceClient::new(api_key).map_err(|e| failed(e.into()))?,
                ))
            }
            BackendKind::OpenAi => {
                let api_key = self
                    .resolve_credential(desc)
                    .ok_or(ResolveError::MissingCredential { service: desc.name })?;
                Ok(Arc::new(
                    OpenAiClient::new(api_key).map_err(|e| failed(e.into()))?,
                ))
            }
            BackendKind::ResumeAnalyzer
            | BackendKind::JobMatcher
            | BackendKind::ContentEnhancer => {
                // First available dependency backs the composite service.
                let inner = desc
                    .depends_on
                    .iter()
                    .find_map(|dep| self.get(dep).ok())
                    .ok_or(ResolveError::DependenciesUnavailable { service: desc.name })?;
                let service = DelegatingService::new(desc.name, inner);
                debug!("composite '{}' backed by '{}'", desc.name, service.backing());
                Ok(Arc::new(service))
            }
        }
    }
}
