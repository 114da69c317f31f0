//! The capability registry: static descriptors for every known AI service.

/// Where a credential value may come from, in resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Two-level path into the nested [`ApiConfig`](crate::config::ApiConfig).
    ConfigPath(&'static str, &'static str),
    /// Process environment variable.
    EnvVar(&'static str),
}

/// The concrete implementation behind a service name.
///
/// A fixed enum rather than a module path keeps backend selection a
/// compile-time concern; there is no runtime reflection to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Gemini,
    HuggingFace,
    OpenAi,
    ResumeAnalyzer,
    JobMatcher,
    ContentEnhancer,
}

/// Immutable description of one registered service.
#[derive(Debug, Clone, Copy)]
pub struct ServiceDescriptor {
    pub name: &'static str,
    pub backend: BackendKind,
    /// Ordered credential sources; the first non-empty value wins. Empty
    /// means the service needs no credential of its own.
    pub credentials: &'static [CredentialSource],
    /// Composite services are available when ANY listed dependency is.
    /// The registry must stay acyclic: availability checking recurses
    /// through dependencies without cycle detection.
    pub depends_on: &'static [&'static str],
}

pub const REGISTRY: &[ServiceDescriptor] = &[
    ServiceDescriptor {
        name: "gemini",
        backend: BackendKind::Gemini,
        credentials: &[
            CredentialSource::ConfigPath("google_cloud", "gemini_api_key"),
            CredentialSource::EnvVar("GEMINI_API_KEY"),
        ],
        depends_on: &[],
    },
    ServiceDescriptor {
        name: "huggingface",
        backend: BackendKind::HuggingFace,
        credentials: &[
            CredentialSource::ConfigPath("huggingface", "api_key"),
            CredentialSource::EnvVar("HUGGINGFACE_API_KEY"),
        ],
        depends_on: &[],
    },
    ServiceDescriptor {
        name: "openai",
        backend: BackendKind::OpenAi,
        credentials: &[
            CredentialSource::ConfigPath("openai", "api_key"),
            CredentialSource::EnvVar("OPENAI_API_KEY"),
        ],
        depends_on: &[],
    },
    ServiceDescriptor {
        name: "resume_analyzer",
        backend: BackendKind::ResumeAnalyzer,
        credentials: &[],
        depends_on: &["gemini", "huggingface"],
    },
    ServiceDescriptor {
        name: "job_matcher",
        backend: BackendKind::JobMatcher,
        credentials: &[],
        depends_on: &["gemini", "huggingface"],
    },
    ServiceDescriptor {
        name: "content_enhancer",
        backend: BackendKind::ContentEnhancer,
        credentials: &[],
        depends_on: &["gemini", "huggingface", "openai"],
    },
];

pub fn descriptor(name: &str) -> Option<&'static ServiceDescriptor> {
    REGISTRY.iter().find(|d| d.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_names_are_unique() {
        for (i, a) in REGISTRY.iter().enumerate() {
            for b in &REGISTRY[i + 1..] {
                assert_ne!(a.name, b.name, "duplicate service name {}", a.name);
            }
        }
    }

    #[test]
    fn test_dependencies_reference_registered_services() {
        for desc in REGISTRY {
            for dep in desc.depends_on {
                assert!(
                    descriptor(dep).is_some(),
                    "{} depends on unregistered service {dep}",
                    desc.name
                );
            }
        }
    }

    #[test]
    fn test_leaf_services_declare_credentials() {
        for desc in REGISTRY {
            if desc.depends_on.is_empty() {
                assert!(
                    !desc.credentials.is_empty(),
                    "leaf service {} has no credential source",
                    desc.name
                );
            }
        }
    }

    #[test]
    fn test_descriptor_lookup() {
        assert!(descriptor("gemini").is_some());
        assert!(descriptor("not_registered").is_none());
    }
}
