use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// Vendor credentials are all optional: a missing key means the matching
/// service is reported unavailable rather than failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api: ApiConfig::from_env(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Nested vendor-credential configuration, one section per integration.
///
/// Credential sources in the service registry reference values here by a
/// two-level `(section, key)` path; `lookup` is the single resolution point.
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    pub google_cloud: GoogleCloudConfig,
    pub huggingface: HuggingFaceConfig,
    pub openai: OpenAiConfig,
    pub aws_s3: AwsS3Config,
    pub smallpdf: SmallPdfConfig,
    pub pusher: PusherConfig,
    pub supabase: SupabaseConfig,
}

#[derive(Debug, Clone, Default)]
pub struct GoogleCloudConfig {
    pub project_id: Option<String>,
    pub gemini_api_key: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct HuggingFaceConfig {
    pub api_key: Option<String>,
    pub resume_scoring_model: Option<String>,
    pub resume_matching_model: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AwsS3Config {
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub bucket_name: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SmallPdfConfig {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PusherConfig {
    pub app_id: Option<String>,
    pub app_key: Option<String>,
    pub app_secret: Option<String>,
    pub cluster: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SupabaseConfig {
    pub url: Option<String>,
    pub key: Option<String>,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        ApiConfig {
            google_cloud: GoogleCloudConfig {
                project_id: optional_env("GOOGLE_CLOUD_PROJECT_ID"),
                gemini_api_key: optional_env("GEMINI_API_KEY"),
            },
            huggingface: HuggingFaceConfig {
                api_key: optional_env("HUGGINGFACE_API_KEY"),
                resume_scoring_model: optional_env("HUGGINGFACE_RESUME_SCORING_MODEL"),
                resume_matching_model: optional_env("HUGGINGFACE_RESUME_MATCHING_MODEL"),
            },
            openai: OpenAiConfig {
                api_key: optional_env("OPENAI_API_KEY"),
            },
            aws_s3: AwsS3Config {
                access_key: optional_env("AWS_ACCESS_KEY"),
                secret_key: optional_env("AWS_SECRET_KEY"),
                bucket_name: optional_env("AWS_BUCKET_NAME"),
                region: optional_env("AWS_REGION"),
            },
            smallpdf: SmallPdfConfig {
                api_key: optional_env("SMALLPDF_API_KEY"),
                api_secret: optional_env("SMALLPDF_API_SECRET"),
            },
            pusher: PusherConfig {
                app_id: optional_env("PUSHER_APP_ID"),
                app_key: optional_env("PUSHER_APP_KEY"),
                app_secret: optional_env("PUSHER_APP_SECRET"),
                cluster: optional_env("PUSHER_CLUSTER"),
            },
            supabase: SupabaseConfig {
                url: optional_env("SUPABASE_URL"),
                key: optional_env("SUPABASE_KEY"),
            },
        }
    }

    /// Resolves a two-level `(section, key)` path to a configured value.
    /// Returns `None` for unknown paths and for keys that are present but empty.
    pub fn lookup(&self, section: &str, key: &str) -> Option<&str> {
        let value = match (section, key) {
            ("google_cloud", "project_id") => self.google_cloud.project_id.as_deref(),
            ("google_cloud", "gemini_api_key") => self.google_cloud.gemini_api_key.as_deref(),
            ("huggingface", "api_key") => self.huggingface.api_key.as_deref(),
            ("huggingface", "resume_scoring_model") => {
                self.huggingface.resume_scoring_model.as_deref()
            }
            ("huggingface", "resume_matching_model") => {
                self.huggingface.resume_matching_model.as_deref()
            }
            ("openai", "api_key") => self.openai.api_key.as_deref(),
            ("aws_s3", "access_key") => self.aws_s3.access_key.as_deref(),
            ("aws_s3", "secret_key") => self.aws_s3.secret_key.as_deref(),
            ("aws_s3", "bucket_name") => self.aws_s3.bucket_name.as_deref(),
            ("aws_s3", "region") => self.aws_s3.region.as_deref(),
            ("smallpdf", "api_key") => self.smallpdf.api_key.as_deref(),
            ("smallpdf", "api_secret") => self.smallpdf.api_secret.as_deref(),
            ("pusher", "app_id") => self.pusher.app_id.as_deref(),
            ("pusher", "app_key") => self.pusher.app_key.as_deref(),
            ("pusher", "app_secret") => self.pusher.app_secret.as_deref(),
            ("pusher", "cluster") => self.pusher.cluster.as_deref(),
            ("supabase", "url") => self.supabase.url.as_deref(),
            ("supabase", "key") => self.supabase.key.as_deref(),
            _ => None,
        };
        value.filter(|v| !v.trim().is_empty())
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_returns_configured_value() {
        let mut config = ApiConfig::default();
        config.google_cloud.gemini_api_key = Some("key-123".to_string());

        assert_eq!(
            config.lookup("google_cloud", "gemini_api_key"),
            Some("key-123")
        );
    }

    #[test]
    fn test_lookup_unknown_path_is_none() {
        let config = ApiConfig::default();
        assert_eq!(config.lookup("google_cloud", "nope"), None);
        assert_eq!(config.lookup("not_a_section", "api_key"), None);
    }

    #[test]
    fn test_lookup_treats_empty_value_as_missing() {
        let mut config = ApiConfig::default();
        config.openai.api_key = Some("   ".to_string());

        assert_eq!(config.lookup("openai", "api_key"), None);
    }
}
