//! Object storage for uploaded resumes: S3 when credentials are complete,
//! local disk under `temp_storage/` otherwise.

use std::path::{Path, PathBuf};

use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AwsS3Config;

const LOCAL_ROOT: &str = "temp_storage";
const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("S3 error: {0}")]
    S3(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("object not found: {0}")]
    NotFound(String),
}

pub enum ObjectStore {
    S3 {
        client: aws_sdk_s3::Client,
        bucket: String,
    },
    Local {
        root: PathBuf,
    },
}

impl ObjectStore {
    /// Builds the S3-backed store when access key, secret, and bucket are
    /// all configured; otherwise falls back to local disk.
    pub async fn from_config(config: &AwsS3Config) -> Self {
        match (&config.access_key, &config.secret_key, &config.bucket_name) {
            (Some(access_key), Some(secret_key), Some(bucket)) => {
                let region = config
                    .region
                    .clone()
                    .unwrap_or_else(|| DEFAULT_REGION.to_string());
                let credentials = Credentials::new(
                    access_key.as_str(),
                    secret_key.as_str(),
                    None,
                    None,
                    "resume-api-static",
                );
                let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                    .region(Region::new(region))
                    .credentials_provider(credentials)
                    .load()
                    .await;
                info!("S3 object store initialized (bucket: {bucket})");
                ObjectStore::S3 {
                    client: aws_sdk_s3::Client::new(&s3_config),
                    bucket: bucket.clone(),
                }
            }
            _ => {
                warn!("S3 credentials incomplete; storing files under {LOCAL_ROOT}/");
                ObjectStore::local(LOCAL_ROOT)
            }
        }
    }

    pub fn local(root: impl Into<PathBuf>) -> Self {
        ObjectStore::Local { root: root.into() }
    }

    /// Stores bytes under `key` and returns a reference to the stored
    /// object: an S3 URL or a local path.
    pub async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, StorageError> {
        match self {
            ObjectStore::S3 { client, bucket } => {
                let mut request = client
                    .put_object()
                    .bucket(bucket)
                    .key(key)
                    .body(ByteStream::from(data));
                if let Some(content_type) = content_type {
                    request = request.content_type(content_type);
                }
                request
                    .send()
                    .await
                    .map_err(|e| StorageError::S3(e.to_string()))?;
                Ok(format!("s3://{bucket}/{key}"))
            }
            ObjectStore::Local { root } => {
                let path = safe_join(root, key);
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(&path, data).await?;
                Ok(path.to_string_lossy().into_owned())
            }
        }
    }

    pub async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        match self {
            ObjectStore::S3 { client, bucket } => {
                let object = client
                    .get_object()
                    .bucket(bucket)
                    .key(key)
                    .send()
                    .await
                    .map_err(|e| StorageError::S3(e.to_string()))?;
                let data = object
                    .body
                    .collect()
                    .await
                    .map_err(|e| StorageError::S3(e.to_string()))?;
                Ok(data.into_bytes().to_vec())
            }
            ObjectStore::Local { root } => {
                let path = safe_join(root, key);
                match tokio::fs::read(&path).await {
                    Ok(data) => Ok(data),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                        Err(StorageError::NotFound(key.to_string()))
                    }
                    Err(e) => Err(e.into()),
                }
            }
        }
    }

    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        match self {
            ObjectStore::S3 { client, bucket } => {
                client
                    .delete_object()
                    .bucket(bucket)
                    .key(key)
                    .send()
                    .await
                    .map_err(|e| StorageError::S3(e.to_string()))?;
                Ok(())
            }
            ObjectStore::Local { root } => {
                let path = safe_join(root, key);
                match tokio::fs::remove_file(&path).await {
                    Ok(()) => Ok(()),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                    Err(e) => Err(e.into()),
                }
            }
        }
    }
}

/// Derives a unique object key: `<user_id>/<timestamp>_<short-uuid>_<name>`.
pub fn object_key(user_id: &str, file_name: &str) -> String {
    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let unique = Uuid::new_v4().simple().to_string();
    let safe_name = sanitize_file_name(file_name);
    format!("{user_id}/{timestamp}_{}_{safe_name}", &unique[..8])
}

fn sanitize_file_name(file_name: &str) -> String {
    file_name
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

// Keys contain a user-id segment; join them component-wise so `..` cannot
// escape the storage root.
fn safe_join(root: &Path, key: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    for part in key.split('/') {
        if part.is_empty() || part == "." || part == ".." {
            continue;
        }
        path.push(part);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_shape() {
        let key = object_key("user-1", "My Resume (final).pdf");
        let (user, rest) = key.split_once('/').unwrap();
        assert_eq!(user, "user-1");
        assert!(rest.ends_with("my_resume__final_.pdf"));
        // timestamp + short uuid prefix
        let parts: Vec<&str> = rest.splitn(4, '_').collect();
        assert_eq!(parts[0].len(), 8); // YYYYMMDD
        assert_eq!(parts[1].len(), 6); // HHMMSS
        assert_eq!(parts[2].len(), 8); // uuid prefix
    }

    #[test]
    fn test_safe_join_strips_traversal() {
        let path = safe_join(Path::new("temp_storage"), "../../etc/passwd");
        assert_eq!(path, PathBuf::from("temp_storage/etc/passwd"));
    }

    #[tokio::test]
    async fn test_local_put_get_delete_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::local(dir.path());

        let key = "user-1/20240101_000000_abc12345_resume.pdf";
        let reference = store
            .put(key, b"pdf bytes".to_vec(), Some("application/pdf"))
            .await
            .unwrap();
        assert!(reference.contains("resume.pdf"));

        let data = store.get(key).await.unwrap();
        assert_eq!(data, b"pdf bytes");

        store.delete(key).await.unwrap();
        assert!(matches!(
            store.get(key).await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_local_get_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::local(dir.path());

        assert!(matches!(
            store.get("user-1/nothing_here.pdf").await,
            Err(StorageError::NotFound(_))
        ));
    }
}
