//! Live-update delivery over Pusher channels.
//!
//! When the Pusher credentials are incomplete the trigger degrades to a
//! simulated mode that logs the event and reports success, so callers can
//! fire-and-forget either way. Delivery failures are absorbed: `trigger`
//! returns a boolean, never an error.

use chrono::Utc;
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use sha2::Sha256;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::PusherConfig;

type HmacSha256 = Hmac<Sha256>;

const DEFAULT_CLUSTER: &str = "us2";

#[derive(Debug, Serialize)]
struct EventBody<'a> {
    name: &'a str,
    channels: Vec<&'a str>,
    data: String,
}

pub enum EventTrigger {
    Pusher(PusherApi),
    Simulated,
}

pub struct PusherApi {
    client: Client,
    app_id: String,
    key: String,
    secret: String,
    cluster: String,
}

impl EventTrigger {
    pub fn from_config(config: &PusherConfig) -> Self {
        match (&config.app_id, &config.app_key, &config.app_secret) {
            (Some(app_id), Some(key), Some(secret)) => match Client::builder().build() {
                Ok(client) => EventTrigger::Pusher(PusherApi {
                    client,
                    app_id: app_id.clone(),
                    key: key.clone(),
                    secret: secret.clone(),
                    cluster: config
                        .cluster
                        .clone()
                        .unwrap_or_else(|| DEFAULT_CLUSTER.to_string()),
                }),
                Err(e) => {
                    warn!("Pusher client initialization failed: {e}; events will be simulated");
                    EventTrigger::Simulated
                }
            },
            _ => {
                info!("Pusher credentials incomplete; events will be simulated");
                EventTrigger::Simulated
            }
        }
    }

    /// Triggers one event on one channel. Returns whether delivery (or
    /// simulation) succeeded.
    pub async fn trigger(&self, channel: &str, event: &str, data: Value) -> bool {
        let enhanced = enhance_payload(data);

        match self {
            EventTrigger::Simulated => {
                info!("[simulated event] channel={channel} event={event} data={enhanced}");
                true
            }
            EventTrigger::Pusher(api) => match api.send(channel, event, &enhanced).await {
                Ok(()) => true,
                Err(e) => {
                    warn!("Pusher event error on channel {channel}: {e}");
                    false
                }
            },
        }
    }

    /// Fans a resume update out to the user channel and the resume channel.
    pub async fn trigger_resume_update(
        &self,
        user_id: &str,
        resume_id: &str,
        update_type: &str,
        data: Value,
    ) -> bool {
        let user_ok = self
            .trigger(
                &user_channel(user_id),
                &format!("resume_{update_type}"),
                json!({
                    "resume_id": resume_id,
                    "update_type": update_type,
                    "data": data,
                }),
            )
            .await;

        let resume_ok = self
            .trigger(
                &resume_channel(resume_id),
                &format!("update_{update_type}"),
                json!({
                    "update_type": update_type,
                    "data": data,
                }),
            )
            .await;

        user_ok && resume_ok
    }

    /// Fans a job-match update out to the user channel and the match channel.
    pub async fn trigger_job_match_update(
        &self,
        user_id: &str,
        resume_id: &str,
        job_id: &str,
        update_type: &str,
        data: Value,
    ) -> bool {
        let user_ok = self
            .trigger(
                &user_channel(user_id),
                &format!("job_match_{update_type}"),
                json!({
                    "resume_id": resume_id,
                    "job_id": job_id,
                    "update_type": update_type,
                    "data": data,
                }),
            )
            .await;

        let match_ok = self
            .trigger(
                &job_match_channel(resume_id, job_id),
                &format!("update_{update_type}"),
                json!({
                    "update_type": update_type,
                    "data": data,
                }),
            )
            .await;

        user_ok && match_ok
    }
}

impl PusherApi {
    async fn send(&self, channel: &str, event: &str, data: &Value) -> Result<(), String> {
        let body = EventBody {
            name: event,
            channels: vec![channel],
            data: data.to_string(),
        };
        let body_json = serde_json::to_string(&body).map_err(|e| e.to_string())?;

        let path = format!("/apps/{}/events", self.app_id);
        let timestamp = Utc::now().timestamp();
        let query = auth_query(&self.key, timestamp, &body_json);
        let signature = sign_request(&self.secret, &path, &query);

        let url = format!(
            "https://api-{}.pusher.com{path}?{query}&auth_signature={signature}",
            self.cluster
        );

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .body(body_json)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(format!("status {status}: {message}"));
        }
        Ok(())
    }
}

/// Adds the delivery metadata every event carries.
fn enhance_payload(data: Value) -> Value {
    match data {
        Value::Object(mut map) => {
            map.insert("timestamp".to_string(), json!(Utc::now().timestamp()));
            map.insert("event_id".to_string(), json!(Uuid::new_v4().to_string()));
            Value::Object(map)
        }
        other => other,
    }
}

/// Query-string fields in the sorted order the signature scheme requires.
fn auth_query(key: &str, timestamp: i64, body: &str) -> String {
    let body_md5 = hex::encode(Md5::digest(body.as_bytes()));
    format!("auth_key={key}&auth_timestamp={timestamp}&auth_version=1.0&body_md5={body_md5}")
}

fn sign_request(secret: &str, path: &str, query: &str) -> String {
    let string_to_sign = format!("POST\n{path}\n{query}");
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(string_to_sign.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

pub fn user_channel(user_id: &str) -> String {
    format!("private-user-{user_id}")
}

pub fn resume_channel(resume_id: &str) -> String {
    format!("private-resume-{resume_id}")
}

pub fn job_match_channel(resume_id: &str, job_id: &str) -> String {
    format!("private-job-match-{resume_id}-{job_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_names() {
        assert_eq!(user_channel("u1"), "private-user-u1");
        assert_eq!(resume_channel("r1"), "private-resume-r1");
        assert_eq!(job_match_channel("r1", "j1"), "private-job-match-r1-j1");
    }

    #[test]
    fn test_enhance_payload_adds_metadata() {
        let enhanced = enhance_payload(json!({"score": 80}));
        assert_eq!(enhanced["score"], 80);
        assert!(enhanced["timestamp"].is_i64());
        assert!(enhanced["event_id"].is_string());
    }

    #[test]
    fn test_auth_query_embeds_body_md5() {
        // md5("") is the well-known empty digest.
        let query = auth_query("app-key", 1_700_000_000, "");
        assert_eq!(
            query,
            "auth_key=app-key&auth_timestamp=1700000000&auth_version=1.0&body_md5=d41d8cd98f00b204e9800998ecf8427e"
        );
    }

    #[test]
    fn test_signature_is_deterministic_hex() {
        let first = sign_request("secret", "/apps/1/events", "auth_key=k");
        let second = sign_request("secret", "/apps/1/events", "auth_key=k");
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));

        let different = sign_request("other-secret", "/apps/1/events", "auth_key=k");
        assert_ne!(first, different);
    }

    #[tokio::test]
    async fn test_simulated_trigger_succeeds() {
        let trigger = EventTrigger::from_config(&PusherConfig::default());
        assert!(matches!(trigger, EventTrigger::Simulated));
        assert!(trigger.trigger("channel", "event", json!({"k": "v"})).await);
    }

    #[tokio::test]
    async fn test_resume_update_fans_out_in_simulation() {
        let trigger = EventTrigger::Simulated;
        assert!(
            trigger
                .trigger_resume_update("u1", "r1", "score", json!({"score": 92}))
                .await
        );
    }
}
