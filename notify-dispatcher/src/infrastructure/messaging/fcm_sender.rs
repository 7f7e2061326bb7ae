//! FCM HTTP v1 发送适配器
//!
//! POST {endpoint}/v1/projects/{project}/messages:send，Bearer 凭证由宿主环境注入。
//! 成功响应携带不透明的 name 标识；失败响应的 error 结构体被解析为错误详情。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::domain::models::NotificationPayload;
use crate::domain::repositories::PushSender;
use crate::error::{DispatchError, Result};

/// v1 发送请求的外层信封
#[derive(Debug, Serialize)]
struct FcmSendRequest<'a> {
    message: &'a NotificationPayload,
}

#[derive(Debug, Deserialize)]
struct FcmSendResponse {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct FcmErrorBody {
    #[serde(default)]
    error: Option<FcmErrorStatus>,
}

#[derive(Debug, Deserialize)]
struct FcmErrorStatus {
    #[serde(default)]
    code: Option<i32>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    details: Vec<serde_json::Value>,
}

pub struct FcmPushSender {
    client: Client,
    send_url: String,
    access_token: String,
}

impl FcmPushSender {
    pub fn new(
        endpoint: &str,
        project_id: &str,
        access_token: String,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        let send_url = format!(
            "{}/v1/projects/{}/messages:send",
            endpoint.trim_end_matches('/'),
            project_id
        );

        Ok(Self {
            client,
            send_url,
            access_token,
        })
    }
}

#[async_trait]
impl PushSender for FcmPushSender {
    async fn send(&self, payload: &NotificationPayload) -> Result<String> {
        let response = self
            .client
            .post(&self.send_url)
            .bearer_auth(&self.access_token)
            .json(&FcmSendRequest { message: payload })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body: FcmSendResponse = response.json().await?;
            debug!(name = %body.name, "push accepted by provider");
            return Ok(body.name);
        }

        let body: FcmErrorBody = response.json().await.unwrap_or_default();
        match body.error {
            Some(error) => Err(DispatchError::PushDelivery {
                message: error
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("provider returned status {status}")),
                detail: serde_json::to_string(&json!({
                    "code": error.code,
                    "status": error.status,
                    "details": error.details,
                }))
                .ok(),
            }),
            None => Err(DispatchError::PushDelivery {
                message: format!("provider returned status {status}"),
                detail: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::MessageSnapshot;

    #[test]
    fn test_request_envelope_wraps_message() {
        let snapshot = MessageSnapshot {
            sender_id: Some("u1".to_string()),
            sender_name: Some("Alice".to_string()),
            receiver_id: Some("u2".to_string()),
            content: Some("hi".to_string()),
        };
        let payload = NotificationPayload::for_message("TOK".to_string(), &snapshot, "m1");
        let value = serde_json::to_value(FcmSendRequest { message: &payload }).unwrap();

        assert_eq!(value["message"]["token"], "TOK");
        assert_eq!(value["message"]["notification"]["title"], "Alice");
        assert_eq!(value["message"]["data"]["messageId"], "m1");
    }

    #[test]
    fn test_success_response_yields_name() {
        let raw = r#"{"name": "projects/demo/messages/0:1500415314455276%31bd1c96f9fd7ecd"}"#;
        let body: FcmSendResponse = serde_json::from_str(raw).unwrap();
        assert!(body.name.starts_with("projects/demo/messages/"));
    }

    #[test]
    fn test_error_body_parses_structured_detail() {
        let raw = r#"{
            "error": {
                "code": 404,
                "message": "Requested entity was not found.",
                "status": "NOT_FOUND",
                "details": [{"@type": "type.googleapis.com/google.firebase.fcm.v1.FcmError", "errorCode": "UNREGISTERED"}]
            }
        }"#;
        let body: FcmErrorBody = serde_json::from_str(raw).unwrap();
        let error = body.error.unwrap();
        assert_eq!(error.code, Some(404));
        assert_eq!(error.status.as_deref(), Some("NOT_FOUND"));
        assert_eq!(error.details.len(), 1);
    }

    #[test]
    fn test_send_url_built_from_endpoint_and_project() {
        let sender =
            FcmPushSender::new("https://fcm.googleapis.com/", "demo", "t".to_string(), 30)
                .unwrap();
        assert_eq!(
            sender.send_url,
            "https://fcm.googleapis.com/v1/projects/demo/messages:send"
        );
    }
}
