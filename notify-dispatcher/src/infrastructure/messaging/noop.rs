use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::models::NotificationPayload;
use crate::domain::repositories::PushSender;
use crate::error::Result;

/// 未配置推送凭证时使用的占位发送器
pub struct NoopPushSender;

#[async_trait]
impl PushSender for NoopPushSender {
    async fn send(&self, payload: &NotificationPayload) -> Result<String> {
        info!(title = %payload.notification.title, "noop push sender invoked");
        Ok("noop".to_string())
    }
}

impl NoopPushSender {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self)
    }
}
