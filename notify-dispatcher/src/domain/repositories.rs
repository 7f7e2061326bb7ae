use async_trait::async_trait;

use crate::error::Result;

use super::models::NotificationPayload;

/// 接收者 token 的只读存储
#[async_trait]
pub trait UserTokenStore: Send + Sync {
    /// 按用户 id 点查 FCM token。用户不存在、字段缺失或为空串时返回 None。
    async fn fcm_token(&self, user_id: &str) -> Result<Option<String>>;
}

/// 推送发送器
#[async_trait]
pub trait PushSender: Send + Sync {
    /// 发送一条推送，返回提供方的不透明响应标识
    async fn send(&self, payload: &NotificationPayload) -> Result<String>;
}
