//! 通知分发领域模型

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// senderName 缺失或为空串时替换的默认展示名
pub const DEFAULT_SENDER_NAME: &str = "Someone";

/// 客户端路由标记，接收端据此决定点击通知后的跳转
pub const CLICK_ACTION: &str = "FLUTTER_NOTIFICATION_CLICK";

/// 新建消息文档的字段快照
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageSnapshot {
    pub sender_id: Option<String>,
    pub sender_name: Option<String>,
    pub receiver_id: Option<String>,
    pub content: Option<String>,
}

impl MessageSnapshot {
    /// 解析发送者展示名：缺失和空串一律替换为 [`DEFAULT_SENDER_NAME`]
    pub fn resolved_sender_name(&self) -> &str {
        self.sender_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_SENDER_NAME)
    }
}

/// 推送通知的用户可见部分
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PushNotification {
    pub title: String,
    pub body: String,
}

/// 单次调用内构造的推送载荷，发送后即丢弃，不做持久化
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationPayload {
    pub token: String,
    pub notification: PushNotification,
    #[serde(default)]
    pub data: HashMap<String, String>,
}

impl NotificationPayload {
    /// 为一条新建消息构造推送载荷。调用方必须已解析出非空 token。
    pub fn for_message(token: String, snapshot: &MessageSnapshot, message_id: &str) -> Self {
        let mut data = HashMap::new();
        data.insert(
            "senderId".to_string(),
            snapshot.sender_id.clone().unwrap_or_default(),
        );
        data.insert(
            "receiverId".to_string(),
            snapshot.receiver_id.clone().unwrap_or_default(),
        );
        data.insert("messageId".to_string(), message_id.to_string());
        data.insert("click_action".to_string(), CLICK_ACTION.to_string());

        Self {
            token,
            notification: PushNotification {
                title: snapshot.resolved_sender_name().to_string(),
                body: snapshot.content.clone().unwrap_or_default(),
            },
            data,
        }
    }
}

/// 单次分发的终态。仅用于日志与测试观测，调用方不依赖返回值。
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// 触发快照为空，未执行任何外部调用
    SkippedEmptySnapshot,
    /// 快照缺少必需字段
    SkippedMissingFields,
    /// 接收者没有可用的 FCM token
    SkippedNoToken,
    /// 推送成功，携带提供方响应标识
    Sent(String),
    /// 查询或发送失败，错误已记录且不再传播
    Failed(String),
}
