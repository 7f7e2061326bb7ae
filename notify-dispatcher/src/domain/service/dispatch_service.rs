//! 通知分发领域服务 - 包含完整的分发业务逻辑

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::domain::models::{DispatchOutcome, MessageSnapshot, NotificationPayload};
use crate::domain::repositories::{PushSender, UserTokenStore};

/// 通知分发领域服务
///
/// 每条新建消息触发一次 [`dispatch`](Self::dispatch) 调用：查接收者 token，
/// 构造载荷并发送。查询失败与发送失败都在此处被记录并吞掉，
/// 通知失败绝不能让触发方失败。
pub struct NotificationDispatchService {
    user_store: Arc<dyn UserTokenStore>,
    push_sender: Arc<dyn PushSender>,
}

impl NotificationDispatchService {
    pub fn new(user_store: Arc<dyn UserTokenStore>, push_sender: Arc<dyn PushSender>) -> Self {
        Self {
            user_store,
            push_sender,
        }
    }

    /// 执行单次分发。严格顺序：查 token → 构造载荷 → 发送，发送在本次调用内等待完成。
    ///
    /// 所有分支都是终态，没有重试边。重复触发同一 message_id 会重复发送，
    /// 不做去重。
    #[instrument(skip(self, snapshot), fields(message_id = %message_id))]
    pub async fn dispatch(
        &self,
        snapshot: Option<MessageSnapshot>,
        message_id: &str,
    ) -> DispatchOutcome {
        let Some(snapshot) = snapshot else {
            info!("empty message snapshot, nothing to dispatch");
            return DispatchOutcome::SkippedEmptySnapshot;
        };

        let (Some(receiver_id), Some(_)) = (
            snapshot.receiver_id.as_deref(),
            snapshot.content.as_deref(),
        ) else {
            warn!("message snapshot missing receiverId or content");
            return DispatchOutcome::SkippedMissingFields;
        };

        // 单次点查，不重试
        let token = match self.user_store.fcm_token(receiver_id).await {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => {
                warn!(receiver_id, "no fcm token for receiver");
                return DispatchOutcome::SkippedNoToken;
            }
            Err(err) => {
                error!(receiver_id, error = %err, "failed to load receiver record");
                return DispatchOutcome::Failed(err.to_string());
            }
        };

        let payload = NotificationPayload::for_message(token, &snapshot, message_id);

        match self.push_sender.send(&payload).await {
            Ok(response_id) => {
                info!(receiver_id, response = %response_id, "notification sent");
                DispatchOutcome::Sent(response_id)
            }
            Err(err) => {
                error!(error = %err, "failed to send notification");
                if let Some(detail) = err.detail() {
                    error!(detail, "push provider error detail");
                }
                DispatchOutcome::Failed(err.to_string())
            }
        }
    }
}
