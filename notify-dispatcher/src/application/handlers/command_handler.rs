//! 命令处理器（编排层）- 轻量级，只负责编排领域服务

use std::sync::Arc;

use tracing::instrument;

use crate::application::commands::DispatchMessageCommand;
use crate::domain::models::DispatchOutcome;
use crate::domain::service::NotificationDispatchService;

/// 分发命令处理器（编排层）
pub struct DispatchCommandHandler {
    domain_service: Arc<NotificationDispatchService>,
}

impl DispatchCommandHandler {
    pub fn new(domain_service: Arc<NotificationDispatchService>) -> Self {
        Self { domain_service }
    }

    /// 处理消息分发命令
    #[instrument(skip(self, command), fields(message_id = %command.message_id))]
    pub async fn handle_dispatch_message(
        &self,
        command: DispatchMessageCommand,
    ) -> DispatchOutcome {
        self.domain_service
            .dispatch(command.snapshot, &command.message_id)
            .await
    }
}
