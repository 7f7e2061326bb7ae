//! 应用层命令定义

use crate::domain::models::MessageSnapshot;

/// 分发一条新建消息的命令
#[derive(Debug)]
pub struct DispatchMessageCommand {
    /// 触发事件携带的字段快照，空快照为 None
    pub snapshot: Option<MessageSnapshot>,
    /// 触发事件携带的文档标识
    pub message_id: String,
}
