//! 消息创建事件的变更流运行时
//!
//! 订阅消息集合的 insert 事件，每个事件触发一次分发调用。
//! 事件在循环内顺序处理：上一次分发等待完成后才读取下一个事件。

use std::sync::Arc;

use futures::StreamExt;
use mongodb::Collection;
use mongodb::bson::{Bson, Document, doc};
use mongodb::change_stream::event::OperationType;
use tracing::{debug, info};

use crate::application::{DispatchCommandHandler, DispatchMessageCommand};
use crate::domain::models::MessageSnapshot;
use crate::error::{DispatchError, Result};

pub struct MessageCreatedListener {
    collection: Collection<Document>,
    command_handler: Arc<DispatchCommandHandler>,
}

impl MessageCreatedListener {
    pub fn new(
        collection: Collection<Document>,
        command_handler: Arc<DispatchCommandHandler>,
    ) -> Self {
        Self {
            collection,
            command_handler,
        }
    }

    /// 运行监听循环。分发级的分支不会中断循环，变更流错误会向上传播，
    /// 由宿主的进程管理负责重启。
    pub async fn run(&self) -> Result<()> {
        let pipeline = vec![doc! {"$match": {"operationType": "insert"}}];
        let mut stream = self
            .collection
            .watch(pipeline, None::<mongodb::options::ChangeStreamOptions>)
            .await
            .map_err(|e| DispatchError::Stream(e.to_string()))?;

        info!(collection = %self.collection.name(), "listening for created messages");

        while let Some(event) = stream.next().await {
            let event = event.map_err(|e| DispatchError::Stream(e.to_string()))?;
            if !matches!(event.operation_type, OperationType::Insert) {
                continue;
            }

            let message_id = event
                .document_key
                .as_ref()
                .map(document_id)
                .unwrap_or_default();
            info!(message_id = %message_id, "new message created");

            let snapshot = event.full_document.as_ref().and_then(snapshot_from_document);
            let outcome = self
                .command_handler
                .handle_dispatch_message(DispatchMessageCommand {
                    snapshot,
                    message_id,
                })
                .await;
            debug!(?outcome, "dispatch completed");
        }

        Ok(())
    }
}

/// 从变更事件的 document key 提取文档标识
fn document_id(key: &Document) -> String {
    match key.get("_id") {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// 把新建文档转成字段快照，空文档视为无快照
fn snapshot_from_document(document: &Document) -> Option<MessageSnapshot> {
    if document.is_empty() {
        return None;
    }

    Some(MessageSnapshot {
        sender_id: field(document, "senderId"),
        sender_name: field(document, "senderName"),
        receiver_id: field(document, "receiverId"),
        content: field(document, "content"),
    })
}

fn field(document: &Document, key: &str) -> Option<String> {
    document.get_str(key).ok().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use mongodb::bson::oid::ObjectId;

    use super::*;

    #[test]
    fn test_document_id_renders_object_id_as_hex() {
        let oid = ObjectId::new();
        let key = doc! {"_id": oid};
        assert_eq!(document_id(&key), oid.to_hex());
    }

    #[test]
    fn test_document_id_keeps_string_keys() {
        let key = doc! {"_id": "m1"};
        assert_eq!(document_id(&key), "m1");
    }

    #[test]
    fn test_empty_document_has_no_snapshot() {
        assert_eq!(snapshot_from_document(&doc! {}), None);
    }

    #[test]
    fn test_snapshot_extracts_known_fields() {
        let document = doc! {
            "senderId": "u1",
            "senderName": "Alice",
            "receiverId": "u2",
            "content": "hi",
            "createdAt": 1720000000_i64,
        };
        let snapshot = snapshot_from_document(&document).unwrap();
        assert_eq!(snapshot.sender_id.as_deref(), Some("u1"));
        assert_eq!(snapshot.sender_name.as_deref(), Some("Alice"));
        assert_eq!(snapshot.receiver_id.as_deref(), Some("u2"));
        assert_eq!(snapshot.content.as_deref(), Some("hi"));
    }

    #[test]
    fn test_snapshot_tolerates_missing_fields() {
        let document = doc! {"senderId": "u1"};
        let snapshot = snapshot_from_document(&document).unwrap();
        assert!(snapshot.receiver_id.is_none());
        assert!(snapshot.content.is_none());
    }
}
