//! 聊天消息推送通知分发服务
//!
//! 监听消息集合的新建文档，查询接收者的 FCM token，并发送一条推送通知。
//! 投递采用尽力而为策略：通知失败不会影响消息本身的写入。

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interface;
pub mod server;
