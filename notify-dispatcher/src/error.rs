//! 统一异常处理模块

use thiserror::Error;

/// 通知分发服务错误类型
#[derive(Debug, Error)]
pub enum DispatchError {
    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(String),

    /// 存储访问错误
    #[error("Storage error: {0}")]
    Storage(String),

    /// 变更流错误
    #[error("Change stream error: {0}")]
    Stream(String),

    /// 推送投递错误
    #[error("Push delivery error: {message}")]
    PushDelivery {
        message: String,
        /// 提供方返回的结构化错误详情（若有）
        detail: Option<String>,
    },
}

impl DispatchError {
    /// 推送提供方附带的错误详情
    pub fn detail(&self) -> Option<&str> {
        match self {
            DispatchError::PushDelivery { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

impl From<mongodb::error::Error> for DispatchError {
    fn from(err: mongodb::error::Error) -> Self {
        DispatchError::Storage(err.to_string())
    }
}

impl From<reqwest::Error> for DispatchError {
    fn from(err: reqwest::Error) -> Self {
        DispatchError::PushDelivery {
            message: err.to_string(),
            detail: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DispatchError>;
