//! 通知分发服务配置模块

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

/// 应用配置文件结构（TOML）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub mongodb: MongoSection,
    #[serde(default)]
    pub fcm: FcmSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MongoSection {
    pub url: Option<String>,
    pub database: Option<String>,
    pub message_collection: Option<String>,
    pub user_collection: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FcmSection {
    pub endpoint: Option<String>,
    pub project_id: Option<String>,
    pub access_token: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// 加载应用配置，路径不存在或解析失败时回退到默认值
pub fn load_app_config(path: Option<&str>) -> AppConfig {
    let candidates: Vec<&str> = match path {
        Some(p) => vec![p],
        None => vec!["config/notify-dispatcher.toml", "config.toml"],
    };

    for candidate in candidates {
        let path = Path::new(candidate);
        if !path.exists() {
            continue;
        }
        match fs::read_to_string(path) {
            Ok(raw) => match toml::from_str::<AppConfig>(&raw) {
                Ok(cfg) => return cfg,
                Err(err) => warn!("failed to parse config {}: {err}", path.display()),
            },
            Err(err) => warn!("failed to read config {}: {err}", path.display()),
        }
    }

    warn!("no configuration source succeeded, falling back to defaults");
    AppConfig::default()
}

/// 分发服务运行配置。环境变量优先于配置文件。
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    pub mongo_url: String,
    pub mongo_database: String,
    pub message_collection: String,
    pub user_collection: String,
    pub fcm_endpoint: String,
    pub fcm_project_id: Option<String>,
    pub fcm_access_token: Option<String>,
    pub fcm_timeout_secs: u64,
}

impl DispatcherConfig {
    pub fn from_app_config(app: &AppConfig) -> Self {
        let mongo_url = env::var("NOTIFY_MONGO_URL")
            .ok()
            .or_else(|| app.mongodb.url.clone())
            .unwrap_or_else(|| "mongodb://127.0.0.1:27017".to_string());

        let mongo_database = env::var("NOTIFY_MONGO_DATABASE")
            .ok()
            .or_else(|| app.mongodb.database.clone())
            .unwrap_or_else(|| "chat".to_string());

        let message_collection = env::var("NOTIFY_MESSAGE_COLLECTION")
            .ok()
            .or_else(|| app.mongodb.message_collection.clone())
            .unwrap_or_else(|| "messages".to_string());

        let user_collection = env::var("NOTIFY_USER_COLLECTION")
            .ok()
            .or_else(|| app.mongodb.user_collection.clone())
            .unwrap_or_else(|| "users".to_string());

        let fcm_endpoint = env::var("NOTIFY_FCM_ENDPOINT")
            .ok()
            .or_else(|| app.fcm.endpoint.clone())
            .unwrap_or_else(|| "https://fcm.googleapis.com".to_string());

        let fcm_project_id = env::var("NOTIFY_FCM_PROJECT_ID")
            .ok()
            .or_else(|| app.fcm.project_id.clone());

        // 凭证由宿主环境注入，token 的签发与刷新不在本服务范围内
        let fcm_access_token = env::var("FCM_ACCESS_TOKEN")
            .ok()
            .or_else(|| app.fcm.access_token.clone());

        let fcm_timeout_secs = env::var("NOTIFY_FCM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .or(app.fcm.timeout_secs)
            .unwrap_or(30);

        Self {
            mongo_url,
            mongo_database,
            message_collection,
            user_collection,
            fcm_endpoint,
            fcm_project_id,
            fcm_access_token,
            fcm_timeout_secs,
        }
    }
}
