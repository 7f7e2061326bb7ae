//! 服务装配：配置 → 客户端句柄 → 存储/发送器 → 领域服务 → 监听器
//!
//! 平台 SDK 的隐式全局初始化在这里变成显式的启动步骤，
//! 长生命周期的客户端句柄构建一次后传入各层。

use std::sync::Arc;

use mongodb::Client;
use mongodb::options::ClientOptions;
use tracing::{info, warn};

use crate::application::DispatchCommandHandler;
use crate::config::DispatcherConfig;
use crate::domain::repositories::{PushSender, UserTokenStore};
use crate::domain::service::NotificationDispatchService;
use crate::error::Result;
use crate::infrastructure::messaging::{FcmPushSender, NoopPushSender};
use crate::infrastructure::persistence::MongoUserStore;
use crate::interface::runtime::MessageCreatedListener;

pub struct DispatcherServer {
    listener: Arc<MessageCreatedListener>,
}

impl DispatcherServer {
    pub async fn new(
        config: DispatcherConfig,
        user_store: Option<Arc<dyn UserTokenStore>>,
        push_sender: Option<Arc<dyn PushSender>>,
    ) -> Result<Self> {
        let config = Arc::new(config);

        let options = ClientOptions::parse(&config.mongo_url).await?;
        let client = Client::with_options(options)?;
        let database = client.database(&config.mongo_database);

        let user_store = user_store.unwrap_or_else(|| {
            Arc::new(MongoUserStore::new(&database, &config.user_collection))
                as Arc<dyn UserTokenStore>
        });
        let push_sender = match push_sender {
            Some(sender) => sender,
            None => build_push_sender(&config)?,
        };

        let domain_service = Arc::new(NotificationDispatchService::new(user_store, push_sender));
        let command_handler = Arc::new(DispatchCommandHandler::new(domain_service));
        let listener = Arc::new(MessageCreatedListener::new(
            database.collection(&config.message_collection),
            command_handler,
        ));

        info!(
            database = %config.mongo_database,
            collection = %config.message_collection,
            "Notify Dispatcher initialized"
        );

        Ok(Self { listener })
    }

    pub async fn run(&self) -> Result<()> {
        self.listener.run().await
    }
}

fn build_push_sender(config: &DispatcherConfig) -> Result<Arc<dyn PushSender>> {
    match (&config.fcm_project_id, &config.fcm_access_token) {
        (Some(project_id), Some(access_token)) => Ok(Arc::new(FcmPushSender::new(
            &config.fcm_endpoint,
            project_id,
            access_token.clone(),
            config.fcm_timeout_secs,
        )?) as Arc<dyn PushSender>),
        _ => {
            warn!("no FCM credentials configured, falling back to noop push sender");
            Ok(NoopPushSender::shared() as Arc<dyn PushSender>)
        }
    }
}
