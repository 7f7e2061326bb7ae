//! 用户集合的 MongoDB 点查适配器

use async_trait::async_trait;
use mongodb::bson::{Document, doc};
use mongodb::{Collection, Database};

use crate::domain::repositories::UserTokenStore;
use crate::error::Result;

pub struct MongoUserStore {
    collection: Collection<Document>,
}

impl MongoUserStore {
    pub fn new(database: &Database, collection_name: &str) -> Self {
        Self {
            collection: database.collection::<Document>(collection_name),
        }
    }
}

#[async_trait]
impl UserTokenStore for MongoUserStore {
    async fn fcm_token(&self, user_id: &str) -> Result<Option<String>> {
        let filter = doc! {"_id": user_id};
        let document = self
            .collection
            .find_one(filter, None::<mongodb::options::FindOneOptions>)
            .await?;

        // 文档缺失、字段缺失、空串统一视为无 token
        let token = document
            .and_then(|doc| doc.get_str("fcmToken").ok().map(str::to_string))
            .filter(|token| !token.is_empty());

        Ok(token)
    }
}
