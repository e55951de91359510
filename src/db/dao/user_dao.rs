use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::{DaoBase, DaoLayerError, DaoResult};
use crate::db::entities::prelude::User;
use crate::db::entities::user;

#[derive(Clone)]
pub struct UserDao {
    db: DatabaseConnection,
}

impl DaoBase for UserDao {
    type Entity = User;
    type Model = user::Model;
    type ActiveModel = user::ActiveModel;
    type Column = user::Column;

    const ENTITY_NAME: &'static str = "user";

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl UserDao {
    pub async fn find_by_username(&self, username: &str) -> DaoResult<Option<user::Model>> {
        Ok(User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?)
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> DaoResult<Vec<user::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(User::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?)
    }

    pub async fn create_user(&self, username: &str) -> DaoResult<user::Model> {
        let model = user::ActiveModel {
            username: Set(username.to_string()),
            ..Default::default()
        };
        self.create(model).await
    }

    /// Returns the user named `username`, creating it on first use.
    ///
    /// A concurrent creator winning the unique key is treated as a lookup.
    pub async fn get_or_create(&self, username: &str) -> DaoResult<user::Model> {
        if let Some(user) = self.find_by_username(username).await? {
            return Ok(user);
        }

        match self.create_user(username).await {
            Ok(user) => Ok(user),
            Err(DaoLayerError::Duplicate(detail)) => self
                .find_by_username(username)
                .await?
                .ok_or(DaoLayerError::Duplicate(detail)),
            Err(err) => Err(err),
        }
    }
}
