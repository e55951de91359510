use uuid::Uuid;

use crate::{
    auth::GuestIdentity,
    db::dao::{DaoBase, DaoLayerError, UserDao},
    db::entities::user,
    error::AppError,
};

#[derive(Clone)]
pub struct UserService {
    user_dao: UserDao,
}

impl UserService {
    pub fn new(user_dao: UserDao) -> Self {
        Self { user_dao }
    }

    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<user::Model>, AppError> {
        match self.user_dao.find_by_id(*id).await {
            Ok(model) => Ok(Some(model)),
            Err(DaoLayerError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, AppError> {
        Ok(self.user_dao.find_by_username(username).await?)
    }

    /// The guest account, created the first time anyone books without signing in.
    pub async fn guest(&self, guest: &GuestIdentity) -> Result<user::Model, AppError> {
        let user = self.user_dao.get_or_create(guest.username()).await?;
        tracing::debug!(user_id = %user.id, username = %user.username, "resolved guest user");
        Ok(user)
    }

    /// The authenticated user when there is one, otherwise the guest account.
    pub async fn acting_user(
        &self,
        current: Option<&user::Model>,
        guest: &GuestIdentity,
    ) -> Result<user::Model, AppError> {
        match current {
            Some(user) => Ok(user.clone()),
            None => self.guest(guest).await,
        }
    }
}
