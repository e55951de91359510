use chrono::Utc;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, FromQueryResult, IntoActiveModel, Iterable, ModelTrait,
    Order, PrimaryKeyToColumn, PrimaryKeyTrait, QueryOrder, Select, SqliteTransactionMode,
    TransactionOptions, TransactionTrait,
};
use uuid::Uuid;

use super::base_traits::{HasCreatedAtColumn, HasIdActiveModel, TimestampedActiveModel};
use super::error::{DaoLayerError, DaoResult};

#[async_trait::async_trait]
pub trait DaoBase: Clone + Send + Sync + Sized {
    type Entity: EntityTrait<
            Model = Self::Model,
            ActiveModel = Self::ActiveModel,
            Column = Self::Column,
            PrimaryKey: PrimaryKeyTrait<ValueType = Uuid>,
        > + HasCreatedAtColumn
        + Send
        + Sync;
    type Model: ModelTrait<Entity = Self::Entity>
        + FromQueryResult
        + IntoActiveModel<Self::ActiveModel>
        + Send
        + Sync;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity>
        + ActiveModelBehavior
        + HasIdActiveModel
        + TimestampedActiveModel
        + Send;
    type Column: ColumnTrait + Copy + Send + Sync;

    /// Short name used in not-found messages.
    const ENTITY_NAME: &'static str;

    fn new(db: &DatabaseConnection) -> Self;

    fn db(&self) -> &DatabaseConnection;

    fn not_found(id: Uuid) -> DaoLayerError {
        DaoLayerError::NotFound {
            entity: Self::ENTITY_NAME,
            id,
        }
    }

    async fn create(&self, data: Self::ActiveModel) -> DaoResult<Self::Model> {
        self.create_with(self.db(), data).await
    }

    /// Inserts through `conn`, which may be an open transaction.
    async fn create_with<C>(&self, conn: &C, data: Self::ActiveModel) -> DaoResult<Self::Model>
    where
        C: ConnectionTrait + Sync,
    {
        let now = Utc::now().fixed_offset();
        let mut active = data;
        active.set_id(Uuid::new_v4());
        active.set_created_at(now);
        active.set_updated_at(now);
        Ok(active.insert(conn).await?)
    }

    async fn find_by_id(&self, id: Uuid) -> DaoResult<Self::Model> {
        self.find_by_id_with(self.db(), id).await
    }

    async fn find_by_id_with<C>(&self, conn: &C, id: Uuid) -> DaoResult<Self::Model>
    where
        C: ConnectionTrait + Sync,
    {
        Self::Entity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    /// Every matching record in one query.
    ///
    /// Sorted by `order` (default: newest first) with the primary key breaking ties, so
    /// equal sort keys always come back in the same order.
    async fn find_all(
        &self,
        order: Option<(Self::Column, Order)>,
        apply: impl FnOnce(Select<Self::Entity>) -> Select<Self::Entity> + Send,
    ) -> DaoResult<Vec<Self::Model>> {
        let ordered = match order {
            Some((column, order)) => apply(Self::Entity::find()).order_by(column, order),
            None => apply(Self::Entity::find()).order_by_desc(Self::Entity::created_at_column()),
        };
        let ordered = <Self::Entity as EntityTrait>::PrimaryKey::iter()
            .fold(ordered, |query, key| query.order_by_asc(key.into_column()));
        Ok(ordered.all(self.db()).await?)
    }

    /// Opens a transaction for a read-then-write sequence.
    ///
    /// On SQLite this is `BEGIN IMMEDIATE`: the write lock is taken up front and waits on
    /// `busy_timeout`, instead of a deferred read lock that fails with SQLITE_BUSY when it
    /// cannot be upgraded. Other backends ignore the mode.
    async fn begin_write(&self) -> DaoResult<DatabaseTransaction> {
        let options = TransactionOptions {
            sqlite_transaction_mode: Some(SqliteTransactionMode::Immediate),
            ..TransactionOptions::default()
        };
        Ok(self.db().begin_with_options(options).await?)
    }

    async fn update<F>(&self, id: Uuid, apply: F) -> DaoResult<Self::Model>
    where
        F: for<'a> FnOnce(&'a mut Self::ActiveModel) + Send,
    {
        self.update_with(self.db(), id, apply).await
    }

    async fn update_with<C, F>(&self, conn: &C, id: Uuid, apply: F) -> DaoResult<Self::Model>
    where
        C: ConnectionTrait + Sync,
        F: for<'a> FnOnce(&'a mut Self::ActiveModel) + Send,
    {
        let model = self.find_by_id_with(conn, id).await?;

        let mut active = model.into_active_model();
        apply(&mut active);
        active.set_updated_at(Utc::now().fixed_offset());

        Ok(active.update(conn).await?)
    }

    async fn delete(&self, id: Uuid) -> DaoResult<Uuid> {
        self.delete_with(self.db(), id).await
    }

    async fn delete_with<C>(&self, conn: &C, id: Uuid) -> DaoResult<Uuid>
    where
        C: ConnectionTrait + Sync,
    {
        let result = Self::Entity::delete_by_id(id).exec(conn).await?;

        if result.rows_affected == 0 {
            return Err(Self::not_found(id));
        }

        Ok(id)
    }
}
