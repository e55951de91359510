use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter};
use uuid::Uuid;

use super::{DaoBase, DaoResult};
use crate::db::entities::prelude::{Booking, Movie};
use crate::db::entities::{booking, movie};

#[derive(Clone)]
pub struct MovieDao {
    db: DatabaseConnection,
}

impl DaoBase for MovieDao {
    type Entity = Movie;
    type Model = movie::Model;
    type ActiveModel = movie::ActiveModel;
    type Column = movie::Column;

    const ENTITY_NAME: &'static str = "movie";

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl MovieDao {
    pub async fn list_by_title(&self) -> DaoResult<Vec<movie::Model>> {
        self.find_all(Some((movie::Column::Title, Order::Asc)), |query| query)
            .await
    }

    /// Removes the movie and every booking made for it in one transaction.
    ///
    /// Returns the deleted movie together with the number of bookings removed.
    pub async fn delete_with_bookings(&self, id: &Uuid) -> DaoResult<(movie::Model, u64)> {
        let txn = self.begin_write().await?;

        let movie = self.find_by_id_with(&txn, *id).await?;
        let bookings = Booking::delete_many()
            .filter(booking::Column::MovieId.eq(*id))
            .exec(&txn)
            .await?
            .rows_affected;
        self.delete_with(&txn, *id).await?;

        txn.commit().await?;
        Ok((movie, bookings))
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> DaoResult<Vec<movie::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(Movie::find()
            .filter(movie::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate, TimeZone};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use uuid::Uuid;

    use super::MovieDao;
    use crate::db::dao::{DaoBase, DaoLayerError};
    use crate::db::entities::movie;

    fn ts() -> chrono::DateTime<chrono::FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp should be valid")
    }

    fn movie_model(id: Uuid, title: &str) -> movie::Model {
        let now = ts();
        movie::Model {
            id,
            created_at: now,
            updated_at: now,
            title: title.to_string(),
            description: "description".to_string(),
            release_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("date should be valid"),
            duration: 120,
            showtime: None,
        }
    }

    #[tokio::test]
    async fn delete_with_bookings_reports_removed_booking_count() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[movie_model(id, "Alien")]])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 3,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();
        let dao = MovieDao::new(&db);

        let (movie, removed) = dao
            .delete_with_bookings(&id)
            .await
            .expect("delete should succeed");
        assert_eq!(movie.title, "Alien");
        assert_eq!(removed, 3);
    }

    #[tokio::test]
    async fn delete_with_bookings_propagates_not_found() {
        let missing = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<movie::Model>::new()])
            .into_connection();
        let dao = MovieDao::new(&db);

        let err = dao
            .delete_with_bookings(&missing)
            .await
            .expect_err("missing movie should fail");
        assert!(matches!(
            err,
            DaoLayerError::NotFound { entity: "movie", id } if id == missing
        ));
    }

    #[tokio::test]
    async fn list_by_title_reads_everything_in_one_ordered_query() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[
                movie_model(Uuid::new_v4(), "Alien"),
                movie_model(Uuid::new_v4(), "Brazil"),
            ]])
            .into_connection();
        let dao = MovieDao::new(&db);

        let movies = dao.list_by_title().await.expect("list should succeed");
        let titles: Vec<_> = movies.iter().map(|movie| movie.title.as_str()).collect();
        assert_eq!(titles, ["Alien", "Brazil"]);

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let sql = &log[0].statements()[0].sql;
        assert!(
            sql.ends_with(r#"ORDER BY "movies"."title" ASC, "movies"."id" ASC"#),
            "{sql}"
        );
        assert!(!sql.contains("LIMIT"), "{sql}");
    }
}
