use sea_orm::DatabaseConnection;

use super::{BookingDao, DaoBase, MovieDao, SeatDao, UserDao};

#[derive(Clone)]
pub struct DaoContext {
    db: DatabaseConnection,
}

impl DaoContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn movie(&self) -> MovieDao {
        DaoBase::new(&self.db)
    }

    pub fn seat(&self) -> SeatDao {
        DaoBase::new(&self.db)
    }

    pub fn booking(&self) -> BookingDao {
        DaoBase::new(&self.db)
    }

    pub fn user(&self) -> UserDao {
        DaoBase::new(&self.db)
    }
}
