//! Repository layer for database operations

pub mod authors;
pub mod books;
pub mod locations;
pub mod publishers;
pub mod sequences;
pub mod users;
pub mod works;

use sqlx::{Pool, Postgres};

/// Maps Postgres constraint violations to domain errors. `unique` handles
/// barcode collisions (23505), `foreign_key` a parent row that vanished
/// between validation and insert (23503).
pub(crate) fn constraint_code(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db) => db.code().map(|c| match c.as_ref() {
            "23505" => "unique",
            "23503" => "foreign_key",
            _ => "other",
        }),
        _ => None,
    }
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub sequences: sequences::SequencesRepository,
    pub locations: locations::LocationsRepository,
    pub books: books::BooksRepository,
    pub works: works::WorksRepository,
    pub authors: authors::AuthorsRepository,
    pub publishers: publishers::PublishersRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            sequences: sequences::SequencesRepository::new(pool.clone()),
            locations: locations::LocationsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            works: works::WorksRepository::new(pool.clone()),
            authors: authors::AuthorsRepository::new(pool.clone()),
            publishers: publishers::PublishersRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }
}
