//! Business logic services

pub mod authors;
pub mod barcode;
pub mod books;
pub mod locations;
pub mod publishers;
pub mod users;
pub mod works;

use std::sync::Arc;

use crate::{
    config::AppConfig,
    error::AppResult,
    models::barcode::{BarcodeCategory, BarcodeSequence},
    repository::{sequences::SequencesRepository, Repository},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub barcode: barcode::BarcodeService,
    pub books: books::BookService,
    pub locations: locations::LocationService,
    pub works: works::WorksService,
    pub authors: authors::AuthorsService,
    pub publishers: publishers::PublishersService,
    pub users: users::UsersService,
    sequences: SequencesRepository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        let barcode = barcode::BarcodeService::new(
            Arc::new(repository.sequences.clone()),
            config.barcode.clone(),
        );

        Self {
            books: books::BookService::new(repository.clone(), barcode.clone()),
            locations: locations::LocationService::new(repository.clone(), barcode.clone()),
            works: works::WorksService::new(repository.clone()),
            authors: authors::AuthorsService::new(repository.clone()),
            publishers: publishers::PublishersService::new(repository.clone()),
            sequences: repository.sequences.clone(),
            users: users::UsersService::new(repository, config.auth.clone()),
            barcode,
        }
    }

    /// Administrative view of a counter row, without consuming a value.
    pub async fn barcode_sequence(&self, category: BarcodeCategory) -> AppResult<BarcodeSequence> {
        self.sequences.get(category).await
    }
}
