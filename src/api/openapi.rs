//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, authors, books, health, locations, publishers, sequences, users, works};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Biblion API",
        version = "1.0.0",
        description = "Library catalog server REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::me,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::scan,
        // Locations
        locations::get_location,
        locations::list_by_type,
        locations::list_children,
        locations::get_by_barcode,
        locations::create_location,
        locations::update_location,
        locations::delete_location,
        // Works
        works::list_works,
        works::get_work,
        works::create_work,
        works::update_work,
        works::delete_work,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Publishers
        publishers::list_publishers,
        publishers::get_publisher,
        publishers::create_publisher,
        publishers::update_publisher,
        publishers::delete_publisher,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Sequences
        sequences::get_sequence,
        sequences::set_prefix,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            // Books
            crate::models::book::Book,
            crate::models::book::BookDetails,
            crate::models::book::BookQuery,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::book::WorkRef,
            crate::models::book::PublisherRef,
            crate::models::book::LocationPath,
            // Locations
            crate::models::location::Location,
            crate::models::location::LocationType,
            crate::models::location::CreateLocation,
            crate::models::location::UpdateLocation,
            // Works
            crate::models::work::Work,
            crate::models::work::CreateWork,
            crate::models::work::UpdateWork,
            // Authors
            crate::models::author::Author,
            crate::models::author::CreateAuthor,
            crate::models::author::UpdateAuthor,
            // Publishers
            crate::models::publisher::Publisher,
            crate::models::publisher::CreatePublisher,
            crate::models::publisher::UpdatePublisher,
            // Users
            crate::models::user::User,
            crate::models::user::Role,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            // Sequences
            crate::models::barcode::BarcodeCategory,
            crate::models::barcode::BarcodeSequence,
            crate::models::barcode::SetPrefixRequest,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "books", description = "Catalog books and barcode scanning"),
        (name = "locations", description = "Storage location hierarchy"),
        (name = "works", description = "Bibliographic works"),
        (name = "authors", description = "Author reference data"),
        (name = "publishers", description = "Publisher reference data"),
        (name = "users", description = "Staff account management"),
        (name = "sequences", description = "Barcode sequence administration")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
