//! OpenAPI documentation configuration

use utoipa::OpenApi;

use crate::api;

/// Combined OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Products REST API",
        version = "0.1.0",
        description = "CRUD API for a product catalogue backed by PostgreSQL"
    ),
    servers(
        (url = "http://localhost:4000", description = "Local development server")
    ),
    paths(api::welcome),
    components(schemas(api::WelcomeResponse)),
    nest(
        (path = "/api/products", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Product catalogue endpoints"),
        (name = "General", description = "Service information")
    )
)]
pub struct ApiDoc;
