pub mod enrichment;
pub mod handlers;
pub mod models;
pub mod schema;
pub mod store;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use enrichment::PeerDirectory;
pub use service_core::db::{create_pool, DbPool};
pub use store::OrderStore;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending migrations against the pool's database, creating the
/// orders table on first start.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_orders,
        handlers::create_order,
        handlers::get_order,
        handlers::update_order,
        handlers::delete_order,
    ),
    components(schemas(handlers::OrderPayload, handlers::OrderResponse)),
    tags((name = "orders", description = "Order management endpoints"))
)]
struct ApiDoc;

/// Build and return an actix-web `Server` bound to `host:port`.
pub fn build_server(
    store: OrderStore,
    peers: PeerDirectory,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(peers.clone()))
            .app_data(service_core::http::json_error_config())
            .wrap(Logger::default())
            .route("/", web::get().to(handlers::root))
            .service(
                web::scope("/orders")
                    .route("", web::get().to(handlers::list_orders))
                    .route("", web::post().to(handlers::create_order))
                    .route("/{id}", web::get().to(handlers::get_order))
                    .route("/{id}", web::put().to(handlers::update_order))
                    .route("/{id}", web::delete().to(handlers::delete_order)),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
