pub mod handlers;
pub mod models;
pub mod schema;
pub mod store;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use service_core::db::{create_pool, DbPool};
pub use store::UserStore;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending migrations against the pool's database, creating the
/// users table on first start.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_users,
        handlers::create_user,
        handlers::get_user,
        handlers::update_user,
        handlers::delete_user,
    ),
    components(schemas(handlers::UserPayload, handlers::UserResponse)),
    tags((name = "users", description = "User management endpoints"))
)]
struct ApiDoc;

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    store: UserStore,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(store.clone()))
            .app_data(service_core::http::json_error_config())
            .wrap(Logger::default())
            .route("/", web::get().to(handlers::root))
            .service(
                web::scope("/users")
                    .route("", web::get().to(handlers::list_users))
                    .route("", web::post().to(handlers::create_user))
                    .route("/{id}", web::get().to(handlers::get_user))
                    .route("/{id}", web::put().to(handlers::update_user))
                    .route("/{id}", web::delete().to(handlers::delete_user)),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
