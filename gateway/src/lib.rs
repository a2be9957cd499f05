pub mod catalog;
pub mod errors;
pub mod pages;
pub mod registry;
pub mod upstream;

use actix_web::{middleware::Logger, web, App, HttpServer};

pub use registry::ServiceRegistry;
pub use upstream::Upstream;

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// Route order matters: the fixed-path patterns (`create`, `edit`,
/// `delete`) are registered before the bare `/{service}/{id}` detail
/// route so they are matched first.
pub fn build_server(
    registry: ServiceRegistry,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let upstream = web::Data::new(Upstream::new(registry));

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(upstream.clone())
            .wrap(Logger::default())
            .route("/", web::get().to(pages::home))
            .route("/{service}/", web::get().to(pages::list_page))
            .route("/{service}/create", web::get().to(pages::create_form))
            .route("/{service}/create", web::post().to(pages::create_submit))
            .route("/{service}/edit/{id}", web::get().to(pages::edit_form))
            .route("/{service}/edit/{id}", web::post().to(pages::edit_submit))
            .route("/{service}/delete/{id}", web::get().to(pages::delete_item))
            .route("/{service}/{id}", web::get().to(pages::detail_page))
    })
    .bind((host.to_string(), port))?
    .run())
}
