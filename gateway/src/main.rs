use dotenvy::dotenv;
use gateway::{build_server, ServiceRegistry};
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse()
        .expect("PORT must be a valid number");

    let registry = ServiceRegistry::from_env();
    log::info!("Starting gateway at http://{}:{}", host, port);

    build_server(registry, &host, port)?.await
}
