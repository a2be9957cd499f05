use std::time::Duration;

use serde_json::Value;

/// Outcome of a peer name lookup. A lookup never fails: any problem on the
/// way to a real name degrades to a deterministic placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Named(String),
    Placeholder(String),
}

impl Resolution {
    pub fn into_name(self) -> String {
        match self {
            Resolution::Named(name) | Resolution::Placeholder(name) => name,
        }
    }
}

/// Addresses of the users and products services, plus the shared client
/// used for every lookup. Lookups are per order and per field; nothing is
/// cached or batched, so listing N orders issues up to 2N peer calls.
#[derive(Clone)]
pub struct PeerDirectory {
    client: reqwest::Client,
    users_base: String,
    products_base: String,
}

// Short timeout so a dead peer adds bounded latency per lookup instead of
// stalling the listing.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

impl PeerDirectory {
    pub fn new(users_base: String, products_base: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .build()
            .expect("Failed to build enrichment HTTP client");
        Self {
            client,
            users_base,
            products_base,
        }
    }

    pub fn from_env() -> Self {
        let users_base = std::env::var("USERS_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:8001".to_string());
        let products_base = std::env::var("PRODUCTS_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:8002".to_string());
        Self::new(users_base, products_base)
    }

    pub async fn user_name(&self, id: i32) -> Resolution {
        self.resolve("users", &self.users_base, "User", id).await
    }

    pub async fn product_name(&self, id: i32) -> Resolution {
        self.resolve("products", &self.products_base, "Product", id)
            .await
    }

    async fn resolve(&self, resource: &str, base: &str, label: &str, id: i32) -> Resolution {
        match self.fetch_name(resource, base, id).await {
            Ok(name) => Resolution::Named(name),
            Err(reason) => {
                log::warn!("{label} lookup for id {id} failed ({reason}); using placeholder");
                Resolution::Placeholder(format!("{label} #{id}"))
            }
        }
    }

    async fn fetch_name(&self, resource: &str, base: &str, id: i32) -> Result<String, String> {
        let url = format!("{base}/{resource}/{id}");
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = resp.status();
        if !status.is_success() {
            return Err(format!("peer returned {status}"));
        }

        let body: Value = resp.json().await.map_err(|e| e.to_string())?;
        body.get("name")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| "response has no 'name' field".to_string())
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{web, App, HttpResponse, HttpServer};
    use serde_json::json;

    use super::{PeerDirectory, Resolution};

    fn free_port() -> u16 {
        std::net::TcpListener::bind("127.0.0.1:0")
            .expect("bind failed")
            .local_addr()
            .expect("addr failed")
            .port()
    }

    /// Spawn a stub users service answering `GET /users/{id}` with `body`.
    async fn spawn_peer(status: u16, body: serde_json::Value) -> String {
        let port = free_port();
        let server = HttpServer::new(move || {
            let body = body.clone();
            App::new().route(
                "/users/{id}",
                web::get().to(move || {
                    let body = body.clone();
                    async move {
                        HttpResponse::build(
                            actix_web::http::StatusCode::from_u16(status).unwrap(),
                        )
                        .json(body)
                    }
                }),
            )
        })
        .bind(("127.0.0.1", port))
        .expect("bind failed")
        .run();
        tokio::spawn(server);
        // Give the listener a moment to accept.
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        format!("http://127.0.0.1:{port}")
    }

    #[tokio::test]
    async fn healthy_peer_yields_real_name() {
        let base = spawn_peer(200, json!({ "id": 7, "name": "Ada", "email": "ada@x.com" })).await;
        let peers = PeerDirectory::new(base, "http://127.0.0.1:1".to_string());

        assert_eq!(
            peers.user_name(7).await,
            Resolution::Named("Ada".to_string())
        );
    }

    #[tokio::test]
    async fn unreachable_peer_yields_placeholder() {
        // Nothing listens on port 1.
        let peers = PeerDirectory::new(
            "http://127.0.0.1:1".to_string(),
            "http://127.0.0.1:1".to_string(),
        );

        assert_eq!(
            peers.user_name(42).await,
            Resolution::Placeholder("User #42".to_string())
        );
        assert_eq!(
            peers.product_name(99).await,
            Resolution::Placeholder("Product #99".to_string())
        );
    }

    #[tokio::test]
    async fn peer_404_yields_placeholder() {
        let base = spawn_peer(404, json!({ "error": "Not found" })).await;
        let peers = PeerDirectory::new(base, "http://127.0.0.1:1".to_string());

        assert_eq!(
            peers.user_name(5).await,
            Resolution::Placeholder("User #5".to_string())
        );
    }

    #[tokio::test]
    async fn missing_name_field_yields_placeholder() {
        let base = spawn_peer(200, json!({ "id": 5 })).await;
        let peers = PeerDirectory::new(base, "http://127.0.0.1:1".to_string());

        assert_eq!(
            peers.user_name(5).await,
            Resolution::Placeholder("User #5".to_string())
        );
    }

    #[tokio::test]
    async fn non_string_name_yields_placeholder() {
        let base = spawn_peer(200, json!({ "id": 5, "name": 12 })).await;
        let peers = PeerDirectory::new(base, "http://127.0.0.1:1".to_string());

        assert_eq!(
            peers.user_name(5).await,
            Resolution::Placeholder("User #5".to_string())
        );
    }
}
