use std::env;

/// Base URLs of the backing services, fixed at startup.
#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    users: String,
    products: String,
    orders: String,
}

fn env_or(key: &str, default: &str) -> String {
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.trim_end_matches('/').to_string()
}

impl ServiceRegistry {
    pub fn from_env() -> Self {
        Self {
            users: env_or("USERS_URL", "http://localhost:8001"),
            products: env_or("PRODUCTS_URL", "http://localhost:8002"),
            orders: env_or("ORDERS_URL", "http://localhost:8003"),
        }
    }

    pub fn new(users: String, products: String, orders: String) -> Self {
        Self {
            users,
            products,
            orders,
        }
    }

    pub fn base_url(&self, service: &str) -> Option<&str> {
        match service {
            "users" => Some(&self.users),
            "products" => Some(&self.products),
            "orders" => Some(&self.orders),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_service_has_no_base_url() {
        let registry = ServiceRegistry::new(
            "http://u".to_string(),
            "http://p".to_string(),
            "http://o".to_string(),
        );
        assert_eq!(registry.base_url("users"), Some("http://u"));
        assert_eq!(registry.base_url("ledgers"), None);
    }

    #[test]
    fn defaults_point_at_local_ports() {
        // Only meaningful when the vars are unset, which is the normal
        // test environment.
        if env::var("USERS_URL").is_err() {
            let registry = ServiceRegistry::from_env();
            assert_eq!(registry.base_url("users"), Some("http://localhost:8001"));
            assert_eq!(registry.base_url("orders"), Some("http://localhost:8003"));
        }
    }
}
