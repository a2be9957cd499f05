use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use crate::errors::GatewayError;
use crate::registry::ServiceRegistry;

// Forwarded calls share one client; a backing service that hangs is cut
// off after this long.
const FORWARD_TIMEOUT: Duration = Duration::from_secs(10);

/// Forwards gateway requests to the backing services. One instance is
/// built at startup and shared by every handler.
pub struct Upstream {
    client: reqwest::Client,
    registry: ServiceRegistry,
}

impl Upstream {
    pub fn new(registry: ServiceRegistry) -> Self {
        let client = reqwest::Client::builder()
            .timeout(FORWARD_TIMEOUT)
            .build()
            .expect("Failed to build gateway HTTP client");
        Self { client, registry }
    }

    fn collection_url(&self, service: &str) -> String {
        // The catalog vouches for `service` before any call is made, so the
        // registry lookup cannot miss.
        let base = self
            .registry
            .base_url(service)
            .expect("service vetted against the catalog");
        format!("{base}/{service}")
    }

    fn item_url(&self, service: &str, id: i32) -> String {
        format!("{}/{id}", self.collection_url(service))
    }

    pub async fn list(&self, service: &str) -> Result<Vec<Value>, GatewayError> {
        let resp = self.client.get(self.collection_url(service)).send().await?;
        Ok(expect_success(resp)?.json().await?)
    }

    pub async fn fetch(&self, service: &str, id: i32) -> Result<Value, GatewayError> {
        let resp = self.client.get(self.item_url(service, id)).send().await?;
        Ok(expect_success(resp)?.json().await?)
    }

    pub async fn create(&self, service: &str, payload: Value) -> Result<(), GatewayError> {
        let resp = self
            .client
            .post(self.collection_url(service))
            .json(&payload)
            .send()
            .await?;
        expect_success(resp)?;
        Ok(())
    }

    pub async fn update(&self, service: &str, id: i32, payload: Value) -> Result<(), GatewayError> {
        let resp = self
            .client
            .put(self.item_url(service, id))
            .json(&payload)
            .send()
            .await?;
        expect_success(resp)?;
        Ok(())
    }

    pub async fn delete(&self, service: &str, id: i32) -> Result<(), GatewayError> {
        let resp = self.client.delete(self.item_url(service, id)).send().await?;
        expect_success(resp)?;
        Ok(())
    }
}

fn expect_success(resp: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        log::warn!("upstream call to {} returned {status}", resp.url());
        Err(GatewayError::UpstreamStatus(status.as_u16()))
    }
}

/// Convert submitted form fields to the JSON body a backing service
/// expects. Form values are always strings; values that read as numbers
/// are forwarded as numbers so strictly-typed services accept them.
pub fn form_to_json(form: &HashMap<String, String>) -> Value {
    let map = form
        .iter()
        .map(|(k, v)| (k.clone(), coerce(v)))
        .collect::<serde_json::Map<String, Value>>();
    Value::Object(map)
}

fn coerce(raw: &str) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(f) = raw.parse::<f64>() {
        if f.is_finite() {
            return Value::from(f);
        }
    }
    Value::String(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn integers_and_floats_are_coerced() {
        let payload = form_to_json(&form(&[("user_id", "7"), ("price", "9.99")]));
        assert_eq!(payload["user_id"], json!(7));
        assert_eq!(payload["price"], json!(9.99));
    }

    #[test]
    fn plain_text_stays_a_string() {
        let payload = form_to_json(&form(&[("name", "Ada"), ("email", "ada@x.com")]));
        assert_eq!(payload["name"], json!("Ada"));
        assert_eq!(payload["email"], json!("ada@x.com"));
    }

    #[test]
    fn empty_and_non_finite_values_stay_strings() {
        let payload = form_to_json(&form(&[("description", ""), ("price", "inf")]));
        assert_eq!(payload["description"], json!(""));
        assert_eq!(payload["price"], json!("inf"));
    }
}
