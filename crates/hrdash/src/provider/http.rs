//! Users API over HTTP.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::{decode_user_list, Enricher, Fetched, RawUser, RecordProvider, SeededEnricher};
use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::model::{Employee, EmployeeId};

/// Fetches users from a dummyjson-style API and enriches them.
///
/// `GET {base_url}/users?limit={limit}` for the listing and
/// `GET {base_url}/users/{id}` for a single record.
#[derive(Debug)]
pub struct HttpProvider {
    client: Client,
    base_url: String,
    limit: usize,
    enricher: SeededEnricher,
}

impl HttpProvider {
    /// Build a provider from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        Self::with_enricher(config, Enricher::default())
    }

    /// Build a provider with a specific enricher.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_enricher(config: &ProviderConfig, enricher: Enricher) -> Result<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|source| Error::Http {
                url: base_url.clone(),
                source,
            })?;

        Ok(Self {
            client,
            base_url,
            limit: config.limit,
            enricher: SeededEnricher::new(enricher, config.seed),
        })
    }

    fn users_url(&self) -> String {
        format!("{}/users?limit={}", self.base_url, self.limit)
    }

    fn user_url(&self, id: EmployeeId) -> String {
        format!("{}/users/{id}", self.base_url)
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| Error::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        debug!("{} answered {}", url, status);
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<Value>().await.map_err(|source| Error::Http {
            url: url.to_string(),
            source,
        })
    }

    async fn list_users(&self) -> Result<Vec<Employee>> {
        let url = self.users_url();
        let payload = self.get_json(&url).await?;
        let users = decode_user_list(&url, payload)?;
        Ok(self.enricher.enrich_all(users))
    }

    async fn one_user(&self, id: EmployeeId) -> Result<Option<Employee>> {
        let url = self.user_url(id);
        let payload = match self.get_json(&url).await {
            Ok(payload) => payload,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };
        let user: RawUser = serde_json::from_value(payload)
            .map_err(|e| Error::invalid_response(&url, e.to_string()))?;
        Ok(Some(self.enricher.enrich(user)))
    }
}

#[async_trait]
impl RecordProvider for HttpProvider {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch_employees(&self) -> Fetched<Vec<Employee>> {
        Fetched::from_result(self.list_users().await, "employees")
    }

    async fn fetch_employee_by_id(&self, id: EmployeeId) -> Fetched<Option<Employee>> {
        Fetched::from_result(self.one_user(id).await, &format!("employee {id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve `responses` (status line, body) to successive connections.
    async fn serve(responses: Vec<(&'static str, String)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut buf = [0_u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
        });

        format!("http://{addr}")
    }

    fn config(base_url: String) -> ProviderConfig {
        ProviderConfig {
            base_url,
            limit: 20,
            timeout_secs: 5,
            source_file: None,
            seed: Some(1),
        }
    }

    #[tokio::test]
    async fn test_fetch_employees() {
        let body = r#"{"users":[{"id":1,"email":"a@x.com"},{"id":2,"email":"b@x.com"}],"total":2}"#;
        let base = serve(vec![("200 OK", body.to_string())]).await;
        let provider = HttpProvider::new(&config(base)).unwrap();

        let employees = provider.fetch_employees().await;
        let ids: Vec<EmployeeId> = employees.into_data().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_fetch_employees_server_error_is_unavailable() {
        let base = serve(vec![("500 Internal Server Error", "{}".to_string())]).await;
        let provider = HttpProvider::new(&config(base)).unwrap();

        let employees = provider.fetch_employees().await;
        assert!(!employees.is_available());
        assert!(employees.into_data().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_employees_bad_payload_is_unavailable() {
        let base = serve(vec![("200 OK", r#"{"items":[]}"#.to_string())]).await;
        let provider = HttpProvider::new(&config(base)).unwrap();

        assert!(!provider.fetch_employees().await.is_available());
    }

    #[tokio::test]
    async fn test_fetch_employee_by_id() {
        let base = serve(vec![("200 OK", r#"{"id":7,"email":"g@x.com"}"#.to_string())]).await;
        let provider = HttpProvider::new(&config(base)).unwrap();

        let employee = provider.fetch_employee_by_id(7).await.into_data().unwrap();
        assert_eq!(employee.id, 7);
        assert_eq!(employee.email, "g@x.com");
    }

    #[tokio::test]
    async fn test_fetch_employee_not_found() {
        let base = serve(vec![("404 Not Found", r#"{"message":"not found"}"#.to_string())]).await;
        let provider = HttpProvider::new(&config(base)).unwrap();

        let fetched = provider.fetch_employee_by_id(999).await;
        assert_eq!(fetched, Fetched::Data(None));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let provider = HttpProvider::new(&config(format!("http://{addr}"))).unwrap();
        assert!(!provider.fetch_employees().await.is_available());
    }

    #[test]
    fn test_urls() {
        let provider = HttpProvider::new(&config("https://dummyjson.com/".to_string())).unwrap();
        assert_eq!(provider.users_url(), "https://dummyjson.com/users?limit=20");
        assert_eq!(provider.user_url(3), "https://dummyjson.com/users/3");
        assert_eq!(provider.name(), "http");
    }
}
