use reqwest::Client;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates the client used for locale documents.
    ///
    /// No retry middleware and no request timeout: a failed load is final and
    /// the user retries by selecting a language again.
    pub fn create_client() -> Client {
        Client::builder()
            .pool_max_idle_per_host(5)
            .user_agent(concat!("lazy-policies/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    }
}
