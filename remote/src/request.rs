use async_trait::async_trait;
use awc::{http::Method, Client};
use log::debug;

use crate::errors::RequestError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Header {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn json() -> Self {
        Header::new("Content-Type", "application/json")
    }
}

/// Issues single-attempt requests against the home-radio server.
///
/// Resolves with the body text on any 2xx status and rejects with the
/// observed status otherwise.
#[async_trait(?Send)]
pub trait Requester {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        headers: &[Header],
    ) -> Result<String, RequestError>;

    async fn get(&self, path: &str) -> Result<String, RequestError> {
        self.request(Method::GET, path, None, &[]).await
    }

    async fn put(
        &self,
        path: &str,
        body: Option<String>,
        headers: &[Header],
    ) -> Result<String, RequestError> {
        self.request(Method::PUT, path, body, headers).await
    }

    async fn post(
        &self,
        path: &str,
        body: Option<String>,
        headers: &[Header],
    ) -> Result<String, RequestError> {
        self.request(Method::POST, path, body, headers).await
    }
}

pub struct AwcRequester {
    client: Client,
    base_url: String,
}

impl AwcRequester {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        AwcRequester {
            client: Client::builder().disable_timeout().finish(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait(?Send)]
impl Requester for AwcRequester {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        headers: &[Header],
    ) -> Result<String, RequestError> {
        let url = self.url(path);
        debug!("{} {}", &method, &url);

        let mut req = self.client.request(method.clone(), url.as_str());
        for header in headers {
            req = req.insert_header((header.name.as_str(), header.value.as_str()));
        }

        let result = match body {
            Some(body) => req.send_body(body).await,
            None => req.send().await,
        };
        let mut res = result.map_err(|e| {
            debug!("{} {} failed: {}", &method, &url, e);
            RequestError::transport(e)
        })?;

        let status = res.status();
        let raw = res.body().await.map_err(RequestError::transport)?;
        if !status.is_success() {
            debug!("{} {} returned {}", &method, &url, status);
            return Err(RequestError {
                status: status.as_u16(),
                status_text: status
                    .canonical_reason()
                    .unwrap_or("<unknown status code>")
                    .to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }
}
