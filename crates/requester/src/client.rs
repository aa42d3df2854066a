use super::errors::RequesterError;
use super::models::HttpRequester;
use dirsift_config::RequestSettings;
use dirsift_models::{Headers, RequestError, Response};
use dirsift_scanner::Requester;
use dirsift_utils::join_url;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use std::error::Error as _;
use std::time::Duration;

type Result<T> = std::result::Result<T, RequesterError>;

const MAX_REDIRECTS: usize = 10;

impl HttpRequester {
    /// Builds the client. Must not be called from inside an async runtime.
    pub fn new(base_url: &str, settings: &RequestSettings) -> Result<Self> {
        let base_url = base_url.trim();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(RequesterError::InvalidBaseUrl(base_url.to_string()));
        }
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        let mut headers = HeaderMap::new();
        for (name, value) in &settings.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| RequesterError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| RequesterError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
            headers.insert(header_name, header_value);
        }

        let redirect = if settings.follow_redirects {
            Policy::limited(MAX_REDIRECTS)
        } else {
            Policy::none()
        };

        let mut builder = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.as_str())
            .default_headers(headers)
            .redirect(redirect)
            .danger_accept_invalid_certs(true);

        if let Some(proxy) = settings.proxy.as_deref().filter(|proxy| !proxy.is_empty()) {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
            tracing::info!("Routing requests through proxy {}", proxy);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            max_retries: settings.max_retries,
        })
    }

    pub fn url_for(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn send(&self, url: &str) -> std::result::Result<Response, RequestError> {
        let response = self.client.get(url).send().map_err(classify_error)?;

        let status = response.status().as_u16();
        let headers: Headers = response
            .headers()
            .iter()
            .map(|(name, value)| (name.as_str().to_string(), String::from_utf8_lossy(value.as_bytes()).into_owned()))
            .collect();
        let body = response.bytes().map_err(classify_error)?;

        Ok(Response::new(status, headers, body))
    }
}

impl Requester for HttpRequester {
    fn request(&self, path: &str) -> std::result::Result<Response, RequestError> {
        let url = self.url_for(path);
        let mut attempt = 0;

        loop {
            match self.send(&url) {
                Ok(response) => return Ok(response),
                Err(RequestError::InvalidUrl(message)) => return Err(RequestError::InvalidUrl(message)),
                Err(e) if attempt < self.max_retries => {
                    attempt += 1;
                    tracing::debug!("Retrying {} ({}/{}): {}", url, attempt, self.max_retries, e);
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn classify_error(e: reqwest::Error) -> RequestError {
    let message = describe(&e);

    if e.is_builder() {
        RequestError::InvalidUrl(message)
    } else if e.is_timeout() {
        RequestError::Timeout(message)
    } else if e.is_redirect() {
        RequestError::TooManyRedirects(message)
    } else if is_tls(&e) {
        RequestError::Tls(message)
    } else if e.is_connect() {
        RequestError::Connect(message)
    } else {
        RequestError::Transport(message)
    }
}

/// Error message with its source chain: "error sending request: tcp connect error: Connection refused"
fn describe(e: &reqwest::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Looks at the causes only; the top-level message carries the URL
fn is_tls(e: &reqwest::Error) -> bool {
    let mut source = e.source();
    while let Some(cause) = source {
        let text = cause.to_string().to_ascii_lowercase();
        if text.contains("certificate") || text.contains("tls") || text.contains("handshake") {
            return true;
        }
        source = cause.source();
    }
    false
}
