/// Blocking HTTP client shared by every scan worker
pub struct HttpRequester {
    pub(super) client: reqwest::blocking::Client,
    /// Always ends with '/'
    pub(super) base_url: String,
    pub(super) max_retries: u32,
}
