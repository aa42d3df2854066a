mod models;
mod client;
mod errors;

pub use models::HttpRequester;
pub use errors::RequesterError;
