mod models;
mod loader;
mod expand;
mod wordlist;
mod errors;

pub use models::WordlistDictionary;
pub use errors::DictionaryError;
