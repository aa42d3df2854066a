use uuid::Uuid;

const DEFAULT_TOKEN_LEN: usize = 12;
const MAX_TOKEN_LEN: usize = 32;

/// Returns a hex token suitable for a path that should not exist on the target
pub fn random_token() -> String {
    random_token_with_len(DEFAULT_TOKEN_LEN)
}

/// Same as [`random_token`] with an explicit length (capped at 32 hex chars)
pub fn random_token_with_len(len: usize) -> String {
    let mut token = Uuid::new_v4().simple().to_string();
    token.truncate(len.min(MAX_TOKEN_LEN));
    token
}
