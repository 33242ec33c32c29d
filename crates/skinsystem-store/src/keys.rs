//! Storage key generation.

/// Namespace for per-user profile records.
pub const USERNAME_KEY_PREFIX: &str = "username:";

/// Hash mapping numeric account ids to the current username.
///
/// The name predates the current layout and is kept so existing data stays
/// readable.
pub const ACCOUNT_ID_TO_USERNAME_KEY: &str = "hash:username-to-account-id";

/// Build the record key for a username. Lookups are case-insensitive.
pub fn build_username_key(username: &str) -> String {
    let mut key = String::with_capacity(USERNAME_KEY_PREFIX.len() + username.len());
    key.push_str(USERNAME_KEY_PREFIX);
    key.push_str(&username.to_lowercase());
    key
}

/// Field of [`ACCOUNT_ID_TO_USERNAME_KEY`] holding the username for `id`.
pub fn account_id_field(id: i64) -> String {
    id.to_string()
}

/// File name of a cape image for a username.
pub fn cape_file_name(username: &str) -> String {
    format!("{}.png", username.to_lowercase())
}
