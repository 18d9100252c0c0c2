pub mod url_validator;

use crate::errors::{LinkforgeError, Result};

pub const MIN_ALIAS_LEN: usize = 3;
pub const MAX_ALIAS_LEN: usize = 20;

/// Draws a code from the 62-character alphanumeric alphabet.
///
/// Stateless independent draws; uniqueness is the caller's responsibility
/// (check against the store and redraw on collision).
pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    let chars = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    iter::repeat_with(|| chars[rand::random_range(0..chars.len())] as char)
        .take(length)
        .collect()
}

/// Validates a user-supplied alias: 3-20 characters, ASCII alphanumeric only.
pub fn validate_alias(alias: &str) -> Result<()> {
    if alias.len() < MIN_ALIAS_LEN || alias.len() > MAX_ALIAS_LEN {
        return Err(LinkforgeError::validation(format!(
            "Alias '{}' must be between {} and {} characters",
            alias, MIN_ALIAS_LEN, MAX_ALIAS_LEN
        )));
    }

    if !alias.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(LinkforgeError::validation(format!(
            "Alias '{}' may only contain ASCII letters and digits",
            alias
        )));
    }

    Ok(())
}
