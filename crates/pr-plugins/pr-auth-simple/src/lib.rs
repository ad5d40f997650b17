//! # pr-auth-simple
//!
//! SHA-256 based implementation of `IdentityProvider`.
//! Passes through requested display names and hands out stable guest
//! handles to sessions that did not pick one. No authentication.

use pr_core::traits::IdentityProvider;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

pub struct SimpleIdentityProvider {
    /// Secret salt for guest handles (rotates on restart unless configured)
    session_salt: SecretString,
    max_name_len: usize,
}

impl SimpleIdentityProvider {
    pub fn new(session_salt: SecretString, max_name_len: usize) -> Self {
        Self {
            session_salt,
            max_name_len,
        }
    }

    /// Generates a guest handle (e.g., guest-3fa9c01b) for a session key.
    fn guest_handle(&self, session_key: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.session_salt.expose_secret().as_bytes());
        hasher.update(session_key.as_bytes());
        let hash = hex::encode(hasher.finalize());
        format!("guest-{}", &hash[..8])
    }
}

impl IdentityProvider for SimpleIdentityProvider {
    fn display_name(&self, requested: Option<&str>, session_key: &str) -> String {
        match requested.map(str::trim) {
            Some(name) if !name.is_empty() => name.chars().take(self.max_name_len).collect(),
            _ => self.guest_handle(session_key),
        }
    }
}
