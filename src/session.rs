//! Who is using the board.
//!
//! The identity is a single persisted key. There is no server round-trip:
//! credentials go through a [`CredentialVerifier`], and the default one only
//! checks that both parts are present.

use std::fmt;

use crate::db::KeyValueStore;
use crate::error::BoardError;

/// Storage key holding the logged-in identity.
pub const SESSION_KEY: &str = "userEmail";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    User(String),
}

impl Identity {
    pub fn email(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::User(email) => Some(email),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => f.write_str("anonymous"),
            Self::User(email) => f.write_str(email),
        }
    }
}

pub trait CredentialVerifier {
    fn verify(&self, identifier: &str, secret: &str) -> bool;
}

/// Mock check: any non-empty identifier/secret pair is accepted.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptNonEmpty;

impl CredentialVerifier for AcceptNonEmpty {
    fn verify(&self, identifier: &str, secret: &str) -> bool {
        !identifier.is_empty() && !secret.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Session<V = AcceptNonEmpty> {
    identity: Identity,
    verifier: V,
}

impl Session<AcceptNonEmpty> {
    pub fn restore<S: KeyValueStore>(store: &S) -> Result<Self, BoardError> {
        Self::restore_with(store, AcceptNonEmpty)
    }
}

impl<V: CredentialVerifier> Session<V> {
    /// Pick up the persisted identity, if any; absence means anonymous.
    pub fn restore_with<S: KeyValueStore>(store: &S, verifier: V) -> Result<Self, BoardError> {
        let identity = match store.get(SESSION_KEY)? {
            Some(email) if !email.is_empty() => Identity::User(email),
            _ => Identity::Anonymous,
        };
        tracing::debug!(%identity, "restored session");
        Ok(Self { identity, verifier })
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn is_logged_in(&self) -> bool {
        !self.identity.is_anonymous()
    }

    /// Returns false and leaves everything untouched when the verifier
    /// rejects the pair.
    pub fn login<S: KeyValueStore>(
        &mut self,
        store: &mut S,
        identifier: &str,
        secret: &str,
    ) -> Result<bool, BoardError> {
        if !self.verifier.verify(identifier, secret) {
            tracing::info!("login rejected");
            return Ok(false);
        }
        store.set(SESSION_KEY, identifier)?;
        self.identity = Identity::User(identifier.to_string());
        tracing::info!(identity = identifier, "logged in");
        Ok(true)
    }

    pub fn logout<S: KeyValueStore>(&mut self, store: &mut S) -> Result<(), BoardError> {
        store.remove(SESSION_KEY)?;
        self.identity = Identity::Anonymous;
        tracing::info!("logged out");
        Ok(())
    }
}
