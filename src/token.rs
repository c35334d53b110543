//! Anti-forgery tokens for the drilldown endpoint
//!
//! A token is a keyed blake3 hash of an action name and a time tick, where a
//! tick is half the configured lifetime. A token verifies during the tick it
//! was issued in and the one after, so it lives between half and one full
//! lifetime. Nothing is stored server side.

use std::time::Duration;

use chrono::Utc;
use thiserror::Error;

/// Action name bound into tokens for the beer selector drilldown
pub const BEER_SELECTOR_ACTION: &str = "beer_selector";

/// Default token lifetime (24 hours)
pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

const KEY_CONTEXT: &str = "brewmap 2024 anti-forgery token v1";

/// Errors that can occur when verifying a token
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Request carried no token
    #[error("Missing anti-forgery token")]
    Missing,

    /// Token did not match any accepted tick for the action
    #[error("Invalid or expired anti-forgery token")]
    Invalid,
}

/// Issues and verifies tokens with a server-side secret
#[derive(Clone)]
pub struct TokenIssuer {
    key: [u8; 32],
    half_life_secs: i64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("half_life_secs", &self.half_life_secs)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Create an issuer from a secret and token lifetime
    ///
    /// Lifetimes shorter than two seconds are raised to two seconds.
    pub fn new(secret: &[u8], lifetime: Duration) -> Self {
        let half_life_secs = (lifetime.as_secs() / 2).max(1);
        Self {
            key: blake3::derive_key(KEY_CONTEXT, secret),
            half_life_secs: i64::try_from(half_life_secs).unwrap_or(i64::MAX),
        }
    }

    /// Issue a token for an action
    pub fn issue(&self, action: &str) -> String {
        self.issue_at(action, Utc::now().timestamp())
    }

    /// Verify a token for an action
    ///
    /// # Returns
    /// * `Ok(())` - The token was issued for this action within its lifetime
    /// * `Err(TokenError::Missing)` - No token or an empty one
    /// * `Err(TokenError::Invalid)` - Anything else
    pub fn verify(&self, action: &str, token: Option<&str>) -> Result<(), TokenError> {
        self.verify_at(action, token, Utc::now().timestamp())
    }

    fn issue_at(&self, action: &str, now: i64) -> String {
        self.hash(action, self.tick(now)).to_hex().to_string()
    }

    fn verify_at(&self, action: &str, token: Option<&str>, now: i64) -> Result<(), TokenError> {
        let token = token.map(str::trim).filter(|t| !t.is_empty()).ok_or(TokenError::Missing)?;
        let presented = blake3::Hash::from_hex(token).map_err(|_| TokenError::Invalid)?;

        let tick = self.tick(now);
        // Hash comparison is constant time
        if presented == self.hash(action, tick)
            || presented == self.hash(action, tick.saturating_sub(1))
        {
            Ok(())
        } else {
            Err(TokenError::Invalid)
        }
    }

    fn tick(&self, now: i64) -> i64 {
        // ceil(now / half_life), without overflowing for huge half lives
        let tick = now.div_euclid(self.half_life_secs);
        if now.rem_euclid(self.half_life_secs) == 0 {
            tick
        } else {
            tick + 1
        }
    }

    fn hash(&self, action: &str, tick: i64) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new_keyed(&self.key);
        hasher.update(action.as_bytes());
        hasher.update(b"|");
        hasher.update(&tick.to_le_bytes());
        hasher.finalize()
    }
}
