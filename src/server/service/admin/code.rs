//! Admin claim codes.
//!
//! When the server starts without any admin account, a one-time code is generated and
//! written to the log. A logged-in user who presents it before it expires is promoted to
//! Admin. Codes live only in memory and are consumed on first successful use.

use rand::Rng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Default lifetime of a generated code.
pub const ADMIN_CODE_TTL: Duration = Duration::from_secs(10 * 60);

const CODE_LENGTH: usize = 32;

#[derive(Clone)]
struct AdminCode {
    code: String,
    expires_at: Instant,
}

impl AdminCode {
    fn new(code: String, ttl: Duration) -> Self {
        Self {
            code,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    fn matches(&self, input: &str) -> bool {
        self.code == input
    }
}

/// Holds the single outstanding admin claim code.
///
/// Cloning shares the same slot, so the copy in `AppState` and the one used at startup
/// see the same code.
#[derive(Clone)]
pub struct AdminCodeService {
    code: Arc<RwLock<Option<AdminCode>>>,
    ttl: Duration,
}

impl AdminCodeService {
    /// Creates a service with no active code and the default 10-minute lifetime.
    pub fn new() -> Self {
        Self::with_ttl(ADMIN_CODE_TTL)
    }

    /// Creates a service whose codes expire after `ttl`.
    ///
    /// # Arguments
    /// - `ttl` - Lifetime applied to each generated code
    ///
    /// # Returns
    /// - `AdminCodeService` - New service instance with no active code
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            code: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    /// Generates a new random code, replacing any previous one.
    ///
    /// # Returns
    /// - `String` - The generated 32-character alphanumeric code
    pub async fn generate(&self) -> String {
        let code_string = Self::generate_random_code();
        *self.code.write().await = Some(AdminCode::new(code_string.clone(), self.ttl));
        code_string
    }

    /// Checks the input against the stored code and consumes it on success.
    ///
    /// Expired codes are dropped and fail validation. A wrong code leaves the stored
    /// code in place.
    ///
    /// # Arguments
    /// - `input_code` - The code presented by the user
    ///
    /// # Returns
    /// - `true` - Code matched and had not expired; it is now consumed
    /// - `false` - Code mismatched, expired, or none was issued
    pub async fn validate_and_consume(&self, input_code: &str) -> bool {
        let mut code = self.code.write().await;

        if let Some(stored_code) = code.as_ref() {
            if stored_code.is_expired() {
                *code = None;
                return false;
            }

            if stored_code.matches(input_code) {
                *code = None;
                return true;
            }
        }

        false
    }

    fn generate_random_code() -> String {
        const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                                 abcdefghijklmnopqrstuvwxyz\
                                 0123456789";

        let mut rng = rand::rng();

        (0..CODE_LENGTH)
            .map(|_| {
                let idx = rng.random_range(0..CHARSET.len());
                CHARSET[idx] as char
            })
            .collect()
    }

    #[cfg(test)]
    pub async fn has_valid_code(&self) -> bool {
        let mut code = self.code.write().await;

        if let Some(stored_code) = code.as_ref() {
            if stored_code.is_expired() {
                *code = None;
                return false;
            }
            return true;
        }

        false
    }
}

impl Default for AdminCodeService {
    fn default() -> Self {
        Self::new()
    }
}
