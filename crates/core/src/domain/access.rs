//! PIN gate in front of the admin surface.
//!
//! A correct PIN stores a timestamped flag in session storage; the flag is
//! honoured until it is older than the configured expiry. This keeps casual
//! visitors out of the admin commands and nothing more: the PIN is a shared
//! constant and anyone with access to the storage file can set the flag.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{AUTH_STORAGE_KEY, TallyConfig};
use crate::db::{Database, StorageDao};
use crate::error::{Error, Result};

#[derive(Debug, Serialize, Deserialize)]
struct AuthFlag {
    /// Unlock time in milliseconds since the epoch.
    timestamp: i64,
}

#[derive(Debug, Clone)]
pub struct AccessGate {
    storage: StorageDao,
    pin: String,
    expiry: Duration,
}

impl AccessGate {
    pub fn new(db: Arc<Database>, pin: impl Into<String>, expiry: Duration) -> Self {
        Self {
            storage: StorageDao::session(db),
            pin: pin.into(),
            expiry,
        }
    }

    pub fn from_config(db: Arc<Database>, config: &TallyConfig) -> Self {
        Self::new(db, config.admin_pin.clone(), config.auth_expiry)
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    pub fn unlock(&self, pin: &str) -> Result<()> {
        self.unlock_at(pin, Utc::now())
    }

    /// Compare `pin` with the shared secret and start a session on match.
    pub fn unlock_at(&self, pin: &str, now: DateTime<Utc>) -> Result<()> {
        if pin != self.pin {
            tracing::warn!("admin unlock rejected");
            return Err(Error::AccessDenied);
        }

        let flag = AuthFlag {
            timestamp: now.timestamp_millis(),
        };
        self.storage
            .set_item(AUTH_STORAGE_KEY, &serde_json::to_string(&flag)?)?;

        tracing::info!("admin session started");
        Ok(())
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        self.is_authenticated_at(Utc::now())
    }

    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> Result<bool> {
        Ok(self.session_expiry_at(now)?.is_some())
    }

    /// When the current session ends, or `None` without a live session.
    ///
    /// Expired or unreadable flags are removed as a side effect.
    pub fn session_expiry_at(&self, now: DateTime<Utc>) -> Result<Option<DateTime<Utc>>> {
        let Some(raw) = self.storage.get_item(AUTH_STORAGE_KEY)? else {
            return Ok(None);
        };

        let started = serde_json::from_str::<AuthFlag>(&raw)
            .ok()
            .and_then(|flag| DateTime::from_timestamp_millis(flag.timestamp));

        match started {
            Some(started) if now - started < self.expiry => Ok(Some(started + self.expiry)),
            _ => {
                tracing::debug!("admin session expired");
                self.storage.remove_item(AUTH_STORAGE_KEY)?;
                Ok(None)
            }
        }
    }

    /// Fail with [`Error::SessionRequired`] unless a session is live.
    pub fn require(&self) -> Result<()> {
        if self.is_authenticated()? {
            Ok(())
        } else {
            Err(Error::SessionRequired)
        }
    }

    pub fn lock(&self) -> Result<()> {
        if self.storage.remove_item(AUTH_STORAGE_KEY)? {
            tracing::info!("admin session ended");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIN: &str = "1234";

    fn setup_gate() -> (Arc<Database>, AccessGate) {
        let db = Arc::new(Database::in_memory().unwrap());
        let gate = AccessGate::new(Arc::clone(&db), PIN, Duration::minutes(30));
        (db, gate)
    }

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_wrong_pin_is_denied() {
        let (_db, gate) = setup_gate();

        let err = gate.unlock_at("0000", at("2024-01-01T10:00:00Z")).unwrap_err();
        assert!(matches!(err, Error::AccessDenied));
        assert!(!gate.is_authenticated_at(at("2024-01-01T10:00:01Z")).unwrap());
    }

    #[test]
    fn test_session_lasts_thirty_minutes() {
        let (_db, gate) = setup_gate();
        gate.unlock_at(PIN, at("2024-01-01T10:00:00Z")).unwrap();

        assert_eq!(
            gate.session_expiry_at(at("2024-01-01T10:29:59Z")).unwrap(),
            Some(at("2024-01-01T10:30:00Z"))
        );
        assert!(!gate.is_authenticated_at(at("2024-01-01T10:30:00Z")).unwrap());
    }

    #[test]
    fn test_expired_flag_is_removed() {
        let (db, gate) = setup_gate();
        gate.unlock_at(PIN, at("2024-01-01T10:00:00Z")).unwrap();

        assert!(!gate.is_authenticated_at(at("2024-01-01T11:00:00Z")).unwrap());

        let session = StorageDao::session(db);
        assert_eq!(session.get_item(AUTH_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_unreadable_flag_is_removed() {
        let (db, gate) = setup_gate();
        let session = StorageDao::session(db);
        session.set_item(AUTH_STORAGE_KEY, "garbage").unwrap();

        assert!(!gate.is_authenticated().unwrap());
        assert_eq!(session.get_item(AUTH_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_lock_ends_session() {
        let (_db, gate) = setup_gate();
        gate.unlock(PIN).unwrap();
        gate.require().unwrap();

        gate.lock().unwrap();
        assert!(matches!(gate.require(), Err(Error::SessionRequired)));
        gate.lock().unwrap();
    }

    #[test]
    fn test_expired_session_is_not_a_pin_error() {
        let (_db, gate) = setup_gate();
        gate.unlock_at(PIN, at("2020-01-01T10:00:00Z")).unwrap();

        let err = gate.require().unwrap_err();
        assert!(matches!(err, Error::SessionRequired));
        assert!(err.is_user_error());
    }
}
