use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow;
use log::debug;
use tokio::sync::watch;

/// Process-wide session token. One writer path (login success, logout),
/// many readers. Readers must call [`SessionStore::token`] again after a
/// suspension point instead of caching the value across it.
pub struct SessionStore {
    tx: watch::Sender<Option<String>>,
    path: Option<PathBuf>,
}

impl SessionStore {
    /// Opens the store backed by `path`. A missing file means logged out.
    pub fn open(path: PathBuf) -> anyhow::Result<SessionStore> {
        let token = match fs::read_to_string(&path) {
            Ok(text) => {
                let text = text.trim();

                if text.is_empty() {
                    None
                } else {
                    Some(String::from(text))
                }
            }
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => return Err(err.into()),
        };

        let (tx, _rx) = watch::channel(token);

        Ok(SessionStore {
            tx,
            path: Some(path),
        })
    }

    /// A store with no backing file.
    pub fn in_memory() -> SessionStore {
        let (tx, _rx) = watch::channel(None);

        SessionStore { tx, path: None }
    }

    /// Re-reads the latest token. Absence means logged out.
    pub fn token(&self) -> Option<String> {
        self.tx.borrow().clone()
    }

    /// Replaces the token and persists it. The in-memory value is updated
    /// even when persistence fails.
    pub fn store(&self, token: String) -> anyhow::Result<()> {
        self.tx.send_replace(Some(token.clone()));

        debug!("session token stored");

        if let Some(ref path) = self.path {
            fs::write(path, format!("{}\n", token))?;
        }

        Ok(())
    }

    /// Drops the token and removes the persisted entry.
    pub fn clear(&self) -> anyhow::Result<()> {
        self.tx.send_replace(None);

        debug!("session token cleared");

        if let Some(ref path) = self.path {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }

        Ok(())
    }

    /// Change notifications for the token, so a holder observes the latest
    /// value instead of a stale capture.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.tx.subscribe()
    }
}
