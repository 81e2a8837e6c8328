use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tracing::{info, warn};

use crate::store::{BookingStore, StoreError};
use crate::types::{Booking, BookingsDocument};

/// Flat-file store: the whole booking list lives in one JSON document that is
/// rewritten on every save.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Seeds the data file with an empty document when it does not exist.
    /// An existing file is left untouched.
    pub async fn ensure_file(&self) -> Result<(), StoreError> {
        match fs::metadata(&self.path).await {
            Ok(_) => {
                info!(path = %self.path.display(), "bookings file present");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                let json = serde_json::to_string_pretty(&BookingsDocument::default())?;
                fs::write(&self.path, json).await?;
                info!(path = %self.path.display(), "created empty bookings file");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl BookingStore for FileStore {
    async fn load(&self) -> Vec<Booking> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "could not read bookings file; treating it as empty"
                );
                return Vec::new();
            }
        };
        match serde_json::from_str::<BookingsDocument>(&raw) {
            Ok(document) => document.bookings,
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "bookings file is not valid JSON; treating it as empty"
                );
                Vec::new()
            }
        }
    }

    async fn save(&self, bookings: Vec<Booking>) -> Result<(), StoreError> {
        let document = BookingsDocument {
            bookings,
            last_updated: Some(Utc::now()),
        };
        let json = serde_json::to_string_pretty(&document)?;
        fs::write(&self.path, json).await?;
        Ok(())
    }
}
