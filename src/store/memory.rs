use super::{CredentialStore, StoreError, StoredCredentials};
use std::sync::{Arc, Mutex};

/// Credential store kept in process memory.
///
/// Records are held in their binary encoding so that loading exercises the
/// same decode and version checks as an on-disk store. Clones share storage.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCredentialStore {
    slot: Arc<Mutex<Option<Vec<u8>>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw bytes as-is, bypassing encoding.
    pub fn put_raw(&self, bytes: Vec<u8>) -> Result<(), StoreError> {
        *self.lock()? = Some(bytes);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.lock().map(|slot| slot.is_none()).unwrap_or(true)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<Vec<u8>>>, StoreError> {
        self.slot
            .lock()
            .map_err(|_| StoreError::Unavailable("in-memory store poisoned".to_string()))
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn load(&self) -> Result<Option<StoredCredentials>, StoreError> {
        match self.lock()?.as_deref() {
            Some(bytes) => Ok(Some(StoredCredentials::from_binary(bytes)?)),
            None => Ok(None),
        }
    }

    fn save(&self, record: &StoredCredentials) -> Result<(), StoreError> {
        let bytes = record.to_binary()?;
        *self.lock()? = Some(bytes);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.lock()? = None;
        Ok(())
    }
}
