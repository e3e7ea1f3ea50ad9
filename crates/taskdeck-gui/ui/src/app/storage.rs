use anyhow::anyhow;
use taskdeck_core::{
  KeyValueStore,
  MemoryStore
};

/// `window.localStorage`, or an in-memory
/// stand-in when the browser refuses
/// access (private mode, disabled
/// storage).
pub enum BrowserStorage {
  Local(web_sys::Storage),
  Memory(MemoryStore)
}

impl BrowserStorage {
  pub fn open() -> Self {
    let storage = web_sys::window()
      .and_then(|window| {
        window
          .local_storage()
          .ok()
          .flatten()
      });

    match storage {
      | Some(storage) => {
        tracing::debug!(
          "using browser local storage"
        );
        BrowserStorage::Local(storage)
      }
      | None => {
        tracing::warn!(
          "local storage unavailable; \
           tasks will not survive a \
           reload"
        );
        BrowserStorage::Memory(
          MemoryStore::new()
        )
      }
    }
  }
}

impl KeyValueStore for BrowserStorage {
  fn get(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    match self {
      | BrowserStorage::Local(storage) => {
        storage.get_item(key).map_err(
          |err| {
            anyhow!(
              "localStorage.getItem({key}) \
               failed: {err:?}"
            )
          }
        )
      }
      | BrowserStorage::Memory(memory) => {
        memory.get(key)
      }
    }
  }

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    match self {
      | BrowserStorage::Local(storage) => {
        storage
          .set_item(key, value)
          .map_err(|err| {
            anyhow!(
              "localStorage.setItem({key}) \
               failed: {err:?}"
            )
          })
      }
      | BrowserStorage::Memory(memory) => {
        memory.set(key, value)
      }
    }
  }
}
