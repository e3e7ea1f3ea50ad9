use std::collections::BTreeMap;

/// Synchronous string key-value storage,
/// the shape of the browser's
/// `localStorage`.
pub trait KeyValueStore {
  fn get(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>>;

  /// Replaces whatever is stored under
  /// `key`.
  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()>;
}

/// Process-local backend, used by tests
/// and as the fallback when the browser
/// refuses storage access.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  entries: BTreeMap<String, String>
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_entry(
    key: &str,
    value: &str
  ) -> Self {
    let mut store = Self::default();
    store
      .entries
      .insert(key.to_string(), value.to_string());
    store
  }

  pub fn raw(
    &self,
    key: &str
  ) -> Option<&str> {
    self.entries.get(key).map(String::as_str)
  }
}

impl KeyValueStore for MemoryStore {
  fn get(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    Ok(self.entries.get(key).cloned())
  }

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    self
      .entries
      .insert(key.to_string(), value.to_string());
    Ok(())
  }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore
  for Box<T>
{
  fn get(
    &self,
    key: &str
  ) -> anyhow::Result<Option<String>> {
    (**self).get(key)
  }

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) -> anyhow::Result<()> {
    (**self).set(key, value)
  }
}
