// GlTutor
// copyright gl_tutor developers 2024～2025

use crate::error::AppError;
use std::collections::HashMap;

/// String keyed resource store.
///
/// Keys are unique: inserting an existing key is an error rather than a silent
/// replacement, since the replaced GL object would leak.
pub struct KeyedCache<T> {
    kind: &'static str,
    items: HashMap<String, T>,
}

impl<T> KeyedCache<T> {
    /// `kind` names the resource in error messages ("shader", "texture"...)
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            items: HashMap::new(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    /// Fails early, before any GL object is created for `key`
    pub fn ensure_free(&self, key: &str) -> Result<(), AppError> {
        if self.contains(key) {
            return Err(AppError::DuplicateKey {
                kind: self.kind,
                key: key.to_string(),
            });
        }
        Ok(())
    }

    pub fn insert(&mut self, key: &str, item: T) -> Result<&mut T, AppError> {
        self.ensure_free(key)?;
        Ok(self.items.entry(key.to_string()).or_insert(item))
    }

    /// Runs `create` only when `key` is not cached yet
    pub fn get_or_try_insert_with<F>(&mut self, key: &str, create: F) -> Result<&mut T, AppError>
    where
        F: FnOnce() -> Result<T, AppError>,
    {
        if !self.items.contains_key(key) {
            let item = create()?;
            self.items.insert(key.to_string(), item);
        }
        self.get_mut(key)
    }

    pub fn get(&self, key: &str) -> Result<&T, AppError> {
        self.items.get(key).ok_or_else(|| self.missing(key))
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut T, AppError> {
        let kind = self.kind;
        self.items.get_mut(key).ok_or_else(|| AppError::MissingKey {
            kind,
            key: key.to_string(),
        })
    }

    pub fn remove(&mut self, key: &str) -> Result<T, AppError> {
        self.items.remove(key).ok_or_else(|| self.missing(key))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(|k| k.as_str())
    }

    /// Empties the cache, handing every item back for deletion
    pub fn drain(&mut self) -> impl Iterator<Item = (String, T)> + '_ {
        self.items.drain()
    }

    fn missing(&self, key: &str) -> AppError {
        AppError::MissingKey {
            kind: self.kind,
            key: key.to_string(),
        }
    }
}
