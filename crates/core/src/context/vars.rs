//! Request-scoped bag of values.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

/// String-keyed values set by one handler and read by the next.
///
/// Values are stored type-erased. Readers name the type they expect; reading
/// a key with the wrong type returns `None` exactly like a missing key.
#[derive(Default)]
pub struct Vars {
    entries: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl Vars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the value stored under `key` if it has type `T`.
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.entries
            .get(key)
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// Gets a mutable reference to the value stored under `key` if it has type `T`.
    pub fn get_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.entries
            .get_mut(key)
            .and_then(|value| value.downcast_mut::<T>())
    }

    /// Stores `value` under `key`, replacing whatever was there.
    pub fn set<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.entries.insert(key.into(), Box::new(value));
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Typed read through a `Key`.
    pub fn get_key<T: Any>(&self, key: &Key<T>) -> Option<&T> {
        self.get(key.name)
    }

    /// Typed write through a `Key`.
    pub fn set_key<T: Any + Send + Sync>(&mut self, key: &Key<T>, value: T) {
        self.set(key.name, value)
    }
}

impl fmt::Debug for Vars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}

/// A bag key bound to the type of the value stored under it.
///
/// ```
/// use envctx_core::{Key, Vars};
///
/// const ATTEMPTS: Key<u32> = Key::new("attempts");
///
/// let mut vars = Vars::new();
/// vars.set_key(&ATTEMPTS, 3);
/// assert_eq!(vars.get_key(&ATTEMPTS), Some(&3));
/// ```
pub struct Key<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Key<T> {}

impl<T> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Key").field(&self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_absent() {
        let vars = Vars::new();
        assert!(vars.get::<String>("user").is_none());
        assert!(!vars.contains_key("user"));
        assert!(vars.is_empty());
    }

    #[test]
    fn last_write_wins() {
        let mut vars = Vars::new();
        vars.set("user", "alice".to_string());
        vars.set("user", "bob".to_string());

        assert_eq!(vars.get::<String>("user").map(String::as_str), Some("bob"));
        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn overwrite_may_change_type() {
        let mut vars = Vars::new();
        vars.set("attempts", "three".to_string());
        vars.set("attempts", 3u32);

        assert!(vars.get::<String>("attempts").is_none());
        assert_eq!(vars.get::<u32>("attempts"), Some(&3));
    }

    #[test]
    fn wrong_type_reads_as_absent() {
        let mut vars = Vars::new();
        vars.set("count", 7u64);

        assert!(vars.get::<u32>("count").is_none());
        assert!(vars.contains_key("count"));
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut vars = Vars::new();
        vars.set("hits", vec![1, 2]);

        if let Some(hits) = vars.get_mut::<Vec<i32>>("hits") {
            hits.push(3);
        }

        assert_eq!(vars.get::<Vec<i32>>("hits"), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn typed_keys_share_the_string_namespace() {
        const USER: Key<String> = Key::new("user");

        let mut vars = Vars::new();
        vars.set_key(&USER, "carol".to_string());

        assert_eq!(
            vars.get::<String>("user").map(String::as_str),
            Some("carol")
        );
        assert_eq!(USER.name(), "user");
    }

    #[test]
    fn debug_lists_keys_only() {
        let mut vars = Vars::new();
        vars.set("token", "secret".to_string());

        let rendered = format!("{vars:?}");
        assert!(rendered.contains("token"));
        assert!(!rendered.contains("secret"));
    }
}
