//! Generational storage for game objects.
//!
//! A `Store<T>` is a central owner that behaves like a map with
//! autogenerated keys. Keeping every object in one flat owner avoids
//! reference cycles, so the whole game state stays serializable, and
//! handles stay cheap to copy and compare.
//!
//! ## Stale Handles
//!
//! Every slot carries a version. Removing a value invalidates its id;
//! a later insert reuses the slot under a bumped version. Lookups with
//! a stale id return `None` instead of aliasing the new occupant.
//!
//! ```
//! use hexrl::core::Store;
//!
//! let mut store = Store::new();
//! let id = store.insert("goblin");
//! assert_eq!(store.get(id), Some(&"goblin"));
//!
//! store.remove(id);
//! let reused = store.insert("bat");
//! assert_eq!(store.get(id), None);     // stale id misses
//! assert_eq!(store.get(reused), Some(&"bat"));
//! ```

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

const INVALID_VERSION: u32 = 0;
const FIRST_VALID_VERSION: u32 = 1;

/// Versioned handle into a [`Store`].
#[derive(Serialize, Deserialize)]
pub struct Id<T> {
    index: usize,
    version: u32,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    fn new(index: usize, version: u32) -> Self {
        Id {
            index,
            version,
            _marker: PhantomData,
        }
    }

    fn reuse(self) -> Self {
        Id::new(self.index, self.version + 1)
    }
}

/// Central owner of values of type `T` with autogenerated keys.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Store<T> {
    values: Vec<Versioned<T>>,
    reusable_ids: Vec<Id<T>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Versioned<T> {
    value: T,
    version: u32,
}

impl<T> Store<T> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Store {
            values: Vec::new(),
            reusable_ids: Vec::new(),
        }
    }

    /// Adds a value to the store.
    ///
    /// Returns a handle to the inserted value.
    pub fn insert(&mut self, value: T) -> Id<T> {
        if let Some(id) = self.reusable_ids.pop() {
            self.values[id.index] = Versioned {
                value,
                version: id.version,
            };
            id
        } else {
            let id = Id::new(self.values.len(), FIRST_VALID_VERSION);
            self.values.push(Versioned {
                value,
                version: id.version,
            });
            id
        }
    }

    /// Returns a reference to the value corresponding to the id.
    #[must_use]
    pub fn get(&self, id: Id<T>) -> Option<&T> {
        match self.values.get(id.index) {
            Some(&Versioned { ref value, version }) if version == id.version => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value corresponding to the id.
    #[must_use]
    pub fn get_mut(&mut self, id: Id<T>) -> Option<&mut T> {
        match self.values.get_mut(id.index) {
            Some(&mut Versioned {
                ref mut value,
                version,
            }) if version == id.version => Some(value),
            _ => None,
        }
    }

    /// Whether the id refers to a live value.
    #[must_use]
    pub fn contains(&self, id: Id<T>) -> bool {
        self.get(id).is_some()
    }

    /// Removes a value from the store. Returns `true` if the value was present.
    ///
    /// The slot is recycled by a later insert under a new version.
    pub fn remove(&mut self, id: Id<T>) -> bool {
        match self.values.get_mut(id.index) {
            Some(&mut Versioned {
                ref mut version, ..
            }) if *version == id.version => {
                *version = INVALID_VERSION;
                self.reusable_ids.push(id.reuse());
                true
            }
            _ => false,
        }
    }

    /// Number of live values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len() - self.reusable_ids.len()
    }

    /// Whether the store holds no live values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over every live value with its id.
    pub fn iter(&self) -> impl Iterator<Item = (Id<T>, &T)> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, versioned)| versioned.version != INVALID_VERSION)
            .map(|(index, versioned)| (Id::new(index, versioned.version), &versioned.value))
    }

    /// Iterates over the ids of every live value.
    pub fn ids(&self) -> impl Iterator<Item = Id<T>> + '_ {
        self.iter().map(|(id, _)| id)
    }
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Copy, Clone, etc. are implemented manually to avoid
// restricting T to implement them as well.
impl<T> Copy for Id<T> {}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.version == other.version
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Id({}v{})", self.index, self.version)
    }
}

impl<T> std::fmt::Display for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Id({}v{})", self.index, self.version)
    }
}
