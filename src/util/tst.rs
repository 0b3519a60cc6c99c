use std::cmp::Ordering;

use thiserror::Error;

/// Errors returned by [`TstMap::insert`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TstError {
    /// The key was empty. A ternary search tree has no node for the empty
    /// string.
    #[error("cannot insert an empty key")]
    EmptyKey,
    /// A value is already stored under this key. Existing values are never
    /// overwritten.
    #[error("key '{0}' is already present")]
    DuplicateKey(String),
}

/// A single node of the tree.
///
/// Each node holds one byte of a key. `lokid` and `hikid` hold keys whose
/// byte at this position sorts below or above `byte`, `eqkid` continues the
/// key with its next byte.
#[derive(Debug)]
struct Node<V> {
    byte:  u8,
    lokid: Option<Box<Self>>,
    eqkid: Option<Box<Self>>,
    hikid: Option<Box<Self>>,
    value: Option<V>,
}

impl<V> Node<V> {
    const fn new(byte: u8) -> Self {
        Self { byte,
               lokid: None,
               eqkid: None,
               hikid: None,
               value: None }
    }
}

/// A string-keyed map backed by a ternary search tree.
///
/// Every scope of the interpreter keeps its builtins, user functions and
/// bindings in one of these. The map rejects duplicate keys instead of
/// replacing the stored value, and tears itself down iteratively so that
/// long keys cannot exhaust the stack when the map is dropped.
///
/// # Example
/// ```
/// use lair::util::tst::{TstError, TstMap};
///
/// let mut map = TstMap::new();
/// map.insert("add", 2).unwrap();
/// map.insert("abs", 1).unwrap();
///
/// assert_eq!(map.get("add"), Some(&2));
/// assert_eq!(map.get("ad"), None);
/// assert_eq!(map.insert("add", 3), Err(TstError::DuplicateKey("add".to_string())));
/// assert_eq!(map.get("add"), Some(&2));
/// ```
#[derive(Debug)]
pub struct TstMap<V> {
    root: Option<Box<Node<V>>>,
    len:  usize,
}

impl<V> Default for TstMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TstMap<V> {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of values stored in the map.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when no value is stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stores `value` under `key`.
    ///
    /// The tree is walked byte by byte, creating nodes as needed. The value is
    /// stored at the node of the last key byte.
    ///
    /// # Errors
    /// - `TstError::EmptyKey` if `key` is empty.
    /// - `TstError::DuplicateKey` if a value already exists for `key`; the
    ///   stored value is left untouched.
    pub fn insert(&mut self, key: &str, value: V) -> Result<(), TstError> {
        let bytes = key.as_bytes();
        if bytes.is_empty() {
            return Err(TstError::EmptyKey);
        }

        let mut slot = &mut self.root;
        let mut index = 0;

        loop {
            let node = slot.get_or_insert_with(|| Box::new(Node::new(bytes[index])));

            match bytes[index].cmp(&node.byte) {
                Ordering::Less => slot = &mut node.lokid,
                Ordering::Greater => slot = &mut node.hikid,
                Ordering::Equal => {
                    if index + 1 == bytes.len() {
                        if node.value.is_some() {
                            return Err(TstError::DuplicateKey(key.to_string()));
                        }
                        node.value = Some(value);
                        self.len += 1;
                        return Ok(());
                    }
                    index += 1;
                    slot = &mut node.eqkid;
                },
            }
        }
    }

    /// Looks up the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.find(key).and_then(|node| node.value.as_ref())
    }

    /// Returns `true` if a value is stored under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes the value stored under `key` and returns it.
    ///
    /// Only the value is cleared; the nodes spelling the key stay in place.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let bytes = key.as_bytes();
        if bytes.is_empty() {
            return None;
        }

        let mut current = self.root.as_deref_mut();
        let mut index = 0;

        while let Some(node) = current {
            match bytes[index].cmp(&node.byte) {
                Ordering::Less => current = node.lokid.as_deref_mut(),
                Ordering::Greater => current = node.hikid.as_deref_mut(),
                Ordering::Equal => {
                    if index + 1 == bytes.len() {
                        let removed = node.value.take();
                        if removed.is_some() {
                            self.len -= 1;
                        }
                        return removed;
                    }
                    index += 1;
                    current = node.eqkid.as_deref_mut();
                },
            }
        }
        None
    }

    /// Frees every node of the tree, handing each stored value to `cleanup`
    /// before it is dropped.
    ///
    /// The traversal uses an explicit stack. Every stored value is passed to
    /// `cleanup` exactly once.
    ///
    /// # Returns
    /// The number of values released.
    ///
    /// # Example
    /// ```
    /// use lair::util::tst::TstMap;
    ///
    /// let mut map = TstMap::new();
    /// for key in ["println", "print", "str"] {
    ///     map.insert(key, key.len()).unwrap();
    /// }
    ///
    /// let mut total = 0;
    /// let released = map.destroy_with(|len| total += len);
    ///
    /// assert_eq!(released, 3);
    /// assert_eq!(total, 15);
    /// ```
    pub fn destroy_with<F>(mut self, mut cleanup: F) -> usize
        where F: FnMut(V)
    {
        let mut released = 0;
        let mut stack: Vec<Box<Node<V>>> = self.root.take().into_iter().collect();

        while let Some(mut node) = stack.pop() {
            stack.extend(node.lokid.take());
            stack.extend(node.eqkid.take());
            stack.extend(node.hikid.take());

            if let Some(value) = node.value.take() {
                cleanup(value);
                released += 1;
            }
        }

        self.len = 0;
        released
    }

    fn find(&self, key: &str) -> Option<&Node<V>> {
        let bytes = key.as_bytes();
        if bytes.is_empty() {
            return None;
        }

        let mut current = self.root.as_deref();
        let mut index = 0;

        while let Some(node) = current {
            match bytes[index].cmp(&node.byte) {
                Ordering::Less => current = node.lokid.as_deref(),
                Ordering::Greater => current = node.hikid.as_deref(),
                Ordering::Equal => {
                    if index + 1 == bytes.len() {
                        return Some(node);
                    }
                    index += 1;
                    current = node.eqkid.as_deref();
                },
            }
        }
        None
    }
}

impl<V> Drop for TstMap<V> {
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<V>>> = self.root.take().into_iter().collect();

        while let Some(mut node) = stack.pop() {
            stack.extend(node.lokid.take());
            stack.extend(node.eqkid.take());
            stack.extend(node.hikid.take());
        }
    }
}
