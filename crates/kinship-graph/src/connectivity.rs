//! Weighted quick-union connectivity index.
//!
//! Profiles are mapped to dense integer handles, assigned consecutively from
//! zero, and tracked in a disjoint-set forest. `find` compresses paths in two
//! passes and `union` hangs the smaller tree under the larger one, so repeated
//! queries run in amortized near-constant time.
//!
//! The index is a derived view of the profile store. It is never rebuilt
//! automatically; callers keep it in sync (see [`crate::SocialNetwork`]).

use kinship_core::{Error, Quality, Result, ValidationError};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// How the slot arrays are sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slots {
    /// Preallocated; registrations past this count fail.
    Fixed(usize),
    /// Grown one slot per registration.
    Growable,
}

/// Union-find over profile ids.
#[derive(Debug, Clone)]
pub struct ConnectivityIndex {
    parent: Vec<usize>,
    size: Vec<usize>,
    /// Profile id to handle.
    handles: HashMap<String, usize>,
    /// Handle to profile id; its length is the number of assigned handles.
    ids: Vec<String>,
    slots: Slots,
    components: usize,
}

impl ConnectivityIndex {
    /// Creates an index with room for exactly `capacity` profiles.
    ///
    /// Every slot starts as its own component, so the component count begins
    /// at `capacity`.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(ValidationError::ZeroCapacity.into());
        }

        Ok(Self {
            parent: (0..capacity).collect(),
            size: vec![1; capacity],
            handles: HashMap::with_capacity(capacity),
            ids: Vec::with_capacity(capacity),
            slots: Slots::Fixed(capacity),
            components: capacity,
        })
    }

    /// Creates an index with no ceiling. Slots are added as profiles register.
    pub fn growable() -> Self {
        Self {
            parent: Vec::new(),
            size: Vec::new(),
            handles: HashMap::new(),
            ids: Vec::new(),
            slots: Slots::Growable,
            components: 0,
        }
    }

    /// Registers a profile id and returns its handle.
    ///
    /// Known ids return their existing handle unchanged.
    pub fn add_user(&mut self, id: &str) -> Result<usize> {
        if let Some(&handle) = self.handles.get(id) {
            return Ok(handle);
        }

        let handle = self.ids.len();
        match self.slots {
            Slots::Fixed(capacity) => {
                if handle >= capacity {
                    return Err(Error::CapacityExceeded { capacity });
                }
                self.parent[handle] = handle;
                self.size[handle] = 1;
            }
            Slots::Growable => {
                self.parent.push(handle);
                self.size.push(1);
                self.components += 1;
            }
        }

        self.handles.insert(id.to_string(), handle);
        self.ids.push(id.to_string());
        debug!("Registered {} as handle {}", id, handle);
        Ok(handle)
    }

    /// Returns the root of `index`'s tree, flattening the path to it.
    pub fn find(&mut self, index: usize) -> Result<usize> {
        self.validate(index)?;

        let mut root = index;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = index;
        while node != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        Ok(root)
    }

    /// Merges the components holding `a` and `b`.
    ///
    /// Returns `true` if two components became one, `false` if they were
    /// already the same.
    pub fn union(&mut self, a: usize, b: usize) -> Result<bool> {
        let root_a = self.find(a)?;
        let root_b = self.find(b)?;
        if root_a == root_b {
            return Ok(false);
        }

        let (small, large) = if self.size[root_a] < self.size[root_b] {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        self.parent[small] = large;
        self.size[large] += self.size[small];
        self.components -= 1;

        Ok(true)
    }

    /// Whether two profiles share a component.
    ///
    /// Unknown ids are simply not connected to anything.
    pub fn connected(&mut self, a: &str, b: &str) -> bool {
        let (Some(&handle_a), Some(&handle_b)) = (self.handles.get(a), self.handles.get(b)) else {
            return false;
        };

        match (self.find(handle_a), self.find(handle_b)) {
            (Ok(root_a), Ok(root_b)) => root_a == root_b,
            _ => false,
        }
    }

    /// Joins the components of two registered profiles.
    ///
    /// The quality is validated but does not affect the forest.
    pub fn generate_friendship(&mut self, a: &str, b: &str, quality: u8) -> Result<bool> {
        Quality::new(quality)?;

        let handle_a = self.index_of(a).ok_or_else(|| Error::not_found(a))?;
        let handle_b = self.index_of(b).ok_or_else(|| Error::not_found(b))?;

        self.union(handle_a, handle_b)
    }

    /// Number of components across every slot.
    ///
    /// Unassigned slots of a fixed index count as singleton components.
    pub fn component_count(&self) -> usize {
        self.components
    }

    /// The fixed slot count, or `None` for a growable index.
    pub fn capacity(&self) -> Option<usize> {
        match self.slots {
            Slots::Fixed(capacity) => Some(capacity),
            Slots::Growable => None,
        }
    }

    /// Number of assigned handles.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.handles.contains_key(id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.handles.get(id).copied()
    }

    pub fn id_of(&self, index: usize) -> Option<&str> {
        self.ids.get(index).map(String::as_str)
    }

    /// Copies the forest over the assigned handles for diagnostics.
    pub fn snapshot(&self) -> IndexSnapshot {
        let assigned = self.ids.len();
        IndexSnapshot {
            parent: self.parent[..assigned].to_vec(),
            size: self.size[..assigned].to_vec(),
            users: assigned,
            components: self.components,
        }
    }

    fn validate(&self, index: usize) -> Result<()> {
        let assigned = self.ids.len();
        if index >= assigned {
            return Err(Error::InvalidIndex { index, assigned });
        }
        Ok(())
    }
}

/// Point-in-time view of the forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexSnapshot {
    pub parent: Vec<usize>,
    pub size: Vec<usize>,
    pub users: usize,
    pub components: usize,
}

impl fmt::Display for IndexSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "-".repeat(10))?;
        writeln!(f, "Parent [ ] = {:?}", self.parent)?;
        writeln!(f, "Size   [ ] = {:?}", self.size)?;
        write!(f, "Users: {}, Components: {}", self.users, self.components)
    }
}
