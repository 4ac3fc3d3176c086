// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Loader id registry
//!
//! Assigns each source method a small integer on first request and hands the
//! same value back afterwards. Several generated classes that dispatch on the
//! same source method agree on its id through the process-wide instance.

use crate::model::MethodKey;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;

static GLOBAL: Lazy<LoaderIds> = Lazy::new(LoaderIds::new);

struct Inner {
    next_id: u32,
    ids: HashMap<MethodKey, u32>,
}

/// Registry mapping method identities to loader ids.
pub struct LoaderIds {
    inner: Mutex<Inner>,
}

impl LoaderIds {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                ids: HashMap::new(),
            }),
        }
    }

    /// The registry shared by every generation request of this process.
    pub fn global() -> &'static LoaderIds {
        &GLOBAL
    }

    /// Get or assign the loader id of `method`.
    ///
    /// Lookup and insertion happen under one lock, so concurrent callers never
    /// see two ids for one method or one id for two methods.
    pub fn loader_id(&self, method: &MethodKey) -> u32 {
        // A panic while holding the lock cannot leave the map half-updated.
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(&id) = inner.ids.get(method) {
            return id;
        }
        let id = inner.next_id;
        inner.next_id += 1;
        inner.ids.insert(method.clone(), id);
        log::trace!("assigned loader id {} to {}", id, method);
        id
    }

    /// Number of methods that received an id so far.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for LoaderIds {
    fn default() -> Self {
        Self::new()
    }
}
