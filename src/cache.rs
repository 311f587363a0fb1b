//! Compiled fragment cache.
//!
//! Query texts are compiled once and the resulting SQL and parameters are
//! shared between threads. Compilation runs outside any map lock; when two
//! threads race on the same key the first insert wins and both get that
//! entry back.

use crate::expression::{ExpressionResult, ValueNode};
use crate::render::{CompiledExpression, Compiler};
use dashmap::DashMap;
use log::trace;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Thread-safe cache of compiled expressions, cheap to clone
#[derive(Clone)]
pub struct FragmentCache {
    inner: Arc<CacheInner>,
}

struct CacheInner {
    compiler: Compiler,
    entries: DashMap<String, Arc<CompiledExpression>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl FragmentCache {
    pub fn new(compiler: Compiler) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                compiler,
                entries: DashMap::new(),
                hits: AtomicU64::new(0),
                misses: AtomicU64::new(0),
            }),
        }
    }

    pub fn compiler(&self) -> &Compiler {
        &self.inner.compiler
    }

    /// Return the cached compilation for `key`, building the tree and
    /// compiling it on a miss. Failed builds and compilations are not cached.
    pub fn get_or_compile<F>(&self, key: &str, build: F) -> ExpressionResult<Arc<CompiledExpression>>
    where
        F: FnOnce() -> ExpressionResult<ValueNode>,
    {
        if let Some(entry) = self.inner.entries.get(key) {
            self.inner.hits.fetch_add(1, Ordering::SeqCst);
            trace!("Fragment cache hit for {}", key);
            return Ok(Arc::clone(entry.value()));
        }

        self.inner.misses.fetch_add(1, Ordering::SeqCst);
        let tree = build()?;
        let compiled = Arc::new(self.inner.compiler.compile(&tree)?);

        let entry = self
            .inner
            .entries
            .entry(key.to_string())
            .or_insert(compiled);
        trace!("Fragment cache stored {}", key);
        Ok(Arc::clone(entry.value()))
    }

    pub fn get(&self, key: &str) -> Option<Arc<CompiledExpression>> {
        self.inner
            .entries
            .get(key)
            .map(|entry| Arc::clone(entry.value()))
    }

    pub fn invalidate(&self, key: &str) -> bool {
        self.inner.entries.remove(key).is_some()
    }

    pub fn clear(&self) {
        self.inner.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.inner.hits.load(Ordering::SeqCst),
            misses: self.inner.misses.load(Ordering::SeqCst),
            entries: self.len(),
        }
    }
}

impl Default for FragmentCache {
    fn default() -> Self {
        Self::new(Compiler::default())
    }
}
