//! Symbol interning.
//!
//! Key normalization turns text keys into [`Symbol`] keys through a
//! [`SymbolTable`]. The table is injected by the caller rather than held as
//! process state, so tests and embedders can supply their own.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::key::Symbol;

/// A registry of interned names.
///
/// Implementations must be safe to share across threads. Interning is
/// insert-if-absent and the table only grows.
pub trait SymbolTable: Send + Sync {
    /// Look up an already registered name.
    fn lookup(&self, name: &str) -> Option<Symbol>;

    /// Return the symbol for `name`, registering it if needed.
    fn intern(&self, name: &str) -> Symbol;
}

/// Concurrent [`SymbolTable`] backed by a [`DashMap`].
///
/// # Example
///
/// ```
/// use astrid_nestmap::{Interner, SymbolTable};
///
/// let symbols = Interner::with_symbols(["model"]);
/// assert!(symbols.lookup("model").is_some());
/// assert!(symbols.lookup("budget").is_none());
/// assert_eq!(symbols.intern("budget").as_str(), "budget");
/// assert_eq!(symbols.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct Interner {
    symbols: DashMap<Arc<str>, Symbol>,
}

impl Interner {
    /// Create an empty interner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an interner with `names` already registered.
    #[must_use]
    pub fn with_symbols<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let interner = Self::new();
        for name in names {
            interner.intern(name.as_ref());
        }
        interner
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Number of registered symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether no symbols are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl SymbolTable for Interner {
    fn lookup(&self, name: &str) -> Option<Symbol> {
        self.symbols.get(name).map(|entry| entry.value().clone())
    }

    fn intern(&self, name: &str) -> Symbol {
        if let Some(symbol) = self.lookup(name) {
            return symbol;
        }
        let key: Arc<str> = Arc::from(name);
        self.symbols
            .entry(Arc::clone(&key))
            .or_insert_with(|| {
                debug!(name, "interned new symbol");
                Symbol::from_arc(key)
            })
            .value()
            .clone()
    }
}
