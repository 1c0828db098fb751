//! Entry-point registry and dispatch.
//!
//! Entry points are plain functions registered at link time with
//! [`entry_point!`](crate::entry_point). Each registration names a symbol
//! (e.g. `demo.echo.Main`) and a method on it; the launcher resolves the
//! `main` method of the configured symbol and invokes it once.
//!
//! Crates that register entry points must be linked into the launcher binary
//! (a `use some_crate as _;` is enough), otherwise their registrations are
//! dropped by the linker.

use std::fmt;

use crate::search_path::SearchPath;

/// Method looked up on the configured symbol.
pub const MAIN_METHOD: &str = "main";

/// Signature of an invocable entry point: the full argument list in, an
/// exit status out.
pub type EntryFn = fn(Vec<String>) -> anyhow::Result<u8>;

/// One link-time registration.
#[derive(Clone, Copy)]
pub struct EntryPoint {
    pub symbol: &'static str,
    pub method: &'static str,
    pub func: EntryFn,
}

impl EntryPoint {
    #[must_use]
    pub const fn new(symbol: &'static str, method: &'static str, func: EntryFn) -> Self {
        Self {
            symbol,
            method,
            func,
        }
    }
}

impl fmt::Debug for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryPoint")
            .field("symbol", &self.symbol)
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}

inventory::collect!(EntryPoint);

/// Register an entry point at link time.
///
/// ```ignore
/// devlaunch::entry_point!("demo.echo.Main", main => run);
/// ```
#[macro_export]
macro_rules! entry_point {
    ($symbol:expr, $method:ident => $func:path) => {
        $crate::inventory::submit! {
            $crate::entry::EntryPoint::new($symbol, stringify!($method), $func)
        }
    };
    ($symbol:expr => $func:path) => {
        $crate::entry_point!($symbol, main => $func);
    };
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("entry point symbol '{symbol}' not found")]
    SymbolNotFound { symbol: String },
    #[error("symbol '{symbol}' has no method '{method}'")]
    MethodNotFound { symbol: String, method: String },
    #[error("'{symbol}::{method}' is registered {count} times")]
    Ambiguous {
        symbol: String,
        method: String,
        count: usize,
    },
}

/// Lookup table over entry-point registrations.
#[derive(Debug, Clone, Default)]
pub struct EntryRegistry {
    entries: Vec<EntryPoint>,
}

impl EntryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry over everything submitted with [`entry_point!`](crate::entry_point)
    /// in the linked crates.
    #[must_use]
    pub fn from_inventory() -> Self {
        Self {
            entries: inventory::iter::<EntryPoint>.into_iter().copied().collect(),
        }
    }

    #[must_use]
    pub fn with(mut self, entry: EntryPoint) -> Self {
        self.register(entry);
        self
    }

    pub fn register(&mut self, entry: EntryPoint) {
        self.entries.push(entry);
    }

    /// Registered symbol names, sorted and deduplicated.
    #[must_use]
    pub fn symbols(&self) -> Vec<&'static str> {
        let mut symbols: Vec<_> = self.entries.iter().map(|e| e.symbol).collect();
        symbols.sort_unstable();
        symbols.dedup();
        symbols
    }

    /// Find `method` on `symbol`.
    ///
    /// # Errors
    /// `SymbolNotFound` when nothing registers `symbol`, `MethodNotFound` when
    /// the symbol exists without that method, `Ambiguous` when more than one
    /// registration matches.
    pub fn resolve(&self, symbol: &str, method: &str) -> Result<EntryPoint, ResolveError> {
        let mut on_symbol = self.entries.iter().filter(|e| e.symbol == symbol).peekable();
        if on_symbol.peek().is_none() {
            return Err(ResolveError::SymbolNotFound {
                symbol: symbol.to_owned(),
            });
        }

        let matches: Vec<&EntryPoint> = on_symbol.filter(|e| e.method == method).collect();
        match matches.as_slice() {
            [] => Err(ResolveError::MethodNotFound {
                symbol: symbol.to_owned(),
                method: method.to_owned(),
            }),
            [entry] => Ok(**entry),
            many => Err(ResolveError::Ambiguous {
                symbol: symbol.to_owned(),
                method: method.to_owned(),
                count: many.len(),
            }),
        }
    }
}

/// Resolves entry points against a registry, constructed from the final
/// search path of the run.
#[derive(Debug, Clone)]
pub struct ModuleLoader {
    search_path: SearchPath,
    registry: EntryRegistry,
}

impl ModuleLoader {
    #[must_use]
    pub fn new(search_path: SearchPath, registry: EntryRegistry) -> Self {
        Self {
            search_path,
            registry,
        }
    }

    #[must_use]
    pub fn search_path(&self) -> &SearchPath {
        &self.search_path
    }

    #[must_use]
    pub fn registry(&self) -> &EntryRegistry {
        &self.registry
    }

    /// Resolve the `main` method of `symbol`.
    ///
    /// # Errors
    /// See [`EntryRegistry::resolve`].
    pub fn load_main(&self, symbol: &str) -> Result<ResolvedEntry, ResolveError> {
        let entry = self.registry.resolve(symbol, MAIN_METHOD)?;
        Ok(ResolvedEntry { entry })
    }
}

/// Entry point reference valid for one invocation.
#[derive(Debug)]
pub struct ResolvedEntry {
    entry: EntryPoint,
}

impl ResolvedEntry {
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        self.entry.symbol
    }

    /// Run the entry point synchronously, consuming the reference.
    ///
    /// # Errors
    /// Whatever the entry point itself returns.
    pub fn invoke(self, args: Vec<String>) -> anyhow::Result<u8> {
        (self.entry.func)(args)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn count_args(args: Vec<String>) -> anyhow::Result<u8> {
        Ok(u8::try_from(args.len())?)
    }

    fn boom(_args: Vec<String>) -> anyhow::Result<u8> {
        anyhow::bail!("boom")
    }

    fn other(_args: Vec<String>) -> anyhow::Result<u8> {
        Ok(7)
    }

    crate::entry_point!("test.inventory.Main" => count_args);

    fn registry() -> EntryRegistry {
        EntryRegistry::new()
            .with(EntryPoint::new("test.Count", "main", count_args))
            .with(EntryPoint::new("test.Count", "other", other))
            .with(EntryPoint::new("test.Boom", "main", boom))
    }

    #[test]
    fn resolves_and_invokes_main() {
        let entry = registry().resolve("test.Count", MAIN_METHOD).unwrap();
        assert_eq!(entry.symbol, "test.Count");
        assert_eq!((entry.func)(vec!["a".into(), "b".into()]).unwrap(), 2);
    }

    #[test]
    fn missing_symbol() {
        let err = registry().resolve("test.Nope", MAIN_METHOD).unwrap_err();
        assert!(matches!(err, ResolveError::SymbolNotFound { ref symbol } if symbol == "test.Nope"));
        assert_eq!(err.to_string(), "entry point symbol 'test.Nope' not found");
    }

    #[test]
    fn missing_method() {
        let reg = EntryRegistry::new().with(EntryPoint::new("test.Only", "other", other));
        let err = reg.resolve("test.Only", MAIN_METHOD).unwrap_err();
        assert!(matches!(err, ResolveError::MethodNotFound { .. }));
    }

    #[test]
    fn duplicate_registration_is_ambiguous() {
        let reg = registry().with(EntryPoint::new("test.Count", "main", other));
        let err = reg.resolve("test.Count", MAIN_METHOD).unwrap_err();
        assert!(matches!(err, ResolveError::Ambiguous { count: 2, .. }));
    }

    #[test]
    fn entry_error_propagates() {
        let loader = ModuleLoader::new(SearchPath::new(), registry());
        let resolved = loader.load_main("test.Boom").unwrap();
        let err = resolved.invoke(Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn inventory_registration_is_visible() {
        let reg = EntryRegistry::from_inventory();
        assert!(reg.symbols().contains(&"test.inventory.Main"));
        let entry = reg.resolve("test.inventory.Main", MAIN_METHOD).unwrap();
        assert_eq!((entry.func)(vec!["x".into()]).unwrap(), 1);
    }

    #[test]
    fn symbols_are_sorted_and_unique() {
        assert_eq!(registry().symbols(), vec!["test.Boom", "test.Count"]);
    }
}
