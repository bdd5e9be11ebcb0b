use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::rc::Rc;

use super::error::{ReservedName, UnknownFunction};

/// The sequence core's own operation names. Registration rejects these so that
/// a named step can never shadow a built-in: `map`, `filter` and friends always
/// mean the core operation.
const RESERVED: &[&str] = &[
    "append",
    "batch",
    "call",
    "concat",
    "drop_empty",
    "fill_empty",
    "filter",
    "flat_map",
    "flatten",
    "get",
    "head",
    "items",
    "map",
    "replace",
    "rolling",
    "run",
    "safe",
    "slice",
    "stop_when",
    "stream",
    "subscribe",
    "to_vec",
    "unstream",
    "zip",
];

/// A mapping from names to unary functions over one element type.
///
/// With static typing a registered step is an endomorphism `Fn(T) -> T`;
/// cross-type transformations go through [`map`](crate::flow::Flow::map)
/// directly. Functions are stored behind [`Rc`] so resolving one is cheap and
/// the resolved step can outlive the registry borrow (a lazy flow may run it
/// much later).
///
/// # Examples
/// ```
/// use flowseq::registry::Registry;
///
/// let mut registry = Registry::new();
/// registry.register("add1", |x: i32| x + 1).unwrap();
///
/// assert!(registry.contains("add1"));
/// let add1 = registry.resolve("add1").unwrap();
/// assert_eq!((*add1)(2), 3);
/// assert!(registry.resolve("add2").is_err());
/// ```
pub struct Registry<T> {
    fns: HashMap<String, Rc<dyn Fn(T) -> T>>,
}

impl<T: 'static> Registry<T> {
    /// Creates an empty registry.
    pub fn new() -> Registry<T> {
        Registry {
            fns: HashMap::new(),
        }
    }

    /// Registers `fn` under `name`, replacing any previous function of that
    /// name (last registration wins).
    ///
    /// Fails with [`ReservedName`] when `name` is one of the sequence core's
    /// own operations.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        f: impl Fn(T) -> T + 'static,
    ) -> Result<(), ReservedName> {
        let name = name.into();
        if RESERVED.contains(&name.as_str()) {
            return Err(ReservedName { name });
        }
        self.fns.insert(name, Rc::new(f));
        Ok(())
    }

    /// Looks up the function registered under `name`.
    ///
    /// Fails with [`UnknownFunction`] when the name resolves to nothing;
    /// lookup failure is an error, never a silent no-op.
    pub fn resolve(&self, name: &str) -> Result<Rc<dyn Fn(T) -> T>, UnknownFunction> {
        self.fns.get(name).cloned().ok_or_else(|| UnknownFunction {
            name: name.to_owned(),
        })
    }

    /// Returns true if a function is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.fns.contains_key(name)
    }

    /// Returns the registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fns.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<T: 'static> Default for Registry<T> {
    fn default() -> Registry<T> {
        Registry::new()
    }
}

impl<T> Debug for Registry<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.fns.keys().collect();
        names.sort_unstable();
        f.debug_tuple("Registry").field(&names).finish()
    }
}
