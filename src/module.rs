//! Module identity for verbosity filtering.
//!
//! Every module is identified by a name. Names are interned in a process-wide
//! registry that hands out a compact [`ModuleKey`]; registering the same name
//! twice, from any thread, yields the same key. The sink's verbosity map is
//! keyed by `ModuleKey`, so two call sites naming the same module share one
//! threshold.
//!
//! # Thread Safety
//!
//! The registry is guarded by a mutex. All functions here may be called
//! concurrently.

use std::collections::HashMap;
use std::sync::OnceLock;

use lazy_static::lazy_static;
use parking_lot::Mutex;

lazy_static! {
    static ref MODULE_REGISTRY: Mutex<Registry> = Mutex::new(Registry::default());
}

/// Both directions of the name/key mapping. Key `n` names `names[n - 1]`;
/// key 0 is reserved for "no module".
#[derive(Default)]
struct Registry {
    keys: HashMap<&'static str, ModuleKey>,
    names: Vec<&'static str>,
}

/// Stable opaque key of a registered module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleKey(u32);

impl ModuleKey {
    /// Raw numeric value of the key.
    pub fn id(self) -> u32 {
        self.0
    }

    /// The name this key was registered under.
    pub fn name(self) -> &'static str {
        module_name(self).unwrap_or("?")
    }
}

/// Registers a module name and returns its key.
///
/// # Examples
///
/// ```
/// # use benchlog::module::{register_module, module_name};
/// let a = register_module("net");
/// let b = register_module("net");
/// assert_eq!(a, b);
/// assert_eq!(module_name(a), Some("net"));
/// assert_ne!(a, register_module("disk"));
/// ```
pub fn register_module(name: &'static str) -> ModuleKey {
    let mut registry = MODULE_REGISTRY.lock();
    if let Some(&key) = registry.keys.get(name) {
        return key;
    }

    registry.names.push(name);
    let key = ModuleKey(registry.names.len() as u32);
    registry.keys.insert(name, key);
    key
}

/// Looks up the name a key was registered under.
pub fn module_name(key: ModuleKey) -> Option<&'static str> {
    let index = (key.0 as usize).checked_sub(1)?;
    MODULE_REGISTRY.lock().names.get(index).copied()
}

/// A statically declared module marker.
///
/// The key is resolved on first use and cached, so the registry lock is only
/// taken once per tag. Declare tags with [`module_tag!`](crate::module_tag).
///
/// ```
/// # use benchlog::{module_tag, module::ModuleTag};
/// module_tag!(pub PARSER = "parser");
/// assert_eq!(PARSER.name(), "parser");
/// assert_eq!(PARSER.key(), benchlog::module::register_module("parser"));
/// ```
pub struct ModuleTag {
    name: &'static str,
    key: OnceLock<ModuleKey>,
}

impl ModuleTag {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            key: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn key(&self) -> ModuleKey {
        *self.key.get_or_init(|| register_module(self.name))
    }
}

/// Anything that names a module: a [`ModuleTag`], a [`ModuleKey`] or a
/// static string.
pub trait AsModuleKey {
    fn module_key(&self) -> ModuleKey;
}

impl AsModuleKey for ModuleKey {
    fn module_key(&self) -> ModuleKey {
        *self
    }
}

impl AsModuleKey for ModuleTag {
    fn module_key(&self) -> ModuleKey {
        self.key()
    }
}

impl AsModuleKey for &'static str {
    fn module_key(&self) -> ModuleKey {
        register_module(*self)
    }
}

impl AsModuleKey for &ModuleTag {
    fn module_key(&self) -> ModuleKey {
        self.key()
    }
}

/// Declares a `static` [`ModuleTag`].
///
/// ```
/// benchlog::module_tag!(STORAGE = "storage");
/// ```
#[macro_export]
macro_rules! module_tag {
    ($vis:vis $ident:ident = $name:expr) => {
        $vis static $ident: $crate::module::ModuleTag = $crate::module::ModuleTag::new($name);
    };
}
