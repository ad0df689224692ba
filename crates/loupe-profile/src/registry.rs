//! The profile registry.
//!
//! A [`Registry`] is the single piece of shared mutable state in the
//! engine: a map from profile names and file extensions to registered
//! profiles. Profiles are immutable once registered ([`std::sync::Arc`]
//! handles), so readers can share them freely across threads; the registry
//! serializes writers behind a [`parking_lot::RwLock`] and readers never
//! observe a partially-installed profile.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::schema::Profile;

#[derive(Default)]
struct RegistryInner {
    /// Registration-ordered name -> profile bindings.
    by_name: IndexMap<String, Arc<Profile>>,
    /// Lowercased extension (dot included) -> profile name.
    by_extension: FxHashMap<String, String>,
}

/// Name/extension lookup over registered profiles.
///
/// Lookup accepts a profile name as stored, or an extension
/// case-insensitively (the dot is part of the extension). Re-registering a
/// name replaces the prior binding, including its extensions.
///
/// # Example
///
/// ```
/// use loupe_profile::Registry;
///
/// let registry = Registry::new();
/// loupe_profile::languages::install(&registry);
///
/// assert!(registry.lookup("javascript").is_some());
/// assert!(registry.lookup(".JS").is_some());
/// assert!(registry.lookup("cobol").is_none());
/// ```
#[derive(Default)]
pub struct Registry {
    inner: RwLock<RegistryInner>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a profile, replacing any prior binding with the same name.
    ///
    /// The profile's extensions are installed lowercased; an extension
    /// claimed by two profiles resolves to the later registration.
    pub fn register(&self, profile: Profile) -> Arc<Profile> {
        let profile = Arc::new(profile);
        let mut inner = self.inner.write();

        // Drop extension bindings owned by a previous registration of the
        // same name.
        if inner.by_name.contains_key(&profile.name) {
            let name = profile.name.clone();
            inner.by_extension.retain(|_, owner| *owner != name);
        }

        for ext in &profile.extensions {
            inner
                .by_extension
                .insert(ext.to_lowercase(), profile.name.clone());
        }
        debug!(name = %profile.name, extensions = profile.extensions.len(), "registered profile");
        inner
            .by_name
            .insert(profile.name.clone(), Arc::clone(&profile));
        profile
    }

    /// Looks up a profile by name (as stored) or extension
    /// (case-insensitively).
    pub fn lookup(&self, name_or_extension: &str) -> Option<Arc<Profile>> {
        let inner = self.inner.read();
        if let Some(profile) = inner.by_name.get(name_or_extension) {
            return Some(Arc::clone(profile));
        }
        let ext = name_or_extension.to_lowercase();
        let name = inner.by_extension.get(&ext)?;
        inner.by_name.get(name).map(Arc::clone)
    }

    /// Registered profile names, in registration order.
    pub fn list_names(&self) -> Vec<String> {
        self.inner.read().by_name.keys().cloned().collect()
    }

    /// Registered extensions (lowercased, dot included).
    pub fn list_extensions(&self) -> Vec<String> {
        let inner = self.inner.read();
        let mut extensions: Vec<String> = inner.by_extension.keys().cloned().collect();
        extensions.sort();
        extensions
    }
}
