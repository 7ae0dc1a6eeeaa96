//! Resource dependency gating for registered cases.
//!
//! A case may declare the external resources it needs before it is eligible
//! to run. The check is a boolean probe only: callers cannot learn which
//! resource was missing, just that the case must be skipped.

/// Answers "does this resource exist and is it accessible?" for a single
/// identifier. The concrete check is a collaborator of the engine, not part
/// of it; [`FileProbe`] is the stock implementation.
pub trait ResourceProbe {
    fn available(&self, id: &str) -> bool;
}

/// Probes the filesystem by opening the identifier as a path for reading.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileProbe;

impl ResourceProbe for FileProbe {
    fn available(&self, id: &str) -> bool {
        std::fs::File::open(id).is_ok()
    }
}

/// Ordered set of resource identifiers a case requires before it may run.
///
/// An empty set always satisfies. Identifiers are not validated; whatever
/// string is registered is handed to the probe as-is. Each case exclusively
/// owns its `DepSet` for its lifetime.
#[derive(Debug, Clone, Default)]
pub struct DepSet {
    resources: Vec<String>,
}

impl DepSet {
    /// Create an empty set (no dependencies, always satisfied).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a set of resource identifiers, replacing any previously
    /// registered set.
    pub fn register<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resources = ids.into_iter().map(Into::into).collect();
    }

    /// The registered identifiers, in registration order.
    #[must_use]
    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Probe every identifier in order. Returns `false` on the first missing
    /// resource without probing the rest; `true` for the empty set.
    #[must_use]
    pub fn check(&self, probe: &dyn ResourceProbe) -> bool {
        self.resources.iter().all(|id| probe.available(id))
    }
}

impl<S: Into<String>> FromIterator<S> for DepSet {
    fn from_iter<I: IntoIterator<Item = S>>(ids: I) -> Self {
        let mut set = Self::new();
        set.register(ids);
        set
    }
}
