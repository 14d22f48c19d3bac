use std::collections::BTreeMap;
use std::fmt;

/// Component kind, used to namespace breaker and fault entries.
///
/// A source and a load may legally share a name; keying registries by
/// `(ComponentKind, name)` keeps their breakers distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComponentKind {
    /// Generation source.
    Source,
    /// Consuming load.
    Load,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::Source => write!(f, "source"),
            ComponentKind::Load => write!(f, "load"),
        }
    }
}

/// A protective breaker latched per registered component.
///
/// A tripped breaker excludes its component from a cycle's aggregation
/// regardless of the component's own connectivity flag. `trip` and `reset`
/// are idempotent and have no side effects beyond the latch itself.
#[derive(Debug, Clone)]
pub struct Breaker {
    id: String,
    tripped: bool,
}

impl Breaker {
    /// Creates an untripped breaker for the named component.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tripped: false,
        }
    }

    /// Latches the breaker open.
    pub fn trip(&mut self) {
        self.tripped = true;
    }

    /// Clears the latch.
    pub fn reset(&mut self) {
        self.tripped = false;
    }

    /// Returns `true` while the breaker is latched open.
    pub fn is_tripped(&self) -> bool {
        self.tripped
    }

    /// Returns the owning component's name.
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Snapshot of one breaker's state, as returned by [`BreakerPanel::statuses`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakerStatus {
    /// Kind of the owning component.
    pub kind: ComponentKind,
    /// Name of the owning component.
    pub name: String,
    /// Whether the breaker is currently tripped.
    pub tripped: bool,
}

/// Registry of breakers keyed by `(kind, name)`.
///
/// One entry per registered component, created at registration time and
/// living exactly as long as the registration entry. Iteration order is
/// deterministic (kind, then name).
#[derive(Debug, Clone, Default)]
pub struct BreakerPanel {
    breakers: BTreeMap<(ComponentKind, String), Breaker>,
}

impl BreakerPanel {
    /// Creates an empty panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a breaker for the component if one is not already present.
    ///
    /// Returns `false` when an entry for `(kind, name)` already exists.
    pub fn install(&mut self, kind: ComponentKind, name: &str) -> bool {
        if self.breakers.contains_key(&(kind, name.to_string())) {
            return false;
        }
        self.breakers
            .insert((kind, name.to_string()), Breaker::new(name));
        true
    }

    /// Returns `true` if a breaker is registered for the component.
    pub fn contains(&self, kind: ComponentKind, name: &str) -> bool {
        self.breakers.contains_key(&(kind, name.to_string()))
    }

    /// Returns whether the component's breaker is tripped.
    ///
    /// Unregistered components are reported as not tripped.
    pub fn is_tripped(&self, kind: ComponentKind, name: &str) -> bool {
        self.breakers
            .get(&(kind, name.to_string()))
            .is_some_and(Breaker::is_tripped)
    }

    /// Trips the component's breaker, if registered.
    pub fn trip(&mut self, kind: ComponentKind, name: &str) {
        if let Some(b) = self.breakers.get_mut(&(kind, name.to_string())) {
            b.trip();
        }
    }

    /// Resets the component's breaker, if registered.
    pub fn reset(&mut self, kind: ComponentKind, name: &str) {
        if let Some(b) = self.breakers.get_mut(&(kind, name.to_string())) {
            b.reset();
        }
    }

    /// Returns the state of every breaker in deterministic order.
    pub fn statuses(&self) -> Vec<BreakerStatus> {
        self.breakers
            .iter()
            .map(|((kind, name), b)| BreakerStatus {
                kind: *kind,
                name: name.clone(),
                tripped: b.is_tripped(),
            })
            .collect()
    }

    /// Number of registered breakers.
    pub fn len(&self) -> usize {
        self.breakers.len()
    }

    /// Returns `true` when no breakers are registered.
    pub fn is_empty(&self) -> bool {
        self.breakers.is_empty()
    }
}
