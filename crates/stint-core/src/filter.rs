use tracing::debug;

use crate::task::Task;

/// The subset predicate currently applied to the task view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterState {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterState {
    /// Decodes a navigable-location fragment. Strips leading `#` and `/`
    /// markers, lowercases, and maps to a filter; anything unrecognized or
    /// absent is `All`. Total — never fails.
    pub fn parse(fragment: &str) -> Self {
        let value = fragment
            .trim()
            .trim_start_matches('#')
            .trim_start_matches('/')
            .to_ascii_lowercase();
        match value.as_str() {
            "active" => Self::Active,
            "completed" => Self::Completed,
            _ => Self::All,
        }
    }

    /// Canonical fragment encoding for this filter.
    pub fn fragment(self) -> &'static str {
        match self {
            Self::All => "#/all",
            Self::Active => "#/active",
            Self::Completed => "#/completed",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

/// The navigable external location whose fragment encodes the current
/// filter, in the manner of a browser URL hash. Embedders supply their own
/// equivalent.
pub trait Location {
    fn fragment(&self) -> String;
    fn set_fragment(&mut self, fragment: &str);
}

/// In-process location. Default choice for library consumers and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryLocation {
    fragment: String,
}

impl MemoryLocation {
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
        }
    }
}

impl Location for MemoryLocation {
    fn fragment(&self) -> String {
        self.fragment.clone()
    }

    fn set_fragment(&mut self, fragment: &str) {
        self.fragment = fragment.to_string();
    }
}

/// Owns the current [`FilterState`] and keeps it in lockstep with the
/// location fragment, in both directions, within the same synchronous call.
pub struct FilterController<L: Location> {
    filter: FilterState,
    location: L,
}

impl<L: Location> FilterController<L> {
    /// Resolves the initial filter from whatever the location currently
    /// holds.
    pub fn new(location: L) -> Self {
        let filter = FilterState::parse(&location.fragment());
        debug!(filter = filter.as_str(), "resolved initial filter");
        Self { filter, location }
    }

    pub fn filter(&self) -> FilterState {
        self.filter
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    /// Mutable access for out-of-band navigation (the host moving the
    /// location underneath us). Follow up with [`Self::on_external_change`].
    pub fn location_mut(&mut self) -> &mut L {
        &mut self.location
    }

    /// Outward sync: UI action → location. Writes the canonical fragment
    /// only when the current one decodes to a different value.
    #[tracing::instrument(skip(self))]
    pub fn set_filter(&mut self, value: FilterState) {
        self.filter = value;
        if FilterState::parse(&self.location.fragment()) != value {
            debug!(fragment = value.fragment(), "updating location fragment");
            self.location.set_fragment(value.fragment());
        }
    }

    /// Inward sync: out-of-band location change (back/forward navigation) →
    /// filter. Returns true if the filter actually changed, so callers can
    /// skip redundant downstream updates.
    #[tracing::instrument(skip(self))]
    pub fn on_external_change(&mut self) -> bool {
        let parsed = FilterState::parse(&self.location.fragment());
        if parsed == self.filter {
            return false;
        }
        debug!(filter = parsed.as_str(), "filter changed externally");
        self.filter = parsed;
        true
    }
}

/// Pure projection of the collection under a filter. Relative order among
/// matching tasks is the source order; `All` yields every task.
pub fn derive(tasks: &[Task], filter: FilterState) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| match filter {
            FilterState::All => true,
            FilterState::Active => !task.completed,
            FilterState::Completed => task.completed,
        })
        .collect()
}
