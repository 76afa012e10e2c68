use shared::{
    domain::{ItemId, MenuItem},
    error::IndexError,
};

/// The ordered menu shown to the user. Replaced wholesale on every successful
/// fetch; never edited in place.
#[derive(Debug, Default, Clone)]
pub struct MenuModel {
    items: Vec<MenuItem>,
}

impl MenuModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Promoted items first, arrival order kept inside each group.
    pub fn apply(&mut self, items: Vec<MenuItem>) {
        let (mut promoted, standard): (Vec<_>, Vec<_>) =
            items.into_iter().partition(|item| item.is_promoted);
        promoted.extend(standard);
        self.items = promoted;
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn item_at(&self, index: usize) -> Result<&MenuItem, IndexError> {
        self.items.get(index).ok_or(IndexError {
            index,
            count: self.items.len(),
        })
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn find(&self, id: ItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing tickets so that only the most recently
/// started fetch may replace the model.
#[derive(Debug, Default)]
pub struct FetchSequencer {
    latest: u64,
}

impl FetchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> FetchTicket {
        self.latest += 1;
        FetchTicket(self.latest)
    }

    pub fn accept(&self, ticket: FetchTicket) -> bool {
        self.latest != 0 && ticket.0 == self.latest
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<FetchTicket> {
        (self.latest != 0).then_some(FetchTicket(self.latest))
    }
}

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod tests;
