//! Effects - side effects declared by the reducer

use std::collections::HashSet;

/// Side effects that can be triggered by actions
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch one page of the catalog listing
    FetchPage { page: u32, seq: u64 },
    /// Fetch the full record for a single entry
    FetchDetail { id: u32, seq: u64 },
    /// Write the full favorite set to the store
    SaveFavorites { ids: HashSet<u32> },
}
