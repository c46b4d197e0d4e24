use serde::{Deserialize, Serialize};

use crate::Category;

/// The ordered set of discovery sorts; the order is also the pager's page
/// order (page 0 is Magic).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sort {
    Magic,
    Popular,
    Newest,
    EndingSoon,
}

impl Sort {
    pub const ALL: [Sort; 4] = [Sort::Magic, Sort::Popular, Sort::Newest, Sort::EndingSoon];

    pub fn page_index(self) -> usize {
        match self {
            Sort::Magic => 0,
            Sort::Popular => 1,
            Sort::Newest => 2,
            Sort::EndingSoon => 3,
        }
    }

    /// The name this sort carries in tracking properties.
    pub fn tracking_name(self) -> &'static str {
        match self {
            Sort::Magic => "magic",
            Sort::Popular => "popular",
            Sort::Newest => "newest",
            Sort::EndingSoon => "ending_soon",
        }
    }
}

/// Discovery filter state. Immutable value: updates produce a new value
/// via the `with_*` overrides, never mutate in place.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryParams {
    pub sort: Option<Sort>,
    pub category: Option<Category>,
    pub include_potd: bool,
    pub starred: bool,
    pub recommended: bool,
    /// `Some(false)` excludes projects the user already backed; `None`
    /// leaves backing out of the filter entirely.
    pub backed: Option<bool>,
    pub search: Option<String>,
}

impl DiscoveryParams {
    pub fn defaults() -> Self {
        Self::default()
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_include_potd(mut self, include_potd: bool) -> Self {
        self.include_potd = include_potd;
        self
    }

    pub fn with_starred(mut self, starred: bool) -> Self {
        self.starred = starred;
        self
    }

    pub fn with_recommended(mut self, recommended: bool) -> Self {
        self.recommended = recommended;
        self
    }

    pub fn with_backed(mut self, backed: bool) -> Self {
        self.backed = Some(backed);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Style-grouping key for the active category, if any.
    pub fn root_category_id(&self) -> Option<u64> {
        self.category.as_ref().map(Category::root_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_leave_the_original_untouched() {
        let base = DiscoveryParams::defaults();
        let starred = base.clone().with_starred(true);

        assert!(!base.starred);
        assert!(starred.starred);
        assert_eq!(base, DiscoveryParams::defaults());
    }

    #[test]
    fn test_root_category_id() {
        let params = DiscoveryParams::defaults();
        assert_eq!(params.root_category_id(), None);

        let art = params.clone().with_category(Category::root(1, "Art"));
        assert_eq!(art.root_category_id(), Some(1));

        let documentary = params.with_category(Category::child(53, "Documentary", 30));
        assert_eq!(documentary.root_category_id(), Some(30));
    }

    #[test]
    fn test_sort_page_order_matches_all() {
        for (page, sort) in Sort::ALL.iter().enumerate() {
            assert_eq!(sort.page_index(), page);
        }
    }
}
