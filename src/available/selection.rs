use crate::index::{CategorySentinels, QueryTarget};

/// The chooser's current pick; `None` behaves like "All".
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct CategorySelection {
    current: Option<String>,
}

impl CategorySelection {
    pub(crate) fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub(crate) fn set(&mut self, category: Option<&str>) {
        self.current = category.map(str::to_string);
    }

    pub(crate) fn query_target(&self, sentinels: &CategorySentinels) -> QueryTarget {
        resolve_query_target(self.current(), sentinels)
    }
}

/// Sentinels are compared in a fixed order (all, recently updated, what's
/// new) and the first exact match wins; any other label is a data category.
pub(crate) fn resolve_query_target(
    category: Option<&str>,
    sentinels: &CategorySentinels,
) -> QueryTarget {
    match category {
        None => QueryTarget::All,
        Some(label) if label == sentinels.all => QueryTarget::All,
        Some(label) if label == sentinels.recently_updated => QueryTarget::RecentlyUpdated,
        Some(label) if label == sentinels.whats_new => QueryTarget::NewlyAdded,
        Some(label) => QueryTarget::Category(label.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_selection_and_all_sentinel_resolve_to_all() {
        let sentinels = CategorySentinels::default();
        let mut selection = CategorySelection::default();
        assert_eq!(selection.query_target(&sentinels), QueryTarget::All);

        selection.set(Some("All"));
        assert_eq!(selection.query_target(&sentinels), QueryTarget::All);
    }

    #[test]
    fn sentinels_map_to_their_targets() {
        let sentinels = CategorySentinels::default();
        assert_eq!(
            resolve_query_target(Some("Recently Updated"), &sentinels),
            QueryTarget::RecentlyUpdated
        );
        assert_eq!(
            resolve_query_target(Some("What's New"), &sentinels),
            QueryTarget::NewlyAdded
        );
        assert_eq!(
            resolve_query_target(Some("Games"), &sentinels),
            QueryTarget::Category("Games".to_string())
        );
    }

    #[test]
    fn matching_is_exact() {
        let sentinels = CategorySentinels::default();
        assert_eq!(
            resolve_query_target(Some("all"), &sentinels),
            QueryTarget::Category("all".to_string())
        );
        assert_eq!(
            resolve_query_target(Some(" All"), &sentinels),
            QueryTarget::Category(" All".to_string())
        );
        assert_eq!(
            resolve_query_target(Some("Recently Updated"), &sentinels),
            QueryTarget::RecentlyUpdated
        );
    }

    #[test]
    fn colliding_sentinel_labels_resolve_in_fixed_order() {
        let sentinels = CategorySentinels {
            all: "Everything".to_string(),
            recently_updated: "Everything".to_string(),
            whats_new: "Fresh".to_string(),
        };
        assert_eq!(
            resolve_query_target(Some("Everything"), &sentinels),
            QueryTarget::All
        );

        let sentinels = CategorySentinels {
            all: "All".to_string(),
            recently_updated: "Fresh".to_string(),
            whats_new: "Fresh".to_string(),
        };
        assert_eq!(
            resolve_query_target(Some("Fresh"), &sentinels),
            QueryTarget::RecentlyUpdated
        );
    }

    #[test]
    fn clearing_forgets_previous_category() {
        let sentinels = CategorySentinels::default();
        let mut selection = CategorySelection::default();
        selection.set(Some("Games"));
        assert_eq!(
            selection.query_target(&sentinels),
            QueryTarget::Category("Games".to_string())
        );
        selection.set(None);
        assert_eq!(selection.current(), None);
        assert_eq!(selection.query_target(&sentinels), QueryTarget::All);
    }
}
