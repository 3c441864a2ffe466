use lookout_core::models::{ContentItem, FilterCriteria};

/// True when `item` satisfies every non-empty criterion by exact equality.
/// Omitted criteria impose no constraint.
pub fn matches(item: &ContentItem, criteria: &FilterCriteria) -> bool {
    if let Some(user_id) = &criteria.user_id {
        if &item.user_id != user_id {
            return false;
        }
    }
    if let Some(content_type) = criteria.content_type {
        if item.content_type != content_type {
            return false;
        }
    }
    if let Some(status) = criteria.status {
        if item.conversion_status != status {
            return false;
        }
    }
    true
}

/// Project the visible subset, preserving the input order. Pure: filtering
/// never touches the catalog, and results are not cached.
pub fn apply(items: &[ContentItem], criteria: &FilterCriteria) -> Vec<ContentItem> {
    items
        .iter()
        .filter(|item| matches(item, criteria))
        .cloned()
        .collect()
}
