const AUTHORITY: &str = "org.fdroid.fdroid.data.AppProvider";
const PATH_RECENTLY_UPDATED: &str = "recentlyUpdated";
const PATH_NEWLY_ADDED: &str = "newlyAdded";
const PATH_CATEGORY: &str = "category";

/// Which record set the list is bound to.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) enum QueryTarget {
    All,
    RecentlyUpdated,
    NewlyAdded,
    Category(String),
}

impl QueryTarget {
    pub(crate) fn uri(&self) -> String {
        match self {
            QueryTarget::All => content_uri(),
            QueryTarget::RecentlyUpdated => recently_updated_uri(),
            QueryTarget::NewlyAdded => newly_added_uri(),
            QueryTarget::Category(label) => category_uri(label),
        }
    }
}

pub(crate) fn content_uri() -> String {
    format!("content://{}", AUTHORITY)
}

pub(crate) fn recently_updated_uri() -> String {
    format!("{}/{}", content_uri(), PATH_RECENTLY_UPDATED)
}

pub(crate) fn newly_added_uri() -> String {
    format!("{}/{}", content_uri(), PATH_NEWLY_ADDED)
}

pub(crate) fn category_uri(label: &str) -> String {
    format!("{}/{}/{}", content_uri(), PATH_CATEGORY, encode_segment(label))
}

// Percent-encodes everything outside the RFC 3986 unreserved set.
fn encode_segment(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}
