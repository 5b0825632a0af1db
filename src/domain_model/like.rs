use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog resource (podcast) id. Never checked against the catalog.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub String);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        ResourceId(s.to_string())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct LikedResource {
    pub resource_id: ResourceId,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct LikeToggle {
    pub liked: bool,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct LikeCount {
    pub resource_id: ResourceId,
    pub count: u64,
}
