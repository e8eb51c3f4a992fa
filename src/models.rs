use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A single push event in an image stream tag's history.
#[derive(Debug, Clone, Deserialize)]
#[allow(dead_code)]
pub struct TagEvent {
    pub created: Option<DateTime<Utc>>,
    #[serde(rename = "image", default)]
    pub digest: String,
}

/// An image stream tag together with its push history.
///
/// Immutable once fetched; the pipeline only filters lists of these,
/// it never mutates them.
#[derive(Debug, Clone)]
pub struct ImageTag {
    pub name: String,
    pub history: Vec<TagEvent>,
}

impl ImageTag {
    /// The most recent push timestamp across the tag's history,
    /// or `None` when no event carries a timestamp.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.history.iter().filter_map(|e| e.created).max()
    }
}

/// Resource kinds the cleanup pipeline operates on besides image tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    ConfigMap,
    Secret,
    Namespace,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::ConfigMap => write!(f, "ConfigMap"),
            ResourceKind::Secret => write!(f, "Secret"),
            ResourceKind::Namespace => write!(f, "Namespace"),
        }
    }
}

/// Flattened view of a ConfigMap, Secret or Namespace.
///
/// A missing creation timestamp is valid and means "oldest possible":
/// such resources always pass older-than filters and sort last when
/// capping by count.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct NamedResource {
    pub name: String,
    pub namespace: Option<String>,
    pub kind: ResourceKind,
    pub created: Option<DateTime<Utc>>,
    pub labels: std::collections::BTreeMap<String, String>,
}

impl NamedResource {
    /// `namespace/name` for namespaced resources, bare name otherwise.
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}/{}", ns, self.name),
            None => self.name.clone(),
        }
    }
}

/// Anything with a "last updated" timestamp the retention filters can order by.
pub trait Timestamped {
    fn last_updated(&self) -> Option<DateTime<Utc>>;
}

impl Timestamped for ImageTag {
    fn last_updated(&self) -> Option<DateTime<Utc>> {
        ImageTag::last_updated(self)
    }
}

impl Timestamped for NamedResource {
    fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.created
    }
}
