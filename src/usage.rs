use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use crate::cluster::{build_tag_ref, workload_kinds, ClusterClient};
use crate::error::AppError;
use crate::models::NamedResource;
use crate::scan::object_contains;

/// Marks every needle that occurs in one of the listed objects as used.
///
/// Needles already in `used` are skipped; one hit is enough.
fn mark_used(objects: &[Value], needles: &[String], used: &mut Vec<String>) {
    for needle in needles {
        if used.contains(needle) {
            continue;
        }
        if objects.iter().any(|object| object_contains(object, needle)) {
            debug!(needle = %needle, "Needle referenced by a live workload");
            used.push(needle.clone());
        }
    }
}

/// Returns the subset of `needles` referenced by at least one live workload
/// object in `namespace`, across the fixed workload kind set.
///
/// A single list failure aborts the whole detection: a partial usage picture
/// is unsafe for a deletion decision.
pub async fn find_used(
    client: &ClusterClient,
    namespace: &str,
    needles: &[String],
) -> Result<Vec<String>, AppError> {
    let mut used = Vec::new();
    if needles.is_empty() {
        return Ok(used);
    }

    for kind in workload_kinds() {
        let objects = client.list_workload_objects(namespace, &kind).await?;
        mark_used(&objects, needles, &mut used);
    }
    Ok(used)
}

/// Returns the image stream tags referenced by live workloads, scanning for
/// the `<image>:<tag>` form.
pub async fn active_image_tags(
    client: &ClusterClient,
    namespace: &str,
    image: &str,
    tags: &[String],
) -> Result<Vec<String>, AppError> {
    debug!(namespace, image, ?tags, "Looking for actively used image tags");

    let refs: Vec<String> = tags.iter().map(|tag| build_tag_ref(image, tag)).collect();
    let used_refs = find_used(client, namespace, &refs).await?;

    let active = tags
        .iter()
        .filter(|tag| used_refs.contains(&build_tag_ref(image, tag)))
        .cloned()
        .collect();
    Ok(active)
}

/// Partitions resources into (used, unused) by scanning workloads for the
/// resource names.
pub async fn partition_used(
    client: &ClusterClient,
    namespace: &str,
    resources: Vec<NamedResource>,
) -> Result<(Vec<NamedResource>, Vec<NamedResource>), AppError> {
    let names: Vec<String> = resources.iter().map(|r| r.name.clone()).collect();
    let used_names = find_used(client, namespace, &names).await?;

    let (used, unused) = resources
        .into_iter()
        .partition(|r| used_names.contains(&r.name));
    Ok((used, unused))
}

/// Returns the names of namespaces holding at least one active workload
/// object, i.e. one without a deletion timestamp.
pub async fn active_namespaces(client: &ClusterClient) -> Result<HashSet<String>, AppError> {
    let mut active = HashSet::new();
    for kind in workload_kinds() {
        let objects = client.list_workload_objects_all(&kind).await?;
        collect_active_namespaces(&objects, &mut active);
    }
    Ok(active)
}

fn collect_active_namespaces(objects: &[Value], active: &mut HashSet<String>) {
    for object in objects {
        if object
            .pointer("/metadata/deletionTimestamp")
            .map_or(false, |v| !v.is_null())
        {
            continue;
        }
        if let Some(namespace) = object
            .pointer("/metadata/namespace")
            .and_then(|v| v.as_str())
        {
            active.insert(namespace.to_string());
        }
    }
}
