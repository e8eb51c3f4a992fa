use anyhow::{Context, Result};
use tracing::{debug, error, info};

use crate::age;
use crate::cli::ResourceArgs;
use crate::cluster::ClusterClient;
use crate::models::{NamedResource, ResourceKind};
use crate::output;
use crate::retention::{by_age, by_max_count};
use crate::usage;

use super::join_labels;

/// Shared pipeline for ConfigMaps and Secrets: list by label selector,
/// partition into used/unused, then age- and count-filter the unused set.
pub async fn clean(kind: ResourceKind, args: &ResourceArgs, batch: bool) -> Result<()> {
    let cutoff = age::cutoff(&args.older_than).context("could not parse older-than flag")?;
    let selector = join_labels(&args.label, &format!("{}s", kind))?;

    let client = ClusterClient::new()
        .await
        .context("cannot initialize kubernetes client")?;
    let namespace = args
        .namespace
        .clone()
        .unwrap_or_else(|| client.default_namespace().to_string());

    let resources = client
        .list_resources(kind, &namespace, Some(&selector))
        .await
        .with_context(|| {
            format!(
                "could not retrieve {}s with labels '{}' in '{}'",
                kind, selector, namespace
            )
        })?;

    let (used, unused) = usage::partition_used(&client, &namespace, resources)
        .await
        .with_context(|| format!("could not determine unused {}s in '{}'", kind, namespace))?;
    debug!(used = used.len(), unused = unused.len(), "Partitioned resources by usage");

    let candidates = by_max_count(by_age(unused, cutoff), args.keep);

    finish(&client, kind, &candidates, args.delete, batch).await;
    Ok(())
}

/// Prints or deletes the final candidate list. Delete failures are logged
/// per item and never abort the loop.
pub(super) async fn finish(
    client: &ClusterClient,
    kind: ResourceKind,
    candidates: &[NamedResource],
    delete: bool,
    batch: bool,
) {
    if !delete {
        let names: Vec<String> = candidates
            .iter()
            .map(|r| {
                if batch {
                    r.name.clone()
                } else {
                    r.qualified_name()
                }
            })
            .collect();
        output::print_candidates(&names, batch);
        if !batch {
            info!("--delete was not specified. Nothing has been deleted.");
        }
        return;
    }

    let mut deleted = 0;
    let mut errors = 0;
    for resource in candidates {
        match client.delete_resource(resource).await {
            Ok(()) => {
                deleted += 1;
                if batch {
                    println!("{}", resource.name);
                } else {
                    info!(%kind, name = %resource.qualified_name(), "Deleted resource");
                }
            }
            Err(err) => {
                errors += 1;
                error!(%kind, name = %resource.qualified_name(), %err, "Could not delete resource");
            }
        }
    }
    output::print_summary(&format!("{}s", kind), deleted, errors, batch);
}
