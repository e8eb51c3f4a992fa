use anyhow::{Context, Result};
use tracing::debug;

use crate::age;
use crate::cli::NamespaceArgs;
use crate::cluster::ClusterClient;
use crate::models::{NamedResource, ResourceKind};
use crate::retention::{by_age, by_max_count};
use crate::usage;

use super::join_labels;

/// Deletes namespaces that carry the given labels and hold no active
/// workload object.
pub async fn clean(args: &NamespaceArgs, batch: bool) -> Result<()> {
    let cutoff = age::cutoff(&args.older_than).context("could not parse older-than flag")?;
    let selector = join_labels(&args.label, "namespaces")?;

    let client = ClusterClient::new()
        .await
        .context("cannot initialize kubernetes client")?;

    let namespaces = client
        .list_resources(ResourceKind::Namespace, "", Some(&selector))
        .await
        .with_context(|| format!("could not retrieve namespaces with labels '{}'", selector))?;

    let active = usage::active_namespaces(&client)
        .await
        .context("could not determine namespace emptiness")?;
    debug!(active = active.len(), "Namespaces with active workloads");

    let empty: Vec<NamedResource> = namespaces
        .into_iter()
        .filter(|ns| !active.contains(&ns.name))
        .collect();

    let candidates = by_max_count(by_age(empty, cutoff), args.keep);

    super::resources::finish(&client, ResourceKind::Namespace, &candidates, args.delete, batch)
        .await;
    Ok(())
}
