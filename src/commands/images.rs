use anyhow::{Context, Result};
use regex::Regex;
use tracing::{debug, error, info};

use crate::age;
use crate::cli::{HistoryArgs, OrphanArgs};
use crate::cluster::ClusterClient;
use crate::error::AppError;
use crate::matching::{inactive_tags, matching_tags, orphan_tags};
use crate::models::ImageTag;
use crate::output;
use crate::retention::{by_age, by_max_count, by_regex};
use crate::usage;

use super::{git_candidates, split_image};

/// Deletes image stream tags that match git history but exceed the retention
/// cap.
pub async fn history(args: &HistoryArgs, batch: bool) -> Result<()> {
    let (candidates, match_kind) =
        git_candidates(&args.git).context("could not read git candidates")?;

    let client = ClusterClient::new()
        .await
        .context("cannot initialize kubernetes client")?;
    let (namespace, image) = split_image(&args.image, client.default_namespace())
        .context("could not parse image name")?;

    let stream_tags = client
        .image_stream_tags(&namespace, &image)
        .await
        .with_context(|| format!("could not retrieve image stream '{}/{}'", namespace, image))?;
    let tag_names: Vec<String> = stream_tags.iter().map(|t| t.name.clone()).collect();

    let matched = matching_tags(&candidates, &tag_names, match_kind);

    let active = usage::active_image_tags(&client, &namespace, &image, &tag_names)
        .await
        .with_context(|| {
            format!(
                "could not retrieve active image tags from '{}/{}'",
                namespace, image
            )
        })?;
    debug!(?active, "Found currently active image tags");

    let inactive = inactive_tags(&active, &matched);
    // Mapping back to the full tags dedupes multi-candidate matches and
    // restores the push timestamps the cap sorts by.
    let inactive_full: Vec<ImageTag> = stream_tags
        .into_iter()
        .filter(|tag| inactive.contains(&tag.name))
        .collect();

    let candidates_for_deletion = by_max_count(inactive_full, args.keep);
    let names: Vec<String> = candidates_for_deletion
        .into_iter()
        .map(|tag| tag.name)
        .collect();

    output::print_candidates(&names, batch);
    finish(&client, &namespace, &image, &names, args.delete, batch).await;
    Ok(())
}

/// Deletes image stream tags with no counterpart in git history.
pub async fn orphans(args: &OrphanArgs, batch: bool) -> Result<()> {
    let pattern = Regex::new(&args.deletion_pattern)
        .map_err(AppError::from)
        .context("could not parse deletion pattern")?;
    let cutoff = age::cutoff(&args.older_than).context("could not parse older-than flag")?;
    let (candidates, match_kind) =
        git_candidates(&args.git).context("could not read git candidates")?;

    let client = ClusterClient::new()
        .await
        .context("cannot initialize kubernetes client")?;
    let (namespace, image) = split_image(&args.image, client.default_namespace())
        .context("could not parse image name")?;

    let stream_tags = client
        .image_stream_tags(&namespace, &image)
        .await
        .with_context(|| format!("could not retrieve image stream '{}/{}'", namespace, image))?;

    let aged = by_age(stream_tags, cutoff);
    let aged_names: Vec<String> = aged.iter().map(|t| t.name.clone()).collect();

    let orphaned = orphan_tags(&candidates, &aged_names, match_kind);
    let eligible = by_regex(orphaned, &pattern);

    let active = usage::active_image_tags(&client, &namespace, &image, &aged_names)
        .await
        .with_context(|| {
            format!(
                "could not retrieve active image tags from '{}/{}'",
                namespace, image
            )
        })?;
    debug!(?active, "Found currently active image tags");

    let inactive = inactive_tags(&active, &eligible);

    output::print_candidates(&inactive, batch);
    finish(&client, &namespace, &image, &inactive, args.delete, batch).await;
    Ok(())
}

/// Deletes the given tags one by one, logging per-item outcomes. A single
/// failure never aborts the remaining deletions.
async fn finish(
    client: &ClusterClient,
    namespace: &str,
    image: &str,
    tags: &[String],
    delete: bool,
    batch: bool,
) {
    if !delete {
        if !batch {
            info!("--delete was not specified. Nothing has been deleted.");
        }
        return;
    }

    let mut deleted = 0;
    let mut errors = 0;
    for tag in tags {
        match client.delete_image_stream_tag(namespace, image, tag).await {
            Ok(()) => {
                deleted += 1;
                info!(tag = %tag, "Deleted image tag");
            }
            Err(err) => {
                errors += 1;
                error!(tag = %tag, %err, "Could not delete image tag");
            }
        }
    }
    output::print_summary("image tags", deleted, errors, batch);
}
