pub mod images;
pub mod namespaces;
pub mod resources;

use crate::cli::GitArgs;
use crate::error::AppError;
use crate::gitrepo::{self, TagSort};
use crate::matching::MatchKind;

/// Splits an image argument into namespace and image stream name.
///
/// Accepted forms: `image`, `namespace/image` and
/// `registry/namespace/image`. A bare image name falls back to
/// `default_namespace`.
pub(crate) fn split_image(
    repo: &str,
    default_namespace: &str,
) -> Result<(String, String), AppError> {
    let invalid = || AppError::InvalidImageName(repo.to_string());

    let parts: Vec<&str> = repo.split('/').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(invalid());
    }

    match parts.as_slice() {
        [image] => Ok((default_namespace.to_string(), image.to_string())),
        [namespace, image] => Ok((namespace.to_string(), image.to_string())),
        [_registry, namespace, image] => Ok((namespace.to_string(), image.to_string())),
        _ => Err(invalid()),
    }
}

/// Validates `key=value` labels and joins them into a Kubernetes label
/// selector.
pub(crate) fn join_labels(labels: &[String], kind: &str) -> Result<String, AppError> {
    if labels.is_empty() {
        return Err(AppError::MissingLabelSelector {
            kind: kind.to_string(),
        });
    }
    for label in labels {
        if !label.contains('=') {
            return Err(AppError::InvalidLabel(label.clone()));
        }
    }
    Ok(labels.join(","))
}

/// Reads the git candidate list according to the flags: commit hashes by
/// default (prefix match), tag names with `--tags` (exact match).
pub(crate) fn git_candidates(git: &GitArgs) -> Result<(Vec<String>, MatchKind), AppError> {
    if git.tags {
        let sort: TagSort = git.sort.parse()?;
        let tags = gitrepo::tag_names(&git.repo_path, git.commit_limit, sort)?;
        Ok((tags, MatchKind::Exact))
    } else {
        let hashes = gitrepo::commit_hashes(&git.repo_path, git.commit_limit)?;
        Ok((hashes, MatchKind::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_image_bare_name_uses_default_namespace() {
        assert_eq!(
            split_image("app", "dev").unwrap(),
            ("dev".to_string(), "app".to_string())
        );
    }

    #[test]
    fn test_split_image_namespace_and_image() {
        assert_eq!(
            split_image("prod/app", "dev").unwrap(),
            ("prod".to_string(), "app".to_string())
        );
    }

    #[test]
    fn test_split_image_with_registry_host() {
        assert_eq!(
            split_image("registry.example.com/prod/app", "dev").unwrap(),
            ("prod".to_string(), "app".to_string())
        );
    }

    #[test]
    fn test_split_image_rejects_empty_segments() {
        assert!(split_image("prod/", "dev").is_err());
        assert!(split_image("/app", "dev").is_err());
        assert!(split_image("", "dev").is_err());
        assert!(split_image("a/b/c/d", "dev").is_err());
    }

    #[test]
    fn test_join_labels() {
        let labels = vec!["app=foo".to_string(), "env=dev".to_string()];
        assert_eq!(join_labels(&labels, "configmaps").unwrap(), "app=foo,env=dev");
    }

    #[test]
    fn test_join_labels_requires_selector() {
        assert!(matches!(
            join_labels(&[], "configmaps"),
            Err(AppError::MissingLabelSelector { .. })
        ));
    }

    #[test]
    fn test_join_labels_rejects_bad_format() {
        let labels = vec!["app".to_string()];
        assert!(matches!(
            join_labels(&labels, "secrets"),
            Err(AppError::InvalidLabel(_))
        ));
    }
}
