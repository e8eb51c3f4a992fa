use std::str::FromStr;

use git2::{Repository, Sort};
use semver::Version;
use tracing::warn;

use crate::error::AppError;

/// Ordering applied to git tag names before matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSort {
    Version,
    Alphabetic,
}

impl FromStr for TagSort {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "version" => Ok(TagSort::Version),
            "alphabetic" => Ok(TagSort::Alphabetic),
            other => Err(AppError::InvalidSortCriteria(other.to_string())),
        }
    }
}

/// Returns the commit hashes of the repository at `repo_path`, most recent
/// first (committer time order). `limit` of 0 returns all commits.
pub fn commit_hashes(repo_path: &str, limit: usize) -> Result<Vec<String>, AppError> {
    let repository = Repository::open(repo_path)?;

    let mut revwalk = repository.revwalk()?;
    revwalk.push_head()?;
    revwalk.set_sorting(Sort::TIME)?;

    let take = if limit == 0 { usize::MAX } else { limit };
    let mut hashes = Vec::new();
    for oid in revwalk.take(take) {
        hashes.push(oid?.to_string());
    }

    Ok(hashes)
}

/// Returns the tag names of the repository at `repo_path`, ordered by the
/// given sort criteria. `limit` of 0 returns all tags; the limit applies
/// before sorting, mirroring commit iteration.
pub fn tag_names(repo_path: &str, limit: usize, sort: TagSort) -> Result<Vec<String>, AppError> {
    let repository = Repository::open(repo_path)?;

    let take = if limit == 0 { usize::MAX } else { limit };
    let tags: Vec<String> = repository
        .tag_names(None)?
        .iter()
        .flatten()
        .take(take)
        .map(|name| name.to_string())
        .collect();

    Ok(sort_tags(tags, sort))
}

/// Sorts tag names alphabetically or by semantic version, newest first.
///
/// Values that do not parse as a version are skipped with a warning; a
/// leading `v` is tolerated.
pub fn sort_tags(tags: Vec<String>, sort: TagSort) -> Vec<String> {
    match sort {
        TagSort::Alphabetic => {
            let mut tags = tags;
            tags.sort();
            tags
        }
        TagSort::Version => {
            let mut versioned: Vec<(Version, String)> = Vec::new();
            for raw in tags {
                match Version::parse(raw.trim_start_matches('v')) {
                    Ok(version) => versioned.push((version, raw)),
                    Err(error) => {
                        warn!(tag = %raw, %error, "Skipped tag that does not parse as a version")
                    }
                }
            }
            versioned.sort_by(|a, b| b.0.cmp(&a.0));
            versioned.into_iter().map(|(_, raw)| raw).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Signature;
    use tempfile::TempDir;

    fn strs(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    /// Creates a repository with `n` commits, returning the hashes oldest
    /// first.
    fn repo_with_commits(dir: &TempDir, n: usize) -> Vec<String> {
        let repo = Repository::init(dir.path()).unwrap();
        let mut hashes = Vec::new();

        for i in 0..n {
            // Distinct committer times so revwalk time ordering is decisive.
            let time = git2::Time::new(1_600_000_000 + (i as i64) * 60, 0);
            let sig = Signature::new("tester", "tester@example.com", &time).unwrap();
            let tree_id = {
                let mut index = repo.index().unwrap();
                index.write_tree().unwrap()
            };
            let tree = repo.find_tree(tree_id).unwrap();
            let parents: Vec<git2::Commit> = match repo.head() {
                Ok(head) => vec![head.peel_to_commit().unwrap()],
                Err(_) => vec![],
            };
            let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
            let oid = repo
                .commit(Some("HEAD"), &sig, &sig, &format!("commit {}", i), &tree, &parent_refs)
                .unwrap();
            hashes.push(oid.to_string());
        }
        hashes
    }

    #[test]
    fn test_commit_hashes_most_recent_first() {
        let dir = TempDir::new().unwrap();
        let created = repo_with_commits(&dir, 3);

        let hashes = commit_hashes(dir.path().to_str().unwrap(), 0).unwrap();
        let expected: Vec<String> = created.into_iter().rev().collect();
        assert_eq!(hashes, expected);
    }

    #[test]
    fn test_commit_hashes_limit() {
        let dir = TempDir::new().unwrap();
        let created = repo_with_commits(&dir, 3);

        let hashes = commit_hashes(dir.path().to_str().unwrap(), 2).unwrap();
        assert_eq!(hashes.len(), 2);
        assert_eq!(hashes[0], created[2]);
    }

    #[test]
    fn test_commit_hashes_missing_repo_fails() {
        let dir = TempDir::new().unwrap();
        assert!(commit_hashes(dir.path().to_str().unwrap(), 0).is_err());
    }

    #[test]
    fn test_tag_names_sorted_by_version() {
        let dir = TempDir::new().unwrap();
        let created = repo_with_commits(&dir, 1);
        let repo = Repository::open(dir.path()).unwrap();
        let obj = repo
            .find_object(git2::Oid::from_str(&created[0]).unwrap(), None)
            .unwrap();
        for name in ["v1.2.0", "v1.10.0", "v1.3.0"] {
            repo.tag_lightweight(name, &obj, false).unwrap();
        }

        let tags = tag_names(dir.path().to_str().unwrap(), 0, TagSort::Version).unwrap();
        assert_eq!(tags, strs(&["v1.10.0", "v1.3.0", "v1.2.0"]));
    }

    #[test]
    fn test_sort_tags_version_descending() {
        let tags = strs(&["1.2.0", "2.0.0", "1.10.0"]);
        assert_eq!(
            sort_tags(tags, TagSort::Version),
            strs(&["2.0.0", "1.10.0", "1.2.0"])
        );
    }

    #[test]
    fn test_sort_tags_version_skips_unparseable() {
        let tags = strs(&["not-a-version", "v2.0.0", "v1.0.0"]);
        assert_eq!(
            sort_tags(tags, TagSort::Version),
            strs(&["v2.0.0", "v1.0.0"])
        );
    }

    #[test]
    fn test_sort_tags_alphabetic_ascending() {
        let tags = strs(&["beta", "alpha", "gamma"]);
        assert_eq!(
            sort_tags(tags, TagSort::Alphabetic),
            strs(&["alpha", "beta", "gamma"])
        );
    }

    #[test]
    fn test_tag_sort_from_str() {
        assert_eq!(TagSort::from_str("version").unwrap(), TagSort::Version);
        assert_eq!(TagSort::from_str("alphabetic").unwrap(), TagSort::Alphabetic);
        assert!(TagSort::from_str("chronological").is_err());
    }
}
