use tracing::debug;

/// How a git candidate (commit hash or tag name) compares to an image tag.
///
/// `Prefix` is the default and the backward-compatible behaviour for commit
/// hashes, where image tags carry the abbreviated hash as prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchKind {
    #[default]
    Prefix,
    Exact,
}

fn matches(tag: &str, candidate: &str, kind: MatchKind) -> bool {
    match kind {
        MatchKind::Prefix => tag.starts_with(candidate),
        MatchKind::Exact => tag == candidate,
    }
}

/// Returns all tags matching one of the candidates.
///
/// Iteration is candidate-major, so a tag matched by several candidates
/// appears once per match; callers dedupe where needed.
pub fn matching_tags(candidates: &[String], tags: &[String], kind: MatchKind) -> Vec<String> {
    let mut matching = Vec::new();

    for candidate in candidates {
        for tag in tags {
            if matches(tag, candidate, kind) {
                debug!(tag = %tag, candidate = %candidate, "Tag matched");
                matching.push(tag.clone());
            }
        }
    }
    matching
}

/// Returns the tags for which no candidate matches, preserving tag order.
///
/// An empty candidate list orphans every tag: no candidates means nothing
/// is confirmed non-orphan. This is deliberate policy, not an oversight.
pub fn orphan_tags(candidates: &[String], tags: &[String], kind: MatchKind) -> Vec<String> {
    tags.iter()
        .filter(|tag| !candidates.iter().any(|c| matches(tag, c, kind)))
        .cloned()
        .collect()
}

/// Returns the elements of `all` not present in `active`, preserving the
/// order of `all`.
pub fn inactive_tags(active: &[String], all: &[String]) -> Vec<String> {
    all.iter()
        .filter(|tag| !active.contains(tag))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_prefix_match() {
        let candidates = strs(&["abc123"]);
        let tags = strs(&["abc123def", "abc", "xyz"]);
        assert_eq!(
            matching_tags(&candidates, &tags, MatchKind::Prefix),
            strs(&["abc123def"])
        );
    }

    #[test]
    fn test_exact_match() {
        let candidates = strs(&["v1.2.3"]);
        let tags = strs(&["v1.2.3", "v1.2.3-rc1"]);
        assert_eq!(
            matching_tags(&candidates, &tags, MatchKind::Exact),
            strs(&["v1.2.3"])
        );
    }

    #[test]
    fn test_default_behaves_as_prefix() {
        let candidates = strs(&["ab"]);
        let tags = strs(&["abc", "bcd"]);
        assert_eq!(
            matching_tags(&candidates, &tags, MatchKind::default()),
            strs(&["abc"])
        );
    }

    #[test]
    fn test_empty_candidates_match_nothing() {
        let tags = strs(&["t1", "t2"]);
        assert!(matching_tags(&[], &tags, MatchKind::Prefix).is_empty());
    }

    #[test]
    fn test_duplicates_allowed_when_tag_matches_multiple_candidates() {
        let candidates = strs(&["a", "ab"]);
        let tags = strs(&["abc"]);
        assert_eq!(
            matching_tags(&candidates, &tags, MatchKind::Prefix),
            strs(&["abc", "abc"])
        );
    }

    #[test]
    fn test_orphans_are_complement_of_matches() {
        let candidates = strs(&["abc"]);
        let tags = strs(&["abc123", "def456", "ghi789"]);
        let matched = matching_tags(&candidates, &tags, MatchKind::Prefix);
        let orphans = orphan_tags(&candidates, &tags, MatchKind::Prefix);

        assert_eq!(matched, strs(&["abc123"]));
        assert_eq!(orphans, strs(&["def456", "ghi789"]));

        let mut union: Vec<String> = matched.into_iter().chain(orphans).collect();
        union.sort();
        let mut all = tags.clone();
        all.sort();
        assert_eq!(union, all);
    }

    #[test]
    fn test_empty_candidates_orphan_everything() {
        let tags = strs(&["t1", "t2"]);
        assert_eq!(orphan_tags(&[], &tags, MatchKind::Prefix), tags);
    }

    #[test]
    fn test_orphans_empty_when_all_tags_match() {
        let candidates = strs(&["t"]);
        let tags = strs(&["t1", "t2"]);
        assert_eq!(
            orphan_tags(&candidates, &tags, MatchKind::Prefix),
            Vec::<String>::new()
        );
    }

    #[test]
    fn test_inactive_preserves_order_of_all() {
        let active = strs(&["b"]);
        let all = strs(&["c", "b", "a"]);
        assert_eq!(inactive_tags(&active, &all), strs(&["c", "a"]));
    }

    #[test]
    fn test_inactive_with_empty_active_returns_all() {
        let all = strs(&["x", "y"]);
        assert_eq!(inactive_tags(&[], &all), all);
    }
}
