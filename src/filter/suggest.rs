use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use crate::models::HostRecord;

/// Best fuzzy match for `query` among the aliases, used for "did you mean" hints.
pub fn closest_host(hosts: &[HostRecord], query: &str) -> Option<String> {
    if query.is_empty() {
        return None;
    }
    let matcher = SkimMatcherV2::default().ignore_case();
    hosts
        .iter()
        .filter_map(|h| h.host())
        .filter_map(|alias| matcher.fuzzy_match(alias, query).map(|score| (score, alias)))
        .max_by_key(|(score, _)| *score)
        .map(|(_, alias)| alias.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_host() {
        let hosts = vec![HostRecord::new("alpha"), HostRecord::new("prod-db"), HostRecord::new("staging")];
        assert_eq!(closest_host(&hosts, "alp").as_deref(), Some("alpha"));
        assert_eq!(closest_host(&hosts, "PRODDB").as_deref(), Some("prod-db"));
        assert_eq!(closest_host(&hosts, "xyz"), None);
        assert_eq!(closest_host(&hosts, ""), None);
    }
}
