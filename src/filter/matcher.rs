use crate::models::HostRecord;

/// Case-insensitive match with `*` wildcards.
///
/// A pattern without `*` matches anywhere in the text; with `*`, the pieces
/// must appear in order and the pattern is anchored on any side that has no
/// `*`.
pub fn wildcard_match(pat: &str, text: &str) -> bool {
    let pat = pat.to_lowercase();
    let text = text.to_lowercase();
    if !pat.contains('*') {
        return text.contains(&pat);
    }

    let parts: Vec<&str> = pat.split('*').collect();
    let mut idx = 0usize;
    for part in parts.iter().filter(|p| !p.is_empty()) {
        match text[idx..].find(part) {
            Some(found) => idx += found + part.len(),
            None => return false,
        }
    }
    if let Some(first) = parts.first().filter(|p| !p.is_empty()) {
        if !text.starts_with(first) {
            return false;
        }
    }
    if let Some(last) = parts.last().filter(|p| !p.is_empty()) {
        if !text.ends_with(last) {
            return false;
        }
    }
    true
}

/// Filters hosts with an expression like `name:web* host:10.* user:root key:id_ed*`.
///
/// Bare tokens match the alias. Every token has to match.
pub fn filter_hosts<'a>(hosts: &'a [HostRecord], filter: &str) -> Vec<&'a HostRecord> {
    let mut pats: Vec<(&str, &str)> = Vec::new();
    for tok in filter.split_whitespace() {
        let (field, pat) = match tok.split_once(':') {
            Some(("name", rest)) => ("Host", rest),
            Some(("host", rest)) => ("HostName", rest),
            Some(("user", rest)) => ("User", rest),
            Some(("key", rest)) => ("IdentityFile", rest),
            _ => ("Host", tok),
        };
        pats.push((field, pat));
    }

    hosts
        .iter()
        .filter(|h| {
            pats.iter()
                .all(|(field, pat)| h.get(field).is_some_and(|v| wildcard_match(pat, v)))
        })
        .collect()
}
