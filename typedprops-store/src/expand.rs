//! Expansion of environment references in stored paths
//!
//! `$$` stands for a literal `$`.

use regex::Regex;
use std::sync::LazyLock;
use crate::{Result, StoreError};

static ENV_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\$|\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))").unwrap()
});

/// Expand `~`, `$VAR` and `${VAR}` from the process environment, and `$$` to `$`
pub fn expand_path(path: &str) -> Result<String> {
    expand_with(path, |name| std::env::var(name).ok())
}

/// Expand `~`, `$VAR` and `${VAR}` using `lookup` to resolve variables
///
/// A leading `~` is only expanded when it stands alone or is followed by `/`.
pub fn expand_with<F>(path: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let unresolved = |name: &str| StoreError::Expansion {
        path: path.to_string(),
        reason: format!("environment variable '{}' is not set", name),
    };

    let mut rest = path;
    let mut out = String::with_capacity(path.len());

    if rest == "~" || rest.starts_with("~/") {
        out.push_str(&lookup("HOME").ok_or_else(|| unresolved("HOME"))?);
        rest = &rest[1..];
    }

    let mut last = 0;
    for caps in ENV_REF.captures_iter(rest) {
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        out.push_str(&rest[last..whole.start]);
        match caps.get(1).or_else(|| caps.get(2)) {
            Some(name) => {
                let name = name.as_str();
                out.push_str(&lookup(name).ok_or_else(|| unresolved(name))?);
            }
            None => out.push('$'),
        }
        last = whole.end;
    }
    out.push_str(&rest[last..]);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env() -> HashMap<&'static str, &'static str> {
        HashMap::from([("HOME", "/home/ada"), ("DATA", "/srv/data"), ("RUN", "42")])
    }

    fn expand(path: &str) -> Result<String> {
        let env = env();
        expand_with(path, |name| env.get(name).map(|v| v.to_string()))
    }

    #[test]
    fn test_plain_path_unchanged() {
        assert_eq!(expand("/tmp/file.txt").unwrap(), "/tmp/file.txt");
        assert_eq!(expand("relative/path").unwrap(), "relative/path");
    }

    #[test]
    fn test_home_expansion() {
        assert_eq!(expand("~").unwrap(), "/home/ada");
        assert_eq!(expand("~/config").unwrap(), "/home/ada/config");
        assert_eq!(expand("~other/config").unwrap(), "~other/config");
    }

    #[test]
    fn test_variable_forms() {
        assert_eq!(expand("$DATA/run").unwrap(), "/srv/data/run");
        assert_eq!(expand("${DATA}/run_${RUN}.dat").unwrap(), "/srv/data/run_42.dat");
        assert_eq!(expand("$HOME").unwrap(), "/home/ada");
    }

    #[test]
    fn test_escaped_dollar() {
        assert_eq!(expand("/data/$$run_literal").unwrap(), "/data/$run_literal");
        assert_eq!(expand("$$$RUN").unwrap(), "$42");
        assert_eq!(expand("cost$$").unwrap(), "cost$");
    }

    #[test]
    fn test_unset_variable() {
        let err = expand("$NOPE/x").unwrap_err();
        assert!(matches!(err, StoreError::Expansion { .. }));
        assert!(err.to_string().contains("'NOPE'"));
    }
}
