use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Matches `{{ env.NAME }}` with an optional `| default("value")` suffix
fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
    })
}

/// Substitute environment placeholders in raw config text
///
/// `{{ env.NAME }}` is replaced with the value of `NAME`, and
/// `{{ env.NAME | default("x") }}` falls back to `x` when `NAME` is unset.
/// Comment lines are copied verbatim so documented examples in a config
/// file never have to resolve.
pub fn expand_env(input: &str) -> Result<String, String> {
    let mut output = String::with_capacity(input.len());

    for (index, line) in input.split('\n').enumerate() {
        if index > 0 {
            output.push('\n');
        }

        if line.trim_start().starts_with('#') {
            output.push_str(line);
        } else {
            output.push_str(&expand_line(line)?);
        }
    }

    Ok(output)
}

fn expand_line(line: &str) -> Result<String, String> {
    let mut failure = None;

    let expanded = placeholder().replace_all(line, |captures: &Captures<'_>| {
        match resolve(&captures[1], captures.get(2).map(|m| m.as_str())) {
            Ok(value) => value,
            Err(e) => {
                failure.get_or_insert(e);
                String::new()
            }
        }
    });

    match failure {
        Some(e) => Err(e),
        None => Ok(expanded.into_owned()),
    }
}

fn resolve(key: &str, default: Option<&str>) -> Result<String, String> {
    let Some(name) = key.strip_prefix("env.").filter(|name| !name.is_empty() && !name.contains('.')) else {
        return Err(format!("only variables scoped with 'env.' are supported: `{key}`"));
    };

    match (std::env::var(name), default) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.to_owned()),
        (Err(_), None) => Err(format!("environment variable not found: `{name}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let input = "[provider]\ncompletion_model = \"gpt-4o\"\n";
        assert_eq!(expand_env(input).unwrap(), input);
    }

    #[test]
    fn substitutes_api_key() {
        temp_env::with_var("ORATOR_TEST_KEY", Some("sk-test"), || {
            let result = expand_env("api_key = \"{{ env.ORATOR_TEST_KEY }}\"").unwrap();
            assert_eq!(result, "api_key = \"sk-test\"");
        });
    }

    #[test]
    fn substitutes_several_placeholders_on_one_line() {
        let vars = [("ORATOR_HOST", Some("127.0.0.1")), ("ORATOR_PORT", Some("4000"))];
        temp_env::with_vars(vars, || {
            let result = expand_env("listen_address = \"{{ env.ORATOR_HOST }}:{{env.ORATOR_PORT}}\"").unwrap();
            assert_eq!(result, "listen_address = \"127.0.0.1:4000\"");
        });
    }

    #[test]
    fn missing_variable_is_an_error() {
        temp_env::with_var_unset("ORATOR_MISSING", || {
            let err = expand_env("api_key = \"{{ env.ORATOR_MISSING }}\"").unwrap_err();
            assert!(err.contains("ORATOR_MISSING"));
        });
    }

    #[test]
    fn default_applies_only_when_unset() {
        temp_env::with_var_unset("ORATOR_OPTIONAL", || {
            let result = expand_env("api_key = \"{{ env.ORATOR_OPTIONAL | default(\"\") }}\"").unwrap();
            assert_eq!(result, "api_key = \"\"");
        });

        temp_env::with_var("ORATOR_OPTIONAL", Some("present"), || {
            let result = expand_env("api_key = \"{{ env.ORATOR_OPTIONAL | default(\"fallback\") }}\"").unwrap();
            assert_eq!(result, "api_key = \"present\"");
        });
    }

    #[test]
    fn rejects_unscoped_variables() {
        let err = expand_env("key = \"{{ vault.SECRET }}\"").unwrap_err();
        assert!(err.contains("only variables scoped with 'env.'"));
    }

    #[test]
    fn comment_lines_are_not_expanded() {
        temp_env::with_var_unset("ORATOR_MISSING", || {
            let input = "  # api_key = \"{{ env.ORATOR_MISSING }}\"\nmodel = \"whisper-1\"";
            assert_eq!(expand_env(input).unwrap(), input);
        });
    }
}
