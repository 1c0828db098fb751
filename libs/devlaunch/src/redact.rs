use std::fmt;

/// Marker printed in place of sensitive argument values.
pub const REDACTED: &str = "{REDACTED}";

/// Flags whose following value never appears in logs (compared ASCII case-insensitively).
pub const SENSITIVE_FLAGS: &[&str] = &["--accessToken", "--password"];

/// Parameter names whose overrides are not echoed individually.
pub const SENSITIVE_PARAMS: &[&str] = &["accessToken", "password"];

#[must_use]
pub fn is_sensitive_flag(token: &str) -> bool {
    SENSITIVE_FLAGS
        .iter()
        .any(|flag| flag.eq_ignore_ascii_case(token))
}

#[must_use]
pub fn is_sensitive_param(name: &str) -> bool {
    SENSITIVE_PARAMS
        .iter()
        .any(|param| param.eq_ignore_ascii_case(name))
}

/// Log view over an argument list.
///
/// Renders as `[a, b, c]`; the token after a sensitive flag is replaced by
/// [`REDACTED`]. The wrapped slice is only borrowed and never modified.
#[derive(Clone, Copy)]
pub struct RedactedArgs<'a>(pub &'a [String]);

impl fmt::Display for RedactedArgs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        let mut tokens = self.0.iter();
        let mut first = true;
        while let Some(token) = tokens.next() {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            f.write_str(token)?;
            if is_sensitive_flag(token) && tokens.next().is_some() {
                write!(f, ", {REDACTED}")?;
            }
        }
        f.write_str("]")
    }
}

impl fmt::Debug for RedactedArgs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn renders_bracketed_list() {
        let args = strings(&["--version", "1.12", "extra"]);
        assert_eq!(RedactedArgs(&args).to_string(), "[--version, 1.12, extra]");
    }

    #[test]
    fn empty_list() {
        assert_eq!(RedactedArgs(&[]).to_string(), "[]");
    }

    #[test]
    fn access_token_value_is_redacted() {
        let args = strings(&["--accessToken", "secret123", "--username", "Dev"]);
        let rendered = RedactedArgs(&args).to_string();
        assert_eq!(rendered, "[--accessToken, {REDACTED}, --username, Dev]");
        assert!(!rendered.contains("secret123"));
        assert_eq!(args[1], "secret123", "source slice must be untouched");
    }

    #[test]
    fn flag_match_ignores_case() {
        let args = strings(&["--ACCESSTOKEN", "abc", "--Password", "hunter2"]);
        let rendered = RedactedArgs(&args).to_string();
        assert!(!rendered.contains("abc"));
        assert!(!rendered.contains("hunter2"));
        assert_eq!(rendered.matches(REDACTED).count(), 2);
    }

    #[test]
    fn trailing_sensitive_flag_without_value() {
        let args = strings(&["x", "--accessToken"]);
        assert_eq!(RedactedArgs(&args).to_string(), "[x, --accessToken]");
    }

    #[test]
    fn sensitive_param_names() {
        assert!(is_sensitive_param("accesstoken"));
        assert!(is_sensitive_param("PASSWORD"));
        assert!(!is_sensitive_param("username"));
    }
}
