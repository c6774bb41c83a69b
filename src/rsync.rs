use crate::error::ComposeError;

pub const PROGRAM: &str = "rsync";
pub const DEFAULT_OPTIONS: &str = "-tru --progress";
pub const DEFAULT_REMOTE: &str = "rsync://rsync.myrient.erista.me";

/// Remote scheme and host that listing paths are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    base: String,
}

impl Default for Remote {
    fn default() -> Self {
        Self::new(DEFAULT_REMOTE)
    }
}

impl Remote {
    pub fn new(base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// `path` on the remote, with exactly one `/` between host and path.
    pub fn path_for(&self, path: &str) -> String {
        let mut result = self.base.clone();
        if !path.starts_with('/') {
            result.push('/');
        }
        result.push_str(path);
        result
    }
}

/// Build `rsync <options> "<source>"... "<destination>"`.
///
/// Blank or missing options fall back to [`DEFAULT_OPTIONS`]. Paths are quoted
/// verbatim; embedded quotes are not escaped.
pub fn compose<S: AsRef<str>>(
    destination: &str,
    options: Option<&str>,
    sources: &[S],
) -> Result<String, ComposeError> {
    if sources.is_empty() {
        return Err(ComposeError::NoSources);
    }

    let options = options.map(str::trim).filter(|o| !o.is_empty());

    let mut result = String::from(PROGRAM);
    result.push(' ');
    result.push_str(options.unwrap_or(DEFAULT_OPTIONS));
    for source in sources {
        result.push_str(&format!(" \"{}\"", source.as_ref()));
    }
    result.push_str(&format!(" \"{}\"", destination));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_when_missing() {
        assert_eq!(
            compose("dest", None, &["a", "b"]).unwrap(),
            r#"rsync -tru --progress "a" "b" "dest""#
        );
    }

    #[test]
    fn blank_options_fall_back_to_default() {
        assert_eq!(
            compose("dest", Some("   "), &["a"]).unwrap(),
            r#"rsync -tru --progress "a" "dest""#
        );
    }

    #[test]
    fn custom_options_are_trimmed() {
        assert_eq!(
            compose("/mnt/roms", Some("  -av --dry-run "), &["rsync://h/x"]).unwrap(),
            r#"rsync -av --dry-run "rsync://h/x" "/mnt/roms""#
        );
    }

    #[test]
    fn no_sources_is_an_error() {
        let sources: [&str; 0] = [];
        assert_eq!(compose("dest", Some(""), &sources), Err(ComposeError::NoSources));
    }

    #[test]
    fn quotes_are_not_escaped() {
        assert_eq!(
            compose("d", None, &[r#"a "b""#]).unwrap(),
            r#"rsync -tru --progress "a "b"" "d""#
        );
    }

    #[test]
    fn same_input_same_output() {
        let first = compose("d", Some("-a"), &["x", "y"]).unwrap();
        let second = compose("d", Some("-a"), &["x", "y"]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn remote_path_has_single_separator() {
        let remote = Remote::default();
        assert_eq!(
            remote.path_for("/files/No-Intro/"),
            "rsync://rsync.myrient.erista.me/files/No-Intro/"
        );
        assert_eq!(
            remote.path_for("files/x.zip"),
            "rsync://rsync.myrient.erista.me/files/x.zip"
        );
    }

    #[test]
    fn trailing_slash_on_remote_is_dropped() {
        let remote = Remote::new("rsync://mirror.example/");
        assert_eq!(remote.path_for("/a"), "rsync://mirror.example/a");
    }
}
