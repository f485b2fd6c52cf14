use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::settings::PropertiesKeys;

#[derive(thiserror::Error, Debug)]
pub enum PropertiesError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// `key=value` lines in file order.
///
/// Values are taken verbatim after the first `=`; nothing is escaped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: Vec<(String, String)>,
}

impl Properties {
    /// Empty lines are skipped. A line without `=` becomes a key with an
    /// empty value.
    pub fn parse(text: &str) -> Self {
        let mut props = Properties::default();
        for line in text.lines().filter(|line| !line.is_empty()) {
            let (key, value) = line.split_once('=').unwrap_or((line, ""));
            props.set(key, value);
        }
        props
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Overwrite `key` where it already is, or append it.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `key=value` lines joined by `\n`, without a trailing newline.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn read_from(path: &Path) -> Result<Self, PropertiesError> {
        let text = fs::read_to_string(path).map_err(|source| PropertiesError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Properties::parse(&text))
    }

    pub fn write_to(&self, path: &Path) -> Result<(), PropertiesError> {
        fs::write(path, self.render()).map_err(|source| PropertiesError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Point the properties file at `path` to a new install directory and build.
pub fn rewrite_properties(
    path: &Path,
    keys: &PropertiesKeys,
    install_dir: &str,
    build_url: &str,
) -> Result<Properties, PropertiesError> {
    let mut props = Properties::read_from(path)?;
    props.set(keys.install_dir(), install_dir);
    props.set(keys.build_url(), build_url);
    props.write_to(path)?;

    debug!(path = %path.display(), entries = props.len(), "properties rewritten");
    Ok(props)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn keys() -> PropertiesKeys {
        PropertiesKeys::default()
    }

    #[test]
    fn rewriting_one_key_keeps_the_rest() {
        let mut props = Properties::parse("a=1\nb=2\n");
        props.set("a", "X");
        assert_eq!(props.render(), "a=X\nb=2");
    }

    #[test]
    fn value_keeps_everything_after_the_first_separator() {
        let props = Properties::parse("url=http://h/?x=1&y=2");
        assert_eq!(props.get("url"), Some("http://h/?x=1&y=2"));
        assert_eq!(props.render(), "url=http://h/?x=1&y=2");
    }

    #[test]
    fn line_without_separator_is_a_key_with_empty_value() {
        let props = Properties::parse("# comment\nflag\nk=v");
        assert_eq!(props.get("# comment"), Some(""));
        assert_eq!(props.get("flag"), Some(""));
        assert_eq!(props.render(), "# comment=\nflag=\nk=v");
    }

    #[test]
    fn blank_lines_and_crlf_are_dropped() {
        let props = Properties::parse("a=1\r\n\r\nb=2\r\n");
        assert_eq!(props.len(), 2);
        assert_eq!(props.render(), "a=1\nb=2");
    }

    #[test]
    fn repeated_key_keeps_first_position_and_last_value() {
        let props = Properties::parse("a=1\nb=2\na=3");
        assert_eq!(props.render(), "a=3\nb=2");
    }

    #[test]
    fn rewrite_updates_the_file_in_place() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cloud.properties");
        fs::write(&path, "NAME=idm\nINSTALL_DIR=/old\nPORT=8080\n").unwrap();

        let props = rewrite_properties(&path, &keys(), "/opt/idm", "http://h/b/1/idmpod.zip").unwrap();

        assert_eq!(props.get("INSTALL_DIR"), Some("/opt/idm"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "NAME=idm\nINSTALL_DIR=/opt/idm\nPORT=8080\nBUILD_URL=http://h/b/1/idmpod.zip"
        );
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cloud.properties");

        let err = rewrite_properties(&path, &keys(), "/opt", "http://h/").unwrap_err();
        assert!(matches!(err, PropertiesError::Read { .. }));
        assert!(!path.exists());
    }
}
