mod properties;
pub mod wizard;

pub use properties::{PropertiesError, rewrite_properties};

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::settings::PropertiesKeys;

pub const CLOUD_XML: &str = "cloud.xml";
pub const CLOUD_PROPERTIES: &str = "cloud.properties";

#[derive(thiserror::Error, Debug)]
pub enum InstallError {
    #[error("install form has errors: {0}")]
    Blocked(String),
    #[error("no {0} was selected")]
    MissingField(&'static str),
    #[error(transparent)]
    Properties(#[from] PropertiesError),
}

/// Where the install flow ends up once the properties file is rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallStatus {
    Installing { build_link: String, install_dir: PathBuf },
}

impl fmt::Display for InstallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallStatus::Installing { build_link, install_dir } => {
                write!(f, "Installing {build_link} into {}", install_dir.display())
            }
        }
    }
}

/// The picked file must be named exactly `expected`.
fn check_file_name(path: &Path, expected: &str) -> Result<(), String> {
    match path.file_name().and_then(|name| name.to_str()) {
        Some(name) if name == expected => Ok(()),
        _ => Err(format!("Please select a file named {expected}")),
    }
}

/// State of the install form for one build, consumed by [`submit`].
///
/// [`submit`]: BuildInstallFormState::submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInstallFormState {
    build_link: String,
    install_dir: Option<PathBuf>,
    cloud_xml: Option<PathBuf>,
    cloud_xml_error: Option<String>,
    cloud_props: Option<PathBuf>,
    cloud_props_error: Option<String>,
}

impl BuildInstallFormState {
    pub fn new(build_link: impl Into<String>) -> Self {
        Self {
            build_link: build_link.into(),
            install_dir: None,
            cloud_xml: None,
            cloud_xml_error: None,
            cloud_props: None,
            cloud_props_error: None,
        }
    }

    #[cfg(test)]
    pub fn build_link(&self) -> &str {
        &self.build_link
    }

    #[cfg(test)]
    pub fn install_dir(&self) -> Option<&Path> {
        self.install_dir.as_deref()
    }

    #[cfg(test)]
    pub fn cloud_xml(&self) -> Option<&Path> {
        self.cloud_xml.as_deref()
    }

    pub fn cloud_xml_error(&self) -> Option<&str> {
        self.cloud_xml_error.as_deref()
    }

    #[cfg(test)]
    pub fn cloud_props(&self) -> Option<&Path> {
        self.cloud_props.as_deref()
    }

    pub fn cloud_props_error(&self) -> Option<&str> {
        self.cloud_props_error.as_deref()
    }

    pub fn pick_install_dir(&mut self, dir: impl Into<PathBuf>) {
        self.install_dir = Some(dir.into());
    }

    /// A wrongly named file clears the field and records the message.
    pub fn pick_cloud_xml(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        (self.cloud_xml, self.cloud_xml_error) = match check_file_name(&path, CLOUD_XML) {
            Ok(()) => (Some(path), None),
            Err(msg) => (None, Some(msg)),
        };
    }

    pub fn pick_cloud_props(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        (self.cloud_props, self.cloud_props_error) = match check_file_name(&path, CLOUD_PROPERTIES) {
            Ok(()) => (Some(path), None),
            Err(msg) => (None, Some(msg)),
        };
    }

    /// A field blocks submission only while it is empty and carries an
    /// error; a field that was never picked does not.
    pub fn submission_blocked(&self) -> bool {
        (self.cloud_xml.is_none() && self.cloud_xml_error.is_some())
            || (self.cloud_props.is_none() && self.cloud_props_error.is_some())
    }

    /// Rewrite the picked properties file for this build and move to the
    /// installing status.
    pub fn submit(self, keys: &PropertiesKeys) -> Result<InstallStatus, InstallError> {
        if self.submission_blocked() {
            let messages: Vec<&str> = [self.cloud_xml_error(), self.cloud_props_error()]
                .into_iter()
                .flatten()
                .collect();
            return Err(InstallError::Blocked(messages.join("; ")));
        }

        let install_dir = self.install_dir.ok_or(InstallError::MissingField("install directory"))?;
        let cloud_props = self.cloud_props.ok_or(InstallError::MissingField(CLOUD_PROPERTIES))?;

        rewrite_properties(&cloud_props, keys, &install_dir.to_string_lossy(), &self.build_link)?;

        let status = InstallStatus::Installing {
            build_link: self.build_link,
            install_dir,
        };
        info!(%status, properties = %cloud_props.display(), "install submitted");
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const BUILD: &str = "http://build/me/id360/webhost/feature-x/101/idmpod.zip";

    #[test]
    fn wrong_file_name_sets_an_error_and_blocks() {
        let mut form = BuildInstallFormState::new(BUILD);
        form.pick_cloud_xml("/tmp/notes.xml");

        assert_eq!(form.cloud_xml(), None);
        assert!(form.cloud_xml_error().is_some());
        assert!(form.submission_blocked());

        form.pick_cloud_xml("/etc/idm/cloud.xml");
        assert_eq!(form.cloud_xml(), Some(Path::new("/etc/idm/cloud.xml")));
        assert_eq!(form.cloud_xml_error(), None);
        assert!(!form.submission_blocked());
    }

    #[test]
    fn name_check_is_exact_and_case_sensitive() {
        let mut form = BuildInstallFormState::new(BUILD);
        form.pick_cloud_props("/etc/idm/Cloud.properties");
        assert!(form.cloud_props_error().is_some());

        form.pick_cloud_props("/etc/idm/cloud.properties.bak");
        assert!(form.cloud_props_error().is_some());

        form.pick_cloud_props("/etc/idm/cloud.properties");
        assert!(form.cloud_props_error().is_none());
    }

    #[test]
    fn picks_are_recorded_on_the_form() {
        let mut form = BuildInstallFormState::new(BUILD);
        assert_eq!(form.build_link(), BUILD);
        assert_eq!(form.install_dir(), None);
        assert_eq!(form.cloud_props(), None);

        form.pick_install_dir("/opt/idm");
        form.pick_cloud_props("/etc/idm/cloud.properties");

        assert_eq!(form.install_dir(), Some(Path::new("/opt/idm")));
        assert_eq!(form.cloud_props(), Some(Path::new("/etc/idm/cloud.properties")));
    }

    #[test]
    fn unfilled_fields_do_not_block() {
        let form = BuildInstallFormState::new(BUILD);
        assert!(!form.submission_blocked());
    }

    #[test]
    fn blocked_form_is_rejected() {
        let mut form = BuildInstallFormState::new(BUILD);
        form.pick_install_dir("/opt/idm");
        form.pick_cloud_props("/tmp/other.txt");

        let err = form.submit(&PropertiesKeys::default()).unwrap_err();
        assert!(matches!(err, InstallError::Blocked(ref msg) if msg.contains(CLOUD_PROPERTIES)));
    }

    #[test]
    fn missing_properties_file_is_reported() {
        let mut form = BuildInstallFormState::new(BUILD);
        form.pick_install_dir("/opt/idm");

        let err = form.submit(&PropertiesKeys::default()).unwrap_err();
        assert!(matches!(err, InstallError::MissingField(CLOUD_PROPERTIES)));
    }

    #[test]
    fn submit_rewrites_properties_and_reports_installing() {
        let dir = TempDir::new().unwrap();
        let props = dir.path().join(CLOUD_PROPERTIES);
        let xml = dir.path().join(CLOUD_XML);
        fs::write(&props, "INSTALL_DIR=/old\nBUILD_URL=http://old/\nMODE=cloud\n").unwrap();
        fs::write(&xml, "<cloud/>").unwrap();

        let mut form = BuildInstallFormState::new(BUILD);
        form.pick_install_dir("/opt/idm");
        form.pick_cloud_xml(&xml);
        form.pick_cloud_props(&props);

        let status = form.submit(&PropertiesKeys::default()).unwrap();

        assert_eq!(
            status,
            InstallStatus::Installing {
                build_link: BUILD.to_string(),
                install_dir: PathBuf::from("/opt/idm"),
            }
        );
        assert_eq!(
            fs::read_to_string(&props).unwrap(),
            format!("INSTALL_DIR=/opt/idm\nBUILD_URL={BUILD}\nMODE=cloud")
        );
        assert_eq!(fs::read_to_string(&xml).unwrap(), "<cloud/>");
    }
}
