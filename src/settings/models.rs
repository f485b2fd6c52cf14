use serde::{Deserialize, Serialize};

/// Public model; serde is confined to this module tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub(crate) root_url: String,
    #[serde(default = "default_user_agent")]
    pub(crate) user_agent: String,
    #[serde(default = "default_installable_extension")]
    pub(crate) installable_extension: String,
    #[serde(default)]
    pub(crate) properties_keys: PropertiesKeys,
}

/// Names of the two keys the install flow rewrites in `cloud.properties`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertiesKeys {
    pub(crate) install_dir: String,
    pub(crate) build_url: String,
}

impl Default for PropertiesKeys {
    fn default() -> Self {
        Self {
            install_dir: "INSTALL_DIR".to_string(),
            build_url: "BUILD_URL".to_string(),
        }
    }
}

fn default_user_agent() -> String {
    format!("webhost-build-browser/{}", env!("CARGO_PKG_VERSION"))
}

fn default_installable_extension() -> String {
    "zip".to_string()
}

impl Settings {
    // Borrowing getters (no clones).
    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn installable_extension(&self) -> &str {
        &self.installable_extension
    }

    pub fn properties_keys(&self) -> &PropertiesKeys {
        &self.properties_keys
    }

    /// Replace the listing root, keeping the trailing separator the parser
    /// relies on when it builds item links.
    pub fn with_root_url(mut self, root: &str) -> Self {
        self.root_url = if root.ends_with('/') { root.to_string() } else { format!("{root}/") };
        self
    }
}

impl PropertiesKeys {
    pub fn install_dir(&self) -> &str {
        &self.install_dir
    }

    pub fn build_url(&self) -> &str {
        &self.build_url
    }
}
