use anyhow::{Result, bail};
use std::path::PathBuf;

use super::{BuildInstallFormState, CLOUD_PROPERTIES, CLOUD_XML, InstallStatus};
use crate::helpers::prompt_line;
use crate::settings::PropertiesKeys;

/// Ask for a path until `pick` accepts it; an empty answer cancels.
fn ask_path(
    form: &mut BuildInstallFormState,
    label: &str,
    pick: fn(&mut BuildInstallFormState, PathBuf),
    error: fn(&BuildInstallFormState) -> Option<&str>,
) -> Result<()> {
    loop {
        let answer = prompt_line(&format!("Path to {label} (empty to cancel)"))?;
        if answer.trim().is_empty() {
            bail!("install cancelled");
        }

        pick(form, PathBuf::from(answer.trim()));
        match error(form) {
            Some(msg) => println!("  ! {msg}"),
            None => return Ok(()),
        }
    }
}

/// Guided install: install directory, `cloud.xml`, `cloud.properties`, submit.
pub fn run(build_link: &str, keys: &PropertiesKeys) -> Result<InstallStatus> {
    println!("\n=== Install ===");
    println!("Build:    {build_link}");

    let mut form = BuildInstallFormState::new(build_link);

    ask_path(&mut form, "install directory", |f, p| f.pick_install_dir(p), |_| None)?;
    ask_path(
        &mut form,
        CLOUD_XML,
        |f, p| f.pick_cloud_xml(p),
        BuildInstallFormState::cloud_xml_error,
    )?;
    ask_path(
        &mut form,
        CLOUD_PROPERTIES,
        |f, p| f.pick_cloud_props(p),
        BuildInstallFormState::cloud_props_error,
    )?;

    Ok(form.submit(keys)?)
}
