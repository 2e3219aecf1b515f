pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

/// Build metadata surfaced in response headers and the page footer.
#[derive(Debug)]
pub struct VersionInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub commit: Option<&'static str>,
}

impl VersionInfo {
    pub fn display(&self) -> String {
        match self.commit {
            Some(commit) => format!("{} ({commit})", self.version),
            None => self.version.to_string(),
        }
    }
}

pub static VERSION_INFO: VersionInfo = VersionInfo {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
    commit: option_env!("OGSHARE_COMMIT"),
};
