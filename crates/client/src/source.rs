//! Where snapshots are published.

use serde::{Deserialize, Serialize};

const DIST_BASE: &str = "https://raw.githubusercontent.com/MRT-Map/gatelogue/refs/heads/dist";

/// Which published artefact to read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(strum::Display, strum::EnumString, strum::EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DataSource {
    /// `data.json`, every value paired with its sources
    #[default]
    WithSources,
    /// `data_no_sources.json`, bare values only
    NoSources,
}

impl DataSource {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::WithSources => "data.json",
            Self::NoSources => "data_no_sources.json",
        }
    }

    pub fn url(self) -> String {
        format!("{DIST_BASE}/{}", self.file_name())
    }

    pub fn has_sources(self) -> bool {
        matches!(self, Self::WithSources)
    }
}
