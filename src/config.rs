// Mon Feb 16 2026 - Alex

use crate::classifier::ClassifierConfig;
use crate::memory::{LayoutVersion, MemoryError, RuntimeLayout};
use crate::resolver::NamespacePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
    #[error(transparent)]
    Layout(#[from] MemoryError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
    /// Unit files are named `{prefix}.{Namespace}.cs`.
    pub file_prefix: String,
    pub report_file: String,
    pub listing_file: String,
    pub write_report: bool,
    pub write_listing: bool,
    /// Emit a `/// <summary>` line naming the raw identifier of mapped declarations.
    pub friendly_summaries: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("sdk"),
            file_prefix: "GameSDK".to_string(),
            report_file: "fake_methods.txt".to_string(),
            listing_file: "dump.cs".to_string(),
            write_report: true,
            write_listing: true,
            friendly_summaries: true,
        }
    }
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_file_prefix(mut self, prefix: &str) -> Self {
        self.file_prefix = prefix.to_string();
        self
    }

    pub fn with_report(mut self, enabled: bool) -> Self {
        self.write_report = enabled;
        self
    }

    pub fn with_listing(mut self, enabled: bool) -> Self {
        self.write_listing = enabled;
        self
    }

    pub fn with_friendly_summaries(mut self, enabled: bool) -> Self {
        self.friendly_summaries = enabled;
        self
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file)
    }

    pub fn listing_path(&self) -> PathBuf {
        self.output_dir.join(&self.listing_file)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DumperConfig {
    pub classifier: ClassifierConfig,
    pub namespaces: NamespacePolicy,
    pub output: OutputConfig,
    pub layout_version: LayoutVersion,
    pub mapping_file: Option<PathBuf>,
    /// Host binary whose timestamp decides freshness.
    pub host_binary: Option<PathBuf>,
}

impl Default for DumperConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            namespaces: NamespacePolicy::default(),
            output: OutputConfig::default(),
            layout_version: LayoutVersion::default(),
            mapping_file: None,
            host_binary: None,
        }
    }
}

impl DumperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn with_classifier(mut self, classifier: ClassifierConfig) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.classifier.pointer_sharing_threshold = threshold;
        self
    }

    pub fn with_namespaces(mut self, policy: NamespacePolicy) -> Self {
        self.namespaces = policy;
        self
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output.output_dir = dir.into();
        self
    }

    pub fn with_layout_version(mut self, version: LayoutVersion) -> Self {
        self.layout_version = version;
        self
    }

    pub fn with_mapping_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.mapping_file = Some(path.into());
        self
    }

    pub fn with_host_binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.host_binary = Some(path.into());
        self
    }

    pub fn layout(&self) -> RuntimeLayout {
        RuntimeLayout::for_version(self.layout_version)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.classifier.pointer_sharing_threshold == 0 {
            return Err(ConfigError::Invalid(
                "pointer_sharing_threshold must be greater than 0".to_string(),
            ));
        }
        if self.classifier.exempt_prefixes.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::Invalid("exempt prefixes must not be empty".to_string()));
        }
        if self.output.file_prefix.is_empty() {
            return Err(ConfigError::Invalid("file_prefix must not be empty".to_string()));
        }
        if self.output.report_file.is_empty() || self.output.listing_file.is_empty() {
            return Err(ConfigError::Invalid("report and listing file names must be set".to_string()));
        }
        self.layout().validate()?;
        Ok(())
    }
}
