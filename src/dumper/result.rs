// Mon Feb 16 2026 - Alex

use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize)]
pub struct DumpResult {
    pub total_assemblies: usize,
    pub total_images: usize,
    pub total_types: usize,
    pub total_methods: usize,
    pub emitted_types: usize,
    pub total_wrappers_generated: usize,
    pub generated_files: Vec<PathBuf>,
    pub fake_methods: usize,
    pub fake_classes: usize,
    pub stub_addresses: usize,
    pub duplicates_suppressed: usize,
    pub mapping_entries: usize,
    pub report_path: Option<PathBuf>,
    pub listing_path: Option<PathBuf>,
    pub elapsed_ms: u64,
}

impl DumpResult {
    pub fn summary(&self) -> String {
        let mut text = String::new();
        text.push_str(&format!(
            "Assemblies: {}  Images: {}  Types: {}  Methods: {}\n",
            self.total_assemblies, self.total_images, self.total_types, self.total_methods
        ));
        text.push_str(&format!(
            "Declarations: {}  Class wrappers: {}  Files: {}\n",
            self.emitted_types,
            self.total_wrappers_generated,
            self.generated_files.len()
        ));
        text.push_str(&format!(
            "Fake methods: {}  Fake classes: {}  Stub addresses: {}  Duplicates: {}\n",
            self.fake_methods, self.fake_classes, self.stub_addresses, self.duplicates_suppressed
        ));
        if self.mapping_entries > 0 {
            text.push_str(&format!("Mapping entries: {}\n", self.mapping_entries));
        }
        text
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
