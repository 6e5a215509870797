// Mon Feb 16 2026 - Alex

use crate::classifier::{Classification, StubInspection, StubMatcher};
use crate::memory::{Address, MemoryProbe, NullProbe};
use crate::runtime::TypeHandle;
use itertools::Itertools;
use std::collections::BTreeMap;

const RULE: &str = "// ============================================================================\n";

/// Renders `fake_methods.txt` for one classification.
pub struct FakeMethodReport<'a> {
    classification: &'a Classification,
    probe: &'a dyn MemoryProbe,
    image_base: Address,
    generated_at: String,
}

impl<'a> FakeMethodReport<'a> {
    pub fn new(classification: &'a Classification) -> Self {
        Self {
            classification,
            probe: &NullProbe,
            image_base: Address::zero(),
            generated_at: unix_timestamp(),
        }
    }

    /// Probe used to read stub bodies. Without one every stub is `[unreadable]`.
    pub fn with_probe(mut self, probe: &'a dyn MemoryProbe) -> Self {
        self.probe = probe;
        self
    }

    /// Load address of the host image, for RVA columns.
    pub fn with_image_base(mut self, base: Address) -> Self {
        self.image_base = base;
        self
    }

    pub fn with_generated_at(mut self, stamp: &str) -> Self {
        self.generated_at = stamp.to_string();
        self
    }

    pub fn render(&self) -> String {
        let mut report = String::new();
        report.push_str(&self.header());
        report.push_str(&self.stub_section());
        report.push_str(&self.fake_class_section());
        report.push_str(&self.fake_method_section());
        report.push_str(&self.partial_section());
        report.push_str("\n// === End of Report ===\n");
        report
    }

    fn header(&self) -> String {
        let c = self.classification;
        let config = c.config();
        let mut text = String::new();
        text.push_str(RULE);
        text.push_str("// Obfuscation Fake Method Detection Report\n");
        text.push_str(&format!("// Generated: {}\n", self.generated_at));
        text.push_str(RULE);
        text.push_str("//\n");
        text.push_str("// Detection Configuration:\n");
        text.push_str(&format!("//   Pointer sharing threshold: {}\n", config.pointer_sharing_threshold));
        text.push_str(&format!("//   VTable whitelist enabled:  {}\n", yes_no(config.whitelist_vtable_methods)));
        text.push_str(&format!("//   Stub pattern check:        {}\n", yes_no(config.check_stub_patterns)));
        text.push_str(&format!(
            "//   Assembly whitelist:        {}\n",
            config.exempt_prefixes.iter().map(|p| format!("{}*", p)).join(", ")
        ));
        text.push_str("//\n");
        text.push_str("// Summary:\n");
        text.push_str(&format!("//   Total methods analyzed:    {}\n", c.total_methods()));
        text.push_str(&format!("//   Whitelisted (skipped):     {}\n", c.exempt_methods()));
        text.push_str(&format!("//   Generic shared (skipped):  {}\n", c.generic_skipped()));
        text.push_str(&format!("//   Fake methods detected:     {}\n", c.fake_method_count()));
        text.push_str(&format!("//   Fake classes detected:     {}\n", c.fake_class_count()));
        text.push_str(&format!("//   Unique stub pointers:      {}\n", c.stub_count()));
        text.push_str(&format!("//   VTable methods (whitelist): {}\n", c.vtable_method_count()));
        text.push_str(RULE);
        text.push('\n');
        text
    }

    fn stub_section(&self) -> String {
        let config = self.classification.config();
        let matcher = StubMatcher::new(config.max_stub_body_size);
        let mut text = String::new();
        text.push_str(RULE);
        text.push_str(&format!("// STUB POINTERS (shared by {}+ methods)\n", config.pointer_sharing_threshold));
        text.push_str(RULE);
        text.push('\n');

        for (addr, count) in self.classification.stub_addresses() {
            text.push_str(&format!(
                "// Pointer {} (RVA: 0x{:x}) - shared by {} methods",
                addr,
                addr.rva(self.image_base),
                count
            ));
            let inspection = matcher.inspect(self.probe, addr);
            match inspection.bytes() {
                Some(bytes) => {
                    let shown = bytes.iter().take(8).map(|b| format!("{:02x}", b)).join(" ");
                    text.push_str(&format!(" - bytes: {}", shown));
                }
                None => text.push_str(" - [unreadable]"),
            }
            if config.check_stub_patterns {
                if let StubInspection::Match(idiom, _) = &inspection {
                    text.push_str(&format!(" - idiom: {}", idiom));
                }
            }
            text.push('\n');
        }
        text
    }

    fn fake_class_section(&self) -> String {
        let mut text = String::new();
        text.push('\n');
        text.push_str(RULE);
        text.push_str(&format!("// ENTIRELY FAKE CLASSES ({} detected)\n", self.classification.fake_class_count()));
        text.push_str(RULE);
        text.push('\n');

        for analysis in self.classification.class_analysis().iter().filter(|a| a.is_entirely_fake) {
            text.push_str(&format!(
                "// [FAKE CLASS] {} - {}/{} methods are fake\n",
                analysis.full_name, analysis.fake_methods, analysis.total_methods
            ));
        }
        text
    }

    fn fake_method_section(&self) -> String {
        let c = self.classification;
        let mut text = String::new();
        text.push('\n');
        text.push_str(RULE);
        text.push_str(&format!("// ALL FAKE METHODS ({} detected)\n", c.fake_method_count()));
        text.push_str(RULE);
        text.push('\n');

        // Distinct owners may share a full name; the handle keeps them apart.
        let mut by_class: BTreeMap<(&str, TypeHandle), Vec<_>> = BTreeMap::new();
        for fake in c.fake_methods() {
            by_class.entry((fake.class_name.as_str(), fake.owner)).or_default().push(fake);
        }

        for ((class_name, owner), methods) in by_class {
            text.push_str(&format!("// --- {}", class_name));
            if c.is_entirely_fake_class(owner) {
                text.push_str(" [ENTIRE CLASS IS FAKE]");
            }
            text.push_str(" ---\n");

            for fake in methods {
                text.push_str(&format!("//   {} {}", fake.reason.tag(), fake.signature));
                if let Some(addr) = fake.code_address.and_then(Address::non_null) {
                    text.push_str(&format!(" // RVA: 0x{:x}", addr.rva(self.image_base)));
                }
                text.push('\n');
            }
            text.push('\n');
        }
        text
    }

    fn partial_section(&self) -> String {
        let mut text = String::new();
        text.push_str(RULE);
        text.push_str("// PARTIALLY AFFECTED CLASSES (mix of real + fake methods)\n");
        text.push_str(RULE);
        text.push('\n');

        for analysis in self.classification.class_analysis().iter().filter(|a| !a.is_entirely_fake) {
            text.push_str(&format!(
                "// {} - {} fake / {} real / {} total\n",
                analysis.full_name, analysis.fake_methods, analysis.real_methods, analysis.total_methods
            ));
        }
        text
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn unix_timestamp() -> String {
    let now = std::time::SystemTime::now();
    let duration = now.duration_since(std::time::UNIX_EPOCH).unwrap_or_default();
    format!("{}", duration.as_secs())
}
