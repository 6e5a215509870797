// Mon Feb 16 2026 - Alex

use crate::classifier::{Classification, FakeMethodReport, MethodClassifier};
use crate::config::DumperConfig;
use crate::dumper::{DumpError, DumpResult};
use crate::mapping::{load_mapping, NameMapping};
use crate::memory::{Address, LayoutReader, MemoryProbe};
use crate::metadata::{MetadataEnumerator, MetadataSnapshot};
use crate::output::{render_listing, EmitFilter, InteropSynthesizer, UnitWriter};
use crate::resolver::TypeResolver;
use crate::runtime::{ensure_attached, RuntimeApi};
use crate::utils::ScopedTimer;
use std::time::Instant;

/// One dump: enumerate, classify, resolve and write. Every registry built
/// along the way lives only for the duration of a `run`.
pub struct DumpSession {
    config: DumperConfig,
    mapping: NameMapping,
    image_base: Address,
}

impl DumpSession {
    /// Validates the configuration and loads the mapping file, if any. A
    /// missing mapping file is not an error.
    pub fn new(config: DumperConfig) -> Result<Self, DumpError> {
        config.validate()?;
        let mapping = match &config.mapping_file {
            Some(path) if path.exists() => load_mapping(path)?,
            Some(path) => {
                log::warn!("Mapping file {} not found, using raw names", path.display());
                NameMapping::new()
            }
            None => NameMapping::new(),
        };
        Ok(Self {
            config,
            mapping,
            image_base: Address::zero(),
        })
    }

    pub fn with_mapping(mut self, mapping: NameMapping) -> Self {
        self.mapping = mapping;
        self
    }

    /// Load address of the host image, used for RVAs in the report.
    pub fn with_image_base(mut self, base: Address) -> Self {
        self.image_base = base;
        self
    }

    pub fn config(&self) -> &DumperConfig {
        &self.config
    }

    pub fn mapping(&self) -> &NameMapping {
        &self.mapping
    }

    /// Dumps a live runtime. Nothing is written unless every required export
    /// is bound and the thread attaches.
    pub fn run(&self, api: &dyn RuntimeApi, probe: &dyn MemoryProbe) -> Result<DumpResult, DumpError> {
        api.verify_bindings()?;
        ensure_attached(api)?;

        let layout = self.config.layout();
        let snapshot = {
            let _timer = ScopedTimer::new("enumerate");
            MetadataEnumerator::new(api)
                .with_layout_reader(LayoutReader::new(&layout, probe))
                .enumerate()
        };
        self.run_snapshot(&snapshot, probe)
    }

    /// Classifies and emits an already enumerated snapshot.
    pub fn run_snapshot(&self, snapshot: &MetadataSnapshot, probe: &dyn MemoryProbe) -> Result<DumpResult, DumpError> {
        let started = Instant::now();
        let output = &self.config.output;

        let classification = {
            let _timer = ScopedTimer::new("classify");
            MethodClassifier::new(self.config.classifier.clone()).classify(snapshot)
        };

        let policy = &self.config.namespaces;
        let filter = EmitFilter::new(policy, &classification, &self.mapping);
        let registry = filter.build_registry(snapshot);
        let resolver = TypeResolver::new(snapshot, &registry, &self.mapping, policy);
        let synthesis = {
            let _timer = ScopedTimer::new("synthesize");
            InteropSynthesizer::new(snapshot, &classification, &resolver, &filter, output).synthesize()
        };

        let writer = UnitWriter::new(&output.output_dir);
        let generated_files = writer.write_units(&synthesis.units)?;

        let report_path = if output.write_report {
            let report = self.report(&classification, probe);
            Some(writer.write_text(&output.report_file, &report)?)
        } else {
            None
        };
        let listing_path = if output.write_listing {
            Some(writer.write_text(&output.listing_file, &render_listing(snapshot))?)
        } else {
            None
        };

        let result = DumpResult {
            total_assemblies: snapshot.assembly_count,
            total_images: snapshot.images.len(),
            total_types: snapshot.types.len(),
            total_methods: classification.total_methods(),
            emitted_types: synthesis.stats.declarations,
            total_wrappers_generated: synthesis.stats.class_wrappers,
            generated_files,
            fake_methods: classification.fake_method_count(),
            fake_classes: classification.fake_class_count(),
            stub_addresses: classification.stub_count(),
            duplicates_suppressed: synthesis.stats.duplicate_types + synthesis.stats.duplicate_members,
            mapping_entries: self.mapping.len(),
            report_path,
            listing_path,
            elapsed_ms: started.elapsed().as_millis() as u64,
        };
        log::info!(
            "Dump complete: {} files, {} class wrappers, {} fake methods",
            result.generated_files.len(),
            result.total_wrappers_generated,
            result.fake_methods
        );
        Ok(result)
    }

    fn report(&self, classification: &Classification, probe: &dyn MemoryProbe) -> String {
        FakeMethodReport::new(classification)
            .with_probe(probe)
            .with_image_base(self.image_base)
            .render()
    }
}
