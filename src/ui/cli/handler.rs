// Mon Feb 16 2026 - Alex

use super::args::{Args, Command, DumpArgs, ExportsArgs, FreshArgs, ProbeArgs, ReportArgs};
use crate::classifier::{FakeMethodReport, MethodClassifier};
use crate::dumper::{DumpError, DumpResult, DumpSession};
use crate::memory::{BufferProbe, MemoryProbe, NullProbe, ProcessProbe};
use crate::metadata::MetadataSnapshot;
use crate::output::is_fresh;
use crate::runtime::ExportTable;
use crate::ui::banner::Banner;
use crate::utils::{format_duration, LoggingUtils};
use anyhow::Context;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub struct CommandHandler {
    quiet: bool,
    json_output: bool,
}

/// What a `dump` invocation ended up doing.
#[derive(Debug)]
pub enum DumpOutcome {
    UpToDate(PathBuf),
    Dumped(DumpResult),
}

impl CommandHandler {
    pub fn new() -> Self {
        Self {
            quiet: false,
            json_output: false,
        }
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn with_json_output(mut self, json_output: bool) -> Self {
        self.json_output = json_output;
        self
    }

    pub fn execute(mut self, args: Args) -> anyhow::Result<()> {
        if args.no_color {
            colored::control::set_override(false);
        }
        if !args.quiet && !args.json_output {
            Banner::print_default();
        }

        self.setup_logging(&args)?;
        self.quiet = args.quiet;
        self.json_output = args.json_output;

        match args.command {
            Command::Dump(dump_args) => self.handle_dump(dump_args).map(|_| ()),
            Command::Report(report_args) => self.handle_report(report_args).map(|_| ()),
            Command::Fresh(fresh_args) => self.handle_fresh(fresh_args).map(|_| ()),
            Command::Exports(exports_args) => self.handle_exports(exports_args),
        }
    }

    fn setup_logging(&self, args: &Args) -> anyhow::Result<()> {
        let level = if args.verbose > 0 {
            LoggingUtils::level_from_verbosity(args.verbose)
        } else {
            LoggingUtils::level_from_str(&args.log_level)
        };

        if args.no_color {
            env_logger::Builder::new()
                .filter_level(level)
                .format_timestamp(None)
                .write_style(env_logger::WriteStyle::Never)
                .init();
        } else {
            env_logger::Builder::new().filter_level(level).format_timestamp(None).init();
        }

        Ok(())
    }

    pub fn handle_dump(&self, args: DumpArgs) -> anyhow::Result<DumpOutcome> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;
        let config = args.to_config()?;

        if !args.force {
            if let Some(host) = &config.host_binary {
                if is_fresh(&config.output.output_dir, host) {
                    self.note(&format!(
                        "SDK in {} is newer than {}, skipping (use --force to regenerate)",
                        config.output.output_dir.display(),
                        host.display()
                    ));
                    return Ok(DumpOutcome::UpToDate(config.output.output_dir.clone()));
                }
            }
        }

        let started = Instant::now();
        let snapshot = MetadataSnapshot::load(&args.snapshot)?;
        log::info!(
            "Loaded snapshot with {} images and {} types",
            snapshot.images.len(),
            snapshot.types.len()
        );

        let session = match DumpSession::new(config.clone()) {
            Ok(session) => session,
            Err(DumpError::Mapping(err)) => {
                log::warn!("Ignoring unusable mapping file: {}", err);
                let mut fallback = config;
                fallback.mapping_file = None;
                DumpSession::new(fallback)?
            }
            Err(err) => return Err(err.into()),
        };
        let session = session.with_image_base(args.probe.image_base);

        let probe = open_probe(&args.probe)?;
        let result = session.run_snapshot(&snapshot, probe.as_ref())?;

        if self.json_output {
            println!("{}", result.to_json());
        } else if !self.quiet {
            println!("{}", "Dump complete".green().bold());
            print!("{}", result.summary());
            for file in &result.generated_files {
                println!("  {} {}", "+".green(), file.display());
            }
            println!("Finished in {}", format_duration(started.elapsed()));
        }
        Ok(DumpOutcome::Dumped(result))
    }

    pub fn handle_report(&self, args: ReportArgs) -> anyhow::Result<PathBuf> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;
        let config = args.to_config()?;
        config.validate()?;

        let snapshot = MetadataSnapshot::load(&args.snapshot)?;
        let classification = MethodClassifier::new(config.classifier.clone()).classify(&snapshot);
        let probe = open_probe(&args.probe)?;
        let report = FakeMethodReport::new(&classification)
            .with_probe(probe.as_ref())
            .with_image_base(args.probe.image_base)
            .render();

        std::fs::write(&args.output, report)
            .with_context(|| format!("Failed to write report to {}", args.output.display()))?;

        self.note(&format!(
            "{} fake methods across {} stub addresses, report written to {}",
            classification.fake_method_count(),
            classification.stub_count(),
            args.output.display()
        ));
        Ok(args.output)
    }

    /// Prints whether the SDK is current. A stale SDK is not an error.
    pub fn handle_fresh(&self, args: FreshArgs) -> anyhow::Result<bool> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;
        let fresh = is_fresh(&args.output, &args.host);
        println!("{}", self.freshness_line(&args.output, fresh));
        Ok(fresh)
    }

    fn freshness_line(&self, output: &Path, fresh: bool) -> String {
        if self.json_output {
            serde_json::json!({ "fresh": fresh, "output": output.display().to_string() }).to_string()
        } else if fresh {
            format!("{} {} is up to date", "[OK]".green(), output.display())
        } else {
            format!("{} {} needs regenerating", "[STALE]".yellow(), output.display())
        }
    }

    fn handle_exports(&self, args: ExportsArgs) -> anyhow::Result<()> {
        let table = ExportTable::from_file(&args.binary)?;
        log::info!("{} exports in {}", table.len(), args.binary.display());

        let resolutions = table.verify()?;
        let text = ExportTable::resolution_log(&resolutions);
        match &args.output {
            Some(path) => {
                std::fs::write(path, &text)
                    .with_context(|| format!("Failed to write resolution log to {}", path.display()))?;
                self.note(&format!("{} exports resolved, log written to {}", resolutions.len(), path.display()));
            }
            None => print!("{}", text),
        }
        Ok(())
    }

    fn note(&self, message: &str) {
        if !self.quiet && !self.json_output {
            println!("{} {}", "[*]".blue(), message);
        }
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn open_probe(args: &ProbeArgs) -> anyhow::Result<Box<dyn MemoryProbe>> {
    if let Some(pid) = args.pid {
        log::info!("Reading stub prologues from process {}", pid);
        return Ok(Box::new(ProcessProbe::new(pid)));
    }
    if let Some(path) = &args.memory {
        let data = std::fs::read(path).with_context(|| format!("Failed to read memory image {}", path.display()))?;
        log::info!("Reading stub prologues from {} ({} bytes at {})", path.display(), data.len(), args.memory_base);
        return Ok(Box::new(BufferProbe::new(args.memory_base, data)));
    }
    Ok(Box::new(NullProbe))
}
