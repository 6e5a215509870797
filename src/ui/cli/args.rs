// Mon Feb 16 2026 - Alex

use crate::config::DumperConfig;
use crate::memory::{Address, LayoutVersion};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "il2cpp-sdk-dumper")]
#[command(author = "Alex")]
#[command(version)]
#[command(about = "Generates C# interop wrappers from IL2CPP runtime metadata", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    /// Raises the log level once per occurrence, overriding --log-level.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(long, global = true)]
    pub no_color: bool,

    #[arg(long, global = true)]
    pub json_output: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify and emit the SDK from a saved metadata snapshot.
    Dump(DumpArgs),
    /// Write only the fake-method report.
    Report(ReportArgs),
    /// Check whether an existing SDK is newer than the host binary.
    Fresh(FreshArgs),
    /// Resolve the runtime exports of a host binary.
    Exports(ExportsArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    V24,
    V29,
}

impl From<LayoutArg> for LayoutVersion {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::V24 => LayoutVersion::V24,
            LayoutArg::V29 => LayoutVersion::V29,
        }
    }
}

/// Where stub prologue bytes are read from.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ProbeArgs {
    /// Live process to read stub prologues from.
    #[arg(long, conflicts_with = "memory")]
    pub pid: Option<i32>,

    /// Captured memory image to read stub prologues from.
    #[arg(long)]
    pub memory: Option<PathBuf>,

    /// Address the captured image was taken at (hex).
    #[arg(long, default_value = "0", value_parser = parse_address)]
    pub memory_base: Address,

    /// Host image load address, used to print RVAs (hex).
    #[arg(long, default_value = "0", value_parser = parse_address)]
    pub image_base: Address,
}

#[derive(Parser, Debug)]
pub struct DumpArgs {
    /// Metadata snapshot JSON.
    #[arg(short, long)]
    pub snapshot: PathBuf,

    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(short, long)]
    pub mapping: Option<PathBuf>,

    #[arg(short, long)]
    pub threshold: Option<usize>,

    #[arg(long)]
    pub prefix: Option<String>,

    #[arg(long, value_enum)]
    pub layout: Option<LayoutArg>,

    /// Host binary; an SDK newer than it is left alone unless --force is given.
    #[arg(long)]
    pub host: Option<PathBuf>,

    #[arg(short, long)]
    pub force: bool,

    #[arg(long)]
    pub no_report: bool,

    #[arg(long)]
    pub no_listing: bool,

    #[command(flatten)]
    pub probe: ProbeArgs,
}

#[derive(Parser, Debug)]
pub struct ReportArgs {
    #[arg(short, long)]
    pub snapshot: PathBuf,

    #[arg(short, long, default_value = "fake_methods.txt")]
    pub output: PathBuf,

    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub threshold: Option<usize>,

    #[command(flatten)]
    pub probe: ProbeArgs,
}

#[derive(Parser, Debug)]
pub struct FreshArgs {
    #[arg(short, long, default_value = "sdk")]
    pub output: PathBuf,

    #[arg(long)]
    pub host: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ExportsArgs {
    #[arg(short, long)]
    pub binary: PathBuf,

    /// Writes the resolution log here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn parse_address(s: &str) -> Result<Address, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches("0X");
    u64::from_str_radix(digits, 16)
        .map(Address::new)
        .map_err(|e| format!("Invalid address '{}': {}", s, e))
}

fn base_config(path: Option<&PathBuf>) -> anyhow::Result<DumperConfig> {
    match path {
        Some(path) => Ok(DumperConfig::load(path)?),
        None => Ok(DumperConfig::default()),
    }
}

impl DumpArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.snapshot.exists() {
            return Err(format!("Snapshot file does not exist: {:?}", self.snapshot));
        }
        if self.threshold == Some(0) {
            return Err("Threshold must be at least 1".to_string());
        }
        Ok(())
    }

    /// Config file (or defaults) with the command-line overrides applied.
    pub fn to_config(&self) -> anyhow::Result<DumperConfig> {
        let mut config = base_config(self.config.as_ref())?;
        if let Some(output) = &self.output {
            config = config.with_output_dir(output);
        }
        if let Some(mapping) = &self.mapping {
            config = config.with_mapping_file(mapping);
        }
        if let Some(threshold) = self.threshold {
            config = config.with_threshold(threshold);
        }
        if let Some(prefix) = &self.prefix {
            config.output.file_prefix = prefix.clone();
        }
        if let Some(layout) = self.layout {
            config = config.with_layout_version(layout.into());
        }
        if let Some(host) = &self.host {
            config = config.with_host_binary(host);
        }
        if self.no_report {
            config.output.write_report = false;
        }
        if self.no_listing {
            config.output.write_listing = false;
        }
        Ok(config)
    }
}

impl ReportArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.snapshot.exists() {
            return Err(format!("Snapshot file does not exist: {:?}", self.snapshot));
        }
        Ok(())
    }

    pub fn to_config(&self) -> anyhow::Result<DumperConfig> {
        let mut config = base_config(self.config.as_ref())?;
        if let Some(threshold) = self.threshold {
            config = config.with_threshold(threshold);
        }
        Ok(config)
    }
}

impl FreshArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.host.exists() {
            return Err(format!("Host binary does not exist: {:?}", self.host));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dump_args() {
        let args = Args::try_parse_from([
            "il2cpp-sdk-dumper",
            "-vv",
            "dump",
            "--snapshot",
            "snap.json",
            "--output",
            "out",
            "--threshold",
            "4",
            "--layout",
            "v24",
            "--no-listing",
            "--memory-base",
            "0x1000",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.log_level, "info");

        let Command::Dump(dump) = args.command else {
            panic!("expected dump");
        };
        assert_eq!(dump.probe.memory_base, Address::new(0x1000));

        let config = dump.to_config().unwrap();
        assert_eq!(config.output.output_dir, PathBuf::from("out"));
        assert_eq!(config.classifier.pointer_sharing_threshold, 4);
        assert_eq!(config.layout_version, LayoutVersion::V24);
        assert!(!config.output.write_listing);
        assert!(config.output.write_report);
    }

    #[test]
    fn test_dump_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dumper.json");
        std::fs::write(&path, r#"{ "classifier": { "pointer_sharing_threshold": 3 }, "output": { "file_prefix": "Mod" } }"#)
            .unwrap();

        let args = Args::try_parse_from([
            "il2cpp-sdk-dumper",
            "dump",
            "-s",
            "snap.json",
            "-c",
            path.to_str().unwrap(),
            "--prefix",
            "Game",
        ])
        .unwrap();
        let Command::Dump(dump) = args.command else {
            panic!("expected dump");
        };
        let config = dump.to_config().unwrap();
        assert_eq!(config.classifier.pointer_sharing_threshold, 3);
        assert_eq!(config.output.file_prefix, "Game");
    }

    #[test]
    fn test_pid_conflicts_with_memory() {
        let result = Args::try_parse_from([
            "il2cpp-sdk-dumper",
            "report",
            "-s",
            "snap.json",
            "--pid",
            "42",
            "--memory",
            "image.bin",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(parse_address("0x7ff6a000").unwrap(), Address::new(0x7ff6_a000));
        assert_eq!(parse_address("ff").unwrap(), Address::new(0xff));
        assert!(parse_address("0xzz").is_err());
    }

    #[test]
    fn test_validate_rejects_missing_snapshot() {
        let args = Args::try_parse_from(["il2cpp-sdk-dumper", "dump", "-s", "/nonexistent/snap.json"]).unwrap();
        let Command::Dump(dump) = args.command else {
            panic!("expected dump");
        };
        assert!(dump.validate().is_err());
    }
}
