// Mon Feb 16 2026 - Alex

use std::path::Path;
use std::time::SystemTime;

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Oldest `.cs` file directly inside `dir`.
fn oldest_unit(dir: &Path) -> Option<SystemTime> {
    std::fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "cs"))
        .filter_map(|path| modified(&path))
        .min()
}

/// True when `output_dir` holds at least one unit and every unit is newer
/// than `host_binary`. A missing host or directory is never fresh.
pub fn is_fresh(output_dir: &Path, host_binary: &Path) -> bool {
    let Some(host) = modified(host_binary) else {
        return false;
    };
    oldest_unit(output_dir).is_some_and(|oldest| oldest > host)
}

pub fn is_dump_fresh(listing: &Path, host_binary: &Path) -> bool {
    match (modified(listing), modified(host_binary)) {
        (Some(listing), Some(host)) => listing > host,
        _ => false,
    }
}
