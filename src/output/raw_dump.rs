// Mon Feb 16 2026 - Alex

use crate::metadata::MetadataSnapshot;

/// Unfiltered listing of every enumerated image and type, for checking the
/// generated units by hand.
pub fn render_listing(snapshot: &MetadataSnapshot) -> String {
    let mut out = String::new();
    for image in &snapshot.images {
        out.push_str(&format!("// Image {}: {}\n", image.index, image.name));
    }

    out.push_str(&format!("\n// Types: {}\n", snapshot.types.len()));
    for ty in &snapshot.types {
        let namespace = if ty.namespace.is_empty() { "-" } else { ty.namespace.as_str() };
        out.push_str(&format!(
            "// [{}] {} {} | ns {} | {} {} | flags 0x{:08x} | fields {} | properties {} | methods {}\n",
            ty.image,
            ty.kind,
            ty.name,
            namespace,
            ty.visibility,
            if ty.declaring_type.is_some() { "nested" } else { "top-level" },
            ty.flags.bits(),
            ty.fields.len(),
            ty.properties.len(),
            ty.methods.len()
        ));
    }
    if snapshot.unnamed_types > 0 {
        out.push_str(&format!("// Unnamed types skipped: {}\n", snapshot.unnamed_types));
    }
    out
}
