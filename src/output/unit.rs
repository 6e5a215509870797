// Mon Feb 16 2026 - Alex

use crate::resolver::{sanitize_namespace, GLOBAL_NAMESPACE};

/// Engine namespaces imported by every unit except the one being declared.
pub const ENGINE_NAMESPACES: &[&str] = &[
    "UnityEngine",
    "UnityEngine.AI",
    "UnityEngine.Animations",
    "UnityEngine.Audio",
    "UnityEngine.EventSystems",
    "UnityEngine.Events",
    "UnityEngine.Rendering",
    "UnityEngine.SceneManagement",
    "UnityEngine.UI",
];

pub const FRAMEWORK_NAMESPACES: &[&str] = &[
    "System.Text",
    "System.IO",
    "System.Xml",
    "System.Reflection",
    "System.Globalization",
    "System.Runtime.Serialization",
    "System.Threading",
    "System.Threading.Tasks",
];

/// One generated source file: every declaration of one recovered namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// Effective namespace, `Global` for namespace-less types.
    pub namespace: String,
    pub file_name: String,
    pub body: String,
    pub declarations: usize,
    pub class_wrappers: usize,
}

impl SourceUnit {
    pub fn new(file_prefix: &str, namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            file_name: unit_file_name(file_prefix, namespace),
            body: String::new(),
            declarations: 0,
            class_wrappers: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.declarations == 0
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("// Auto-generated Il2Cpp wrapper classes\n");
        out.push_str(&format!("// Namespace: {}\n", self.namespace));
        out.push_str("// Do not edit manually\n\n");
        out.push_str(&using_block(&self.namespace));
        out.push('\n');
        out.push_str(&format!("namespace {}\n{{\n", declared_namespace(&self.namespace)));
        out.push_str(&self.body);
        out.push_str("}\n");
        out
    }
}

pub fn using_block(unit_namespace: &str) -> String {
    let mut out = String::new();
    out.push_str("using System;\n");
    out.push_str("using System.Collections;\n");
    out.push_str("using System.Collections.Generic;\n");
    out.push_str("using GameSDK;\n");
    out.push('\n');
    out.push_str("// Core Unity namespace references\n");
    out.push_str("using TMPro;\n");
    out.push_str("using Unity.Mathematics;\n");
    for namespace in ENGINE_NAMESPACES.iter().filter(|ns| **ns != unit_namespace) {
        out.push_str(&format!("using {};\n", namespace));
    }
    out.push_str("\n// System namespaces for common types\n");
    for namespace in FRAMEWORK_NAMESPACES {
        out.push_str(&format!("using {};\n", namespace));
    }
    out
}

pub fn declared_namespace(namespace: &str) -> String {
    match sanitize_namespace(namespace) {
        ns if ns.is_empty() => GLOBAL_NAMESPACE.to_string(),
        ns => ns,
    }
}

/// `Game.UI` becomes `GameSDK.Game_UI.cs`.
pub fn unit_file_name(file_prefix: &str, namespace: &str) -> String {
    format!("{}.{}.cs", file_prefix, declared_namespace(namespace).replace('.', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_file_name() {
        assert_eq!(unit_file_name("GameSDK", "Game.UI"), "GameSDK.Game_UI.cs");
        assert_eq!(unit_file_name("GameSDK", ""), "GameSDK.Global.cs");
        assert_eq!(unit_file_name("Sdk", "Global"), "Sdk.Global.cs");
    }

    #[test]
    fn test_using_block_skips_own_namespace() {
        let block = using_block("UnityEngine.UI");
        assert!(block.contains("using UnityEngine;\n"));
        assert!(!block.contains("using UnityEngine.UI;\n"));
        assert!(block.starts_with("using System;\nusing System.Collections;\n"));
        assert!(block.ends_with("using System.Threading.Tasks;\n"));
        assert!(using_block("Game").contains("using UnityEngine.UI;\n"));
    }

    #[test]
    fn test_render_layout() {
        let mut unit = SourceUnit::new("GameSDK", "Game");
        unit.body.push_str("    public interface IFoo\n    {\n        // Stub interface\n    }\n\n");
        unit.declarations = 1;

        let text = unit.render();
        assert!(text.starts_with("// Auto-generated Il2Cpp wrapper classes\n// Namespace: Game\n// Do not edit manually\n\nusing System;\n"));
        assert!(text.contains("using System.Threading.Tasks;\n\nnamespace Game\n{\n    public interface IFoo\n"));
        assert!(text.ends_with("    }\n\n}\n"));
    }
}
