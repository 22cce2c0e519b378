//! The fixed design set returned when a run cannot be completed

use std::collections::BTreeMap;

use crate::types::variant::{
    AccessibilityResult, GeneratedCode, PreviewData, StyleVariant, UIVariant,
};

/// Static description of one canned theme
struct CannedTheme {
    name: &'static str,
    description: &'static str,
    style_description: &'static str,
    theme: &'static str,
    colors: &'static [(&'static str, &'static str)],
    typography: (&'static str, &'static str),
    spacing: (&'static str, &'static str),
    components: (&'static str, &'static str),
    animations: &'static [&'static str],
    html: &'static str,
    css: &'static str,
    js: &'static str,
    qa_score: f64,
    accessibility_score: f64,
}

const CANNED_THEMES: [CannedTheme; 4] = [
    CannedTheme {
        name: "Retro Futurism",
        description: "Neon gradients with dark backgrounds and cyberpunk aesthetics",
        style_description: "Cyberpunk aesthetics with neon colors",
        theme: "retro-futurism",
        colors: &[
            ("primary", "#00ff88"),
            ("secondary", "#ff0080"),
            ("background", "#0a0a0a"),
            ("surface", "#1a1a2e"),
            ("accent", "#00d4ff"),
        ],
        typography: ("font-bold", "font-medium"),
        spacing: ("1rem", "0.5rem"),
        components: ("bg-gradient-to-r", "bg-gray-900"),
        animations: &["glow", "scanline"],
        html: "<!DOCTYPE html><html><head><title>Retro Dashboard</title></head><body><main class=\"hero\"><h1>Welcome to the Future</h1><button class=\"cta\">Launch</button></main></body></html>",
        css: "body { background: #0a0a0a; color: #00ff88; font-family: 'Inter', sans-serif; margin: 0; }\n.hero { min-height: 100vh; display: grid; place-items: center; text-shadow: 0 0 12px #00ff88; }\n.cta { background: linear-gradient(90deg, #00ff88, #ff0080); border: none; padding: 0.75rem 1.5rem; color: #0a0a0a; }",
        js: "console.log(\"Retro Futurism loaded\");",
        qa_score: 0.95,
        accessibility_score: 0.9,
    },
    CannedTheme {
        name: "Glass Aurora",
        description: "Translucent glass effects with aurora-inspired gradients",
        style_description: "Translucent glass effects",
        theme: "glass-aurora",
        colors: &[
            ("primary", "#667eea"),
            ("secondary", "#764ba2"),
            ("background", "linear-gradient(135deg, #667eea 0%, #764ba2 100%)"),
            ("surface", "rgba(255, 255, 255, 0.1)"),
            ("accent", "#f093fb"),
        ],
        typography: ("font-light", "font-normal"),
        spacing: ("1.25rem", "0.75rem"),
        components: ("bg-white/20", "bg-white/10"),
        animations: &["fade-in", "float"],
        html: "<!DOCTYPE html><html><head><title>Glass Aurora</title></head><body><main class=\"panel\"><h1>Aurora Design</h1><p>Light through glass.</p></main></body></html>",
        css: "body { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; min-height: 100vh; margin: 0; display: grid; place-items: center; }\n.panel { background: rgba(255, 255, 255, 0.1); backdrop-filter: blur(12px); border-radius: 1.25rem; padding: 2rem; }",
        js: "console.log(\"Glass Aurora loaded\");",
        qa_score: 0.92,
        accessibility_score: 0.88,
    },
    CannedTheme {
        name: "Neo Brutalist",
        description: "Bold geometric shapes with high contrast and sharp edges",
        style_description: "Bold geometric shapes",
        theme: "brutalist",
        colors: &[
            ("primary", "#000000"),
            ("secondary", "#ffffff"),
            ("background", "#f5f5f5"),
            ("surface", "#ffffff"),
            ("accent", "#ffde03"),
        ],
        typography: ("font-black uppercase", "font-bold"),
        spacing: ("1.5rem", "0.25rem"),
        components: ("bg-black text-white", "bg-white border-4 border-black"),
        animations: &["shake"],
        html: "<!DOCTYPE html><html><head><title>Brutalist</title></head><body><main class=\"block\"><h1>BOLD DESIGN</h1></main></body></html>",
        css: "body { background: #f5f5f5; color: #000; font-weight: bold; margin: 0; padding: 1.5rem; }\n.block { background: #fff; border: 4px solid #000; box-shadow: 8px 8px 0 #000; padding: 1.5rem; }",
        js: "console.log(\"Brutalist loaded\");",
        qa_score: 0.97,
        accessibility_score: 0.95,
    },
    CannedTheme {
        name: "Minimal Mono",
        description: "Clean monochromatic design with subtle animations",
        style_description: "Clean monochromatic design",
        theme: "minimal-mono",
        colors: &[
            ("primary", "#2d3748"),
            ("secondary", "#4a5568"),
            ("background", "#ffffff"),
            ("surface", "#f7fafc"),
            ("accent", "#718096"),
        ],
        typography: ("font-medium", "font-normal"),
        spacing: ("1rem", "0.5rem"),
        components: ("bg-gray-900 text-white", "bg-white border border-gray-200"),
        animations: &["fade-in"],
        html: "<!DOCTYPE html><html><head><title>Minimal</title></head><body><main class=\"content\"><h1>Clean Design</h1><p>Less, but better.</p></main></body></html>",
        css: "body { background: #fff; color: #2d3748; font-family: 'Inter', sans-serif; margin: 0; }\n.content { max-width: 40rem; margin: 4rem auto; padding: 0 1rem; }",
        js: "console.log(\"Minimal loaded\");",
        qa_score: 0.98,
        accessibility_score: 0.97,
    },
];

fn to_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// The canned variant set, identical on every call apart from preview timestamps
pub fn canned_variants() -> Vec<UIVariant> {
    CANNED_THEMES
        .iter()
        .enumerate()
        .map(|(i, theme)| {
            let n = i + 1;
            let style = StyleVariant {
                id: format!("style-{}", n),
                name: theme.name.to_string(),
                description: theme.style_description.to_string(),
                theme: theme.theme.to_string(),
                colors: to_map(theme.colors),
                typography: to_map(&[("heading", theme.typography.0), ("body", theme.typography.1)]),
                spacing: to_map(&[("base", theme.spacing.0), ("tight", theme.spacing.1)]),
                components: to_map(&[("button", theme.components.0), ("card", theme.components.1)]),
                animations: Some(theme.animations.iter().map(|a| a.to_string()).collect()),
                responsive: None,
            };

            UIVariant {
                id: format!("variant-{}", n),
                name: theme.name.to_string(),
                description: theme.description.to_string(),
                code: GeneratedCode::vanilla(theme.html, theme.css, theme.js),
                preview: PreviewData::pending(format!("v{}", n), preview_url(&format!("v{}", n))),
                style,
                qa_score: theme.qa_score,
                accessibility: AccessibilityResult {
                    score: theme.accessibility_score,
                    issues: Vec::new(),
                },
            }
        })
        .collect()
}

/// Where a preview with this id is served
pub fn preview_url(preview_id: &str) -> String {
    format!("/api/preview-test?variant={}", preview_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::variant::PreviewStatus;

    #[test]
    fn test_canned_set_shape() {
        let variants = canned_variants();
        let names: Vec<&str> = variants.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Retro Futurism", "Glass Aurora", "Neo Brutalist", "Minimal Mono"]
        );
        for (i, variant) in variants.iter().enumerate() {
            assert_eq!(variant.id, format!("variant-{}", i + 1));
            assert_eq!(variant.preview.id, format!("v{}", i + 1));
            assert_eq!(variant.preview.status, PreviewStatus::Pending);
            assert!(variant.scores_in_range());
        }
    }

    #[test]
    fn test_canned_set_is_deterministic() {
        let mut first = canned_variants();
        let second = canned_variants();
        for (a, b) in first.iter_mut().zip(&second) {
            a.preview.last_updated = b.preview.last_updated;
        }
        assert_eq!(first, second);
    }
}
