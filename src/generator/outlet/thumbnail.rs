//! Small SVG previews of a theme's palette

use crate::types::variant::StyleVariant;
use crate::utils::text::escape_attribute;

pub const WIDTH: u32 = 200;
pub const HEIGHT: u32 = 150;

const DATA_URI_PREFIX: &str = "data:image/svg+xml;utf8,";

/// Inline SVG showing the theme's background, a surface card and its name
pub fn render_svg(style: &StyleVariant) -> String {
    let raw_primary = style.color_or("primary", "#333333");
    let primary = escape_attribute(raw_primary);
    let secondary = escape_attribute(style.color_or("secondary", raw_primary));
    let surface = escape_attribute(style.color_or("surface", "#ffffff"));
    let background = style.color_or("background", "#f5f5f5");

    // CSS gradients cannot be used as SVG fills; draw primary to secondary instead
    let (defs, fill) = if background.contains("gradient") {
        (
            format!(
                "<defs><linearGradient id='bg' x1='0%' y1='0%' x2='100%' y2='100%'><stop offset='0%' stop-color='{}'/><stop offset='100%' stop-color='{}'/></linearGradient></defs>",
                primary, secondary
            ),
            "url(#bg)".to_string(),
        )
    } else {
        (String::new(), escape_attribute(background))
    };

    format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='0 0 {w} {h}'>{defs}<rect width='{w}' height='{h}' fill='{fill}'/><rect x='20' y='30' width='160' height='90' rx='8' fill='{surface}' fill-opacity='0.85'/><rect x='32' y='92' width='56' height='16' rx='4' fill='{primary}'/><text x='100' y='70' fill='{primary}' font-family='sans-serif' font-size='14' text-anchor='middle'>{name}</text></svg>",
        w = WIDTH,
        h = HEIGHT,
        defs = defs,
        fill = fill,
        surface = surface,
        primary = primary,
        name = escape_attribute(&style.name),
    )
}

/// `data:` URI embedding [`render_svg`], usable directly as an `<img src>`
pub fn data_uri(style: &StyleVariant) -> String {
    let svg = render_svg(style);
    let mut uri = String::with_capacity(DATA_URI_PREFIX.len() + svg.len() + 32);
    uri.push_str(DATA_URI_PREFIX);
    for ch in svg.chars() {
        match ch {
            '%' => uri.push_str("%25"),
            '#' => uri.push_str("%23"),
            '<' => uri.push_str("%3C"),
            '>' => uri.push_str("%3E"),
            '"' => uri.push_str("%22"),
            '\n' | '\r' => {}
            _ => uri.push(ch),
        }
    }
    uri
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::fallback::canned_variants;

    #[test]
    fn test_svg_uses_palette() {
        let style = &canned_variants()[0].style;
        let svg = render_svg(style);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("fill='#0a0a0a'"));
        assert!(svg.contains("fill='#00ff88'"));
        assert!(svg.contains(">Retro Futurism</text>"));
    }

    #[test]
    fn test_gradient_background_becomes_svg_gradient() {
        let style = &canned_variants()[1].style;
        let svg = render_svg(style);
        assert!(svg.contains("<linearGradient"));
        assert!(svg.contains("fill='url(#bg)'"));
    }

    #[test]
    fn test_data_uri_is_escaped() {
        let uri = data_uri(&canned_variants()[2].style);
        assert!(uri.starts_with("data:image/svg+xml;utf8,%3Csvg"));
        assert!(!uri.contains('#'));
        assert!(!uri.contains('<'));
    }

    #[test]
    fn test_missing_colors_use_defaults() {
        let mut style = canned_variants()[3].style.clone();
        style.colors.clear();
        style.name = "<Odd & Name>".to_string();
        let svg = render_svg(&style);
        assert!(svg.contains("fill='#f5f5f5'"));
        assert!(svg.contains("&lt;Odd &amp; Name&gt;"));
    }
}
