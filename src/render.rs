use crate::config::RenderConfig;
use crate::dashboard::Dashboard;
use crate::geometry::GridLayoutConfig;
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

// Preview only: a zoomed wireframe of the grid and its tiles.
pub fn render_svg(
    dashboard: &Dashboard,
    grid: &GridLayoutConfig,
    theme: &Theme,
    config: &RenderConfig,
) -> String {
    let zoom = grid.zoom_level;
    let rows = dashboard.bottom_row();
    let width = (grid.full_width_px() * zoom).max(1.0);
    let height = (grid.grid_height_px(rows) * zoom).max(1.0);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.2}\" height=\"{height:.2}\" viewBox=\"0 0 {width:.2} {height:.2}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        config.background
    ));

    let columns = grid.total_columns();
    let cell = grid.cell_size_px * zoom;
    if cell >= 2.0 {
        let top = grid.vertical_padding_px * zoom;
        let bottom = height - top;
        for col in 0..=columns {
            if col % grid.cells_per_column.max(1) != 0 {
                continue;
            }
            let x = grid.horizontal_padding_px * zoom + col as f32 * cell;
            svg.push_str(&format!(
                "<line x1=\"{x:.2}\" y1=\"{top:.2}\" x2=\"{x:.2}\" y2=\"{bottom:.2}\" stroke=\"{}\" stroke-width=\"1\"/>",
                theme.grid_line_color
            ));
        }
    }

    let font_size = theme.font_size * zoom;
    for item in dashboard.items() {
        let rect = grid.tile_rect(&item.position).scaled(zoom);
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"6\" ry=\"6\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.2\"/>",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            theme.fill_for(item.content.kind()),
            theme.tile_border_color
        ));
        let label = format!("{} · {}", item.id, item.content.label());
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{:.2}\" fill=\"{}\">{}</text>",
            rect.x + 8.0 * zoom,
            rect.y + font_size + 6.0 * zoom,
            escape_xml(&theme.font_family),
            font_size,
            theme.text_color,
            escape_xml(&label)
        ));
    }

    svg.push_str("</svg>");
    svg
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme
        .font_family
        .split(',')
        .next()
        .map(|family| family.trim().trim_matches('"').to_string())
        .unwrap_or_else(|| "Inter".to_string());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _theme: &Theme) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
