use serde::{Deserialize, Serialize};

use crate::tile::TileKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub grid_line_color: String,
    pub tile_border_color: String,
    pub text_color: String,
    pub query_fill: String,
    pub text_fill: String,
    pub iframe_fill: String,
    pub gis_fill: String,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            grid_line_color: "#EEF2F8".to_string(),
            tile_border_color: "#C7D2E5".to_string(),
            text_color: "#1C2430".to_string(),
            query_fill: "#F8FAFF".to_string(),
            text_fill: "#FFFDF2".to_string(),
            iframe_fill: "#F4F4F4".to_string(),
            gis_fill: "#EEF8F1".to_string(),
        }
    }

    pub fn fill_for(&self, kind: TileKind) -> &str {
        match kind {
            TileKind::Query => &self.query_fill,
            TileKind::Text => &self.text_fill,
            TileKind::Iframe => &self.iframe_fill,
            TileKind::Gis => &self.gis_fill,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
