use std::fmt;

use serde::{Deserialize, Serialize};

use crate::position::TilePosition;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(String);

impl TileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TileId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TileId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisualizationType {
    Table,
    Bar,
    Line,
    Area,
    Pie,
    Scatter,
    Kpi,
    Map,
    Text,
    Iframe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    #[serde(rename = "QUERY_ITEM")]
    Query,
    #[serde(rename = "TEXT_ITEM")]
    Text,
    #[serde(rename = "IFRAME_ITEM")]
    Iframe,
    #[serde(rename = "GIS_ITEM")]
    Gis,
}

impl TileKind {
    pub fn tag(self) -> &'static str {
        match self {
            TileKind::Query => "QUERY_ITEM",
            TileKind::Text => "TEXT_ITEM",
            TileKind::Iframe => "IFRAME_ITEM",
            TileKind::Gis => "GIS_ITEM",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryTile {
    pub query: String,
    pub visualization: VisualizationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextTile {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IframeTile {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GisTile {
    #[serde(default)]
    pub layers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<(f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f32>,
}

/// Payload of a tile. Clones share the payload of their source verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TileContent {
    #[serde(rename = "QUERY_ITEM")]
    Query(QueryTile),
    #[serde(rename = "TEXT_ITEM")]
    Text(TextTile),
    #[serde(rename = "IFRAME_ITEM")]
    Iframe(IframeTile),
    #[serde(rename = "GIS_ITEM")]
    Gis(GisTile),
}

impl TileContent {
    pub fn kind(&self) -> TileKind {
        match self {
            TileContent::Query(_) => TileKind::Query,
            TileContent::Text(_) => TileKind::Text,
            TileContent::Iframe(_) => TileKind::Iframe,
            TileContent::Gis(_) => TileKind::Gis,
        }
    }

    pub fn visualization(&self) -> VisualizationType {
        match self {
            TileContent::Query(query) => query.visualization,
            TileContent::Text(_) => VisualizationType::Text,
            TileContent::Iframe(_) => VisualizationType::Iframe,
            TileContent::Gis(_) => VisualizationType::Map,
        }
    }

    pub fn label(&self) -> String {
        match self {
            TileContent::Query(query) => query.title.clone().unwrap_or_else(|| query.query.clone()),
            TileContent::Text(text) => text.text.lines().next().unwrap_or_default().to_string(),
            TileContent::Iframe(frame) => frame.url.clone(),
            TileContent::Gis(gis) => {
                if gis.layers.is_empty() {
                    "map".to_string()
                } else {
                    gis.layers.join(", ")
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileItemHolder {
    pub id: TileId,
    pub position: TilePosition,
    pub content: TileContent,
}

impl TileItemHolder {
    pub fn new(id: impl Into<TileId>, position: TilePosition, content: TileContent) -> Self {
        Self {
            id: id.into(),
            position,
            content,
        }
    }

    pub fn with_position(&self, position: TilePosition) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_uses_item_tags() {
        let content = TileContent::Text(TextTile {
            text: "Quarterly notes".to_string(),
        });
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["type"], "TEXT_ITEM");
        assert_eq!(json["text"], "Quarterly notes");
    }

    #[test]
    fn query_tile_round_trips_visualization() {
        let raw = r#"{"type":"QUERY_ITEM","query":"revenue_by_region","visualization":"BAR"}"#;
        let content: TileContent = serde_json::from_str(raw).unwrap();
        assert_eq!(content.kind(), TileKind::Query);
        assert_eq!(content.visualization(), VisualizationType::Bar);
        assert_eq!(content.label(), "revenue_by_region");
    }

    #[test]
    fn gis_tiles_are_maps() {
        let content = TileContent::Gis(GisTile {
            layers: vec!["stores".to_string()],
            center: None,
            zoom: None,
        });
        assert_eq!(content.visualization(), VisualizationType::Map);
        assert_eq!(content.kind().tag(), "GIS_ITEM");
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let raw = r#"{"type":"VIDEO_ITEM","url":"x"}"#;
        assert!(serde_json::from_str::<TileContent>(raw).is_err());
    }
}
