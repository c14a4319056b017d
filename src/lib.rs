#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod flow;
pub mod geometry;
pub mod layout_dump;
pub mod placement;
pub mod position;
pub mod render;
pub mod scaling;
pub mod theme;
pub mod tile;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, GridSettings, RenderConfig, load_config};
pub use dashboard::{
    CloneOutcome, CopySuffixIds, Dashboard, DashboardGrid, IdGenerator, apply_clone,
    apply_clone_with_placement,
};
pub use error::LayoutError;
pub use geometry::{ExportTarget, GridLayoutConfig, PixelRect, compute_layout};
pub use layout_dump::LayoutDump;
pub use placement::{Placement, PlacementStrategy, find_best_new_position};
pub use position::TilePosition;
pub use render::render_svg;
pub use scaling::{ReferenceBox, TileStyle, compute_tile_style};
pub use theme::Theme;
pub use tile::{TileContent, TileId, TileItemHolder, TileKind, VisualizationType};
