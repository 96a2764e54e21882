//! Wall rendering.
//!
//! [`Renderer::render`] maps a [`WallDescription`] onto a [`VisualTree`]: a
//! fixed-size container and a list of absolutely positioned image blocks, each
//! carrying the CSS it needs. Hosts (the Leptos UI, the HTML exporter) only
//! turn the tree into markup.

mod html;
mod image;
mod style;

pub use image::{ImageResolver, IMAGE_ENDPOINT};
pub use style::{
    Border, FilterSet, FrameRing, Radius, DEFAULT_BLUR, DEFAULT_BRIGHTNESS, DEFAULT_CONTRAST,
    DEFAULT_FRAME_COLOR, DEFAULT_SATURATION, RECTANGLE_RADIUS,
};

use std::fmt::Write;

use crate::model::{BackgroundKind, Block, WallDescription};
use style::non_blank;

pub const DEFAULT_WALL_WIDTH: f64 = 800.0;
pub const DEFAULT_WALL_HEIGHT: f64 = 600.0;
pub const DEFAULT_BLOCK_SIZE: f64 = 100.0;
pub const DEFAULT_Z_INDEX: i64 = 1;
pub const DEFAULT_BACKGROUND_SIZE: &str = "cover";

/// Whether rendered blocks expose manipulation affordances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    Editable,
    #[default]
    ReadOnly,
}

impl RenderMode {
    pub fn from_editable(editable: bool) -> Self {
        if editable {
            RenderMode::Editable
        } else {
            RenderMode::ReadOnly
        }
    }

    pub fn is_editable(self) -> bool {
        self == RenderMode::Editable
    }
}

/// Container background after classification.
#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundFill {
    None,
    Color(String),
    Image { url: String, size: String },
}

/// The wall container.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerVisual {
    pub width: f64,
    pub height: f64,
    pub background: BackgroundFill,
    pub border: Option<Border>,
    pub radius: f64,
}

impl ContainerVisual {
    /// Inline CSS for the container element.
    pub fn style(&self) -> String {
        let mut css = format!(
            "position: relative; overflow: hidden; width: {}px; height: {}px;",
            self.width, self.height
        );
        match &self.background {
            BackgroundFill::None => {}
            BackgroundFill::Color(color) => {
                let _ = write!(css, " background: {};", color);
            }
            BackgroundFill::Image { url, size } => {
                let _ = write!(
                    css,
                    " background-image: url(\"{}\"); background-size: {}; \
                     background-position: center; background-repeat: no-repeat;",
                    css_url(url),
                    size
                );
            }
        }
        if let Some(border) = &self.border {
            let _ = write!(
                css,
                " border: {}; border-radius: {}px;",
                border, self.radius
            );
        }
        css
    }
}

/// One rendered image block.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockVisual {
    /// Block id, or `block-{index}` for blocks saved without one.
    pub key: String,
    pub src: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub radius: Radius,
    pub border: Option<Border>,
    pub background: Option<String>,
    pub filter: FilterSet,
    pub frame: Option<FrameRing>,
    pub z_index: i64,
    pub interactive: bool,
}

impl BlockVisual {
    /// Inline CSS for the block's `<img>`.
    pub fn style(&self) -> String {
        let mut css = format!(
            "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px; \
             object-fit: cover; border-radius: {}; filter: {}; z-index: {};",
            self.left, self.top, self.width, self.height, self.radius, self.filter, self.z_index
        );
        if let Some(border) = &self.border {
            let _ = write!(css, " border: {};", border);
        }
        if let Some(background) = &self.background {
            let _ = write!(css, " background: {};", background);
        }
        if let Some(frame) = &self.frame {
            let _ = write!(css, " box-shadow: {};", frame.box_shadow());
        }
        css.push_str(if self.interactive {
            " cursor: move;"
        } else {
            " pointer-events: none; user-select: none;"
        });
        css
    }
}

/// The rendered wall.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualTree {
    pub mode: RenderMode,
    pub container: ContainerVisual,
    /// Blocks in paint order.
    pub blocks: Vec<BlockVisual>,
}

/// Wall renderer with a configurable image origin.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    images: ImageResolver,
}

impl Renderer {
    pub fn new(images: ImageResolver) -> Self {
        Self { images }
    }

    pub fn render(&self, wall: &WallDescription, mode: RenderMode) -> VisualTree {
        let container = self.container(wall);

        let mut blocks: Vec<BlockVisual> = wall
            .blocks
            .iter()
            .enumerate()
            .filter_map(|(index, block)| self.block(index, block, mode))
            .collect();
        // Stable: equal stacking values keep list order.
        blocks.sort_by_key(|b| b.z_index);

        tracing::debug!(
            blocks = blocks.len(),
            editable = mode.is_editable(),
            "Rendered wall"
        );

        VisualTree {
            mode,
            container,
            blocks,
        }
    }

    fn container(&self, wall: &WallDescription) -> ContainerVisual {
        let background = match wall.background.as_ref().map(|b| (b, b.kind())) {
            None => BackgroundFill::None,
            Some((_, BackgroundKind::Color(color))) => BackgroundFill::Color(color.to_string()),
            Some((bg, BackgroundKind::Image(reference))) => BackgroundFill::Image {
                url: self.images.resolve(reference).into_owned(),
                size: non_blank(wall.background_size.as_deref())
                    .or(non_blank(bg.size.as_deref()))
                    .unwrap_or(DEFAULT_BACKGROUND_SIZE)
                    .to_string(),
            },
        };
        let (border, radius) = match Border::from_wall(wall.border.as_ref()) {
            Some((border, radius)) => (Some(border), radius),
            None => (None, 0.0),
        };
        ContainerVisual {
            width: dimension(wall.width, DEFAULT_WALL_WIDTH),
            height: dimension(wall.height, DEFAULT_WALL_HEIGHT),
            background,
            border,
            radius,
        }
    }

    fn block(&self, index: usize, block: &Block, mode: RenderMode) -> Option<BlockVisual> {
        let Some(src) = non_blank(block.src.as_deref()) else {
            tracing::debug!(index, "Skipping block without an image source");
            return None;
        };
        let position = block.position.unwrap_or_default();
        let size = block.size.unwrap_or_default();

        Some(BlockVisual {
            key: non_blank(block.id.as_deref())
                .map(str::to_string)
                .unwrap_or_else(|| format!("block-{}", index)),
            src: self.images.resolve(src).into_owned(),
            left: offset(position.x),
            top: offset(position.y),
            width: dimension(size.width, DEFAULT_BLOCK_SIZE),
            height: dimension(size.height, DEFAULT_BLOCK_SIZE),
            radius: Radius::for_shape(block.shape.unwrap_or_default()),
            border: Border::from_block(block.border.as_ref()),
            background: non_blank(block.background.as_deref()).map(str::to_string),
            filter: FilterSet::from_filters(block.filters.as_ref()),
            frame: FrameRing::from_frame(block.frame.as_ref()),
            z_index: block.z_index.unwrap_or(DEFAULT_Z_INDEX),
            interactive: mode.is_editable(),
        })
    }
}

/// Render with relative image URLs.
pub fn render_wall(wall: &WallDescription, mode: RenderMode) -> VisualTree {
    Renderer::default().render(wall, mode)
}

fn dimension(value: Option<f64>, default: f64) -> f64 {
    value.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(default)
}

fn offset(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn css_url(url: &str) -> String {
    url.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Background, Filters, Frame, Position, Shape, Size, WallBorder};

    fn block(id: &str, z: Option<i64>) -> Block {
        Block {
            id: Some(id.to_string()),
            src: Some(format!("img-{}", id)),
            z_index: z,
            ..Block::default()
        }
    }

    #[test]
    fn test_single_block_scenario() {
        let wall = WallDescription {
            width: Some(600.0),
            height: Some(400.0),
            background: Some(Background::new("#fff")),
            blocks: vec![Block {
                src: Some("abc123".to_string()),
                position: Some(Position {
                    x: Some(10.0),
                    y: Some(20.0),
                }),
                size: Some(Size {
                    width: Some(50.0),
                    height: Some(50.0),
                }),
                ..Block::default()
            }],
            ..WallDescription::default()
        };

        let tree = render_wall(&wall, RenderMode::ReadOnly);
        assert_eq!(tree.container.width, 600.0);
        assert_eq!(tree.container.height, 400.0);
        assert_eq!(
            tree.container.background,
            BackgroundFill::Color("#fff".to_string())
        );

        let b = &tree.blocks[0];
        assert_eq!(b.src, "/api/images/url/abc123");
        assert_eq!((b.left, b.top, b.width, b.height), (10.0, 20.0, 50.0, 50.0));
        assert_eq!(b.key, "block-0");
        assert_eq!(b.radius, Radius::Px(8.0));
        assert!(b.filter.is_neutral());
        assert_eq!(b.frame, None);
        assert_eq!(b.z_index, 1);
        assert!(!b.interactive);
    }

    #[test]
    fn test_stacking_is_stable() {
        let wall = WallDescription {
            blocks: vec![
                block("a", Some(2)),
                block("b", None),
                block("c", Some(1)),
                block("d", Some(0)),
                block("e", Some(2)),
            ],
            ..WallDescription::default()
        };
        let order: Vec<_> = render_wall(&wall, RenderMode::ReadOnly)
            .blocks
            .into_iter()
            .map(|b| b.key)
            .collect();
        assert_eq!(order, vec!["d", "b", "c", "a", "e"]);
    }

    #[test]
    fn test_defaults_for_missing_geometry() {
        let wall = WallDescription {
            width: Some(-5.0),
            blocks: vec![block("a", None)],
            ..WallDescription::default()
        };
        let tree = render_wall(&wall, RenderMode::Editable);
        assert_eq!(tree.container.width, DEFAULT_WALL_WIDTH);
        assert_eq!(tree.container.height, DEFAULT_WALL_HEIGHT);
        let b = &tree.blocks[0];
        assert_eq!((b.left, b.top), (0.0, 0.0));
        assert_eq!((b.width, b.height), (DEFAULT_BLOCK_SIZE, DEFAULT_BLOCK_SIZE));
        assert!(b.interactive);
        assert!(b.style().contains("cursor: move;"));
    }

    #[test]
    fn test_blocks_without_source_are_skipped() {
        let mut empty = block("x", None);
        empty.src = Some("  ".to_string());
        let wall = WallDescription {
            blocks: vec![empty, block("y", None)],
            ..WallDescription::default()
        };
        let tree = render_wall(&wall, RenderMode::ReadOnly);
        assert_eq!(tree.blocks.len(), 1);
        assert_eq!(tree.blocks[0].key, "y");
    }

    #[test]
    fn test_circle_filters_and_frame() {
        let mut b = block("a", None);
        b.shape = Some(Shape::Circle);
        b.filters = Some(Filters {
            saturation: Some(0.0),
            ..Filters::default()
        });
        b.frame = Some(Frame {
            frame_type: Some("gold".to_string()),
            width: Some(6.0),
            color: Some("#d4af37".to_string()),
        });
        let wall = WallDescription {
            blocks: vec![b],
            ..WallDescription::default()
        };
        let visual = &render_wall(&wall, RenderMode::ReadOnly).blocks[0];
        let css = visual.style();
        assert!(css.contains("border-radius: 50%;"));
        assert!(css.contains(
            "filter: brightness(100%) contrast(100%) saturate(0%) blur(0px);"
        ));
        assert!(css.contains("box-shadow: 0 0 0 6px #d4af37;"));
        assert!(css.contains("pointer-events: none;"));
    }

    #[test]
    fn test_image_background_and_border() {
        let wall = WallDescription {
            background: Some(Background::new("marble-01")),
            border: Some(WallBorder {
                width: Some(3.0),
                color: Some("#222".to_string()),
                style: Some("double".to_string()),
                radius: Some(12.0),
            }),
            ..WallDescription::default()
        };
        let container = render_wall(&wall, RenderMode::ReadOnly).container;
        assert_eq!(
            container.background,
            BackgroundFill::Image {
                url: "/api/images/url/marble-01".to_string(),
                size: "cover".to_string(),
            }
        );
        let css = container.style();
        assert!(css.contains("overflow: hidden;"));
        assert!(css.contains("background-position: center; background-repeat: no-repeat;"));
        assert!(css.contains("border: 3px double #222; border-radius: 12px;"));
    }

    #[test]
    fn test_wall_without_border_draws_none() {
        let wall = WallDescription {
            border: Some(WallBorder {
                width: Some(0.0),
                radius: Some(20.0),
                ..WallBorder::default()
            }),
            ..WallDescription::default()
        };
        let container = render_wall(&wall, RenderMode::ReadOnly).container;
        assert_eq!(container.border, None);
        assert!(!container.style().contains("border"));
    }

    #[test]
    fn test_background_size_override() {
        let wall = WallDescription {
            background: Some(Background::new("https://cdn.x/bg.jpg")),
            background_size: Some("contain".to_string()),
            ..WallDescription::default()
        };
        let container = Renderer::new(ImageResolver::with_origin("https://api.x"))
            .render(&wall, RenderMode::ReadOnly)
            .container;
        assert_eq!(
            container.background,
            BackgroundFill::Image {
                url: "https://cdn.x/bg.jpg".to_string(),
                size: "contain".to_string(),
            }
        );
    }
}
