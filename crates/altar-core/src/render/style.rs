//! CSS fragments computed from wall data.

use std::fmt;

use crate::model::{BlockBorder, Filters, Frame, Shape, WallBorder};

pub const DEFAULT_BRIGHTNESS: f64 = 100.0;
pub const DEFAULT_CONTRAST: f64 = 100.0;
pub const DEFAULT_SATURATION: f64 = 100.0;
pub const DEFAULT_BLUR: f64 = 0.0;

/// Frame ring color when a visible frame names none.
pub const DEFAULT_FRAME_COLOR: &str = "#8b4513";

/// Corner radius for rectangular blocks, in pixels.
pub const RECTANGLE_RADIUS: f64 = 8.0;

/// Combined `filter` value; the four effects are always applied together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSet {
    pub brightness: f64,
    pub contrast: f64,
    pub saturation: f64,
    pub blur: f64,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self {
            brightness: DEFAULT_BRIGHTNESS,
            contrast: DEFAULT_CONTRAST,
            saturation: DEFAULT_SATURATION,
            blur: DEFAULT_BLUR,
        }
    }
}

impl FilterSet {
    pub fn from_filters(filters: Option<&Filters>) -> Self {
        let neutral = Self::default();
        let Some(f) = filters else {
            return neutral;
        };
        Self {
            brightness: non_negative(f.brightness).unwrap_or(neutral.brightness),
            contrast: non_negative(f.contrast).unwrap_or(neutral.contrast),
            saturation: non_negative(f.saturation).unwrap_or(neutral.saturation),
            blur: non_negative(f.blur).unwrap_or(neutral.blur),
        }
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "brightness({}%) contrast({}%) saturate({}%) blur({}px)",
            self.brightness, self.contrast, self.saturation, self.blur
        )
    }
}

/// Outward ring drawn as a spread-only box shadow.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRing {
    pub width: f64,
    pub color: String,
}

impl FrameRing {
    /// `None` unless the frame type is set to something other than `none`.
    pub fn from_frame(frame: Option<&Frame>) -> Option<Self> {
        let frame = frame.filter(|f| f.is_visible())?;
        Some(Self {
            width: non_negative(frame.width).unwrap_or(0.0),
            color: non_blank(frame.color.as_deref())
                .unwrap_or(DEFAULT_FRAME_COLOR)
                .to_string(),
        })
    }

    pub fn box_shadow(&self) -> String {
        format!("0 0 0 {}px {}", self.width, self.color)
    }
}

/// A resolved CSS border.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    pub width: f64,
    pub style: String,
    pub color: String,
}

impl Border {
    fn resolve(width: Option<f64>, style: Option<&str>, color: Option<&str>) -> Option<Self> {
        let width = non_negative(width).filter(|w| *w > 0.0)?;
        Some(Self {
            width,
            style: non_blank(style).unwrap_or("solid").to_string(),
            color: non_blank(color).unwrap_or("#000000").to_string(),
        })
    }

    pub fn from_block(border: Option<&BlockBorder>) -> Option<Self> {
        let b = border?;
        Self::resolve(b.width, b.style.as_deref(), b.color.as_deref())
    }

    /// Border and corner radius of the wall container.
    pub fn from_wall(border: Option<&WallBorder>) -> Option<(Self, f64)> {
        let b = border?;
        let resolved = Self::resolve(b.width, b.style.as_deref(), b.color.as_deref())?;
        Some((resolved, non_negative(b.radius).unwrap_or(0.0)))
    }
}

impl fmt::Display for Border {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {} {}", self.width, self.style, self.color)
    }
}

/// Block corner rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Radius {
    /// `50%`, a full ellipse.
    Full,
    Px(f64),
}

impl Radius {
    pub fn for_shape(shape: Shape) -> Self {
        match shape {
            Shape::Circle => Radius::Full,
            Shape::Rectangle => Radius::Px(RECTANGLE_RADIUS),
        }
    }
}

impl fmt::Display for Radius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Radius::Full => write!(f, "50%"),
            Radius::Px(px) => write!(f, "{}px", px),
        }
    }
}

fn non_negative(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_filters_are_neutral() {
        let set = FilterSet::from_filters(None);
        assert!(set.is_neutral());
        assert_eq!(
            set.to_string(),
            "brightness(100%) contrast(100%) saturate(100%) blur(0px)"
        );
    }

    #[test]
    fn test_partial_filters_fill_in_neutral_values() {
        let filters = Filters {
            brightness: Some(120.0),
            blur: Some(2.5),
            ..Filters::default()
        };
        assert_eq!(
            FilterSet::from_filters(Some(&filters)).to_string(),
            "brightness(120%) contrast(100%) saturate(100%) blur(2.5px)"
        );
    }

    #[test]
    fn test_negative_filter_values_fall_back() {
        let filters = Filters {
            contrast: Some(-5.0),
            ..Filters::default()
        };
        assert!(FilterSet::from_filters(Some(&filters)).is_neutral());
    }

    #[test]
    fn test_frame_none_has_no_ring() {
        let frame = Frame {
            frame_type: Some("none".to_string()),
            width: Some(12.0),
            color: Some("gold".to_string()),
        };
        assert_eq!(FrameRing::from_frame(Some(&frame)), None);
        assert_eq!(FrameRing::from_frame(None), None);
    }

    #[test]
    fn test_frame_defaults() {
        let frame = Frame {
            frame_type: Some("wood".to_string()),
            ..Frame::default()
        };
        let ring = FrameRing::from_frame(Some(&frame)).unwrap();
        assert_eq!(ring.box_shadow(), "0 0 0 0px #8b4513");
    }

    #[test]
    fn test_border_requires_positive_width() {
        assert_eq!(Border::from_block(None), None);
        let zero = BlockBorder {
            width: Some(0.0),
            ..BlockBorder::default()
        };
        assert_eq!(Border::from_block(Some(&zero)), None);

        let wall = WallBorder {
            width: Some(4.0),
            color: Some("gold".to_string()),
            style: None,
            radius: Some(16.0),
        };
        let (border, radius) = Border::from_wall(Some(&wall)).unwrap();
        assert_eq!(border.to_string(), "4px solid gold");
        assert_eq!(radius, 16.0);
    }

    #[test]
    fn test_radius() {
        assert_eq!(Radius::for_shape(Shape::Circle).to_string(), "50%");
        assert_eq!(Radius::for_shape(Shape::Rectangle).to_string(), "8px");
    }
}
