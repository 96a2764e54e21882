use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::convert::Infallible;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::lenient;

/// The declarative description of an altar wall.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallDescription {
    #[serde(default, deserialize_with = "lenient::number")]
    pub width: Option<f64>,

    #[serde(default, deserialize_with = "lenient::number")]
    pub height: Option<f64>,

    #[serde(default, deserialize_with = "lenient::object")]
    pub background: Option<Background>,

    /// CSS `background-size` for image backgrounds.
    #[serde(
        default,
        alias = "background_size",
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub background_size: Option<String>,

    #[serde(default, deserialize_with = "lenient::object")]
    pub border: Option<WallBorder>,

    /// Blocks in list order; rendering sorts them by stacking order.
    #[serde(default, deserialize_with = "lenient::list")]
    pub blocks: Vec<Block>,
}

impl WallDescription {
    /// Decode a bare wall payload (the `data` member of a session).
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(Error::InvalidInput(
                "wall payload is not a JSON object".to_string(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Wall background: a color token or an image reference.
///
/// Accepts either a bare string or an object such as
/// `{"image": "abc123", "size": "contain"}` / `{"color": "#fff"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Background {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// What a background value denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundKind<'a> {
    Color(&'a str),
    Image(&'a str),
}

impl<'de> Deserialize<'de> for Background {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let text = |v: Option<&Value>| v.and_then(Value::as_str).map(str::to_string);
        let background = match &value {
            Value::String(s) => Some(Background {
                value: s.clone(),
                size: None,
            }),
            Value::Object(map) => ["color", "image", "url", "src", "value"]
                .iter()
                .find_map(|key| text(map.get(*key)))
                .map(|v| Background {
                    value: v,
                    size: text(map.get("size")),
                }),
            _ => None,
        };
        background
            .filter(|b| !b.value.trim().is_empty())
            .ok_or_else(|| serde::de::Error::custom("unsupported background"))
    }
}

impl Background {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            size: None,
        }
    }

    pub fn kind(&self) -> BackgroundKind<'_> {
        let value = self.value.trim();
        if is_color_token(value) {
            BackgroundKind::Color(value)
        } else {
            BackgroundKind::Image(value)
        }
    }
}

/// Whether a background value is a solid fill rather than an image reference.
pub(crate) fn is_color_token(value: &str) -> bool {
    let lower = value.trim().to_ascii_lowercase();
    if lower.starts_with('#') {
        return true;
    }
    const FUNCTIONS: [&str; 8] = [
        "rgb(",
        "rgba(",
        "hsl(",
        "hsla(",
        "hwb(",
        "linear-gradient(",
        "radial-gradient(",
        "var(",
    ];
    if FUNCTIONS.iter().any(|f| lower.starts_with(f)) {
        return true;
    }
    NAMED_COLORS.binary_search(&lower.as_str()).is_ok()
}

/// CSS named colors plus the keywords that act like one. Sorted.
const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "currentcolor", "cyan",
    "darkblue", "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta",
    "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink",
    "plum", "powderblue", "purple", "rebeccapurple", "red", "rosybrown", "royalblue",
    "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue", "tan",
    "teal", "thistle", "tomato", "transparent", "turquoise", "violet", "wheat", "white",
    "whitesmoke", "yellow", "yellowgreen",
];

/// Border around the whole wall.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WallBorder {
    #[serde(default, deserialize_with = "lenient::number")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub style: Option<String>,
    #[serde(default, alias = "borderRadius", deserialize_with = "lenient::number")]
    pub radius: Option<f64>,
}

/// One positioned image on the wall.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,

    /// URL, data URI, or an opaque reference served by the image endpoint.
    #[serde(default, alias = "image", alias = "url", deserialize_with = "lenient::text")]
    pub src: Option<String>,

    #[serde(default, deserialize_with = "lenient::object")]
    pub position: Option<Position>,

    #[serde(default, deserialize_with = "lenient::object")]
    pub size: Option<Size>,

    #[serde(default, deserialize_with = "shape")]
    pub shape: Option<Shape>,

    #[serde(default, deserialize_with = "lenient::object")]
    pub border: Option<BlockBorder>,

    /// Fill painted behind transparent image regions.
    #[serde(
        default,
        alias = "backgroundColor",
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub background: Option<String>,

    #[serde(default, deserialize_with = "lenient::object")]
    pub filters: Option<Filters>,

    #[serde(default, deserialize_with = "lenient::object")]
    pub frame: Option<Frame>,

    /// Explicit stacking order; 1 when absent.
    #[serde(
        default,
        alias = "z_index",
        alias = "order",
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub z_index: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default, deserialize_with = "lenient::number")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub y: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    #[serde(default, deserialize_with = "lenient::number")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub height: Option<f64>,
}

/// Block outline. Unknown shapes render as rectangles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Rectangle,
    Circle,
}

impl FromStr for Shape {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(if s.trim().eq_ignore_ascii_case("circle") {
            Shape::Circle
        } else {
            Shape::Rectangle
        })
    }
}

fn shape<'de, D>(deserializer: D) -> std::result::Result<Option<Shape>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = lenient::text(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockBorder {
    #[serde(default, deserialize_with = "lenient::number")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub style: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub color: Option<String>,
}

/// Percentages for brightness/contrast/saturation, pixels for blur.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    #[serde(default, deserialize_with = "lenient::number")]
    pub brightness: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub contrast: Option<f64>,
    #[serde(default, alias = "saturate", deserialize_with = "lenient::number")]
    pub saturation: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub blur: Option<f64>,
}

/// Decorative ring drawn outside a block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(
        rename = "type",
        alias = "kind",
        default,
        deserialize_with = "lenient::text"
    )]
    pub frame_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub color: Option<String>,
}

impl Frame {
    /// A frame draws only when its type names something other than `none`.
    pub fn is_visible(&self) -> bool {
        match self.frame_type.as_deref().map(str::trim) {
            None | Some("") => false,
            Some(t) => !t.eq_ignore_ascii_case("none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors_sorted() {
        assert!(NAMED_COLORS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_color_tokens() {
        assert!(is_color_token("#fff"));
        assert!(is_color_token("rgba(0, 0, 0, 0.5)"));
        assert!(is_color_token("Ivory"));
        assert!(is_color_token("linear-gradient(#000, #fff)"));
        assert!(!is_color_token("abc123"));
        assert!(!is_color_token("https://img.example.com/bg.png"));
        assert!(!is_color_token("marble"));
    }

    #[test]
    fn test_background_forms() {
        let wall = WallDescription::from_json(r##"{"background": "#fff"}"##).unwrap();
        assert_eq!(
            wall.background.unwrap().kind(),
            BackgroundKind::Color("#fff")
        );

        let wall = WallDescription::from_json(
            r#"{"background": {"image": "bg42", "size": "contain"}}"#,
        )
        .unwrap();
        let bg = wall.background.unwrap();
        assert_eq!(bg.kind(), BackgroundKind::Image("bg42"));
        assert_eq!(bg.size.as_deref(), Some("contain"));

        let wall = WallDescription::from_json(r#"{"background": 12}"#).unwrap();
        assert!(wall.background.is_none());
    }

    #[test]
    fn test_block_decoding_is_forgiving() {
        let wall = WallDescription::from_json(
            r#"{
                "width": "600",
                "height": 400,
                "blocks": [
                    {"id": 1, "src": "a", "position": {"x": "ten", "y": 20},
                     "shape": "hexagon", "filters": "bright", "zIndex": "3"},
                    "not a block",
                    {"id": "b", "image": "https://x/y.png", "shape": "circle"},
                    {"id": "c", "src": "c.png", "shape": " CIRCLE "},
                    {"id": "d", "src": "d.png", "shape": 7}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(wall.width, Some(600.0));
        assert_eq!(wall.blocks.len(), 4);

        let first = &wall.blocks[0];
        assert_eq!(first.id.as_deref(), Some("1"));
        assert_eq!(first.position.unwrap().x, None);
        assert_eq!(first.position.unwrap().y, Some(20.0));
        assert_eq!(first.shape, Some(Shape::Rectangle));
        assert_eq!(first.filters, None);
        assert_eq!(first.z_index, Some(3));

        let second = &wall.blocks[1];
        assert_eq!(second.src.as_deref(), Some("https://x/y.png"));
        assert_eq!(second.shape, Some(Shape::Circle));
        assert_eq!(wall.blocks[2].shape, Some(Shape::Circle));
        assert_eq!(wall.blocks[3].shape, Some(Shape::Rectangle));
    }

    #[test]
    fn test_frame_visibility() {
        let frame = |t: Option<&str>| Frame {
            frame_type: t.map(str::to_string),
            width: Some(6.0),
            color: Some("gold".to_string()),
        };
        assert!(!frame(None).is_visible());
        assert!(!frame(Some("none")).is_visible());
        assert!(!frame(Some(" NONE ")).is_visible());
        assert!(!frame(Some("")).is_visible());
        assert!(frame(Some("ornate")).is_visible());
    }
}
