//! Static HTML export of a rendered wall.

use std::fmt::Write;

use super::VisualTree;

impl VisualTree {
    /// A self-contained HTML document showing the wall.
    ///
    /// Always emitted read-only; the `mode` of the tree is recorded as a data
    /// attribute but no editing affordances are written.
    pub fn to_html(&self, title: &str) -> String {
        let mut html = String::with_capacity(1024 + self.blocks.len() * 320);
        let _ = write!(
            html,
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{}</title>\n</head>\n\
             <body style=\"margin: 0; display: flex; justify-content: center; padding: 24px;\">\n",
            escape(title)
        );
        let _ = writeln!(
            html,
            "<div class=\"altar-wall\" data-mode=\"{}\" style=\"{}\">",
            if self.mode.is_editable() { "editable" } else { "readonly" },
            escape(&self.container.style())
        );
        for block in &self.blocks {
            let mut readonly = block.clone();
            readonly.interactive = false;
            let _ = writeln!(
                html,
                "  <img class=\"altar-block\" data-block=\"{}\" src=\"{}\" alt=\"\" \
                 draggable=\"false\" style=\"{}\">",
                escape(&block.key),
                escape(&block.src),
                escape(&readonly.style())
            );
        }
        html.push_str("</div>\n</body>\n</html>\n");
        html
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use crate::model::{Block, WallDescription};
    use crate::render::{render_wall, RenderMode};

    #[test]
    fn test_export_contains_blocks_in_paint_order() {
        let wall = WallDescription {
            blocks: vec![
                Block {
                    id: Some("top".to_string()),
                    src: Some("t1".to_string()),
                    z_index: Some(5),
                    ..Block::default()
                },
                Block {
                    id: Some("bottom".to_string()),
                    src: Some("https://cdn.x/b.png?a=1&b=2".to_string()),
                    ..Block::default()
                },
            ],
            ..WallDescription::default()
        };
        let html = render_wall(&wall, RenderMode::Editable).to_html("Nana <3");

        assert!(html.contains("<title>Nana &lt;3</title>"));
        assert!(html.contains("data-mode=\"editable\""));
        assert!(html.contains("src=\"https://cdn.x/b.png?a=1&amp;b=2\""));
        assert!(html.contains("src=\"/api/images/url/t1\""));
        assert!(!html.contains("cursor: move"));
        let bottom = html.find("data-block=\"bottom\"").unwrap();
        let top = html.find("data-block=\"top\"").unwrap();
        assert!(bottom < top);
    }
}
