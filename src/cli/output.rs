//! Terminal printer for the altar CLI
//!
//! Status lines go through `Output`; session views get dedicated rows so the
//! access verdict and the block layout read the same everywhere.

use altar_core::{AccessDecision, AccessReason, BlockVisual};
use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};
use std::path::Path;

const CELL: usize = 12;

/// Colored or plain terminal output.
pub struct Output {
    colored: bool,
}

impl Output {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    pub fn is_colored(&self) -> bool {
        self.colored
    }

    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  ok: {}", message);
        }
    }

    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  {}", message);
        }
    }

    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "!".yellow().bold(), message.yellow());
        } else {
            println!("  warning: {}", message);
        }
    }

    /// Errors go to stderr so `render` output on stdout stays clean.
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  error: {}", message);
        }
    }

    /// A follow-up command the user can run next.
    pub fn next_step(&self, message: &str, command: &str) {
        if self.colored {
            println!("\n  {}", message.dimmed().italic());
            println!("     {}", format!("$ {}", command).bright_cyan());
        } else {
            println!("\n  {}", message);
            println!("     $ {}", command);
        }
    }

    pub fn wrote(&self, path: &Path) {
        self.success(&format!("wrote {}", path.display()));
    }

    pub fn heading(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  {}", title);
            println!("  {}", "=".repeat(title.chars().count()));
        }
    }

    pub fn field(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {} {}", format!("{:<CELL$}", key).dimmed(), value.bright_white());
        } else {
            println!("    {:<CELL$} {}", key, value);
        }
    }

    /// The editable verdict with the rule that produced it.
    pub fn access(&self, decision: &AccessDecision) {
        let verdict = access_line(decision);
        if !self.colored {
            self.field("editable", &verdict);
        } else if decision.editable {
            println!("    {} {}", format!("{:<CELL$}", "editable").dimmed(), verdict.green());
        } else {
            println!("    {} {}", format!("{:<CELL$}", "editable").dimmed(), verdict.red());
        }
    }

    pub fn editors(&self, editors: &[String]) {
        for editor in editors {
            if self.colored {
                println!("    {:<CELL$} {} {}", "", "•".blue(), editor);
            } else {
                println!("    {:<CELL$} - {}", "", editor);
            }
        }
    }

    /// Block layout in stacking order.
    pub fn blocks(&self, blocks: &[BlockVisual]) {
        if blocks.is_empty() {
            self.info("No blocks");
            return;
        }
        println!();
        let header = block_header();
        if self.colored {
            println!("    {}", header.bright_white().bold());
        } else {
            println!("    {}", header);
        }
        println!("    {}", "-".repeat(header.len()));
        for block in blocks {
            println!("    {}", block_row(block));
        }
    }

    /// Print the raw text as-is, after a blank line.
    pub fn raw(&self, text: &str) {
        println!();
        println!("{}", text);
    }

    /// Prompt for a line of input. Returns `None` on EOF or an empty answer.
    pub fn prompt(&self, message: &str) -> Option<String> {
        if self.colored {
            print!("  {} {}: ", "?".bright_yellow().bold(), message.bright_white());
        } else {
            print!("  {}: ", message);
        }
        io::stdout().flush().ok();

        read_answer(io::stdin().lock())
    }
}

fn reason_text(reason: AccessReason) -> &'static str {
    match reason {
        AccessReason::Denied => "share lookup was refused",
        AccessReason::PublicShare => "shared publicly",
        AccessReason::ListedEditor => "you are a listed editor",
        AccessReason::NotListed => "private share, you are not listed",
        AccessReason::Owner => "you own this session",
        AccessReason::NotOwner => "not shared, you are not the owner",
    }
}

fn access_line(decision: &AccessDecision) -> String {
    let verdict = if decision.editable { "yes" } else { "no" };
    format!("{} ({})", verdict, reason_text(decision.reason))
}

fn block_header() -> String {
    format!(
        "{:<CELL$} {:>4}  {:<CELL$} {:<CELL$}",
        "block", "z", "at", "size"
    )
}

fn block_row(block: &BlockVisual) -> String {
    format!(
        "{:<CELL$} {:>4}  {:<CELL$} {:<CELL$}",
        block.key,
        block.z_index,
        format!("{},{}", block.left, block.top),
        format!("{}x{}", block.width, block.height)
    )
}

fn read_answer<R: BufRead>(mut reader: R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => {
            let answer = input.trim();
            (!answer.is_empty()).then(|| answer.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use altar_core::{render_wall, RenderMode, WallDescription};

    fn decision(editable: bool, reason: AccessReason) -> AccessDecision {
        AccessDecision { editable, reason }
    }

    #[test]
    fn test_access_line_names_the_rule() {
        assert_eq!(
            access_line(&decision(true, AccessReason::Owner)),
            "yes (you own this session)"
        );
        assert_eq!(
            access_line(&decision(false, AccessReason::Denied)),
            "no (share lookup was refused)"
        );
        assert_eq!(
            access_line(&decision(false, AccessReason::NotListed)),
            "no (private share, you are not listed)"
        );
    }

    #[test]
    fn test_block_rows_follow_stacking_order() {
        let wall = WallDescription::from_json(
            r#"{"blocks": [
                {"id": "top", "src": "a.png", "zIndex": 5,
                 "position": {"x": 10, "y": 20}, "size": {"width": 50, "height": 40}},
                {"id": "bottom", "src": "b.png", "zIndex": 1}
            ]}"#,
        )
        .unwrap();
        let tree = render_wall(&wall, RenderMode::ReadOnly);
        let rows: Vec<String> = tree.blocks.iter().map(block_row).collect();

        assert!(rows[0].starts_with("bottom"));
        assert!(rows[1].starts_with("top"));
        assert!(rows[1].contains("10,20"));
        assert!(rows[1].contains("50x40"));
        assert_eq!(rows[1].len(), block_header().len());
    }

    #[test]
    fn test_read_answer() {
        assert_eq!(read_answer("  secret \n".as_bytes()), Some("secret".to_string()));
        assert_eq!(read_answer("\n".as_bytes()), None);
        assert_eq!(read_answer("".as_bytes()), None);
    }

    #[test]
    fn test_session_rows_print_in_both_modes() {
        for output in [Output::new(false), Output::new(true)] {
            output.heading("Nana");
            output.field("owner", "o@x.com");
            output.access(&decision(true, AccessReason::PublicShare));
            output.access(&decision(false, AccessReason::NotOwner));
            output.editors(&["a@x.com".to_string()]);
            output.blocks(&[]);
            output.next_step("Sign in with:", "altar login <email>");
        }
        assert!(!Output::new(false).is_colored());
    }
}
