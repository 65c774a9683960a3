//! Terminal output for the markdown produced by `levain-core`.
//!
//! Rich mode styles the markdown with termimad; plain mode (`--no-color`)
//! prints it unchanged so it can be piped into files or other tools.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::DarkYellow);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Prints `markdown`, styled when rich output is enabled.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            match heading_level(line) {
                // Keep the hashes so recipe and step IDs stay aligned
                Some(level) => println!("\x1b[{}m{line}\x1b[0m", heading_color(level)),
                None => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

fn heading_level(line: &str) -> Option<usize> {
    let level = line.chars().take_while(|c| *c == '#').count();
    (level > 0 && line[level..].starts_with(' ')).then_some(level)
}

/// ANSI foreground code per heading level.
fn heading_color(level: usize) -> u8 {
    match level {
        1 => 33,
        2 => 34,
        _ => 36,
    }
}
