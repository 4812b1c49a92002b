pub mod chat;
pub mod contact;
pub mod resume;

pub use chat::cmd_chat;
pub use contact::cmd_contact;
pub use resume::cmd_resume;

use clap::ValueEnum;
use colored::{Color, Colorize};
use folio_core::Accent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub(crate) fn accent_color(accent: Accent) -> Color {
    match accent {
        Accent::Violet => Color::Magenta,
        Accent::Emerald => Color::Green,
        Accent::Amber => Color::Yellow,
        Accent::Rose => Color::Red,
        Accent::Cyan => Color::Cyan,
        Accent::Zinc => Color::White,
    }
}

pub(crate) fn section_header(title: &str) {
    println!();
    println!("{}", title.cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
}
