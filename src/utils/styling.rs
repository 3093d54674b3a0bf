//! Terminal styling utilities for the pipeline output

use console::{style, Emoji};
use std::path::Path;
use std::time::Duration;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static DICE: Emoji<'_, '_> = Emoji("🎲 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");

/// Print the application banner with ASCII art
pub fn print_banner(version: &str) {
    let banner = r#"
    ███╗   ███╗███████╗██████╗ ██╗   ██╗██╗███████╗
    ████╗ ████║██╔════╝██╔══██╗██║   ██║██║╚══███╔╝
    ██╔████╔██║█████╗  ██║  ██║██║   ██║██║  ███╔╝
    ██║╚██╔╝██║██╔══╝  ██║  ██║╚██╗ ██╔╝██║ ███╔╝
    ██║ ╚═╝ ██║███████╗██████╔╝ ╚████╔╝ ██║███████╗
    ╚═╝     ╚═╝╚══════╝╚═════╝   ╚═══╝  ╚═╝╚══════╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {} {}",
        style("♥").magenta().bold(),
        style("Medical data visualizer").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(output_dir: &Path, rows: usize, seed: Option<u64>, input: Option<&Path>) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    match input {
        Some(path) => println!(
            "    │  {} Input:   {:<38}│",
            FOLDER,
            truncate_path(path, 37)
        ),
        None => println!(
            "    │  {} Records: {:<38}│",
            CHART,
            style(format!("{} (synthetic)", rows)).yellow()
        ),
    }
    println!(
        "    │  {} Seed:    {:<38}│",
        DICE,
        match seed {
            Some(s) => style(s.to_string()).yellow().to_string(),
            None => style("entropy").dim().to_string(),
        }
    );
    println!(
        "    │  {} Output:  {:<38}│",
        SAVE,
        truncate_path(output_dir, 37)
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, detail: Option<&str>) {
    if let Some(info) = detail {
        println!(
            "      Found {} {} {}",
            style(count).yellow().bold(),
            description,
            style(info).dim()
        );
    } else {
        println!(
            "      Found {} {}",
            style(count).yellow().bold(),
            description
        );
    }
}

/// Print the elapsed time of a pipeline step
pub fn print_step_time(elapsed: Duration) {
    println!(
        "      {}",
        style(format!("done in {:.0?}", elapsed)).dim()
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Medviz run complete!").green().bold()
    );
    println!();
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("...{}", &s[s.len() - max_len + 3..])
    }
}
