//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use projboard_core::{Project, ProjectStatus};
use projboard_ui::{App, DropIndicator, DropOutcome};

fn status_label(status: ProjectStatus) -> ColoredString {
    match status {
        ProjectStatus::Active => "active".yellow(),
        ProjectStatus::Done => "finished".green(),
    }
}

/// Print both lists as the views currently show them.
pub fn print_board(app: &App) {
    for list in app.lists() {
        let projects = list.projects();
        let marker = match list.indicator() {
            DropIndicator::Droppable => " (drop here)".cyan().to_string(),
            DropIndicator::Idle => String::new(),
        };
        println!(
            "{} {}{}",
            format!("{} PROJECTS", list.status().list_name().to_uppercase()).bold(),
            format!("[{}]", projects.len()).dimmed(),
            marker
        );
        println!("{}", "─".repeat(60));

        if projects.is_empty() {
            println!("  {}", "No projects.".dimmed());
        }
        for project in &projects {
            print_project_line(project);
        }
        println!();
    }
}

fn print_project_line(project: &Project) {
    println!(
        "  {:<28} {:<18} {}",
        truncate(project.title(), 26).cyan(),
        format!("{} assigned", project.persons()),
        short_id(project.id()).dimmed()
    );
    if !project.description().is_empty() {
        println!("    {}", truncate(project.description(), 54).dimmed());
    }
}

pub fn print_added(project: &Project) {
    println!(
        "{} Added project: {} ({})",
        "✓".green().bold(),
        project.title().cyan(),
        project.id().dimmed()
    );
}

pub fn print_moved(project: &Project) {
    println!(
        "{} Moved {} to {}",
        "✓".green().bold(),
        project.title().cyan(),
        status_label(project.status())
    );
}

pub fn print_outcome(outcome: &DropOutcome) {
    match outcome {
        DropOutcome::Dropped { .. } => {}
        DropOutcome::Cancelled => println!("{} Drag cancelled, nothing moved", "•".dimmed()),
    }
}

pub fn print_notice(message: &str) {
    println!("{} {}", "✗".red().bold(), message);
}

pub fn print_info(message: &str) {
    println!("{} {}", "•".dimmed(), message);
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Truncate to `max` characters, marking the cut with an ellipsis.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
