//! Scripted walkthrough of the board.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use projboard_core::ProjectStatus;
use projboard_ui::{App, Field};

use crate::output;

#[derive(Args)]
pub struct DemoArgs {
    /// Print the rendered page at the end
    #[arg(long)]
    pub html: bool,
}

/// Sample projects: title, description, people.
const SAMPLES: &[(&str, &str, &str)] = &[
    ("Build API", "v1", "3"),
    ("Landing page", "Marketing site refresh", "1"),
    ("Load tests", "Baseline before launch", "0"),
    ("Billing", "Invoices and receipts", "2"),
];

pub fn execute(args: DemoArgs, app: &App) -> Result<()> {
    println!("{}", "Submitting sample projects".bold());
    for (title, description, people) in SAMPLES {
        let input = app.input();
        input.fill(Field::Title, title)?;
        input.fill(Field::Description, description)?;
        input.fill(Field::People, people)?;
        input.submit()?;

        let notices = app.dom().take_notices();
        if notices.is_empty() {
            if let Some(project) = app.store().snapshot().last() {
                output::print_added(project);
            }
        }
        for notice in notices {
            output::print_notice(&format!("{} ({})", notice, title));
        }
    }
    println!();

    // Finish the first project by dragging it onto the finished list.
    if let Some(first) = app.store().snapshot().first() {
        println!("{}", "Dragging the first project to finished".bold());
        let outcome = app.drag_project(first.id(), ProjectStatus::Done)?;
        if let Some(project) = app.store().get(first.id()) {
            output::print_moved(&project);
        }
        output::print_outcome(&outcome);
        println!();
    }

    output::print_board(app);

    if args.html {
        print!("{}", app.html()?);
    }
    Ok(())
}
