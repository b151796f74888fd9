//! Line-oriented board shell.

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};
use projboard_core::{BoardError, ProjectStatus};
use projboard_ui::{App, Component, DragSession, Field};
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Lines};
use std::path::PathBuf;
use tracing::debug;

use crate::output;

#[derive(Args)]
pub struct ShellArgs {
    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Stop at the first failing command
    #[arg(long)]
    pub fail_fast: bool,
}

const HELP: &str = "\
Commands:
  add TITLE | DESCRIPTION | PEOPLE   fill the form and submit it
  fill FIELD VALUE                   type into title, description or people
  submit                             submit the form as it is
  drag ID STATUS                     drag a project onto the active or finished list
  hover ID STATUS                    start dragging a project and hold it over a list
  leave                              move the held project off its list
  release                            let go of the held project
  list                               show both lists
  html                               print the rendered page
  help                               show this help
  quit                               leave the shell";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { title: String, description: String, people: String },
    Fill { field: Field, value: String },
    Submit,
    Drag { id: String, status: ProjectStatus },
    Hover { id: String, status: ProjectStatus },
    Leave,
    Release,
    List,
    Html,
    Help,
    Quit,
}

impl Command {
    /// Parse one line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match word.to_lowercase().as_str() {
            "add" => {
                let parts: Vec<&str> = rest.split('|').map(str::trim).collect();
                let [title, description, people] = parts.as_slice() else {
                    bail!("usage: add TITLE | DESCRIPTION | PEOPLE");
                };
                Self::Add {
                    title: title.to_string(),
                    description: description.to_string(),
                    people: people.to_string(),
                }
            }
            "fill" => {
                let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let field = Field::parse(name).ok_or_else(|| anyhow!("unknown field '{}'", name))?;
                Self::Fill {
                    field,
                    value: value.trim().to_string(),
                }
            }
            "submit" => Self::Submit,
            "drag" | "hover" => {
                let mut args = rest.split_whitespace();
                let (Some(id), Some(status), None) = (args.next(), args.next(), args.next()) else {
                    bail!("usage: {} ID STATUS", word);
                };
                let status: ProjectStatus = status.parse()?;
                let id = id.to_string();
                if word.eq_ignore_ascii_case("drag") {
                    Self::Drag { id, status }
                } else {
                    Self::Hover { id, status }
                }
            }
            "leave" => Self::Leave,
            "release" | "drop" => Self::Release,
            "list" | "ls" => Self::List,
            "html" => Self::Html,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => bail!("unknown command '{}', try 'help'", other),
        };
        Ok(Some(command))
    }
}

/// Shell state: the board plus any drag in progress.
pub struct Shell<'a> {
    app: &'a App,
    held: Option<DragSession>,
}

impl<'a> Shell<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app, held: None }
    }

    /// Run one command. Returns `false` when the shell should stop.
    pub fn run(&mut self, command: Command) -> Result<bool> {
        debug!(command = ?command, "Shell command");
        match command {
            Command::Add { title, description, people } => {
                self.fill(Field::Title, &title)?;
                self.fill(Field::Description, &description)?;
                self.fill(Field::People, &people)?;
                self.submit()?;
            }
            Command::Fill { field, value } => self.fill(field, &value)?,
            Command::Submit => self.submit()?,
            Command::Drag { id, status } => {
                self.release_held()?;
                let id = self.resolve(&id)?;
                let before = self.app.store().get(&id);
                let outcome = self.app.drag_project(&id, status)?;
                self.report_move(&id, before.map(|p| p.status()));
                output::print_outcome(&outcome);
            }
            Command::Hover { id, status } => {
                self.release_held()?;
                let id = self.resolve(&id)?;
                let source = self.app.item_root(&id)?;
                let target = self
                    .app
                    .list(status)
                    .ok_or_else(|| anyhow!("no {} list on this board", status.list_name()))?
                    .root();
                let mut session = DragSession::start(self.app.dom(), source)?;
                let accepted = session.enter(target)?;
                output::print_info(&format!(
                    "Holding {} over the {} list{}",
                    id,
                    status.list_name(),
                    if accepted { "" } else { " (refused)" }
                ));
                self.held = Some(session);
            }
            Command::Leave => match self.held.as_mut() {
                Some(session) => session.leave()?,
                None => output::print_info("Nothing is being dragged"),
            },
            Command::Release => match self.held.take() {
                Some(session) => {
                    let outcome = session.release()?;
                    output::print_outcome(&outcome);
                }
                None => output::print_info("Nothing is being dragged"),
            },
            Command::List => output::print_board(self.app),
            Command::Html => print!("{}", self.app.html()?),
            Command::Help => println!("{}", HELP),
            Command::Quit => {
                self.release_held()?;
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn fill(&self, field: Field, value: &str) -> Result<()> {
        self.app.input().fill(field, value)?;
        Ok(())
    }

    fn submit(&self) -> Result<()> {
        let before = self.app.store().len();
        self.app.input().submit()?;
        for notice in self.app.dom().take_notices() {
            output::print_notice(&notice);
        }
        if self.app.store().len() > before {
            if let Some(project) = self.app.store().snapshot().last() {
                output::print_added(project);
            }
        }
        Ok(())
    }

    fn release_held(&mut self) -> Result<()> {
        if let Some(session) = self.held.take() {
            session.release()?;
        }
        Ok(())
    }

    fn report_move(&self, id: &str, before: Option<ProjectStatus>) {
        if let Some(project) = self.app.store().get(id) {
            if Some(project.status()) != before {
                output::print_moved(&project);
            } else {
                output::print_info(&format!("{} is already {}", project.title(), project.status().list_name()));
            }
        }
    }

    /// Accept a full id or a unique prefix of one.
    fn resolve(&self, id: &str) -> Result<String> {
        let snapshot = self.app.store().snapshot();
        if snapshot.iter().any(|p| p.id() == id) {
            return Ok(id.to_string());
        }
        let matches: Vec<&str> = snapshot
            .iter()
            .map(|p| p.id())
            .filter(|candidate| candidate.starts_with(id))
            .collect();
        match matches.as_slice() {
            [only] => Ok(only.to_string()),
            [] => Err(BoardError::ProjectNotFound(id.to_string()).into()),
            _ => bail!("'{}' matches {} projects, use more characters", id, matches.len()),
        }
    }
}

/// Where shell commands come from.
enum LineSource {
    /// A script file or piped stdin, read line by line.
    Reader(Lines<Box<dyn BufRead>>),
    /// A terminal, prompted one command at a time.
    Prompt(ColorfulTheme),
}

impl LineSource {
    fn open(script: Option<&PathBuf>) -> Result<Self> {
        let reader: Box<dyn BufRead> = match script {
            Some(path) => Box::new(BufReader::new(
                File::open(path).with_context(|| format!("Failed to open script {}", path.display()))?,
            )),
            None if io::stdin().is_terminal() => return Ok(Self::Prompt(ColorfulTheme::default())),
            None => Box::new(io::stdin().lock()),
        };
        Ok(Self::Reader(reader.lines()))
    }

    fn is_interactive(&self) -> bool {
        matches!(self, Self::Prompt(_))
    }

    /// Next command line, or `None` at end of input.
    fn next_line(&mut self) -> Result<Option<String>> {
        match self {
            Self::Reader(lines) => Ok(lines.next().transpose()?),
            Self::Prompt(theme) => {
                let read = Input::<String>::with_theme(theme)
                    .with_prompt("projboard")
                    .allow_empty(true)
                    .interact_text();
                match read {
                    Ok(line) => Ok(Some(line)),
                    Err(dialoguer::Error::IO(e))
                        if matches!(e.kind(), io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof) =>
                    {
                        Ok(None)
                    }
                    Err(e) => Err(e).context("Failed to read command"),
                }
            }
        }
    }
}

pub fn execute(args: ShellArgs, app: &App) -> Result<()> {
    let mut source = LineSource::open(args.script.as_ref())?;
    if source.is_interactive() {
        println!("{} Type 'help' for commands.", "projboard shell".bold());
    }
    let mut shell = Shell::new(app);
    let mut line_no = 0;

    while let Some(line) = source.next_line()? {
        line_no += 1;

        let result = Command::parse(&line).and_then(|command| match command {
            Some(command) => shell.run(command),
            None => Ok(true),
        });
        match result {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) if args.fail_fast => return Err(e.context(format!("line {}", line_no))),
            Err(e) => output::print_notice(&format!("{:#}", e)),
        }
    }

    shell.release_held()?;
    debug!(lines = line_no, "Shell finished");
    Ok(())
}
