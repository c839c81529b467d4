use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use branchdeck::command::{self, Command, ListName, HELP};
use branchdeck::config::Config;
use branchdeck::nav::Mode;
use branchdeck::session::Session;

#[derive(Parser)]
#[command(
    name = "branchdeck",
    version,
    about = "Monthly branch report builder and slide presenter"
)]
struct Cli {
    /// Start from a previously exported report
    #[arg(long)]
    import: Option<PathBuf>,
    /// Start in presentation mode
    #[arg(long)]
    present: bool,
    /// Directory for exported reports (overrides EXPORT_DIR)
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut cfg = Config::from_env();
    if let Some(dir) = cli.export_dir {
        cfg.export_dir = dir;
    }

    let mut session = Session::new(cfg);
    if let Some(path) = &cli.import {
        session
            .import(path)
            .with_context(|| format!("cannot start from {}", path.display()))?;
    }
    if cli.present {
        session.set_mode(Mode::Present);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write!(out, "{}", view(&session))?;
    prompt(&mut out, &session)?;

    for line in stdin.lock().lines() {
        let line = line.context("reading command")?;
        if line.trim().is_empty() {
            prompt(&mut out, &session)?;
            continue;
        }
        match command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(cmd) => execute(&mut session, cmd, &mut out)?,
            Err(err) => writeln!(out, "error: {}", err)?,
        }
        prompt(&mut out, &session)?;
    }

    session.finish();
    Ok(())
}

fn prompt(out: &mut impl Write, session: &Session) -> io::Result<()> {
    let nav = session.navigator();
    let branch = session.active_branch().name();
    write!(
        out,
        "[{} {} {} {}] > ",
        nav.mode().as_str(),
        session.tab().key(),
        branch.split_whitespace().next().unwrap_or(branch),
        nav.position_label()
    )?;
    out.flush()
}

/// The current slide when presenting, the entry panel otherwise.
fn view(session: &Session) -> String {
    match session.mode() {
        Mode::Present => session.render_current(),
        Mode::Entry => session.render_panel(),
    }
}

fn execute(session: &mut Session, cmd: Command, out: &mut impl Write) -> Result<()> {
    let edited = match cmd {
        Command::Tab(tab) => {
            session.set_tab(tab);
            write!(out, "{}", session.render_panel())?;
            return Ok(());
        }
        Command::Branch(branch) => {
            session.select_branch(branch);
            writeln!(out, "branch: {}", branch.name())?;
            return Ok(());
        }
        Command::Set { field, value } => session.set_field(&field, &value),
        Command::Row {
            list,
            index,
            field,
            value,
        } => match list {
            ListName::Branch(list) => session.set_branch_row(list, index, &field, &value),
            ListName::Report(list) => session.set_row(list, index, &field, &value),
        },
        Command::Add(list) => match list {
            ListName::Branch(list) => session.add_branch_row(list),
            ListName::Report(list) => session.add_row(list),
        },
        Command::Remove { list, index } => match list {
            ListName::Branch(list) => session.remove_branch_row(list, index),
            ListName::Report(list) => session.remove_row(list, index),
        },

        Command::Next => {
            session.move_by(1);
            write!(out, "{}", session.render_current())?;
            return Ok(());
        }
        Command::Prev => {
            session.move_by(-1);
            write!(out, "{}", session.render_current())?;
            return Ok(());
        }
        Command::Goto(index) => {
            session.go_to(index);
            write!(out, "{}", session.render_current())?;
            return Ok(());
        }
        Command::Key(key) => {
            if session.on_key(key) {
                write!(out, "{}", session.render_current())?;
            } else {
                writeln!(out, "arrow keys work in presentation mode (`present`)")?;
            }
            return Ok(());
        }
        Command::Entry => {
            session.set_mode(Mode::Entry);
            write!(out, "{}", session.render_panel())?;
            return Ok(());
        }
        Command::Present => {
            session.set_mode(Mode::Present);
            write!(out, "{}", session.render_current())?;
            return Ok(());
        }
        Command::Show => {
            write!(out, "{}", view(session))?;
            return Ok(());
        }
        Command::Slides => {
            write!(out, "{}", session.render_index())?;
            return Ok(());
        }
        Command::Deck => {
            write!(out, "{}", session.render_deck().join("\n"))?;
            return Ok(());
        }

        Command::Export => {
            match session.export() {
                Ok(path) => writeln!(out, "exported {}", path.display())?,
                Err(err) => writeln!(out, "error: {}", err)?,
            }
            return Ok(());
        }
        Command::Import(path) => {
            match session.import(&path) {
                Ok(()) => writeln!(
                    out,
                    "imported {} ({})",
                    path.display(),
                    session.report().period_label()
                )?,
                Err(err) => writeln!(out, "error: {}", err)?,
            }
            return Ok(());
        }
        Command::Help => {
            writeln!(out, "{}", HELP)?;
            return Ok(());
        }
        Command::Quit => return Ok(()),
    };

    match edited {
        Ok(()) => writeln!(out, "ok")?,
        Err(err) => writeln!(out, "error: {}", err)?,
    }
    Ok(())
}
