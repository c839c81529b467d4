//! Line commands for the terminal session.
//!
//! Row numbers are 1-based here and converted to 0-based indexes for the
//! session. Values run to the end of the line, so they may contain spaces.

use std::path::PathBuf;
use std::str::FromStr;

use crate::edit::{BranchList, ReportList};
use crate::error::CommandError;
use crate::model::Branch;
use crate::nav::Key;
use crate::panel::Tab;

pub const HELP: &str = "\
Entry
  tab <general|branch|staff|plans>      switch entry tab
  branch <name>                         select branch (jatibening, summarecon, cikarang)
  set <field> [value...]                set month/year/summary or a figure of the branch
  row <list> <n> <field> [value...]     set a field of row n
  add <list>                            append a row
  rm <list> <n>                         remove row n
Slides
  present | entry                       switch mode
  next | prev                           move one slide
  key <left|right|up|down>              arrow key (presentation mode only)
  goto <n>                              jump to slide n
  show                                  current slide (or entry panel)
  slides                                list all slides
  deck                                  print every slide
Files
  export                                write the report as JSON
  import <path>                         load a report from JSON
  help | quit";

/// A repeatable list, either inside the active branch or top-level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListName {
    Branch(BranchList),
    Report(ReportList),
}

impl FromStr for ListName {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(list) = BranchList::from_str(s) {
            return Ok(ListName::Branch(list));
        }
        if let Ok(list) = ReportList::from_str(s) {
            return Ok(ListName::Report(list));
        }
        Err(CommandError::Invalid {
            what: "list",
            value: s.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tab(Tab),
    Branch(Branch),
    Set {
        field: String,
        value: String,
    },
    Row {
        list: ListName,
        index: usize,
        field: String,
        value: String,
    },
    Add(ListName),
    Remove {
        list: ListName,
        index: usize,
    },
    Next,
    Prev,
    Key(Key),
    Goto(usize),
    Entry,
    Present,
    Show,
    Slides,
    Deck,
    Export,
    Import(PathBuf),
    Help,
    Quit,
}

/// Splits off leading words while keeping the untouched remainder.
struct Words<'a> {
    rest: &'a str,
}

impl<'a> Words<'a> {
    fn new(line: &'a str) -> Self {
        Self { rest: line.trim() }
    }

    fn next_word(&mut self) -> Option<&'a str> {
        let rest = self.rest.trim_start();
        if rest.is_empty() {
            return None;
        }
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let (word, tail) = rest.split_at(end);
        self.rest = tail;
        Some(word)
    }

    fn require(
        &mut self,
        command: &'static str,
        what: &'static str,
    ) -> Result<&'a str, CommandError> {
        self.next_word().ok_or(CommandError::Missing { command, what })
    }

    fn remainder(&self) -> &'a str {
        self.rest.trim()
    }
}

fn row_number(text: &str) -> Result<usize, CommandError> {
    match text.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(CommandError::Invalid {
            what: "row number",
            value: text.to_string(),
        }),
    }
}

pub fn parse(line: &str) -> Result<Command, CommandError> {
    let mut words = Words::new(line);
    let head = words.next_word().ok_or(CommandError::Empty)?;
    let cmd = match head.to_lowercase().as_str() {
        "tab" => Command::Tab(words.require("tab", "a tab name")?.parse()?),
        "branch" => {
            let name = words.remainder();
            if name.is_empty() {
                return Err(CommandError::Missing {
                    command: "branch",
                    what: "a branch name",
                });
            }
            Command::Branch(Branch::from_name(name).ok_or_else(|| CommandError::Invalid {
                what: "branch",
                value: name.to_string(),
            })?)
        }
        "set" => Command::Set {
            field: words.require("set", "a field name")?.to_string(),
            value: words.remainder().to_string(),
        },
        "row" => {
            let list = words.require("row", "a list name")?.parse()?;
            let index = row_number(words.require("row", "a row number")?)?;
            let field = words.require("row", "a field name")?.to_string();
            Command::Row {
                list,
                index,
                field,
                value: words.remainder().to_string(),
            }
        }
        "add" => Command::Add(words.require("add", "a list name")?.parse()?),
        "rm" | "remove" => {
            let list = words.require("rm", "a list name")?.parse()?;
            let index = row_number(words.require("rm", "a row number")?)?;
            Command::Remove { list, index }
        }
        "next" | "n" => Command::Next,
        "prev" | "p" => Command::Prev,
        "key" => Command::Key(words.require("key", "a direction")?.parse()?),
        "goto" | "go" => Command::Goto(row_number(words.require("goto", "a slide number")?).map_err(
            |_| CommandError::Invalid {
                what: "slide number",
                value: line.trim().to_string(),
            },
        )?),
        "entry" => Command::Entry,
        "present" => Command::Present,
        "show" => Command::Show,
        "slides" => Command::Slides,
        "deck" => Command::Deck,
        "export" => Command::Export,
        "import" => {
            let path = words.remainder();
            if path.is_empty() {
                return Err(CommandError::Missing {
                    command: "import",
                    what: "a file path",
                });
            }
            Command::Import(PathBuf::from(path))
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(CommandError::Unknown(head.to_string())),
    };
    Ok(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_keeps_spaces_in_value() {
        assert_eq!(
            parse("set summary  Bulan ini  sangat baik ").unwrap(),
            Command::Set {
                field: "summary".into(),
                value: "Bulan ini  sangat baik".into()
            }
        );
        assert_eq!(
            parse("set revenue").unwrap(),
            Command::Set {
                field: "revenue".into(),
                value: String::new()
            }
        );
    }

    #[test]
    fn row_numbers_are_one_based() {
        assert_eq!(
            parse("row top_regular 2 program TOEFL Preparation").unwrap(),
            Command::Row {
                list: ListName::Branch(BranchList::TopRegular),
                index: 1,
                field: "program".into(),
                value: "TOEFL Preparation".into()
            }
        );
        assert_eq!(
            parse("rm sales_staff 0").unwrap_err(),
            CommandError::Invalid {
                what: "row number",
                value: "0".into()
            }
        );
    }

    #[test]
    fn lists_resolve_by_scope() {
        assert_eq!(
            parse("add future_plans").unwrap(),
            Command::Add(ListName::Report(ReportList::FuturePlans))
        );
        assert_eq!(
            parse("add expense_categories").unwrap(),
            Command::Add(ListName::Branch(BranchList::ExpenseCategories))
        );
        assert!(matches!(
            parse("add salaries"),
            Err(CommandError::Invalid { what: "list", .. })
        ));
    }

    #[test]
    fn branch_accepts_short_names() {
        assert_eq!(parse("branch cikarang").unwrap(), Command::Branch(Branch::Cikarang));
        assert_eq!(
            parse("branch Summarecon Bekasi").unwrap(),
            Command::Branch(Branch::Summarecon)
        );
        assert!(parse("branch bogor").is_err());
    }

    #[test]
    fn navigation_commands() {
        assert_eq!(parse("goto 17").unwrap(), Command::Goto(16));
        assert_eq!(parse("key ArrowLeft").unwrap(), Command::Key(Key::Left));
        assert_eq!(parse("NEXT").unwrap(), Command::Next);
        assert_eq!(parse("deck").unwrap(), Command::Deck);
        assert_eq!(
            parse("tab per").unwrap_err(),
            CommandError::Invalid {
                what: "tab",
                value: "per".into()
            }
        );
        assert_eq!(parse("tab branch").unwrap(), Command::Tab(Tab::Branch));
    }

    #[test]
    fn errors() {
        assert_eq!(parse("   ").unwrap_err(), CommandError::Empty);
        assert_eq!(parse("dance").unwrap_err(), CommandError::Unknown("dance".into()));
        assert_eq!(
            parse("row sales_staff").unwrap_err(),
            CommandError::Missing {
                command: "row",
                what: "a row number"
            }
        );
        assert!(matches!(parse("import"), Err(CommandError::Missing { .. })));
        assert_eq!(
            parse("import reports/Mei 2025.json").unwrap(),
            Command::Import(PathBuf::from("reports/Mei 2025.json"))
        );
    }
}
