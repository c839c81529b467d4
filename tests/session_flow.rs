//! End-to-end session flows: entry, presentation, export and import.

use std::fs;

use branchdeck::command::{self, Command, ListName};
use branchdeck::config::Config;
use branchdeck::edit::{BranchList, ReportList};
use branchdeck::error::TransferError;
use branchdeck::model::{Branch, Report};
use branchdeck::nav::{Key, Mode};
use branchdeck::session::Session;
use branchdeck::slides::Block;
use tempfile::TempDir;

fn session_in(dir: &TempDir) -> Session {
    let cfg = Config {
        export_dir: dir.path().to_path_buf(),
        ..Config::default()
    };
    Session::with_report(cfg, Report::for_period("Januari", "2025"))
}

/// Feed command lines to a session the way the terminal binary does.
fn run(session: &mut Session, lines: &[&str]) {
    for line in lines {
        match command::parse(line).unwrap_or_else(|e| panic!("{}: {}", line, e)) {
            Command::Branch(b) => session.select_branch(b),
            Command::Set { field, value } => session.set_field(&field, &value).unwrap(),
            Command::Row {
                list: ListName::Branch(list),
                index,
                field,
                value,
            } => session.set_branch_row(list, index, &field, &value).unwrap(),
            Command::Row {
                list: ListName::Report(list),
                index,
                field,
                value,
            } => session.set_row(list, index, &field, &value).unwrap(),
            Command::Add(ListName::Branch(list)) => session.add_branch_row(list).unwrap(),
            Command::Add(ListName::Report(list)) => session.add_row(list).unwrap(),
            other => panic!("unexpected command in script: {:?}", other),
        }
    }
}

#[test]
fn export_then_import_round_trips() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir);
    run(
        &mut session,
        &[
            "set month Februari",
            "branch summarecon",
            "set revenue 98000000",
            "set target_revenue 100000000",
            "row expense_categories 1 name Sewa Gedung",
            "row expense_categories 1 amount 12500000",
            "add top_private",
            "row top_private 2 program Private IELTS",
            "row top_private 2 count 7",
            "row sales_staff 1 name Dewi",
            "add done_projects",
            "row done_projects 2 title Renovasi kelas",
            "row done_projects 2 status In Progress",
            "set summary Target hampir tercapai.\nPerlu promo.",
        ],
    );
    let exported = session.report().clone();

    let path = session.export().unwrap();
    assert_eq!(path.parent(), Some(session.config().export_dir.as_path()));
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "GE-Bekasi-Report-Februari-2025.json"
    );
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\n  \"branches\": {\n    \"Jatibening Bekasi\""));

    let mut other = session_in(&dir);
    other.import(&path).unwrap();
    assert_eq!(other.report(), &exported);
    assert_eq!(other.stats().imports, 1);
}

#[test]
fn failed_import_keeps_current_report() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir);
    session.set_field("revenue", "5000").unwrap();
    let before = session.report().clone();

    let bad = dir.path().join("broken.json");
    fs::write(&bad, "{\"month\": ").unwrap();
    let err = session.import(&bad).unwrap_err();
    assert!(matches!(err, TransferError::InvalidJson(_)));
    assert!(err.to_string().starts_with("Invalid JSON file"));

    let missing = dir.path().join("missing.json");
    assert!(matches!(session.import(&missing), Err(TransferError::Read { .. })));
    assert_eq!(session.report(), &before);
}

#[test]
fn import_keeps_slide_index() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.json");
    fs::write(
        &path,
        r#"{"month": "Maret", "year": 2025, "branches": {"Cikarang Bekasi": {"revenue": 7500000}}}"#,
    )
    .unwrap();

    let mut session = session_in(&dir);
    session.set_mode(Mode::Present);
    session.go_to(9);
    session.import(&path).unwrap();
    assert_eq!(session.navigator().current(), 9);
    let slide = session.current_slide().unwrap();
    assert_eq!(slide.id, "rev-cikarang");
    match &slide.blocks[0] {
        Block::Stats(cards) => assert_eq!(cards[0].value, "Rp 7.500.000"),
        other => panic!("unexpected block {:?}", other),
    }
    // Lists absent from the file are empty after import.
    assert!(session.report().sales_staff.is_empty());
}

#[test]
fn presentation_walkthrough() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir);
    run(
        &mut session,
        &[
            "set revenue 150000000",
            "set target_revenue 120000000",
            "set prev_revenue 100000000",
        ],
    );
    session.set_mode(Mode::Present);
    assert!(session.on_key(Key::Down));
    let text = session.render_current();
    assert!(text.contains("Rp 150.000.000"));
    assert!(text.contains("+50.0% vs bulan lalu"));
    assert!(text.contains("125.0%"));
    assert!(text.contains("Target tercapai ✓"));
    assert!(text.trim_end().ends_with("2 / 17"));
    assert_eq!(session.render_deck().len(), session.registry().len());

    for _ in 0..40 {
        session.on_key(Key::Right);
    }
    assert_eq!(session.navigator().current(), 16);
    assert!(!session.navigator().can_next());

    session.set_mode(Mode::Entry);
    assert_eq!(session.navigator().current(), 0);
    assert!(!session.on_key(Key::Right));
}

#[test]
fn staff_slide_shows_only_named_rows() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir);
    for _ in 0..4 {
        session.add_row(ReportList::AfterSalesStaff).unwrap();
    }
    session.set_row(ReportList::AfterSalesStaff, 1, "name", "Rina").unwrap();
    session.set_row(ReportList::AfterSalesStaff, 3, "name", "Tono").unwrap();
    session.set_row(ReportList::AfterSalesStaff, 3, "retention_target", "20").unwrap();
    session.set_row(ReportList::AfterSalesStaff, 3, "retention_achieved", "25").unwrap();

    session.go_to(14);
    let slide = session.current_slide().unwrap();
    match &slide.blocks[0] {
        Block::Staff(cards) => {
            let names: Vec<&str> = cards.iter().map(|c| c.name.as_str()).collect();
            assert_eq!(names, vec!["Rina", "Tono"]);
            assert_eq!(cards[1].achievement.to_string(), "125.0");
        }
        other => panic!("unexpected block {:?}", other),
    }
}

#[test]
fn branch_rows_stay_in_their_branch() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir);
    session.select_branch(Branch::Cikarang);
    session.add_branch_row(BranchList::RevenueByProgram).unwrap();
    session.remove_branch_row(BranchList::RevenueByProgram, 0).unwrap();
    assert!(session.remove_branch_row(BranchList::RevenueByProgram, 0).is_err());

    let report = session.report();
    assert_eq!(report.branch(Branch::Cikarang).revenue_by_program.len(), 1);
    assert_eq!(report.branch(Branch::Jatibening).revenue_by_program.len(), 1);
    assert_eq!(session.stats().rejected, 1);
}

#[test]
fn export_into_missing_dir_fails_cleanly() {
    let dir = TempDir::new().unwrap();
    let cfg = Config {
        export_dir: dir.path().join("does/not/exist"),
        ..Config::default()
    };
    let mut session = Session::with_report(cfg, Report::for_period("Mei", "2025"));
    assert!(matches!(session.export(), Err(TransferError::Write { .. })));
    assert_eq!(session.stats().exports, 0);
}
