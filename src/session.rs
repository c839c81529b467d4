//! Interactive session state: the report, the entry panel (tab, branch) and
//! the slide navigator.
//!
//! Every edit goes through the pure reducer in `edit`; the session adds the
//! entry-panel rules on top (branch scoping, default row templates, keeping
//! at least one row per list) and logs what happened.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::Config;
use crate::edit::{self, BranchField, BranchList, Edit, FieldPath, ReportList, TopField};
use crate::error::{EditError, TransferError};
use crate::logging;
use crate::model::{Branch, Report};
use crate::nav::{Key, Mode, Navigator};
use crate::panel::{self, Tab};
use crate::render::TextRenderer;
use crate::slides::{RenderedSlide, SlideRegistry};
use crate::transfer;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub edits: u64,
    pub rejected: u64,
    pub exports: u64,
    pub imports: u64,
}

pub struct Session {
    config: Config,
    report: Report,
    registry: SlideRegistry,
    nav: Navigator,
    renderer: TextRenderer,
    tab: Tab,
    branch: Branch,
    stats: SessionStats,
}

impl Session {
    /// Session over a fresh report for the current month.
    pub fn new(config: Config) -> Self {
        Self::with_report(config, Report::fresh())
    }

    pub fn with_report(config: Config, report: Report) -> Self {
        let registry = SlideRegistry::build(&config.org_name);
        let nav = Navigator::new(registry.len());
        let renderer = TextRenderer::new(config.render_width);
        logging::log(
            logging::Level::Info,
            logging::Domain::System,
            "session_start",
            logging::obj(&[
                ("period", logging::v_str(&report.period_label())),
                ("slides", serde_json::json!(registry.len())),
                ("report_digest", logging::v_str(&transfer::report_digest(&report))),
            ]),
        );
        Self {
            config,
            report,
            registry,
            nav,
            renderer,
            tab: Tab::default(),
            branch: Branch::ALL[0],
            stats: SessionStats::default(),
        }
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn registry(&self) -> &SlideRegistry {
        &self.registry
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn active_branch(&self) -> Branch {
        self.branch
    }

    pub fn select_branch(&mut self, branch: Branch) {
        self.branch = branch;
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    /// Apply an edit; on error the report is left as it was.
    pub fn apply(&mut self, edit: Edit) -> Result<(), EditError> {
        let kind = edit.kind();
        let target = edit.target();
        let branch = match &edit {
            Edit::SetField {
                path: FieldPath::Branch(b, _),
                ..
            }
            | Edit::SetBranchRow { branch: b, .. }
            | Edit::AddBranchRow { branch: b, .. }
            | Edit::RemoveBranchRow { branch: b, .. } => Some(b.name()),
            _ => None,
        };
        match edit::apply(&self.report, edit) {
            Ok(next) => {
                self.report = next;
                self.stats.edits += 1;
                let digest = transfer::report_digest(&self.report);
                logging::log_edit(kind, target, branch, &digest, None);
                Ok(())
            }
            Err(err) => self.reject(kind, target, branch, err),
        }
    }

    fn reject(
        &mut self,
        kind: &str,
        target: &str,
        branch: Option<&str>,
        err: EditError,
    ) -> Result<(), EditError> {
        self.stats.rejected += 1;
        let digest = transfer::report_digest(&self.report);
        logging::log_edit(kind, target, branch, &digest, Some(&err.to_string()));
        Err(err)
    }

    /// Set a scalar by name: `month`, `year`, `summary`, or a figure of the
    /// active branch such as `target_revenue`.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), EditError> {
        let path = if let Ok(top) = TopField::from_str(name) {
            FieldPath::Top(top)
        } else if let Ok(field) = BranchField::from_str(name) {
            FieldPath::Branch(self.branch, field)
        } else {
            let err = EditError::UnknownField {
                target: "report",
                field: name.to_string(),
            };
            return self.reject("set_field", "report", None, err);
        };
        self.apply(Edit::SetField {
            path,
            value: value.to_string(),
        })
    }

    pub fn set_branch_row(
        &mut self,
        list: BranchList,
        index: usize,
        field: &str,
        value: &str,
    ) -> Result<(), EditError> {
        self.apply(Edit::SetBranchRow {
            branch: self.branch,
            list,
            index,
            field: field.to_string(),
            value: value.to_string(),
        })
    }

    pub fn add_branch_row(&mut self, list: BranchList) -> Result<(), EditError> {
        self.apply(Edit::AddBranchRow {
            branch: self.branch,
            list,
            template: list.template(),
        })
    }

    pub fn remove_branch_row(&mut self, list: BranchList, index: usize) -> Result<(), EditError> {
        let len = list.len(self.report.branch(self.branch));
        if len <= 1 && index < len {
            let branch = Some(self.branch.name());
            let err = EditError::LastRow { target: list.name() };
            return self.reject("remove_branch_row", list.name(), branch, err);
        }
        self.apply(Edit::RemoveBranchRow {
            branch: self.branch,
            list,
            index,
        })
    }

    pub fn set_row(
        &mut self,
        list: ReportList,
        index: usize,
        field: &str,
        value: &str,
    ) -> Result<(), EditError> {
        self.apply(Edit::SetRow {
            list,
            index,
            field: field.to_string(),
            value: value.to_string(),
        })
    }

    pub fn add_row(&mut self, list: ReportList) -> Result<(), EditError> {
        self.apply(Edit::AddRow {
            list,
            template: list.template(),
        })
    }

    pub fn remove_row(&mut self, list: ReportList, index: usize) -> Result<(), EditError> {
        let len = list.len(&self.report);
        if len <= 1 && index < len {
            let err = EditError::LastRow { target: list.name() };
            return self.reject("remove_row", list.name(), None, err);
        }
        self.apply(Edit::RemoveRow { list, index })
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    pub fn mode(&self) -> Mode {
        self.nav.mode()
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.nav.set_mode(mode);
        self.log_nav("mode");
    }

    pub fn move_by(&mut self, delta: isize) -> usize {
        let index = self.nav.move_by(delta);
        self.log_nav("move");
        index
    }

    pub fn go_to(&mut self, index: usize) -> usize {
        let index = self.nav.go_to(index);
        self.log_nav("jump");
        index
    }

    /// `false` when the key is ignored (entry mode).
    pub fn on_key(&mut self, key: Key) -> bool {
        let handled = self.nav.on_key(key);
        if handled {
            self.log_nav("key");
        }
        handled
    }

    fn log_nav(&self, event: &str) {
        logging::log_navigation(
            event,
            self.nav.current(),
            self.nav.total(),
            self.nav.mode().as_str(),
        );
    }

    pub fn current_slide(&self) -> Option<RenderedSlide> {
        let slide = self.registry.render(&self.report, self.nav.current())?;
        logging::log_slide(&slide.id, slide.number, slide.blocks.len());
        Some(slide)
    }

    /// Text of the current slide.
    pub fn render_current(&self) -> String {
        self.current_slide()
            .map(|s| self.renderer.render(&s))
            .unwrap_or_default()
    }

    /// Entry panel for the active tab and branch.
    pub fn render_panel(&self) -> String {
        panel::render_panel(&self.report, self.tab, self.branch)
    }

    pub fn render_index(&self) -> String {
        self.renderer.index(&self.registry, self.nav.current())
    }

    pub fn render_deck(&self) -> Vec<String> {
        self.registry
            .render_all(&self.report)
            .iter()
            .map(|s| self.renderer.render(s))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Import / export
    // -------------------------------------------------------------------------

    pub fn export(&mut self) -> Result<PathBuf, TransferError> {
        let digest = transfer::report_digest(&self.report);
        let result = transfer::export_to_dir(
            &self.report,
            &self.config.export_dir,
            &self.config.export_prefix,
        );
        match result {
            Ok(path) => {
                self.stats.exports += 1;
                logging::log_transfer("export", &path.to_string_lossy(), Some(&digest), None);
                Ok(path)
            }
            Err(err) => {
                let dir = self.config.export_dir.to_string_lossy();
                logging::log_transfer("export", &dir, Some(&digest), Some(&err.to_string()));
                Err(err)
            }
        }
    }

    /// Replace the report with the file's contents. The slide index is kept;
    /// on error the current report stays in place.
    pub fn import(&mut self, path: &Path) -> Result<(), TransferError> {
        match transfer::import_file(path) {
            Ok(report) => {
                let digest = transfer::report_digest(&report);
                self.report = report;
                self.stats.imports += 1;
                logging::log_transfer("import", &path.to_string_lossy(), Some(&digest), None);
                Ok(())
            }
            Err(err) => {
                let source = path.to_string_lossy();
                logging::log_transfer("import", &source, None, Some(&err.to_string()));
                Err(err)
            }
        }
    }

    /// Log the session summary. Call once at shutdown.
    pub fn finish(&self) {
        let s = self.stats;
        logging::log_session_summary(
            s.edits,
            s.rejected,
            s.exports,
            s.imports,
            &transfer::report_digest(&self.report),
        );
        logging::flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::with_report(Config::default(), Report::for_period("Januari", "2025"))
    }

    #[test]
    fn branch_fields_follow_active_branch() {
        let mut s = session();
        s.set_field("revenue", "100").unwrap();
        s.select_branch(Branch::Cikarang);
        s.set_field("revenue", "200").unwrap();
        assert_eq!(s.report().branch(Branch::Jatibening).revenue, "100");
        assert_eq!(s.report().branch(Branch::Cikarang).revenue, "200");
        assert_eq!(s.report().branch(Branch::Summarecon).revenue, "");
    }

    #[test]
    fn top_fields_by_name() {
        let mut s = session();
        s.set_field("summary", "Bulan yang baik").unwrap();
        s.set_field("year", "2026").unwrap();
        assert_eq!(s.report().summary, "Bulan yang baik");
        assert_eq!(s.report().year, "2026");
        assert!(s.set_field("salary", "1").is_err());
        assert_eq!(s.stats().rejected, 1);
    }

    #[test]
    fn last_row_is_kept() {
        let mut s = session();
        let err = s.remove_branch_row(BranchList::ExpenseCategories, 0).unwrap_err();
        assert_eq!(err, EditError::LastRow { target: "expense_categories" });
        assert_eq!(s.report().branch(Branch::Jatibening).expense_categories.len(), 1);

        s.add_branch_row(BranchList::ExpenseCategories).unwrap();
        s.remove_branch_row(BranchList::ExpenseCategories, 0).unwrap();
        assert_eq!(s.report().branch(Branch::Jatibening).expense_categories.len(), 1);

        assert!(matches!(
            s.remove_row(ReportList::FuturePlans, 0),
            Err(EditError::LastRow { .. })
        ));
    }

    #[test]
    fn out_of_range_removal_reports_range() {
        let mut s = session();
        let err = s.remove_row(ReportList::SalesStaff, 5).unwrap_err();
        assert!(matches!(err, EditError::RowOutOfRange { index: 5, len: 1, .. }));
    }

    #[test]
    fn added_rows_use_list_templates() {
        let mut s = session();
        s.select_branch(Branch::Summarecon);
        s.add_branch_row(BranchList::TopPrivate).unwrap();
        s.add_row(ReportList::DoneProjects).unwrap();
        let m = s.report().branch(Branch::Summarecon);
        assert_eq!(m.top_private[1].program, "Private General English");
        assert_eq!(s.report().done_projects[1].branch, "Jatibening Bekasi");
    }

    #[test]
    fn rejected_edit_leaves_report() {
        let mut s = session();
        let before = s.report().clone();
        assert!(s.set_branch_row(BranchList::TopRegular, 0, "program", "Yoga").is_err());
        assert_eq!(s.report(), &before);
    }

    #[test]
    fn navigation_through_session() {
        let mut s = session();
        assert!(!s.on_key(Key::Right));
        s.set_mode(Mode::Present);
        assert!(s.on_key(Key::Right));
        assert_eq!(s.navigator().current(), 1);
        assert_eq!(s.current_slide().unwrap().id, "rev-jatibening");
        s.go_to(40);
        assert_eq!(s.navigator().position_label(), "17 / 17");
        s.set_mode(Mode::Entry);
        assert_eq!(s.navigator().current(), 0);
    }
}
