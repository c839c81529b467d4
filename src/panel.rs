//! Entry panel: the four data-entry tabs rendered as text, each field shown
//! with the name the `set` / `row` commands take.

use std::fmt::Write;
use std::str::FromStr;

use crate::edit::{BranchField, BranchList, ReportList, Row};
use crate::error::CommandError;
use crate::model::{
    AfterSalesStaffEntry, Branch, ExpenseCategory, PlanEntry, ProgramCount, ProgramRevenue,
    ProjectEntry, Report, SalesStaffEntry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    General,
    Branch,
    Staff,
    Plans,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::General, Tab::Branch, Tab::Staff, Tab::Plans];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::General => "General",
            Tab::Branch => "Per Cabang",
            Tab::Staff => "Staff",
            Tab::Plans => "Plans",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Tab::General => "general",
            Tab::Branch => "branch",
            Tab::Staff => "staff",
            Tab::Plans => "plans",
        }
    }
}

impl FromStr for Tab {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Tab::ALL
            .into_iter()
            .find(|t| t.key() == wanted || t.label().to_lowercase() == wanted)
            .ok_or_else(|| CommandError::Invalid {
                what: "tab",
                value: s.to_string(),
            })
    }
}

const FIELD_WIDTH: usize = 34;

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n == {} ==", title);
}

fn field(out: &mut String, label: &str, key: &str, value: &str) {
    let head = format!("{} ({})", label, key);
    let pad = FIELD_WIDTH.saturating_sub(head.chars().count());
    let _ = writeln!(out, "  {}{} {}", head, " ".repeat(pad), value);
}

/// Row values as text, in the order of `R::FIELDS`.
trait RowView: Row {
    fn values(&self) -> Vec<&str>;
}

impl RowView for ExpenseCategory {
    fn values(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.amount.as_str()]
    }
}

impl RowView for ProgramCount {
    fn values(&self) -> Vec<&str> {
        vec![self.program.as_str(), self.count.as_str()]
    }
}

impl RowView for ProgramRevenue {
    fn values(&self) -> Vec<&str> {
        vec![self.program.as_str(), self.revenue.as_str()]
    }
}

impl RowView for SalesStaffEntry {
    fn values(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.target.as_str(),
            self.achieved.as_str(),
            self.deals.as_str(),
        ]
    }
}

impl RowView for AfterSalesStaffEntry {
    fn values(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.retention_target.as_str(),
            self.retention_achieved.as_str(),
            self.followups.as_str(),
            self.resolutions.as_str(),
        ]
    }
}

impl RowView for ProjectEntry {
    fn values(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.description.as_str(),
            self.branch.as_str(),
            self.status.label(),
        ]
    }
}

impl RowView for PlanEntry {
    fn values(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.description.as_str(),
            self.branch.as_str(),
            self.timeline.as_str(),
        ]
    }
}

fn rows<R: RowView>(out: &mut String, title: &str, list: &str, rows: &[R]) {
    let _ = writeln!(out, "  {} [{}]", title, list);
    for (i, row) in rows.iter().enumerate() {
        let cells: Vec<String> = R::FIELDS
            .iter()
            .zip(row.values())
            .map(|(k, v)| format!("{}={:?}", k, v))
            .collect();
        let _ = writeln!(out, "   {:>2}. {}", i + 1, cells.join(" "));
    }
}

fn branch_label(field: BranchField) -> &'static str {
    match field {
        BranchField::Revenue => "Revenue Bulan Ini",
        BranchField::TargetRevenue => "Target Revenue",
        BranchField::PrevRevenue => "Revenue Bulan Lalu",
        BranchField::Profit => "Profit Bulan Ini",
        BranchField::TargetProfit => "Target Profit",
        BranchField::PrevProfit => "Profit Bulan Lalu",
        BranchField::Expenses => "Total Expenses",
        BranchField::PrevExpenses => "Expenses Bulan Lalu",
        BranchField::RegularCount => "Jumlah Kelas Regular",
        BranchField::PrivateCount => "Jumlah Kelas Private",
        BranchField::NewRegister => "Register Baru",
        BranchField::Extension => "Perpanjangan",
        BranchField::RegularNew => "Register Baru (Regular)",
        BranchField::RegularExt => "Perpanjangan (Regular)",
        BranchField::PrivateNew => "Register Baru (Private)",
        BranchField::PrivateExt => "Perpanjangan (Private)",
    }
}

fn branch_fields(out: &mut String, report: &Report, branch: Branch, fields: &[BranchField]) {
    let m = report.branch(branch);
    for f in fields {
        field(out, branch_label(*f), f.name(), f.get(m));
    }
}

pub fn render_panel(report: &Report, tab: Tab, branch: Branch) -> String {
    let mut out = String::new();
    let tabs: Vec<String> = Tab::ALL
        .iter()
        .map(|t| {
            if *t == tab {
                format!("[{}]", t.label())
            } else {
                t.label().to_string()
            }
        })
        .collect();
    let _ = writeln!(out, " {}", tabs.join("  "));

    match tab {
        Tab::General => {
            section(&mut out, "Periode Report");
            field(&mut out, "Bulan", "month", &report.month);
            field(&mut out, "Tahun", "year", &report.year);
            section(&mut out, "Ringkasan Report");
            field(&mut out, "Executive Summary", "summary", &report.summary);
        }
        Tab::Branch => {
            let names: Vec<String> = Branch::ALL
                .iter()
                .map(|b| {
                    if *b == branch {
                        format!("[{}]", b.name())
                    } else {
                        b.name().to_string()
                    }
                })
                .collect();
            let _ = writeln!(out, " {}", names.join("  "));
            use BranchField::*;
            let m = report.branch(branch);

            section(&mut out, "Revenue");
            branch_fields(&mut out, report, branch, &[Revenue, TargetRevenue, PrevRevenue]);
            section(&mut out, "Profit");
            branch_fields(&mut out, report, branch, &[Profit, TargetProfit, PrevProfit]);
            section(&mut out, "Expenses");
            branch_fields(&mut out, report, branch, &[Expenses, PrevExpenses]);
            rows(&mut out, "Kategori", BranchList::ExpenseCategories.name(), &m.expense_categories);
            section(&mut out, "Transaction Analysis");
            branch_fields(
                &mut out,
                report,
                branch,
                &[
                    RegularCount,
                    PrivateCount,
                    NewRegister,
                    Extension,
                    RegularNew,
                    RegularExt,
                    PrivateNew,
                    PrivateExt,
                ],
            );
            rows(&mut out, "Top Regular Programs", BranchList::TopRegular.name(), &m.top_regular);
            rows(&mut out, "Top Private Programs", BranchList::TopPrivate.name(), &m.top_private);
            rows(
                &mut out,
                "Revenue by Program",
                BranchList::RevenueByProgram.name(),
                &m.revenue_by_program,
            );
        }
        Tab::Staff => {
            section(&mut out, "Sales Staff Achievement");
            rows(&mut out, "Sales", ReportList::SalesStaff.name(), &report.sales_staff);
            section(&mut out, "After Sales Staff Achievement");
            rows(
                &mut out,
                "After Sales",
                ReportList::AfterSalesStaff.name(),
                &report.aftersales_staff,
            );
        }
        Tab::Plans => {
            section(&mut out, "What We Have Done");
            rows(&mut out, "Projects", ReportList::DoneProjects.name(), &report.done_projects);
            section(&mut out, "Future Plans");
            rows(&mut out, "Plans", ReportList::FuturePlans.name(), &report.future_plans);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_names() {
        assert_eq!("per cabang".parse::<Tab>(), Ok(Tab::Branch));
        assert_eq!("staff".parse::<Tab>(), Ok(Tab::Staff));
        assert!("finance".parse::<Tab>().is_err());
    }

    #[test]
    fn general_tab_lists_period() {
        let report = Report::for_period("Maret", "2025");
        let text = render_panel(&report, Tab::General, Branch::Jatibening);
        assert!(text.starts_with(" [General]  Per Cabang"));
        assert!(text.contains("Bulan (month)"));
        assert!(text.contains("Maret"));
    }

    #[test]
    fn branch_tab_marks_active_branch() {
        let mut report = Report::for_period("Maret", "2025");
        report.branches[Branch::Summarecon].target_profit = "42".into();
        let text = render_panel(&report, Tab::Branch, Branch::Summarecon);
        assert!(text.contains("[Summarecon Bekasi]"));
        let line = text.lines().find(|l| l.contains("(target_profit)")).unwrap();
        assert!(line.ends_with(" 42"));
        assert!(text.contains("1. program=\"General English\" count=\"\""));
    }

    #[test]
    fn plans_tab_shows_status_label() {
        let report = Report::for_period("Maret", "2025");
        let text = render_panel(&report, Tab::Plans, Branch::Jatibening);
        assert!(text.contains("status=\"Selesai\""));
        assert!(text.contains("[done_projects]"));
    }
}
