//! Pure edit reducer: (Report, Edit) -> Report
//!
//! Every data-entry change is an `Edit` applied to the current report, which
//! yields a new report value. The input report is never touched, so a failed
//! edit leaves the caller's state exactly as it was.
//!
//! Numeric text is stored verbatim. Only structural misuse is rejected: an
//! unknown field, a row index past the end, a template for another list, or
//! a value outside the option list of a select-backed field.
//!
//! Removing the last row of a list is allowed here and leaves it empty; the
//! "keep one row" rule belongs to the session.

use std::str::FromStr;

use crate::error::EditError;
use crate::model::{
    AfterSalesStaffEntry, Branch, BranchMetrics, ExpenseCategory, PlanEntry, ProgramCount,
    ProgramRevenue, ProjectEntry, ProjectStatus, Report, SalesStaffEntry, BRANCH_NAMES, MONTHS,
    PRIVATE_PROGRAMS, REGULAR_PROGRAMS, STATUS_LABELS,
};

// =============================================================================
// Field paths
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopField {
    Month,
    Year,
    Summary,
}

impl TopField {
    pub const ALL: [TopField; 3] = [TopField::Month, TopField::Year, TopField::Summary];

    pub fn name(&self) -> &'static str {
        match self {
            TopField::Month => "month",
            TopField::Year => "year",
            TopField::Summary => "summary",
        }
    }
}

impl FromStr for TopField {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TopField::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| EditError::UnknownField {
                target: "report",
                field: s.to_string(),
            })
    }
}

/// Scalar figures of one branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchField {
    Revenue,
    TargetRevenue,
    PrevRevenue,
    Profit,
    TargetProfit,
    PrevProfit,
    Expenses,
    PrevExpenses,
    RegularCount,
    PrivateCount,
    NewRegister,
    Extension,
    RegularNew,
    RegularExt,
    PrivateNew,
    PrivateExt,
}

impl BranchField {
    pub const ALL: [BranchField; 16] = [
        BranchField::Revenue,
        BranchField::TargetRevenue,
        BranchField::PrevRevenue,
        BranchField::Profit,
        BranchField::TargetProfit,
        BranchField::PrevProfit,
        BranchField::Expenses,
        BranchField::PrevExpenses,
        BranchField::RegularCount,
        BranchField::PrivateCount,
        BranchField::NewRegister,
        BranchField::Extension,
        BranchField::RegularNew,
        BranchField::RegularExt,
        BranchField::PrivateNew,
        BranchField::PrivateExt,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BranchField::Revenue => "revenue",
            BranchField::TargetRevenue => "target_revenue",
            BranchField::PrevRevenue => "prev_revenue",
            BranchField::Profit => "profit",
            BranchField::TargetProfit => "target_profit",
            BranchField::PrevProfit => "prev_profit",
            BranchField::Expenses => "expenses",
            BranchField::PrevExpenses => "prev_expenses",
            BranchField::RegularCount => "regular_count",
            BranchField::PrivateCount => "private_count",
            BranchField::NewRegister => "new_register",
            BranchField::Extension => "extension",
            BranchField::RegularNew => "regular_new",
            BranchField::RegularExt => "regular_ext",
            BranchField::PrivateNew => "private_new",
            BranchField::PrivateExt => "private_ext",
        }
    }

    pub fn get(self, m: &BranchMetrics) -> &str {
        match self {
            BranchField::Revenue => &m.revenue,
            BranchField::TargetRevenue => &m.target_revenue,
            BranchField::PrevRevenue => &m.prev_revenue,
            BranchField::Profit => &m.profit,
            BranchField::TargetProfit => &m.target_profit,
            BranchField::PrevProfit => &m.prev_profit,
            BranchField::Expenses => &m.expenses,
            BranchField::PrevExpenses => &m.prev_expenses,
            BranchField::RegularCount => &m.regular_count,
            BranchField::PrivateCount => &m.private_count,
            BranchField::NewRegister => &m.new_register,
            BranchField::Extension => &m.extension,
            BranchField::RegularNew => &m.regular_new,
            BranchField::RegularExt => &m.regular_ext,
            BranchField::PrivateNew => &m.private_new,
            BranchField::PrivateExt => &m.private_ext,
        }
    }

    fn slot(self, m: &mut BranchMetrics) -> &mut String {
        match self {
            BranchField::Revenue => &mut m.revenue,
            BranchField::TargetRevenue => &mut m.target_revenue,
            BranchField::PrevRevenue => &mut m.prev_revenue,
            BranchField::Profit => &mut m.profit,
            BranchField::TargetProfit => &mut m.target_profit,
            BranchField::PrevProfit => &mut m.prev_profit,
            BranchField::Expenses => &mut m.expenses,
            BranchField::PrevExpenses => &mut m.prev_expenses,
            BranchField::RegularCount => &mut m.regular_count,
            BranchField::PrivateCount => &mut m.private_count,
            BranchField::NewRegister => &mut m.new_register,
            BranchField::Extension => &mut m.extension,
            BranchField::RegularNew => &mut m.regular_new,
            BranchField::RegularExt => &mut m.regular_ext,
            BranchField::PrivateNew => &mut m.private_new,
            BranchField::PrivateExt => &mut m.private_ext,
        }
    }
}

impl FromStr for BranchField {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BranchField::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| EditError::UnknownField {
                target: "branch",
                field: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    Top(TopField),
    Branch(Branch, BranchField),
}

// =============================================================================
// Lists and rows
// =============================================================================

/// Repeatable lists inside a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchList {
    ExpenseCategories,
    TopRegular,
    TopPrivate,
    RevenueByProgram,
}

impl BranchList {
    pub const ALL: [BranchList; 4] = [
        BranchList::ExpenseCategories,
        BranchList::TopRegular,
        BranchList::TopPrivate,
        BranchList::RevenueByProgram,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BranchList::ExpenseCategories => "expense_categories",
            BranchList::TopRegular => "top_regular",
            BranchList::TopPrivate => "top_private",
            BranchList::RevenueByProgram => "revenue_by_program",
        }
    }

    /// Row appended by the "add row" button of the entry form.
    pub fn template(&self) -> BranchRow {
        match self {
            BranchList::ExpenseCategories => BranchRow::Expense(ExpenseCategory::default()),
            BranchList::TopRegular => BranchRow::Program(ProgramCount {
                program: REGULAR_PROGRAMS[0].to_string(),
                count: String::new(),
            }),
            BranchList::TopPrivate => BranchRow::Program(ProgramCount {
                program: PRIVATE_PROGRAMS[0].to_string(),
                count: String::new(),
            }),
            BranchList::RevenueByProgram => BranchRow::ProgramRevenue(ProgramRevenue::default()),
        }
    }

    pub fn len(&self, m: &BranchMetrics) -> usize {
        match self {
            BranchList::ExpenseCategories => m.expense_categories.len(),
            BranchList::TopRegular => m.top_regular.len(),
            BranchList::TopPrivate => m.top_private.len(),
            BranchList::RevenueByProgram => m.revenue_by_program.len(),
        }
    }

    fn options(&self, field: &str) -> Option<&'static [&'static str]> {
        match (self, field) {
            (BranchList::TopRegular, "program") => Some(&REGULAR_PROGRAMS),
            (BranchList::TopPrivate, "program") => Some(&PRIVATE_PROGRAMS),
            _ => None,
        }
    }
}

impl FromStr for BranchList {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BranchList::ALL
            .into_iter()
            .find(|l| l.name() == s)
            .ok_or_else(|| EditError::UnknownList(s.to_string()))
    }
}

/// Top-level repeatable lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportList {
    SalesStaff,
    AfterSalesStaff,
    DoneProjects,
    FuturePlans,
}

impl ReportList {
    pub const ALL: [ReportList; 4] = [
        ReportList::SalesStaff,
        ReportList::AfterSalesStaff,
        ReportList::DoneProjects,
        ReportList::FuturePlans,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ReportList::SalesStaff => "sales_staff",
            ReportList::AfterSalesStaff => "aftersales_staff",
            ReportList::DoneProjects => "done_projects",
            ReportList::FuturePlans => "future_plans",
        }
    }

    pub fn template(&self) -> ReportRow {
        let branch = Branch::ALL[0].name().to_string();
        match self {
            ReportList::SalesStaff => ReportRow::SalesStaff(SalesStaffEntry::default()),
            ReportList::AfterSalesStaff => {
                ReportRow::AfterSalesStaff(AfterSalesStaffEntry::default())
            }
            ReportList::DoneProjects => ReportRow::Project(ProjectEntry {
                branch,
                ..Default::default()
            }),
            ReportList::FuturePlans => ReportRow::Plan(PlanEntry {
                branch,
                ..Default::default()
            }),
        }
    }

    pub fn len(&self, r: &Report) -> usize {
        match self {
            ReportList::SalesStaff => r.sales_staff.len(),
            ReportList::AfterSalesStaff => r.aftersales_staff.len(),
            ReportList::DoneProjects => r.done_projects.len(),
            ReportList::FuturePlans => r.future_plans.len(),
        }
    }

    fn options(&self, field: &str) -> Option<&'static [&'static str]> {
        match (self, field) {
            (ReportList::DoneProjects | ReportList::FuturePlans, "branch") => Some(&BRANCH_NAMES),
            (ReportList::DoneProjects, "status") => Some(&STATUS_LABELS),
            _ => None,
        }
    }
}

impl FromStr for ReportList {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportList::ALL
            .into_iter()
            .find(|l| l.name() == s)
            .ok_or_else(|| EditError::UnknownList(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BranchRow {
    Expense(ExpenseCategory),
    Program(ProgramCount),
    ProgramRevenue(ProgramRevenue),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportRow {
    SalesStaff(SalesStaffEntry),
    AfterSalesStaff(AfterSalesStaffEntry),
    Project(ProjectEntry),
    Plan(PlanEntry),
}

/// A list row whose text fields can be set by name.
pub trait Row {
    const TARGET: &'static str;
    const FIELDS: &'static [&'static str];

    /// `false` when the row has no field of that name.
    fn assign(&mut self, field: &str, value: &str) -> bool;

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), EditError> {
        if self.assign(field, value) {
            Ok(())
        } else {
            Err(EditError::UnknownField {
                target: Self::TARGET,
                field: field.to_string(),
            })
        }
    }
}

fn put(slot: &mut String, value: &str) -> bool {
    *slot = value.to_string();
    true
}

impl Row for ExpenseCategory {
    const TARGET: &'static str = "expense category";
    const FIELDS: &'static [&'static str] = &["name", "amount"];

    fn assign(&mut self, field: &str, value: &str) -> bool {
        match field {
            "name" => put(&mut self.name, value),
            "amount" => put(&mut self.amount, value),
            _ => false,
        }
    }
}

impl Row for ProgramCount {
    const TARGET: &'static str = "program count";
    const FIELDS: &'static [&'static str] = &["program", "count"];

    fn assign(&mut self, field: &str, value: &str) -> bool {
        match field {
            "program" => put(&mut self.program, value),
            "count" => put(&mut self.count, value),
            _ => false,
        }
    }
}

impl Row for ProgramRevenue {
    const TARGET: &'static str = "program revenue";
    const FIELDS: &'static [&'static str] = &["program", "revenue"];

    fn assign(&mut self, field: &str, value: &str) -> bool {
        match field {
            "program" => put(&mut self.program, value),
            "revenue" => put(&mut self.revenue, value),
            _ => false,
        }
    }
}

impl Row for SalesStaffEntry {
    const TARGET: &'static str = "sales staff";
    const FIELDS: &'static [&'static str] = &["name", "target", "achieved", "deals"];

    fn assign(&mut self, field: &str, value: &str) -> bool {
        match field {
            "name" => put(&mut self.name, value),
            "target" => put(&mut self.target, value),
            "achieved" => put(&mut self.achieved, value),
            "deals" => put(&mut self.deals, value),
            _ => false,
        }
    }
}

impl Row for AfterSalesStaffEntry {
    const TARGET: &'static str = "after sales staff";
    const FIELDS: &'static [&'static str] = &[
        "name",
        "retention_target",
        "retention_achieved",
        "followups",
        "resolutions",
    ];

    fn assign(&mut self, field: &str, value: &str) -> bool {
        match field {
            "name" => put(&mut self.name, value),
            "retention_target" => put(&mut self.retention_target, value),
            "retention_achieved" => put(&mut self.retention_achieved, value),
            "followups" => put(&mut self.followups, value),
            "resolutions" => put(&mut self.resolutions, value),
            _ => false,
        }
    }
}

impl Row for ProjectEntry {
    const TARGET: &'static str = "project";
    const FIELDS: &'static [&'static str] = &["title", "description", "branch", "status"];

    fn assign(&mut self, field: &str, value: &str) -> bool {
        match field {
            "title" => put(&mut self.title, value),
            "description" => put(&mut self.description, value),
            "branch" => put(&mut self.branch, value),
            "status" => match ProjectStatus::from_label(value) {
                Some(status) => {
                    self.status = status;
                    true
                }
                // Options are checked before assignment; keep the row as is.
                None => true,
            },
            _ => false,
        }
    }
}

impl Row for PlanEntry {
    const TARGET: &'static str = "plan";
    const FIELDS: &'static [&'static str] = &["title", "description", "branch", "timeline"];

    fn assign(&mut self, field: &str, value: &str) -> bool {
        match field {
            "title" => put(&mut self.title, value),
            "description" => put(&mut self.description, value),
            "branch" => put(&mut self.branch, value),
            "timeline" => put(&mut self.timeline, value),
            _ => false,
        }
    }
}

// =============================================================================
// Edits
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    SetField {
        path: FieldPath,
        value: String,
    },
    SetBranchRow {
        branch: Branch,
        list: BranchList,
        index: usize,
        field: String,
        value: String,
    },
    AddBranchRow {
        branch: Branch,
        list: BranchList,
        template: BranchRow,
    },
    RemoveBranchRow {
        branch: Branch,
        list: BranchList,
        index: usize,
    },
    SetRow {
        list: ReportList,
        index: usize,
        field: String,
        value: String,
    },
    AddRow {
        list: ReportList,
        template: ReportRow,
    },
    RemoveRow {
        list: ReportList,
        index: usize,
    },
}

impl Edit {
    /// Short event name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Edit::SetField { .. } => "set_field",
            Edit::SetBranchRow { .. } => "set_branch_row",
            Edit::AddBranchRow { .. } => "add_branch_row",
            Edit::RemoveBranchRow { .. } => "remove_branch_row",
            Edit::SetRow { .. } => "set_row",
            Edit::AddRow { .. } => "add_row",
            Edit::RemoveRow { .. } => "remove_row",
        }
    }

    /// Name of the field or list the edit targets.
    pub fn target(&self) -> &'static str {
        match self {
            Edit::SetField {
                path: FieldPath::Top(f),
                ..
            } => f.name(),
            Edit::SetField {
                path: FieldPath::Branch(_, f),
                ..
            } => f.name(),
            Edit::SetBranchRow { list, .. }
            | Edit::AddBranchRow { list, .. }
            | Edit::RemoveBranchRow { list, .. } => list.name(),
            Edit::SetRow { list, .. }
            | Edit::AddRow { list, .. }
            | Edit::RemoveRow { list, .. } => list.name(),
        }
    }
}

/// Apply one edit, producing the next report.
pub fn apply(report: &Report, edit: Edit) -> Result<Report, EditError> {
    let mut next = report.clone();
    match edit {
        Edit::SetField { path, value } => match path {
            FieldPath::Top(field) => {
                if field == TopField::Month {
                    check_option("month", &value, &MONTHS)?;
                }
                let slot = match field {
                    TopField::Month => &mut next.month,
                    TopField::Year => &mut next.year,
                    TopField::Summary => &mut next.summary,
                };
                *slot = value;
            }
            FieldPath::Branch(branch, field) => {
                *field.slot(&mut next.branches[branch]) = value;
            }
        },

        Edit::SetBranchRow {
            branch,
            list,
            index,
            field,
            value,
        } => {
            if let Some(options) = list.options(&field) {
                check_option("program", &value, options)?;
            }
            let m = &mut next.branches[branch];
            match list {
                BranchList::ExpenseCategories => {
                    set_in(&mut m.expense_categories, list.name(), index, &field, &value)?
                }
                BranchList::TopRegular => {
                    set_in(&mut m.top_regular, list.name(), index, &field, &value)?
                }
                BranchList::TopPrivate => {
                    set_in(&mut m.top_private, list.name(), index, &field, &value)?
                }
                BranchList::RevenueByProgram => {
                    set_in(&mut m.revenue_by_program, list.name(), index, &field, &value)?
                }
            }
        }

        Edit::AddBranchRow {
            branch,
            list,
            template,
        } => {
            let m = &mut next.branches[branch];
            match (list, template) {
                (BranchList::ExpenseCategories, BranchRow::Expense(row)) => {
                    m.expense_categories.push(row)
                }
                (BranchList::TopRegular, BranchRow::Program(row)) => m.top_regular.push(row),
                (BranchList::TopPrivate, BranchRow::Program(row)) => m.top_private.push(row),
                (BranchList::RevenueByProgram, BranchRow::ProgramRevenue(row)) => {
                    m.revenue_by_program.push(row)
                }
                (list, _) => return Err(EditError::TemplateMismatch { target: list.name() }),
            }
        }

        Edit::RemoveBranchRow {
            branch,
            list,
            index,
        } => {
            let m = &mut next.branches[branch];
            match list {
                BranchList::ExpenseCategories => {
                    remove_in(&mut m.expense_categories, list.name(), index)?
                }
                BranchList::TopRegular => remove_in(&mut m.top_regular, list.name(), index)?,
                BranchList::TopPrivate => remove_in(&mut m.top_private, list.name(), index)?,
                BranchList::RevenueByProgram => {
                    remove_in(&mut m.revenue_by_program, list.name(), index)?
                }
            }
        }

        Edit::SetRow {
            list,
            index,
            field,
            value,
        } => {
            if let Some(options) = list.options(&field) {
                let label = if field == "status" { "status" } else { "branch" };
                check_option(label, &value, options)?;
            }
            match list {
                ReportList::SalesStaff => {
                    set_in(&mut next.sales_staff, list.name(), index, &field, &value)?
                }
                ReportList::AfterSalesStaff => {
                    set_in(&mut next.aftersales_staff, list.name(), index, &field, &value)?
                }
                ReportList::DoneProjects => {
                    set_in(&mut next.done_projects, list.name(), index, &field, &value)?
                }
                ReportList::FuturePlans => {
                    set_in(&mut next.future_plans, list.name(), index, &field, &value)?
                }
            }
        }

        Edit::AddRow { list, template } => match (list, template) {
            (ReportList::SalesStaff, ReportRow::SalesStaff(row)) => next.sales_staff.push(row),
            (ReportList::AfterSalesStaff, ReportRow::AfterSalesStaff(row)) => {
                next.aftersales_staff.push(row)
            }
            (ReportList::DoneProjects, ReportRow::Project(row)) => next.done_projects.push(row),
            (ReportList::FuturePlans, ReportRow::Plan(row)) => next.future_plans.push(row),
            (list, _) => return Err(EditError::TemplateMismatch { target: list.name() }),
        },

        Edit::RemoveRow { list, index } => match list {
            ReportList::SalesStaff => remove_in(&mut next.sales_staff, list.name(), index)?,
            ReportList::AfterSalesStaff => {
                remove_in(&mut next.aftersales_staff, list.name(), index)?
            }
            ReportList::DoneProjects => remove_in(&mut next.done_projects, list.name(), index)?,
            ReportList::FuturePlans => remove_in(&mut next.future_plans, list.name(), index)?,
        },
    }
    Ok(next)
}

fn check_option(field: &'static str, value: &str, options: &[&str]) -> Result<(), EditError> {
    if options.contains(&value) {
        Ok(())
    } else {
        Err(EditError::InvalidOption {
            field,
            value: value.to_string(),
            options: options.join(", "),
        })
    }
}

fn set_in<R: Row>(
    rows: &mut [R],
    target: &'static str,
    index: usize,
    field: &str,
    value: &str,
) -> Result<(), EditError> {
    let len = rows.len();
    let row = rows
        .get_mut(index)
        .ok_or(EditError::RowOutOfRange { target, index, len })?;
    row.set_field(field, value)
}

fn remove_in<R>(rows: &mut Vec<R>, target: &'static str, index: usize) -> Result<(), EditError> {
    if index >= rows.len() {
        return Err(EditError::RowOutOfRange {
            target,
            index,
            len: rows.len(),
        });
    }
    rows.remove(index);
    Ok(())
}

// =============================================================================
// Named operations
// =============================================================================

pub fn set_scalar(report: &Report, path: FieldPath, value: &str) -> Result<Report, EditError> {
    apply(
        report,
        Edit::SetField {
            path,
            value: value.to_string(),
        },
    )
}

pub fn set_branch_row(
    report: &Report,
    branch: Branch,
    list: BranchList,
    index: usize,
    field: &str,
    value: &str,
) -> Result<Report, EditError> {
    apply(
        report,
        Edit::SetBranchRow {
            branch,
            list,
            index,
            field: field.to_string(),
            value: value.to_string(),
        },
    )
}

pub fn add_branch_row(
    report: &Report,
    branch: Branch,
    list: BranchList,
    template: BranchRow,
) -> Result<Report, EditError> {
    apply(
        report,
        Edit::AddBranchRow {
            branch,
            list,
            template,
        },
    )
}

pub fn remove_branch_row(
    report: &Report,
    branch: Branch,
    list: BranchList,
    index: usize,
) -> Result<Report, EditError> {
    apply(
        report,
        Edit::RemoveBranchRow {
            branch,
            list,
            index,
        },
    )
}

pub fn set_row(
    report: &Report,
    list: ReportList,
    index: usize,
    field: &str,
    value: &str,
) -> Result<Report, EditError> {
    apply(
        report,
        Edit::SetRow {
            list,
            index,
            field: field.to_string(),
            value: value.to_string(),
        },
    )
}

pub fn add_row(
    report: &Report,
    list: ReportList,
    template: ReportRow,
) -> Result<Report, EditError> {
    apply(report, Edit::AddRow { list, template })
}

pub fn remove_row(report: &Report, list: ReportList, index: usize) -> Result<Report, EditError> {
    apply(report, Edit::RemoveRow { list, index })
}
