//! Report data model: reporting period, per-branch metrics, staff and plan lists.
//!
//! Numeric figures are kept as the text the user typed. Deserialization is
//! lenient: absent or wrongly-typed members fall back to empty values and
//! numbers are kept as their textual form. Only a document that is not JSON
//! at all is rejected (see `transfer`).

use std::ops::{Index, IndexMut};

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Branch display names in deck order; the option list of plan `branch` fields.
pub const BRANCH_NAMES: [&str; 3] = ["Jatibening Bekasi", "Summarecon Bekasi", "Cikarang Bekasi"];

pub const STATUS_LABELS: [&str; 3] = ["Selesai", "In Progress", "On Hold"];

pub const REGULAR_PROGRAMS: [&str; 8] = [
    "General English",
    "TOEFL Preparation",
    "IELTS Preparation",
    "Business English",
    "Conversation Class",
    "Grammar Intensive",
    "Kids English",
    "Teens English",
];

pub const PRIVATE_PROGRAMS: [&str; 7] = [
    "Private General English",
    "Private TOEFL",
    "Private IELTS",
    "Private Business English",
    "Private Conversation",
    "Private Kids",
    "Private Teens",
];

// =============================================================================
// Branches
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Branch {
    #[serde(rename = "Jatibening Bekasi")]
    Jatibening,
    #[serde(rename = "Summarecon Bekasi")]
    Summarecon,
    #[serde(rename = "Cikarang Bekasi")]
    Cikarang,
}

impl Branch {
    /// Canonical order used by the slide deck and the summary table.
    pub const ALL: [Branch; 3] = [Branch::Jatibening, Branch::Summarecon, Branch::Cikarang];

    pub fn name(&self) -> &'static str {
        match self {
            Branch::Jatibening => "Jatibening Bekasi",
            Branch::Summarecon => "Summarecon Bekasi",
            Branch::Cikarang => "Cikarang Bekasi",
        }
    }

    /// Accepts the display name or its first word, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim().to_lowercase();
        Branch::ALL.into_iter().find(|b| {
            let full = b.name().to_lowercase();
            full == wanted || full.split_whitespace().next() == Some(wanted.as_str())
        })
    }
}

/// The three branch records. A struct rather than a map so that the key set
/// is fixed for the lifetime of a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branches {
    #[serde(rename = "Jatibening Bekasi", deserialize_with = "lenient::record")]
    pub jatibening: BranchMetrics,
    #[serde(rename = "Summarecon Bekasi", deserialize_with = "lenient::record")]
    pub summarecon: BranchMetrics,
    #[serde(rename = "Cikarang Bekasi", deserialize_with = "lenient::record")]
    pub cikarang: BranchMetrics,
}

impl Branches {
    pub fn uniform(metrics: BranchMetrics) -> Self {
        Self {
            jatibening: metrics.clone(),
            summarecon: metrics.clone(),
            cikarang: metrics,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Branch, &BranchMetrics)> {
        Branch::ALL.into_iter().map(move |b| (b, &self[b]))
    }
}

impl Index<Branch> for Branches {
    type Output = BranchMetrics;

    fn index(&self, branch: Branch) -> &BranchMetrics {
        match branch {
            Branch::Jatibening => &self.jatibening,
            Branch::Summarecon => &self.summarecon,
            Branch::Cikarang => &self.cikarang,
        }
    }
}

impl IndexMut<Branch> for Branches {
    fn index_mut(&mut self, branch: Branch) -> &mut BranchMetrics {
        match branch {
            Branch::Jatibening => &mut self.jatibening,
            Branch::Summarecon => &mut self.summarecon,
            Branch::Cikarang => &mut self.cikarang,
        }
    }
}

// =============================================================================
// Rows
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpenseCategory {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub amount: String,
}

/// Enrolment count for one program (top regular / top private lists).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramCount {
    #[serde(deserialize_with = "lenient::text")]
    pub program: String,
    #[serde(deserialize_with = "lenient::text")]
    pub count: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramRevenue {
    #[serde(deserialize_with = "lenient::text")]
    pub program: String,
    #[serde(deserialize_with = "lenient::text")]
    pub revenue: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesStaffEntry {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub target: String,
    #[serde(deserialize_with = "lenient::text")]
    pub achieved: String,
    #[serde(deserialize_with = "lenient::text")]
    pub deals: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AfterSalesStaffEntry {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub retention_target: String,
    #[serde(deserialize_with = "lenient::text")]
    pub retention_achieved: String,
    #[serde(deserialize_with = "lenient::text")]
    pub followups: String,
    #[serde(deserialize_with = "lenient::text")]
    pub resolutions: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    #[serde(rename = "Selesai")]
    Done,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "On Hold")]
    OnHold,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] = [
        ProjectStatus::Done,
        ProjectStatus::InProgress,
        ProjectStatus::OnHold,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Done => "Selesai",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::OnHold => "On Hold",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim();
        ProjectStatus::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(wanted))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::text")]
    pub branch: String,
    #[serde(deserialize_with = "lenient::status")]
    pub status: ProjectStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanEntry {
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::text")]
    pub branch: String,
    #[serde(deserialize_with = "lenient::text")]
    pub timeline: String,
}

// =============================================================================
// Branch metrics
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchMetrics {
    #[serde(deserialize_with = "lenient::text")]
    pub revenue: String,
    #[serde(deserialize_with = "lenient::text")]
    pub target_revenue: String,
    #[serde(deserialize_with = "lenient::text")]
    pub prev_revenue: String,
    #[serde(deserialize_with = "lenient::text")]
    pub profit: String,
    #[serde(deserialize_with = "lenient::text")]
    pub target_profit: String,
    #[serde(deserialize_with = "lenient::text")]
    pub prev_profit: String,
    #[serde(deserialize_with = "lenient::text")]
    pub expenses: String,
    #[serde(deserialize_with = "lenient::text")]
    pub prev_expenses: String,
    #[serde(deserialize_with = "lenient::rows")]
    pub expense_categories: Vec<ExpenseCategory>,
    #[serde(deserialize_with = "lenient::text")]
    pub regular_count: String,
    #[serde(deserialize_with = "lenient::text")]
    pub private_count: String,
    #[serde(deserialize_with = "lenient::text")]
    pub new_register: String,
    #[serde(deserialize_with = "lenient::text")]
    pub extension: String,
    #[serde(deserialize_with = "lenient::text")]
    pub regular_new: String,
    #[serde(deserialize_with = "lenient::text")]
    pub regular_ext: String,
    #[serde(deserialize_with = "lenient::text")]
    pub private_new: String,
    #[serde(deserialize_with = "lenient::text")]
    pub private_ext: String,
    #[serde(deserialize_with = "lenient::rows")]
    pub top_regular: Vec<ProgramCount>,
    #[serde(deserialize_with = "lenient::rows")]
    pub top_private: Vec<ProgramCount>,
    #[serde(deserialize_with = "lenient::rows")]
    pub revenue_by_program: Vec<ProgramRevenue>,
}

impl BranchMetrics {
    /// Entry-form state: empty figures and one template row per list.
    pub fn template() -> Self {
        Self {
            expense_categories: vec![ExpenseCategory::default()],
            top_regular: vec![ProgramCount {
                program: REGULAR_PROGRAMS[0].to_string(),
                count: String::new(),
            }],
            top_private: vec![ProgramCount {
                program: PRIVATE_PROGRAMS[0].to_string(),
                count: String::new(),
            }],
            revenue_by_program: vec![ProgramRevenue::default()],
            ..Default::default()
        }
    }
}

// =============================================================================
// Report
// =============================================================================

/// The whole monthly report. `Default` is the empty value used when an
/// imported document lacks members; `Report::fresh` is the session start state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Report {
    #[serde(deserialize_with = "lenient::text")]
    pub month: String,
    #[serde(deserialize_with = "lenient::text")]
    pub year: String,
    #[serde(deserialize_with = "lenient::record")]
    pub branches: Branches,
    #[serde(deserialize_with = "lenient::rows")]
    pub sales_staff: Vec<SalesStaffEntry>,
    #[serde(deserialize_with = "lenient::rows")]
    pub aftersales_staff: Vec<AfterSalesStaffEntry>,
    #[serde(deserialize_with = "lenient::text")]
    pub summary: String,
    #[serde(deserialize_with = "lenient::rows")]
    pub done_projects: Vec<ProjectEntry>,
    #[serde(deserialize_with = "lenient::rows")]
    pub future_plans: Vec<PlanEntry>,
}

impl Report {
    /// Fresh report for the current local month.
    pub fn fresh() -> Self {
        let today = chrono::Local::now();
        Self::for_period(MONTHS[today.month0() as usize], &today.year().to_string())
    }

    pub fn for_period(month: &str, year: &str) -> Self {
        let first_branch = Branch::ALL[0].name().to_string();
        Self {
            month: month.to_string(),
            year: year.to_string(),
            branches: Branches::uniform(BranchMetrics::template()),
            sales_staff: vec![SalesStaffEntry::default()],
            aftersales_staff: vec![AfterSalesStaffEntry::default()],
            summary: String::new(),
            done_projects: vec![ProjectEntry {
                branch: first_branch.clone(),
                ..Default::default()
            }],
            future_plans: vec![PlanEntry {
                branch: first_branch,
                ..Default::default()
            }],
        }
    }

    /// Total conversion from any JSON value. Non-object documents yield the
    /// empty report.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    pub fn branch(&self, branch: Branch) -> &BranchMetrics {
        &self.branches[branch]
    }

    pub fn period_label(&self) -> String {
        format!("{} {}", self.month, self.year)
    }
}

mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::ProjectStatus;

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => String::new(),
        })
    }

    pub fn rows<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or_default())
                .collect(),
            _ => Vec::new(),
        })
    }

    pub fn record<'de, D, T>(d: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(serde_json::from_value(Value::deserialize(d)?).unwrap_or_default())
    }

    pub fn status<'de, D: Deserializer<'de>>(d: D) -> Result<ProjectStatus, D::Error> {
        let label = text(d)?;
        Ok(ProjectStatus::from_label(&label).unwrap_or_default())
    }
}
