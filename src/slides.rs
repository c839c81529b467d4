//! Slide registry and projection.
//!
//! A slide is a pure function of the report plus the parameters baked in when
//! the registry is built (the branch, the organization name). Projection
//! yields a `RenderedSlide`: display-ready text and numbers grouped into
//! blocks, with no layout decisions. `render` turns it into terminal text.
//!
//! List views drop rows whose identifying field is empty, so the template
//! rows of a fresh report never show up on a slide.

use std::cmp::Reverse;

use crate::metrics::{
    amount_or_zero, count_or_zero, currency_value, format_currency, format_number, group_number,
    growth_label, growth_percent, percent_of, sum_amounts, Percent,
};
use crate::model::{Branch, BranchMetrics, ProgramCount, ProjectStatus, Report};

// =============================================================================
// Rendered slide
// =============================================================================

/// Accent of a card, badge or bar; the text renderer maps it to a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Accent,
    Green,
    Red,
    Blue,
    Purple,
    Muted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub text: String,
    pub tone: Tone,
}

impl Badge {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub label: String,
    pub value: String,
    pub sub: Option<String>,
    pub tone: Tone,
}

impl StatCard {
    fn new(label: &str, value: String, tone: Tone) -> Self {
        Self {
            label: label.to_string(),
            value,
            sub: None,
            tone,
        }
    }

    fn with_sub(mut self, sub: impl Into<String>) -> Self {
        self.sub = Some(sub.into());
        self
    }
}

/// One bar of a chart. `value` drives the bar length, `display` is printed.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub display: String,
}

impl Bar {
    fn from_text(label: &str, text: &str) -> Self {
        Self {
            label: label.to_string(),
            value: amount_or_zero(text),
            display: format_number(text),
        }
    }
}

/// Share of a breakdown; `share` is in `[0, 1]` of the positive total.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub label: String,
    pub display: String,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankItem {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaffCard {
    pub initial: String,
    pub name: String,
    pub achievement: Percent,
    pub tone: Tone,
    pub details: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub title: String,
    pub badge: Option<Badge>,
    pub meta: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Badges(Vec<Badge>),
    Stats(Vec<StatCard>),
    Bars {
        caption: String,
        tone: Tone,
        bars: Vec<Bar>,
    },
    Progress {
        caption: String,
        percent: Percent,
        tone: Tone,
    },
    Table {
        caption: Option<String>,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Breakdown {
        caption: String,
        segments: Vec<Segment>,
    },
    Ranking {
        caption: String,
        tone: Tone,
        items: Vec<RankItem>,
    },
    Staff(Vec<StaffCard>),
    Entries {
        caption: String,
        tone: Tone,
        entries: Vec<Entry>,
    },
    Text {
        caption: String,
        body: String,
    },
    Empty {
        caption: Option<String>,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSlide {
    pub id: String,
    /// 1-based position in the deck.
    pub number: usize,
    pub total: usize,
    pub title: String,
    pub subtitle: Option<String>,
    pub tone: Tone,
    pub badges: Vec<Badge>,
    pub blocks: Vec<Block>,
}

// =============================================================================
// Slide descriptors
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slide {
    Cover,
    Revenue(Branch),
    Profit(Branch),
    Expenses(Branch),
    Transactions(Branch),
    SalesStaff,
    AfterSalesStaff,
    Summary,
    Plans,
}

fn slug(branch: Branch) -> String {
    branch
        .name()
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

impl Slide {
    pub fn id(&self) -> String {
        match self {
            Slide::Cover => "cover".to_string(),
            Slide::Revenue(b) => format!("rev-{}", slug(*b)),
            Slide::Profit(b) => format!("profit-{}", slug(*b)),
            Slide::Expenses(b) => format!("exp-{}", slug(*b)),
            Slide::Transactions(b) => format!("trx-{}", slug(*b)),
            Slide::SalesStaff => "sales".to_string(),
            Slide::AfterSalesStaff => "aftersales".to_string(),
            Slide::Summary => "summary".to_string(),
            Slide::Plans => "plans".to_string(),
        }
    }

    /// Short label for the thumbnail strip.
    pub fn label(&self) -> String {
        match self {
            Slide::Cover => "Cover".to_string(),
            Slide::Revenue(b) => format!("Revenue {}", short_name(*b)),
            Slide::Profit(b) => format!("Profit {}", short_name(*b)),
            Slide::Expenses(b) => format!("Expenses {}", short_name(*b)),
            Slide::Transactions(b) => format!("Transaksi {}", short_name(*b)),
            Slide::SalesStaff => "Sales Staff".to_string(),
            Slide::AfterSalesStaff => "After Sales".to_string(),
            Slide::Summary => "Summary".to_string(),
            Slide::Plans => "Plans".to_string(),
        }
    }
}

fn short_name(branch: Branch) -> &'static str {
    branch.name().split_whitespace().next().unwrap_or_default()
}

/// The ordered deck.
#[derive(Debug, Clone)]
pub struct SlideRegistry {
    org_name: String,
    slides: Vec<Slide>,
}

impl SlideRegistry {
    pub fn build(org_name: &str) -> Self {
        let mut slides = vec![Slide::Cover];
        for branch in Branch::ALL {
            slides.push(Slide::Revenue(branch));
            slides.push(Slide::Profit(branch));
            slides.push(Slide::Expenses(branch));
            slides.push(Slide::Transactions(branch));
        }
        slides.extend([
            Slide::SalesStaff,
            Slide::AfterSalesStaff,
            Slide::Summary,
            Slide::Plans,
        ]);
        Self {
            org_name: org_name.to_string(),
            slides,
        }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Slide> {
        self.slides.get(index).copied()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn render(&self, report: &Report, index: usize) -> Option<RenderedSlide> {
        let slide = self.get(index)?;
        let (title, subtitle, tone, badges, blocks) = match slide {
            Slide::Cover => cover(report, &self.org_name),
            Slide::Revenue(b) => revenue(report.branch(b), b),
            Slide::Profit(b) => profit(report.branch(b), b),
            Slide::Expenses(b) => expenses(report.branch(b), b),
            Slide::Transactions(b) => transactions(report.branch(b), b),
            Slide::SalesStaff => sales_staff(report),
            Slide::AfterSalesStaff => aftersales_staff(report),
            Slide::Summary => summary(report),
            Slide::Plans => plans(report),
        };
        Some(RenderedSlide {
            id: slide.id(),
            number: index + 1,
            total: self.len(),
            title,
            subtitle,
            tone,
            badges,
            blocks,
        })
    }

    pub fn render_all(&self, report: &Report) -> Vec<RenderedSlide> {
        (0..self.len())
            .filter_map(|i| self.render(report, i))
            .collect()
    }
}

// =============================================================================
// Projections
// =============================================================================

type Projection = (String, Option<String>, Tone, Vec<Badge>, Vec<Block>);

fn branch_badge(branch: Branch, tone: Tone) -> Vec<Badge> {
    vec![Badge::new(branch.name(), tone)]
}

fn comparison(prev: &str, curr: &str, target: &str) -> Vec<Bar> {
    vec![
        Bar::from_text("Bulan Lalu", prev),
        Bar::from_text("Bulan Ini", curr),
        Bar::from_text("Target", target),
    ]
}

fn cover(report: &Report, org_name: &str) -> Projection {
    let branches = Branch::ALL
        .iter()
        .map(|b| Badge::new(b.name(), Tone::Muted))
        .collect();
    (
        org_name.to_string(),
        Some(report.period_label()),
        Tone::Accent,
        vec![Badge::new("Monthly Report", Tone::Accent)],
        vec![Block::Badges(branches)],
    )
}

fn revenue(m: &BranchMetrics, branch: Branch) -> Projection {
    let growth = growth_percent(&m.revenue, &m.prev_revenue);
    let ach = percent_of(&m.revenue, &m.target_revenue);
    let (ach_sub, ach_tone) = if ach.reached() {
        ("Target tercapai ✓", Tone::Green)
    } else {
        ("Below target", Tone::Red)
    };
    let stats = vec![
        StatCard::new("Revenue", format_currency(&m.revenue), Tone::Accent)
            .with_sub(growth_label(growth)),
        StatCard::new("Target", format_currency(&m.target_revenue), Tone::Muted),
        StatCard::new("Achievement", format!("{}%", ach), ach_tone).with_sub(ach_sub),
    ];
    (
        "Revenue Performance".to_string(),
        None,
        Tone::Accent,
        branch_badge(branch, Tone::Accent),
        vec![
            Block::Stats(stats),
            Block::Bars {
                caption: "Revenue vs Target".to_string(),
                tone: Tone::Accent,
                bars: comparison(&m.prev_revenue, &m.revenue, &m.target_revenue),
            },
        ],
    )
}

fn profit(m: &BranchMetrics, branch: Branch) -> Projection {
    let growth = growth_percent(&m.profit, &m.prev_profit);
    let ach = percent_of(&m.profit, &m.target_profit);
    let margin = percent_of(&m.profit, &m.revenue);
    let stats = vec![
        StatCard::new("Profit", format_currency(&m.profit), Tone::Green)
            .with_sub(growth_label(growth)),
        StatCard::new("Target", format_currency(&m.target_profit), Tone::Muted),
        StatCard::new("Profit Margin", format!("{}%", margin), Tone::Green),
    ];
    (
        "Profit Performance".to_string(),
        None,
        Tone::Green,
        branch_badge(branch, Tone::Green),
        vec![
            Block::Stats(stats),
            Block::Progress {
                caption: "Achievement".to_string(),
                percent: ach,
                tone: if ach.reached() { Tone::Green } else { Tone::Accent },
            },
            Block::Bars {
                caption: "Profit Comparison".to_string(),
                tone: Tone::Green,
                bars: comparison(&m.prev_profit, &m.profit, &m.target_profit),
            },
        ],
    )
}

fn expenses(m: &BranchMetrics, branch: Branch) -> Projection {
    let growth = growth_percent(&m.expenses, &m.prev_expenses);
    let stats = vec![
        StatCard::new("Total Expenses", format_currency(&m.expenses), Tone::Red)
            .with_sub(growth_label(growth)),
        StatCard::new("Bulan Lalu", format_currency(&m.prev_expenses), Tone::Muted),
        StatCard::new(
            "Expense Ratio",
            format!("{}%", percent_of(&m.expenses, &m.revenue)),
            Tone::Accent,
        )
        .with_sub("dari revenue"),
    ];
    let mut blocks = vec![Block::Stats(stats)];

    let cats: Vec<_> = m
        .expense_categories
        .iter()
        .filter(|c| !c.name.is_empty() && !c.amount.is_empty())
        .collect();
    if !cats.is_empty() {
        let pairs: Vec<(&str, &str)> = cats
            .iter()
            .map(|c| (c.name.as_str(), c.amount.as_str()))
            .collect();
        blocks.push(Block::Breakdown {
            caption: "Breakdown Kategori".to_string(),
            segments: segments(&pairs),
        });
        blocks.push(Block::Table {
            caption: Some("Detail".to_string()),
            headers: vec!["Kategori".into(), "Jumlah".into(), "%".into()],
            rows: cats
                .iter()
                .map(|c| {
                    vec![
                        c.name.clone(),
                        format_currency(&c.amount),
                        format!("{}%", percent_of(&c.amount, &m.expenses)),
                    ]
                })
                .collect(),
        });
    }

    (
        "Expenses".to_string(),
        None,
        Tone::Red,
        branch_badge(branch, Tone::Red),
        blocks,
    )
}

fn segments(pairs: &[(&str, &str)]) -> Vec<Segment> {
    let total = sum_amounts(pairs.iter().map(|(_, v)| *v));
    pairs
        .iter()
        .map(|(label, value)| Segment {
            label: label.to_string(),
            display: format_number(value),
            share: if total > 0.0 {
                (amount_or_zero(value) / total).clamp(0.0, 1.0)
            } else {
                0.0
            },
        })
        .collect()
}

/// Identified rows sorted by count, highest first; ties keep entry order.
pub fn ranked_programs(rows: &[ProgramCount]) -> Vec<&ProgramCount> {
    let mut ranked: Vec<&ProgramCount> = rows
        .iter()
        .filter(|p| !p.program.is_empty() && !p.count.is_empty())
        .collect();
    ranked.sort_by_key(|p| Reverse(count_or_zero(&p.count)));
    ranked
}

fn ranking(caption: &str, tone: Tone, rows: &[ProgramCount]) -> Option<Block> {
    let ranked = ranked_programs(rows);
    if ranked.is_empty() {
        return None;
    }
    Some(Block::Ranking {
        caption: caption.to_string(),
        tone,
        items: ranked
            .into_iter()
            .map(|p| RankItem {
                label: p.program.clone(),
                value: p.count.clone(),
            })
            .collect(),
    })
}

fn transactions(m: &BranchMetrics, branch: Branch) -> Projection {
    let total_new = count_or_zero(&m.regular_new).saturating_add(count_or_zero(&m.private_new));
    let total_ext = count_or_zero(&m.regular_ext).saturating_add(count_or_zero(&m.private_ext));
    let stats = vec![
        StatCard::new("Kelas Regular", format_number(&m.regular_count), Tone::Blue),
        StatCard::new("Kelas Private", format_number(&m.private_count), Tone::Purple),
        StatCard::new("Register Baru", group_number(total_new as f64), Tone::Green),
        StatCard::new("Perpanjangan", group_number(total_ext as f64), Tone::Accent),
    ];
    let mut blocks = vec![
        Block::Stats(stats),
        Block::Breakdown {
            caption: "New vs Extension".to_string(),
            segments: segments(&[
                ("Baru (Reg)", m.regular_new.as_str()),
                ("Ext (Reg)", m.regular_ext.as_str()),
                ("Baru (Prv)", m.private_new.as_str()),
                ("Ext (Prv)", m.private_ext.as_str()),
            ]),
        },
    ];
    blocks.extend(ranking("Top Regular Programs", Tone::Blue, &m.top_regular));
    blocks.extend(ranking("Top Private Programs", Tone::Purple, &m.top_private));

    let by_program: Vec<Bar> = m
        .revenue_by_program
        .iter()
        .filter(|p| !p.program.is_empty() && !p.revenue.is_empty())
        .map(|p| Bar::from_text(&p.program, &p.revenue))
        .collect();
    if !by_program.is_empty() {
        blocks.push(Block::Bars {
            caption: "Revenue by Program".to_string(),
            tone: Tone::Accent,
            bars: by_program,
        });
    }

    (
        "Transaction Analysis".to_string(),
        None,
        Tone::Blue,
        branch_badge(branch, Tone::Blue),
        blocks,
    )
}

fn initial(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

fn staff_block(cards: Vec<StaffCard>, empty: &str) -> Block {
    if cards.is_empty() {
        Block::Empty {
            caption: None,
            message: empty.to_string(),
        }
    } else {
        Block::Staff(cards)
    }
}

fn sales_staff(report: &Report) -> Projection {
    let cards = report
        .sales_staff
        .iter()
        .filter(|s| !s.name.is_empty())
        .map(|s| {
            let ach = percent_of(&s.achieved, &s.target);
            StaffCard {
                initial: initial(&s.name),
                name: s.name.clone(),
                achievement: ach,
                tone: if ach.reached() { Tone::Green } else { Tone::Accent },
                details: vec![
                    ("Target".to_string(), format_currency(&s.target)),
                    ("Achieved".to_string(), format_currency(&s.achieved)),
                    ("Deals".to_string(), s.deals.clone()),
                ],
            }
        })
        .collect();
    (
        "Sales Staff Achievement".to_string(),
        None,
        Tone::Accent,
        Vec::new(),
        vec![staff_block(cards, "No sales staff data entered")],
    )
}

fn aftersales_staff(report: &Report) -> Projection {
    let cards = report
        .aftersales_staff
        .iter()
        .filter(|s| !s.name.is_empty())
        .map(|s| {
            let ach = percent_of(&s.retention_achieved, &s.retention_target);
            StaffCard {
                initial: initial(&s.name),
                name: s.name.clone(),
                achievement: ach,
                tone: if ach.reached() { Tone::Green } else { Tone::Purple },
                details: vec![
                    ("Target".to_string(), format_number(&s.retention_target)),
                    ("Achieved".to_string(), format_number(&s.retention_achieved)),
                    ("Follow Ups".to_string(), s.followups.clone()),
                    ("Resolved".to_string(), s.resolutions.clone()),
                ],
            }
        })
        .collect();
    (
        "After Sales Staff Achievement".to_string(),
        None,
        Tone::Purple,
        Vec::new(),
        vec![staff_block(cards, "No after sales staff data entered")],
    )
}

/// Revenue, profit and expenses summed over all branches.
pub fn totals(report: &Report) -> (f64, f64, f64) {
    let b = &report.branches;
    (
        sum_amounts(b.iter().map(|(_, m)| m.revenue.as_str())),
        sum_amounts(b.iter().map(|(_, m)| m.profit.as_str())),
        sum_amounts(b.iter().map(|(_, m)| m.expenses.as_str())),
    )
}

fn summary(report: &Report) -> Projection {
    let (revenue, profit, expenses) = totals(report);
    let mut blocks = vec![
        Block::Stats(vec![
            StatCard::new("Total Revenue", currency_value(revenue), Tone::Accent),
            StatCard::new("Total Profit", currency_value(profit), Tone::Green),
            StatCard::new("Total Expenses", currency_value(expenses), Tone::Red),
        ]),
        Block::Table {
            caption: None,
            headers: ["Cabang", "Revenue", "Profit", "Expenses", "Margin"]
                .map(String::from)
                .to_vec(),
            rows: report
                .branches
                .iter()
                .map(|(b, m)| {
                    vec![
                        b.name().to_string(),
                        format_currency(&m.revenue),
                        format_currency(&m.profit),
                        format_currency(&m.expenses),
                        format!("{}%", percent_of(&m.profit, &m.revenue)),
                    ]
                })
                .collect(),
        },
    ];
    if !report.summary.is_empty() {
        blocks.push(Block::Text {
            caption: "Executive Summary".to_string(),
            body: report.summary.clone(),
        });
    }
    (
        format!("Ringkasan Report — {}", report.period_label()),
        None,
        Tone::Accent,
        Vec::new(),
        blocks,
    )
}

fn status_tone(status: ProjectStatus) -> Tone {
    match status {
        ProjectStatus::Done => Tone::Green,
        ProjectStatus::InProgress => Tone::Accent,
        ProjectStatus::OnHold => Tone::Muted,
    }
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

fn entries_block(caption: &str, tone: Tone, entries: Vec<Entry>, empty: &str) -> Block {
    if entries.is_empty() {
        Block::Empty {
            caption: Some(caption.to_string()),
            message: empty.to_string(),
        }
    } else {
        Block::Entries {
            caption: caption.to_string(),
            tone,
            entries,
        }
    }
}

fn plans(report: &Report) -> Projection {
    let done = report
        .done_projects
        .iter()
        .filter(|p| !p.title.is_empty())
        .map(|p| Entry {
            title: p.title.clone(),
            badge: Some(Badge::new(p.status.label(), status_tone(p.status))),
            meta: p.branch.clone(),
            description: non_empty(&p.description),
        })
        .collect();
    let future = report
        .future_plans
        .iter()
        .filter(|p| !p.title.is_empty())
        .map(|p| Entry {
            title: p.title.clone(),
            badge: non_empty(&p.timeline).map(|t| Badge::new(t, Tone::Blue)),
            meta: p.branch.clone(),
            description: non_empty(&p.description),
        })
        .collect();
    (
        "Projects & Plans".to_string(),
        None,
        Tone::Green,
        Vec::new(),
        vec![
            entries_block("What We Have Done", Tone::Green, done, "Tidak ada project"),
            entries_block("Future Plans", Tone::Blue, future, "Belum ada rencana"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExpenseCategory, PlanEntry, SalesStaffEntry};

    fn registry() -> SlideRegistry {
        SlideRegistry::build("Golden English Bekasi")
    }

    fn expense(name: &str, amount: &str) -> ExpenseCategory {
        ExpenseCategory {
            name: name.into(),
            amount: amount.into(),
        }
    }

    fn program(name: &str, count: &str) -> ProgramCount {
        ProgramCount {
            program: name.into(),
            count: count.into(),
        }
    }

    fn stats(slide: &RenderedSlide) -> &[StatCard] {
        slide
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Stats(cards) => Some(cards.as_slice()),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn deck_order() {
        let ids: Vec<String> = registry().slides().iter().map(|s| s.id()).collect();
        assert_eq!(ids.len(), 17);
        assert_eq!(ids[0], "cover");
        assert_eq!(
            &ids[1..5],
            &["rev-jatibening", "profit-jatibening", "exp-jatibening", "trx-jatibening"]
        );
        assert_eq!(ids[5], "rev-summarecon");
        assert_eq!(ids[9], "rev-cikarang");
        assert_eq!(&ids[13..], &["sales", "aftersales", "summary", "plans"]);
    }

    #[test]
    fn slides_carry_number_and_total() {
        let report = Report::for_period("Maret", "2025");
        let deck = registry().render_all(&report);
        assert_eq!(deck.len(), 17);
        for (i, slide) in deck.iter().enumerate() {
            assert_eq!(slide.number, i + 1);
            assert_eq!(slide.total, 17);
        }
        assert!(registry().render(&report, 17).is_none());
    }

    #[test]
    fn cover_shows_org_and_period() {
        let slide = registry().render(&Report::for_period("Juli", "2024"), 0).unwrap();
        assert_eq!(slide.title, "Golden English Bekasi");
        assert_eq!(slide.subtitle.as_deref(), Some("Juli 2024"));
        assert_eq!(slide.badges[0].text, "Monthly Report");
    }

    #[test]
    fn revenue_scenario() {
        let mut report = Report::for_period("Januari", "2025");
        let m = &mut report.branches[Branch::Jatibening];
        m.revenue = "150000000".into();
        m.target_revenue = "120000000".into();
        m.prev_revenue = "100000000".into();

        let slide = registry().render(&report, 1).unwrap();
        assert_eq!(slide.badges[0].text, "Jatibening Bekasi");
        let cards = stats(&slide);
        assert_eq!(cards[0].value, "Rp 150.000.000");
        assert_eq!(cards[0].sub.as_deref(), Some("+50.0% vs bulan lalu"));
        assert_eq!(cards[2].value, "125.0%");
        assert_eq!(cards[2].sub.as_deref(), Some("Target tercapai ✓"));
        assert_eq!(cards[2].tone, Tone::Green);
    }

    #[test]
    fn empty_branch_renders_zeroes() {
        let slide = registry().render(&Report::default(), 2).unwrap();
        let cards = stats(&slide);
        assert_eq!(cards[0].value, "Rp 0");
        assert_eq!(cards[0].sub.as_deref(), Some("+0% vs bulan lalu"));
        assert_eq!(cards[2].value, "0%");
    }

    #[test]
    fn expense_table_keeps_only_complete_rows() {
        let mut report = Report::for_period("Januari", "2025");
        let m = &mut report.branches[Branch::Summarecon];
        m.expenses = "10000000".into();
        m.expense_categories = vec![
            expense("Sewa", "4000000"),
            expense("Gaji", ""),
            expense("", "100"),
            expense("Listrik", "1000000"),
        ];
        let slide = registry().render(&report, 7).unwrap();
        assert_eq!(slide.id, "exp-summarecon");
        let rows = slide
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Table { rows, .. } => Some(rows.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["Sewa", "Rp 4.000.000", "40.0%"]);
        assert_eq!(rows[1][2], "10.0%");
    }

    #[test]
    fn fresh_expenses_slide_has_no_breakdown() {
        let slide = registry().render(&Report::for_period("Mei", "2025"), 3).unwrap();
        assert_eq!(slide.blocks.len(), 1);
    }

    #[test]
    fn top_programs_sorted_by_count() {
        let rows = vec![
            program("General English", "12"),
            program("TOEFL Preparation", ""),
            program("Kids English", "30"),
            program("Teens English", "abc"),
            program("Business English", "12.9"),
        ];
        let ranked: Vec<&str> = ranked_programs(&rows)
            .iter()
            .map(|p| p.program.as_str())
            .collect();
        assert_eq!(
            ranked,
            vec!["Kids English", "General English", "Business English", "Teens English"]
        );
    }

    #[test]
    fn transactions_totals_truncate_counts() {
        let mut report = Report::for_period("Januari", "2025");
        let m = &mut report.branches[Branch::Cikarang];
        m.regular_new = "10.7".into();
        m.private_new = "5".into();
        m.regular_ext = "x".into();
        m.private_ext = "1200".into();
        let slide = registry().render(&report, 12).unwrap();
        assert_eq!(slide.id, "trx-cikarang");
        let cards = stats(&slide);
        assert_eq!(cards[2].value, "15");
        assert_eq!(cards[3].value, "1.200");
    }

    #[test]
    fn transactions_totals_saturate() {
        let mut report = Report::for_period("Januari", "2025");
        let m = &mut report.branches[Branch::Jatibening];
        m.regular_new = "9223372036854775807".into();
        m.private_new = "1".into();
        m.regular_ext = "-9223372036854775808".into();
        m.private_ext = "-5".into();
        let slide = registry().render(&report, 4).unwrap();
        assert_eq!(slide.id, "trx-jatibening");
        let cards = stats(&slide);
        assert_eq!(cards[2].value, "9.223.372.036.854.775.808");
        assert_eq!(cards[3].value, "-9.223.372.036.854.775.808");
    }

    #[test]
    fn oversized_counts_rank_first() {
        let rows = vec![
            program("General English", "40"),
            program("Kids English", "123456789012345678901234"),
        ];
        let ranked = ranked_programs(&rows);
        assert_eq!(ranked[0].program, "Kids English");
        assert_eq!(ranked[1].program, "General English");
    }

    #[test]
    fn staff_views_drop_unnamed_rows() {
        let mut report = Report::for_period("Januari", "2025");
        report.sales_staff = vec![
            SalesStaffEntry {
                name: "dewi".into(),
                target: "100".into(),
                achieved: "120".into(),
                deals: "4".into(),
            },
            SalesStaffEntry::default(),
            SalesStaffEntry {
                name: "Budi".into(),
                ..Default::default()
            },
            SalesStaffEntry::default(),
        ];
        let slide = registry().render(&report, 13).unwrap();
        match &slide.blocks[0] {
            Block::Staff(cards) => {
                assert_eq!(cards.len(), 2);
                assert_eq!(cards[0].initial, "D");
                assert_eq!(cards[0].achievement.to_string(), "120.0");
                assert_eq!(cards[0].tone, Tone::Green);
                assert_eq!(cards[1].achievement.to_string(), "0");
            }
            other => panic!("unexpected block {:?}", other),
        }

        let empty = registry().render(&report, 14).unwrap();
        assert_eq!(
            empty.blocks[0],
            Block::Empty {
                caption: None,
                message: "No after sales staff data entered".to_string()
            }
        );
    }

    #[test]
    fn summary_sums_branches() {
        let mut report = Report::for_period("April", "2025");
        report.branches[Branch::Jatibening].revenue = "100".into();
        report.branches[Branch::Summarecon].revenue = "250.5".into();
        report.branches[Branch::Cikarang].revenue = "n/a".into();
        report.summary = "Bulan yang baik".into();
        let slide = registry().render(&report, 15).unwrap();
        assert_eq!(slide.title, "Ringkasan Report — April 2025");
        assert_eq!(stats(&slide)[0].value, "Rp 351");
        assert!(matches!(slide.blocks.last(), Some(Block::Text { .. })));
        assert_eq!(totals(&report).0, 350.5);
    }

    #[test]
    fn plans_empty_states() {
        let mut report = Report::for_period("April", "2025");
        let slide = registry().render(&report, 16).unwrap();
        assert_eq!(
            slide.blocks[0],
            Block::Empty {
                caption: Some("What We Have Done".to_string()),
                message: "Tidak ada project".to_string()
            }
        );
        assert_eq!(
            slide.blocks[1],
            Block::Empty {
                caption: Some("Future Plans".to_string()),
                message: "Belum ada rencana".to_string()
            }
        );

        report.future_plans = vec![
            PlanEntry {
                title: "Kelas online".into(),
                timeline: "Q3".into(),
                ..Default::default()
            },
            PlanEntry {
                title: "Promo".into(),
                ..Default::default()
            },
        ];
        let slide = registry().render(&report, 16).unwrap();
        match &slide.blocks[1] {
            Block::Entries { entries, .. } => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0].badge.as_ref().map(|b| b.text.as_str()), Some("Q3"));
                assert!(entries[1].badge.is_none());
            }
            other => panic!("unexpected block {:?}", other),
        }
    }
}
