//! Deck projection and text rendering over a filled-in report.

use branchdeck::edit::{self, BranchField, BranchList, FieldPath, ReportList, TopField};
use branchdeck::model::{Branch, Report};
use branchdeck::render::TextRenderer;
use branchdeck::slides::{Block, SlideRegistry};

fn filled_report() -> Report {
    let jati = |f| FieldPath::Branch(Branch::Jatibening, f);
    let cik = |f| FieldPath::Branch(Branch::Cikarang, f);

    let r = Report::for_period("April", "2025");
    let r = edit::set_scalar(&r, jati(BranchField::Revenue), "150000000").unwrap();
    let r = edit::set_scalar(&r, jati(BranchField::TargetRevenue), "120000000").unwrap();
    let r = edit::set_scalar(&r, cik(BranchField::RegularNew), "12").unwrap();
    let r = edit::set_scalar(&r, cik(BranchField::RegularExt), "8.7").unwrap();
    let r = edit::set_branch_row(&r, Branch::Cikarang, BranchList::TopRegular, 0, "count", "9")
        .unwrap();
    let r = edit::set_row(&r, ReportList::FuturePlans, 0, "title", "Open House Mei").unwrap();
    edit::set_scalar(&r, FieldPath::Top(TopField::Summary), "Bulan yang solid.").unwrap()
}

#[test]
fn deck_has_seventeen_numbered_slides() {
    let registry = SlideRegistry::build("Golden English Bekasi");
    let slides = registry.render_all(&filled_report());
    assert_eq!(slides.len(), 17);
    for (i, slide) in slides.iter().enumerate() {
        assert_eq!(slide.number, i + 1);
        assert_eq!(slide.total, 17);
    }
    assert_eq!(slides[0].title, "Golden English Bekasi");
    assert_eq!(slides[0].subtitle.as_deref(), Some("April 2025"));
    assert_eq!(slides[16].id, "plans");
}

#[test]
fn transactions_slide_truncates_counts() {
    let registry = SlideRegistry::build("Golden English Bekasi");
    let slide = registry.render(&filled_report(), 12).unwrap();
    assert_eq!(slide.id, "trx-cikarang");
    let cards = slide
        .blocks
        .iter()
        .find_map(|b| match b {
            Block::Stats(cards) => Some(cards),
            _ => None,
        })
        .unwrap();
    assert_eq!(cards[2].label, "Register Baru");
    assert_eq!(cards[2].value, "12");
    assert_eq!(cards[3].value, "8");
}

#[test]
fn every_slide_renders_framed() {
    let report = filled_report();
    let registry = SlideRegistry::build("Golden English Bekasi");
    let renderer = TextRenderer::new(60);
    for slide in registry.render_all(&report) {
        let text = renderer.render(&slide);
        assert_eq!(text.lines().next(), Some("=".repeat(60).as_str()));
        let footer = text.lines().last().unwrap();
        assert_eq!(footer.trim(), format!("{} / 17", slide.number), "slide {}", slide.id);
    }
}

#[test]
fn summary_and_plans_render_entered_text() {
    let report = filled_report();
    let registry = SlideRegistry::build("Golden English Bekasi");
    let renderer = TextRenderer::new(72);
    let summary = renderer.render(&registry.render(&report, 15).unwrap());
    assert!(summary.contains("Bulan yang solid."));
    assert!(summary.contains("Rp 150.000.000"));
    let plans = renderer.render(&registry.render(&report, 16).unwrap());
    assert!(plans.contains("Open House Mei"));
}

#[test]
fn index_marks_current_slide() {
    let registry = SlideRegistry::build("Golden English Bekasi");
    let text = TextRenderer::new(72).index(&registry, 2);
    let marked: Vec<&str> = text.lines().filter(|l| l.starts_with('>')).collect();
    assert_eq!(marked.len(), 1);
    assert!(marked[0].contains("Profit Jatibening"));
}
