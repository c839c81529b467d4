//! Plain-text slide renderer.

use std::fmt::Write;

use crate::slides::{Block, RenderedSlide, SlideRegistry, StaffCard};

const LABEL_WIDTH: usize = 18;

#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    width: usize,
}

fn text_width(s: &str) -> usize {
    s.chars().count()
}

fn pad_right(s: &str, width: usize) -> String {
    let mut out = s.to_string();
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(text_width(s))));
    out
}

fn pad_left(s: &str, width: usize) -> String {
    let mut out: String = std::iter::repeat(' ')
        .take(width.saturating_sub(text_width(s)))
        .collect();
    out.push_str(s);
    out
}

fn meter(fill: f64, cells: usize) -> String {
    let filled = ((fill.clamp(0.0, 1.0) * cells as f64).round() as usize).min(cells);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(cells - filled))
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if !line.is_empty() && text_width(&line) + 1 + text_width(word) > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}

impl TextRenderer {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    fn bar_cells(&self) -> usize {
        (self.width / 3).max(10)
    }

    pub fn render(&self, slide: &RenderedSlide) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", "=".repeat(self.width));

        let badges = slide
            .badges
            .iter()
            .map(|b| format!("[{}]", b.text))
            .collect::<Vec<_>>()
            .join(" ");
        let title = format!(" {}", slide.title);
        if badges.is_empty() {
            let _ = writeln!(out, "{}", title);
        } else {
            let gap = self
                .width
                .saturating_sub(text_width(&title) + text_width(&badges))
                .max(2);
            let _ = writeln!(out, "{}{}{}", title, " ".repeat(gap), badges);
        }
        if let Some(sub) = &slide.subtitle {
            let _ = writeln!(out, " {}", sub);
        }
        let _ = writeln!(out, "{}", "-".repeat(self.width));

        for block in &slide.blocks {
            self.block(&mut out, block);
            out.push('\n');
        }

        let footer = format!("{} / {}", slide.number, slide.total);
        let _ = writeln!(out, "{}", pad_left(&footer, self.width));
        out
    }

    fn caption(&self, out: &mut String, caption: &str) {
        let _ = writeln!(out, " {}", caption);
    }

    fn block(&self, out: &mut String, block: &Block) {
        match block {
            Block::Badges(badges) => {
                let line: Vec<String> = badges.iter().map(|b| format!("[{}]", b.text)).collect();
                let _ = writeln!(out, "  {}", line.join(" "));
            }

            Block::Stats(cards) => {
                for card in cards {
                    let label = pad_right(&card.label, LABEL_WIDTH);
                    let mut line = format!("  {} {}", label, card.value);
                    if let Some(sub) = &card.sub {
                        let _ = write!(line, "  ({})", sub);
                    }
                    let _ = writeln!(out, "{}", line);
                }
            }

            Block::Bars { caption, bars, .. } => {
                self.caption(out, caption);
                let max = bars.iter().map(|b| b.value).fold(1.0_f64, f64::max);
                let label_w = bars
                    .iter()
                    .map(|b| text_width(&b.label))
                    .max()
                    .unwrap_or(0)
                    .min(LABEL_WIDTH + 6);
                let cells = self.bar_cells();
                for bar in bars {
                    let filled = ((bar.value.max(0.0) / max) * cells as f64).round() as usize;
                    let _ = writeln!(
                        out,
                        "  {} {}{} {}",
                        pad_right(&bar.label, label_w),
                        "█".repeat(filled.min(cells)),
                        " ".repeat(cells - filled.min(cells)),
                        bar.display
                    );
                }
            }

            Block::Progress {
                caption, percent, ..
            } => {
                self.caption(out, caption);
                let _ = writeln!(out, "  {}% {}", percent, meter(percent.fill(), self.bar_cells()));
            }

            Block::Table {
                caption,
                headers,
                rows,
            } => {
                if let Some(caption) = caption {
                    self.caption(out, caption);
                }
                self.table(out, headers, rows);
            }

            Block::Breakdown { caption, segments } => {
                self.caption(out, caption);
                let label_w = segments.iter().map(|s| text_width(&s.label)).max().unwrap_or(0);
                let value_w = segments.iter().map(|s| text_width(&s.display)).max().unwrap_or(0);
                for seg in segments {
                    let _ = writeln!(
                        out,
                        "  {} {} {:>5.1}%",
                        pad_right(&seg.label, label_w),
                        pad_left(&seg.display, value_w),
                        seg.share * 100.0
                    );
                }
            }

            Block::Ranking { caption, items, .. } => {
                self.caption(out, caption);
                let label_w = items.iter().map(|i| text_width(&i.label)).max().unwrap_or(0);
                for (rank, item) in items.iter().enumerate() {
                    let _ = writeln!(
                        out,
                        "  {:>2}. {}  {}",
                        rank + 1,
                        pad_right(&item.label, label_w),
                        item.value
                    );
                }
            }

            Block::Staff(cards) => {
                for card in cards {
                    self.staff(out, card);
                }
            }

            Block::Entries {
                caption, entries, ..
            } => {
                self.caption(out, caption);
                for entry in entries {
                    let mut line = format!("  * {}", entry.title);
                    if let Some(badge) = &entry.badge {
                        let _ = write!(line, "  [{}]", badge.text);
                    }
                    let _ = writeln!(out, "{}", line);
                    if !entry.meta.is_empty() {
                        let _ = writeln!(out, "    {}", entry.meta);
                    }
                    if let Some(desc) = &entry.description {
                        for l in wrap(desc, self.width.saturating_sub(4)) {
                            let _ = writeln!(out, "    {}", l);
                        }
                    }
                }
            }

            Block::Text { caption, body } => {
                self.caption(out, caption);
                for l in wrap(body, self.width.saturating_sub(2)) {
                    let _ = writeln!(out, "  {}", l);
                }
            }

            Block::Empty { caption, message } => {
                if let Some(caption) = caption {
                    self.caption(out, caption);
                }
                let _ = writeln!(out, "  ({})", message);
            }
        }
    }

    fn staff(&self, out: &mut String, card: &StaffCard) {
        let percent = format!("{}%", card.achievement);
        let _ = writeln!(
            out,
            "  [{}] {} {} {}",
            card.initial,
            pad_right(&card.name, LABEL_WIDTH),
            pad_left(&percent, 7),
            meter(card.achievement.fill(), self.bar_cells())
        );
        let details: Vec<String> = card
            .details
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect();
        let _ = writeln!(out, "      {}", details.join(" | "));
    }

    /// First column left-aligned, the rest right-aligned.
    fn table(&self, out: &mut String, headers: &[String], rows: &[Vec<String>]) {
        let mut widths: Vec<usize> = headers.iter().map(|h| text_width(h)).collect();
        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(text_width(cell));
                }
            }
        }
        let line = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (c, w))| if i == 0 { pad_right(c, *w) } else { pad_left(c, *w) })
                .collect::<Vec<_>>()
                .join("  ")
        };
        let _ = writeln!(out, "  {}", line(headers));
        let rule: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        let _ = writeln!(out, "  {}", "-".repeat(rule));
        for row in rows {
            let _ = writeln!(out, "  {}", line(row.as_slice()));
        }
    }

    /// Thumbnail strip: one line per slide, the current one marked.
    pub fn index(&self, registry: &SlideRegistry, current: usize) -> String {
        let mut out = String::new();
        for (i, slide) in registry.slides().iter().enumerate() {
            let marker = if i == current { '>' } else { ' ' };
            let _ = writeln!(out, "{} {:>2}. {}", marker, i + 1, slide.label());
        }
        out
    }
}
