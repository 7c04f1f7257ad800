//! Page model for the paginated report
//!
//! Sections are placed on fixed-size pages with explicit line wrapping; the
//! PDF painter only turns the finished model into drawing calls.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::{
    REPORT_HEADER_GAP_MM, REPORT_LINE_HEIGHT_MM, REPORT_PARAGRAPH_GAP_MM, REPORT_SECTION_GAP_MM,
    REPORT_WRAP_WIDTH,
};
use crate::exports::text::{ParagraphRow, paragraph_rows, sanitize, wrap_text};
use crate::models::ClientProfile;

pub const REPORT_TITLE: &str = "Cybersecurity Threat & Advisory Report";
pub const BANNER_TEXT: &str = "MDR & Offensive Security Scenario Generator";

pub const SECTION_SUMMARY: &str = "Engagement Summary";
pub const SECTION_ADVISORY: &str = "Applied Threat Intelligence";
pub const SECTION_NARRATIVE: &str = "Targeted Threat Narrative";
pub const SECTION_RECOMMENDATIONS: &str = "Recommended Advisory & Testing Services";

pub(crate) const FONT_SIZE_TITLE: f32 = 20.0;
pub(crate) const FONT_SIZE_HEADING: f32 = 13.0;
pub(crate) const FONT_SIZE_BODY: f32 = 10.0;
pub(crate) const FONT_SIZE_CHROME: f32 = 8.0;

pub(crate) const PAGE_WIDTH_MM: f32 = 210.0;
pub(crate) const PAGE_HEIGHT_MM: f32 = 297.0;
pub(crate) const PAGE_MARGIN_X_MM: f32 = 20.0;
const PAGE_START_Y_MM: f32 = 270.0;
const PAGE_BOTTOM_Y_MM: f32 = 20.0;
const BANNER_Y_MM: f32 = 284.0;
const BANNER_RULE_Y_MM: f32 = 281.0;
const FOOTER_Y_MM: f32 = 10.0;
const SUMMARY_VALUE_X_MM: f32 = 72.0;
const SUMMARY_ROW_HEIGHT_MM: f32 = 6.0;
const BULLET_INDENT_MM: f32 = 4.0;
const BULLET_MARKER: &str = "- ";

/// Visual variant of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStyle {
    /// Plain headers, no decoration.
    Classic,
    /// Rules under headers and banner, shaded summary band.
    Branded,
}

impl ReportStyle {
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "classic" | "plain" => Some(Self::Classic),
            "branded" => Some(Self::Branded),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOptions {
    pub style: ReportStyle,
    pub wrap_width: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            style: ReportStyle::Branded,
            wrap_width: REPORT_WRAP_WIDTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    Title,
    Header,
    Body,
    Label,
    Narrative,
    Bullet,
    Banner,
    Footer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x_mm: f32,
    pub y_mm: f32,
    pub size_pt: f32,
    pub bold: bool,
    pub role: LineRole,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text(TextLine),
    /// Horizontal rule across the printable width.
    Rule { y_mm: f32 },
    /// Shaded background band across the printable width.
    Band { top_mm: f32, bottom_mm: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub pages: Vec<Vec<DrawOp>>,
}

impl ReportLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All text lines of one role, in emission order, with their page index.
    pub fn lines_with_role(&self, role: LineRole) -> Vec<(usize, &TextLine)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(page_idx, ops)| {
                ops.iter().filter_map(move |op| match op {
                    DrawOp::Text(line) if line.role == role => Some((page_idx, line)),
                    _ => None,
                })
            })
            .collect()
    }
}

struct LayoutBuilder {
    pages: Vec<Vec<DrawOp>>,
    y_pos: f32,
    style: ReportStyle,
}

impl LayoutBuilder {
    fn new(style: ReportStyle) -> Self {
        Self {
            pages: vec![Vec::new()],
            y_pos: PAGE_START_Y_MM,
            style,
        }
    }

    fn current_page_mut(&mut self) -> &mut Vec<DrawOp> {
        let idx = self.pages.len().saturating_sub(1);
        &mut self.pages[idx]
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.y_pos = PAGE_START_Y_MM;
    }

    /// Start a new page unless `needed` mm still fit above the bottom margin.
    fn ensure_space(&mut self, needed: f32) {
        if self.y_pos - needed < PAGE_BOTTOM_Y_MM {
            self.new_page();
        }
    }

    fn place_text(&mut self, text: String, x_mm: f32, size_pt: f32, bold: bool, role: LineRole) {
        let y_mm = self.y_pos;
        self.current_page_mut().push(DrawOp::Text(TextLine {
            text,
            x_mm,
            y_mm,
            size_pt,
            bold,
            role,
        }));
    }

    /// Emit one row and advance the cursor, paging first if the row would
    /// fall below the printable area.
    fn add_row(
        &mut self,
        text: String,
        x_mm: f32,
        size_pt: f32,
        bold: bool,
        role: LineRole,
        y_step_mm: f32,
    ) {
        if self.y_pos < PAGE_BOTTOM_Y_MM {
            self.new_page();
        }
        self.place_text(text, x_mm, size_pt, bold, role);
        self.y_pos -= y_step_mm;
    }

    fn gap(&mut self, mm: f32) {
        self.y_pos -= mm;
    }

    fn section_header(&mut self, title: &str) {
        // Keep the header together with at least two body rows.
        self.ensure_space(REPORT_HEADER_GAP_MM + 2.0 * REPORT_LINE_HEIGHT_MM);
        self.place_text(
            title.to_string(),
            PAGE_MARGIN_X_MM,
            FONT_SIZE_HEADING,
            true,
            LineRole::Header,
        );
        if self.style == ReportStyle::Branded {
            let y_mm = self.y_pos - 2.5;
            self.current_page_mut().push(DrawOp::Rule { y_mm });
        }
        self.y_pos -= REPORT_HEADER_GAP_MM;
    }

    fn paragraphs(&mut self, text: &str, wrap_width: usize, role: LineRole) {
        for row in paragraph_rows(text, wrap_width) {
            match row {
                ParagraphRow::Line(line) => self.add_row(
                    line,
                    PAGE_MARGIN_X_MM,
                    FONT_SIZE_BODY,
                    false,
                    role,
                    REPORT_LINE_HEIGHT_MM,
                ),
                ParagraphRow::Gap => self.gap(REPORT_PARAGRAPH_GAP_MM),
            }
        }
    }

    /// Add banner and page-number footer to every page.
    fn finish(mut self) -> ReportLayout {
        let total = self.pages.len();
        let branded = self.style == ReportStyle::Branded;
        for (idx, ops) in self.pages.iter_mut().enumerate() {
            let mut chrome = Vec::with_capacity(4);
            if branded {
                chrome.push(DrawOp::Band {
                    top_mm: PAGE_HEIGHT_MM - 6.0,
                    bottom_mm: BANNER_RULE_Y_MM,
                });
                chrome.push(DrawOp::Rule {
                    y_mm: BANNER_RULE_Y_MM,
                });
            }
            chrome.push(DrawOp::Text(TextLine {
                text: BANNER_TEXT.to_string(),
                x_mm: PAGE_MARGIN_X_MM,
                y_mm: BANNER_Y_MM,
                size_pt: FONT_SIZE_CHROME,
                bold: true,
                role: LineRole::Banner,
            }));
            chrome.append(ops);
            *ops = chrome;
            ops.push(DrawOp::Text(TextLine {
                text: format!("Page {} of {}", idx + 1, total),
                x_mm: PAGE_WIDTH_MM / 2.0 - 8.0,
                y_mm: FOOTER_Y_MM,
                size_pt: FONT_SIZE_CHROME,
                bold: false,
                role: LineRole::Footer,
            }));
        }
        ReportLayout { pages: self.pages }
    }
}

/// Shaded band behind the summary rows of one page.
struct BandSegment {
    page: usize,
    insert_at: usize,
    top_mm: f32,
}

impl BandSegment {
    fn open(b: &LayoutBuilder) -> Self {
        let page = b.pages.len() - 1;
        Self {
            page,
            insert_at: b.pages[page].len(),
            top_mm: b.y_pos + 4.5,
        }
    }

    /// Insert the band under the rows emitted since `open`.
    fn close(self, b: &mut LayoutBuilder) {
        let bottom_mm = b.y_pos + SUMMARY_ROW_HEIGHT_MM - 2.0;
        b.pages[self.page].insert(
            self.insert_at,
            DrawOp::Band {
                top_mm: self.top_mm,
                bottom_mm,
            },
        );
    }
}

fn summary_rows(profile: &ClientProfile) -> Vec<(&'static str, String)> {
    vec![
        ("Customer", profile.customer_name.clone()),
        ("Consultant", profile.consultant_name.clone()),
        ("Industry", profile.industry.to_string()),
        ("Users", profile.users.to_string()),
        ("User Security Savviness", profile.savviness.to_string()),
        ("In-House Security Team", profile.in_house_team.to_string()),
        ("Endpoints", profile.endpoints.to_string()),
        ("Servers", profile.servers.to_string()),
        ("Physical Locations", profile.physical_locations.to_string()),
        ("Public Web Applications", profile.public_web_apps_label().to_string()),
        ("Firewall", profile.firewall.to_string()),
        ("Other Security Tools", profile.other_tools.clone()),
        ("Critical Asset", profile.critical_infra.clone()),
    ]
}

/// Lay out the full report.
///
/// `advisory` of `None` omits the applied-advisory section. The narrative is
/// sanitized here; an empty narrative yields an empty section.
pub fn layout_report(
    profile: &ClientProfile,
    advisory: Option<&str>,
    narrative: &str,
    recommendations: &[String],
    options: &ReportOptions,
) -> ReportLayout {
    let wrap_width = options.wrap_width.max(1);
    let mut b = LayoutBuilder::new(options.style);

    // === TITLE BLOCK ===
    b.add_row(
        REPORT_TITLE.to_string(),
        PAGE_MARGIN_X_MM,
        FONT_SIZE_TITLE,
        true,
        LineRole::Title,
        10.0,
    );
    b.add_row(
        format!(
            "Prepared for {} by {}",
            sanitize(&profile.customer_name),
            sanitize(&profile.consultant_name)
        ),
        PAGE_MARGIN_X_MM,
        FONT_SIZE_BODY,
        false,
        LineRole::Body,
        6.0,
    );
    b.add_row(
        format!("Generated: {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC")),
        PAGE_MARGIN_X_MM,
        FONT_SIZE_BODY,
        false,
        LineRole::Body,
        6.0,
    );
    b.gap(REPORT_SECTION_GAP_MM);

    // === ENGAGEMENT SUMMARY ===
    let value_width = wrap_width.saturating_sub(30).max(20);
    let rows: Vec<(&str, Vec<String>)> = summary_rows(profile)
        .into_iter()
        .map(|(label, value)| (label, wrap_text(&sanitize(&value), value_width)))
        .collect();
    let row_count: usize = rows.iter().map(|(_, lines)| lines.len()).sum();
    let block_height = REPORT_HEADER_GAP_MM + row_count as f32 * SUMMARY_ROW_HEIGHT_MM;

    b.ensure_space(block_height);
    b.section_header(SECTION_SUMMARY);
    let branded = options.style == ReportStyle::Branded;
    let mut band = BandSegment::open(&b);

    for (label, lines) in rows {
        for (idx, line) in lines.into_iter().enumerate() {
            // Long values can spill over; the band is split per page.
            if b.y_pos < PAGE_BOTTOM_Y_MM {
                if branded {
                    band.close(&mut b);
                }
                b.new_page();
                band = BandSegment::open(&b);
            }
            if idx == 0 {
                b.place_text(
                    format!("{}:", label),
                    PAGE_MARGIN_X_MM + 2.0,
                    FONT_SIZE_BODY,
                    true,
                    LineRole::Label,
                );
            }
            b.add_row(
                line,
                SUMMARY_VALUE_X_MM,
                FONT_SIZE_BODY,
                false,
                LineRole::Body,
                SUMMARY_ROW_HEIGHT_MM,
            );
        }
    }

    if branded {
        band.close(&mut b);
    }
    b.gap(REPORT_SECTION_GAP_MM);

    // === APPLIED ADVISORY ===
    if let Some(advisory) = advisory {
        b.section_header(SECTION_ADVISORY);
        b.paragraphs(&sanitize(advisory), wrap_width, LineRole::Body);
        b.gap(REPORT_SECTION_GAP_MM);
    }

    // === NARRATIVE ===
    b.section_header(SECTION_NARRATIVE);
    b.paragraphs(&sanitize(narrative), wrap_width, LineRole::Narrative);
    b.gap(REPORT_SECTION_GAP_MM);

    // === RECOMMENDATIONS ===
    b.section_header(SECTION_RECOMMENDATIONS);
    let bullet_width = wrap_width.saturating_sub(BULLET_MARKER.len()).max(1);
    for rec in recommendations {
        for (idx, line) in wrap_text(&sanitize(rec), bullet_width)
            .into_iter()
            .enumerate()
        {
            let (text, x_mm) = if idx == 0 {
                (format!("{}{}", BULLET_MARKER, line), PAGE_MARGIN_X_MM)
            } else {
                (line, PAGE_MARGIN_X_MM + BULLET_INDENT_MM)
            };
            b.add_row(
                text,
                x_mm,
                FONT_SIZE_BODY,
                false,
                LineRole::Bullet,
                REPORT_LINE_HEIGHT_MM,
            );
        }
        b.gap(1.5);
    }

    b.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::recommend;

    fn ten_paragraphs() -> String {
        (1..=10)
            .map(|i| {
                format!(
                    "Paragraph {} describes how the intrusion unfolded across the estate, \
                     from phishing the help desk to abusing remote management tooling and \
                     finally staging data for exfiltration.",
                    i
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn y_gaps_between(lines: &[(usize, &TextLine)]) -> Vec<Option<f32>> {
        lines
            .windows(2)
            .map(|w| {
                let ((pa, a), (pb, b)) = (w[0], w[1]);
                (pa == pb).then(|| a.y_mm - b.y_mm)
            })
            .collect()
    }

    #[test]
    fn narrative_paragraphs_stay_distinct_and_wrapped() {
        let profile = ClientProfile::default();
        let recs = recommend(&profile);
        let layout = layout_report(
            &profile,
            Some("advisory"),
            &ten_paragraphs(),
            &recs,
            &ReportOptions::default(),
        );

        let lines = layout.lines_with_role(LineRole::Narrative);
        assert!(lines.iter().all(|(_, l)| l.text.chars().count() <= 95));

        let starts = lines
            .iter()
            .filter(|(_, l)| l.text.starts_with("Paragraph "))
            .count();
        assert_eq!(starts, 10);

        // Same-page steps are either a plain line or a line plus paragraph gap.
        let gaps = y_gaps_between(&lines);
        let separated = gaps
            .iter()
            .filter(|g| {
                matches!(g, Some(d) if (*d - (REPORT_LINE_HEIGHT_MM + REPORT_PARAGRAPH_GAP_MM)).abs() < 0.01)
            })
            .count();
        let page_breaks = gaps.iter().filter(|g| g.is_none()).count();
        assert!(separated + page_breaks >= 9);
        assert!(gaps.iter().flatten().all(|d| {
            (*d - REPORT_LINE_HEIGHT_MM).abs() < 0.01
                || (*d - (REPORT_LINE_HEIGHT_MM + REPORT_PARAGRAPH_GAP_MM)).abs() < 0.01
        }));
    }

    #[test]
    fn every_page_carries_banner_and_numbered_footer() {
        let profile = ClientProfile::default();
        let long_narrative = (0..120)
            .map(|i| format!("Line {} of a very long narrative body.", i))
            .collect::<Vec<_>>()
            .join("\n");
        let layout = layout_report(
            &profile,
            None,
            &long_narrative,
            &recommend(&profile),
            &ReportOptions::default(),
        );

        let total = layout.page_count();
        assert!(total >= 2);
        for (idx, ops) in layout.pages.iter().enumerate() {
            let texts: Vec<&TextLine> = ops
                .iter()
                .filter_map(|op| match op {
                    DrawOp::Text(line) => Some(line),
                    _ => None,
                })
                .collect();
            assert!(texts.iter().any(|l| l.role == LineRole::Banner && l.text == BANNER_TEXT));
            let footer = format!("Page {} of {}", idx + 1, total);
            assert!(texts.iter().any(|l| l.role == LineRole::Footer && l.text == footer));
            assert!(texts
                .iter()
                .filter(|l| !matches!(l.role, LineRole::Banner | LineRole::Footer))
                .all(|l| l.y_mm >= PAGE_BOTTOM_Y_MM && l.y_mm <= PAGE_START_Y_MM));
        }
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let profile = ClientProfile::default();
        let layout = layout_report(
            &profile,
            Some("Recent CVEs regarding SSL-VPN unauthorized execution."),
            "Narrative.",
            &recommend(&profile),
            &ReportOptions::default(),
        );
        let headers: Vec<&str> = layout
            .lines_with_role(LineRole::Header)
            .into_iter()
            .map(|(_, l)| l.text.as_str())
            .collect();
        assert_eq!(
            headers,
            vec![
                SECTION_SUMMARY,
                SECTION_ADVISORY,
                SECTION_NARRATIVE,
                SECTION_RECOMMENDATIONS
            ]
        );
    }

    #[test]
    fn advisory_section_can_be_omitted() {
        let profile = ClientProfile::default();
        let layout = layout_report(&profile, None, "n", &[], &ReportOptions::default());
        assert!(
            !layout
                .lines_with_role(LineRole::Header)
                .iter()
                .any(|(_, l)| l.text == SECTION_ADVISORY)
        );
    }

    #[test]
    fn empty_narrative_renders_an_empty_section() {
        let profile = ClientProfile::default();
        let layout = layout_report(&profile, None, "", &[], &ReportOptions::default());
        assert!(layout.lines_with_role(LineRole::Narrative).is_empty());
        assert!(
            layout
                .lines_with_role(LineRole::Header)
                .iter()
                .any(|(_, l)| l.text == SECTION_NARRATIVE)
        );
    }

    #[test]
    fn recommendations_are_bulleted_in_order() {
        let profile = ClientProfile::default();
        let recs = recommend(&profile);
        let layout = layout_report(&profile, None, "n", &recs, &ReportOptions::default());
        let bullets: Vec<String> = layout
            .lines_with_role(LineRole::Bullet)
            .into_iter()
            .filter(|(_, l)| l.text.starts_with("- "))
            .map(|(_, l)| l.text.clone())
            .collect();
        assert_eq!(bullets.len(), recs.len());
        for (bullet, rec) in bullets.iter().zip(&recs) {
            let head: String = rec.chars().take(20).collect();
            assert!(bullet.starts_with(&format!("- {}", head)));
        }
    }

    #[test]
    fn classic_style_draws_no_rules_or_bands() {
        let profile = ClientProfile::default();
        let classic = ReportOptions {
            style: ReportStyle::Classic,
            ..ReportOptions::default()
        };
        let layout = layout_report(&profile, Some("a"), "n", &[], &classic);
        assert!(
            layout
                .pages
                .iter()
                .flatten()
                .all(|op| matches!(op, DrawOp::Text(_)))
        );

        let branded = layout_report(&profile, Some("a"), "n", &[], &ReportOptions::default());
        let ops: Vec<&DrawOp> = branded.pages.iter().flatten().collect();
        assert!(ops.iter().any(|op| matches!(op, DrawOp::Rule { .. })));
        let bands = ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Band { .. }))
            .count();
        // Banner band plus the summary band.
        assert_eq!(bands, 2);
    }

    #[test]
    fn long_summary_value_splits_band_across_pages() {
        for words in (300..1200).step_by(3) {
            let profile = ClientProfile {
                critical_infra: "word ".repeat(words),
                ..ClientProfile::default()
            };
            let layout = layout_report(&profile, None, "n", &[], &ReportOptions::default());

            for (page_idx, ops) in layout.pages.iter().enumerate() {
                let values: Vec<&TextLine> = ops
                    .iter()
                    .filter_map(|op| match op {
                        DrawOp::Text(l) if l.role == LineRole::Body && l.x_mm == SUMMARY_VALUE_X_MM => {
                            Some(l)
                        }
                        _ => None,
                    })
                    .collect();
                let bands: Vec<(f32, f32)> = ops
                    .iter()
                    .filter_map(|op| match op {
                        DrawOp::Band { top_mm, bottom_mm } if *top_mm < PAGE_HEIGHT_MM - 6.0 => {
                            Some((*top_mm, *bottom_mm))
                        }
                        _ => None,
                    })
                    .collect();

                if values.is_empty() {
                    assert!(bands.is_empty(), "stray band on page {}", page_idx);
                    continue;
                }
                assert_eq!(bands.len(), 1, "{} words, page {}", words, page_idx);
                let (top, bottom) = bands[0];
                assert!(values.iter().all(|l| l.y_mm < top && l.y_mm > bottom));

                let labels = ops.iter().filter_map(|op| match op {
                    DrawOp::Text(l) if l.role == LineRole::Label => Some(l),
                    _ => None,
                });
                for label in labels {
                    assert!(values.iter().any(|v| (v.y_mm - label.y_mm).abs() < 0.01));
                }
            }
        }
    }

    #[test]
    fn report_style_parse() {
        assert_eq!(ReportStyle::parse("Branded"), Some(ReportStyle::Branded));
        assert_eq!(ReportStyle::parse("plain"), Some(ReportStyle::Classic));
        assert_eq!(ReportStyle::parse("fancy"), None);
    }
}
