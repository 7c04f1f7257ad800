//! PPTX export functionality
//!
//! Writes a fixed three-slide deck as a PresentationML package: a zip
//! container of hand-assembled OOXML parts.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::FileOptions;

use crate::config::{DECK_SUMMARY_CHARS, DECK_SUMMARY_CHARS_MAX, DECK_SUMMARY_CHARS_MIN};
use crate::exports::text::{sanitize, truncate_with_ellipsis};
use crate::models::ClientProfile;

pub const DECK_TITLE: &str = "Threat Modeling & MDR Assessment";
pub const SLIDE_NARRATIVE_TITLE: &str = "Attack Scenario";
pub const SLIDE_RECOMMENDATIONS_TITLE: &str = "Testing & MDR Recommendations";

pub const SLIDE_COUNT: usize = 3;

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

// 4:3 slide in EMU.
const SLIDE_CX: i64 = 9_144_000;
const SLIDE_CY: i64 = 6_858_000;
const EMU_PER_INCH: i64 = 914_400;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckOptions {
    /// Characters of sanitized narrative kept on the scenario slide.
    pub summary_chars: usize,
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            summary_chars: DECK_SUMMARY_CHARS,
        }
    }
}

fn xml_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if (c as u32) < 0x20 && c != '\t' => {}
            c => out.push(c),
        }
    }
    out
}

/// One text frame paragraph.
struct DeckParagraph {
    text: String,
    size_hundredths: u32,
    bold: bool,
}

impl DeckParagraph {
    fn new(text: impl Into<String>, size_pt: u32, bold: bool) -> Self {
        Self {
            text: text.into(),
            size_hundredths: size_pt * 100,
            bold,
        }
    }

    fn to_xml(&self) -> String {
        format!(
            r#"<a:p><a:r><a:rPr lang="en-US" sz="{}" b="{}" dirty="0"/><a:t>{}</a:t></a:r></a:p>"#,
            self.size_hundredths,
            if self.bold { 1 } else { 0 },
            xml_escape(&self.text)
        )
    }
}

/// A positioned text box; offsets and extents in inches.
struct TextBox {
    name: &'static str,
    x_in: f64,
    y_in: f64,
    w_in: f64,
    h_in: f64,
    paragraphs: Vec<DeckParagraph>,
}

impl TextBox {
    fn to_xml(&self, shape_id: u32) -> String {
        let emu = |inches: f64| (inches * EMU_PER_INCH as f64).round() as i64;
        let body: String = if self.paragraphs.is_empty() {
            "<a:p><a:endParaRPr lang=\"en-US\"/></a:p>".to_string()
        } else {
            self.paragraphs.iter().map(DeckParagraph::to_xml).collect()
        };
        format!(
            concat!(
                r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#,
                r#"<p:spPr><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
                r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>"#,
                r#"<p:txBody><a:bodyPr wrap="square" rtlCol="0"><a:normAutofit/></a:bodyPr><a:lstStyle/>{body}</p:txBody></p:sp>"#
            ),
            id = shape_id,
            name = self.name,
            x = emu(self.x_in),
            y = emu(self.y_in),
            cx = emu(self.w_in),
            cy = emu(self.h_in),
            body = body,
        )
    }
}

struct Slide {
    layout: usize,
    boxes: Vec<TextBox>,
}

impl Slide {
    fn to_xml(&self) -> String {
        let shapes: String = self
            .boxes
            .iter()
            .enumerate()
            .map(|(idx, tb)| tb.to_xml(idx as u32 + 2))
            .collect();
        format!(
            r#"{XML_DECL}<p:sld xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}"><p:cSld><p:spTree>{group}{shapes}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#,
            group = empty_group_header(),
        )
    }

    fn rels_xml(&self) -> String {
        format!(
            r#"{XML_DECL}<Relationships xmlns="{NS_REL}"><Relationship Id="rId1" Type="{REL_BASE}/slideLayout" Target="../slideLayouts/slideLayout{}.xml"/></Relationships>"#,
            self.layout
        )
    }
}

fn empty_group_header() -> &'static str {
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#
}

fn title_box(text: &str, size_pt: u32) -> TextBox {
    TextBox {
        name: "Title",
        x_in: 0.5,
        y_in: 0.4,
        w_in: 9.0,
        h_in: 1.2,
        paragraphs: vec![DeckParagraph::new(text, size_pt, true)],
    }
}

fn body_box(paragraphs: Vec<DeckParagraph>) -> TextBox {
    TextBox {
        name: "Content",
        x_in: 0.5,
        y_in: 1.7,
        w_in: 9.0,
        h_in: 5.3,
        paragraphs,
    }
}

fn title_slide(profile: &ClientProfile) -> Slide {
    let subtitle = format!(
        "Prepared for {} ({} Sector) by {}",
        profile.customer_name, profile.industry, profile.consultant_name
    );
    Slide {
        layout: 1,
        boxes: vec![
            TextBox {
                name: "Title",
                x_in: 0.75,
                y_in: 2.1,
                w_in: 8.5,
                h_in: 1.5,
                paragraphs: vec![DeckParagraph::new(DECK_TITLE, 40, true)],
            },
            TextBox {
                name: "Subtitle",
                x_in: 1.5,
                y_in: 3.9,
                w_in: 7.0,
                h_in: 1.75,
                paragraphs: vec![DeckParagraph::new(subtitle, 20, false)],
            },
        ],
    }
}

fn narrative_slide(narrative: &str, budget: usize) -> Slide {
    let summary = truncate_with_ellipsis(&sanitize(narrative), budget);
    let paragraphs = summary
        .split('\n')
        .filter(|p| !p.trim().is_empty())
        .map(|p| DeckParagraph::new(p.trim(), 18, false))
        .collect();
    Slide {
        layout: 2,
        boxes: vec![title_box(SLIDE_NARRATIVE_TITLE, 32), body_box(paragraphs)],
    }
}

fn recommendations_slide(recommendations: &[String]) -> Slide {
    let paragraphs = recommendations
        .iter()
        .map(|rec| DeckParagraph::new(rec.as_str(), 14, false))
        .collect();
    Slide {
        layout: 2,
        boxes: vec![
            title_box(SLIDE_RECOMMENDATIONS_TITLE, 32),
            body_box(paragraphs),
        ],
    }
}

fn content_types_xml(slide_count: usize) -> String {
    let slides: String = (1..=slide_count)
        .map(|n| {
            format!(
                r#"<Override PartName="/ppt/slides/slide{n}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#
            )
        })
        .collect();
    format!(
        concat!(
            "{decl}",
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
            r#"<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>"#,
            r#"<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>"#,
            r#"<Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>"#,
            r#"<Override PartName="/ppt/slideLayouts/slideLayout2.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>"#,
            r#"<Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>"#,
            r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
            r#"<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#,
            "{slides}</Types>"
        ),
        decl = XML_DECL,
        slides = slides,
    )
}

fn root_rels_xml() -> String {
    format!(
        r#"{XML_DECL}<Relationships xmlns="{NS_REL}"><Relationship Id="rId1" Type="{REL_BASE}/officeDocument" Target="ppt/presentation.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/><Relationship Id="rId3" Type="{REL_BASE}/extended-properties" Target="docProps/app.xml"/></Relationships>"#
    )
}

fn core_props_xml(profile: &ClientProfile) -> String {
    let created = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    format!(
        concat!(
            "{decl}",
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
            "<dc:title>{title}</dc:title><dc:creator>{creator}</dc:creator>",
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{created}</dcterms:created>"#,
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{created}</dcterms:modified>"#,
            "</cp:coreProperties>"
        ),
        decl = XML_DECL,
        title = xml_escape(&format!("{} - {}", DECK_TITLE, profile.customer_name)),
        creator = xml_escape(&profile.consultant_name),
        created = created,
    )
}

fn app_props_xml(slide_count: usize) -> String {
    format!(
        r#"{XML_DECL}<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>{app}</Application><Slides>{slide_count}</Slides></Properties>"#,
        app = xml_escape(&format!("mdr-scenario {}", env!("CARGO_PKG_VERSION"))),
    )
}

fn presentation_xml(slide_count: usize) -> String {
    let slide_ids: String = (0..slide_count)
        .map(|idx| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + idx, idx + 2))
        .collect();
    format!(
        r#"{XML_DECL}<p:presentation xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}" saveSubsetFonts="1"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:sldIdLst>{slide_ids}</p:sldIdLst><p:sldSz cx="{SLIDE_CX}" cy="{SLIDE_CY}" type="screen4x3"/><p:notesSz cx="{SLIDE_CY}" cy="{SLIDE_CX}"/></p:presentation>"#
    )
}

fn presentation_rels_xml(slide_count: usize) -> String {
    let slides: String = (1..=slide_count)
        .map(|n| {
            format!(
                r#"<Relationship Id="rId{}" Type="{REL_BASE}/slide" Target="slides/slide{n}.xml"/>"#,
                n + 1
            )
        })
        .collect();
    format!(
        r#"{XML_DECL}<Relationships xmlns="{NS_REL}"><Relationship Id="rId1" Type="{REL_BASE}/slideMaster" Target="slideMasters/slideMaster1.xml"/>{slides}<Relationship Id="rId{theme}" Type="{REL_BASE}/theme" Target="theme/theme1.xml"/></Relationships>"#,
        theme = slide_count + 2,
    )
}

fn slide_master_xml() -> String {
    format!(
        concat!(
            "{decl}",
            r#"<p:sldMaster xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}">"#,
            r#"<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree>{group}</p:spTree></p:cSld>"#,
            r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
            r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/><p:sldLayoutId id="2147483650" r:id="rId2"/></p:sldLayoutIdLst>"#,
            "</p:sldMaster>"
        ),
        decl = XML_DECL,
        a = NS_A,
        r = NS_R,
        p = NS_P,
        group = empty_group_header(),
    )
}

fn slide_master_rels_xml() -> String {
    format!(
        r#"{XML_DECL}<Relationships xmlns="{NS_REL}"><Relationship Id="rId1" Type="{REL_BASE}/slideLayout" Target="../slideLayouts/slideLayout1.xml"/><Relationship Id="rId2" Type="{REL_BASE}/slideLayout" Target="../slideLayouts/slideLayout2.xml"/><Relationship Id="rId3" Type="{REL_BASE}/theme" Target="../theme/theme1.xml"/></Relationships>"#
    )
}

fn slide_layout_xml(kind: &str, name: &str) -> String {
    format!(
        r#"{XML_DECL}<p:sldLayout xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}" type="{kind}" preserve="1"><p:cSld name="{name}"><p:spTree>{group}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#,
        group = empty_group_header(),
    )
}

fn slide_layout_rels_xml() -> String {
    format!(
        r#"{XML_DECL}<Relationships xmlns="{NS_REL}"><Relationship Id="rId1" Type="{REL_BASE}/slideMaster" Target="../slideMasters/slideMaster1.xml"/></Relationships>"#
    )
}

fn theme_xml() -> String {
    let accents = ["4F81BD", "C0504D", "9BBB59", "8064A2", "4BACC6", "F79646"];
    let accent_xml: String = accents
        .iter()
        .enumerate()
        .map(|(idx, hex)| {
            format!(
                r#"<a:accent{n}><a:srgbClr val="{hex}"/></a:accent{n}>"#,
                n = idx + 1
            )
        })
        .collect();
    let solid = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
    let line = format!(r#"<a:ln w="9525">{solid}</a:ln>"#);
    let effect = "<a:effectStyle><a:effectLst/></a:effectStyle>";
    let font = |face: &str| {
        format!(r#"<a:latin typeface="{face}"/><a:ea typeface=""/><a:cs typeface=""/>"#)
    };

    format!(
        concat!(
            "{decl}",
            r#"<a:theme xmlns:a="{a}" name="MDR Theme"><a:themeElements>"#,
            r#"<a:clrScheme name="MDR">"#,
            r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>"#,
            r#"<a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#,
            r#"<a:dk2><a:srgbClr val="1F3864"/></a:dk2><a:lt2><a:srgbClr val="EEECE1"/></a:lt2>"#,
            "{accents}",
            r#"<a:hlink><a:srgbClr val="0000FF"/></a:hlink><a:folHlink><a:srgbClr val="800080"/></a:folHlink>"#,
            "</a:clrScheme>",
            r#"<a:fontScheme name="MDR"><a:majorFont>{major}</a:majorFont><a:minorFont>{minor}</a:minorFont></a:fontScheme>"#,
            r#"<a:fmtScheme name="MDR">"#,
            "<a:fillStyleLst>{s}{s}{s}</a:fillStyleLst>",
            "<a:lnStyleLst>{l}{l}{l}</a:lnStyleLst>",
            "<a:effectStyleLst>{e}{e}{e}</a:effectStyleLst>",
            "<a:bgFillStyleLst>{s}{s}{s}</a:bgFillStyleLst>",
            "</a:fmtScheme></a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>"
        ),
        decl = XML_DECL,
        a = NS_A,
        accents = accent_xml,
        major = font("Calibri Light"),
        minor = font("Calibri"),
        s = solid,
        l = line,
        e = effect,
    )
}

/// Render the three-slide deck as PPTX bytes.
///
/// Slides: title, narrative summary (sanitized, truncated to the budget with
/// an ellipsis), recommendations in the given order.
pub fn render_deck(
    profile: &ClientProfile,
    narrative: &str,
    recommendations: &[String],
    options: &DeckOptions,
) -> Result<Vec<u8>> {
    let budget = options
        .summary_chars
        .clamp(DECK_SUMMARY_CHARS_MIN, DECK_SUMMARY_CHARS_MAX);
    let slides = [
        title_slide(profile),
        narrative_slide(narrative, budget),
        recommendations_slide(recommendations),
    ];

    let mut parts: Vec<(String, String)> = vec![
        (
            "[Content_Types].xml".to_string(),
            content_types_xml(slides.len()),
        ),
        ("_rels/.rels".to_string(), root_rels_xml()),
        ("docProps/core.xml".to_string(), core_props_xml(profile)),
        ("docProps/app.xml".to_string(), app_props_xml(slides.len())),
        ("ppt/presentation.xml".to_string(), presentation_xml(slides.len())),
        (
            "ppt/_rels/presentation.xml.rels".to_string(),
            presentation_rels_xml(slides.len()),
        ),
        (
            "ppt/slideMasters/slideMaster1.xml".to_string(),
            slide_master_xml(),
        ),
        (
            "ppt/slideMasters/_rels/slideMaster1.xml.rels".to_string(),
            slide_master_rels_xml(),
        ),
        (
            "ppt/slideLayouts/slideLayout1.xml".to_string(),
            slide_layout_xml("title", "Title Slide"),
        ),
        (
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels".to_string(),
            slide_layout_rels_xml(),
        ),
        (
            "ppt/slideLayouts/slideLayout2.xml".to_string(),
            slide_layout_xml("obj", "Title and Content"),
        ),
        (
            "ppt/slideLayouts/_rels/slideLayout2.xml.rels".to_string(),
            slide_layout_rels_xml(),
        ),
        ("ppt/theme/theme1.xml".to_string(), theme_xml()),
    ];
    for (idx, slide) in slides.iter().enumerate() {
        let n = idx + 1;
        parts.push((format!("ppt/slides/slide{}.xml", n), slide.to_xml()));
        parts.push((
            format!("ppt/slides/_rels/slide{}.xml.rels", n),
            slide.rels_xml(),
        ));
    }

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, content) in parts {
        zip.start_file(name.as_str(), options)
            .with_context(|| format!("Failed to start deck part {}", name))?;
        zip.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write deck part {}", name))?;
    }
    let cursor = zip.finish().context("Failed to finalize deck package")?;

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::recommend;
    use std::io::Read;
    use zip::ZipArchive;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("deck should be a zip");
        let mut file = archive.by_name(name).expect("part should exist");
        let mut content = String::new();
        file.read_to_string(&mut content)
            .expect("part should be UTF-8");
        content
    }

    fn sample_profile() -> ClientProfile {
        ClientProfile {
            customer_name: "Contoso & Sons".to_string(),
            consultant_name: "A. Patel".to_string(),
            ..ClientProfile::default()
        }
    }

    #[test]
    fn deck_has_exactly_three_slides() {
        let profile = sample_profile();
        let bytes = render_deck(&profile, "Narrative", &recommend(&profile), &DeckOptions::default())
            .expect("deck should render");

        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).expect("deck should be a zip");
        let slide_parts = archive
            .file_names()
            .filter(|n| n.starts_with("ppt/slides/slide") && n.ends_with(".xml"))
            .count();
        assert_eq!(slide_parts, SLIDE_COUNT);

        let presentation = read_part(&bytes, "ppt/presentation.xml");
        assert_eq!(presentation.matches("<p:sldId ").count(), SLIDE_COUNT);
    }

    #[test]
    fn title_slide_subtitle_uses_profile_fields_and_escapes_xml() {
        let profile = sample_profile();
        let bytes = render_deck(&profile, "n", &[], &DeckOptions::default())
            .expect("deck should render");
        let slide1 = read_part(&bytes, "ppt/slides/slide1.xml");
        assert!(slide1.contains("Threat Modeling &amp; MDR Assessment"));
        assert!(slide1.contains("Prepared for Contoso &amp; Sons (Healthcare Sector) by A. Patel"));
    }

    #[test]
    fn narrative_slide_is_truncated_with_ellipsis() {
        let profile = sample_profile();
        let narrative = "a".repeat(2_000);
        let options = DeckOptions { summary_chars: 300 };
        let bytes = render_deck(&profile, &narrative, &[], &options).expect("deck should render");
        let slide2 = read_part(&bytes, "ppt/slides/slide2.xml");
        let expected = format!("<a:t>{}...</a:t>", "a".repeat(300));
        assert!(slide2.contains(&expected));
        assert!(!slide2.contains(&"a".repeat(301)));
    }

    #[test]
    fn narrative_budget_is_clamped_to_supported_range() {
        let profile = sample_profile();
        let narrative = "b".repeat(2_000);
        let options = DeckOptions { summary_chars: 10 };
        let bytes = render_deck(&profile, &narrative, &[], &options).expect("deck should render");
        let slide2 = read_part(&bytes, "ppt/slides/slide2.xml");
        assert!(slide2.contains(&format!("{}...", "b".repeat(DECK_SUMMARY_CHARS_MIN))));
    }

    #[test]
    fn recommendations_slide_keeps_order_one_paragraph_each() {
        let profile = ClientProfile {
            public_web_apps: true,
            servers: 120,
            ..sample_profile()
        };
        let recs = recommend(&profile);
        let bytes =
            render_deck(&profile, "n", &recs, &DeckOptions::default()).expect("deck should render");
        let slide3 = read_part(&bytes, "ppt/slides/slide3.xml");

        let positions: Vec<usize> = recs
            .iter()
            .map(|r| slide3.find(&xml_escape(r)).expect("recommendation should be present"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        // Title paragraph plus one per recommendation.
        assert_eq!(slide3.matches("<a:p>").count(), recs.len() + 1);
    }

    #[test]
    fn xml_escape_covers_markup_characters() {
        assert_eq!(xml_escape(r#"<a & 'b' "c">"#), "&lt;a &amp; &apos;b&apos; &quot;c&quot;&gt;");
    }
}
