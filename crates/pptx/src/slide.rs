//! Slide part rendering.

use crate::layout::{Placeholder, SlideLayout};
use crate::package::rel_types;
use crate::xml::PartWriter;
use deck_core::{BodyParagraph, Result, SlideContent};

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Content type of a slide part.
pub const SLIDE_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";

/// Deepest paragraph level DrawingML supports.
pub const MAX_LEVEL: usize = 8;

/// Alternate language recorded next to the body language.
const ALT_LANGUAGE: &str = "en-US";

/// Render `ppt/slides/slideN.xml` for one slide.
///
/// Every layout placeholder is repeated on the slide so it inherits the
/// layout's position and formatting.
pub fn render_slide(layout: &SlideLayout, slide: &SlideContent, language: &str) -> Result<Vec<u8>> {
    let mut out = PartWriter::new();
    out.declaration()?;
    out.start("p:sld", &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)])?;
    out.start("p:cSld", &[])?;
    out.start("p:spTree", &[])?;

    out.start("p:nvGrpSpPr", &[])?;
    out.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    out.empty("p:cNvGrpSpPr", &[])?;
    out.empty("p:nvPr", &[])?;
    out.end("p:nvGrpSpPr")?;
    out.empty("p:grpSpPr", &[])?;

    for (position, placeholder) in layout.placeholders.iter().enumerate() {
        let shape_id = position + 2;
        out.start("p:sp", &[])?;
        write_shape_properties(&mut out, placeholder, shape_id)?;

        if placeholder.has_text_frame() {
            out.start("p:txBody", &[])?;
            out.empty("a:bodyPr", &[])?;
            out.empty("a:lstStyle", &[])?;
            if position == layout.title {
                write_title(&mut out, &slide.title)?;
            } else if position == layout.body {
                write_body(&mut out, &slide.paragraphs, language)?;
            } else {
                out.empty("a:p", &[])?;
            }
            out.end("p:txBody")?;
        }

        out.end("p:sp")?;
    }

    out.end("p:spTree")?;
    out.end("p:cSld")?;
    out.start("p:clrMapOvr", &[])?;
    out.empty("a:masterClrMapping", &[])?;
    out.end("p:clrMapOvr")?;
    out.end("p:sld")?;

    Ok(out.into_inner())
}

/// Render the slide's rels part, which only points at its layout.
pub fn render_slide_rels(layout_target: &str) -> Result<Vec<u8>> {
    let mut out = PartWriter::new();
    out.declaration()?;
    out.start("Relationships", &[("xmlns", NS_RELS)])?;
    out.empty(
        "Relationship",
        &[
            ("Id", "rId1"),
            ("Type", rel_types::SLIDE_LAYOUT),
            ("Target", layout_target),
        ],
    )?;
    out.end("Relationships")?;
    Ok(out.into_inner())
}

fn write_shape_properties(out: &mut PartWriter, placeholder: &Placeholder, shape_id: usize) -> Result<()> {
    let id = shape_id.to_string();
    let name = format!("{} {}", placeholder.base_name(), shape_id - 1);
    let idx = placeholder.idx.filter(|&i| i > 0).map(|i| i.to_string());

    let mut ph: Vec<(&str, &str)> = Vec::new();
    if let Some(kind) = placeholder.kind.as_deref() {
        ph.push(("type", kind));
    }
    if let Some(orient) = placeholder.orient.as_deref() {
        ph.push(("orient", orient));
    }
    if let Some(size) = placeholder.size.as_deref() {
        ph.push(("sz", size));
    }
    if let Some(idx) = idx.as_deref() {
        ph.push(("idx", idx));
    }

    out.start("p:nvSpPr", &[])?;
    out.empty("p:cNvPr", &[("id", id.as_str()), ("name", name.as_str())])?;
    out.start("p:cNvSpPr", &[])?;
    out.empty("a:spLocks", &[("noGrp", "1")])?;
    out.end("p:cNvSpPr")?;
    out.start("p:nvPr", &[])?;
    out.empty("p:ph", &ph)?;
    out.end("p:nvPr")?;
    out.end("p:nvSpPr")?;
    out.empty("p:spPr", &[])
}

fn write_title(out: &mut PartWriter, title: &str) -> Result<()> {
    if title.is_empty() {
        return out.empty("a:p", &[]);
    }
    out.start("a:p", &[])?;
    out.start("a:r", &[])?;
    out.text_element("a:t", title)?;
    out.end("a:r")?;
    out.end("a:p")
}

fn write_body(out: &mut PartWriter, paragraphs: &[BodyParagraph], language: &str) -> Result<()> {
    if paragraphs.is_empty() {
        return out.empty("a:p", &[]);
    }

    let run_properties = [("lang", language), ("altLang", ALT_LANGUAGE)];
    for paragraph in paragraphs {
        out.start("a:p", &[])?;

        let level = paragraph.level.min(MAX_LEVEL);
        if level != paragraph.level {
            log::warn!(
                "Paragraph \"{}\" at level {} shown at level {}",
                paragraph.text,
                paragraph.level,
                MAX_LEVEL
            );
        }
        if level > 0 {
            out.empty("a:pPr", &[("lvl", level.to_string().as_str())])?;
        }

        if paragraph.text.is_empty() {
            out.empty("a:endParaRPr", &run_properties)?;
        } else {
            out.start("a:r", &[])?;
            out.empty("a:rPr", &run_properties)?;
            out.text_element("a:t", &paragraph.text)?;
            out.end("a:r")?;
        }

        out.end("a:p")?;
    }
    Ok(())
}
