//! Slide layout lookup and placeholder discovery.
//!
//! Layouts are numbered the way PowerPoint lists them: by position in the
//! first slide master's layout list, not by part file name.

use crate::package::{rel_types, resolve_target, Package, PRESENTATION_PART};
use crate::xml::{attribute, elements, relationship_ref};
use deck_core::{DeckOptions, Error, Result};

/// Placeholder types that hold pictures or objects rather than text.
const NON_TEXT_TYPES: &[&str] = &["pic", "tbl", "chart", "dgm", "media", "clipArt"];

/// Placeholder types that are not copied onto new slides.
const SLIDE_LEVEL_TYPES: &[&str] = &["dt", "ftr", "sldNum"];

/// A placeholder (`p:ph`) defined on a layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholder {
    /// `type` attribute; absent means an object placeholder.
    pub kind: Option<String>,
    pub idx: Option<u32>,
    pub orient: Option<String>,
    pub size: Option<String>,
}

impl Placeholder {
    fn from_element(element: &quick_xml::events::BytesStart<'_>) -> Self {
        Self {
            kind: attribute(element, b"type"),
            idx: attribute(element, b"idx").and_then(|v| v.parse().ok()),
            orient: attribute(element, b"orient"),
            size: attribute(element, b"sz"),
        }
    }

    pub fn kind(&self) -> &str {
        self.kind.as_deref().unwrap_or("obj")
    }

    pub fn idx(&self) -> u32 {
        self.idx.unwrap_or(0)
    }

    pub fn is_title(&self) -> bool {
        matches!(self.kind(), "title" | "ctrTitle")
    }

    pub fn has_text_frame(&self) -> bool {
        !NON_TEXT_TYPES.contains(&self.kind())
    }

    fn is_slide_level(&self) -> bool {
        SLIDE_LEVEL_TYPES.contains(&self.kind())
    }

    /// Shape name prefix PowerPoint uses for this kind of placeholder.
    pub fn base_name(&self) -> &'static str {
        match self.kind() {
            "title" | "ctrTitle" => "Title",
            "subTitle" => "Subtitle",
            "body" => "Text Placeholder",
            "obj" => "Content Placeholder",
            "pic" => "Picture Placeholder",
            "tbl" => "Table Placeholder",
            "chart" => "Chart Placeholder",
            "media" => "Media Placeholder",
            _ => "Placeholder",
        }
    }
}

/// The layout new slides are based on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideLayout {
    /// Part name, e.g. `ppt/slideLayouts/slideLayout3.xml`.
    pub part_name: String,

    /// Placeholders copied onto each slide, in layout order.
    pub placeholders: Vec<Placeholder>,

    /// Position of the title placeholder in `placeholders`.
    pub title: usize,

    /// Position of the body placeholder in `placeholders`.
    pub body: usize,
}

/// Layout part names of the first slide master, in list order.
pub fn master_layouts(package: &Package) -> Result<Vec<String>> {
    let presentation = package.xml(PRESENTATION_PART)?;
    let master_ref = elements(&presentation, b"sldMasterId")?
        .first()
        .and_then(relationship_ref);

    let master_ref = match master_ref {
        Some(id) => id,
        None => {
            log::warn!("Template has no slide master");
            return Ok(Vec::new());
        }
    };

    let master = package.relationship_target(PRESENTATION_PART, &master_ref)?;
    let master_xml = package.xml(&master)?;
    let master_rels = package.relationships(&master)?;

    let mut layouts = Vec::new();
    for element in elements(&master_xml, b"sldLayoutId")? {
        let Some(id) = relationship_ref(&element) else {
            continue;
        };
        match master_rels.iter().find(|r| r.id == id) {
            Some(rel) if rel.rel_type == rel_types::SLIDE_LAYOUT => {
                layouts.push(resolve_target(&master, &rel.target));
            }
            _ => {
                return Err(Error::InvalidTemplate(format!(
                    "'{}' has no slide layout relationship '{}'",
                    master, id
                )));
            }
        }
    }

    log::debug!("Master {} lists {} layouts", master, layouts.len());
    Ok(layouts)
}

/// Placeholders declared in a layout part, in document order.
pub fn parse_placeholders(xml: &str) -> Result<Vec<Placeholder>> {
    Ok(elements(xml, b"ph")?
        .iter()
        .map(Placeholder::from_element)
        .collect())
}

/// Find the configured layout and its title and body placeholders.
pub fn resolve_layout(package: &Package, options: &DeckOptions) -> Result<SlideLayout> {
    let layouts = master_layouts(package)?;
    let part_name = layouts
        .get(options.layout_index)
        .cloned()
        .ok_or(Error::MissingLayout {
            index: options.layout_index,
            available: layouts.len(),
        })?;

    let placeholders: Vec<Placeholder> = parse_placeholders(&package.xml(&part_name)?)?
        .into_iter()
        .filter(|p| !p.is_slide_level())
        .collect();

    let title = placeholders
        .iter()
        .position(Placeholder::is_title)
        .ok_or_else(|| Error::MissingPlaceholder("title".to_string()))?;

    let body = placeholders
        .iter()
        .position(|p| {
            !p.is_title() && p.has_text_frame() && p.idx() == options.body_placeholder_idx
        })
        .ok_or_else(|| {
            Error::MissingPlaceholder(format!("body (idx {})", options.body_placeholder_idx))
        })?;

    log::debug!(
        "Using layout {} ({}) with {} placeholders",
        options.layout_index,
        part_name,
        placeholders.len()
    );

    Ok(SlideLayout {
        part_name,
        placeholders,
        title,
        body,
    })
}
