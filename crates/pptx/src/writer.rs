//! Adding slides to a template package.

use crate::layout::{resolve_layout, SlideLayout};
use crate::package::{
    number_suffix, rel_types, rels_path, relative_target, Package, CONTENT_TYPES_PART,
    PRESENTATION_PART,
};
use crate::slide::{render_slide, render_slide_rels, SLIDE_CONTENT_TYPE};
use crate::xml::{append_children, attribute, elements, XmlElement};
use deck_core::{Deck, DeckBuilder, DeckOptions, Result, SlideHandle};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

/// Folder holding slide parts.
const SLIDES_DIR: &str = "ppt/slides/";

/// Elements that come before `p:sldIdLst` inside `p:presentation`.
const BEFORE_SLIDE_LIST: &[&str] = &["sldMasterIdLst", "notesMasterIdLst", "handoutMasterIdLst"];

/// Slide ids below this value are reserved.
const MIN_SLIDE_ID: u32 = 256;

/// A deck built on top of a PPTX template.
///
/// Slides are collected in memory and the package is only rewritten when
/// saving, so a failure leaves no partial output behind.
#[derive(Debug, Clone)]
pub struct PptxDeck {
    package: Package,
    layout: SlideLayout,
    options: DeckOptions,
    deck: Deck,
}

impl PptxDeck {
    /// Open a template file.
    pub fn open(path: &Path, options: DeckOptions) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), options)
    }

    /// Read a template from any seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R, options: DeckOptions) -> Result<Self> {
        let package = Package::read(reader)?;
        let layout = resolve_layout(&package, &options)?;
        Ok(Self {
            package,
            layout,
            options,
            deck: Deck::new(),
        })
    }

    pub fn layout(&self) -> &SlideLayout {
        &self.layout
    }

    /// Slides added so far; the template's own slides are not included.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Write the finished package to `path`, creating its directory.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        let mut writer = self.write_to(BufWriter::new(file))?;
        writer.flush()?;
        log::debug!("Wrote {}", path.display());
        Ok(())
    }

    /// Write the finished package to a writer.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<W> {
        self.build_package()?.write(writer)
    }

    /// The template package with this deck's slides added.
    pub fn build_package(&self) -> Result<Package> {
        let mut package = self.package.clone();
        if self.deck.slides.is_empty() {
            return Ok(package);
        }

        let presentation = package.xml(PRESENTATION_PART)?;
        let presentation_rels = rels_path(PRESENTATION_PART);
        let rels_xml = package.xml(&presentation_rels)?;
        let content_types = package.xml(CONTENT_TYPES_PART)?;

        let first_number = next_slide_number(&package);
        let mut next_rel = package
            .relationships(PRESENTATION_PART)?
            .iter()
            .filter_map(|r| number_suffix(&r.id))
            .max()
            .unwrap_or(0)
            + 1;
        let mut next_id = max_slide_id(&presentation)?.max(MIN_SLIDE_ID - 1) + 1;

        let mut slide_ids = Vec::new();
        let mut relationships = Vec::new();
        let mut overrides = Vec::new();

        for (offset, slide) in self.deck.slides.iter().enumerate() {
            let part_name = format!("{}slide{}.xml", SLIDES_DIR, first_number + offset);
            let rel_id = format!("rId{}", next_rel);

            package.set_part(
                &part_name,
                render_slide(&self.layout, slide, &self.options.language)?,
            );
            package.set_part(
                &rels_path(&part_name),
                render_slide_rels(&relative_target(&part_name, &self.layout.part_name))?,
            );

            slide_ids.push(
                XmlElement::new("p:sldId")
                    .attr("id", next_id.to_string())
                    .attr("r:id", rel_id.clone()),
            );
            relationships.push(
                XmlElement::new("Relationship")
                    .attr("Id", rel_id)
                    .attr("Type", rel_types::SLIDE)
                    .attr("Target", relative_target(PRESENTATION_PART, &part_name)),
            );
            overrides.push(
                XmlElement::new("Override")
                    .attr("PartName", format!("/{}", part_name))
                    .attr("ContentType", SLIDE_CONTENT_TYPE),
            );

            log::debug!("Rendered {} for slide \"{}\"", part_name, slide.title);
            next_rel += 1;
            next_id += 1;
        }

        package.set_part(
            PRESENTATION_PART,
            append_children(&presentation, "p:sldIdLst", BEFORE_SLIDE_LIST, &slide_ids)?,
        );
        package.set_part(
            &presentation_rels,
            append_children(&rels_xml, "Relationships", &[], &relationships)?,
        );
        package.set_part(
            CONTENT_TYPES_PART,
            append_children(&content_types, "Types", &[], &overrides)?,
        );

        Ok(package)
    }
}

impl DeckBuilder for PptxDeck {
    fn new_slide(&mut self, title: &str) -> Result<SlideHandle> {
        self.deck.new_slide(title)
    }

    fn append_body_paragraph(&mut self, slide: SlideHandle, text: &str, level: usize) -> Result<()> {
        self.deck.append_body_paragraph(slide, text, level)
    }
}

/// First free `slideN.xml` number in the package.
fn next_slide_number(package: &Package) -> usize {
    package
        .parts()
        .iter()
        .filter_map(|part| {
            let file = part.name.strip_prefix(SLIDES_DIR)?;
            (file.starts_with("slide") && file.ends_with(".xml") && !file.contains('/'))
                .then(|| number_suffix(file))
                .flatten()
        })
        .max()
        .unwrap_or(0)
        + 1
}

/// Largest `p:sldId/@id` already in the presentation, or 0.
fn max_slide_id(presentation: &str) -> Result<u32> {
    Ok(elements(presentation, b"sldId")?
        .iter()
        .filter_map(|e| attribute(e, b"id"))
        .filter_map(|id| match id.parse::<u32>() {
            Ok(id) => Some(id),
            Err(_) => {
                log::warn!("Ignoring unparseable slide id '{}'", id);
                None
            }
        })
        .max()
        .unwrap_or(0))
}
