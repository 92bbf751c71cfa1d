//! The ZIP package (OPC container) behind a .pptx file.

use deck_core::{Error, Result};
use serde::Deserialize;
use std::io::{Read, Seek, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Main presentation part.
pub const PRESENTATION_PART: &str = "ppt/presentation.xml";

/// Content type registry at the package root.
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// Relationship type URIs used by the deck writer.
pub mod rel_types {
    pub const SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
    pub const SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
    pub const SLIDE_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
}

/// A single entry of the package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub name: String,
    pub data: Vec<u8>,
}

/// All parts of a package, held in memory in archive order.
#[derive(Debug, Clone, Default)]
pub struct Package {
    parts: Vec<Part>,
}

impl Package {
    /// Read every file entry of a ZIP archive.
    pub fn read<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let mut parts = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut file = archive
                .by_index(index)
                .map_err(|e| Error::ZipError(format!("Failed to read entry {}: {}", index, e)))?;
            if file.is_dir() {
                continue;
            }

            let name = file.name().to_string();
            let mut data = Vec::new();
            file.read_to_end(&mut data)
                .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", name, e)))?;
            parts.push(Part { name, data });
        }

        log::debug!("Read package with {} parts", parts.len());
        Ok(Self { parts })
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.data.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.part(name).is_some()
    }

    /// Read a part as XML text.
    pub fn xml(&self, name: &str) -> Result<String> {
        let data = self
            .part(name)
            .ok_or_else(|| Error::InvalidTemplate(format!("missing part '{}'", name)))?;
        String::from_utf8(data.to_vec())
            .map_err(|e| Error::XmlError(format!("Part '{}' is not UTF-8: {}", name, e)))
    }

    /// Replace a part's content, or append it if the package lacks it.
    pub fn set_part(&mut self, name: &str, data: Vec<u8>) {
        match self.parts.iter_mut().find(|p| p.name == name) {
            Some(part) => part.data = data,
            None => self.parts.push(Part {
                name: name.to_string(),
                data,
            }),
        }
    }

    /// Relationships declared by `part_name`; empty if it has no rels part.
    pub fn relationships(&self, part_name: &str) -> Result<Vec<Relationship>> {
        let rels = rels_path(part_name);
        if !self.contains(&rels) {
            return Ok(Vec::new());
        }
        parse_relationships(&self.xml(&rels)?)
    }

    /// Resolve relationship `id` of `part_name` to a part name.
    pub fn relationship_target(&self, part_name: &str, id: &str) -> Result<String> {
        self.relationships(part_name)?
            .into_iter()
            .find(|r| r.id == id)
            .map(|r| resolve_target(part_name, &r.target))
            .ok_or_else(|| {
                Error::InvalidTemplate(format!("'{}' has no relationship '{}'", part_name, id))
            })
    }

    /// Write all parts to a new ZIP archive, returning the inner writer.
    pub fn write<W: Write + Seek>(&self, writer: W) -> Result<W> {
        let mut zip = ZipWriter::new(writer);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        for part in &self.parts {
            zip.start_file(part.name.as_str(), options)
                .map_err(|e| Error::ZipError(format!("Failed to add '{}': {}", part.name, e)))?;
            zip.write_all(&part.data)?;
        }

        zip.finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish ZIP: {}", e)))
    }
}

/// One entry of a `.rels` part.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Relationship {
    #[serde(rename = "@Id")]
    pub id: String,

    #[serde(rename = "@Type")]
    pub rel_type: String,

    #[serde(rename = "@Target")]
    pub target: String,

    /// `External` for hyperlinks and other targets outside the package.
    #[serde(rename = "@TargetMode", default)]
    pub target_mode: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Relationships {
    #[serde(rename = "Relationship", default)]
    items: Vec<Relationship>,
}

/// Parse the content of a `.rels` part.
pub fn parse_relationships(xml: &str) -> Result<Vec<Relationship>> {
    quick_xml::de::from_str::<Relationships>(xml)
        .map(|rels| rels.items)
        .map_err(|e| Error::XmlError(format!("Error parsing relationships: {}", e)))
}

/// Name of the rels part belonging to `part_name`.
pub fn rels_path(part_name: &str) -> String {
    match part_name.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part_name),
    }
}

/// Resolve a relationship target against the part that declares it.
pub fn resolve_target(source_part: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = match source_part.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    };
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Relative target from `source_part` to `target_part`, as used in rels.
pub fn relative_target(source_part: &str, target_part: &str) -> String {
    let from: Vec<&str> = match source_part.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    };
    let to: Vec<&str> = target_part.split('/').collect();
    let (to_dirs, _) = to.split_at(to.len() - 1);

    let common = from
        .iter()
        .zip(to_dirs)
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments: Vec<&str> = vec![".."; from.len() - common];
    segments.extend(&to[common..]);
    segments.join("/")
}

/// Extract a trailing number from a string like "rId2" or "slide3.xml".
pub fn number_suffix(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_number_suffix() {
        assert_eq!(number_suffix("rId1"), Some(1));
        assert_eq!(number_suffix("rId12"), Some(12));
        assert_eq!(number_suffix("slide1.xml"), Some(1));
        assert_eq!(number_suffix("ppt/slides/slide123.xml"), Some(123));
        assert_eq!(number_suffix("nodigits"), None);
    }

    #[test]
    fn test_rels_path() {
        assert_eq!(
            rels_path("ppt/presentation.xml"),
            "ppt/_rels/presentation.xml.rels"
        );
        assert_eq!(
            rels_path("ppt/slides/slide2.xml"),
            "ppt/slides/_rels/slide2.xml.rels"
        );
        assert_eq!(rels_path("root.xml"), "_rels/root.xml.rels");
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(
            resolve_target("ppt/presentation.xml", "slideMasters/slideMaster1.xml"),
            "ppt/slideMasters/slideMaster1.xml"
        );
        assert_eq!(
            resolve_target("ppt/slideMasters/slideMaster1.xml", "../slideLayouts/slideLayout3.xml"),
            "ppt/slideLayouts/slideLayout3.xml"
        );
        assert_eq!(
            resolve_target("ppt/slides/slide1.xml", "/ppt/media/image1.png"),
            "ppt/media/image1.png"
        );
    }

    #[test]
    fn test_relative_target() {
        assert_eq!(
            relative_target("ppt/slides/slide1.xml", "ppt/slideLayouts/slideLayout3.xml"),
            "../slideLayouts/slideLayout3.xml"
        );
        assert_eq!(
            relative_target("ppt/presentation.xml", "ppt/slides/slide4.xml"),
            "slides/slide4.xml"
        );
    }

    #[test]
    fn test_parse_relationships() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com" TargetMode="External"/>
</Relationships>"#;
        let rels = parse_relationships(xml).unwrap();
        assert_eq!(rels.len(), 3);
        assert_eq!(rels[1].id, "rId1");
        assert_eq!(rels[1].rel_type, rel_types::SLIDE_MASTER);
        assert_eq!(rels[1].target, "slideMasters/slideMaster1.xml");
        assert_eq!(rels[0].target_mode, None);
        assert_eq!(rels[2].target_mode.as_deref(), Some("External"));
    }

    #[test]
    fn test_parse_empty_relationships() {
        let rels = parse_relationships(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"/>"#,
        )
        .unwrap();
        assert!(rels.is_empty());
    }

    #[test]
    fn test_write_and_read_back() {
        let mut package = Package::default();
        package.set_part("a.xml", b"<a/>".to_vec());
        package.set_part("dir/b.xml", b"<b/>".to_vec());
        package.set_part("a.xml", b"<a2/>".to_vec());

        let bytes = package.write(Cursor::new(Vec::new())).unwrap().into_inner();
        let read = Package::read(Cursor::new(bytes)).unwrap();

        let names: Vec<&str> = read.parts().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a.xml", "dir/b.xml"]);
        assert_eq!(read.part("a.xml"), Some(&b"<a2/>"[..]));
    }

    #[test]
    fn test_missing_part_is_invalid_template() {
        let package = Package::default();
        assert!(matches!(
            package.xml(PRESENTATION_PART),
            Err(Error::InvalidTemplate(_))
        ));
    }

    #[test]
    fn test_read_rejects_non_zip() {
        let result = Package::read(Cursor::new(b"not a zip file".to_vec()));
        assert!(matches!(result, Err(Error::ZipError(_))));
    }
}
