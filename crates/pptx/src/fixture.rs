//! Minimal template packages for tests.

use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

const NAMESPACES: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

const RELS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Builds a small but structurally complete .pptx template.
///
/// Layout files are numbered in reverse of the master's layout list so
/// tests can tell list order from file order.
#[derive(Debug, Clone, Default)]
pub(crate) struct TemplateBuilder {
    /// `p:ph` attribute strings per layout, in master list order.
    layouts: Vec<Vec<String>>,
    /// Slides already present in the template.
    existing_slides: usize,
}

impl TemplateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Title slide, title+content, and a title+body layout with footers.
    pub fn standard() -> Self {
        Self::new()
            .layout(&[r#"type="ctrTitle""#, r#"type="subTitle" idx="1""#])
            .layout(&[r#"type="title""#, r#"idx="1""#])
            .layout(&[
                r#"type="title""#,
                r#"type="body" idx="1""#,
                r#"type="dt" sz="half" idx="10""#,
                r#"type="ftr" sz="quarter" idx="11""#,
                r#"type="sldNum" sz="quarter" idx="12""#,
            ])
    }

    pub fn layout(mut self, placeholders: &[&str]) -> Self {
        self.layouts
            .push(placeholders.iter().map(|p| p.to_string()).collect());
        self
    }

    pub fn existing_slides(mut self, count: usize) -> Self {
        self.existing_slides = count;
        self
    }

    fn layout_file(&self, list_position: usize) -> usize {
        self.layouts.len() - list_position
    }

    pub fn build(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let mut add = |name: &str, content: String| {
            zip.start_file(name, FileOptions::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        };

        add("[Content_Types].xml", self.content_types());
        add(
            "_rels/.rels",
            rels(&[("officeDocument", "ppt/presentation.xml".to_string())]),
        );
        add("ppt/presentation.xml", self.presentation());
        add("ppt/_rels/presentation.xml.rels", self.presentation_rels());
        add("ppt/slideMasters/slideMaster1.xml", self.master());
        add(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            rels(
                &(0..self.layouts.len())
                    .map(|i| {
                        (
                            "slideLayout",
                            format!("../slideLayouts/slideLayout{}.xml", self.layout_file(i)),
                        )
                    })
                    .collect::<Vec<_>>(),
            ),
        );
        for (i, placeholders) in self.layouts.iter().enumerate() {
            let number = self.layout_file(i);
            add(
                &format!("ppt/slideLayouts/slideLayout{}.xml", number),
                layout_xml(i, placeholders),
            );
            add(
                &format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", number),
                rels(&[("slideMaster", "../slideMasters/slideMaster1.xml".to_string())]),
            );
        }
        for n in 1..=self.existing_slides {
            add(
                &format!("ppt/slides/slide{}.xml", n),
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sld {}><p:cSld><p:spTree/></p:cSld></p:sld>"#,
                    NAMESPACES
                ),
            );
            add(
                &format!("ppt/slides/_rels/slide{}.xml.rels", n),
                rels(&[(
                    "slideLayout",
                    format!("../slideLayouts/slideLayout{}.xml", self.layout_file(0)),
                )]),
            );
        }

        zip.finish().unwrap().into_inner()
    }

    fn content_types(&self) -> String {
        let mut overrides = vec![
            override_entry("/ppt/presentation.xml", "presentationml.presentation.main+xml"),
            override_entry("/ppt/slideMasters/slideMaster1.xml", "presentationml.slideMaster+xml"),
        ];
        for i in 0..self.layouts.len() {
            overrides.push(override_entry(
                &format!("/ppt/slideLayouts/slideLayout{}.xml", self.layout_file(i)),
                "presentationml.slideLayout+xml",
            ));
        }
        for n in 1..=self.existing_slides {
            overrides.push(override_entry(
                &format!("/ppt/slides/slide{}.xml", n),
                "presentationml.slide+xml",
            ));
        }
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/>{}</Types>"#,
            overrides.concat()
        )
    }

    fn presentation(&self) -> String {
        let slide_list = if self.existing_slides == 0 {
            String::new()
        } else {
            let ids: String = (1..=self.existing_slides)
                .map(|n| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 255 + n, 2 + n))
                .collect();
            format!("<p:sldIdLst>{}</p:sldIdLst>", ids)
        };
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation {}><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>{}<p:sldSz cx="9144000" cy="6858000"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#,
            NAMESPACES, slide_list
        )
    }

    fn presentation_rels(&self) -> String {
        let mut entries = vec![
            ("slideMaster", "slideMasters/slideMaster1.xml".to_string()),
            ("theme", "theme/theme1.xml".to_string()),
        ];
        for n in 1..=self.existing_slides {
            entries.push(("slide", format!("slides/slide{}.xml", n)));
        }
        rels(&entries)
    }

    fn master(&self) -> String {
        let ids: String = (0..self.layouts.len())
            .map(|i| format!(r#"<p:sldLayoutId id="{}" r:id="rId{}"/>"#, 2147483649u32 + i as u32, i + 1))
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster {}><p:cSld><p:spTree/></p:cSld><p:sldLayoutIdLst>{}</p:sldLayoutIdLst></p:sldMaster>"#,
            NAMESPACES, ids
        )
    }
}

fn override_entry(part: &str, kind: &str) -> String {
    format!(
        r#"<Override PartName="{}" ContentType="application/vnd.openxmlformats-officedocument.{}"/>"#,
        part, kind
    )
}

/// A rels part with ids `rId1`, `rId2`, ... in entry order.
fn rels(entries: &[(&str, String)]) -> String {
    let body: String = entries
        .iter()
        .enumerate()
        .map(|(i, (kind, target))| {
            format!(
                r#"<Relationship Id="rId{}" Type="{}/{}" Target="{}"/>"#,
                i + 1,
                REL_BASE,
                kind,
                target
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">{}</Relationships>"#,
        RELS_NS, body
    )
}

fn layout_xml(position: usize, placeholders: &[String]) -> String {
    let shapes: String = placeholders
        .iter()
        .enumerate()
        .map(|(i, attrs)| {
            format!(
                r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="Placeholder {}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph {}/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>"#,
                i + 2,
                i + 1,
                attrs
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout {}><p:cSld name="Layout {}"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{}</p:spTree></p:cSld></p:sldLayout>"#,
        NAMESPACES, position, shapes
    )
}
