//! Small quick-xml helpers shared by the part readers and writers.

use deck_core::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

/// Extract the local name from a potentially namespaced XML element name.
pub(crate) fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Value of the attribute whose full (prefixed) name is `key`.
pub(crate) fn attribute(element: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Value of a namespaced `*:id` attribute, i.e. a relationship reference.
pub(crate) fn relationship_ref(element: &BytesStart<'_>) -> Option<String> {
    element.attributes().flatten().find_map(|attr| {
        let key = attr.key.as_ref();
        (key.contains(&b':') && local_name(key) == b"id")
            .then(|| String::from_utf8_lossy(&attr.value).to_string())
    })
}

/// Collect every element with the given local name, in document order.
pub(crate) fn elements(xml: &str, name: &[u8]) -> Result<Vec<BytesStart<'static>>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut found = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if local_name(e.name().as_ref()) == name => {
                found.push(e.into_owned());
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlError(format!("Error reading XML: {}", e))),
            _ => {}
        }
    }

    Ok(found)
}

/// A childless element to be written into a part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }
}

/// Event writer for one package part.
pub(crate) struct PartWriter {
    writer: Writer<Vec<u8>>,
}

impl PartWriter {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(Vec::new()),
        }
    }

    /// Write the standalone XML declaration Office parts start with.
    pub fn declaration(&mut self) -> Result<()> {
        self.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
    }

    pub fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| Error::XmlError(format!("Failed to write XML: {}", e)))
    }

    pub fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.write(Event::Start(element))
    }

    pub fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.write(Event::Empty(element))
    }

    pub fn end(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    /// Write `<name>text</name>`, escaping the text.
    pub fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.start(name, &[])?;
        self.write(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    pub fn element(&mut self, element: &XmlElement) -> Result<()> {
        let attributes: Vec<(&str, &str)> = element
            .attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        self.empty(&element.name, &attributes)
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

/// Copy `xml`, appending `children` at the end of the `container` element.
///
/// When the part has no such container, a new one is created as a child of
/// the root element, placed after any leading siblings named in
/// `preceding` (local names, in schema order).
pub(crate) fn append_children(
    xml: &str,
    container: &str,
    preceding: &[&str],
    children: &[XmlElement],
) -> Result<Vec<u8>> {
    let container_local = local_name(container.as_bytes()).to_vec();
    let exists = !elements(xml, &container_local)?.is_empty();

    let mut reader = Reader::from_str(xml);
    let mut out = PartWriter::new();
    let mut depth = 0usize;
    let mut inserted = false;

    let write_list = |out: &mut PartWriter| -> Result<()> {
        out.start(container, &[])?;
        for child in children {
            out.element(child)?;
        }
        out.end(container)
    };

    loop {
        let event = reader
            .read_event()
            .map_err(|e| Error::XmlError(format!("Error reading XML: {}", e)))?;

        if !exists && !inserted && depth == 1 {
            if let Event::Start(ref e) | Event::Empty(ref e) = event {
                let name = e.name();
                let local = local_name(name.as_ref());
                if !preceding.iter().any(|p| p.as_bytes() == local) {
                    write_list(&mut out)?;
                    inserted = true;
                }
            }
        }

        match event {
            Event::Start(e) => {
                depth += 1;
                out.write(Event::Start(e))?;
            }
            Event::Empty(e)
                if exists && !inserted && local_name(e.name().as_ref()) == container_local =>
            {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                out.write(Event::Start(e))?;
                for child in children {
                    out.element(child)?;
                }
                out.end(&name)?;
                inserted = true;
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                if !inserted {
                    if exists && local_name(e.name().as_ref()) == container_local {
                        for child in children {
                            out.element(child)?;
                        }
                        inserted = true;
                    } else if !exists && depth == 0 {
                        write_list(&mut out)?;
                        inserted = true;
                    }
                }
                out.write(Event::End(e))?;
            }
            Event::Eof => break,
            other => out.write(other)?,
        }
    }

    if !inserted {
        return Err(Error::XmlError(format!(
            "No place to insert {} in part",
            container
        )));
    }

    Ok(out.into_inner())
}
