//! Parsing of WebDAV multi-status (207) response bodies.
//!
//! The parser is namespace-agnostic: elements are matched on their local
//! name, so `<d:response>`, `<D:response>` and `<response>` are all
//! accepted. Missing properties never fail: every field has an explicit
//! default, and the only error path is malformed XML.

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::DavError;
use crate::models::{Resource, ResourceKind};

#[derive(Debug, Default)]
struct PartialResource {
    href: String,
    last_modified: String,
    etag: String,
    status: String,
    content_length: Option<u64>,
    content_type: Option<String>,
    resourcetype_children: usize,
}

impl PartialResource {
    fn into_resource(self) -> Resource {
        // Observed on ownCloud-family servers: the resourcetype of a
        // collection holds exactly one child (`<collection/>`), while files
        // carry an empty resourcetype. Not guaranteed by RFC 4918, hence
        // isolated here.
        let kind = if self.resourcetype_children == 1 {
            ResourceKind::Collection
        } else {
            ResourceKind::File {
                size: self.content_length.unwrap_or(0),
                content_type: self.content_type.unwrap_or_default(),
            }
        };
        Resource {
            href: self.href,
            kind,
            last_modified: self.last_modified,
            etag: self.etag,
            status: self.status,
        }
    }
}

/// Converts a multi-status document into resources, one per `response`
/// element, preserving document order (servers report the requested
/// resource first, then its children).
///
/// Callers listing a directory at depth 1 must drop the first entry
/// themselves if they only want children; that policy belongs to the
/// session layer, since depth-0 callers want the self entry.
pub fn parse_multistatus(xml_text: &str) -> Result<Vec<Resource>, DavError> {
    let mut reader = Reader::from_str(xml_text);
    reader.config_mut().trim_text(true);

    let mut resources = Vec::new();
    let mut current: Option<PartialResource> = None;
    let mut current_element = String::new();
    let mut in_resourcetype = false;

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = local_name(&e);
                match name.as_str() {
                    "response" => {
                        current = Some(PartialResource::default());
                    }
                    "resourcetype" if current.is_some() => {
                        in_resourcetype = true;
                    }
                    _ if in_resourcetype => {
                        if let Some(ref mut partial) = current {
                            partial.resourcetype_children += 1;
                        }
                    }
                    _ => {
                        current_element = name;
                    }
                }
            }
            Ok(Event::Empty(e)) => {
                let name = local_name(&e);
                if in_resourcetype && name != "resourcetype" {
                    if let Some(ref mut partial) = current {
                        partial.resourcetype_children += 1;
                    }
                }
                // a self-closing <resourcetype/> has zero children
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(quick_xml::Error::from)?.to_string();
                if let Some(ref mut partial) = current {
                    if !text.trim().is_empty() {
                        apply_text(partial, &current_element, text.trim());
                    }
                }
            }
            Ok(Event::End(e)) => {
                let name = local_name_from_end(&e);
                match name.as_str() {
                    "response" => {
                        if let Some(partial) = current.take() {
                            resources.push(partial.into_resource());
                        }
                    }
                    "resourcetype" => {
                        in_resourcetype = false;
                    }
                    _ => {}
                }
                current_element.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(DavError::Xml(e)),
            _ => {}
        }

        buf.clear();
    }

    Ok(resources)
}

fn apply_text(partial: &mut PartialResource, element: &str, text: &str) {
    match element {
        "href" if partial.href.is_empty() => {
            partial.href = text.to_string();
        }
        "getlastmodified" => {
            partial.last_modified = text.to_string();
        }
        "getetag" => {
            partial.etag = text.to_string();
        }
        "getcontentlength" => {
            partial.content_length = text.parse().ok();
        }
        "getcontenttype" => {
            partial.content_type = Some(text.to_string());
        }
        "status" if partial.status.is_empty() => {
            partial.status = text.to_string();
        }
        _ => {}
    }
}

fn local_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned()
}

fn local_name_from_end(e: &BytesEnd) -> String {
    String::from_utf8_lossy(e.name().local_name().as_ref()).into_owned()
}
