//! Event-driven profile parsing.
//!
//! The grammar mixes free text and `<dependency>` children inside the
//! same step element, so documents are read through quick-xml's event
//! reader rather than a serde mapping.

use quick_xml::escape::unescape;
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::Reader;

use crate::error::{CairnError, Result};

use super::{parse_err, ParsedStep, ProfileKind};

/// Determine a document's form from its root element.
pub(crate) fn detect_kind(text: &str) -> Result<ProfileKind> {
    let mut reader = Reader::from_str(text);
    loop {
        match reader.read_event().map_err(parse_err)? {
            Event::Start(e) | Event::Empty(e) => {
                return match e.local_name().as_ref() {
                    b"import-steps" => Ok(ProfileKind::Import),
                    b"export-steps" => Ok(ProfileKind::Export),
                    other => Err(CairnError::ProfileParse {
                        message: format!(
                            "unrecognized root element '{}'",
                            String::from_utf8_lossy(other)
                        ),
                    }),
                };
            }
            Event::Eof => {
                return Err(CairnError::ProfileParse {
                    message: "document has no root element".into(),
                });
            }
            _ => {}
        }
    }
}

/// Parse a profile document into its steps, in document order.
pub fn read_profile(text: &str, kind: ProfileKind) -> Result<Vec<ParsedStep>> {
    let mut reader = Reader::from_str(text);
    let mut steps = Vec::new();
    let mut saw_root = false;

    loop {
        match reader.read_event().map_err(parse_err)? {
            Event::Start(e) => {
                if !saw_root {
                    expect_root(e.local_name().as_ref(), kind)?;
                    saw_root = true;
                } else if e.local_name().as_ref() == kind.step_element().as_bytes() {
                    steps.push(read_step(&mut reader, &e, kind, false)?);
                } else {
                    return Err(unexpected_element(e.local_name().as_ref()));
                }
            }
            Event::Empty(e) => {
                if !saw_root {
                    // Self-closed root: an empty profile
                    expect_root(e.local_name().as_ref(), kind)?;
                    saw_root = true;
                } else if e.local_name().as_ref() == kind.step_element().as_bytes() {
                    steps.push(read_step(&mut reader, &e, kind, true)?);
                } else {
                    return Err(unexpected_element(e.local_name().as_ref()));
                }
            }
            Event::Text(t) => {
                let inner = t.into_inner();
                let raw = reader.decoder().decode(&inner).map_err(parse_err)?;
                if !raw.trim().is_empty() {
                    return Err(CairnError::ProfileParse {
                        message: "unexpected text outside of a step element".into(),
                    });
                }
            }
            Event::CData(_) | Event::GeneralRef(_) => {
                return Err(CairnError::ProfileParse {
                    message: "unexpected content outside of a step element".into(),
                });
            }
            Event::End(_) => {}
            Event::Eof => break,
            // declaration, comments, processing instructions, doctype
            _ => {}
        }
    }

    if !saw_root {
        return Err(CairnError::ProfileParse {
            message: "document has no root element".into(),
        });
    }
    Ok(steps)
}

fn read_step(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
    kind: ProfileKind,
    self_closed: bool,
) -> Result<ParsedStep> {
    let mut id = None;
    let mut version = None;
    let mut handler = None;
    let mut title = None;

    for attr in start.attributes() {
        let attr = attr.map_err(parse_err)?;
        let value = attr
            .decode_and_unescape_value(reader.decoder())
            .map_err(parse_err)?
            .into_owned();
        match attr.key.as_ref() {
            b"id" => id = Some(value),
            b"version" => version = Some(value),
            b"handler" => handler = Some(value),
            b"title" => title = Some(value),
            other => {
                return Err(CairnError::ProfileParse {
                    message: format!(
                        "unexpected attribute '{}' on <{}>",
                        String::from_utf8_lossy(other),
                        kind.step_element()
                    ),
                });
            }
        }
    }

    let id = id.ok_or_else(|| missing_attribute("id", kind.step_element()))?;
    let handler = handler.ok_or_else(|| missing_attribute("handler", kind.step_element()))?;
    let version = match kind {
        ProfileKind::Import => {
            Some(version.ok_or_else(|| missing_attribute("version", kind.step_element()))?)
        }
        ProfileKind::Export => {
            if version.is_some() {
                return Err(CairnError::ProfileParse {
                    message: "unexpected attribute 'version' on <export-step>".into(),
                });
            }
            None
        }
    };

    let mut dependencies = Vec::new();
    let mut body = String::new();

    if !self_closed {
        loop {
            match reader.read_event().map_err(parse_err)? {
                Event::Empty(e)
                    if kind.has_dependencies() && e.local_name().as_ref() == b"dependency" =>
                {
                    dependencies.push(dependency_target(reader, &e)?);
                }
                Event::Start(e)
                    if kind.has_dependencies() && e.local_name().as_ref() == b"dependency" =>
                {
                    dependencies.push(dependency_target(reader, &e)?);
                    reader.read_to_end(e.name()).map_err(parse_err)?;
                }
                Event::Start(e) | Event::Empty(e) => {
                    return Err(unexpected_element(e.local_name().as_ref()));
                }
                Event::Text(t) => {
                    let inner = t.into_inner();
                    let raw = reader.decoder().decode(&inner).map_err(parse_err)?;
                    body.push_str(&unescape(&raw).map_err(parse_err)?);
                }
                Event::CData(t) => {
                    let inner = t.into_inner();
                    let raw = reader.decoder().decode(&inner).map_err(parse_err)?;
                    body.push_str(&raw);
                }
                Event::GeneralRef(e) => body.push_str(&resolve_reference(&e)?),
                Event::End(_) => break,
                Event::Eof => {
                    return Err(CairnError::ProfileParse {
                        message: format!("unclosed <{}> element", kind.step_element()),
                    });
                }
                _ => {}
            }
        }
    }

    Ok(ParsedStep {
        id,
        version,
        handler,
        title,
        dependencies,
        description: body.trim().to_string(),
    })
}

fn dependency_target(reader: &Reader<&[u8]>, e: &BytesStart<'_>) -> Result<String> {
    let mut step = None;
    for attr in e.attributes() {
        let attr = attr.map_err(parse_err)?;
        match attr.key.as_ref() {
            b"step" => {
                step = Some(
                    attr.decode_and_unescape_value(reader.decoder())
                        .map_err(parse_err)?
                        .into_owned(),
                );
            }
            other => {
                return Err(CairnError::ProfileParse {
                    message: format!(
                        "unexpected attribute '{}' on <dependency>",
                        String::from_utf8_lossy(other)
                    ),
                });
            }
        }
    }
    step.ok_or_else(|| missing_attribute("step", "dependency"))
}

/// Expand an entity reference appearing in description text.
fn resolve_reference(e: &BytesRef<'_>) -> Result<String> {
    if let Some(ch) = e.resolve_char_ref().map_err(parse_err)? {
        return Ok(ch.to_string());
    }
    let name = e.decode().map_err(parse_err)?;
    let expanded = match name.as_ref() {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "apos" => "'",
        "quot" => "\"",
        other => {
            return Err(CairnError::ProfileParse {
                message: format!("unknown entity reference '&{other};'"),
            });
        }
    };
    Ok(expanded.to_string())
}

fn expect_root(name: &[u8], kind: ProfileKind) -> Result<()> {
    if name == kind.root().as_bytes() {
        Ok(())
    } else {
        Err(CairnError::ProfileParse {
            message: format!(
                "expected root element '{}', found '{}'",
                kind.root(),
                String::from_utf8_lossy(name)
            ),
        })
    }
}

fn missing_attribute(attribute: &str, element: &str) -> CairnError {
    CairnError::ProfileParse {
        message: format!("missing required attribute '{attribute}' on <{element}>"),
    }
}

fn unexpected_element(name: &[u8]) -> CairnError {
    CairnError::ProfileParse {
        message: format!("unexpected element '{}'", String::from_utf8_lossy(name)),
    }
}
