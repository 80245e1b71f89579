//! XML envelope codec for script resources.
//!
//! The server round-trips one script as a `<script>` document:
//!
//! ```text
//! <script>
//!   <id>12</id>
//!   <name>admin-1.1.sh</name>
//!   <category/>
//!   <filename>admin-1.1.sh</filename>
//!   <info/>
//!   <notes/>
//!   <priority>After</priority>
//!   <parameters><parameter4>Target volume</parameter4></parameters>
//!   <os_requirements/>
//!   <script_contents>#!/bin/sh ...</script_contents>
//!   <script_contents_encoded/>
//! </script>
//! ```
//!
//! [`decode`] validates the structure and extracts every modelled field;
//! [`encode`] re-serialises the record in the canonical element order.
//! Unknown child elements are ignored on decode.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::CodecError;
use crate::types::{
    Parameter, Priority, ScriptId, ScriptName, ScriptRecord, FIRST_PARAMETER_SLOT,
    LAST_PARAMETER_SLOT,
};

const ROOT: &str = "script";

// ---------------------------------------------------------------------------
// Decode
// ---------------------------------------------------------------------------

/// Parse a raw envelope into a [`ScriptRecord`].
///
/// Fails with [`CodecError::Malformed`] when the document is not a `<script>`
/// record, and with [`CodecError::MissingId`] when the identity element is
/// absent.
pub fn decode(raw: &str) -> Result<ScriptRecord, CodecError> {
    let mut reader = Reader::from_str(raw);

    let mut record = ScriptRecord::default();
    let mut id_text: Option<String> = None;
    let mut saw_root = false;
    // Open-element stack. Depth 1 is the root, depth 2 the record fields,
    // depth 3 the parameter slots.
    let mut stack: Vec<String> = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Err(e) => return Err(CodecError::malformed(e.to_string())),
            Ok(Event::Eof) => break,
            Ok(Event::Start(start)) => {
                let name = element_name(start.name().as_ref());
                if stack.is_empty() {
                    check_root(&name)?;
                    saw_root = true;
                }
                stack.push(name);
                text.clear();
            }
            Ok(Event::Empty(empty)) => {
                let name = element_name(empty.name().as_ref());
                if stack.is_empty() {
                    check_root(&name)?;
                    saw_root = true;
                } else {
                    // self-closing leaf: carries its default (empty) value
                    assign(&mut record, &stack, &name, "", &mut id_text)?;
                }
            }
            Ok(Event::Text(t)) => {
                if !stack.is_empty() {
                    let unescaped = t
                        .unescape()
                        .map_err(|e| CodecError::malformed(e.to_string()))?;
                    text.push_str(&unescaped);
                }
            }
            Ok(Event::CData(c)) => {
                if !stack.is_empty() {
                    text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Ok(Event::End(end)) => {
                let name = element_name(end.name().as_ref());
                let opened = stack.pop().ok_or_else(|| {
                    CodecError::malformed(format!("unexpected closing </{name}>"))
                })?;
                if opened != name {
                    return Err(CodecError::malformed(format!(
                        "mismatched </{name}>, expected </{opened}>"
                    )));
                }
                assign(&mut record, &stack, &name, &text, &mut id_text)?;
                text.clear();
            }
            Ok(_) => {} // declarations, comments, processing instructions
        }
    }

    if !saw_root {
        return Err(CodecError::malformed("document has no root element"));
    }
    if !stack.is_empty() {
        return Err(CodecError::malformed("unexpected end of document"));
    }
    let id_text = id_text.ok_or(CodecError::MissingId)?;
    record.id = ScriptId(
        id_text
            .trim()
            .parse()
            .map_err(|_| CodecError::malformed(format!("non-numeric id '{}'", id_text.trim())))?,
    );
    Ok(record)
}

fn check_root(name: &str) -> Result<(), CodecError> {
    if name == ROOT {
        Ok(())
    } else {
        Err(CodecError::malformed(format!(
            "expected <{ROOT}> root, found <{name}>"
        )))
    }
}

/// Read the server-assigned id out of a create response
/// (`<script><id>42</id></script>`).
pub fn parse_assigned_id(raw: &str) -> Result<ScriptId, CodecError> {
    decode(raw).map(|record| record.id)
}

fn element_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name).into_owned()
}

/// Record the value of a just-closed element, keyed by where it sat in the
/// document: direct children of the root are record fields, children of
/// `<parameters>` are slots, anything deeper is unmodelled and ignored.
fn assign(
    record: &mut ScriptRecord,
    parents: &[String],
    element: &str,
    value: &str,
    id_text: &mut Option<String>,
) -> Result<(), CodecError> {
    match parents {
        [root] if root == ROOT => assign_field(record, element, value, id_text),
        [root, container] if root == ROOT && container == "parameters" => {
            if let Some(slot) = parameter_slot(element) {
                record.parameters.push(Parameter {
                    slot,
                    prompt: value.to_owned(),
                });
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn assign_field(
    record: &mut ScriptRecord,
    element: &str,
    value: &str,
    id_text: &mut Option<String>,
) -> Result<(), CodecError> {
    match element {
        "id" => *id_text = Some(value.to_owned()),
        "name" => record.name = ScriptName::from(value),
        "category" => record.category = value.to_owned(),
        "filename" => record.filename = value.to_owned(),
        "info" => record.info = value.to_owned(),
        "notes" => record.notes = value.to_owned(),
        "priority" => record.priority = Priority::parse(value).map_err(CodecError::malformed)?,
        "os_requirements" => record.os_requirements = value.to_owned(),
        "script_contents" => record.script_contents = value.to_owned(),
        "script_contents_encoded" => record.script_contents_encoded = value.to_owned(),
        _ => {} // unknown metadata the server may add; not modelled
    }
    Ok(())
}

fn parameter_slot(element: &str) -> Option<u8> {
    let slot: u8 = element.strip_prefix("parameter")?.parse().ok()?;
    (FIRST_PARAMETER_SLOT..=LAST_PARAMETER_SLOT)
        .contains(&slot)
        .then_some(slot)
}

// ---------------------------------------------------------------------------
// Encode
// ---------------------------------------------------------------------------

/// Serialise a record back into its envelope form, canonical element order.
pub fn encode(record: &ScriptRecord) -> Result<String, CodecError> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Start(BytesStart::new(ROOT)))?;
    write_leaf(&mut writer, "id", &record.id.to_string())?;
    write_leaf(&mut writer, "name", &record.name.0)?;
    write_leaf(&mut writer, "category", &record.category)?;
    write_leaf(&mut writer, "filename", &record.filename)?;
    write_leaf(&mut writer, "info", &record.info)?;
    write_leaf(&mut writer, "notes", &record.notes)?;
    let priority = record.priority.map(|p| p.as_wire()).unwrap_or_default();
    write_leaf(&mut writer, "priority", priority)?;

    writer.write_event(Event::Start(BytesStart::new("parameters")))?;
    for parameter in &record.parameters {
        write_leaf(
            &mut writer,
            &format!("parameter{}", parameter.slot),
            &parameter.prompt,
        )?;
    }
    writer.write_event(Event::End(BytesEnd::new("parameters")))?;

    write_leaf(&mut writer, "os_requirements", &record.os_requirements)?;
    write_leaf(&mut writer, "script_contents", &record.script_contents)?;
    write_leaf(
        &mut writer,
        "script_contents_encoded",
        &record.script_contents_encoded,
    )?;
    writer.write_event(Event::End(BytesEnd::new(ROOT)))?;

    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

fn write_leaf(
    writer: &mut Writer<Vec<u8>>,
    element: &str,
    value: &str,
) -> Result<(), CodecError> {
    writer.write_event(Event::Start(BytesStart::new(element)))?;
    if !value.is_empty() {
        writer.write_event(Event::Text(BytesText::new(value)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(element)))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Body views
// ---------------------------------------------------------------------------

/// Replace the plain script body. Always clears the encoded field — an
/// upload carrying both corrupts the remote record.
pub fn inject_body(record: &mut ScriptRecord, body: &str) {
    record.script_contents = body.to_owned();
    record.script_contents_encoded = String::new();
}

/// The plain script body as stored in the envelope.
pub fn extract_body(record: &ScriptRecord) -> &str {
    &record.script_contents
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
