//! HTML serialization

use super::{Document, NodeId};

const VOID_ELEMENTS: &[&str] = &["input", "br", "hr", "img", "meta", "link"];

pub(super) fn write_element(doc: &Document, id: NodeId, out: &mut String) {
    let Some(el) = doc.element(id) else {
        return;
    };

    out.push('<');
    out.push_str(&el.tag);
    if let Some(dom_id) = &el.id {
        write_attr(out, "id", dom_id);
    }
    if !el.classes.is_empty() {
        write_attr(out, "class", &el.classes.join(" "));
    }
    for (name, value) in &el.attributes {
        write_attr(out, name, value);
    }
    if let Some(input) = &el.input {
        if !input.value().is_empty() {
            write_attr(out, "value", input.value());
        }
        if input.checked() {
            out.push_str(" checked");
        }
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&el.tag.as_str()) {
        return;
    }

    escape_into(out, &el.text, false);
    for child in &el.children {
        write_element(doc, *child, out);
    }
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}

fn write_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    escape_into(out, value, true);
    out.push('"');
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}
