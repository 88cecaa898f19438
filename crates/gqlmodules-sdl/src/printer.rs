//! Deterministic SDL rendering.
//!
//! Fragments are printed in a normalized layout (two-space indentation,
//! arguments inline, single-line block-string descriptions with a quoted
//! string fallback) so that a merged document is byte-for-byte reproducible
//! for the same set of declarations and parses back to the same fragments.

use std::fmt::{self, Write};

use crate::fragment::{FieldDefinition, Fragment, FragmentBody, InputValue};

/// Renders fragments as one SDL document, separated by blank lines.
pub fn print_document<'a>(fragments: impl IntoIterator<Item = &'a Fragment>) -> String {
    let mut document = String::new();
    for fragment in fragments {
        if !document.is_empty() {
            document.push('\n');
        }
        let _ = writeln!(document, "{fragment}");
    }
    document
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_description(f, self.description.as_deref(), "")?;

        match &self.body {
            FragmentBody::Scalar => write!(f, "scalar {}", self.name),
            FragmentBody::Object(fields) => {
                write!(f, "type {}", self.name)?;
                if fields.is_empty() {
                    return Ok(());
                }
                f.write_str(" {\n")?;
                for field in fields {
                    write_field(f, field)?;
                }
                f.write_str("}")
            }
            FragmentBody::InputObject(fields) => {
                write!(f, "input {}", self.name)?;
                if fields.is_empty() {
                    return Ok(());
                }
                f.write_str(" {\n")?;
                for field in fields {
                    write_description(f, field.description.as_deref(), "  ")?;
                    f.write_str("  ")?;
                    write_input_value(f, field)?;
                    f.write_str("\n")?;
                }
                f.write_str("}")
            }
            FragmentBody::Enum(values) => {
                write!(f, "enum {}", self.name)?;
                if values.is_empty() {
                    return Ok(());
                }
                f.write_str(" {\n")?;
                for value in values {
                    write_description(f, value.description.as_deref(), "  ")?;
                    writeln!(f, "  {}", value.name)?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_field(f: &mut fmt::Formatter<'_>, field: &FieldDefinition) -> fmt::Result {
    write_description(f, field.description.as_deref(), "  ")?;
    write!(f, "  {}", field.name)?;
    if !field.arguments.is_empty() {
        f.write_str("(")?;
        for (idx, argument) in field.arguments.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write_input_value(f, argument)?;
        }
        f.write_str(")")?;
    }
    writeln!(f, ": {}", field.ty)
}

fn write_input_value(f: &mut fmt::Formatter<'_>, value: &InputValue) -> fmt::Result {
    write!(f, "{}: {}", value.name, value.ty)?;
    if let Some(default) = &value.default_value {
        write!(f, " = {default}")?;
    }
    Ok(())
}

fn write_description(
    f: &mut fmt::Formatter<'_>,
    description: Option<&str>,
    indent: &str,
) -> fmt::Result {
    let Some(description) = description else {
        return Ok(());
    };

    if is_block_safe(description) {
        writeln!(f, "{indent}\"\"\"{description}\"\"\"")
    } else {
        f.write_str(indent)?;
        write_quoted(f, description)?;
        f.write_str("\n")
    }
}

/// Whether `text` survives a single-line block string unchanged.
///
/// Block strings are raw but dedented and trimmed of blank lines, and a
/// trailing quote would merge with the closing delimiter.
fn is_block_safe(text: &str) -> bool {
    !text.is_empty()
        && text.trim() == text
        && !text.contains(['\n', '\r'])
        && !text.contains("\"\"\"")
        && !text.ends_with('"')
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in text.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() => write!(f, "\\u{:04X}", u32::from(c))?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}
