//! OpenStep (old-style ASCII) property lists, the format of `project.pbxproj`.
//!
//! ```text
//! // !$*UTF8*$!
//! {
//! 	archiveVersion = 1;
//! 	objects = {
//! 		0123ABCD /* Foo.swift */ = {isa = PBXFileReference; path = Foo.swift; };
//! 	};
//! 	rootObject = 4567EF01 /* Project object */;
//! }
//! ```
//!
//! Comments are dropped on parse. Dictionary key order is preserved.

use std::fmt::Write;

use indexmap::IndexMap;
use thiserror::Error;
use winnow::{
    ascii::multispace1,
    combinator::{alt, cut_err, delimited, opt, preceded, repeat, terminated},
    error::{StrContext, StrContextValue},
    prelude::*,
    token::{any, take_till, take_until, take_while},
};

/// Header line Xcode writes before the root dictionary.
pub const UTF8_HEADER: &str = "// !$*UTF8*$!";

pub type Dict = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    Array(Vec<Value>),
    Dict(Dict),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Self::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn as_dict_mut(&mut self) -> Option<&mut Dict> {
        match self {
            Self::Dict(dict) => Some(dict),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlistError {
    #[error("syntax error: {0}")]
    Syntax(String),
}

/// Parse a whole document. The top level must be a dictionary.
pub fn parse(text: &str) -> Result<Dict, PlistError> {
    document
        .parse(text)
        .map_err(|e| PlistError::Syntax(e.to_string()))
}

fn document(input: &mut &str) -> ModalResult<Dict> {
    delimited(ws, dict, ws).parse_next(input)
}

fn value(input: &mut &str) -> ModalResult<Value> {
    alt((
        dict.map(Value::Dict),
        array.map(Value::Array),
        string.map(Value::String),
    ))
    .context(StrContext::Label("value"))
    .parse_next(input)
}

fn dict(input: &mut &str) -> ModalResult<Dict> {
    preceded(
        ('{', ws),
        cut_err(terminated(
            repeat(0.., entry).fold(Dict::new, |mut dict, (key, value)| {
                dict.insert(key, value);
                dict
            }),
            '}'.context(StrContext::Expected(StrContextValue::CharLiteral('}'))),
        )),
    )
    .parse_next(input)
}

fn entry(input: &mut &str) -> ModalResult<(String, Value)> {
    (
        terminated(string, (ws, '=', ws)),
        cut_err(terminated(
            value,
            (
                ws,
                ';'.context(StrContext::Expected(StrContextValue::CharLiteral(';'))),
                ws,
            ),
        )),
    )
        .parse_next(input)
}

fn array(input: &mut &str) -> ModalResult<Vec<Value>> {
    preceded(
        ('(', ws),
        cut_err(terminated(
            repeat(0.., terminated(value, (ws, opt(','), ws))),
            ')'.context(StrContext::Expected(StrContextValue::CharLiteral(')'))),
        )),
    )
    .parse_next(input)
}

fn string(input: &mut &str) -> ModalResult<String> {
    alt((quoted, unquoted)).parse_next(input)
}

fn unquoted(input: &mut &str) -> ModalResult<String> {
    take_while(1.., is_bare_char)
        .map(str::to_owned)
        .parse_next(input)
}

fn is_bare_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '/' | ':' | '.' | '-' | '+')
}

enum Fragment<'s> {
    Literal(&'s str),
    Escaped(char),
}

fn quoted(input: &mut &str) -> ModalResult<String> {
    preceded(
        '"',
        cut_err(terminated(
            repeat(0.., fragment).fold(String::new, |mut out, fragment| {
                match fragment {
                    Fragment::Literal(s) => out.push_str(s),
                    Fragment::Escaped(c) => out.push(c),
                }
                out
            }),
            '"',
        )),
    )
    .parse_next(input)
}

fn fragment<'s>(input: &mut &'s str) -> ModalResult<Fragment<'s>> {
    alt((
        take_till(1.., ['"', '\\']).map(Fragment::Literal),
        preceded('\\', escaped_char).map(Fragment::Escaped),
    ))
    .parse_next(input)
}

fn escaped_char(input: &mut &str) -> ModalResult<char> {
    alt((
        'n'.value('\n'),
        't'.value('\t'),
        'r'.value('\r'),
        preceded('U', take_while(4, |c: char| c.is_ascii_hexdigit()))
            .verify_map(|hex: &str| u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)),
        any,
    ))
    .parse_next(input)
}

/// Whitespace and comments.
fn ws(input: &mut &str) -> ModalResult<()> {
    repeat(0.., alt((multispace1.void(), block_comment, line_comment))).parse_next(input)
}

fn block_comment(input: &mut &str) -> ModalResult<()> {
    ("/*", take_until(0.., "*/"), "*/").void().parse_next(input)
}

fn line_comment(input: &mut &str) -> ModalResult<()> {
    ("//", take_till(0.., ['\n'])).void().parse_next(input)
}

// ── Writer ────────────────────────────────────────────────────────────────────

/// Serialize `root` the way Xcode lays out a project file: the `objects`
/// dictionary is split into one section per `isa`, and build files and file
/// references sit on a single line.
pub fn to_string(root: &Dict) -> String {
    let mut out = String::with_capacity(64 * 1024);
    out.push_str(UTF8_HEADER);
    out.push_str("\n{\n");
    for (key, value) in root {
        indent(&mut out, 1);
        write_string(&mut out, key);
        out.push_str(" = ");
        match (key.as_str(), value) {
            ("objects", Value::Dict(objects)) => write_objects(&mut out, objects),
            _ => write_value(&mut out, value, 1),
        }
        out.push_str(";\n");
    }
    out.push_str("}\n");
    out
}

fn write_objects(out: &mut String, objects: &Dict) {
    let mut sections: IndexMap<&str, Vec<(&String, &Value)>> = IndexMap::new();
    for (id, object) in objects {
        let isa = object
            .as_dict()
            .and_then(|o| o.get("isa"))
            .and_then(Value::as_str)
            .unwrap_or("");
        sections.entry(isa).or_default().push((id, object));
    }
    sections.sort_keys();

    out.push_str("{\n");
    for (isa, mut members) in sections {
        members.sort_by(|a, b| a.0.cmp(b.0));
        let _ = write!(out, "\n/* Begin {isa} section */\n");
        for (id, object) in members {
            indent(out, 2);
            write_string(out, id);
            out.push_str(" = ");
            if matches!(isa, "PBXBuildFile" | "PBXFileReference") {
                write_inline(out, object);
            } else {
                write_value(out, object, 2);
            }
            out.push_str(";\n");
        }
        let _ = writeln!(out, "/* End {isa} section */");
    }
    indent(out, 1);
    out.push('}');
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push_str("(\n");
            for item in items {
                indent(out, depth + 1);
                write_value(out, item, depth + 1);
                out.push_str(",\n");
            }
            indent(out, depth);
            out.push(')');
        }
        Value::Dict(dict) => {
            out.push_str("{\n");
            for (key, item) in dict {
                indent(out, depth + 1);
                write_string(out, key);
                out.push_str(" = ");
                write_value(out, item, depth + 1);
                out.push_str(";\n");
            }
            indent(out, depth);
            out.push('}');
        }
    }
}

fn write_inline(out: &mut String, value: &Value) {
    match value {
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push('(');
            for item in items {
                write_inline(out, item);
                out.push_str(", ");
            }
            out.push(')');
        }
        Value::Dict(dict) => {
            out.push('{');
            for (key, item) in dict {
                write_string(out, key);
                out.push_str(" = ");
                write_inline(out, item);
                out.push_str("; ");
            }
            out.push('}');
        }
    }
}

fn write_string(out: &mut String, s: &str) {
    let bare = !s.is_empty()
        && !s.contains("//")
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '/' | ':' | '.'));
    if bare {
        out.push_str(s);
        return;
    }

    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}
