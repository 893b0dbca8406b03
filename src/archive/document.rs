//! The on-disk front-matter document format.
//!
//! A document is a five-key metadata block between `---` delimiter lines,
//! followed immediately by the post body. The format predates this tool and
//! archives written by earlier runs must keep parsing, so serialization is
//! byte-exact: title, date and link are double-quoted with `"` in values
//! escaped as `\"` and nothing else (deliberately not full YAML), while type
//! and id are bare. Quoted values are strictly one line each: embedded line
//! breaks are folded to spaces at render time, since the escaping has no way
//! to carry them and the parser reads line by line.

use anyhow::{bail, Context, Result};

/// Parsed metadata block of an archive document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: String,
    pub kind: String,
    pub date: String,
    pub id: String,
    pub link: String,
}

/// Everything needed to persist one post.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Filename stem; also the name of the sibling media directory.
    pub slug: String,
    pub title: String,
    pub kind: &'static str,
    pub date: String,
    pub id: String,
    pub link: String,
    pub body: String,
}

/// Serialize an entry to document text: metadata block, body, trailing newline.
#[must_use]
pub fn render_document(entry: &ArchiveEntry) -> String {
    let mut out = String::new();
    out.push_str("---\n");
    out.push_str(&format!("title: \"{}\"\n", escape(&entry.title)));
    out.push_str(&format!("type: {}\n", entry.kind));
    out.push_str(&format!("date: \"{}\"\n", escape(&entry.date)));
    out.push_str(&format!("id: {}\n", entry.id));
    out.push_str(&format!("link: \"{}\"\n", escape(&entry.link)));
    out.push_str("---\n");
    out.push_str(&entry.body);
    out.push('\n');
    out
}

/// Parse a document's metadata block.
///
/// Strict: both delimiters and all five keys must be present, anything else
/// is an error. The body is not returned; existing documents are only ever
/// read for their metadata.
///
/// # Errors
///
/// Returns an error for anything that does not look like a document this
/// tool (or its predecessors) wrote, including truncated files left behind
/// by an interrupted run.
pub fn parse_front_matter(text: &str) -> Result<FrontMatter> {
    let mut lines = text.lines();
    if lines.next() != Some("---") {
        bail!("document does not start with a front-matter delimiter");
    }

    let mut title = None;
    let mut kind = None;
    let mut date = None;
    let mut id = None;
    let mut link = None;
    let mut closed = false;

    for line in lines {
        if line == "---" {
            closed = true;
            break;
        }
        let (key, value) = line
            .split_once(": ")
            .with_context(|| format!("malformed front-matter line: {line}"))?;
        match key {
            "title" => title = Some(unquote(value)),
            "type" => kind = Some(value.to_string()),
            "date" => date = Some(unquote(value)),
            "id" => id = Some(value.to_string()),
            "link" => link = Some(unquote(value)),
            _ => bail!("unknown front-matter key: {key}"),
        }
    }

    if !closed {
        bail!("front-matter block is never closed");
    }

    Ok(FrontMatter {
        title: title.context("front matter is missing the title field")?,
        kind: kind.context("front matter is missing the type field")?,
        date: date.context("front matter is missing the date field")?,
        id: id.context("front matter is missing the id field")?,
        link: link.context("front matter is missing the link field")?,
    })
}

/// Make a value safe for one quoted front-matter line: line breaks fold to
/// spaces, `"` becomes `\"`. Quote text and captions arrive with embedded
/// newlines, and the parser reads one line per key.
fn escape(value: &str) -> String {
    value
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .replace('"', "\\\"")
}

/// Strip surrounding double quotes and unescape embedded `\"`.
fn unquote(value: &str) -> String {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    inner.replace("\\\"", "\"")
}
