//! Word documents: OOXML (`.docx`) and legacy binary (`.doc`).

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use cvsift_core::{Error, Result};

use crate::process::run_capture;
use crate::registry::TextHandler;

const DOCUMENT_PART: &str = "word/document.xml";

static RUN_MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:tab\s*/>|<w:(?:br|cr)(?:\s[^>]*)?/>|</w:p>")
        .unwrap()
});

static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#x[0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").unwrap());

static HEADER_PART: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^word/header[0-9]*\.xml$").unwrap());

static FOOTER_PART: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^word/footer[0-9]*\.xml$").unwrap());

/// Read the text of an OOXML package: headers, then the body, then footers.
pub fn read_docx(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))
        .map_err(|e| Error::Acquisition(format!("{} is not an OOXML package: {}", path.display(), e)))?;

    let mut headers = Vec::new();
    let mut footers = Vec::new();
    for name in archive.file_names() {
        if HEADER_PART.is_match(name) {
            headers.push(name.to_string());
        } else if FOOTER_PART.is_match(name) {
            footers.push(name.to_string());
        }
    }
    headers.sort();
    footers.sort();

    let mut parts = headers;
    parts.push(DOCUMENT_PART.to_string());
    parts.extend(footers);

    let mut text = String::new();
    for part in &parts {
        let mut entry = archive
            .by_name(part)
            .map_err(|e| Error::Acquisition(format!("Missing {} in {}: {}", part, path.display(), e)))?;
        let mut xml = String::new();
        entry.read_to_string(&mut xml)?;
        text.push_str(&xml_to_text(&xml));
    }

    debug!("Read {} chars from {} package parts", text.len(), parts.len());
    Ok(text)
}

/// Flatten WordprocessingML into plain text.
pub fn xml_to_text(xml: &str) -> String {
    let mut out = String::with_capacity(xml.len() / 4);
    for caps in RUN_MARKUP.captures_iter(xml) {
        if let Some(run) = caps.get(1) {
            out.push_str(&decode_entities(run.as_str()));
            continue;
        }
        let tag = &caps[0];
        if tag.starts_with("<w:tab") {
            out.push('\t');
        } else {
            out.push('\n');
        }
    }
    out
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    ENTITY
        .replace_all(s, |caps: &regex::Captures| {
            let body = &caps[1];
            let decoded = match body {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => {
                    let code = if let Some(hex) = body.strip_prefix("#x") {
                        u32::from_str_radix(hex, 16).ok()
                    } else if let Some(dec) = body.strip_prefix('#') {
                        dec.parse().ok()
                    } else {
                        None
                    };
                    code.and_then(char::from_u32)
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

pub struct DocxHandler;

impl TextHandler for DocxHandler {
    fn name(&self) -> &'static str {
        "docx"
    }

    fn extensions(&self) -> &[&'static str] {
        &["docx"]
    }

    fn extract(&self, path: &Path) -> Result<String> {
        read_docx(path)
    }
}

/// `.doc` files: misnamed OOXML packages first, then the legacy converter.
pub struct LegacyDocHandler {
    converter: PathBuf,
}

impl LegacyDocHandler {
    pub fn new(converter: impl Into<PathBuf>) -> Self {
        Self {
            converter: converter.into(),
        }
    }
}

impl TextHandler for LegacyDocHandler {
    fn name(&self) -> &'static str {
        "doc"
    }

    fn extensions(&self) -> &[&'static str] {
        &["doc"]
    }

    fn extract(&self, path: &Path) -> Result<String> {
        match read_docx(path) {
            Ok(text) => Ok(text),
            Err(e) => {
                debug!("{} is not OOXML ({}), trying {}", path.display(), e, self.converter.display());
                run_capture(&self.converter, [path.as_os_str()])
            }
        }
    }
}
