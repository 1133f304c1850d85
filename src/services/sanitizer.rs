// src/services/sanitizer.rs

//! PDF link sanitization.
//!
//! Removes clickable regions from a PDF before it is redistributed: `Link`
//! annotations are dropped, and every other annotation loses its `A`, `AA`
//! and `Dest` entries. Page content streams are never touched, so URLs printed
//! as text stay visible but are no longer clickable.

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::Result;

const ACTION_KEYS: [&[u8]; 3] = [b"A", b"AA", b"Dest"];

/// Per-document sanitization counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    pub pages_touched: usize,
    pub links_removed: usize,
    pub actions_removed: usize,
    pub malformed_skipped: usize,
}

impl SanitizeReport {
    pub fn is_unchanged(&self) -> bool {
        self.pages_touched == 0
    }
}

/// Service stripping interactive link metadata from PDF documents.
#[derive(Debug, Clone, Default)]
pub struct DocumentSanitizer;

impl DocumentSanitizer {
    pub fn new() -> Self {
        Self
    }

    /// Sanitize a PDF and return the new bytes.
    ///
    /// A document without any annotations is returned byte-for-byte.
    pub fn sanitize(&self, pdf_bytes: &[u8]) -> Result<Vec<u8>> {
        self.sanitize_with_report(pdf_bytes).map(|(bytes, _)| bytes)
    }

    /// Sanitize a PDF, also returning what was removed.
    pub fn sanitize_with_report(&self, pdf_bytes: &[u8]) -> Result<(Vec<u8>, SanitizeReport)> {
        let mut doc = Document::load_mem(pdf_bytes)?;
        let report = self.sanitize_document(&mut doc)?;

        if report.is_unchanged() {
            return Ok((pdf_bytes.to_vec(), report));
        }

        log::debug!(
            "Sanitized PDF: {} pages, {} links removed, {} actions removed, {} malformed skipped",
            report.pages_touched,
            report.links_removed,
            report.actions_removed,
            report.malformed_skipped
        );

        let mut out = Vec::with_capacity(pdf_bytes.len());
        doc.save_to(&mut out)?;
        Ok((out, report))
    }

    /// Rewrite the annotation list of every page in place.
    pub fn sanitize_document(&self, doc: &mut Document) -> Result<SanitizeReport> {
        let mut report = SanitizeReport::default();
        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();

        for page_id in page_ids {
            let Some(annots) = page_annotations(doc, page_id) else {
                continue;
            };
            if annots.is_empty() {
                continue;
            }

            let mut kept = Vec::with_capacity(annots.len());
            for entry in annots {
                if let Some(annot) = sanitize_annotation(doc, entry, &mut report) {
                    kept.push(annot);
                }
            }

            let page = doc.get_dictionary_mut(page_id)?;
            if kept.is_empty() {
                page.remove(b"Annots");
            } else {
                page.set("Annots", Object::Array(kept));
            }
            report.pages_touched += 1;
        }

        Ok(report)
    }
}

/// The page's annotation array, resolving one level of indirection.
fn page_annotations(doc: &Document, page_id: ObjectId) -> Option<Vec<Object>> {
    let page = match doc.get_dictionary(page_id) {
        Ok(page) => page,
        Err(e) => {
            log::warn!("Skipping unreadable page {:?}: {}", page_id, e);
            return None;
        }
    };

    match page.get(b"Annots").ok()? {
        Object::Array(items) => Some(items.clone()),
        Object::Reference(id) => match doc.get_object(*id).and_then(Object::as_array) {
            Ok(items) => Some(items.clone()),
            Err(e) => {
                log::warn!("Page {:?} has an unreadable Annots array: {}", page_id, e);
                None
            }
        },
        other => {
            log::warn!(
                "Page {:?} has Annots of unexpected type {}",
                page_id,
                other.type_name().unwrap_or("unknown")
            );
            None
        }
    }
}

/// Strip actions from one annotation; `None` means drop it.
fn sanitize_annotation(
    doc: &mut Document,
    entry: Object,
    report: &mut SanitizeReport,
) -> Option<Object> {
    match entry {
        Object::Reference(id) => {
            let dict = match doc.get_object_mut(id).and_then(Object::as_dict_mut) {
                Ok(dict) => dict,
                Err(e) => {
                    log::warn!("Skipping malformed annotation {:?}: {}", id, e);
                    report.malformed_skipped += 1;
                    return None;
                }
            };
            strip_actions(dict, report);
            if is_link(dict) {
                report.links_removed += 1;
                return None;
            }
            Some(Object::Reference(id))
        }
        Object::Dictionary(mut dict) => {
            strip_actions(&mut dict, report);
            if is_link(&dict) {
                report.links_removed += 1;
                return None;
            }
            Some(Object::Dictionary(dict))
        }
        other => {
            log::warn!(
                "Skipping annotation of type {}",
                other.type_name().unwrap_or("unknown")
            );
            report.malformed_skipped += 1;
            None
        }
    }
}

fn strip_actions(dict: &mut Dictionary, report: &mut SanitizeReport) {
    for key in ACTION_KEYS {
        if dict.remove(key).is_some() {
            report.actions_removed += 1;
        }
    }
}

fn is_link(dict: &Dictionary) -> bool {
    matches!(dict.get(b"Subtype"), Ok(Object::Name(name)) if name.as_slice() == b"Link")
}
