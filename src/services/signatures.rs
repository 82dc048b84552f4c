//! Signature Registry
//!
//! Pure collection operations over the per-shop signature list: lenient
//! normalization of persisted shapes, deduplicated insertion, first-match
//! removal, and brand/kind filtering. Nothing here talks to the network;
//! the settings store and the wizard both build on these.

use serde_json::Value;

use crate::models::signature::{normalize_brand, normalize_text, SignatureItem, SignatureKind};
use crate::utils::error::{AppError, AppResult};

/// Longest accepted signature text
pub const MAX_SIGNATURE_LEN: usize = 300;

/// Lenient decode of a whole signature list. Legacy blobs mix bare strings
/// and objects; unusable entries are dropped and duplicates collapse to the
/// first occurrence.
pub fn normalize_list(raw: &Value) -> Vec<SignatureItem> {
    let Some(entries) = raw.as_array() else {
        return Vec::new();
    };
    let mut seen = std::collections::HashSet::new();
    let mut items = Vec::new();
    for entry in entries {
        let Some(item) = SignatureItem::from_value(entry) else {
            continue;
        };
        if seen.insert(item.dedup_key()) {
            items.push(item);
        }
    }
    items
}

/// Append a signature unless it is empty or already present.
///
/// Returns `Ok(true)` when appended, `Ok(false)` for the silent no-op cases
/// (empty text, duplicate key). Over-long text is a validation error.
pub fn add(items: &mut Vec<SignatureItem>, item: SignatureItem) -> AppResult<bool> {
    if item.text.is_empty() {
        return Ok(false);
    }
    if item.text.chars().count() > MAX_SIGNATURE_LEN {
        return Err(AppError::validation(format!(
            "signature text exceeds {} characters",
            MAX_SIGNATURE_LEN
        )));
    }
    let key = item.dedup_key();
    if items.iter().any(|existing| existing.dedup_key() == key) {
        return Ok(false);
    }
    items.push(item);
    Ok(true)
}

/// Remove the first item matching `text` and `brand` (case-insensitive,
/// whitespace-normalized). No match is a no-op returning `false`.
pub fn remove(items: &mut Vec<SignatureItem>, text: &str, brand: &str) -> bool {
    let text = normalize_text(text).to_lowercase();
    let brand = normalize_brand(brand).to_lowercase();
    let position = items.iter().position(|item| {
        normalize_text(&item.text).to_lowercase() == text
            && normalize_brand(&item.brand).to_lowercase() == brand
    });
    match position {
        Some(index) => {
            items.remove(index);
            true
        }
        None => false,
    }
}

/// Filter by brand scope. `"all"` passes the whole list through in order;
/// a specific brand returns exact matches only, with no inheritance from
/// "all"-brand signatures.
pub fn filter_by_brand(items: &[SignatureItem], brand: &str) -> Vec<SignatureItem> {
    let brand = normalize_brand(brand);
    if brand == "all" {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| normalize_brand(&item.brand) == brand)
        .cloned()
        .collect()
}

/// Filter by reply surface. `All` as the selector passes everything.
pub fn filter_by_kind(items: &[SignatureItem], kind: SignatureKind) -> Vec<SignatureItem> {
    if kind == SignatureKind::All {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| item.kind == kind)
        .cloned()
        .collect()
}

/// Rewrite signature brands to the canonical casing from the shop's brand
/// list. Unknown brands are kept as stored.
pub fn canonicalize_brands(items: &mut [SignatureItem], brands: &[String]) {
    let canonical: std::collections::HashMap<String, &String> =
        brands.iter().map(|b| (b.to_lowercase(), b)).collect();
    for item in items {
        let brand = normalize_brand(&item.brand);
        if brand == "all" {
            continue;
        }
        if let Some(canon) = canonical.get(&brand.to_lowercase()) {
            item.brand = (*canon).clone();
        }
    }
}

/// Normalize a raw brand list: trim, drop empties, dedup case-insensitively
/// keeping the first casing, sort case-insensitively.
pub fn normalize_brand_list(raw: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut brands = Vec::new();
    for brand in raw {
        let trimmed = brand.trim().to_string();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            brands.push(trimmed);
        }
    }
    brands.sort_by_key(|b| b.to_lowercase());
    brands
}
