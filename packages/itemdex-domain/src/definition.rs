//! Sentinel values shared by the filter compiler and the assembler.

/// Body-of-knowledge code meaning "no body of knowledge assigned"; compiles to
/// an absent-or-empty condition instead of a terms match.
pub const NULL_BODY_OF_KNOWLEDGE_CODE: &str = "無學程";

pub const ON_SHELF_PRODUCT_STATUS: &str = "on_shelf";
pub const OFF_SHELF_PRODUCT_STATUS: &str = "off_shelf";

pub const ONLINE_READINESS_READY: &str = "ready";

/// Sort-field sentinel: ordering follows the caller-supplied id list, applied
/// by the assembler rather than the index.
pub const SORT_BY_INPUT_IDS: &str = "inputId";

/// Copyright facet labels and their stored codes.
pub const COPYRIGHT_CODES: &[(&str, &str)] =
	&[("無版權", "0"), ("有版權限制", "1"), ("版權是翰教科", "2"), ("待談版權", "3")];

/// Label-to-code lookup for request layers that accept the display label.
pub fn copyright_code(label: &str) -> Option<&'static str> {
	COPYRIGHT_CODES.iter().find(|(name, _)| *name == label).map(|(_, code)| *code)
}
