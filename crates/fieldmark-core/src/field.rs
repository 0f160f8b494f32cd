//! Field records and partial updates.
//!
//! A [`Field`] is one placed annotation region on a document page. Positions
//! and sizes are percentages of the unscaled page, so a template renders the
//! same regardless of the viewer's resolution or zoom.

use serde::{Deserialize, Serialize};

/// Default position for a newly added field (percent of page).
pub const DEFAULT_POSITION: (f64, f64) = (40.0, 70.0);
/// Default width for a newly added field (percent of page width).
pub const DEFAULT_WIDTH: f64 = 24.0;
/// Default height for a newly added field (percent of page height).
pub const DEFAULT_HEIGHT: f64 = 12.0;

/// Kind of annotation a field collects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Signature,
    Initials,
    Date,
    Text,
}

impl FieldKind {
    /// Every kind, in toolbar order.
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Signature,
        FieldKind::Initials,
        FieldKind::Date,
        FieldKind::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Signature => "signature",
            FieldKind::Initials => "initials",
            FieldKind::Date => "date",
            FieldKind::Text => "text",
        }
    }

    /// Parse the snake_case wire form; unknown kinds fall back to text.
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "signature" => FieldKind::Signature,
            "initials" => FieldKind::Initials,
            "date" => FieldKind::Date,
            _ => FieldKind::Text,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FieldKind::Signature => "Signature",
            FieldKind::Initials => "Initials",
            FieldKind::Date => "Date",
            FieldKind::Text => "Text",
        }
    }

    /// Label seeded onto a newly added field of this kind.
    pub fn default_label(&self) -> &'static str {
        match self {
            FieldKind::Date => "Execution Date",
            _ => "Executive Signature",
        }
    }
}

/// One placed annotation region.
///
/// `x`/`y` are the top-left corner and `width`/`height` the extent, all in
/// percent of page width/height. The canonical copy lives in the backing
/// store; in-memory copies are working caches kept in sync by optimistic
/// writes and refetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Field {
    /// Opaque identifier assigned by the backing store at creation.
    pub id: String,
    pub kind: FieldKind,
    /// Free-text signer role (e.g. "executive", "witness"). Display and
    /// grouping only, never validated against an enum.
    pub signer_role: String,
    /// 1-based page index the field is anchored to.
    pub page: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: Option<String>,
    /// Whether the signer must complete this field downstream. Not enforced
    /// by the editor.
    pub required: bool,
}

impl Field {
    /// Text shown inside the rendered chip: the label if present, otherwise
    /// a generated `KIND (role)` string.
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(label) if !label.is_empty() => label.clone(),
            _ => format!(
                "{} ({})",
                self.kind.as_str().to_uppercase(),
                self.signer_role
            ),
        }
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Partial update applied to a [`Field`].
///
/// Drag commits carry only `x`/`y`; property-panel edits carry whichever
/// attribute changed. Absent attributes are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FieldPatch {
    pub kind: Option<FieldKind>,
    pub signer_role: Option<String>,
    pub page: Option<u32>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    /// `Some(None)` clears the label, `None` leaves it alone.
    pub label: Option<Option<String>>,
    pub required: Option<bool>,
}

impl FieldPatch {
    /// Position-only patch, as issued at the end of a drag.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Replace only the attributes present in the patch.
    pub fn apply(&self, field: &mut Field) {
        if let Some(kind) = self.kind {
            field.kind = kind;
        }
        if let Some(role) = &self.signer_role {
            field.signer_role = role.clone();
        }
        if let Some(page) = self.page {
            field.page = page.max(1);
        }
        if let Some(x) = self.x {
            field.x = x;
        }
        if let Some(y) = self.y {
            field.y = y;
        }
        if let Some(width) = self.width {
            field.width = width;
        }
        if let Some(height) = self.height {
            field.height = height;
        }
        if let Some(label) = &self.label {
            field.label = label.clone();
        }
        if let Some(required) = self.required {
            field.required = required;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_field() -> Field {
        Field {
            id: "f-1".to_string(),
            kind: FieldKind::Signature,
            signer_role: "executive".to_string(),
            page: 1,
            x: 40.0,
            y: 70.0,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            label: None,
            required: true,
        }
    }

    #[test]
    fn test_new_field_default_labels() {
        assert_eq!(FieldKind::Date.default_label(), "Execution Date");
        for kind in [FieldKind::Signature, FieldKind::Initials, FieldKind::Text] {
            assert_eq!(kind.default_label(), "Executive Signature");
        }
    }

    #[test]
    fn test_kind_json_wire_form() {
        let field = sample_field();
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["kind"], "signature");
        assert_eq!(json["page"], 1);

        let back: Field = serde_json::from_value(json).unwrap();
        assert_eq!(back, field);
    }

    #[test]
    fn test_display_label_fallback() {
        let mut field = sample_field();
        assert_eq!(field.display_label(), "SIGNATURE (executive)");

        field.label = Some("Executive Signature".to_string());
        assert_eq!(field.display_label(), "Executive Signature");

        // Empty label also falls back to the generated form
        field.label = Some(String::new());
        assert_eq!(field.display_label(), "SIGNATURE (executive)");
    }

    #[test]
    fn test_patch_applies_only_present_attributes() {
        let mut field = sample_field();
        let patch = FieldPatch {
            x: Some(12.5),
            label: Some(Some("Witness".to_string())),
            ..FieldPatch::default()
        };
        patch.apply(&mut field);

        assert_eq!(field.x, 12.5);
        assert_eq!(field.y, 70.0);
        assert_eq!(field.label.as_deref(), Some("Witness"));
        assert_eq!(field.kind, FieldKind::Signature);
    }

    #[test]
    fn test_patch_clears_label() {
        let mut field = sample_field();
        field.label = Some("old".to_string());
        let patch = FieldPatch {
            label: Some(None),
            ..FieldPatch::default()
        };
        patch.apply(&mut field);
        assert_eq!(field.label, None);
    }

    #[test]
    fn test_patch_keeps_page_at_least_one() {
        let mut field = sample_field();
        let patch = FieldPatch {
            page: Some(0),
            ..FieldPatch::default()
        };
        patch.apply(&mut field);
        assert_eq!(field.page, 1);
    }

    #[test]
    fn test_position_patch_is_not_empty() {
        assert!(FieldPatch::default().is_empty());
        assert!(!FieldPatch::position(1.0, 2.0).is_empty());
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            FieldKind::Signature,
            FieldKind::Initials,
            FieldKind::Date,
            FieldKind::Text,
        ] {
            assert_eq!(FieldKind::from_str_lossy(kind.as_str()), kind);
        }
        assert_eq!(FieldKind::from_str_lossy("checkbox"), FieldKind::Text);
    }
}
