//! Request and response shapes for the ArkTS language server HTTP binding.
//!
//! Requests serialize to the exact bodies the server expects. Responses are
//! kept as the raw JSON the server sent; typed views are read from it entry
//! by entry, so one oddly shaped field never hides the rest of a reply.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A zero-based cursor position inside a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub uri: String,
    pub line: u32,
    pub character: u32,
}

impl Position {
    /// Builds the position for a filesystem path. The path is prefixed with
    /// `file://` verbatim; no URL escaping is applied.
    pub fn for_file(path: &str, line: u32, character: u32) -> Self {
        Self {
            uri: format!("file://{}", path),
            line,
            character,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionRequest {
    #[serde(flatten)]
    pub position: Position,
}

impl DefinitionRequest {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencesRequest {
    #[serde(flatten)]
    pub position: Position,
    pub include_declaration: bool,
}

impl ReferencesRequest {
    /// Declarations are included unless the caller opts out.
    pub fn new(position: Position) -> Self {
        Self {
            position,
            include_declaration: true,
        }
    }

    pub fn include_declaration(mut self, include: bool) -> Self {
        self.include_declaration = include;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureRequest {
    #[serde(flatten)]
    pub position: Position,
}

impl SignatureRequest {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

/// One location returned by `/definition` or `/references`.
///
/// Built per entry from the raw reply; a field that is missing or has the
/// wrong type reads as `None` instead of rejecting the entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationResult {
    pub uri: Option<String>,
    /// Opaque region; typically `{start: {line, character}, end: {...}}`.
    pub range: Option<Value>,
}

impl LocationResult {
    fn from_entry(entry: &Value) -> Self {
        Self {
            uri: entry.get("uri").and_then(Value::as_str).map(str::to_string),
            range: entry.get("range").cloned(),
        }
    }
}

/// Body of a locations reply, kept exactly as the server sent it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Locations(Value);

impl Locations {
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// One entry per list element; empty for null or non-list bodies.
    pub fn items(&self) -> Vec<LocationResult> {
        self.0
            .as_array()
            .map(|list| list.iter().map(LocationResult::from_entry).collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.as_array().map_or(true, Vec::is_empty)
    }

    pub fn to_value(&self) -> Value {
        self.0.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignatureInfo {
    pub label: Option<String>,
    /// Either a plain string or a `{kind, value}` markup object.
    pub documentation: Option<Value>,
    pub parameters: Vec<Value>,
}

impl SignatureInfo {
    fn from_entry(entry: &Value) -> Self {
        Self {
            label: entry.get("label").and_then(Value::as_str).map(str::to_string),
            documentation: entry.get("documentation").filter(|d| !d.is_null()).cloned(),
            parameters: entry
                .get("parameters")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
        }
    }

    pub fn documentation_text(&self) -> Option<&str> {
        let text = match self.documentation.as_ref()? {
            Value::String(s) => s.as_str(),
            Value::Object(obj) => obj.get("value").and_then(|v| v.as_str())?,
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }
}

/// Body of a `/signature` reply, kept exactly as the server sent it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SignatureReply(Value);

impl SignatureReply {
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Entries of the `signatures` list; empty when the body is not a
    /// mapping or the field is absent or not a list.
    pub fn signatures(&self) -> Vec<SignatureInfo> {
        self.0
            .get("signatures")
            .and_then(Value::as_array)
            .map(|list| list.iter().map(SignatureInfo::from_entry).collect())
            .unwrap_or_default()
    }

    pub fn to_value(&self) -> Value {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn position_uri_is_not_escaped() {
        let pos = Position::for_file("/tmp/my dir/Index.ets", 3, 7);
        assert_eq!(pos.uri, "file:///tmp/my dir/Index.ets");
    }

    #[test]
    fn references_request_always_sends_include_declaration() {
        let pos = Position::for_file("/a.ets", 1, 2);
        let body = serde_json::to_value(ReferencesRequest::new(pos.clone())).unwrap();
        assert_eq!(
            body,
            json!({"uri": "file:///a.ets", "line": 1, "character": 2, "includeDeclaration": true})
        );

        let body =
            serde_json::to_value(ReferencesRequest::new(pos).include_declaration(false)).unwrap();
        assert_eq!(body["includeDeclaration"], json!(false));
    }

    #[test]
    fn definition_request_has_no_extra_fields() {
        let body =
            serde_json::to_value(DefinitionRequest::new(Position::for_file("/a.ets", 0, 0)))
                .unwrap();
        assert_eq!(
            body,
            json!({"uri": "file:///a.ets", "line": 0, "character": 0})
        );
    }

    #[test]
    fn locations_keep_the_body_untouched() {
        let raw = json!([
            {"uri": "file:///a.ets"},
            {"uri": null, "range": {"start": {"line": 1}}, "originSelectionRange": null}
        ]);
        let locations = Locations::from_value(raw.clone());
        assert_eq!(locations.to_value(), raw);
        assert_eq!(locations.items().len(), 2);
    }

    #[test]
    fn odd_location_entries_do_not_hide_the_rest() {
        let locations = Locations::from_value(json!([
            {"uri": "file:///a.ets", "range": {}},
            {"uri": 7, "range": {}},
            3
        ]));
        let items = locations.items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].uri.as_deref(), Some("file:///a.ets"));
        assert_eq!(items[1].uri, None);
        assert_eq!(items[1].range, Some(json!({})));
        assert_eq!(items[2], LocationResult { uri: None, range: None });
    }

    #[test]
    fn non_list_locations_are_empty_not_errors() {
        for raw in [json!(null), json!({}), json!(42)] {
            let locations = Locations::from_value(raw.clone());
            assert!(locations.is_empty(), "{raw} should have no items");
            assert!(locations.items().is_empty());
            assert_eq!(locations.to_value(), raw);
        }
    }

    #[test]
    fn signature_reply_tolerates_missing_signatures() {
        assert!(SignatureReply::from_value(json!({})).signatures().is_empty());
        assert!(SignatureReply::from_value(json!({"signatures": null}))
            .signatures()
            .is_empty());
        assert!(SignatureReply::from_value(json!([1])).signatures().is_empty());
        assert!(SignatureReply::from_value(json!({"signatures": "oops"}))
            .signatures()
            .is_empty());
    }

    #[test]
    fn odd_signature_fields_keep_the_signature() {
        let raw = json!({
            "signatures": [
                {"label": "a()"},
                {"label": null, "parameters": null},
                {"label": "c(x)", "parameters": {"x": 1}}
            ]
        });
        let reply = SignatureReply::from_value(raw.clone());
        let sigs = reply.signatures();
        assert_eq!(sigs.len(), 3);
        assert_eq!(sigs[1].label, None);
        assert_eq!(sigs[2].label.as_deref(), Some("c(x)"));
        assert_eq!(sigs[2].parameter_count(), 0);
        assert_eq!(reply.to_value(), raw);
    }

    #[test]
    fn signature_documentation_accepts_markup() {
        let reply = SignatureReply::from_value(json!({
            "signatures": [
                {"label": "add(a: number, b: number): number",
                 "documentation": {"kind": "markdown", "value": "Adds two numbers"},
                 "parameters": [{"label": "a"}, {"label": "b"}]},
                {"label": "noop()", "documentation": ""}
            ]
        }));
        let sigs = reply.signatures();
        assert_eq!(sigs.len(), 2);
        assert_eq!(sigs[0].documentation_text(), Some("Adds two numbers"));
        assert_eq!(sigs[0].parameter_count(), 2);
        assert_eq!(sigs[1].documentation_text(), None);
        assert_eq!(sigs[1].parameter_count(), 0);
    }
}
