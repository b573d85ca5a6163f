use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use crate::error::{NodeError, Result};

/// A named node parameter. Wire names follow the node's form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    SpaceId,
    DatasheetId,
    ViewId,
    RecordIds,
    RecordsBody,
    FieldType,
    FieldName,
    FieldProperties,
    FieldId,
}

impl Param {
    pub fn name(&self) -> &'static str {
        match self {
            Param::SpaceId => "spaceId",
            Param::DatasheetId => "DatasheetID",
            Param::ViewId => "ViewID",
            Param::RecordIds => "recordId",
            Param::RecordsBody => "records_body",
            Param::FieldType => "fieldType",
            Param::FieldName => "fieldName",
            Param::FieldProperties => "fieldProperties",
            Param::FieldId => "fieldId",
        }
    }

    /// Parameter behind a `{placeholder}` in a route template.
    pub fn from_placeholder(placeholder: &str) -> Option<Param> {
        match placeholder {
            "spaceId" => Some(Param::SpaceId),
            "datasheetId" => Some(Param::DatasheetId),
            "viewId" => Some(Param::ViewId),
            "recordId" => Some(Param::RecordIds),
            "fieldId" => Some(Param::FieldId),
            _ => None,
        }
    }
}

/// 单条输入的参数 (per-item parameters)
///
/// Every field is optional here; which ones are required depends on the
/// operation and is checked when the request for the item is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemParameters {
    #[serde(rename = "spaceId", default, deserialize_with = "string_like", skip_serializing_if = "Option::is_none")]
    pub space_id: Option<String>,

    #[serde(rename = "DatasheetID", alias = "datasheetId", default, deserialize_with = "string_like", skip_serializing_if = "Option::is_none")]
    pub datasheet_id: Option<String>,

    #[serde(rename = "ViewID", alias = "viewId", default, deserialize_with = "string_like", skip_serializing_if = "Option::is_none")]
    pub view_id: Option<String>,

    /// Comma separated record ids.
    #[serde(rename = "recordId", alias = "recordIds", default, deserialize_with = "string_like", skip_serializing_if = "Option::is_none")]
    pub record_ids: Option<String>,

    /// Either a JSON value or a string holding JSON.
    #[serde(rename = "records_body", alias = "recordsBody", default, skip_serializing_if = "Option::is_none")]
    pub records_body: Option<Value>,

    #[serde(rename = "fieldType", default, deserialize_with = "string_like", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,

    #[serde(rename = "fieldName", default, deserialize_with = "string_like", skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,

    /// Either a JSON value or a string holding JSON.
    #[serde(rename = "fieldProperties", default, skip_serializing_if = "Option::is_none")]
    pub field_properties: Option<Value>,

    #[serde(rename = "fieldId", default, deserialize_with = "string_like", skip_serializing_if = "Option::is_none")]
    pub field_id: Option<String>,
}

impl ItemParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn space_id(mut self, v: impl Into<String>) -> Self {
        self.space_id = Some(v.into());
        self
    }

    pub fn datasheet_id(mut self, v: impl Into<String>) -> Self {
        self.datasheet_id = Some(v.into());
        self
    }

    pub fn view_id(mut self, v: impl Into<String>) -> Self {
        self.view_id = Some(v.into());
        self
    }

    pub fn record_ids(mut self, v: impl Into<String>) -> Self {
        self.record_ids = Some(v.into());
        self
    }

    pub fn records_body(mut self, v: impl Into<Value>) -> Self {
        self.records_body = Some(v.into());
        self
    }

    pub fn field_type(mut self, v: impl Into<String>) -> Self {
        self.field_type = Some(v.into());
        self
    }

    pub fn field_name(mut self, v: impl Into<String>) -> Self {
        self.field_name = Some(v.into());
        self
    }

    pub fn field_properties(mut self, v: impl Into<Value>) -> Self {
        self.field_properties = Some(v.into());
        self
    }

    pub fn field_id(mut self, v: impl Into<String>) -> Self {
        self.field_id = Some(v.into());
        self
    }

    /// Raw text of a string parameter, `None` for JSON parameters.
    pub fn text(&self, param: Param) -> Option<&str> {
        let v = match param {
            Param::SpaceId => &self.space_id,
            Param::DatasheetId => &self.datasheet_id,
            Param::ViewId => &self.view_id,
            Param::RecordIds => &self.record_ids,
            Param::FieldType => &self.field_type,
            Param::FieldName => &self.field_name,
            Param::FieldId => &self.field_id,
            Param::RecordsBody | Param::FieldProperties => return None,
        };
        v.as_deref()
    }

    /// Trimmed value of a required string parameter.
    pub fn require(&self, param: Param, item: usize) -> Result<&str> {
        self.text(param)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(NodeError::MissingParameter { name: param.name(), item })
    }

    /// `records_body` as JSON. Strings are parsed; blank strings count as absent.
    pub fn records_body_json(&self, item: usize) -> Result<Option<Value>> {
        parse_json(&self.records_body, Param::RecordsBody, item)
    }

    /// `fieldProperties` as JSON, same rules as [`Self::records_body_json`].
    pub fn field_properties_json(&self, item: usize) -> Result<Option<Value>> {
        parse_json(&self.field_properties, Param::FieldProperties, item)
    }
}

fn parse_json(raw: &Option<Value>, param: Param, item: usize) -> Result<Option<Value>> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => serde_json::from_str(s)
            .map(Some)
            .map_err(|source| NodeError::InvalidJson { name: param.name(), item, source }),
        Some(v) => Ok(Some(v.clone())),
    }
}

/// Accepts strings, numbers and booleans; YAML happily turns ids like
/// `123` into integers.
fn string_like<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string, found {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_form_field_names_and_aliases() {
        let params: ItemParameters = serde_json::from_value(json!({
            "spaceId": "spc1",
            "datasheetId": "dst1",
            "ViewID": "viw1",
            "recordId": 42,
            "records_body": "{\"records\": []}"
        }))
        .unwrap();

        assert_eq!(params.space_id.as_deref(), Some("spc1"));
        assert_eq!(params.datasheet_id.as_deref(), Some("dst1"));
        assert_eq!(params.view_id.as_deref(), Some("viw1"));
        assert_eq!(params.record_ids.as_deref(), Some("42"));
        assert_eq!(params.records_body_json(0).unwrap(), Some(json!({"records": []})));
    }

    #[test]
    fn blank_required_parameter_is_missing() {
        let params = ItemParameters::new().datasheet_id("   ");
        let err = params.require(Param::DatasheetId, 3).unwrap_err();
        assert!(matches!(err, NodeError::MissingParameter { name: "DatasheetID", item: 3 }));
    }

    #[test]
    fn malformed_json_string_is_rejected() {
        let params = ItemParameters::new().field_properties("{not json");
        let err = params.field_properties_json(0).unwrap_err();
        assert!(matches!(err, NodeError::InvalidJson { name: "fieldProperties", .. }));
    }

    #[test]
    fn blank_json_string_is_absent() {
        let params = ItemParameters::new().field_properties("  ");
        assert_eq!(params.field_properties_json(0).unwrap(), None);
    }
}
