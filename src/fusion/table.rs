//! Dispatch table: one [`Route`] per [`Operation`].
//!
//! The match in [`route`] is exhaustive, so adding an operation without a
//! route does not compile.

use serde::Serialize;
use serde_json::{Map, Value, json};
use crate::error::{NodeError, Result};
use crate::fusion::Operation;
use crate::fusion::params::{ItemParameters, Param};
use crate::fusion::request::{HttpMethod, RequestDescriptor};

/// Where the JSON body of a request comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyShape {
    None,
    /// `records_body`, objects as-is and arrays wrapped as `{"records": [...]}`.
    Records,
    /// `{type, name, property}` assembled from the field parameters.
    FieldDefinition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub method: HttpMethod,
    /// Path and query template. `{placeholder}` pieces are filled from the
    /// item's parameters, everything else is sent verbatim.
    pub path: &'static str,
    pub required: &'static [Param],
    pub body: BodyShape,
}

pub fn route(operation: Operation) -> Route {
    use Param::*;

    match operation {
        Operation::ListSpaces => Route {
            method: HttpMethod::Get,
            path: "/fusion/v1/spaces",
            required: &[],
            body: BodyShape::None,
        },
        Operation::SearchNodes => Route {
            method: HttpMethod::Get,
            path: "/fusion/v2/spaces/{spaceId}/nodes?type=Datasheet&permissions=0,1",
            required: &[SpaceId],
            body: BodyShape::None,
        },
        Operation::GetViews => Route {
            method: HttpMethod::Get,
            path: "/fusion/v1/datasheets/{datasheetId}/views",
            required: &[DatasheetId],
            body: BodyShape::None,
        },
        Operation::GetFields => Route {
            method: HttpMethod::Get,
            path: "/fusion/v1/datasheets/{datasheetId}/fields",
            required: &[DatasheetId],
            body: BodyShape::None,
        },
        Operation::CreateField => Route {
            method: HttpMethod::Post,
            path: "/fusion/v1/spaces/{spaceId}/datasheets/{datasheetId}/fields",
            required: &[SpaceId, DatasheetId, FieldType, FieldName],
            body: BodyShape::FieldDefinition,
        },
        Operation::DeleteField => Route {
            method: HttpMethod::Delete,
            path: "/fusion/v1/spaces/{spaceId}/datasheets/{datasheetId}/fields/{fieldId}",
            required: &[SpaceId, DatasheetId, FieldId],
            body: BodyShape::None,
        },
        Operation::GetRecords => Route {
            method: HttpMethod::Get,
            path: "/fusion/v1/datasheets/{datasheetId}/records?viewId={viewId}",
            required: &[DatasheetId, ViewId],
            body: BodyShape::None,
        },
        Operation::CreateRecord => Route {
            method: HttpMethod::Post,
            path: "/fusion/v1/datasheets/{datasheetId}/records",
            required: &[DatasheetId, RecordsBody],
            body: BodyShape::Records,
        },
        Operation::UpdateRecord => Route {
            method: HttpMethod::Patch,
            path: "/fusion/v1/datasheets/{datasheetId}/records",
            required: &[DatasheetId, RecordsBody],
            body: BodyShape::Records,
        },
        Operation::DeleteRecord => Route {
            method: HttpMethod::Delete,
            path: "/fusion/v1/datasheets/{datasheetId}/records?recordIds={recordId}",
            required: &[DatasheetId, RecordIds],
            body: BodyShape::None,
        },
    }
}

/// Build the request for item `item` of a batch by filling the route's
/// path template.
///
/// All parameter checks and JSON parsing happen here, so a bad item fails
/// before anything is sent for it. Filled-in values are percent-encoded;
/// literal template text goes out as written.
pub fn build_request(operation: Operation, params: &ItemParameters, item: usize) -> Result<RequestDescriptor> {
    let route = route(operation);
    let (path_template, query_template) = route.path.split_once('?').unwrap_or((route.path, ""));

    let segments = path_template
        .split('/')
        .map(|segment| fill(segment, params, item))
        .collect::<Result<Vec<_>>>()?;
    let mut request = RequestDescriptor::new(route.method, segments.join("/"));

    for pair in query_template.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        request = request.query(key, fill(value, params, item)?);
    }

    let request = match route.body {
        BodyShape::None => request,
        BodyShape::Records => request.json_body(records_body(params, item)?),
        BodyShape::FieldDefinition => request.json_body(field_definition(params, item)?),
    };

    Ok(request)
}

/// Replace a `{placeholder}` with the encoded parameter value.
fn fill(template: &str, params: &ItemParameters, item: usize) -> Result<String> {
    let Some(placeholder) = template.strip_prefix('{').and_then(|t| t.strip_suffix('}')) else {
        return Ok(template.to_string());
    };

    let param = Param::from_placeholder(placeholder)
        .ok_or_else(|| NodeError::RouteTemplate(placeholder.to_string()))?;

    match param {
        Param::RecordIds => record_ids(params, item),
        _ => Ok(urlencoding::encode(params.require(param, item)?).into_owned()),
    }
}

/// Comma separated list; each id is encoded on its own so the separators
/// stay literal.
fn record_ids(params: &ItemParameters, item: usize) -> Result<String> {
    let raw = params.require(Param::RecordIds, item)?;
    let ids: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|id| urlencoding::encode(id).into_owned())
        .collect();
    if ids.is_empty() {
        return Err(NodeError::InvalidParameter {
            name: Param::RecordIds.name(),
            item,
            reason: "no record ids given".to_string(),
        });
    }
    Ok(ids.join(","))
}

fn records_body(params: &ItemParameters, item: usize) -> Result<Value> {
    let body = params
        .records_body_json(item)?
        .ok_or(NodeError::MissingParameter { name: Param::RecordsBody.name(), item })?;

    match body {
        Value::Object(_) => Ok(body),
        Value::Array(records) => Ok(json!({ "records": records })),
        other => Err(NodeError::InvalidParameter {
            name: Param::RecordsBody.name(),
            item,
            reason: format!("expected a JSON object or array, found {other}"),
        }),
    }
}

fn field_definition(params: &ItemParameters, item: usize) -> Result<Value> {
    // Parse first: a malformed property document must fail even when other
    // parameters are also missing.
    let property = params.field_properties_json(item)?;

    let mut body = Map::new();
    body.insert("type".into(), Value::String(params.require(Param::FieldType, item)?.to_string()));
    body.insert("name".into(), Value::String(params.require(Param::FieldName, item)?.to_string()));
    if let Some(property) = property {
        body.insert("property".into(), property);
    }
    Ok(Value::Object(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_params() -> ItemParameters {
        ItemParameters::new()
            .space_id("spc1")
            .datasheet_id("dst1")
            .view_id("viw1")
            .record_ids("rec1,rec2")
            .records_body(json!({"records": [{"fields": {"a": 1}}]}))
            .field_type("SingleText")
            .field_name("Title")
            .field_properties("{\"defaultValue\": \"x\"}")
            .field_id("fld1")
    }

    #[test]
    fn routes_match_built_requests() {
        let params = full_params();
        for op in Operation::ALL {
            let route = route(op);
            let req = build_request(op, &params, 0).unwrap();
            assert_eq!(req.method, route.method, "{op}");

            let expected = route
                .path
                .replace("{spaceId}", "spc1")
                .replace("{datasheetId}", "dst1")
                .replace("{viewId}", "viw1")
                .replace("{recordId}", "rec1,rec2")
                .replace("{fieldId}", "fld1");
            assert_eq!(req.path_and_query(), expected, "{op}");
            assert_eq!(req.body.is_some(), route.body != BodyShape::None, "{op}");
        }
    }

    #[test]
    fn bodied_requests_carry_content_type() {
        let params = full_params();
        let post = build_request(Operation::CreateRecord, &params, 0).unwrap();
        assert_eq!(post.header("content-type"), Some("application/json"));
        assert_eq!(post.header("accept"), Some("application/json"));

        let get = build_request(Operation::GetFields, &params, 0).unwrap();
        assert_eq!(get.header("Content-Type"), None);
        assert_eq!(get.header("Accept"), Some("application/json"));
    }

    #[test]
    fn record_ids_are_trimmed_and_rejoined() {
        let params = ItemParameters::new().datasheet_id("dst1").record_ids(" rec1, rec2 ,,");
        let req = build_request(Operation::DeleteRecord, &params, 0).unwrap();
        assert_eq!(req.path_and_query(), "/fusion/v1/datasheets/dst1/records?recordIds=rec1,rec2");

        let empty = ItemParameters::new().datasheet_id("dst1").record_ids(",,");
        assert!(matches!(
            build_request(Operation::DeleteRecord, &empty, 0),
            Err(NodeError::InvalidParameter { name: "recordId", .. })
        ));
    }

    #[test]
    fn records_array_is_wrapped() {
        let params = ItemParameters::new()
            .datasheet_id("dst1")
            .records_body("[{\"recordId\": \"rec1\", \"fields\": {\"a\": 2}}]");
        let req = build_request(Operation::UpdateRecord, &params, 0).unwrap();
        assert_eq!(
            req.body,
            Some(json!({"records": [{"recordId": "rec1", "fields": {"a": 2}}]}))
        );
    }

    #[test]
    fn scalar_records_body_is_rejected() {
        let params = ItemParameters::new().datasheet_id("dst1").records_body(json!(7));
        assert!(matches!(
            build_request(Operation::CreateRecord, &params, 0),
            Err(NodeError::InvalidParameter { name: "records_body", .. })
        ));
    }

    #[test]
    fn field_property_is_omitted_when_empty() {
        let params = ItemParameters::new()
            .space_id("spc1")
            .datasheet_id("dst1")
            .field_type("Number")
            .field_name("Qty");
        let req = build_request(Operation::CreateField, &params, 0).unwrap();
        assert_eq!(req.body, Some(json!({"type": "Number", "name": "Qty"})));
    }

    #[test]
    fn filled_values_are_percent_encoded() {
        let space = ItemParameters::new().space_id("My Team Space");
        let req = build_request(Operation::SearchNodes, &space, 0).unwrap();
        assert_eq!(
            req.path_and_query(),
            "/fusion/v2/spaces/My%20Team%20Space/nodes?type=Datasheet&permissions=0,1"
        );

        let params = ItemParameters::new().datasheet_id("dst1/../spaces").view_id("viw%2F1");
        let req = build_request(Operation::GetRecords, &params, 0).unwrap();
        assert_eq!(
            req.path_and_query(),
            "/fusion/v1/datasheets/dst1%2F..%2Fspaces/records?viewId=viw%252F1"
        );
    }

    #[test]
    fn record_ids_are_encoded_one_by_one() {
        let params = ItemParameters::new().datasheet_id("dst1").record_ids("rec 1,rec&2");
        let req = build_request(Operation::DeleteRecord, &params, 0).unwrap();
        assert_eq!(req.query, vec![("recordIds".to_string(), "rec%201,rec%262".to_string())]);
    }

    #[test]
    fn every_placeholder_names_a_parameter() {
        for op in Operation::ALL {
            let template = route(op).path;
            for piece in template.split(['/', '?', '&', '=']) {
                if let Some(name) = piece.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                    let param = Param::from_placeholder(name);
                    assert!(param.is_some(), "{op}: unknown placeholder {name}");
                    assert!(route(op).required.contains(&param.unwrap()), "{op}: {name} not required");
                }
            }
        }
    }

    #[test]
    fn missing_parameter_names_the_item() {
        let params = ItemParameters::new().space_id("spc1");
        assert!(matches!(
            build_request(Operation::DeleteField, &params, 5),
            Err(NodeError::MissingParameter { name: "DatasheetID", item: 5 })
        ));
    }
}
