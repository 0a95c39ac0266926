//! Tool catalog and parameter assembly.
//!
//! Each tool is a fixed parameter-assembly step over the API dispatcher: it
//! fills in defaults, never inspects the response, and forwards everything
//! else verbatim.

use forceweaver_api_client::API_KEY_PARAM;
use reqwest::Method;
use rmcp::ErrorData as McpError;
use rmcp::model::{JsonObject, Tool};
use serde_json::{Map, Value, json};
use std::sync::Arc;

pub const HEALTH_CHECK_TOOL: &str = "revenue_cloud_health_check";
pub const BUNDLE_ANALYSIS_TOOL: &str = "get_detailed_bundle_analysis";
pub const LIST_ORGS_TOOL: &str = "list_available_orgs";
pub const USAGE_SUMMARY_TOOL: &str = "get_usage_summary";

/// Checks run when the caller does not ask for specific ones.
pub const DEFAULT_CHECK_TYPES: [&str; 3] = ["basic_org_info", "sharing_model", "bundle_analysis"];

/// Salesforce API version used when the caller does not pin one.
pub const DEFAULT_API_VERSION: &str = "v64.0";

const HEALTH_CHECK_ENDPOINT: &str = "health/check";
const LIST_ORGS_ENDPOINT: &str = "orgs/list";
const USAGE_SUMMARY_ENDPOINT: &str = "usage/summary";

/// A fully assembled API call, ready for the dispatcher.
#[derive(Debug)]
pub struct PlannedCall {
    pub endpoint: &'static str,
    pub method: Method,
    pub params: Map<String, Value>,
}

/// Translate a tool invocation into a planned API call.
///
/// The credential is passed through untouched (present or not); the
/// dispatcher owns the missing-credential check so the caller always gets the
/// authentication remediation text rather than a schema error.
///
/// # Errors
///
/// Returns `invalid_params` if the tool name is unknown, a required
/// non-credential argument is missing, or an argument has the wrong type.
pub fn plan_call(name: &str, args: &JsonObject) -> Result<PlannedCall, McpError> {
    match name {
        HEALTH_CHECK_TOOL => {
            let mut params = org_params(args)?;
            let check_types = match optional_str_list(args, "check_types")? {
                Some(list) if !list.is_empty() => list,
                _ => DEFAULT_CHECK_TYPES.iter().map(|s| (*s).to_string()).collect(),
            };
            params.insert("check_types".to_string(), json!(check_types));
            params.insert("api_version".to_string(), json!(api_version(args)?));
            Ok(PlannedCall {
                endpoint: HEALTH_CHECK_ENDPOINT,
                method: Method::POST,
                params,
            })
        }
        BUNDLE_ANALYSIS_TOOL => {
            let mut params = org_params(args)?;
            params.insert("check_types".to_string(), json!(["bundle_analysis"]));
            params.insert("api_version".to_string(), json!(api_version(args)?));
            Ok(PlannedCall {
                endpoint: HEALTH_CHECK_ENDPOINT,
                method: Method::POST,
                params,
            })
        }
        LIST_ORGS_TOOL => Ok(PlannedCall {
            endpoint: LIST_ORGS_ENDPOINT,
            method: Method::GET,
            params: credential_params(args)?,
        }),
        USAGE_SUMMARY_TOOL => Ok(PlannedCall {
            endpoint: USAGE_SUMMARY_ENDPOINT,
            method: Method::GET,
            params: credential_params(args)?,
        }),
        other => Err(McpError::invalid_params(
            format!("Unknown tool: {other}"),
            None,
        )),
    }
}

fn credential_params(args: &JsonObject) -> Result<Map<String, Value>, McpError> {
    let mut params = Map::new();
    if let Some(key) = optional_str(args, API_KEY_PARAM)? {
        params.insert(API_KEY_PARAM.to_string(), Value::String(key));
    }
    Ok(params)
}

fn org_params(args: &JsonObject) -> Result<Map<String, Value>, McpError> {
    let mut params = credential_params(args)?;
    params.insert(
        "salesforce_org_id".to_string(),
        Value::String(required_str(args, "salesforce_org_id")?),
    );
    Ok(params)
}

fn api_version(args: &JsonObject) -> Result<String, McpError> {
    Ok(optional_str(args, "api_version")?
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()))
}

fn required_str(args: &JsonObject, key: &str) -> Result<String, McpError> {
    optional_str(args, key)?
        .ok_or_else(|| McpError::invalid_params(format!("Missing required parameter: {key}"), None))
}

fn optional_str(args: &JsonObject, key: &str) -> Result<Option<String>, McpError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(McpError::invalid_params(
            format!("Parameter '{key}' must be a string"),
            None,
        )),
    }
}

fn optional_str_list(args: &JsonObject, key: &str) -> Result<Option<Vec<String>>, McpError> {
    let Some(value) = args.get(key) else {
        return Ok(None);
    };
    if value.is_null() {
        return Ok(None);
    }
    let items = value.as_array().ok_or_else(|| {
        McpError::invalid_params(format!("Parameter '{key}' must be a list of strings"), None)
    })?;
    items
        .iter()
        .map(|v| {
            v.as_str().map(str::to_string).ok_or_else(|| {
                McpError::invalid_params(
                    format!("Parameter '{key}' must be a list of strings"),
                    None,
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// The fixed set of tools exposed to MCP clients.
#[must_use]
pub fn catalog() -> Vec<Tool> {
    vec![
        Tool::new(
            HEALTH_CHECK_TOOL,
            "Perform a comprehensive Salesforce Revenue Cloud health check: org setup and \
             configuration validation, sharing model analysis for PCM objects, bundle hierarchy \
             and dependency analysis, and attribute picklist integrity. Returns a health report \
             with scores, findings, and recommendations.",
            schema(json!({
                "type": "object",
                "properties": {
                    "forceweaver_api_key": {
                        "type": "string",
                        "description": "Your ForceWeaver API key from https://mcp.forceweaver.com/dashboard/keys"
                    },
                    "salesforce_org_id": {
                        "type": "string",
                        "description": "Your Salesforce org identifier (from connected orgs)"
                    },
                    "check_types": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Specific checks to run (default: all basic checks)"
                    },
                    "api_version": {
                        "type": "string",
                        "default": DEFAULT_API_VERSION,
                        "description": "Salesforce API version"
                    }
                },
                "required": ["forceweaver_api_key", "salesforce_org_id"]
            })),
        ),
        Tool::new(
            BUNDLE_ANALYSIS_TOOL,
            "Get a detailed Revenue Cloud bundle hierarchy analysis: bundle product and \
             component counts, hierarchy depth, circular dependency detection with resolution \
             paths, and complexity metrics.",
            schema(json!({
                "type": "object",
                "properties": {
                    "forceweaver_api_key": {
                        "type": "string",
                        "description": "Your ForceWeaver API key"
                    },
                    "salesforce_org_id": {
                        "type": "string",
                        "description": "Your Salesforce org identifier"
                    },
                    "api_version": {
                        "type": "string",
                        "default": DEFAULT_API_VERSION,
                        "description": "Salesforce API version"
                    }
                },
                "required": ["forceweaver_api_key", "salesforce_org_id"]
            })),
        ),
        Tool::new(
            LIST_ORGS_TOOL,
            "List all Salesforce organizations connected to your ForceWeaver account.",
            schema(json!({
                "type": "object",
                "properties": {
                    "forceweaver_api_key": {
                        "type": "string",
                        "description": "Your ForceWeaver API key"
                    }
                },
                "required": ["forceweaver_api_key"]
            })),
        ),
        Tool::new(
            USAGE_SUMMARY_TOOL,
            "Get current usage statistics and subscription status for your ForceWeaver account.",
            schema(json!({
                "type": "object",
                "properties": {
                    "forceweaver_api_key": {
                        "type": "string",
                        "description": "Your ForceWeaver API key"
                    }
                },
                "required": ["forceweaver_api_key"]
            })),
        ),
    ]
}

fn schema(value: Value) -> Arc<JsonObject> {
    Arc::new(value.as_object().cloned().unwrap_or_else(JsonObject::new))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn health_check_fills_default_check_types_and_api_version() {
        let call = plan_call(
            HEALTH_CHECK_TOOL,
            &args(json!({
                "forceweaver_api_key": "fk_test",
                "salesforce_org_id": "org1"
            })),
        )
        .expect("plan");

        assert_eq!(call.endpoint, "health/check");
        assert_eq!(call.method, Method::POST);
        assert_eq!(
            call.params["check_types"],
            json!(["basic_org_info", "sharing_model", "bundle_analysis"])
        );
        assert_eq!(call.params["api_version"], json!("v64.0"));
        assert_eq!(call.params[API_KEY_PARAM], json!("fk_test"));
        assert_eq!(call.params["salesforce_org_id"], json!("org1"));
    }

    #[test]
    fn health_check_keeps_explicit_check_types() {
        let call = plan_call(
            HEALTH_CHECK_TOOL,
            &args(json!({
                "forceweaver_api_key": "fk_test",
                "salesforce_org_id": "org1",
                "check_types": ["sharing_model"],
                "api_version": "v63.0"
            })),
        )
        .expect("plan");

        assert_eq!(call.params["check_types"], json!(["sharing_model"]));
        assert_eq!(call.params["api_version"], json!("v63.0"));
    }

    #[test]
    fn health_check_treats_empty_check_types_as_unset() {
        let call = plan_call(
            HEALTH_CHECK_TOOL,
            &args(json!({
                "forceweaver_api_key": "fk_test",
                "salesforce_org_id": "org1",
                "check_types": []
            })),
        )
        .expect("plan");

        assert_eq!(
            call.params["check_types"],
            json!(["basic_org_info", "sharing_model", "bundle_analysis"])
        );
    }

    #[test]
    fn bundle_analysis_forces_single_check_type() {
        let call = plan_call(
            BUNDLE_ANALYSIS_TOOL,
            &args(json!({
                "forceweaver_api_key": "fk_test",
                "salesforce_org_id": "org1"
            })),
        )
        .expect("plan");

        assert_eq!(call.endpoint, "health/check");
        assert_eq!(call.params["check_types"], json!(["bundle_analysis"]));
        assert_eq!(call.params["api_version"], json!("v64.0"));
    }

    #[test]
    fn list_orgs_and_usage_summary_are_gets_with_credential_only() {
        for (tool, endpoint) in [
            (LIST_ORGS_TOOL, "orgs/list"),
            (USAGE_SUMMARY_TOOL, "usage/summary"),
        ] {
            let call =
                plan_call(tool, &args(json!({ "forceweaver_api_key": "fk_test" }))).expect("plan");
            assert_eq!(call.endpoint, endpoint);
            assert_eq!(call.method, Method::GET);
            assert_eq!(call.params.len(), 1);
            assert_eq!(call.params[API_KEY_PARAM], json!("fk_test"));
        }
    }

    #[test]
    fn missing_credential_still_plans_so_the_dispatcher_can_classify_it() {
        let call = plan_call(
            HEALTH_CHECK_TOOL,
            &args(json!({ "salesforce_org_id": "org1" })),
        )
        .expect("plan");
        assert!(!call.params.contains_key(API_KEY_PARAM));
    }

    #[test]
    fn missing_org_id_is_an_invalid_params_error() {
        let err = plan_call(HEALTH_CHECK_TOOL, &args(json!({ "forceweaver_api_key": "fk_test" })))
            .unwrap_err();
        assert!(err.message.contains("salesforce_org_id"));
    }

    #[test]
    fn unknown_tool_is_rejected() {
        assert!(plan_call("does_not_exist", &JsonObject::new()).is_err());
    }

    #[test]
    fn catalog_lists_four_tools_with_required_fields() {
        let tools = catalog();
        let names: Vec<_> = tools.iter().map(|t| t.name.to_string()).collect();
        assert_eq!(
            names,
            vec![
                HEALTH_CHECK_TOOL,
                BUNDLE_ANALYSIS_TOOL,
                LIST_ORGS_TOOL,
                USAGE_SUMMARY_TOOL
            ]
        );

        let health = &tools[0];
        let required = health
            .input_schema
            .get("required")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        assert!(required.contains(&json!(API_KEY_PARAM)));
        assert!(required.contains(&json!("salesforce_org_id")));
        assert!(!required.contains(&json!("check_types")));
    }
}
