//
//  titan-cli
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use std::io::Write;

use serde::Serialize;

use crate::api::common::{ApiError, ErrorKind, ValidationError};

pub fn write_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn write_json_to<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// The single JSON document printed for a failed command under `--json`.
///
/// ```json
/// {"error": {"kind": "business", "title": "ERROR_VALIDATION", "message": "..."}}
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorDocument {
    pub error: ErrorReport,
}

#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub message: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<ValidationError>,
}

impl ErrorDocument {
    pub fn from_api_error(err: &ApiError) -> Self {
        let envelope = err.envelope();
        Self {
            error: ErrorReport {
                kind: err.kind(),
                title: envelope.and_then(|e| e.title()).map(str::to_string),
                message: match envelope {
                    Some(e) => e.message(),
                    None => err.to_string(),
                },
                fields: envelope.map(|e| e.validation_errors()).unwrap_or_default(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::ApiReturn;

    #[test]
    fn test_error_document_for_business_error() {
        let err = ApiError::Api(ApiReturn {
            error: Some("ERROR_VALIDATION".to_string()),
            data: Some(serde_json::json!([{"field": "name", "value": ""}])),
            ..Default::default()
        });
        let value = serde_json::to_value(ErrorDocument::from_api_error(&err)).unwrap();
        assert_eq!(value["error"]["kind"], "business");
        assert_eq!(value["error"]["title"], "ERROR_VALIDATION");
        assert_eq!(value["error"]["fields"][0]["field"], "name");
    }

    #[test]
    fn test_error_document_for_precondition() {
        let err = ApiError::precondition("either --oid or --uuid is required");
        let mut out = Vec::new();
        write_json_to(&mut out, &ErrorDocument::from_api_error(&err)).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["error"]["kind"], "precondition");
        assert!(value["error"].get("title").is_none());
    }
}
