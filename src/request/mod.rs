//! Request/response boundary around [`analyze`](crate::core::analyze)
//!
//! Extracts the document text and parameters from an inbound payload,
//! rejects payloads without document text, and wraps the result (or the
//! rejection) in a status-coded response envelope.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::analyze;
use crate::entities::analysis::{is_valid_threshold, AnalysisParams, AnalysisResult};
use crate::payload::{parse_payload, PayloadError};

/// Status code for a completed analysis
pub const STATUS_OK: u16 = 200;

/// Status code for a rejected request
pub const STATUS_BAD_REQUEST: u16 = 400;

/// Inbound analysis request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisRequest {
    /// Document text; `stl_data` is accepted for older clients
    #[serde(alias = "documentText", alias = "stl_data")]
    pub document_text: Option<String>,

    #[serde(alias = "fileName")]
    pub file_name: Option<String>,

    #[serde(alias = "analysisParams")]
    pub analysis_params: AnalysisParams,
}

/// A request that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRequest {
    pub document_text: String,
    pub file_name: String,
    pub params: AnalysisParams,
}

/// Reasons a request is rejected before analysis
#[derive(Debug, Error, Diagnostic)]
pub enum RequestError {
    #[error("documentText is required")]
    #[diagnostic(
        code(featsynth::request::missing_text),
        help("Send the CAD exchange payload as a string in the documentText field")
    )]
    MissingDocumentText,

    #[error("confidenceThreshold must be a number between 0 and 1, got {0}")]
    #[diagnostic(code(featsynth::request::invalid_threshold))]
    InvalidThreshold(f64),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Payload(#[from] PayloadError),
}

impl RequestError {
    /// Status code reported for this rejection
    pub fn status(&self) -> u16 {
        match self {
            RequestError::MissingDocumentText
            | RequestError::InvalidThreshold(_)
            | RequestError::Payload(_) => STATUS_BAD_REQUEST,
        }
    }
}

impl AnalysisRequest {
    /// Check required fields and parameter ranges
    pub fn validate(self) -> Result<ValidRequest, RequestError> {
        let document_text = match self.document_text {
            Some(text) if !text.is_empty() => text,
            _ => return Err(RequestError::MissingDocumentText),
        };

        if let Some(threshold) = self.analysis_params.confidence_threshold {
            if !is_valid_threshold(threshold) {
                return Err(RequestError::InvalidThreshold(threshold));
            }
        }

        Ok(ValidRequest {
            document_text,
            file_name: self.file_name.unwrap_or_else(|| "unknown".to_string()),
            params: self.analysis_params,
        })
    }
}

/// Parse a JSON or YAML payload into a request
pub fn parse_request(content: &str, source_name: &str) -> Result<AnalysisRequest, RequestError> {
    Ok(parse_payload(content, source_name)?)
}

/// Body of a rejected request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub status: &'static str,
}

/// Response body: the analysis or an error
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Analysis(Box<AnalysisResult>),
    Error(ErrorBody),
}

/// Status-coded response envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl AnalysisResponse {
    pub fn ok(result: AnalysisResult) -> Self {
        Self {
            status: STATUS_OK,
            body: ResponseBody::Analysis(Box::new(result)),
        }
    }

    pub fn rejected(err: &RequestError) -> Self {
        Self {
            status: err.status(),
            body: ResponseBody::Error(ErrorBody {
                error: err.to_string(),
                status: "error",
            }),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// The analysis, if the request was accepted
    pub fn analysis(&self) -> Option<&AnalysisResult> {
        match self.body {
            ResponseBody::Analysis(ref result) => Some(result.as_ref()),
            ResponseBody::Error(_) => None,
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Run a raw payload through the whole boundary
///
/// Returns the validation error alongside the response so callers can
/// render diagnostics; the response is always populated.
pub fn handle(content: &str, source_name: &str) -> (AnalysisResponse, Option<RequestError>) {
    match parse_request(content, source_name).and_then(AnalysisRequest::validate) {
        Ok(request) => {
            info!(file = %request.file_name, "processing analysis request");
            let result = analyze(&request.document_text, &request.params);
            (AnalysisResponse::ok(result), None)
        }
        Err(err) => {
            debug!(error = %err, "request rejected");
            (AnalysisResponse::rejected(&err), Some(err))
        }
    }
}
