use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::config::ApiConfig;
use crate::core::error::{AppError, Result};
use crate::shared::constants::OUTPUT_PARAM;

/// Encoding of a response body, selected through the `output` parameter
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Geojson,
    Xml,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Json, OutputFormat::Xml, OutputFormat::Geojson];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Geojson => "geojson",
            OutputFormat::Xml => "xml",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Json => "application/json",
            OutputFormat::Geojson => "application/geo+json",
            OutputFormat::Xml => "application/xml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "geojson" => Ok(OutputFormat::Geojson),
            "xml" => Ok(OutputFormat::Xml),
            other => Err(not_recognized(other)),
        }
    }
}

fn not_recognized(value: &str) -> AppError {
    AppError::Validation(format!("{} is not recognized", value))
}

/// Picks the output format of a request from its query parameters
#[derive(Debug, Clone)]
pub struct FormatNegotiator {
    allowed: Vec<OutputFormat>,
    default: OutputFormat,
}

impl FormatNegotiator {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            allowed: config.output_formats.clone(),
            default: config.default_output,
        }
    }

    /// Resolve `output`, falling back to the configured default when absent.
    ///
    /// Matching is exact: `JSON` or ` json` are rejected like any unknown
    /// value, with the offending value in the message.
    pub fn negotiate(&self, params: &HashMap<String, String>) -> Result<OutputFormat> {
        let Some(raw) = params.get(OUTPUT_PARAM) else {
            return Ok(self.default);
        };

        let format = raw.parse::<OutputFormat>()?;
        if !self.allowed.contains(&format) {
            return Err(not_recognized(raw));
        }
        Ok(format)
    }
}
