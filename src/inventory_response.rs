// ReviseInventoryStatus response interpretation
//
// The Trading API omits array wrappers, so a single <Errors> or <InventoryStatus>
// element looks exactly like a scalar on the wire. Both are always deserialized
// into Vecs and then normalized into the domain result below.

use std::fmt;

use quick_xml::de::from_str;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::error::ProcessingError;

pub const RESPONSE_ROOT: &str = "ReviseInventoryStatusResponse";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ack {
    Success,
    Warning,
    Failure,
    PartialFailure,
    Other(String),
}

impl Ack {
    pub fn is_success(&self) -> bool {
        matches!(self, Ack::Success | Ack::Warning)
    }
}

impl From<&str> for Ack {
    fn from(value: &str) -> Self {
        match value.trim() {
            "Success" => Ack::Success,
            "Warning" => Ack::Warning,
            "Failure" => Ack::Failure,
            "PartialFailure" => Ack::PartialFailure,
            other => Ack::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Ack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ack::Success => write!(f, "Success"),
            Ack::Warning => write!(f, "Warning"),
            Ack::Failure => write!(f, "Failure"),
            Ack::PartialFailure => write!(f, "PartialFailure"),
            Ack::Other(value) if value.is_empty() => write!(f, "<none>"),
            Ack::Other(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResponseError {
    pub code: String,
    pub short_message: String,
    pub long_message: Option<String>,
    pub severity: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemConfirmation {
    pub item_id: String,
    pub sku: Option<String>,
    pub quantity: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryUpdateResult {
    pub ack: Ack,
    pub errors: Vec<ResponseError>,
    pub items: Vec<ItemConfirmation>,
}

// Structures for XML deserialization
#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct XmlReviseInventoryStatusResponse {
    ack: String,
    #[serde(rename = "Errors")]
    errors: Vec<XmlError>,
    #[serde(rename = "InventoryStatus")]
    inventory_status: Vec<XmlInventoryStatus>,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct XmlError {
    error_code: String,
    short_message: String,
    long_message: String,
    severity_code: String,
}

#[derive(Debug, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct XmlInventoryStatus {
    #[serde(rename = "ItemID")]
    item_id: String,
    #[serde(rename = "SKU")]
    sku: String,
    quantity: String,
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl From<XmlReviseInventoryStatusResponse> for InventoryUpdateResult {
    fn from(item: XmlReviseInventoryStatusResponse) -> Self {
        let errors = item
            .errors
            .into_iter()
            .map(|e| ResponseError {
                code: e.error_code.trim().to_string(),
                short_message: e.short_message.trim().to_string(),
                long_message: non_empty(e.long_message),
                severity: non_empty(e.severity_code),
            })
            .collect();

        let items = item
            .inventory_status
            .into_iter()
            .map(|status| ItemConfirmation {
                item_id: status.item_id.trim().to_string(),
                sku: non_empty(status.sku),
                quantity: status.quantity.trim().parse().ok(),
            })
            .collect();

        InventoryUpdateResult {
            ack: Ack::from(item.ack.as_str()),
            errors,
            items,
        }
    }
}

// Parse a ReviseInventoryStatus response body
pub fn parse(xml: &str) -> Result<InventoryUpdateResult, ProcessingError> {
    check_root(xml)?;
    let response: XmlReviseInventoryStatusResponse =
        from_str(xml).map_err(|e| ProcessingError::XmlParseError(e.to_string()))?;
    Ok(response.into())
}

// Parse and report a response. Problems are logged, never returned.
pub fn interpret(xml: &str) -> Option<InventoryUpdateResult> {
    match parse(xml) {
        Ok(result) => {
            report(&result);
            Some(result)
        }
        Err(e) => {
            error!(error = %e, "[ERROR] Unexpected ReviseInventoryStatus response");
            None
        }
    }
}

pub fn report(result: &InventoryUpdateResult) {
    if result.ack.is_success() {
        info!(ack = %result.ack, "[TRADING] ReviseInventoryStatus acknowledged");
    } else {
        warn!(ack = %result.ack, "[TRADING] ReviseInventoryStatus not successful");
    }

    for e in &result.errors {
        error!(
            code = %e.code,
            severity = e.severity.as_deref().unwrap_or("-"),
            long_message = e.long_message.as_deref().unwrap_or("-"),
            "[ERROR] {}",
            e.short_message
        );
    }

    for item in &result.items {
        info!(
            item_id = %item.item_id,
            sku = item.sku.as_deref().unwrap_or("-"),
            quantity = ?item.quantity,
            "[ITEM] Inventory confirmed"
        );
    }
}

// The deserializer accepts any root, so check the first element explicitly
fn check_root(xml: &str) -> Result<(), ProcessingError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let name = e.local_name();
                if name.as_ref() == RESPONSE_ROOT.as_bytes() {
                    return Ok(());
                }
                return Err(ProcessingError::MissingRootElement {
                    expected: RESPONSE_ROOT.to_string(),
                    found: format!("<{}>", String::from_utf8_lossy(name.as_ref())),
                });
            }
            Ok(Event::Eof) => {
                return Err(ProcessingError::MissingRootElement {
                    expected: RESPONSE_ROOT.to_string(),
                    found: "no element".to_string(),
                })
            }
            Err(e) => {
                return Err(ProcessingError::XmlParseError(format!(
                    "error at position {}: {}",
                    reader.error_position(),
                    e
                )))
            }
            _ => (),
        }
    }
}
