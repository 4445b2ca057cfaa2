// ReviseInventoryStatus request construction

use serde::Serialize;

use crate::error::ProcessingError;

pub const REVISE_INVENTORY_STATUS: &str = "ReviseInventoryStatus";
pub const EBAY_NAMESPACE: &str = "urn:ebay:apis:eBLBaseComponents";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTarget {
    pub item_id: String,
    pub quantity: u32,
}

impl ItemTarget {
    pub fn new(item_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
        }
    }

    // Every configured item gets the same target quantity
    pub fn from_ids<I, S>(ids: I, quantity: u32) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ids.into_iter().map(|id| Self::new(id, quantity)).collect()
    }
}

// Structures for XML serialization
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename = "ReviseInventoryStatusRequest")]
struct XmlReviseInventoryStatusRequest<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'a str,
    #[serde(rename = "InventoryStatus")]
    inventory_status: Vec<XmlInventoryStatus<'a>>,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
struct XmlInventoryStatus<'a> {
    #[serde(rename = "ItemID")]
    item_id: &'a str,
    quantity: u32,
}

// Serialize the targets into a ReviseInventoryStatus body.
// Element text goes through the quick-xml serializer, so identifiers are escaped.
pub fn build_request(items: &[ItemTarget]) -> Result<String, ProcessingError> {
    let request = XmlReviseInventoryStatusRequest {
        xmlns: EBAY_NAMESPACE,
        inventory_status: items
            .iter()
            .map(|item| XmlInventoryStatus {
                item_id: &item.item_id,
                quantity: item.quantity,
            })
            .collect(),
    };

    let body = quick_xml::se::to_string(&request)
        .map_err(|e| ProcessingError::SerializationError(e.to_string()))?;

    Ok(format!("{}{}", XML_DECLARATION, body))
}
