//! Booking enquiries submitted through the public website.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::{format_display_date, lenient_u32, null_as_empty, Entity, EntityId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Converted,
    Closed,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 4] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Converted,
        LeadStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Converted => "Converted",
            LeadStatus::Closed => "Closed",
        }
    }

    /// Parse a status label; unknown or empty values are `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Some(LeadStatus::New),
            "contacted" => Some(LeadStatus::Contacted),
            "converted" => Some(LeadStatus::Converted),
            "closed" => Some(LeadStatus::Closed),
            _ => None,
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Rows created before the status column existed come back as null
impl<'de> Deserialize<'de> for LeadStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .and_then(LeadStatus::parse)
            .unwrap_or_default())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Lead {
    pub id: EntityId,
    #[serde(alias = "customerName", deserialize_with = "null_as_empty", default)]
    pub customer_name: String,
    #[serde(deserialize_with = "null_as_empty", default)]
    pub email: String,
    #[serde(alias = "phoneNumber", deserialize_with = "null_as_empty", default)]
    pub phone_number: String,
    #[serde(alias = "eventDate", deserialize_with = "null_as_empty", default)]
    pub event_date: String,
    #[serde(alias = "eventTime", deserialize_with = "null_as_empty", default)]
    pub event_time: String,
    #[serde(alias = "eventPostcode", deserialize_with = "null_as_empty", default)]
    pub event_postcode: String,
    #[serde(alias = "numberOfGuests", deserialize_with = "lenient_u32", default)]
    pub number_of_guests: Option<u32>,
    #[serde(alias = "boothChoice", default)]
    pub booth_choice: Option<String>,
    #[serde(alias = "eventType", default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub status: LeadStatus,
    #[serde(alias = "createdAt", deserialize_with = "null_as_empty", default)]
    pub created_at: String,
}

impl Entity for Lead {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Lead {
    /// Plain-text summary placed on the clipboard by "Copy details"
    pub fn details_text(&self) -> String {
        let mut lines = vec![
            "Lead Details:".to_string(),
            "-------------".to_string(),
            format!("Name: {}", self.customer_name),
            format!("Email: {}", self.email),
            format!("Phone: {}", self.phone_number),
            format!("Status: {}", self.status),
            format!("Event Date: {}", format_display_date(&self.event_date)),
        ];
        if !self.event_time.is_empty() {
            lines.push(format!("Event Time: {}", self.event_time));
        }
        if !self.event_postcode.is_empty() {
            lines.push(format!("Postcode: {}", self.event_postcode));
        }
        if let Some(guests) = self.number_of_guests {
            lines.push(format!("Guests: {}", guests));
        }
        if let Some(ref booth) = self.booth_choice {
            lines.push(format!("Booth: {}", booth));
        }
        if let Some(ref event_type) = self.event_type {
            lines.push(format!("Event Type: {}", event_type));
        }
        lines.join("\n")
    }
}
