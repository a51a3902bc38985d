use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlotType {
    FreeWeight, // free-weight
    Machine,    // machine
    General,    // general
}

impl SlotType {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            SlotType::FreeWeight => "free-weight",
            SlotType::Machine => "machine",
            SlotType::General => "general",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "free-weight" => Some(SlotType::FreeWeight),
            "machine" => Some(SlotType::Machine),
            "general" => Some(SlotType::General),
            _ => None,
        }
    }

    /// Helper: convert user input (any case, `_` or `-`)
    pub fn from_code(code: &str) -> Option<Self> {
        SlotType::from_db_str(&code.trim().to_lowercase().replace('_', "-"))
    }
}
