use serde::{Deserialize, Serialize};

/// Binary gender code carried on member records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        self.code()
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "M" => Some(Gender::Male),
            "F" => Some(Gender::Female),
            _ => None,
        }
    }

    /// Lenient parser for imported data.
    /// Accepts the DB codes, English words and the Korean codes used by the
    /// front-desk export (남 / 여).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "m" | "male" | "남" => Some(Gender::Male),
            "f" | "female" | "여" => Some(Gender::Female),
            _ => None,
        }
    }
}
