//! The typed record produced by a successful submit

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Gender choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    /// Option labels in display order
    pub const OPTIONS: &'static [&'static str] = &["male", "female", "other"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }
}

/// Primary (required) and alternate (optional) mobile numbers, serialized as a pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MobileNumbers(pub u64, pub Option<f64>);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub city: String,
    pub pincode: u64,
    pub area: String,
    pub door_num: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hobby {
    pub hobby: String,
}

/// Values collected from the form after every rule passed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub password: String,
    pub mobile_numbers: MobileNumbers,
    pub address: Address,
    pub gender: Gender,
    pub age: Option<f64>,
    pub date: NaiveDate,
    pub hobbies: Vec<Hobby>,
}
