use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Industry {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}
