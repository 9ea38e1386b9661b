use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq)]
pub struct Student {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub mentor: Option<String>,
}

impl Student {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            mentor: None,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.mentor.is_some()
    }
}

/// Body of `POST /students`.
#[derive(Deserialize, Debug, Clone)]
pub struct NewStudent {
    pub name: String,
}
