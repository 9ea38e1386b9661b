use serde::{Deserialize, Serialize};

/// Mentor document as returned by the API.
#[derive(Deserialize, Debug, Serialize, Clone, PartialEq)]
pub struct Mentor {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Ids of the students currently assigned, in assignment order.
    #[serde(default)]
    pub students: Vec<String>,
}

impl Mentor {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            students: Vec::new(),
        }
    }

    pub fn has_student(&self, student_id: &str) -> bool {
        self.students.iter().any(|s| s == student_id)
    }

    /// Drops every occurrence of `student_id`.
    pub fn remove_student(&mut self, student_id: &str) {
        self.students.retain(|s| s != student_id);
    }
}

/// Body of `POST /mentors`.
#[derive(Deserialize, Debug, Clone)]
pub struct NewMentor {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_mentor_has_no_students() {
        let m = Mentor::new("65a000000000000000000001", "Alice");
        assert!(m.students.is_empty());
        assert_eq!(m.name, "Alice");
    }

    #[test]
    fn remove_student_drops_duplicates() {
        let mut m = Mentor::new("65a000000000000000000001", "Alice");
        m.students = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        m.remove_student("a");
        assert_eq!(m.students, vec!["b".to_string()]);
        assert!(!m.has_student("a"));
    }

    #[test]
    fn serializes_id_as_underscore_id() {
        let m = Mentor::new("65a000000000000000000001", "Alice");
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v["_id"], "65a000000000000000000001");
        assert_eq!(v["students"], serde_json::json!([]));
    }
}
