use serde::{Deserialize, Serialize};

/// A monument as stored by the persistence collaborator. Read-only to the quiz core.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Subject {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub era: String,
    #[serde(default)]
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_deserializes_with_missing_optional_text() {
        let json = r#"{"id":"m-1","title":"Hampi"}"#;
        let subject: Subject = serde_json::from_str(json).expect("subject should deserialize");

        assert_eq!(subject.title, "Hampi");
        assert!(subject.description.is_empty());
        assert!(subject.era.is_empty());
        assert!(subject.location.is_empty());
    }

    #[test]
    fn subject_ignores_unrelated_monument_columns() {
        let json = r#"{"id":"m-2","title":"Konark","description":"Sun temple","era":"13th century","location":"Odisha","rating":4.5,"image_url":"x.png"}"#;
        let subject: Subject = serde_json::from_str(json).expect("subject should deserialize");

        assert_eq!(subject.location, "Odisha");
    }
}
