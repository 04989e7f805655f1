use serde::{Deserialize, Serialize};

/// Tags chegam do cliente como string separada por vírgula ("a, b, c")
/// ou já como array. A representação canônica no banco é Vec<String>.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum TagsInput {
    Joined(String),
    List(Vec<String>),
}

/// Normaliza tags: split por vírgula, trim e descarta entradas vazias.
pub fn normalize_tags(input: &TagsInput) -> Vec<String> {
    match input {
        TagsInput::Joined(joined) => joined
            .split(',')
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect(),
        TagsInput::List(list) => list
            .iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_comma_joined_string() {
        let input = TagsInput::Joined("a, b, c".to_string());
        assert_eq!(normalize_tags(&input), vec!["a", "b", "c"]);
    }

    #[test]
    fn normalizes_array_input() {
        let input = TagsInput::List(vec![" Clean Code ".into(), "Refactoring".into()]);
        assert_eq!(normalize_tags(&input), vec!["Clean Code", "Refactoring"]);
    }

    #[test]
    fn drops_empty_entries() {
        let input = TagsInput::Joined("a,, ,b".to_string());
        assert_eq!(normalize_tags(&input), vec!["a", "b"]);
    }

    #[test]
    fn empty_string_yields_no_tags() {
        let input = TagsInput::Joined("".to_string());
        assert!(normalize_tags(&input).is_empty());
    }

    #[test]
    fn deserializes_both_shapes() {
        let joined: TagsInput = serde_json::from_str("\"x, y\"").unwrap();
        assert_eq!(normalize_tags(&joined), vec!["x", "y"]);

        let list: TagsInput = serde_json::from_str("[\"x\", \"y\"]").unwrap();
        assert_eq!(normalize_tags(&list), vec!["x", "y"]);
    }
}
