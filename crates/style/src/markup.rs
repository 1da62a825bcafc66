use serde::{Deserialize, Serialize};

/// Which inline marker syntax a document is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MarkupSyntax {
    /// Repeated literal delimiters (`**bold**`) toggle a style on and off.
    #[default]
    #[serde(alias = "delimiters", alias = "toggle")]
    Delimiter,
    /// Bracketed tags: `<bold>`, `</bold>`, `<italic>`, `<br>`.
    #[serde(alias = "tag")]
    Tags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_from_lowercase_names() {
        let syntax: MarkupSyntax = serde_json::from_str("\"tags\"").unwrap();
        assert_eq!(syntax, MarkupSyntax::Tags);
        let syntax: MarkupSyntax = serde_json::from_str("\"delimiter\"").unwrap();
        assert_eq!(syntax, MarkupSyntax::Delimiter);
    }
}
