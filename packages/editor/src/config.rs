use folio_model::Block;
use serde::{Deserialize, Serialize};

/// Element names the editor treats specially
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    pub list: ListDefinition,

    /// Element used for text blocks created by paste
    pub paragraph: String,
}

/// Element names making up a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListDefinition {
    pub ordered: String,
    pub unordered: String,
    pub item: String,
}

impl ListDefinition {
    /// Ordered or unordered list container
    pub fn is_list(&self, block: &Block) -> bool {
        let name = &block.element.name;
        *name == self.ordered || *name == self.unordered
    }

    pub fn is_item(&self, block: &Block) -> bool {
        block.element.name == self.item
    }
}

impl Default for ListDefinition {
    fn default() -> Self {
        Self {
            ordered: "ordered_list".to_string(),
            unordered: "bullet_list".to_string(),
            item: "list_item".to_string(),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            list: ListDefinition::default(),
            paragraph: "paragraph".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.list.unordered, "bullet_list");
        assert_eq!(config.list.item, "list_item");
        assert_eq!(config.paragraph, "paragraph");
    }

    #[test]
    fn test_parse_partial_config() {
        let json = r#"{ "list": { "unordered": "ul", "item": "li" } }"#;
        let config: EditorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.list.unordered, "ul");
        assert_eq!(config.list.ordered, "ordered_list");
        assert_eq!(config.paragraph, "paragraph");

        assert!(config.list.is_list(&Block::with_blocks("ul", vec![])));
        assert!(config.list.is_item(&Block::with_blocks("li", vec![])));
        assert!(!config.list.is_list(&Block::with_blocks("bullet_list", vec![])));
    }
}
