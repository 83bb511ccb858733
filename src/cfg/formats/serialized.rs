//! Structured output: the tree snapshot serialized as JSON or YAML

use super::registry::{FormatError, Formatter};
use crate::cfg::snapshot::snapshot_tree;
use crate::cfg::tree::ParseNode;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, tree: &ParseNode) -> Result<String, FormatError> {
        let mut output = serde_json::to_string_pretty(&snapshot_tree(tree))
            .map_err(|e| FormatError::Render(e.to_string()))?;
        output.push('\n');
        Ok(output)
    }

    fn description(&self) -> &str {
        "Tree snapshot as pretty-printed JSON"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, tree: &ParseNode) -> Result<String, FormatError> {
        serde_yaml::to_string(&snapshot_tree(tree))
            .map_err(|e| FormatError::Render(e.to_string()))
    }

    fn description(&self) -> &str {
        "Tree snapshot as YAML"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::snapshot::TreeSnapshot;
    use std::sync::Arc;

    fn tree() -> ParseNode {
        ParseNode::nonterminal("S", vec![Arc::new(ParseNode::terminal("a"))])
    }

    #[test]
    fn test_json_roundtrips_to_snapshot() {
        let output = JsonFormatter.serialize(&tree()).unwrap();
        let parsed: TreeSnapshot = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, tree().snapshot());
    }

    #[test]
    fn test_yaml_roundtrips_to_snapshot() {
        let output = YamlFormatter.serialize(&tree()).unwrap();
        let parsed: TreeSnapshot = serde_yaml::from_str(&output).unwrap();
        assert_eq!(parsed, tree().snapshot());
    }

    #[test]
    fn test_json_shape() {
        let value: serde_json::Value =
            serde_json::from_str(&JsonFormatter.serialize(&tree()).unwrap()).unwrap();
        assert_eq!(value["node_type"], "Nonterminal");
        assert_eq!(value["label"], "S");
        assert_eq!(value["children"][0]["label"], "a");
        assert!(value["children"][0].get("children").is_none());
    }
}
