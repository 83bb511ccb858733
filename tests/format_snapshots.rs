//! Snapshot tests for every built-in tree format, rendered from real parses

use cfgparse::cfg::formats::FormatRegistry;
use cfgparse::cfg::{Grammar, ParseNode};
use std::sync::Arc;

fn derive(rules: &str, input: &str) -> Arc<ParseNode> {
    Grammar::from_rules(rules)
        .expect("rules should parse")
        .compile()
        .parse(input)
        .into_tree()
        .expect("input should be accepted")
}

fn render(format: &str, rules: &str, input: &str) -> String {
    FormatRegistry::with_defaults()
        .serialize(&derive(rules, input), format)
        .expect("format is registered")
}

const OPTIONAL_TAIL: &str = "S -> A B\nA -> a\nB -> b | epsilon";

#[test]
fn test_treeviz_optional_tail() {
    insta::assert_snapshot!(render("treeviz", OPTIONAL_TAIL, "a"), @r###"
    ◆ S
    ├─ ◆ A
    │ └─ ◦ a
    └─ ◆ B
      └─ ε epsilon
    "###);
}

#[test]
fn test_treeviz_right_recursion() {
    insta::assert_snapshot!(render("treeviz", "S -> a S | epsilon", "a a"), @r###"
    ◆ S
    ├─ ◦ a
    └─ ◆ S
      ├─ ◦ a
      └─ ◆ S
        └─ ε epsilon
    "###);
}

#[test]
fn test_dot_optional_tail() {
    insta::assert_snapshot!(render("dot", OPTIONAL_TAIL, "a"), @r###"
    digraph parse_tree {
      node1 [label="S"];
      node2 [label="A"];
      node1 -> node2;
      node3 [label="a"];
      node2 -> node3;
      node4 [label="B"];
      node1 -> node4;
      node5 [label="epsilon"];
      node4 -> node5;
    }
    "###);
}

#[test]
fn test_tag_optional_tail() {
    insta::assert_snapshot!(render("tag", OPTIONAL_TAIL, "a b"), @r###"
    <tree>
      <nonterminal>S
        <nonterminal>A
          <terminal>a</terminal>
        </nonterminal>
        <nonterminal>B
          <terminal>b</terminal>
        </nonterminal>
      </nonterminal>
    </tree>
    "###);
}

#[test]
fn test_tag_empty_marker() {
    insta::assert_snapshot!(render("tag", "S -> epsilon", ""), @r###"
    <tree>
      <nonterminal>S
        <empty>epsilon</empty>
      </nonterminal>
    </tree>
    "###);
}

#[test]
fn test_bracket_right_recursion() {
    insta::assert_snapshot!(
        render("bracket", "S -> a S | epsilon", "a a a"),
        @"S(a, S(a, S(a, S(epsilon))))"
    );
}

#[test]
fn test_json_snapshot() {
    insta::assert_snapshot!(render("json", "S -> A\nA -> a", "a"), @r###"
    {
      "node_type": "Nonterminal",
      "label": "S",
      "children": [
        {
          "node_type": "Nonterminal",
          "label": "A",
          "children": [
            {
              "node_type": "Terminal",
              "label": "a"
            }
          ]
        }
      ]
    }
    "###);
}

#[test]
fn test_yaml_snapshot() {
    insta::assert_snapshot!(render("yaml", "S -> A | epsilon\nA -> a", "a"), @r###"
    node_type: Nonterminal
    label: S
    children:
    - node_type: Nonterminal
      label: A
      children:
      - node_type: Terminal
        label: a
    "###);
}

#[test]
fn test_unknown_format_is_an_error() {
    let tree = derive("S -> a", "a");
    let err = FormatRegistry::with_defaults()
        .serialize(&tree, "svg")
        .unwrap_err();
    assert_eq!(err.to_string(), "unknown tree format 'svg'");
}
