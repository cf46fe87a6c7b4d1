//! End-to-end gates over the JSON entry points.
//!
//! These exercise the observable contract of the whole pipeline: the IR
//! wire shape, namespace annotation, instruction emission, and the error
//! path for malformed input.

#[cfg(test)]
mod tests {
    use crate::ir::{INV_DIRECTIVE_VALUE, PARSE_ERROR};
    use crate::{compile_json, resolve_tree_json};
    use serde_json::json;

    fn ops(result: &serde_json::Value) -> Vec<String> {
        result["instructions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["op"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_compile_json_svg_fragment() {
        let nodes = json!([{
            "type": "element",
            "tag": "circle",
            "attributes": [
                { "name": "cx", "value": { "code": "cx()" } },
                { "name": "cy", "value": "100" },
                { "name": "r", "value": "50" },
                { "name": "fill", "value": "red" }
            ],
            "children": []
        }]);

        let out = compile_json(&nodes.to_string(), "circle.view").unwrap();
        let result: serde_json::Value = serde_json::from_str(&out).unwrap();

        let instrs = result["instructions"].as_array().unwrap();
        assert_eq!(instrs[0]["op"], "create-element");
        assert_eq!(instrs[0]["tag"], "circle");
        assert_eq!(instrs[0]["namespace"], "svg");

        assert!(ops(&result).contains(&"bind-attribute".to_string()));
        assert_eq!(result["roots"], json!([0]));

        let code = result["code"].as_str().unwrap();
        assert!(code.contains("createElementNS"));
        assert!(code.contains("window.__lumen.effect"));
    }

    #[test]
    fn test_compile_json_spread_value_shape() {
        let nodes = json!([{
            "type": "element",
            "tag": "circle",
            "attributes": [
                { "name": "...", "value": { "spread": "{ cx: cx() }" } }
            ],
            "children": []
        }]);

        let out = compile_json(&nodes.to_string(), "spread.view").unwrap();
        let result: serde_json::Value = serde_json::from_str(&out).unwrap();
        let instrs = result["instructions"].as_array().unwrap();
        assert_eq!(instrs[1]["op"], "apply-spread");
        assert_eq!(instrs[1]["namespace"], "svg");
        assert_eq!(instrs[1]["code"], "{ cx: cx() }");
    }

    #[test]
    fn test_resolve_tree_json_annotates_namespaces() {
        let nodes = json!([{
            "type": "element",
            "tag": "div",
            "attributes": [],
            "children": [{
                "type": "element",
                "tag": "svg",
                "attributes": [],
                "children": [{
                    "type": "element",
                    "tag": "foreignObject",
                    "attributes": [],
                    "children": [{
                        "type": "element",
                        "tag": "div",
                        "attributes": [],
                        "children": []
                    }]
                }]
            }]
        }]);

        let out = resolve_tree_json(&nodes.to_string(), "mixed.view").unwrap();
        let resolved: serde_json::Value = serde_json::from_str(&out).unwrap();

        let div = &resolved[0];
        assert_eq!(div["namespace"], "html");
        let svg = &div["children"][0];
        assert_eq!(svg["namespace"], "svg");
        let foreign = &svg["children"][0];
        assert_eq!(foreign["namespace"], "svg");
        let inner_div = &foreign["children"][0];
        assert_eq!(inner_div["namespace"], "html");
    }

    #[test]
    fn test_text_and_expression_children_round_trip() {
        let nodes = json!([{
            "type": "element",
            "tag": "span",
            "attributes": [],
            "children": [
                { "type": "text", "value": "count: " },
                { "type": "expression", "expression": { "code": "count()" } }
            ]
        }]);

        let out = compile_json(&nodes.to_string(), "text.view").unwrap();
        let result: serde_json::Value = serde_json::from_str(&out).unwrap();
        let found = ops(&result);
        assert_eq!(
            found,
            vec![
                "create-element",
                "create-text",
                "append-child",
                "create-text",
                "bind-text",
                "append-child",
            ]
        );
    }

    #[test]
    fn test_directive_literal_rejected_through_pipeline() {
        let nodes = json!([{
            "type": "element",
            "tag": "circle",
            "attributes": [
                { "name": "ref", "value": "not-a-binding" }
            ],
            "children": []
        }]);

        let err = compile_json(&nodes.to_string(), "bad.view").unwrap_err();
        assert_eq!(err.code, INV_DIRECTIVE_VALUE);
        assert_eq!(err.file, "bad.view");
        assert!(!err.hints.is_empty());
    }

    #[test]
    fn test_malformed_json_surfaces_parse_error() {
        let err = compile_json("not json", "broken.view").unwrap_err();
        assert_eq!(err.code, PARSE_ERROR);

        let err = resolve_tree_json("{\"type\":", "broken.view").unwrap_err();
        assert_eq!(err.code, PARSE_ERROR);
    }

    #[test]
    fn test_unknown_tags_compile_as_html() {
        let nodes = json!([{
            "type": "element",
            "tag": "textField",
            "attributes": [],
            "children": [{ "type": "text", "value": "Foo" }]
        }]);

        let out = compile_json(&nodes.to_string(), "custom.view").unwrap();
        let result: serde_json::Value = serde_json::from_str(&out).unwrap();
        let instrs = result["instructions"].as_array().unwrap();
        assert_eq!(instrs[0]["namespace"], "html");
        assert!(result["code"]
            .as_str()
            .unwrap()
            .contains("document.createElement(\"textField\")"));
    }
}
