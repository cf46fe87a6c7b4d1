//! JS emission for the construction program.
//!
//! Renders an instruction sequence into an IIFE that builds the element
//! tree against a DOM host and returns the root (or an array of roots).
//! Reactive registrations call the external runtime: `window.__lumen.effect`
//! re-invokes its callback whenever the expression's reactive dependencies
//! change, and owns the subscription; `window.__lumen.spread` applies a
//! spread object's own keys with host-namespace rules at construction time.

use crate::ir::{AttributeTarget, Instruction, Namespace, SVG_NAMESPACE_URI};
use crate::lower::LoweredProgram;

const RUNTIME_GLOBAL: &str = "window.__lumen";

fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "")
}

fn node_var(id: usize) -> String {
    format!("__node{}", id)
}

fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn property_access(var: &str, prop: &str) -> String {
    if is_js_identifier(prop) {
        format!("{}.{}", var, prop)
    } else {
        format!("{}[\"{}\"]", var, escape_js_string(prop))
    }
}

/// One assignment statement applying `value_expr` to `target` on a node.
/// Shared between static application and the body of a reactive binding.
fn setter_statement(node: usize, target: &AttributeTarget, value_expr: &str) -> String {
    let var = node_var(node);
    match target {
        AttributeTarget::Attribute {
            namespace_uri: Some(uri),
            local_name,
        } => format!(
            "{}.setAttributeNS(\"{}\", \"{}\", {});",
            var,
            uri,
            escape_js_string(local_name),
            value_expr
        ),
        AttributeTarget::Attribute {
            namespace_uri: None,
            local_name,
        } => format!(
            "{}.setAttribute(\"{}\", {});",
            var,
            escape_js_string(local_name),
            value_expr
        ),
        AttributeTarget::Property { property_name } => {
            format!("{} = {};", property_access(&var, property_name), value_expr)
        }
    }
}

pub fn emit_program(program: &LoweredProgram) -> String {
    let mut lines: Vec<String> = Vec::new();

    for instr in &program.instructions {
        match instr {
            Instruction::CreateElement {
                node,
                tag,
                namespace,
            } => {
                let create = match namespace {
                    Namespace::Svg => format!(
                        "document.createElementNS(\"{}\", \"{}\")",
                        SVG_NAMESPACE_URI,
                        escape_js_string(tag)
                    ),
                    Namespace::Html => {
                        format!("document.createElement(\"{}\")", escape_js_string(tag))
                    }
                };
                lines.push(format!("var {} = {};", node_var(*node), create));
            }
            Instruction::SetAttribute {
                node,
                name,
                namespace_uri,
                value,
            } => {
                let target = AttributeTarget::Attribute {
                    namespace_uri: *namespace_uri,
                    local_name: name.clone(),
                };
                let literal = format!("\"{}\"", escape_js_string(value));
                lines.push(setter_statement(*node, &target, &literal));
            }
            Instruction::SetProperty { node, name, value } => {
                let target = AttributeTarget::Property {
                    property_name: name.clone(),
                };
                let literal = format!("\"{}\"", escape_js_string(value));
                lines.push(setter_statement(*node, &target, &literal));
            }
            Instruction::CreateText { node, value } => {
                lines.push(format!(
                    "var {} = document.createTextNode(\"{}\");",
                    node_var(*node),
                    escape_js_string(value)
                ));
            }
            Instruction::BindText { node, code } => {
                lines.push(format!(
                    "{}.effect(function () {{ {}.data = ({}); }});",
                    RUNTIME_GLOBAL,
                    node_var(*node),
                    code
                ));
            }
            Instruction::AppendChild { parent, child } => {
                lines.push(format!(
                    "{}.appendChild({});",
                    node_var(*parent),
                    node_var(*child)
                ));
            }
            Instruction::BindAttribute { node, target, code } => {
                let body = setter_statement(*node, target, &format!("({})", code));
                lines.push(format!(
                    "{}.effect(function () {{ {} }});",
                    RUNTIME_GLOBAL, body
                ));
            }
            Instruction::ApplySpread {
                node,
                code,
                namespace,
            } => {
                lines.push(format!(
                    "{}.spread({}, ({}), {});",
                    RUNTIME_GLOBAL,
                    node_var(*node),
                    code,
                    matches!(namespace, Namespace::Svg)
                ));
            }
            Instruction::BindRef { node, target_code } => {
                lines.push(format!("{} = {};", target_code, node_var(*node)));
            }
            Instruction::InvokeFn { node, code } => {
                lines.push(format!("({})({});", code, node_var(*node)));
            }
        }
    }

    let result = match program.roots.as_slice() {
        [] => "null".to_string(),
        [root] => node_var(*root),
        roots => format!(
            "[{}]",
            roots
                .iter()
                .map(|r| node_var(*r))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    };
    lines.push(format!("return {};", result));

    let body = lines
        .iter()
        .map(|l| format!("  {}", l))
        .collect::<Vec<_>>()
        .join("\n");
    format!("(function () {{\n{}\n}})()", body)
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
