//! Directive dispatch.
//!
//! `ref` and `fn` run as a final per-node pass, after the node's attributes
//! and full subtree are constructed. Instructions come out in source
//! attribute order, so an `fn` declared after a `ref` on the same node may
//! rely on that ref being populated. Multiple directives of the same kind
//! are emitted in order; the last one wins.

use crate::classify::directive_kind;
use crate::ir::{
    AttributeValue, CompilerError, DirectiveKind, Instruction, ResolvedElement, SourceLocation,
    INV_DIRECTIVE_VALUE,
};

#[derive(Debug, Clone)]
pub struct DirectiveSpec {
    pub kind: DirectiveKind,
    pub code: String,
    pub location: SourceLocation,
}

/// Pull the directives off an element's attribute list, in source order.
/// A directive value must be an expression: a string literal can neither be
/// an assignment target nor a callable, and the generated program would not
/// even parse, so this is caught here instead.
pub fn collect_directives(
    el: &ResolvedElement,
    file: &str,
) -> Result<Vec<DirectiveSpec>, CompilerError> {
    let mut directives = Vec::new();
    for attr in &el.attributes {
        let kind = match directive_kind(&attr.name) {
            Some(kind) => kind,
            None => continue,
        };
        match &attr.value {
            AttributeValue::Dynamic(expr) => directives.push(DirectiveSpec {
                kind,
                code: expr.code.clone(),
                location: attr.location.clone(),
            }),
            AttributeValue::Static(_) | AttributeValue::Spread(_) => {
                return Err(CompilerError::with_details(
                    INV_DIRECTIVE_VALUE,
                    &format!(
                        "Directive \"{}\" on <{}> requires an expression value.",
                        attr.name, el.tag
                    ),
                    file,
                    attr.location.line,
                    attr.location.column,
                    Some(format!("<{} {}=...>", el.tag, attr.name)),
                    vec![
                        format!("Write {}={{expression}} instead of a string literal.", attr.name),
                        "ref takes an assignable binding; fn takes a function of the node."
                            .to_string(),
                    ],
                ));
            }
        }
    }
    Ok(directives)
}

/// Lower collected directives for one constructed node.
pub fn dispatch(node: usize, directives: &[DirectiveSpec]) -> Vec<Instruction> {
    directives
        .iter()
        .map(|d| match d.kind {
            DirectiveKind::Ref => Instruction::BindRef {
                node,
                target_code: d.code.clone(),
            },
            DirectiveKind::Fn => Instruction::InvokeFn {
                node,
                code: d.code.clone(),
            },
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
