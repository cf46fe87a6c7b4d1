//! Tree lowering.
//!
//! Depth-first, pre-order: each element is created, its attributes applied
//! in source order, then its children constructed and appended in source
//! order, then its directives dispatched. A child subtree is complete before
//! its append, so the parent never observes a partially attributed child;
//! every attribute instruction precedes the node's first child append, so
//! dynamic bindings observe a fully-constructed-but-childless node.

use crate::classify::{classify_attribute, HtmlPropertyAliases};
use crate::directives;
use crate::ir::{
    AttributeKind, AttributeTarget, AttributeValue, CompilerError, Instruction, ResolvedElement,
    ResolvedNode,
};

/// The construction program for one tree: the instruction sequence plus the
/// node ids of the top-level roots, in source order.
#[derive(Debug, Clone)]
pub struct LoweredProgram {
    pub instructions: Vec<Instruction>,
    pub roots: Vec<usize>,
}

struct Lowerer<'a> {
    aliases: &'a HtmlPropertyAliases,
    file: &'a str,
    instructions: Vec<Instruction>,
    next_node: usize,
}

pub fn lower_tree(
    nodes: &[ResolvedNode],
    aliases: &HtmlPropertyAliases,
    file: &str,
) -> Result<LoweredProgram, CompilerError> {
    let mut lowerer = Lowerer {
        aliases,
        file,
        instructions: Vec::new(),
        next_node: 0,
    };
    let mut roots = Vec::new();
    for node in nodes {
        roots.push(lowerer.lower_node(node)?);
    }
    Ok(LoweredProgram {
        instructions: lowerer.instructions,
        roots,
    })
}

impl<'a> Lowerer<'a> {
    fn alloc_node(&mut self) -> usize {
        let id = self.next_node;
        self.next_node += 1;
        id
    }

    fn lower_node(&mut self, node: &ResolvedNode) -> Result<usize, CompilerError> {
        match node {
            ResolvedNode::Element(el) => self.lower_element(el),
            ResolvedNode::Text(t) => {
                let id = self.alloc_node();
                self.instructions.push(Instruction::CreateText {
                    node: id,
                    value: t.value.clone(),
                });
                Ok(id)
            }
            ResolvedNode::Expression(e) => {
                let id = self.alloc_node();
                self.instructions.push(Instruction::CreateText {
                    node: id,
                    value: String::new(),
                });
                self.instructions.push(Instruction::BindText {
                    node: id,
                    code: e.expression.code.clone(),
                });
                Ok(id)
            }
        }
    }

    fn lower_element(&mut self, el: &ResolvedElement) -> Result<usize, CompilerError> {
        let id = self.alloc_node();
        self.instructions.push(Instruction::CreateElement {
            node: id,
            tag: el.tag.clone(),
            namespace: el.namespace,
        });

        for attr in &el.attributes {
            let spec = classify_attribute(attr, el.namespace, self.aliases);
            match (&spec.kind, &attr.value) {
                (AttributeKind::Static { target }, AttributeValue::Static(value)) => {
                    self.instructions.push(match target {
                        AttributeTarget::Attribute {
                            namespace_uri,
                            local_name,
                        } => Instruction::SetAttribute {
                            node: id,
                            name: local_name.clone(),
                            namespace_uri: *namespace_uri,
                            value: value.clone(),
                        },
                        AttributeTarget::Property { property_name } => Instruction::SetProperty {
                            node: id,
                            name: property_name.clone(),
                            value: value.clone(),
                        },
                    });
                }
                (AttributeKind::Dynamic { target }, AttributeValue::Dynamic(expr)) => {
                    self.instructions.push(Instruction::BindAttribute {
                        node: id,
                        target: target.clone(),
                        code: expr.code.clone(),
                    });
                }
                (AttributeKind::Spread, AttributeValue::Spread(spread)) => {
                    self.instructions.push(Instruction::ApplySpread {
                        node: id,
                        code: spread.spread.clone(),
                        namespace: el.namespace,
                    });
                }
                // Directives run after attributes and children.
                (AttributeKind::Directive { .. }, _) => {}
                // Kind always mirrors the value shape.
                _ => {}
            }
        }

        // Directive values are validated before children so a bad directive
        // surfaces at its own element, not a descendant's.
        let node_directives = directives::collect_directives(el, self.file)?;

        for child in &el.children {
            let child_id = self.lower_node(child)?;
            self.instructions.push(Instruction::AppendChild {
                parent: id,
                child: child_id,
            });
        }

        self.instructions
            .extend(directives::dispatch(id, &node_directives));

        Ok(id)
    }
}
