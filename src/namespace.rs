//! Namespace resolution for the template tree.
//!
//! A single top-down traversal assigns every element exactly one namespace.
//! The current namespace threads down the call stack as an immutable
//! parameter; the `<foreignObject>` reversion to HTML is a parameter
//! override at one call site.

use lazy_static::lazy_static;
use std::collections::HashSet;

use crate::ir::{ElementNode, Namespace, ResolvedElement, ResolvedNode, TemplateNode};

lazy_static! {
    /// Tags that exist only in the SVG namespace, keyed by the exact source
    /// casing the template parser preserves. An element with one of these
    /// tags is SVG at any depth, which is what lets a bare `<circle>`
    /// fragment compile standalone. Ambiguous names shared with HTML
    /// (`a`, `title`) are deliberately absent: they inherit their context
    /// and default to HTML at top level.
    static ref SVG_ONLY_TAGS: HashSet<&'static str> = {
        let mut s = HashSet::new();
        s.insert("svg");
        s.insert("animate");
        s.insert("animateMotion");
        s.insert("animateTransform");
        s.insert("circle");
        s.insert("clipPath");
        s.insert("defs");
        s.insert("desc");
        s.insert("ellipse");
        s.insert("feBlend");
        s.insert("feColorMatrix");
        s.insert("feComponentTransfer");
        s.insert("feComposite");
        s.insert("feConvolveMatrix");
        s.insert("feDiffuseLighting");
        s.insert("feDisplacementMap");
        s.insert("feDropShadow");
        s.insert("feFlood");
        s.insert("feFuncA");
        s.insert("feFuncB");
        s.insert("feFuncG");
        s.insert("feFuncR");
        s.insert("feGaussianBlur");
        s.insert("feImage");
        s.insert("feMerge");
        s.insert("feMergeNode");
        s.insert("feMorphology");
        s.insert("feOffset");
        s.insert("feSpecularLighting");
        s.insert("feTile");
        s.insert("feTurbulence");
        s.insert("filter");
        s.insert("foreignObject");
        s.insert("g");
        s.insert("image");
        s.insert("line");
        s.insert("linearGradient");
        s.insert("marker");
        s.insert("mask");
        s.insert("metadata");
        s.insert("mpath");
        s.insert("path");
        s.insert("pattern");
        s.insert("polygon");
        s.insert("polyline");
        s.insert("radialGradient");
        s.insert("rect");
        s.insert("set");
        s.insert("stop");
        s.insert("switch");
        s.insert("symbol");
        s.insert("text");
        s.insert("textPath");
        s.insert("tspan");
        s.insert("use");
        s.insert("view");
        s
    };
}

/// Exact-membership test against the closed SVG tag set. Never a prefix
/// match: `textField` shares a prefix with `text` and must stay HTML.
pub fn is_svg_only_tag(tag: &str) -> bool {
    SVG_ONLY_TAGS.contains(tag)
}

/// Resolve a forest of top-level nodes. Top-level context is HTML.
pub fn resolve_tree(nodes: &[TemplateNode]) -> Vec<ResolvedNode> {
    nodes
        .iter()
        .map(|n| resolve_node(n, Namespace::Html))
        .collect()
}

fn resolve_node(node: &TemplateNode, context: Namespace) -> ResolvedNode {
    match node {
        TemplateNode::Element(el) => ResolvedNode::Element(resolve_element(el, context)),
        TemplateNode::Text(t) => ResolvedNode::Text(t.clone()),
        TemplateNode::Expression(e) => ResolvedNode::Expression(e.clone()),
    }
}

pub fn resolve_element(el: &ElementNode, context: Namespace) -> ResolvedElement {
    let namespace = if el.tag == "svg" || context == Namespace::Svg || is_svg_only_tag(&el.tag) {
        Namespace::Svg
    } else {
        Namespace::Html
    };

    // HTML content is expected inside <foreignObject>: the element itself is
    // SVG but its children resolve in HTML context.
    let child_context = if namespace == Namespace::Svg && el.tag == "foreignObject" {
        Namespace::Html
    } else {
        namespace
    };

    ResolvedElement {
        tag: el.tag.clone(),
        namespace,
        attributes: el.attributes.clone(),
        children: el
            .children
            .iter()
            .map(|c| resolve_node(c, child_context))
            .collect(),
        location: el.location.clone(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
