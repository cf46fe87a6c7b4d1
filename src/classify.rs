//! Attribute classification.
//!
//! For each attribute on a resolved element, decide its kind (static,
//! dynamic, spread, directive) and its namespace-aware target. Resolution is
//! a pure function of the written name, the owning element's namespace, and
//! the injected HTML property alias table; it never depends on sibling
//! attributes or position. Spread values carry no per-key resolution at
//! compile time: their keys are only known at runtime.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

use crate::ir::{
    AttributeIR, AttributeKind, AttributeSpec, AttributeTarget, AttributeValue, DirectiveKind,
    Namespace, XLINK_NAMESPACE_URI, XML_NAMESPACE_URI,
};

/// Name-to-DOM-property aliases for HTML elements (`class` -> `className`,
/// `for` -> `htmlFor`, ...). The table is owned by the HTML attribute
/// classifier collaborator and injected by the caller; SVG elements bypass
/// it entirely.
pub type HtmlPropertyAliases = HashMap<String, String>;

lazy_static! {
    /// Literal prefix followed by an uppercase letter. Exact anchored
    /// patterns, not camelCase splitting: `xlink`, `xlinkhref` and `xmlns`
    /// must not match.
    static ref XLINK_ATTR_RE: Regex = Regex::new(r"^xlink[A-Z]").unwrap();
    static ref XML_ATTR_RE: Regex = Regex::new(r"^xml[A-Z]").unwrap();
}

const XLINK_PREFIX_LEN: usize = "xlink".len();
const XML_PREFIX_LEN: usize = "xml".len();

/// `xlinkHref` -> `href`, `xmlRole` -> `role`: strip the prefix, lowercase
/// the leading letter, keep the rest as written.
fn namespaced_local_name(name: &str, prefix_len: usize) -> String {
    let rest = &name[prefix_len..];
    let mut chars = rest.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn directive_kind(name: &str) -> Option<DirectiveKind> {
    match name {
        "ref" => Some(DirectiveKind::Ref),
        "fn" => Some(DirectiveKind::Fn),
        _ => None,
    }
}

/// Resolve the target an attribute name writes to on its owner.
pub fn resolve_target(
    name: &str,
    owner: Namespace,
    aliases: &HtmlPropertyAliases,
) -> AttributeTarget {
    if XLINK_ATTR_RE.is_match(name) {
        return AttributeTarget::Attribute {
            namespace_uri: Some(XLINK_NAMESPACE_URI),
            local_name: namespaced_local_name(name, XLINK_PREFIX_LEN),
        };
    }
    if XML_ATTR_RE.is_match(name) {
        return AttributeTarget::Attribute {
            namespace_uri: Some(XML_NAMESPACE_URI),
            local_name: namespaced_local_name(name, XML_PREFIX_LEN),
        };
    }

    // SVG elements never take the HTML property aliases: `class`, `for`,
    // `className`, `htmlFor` are all set by their exact written name.
    if owner == Namespace::Html {
        if let Some(property) = aliases.get(name) {
            return AttributeTarget::Property {
                property_name: property.clone(),
            };
        }
    }

    AttributeTarget::Attribute {
        namespace_uri: None,
        local_name: name.to_string(),
    }
}

pub fn classify_attribute(
    attr: &AttributeIR,
    owner: Namespace,
    aliases: &HtmlPropertyAliases,
) -> AttributeSpec {
    // `ref` and `fn` are globally reserved in every namespace; they never
    // reach the generic attribute path.
    if let Some(directive) = directive_kind(&attr.name) {
        return AttributeSpec {
            name: attr.name.clone(),
            kind: AttributeKind::Directive { directive },
        };
    }

    let kind = match &attr.value {
        AttributeValue::Spread(_) => AttributeKind::Spread,
        AttributeValue::Static(_) => AttributeKind::Static {
            target: resolve_target(&attr.name, owner, aliases),
        },
        AttributeValue::Dynamic(_) => AttributeKind::Dynamic {
            target: resolve_target(&attr.name, owner, aliases),
        },
    };

    AttributeSpec {
        name: attr.name.clone(),
        kind,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
