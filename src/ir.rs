use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════════
// INVARIANT CODES
// ═══════════════════════════════════════════════════════════════════════════════

pub const INV_DIRECTIVE_VALUE: &str = "L-ERR-DIRECTIVE-VALUE";
pub const PARSE_ERROR: &str = "PARSE_ERROR";

// ═══════════════════════════════════════════════════════════════════════════════
// GUARANTEES
// ═══════════════════════════════════════════════════════════════════════════════

fn get_guarantee(code: &str) -> &'static str {
    match code {
        INV_DIRECTIVE_VALUE => {
            "Directive values are expressions; a ref target must be assignable and an fn value callable."
        }
        PARSE_ERROR => "Input trees are well-formed IR produced by the template parser.",
        _ => "Unknown invariant.",
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMPILER ERROR
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompilerError {
    pub code: String,
    pub error_type: String,
    pub message: String,
    pub guarantee: String,
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub context: Option<String>,
    pub hints: Vec<String>,
}

impl CompilerError {
    pub fn new(code: &str, message: &str, file: &str, line: u32, column: u32) -> Self {
        Self::with_details(code, message, file, line, column, None, vec![])
    }

    pub fn with_details(
        code: &str,
        message: &str,
        file: &str,
        line: u32,
        column: u32,
        context: Option<String>,
        hints: Vec<String>,
    ) -> Self {
        CompilerError {
            code: code.to_string(),
            error_type: "COMPILER_INVARIANT_VIOLATION".to_string(),
            message: message.to_string(),
            guarantee: get_guarantee(code).to_string(),
            file: file.to_string(),
            line,
            column,
            context,
            hints,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAMESPACES
// ═══════════════════════════════════════════════════════════════════════════════

pub const SVG_NAMESPACE_URI: &str = "http://www.w3.org/2000/svg";
pub const XLINK_NAMESPACE_URI: &str = "http://www.w3.org/1999/xlink";
pub const XML_NAMESPACE_URI: &str = "http://www.w3.org/XML/1998/namespace";

/// Element namespace. HTML is the null XML namespace, so it carries no URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Namespace {
    Html,
    Svg,
}

// ═══════════════════════════════════════════════════════════════════════════════
// INPUT IR TYPES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionIR {
    #[serde(default)]
    pub id: String,
    pub code: String,
    #[serde(default)]
    pub location: SourceLocation,
}

/// Spread source: the entries of the evaluated object become attributes at
/// construction time, each resolved with the host element's namespace rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadIR {
    pub spread: String,
    #[serde(default)]
    pub location: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Static(String),
    Dynamic(ExpressionIR),
    Spread(SpreadIR),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeIR {
    pub name: String,
    pub value: AttributeValue,
    #[serde(default)]
    pub location: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TemplateNode {
    Element(ElementNode),
    Text(TextNode),
    Expression(ExpressionNode),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementNode {
    pub tag: String,
    pub attributes: Vec<AttributeIR>,
    pub children: Vec<TemplateNode>,
    #[serde(default)]
    pub location: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextNode {
    pub value: String,
    #[serde(default)]
    pub location: SourceLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionNode {
    pub expression: ExpressionIR,
    #[serde(default)]
    pub location: SourceLocation,
}

// ═══════════════════════════════════════════════════════════════════════════════
// RESOLVED TREE
// ═══════════════════════════════════════════════════════════════════════════════

/// Tree after namespace resolution. Every element carries exactly one
/// namespace; lowering never sees an unresolved node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ResolvedNode {
    Element(ResolvedElement),
    Text(TextNode),
    Expression(ExpressionNode),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedElement {
    pub tag: String,
    pub namespace: Namespace,
    pub attributes: Vec<AttributeIR>,
    pub children: Vec<ResolvedNode>,
    #[serde(default)]
    pub location: SourceLocation,
}

// ═══════════════════════════════════════════════════════════════════════════════
// ATTRIBUTE CLASSIFICATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Where a classified attribute lands on the constructed node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum AttributeTarget {
    Attribute {
        namespace_uri: Option<&'static str>,
        local_name: String,
    },
    Property {
        property_name: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectiveKind {
    Ref,
    Fn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AttributeKind {
    Static { target: AttributeTarget },
    Dynamic { target: AttributeTarget },
    Spread,
    Directive { directive: DirectiveKind },
}

/// Classifier output: the written name plus its resolved kind and target.
/// Resolution is a pure function of (name, owner namespace, alias table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSpec {
    pub name: String,
    pub kind: AttributeKind,
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONSTRUCTION INSTRUCTIONS
// ═══════════════════════════════════════════════════════════════════════════════

/// One step of the construction program. Node identity is the creation-order
/// index assigned during lowering; the sequence is built once per tree and
/// consumed unmutated by the emitter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum Instruction {
    CreateElement {
        node: usize,
        tag: String,
        namespace: Namespace,
    },
    SetAttribute {
        node: usize,
        name: String,
        namespace_uri: Option<&'static str>,
        value: String,
    },
    SetProperty {
        node: usize,
        name: String,
        value: String,
    },
    CreateText {
        node: usize,
        value: String,
    },
    /// Reactive text content for an expression child.
    BindText {
        node: usize,
        code: String,
    },
    AppendChild {
        parent: usize,
        child: usize,
    },
    /// Reactive attribute/property registration against the runtime.
    BindAttribute {
        node: usize,
        target: AttributeTarget,
        code: String,
    },
    /// Runtime spread application carrying the host element's namespace.
    ApplySpread {
        node: usize,
        code: String,
        namespace: Namespace,
    },
    BindRef {
        node: usize,
        target_code: String,
    },
    InvokeFn {
        node: usize,
        code: String,
    },
}
