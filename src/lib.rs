//! # Lumen View Compiler Core
//!
//! Lowers a parsed JSX-style tag tree into an ordered construction program
//! and emits the JavaScript that executes it against a DOM host.
//!
//! ## Lowering Invariants
//!
//! 1. **Single Resolution**: every element carries exactly one namespace
//!    before lowering begins. The resolver output type makes an unresolved
//!    element unrepresentable.
//! 2. **Pure Classification**: an attribute's kind and target are a function
//!    of (name, owner namespace, alias table) alone, never of position or
//!    sibling attributes. Spread entries are the one exception: their keys
//!    are unknown at compile time and resolve per-key at runtime.
//! 3. **Closed Tables**: the SVG tag set and the `xlink`/`xml` prefix rules
//!    are immutable lookup structures initialized once. Exact matches only;
//!    no prefix guessing.
//! 4. **SVG Bypass**: inside the SVG namespace the HTML property alias table
//!    is never consulted. `class`, `for`, `className`, `htmlFor` are set by
//!    their exact written name.
//! 5. **Construction Order**: create, then attributes in source order, then
//!    children appended in source order (each subtree complete before its
//!    append), then directives in source attribute order.
//! 6. **Reserved Directives**: `ref` and `fn` are consumed by the compiler
//!    in every namespace and never reach the constructed node.

mod classify;
mod directives;
mod emit;
mod ir;
mod lower;
mod namespace;

#[cfg(test)]
mod safety_tests;

use serde::Serialize;

pub use classify::{classify_attribute, resolve_target, HtmlPropertyAliases};
pub use emit::emit_program;
pub use ir::*;
pub use lower::{lower_tree, LoweredProgram};
pub use namespace::{is_svg_only_tag, resolve_element, resolve_tree};

// ═══════════════════════════════════════════════════════════════════════════════
// COMPILE PIPELINE
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub file_path: String,
    /// Supplied by the HTML attribute classifier collaborator; empty means
    /// no HTML property aliasing anywhere.
    pub html_property_aliases: HtmlPropertyAliases,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileResult {
    pub code: String,
    pub instructions: Vec<Instruction>,
    pub roots: Vec<usize>,
}

/// Full pipeline: resolve namespaces, lower to instructions, emit JS.
pub fn compile(
    nodes: &[TemplateNode],
    options: &CompileOptions,
) -> Result<CompileResult, CompilerError> {
    let resolved = resolve_tree(nodes);
    let program = lower_tree(&resolved, &options.html_property_aliases, &options.file_path)?;
    let code = emit_program(&program);
    Ok(CompileResult {
        code,
        instructions: program.instructions,
        roots: program.roots,
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// JSON ENTRY POINTS
// ═══════════════════════════════════════════════════════════════════════════════

fn parse_nodes(nodes_json: &str, file_path: &str) -> Result<Vec<TemplateNode>, CompilerError> {
    serde_json::from_str(nodes_json).map_err(|e| {
        CompilerError::new(
            PARSE_ERROR,
            &format!("Failed to parse template IR JSON: {}", e),
            file_path,
            0,
            0,
        )
    })
}

/// Resolve namespaces over a JSON-encoded tree, returning the annotated tree.
pub fn resolve_tree_json(nodes_json: &str, file_path: &str) -> Result<String, CompilerError> {
    let nodes = parse_nodes(nodes_json, file_path)?;
    let resolved = resolve_tree(&nodes);
    serde_json::to_string(&resolved).map_err(|e| {
        CompilerError::new(
            PARSE_ERROR,
            &format!("Failed to serialize resolved tree: {}", e),
            file_path,
            0,
            0,
        )
    })
}

/// Compile a JSON-encoded tree with default options, returning the result
/// (code, instructions, roots) as JSON.
pub fn compile_json(nodes_json: &str, file_path: &str) -> Result<String, CompilerError> {
    let nodes = parse_nodes(nodes_json, file_path)?;
    let options = CompileOptions {
        file_path: file_path.to_string(),
        ..CompileOptions::default()
    };
    let result = compile(&nodes, &options)?;
    serde_json::to_string(&result).map_err(|e| {
        CompilerError::new(
            PARSE_ERROR,
            &format!("Failed to serialize compile result: {}", e),
            file_path,
            0,
            0,
        )
    })
}
