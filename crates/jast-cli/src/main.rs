//! Java AST graph CLI.
//!
//! Provides the `jast` binary. Every subcommand loads a native parse tree
//! dump (the JSON form produced by a Java parser adapter), builds the AST
//! graph and then prints it, searches it or partitions it into subtrees.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use jast_core::{Ast, AstError, AstNodeType, NodesSearchFilter};

/// Java AST graph tools.
#[derive(Parser)]
#[command(name = "jast", about = "Java AST graph tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Print the tree, one node per line.
    Print {
        /// Path to the native tree dump (JSON).
        #[arg(short, long)]
        tree: PathBuf,
    },

    /// List nodes of the given types as `id<TAB>type<TAB>line`.
    Find {
        /// Path to the native tree dump (JSON).
        #[arg(short, long)]
        tree: PathBuf,

        /// Node types to match, e.g. MethodDeclaration. All nodes if omitted.
        #[arg(short = 'T', long = "type")]
        types: Vec<String>,

        /// Search filter: all, top-level, bottom-level.
        #[arg(short, long, default_value = "all")]
        filter: String,
    },

    /// Print the node ids of each maximal subtree rooted at the given types.
    Subtrees {
        /// Path to the native tree dump (JSON).
        #[arg(short, long)]
        tree: PathBuf,

        /// Root node types.
        #[arg(short = 'T', long = "type", required = true)]
        types: Vec<String>,
    },
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut out = io::stdout().lock();

    let exit_code = match cli.command {
        Commands::Print { tree } => run_print(&tree, &mut out),
        Commands::Find {
            tree,
            types,
            filter,
        } => run_find(&tree, &types, &filter, &mut out),
        Commands::Subtrees { tree, types } => run_subtrees(&tree, &types, &mut out),
    };
    let exit_code = match out.flush() {
        Ok(()) => exit_code,
        Err(e) => report_write(Err(e)),
    };
    drop(out);
    process::exit(exit_code);
}

/// Execute the print subcommand.
///
/// Returns exit code: 0 = success, 2 = build error, 3 = I/O error.
fn run_print(tree: &Path, out: &mut impl Write) -> i32 {
    let ast = match load_ast(tree) {
        Ok(ast) => ast,
        Err(code) => return code,
    };
    report_write(write!(out, "{ast}"))
}

/// Execute the find subcommand.
///
/// Returns exit code: 0 = success, 1 = bad type or filter,
/// 2 = build error, 3 = I/O error.
fn run_find(tree: &Path, types: &[String], filter: &str, out: &mut impl Write) -> i32 {
    let node_types = match parse_node_types(types) {
        Ok(node_types) => node_types,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return 1;
        }
    };
    let filter: NodesSearchFilter = match filter.parse() {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let ast = match load_ast(tree) {
        Ok(ast) => ast,
        Err(code) => return code,
    };
    let written = ast.find_nodes(&node_types, filter).iter().try_for_each(|node| {
        let line = node.line().map(|line| line.to_string()).unwrap_or_default();
        writeln!(out, "{}\t{}\t{}", node.id(), node.node_type(), line)
    });
    report_write(written)
}

/// Execute the subtrees subcommand.
///
/// Returns exit code: 0 = success, 1 = bad type, 2 = build error,
/// 3 = I/O error.
fn run_subtrees(tree: &Path, types: &[String], out: &mut impl Write) -> i32 {
    let node_types = match parse_node_types(types) {
        Ok(node_types) => node_types,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return 1;
        }
    };

    let ast = match load_ast(tree) {
        Ok(ast) => ast,
        Err(code) => return code,
    };
    let written = ast.get_subtrees(&node_types).iter().try_for_each(|subtree| {
        let ids: Vec<String> = subtree.preorder().map(|node| node.id().to_string()).collect();
        writeln!(out, "{}", ids.join(" "))
    });
    report_write(written)
}

/// Maps the result of writing command output to an exit code.
fn report_write(result: io::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: failed to write output: {}", e);
            3
        }
    }
}

/// Reads and builds the AST, reporting failures on stderr.
///
/// On failure returns the exit code: 2 = build error, 3 = I/O error.
fn load_ast(path: &Path) -> Result<Ast, i32> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error: failed to read '{}': {}", path.display(), e);
            return Err(3);
        }
    };

    match Ast::from_json(&json) {
        Ok(ast) => {
            tracing::debug!(path = %path.display(), nodes = ast.len(), "loaded AST");
            Ok(ast)
        }
        Err(e @ AstError::Json(_)) => {
            eprintln!("Error: '{}' is not a native tree dump: {}", path.display(), e);
            Err(2)
        }
        Err(e) => {
            eprintln!("Build error: {}", e);
            Err(2)
        }
    }
}

/// Parse node type names such as `MethodDeclaration`.
fn parse_node_types(names: &[String]) -> Result<Vec<AstNodeType>, String> {
    names
        .iter()
        .map(|name| {
            name.parse::<AstNodeType>()
                .map_err(|_| format!("unknown node type '{}'", name))
        })
        .collect()
}
