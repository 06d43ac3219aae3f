//! Stylesheet serialization
//!
//! Writes a parsed tree back out as CSS with two-space indentation.

use std::fmt::{self, Write};

use crate::parser::{AtRule, Declaration, Node, Rule, Stylesheet};

const INDENT: &str = "  ";

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_nodes(f, &self.nodes, 0)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self, 0)
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.value)?;
        if self.important {
            f.write_str(" !important")?;
        }
        f.write_char(';')
    }
}

fn write_nodes(f: &mut fmt::Formatter<'_>, nodes: &[Node], depth: usize) -> fmt::Result {
    for node in nodes {
        write_node(f, node, depth)?;
        f.write_char('\n')?;
    }
    Ok(())
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node, depth: usize) -> fmt::Result {
    write_indent(f, depth)?;
    match node {
        Node::Declaration(decl) => write!(f, "{}", decl),
        Node::Comment(text) => write!(f, "/*{}*/", text),
        Node::Rule(Rule { selector, nodes }) => {
            f.write_str(selector)?;
            write_block(f, nodes, depth)
        }
        Node::AtRule(AtRule { name, params, nodes }) => {
            write!(f, "@{}", name)?;
            if !params.is_empty() {
                write!(f, " {}", params)?;
            }
            match nodes {
                Some(nodes) => write_block(f, nodes, depth),
                None => f.write_char(';'),
            }
        }
    }
}

fn write_block(f: &mut fmt::Formatter<'_>, nodes: &[Node], depth: usize) -> fmt::Result {
    if nodes.is_empty() {
        return f.write_str(" {}");
    }
    f.write_str(" {\n")?;
    write_nodes(f, nodes, depth + 1)?;
    write_indent(f, depth)?;
    f.write_char('}')
}

fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    Ok(())
}
