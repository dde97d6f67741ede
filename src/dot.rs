//! Graphviz DOT output for the diagram IR.

use crate::ir::{Cardinality, ColumnIR, Edge, GraphIR, Node};
use crate::theme::Theme;

pub struct DotRenderer {
    theme: Theme,
    show_columns: bool,
    show_types: bool,
}

impl Default for DotRenderer {
    fn default() -> Self {
        Self::new(Theme::default(), false, false)
    }
}

impl DotRenderer {
    pub fn new(theme: Theme, show_columns: bool, show_types: bool) -> Self {
        Self {
            theme,
            show_columns,
            show_types,
        }
    }

    pub fn render(&self, ir: &GraphIR) -> String {
        let mut dot = String::new();
        dot.push_str("digraph {\n");
        dot.push_str("  graph [ rankdir=\"LR\" bgcolor=\"#ffffff\" ]\n");
        dot.push_str(&format!(
            "  node [ style=\"filled\" shape=\"{}\" gradientangle=\"180\" ]\n",
            self.theme.shape
        ));
        dot.push_str("  edge [ arrowhead=\"none\" arrowtail=\"none\" dir=\"both\" ]\n\n");

        for node in &ir.nodes {
            self.render_node(&mut dot, node);
        }
        dot.push('\n');
        for edge in &ir.edges {
            self.render_edge(&mut dot, edge);
        }

        dot.push_str("}\n");
        dot
    }

    fn render_node(&self, dot: &mut String, node: &Node) {
        let theme = &self.theme;
        let colspan = if self.show_types { 2 } else { 1 };

        dot.push_str(&format!("  {} [\n", node.id));
        dot.push_str(&format!(
            "    fillcolor=\"{}\" color=\"{}\" penwidth=\"1\"\n",
            theme.fill(self.show_columns),
            theme.color
        ));
        dot.push_str(&format!(
            "    label=<<table style=\"{}\" border=\"0\" cellborder=\"0\" cellspacing=\"0\" cellpadding=\"1\">\n",
            theme.style
        ));
        dot.push_str(&format!(
            "      <tr><td bgcolor=\"{}\" align=\"center\" colspan=\"{}\"><font color=\"{}\"><b>{}</b></font></td></tr>\n",
            theme.bgcolor,
            colspan,
            theme.tcolor,
            escape_html(&node.label)
        ));

        if self.show_columns {
            for column in &node.columns {
                let name = decorate(column);
                if self.show_types {
                    dot.push_str(&format!(
                        "      <tr><td align=\"left\"><font color=\"{}\">{}&nbsp;</font></td>\n",
                        theme.icolor, name
                    ));
                    dot.push_str(&format!(
                        "        <td align=\"left\"><font color=\"{}\">{}</font></td></tr>\n",
                        theme.icolor,
                        escape_html(&column.typ)
                    ));
                } else {
                    dot.push_str(&format!(
                        "      <tr><td align=\"left\"><font color=\"{}\">{}</font></td></tr>\n",
                        theme.icolor, name
                    ));
                }
            }
        }

        dot.push_str("    </table>>\n  ]\n");
    }

    fn render_edge(&self, dot: &mut String, edge: &Edge) {
        let dashed = if edge.dashed { " style=\"dashed\"" } else { "" };
        let arrow = match edge.cardinality {
            Cardinality::OneToOne => "",
            Cardinality::OneToMany => " arrowtail=\"crow\"",
        };
        dot.push_str(&format!(
            "  {} -> {} [ penwidth=\"{}\" color=\"{}\"{}{} ]\n",
            edge.from, edge.to, self.theme.penwidth, self.theme.pencolor, dashed, arrow
        ));
    }
}

/// Column name with its key and flag markup.
fn decorate(column: &ColumnIR) -> String {
    let mut name = escape_html(&column.name);
    if column.is_pk {
        name = format!("<u>{}</u>", name);
    }
    if column.is_fk {
        name = format!("<i>{}</i>", name);
    }
    if column.nullable {
        name.push('*');
    }
    if column.identity {
        name.push_str(" I");
    }
    if column.unique {
        name.push_str(" U");
    }
    name
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
