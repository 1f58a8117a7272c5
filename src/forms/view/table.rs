//! Tabular layout

use super::{header, hidden_values, open_tag, row_attributes, steps, triggers, FormRenderer};
use crate::forms::form::Form;
use crate::forms::html::escape_html;

/// Renders each row as a table row with one cell per element. A heading
/// change inserts a break row spanning the full width.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormTableView;

impl FormTableView {
    pub fn new() -> Self {
        Self
    }
}

impl FormRenderer for FormTableView {
    fn render_form(&self, form: &Form) -> String {
        let mut parts = vec![open_tag(form)];
        header(form, &mut parts);
        steps(form, &mut parts);
        hidden_values(form, &mut parts);

        let rows = form.rows();
        let columns = rows.iter().map(|row| row.elements().len()).max().unwrap_or(0);
        parts.push("<table class=\"formTable\" cellspacing=\"0\">".to_string());

        let mut heading = "";
        for row in rows {
            if row.heading() != heading {
                heading = row.heading();
                if !heading.is_empty() {
                    parts.push(format!(
                        "<tr class=\"break\"><td colspan=\"{columns}\"><h3>{}</h3></td></tr>",
                        escape_html(heading)
                    ));
                }
            }

            let elements = row.elements();
            let last = elements.len() - 1;
            let cells: String = elements
                .iter()
                .enumerate()
                .map(|(index, element)| {
                    let span = columns - elements.len() + 1;
                    if index == last && span > 1 {
                        format!("<td colspan=\"{span}\">{}</td>", element.output())
                    } else {
                        format!("<td>{}</td>", element.output())
                    }
                })
                .collect();
            parts.push(format!("<tr{}>{cells}</tr>", row_attributes(row, "formRow")));
        }

        parts.push("</table>".to_string());
        triggers(form, &mut parts);
        parts.push("</form>".to_string());
        parts.join("\n")
    }
}
