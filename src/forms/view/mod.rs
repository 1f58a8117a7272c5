//! Form renderers
//!
//! A renderer reads a finished [`Form`] and produces its markup. The pieces
//! every layout shares (opening tag, header actions, step list, hidden
//! values, trigger script) live here; the layouts decide how rows are laid
//! out.

mod standard;
mod table;

pub use standard::StandardFormView;
pub use table::FormTableView;

use super::attributes::BasicAttributes;
use super::form::Form;
use super::html::escape_html;
use super::layout::Row;

/// Turns a populated form into markup
#[cfg_attr(test, mockall::automock)]
pub trait FormRenderer: Send + Sync {
    fn render_form(&self, form: &Form) -> String;
}

/// `<form ...>` with every form attribute
pub(crate) fn open_tag(form: &Form) -> String {
    format!("<form{}>", form.attributes().to_html())
}

/// Header actions, title and description, in that order
pub(crate) fn header(form: &Form, parts: &mut Vec<String>) {
    if !form.header().is_empty() {
        let actions: String = form.header().iter().map(|a| a.output()).collect();
        parts.push(format!("<div class=\"linkTop\">{actions}</div>"));
    }
    if !form.title().is_empty() {
        parts.push(format!("<h2>{}</h2>", escape_html(form.title())));
    }
    if !form.description().is_empty() {
        parts.push(format!("<p>{}</p>", escape_html(form.description())));
    }
}

/// Step list for multi-part forms; steps before the current one are complete
pub(crate) fn steps(form: &Form, parts: &mut Vec<String>) {
    let Some(current) = form.current_step() else {
        return;
    };
    let items: String = form
        .multi_part_steps()
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let class = match (index + 1).cmp(&current) {
                std::cmp::Ordering::Less => "step complete",
                std::cmp::Ordering::Equal => "step active",
                std::cmp::Ordering::Greater => "step",
            };
            format!("<li class=\"{class}\">{}</li>", escape_html(label))
        })
        .collect();
    parts.push(format!("<ol class=\"multiPartForm\">{items}</ol>"));
}

pub(crate) fn hidden_values(form: &Form, parts: &mut Vec<String>) {
    parts.extend(form.hidden_values().iter().map(|value| value.output()));
}

/// One script block holding every trigger that has rules
pub(crate) fn triggers(form: &Form, parts: &mut Vec<String>) {
    let scripts: Vec<String> = form
        .triggers()
        .map(|(_, trigger)| trigger.output())
        .filter(|script| !script.is_empty())
        .collect();
    if scripts.is_empty() {
        return;
    }
    parts.push("<script type=\"text/javascript\">".to_string());
    parts.extend(scripts);
    parts.push("</script>".to_string());
}

/// A row's attributes with `class` appended to its own classes
pub(crate) fn row_attributes(row: &Row, class: &str) -> String {
    let mut attributes = row.attributes().clone();
    let combined = match row.class() {
        "" => class.to_string(),
        own => format!("{class} {own}"),
    };
    attributes.set("class", combined);
    attributes.to_html()
}
