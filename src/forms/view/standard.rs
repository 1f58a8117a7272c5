//! Sectioned layout: one fieldset per heading

use super::{header, hidden_values, open_tag, row_attributes, steps, triggers, FormRenderer};
use crate::forms::form::Form;
use crate::forms::html::escape_html;

/// Renders rows grouped by heading, each group in its own fieldset.
/// Ungrouped rows render bare; rows without elements are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFormView;

impl StandardFormView {
    pub fn new() -> Self {
        Self
    }
}

impl FormRenderer for StandardFormView {
    fn render_form(&self, form: &Form) -> String {
        let mut parts = vec![open_tag(form)];
        header(form, &mut parts);
        steps(form, &mut parts);
        hidden_values(form, &mut parts);

        for (heading, rows) in form.rows_by_heading() {
            let rows: Vec<String> = rows
                .into_iter()
                .filter(|row| !row.is_empty())
                .map(|row| {
                    let elements: String = row.elements().iter().map(|e| e.output()).collect();
                    format!("<div{}>{elements}</div>", row_attributes(row, "row"))
                })
                .collect();
            if rows.is_empty() {
                continue;
            }
            if heading.is_empty() {
                parts.extend(rows);
            } else {
                parts.push("<fieldset>".to_string());
                parts.push(format!("<legend>{}</legend>", escape_html(heading)));
                parts.extend(rows);
                parts.push("</fieldset>".to_string());
            }
        }

        triggers(form, &mut parts);
        parts.push("</form>".to_string());
        parts.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::context::FormContext;
    use crate::forms::elements::TextField;
    use pretty_assertions::assert_eq;

    fn form() -> Form {
        Form::create(&FormContext::default(), "testID", "testAction")
    }

    #[test]
    fn test_empty_form() {
        assert_eq!(
            StandardFormView::new().render_form(&form()),
            "<form action=\"testAction\" autocomplete=\"on\" class=\"smallIntBorder fullWidth standardForm\" enctype=\"multipart/form-data\" id=\"testID\" method=\"post\">\n</form>"
        );
    }

    #[test]
    fn test_sections_and_hidden_values() {
        let mut form = form();
        form.set_title("Edit");
        form.add_hidden_value("a", "b");
        form.add_row("r1").add_content("Hello");
        form.add_section("Contact", "")
            .add_label("email", "Email")
            .add_element(TextField::new("email"));

        let expected = [
            "<form action=\"testAction\" autocomplete=\"on\" class=\"smallIntBorder fullWidth standardForm\" enctype=\"multipart/form-data\" id=\"testID\" method=\"post\">",
            "<h2>Edit</h2>",
            "<input type=\"hidden\" name=\"a\" value=\"b\">",
            "<div class=\"row\" id=\"r1\">Hello</div>",
            "<fieldset>",
            "<legend>Contact</legend>",
            "<div class=\"row\"><label for=\"email\"><b>Email</b></label><input id=\"email\" name=\"email\" type=\"text\"></div>",
            "</fieldset>",
            "</form>",
        ]
        .join("\n");
        assert_eq!(StandardFormView::new().render_form(&form), expected);
    }

    #[test]
    fn test_heading_with_only_empty_rows_is_skipped() {
        let mut form = form();
        form.add_section("Nothing here", "");
        form.add_section("Details", "").add_content("x");
        let output = StandardFormView::new().render_form(&form);
        assert!(!output.contains("Nothing here"));
        assert!(output.contains("<legend>Details</legend>"));
    }

    #[test]
    fn test_trigger_script_rendered_after_rows() {
        let mut form = form();
        form.add_row("statusRow").add_content("Status");
        form.toggle_visibility_by_id("statusRow")
            .on_select("status")
            .when(["Left"]);
        let output = StandardFormView::new().render_form(&form);
        let script = output.find("<script").unwrap();
        assert!(output.find("statusRow").unwrap() < script);
        assert!(output.ends_with("</script>\n</form>"));
    }
}
