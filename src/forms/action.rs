//! Header actions: toolbar-style links rendered beside a form's title

use super::html::escape_html;
use url::form_urlencoded;

/// A link or button shown in the form header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    name: String,
    label: String,
    url: String,
    params: Vec<(String, String)>,
    icon: String,
    modal: Option<(u32, u32)>,
    direct_link: bool,
    display_label: bool,
}

impl Action {
    /// Create an action; an empty label falls back to the name
    pub fn new(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: if label.is_empty() {
                name.to_string()
            } else {
                label.to_string()
            },
            url: String::new(),
            params: Vec::new(),
            icon: name.to_string(),
            modal: None,
            direct_link: false,
            display_label: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn modal(&self) -> Option<(u32, u32)> {
        self.modal
    }

    pub fn is_direct_link(&self) -> bool {
        self.direct_link
    }

    pub fn set_url(&mut self, url: &str) -> &mut Self {
        self.url = url.trim_start_matches('/').to_string();
        self
    }

    pub fn add_param(&mut self, name: &str, value: &str) -> &mut Self {
        self.params.push((name.to_string(), value.to_string()));
        self
    }

    pub fn set_icon(&mut self, icon: &str) -> &mut Self {
        self.icon = icon.to_string();
        self
    }

    /// Open the target in a modal window of the given size
    pub fn modal_window(&mut self, width: u32, height: u32) -> &mut Self {
        self.modal = Some((width, height));
        self
    }

    /// Link straight to the URL instead of routing it through the page loader
    pub fn direct_link(&mut self, direct: bool) -> &mut Self {
        self.direct_link = direct;
        self
    }

    /// Show the label text next to the icon
    pub fn display_label(&mut self) -> &mut Self {
        self.display_label = true;
        self
    }

    /// Full link target including the url-encoded query string
    pub fn href(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if !self.direct_link && !self.url.is_empty() {
            query.append_pair("q", &format!("/{}", self.url));
        }
        for (name, value) in &self.params {
            query.append_pair(name, value);
        }
        if let Some((width, height)) = self.modal {
            query.append_pair("width", &width.to_string());
            query.append_pair("height", &height.to_string());
        }
        let query = query.finish();

        let base = if self.direct_link {
            self.url.clone()
        } else {
            "index.php".to_string()
        };
        if query.is_empty() {
            base
        } else {
            format!("{base}?{query}")
        }
    }

    pub fn output(&self) -> String {
        let class = if self.modal.is_some() {
            "action thickbox"
        } else {
            "action"
        };
        let label = if self.display_label {
            format!(" <span>{}</span>", escape_html(&self.label))
        } else {
            String::new()
        };
        format!(
            "<a href=\"{}\" class=\"{class}\" title=\"{}\"><i class=\"icon icon-{}\"></i>{label}</a>",
            escape_html(&self.href()),
            escape_html(&self.label),
            escape_html(&self.icon),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_label_defaults_to_name() {
        let action = Action::new("scan", "");
        assert_eq!(action.label(), "scan");
        assert_eq!(action.icon(), "scan");
    }

    #[test]
    fn test_routed_href() {
        let mut action = Action::new("view", "Preview");
        action
            .set_url("/modules/Reports/templates_prototypes_preview.php")
            .add_param("TB_iframe", "true")
            .modal_window(900, 500);
        assert_eq!(
            action.href(),
            "index.php?q=%2Fmodules%2FReports%2Ftemplates_prototypes_preview.php&TB_iframe=true&width=900&height=500"
        );
    }

    #[test]
    fn test_direct_link_href() {
        let mut action = Action::new("scan", "Scan Template Directories");
        action
            .set_url("/modules/Reports/templates_prototypes_scanProcess.php")
            .direct_link(true);
        assert_eq!(
            action.href(),
            "modules/Reports/templates_prototypes_scanProcess.php"
        );
    }

    #[test]
    fn test_output_with_label() {
        let mut action = Action::new("scan", "Scan & Update");
        action
            .set_icon("run")
            .set_url("scan.php")
            .direct_link(true)
            .display_label();
        assert_eq!(
            action.output(),
            "<a href=\"scan.php\" class=\"action\" title=\"Scan &amp; Update\"><i class=\"icon icon-run\"></i> <span>Scan &amp; Update</span></a>"
        );
    }

    #[test]
    fn test_modal_output_class() {
        let mut action = Action::new("view", "Preview");
        action.modal_window(600, 400);
        assert!(action.output().contains("class=\"action thickbox\""));
        assert_eq!(action.modal(), Some((600, 400)));
    }
}
