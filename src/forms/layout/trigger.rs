//! Client-side visibility triggers

use crate::forms::html::escape_js_string;

/// Which field event a rule listens to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerSource {
    Select(String),
    Checkbox(String),
    Radio(String),
}

impl TriggerSource {
    pub fn field(&self) -> &str {
        match self {
            TriggerSource::Select(name)
            | TriggerSource::Checkbox(name)
            | TriggerSource::Radio(name) => name,
        }
    }
}

/// When a rule fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerCondition {
    When(Vec<String>),
    WhenNot(Vec<String>),
}

/// What a rule does to the trigger's selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerAction {
    #[default]
    ToggleVisibility,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerRule {
    pub source: TriggerSource,
    pub condition: TriggerCondition,
}

/// Declarative show/hide rules for everything matching a selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    selector: String,
    action: TriggerAction,
    pending: Option<TriggerSource>,
    rules: Vec<TriggerRule>,
}

impl Trigger {
    pub fn new(selector: &str, action: TriggerAction) -> Self {
        Self {
            selector: selector.to_string(),
            action,
            pending: None,
            rules: Vec::new(),
        }
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn action(&self) -> TriggerAction {
        self.action
    }

    pub fn rules(&self) -> &[TriggerRule] {
        &self.rules
    }

    pub fn on_select(&mut self, name: &str) -> &mut Self {
        self.pending = Some(TriggerSource::Select(name.to_string()));
        self
    }

    pub fn on_checkbox(&mut self, name: &str) -> &mut Self {
        self.pending = Some(TriggerSource::Checkbox(name.to_string()));
        self
    }

    pub fn on_radio(&mut self, name: &str) -> &mut Self {
        self.pending = Some(TriggerSource::Radio(name.to_string()));
        self
    }

    /// Show the selector while the source field has one of `values`
    pub fn when<I, S>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.push_rule(TriggerCondition::When(values))
    }

    /// Show the selector while the source field has none of `values`
    pub fn when_not<I, S>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.push_rule(TriggerCondition::WhenNot(values))
    }

    fn push_rule(&mut self, condition: TriggerCondition) -> &mut Self {
        match self.pending.clone() {
            Some(source) => self.rules.push(TriggerRule { source, condition }),
            None => tracing::warn!(
                selector = %self.selector,
                "trigger condition added before a source field; ignoring"
            ),
        }
        self
    }

    /// Render the rules as a script fragment. All rules must hold for the
    /// selector to be visible; a trigger without rules renders nothing.
    pub fn output(&self) -> String {
        if self.rules.is_empty() {
            return String::new();
        }

        let sources: Vec<String> = self.rules.iter().map(|r| source_selector(&r.source)).collect();
        let checks: Vec<String> = self.rules.iter().map(rule_check).collect();
        let listen = escape_js_string(&sources.join(", "));
        let target = escape_js_string(&self.selector);
        let show = checks.join(" && ");

        match self.action {
            TriggerAction::ToggleVisibility => format!(
                "$(\"{listen}\").on('change', function() {{ var show = {show}; $(\"{target}\").toggle(show).find('input,select,textarea').prop('disabled', !show); }}).first().trigger('change');"
            ),
        }
    }
}

/// CSS selector for the field a rule listens to
fn source_selector(source: &TriggerSource) -> String {
    let name = escape_css_string(source.field());
    match source {
        TriggerSource::Select(_) => format!("select[name=\"{name}\"]"),
        TriggerSource::Checkbox(_) | TriggerSource::Radio(_) => format!("input[name=\"{name}\"]"),
    }
}

/// Escape text for a double-quoted CSS string
fn escape_css_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn rule_check(rule: &TriggerRule) -> String {
    let field = source_selector(&rule.source);
    let current = match &rule.source {
        TriggerSource::Select(_) => format!("$(\"{}\").val()", escape_js_string(&field)),
        TriggerSource::Checkbox(_) | TriggerSource::Radio(_) => {
            format!("$(\"{}\").val()", escape_js_string(&format!("{field}:checked")))
        }
    };
    let (values, negate) = match &rule.condition {
        TriggerCondition::When(values) => (values, ""),
        TriggerCondition::WhenNot(values) => (values, "!"),
    };
    let list: Vec<String> = values
        .iter()
        .map(|v| format!("\"{}\"", escape_js_string(v)))
        .collect();
    format!("{negate}[{}].includes(String({current}))", list.join(","))
}
