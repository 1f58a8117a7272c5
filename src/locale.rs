//! Translation seam
//!
//! Translation catalogues live outside this crate. Forms only need a way to
//! pass user-facing strings through whatever locale service the host app
//! provides.

/// Locale service used to translate user-facing strings
pub trait Locale: Send + Sync {
    /// Current locale code, e.g. `en_GB`
    fn locale(&self) -> &str;

    /// Translate `text`, replacing `{name}` placeholders from `params`
    fn translate(&self, text: &str, params: &[(&str, &str)]) -> String;
}

/// Returns text untranslated, with placeholder replacement only
#[derive(Debug, Clone)]
pub struct PassthroughLocale {
    code: String,
}

impl PassthroughLocale {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
        }
    }
}

impl Default for PassthroughLocale {
    fn default() -> Self {
        Self::new("en_GB")
    }
}

impl Locale for PassthroughLocale {
    fn locale(&self) -> &str {
        &self.code
    }

    fn translate(&self, text: &str, params: &[(&str, &str)]) -> String {
        replace_placeholders(text, params)
    }
}

/// Replace each `{name}` in `text` with its value from `params`
pub fn replace_placeholders(text: &str, params: &[(&str, &str)]) -> String {
    params
        .iter()
        .fold(text.to_string(), |acc, (name, value)| {
            acc.replace(&format!("{{{name}}}"), value)
        })
}
