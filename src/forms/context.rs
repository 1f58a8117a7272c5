//! Collaborators handed to form constructors

use super::factory::{DefaultFormFactory, FormFactory};
use super::view::{FormRenderer, FormTableView, StandardFormView};
use crate::config::FormsConfig;
use crate::locale::{Locale, PassthroughLocale};
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_FORM_CLASS: &str = "smallIntBorder fullWidth standardForm";
pub const DEFAULT_TABLE_CLASS: &str = "smallIntBorder fullWidth";

/// Everything a form needs from its host: factory, renderers, locale and
/// the default presentation settings. Cheap to clone.
#[derive(Clone)]
pub struct FormContext {
    factory: Arc<dyn FormFactory>,
    renderer: Arc<dyn FormRenderer>,
    table_renderer: Arc<dyn FormRenderer>,
    locale: Arc<dyn Locale>,
    form_class: String,
    table_class: String,
    autocomplete: bool,
}

impl FormContext {
    pub fn new(
        factory: Arc<dyn FormFactory>,
        renderer: Arc<dyn FormRenderer>,
        locale: Arc<dyn Locale>,
    ) -> Self {
        Self {
            factory,
            renderer,
            table_renderer: Arc::new(FormTableView::new()),
            locale,
            form_class: DEFAULT_FORM_CLASS.to_string(),
            table_class: DEFAULT_TABLE_CLASS.to_string(),
            autocomplete: true,
        }
    }

    /// Standard collaborators with presentation settings from `config`
    pub fn from_config(config: &FormsConfig) -> Self {
        let mut ctx = Self::default();
        if let Some(class) = &config.form_class {
            ctx.form_class = class.clone();
        }
        if let Some(class) = &config.table_class {
            ctx.table_class = class.clone();
        }
        if let Some(autocomplete) = config.autocomplete {
            ctx.autocomplete = autocomplete;
        }
        if let Some(code) = &config.locale {
            ctx.locale = Arc::new(PassthroughLocale::new(code));
        }
        ctx
    }

    pub fn with_factory(mut self, factory: Arc<dyn FormFactory>) -> Self {
        self.factory = factory;
        self
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn FormRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_table_renderer(mut self, renderer: Arc<dyn FormRenderer>) -> Self {
        self.table_renderer = renderer;
        self
    }

    pub fn with_locale(mut self, locale: Arc<dyn Locale>) -> Self {
        self.locale = locale;
        self
    }

    pub fn factory(&self) -> Arc<dyn FormFactory> {
        Arc::clone(&self.factory)
    }

    pub fn renderer(&self) -> Arc<dyn FormRenderer> {
        Arc::clone(&self.renderer)
    }

    pub fn table_renderer(&self) -> Arc<dyn FormRenderer> {
        Arc::clone(&self.table_renderer)
    }

    pub fn locale(&self) -> Arc<dyn Locale> {
        Arc::clone(&self.locale)
    }

    pub fn form_class(&self) -> &str {
        &self.form_class
    }

    pub fn table_class(&self) -> &str {
        &self.table_class
    }

    pub fn autocomplete(&self) -> bool {
        self.autocomplete
    }
}

impl Default for FormContext {
    fn default() -> Self {
        Self::new(
            Arc::new(DefaultFormFactory::new()),
            Arc::new(StandardFormView::new()),
            Arc::new(PassthroughLocale::default()),
        )
    }
}

impl fmt::Debug for FormContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormContext")
            .field("locale", &self.locale.locale())
            .field("form_class", &self.form_class)
            .field("table_class", &self.table_class)
            .field("autocomplete", &self.autocomplete)
            .finish_non_exhaustive()
    }
}
