//! Template resolution and compilation
//!
//! A [`TemplateSet`] names a main template and any partial overrides. It is
//! resolved against a table of [`DefaultTemplates`] and compiled into a
//! handlebars registry with HTML escaping switched off, since changelogs are
//! markdown and backticks or angle brackets must come through as written.

use handlebars::Handlebars;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::Result;

const MAIN_TEMPLATE: &str = "changelog";

/// Main template and partial overrides for one changelog style
///
/// Each partial override is tri-state: missing means "use the default",
/// `Some(None)` (JSON `null`) or an empty body suppresses the partial, and a
/// non-empty body replaces the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSet {
    #[serde(default)]
    pub main_template: Option<String>,

    #[serde(default, deserialize_with = "explicit_value")]
    pub header_partial: Option<Option<String>>,

    #[serde(default, deserialize_with = "explicit_value")]
    pub commit_partial: Option<Option<String>>,

    #[serde(default, deserialize_with = "explicit_value")]
    pub footer_partial: Option<Option<String>>,

    /// Additional overrides by partial name; applied after the named fields
    #[serde(default)]
    pub partials: BTreeMap<String, Option<String>>,
}

/// Built-in templates the overrides fall back to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultTemplates {
    pub main: String,
    pub partials: BTreeMap<String, String>,
}

/// Outcome of resolving a template set against the defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplates {
    pub main: String,

    /// Partials with content, by name
    pub partials: BTreeMap<String, String>,

    /// Partials that resolved to no content
    pub suppressed: BTreeSet<String>,
}

/// Compiled template set, ready to render contexts
pub struct CompiledTemplate {
    registry: Handlebars<'static>,
}

impl TemplateSet {
    pub fn new(main_template: impl Into<String>) -> Self {
        Self {
            main_template: Some(main_template.into()),
            ..Self::default()
        }
    }

    /// Overrides a partial; an empty body suppresses it
    pub fn with_partial(mut self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.partials.insert(name.into(), Some(body.into()));
        self
    }

    /// Suppresses a partial, default included
    pub fn without_partial(mut self, name: impl Into<String>) -> Self {
        self.partials.insert(name.into(), None);
        self
    }

    /// Overrides in precedence order, later entries winning
    fn overrides(&self) -> BTreeMap<&str, Option<&str>> {
        let named = [
            ("header", &self.header_partial),
            ("commit", &self.commit_partial),
            ("footer", &self.footer_partial),
        ];

        let mut overrides = BTreeMap::new();
        for (name, value) in named {
            if let Some(value) = value {
                overrides.insert(name, value.as_deref());
            }
        }
        for (name, value) in &self.partials {
            overrides.insert(name.as_str(), value.as_deref());
        }
        overrides
    }
}

impl DefaultTemplates {
    /// Templates bundled with the crate: main, `header`, `commit`, `footer`
    pub fn builtin() -> Self {
        let partials = [
            ("header", include_str!("../templates/header.hbs")),
            ("commit", include_str!("../templates/commit.hbs")),
            ("footer", include_str!("../templates/footer.hbs")),
        ];

        Self {
            main: include_str!("../templates/template.hbs").to_string(),
            partials: partials
                .into_iter()
                .map(|(name, body)| (name.to_string(), body.to_string()))
                .collect(),
        }
    }

    /// Defaults with no partials and an empty main template
    pub fn empty() -> Self {
        Self {
            main: String::new(),
            partials: BTreeMap::new(),
        }
    }
}

impl Default for DefaultTemplates {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Resolves every partial name known to the set or the defaults
pub fn resolve(set: &TemplateSet, defaults: &DefaultTemplates) -> ResolvedTemplates {
    let overrides = set.overrides();
    let names: BTreeSet<&str> = defaults
        .partials
        .keys()
        .map(String::as_str)
        .chain(overrides.keys().copied())
        .collect();

    let mut partials = BTreeMap::new();
    let mut suppressed = BTreeSet::new();

    for name in names {
        let body = match overrides.get(name) {
            Some(body) => *body,
            None => defaults.partials.get(name).map(String::as_str),
        };
        match body.filter(|body| !body.is_empty()) {
            Some(body) => {
                partials.insert(name.to_string(), body.to_string());
            }
            None => {
                suppressed.insert(name.to_string());
            }
        }
    }

    ResolvedTemplates {
        main: set
            .main_template
            .clone()
            .unwrap_or_else(|| defaults.main.clone()),
        partials,
        suppressed,
    }
}

/// Compiles a template set
///
/// Every call builds a fresh registry; nothing is shared between sets.
/// Suppressed partials render as nothing wherever they are referenced.
pub fn compile(set: &TemplateSet, defaults: &DefaultTemplates) -> Result<CompiledTemplate> {
    let resolved = resolve(set, defaults);

    let mut registry = Handlebars::new();
    registry.register_escape_fn(handlebars::no_escape);

    for (name, body) in &resolved.partials {
        registry.register_partial(name, body.as_str())?;
    }
    for name in &resolved.suppressed {
        registry.register_partial(name, "")?;
    }
    registry.register_template_string(MAIN_TEMPLATE, resolved.main.as_str())?;

    log::debug!(
        "Compiled templates with partials {:?} (suppressed {:?})",
        resolved.partials.keys().collect::<Vec<_>>(),
        resolved.suppressed
    );

    Ok(CompiledTemplate { registry })
}

impl CompiledTemplate {
    /// Renders the main template against `context`
    pub fn render<T: Serialize>(&self, context: &T) -> Result<String> {
        Ok(self.registry.render(MAIN_TEMPLATE, context)?)
    }
}

impl std::fmt::Debug for CompiledTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledTemplate").finish_non_exhaustive()
    }
}

/// Keeps an explicit `null` apart from a missing key
fn explicit_value<'de, D>(deserializer: D) -> std::result::Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
