//! Liquid template rendering for prompt bodies

use crate::{LinearKanbanError, Result};
use liquid::model::Value;
use liquid::{Object, Parser};
use std::collections::HashMap;

/// A parsed-on-demand Liquid template
pub struct Template {
    parser: Parser,
    template_str: String,
}

impl Template {
    /// Create a template, failing if the source does not parse
    pub fn new(template_str: &str) -> Result<Self> {
        let parser = TemplateEngine::default_parser()?;
        parser
            .parse(template_str)
            .map_err(|e| LinearKanbanError::Template(e.to_string()))?;

        Ok(Self {
            parser,
            template_str: template_str.to_string(),
        })
    }

    /// Render with the given arguments
    ///
    /// Every name in `optional` that is missing from `args` is bound to nil,
    /// so `{% if name %}` is false and `{{ name }}` renders empty. Any other
    /// unbound variable is an error.
    pub fn render_with_optional(
        &self,
        args: &HashMap<String, String>,
        optional: &[&str],
    ) -> Result<String> {
        let template = self
            .parser
            .parse(&self.template_str)
            .map_err(|e| LinearKanbanError::Template(e.to_string()))?;

        let mut object = Object::new();
        for name in optional {
            object.insert(name.to_string().into(), Value::Nil);
        }
        for (key, value) in args {
            object.insert(key.clone().into(), Value::scalar(value.clone()));
        }

        template
            .render(&object)
            .map_err(|e| LinearKanbanError::Template(e.to_string()))
    }

    /// Render with the given arguments and no optional names
    pub fn render(&self, args: &HashMap<String, String>) -> Result<String> {
        self.render_with_optional(args, &[])
    }

    /// The raw template source
    pub fn raw(&self) -> &str {
        &self.template_str
    }
}

/// Entry point for parsing and rendering templates
#[derive(Default)]
pub struct TemplateEngine;

impl TemplateEngine {
    /// Create a template engine
    pub fn new() -> Self {
        Self
    }

    /// Liquid parser with the standard filter and tag library
    pub fn default_parser() -> Result<Parser> {
        liquid::ParserBuilder::with_stdlib()
            .build()
            .map_err(|e| LinearKanbanError::Template(e.to_string()))
    }

    /// Parse a template string
    pub fn parse(&self, template_str: &str) -> Result<Template> {
        Template::new(template_str)
    }

    /// Parse and render a template string in one step
    pub fn render(
        &self,
        template_str: &str,
        args: &HashMap<String, String>,
        optional: &[&str],
    ) -> Result<String> {
        self.parse(template_str)?.render_with_optional(args, optional)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_simple_template() {
        let template = Template::new("Hello {{ name }}!").unwrap();
        let result = template.render(&args(&[("name", "World")])).unwrap();
        assert_eq!(result, "Hello World!");
    }

    #[test]
    fn test_unbound_variable_is_error() {
        let engine = TemplateEngine::new();
        let result = engine.render("Hello {{ name }}!", &HashMap::new(), &[]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown variable"));
    }

    #[test]
    fn test_optional_variable_renders_empty() {
        let engine = TemplateEngine::new();
        let result = engine
            .render("[{{ team }}]", &HashMap::new(), &["team"])
            .unwrap();
        assert_eq!(result, "[]");
    }

    #[test]
    fn test_optional_variable_is_falsy() {
        let engine = TemplateEngine::new();
        let source = "overview{% if team %} (team: {{ team }}){% endif %}.";

        let without = engine.render(source, &HashMap::new(), &["team"]).unwrap();
        assert_eq!(without, "overview.");

        let with = engine
            .render(source, &args(&[("team", "ENG")]), &["team"])
            .unwrap();
        assert_eq!(with, "overview (team: ENG).");
    }

    #[test]
    fn test_supplied_value_overrides_optional_nil() {
        let engine = TemplateEngine::new();
        let result = engine
            .render("{{ focus }}", &args(&[("focus", "blockers")]), &["focus"])
            .unwrap();
        assert_eq!(result, "blockers");
    }

    #[test]
    fn test_special_characters_are_not_escaped() {
        let engine = TemplateEngine::new();
        let result = engine
            .render("Code: {{ code }}", &args(&[("code", "<b>&</b>")]), &[])
            .unwrap();
        assert_eq!(result, "Code: <b>&</b>");
    }

    #[test]
    fn test_invalid_template_fails_to_parse() {
        assert!(Template::new("{% if %}").is_err());
    }
}
