use heck::{ToSnakeCase, ToUpperCamelCase};

/// A model name, stored as its snake-cased parts.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Name {
    pub parts: Vec<String>,
}

impl Name {
    pub fn new(src: &str) -> Self {
        let snake = src.to_snake_case();
        let parts = snake.split('_').map(String::from).collect();
        Self { parts }
    }

    pub fn upper_camel_case(&self) -> String {
        self.snake_case().to_upper_camel_case()
    }

    pub fn snake_case(&self) -> String {
        self.parts.join("_")
    }

    /// The name with the parts concatenated directly, matching what a
    /// case-folded class name looks like (`DateFieldsModel` ->
    /// `datefieldsmodel`). Default table and reverse-relation names are
    /// derived from this form.
    pub fn lowered(&self) -> String {
        self.parts.concat()
    }
}

/// Simplistic pluralization used for default table and reverse-relation
/// names: append `"s"`, nothing more. Not linguistically correct (`bus`
/// becomes `buss`); downstream schemas depend on these exact strings, so do
/// not generalize this rule.
pub fn pluralize(name: &str) -> String {
    format!("{name}s")
}
