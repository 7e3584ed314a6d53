//! Function parameters

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    type_name: String,
    nullable: bool,
    default: Option<String>,
}

impl Parameter {
    /// `name` may be given with or without the leading `$`
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self {
            name: name.trim_start_matches('$').to_string(),
            type_name: type_name.into(),
            nullable: false,
            default: None,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Raw default-value literal (`[]`, `null`, `'x'`), not type-checked
    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.type_name.is_empty() {
            if self.nullable {
                out.push('?');
            }
            out.push_str(&self.type_name);
            out.push(' ');
        }
        out.push('$');
        out.push_str(&self.name);
        if let Some(default) = &self.default {
            out.push_str(" = ");
            out.push_str(default);
        }
        out
    }
}
