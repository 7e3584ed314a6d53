//! Interface method signatures

use super::{return_suffix, DocBlock, Parameter};

/// Always `public`, always abstract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    name: String,
    parameters: Vec<Parameter>,
    return_type: String,
    nullable: bool,
    doc: Option<DocBlock>,
}

impl Declaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: String::new(),
            nullable: false,
            doc: None,
        }
    }

    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn returns(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = return_type.into();
        self
    }

    pub fn nullable_return(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn doc(mut self, text: &str) -> Self {
        self.doc = Some(DocBlock::new(text));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn render(&self) -> String {
        let parameters: Vec<String> = self.parameters.iter().map(Parameter::render).collect();
        let signature = format!(
            "public function {}({}){};",
            self.name,
            parameters.join(", "),
            return_suffix(&self.return_type, self.nullable)
        );

        match &self.doc {
            Some(doc) => format!("{}\n{}", doc.render(), signature),
            None => signature,
        }
    }
}
