//! Resolved class identity
//!
//! A [`Component`] is a namespace plus a class name. Every other name used in
//! generated code (variables, properties, accessor names, table names) is derived
//! from those two values.

use crate::naming;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Component {
    namespace: String,
    class_name: String,
}

impl Component {
    pub fn new(namespace: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into().trim_matches('\\').to_string(),
            class_name: class_name.into(),
        }
    }

    /// Split a fully-qualified class name at its last namespace separator
    pub fn from_fqcn(fqcn: &str) -> Self {
        let fqcn = fqcn.trim_matches('\\');
        match fqcn.rsplit_once('\\') {
            Some((namespace, class_name)) => Self::new(namespace, class_name),
            None => Self::new("", fqcn),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn fqcn(&self) -> String {
        if self.namespace.is_empty() {
            self.class_name.clone()
        } else {
            format!("{}\\{}", self.namespace, self.class_name)
        }
    }

    /// `BookStore::class`
    pub fn class_string(&self) -> String {
        format!("{}::class", self.class_name)
    }

    /// `$bookStore`, dropping a trailing `Interface`
    pub fn variable(&self) -> String {
        self.variable_with(true)
    }

    pub fn variable_with(&self, strip_interface: bool) -> String {
        format!("${}", self.property_name_with(strip_interface))
    }

    pub fn property_name(&self) -> String {
        self.property_name_with(true)
    }

    pub fn property_name_with(&self, strip_interface: bool) -> String {
        naming::to_camel_case(&self.class_name, strip_interface)
    }

    pub fn class_name_plural(&self) -> String {
        naming::pluralize(&self.class_name)
    }

    /// `$bookStores`
    pub fn collection_variable(&self) -> String {
        format!("${}", naming::lcfirst(&self.class_name_plural()))
    }

    pub fn getter_name(&self) -> String {
        naming::getter_name(&self.class_name)
    }

    pub fn setter_name(&self) -> String {
        naming::setter_name(&self.class_name)
    }

    pub fn finder_name(&self) -> String {
        naming::finder_name(&self.class_name)
    }

    pub fn collection_getter_name(&self) -> String {
        naming::collection_getter_name(&self.class_name)
    }

    pub fn save_name(&self) -> String {
        naming::save_name(&self.class_name)
    }

    pub fn delete_name(&self) -> String {
        naming::delete_name(&self.class_name)
    }

    pub fn kebab_case(&self) -> String {
        naming::to_kebab_case(&self.class_name)
    }

    pub fn snake_case(&self) -> String {
        naming::to_snake_case(&self.class_name)
    }

    pub fn upper_case(&self) -> String {
        naming::to_upper_case(&self.class_name)
    }

    /// A sibling class in the same namespace
    pub fn sibling(&self, class_name: impl Into<String>) -> Component {
        Component::new(self.namespace.clone(), class_name)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fqcn())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fqcn_and_class_string() {
        let c = Component::new("Api\\Book\\Entity\\", "BookStore");
        assert_eq!(c.namespace(), "Api\\Book\\Entity");
        assert_eq!(c.fqcn(), "Api\\Book\\Entity\\BookStore");
        assert_eq!(c.class_string(), "BookStore::class");
    }

    #[test]
    fn test_from_fqcn() {
        let c = Component::from_fqcn("\\Api\\Book\\Service\\BookStoreService");
        assert_eq!(c.namespace(), "Api\\Book\\Service");
        assert_eq!(c.class_name(), "BookStoreService");

        let bare = Component::from_fqcn("DateTimeImmutable");
        assert_eq!(bare.namespace(), "");
        assert_eq!(bare.fqcn(), "DateTimeImmutable");
    }

    #[test]
    fn test_variable_strips_interface_suffix() {
        let c = Component::new("Api\\Module\\Service", "BookStoreServiceInterface");
        assert_eq!(c.variable(), "$bookStoreService");
        assert_eq!(c.variable_with(false), "$bookStoreServiceInterface");
        assert_eq!(c.property_name(), "bookStoreService");
    }

    #[test]
    fn test_derived_names() {
        let c = Component::new("Api\\Book\\Entity", "Category");
        assert_eq!(c.class_name_plural(), "Categories");
        assert_eq!(c.collection_variable(), "$categories");
        assert_eq!(c.getter_name(), "getCategory");
        assert_eq!(c.setter_name(), "setCategory");
        assert_eq!(c.finder_name(), "findCategory");
        assert_eq!(c.collection_getter_name(), "getCategories");
        assert_eq!(c.save_name(), "saveCategory");
        assert_eq!(c.delete_name(), "deleteCategory");
        assert_eq!(c.snake_case(), "category");
        assert_eq!(c.upper_case(), "CATEGORY");
    }

    #[test]
    fn test_sibling_shares_namespace() {
        let service = Component::new("Api\\Book\\Service", "BookStoreService");
        let interface = service.sibling("BookStoreServiceInterface");
        assert_eq!(
            interface.fqcn(),
            "Api\\Book\\Service\\BookStoreServiceInterface"
        );
    }
}
