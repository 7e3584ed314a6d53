//! Name transforms shared by every generated component
//!
//! All functions are pure and operate on ASCII identifiers.

use crate::error::{MakerError, Result};
use heck::{ToKebabCase, ToShoutySnakeCase, ToSnakeCase, ToTitleCase, ToUpperCamelCase};

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

/// Pluralize a class or property name using suffix heuristics.
///
/// Irregular plurals are not handled: `Person` becomes `Persons`.
pub fn pluralize(name: &str) -> String {
    let lower = name.to_ascii_lowercase();

    if lower.ends_with(['s', 'x', 'z']) || lower.ends_with("sh") || lower.ends_with("ch") {
        return format!("{}es", name);
    }

    let mut tail = lower.chars().rev();
    if let (Some('y'), Some(before)) = (tail.next(), tail.next()) {
        if !VOWELS.contains(&before) {
            return format!("{}ies", &name[..name.len() - 1]);
        }
    }

    format!("{}s", name)
}

/// Reverse of [`pluralize`] for names that look plural; anything else is returned as is
pub fn singularize(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    if lower.len() > 3 && lower.ends_with("ies") {
        return format!("{}y", &name[..name.len() - 3]);
    }

    let cut = if ["sses", "xes", "zes", "shes", "ches"]
        .iter()
        .any(|suffix| lower.len() > suffix.len() && lower.ends_with(suffix))
    {
        2
    } else if lower.len() > 1 && lower.ends_with('s') && !lower.ends_with("ss") {
        1
    } else {
        0
    };
    name[..name.len() - cut].to_string()
}

/// Upper-case the first character
pub fn ucfirst(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Lower-case the first character
pub fn lcfirst(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// camelCase form of a class name, optionally dropping a trailing `Interface`
pub fn to_camel_case(name: &str, strip_interface: bool) -> String {
    let name = if strip_interface {
        match name.strip_suffix("Interface") {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => name,
        }
    } else {
        name
    };

    lcfirst(name)
}

pub fn to_kebab_case(name: &str) -> String {
    name.to_kebab_case()
}

pub fn to_snake_case(name: &str) -> String {
    name.to_snake_case()
}

/// `BookStore` becomes `BOOK_STORE`
pub fn to_upper_case(name: &str) -> String {
    name.to_shouty_snake_case()
}

/// Inverse of the separator-joined forms: `book-store` becomes `BookStore`
pub fn to_pascal_case(name: &str) -> String {
    name.to_upper_camel_case()
}

/// `BookStoreImport` becomes `Book store import`
pub fn to_sentence_case(name: &str) -> String {
    ucfirst(&name.to_title_case().to_lowercase())
}

/// Lower-case words of an identifier, split on case transitions
pub fn words(name: &str) -> Vec<String> {
    name.to_snake_case().split('_').map(str::to_string).collect()
}

pub fn getter_name(name: &str) -> String {
    format!("get{}", ucfirst(name))
}

pub fn setter_name(name: &str) -> String {
    format!("set{}", ucfirst(name))
}

pub fn finder_name(name: &str) -> String {
    format!("find{}", ucfirst(name))
}

pub fn save_name(name: &str) -> String {
    format!("save{}", ucfirst(name))
}

pub fn delete_name(name: &str) -> String {
    format!("delete{}", ucfirst(name))
}

/// Getter for a collection of `name`: `BookStore` becomes `getBookStores`
pub fn collection_getter_name(name: &str) -> String {
    format!("get{}", ucfirst(&pluralize(name)))
}

/// Check that `name` may be used as a class, property or method name
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

pub fn validate_identifier(name: &str) -> Result<&str> {
    if is_valid_identifier(name) {
        Ok(name)
    } else {
        Err(MakerError::InvalidIdentifier {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize_sibilants() {
        assert_eq!(pluralize("bus"), "buses");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("Quiz"), "Quizes");
        assert_eq!(pluralize("Brush"), "Brushes");
        assert_eq!(pluralize("MATCH"), "MATCHes");
    }

    #[test]
    fn test_pluralize_consonant_y() {
        assert_eq!(pluralize("candy"), "candies");
        assert_eq!(pluralize("Category"), "Categories");
        assert_eq!(pluralize("Day"), "Days");
        assert_eq!(pluralize("y"), "ys");
    }

    #[test]
    fn test_pluralize_default() {
        assert_eq!(pluralize("book"), "books");
        assert_eq!(pluralize("BookStore"), "BookStores");
        assert_eq!(pluralize("Person"), "Persons");
        assert_eq!(pluralize("s"), "ses");
    }

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("books"), "book");
        assert_eq!(singularize("featuredBooks"), "featuredBook");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("addresses"), "address");
        assert_eq!(singularize("branches"), "branch");
        assert_eq!(singularize("address"), "address");
        assert_eq!(singularize("inventory"), "inventory");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(to_camel_case("BookStore", false), "bookStore");
        assert_eq!(
            to_camel_case("BookStoreServiceInterface", true),
            "bookStoreService"
        );
        assert_eq!(
            to_camel_case("BookStoreServiceInterface", false),
            "bookStoreServiceInterface"
        );
        assert_eq!(to_camel_case("Interface", true), "interface");
    }

    #[test]
    fn test_case_conversions() {
        assert_eq!(to_kebab_case("BookStoreCollection"), "book-store-collection");
        assert_eq!(to_snake_case("BookStoreCollection"), "book_store_collection");
        assert_eq!(to_upper_case("BookStoreCollection"), "BOOK_STORE_COLLECTION");
        assert_eq!(to_snake_case("bookStore"), "book_store");
        assert_eq!(to_kebab_case("HTTPServerError"), "http-server-error");
        assert_eq!(to_snake_case("Oauth2Client"), "oauth2_client");
    }

    #[test]
    fn test_kebab_round_trip() {
        let kebab = to_kebab_case("BookStoreCollection");
        let rebuilt: String = kebab.split('-').map(ucfirst).collect();
        assert_eq!(rebuilt, "BookStoreCollection");
        assert_eq!(to_pascal_case("book_store"), "BookStore");
    }

    #[test]
    fn test_sentence_case_and_words() {
        assert_eq!(to_sentence_case("BookStoreImport"), "Book store import");
        assert_eq!(words("BookStoreImport"), vec!["book", "store", "import"]);
        assert_eq!(words("HTTPServer"), vec!["http", "server"]);
    }

    #[test]
    fn test_method_names() {
        assert_eq!(getter_name("bookStore"), "getBookStore");
        assert_eq!(setter_name("title"), "setTitle");
        assert_eq!(finder_name("BookStore"), "findBookStore");
        assert_eq!(save_name("BookStore"), "saveBookStore");
        assert_eq!(delete_name("BookStore"), "deleteBookStore");
        assert_eq!(collection_getter_name("Category"), "getCategories");
    }

    #[test]
    fn test_identifier_validation() {
        assert!(is_valid_identifier("BookStore"));
        assert!(is_valid_identifier("_private"));
        assert!(is_valid_identifier("title2"));
        assert!(!is_valid_identifier("2fast"));
        assert!(!is_valid_identifier("book-store"));
        assert!(!is_valid_identifier(""));
        assert!(matches!(
            validate_identifier("9lives"),
            Err(MakerError::InvalidIdentifier { .. })
        ));
    }
}
