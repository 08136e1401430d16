use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Element type registry
///
/// A closed set of element kinds. On the wire a type is its lowercase
/// symbolic name; in storage it is a small integer code. `parse` never fails:
/// unrecognised names map to the `Invalid` sentinel, and element validation
/// is responsible for rejecting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementType {
    /// Sentinel for unknown or missing types
    #[default]
    Invalid,
    Screen,
    Text,
    Layout,
    Button,
    Input,
    Link,
    Image,
    List,
}

impl ElementType {
    /// Every valid type, in code order
    pub const ALL: [ElementType; 8] = [
        ElementType::Screen,
        ElementType::Text,
        ElementType::Layout,
        ElementType::Button,
        ElementType::Input,
        ElementType::Link,
        ElementType::Image,
        ElementType::List,
    ];

    /// Parse a wire name; unknown names yield `Invalid`
    pub fn parse(name: &str) -> Self {
        match name {
            "screen" => ElementType::Screen,
            "text" => ElementType::Text,
            "layout" => ElementType::Layout,
            "button" => ElementType::Button,
            "input" => ElementType::Input,
            "link" => ElementType::Link,
            "image" => ElementType::Image,
            "list" => ElementType::List,
            _ => ElementType::Invalid,
        }
    }

    /// Wire name (empty for `Invalid`)
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Invalid => "",
            ElementType::Screen => "screen",
            ElementType::Text => "text",
            ElementType::Layout => "layout",
            ElementType::Button => "button",
            ElementType::Input => "input",
            ElementType::Link => "link",
            ElementType::Image => "image",
            ElementType::List => "list",
        }
    }

    /// Storage code
    pub fn code(&self) -> i16 {
        match self {
            ElementType::Invalid => 0,
            ElementType::Screen => 1,
            ElementType::Text => 2,
            ElementType::Layout => 3,
            ElementType::Button => 4,
            ElementType::Input => 5,
            ElementType::Link => 6,
            ElementType::Image => 7,
            ElementType::List => 8,
        }
    }

    /// Decode a storage code; unknown codes yield `Invalid`
    pub fn from_code(code: i16) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.code() == code)
            .unwrap_or(ElementType::Invalid)
    }

    pub fn is_valid(&self) -> bool {
        *self != ElementType::Invalid
    }

    pub fn is_screen(&self) -> bool {
        *self == ElementType::Screen
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ElementType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ElementType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(ElementType::parse(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format_agree() {
        for t in ElementType::ALL {
            assert_eq!(ElementType::parse(t.as_str()), t);
            assert_eq!(ElementType::from_code(t.code()), t);
        }
    }

    #[test]
    fn test_unknown_name_is_invalid_sentinel() {
        assert_eq!(ElementType::parse("carousel"), ElementType::Invalid);
        assert_eq!(ElementType::parse("Screen"), ElementType::Invalid);
        assert_eq!(ElementType::parse(""), ElementType::Invalid);
        assert!(!ElementType::default().is_valid());
    }

    #[test]
    fn test_unknown_code_is_invalid_sentinel() {
        assert_eq!(ElementType::from_code(-1), ElementType::Invalid);
        assert_eq!(ElementType::from_code(99), ElementType::Invalid);
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&ElementType::Button).unwrap();
        assert_eq!(json, "\"button\"");

        let parsed: ElementType = serde_json::from_str("\"image\"").unwrap();
        assert_eq!(parsed, ElementType::Image);

        // Unknown names deserialize to the sentinel rather than failing
        let unknown: ElementType = serde_json::from_str("\"video\"").unwrap();
        assert_eq!(unknown, ElementType::Invalid);
    }
}
