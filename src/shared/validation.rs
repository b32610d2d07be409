use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for XML element names produced by the XML transcoder
    /// Must start with a letter or underscore, then letters, digits, `_`, `-` or `.`
    /// - Valid: "name", "defining_hours", "_id", "osm-type", "v1.2"
    /// - Invalid: "1abc", "-x", "has space", "a:b", ""
    pub static ref XML_NAME_REGEX: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\-]*$").unwrap();

    /// Regex for all-digit keys, which the XML transcoder prefixes with `n`
    pub static ref DIGITS_REGEX: Regex = Regex::new(r"^[0-9]+$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_name_regex_valid() {
        assert!(XML_NAME_REGEX.is_match("name"));
        assert!(XML_NAME_REGEX.is_match("defining_hours"));
        assert!(XML_NAME_REGEX.is_match("_id"));
        assert!(XML_NAME_REGEX.is_match("osm-type"));
        assert!(XML_NAME_REGEX.is_match("v1.2"));
    }

    #[test]
    fn test_xml_name_regex_invalid() {
        assert!(!XML_NAME_REGEX.is_match("1abc")); // starts with digit
        assert!(!XML_NAME_REGEX.is_match("-x")); // starts with hyphen
        assert!(!XML_NAME_REGEX.is_match("has space")); // space
        assert!(!XML_NAME_REGEX.is_match("a:b")); // namespace separator
        assert!(!XML_NAME_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_digits_regex() {
        assert!(DIGITS_REGEX.is_match("123"));
        assert!(!DIGITS_REGEX.is_match("12a"));
        assert!(!DIGITS_REGEX.is_match(""));
    }
}
