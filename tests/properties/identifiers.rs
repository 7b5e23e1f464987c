//! Property tests for identifier parsing.

use proptest::prelude::*;

use rocket_catalog::{ErrorKind, Identifier};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Strings over the identifier alphabet always parse, unchanged.
    #[test]
    fn property_valid_identifiers_parse(raw in "[A-Za-z0-9_-]{1,40}") {
        let id = Identifier::parse("name", &raw).unwrap();
        prop_assert_eq!(id.as_str(), raw.as_str());
    }

    /// PROPERTY: Any character outside the alphabet is rejected as input.
    #[test]
    fn property_foreign_characters_rejected(
        prefix in "[A-Za-z0-9_-]{0,10}",
        bad in "[./\\\\ :~\\x00]",
        suffix in "[A-Za-z0-9_-]{0,10}",
    ) {
        let raw = format!("{prefix}{bad}{suffix}");
        let err = Identifier::parse("name", &raw).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Input);
    }

    /// PROPERTY: Parsing never panics, whatever the input.
    #[test]
    fn property_parse_never_panics(raw in any::<String>()) {
        let _ = Identifier::parse("name", &raw);
    }
}
