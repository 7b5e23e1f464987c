//! Property tests for schema path derivation.

use proptest::prelude::*;

use rocket_catalog::domain::value_objects::absolutize;
use rocket_catalog::{ErrorKind, PathResolver};

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z0-9_-]{1,12}",
        Just("..".to_string()),
        Just(".".to_string()),
        "[A-Za-z0-9]{0,4}/\\.\\./[A-Za-z0-9]{0,4}",
        "/[a-z]{1,8}",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A derived schema path is either inside the root or refused as input.
    #[test]
    fn property_schema_paths_stay_inside_root(domain in segment(), name in segment()) {
        let dir = tempfile::tempdir().unwrap();
        let resolver = PathResolver::with_root(dir.path());
        let root = absolutize(dir.path()).unwrap();

        match resolver.entity_schema_path(&domain, &name) {
            Ok(path) => {
                prop_assert!(path.starts_with(&root), "{} escaped {}", path.display(), root.display());
                let expected_suffix = format!("{domain}/schemas/{name}.json");
                prop_assert!(path.ends_with(&expected_suffix));
            }
            Err(err) => prop_assert_eq!(err.kind(), ErrorKind::Input),
        }
    }
}
