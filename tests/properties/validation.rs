//! Property tests for argument validation.

use proptest::prelude::*;
use serde_json::{json, Map, Value};

use rocket_catalog::validate::{arguments, domain, entity, solution};

fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        any::<f64>().prop_map(|f| json!(f)),
        "[ -~]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            proptest::collection::btree_map("[a-z@]{1,8}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn field_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("name".to_string()),
        Just("label".to_string()),
        Just("domains".to_string()),
        Just("order".to_string()),
        Just("properties".to_string()),
        Just("examples".to_string()),
        "[a-zA-Z]{1,8}",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Validators reject or accept arbitrary argument bags; they never panic.
    #[test]
    fn property_validators_never_panic(
        fields in proptest::collection::btree_map(field_name(), json_value(), 0..6),
    ) {
        let raw = Value::Object(fields.into_iter().collect());
        let args = arguments(Some(&raw)).unwrap();
        let _ = domain::parse_new(&args);
        let _ = domain::parse_patch(&args);
        let _ = solution::parse_new(&args);
        let _ = solution::parse_patch(&args);
        let _ = entity::parse_new(&args);
        let _ = entity::parse_patch(&args);
    }

    /// PROPERTY: An accepted solution only references well-formed domain names.
    #[test]
    fn property_accepted_solution_domains_are_identifiers(
        domains in proptest::collection::vec("[ -~]{0,10}", 1..4),
    ) {
        let raw = json!({
            "name": "s",
            "label": "S",
            "description": "d",
            "icon": "i",
            "color": "c",
            "domains": domains,
            "features": ["f"],
            "useCases": ["u"]
        });
        if let Ok(solution) = solution::parse_new(&arguments(Some(&raw)).unwrap()) {
            for name in &solution.domains {
                prop_assert!(rocket_catalog::Identifier::is_valid(name), "{name:?}");
            }
        }
    }
}
