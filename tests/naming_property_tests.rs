//! Property-based tests for the convention resolver
#![allow(clippy::unwrap_used)]

use crudgen::naming::{resolve_from_class_name, NamingPlan, CONTROLLER_MARKER};
use proptest::prelude::*;

/// Capitalized words such as `Admin`, `OrderItem`
fn segment_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[A-Z][a-z]{1,7}", 1..3).prop_map(|words| words.concat())
}

fn resource_strategy() -> impl Strategy<Value = (Vec<String>, String)> {
    (prop::collection::vec(segment_strategy(), 0..4), segment_strategy())
}

/// Property: views and routes always share one dotted path.
#[test]
fn prop_view_path_equals_route_base() {
    proptest!(|((namespace, entity) in resource_strategy())| {
        let raw = namespace.iter().chain(std::iter::once(&entity)).cloned().collect::<Vec<_>>().join("/");
        let plan = NamingPlan::resolve(&raw).unwrap();
        prop_assert_eq!(&plan.view_path, &plan.route_base);
        prop_assert!(plan.view_path.ends_with(&plan.table_name));
        prop_assert_eq!(plan.namespace_segments.len(), namespace.len());
    });
}

/// Property: the prefix recovered from the generated controller's class name is the
/// prefix the forward resolver used.
#[test]
fn prop_reverse_prefix_round_trips() {
    proptest!(|((namespace, entity) in resource_strategy())| {
        let raw = namespace.iter().chain(std::iter::once(&entity)).cloned().collect::<Vec<_>>().join("/");
        let plan = NamingPlan::resolve(&raw).unwrap();
        let fqcn = format!(
            "{}\\{}",
            plan.qualify_namespace("App\\Http\\Controllers"),
            plan.controller_class()
        );

        let prefix = resolve_from_class_name(&fqcn, CONTROLLER_MARKER);
        prop_assert_eq!(&prefix, &plan.prefix_dot());

        let rebuilt = if prefix.is_empty() {
            plan.table_name.clone()
        } else {
            format!("{prefix}.{}", plan.table_name)
        };
        prop_assert_eq!(rebuilt, plan.view_path);
    });
}

/// Property: resolving the names a plan produced gives the same plan back.
#[test]
fn prop_resolution_is_idempotent() {
    proptest!(|((namespace, entity) in resource_strategy(), backslash in any::<bool>())| {
        let sep = if backslash { "\\" } else { "/" };
        let raw = namespace.iter().chain(std::iter::once(&entity)).cloned().collect::<Vec<_>>().join(sep);
        let plan = NamingPlan::resolve(&raw).unwrap();

        let again = format!("{}/{}", plan.namespace_joined("/"), plan.entity_name);
        prop_assert_eq!(NamingPlan::resolve(&again).unwrap(), plan);
    });
}
