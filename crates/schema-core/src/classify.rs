//! Splitting a schema into per-phase sub-schemas.

use crate::schema::{FieldKind, Schema, SchemaNode};
use std::sync::Arc;

/// Extract the sub-tree of `schema` whose leaves have one of `kinds`.
///
/// Every group is kept, even when nothing inside it matches, so the eager and
/// lazy trees keep the same nesting skeleton and their results merge key for
/// key. Leaves are shared with the input, not copied.
pub fn extract(schema: &Schema, kinds: &[FieldKind]) -> Schema {
    schema
        .iter()
        .filter_map(|(key, node)| match node {
            SchemaNode::Group(group) => {
                Some((key.clone(), SchemaNode::Group(extract(group, kinds))))
            }
            SchemaNode::Leaf(leaf) if kinds.contains(&leaf.kind()) => {
                Some((key.clone(), SchemaNode::Leaf(Arc::clone(leaf))))
            }
            SchemaNode::Leaf(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tests::StubProvider;
    use crate::schema::Leaf;
    use proptest::prelude::*;

    fn owner_schema() -> Schema {
        let eager = StubProvider::new(FieldKind::Eager);
        let lazy = StubProvider::new(FieldKind::Lazy);
        Schema::new()
            .leaf("pk", Leaf::bare(eager.clone(), "increment"))
            .group(
                "owner",
                Schema::new()
                    .leaf("email", Leaf::bare(lazy, "custom_email"))
                    .leaf("creator", Leaf::bare(eager, "full_name")),
            )
    }

    #[test]
    fn test_extract_eager() {
        let schema = owner_schema();
        let eager = extract(&schema, &[FieldKind::Eager]);

        assert_eq!(eager.leaf_paths().len(), 2);
        assert_eq!(eager.get("pk"), schema.get("pk"));
        let Some(SchemaNode::Group(owner)) = eager.get("owner") else {
            panic!("owner group missing from eager schema");
        };
        assert!(owner.get("email").is_none());
        assert!(owner.get("creator").is_some());
    }

    #[test]
    fn test_extract_keeps_empty_groups() {
        let lazy = StubProvider::new(FieldKind::Lazy);
        let schema = Schema::new().group(
            "owner",
            Schema::new().leaf("email", Leaf::bare(lazy, "custom_email")),
        );

        let eager = extract(&schema, &[FieldKind::Eager]);

        assert_eq!(eager.len(), 1);
        assert_eq!(eager.get("owner"), Some(&SchemaNode::Group(Schema::new())));
    }

    #[test]
    fn test_extract_shares_leaves() {
        let schema = owner_schema();
        let lazy = extract(&schema, &[FieldKind::Lazy]);

        let (Some(SchemaNode::Group(original)), Some(SchemaNode::Group(extracted))) =
            (schema.get("owner"), lazy.get("owner"))
        else {
            panic!("owner group missing");
        };
        match (original.get("email"), extracted.get("email")) {
            (Some(SchemaNode::Leaf(a)), Some(SchemaNode::Leaf(b))) => assert!(Arc::ptr_eq(a, b)),
            other => panic!("unexpected nodes: {other:?}"),
        }
    }

    #[test]
    fn test_extract_both_kinds_is_identity() {
        let schema = owner_schema();
        assert_eq!(extract(&schema, &[FieldKind::Eager, FieldKind::Lazy]), schema);
    }

    /// Recombine two classified trees: groups union recursively, leaves are taken from
    /// whichever side has them. Returns `None` if a leaf key appears on both sides.
    fn recombine(a: &Schema, b: &Schema) -> Option<Schema> {
        let mut out = a.clone();
        for (key, node) in b {
            let merged = match (a.get(key), node) {
                (Some(SchemaNode::Group(x)), SchemaNode::Group(y)) => {
                    SchemaNode::Group(recombine(x, y)?)
                }
                (None, node) => node.clone(),
                _ => return None,
            };
            out.insert(key.clone(), merged);
        }
        Some(out)
    }

    fn arb_schema() -> impl Strategy<Value = Schema> {
        let eager = StubProvider::new(FieldKind::Eager);
        let lazy = StubProvider::new(FieldKind::Lazy);
        let leaf = any::<bool>().prop_map(move |is_lazy| {
            let provider = if is_lazy { lazy.clone() } else { eager.clone() };
            SchemaNode::from(Leaf::bare(provider, "g"))
        });
        leaf.prop_recursive(4, 32, 4, |inner| {
            prop::collection::vec(("[a-e]", inner), 0..4)
                .prop_map(|entries| SchemaNode::Group(entries.into_iter().collect()))
        })
        .prop_map(|node| match node {
            SchemaNode::Group(schema) => schema,
            leaf => std::iter::once(("leaf".to_string(), leaf)).collect(),
        })
    }

    proptest! {
        #[test]
        fn prop_classification_is_complete(schema in arb_schema()) {
            let eager = extract(&schema, &[FieldKind::Eager]);
            let lazy = extract(&schema, &[FieldKind::Lazy]);

            prop_assert_eq!(eager.leaf_count() + lazy.leaf_count(), schema.leaf_count());
            prop_assert!(eager.leaf_paths().iter().all(|(_, k)| *k == FieldKind::Eager));
            prop_assert!(lazy.leaf_paths().iter().all(|(_, k)| *k == FieldKind::Lazy));

            let rebuilt = recombine(&eager, &lazy);
            prop_assert!(rebuilt.is_some(), "a leaf key appeared in both classifications");
            // Schema equality ignores key order and compares leaves by identity
            prop_assert_eq!(rebuilt.unwrap_or_default(), schema);
        }
    }
}
