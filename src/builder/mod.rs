//! The recursive object→tree builder.
//!
//! This is the core of the crate: a pure function from a value (and an
//! optional suggested name) to an element tree. Dispatch follows the value's
//! shape:
//!
//! - a [`Scalar`] becomes a single element whose text is its
//!   [`text_form`](Scalar::text_form);
//! - a [`Sequence`](crate::value::Sequence) becomes one container element
//!   (named through hint resolution) whose children are the built elements,
//!   each named after its own runtime type;
//! - a [`Composite`](crate::value::Composite) becomes an element with one
//!   child per readable member, properties before fields.
//!
//! An absent value produces no element at all — absent members and sequence
//! elements are omitted, and an absent top-level value yields `Ok(None)`.
//!
//! Because a scalar carries no members, traversal can never descend "into"
//! a raw string or integer; leaf dispatch short-circuits member enumeration
//! entirely.
//!
//! Building never reads anything but the input and never mutates it, so
//! independent inputs can be built concurrently without synchronization.

use tracing::{debug, trace};

use crate::error::BuildError;
use crate::name::encode_name;
use crate::tree::{ElementId, Tree};
use crate::value::{resolved_name, Member, MemberValue, Value};

/// The fallback element name used when no name is suggested.
pub const DEFAULT_NAME: &str = "object";

/// Builds an element tree from a value, using the default root name.
///
/// Equivalent to [`build_named`] with an empty name: the root element is
/// named [`DEFAULT_NAME`] unless the value is a sequence carrying a naming
/// hint.
///
/// # Errors
///
/// Returns [`BuildError::MemberUnreadable`] if any reachable member is
/// marked unreadable; the whole build is abandoned on the first one.
///
/// # Examples
///
/// ```
/// use treedump::{build, Value};
///
/// let tree = build(Some(&Value::from(5))).unwrap().unwrap();
/// assert_eq!(tree.name(tree.root()), "object");
/// assert_eq!(tree.text(tree.root()), Some("5"));
/// ```
pub fn build(value: Option<&Value>) -> Result<Option<Tree>, BuildError> {
    build_named(value, "")
}

/// Builds an element tree from a value, suggesting a root name.
///
/// Returns `Ok(None)` when `value` is `None`: absence means "no element",
/// never an empty element. An empty `name` falls back to [`DEFAULT_NAME`].
/// Every name is passed through [`encode_name`] before use, so the
/// resulting tree only contains valid XML names.
///
/// A sequence at the top level becomes the root itself (its container is
/// the returned tree's root, not a child of some wrapper), named through
/// hint resolution with `name` as the fallback. Any other value's root
/// element takes `name` directly; type-level hints on composites are not
/// consulted.
///
/// # Errors
///
/// Returns [`BuildError::MemberUnreadable`] if any reachable member is
/// marked unreadable.
pub fn build_named(value: Option<&Value>, name: &str) -> Result<Option<Tree>, BuildError> {
    let Some(value) = value else {
        return Ok(None);
    };

    let suggested = if name.is_empty() { DEFAULT_NAME } else { name };
    debug!(name = suggested, kind = value.type_name(), "building tree");

    let root_name = match value {
        Value::Sequence(seq) => resolved_name(&seq.hints, suggested),
        _ => suggested,
    };
    let mut tree = Tree::new(&encode_name(root_name));
    let root = tree.root();

    let mut path = Vec::new();
    fill_element(&mut tree, root, value, &mut path)?;
    Ok(Some(tree))
}

/// Creates and fills one element for `value`, returning its (detached) id.
fn build_element(
    tree: &mut Tree,
    value: &Value,
    suggested: &str,
    path: &mut Vec<String>,
) -> Result<ElementId, BuildError> {
    let suggested = if suggested.is_empty() {
        DEFAULT_NAME
    } else {
        suggested
    };
    let name = match value {
        Value::Sequence(seq) => resolved_name(&seq.hints, suggested),
        _ => suggested,
    };
    let id = tree.create_element(&encode_name(name));
    fill_element(tree, id, value, path)?;
    Ok(id)
}

/// Fills an already-created element with `value`'s payload or children.
fn fill_element(
    tree: &mut Tree,
    id: ElementId,
    value: &Value,
    path: &mut Vec<String>,
) -> Result<(), BuildError> {
    match value {
        Value::Scalar(scalar) => {
            tree.set_text(id, scalar.text_form());
        }
        Value::Sequence(seq) => {
            // Each present element is named after its own runtime type,
            // not after the container; absent elements are skipped.
            for (index, element) in seq.elements.iter().enumerate() {
                let Some(element) = element else {
                    trace!(index, "absent sequence element omitted");
                    continue;
                };
                path.push(index.to_string());
                let child = build_element(tree, element, element.type_name(), path)?;
                path.pop();
                tree.append_child(id, child);
            }
        }
        Value::Composite(composite) => {
            // Properties before fields; each group in declaration order.
            for member in &composite.properties {
                append_member(tree, id, member, path)?;
            }
            for member in &composite.fields {
                append_member(tree, id, member, path)?;
            }
        }
    }
    Ok(())
}

/// Builds one member and appends it to `parent`, or omits it if absent.
fn append_member(
    tree: &mut Tree,
    parent: ElementId,
    member: &Member,
    path: &mut Vec<String>,
) -> Result<(), BuildError> {
    match &member.value {
        MemberValue::Absent => {
            trace!(member = %member.name, "absent member omitted");
            Ok(())
        }
        MemberValue::Unreadable { reason } => Err(BuildError::MemberUnreadable {
            path: member_path(path, &member.name),
            reason: reason.clone(),
        }),
        MemberValue::Present(value) => {
            let name = resolved_name(&member.hints, &member.name);
            path.push(member.name.clone());
            let child = build_element(tree, value, name, path)?;
            path.pop();
            tree.append_child(parent, child);
            Ok(())
        }
    }
}

/// Joins the current traversal path with a member name for error reporting.
fn member_path(path: &[String], name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", path.join("/"), name)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::serial::serialize;
    use crate::value::{Composite, NameHint, Sequence};

    fn build_one(value: impl Into<Value>, name: &str) -> Tree {
        build_named(Some(&value.into()), name).unwrap().unwrap()
    }

    #[test]
    fn test_absent_value_builds_nothing() {
        assert!(build(None).unwrap().is_none());
        assert!(build_named(None, "Root").unwrap().is_none());
    }

    #[test]
    fn test_scalar_becomes_text_leaf() {
        let tree = build_one(5, "Count");
        assert_eq!(tree.name(tree.root()), "Count");
        assert_eq!(tree.text(tree.root()), Some("5"));
        assert_eq!(tree.child_count(tree.root()), 0);
    }

    #[test]
    fn test_empty_name_falls_back_to_object() {
        let tree = build(Some(&Value::from(true))).unwrap().unwrap();
        assert_eq!(tree.name(tree.root()), "object");
    }

    #[test]
    fn test_root_name_is_encoded() {
        let tree = build_one("v", "my root");
        assert_eq!(tree.name(tree.root()), "my_x0020_root");
    }

    #[test]
    fn test_string_is_never_exploded_into_characters() {
        let tree = build_one("abc", "S");
        assert_eq!(tree.text(tree.root()), Some("abc"));
        assert_eq!(tree.child_count(tree.root()), 0);
    }

    #[test]
    fn test_composite_members_in_order() {
        let point = Composite::new("Point")
            .property(Member::new("X", 5))
            .property(Member::new("Y", "z"));
        let tree = build_one(point, "Root");

        assert_eq!(tree.name(tree.root()), "Root");
        let children: Vec<ElementId> = tree.children(tree.root()).collect();
        assert_eq!(children.len(), 2);
        assert_eq!(tree.name(children[0]), "X");
        assert_eq!(tree.text(children[0]), Some("5"));
        assert_eq!(tree.name(children[1]), "Y");
        assert_eq!(tree.text(children[1]), Some("z"));
    }

    #[test]
    fn test_properties_precede_fields() {
        let c = Composite::new("Mixed")
            .field(Member::new("F1", 1))
            .property(Member::new("P1", 2))
            .field(Member::new("F2", 3))
            .property(Member::new("P2", 4));
        let tree = build_one(c, "M");

        let names: Vec<&str> = tree
            .children(tree.root())
            .map(|id| tree.name(id))
            .collect();
        assert_eq!(names, vec!["P1", "P2", "F1", "F2"]);
    }

    #[test]
    fn test_absent_member_is_omitted() {
        let c = Composite::new("Person")
            .property(Member::new("First", "Ada"))
            .property(Member::absent("Middle"))
            .property(Member::new("Last", "Lovelace"));
        let tree = build_one(c, "Person");

        let names: Vec<&str> = tree
            .children(tree.root())
            .map(|id| tree.name(id))
            .collect();
        assert_eq!(names, vec!["First", "Last"]);
    }

    #[test]
    fn test_member_hint_last_wins() {
        let c = Composite::new("Doc").property(
            Member::new("Body", "text")
                .hint(NameHint::element("Draft"))
                .hint(NameHint::element("Alt")),
        );
        let tree = build_one(c, "Doc");
        let child = tree.children(tree.root()).next().unwrap();
        assert_eq!(tree.name(child), "Alt");
    }

    #[test]
    fn test_member_name_is_encoded() {
        let c = Composite::new("Row").property(Member::new("first name", "Ada"));
        let tree = build_one(c, "Row");
        let child = tree.children(tree.root()).next().unwrap();
        assert_eq!(tree.name(child), "first_x0020_name");
    }

    #[test]
    fn test_nested_composite_recursion() {
        let inner = Composite::new("Address").property(Member::new("City", "Oslo"));
        let outer = Composite::new("Person")
            .property(Member::new("Name", "Ada"))
            .property(Member::new("Home", inner));
        let tree = build_one(outer, "Person");

        let children: Vec<ElementId> = tree.children(tree.root()).collect();
        assert_eq!(tree.name(children[1]), "Home");
        let city = tree.children(children[1]).next().unwrap();
        assert_eq!(tree.name(city), "City");
        assert_eq!(tree.text(city), Some("Oslo"));
    }

    #[test]
    fn test_sequence_children_named_by_runtime_type() {
        let seq = Sequence::new("Vec")
            .element(Composite::new("Book").property(Member::new("Title", "A")))
            .element(Composite::new("Journal").property(Member::new("Title", "B")))
            .element(42);
        let tree = build_one(seq, "Library");

        assert_eq!(tree.name(tree.root()), "Library");
        let names: Vec<&str> = tree
            .children(tree.root())
            .map(|id| tree.name(id))
            .collect();
        assert_eq!(names, vec!["Book", "Journal", "i64"]);
    }

    #[test]
    fn test_sequence_is_the_root_not_wrapped() {
        // The container element is the returned root itself.
        let seq = Sequence::new("Vec").element(1).element(2);
        let tree = build_one(seq, "Numbers");
        assert_eq!(tree.name(tree.root()), "Numbers");
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn test_sequence_root_hint_wins_over_suggested_name() {
        let seq = Sequence::new("Vec").hint(NameHint::root("Items")).element(1);
        let tree = build_one(seq, "Ignored");
        assert_eq!(tree.name(tree.root()), "Items");
    }

    #[test]
    fn test_composite_root_ignores_type_hints() {
        // Only sequence containers consult the value's own hints; a
        // composite's element always takes the suggested name.
        let c = Composite::new("Order")
            .hint(NameHint::root("Renamed"))
            .property(Member::new("Id", 1));
        let tree = build_one(c, "Order");
        assert_eq!(tree.name(tree.root()), "Order");
    }

    #[test]
    fn test_sequence_skips_absent_elements() {
        let seq = Sequence::new("Vec")
            .element(1)
            .absent_element()
            .element(3);
        let tree = build_one(seq, "Numbers");
        let texts: Vec<Option<&str>> = tree
            .children(tree.root())
            .map(|id| tree.text(id))
            .collect();
        assert_eq!(texts, vec![Some("1"), Some("3")]);
    }

    #[test]
    fn test_nested_sequence_member() {
        let c = Composite::new("Cart").property(Member::new(
            "Items",
            Sequence::new("Vec").element("a").element("b"),
        ));
        let tree = build_one(c, "Cart");
        let items = tree.children(tree.root()).next().unwrap();
        // The member's resolved name is the suggestion; no hint overrides it.
        assert_eq!(tree.name(items), "Items");
        assert_eq!(tree.child_count(items), 2);
        let first = tree.children(items).next().unwrap();
        assert_eq!(tree.name(first), "String");
    }

    #[test]
    fn test_enum_member_serializes_as_integer() {
        let c = Composite::new("Shirt")
            .property(Member::new("Color", Value::enumeration("Color", 2)));
        let tree = build_one(c, "Shirt");
        let color = tree.children(tree.root()).next().unwrap();
        assert_eq!(tree.text(color), Some("2"));
    }

    #[test]
    fn test_unreadable_member_aborts_with_path() {
        let inner = Composite::new("Vault").property(Member::unreadable("Secret", "not public"));
        let outer = Composite::new("Account").property(Member::new("Safe", inner));

        let err = build_named(Some(&Value::from(outer)), "Account").unwrap_err();
        assert_eq!(
            err,
            BuildError::MemberUnreadable {
                path: "Safe/Secret".to_string(),
                reason: "not public".to_string(),
            }
        );
    }

    #[test]
    fn test_unreadable_member_at_root_has_bare_path() {
        let c = Composite::new("Account").property(Member::unreadable("Secret", "private"));
        let err = build_named(Some(&Value::from(c)), "Account").unwrap_err();
        match err {
            BuildError::MemberUnreadable { path, .. } => assert_eq!(path, "Secret"),
        }
    }

    #[test]
    fn test_unreadable_inside_sequence_includes_index() {
        let bad = Composite::new("Row").property(Member::unreadable("Hidden", "no access"));
        let seq = Sequence::new("Vec")
            .element(Composite::new("Row").property(Member::new("Ok", 1)))
            .element(bad);
        let err = build_named(Some(&Value::from(seq)), "Rows").unwrap_err();
        match err {
            BuildError::MemberUnreadable { path, .. } => assert_eq!(path, "1/Hidden"),
        }
    }

    #[test]
    fn test_build_is_idempotent() {
        let c = Composite::new("Point")
            .property(Member::new("X", 5))
            .field(Member::new("Y", 6));
        let v = Value::from(c);
        let first = build_named(Some(&v), "P").unwrap().unwrap();
        let second = build_named(Some(&v), "P").unwrap().unwrap();
        assert_eq!(serialize(&first), serialize(&second));
    }
}
