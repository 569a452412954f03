use super::*;
use crate::{ClassKind, ClassModifiers, TypeArg};
use pretty_assertions::assert_eq;

fn class(tree: &mut DeclarationTree, name: &str, fq: &str) -> ClassDecl {
    let name = tree.intern(name);
    let fq = tree.intern(fq);
    ClassDecl::new(name, fq)
}

#[test]
fn nested_classes_join_outer_body() {
    let mut tree = DeclarationTree::new();
    let outer_decl = class(&mut tree, "Outer", "pkg/Outer");
    let outer = tree.add_class(outer_decl);
    let inner_decl = class(&mut tree, "Inner", "pkg/Outer.Inner");
    let inner = tree.add_nested_class(outer, inner_decl);

    assert_eq!(tree.class(outer).declarations, vec![Declaration::Class(inner)]);
    assert_eq!(tree.class(inner).outer, Some(outer));
    assert_eq!(tree.class(outer).companion, None);
}

#[test]
fn companion_is_recorded_on_outer() {
    let mut tree = DeclarationTree::new();
    let outer_decl = class(&mut tree, "Outer", "pkg/Outer");
    let outer = tree.add_class(outer_decl);
    let mut companion = class(&mut tree, "Companion", "pkg/Outer.Companion");
    companion.kind = ClassKind::Object;
    companion.modifiers = ClassModifiers::COMPANION;
    let companion = tree.add_nested_class(outer, companion);

    assert_eq!(tree.class(outer).companion, Some(companion));
}

#[test]
fn type_params_attach_to_their_owner() {
    let mut tree = DeclarationTree::new();
    let box_decl = class(&mut tree, "Box", "pkg/Box");
    let class_id = tree.add_class(box_decl);
    let t = tree.intern("T");
    let bound = tree.default_bound();
    let param = tree.add_type_param(DeclRef::Class(class_id), t, Variance::Out, false, vec![bound]);

    let get = tree.intern("get");
    let member = tree.add_member(
        class_id,
        MemberDecl::function(get, Vec::new(), Type::parameter(param)),
    );
    let r = tree.intern("R");
    let member_param = tree.add_type_param(DeclRef::Member(member), r, Variance::Invariant, true, Vec::new());

    assert_eq!(tree.class(class_id).type_params, vec![param]);
    assert_eq!(tree.member(member).type_params, vec![member_param]);
    assert_eq!(tree.member(member).owner, class_id);
    assert_eq!(tree.type_param(param).owner, DeclRef::Class(class_id));
}

#[test]
fn default_bound_detection() {
    let mut tree = DeclarationTree::new();
    let bound = tree.default_bound();
    assert!(tree.is_default_bound(&bound));

    let any = tree.intern("core/Any");
    let non_null_any = Type::external(any, Vec::new());
    assert!(!tree.is_default_bound(&non_null_any));

    let list = tree.intern("core/List");
    let nullable_list = Type::external(list, vec![TypeArg::Star]).nullable();
    assert!(!tree.is_default_bound(&nullable_list));
}

#[test]
fn aliased_any_is_default_bound() {
    let mut tree = DeclarationTree::new();
    let owner_decl = class(&mut tree, "Owner", "pkg/Owner");
    let owner = tree.add_class(owner_decl);
    let name = tree.intern("MyAny");
    let fq_name = tree.intern("pkg/Owner.MyAny");
    let any = tree.default_bound();
    let alias = tree.add_type_alias(
        owner,
        TypeAliasDecl::new(name, fq_name, any.clone(), any.clone()),
    );

    let aliased = any.with_abbreviation(Type::alias(alias, Vec::new()));
    assert!(tree.is_default_bound(&aliased));
}

#[test]
fn hierarchy_roots() {
    let mut tree = DeclarationTree::new();
    let any_decl = class(&mut tree, "Any", "core/Any");
    let any = tree.add_class(any_decl);
    let nothing_decl = class(&mut tree, "Nothing", "core/Nothing");
    let nothing = tree.add_class(nothing_decl);
    let other_decl = class(&mut tree, "Other", "pkg/Other");
    let other = tree.add_class(other_decl);

    assert!(tree.is_hierarchy_root(any));
    assert!(tree.is_hierarchy_root(nothing));
    assert!(!tree.is_hierarchy_root(other));
    assert_eq!(tree.class_ids().count(), 3);
}
