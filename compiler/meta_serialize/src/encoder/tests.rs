use meta_ir::{
    ClassModifiers, DeclarationTree, MemberDecl, Type, TypeAliasDecl, TypeArg, TypeKind, Variance,
};
use pretty_assertions::assert_eq;
use smallvec::smallvec;

use super::*;
use crate::config::SerializerConfig;
use crate::extension::DefaultExtension;
use crate::flags::TypeFlags;
use crate::records::{
    ArgumentRecord, ClassifierId, ClassifierLevel, TypeParameterRef, TypeRecord, TypeRecordKind,
    TypeRef,
};
use crate::tags::{ProjectionTag, VarianceTag};
use crate::test_helpers::{add_class, class_decl, external, inline, Session};

fn classifier_name<'s>(session: &'s Session, record: &TypeRecord) -> &'s str {
    match record.classifier() {
        Some(ClassifierId::Class(id) | ClassifierId::TypeAlias(id)) => session.qualified_name(id),
        None => "<not simple>",
    }
}

fn chain(record: &TypeRecord) -> &[ClassifierLevel] {
    match &record.kind {
        TypeRecordKind::Simple { chain } => chain,
        other => panic!("expected a simple type, found {other:?}"),
    }
}

fn argument_type(argument: &ArgumentRecord) -> &TypeRecord {
    match argument {
        ArgumentRecord::Type { ty, .. } => inline(ty),
        ArgumentRecord::Star => panic!("expected a typed argument"),
    }
}

#[test]
fn simple_type_records_classifier_then_arguments() {
    let mut tree = DeclarationTree::new();
    let class = add_class(&mut tree, "pkg/A");
    let string = external(&mut tree, "core/String", Vec::new());
    let list = external(&mut tree, "core/List", vec![string]).nullable();

    let mut session = Session::new(DefaultExtension::default());
    let record = session.encoder(&tree, class).type_record(&list);

    let element = TypeRecord::new(TypeRecordKind::Simple {
        chain: smallvec![ClassifierLevel {
            classifier: ClassifierId::Class(1),
            arguments: Vec::new(),
        }],
    });
    let mut expected = TypeRecord::new(TypeRecordKind::Simple {
        chain: smallvec![ClassifierLevel {
            classifier: ClassifierId::Class(0),
            arguments: vec![ArgumentRecord::Type {
                projection: None,
                ty: TypeRef::Inline(Box::new(element)),
            }],
        }],
    });
    expected.nullable = true;
    assert_eq!(record, expected);
    assert_eq!(session.qualified_name(0), "core/List");
    assert_eq!(session.qualified_name(1), "core/String");
}

#[test]
fn projections_and_star_arguments() {
    let mut tree = DeclarationTree::new();
    let class = add_class(&mut tree, "pkg/A");
    let number = external(&mut tree, "core/Number", Vec::new());
    let map = tree.intern("core/Map");
    let ty = Type::external(
        map,
        vec![
            TypeArg::Star,
            TypeArg::Projected {
                variance: Variance::Out,
                ty: number,
            },
        ],
    );

    let mut session = Session::new(DefaultExtension::default());
    let record = session.encoder(&tree, class).type_record(&ty);

    let arguments = &chain(&record)[0].arguments;
    assert_eq!(arguments[0], ArgumentRecord::Star);
    assert!(matches!(
        arguments[1],
        ArgumentRecord::Type {
            projection: Some(ProjectionTag::Out),
            ..
        }
    ));
}

#[test]
fn type_table_policy_references_by_id() {
    let mut tree = DeclarationTree::new();
    let class = add_class(&mut tree, "pkg/A");
    let string = external(&mut tree, "core/String", Vec::new());

    let mut session = Session::new(DefaultExtension::default());
    let reference = session.encoder(&tree, class).type_ref(&string);
    assert!(matches!(reference, TypeRef::Inline(_)));
    assert!(session.type_table.is_empty());

    let mut session = Session::new(DefaultExtension::new(SerializerConfig::with_type_table()));
    let mut encoder = session.encoder(&tree, class);
    assert_eq!(encoder.type_ref(&string), TypeRef::Id(0));
    assert_eq!(encoder.type_ref(&string.clone().nullable()), TypeRef::Id(1));
    assert_eq!(encoder.type_ref(&string), TypeRef::Id(0));
    drop(encoder);
    assert_eq!(session.type_table.len(), 2);
}

#[test]
fn suspend_function_is_rewritten_and_marked() {
    let mut tree = DeclarationTree::new();
    let class = add_class(&mut tree, "pkg/A");
    let string = external(&mut tree, "core/String", Vec::new());
    let int = external(&mut tree, "core/Int", Vec::new());
    let ty = Type::suspend_function(None, vec![string], int);

    let mut session = Session::new(DefaultExtension::default());
    let record = session.encoder(&tree, class).type_record(&ty);

    assert_eq!(record.flags, Some(TypeFlags::SUSPEND.bits()));
    assert!(!record.nullable);
    assert_eq!(classifier_name(&session, &record), "core/Function2");

    let arguments = &chain(&record)[0].arguments;
    assert_eq!(arguments.len(), 3);
    assert_eq!(classifier_name(&session, argument_type(&arguments[0])), "core/String");

    let continuation = argument_type(&arguments[1]);
    assert_eq!(
        classifier_name(&session, continuation),
        "core/coroutines/Continuation"
    );
    let result = argument_type(&chain(continuation)[0].arguments[0]);
    assert_eq!(classifier_name(&session, result), "core/Int");

    let any = argument_type(&arguments[2]);
    assert_eq!(classifier_name(&session, any), "core/Any");
    assert!(any.nullable);
}

#[test]
fn suspend_receiver_comes_first() {
    let mut tree = DeclarationTree::new();
    let class = add_class(&mut tree, "pkg/A");
    let receiver = external(&mut tree, "pkg/Scope", Vec::new());
    let unit = external(&mut tree, "core/Unit", Vec::new());
    let ty = Type::suspend_function(Some(receiver), Vec::new(), unit).nullable();

    let mut session = Session::new(DefaultExtension::default());
    let record = session.encoder(&tree, class).type_record(&ty);

    assert!(record.nullable);
    assert_eq!(classifier_name(&session, &record), "core/Function2");
    let first = argument_type(&chain(&record)[0].arguments[0]);
    assert_eq!(classifier_name(&session, first), "pkg/Scope");
}

#[test]
fn flexible_type_links_upper_to_lower() {
    let mut tree = DeclarationTree::new();
    let class = add_class(&mut tree, "pkg/A");
    let lower = external(&mut tree, "core/String", Vec::new());
    let upper = lower.clone().nullable();
    let ty = Type::flexible(lower, upper);

    let mut session = Session::new(DefaultExtension::default());
    let record = session.encoder(&tree, class).type_record(&ty);
    assert!(!record.nullable);
    let upper = record
        .flexible_upper_bound
        .as_ref()
        .map(inline)
        .map(|upper| upper.nullable);
    assert_eq!(upper, Some(true));

    let mut session = Session::new(DefaultExtension::new(SerializerConfig::with_type_table()));
    let reference = session.encoder(&tree, class).type_ref(&ty);
    assert_eq!(reference, TypeRef::Id(1));
    assert_eq!(
        session.type_table.types()[1].flexible_upper_bound,
        Some(TypeRef::Id(0))
    );
    assert!(session.type_table.types()[0].nullable);
}

#[test]
fn inner_class_arguments_split_per_level() {
    let mut tree = DeclarationTree::new();
    let outer = add_class(&mut tree, "pkg/Outer");
    let bound = tree.default_bound();
    let a = tree.intern("A");
    tree.add_type_param(DeclRef::Class(outer), a, Variance::Invariant, false, vec![bound.clone()]);

    let mut decl = class_decl(&mut tree, "pkg/Outer.Inner");
    decl.modifiers = ClassModifiers::INNER;
    let inner = tree.add_nested_class(outer, decl);
    let b = tree.intern("B");
    tree.add_type_param(DeclRef::Class(inner), b, Variance::Invariant, false, vec![bound]);

    let int = external(&mut tree, "core/Int", Vec::new());
    let string = external(&mut tree, "core/String", Vec::new());
    let ty = Type::class(inner, vec![TypeArg::invariant(int), TypeArg::invariant(string)]);

    let mut session = Session::new(DefaultExtension::default());
    let record = session.encoder(&tree, outer).type_record(&ty);

    let levels = chain(&record);
    assert_eq!(levels.len(), 2);
    let names: Vec<(&str, Vec<&str>)> = levels
        .iter()
        .map(|level| {
            let ClassifierId::Class(id) = level.classifier else {
                panic!("expected a class")
            };
            let arguments = level
                .arguments
                .iter()
                .map(|arg| classifier_name(&session, argument_type(arg)))
                .collect();
            (session.qualified_name(id), arguments)
        })
        .collect();
    assert_eq!(
        names,
        vec![
            ("pkg/Outer.Inner", vec!["core/Int"]),
            ("pkg/Outer", vec!["core/String"]),
        ]
    );
}

#[test]
fn nested_non_inner_class_keeps_all_arguments() {
    let mut tree = DeclarationTree::new();
    let outer = add_class(&mut tree, "pkg/Outer");
    let decl = class_decl(&mut tree, "pkg/Outer.Nested");
    let nested = tree.add_nested_class(outer, decl);
    let int = external(&mut tree, "core/Int", Vec::new());
    let ty = Type::class(nested, vec![TypeArg::invariant(int)]);

    let mut session = Session::new(DefaultExtension::default());
    let record = session.encoder(&tree, outer).type_record(&ty);
    assert_eq!(chain(&record).len(), 1);
    assert_eq!(chain(&record)[0].arguments.len(), 1);
}

#[test]
fn type_parameter_references_by_name_or_id() {
    let mut tree = DeclarationTree::new();
    let class = add_class(&mut tree, "pkg/C");
    let bound = tree.default_bound();
    let t_name = tree.intern("T");
    let t = tree.add_type_param(DeclRef::Class(class), t_name, Variance::Invariant, false, vec![bound.clone()]);

    let unit = external(&mut tree, "core/Unit", Vec::new());
    let f_name = tree.intern("f");
    let f = tree.add_member(class, MemberDecl::function(f_name, Vec::new(), unit));
    let u_name = tree.intern("U");
    let u = tree.add_type_param(DeclRef::Member(f), u_name, Variance::Invariant, false, vec![bound]);

    let mut session = Session::new(DefaultExtension::default());
    let mut encoder = session.encoder(&tree, class);
    let own = encoder.type_record(&Type::parameter(t));
    assert_eq!(own.kind, TypeRecordKind::Parameter(TypeParameterRef::Name(0)));

    let mut local = encoder.child(DeclRef::Member(f));
    let outer = local.type_record(&Type::parameter(t));
    let member_own = local.type_record(&Type::parameter(u));
    assert_eq!(outer.kind, TypeRecordKind::Parameter(TypeParameterRef::Id(0)));
    assert_eq!(member_own.kind, TypeRecordKind::Parameter(TypeParameterRef::Name(1)));
    drop(local);
    drop(encoder);
    assert_eq!(session.string(0), "T");
    assert_eq!(session.string(1), "U");
}

#[test]
fn child_type_parameter_ids_continue_after_parent() {
    let mut tree = DeclarationTree::new();
    let class = add_class(&mut tree, "pkg/C");
    let bound = tree.default_bound();
    let t_name = tree.intern("T");
    let t = tree.add_type_param(DeclRef::Class(class), t_name, Variance::Invariant, false, vec![bound.clone()]);
    let unit = external(&mut tree, "core/Unit", Vec::new());
    let f_name = tree.intern("f");
    let f = tree.add_member(class, MemberDecl::function(f_name, Vec::new(), unit));
    let u_name = tree.intern("U");
    let u = tree.add_type_param(DeclRef::Member(f), u_name, Variance::Invariant, false, vec![bound]);

    let mut session = Session::new(DefaultExtension::default());
    let mut encoder = session.encoder(&tree, class);
    assert_eq!(encoder.type_parameter_record(t).id, 0);
    let mut local = encoder.child(DeclRef::Member(f));
    assert_eq!(local.type_parameter_record(u).id, 1);
    assert_eq!(local.type_parameter_record(t).id, 0);
}

#[test]
fn type_parameter_bounds_and_tags() {
    let mut tree = DeclarationTree::new();
    let class = add_class(&mut tree, "pkg/C");
    let default = tree.default_bound();
    let any = external(&mut tree, "core/Any", Vec::new());
    let comparable = external(&mut tree, "core/Comparable", Vec::new());
    let names: Vec<_> = ["A", "B", "C"].iter().map(|n| tree.intern(n)).collect();

    let a = tree.add_type_param(DeclRef::Class(class), names[0], Variance::Out, true, vec![default.clone()]);
    let b = tree.add_type_param(DeclRef::Class(class), names[1], Variance::Invariant, false, vec![any]);
    let c = tree.add_type_param(
        DeclRef::Class(class),
        names[2],
        Variance::In,
        false,
        vec![default, comparable],
    );

    let mut session = Session::new(DefaultExtension::default());
    let mut encoder = session.encoder(&tree, class);
    let a = encoder.type_parameter_record(a);
    let b = encoder.type_parameter_record(b);
    let c = encoder.type_parameter_record(c);

    assert!(a.upper_bounds.is_empty(), "lone implicit bound is elided");
    assert!(a.reified);
    assert_eq!(a.variance, Some(VarianceTag::Out));
    assert_eq!(b.upper_bounds.len(), 1, "non-null Any is not the implicit bound");
    assert_eq!(b.variance, None);
    assert_eq!(c.upper_bounds.len(), 2);
    assert_eq!(c.variance, Some(VarianceTag::In));
}

#[test]
fn error_type_goes_to_extension() {
    let mut tree = DeclarationTree::new();
    let class = add_class(&mut tree, "pkg/A");
    let message = tree.intern("unresolved reference: Foo");
    let ty = Type::error(message);

    let mut session = Session::new(DefaultExtension::default());
    let record = session.encoder(&tree, class).type_record(&ty);
    assert_eq!(
        record.kind,
        TypeRecordKind::Error {
            class_name: None,
            message: Some(0)
        }
    );
    assert_eq!(session.string(0), "unresolved reference: Foo");
}

#[test]
fn abbreviation_references_the_alias() {
    let mut tree = DeclarationTree::new();
    let class = add_class(&mut tree, "pkg/A");
    let string = external(&mut tree, "core/String", Vec::new());
    let alias_name = tree.intern("Text");
    let alias_fq = tree.intern("pkg/A.Text");
    let alias = tree.add_type_alias(
        class,
        TypeAliasDecl::new(alias_name, alias_fq, string.clone(), string.clone()),
    );
    let ty = string.with_abbreviation(Type::alias(alias, Vec::new()));
    assert!(matches!(ty.kind, TypeKind::Classifier { .. }));

    let mut session = Session::new(DefaultExtension::default());
    let record = session.encoder(&tree, class).type_record(&ty);
    let abbreviation = record.abbreviation.as_ref().map(inline);
    let classifier = abbreviation.and_then(TypeRecord::classifier);
    assert!(matches!(classifier, Some(ClassifierId::TypeAlias(_))));
    assert_eq!(
        abbreviation.map(|record| classifier_name(&session, record)),
        Some("pkg/A.Text")
    );
}
