use meta_ir::{ClassDecl, MemberDecl, MemberOrigin};

use super::*;
use crate::records::TypeParameterRef;

fn tree_with_members() -> (DeclarationTree, MemberId, MemberId) {
    let mut tree = DeclarationTree::new();
    let name = tree.intern("A");
    let fq_name = tree.intern("pkg/A");
    let class = tree.add_class(ClassDecl::new(name, fq_name));
    let unit_name = tree.intern("core/Unit");
    let unit = Type::external(unit_name, Vec::new());

    let declared_name = tree.intern("declared");
    let declared = tree.add_member(class, MemberDecl::function(declared_name, Vec::new(), unit.clone()));
    let synthetic_name = tree.intern("copy");
    let mut synthetic = MemberDecl::function(synthetic_name, Vec::new(), unit);
    synthetic.origin = MemberOrigin::Synthesized;
    let synthetic = tree.add_member(class, synthetic);
    (tree, declared, synthetic)
}

#[test]
fn synthetic_members_follow_config() {
    let (tree, declared, synthetic) = tree_with_members();

    let skipping = DefaultExtension::default();
    assert!(skipping.should_serialize_member(&tree, declared));
    assert!(!skipping.should_serialize_member(&tree, synthetic));

    let keeping = DefaultExtension::new(SerializerConfig::with_synthetic_members());
    assert!(keeping.should_serialize_member(&tree, synthetic));
}

#[test]
fn policies_come_from_config() {
    let extension = DefaultExtension::default();
    assert!(!extension.should_use_type_table());
    assert!(!extension.should_use_normalized_visibility());
    assert_eq!(extension.metadata_version(), Version::new(1, 0, 0));

    let extension = DefaultExtension::new(SerializerConfig {
        use_type_table: true,
        normalize_visibility: true,
        ..SerializerConfig::default()
    });
    assert!(extension.should_use_type_table());
    assert!(extension.should_use_normalized_visibility());
    assert!(extension.config().skip_synthetic_members);
}

#[test]
fn mark_suspend_keeps_other_bits() {
    let extension = DefaultExtension::default();
    let mut record = TypeRecord::new(TypeRecordKind::Parameter(TypeParameterRef::Id(0)));
    extension.mark_suspend_type(&mut record);
    assert_eq!(record.flags, Some(1));

    record.flags = Some(0b100);
    extension.mark_suspend_type(&mut record);
    assert_eq!(record.flags, Some(0b101));
}

#[test]
fn string_table_is_the_owned_name_table() {
    let mut extension = DefaultExtension::default();
    assert_eq!(extension.string_table().string_index("x"), 0);
    assert_eq!(extension.string_table().qualified_name_index("pkg/X"), 0);
    assert_eq!(extension.names().string(0), Some("x"));
    assert_eq!(extension.into_names().qualified_name(0), Some("pkg/X"));
}
