//! Entry points that set up sessions and run the element encoder.

use meta_ir::{ClassId, ClassKind, DeclarationTree, Declaration, TypeParamId};
use rayon::prelude::*;

use super::ElementEncoder;
use crate::error::EncodeError;
use crate::extension::SerializerExtension;
use crate::records::ClassRecord;
use crate::stack::ensure_sufficient_stack;
use crate::tables::{Interner, TypeTable, VersionRequirementTable};

/// A class together with its record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedClass {
    pub class: ClassId,
    pub record: ClassRecord,
}

/// A class encoded in its own session, with the extension that owns the
/// session's names.
#[derive(Debug)]
pub struct EncodedSession<E> {
    pub class: ClassId,
    pub record: ClassRecord,
    pub extension: E,
}

/// Encode one class against caller-supplied tables.
///
/// Passing the same tables for several classes shares their entries.
/// Without a version-requirement table the encode fails.
pub fn encode_class<E: SerializerExtension + ?Sized>(
    tree: &DeclarationTree,
    extension: &mut E,
    type_table: &mut TypeTable,
    version_requirements: Option<&mut VersionRequirementTable>,
    class: ClassId,
) -> Result<ClassRecord, EncodeError> {
    ElementEncoder::new(tree, extension, type_table, version_requirements, class).class_record()
}

/// Encode `root` and every nested class the extension accepts, each as an
/// independent record in pre-order.
///
/// Every class gets fresh tables. A nested class's type-parameter ids
/// continue after its outer class's, so references to outer parameters
/// stay unambiguous. Enum entries are not encoded as classes.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(root = tree.lookup(tree.class(root).fq_name))
)]
pub fn encode_class_hierarchy<E: SerializerExtension + ?Sized>(
    tree: &DeclarationTree,
    extension: &mut E,
    root: ClassId,
) -> Result<Vec<EncodedClass>, EncodeError> {
    let mut encoded = Vec::new();
    encode_nested(tree, extension, root, None, &mut encoded)?;
    Ok(encoded)
}

fn encode_nested<E: SerializerExtension + ?Sized>(
    tree: &DeclarationTree,
    extension: &mut E,
    class: ClassId,
    parent: Option<&Interner<'_, TypeParamId>>,
    encoded: &mut Vec<EncodedClass>,
) -> Result<(), EncodeError> {
    let mut type_table = TypeTable::new();
    let mut version_requirements = VersionRequirementTable::new();
    let mut encoder = match parent {
        Some(parent) => ElementEncoder::with_parent(
            tree,
            &mut *extension,
            &mut type_table,
            Some(&mut version_requirements),
            parent,
            class,
        ),
        None => ElementEncoder::new(
            tree,
            &mut *extension,
            &mut type_table,
            Some(&mut version_requirements),
            class,
        ),
    };
    let record = encoder.class_record()?;
    let type_parameters = encoder.into_type_parameters();
    encoded.push(EncodedClass { class, record });

    for declaration in &tree.class(class).declarations {
        let Declaration::Class(nested) = *declaration else {
            continue;
        };
        if tree.class(nested).kind == ClassKind::EnumEntry
            || !extension.should_serialize_nested_class(tree, nested)
        {
            continue;
        }
        ensure_sufficient_stack(|| {
            encode_nested(tree, &mut *extension, nested, Some(&type_parameters), encoded)
        })?;
    }
    Ok(())
}

/// Encode independent classes in parallel, one session per class.
///
/// `make_extension` builds each session's extension. Results come back in
/// the order of `classes`; the first failure is returned.
#[tracing::instrument(level = "debug", skip_all, fields(count = classes.len()))]
pub fn encode_classes_parallel<E, F>(
    tree: &DeclarationTree,
    classes: &[ClassId],
    make_extension: F,
) -> Result<Vec<EncodedSession<E>>, EncodeError>
where
    E: SerializerExtension + Send,
    F: Fn() -> E + Sync,
{
    classes
        .par_iter()
        .map(|&class| {
            let mut extension = make_extension();
            let mut type_table = TypeTable::new();
            let mut version_requirements = VersionRequirementTable::new();
            let record = encode_class(
                tree,
                &mut extension,
                &mut type_table,
                Some(&mut version_requirements),
                class,
            )?;
            Ok(EncodedSession {
                class,
                record,
                extension,
            })
        })
        .collect()
}
