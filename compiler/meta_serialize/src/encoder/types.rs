//! Type and type-parameter encoding.

use meta_ir::well_known;
use meta_ir::{Classifier, Type, TypeArg, TypeKind, TypeParamId};
use smallvec::SmallVec;

use super::ElementEncoder;
use crate::extension::SerializerExtension;
use crate::records::{
    ArgumentRecord, ClassifierId, ClassifierLevel, TypeParameterRecord, TypeParameterRef, TypeRecord,
    TypeRecordKind, TypeRef,
};
use crate::stack::ensure_sufficient_stack;
use crate::tags::{ProjectionTag, VarianceTag};

type Chain = SmallVec<[ClassifierLevel; 1]>;

impl<E: SerializerExtension + ?Sized> ElementEncoder<'_, '_, E> {
    /// Encode `ty` inline or as a type-table id, per the extension's policy.
    pub fn type_ref(&mut self, ty: &Type) -> TypeRef {
        let record = self.type_record(ty);
        self.reference(record)
    }

    fn reference(&mut self, record: TypeRecord) -> TypeRef {
        if self.extension.should_use_type_table() {
            TypeRef::Id(self.type_table.intern(record))
        } else {
            TypeRef::Inline(Box::new(record))
        }
    }

    /// Encode `ty` as a standalone record.
    pub fn type_record(&mut self, ty: &Type) -> TypeRecord {
        ensure_sufficient_stack(|| self.type_record_inner(ty))
    }

    fn type_record_inner(&mut self, ty: &Type) -> TypeRecord {
        let tree = self.tree;
        let kind = match &ty.kind {
            TypeKind::Error { .. } => {
                let mut record = TypeRecord::new(TypeRecordKind::Error {
                    class_name: None,
                    message: None,
                });
                self.extension.serialize_error_type(tree, ty, &mut record);
                return record;
            }
            TypeKind::Flexible { lower, upper } => {
                let mut lower_record = self.type_record(lower);
                let mut upper_record = self.type_record(upper);
                self.extension
                    .serialize_flexible_type(tree, ty, &mut lower_record, &mut upper_record);
                lower_record.flexible_upper_bound = Some(self.reference(upper_record));
                return lower_record;
            }
            TypeKind::SuspendFunction {
                receiver,
                parameters,
                return_type,
            } => {
                let chain = self.suspend_function_chain(receiver.as_deref(), parameters, return_type);
                let mut record = TypeRecord::new(TypeRecordKind::Simple { chain });
                record.nullable = ty.nullable;
                self.extension.serialize_type(tree, ty, &mut record);
                self.extension.mark_suspend_type(&mut record);
                return record;
            }
            TypeKind::Classifier {
                classifier,
                arguments,
            } => TypeRecordKind::Simple {
                chain: self.classifier_chain(*classifier, arguments),
            },
            TypeKind::Parameter(param) => TypeRecordKind::Parameter(self.type_parameter_ref(*param)),
        };

        let mut record = TypeRecord::new(kind);
        record.nullable = ty.nullable;
        if let Some(abbreviation) = &ty.abbreviation {
            record.abbreviation = Some(self.type_ref(abbreviation));
        }
        self.extension.serialize_type(tree, ty, &mut record);
        record
    }

    /// Split flattened inner-class arguments into one level per class,
    /// innermost first.
    ///
    /// Each inner class takes as many arguments as it declares type
    /// parameters and passes the rest to its outer class. The walk stops at
    /// the first class that is not `inner`; that level keeps every argument
    /// left.
    fn classifier_chain(&mut self, classifier: Classifier, arguments: &[TypeArg]) -> Chain {
        let tree = self.tree;
        let mut chain = Chain::new();
        let mut current = classifier;
        let mut remaining = arguments;
        loop {
            let outer = match current {
                Classifier::Class(class) => {
                    let decl = tree.class(class);
                    decl.outer.filter(|_| decl.is_inner()).map(|outer| {
                        (decl.type_params.len().min(remaining.len()), outer)
                    })
                }
                Classifier::Alias(_) | Classifier::External(_) => None,
            };
            let own_count = outer.map_or(remaining.len(), |(count, _)| count);
            let (own, rest) = remaining.split_at(own_count);

            let classifier = self.classifier_id(current);
            let arguments = own.iter().map(|arg| self.argument_record(arg)).collect();
            chain.push(ClassifierLevel {
                classifier,
                arguments,
            });

            match outer {
                Some((_, outer)) => {
                    current = Classifier::Class(outer);
                    remaining = rest;
                }
                None => break,
            }
        }
        chain
    }

    fn classifier_id(&mut self, classifier: Classifier) -> ClassifierId {
        let tree = self.tree;
        match classifier {
            Classifier::Class(class) => {
                ClassifierId::Class(self.qualified_name_index(tree.class(class).fq_name))
            }
            Classifier::External(fq_name) => ClassifierId::Class(self.qualified_name_index(fq_name)),
            Classifier::Alias(alias) => {
                ClassifierId::TypeAlias(self.qualified_name_index(tree.type_alias(alias).fq_name))
            }
        }
    }

    fn argument_record(&mut self, argument: &TypeArg) -> ArgumentRecord {
        match argument {
            TypeArg::Star => ArgumentRecord::Star,
            TypeArg::Projected { variance, ty } => ArgumentRecord::Type {
                projection: ProjectionTag::from_variance(*variance).non_default(),
                ty: self.type_ref(ty),
            },
        }
    }

    fn type_parameter_ref(&mut self, param: TypeParamId) -> TypeParameterRef {
        let decl = self.tree.type_param(param);
        if decl.owner == self.containing {
            TypeParameterRef::Name(self.string_index(decl.name))
        } else {
            TypeParameterRef::Id(self.type_parameters.intern(param))
        }
    }

    /// `suspend R.(P1..Pn) -> T` as `FunctionN<R, P1..Pn, Continuation<T>, Any?>`,
    /// where `N` counts the receiver, the parameters and the continuation.
    fn suspend_function_chain(
        &mut self,
        receiver: Option<&Type>,
        parameters: &[Type],
        return_type: &Type,
    ) -> Chain {
        let arity = usize::from(receiver.is_some()) + parameters.len() + 1;
        let function = self
            .extension
            .string_table()
            .qualified_name_index(&well_known::function_class(arity));

        let mut arguments = Vec::with_capacity(arity + 1);
        for parameter in receiver.into_iter().chain(parameters) {
            arguments.push(ArgumentRecord::Type {
                projection: None,
                ty: self.type_ref(parameter),
            });
        }

        let continuation = self.well_known_type(well_known::CONTINUATION, vec![return_type], false);
        arguments.push(ArgumentRecord::Type {
            projection: None,
            ty: continuation,
        });
        let any = self.well_known_type(well_known::ANY, Vec::new(), true);
        arguments.push(ArgumentRecord::Type {
            projection: None,
            ty: any,
        });

        let mut chain = Chain::new();
        chain.push(ClassifierLevel {
            classifier: ClassifierId::Class(function),
            arguments,
        });
        chain
    }

    /// Reference to a well-known class applied to invariant arguments.
    fn well_known_type(&mut self, fq_name: &str, arguments: Vec<&Type>, nullable: bool) -> TypeRef {
        let classifier = self.extension.string_table().qualified_name_index(fq_name);
        let arguments = arguments
            .into_iter()
            .map(|ty| ArgumentRecord::Type {
                projection: None,
                ty: self.type_ref(ty),
            })
            .collect();
        let mut chain = Chain::new();
        chain.push(ClassifierLevel {
            classifier: ClassifierId::Class(classifier),
            arguments,
        });
        let mut record = TypeRecord::new(TypeRecordKind::Simple { chain });
        record.nullable = nullable;
        self.reference(record)
    }

    /// Record for a type parameter, interning its id first.
    ///
    /// A lone upper bound equal to the implicit default `core/Any?` is left
    /// out.
    pub(super) fn type_parameter_record(&mut self, param: TypeParamId) -> TypeParameterRecord {
        let tree = self.tree;
        let decl = tree.type_param(param);
        let mut record = TypeParameterRecord {
            id: self.type_parameters.intern(param),
            name: self.string_index(decl.name),
            reified: decl.reified,
            variance: VarianceTag::from_variance(decl.variance).non_default(),
            upper_bounds: Vec::new(),
            extensions: Vec::new(),
        };
        self.extension
            .serialize_type_parameter(tree, param, &mut record);

        let implicit_bound = matches!(decl.bounds.as_slice(), [bound] if tree.is_default_bound(bound));
        if !implicit_bound {
            record.upper_bounds = decl.bounds.iter().map(|bound| self.type_ref(bound)).collect();
        }
        record
    }
}
