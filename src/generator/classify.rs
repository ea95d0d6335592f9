//! Classifier: turns scanned conversion methods into descriptors.

use std::collections::HashSet;

use syn::{FnArg, ForeignItemFn, Receiver, ReturnType};

use super::scan::MapperCandidate;
use crate::config::ClassPolicy;
use crate::models::{ConversionMethodDescriptor, MapperKind};

/// Classifies every conversion method of a candidate.
///
/// Methods that cannot be wired are dropped without a diagnostic. Rust
/// allows one `Map<In, Out>` impl per type pair on a mapper struct, so for
/// instance methods only the first method of each pair is kept.
pub fn classify(candidate: &MapperCandidate, policy: ClassPolicy) -> Vec<ConversionMethodDescriptor> {
    let declaration = &candidate.declaration;
    if declaration.is_static && policy == ClassPolicy::InstanceOnly {
        tracing::debug!(
            class = %declaration.qualified_name(),
            "Skipping static mapper under instance-only policy"
        );
        return Vec::new();
    }

    let mut instance_pairs = HashSet::new();
    let mut descriptors = Vec::new();

    for method in &candidate.methods {
        let descriptor = match classify_method(candidate, method) {
            Ok(descriptor) => descriptor,
            Err(reason) => {
                tracing::debug!(
                    class = %declaration.qualified_name(),
                    method = %method.sig.ident,
                    reason,
                    "Excluding conversion method"
                );
                continue;
            }
        };

        if descriptor.kind == MapperKind::Instance
            && !instance_pairs.insert((descriptor.input_type.clone(), descriptor.output_type.clone()))
        {
            tracing::debug!(
                class = %declaration.qualified_name(),
                method = %descriptor.method_name,
                "Excluding instance method with an already wired type pair"
            );
            continue;
        }

        descriptors.push(descriptor);
    }

    descriptors
}

fn classify_method(
    candidate: &MapperCandidate,
    method: &ForeignItemFn,
) -> Result<ConversionMethodDescriptor, &'static str> {
    let sig = &method.sig;
    if !sig.generics.params.is_empty() {
        return Err("generic method");
    }
    if sig.asyncness.is_some() {
        return Err("async method");
    }
    if sig.variadic.is_some() {
        return Err("variadic method");
    }

    let declaration = &candidate.declaration;
    let receiver = sig.receiver();
    let typed_params: Vec<&syn::Type> = sig
        .inputs
        .iter()
        .filter_map(|arg| match arg {
            FnArg::Typed(pat_type) => Some(&*pat_type.ty),
            FnArg::Receiver(_) => None,
        })
        .collect();

    if declaration.is_static && receiver.is_some_and(|r| r.colon_token.is_none()) {
        return Err("untyped self receiver outside an impl block");
    }

    let is_static = declaration.is_static || receiver.is_none();
    let has_extension_receiver = declaration.is_static && receiver.is_some();
    let kind = MapperKind::classify(is_static, has_extension_receiver);

    let input = match (kind, receiver) {
        (MapperKind::Extension, Some(receiver)) => {
            if !typed_params.is_empty() {
                return Err("extension method takes more than its receiver");
            }
            &*receiver.ty
        }
        (MapperKind::Instance, Some(receiver)) if !is_shared_self(receiver) => {
            return Err("instance receiver is not &self");
        }
        _ => match typed_params.as_slice() {
            [input] => *input,
            [] => return Err("no input parameter"),
            _ => return Err("more than one input parameter"),
        },
    };

    let ReturnType::Type(_, output) = &sig.output else {
        return Err("no return type");
    };

    let input_type = candidate.scope.resolve(input).ok_or("unresolvable input type")?;
    let output_type = candidate
        .scope
        .resolve(output)
        .ok_or("unresolvable output type")?;

    Ok(ConversionMethodDescriptor {
        declaration: declaration.clone(),
        method_name: sig.ident.to_string(),
        input_type,
        output_type,
        kind,
    })
}

/// `&self`, the only receiver a `Map::map(&self, ..)` body can forward.
fn is_shared_self(receiver: &Receiver) -> bool {
    receiver.reference.is_some() && receiver.mutability.is_none() && receiver.colon_token.is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compilation::{ModulePath, SourceUnit};
    use crate::generator::scan::scan_unit;

    fn classify_source(source: &str, policy: ClassPolicy) -> Vec<ConversionMethodDescriptor> {
        let unit = SourceUnit::new(
            "src/mappers.rs",
            ModulePath::from_segments(["mappers"]),
            source,
        );
        scan_unit(&unit, "mapper")
            .candidates
            .iter()
            .flat_map(|candidate| classify(candidate, policy))
            .collect()
    }

    fn classify_default(source: &str) -> Vec<ConversionMethodDescriptor> {
        classify_source(source, ClassPolicy::PerMethod)
    }

    #[test]
    fn test_instance_method() {
        let descriptors = classify_default(
            r#"
            use crate::models::{Car, CarDto};

            #[mapper]
            pub struct CarMapper;

            impl CarMapper {
                pub fn to_dto(&self, car: Car) -> CarDto;
            }
            "#,
        );

        assert_eq!(descriptors.len(), 1);
        let d = &descriptors[0];
        assert_eq!(d.kind, MapperKind::Instance);
        assert_eq!(d.method_name, "to_dto");
        assert_eq!(d.input_type, "crate::models::Car");
        assert_eq!(d.output_type, "crate::models::CarDto");
        assert_eq!(d.declaration.qualified_name(), "crate::mappers::CarMapper");
    }

    #[test]
    fn test_associated_function_is_static() {
        let descriptors = classify_default(
            r#"
            use crate::models::{Car, CarDto};

            #[mapper]
            pub struct CarMapper;

            impl CarMapper {
                pub fn to_dto(car: Car) -> CarDto;
            }
            "#,
        );

        assert_eq!(descriptors[0].kind, MapperKind::Static);
        assert!(!descriptors[0].declaration.is_static);
    }

    #[test]
    fn test_module_functions_are_static_or_extension() {
        let descriptors = classify_default(
            r#"
            #[mapper]
            pub mod car_maps {
                use crate::models::{Car, CarDto, Summary};

                pub fn to_dto(car: Car) -> CarDto;
                pub fn summarize(self: Car) -> Summary;
            }
            "#,
        );

        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].kind, MapperKind::Static);
        assert_eq!(descriptors[0].input_type, "crate::models::Car");
        assert_eq!(descriptors[1].kind, MapperKind::Extension);
        assert_eq!(descriptors[1].input_type, "crate::models::Car");
        assert_eq!(descriptors[1].output_type, "crate::models::Summary");
    }

    #[test]
    fn test_methods_without_input_are_dropped() {
        let descriptors = classify_default(
            r#"
            use crate::models::CarDto;

            #[mapper]
            pub struct CarMapper;

            impl CarMapper {
                pub fn make(&self) -> CarDto;
                pub fn default_dto() -> CarDto;
            }
            "#,
        );
        assert!(descriptors.is_empty());
    }

    #[test]
    fn test_malformed_methods_are_dropped() {
        let descriptors = classify_default(
            r#"
            use crate::models::{Car, CarDto};

            #[mapper]
            pub struct CarMapper;

            impl CarMapper {
                pub fn mutating(&mut self, car: Car) -> CarDto;
                pub fn consuming(self, car: Car) -> CarDto;
                pub fn two_inputs(&self, car: Car, extra: u32) -> CarDto;
                pub fn nothing(&self, car: Car);
                pub fn generic<T>(&self, car: T) -> CarDto;
                pub async fn later(&self, car: Car) -> CarDto;
                pub fn borrowed(&self, car: &Car) -> CarDto;
                pub fn unknown(&self, car: Truck) -> CarDto;
            }
            "#,
        );
        assert!(descriptors.is_empty());
    }

    #[test]
    fn test_untyped_self_in_module_is_dropped() {
        let descriptors = classify_default(
            r#"
            #[mapper]
            pub mod car_maps {
                use crate::models::{Car, CarDto};

                pub fn to_dto(self) -> CarDto;
            }
            "#,
        );
        assert!(descriptors.is_empty());
    }

    #[test]
    fn test_instance_only_policy_skips_static_classes() {
        let source = r#"
            #[mapper]
            pub mod car_maps {
                use crate::models::{Car, CarDto};

                pub fn to_dto(car: Car) -> CarDto;
            }

            #[mapper]
            pub struct WheelMapper;

            impl WheelMapper {
                pub fn to_dto(&self, wheel: u8) -> String;
            }
        "#;

        let per_method = classify_source(source, ClassPolicy::PerMethod);
        assert_eq!(per_method.len(), 2);

        let instance_only = classify_source(source, ClassPolicy::InstanceOnly);
        assert_eq!(instance_only.len(), 1);
        assert_eq!(instance_only[0].declaration.class_name, "WheelMapper");
    }

    #[test]
    fn test_instance_methods_with_distinct_pairs_are_all_wired() {
        let descriptors = classify_default(
            r#"
            use crate::models::{Car, CarDto, Summary};

            #[mapper]
            pub struct CarMapper;

            impl CarMapper {
                pub fn to_dto(&self, car: Car) -> CarDto;
                pub fn to_summary(&self, car: Car) -> Summary;
                pub fn to_dto_again(&self, car: Car) -> CarDto;
            }
            "#,
        );

        let names: Vec<&str> = descriptors.iter().map(|d| d.method_name.as_str()).collect();
        assert_eq!(names, vec!["to_dto", "to_summary"]);
    }

    #[test]
    fn test_duplicate_static_pairs_are_kept() {
        let descriptors = classify_default(
            r#"
            #[mapper]
            pub mod car_maps {
                use crate::models::{Car, CarDto};

                pub fn to_dto(car: Car) -> CarDto;
                pub fn to_dto_v2(car: Car) -> CarDto;
            }
            "#,
        );
        assert_eq!(descriptors.len(), 2);
    }
}
