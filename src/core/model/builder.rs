//! Scans annotated declarations and groups them into callables.

use indexmap::IndexMap;
use tracing::{debug, trace};

use super::inclusion::build_inclusion;
use super::{
    CallableKind, CallableOrigin, DeclKind, DefaultSource, DefaultableCallable, EmissionMode,
    MisplacedAnnotation, ModelError, ModelErrorKind, Parameter, TypeRef,
};
use crate::core::diag::Span;
use crate::core::diagnostics::Diagnostic;
use crate::core::facts::{
    AnnotationFacts, DefaultAnnotation, GenerateAnnotation, ParamFacts, SymbolTable, TypeFacts,
    TypeId, TypeKind, Visibility,
};
use crate::core::options::GenerateOptions;
use crate::core::reference::Locator;
use crate::core::types::Type;

/// A callable plus the diagnostics raised while building it.
#[derive(Debug, Clone)]
pub struct CallableRequest {
    pub callable: DefaultableCallable,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Default)]
pub struct ModelOutput {
    /// Requests grouped by enclosing type, in fact order.
    pub groups: IndexMap<TypeId, Vec<CallableRequest>>,
    /// Annotations on declarations that never become callables.
    pub misplaced: Vec<MisplacedAnnotation>,
    /// Diagnostics not attributable to a built callable.
    pub diagnostics: Vec<Diagnostic>,
}

pub fn build_model(table: &SymbolTable<'_>, options: &GenerateOptions) -> ModelOutput {
    let mut output = ModelOutput::default();
    for (id, ty) in table.types() {
        let builder = TypeModelBuilder {
            table,
            options,
            id,
            ty,
            inherited: first_generate(&ty.annotations),
        };
        builder.build(&mut output);
    }
    debug!(
        enclosing_types = output.groups.len(),
        callables = output.groups.values().map(Vec::len).sum::<usize>(),
        "model built"
    );
    output
}

/// Settings resolved along the declaration chain; the nearest wins.
pub(super) struct Settings {
    pub(super) emission: EmissionMode,
    pub(super) factory_name: String,
    pub(super) explicit_name: Option<String>,
}

struct TypeModelBuilder<'a, 't> {
    table: &'a SymbolTable<'t>,
    options: &'a GenerateOptions,
    id: TypeId,
    ty: &'t TypeFacts,
    inherited: Option<&'t GenerateAnnotation>,
}

/// Callable under construction: parameters plus errors found so far.
struct Draft {
    parameters: Vec<Parameter>,
    misplaced: Vec<MisplacedAnnotation>,
    errors: Vec<ModelError>,
    any_default: bool,
}

impl<'a, 't> TypeModelBuilder<'a, 't> {
    fn build(&self, output: &mut ModelOutput) {
        let type_ref = TypeRef::new(&self.ty.package, &self.ty.name);
        let mut requests = Vec::new();

        for annotation in &self.ty.annotations {
            match annotation {
                AnnotationFacts::IncludeDefaults(include) => {
                    match build_inclusion(self.table, self.options, self.id, include) {
                        Ok(request) => requests.push(request),
                        Err(diagnostics) => output.diagnostics.extend(diagnostics),
                    }
                }
                AnnotationFacts::Default(default) => output.misplaced.push(MisplacedAnnotation {
                    annotation: annotation.display_name(),
                    decl_kind: DeclKind::Type,
                    decl_name: type_ref.qualified(),
                    span: default.span,
                }),
                AnnotationFacts::GenerateDefaults(_) => {}
            }
        }

        for field in &self.ty.fields {
            for annotation in &field.annotations {
                output.misplaced.push(MisplacedAnnotation {
                    annotation: annotation.display_name(),
                    decl_kind: DeclKind::Field,
                    decl_name: format!("{}.{}", type_ref, field.name),
                    span: annotation.span(),
                });
            }
        }

        if self.ty.kind == TypeKind::Record {
            if let Some(request) = self.build_record() {
                requests.push(request);
            }
        }

        for ctor in &self.ty.constructors {
            let draft = self.draft(&ctor.params, DeclKind::Parameter);
            let (local, misplaced) = split_member_annotations(&ctor.annotations);
            if !draft.any_default && local.is_none() && misplaced.is_empty() {
                continue;
            }
            let settings = self.settings(local, self.inherited);
            let return_type = Type::Named {
                name: self.ty.name.clone(),
                args: Vec::new(),
            };
            requests.push(self.finish(
                draft,
                misplaced_on(misplaced, DeclKind::Constructor, &type_ref.qualified()),
                CallableKind::Constructor,
                self.ty.name.clone(),
                return_type,
                ctor.visibility,
                settings,
                ctor.span,
            ));
        }

        for method in &self.ty.methods {
            let draft = self.draft(&method.params, DeclKind::Parameter);
            let (local, misplaced) = split_member_annotations(&method.annotations);
            if !draft.any_default && local.is_none() && misplaced.is_empty() {
                continue;
            }
            let settings = self.settings(local, self.inherited);
            let decl_name = format!("{}.{}", type_ref, method.name);
            let mut errors = Vec::new();
            let return_type = match &method.return_type {
                Some(text) => self.parse_type(&decl_name, text, method.span, &mut errors),
                None => Type::Void,
            };
            let kind = if method.is_static {
                CallableKind::StaticMethod
            } else {
                CallableKind::InstanceMethod
            };
            let mut request = self.finish(
                draft,
                misplaced_on(misplaced, DeclKind::Method, &decl_name),
                kind,
                method.name.clone(),
                return_type,
                method.visibility,
                settings,
                method.span,
            );
            let subject = request.callable.signature();
            request.diagnostics.extend(
                errors
                    .iter()
                    .map(|error| Diagnostic::from_model_error(error).with_subject(&subject)),
            );
            requests.push(request);
        }

        if !requests.is_empty() {
            trace!(ty = %type_ref, requests = requests.len(), "collected callables");
            output.groups.entry(self.id).or_default().extend(requests);
        }
    }

    fn build_record(&self) -> Option<CallableRequest> {
        let draft = self.draft(&self.ty.components, DeclKind::RecordComponent);
        if !draft.any_default && self.inherited.is_none() {
            return None;
        }
        // The record type itself is the nearest declaration for its constructor.
        let settings = self.settings(self.inherited, None);
        let return_type = Type::Named {
            name: self.ty.name.clone(),
            args: Vec::new(),
        };
        Some(self.finish(
            draft,
            Vec::new(),
            CallableKind::RecordConstructor,
            self.ty.name.clone(),
            return_type,
            self.ty.visibility,
            settings,
            self.ty.span,
        ))
    }

    fn draft(&self, params: &[ParamFacts], param_kind: DeclKind) -> Draft {
        let mut draft = Draft {
            parameters: Vec::with_capacity(params.len()),
            misplaced: Vec::new(),
            errors: Vec::new(),
            any_default: false,
        };
        for param in params {
            let declared_type = self.parse_type(&param.name, &param.ty, param.span, &mut draft.errors);
            let mut sources = Vec::new();
            let mut declares_default = false;
            for annotation in &param.annotations {
                match annotation {
                    AnnotationFacts::Default(default) => {
                        draft.any_default = true;
                        declares_default = true;
                        collect_sources(&param.name, default, &mut sources, &mut draft.errors);
                    }
                    other => draft.misplaced.push(MisplacedAnnotation {
                        annotation: other.display_name(),
                        decl_kind: param_kind,
                        decl_name: param.name.clone(),
                        span: other.span(),
                    }),
                }
            }
            draft.parameters.push(Parameter {
                name: param.name.clone(),
                declared_type,
                sources,
                declares_default,
                span: param.span,
            });
        }
        draft
    }

    #[allow(clippy::too_many_arguments)]
    fn finish(
        &self,
        mut draft: Draft,
        mut misplaced: Vec<MisplacedAnnotation>,
        kind: CallableKind,
        name: String,
        return_type: Type,
        visibility: Visibility,
        settings: Settings,
        span: Span,
    ) -> CallableRequest {
        misplaced.append(&mut draft.misplaced);
        let callable = DefaultableCallable {
            kind,
            declaring_type: TypeRef::new(&self.ty.package, &self.ty.name),
            declaring_id: self.id,
            enclosing: self.id,
            package: self.ty.package.clone(),
            name,
            parameters: draft.parameters,
            return_type,
            visibility,
            emission: settings.emission,
            factory_name: settings.factory_name,
            explicit_name: settings.explicit_name,
            misplaced,
            origin: CallableOrigin::Annotated,
            span,
        };
        let subject = callable.signature();
        let diagnostics = draft
            .errors
            .iter()
            .map(|error| Diagnostic::from_model_error(error).with_subject(&subject))
            .collect();
        CallableRequest {
            callable,
            diagnostics,
        }
    }

    fn settings(
        &self,
        local: Option<&GenerateAnnotation>,
        inherited: Option<&GenerateAnnotation>,
    ) -> Settings {
        resolve_settings(local, inherited, self.options)
    }

    fn parse_type(
        &self,
        decl: &str,
        text: &str,
        span: Span,
        errors: &mut Vec<ModelError>,
    ) -> Type {
        Type::parse(text).unwrap_or_else(|_| {
            errors.push(ModelErrorKind::MalformedType(decl.to_string(), text.to_string()).at(span));
            Type::Named {
                name: text.to_string(),
                args: Vec::new(),
            }
        })
    }
}

pub(super) fn resolve_settings(
    local: Option<&GenerateAnnotation>,
    inherited: Option<&GenerateAnnotation>,
    options: &GenerateOptions,
) -> Settings {
    let emission = local
        .and_then(|a| a.mode)
        .or_else(|| inherited.and_then(|a| a.mode))
        .unwrap_or(options.default_mode);
    let factory_name = local
        .and_then(|a| a.factory_name.clone())
        .or_else(|| inherited.and_then(|a| a.factory_name.clone()))
        .unwrap_or_else(|| options.default_factory_name.clone());
    Settings {
        emission,
        factory_name,
        explicit_name: local.and_then(|a| a.name.clone()),
    }
}

pub(super) fn first_generate(annotations: &[AnnotationFacts]) -> Option<&GenerateAnnotation> {
    annotations.iter().find_map(|annotation| match annotation {
        AnnotationFacts::GenerateDefaults(generate) => Some(generate),
        _ => None,
    })
}

/// Splits member annotations into the generation settings and the
/// annotations that do not belong on a function or constructor.
fn split_member_annotations(
    annotations: &[AnnotationFacts],
) -> (Option<&GenerateAnnotation>, Vec<&AnnotationFacts>) {
    let mut local = None;
    let mut misplaced = Vec::new();
    for annotation in annotations {
        match annotation {
            AnnotationFacts::GenerateDefaults(generate) if local.is_none() => {
                local = Some(generate)
            }
            AnnotationFacts::GenerateDefaults(_) => {}
            other => misplaced.push(other),
        }
    }
    (local, misplaced)
}

fn misplaced_on(
    annotations: Vec<&AnnotationFacts>,
    decl_kind: DeclKind,
    decl_name: &str,
) -> Vec<MisplacedAnnotation> {
    annotations
        .into_iter()
        .map(|annotation| MisplacedAnnotation {
            annotation: annotation.display_name(),
            decl_kind,
            decl_name: decl_name.to_string(),
            span: annotation.span(),
        })
        .collect()
}

fn collect_sources(
    param: &str,
    default: &DefaultAnnotation,
    sources: &mut Vec<DefaultSource>,
    errors: &mut Vec<ModelError>,
) {
    if let Some(value) = &default.value {
        sources.push(DefaultSource::Literal(value.clone()));
    }
    let references = [
        (default.field.as_deref(), DefaultSource::FieldRef as fn(Locator) -> DefaultSource),
        (default.factory.as_deref(), DefaultSource::FactoryRef),
    ];
    for (text, make) in references {
        let Some(text) = text else {
            continue;
        };
        match Locator::parse(text) {
            Ok(locator) => sources.push(make(locator)),
            Err(error) => errors.push(
                ModelErrorKind::MalformedReference(param.to_string(), error).at(default.span),
            ),
        }
    }
    if default.value.is_none() && default.field.is_none() && default.factory.is_none() {
        errors.push(ModelErrorKind::EmptyDefault(param.to_string()).at(default.span));
    }
}
