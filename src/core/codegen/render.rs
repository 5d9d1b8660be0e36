//! Java-flavoured source emission for derived declarations.
//!
//! Overload sets sharing a holder are emitted into one unit; each builder is
//! its own unit. Types in the unit's package are written by simple name,
//! everything else fully qualified.

use std::fmt::Write;

use indexmap::IndexMap;

use super::{Arg, BuilderType, CallTarget, DerivedDecl, Overload, OverloadSet};
use crate::core::literal::NULL_LITERAL;
use crate::core::model::{DefaultExpr, TypeRef};
use crate::core::types::Type;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub package: String,
    pub name: String,
    pub source: String,
}

impl GeneratedUnit {
    pub fn qualified_name(&self) -> String {
        TypeRef::new(&self.package, &self.name).qualified()
    }
}

pub fn render_units(decls: &[DerivedDecl]) -> Vec<GeneratedUnit> {
    let mut holders: IndexMap<&TypeRef, Vec<&OverloadSet>> = IndexMap::new();
    let mut builders = Vec::new();
    for decl in decls {
        match decl {
            DerivedDecl::OverloadSet(set) => holders.entry(&set.holder).or_default().push(set),
            DerivedDecl::Builder(builder) => builders.push(builder),
        }
    }

    let mut units = Vec::with_capacity(holders.len() + builders.len());
    for (holder, sets) in holders {
        units.push(GeneratedUnit {
            package: holder.package.clone(),
            name: holder.name.clone(),
            source: render_holder(holder, &sets),
        });
    }
    for builder in builders {
        units.push(GeneratedUnit {
            package: builder.name.package.clone(),
            name: builder.name.name.clone(),
            source: render_builder(builder),
        });
    }
    units
}

struct SourceWriter {
    output: String,
    indent: usize,
}

impl SourceWriter {
    fn new(package: &str) -> Self {
        let mut writer = Self {
            output: String::new(),
            indent: 0,
        };
        if !package.is_empty() {
            writer.line(&format!("package {package};"));
            writer.blank();
        }
        writer
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.output, "{:width$}{text}", "", width = self.indent * 4);
    }

    fn blank(&mut self) {
        self.output.push('\n');
    }

    fn open(&mut self, header: &str) {
        self.line(&format!("{header} {{"));
        self.indent += 1;
    }

    fn close(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.line("}");
    }

    fn finish(self) -> String {
        self.output
    }
}

fn render_holder(holder: &TypeRef, sets: &[&OverloadSet]) -> String {
    let package = holder.package.as_str();
    let mut w = SourceWriter::new(package);
    w.open(&format!("public final class {}", holder.name));
    w.line(&format!("private {}() {{}}", holder.name));
    for set in sets {
        for overload in &set.overloads {
            w.blank();
            render_overload(&mut w, package, &set.name, overload);
        }
    }
    w.close();
    w.finish()
}

fn render_overload(w: &mut SourceWriter, package: &str, name: &str, overload: &Overload) {
    let params = overload
        .params
        .iter()
        .map(|param| format!("{} {}", param.ty, param.name))
        .collect::<Vec<_>>()
        .join(", ");
    w.open(&format!(
        "public static {} {name}({params})",
        overload.return_type
    ));
    let args = overload
        .args
        .iter()
        .map(|arg| match arg {
            Arg::Param(name) => name.clone(),
            Arg::Default { expr, ty } => render_arg(expr, ty, package),
        })
        .collect::<Vec<_>>();
    let call = render_call(&overload.call, &args, package);
    if overload.return_type.is_void() {
        w.line(&format!("{call};"));
    } else {
        w.line(&format!("return {call};"));
    }
    w.close();
}

fn render_builder(builder: &BuilderType) -> String {
    let package = builder.name.package.as_str();
    let name = builder.name.name.as_str();
    let mut w = SourceWriter::new(package);
    w.open(&format!("public final class {name}"));

    if let Some(receiver) = &builder.receiver {
        w.line(&format!("private final {} {};", receiver.ty, receiver.name));
    }
    for field in &builder.fields {
        match &field.init {
            Some(init) => w.line(&format!(
                "private {} {} = {};",
                field.ty,
                field.name,
                render_expr(init, package)
            )),
            None => w.line(&format!("private {} {};", field.ty, field.name)),
        }
        if field.required {
            w.line(&format!("private boolean {}Set;", field.name));
        }
    }

    w.blank();
    match &builder.receiver {
        Some(receiver) => {
            w.open(&format!("public {name}({} {})", receiver.ty, receiver.name));
            w.line(&format!("this.{0} = {0};", receiver.name));
            w.close();
        }
        None => w.line(&format!("public {name}() {{}}")),
    }

    for field in &builder.fields {
        w.blank();
        w.open(&format!("public {name} {0}({1} {0})", field.name, field.ty));
        w.line(&format!("this.{0} = {0};", field.name));
        if field.required {
            w.line(&format!("this.{}Set = true;", field.name));
        }
        w.line("return this;");
        w.close();
    }

    w.blank();
    w.open(&format!(
        "public {} {}()",
        builder.return_type, builder.terminal
    ));
    for field in builder.fields.iter().filter(|field| field.required) {
        w.open(&format!("if (!{}Set)", field.name));
        w.line(&format!(
            "throw new IllegalStateException(\"{} is required\");",
            field.name
        ));
        w.close();
    }
    let args = builder
        .fields
        .iter()
        .map(|field| field.name.clone())
        .collect::<Vec<_>>();
    let call = render_call(&builder.target, &args, package);
    if builder.return_type.is_void() {
        w.line(&format!("{call};"));
    } else {
        w.line(&format!("return {call};"));
    }
    w.close();

    w.close();
    w.finish()
}

fn render_call(target: &CallTarget, args: &[String], package: &str) -> String {
    let args = args.join(", ");
    match target {
        CallTarget::Constructor(ty) => format!("new {}({args})", type_name(ty, package)),
        CallTarget::Static { owner, name } => {
            format!("{}.{name}({args})", type_name(owner, package))
        }
        CallTarget::Instance { receiver, name } => format!("{receiver}.{name}({args})"),
    }
}

/// A default passed as an argument; nulls are cast so overload resolution
/// on the declared callable stays unambiguous.
fn render_arg(expr: &DefaultExpr, ty: &Type, package: &str) -> String {
    match expr {
        DefaultExpr::Null => format!("({ty}) {NULL_LITERAL}"),
        other => render_expr(other, package),
    }
}

fn render_expr(expr: &DefaultExpr, package: &str) -> String {
    match expr {
        DefaultExpr::Literal(text) => text.clone(),
        DefaultExpr::Null => NULL_LITERAL.to_string(),
        DefaultExpr::StaticField { owner, name } => format!("{}.{name}", type_name(owner, package)),
        DefaultExpr::StaticCall { owner, name } => {
            format!("{}.{name}()", type_name(owner, package))
        }
    }
}

fn type_name(ty: &TypeRef, package: &str) -> String {
    if ty.package == package {
        ty.name.clone()
    } else {
        ty.qualified()
    }
}
