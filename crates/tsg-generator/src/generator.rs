//! Emission assembler: declaration discovery, per-declaration compilation,
//! helper injection and output assembly for one source file.

use indexmap::IndexMap;
use indexmap::map::Entry;
use thiserror::Error;
use tracing::debug;
use tsg_common::{LineMap, Position, Span};
use tsg_parser::{
    EnumDeclaration, InterfaceDeclaration, ParseError, PropertyName, SourceFile, Statement,
    TypeAliasDeclaration, TypeParameter, parse_source_file,
};

use crate::compiler::compile_type_node;
use crate::condition::Condition;
use crate::context::{Flags, GeneratorContext, HookSlot, ValuePath, guard_function_name, quote_string};
use crate::extras::inject_runtime_helpers;
use crate::members::compile_object_type;
use crate::output::{GeneratedGuard, GuardOutput};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("{file_name}:{position}: '{name}' is already declared; guard `{function_name}` would be generated twice")]
    DuplicateDeclaration {
        file_name: String,
        position: Position,
        name: String,
        function_name: String,
    },
}

/// A declaration a guard is generated for.
enum Declaration<'a> {
    Alias(&'a TypeAliasDeclaration),
    /// Every `interface` block with this name, in source order.
    Interface(Vec<&'a InterfaceDeclaration>),
    Enum(&'a EnumDeclaration),
}

impl Declaration<'_> {
    fn span(&self) -> Span {
        match self {
            Declaration::Alias(alias) => alias.span,
            Declaration::Interface(parts) => parts
                .iter()
                .map(|part| part.span)
                .reduce(Span::merge)
                .unwrap_or_default(),
            Declaration::Enum(decl) => decl.span,
        }
    }

    fn type_parameters(&self) -> &[TypeParameter] {
        match self {
            Declaration::Alias(alias) => &alias.type_parameters,
            Declaration::Interface(parts) => parts
                .iter()
                .map(|part| part.type_parameters.as_slice())
                .max_by_key(|params| params.len())
                .unwrap_or(&[]),
            Declaration::Enum(_) => &[],
        }
    }
}

/// Parse `source_text` and generate guards for it.
pub fn generate_type_guards_from_source(
    file_name: &str,
    source_text: &str,
    flags: Flags,
) -> Result<GuardOutput, GenerateError> {
    let source_file = parse_source_file(file_name, source_text)?;
    generate_type_guards(&source_file, flags)
}

/// Generate one `is<Name>` guard per type alias, interface and enum in `source_file`.
#[tracing::instrument(level = "debug", skip_all, fields(file = %source_file.file_name))]
pub fn generate_type_guards(
    source_file: &SourceFile,
    flags: Flags,
) -> Result<GuardOutput, GenerateError> {
    let mut ctx = GeneratorContext::new(flags);
    let declarations = collect_declarations(source_file, &mut ctx)?;
    debug!(count = declarations.len(), "collected declarations");

    // Registered up front so self, mutual and forward references resolve.
    for name in declarations.keys() {
        ctx.registry.generated_guards.insert((*name).to_string());
    }

    let mut output = GuardOutput::new(source_file.file_name.clone(), source_file.text().to_string());
    for (name, declaration) in &declarations {
        output.push_guard(compile_declaration(name, declaration, &mut ctx));
    }

    inject_runtime_helpers(&mut ctx);
    output.prologue = ctx.hooks.blocks(HookSlot::BeforeAll).map(str::to_string).collect();
    output.helpers = ctx
        .hooks
        .blocks(HookSlot::BeforeGenerated)
        .map(str::to_string)
        .collect();
    output.epilogue = ctx
        .hooks
        .blocks(HookSlot::AfterGenerated)
        .map(str::to_string)
        .collect();
    Ok(output)
}

/// Record declarations in source order, plus class, enum and import names.
fn collect_declarations<'a>(
    source_file: &'a SourceFile,
    ctx: &mut GeneratorContext,
) -> Result<IndexMap<&'a str, Declaration<'a>>, GenerateError> {
    let mut declarations: IndexMap<&'a str, Declaration<'a>> = IndexMap::new();
    let mut line_map: Option<LineMap> = None;
    let mut duplicate = |name: &str, span: Span| {
        let line_map = line_map.get_or_insert_with(|| LineMap::build(source_file.text()));
        GenerateError::DuplicateDeclaration {
            file_name: source_file.file_name.clone(),
            position: line_map.position(span.start),
            name: name.to_string(),
            function_name: guard_function_name(name),
        }
    };

    for statement in &source_file.statements {
        match statement {
            Statement::TypeAlias(alias) => {
                let name = alias.name.text.as_str();
                if declarations.insert(name, Declaration::Alias(alias)).is_some() {
                    return Err(duplicate(name, alias.name.span));
                }
            }
            Statement::Interface(decl) => {
                let name = decl.name.text.as_str();
                match declarations.entry(name) {
                    Entry::Occupied(mut entry) => match entry.get_mut() {
                        Declaration::Interface(parts) => parts.push(decl),
                        _ => return Err(duplicate(name, decl.name.span)),
                    },
                    Entry::Vacant(entry) => {
                        entry.insert(Declaration::Interface(vec![decl]));
                    }
                }
            }
            Statement::Enum(decl) => {
                let name = decl.name.text.as_str();
                ctx.registry.enums.insert(name.to_string());
                if declarations.insert(name, Declaration::Enum(decl)).is_some() {
                    return Err(duplicate(name, decl.name.span));
                }
            }
            Statement::Class(class) => {
                if let Some(name) = &class.name {
                    ctx.registry.classes.insert(name.text.clone());
                }
            }
            Statement::Import(import) => {
                ctx.registry
                    .imports
                    .extend(import.local_names().map(str::to_string));
            }
            Statement::Other(_) => {}
        }
    }
    Ok(declarations)
}

fn compile_declaration(
    name: &str,
    declaration: &Declaration<'_>,
    ctx: &mut GeneratorContext,
) -> GeneratedGuard {
    debug!(name, "compiling declaration");
    let type_parameters = declaration.type_parameters();
    ctx.type_parameters = type_parameters
        .iter()
        .map(|param| param.name.text.clone())
        .collect();

    let root = ValuePath::root();
    let condition = match declaration {
        Declaration::Alias(alias) => compile_type_node(&alias.type_node, &root, ctx),
        Declaration::Interface(parts) => {
            let heritage: Vec<_> = parts.iter().flat_map(|part| part.heritage.iter().cloned()).collect();
            let members: Vec<_> = parts.iter().flat_map(|part| part.members.iter().cloned()).collect();
            compile_object_type(&heritage, &members, &root, ctx)
        }
        Declaration::Enum(decl) => compile_enum(decl, &root),
    }
    .flatten_and();
    ctx.type_parameters.clear();

    let function_name = guard_function_name(name);
    let type_arguments = if type_parameters.is_empty() {
        String::new()
    } else {
        format!("<{}>", vec!["any"; type_parameters.len()].join(", "))
    };
    let code = format!(
        "export function {function_name}(value: unknown): value is {name}{type_arguments} {{\n  return {condition};\n}}"
    );

    GeneratedGuard {
        name: name.to_string(),
        function_name,
        code,
        diagnostics: condition.collect_comments(),
        span: declaration.span(),
    }
}

/// OR of `value === E.Member` over the members.
fn compile_enum(decl: &EnumDeclaration, path: &ValuePath) -> Condition {
    let enum_name = &decl.name.text;
    Condition::or(
        decl.members
            .iter()
            .map(|member| {
                let access = match &member.name {
                    PropertyName::Identifier(id) | PropertyName::PrivateIdentifier(id) => {
                        format!("{enum_name}.{}", id.text)
                    }
                    PropertyName::StringLiteral { value, .. } => {
                        format!("{enum_name}[{}]", quote_string(value))
                    }
                    PropertyName::NumericLiteral { text, .. } => format!("{enum_name}[{text}]"),
                    PropertyName::Computed { expression, .. } => {
                        format!("{enum_name}[{expression}]")
                    }
                };
                Condition::equals(path, access)
            })
            .collect(),
    )
}
