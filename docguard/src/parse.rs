//! Per-file module parser.
//!
//! Walks one source unit's AST and gathers a [`SourceUnit`]: classes with
//! their methods and attributes, functions with structured doc records,
//! module-level definitions, the explicit re-export list, and (for package
//! roots) unresolved relative-import directives.
//!
//! Validation is eager: every documented unit and every formal parameter
//! increments the token counter exactly once, and deficiencies are
//! registered as doc errors while parsing.

use crate::constants::{EXPORT_LIST, PRIVACY_PREFIX};
use crate::error::{DocguardError, Result};
use crate::model::{FunctionDoc, SourceUnit, SymbolRecord};
use crate::score::DocRegistry;
use crate::sections;
use crate::utils::{clean_doc, LineIndex};
use compact_str::CompactString;
use ruff_python_ast::{Expr, Stmt, StmtClassDef, StmtFunctionDef};
use ruff_text_size::Ranged;

/// Returns the cleaned docstring of a statement body, if the body opens
/// with a bare string literal.
fn docstring(body: &[Stmt]) -> Option<String> {
    if let Some(Stmt::Expr(expr_stmt)) = body.first() {
        if let Expr::StringLiteral(string_lit) = &*expr_stmt.value {
            return Some(clean_doc(&string_lit.value.to_string().replace('\r', "")));
        }
    }
    None
}

/// Returns the bare string literal carried by the statement following a
/// definition, used as that definition's description.
fn trailing_description(next: Option<&Stmt>) -> Option<String> {
    if let Some(Stmt::Expr(expr_stmt)) = next {
        if let Expr::StringLiteral(string_lit) = &*expr_stmt.value {
            return Some(clean_doc(&string_lit.value.to_string()));
        }
    }
    None
}

/// Joins the `Name` targets of an assignment (`a, b = ...` -> `"a, b"`).
fn assign_name(targets: &[Expr]) -> String {
    targets
        .iter()
        .filter_map(|target| match target {
            Expr::Name(name) => Some(name.id.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Extracts the string elements of an `__all__` list or tuple.
fn export_list(value: &Expr) -> Vec<CompactString> {
    let elts = match value {
        Expr::List(list) => &list.elts,
        Expr::Tuple(tuple) => &tuple.elts,
        _ => return Vec::new(),
    };
    elts.iter()
        .filter_map(|elt| match elt {
            Expr::StringLiteral(s) => Some(CompactString::from(s.value.to_string())),
            _ => None,
        })
        .collect()
}

/// Collects the formal parameter names of a function, in declaration order.
/// For methods the leading receiver parameter is excluded.
fn parameter_names(func: &StmtFunctionDef, is_method: bool) -> Vec<String> {
    let mut names: Vec<String> = func
        .parameters
        .posonlyargs
        .iter()
        .chain(&func.parameters.args)
        .map(|p| p.parameter.name.as_str().to_owned())
        .collect();
    if is_method && !names.is_empty() {
        names.remove(0);
    }
    if let Some(vararg) = &func.parameters.vararg {
        names.push(vararg.name.as_str().to_owned());
    }
    names.extend(
        func.parameters
            .kwonlyargs
            .iter()
            .map(|p| p.parameter.name.as_str().to_owned()),
    );
    if let Some(kwarg) = &func.parameters.kwarg {
        names.push(kwarg.name.as_str().to_owned());
    }
    names
}

/// Parser state for one source unit.
struct UnitParser<'a> {
    source: &'a str,
    line_index: LineIndex,
    /// File path of the unit, relative to the package directory.
    unit_path: String,
    registry: &'a mut DocRegistry,
}

impl UnitParser<'_> {
    fn line_of(&self, node: &impl Ranged) -> usize {
        self.line_index.line_index(node.range().start())
    }

    /// Parses a function or method into a symbol record, filling the
    /// parameter table from the sectioned docstring and validating it.
    fn parse_function(&mut self, func: &StmtFunctionDef, tag: &str, is_method: bool) -> SymbolRecord {
        let line = self.line_of(func);
        let names = parameter_names(func, is_method);

        let mut doc = FunctionDoc {
            signature: format!("({})", &self.source[func.parameters.range()]),
            ..FunctionDoc::default()
        };
        for name in &names {
            doc.params.insert(name.clone(), None);
        }

        let parsed = docstring(&func.body)
            .map(|raw| sections::parse(&raw))
            .unwrap_or_default();

        // One token for the description, one per formal parameter.
        self.registry.add_token(&self.unit_path);
        for _ in &names {
            self.registry.add_token(&self.unit_path);
        }

        if parsed.description.is_empty() {
            self.registry
                .add_error(&self.unit_path, tag, line, "Missing description".to_owned());
        }

        for (name, param_doc) in parsed.params {
            let key = name.trim_start_matches('*');
            if let Some(entry) = doc.params.get_mut(key) {
                *entry = Some(param_doc);
            } else {
                // A doc-error is a documented unit of its own.
                self.registry.add_token(&self.unit_path);
                self.registry.add_error(
                    &self.unit_path,
                    tag,
                    line,
                    format!("Unknown parameter `{name}`"),
                );
            }
        }

        for (name, entry) in &doc.params {
            if entry.is_none() {
                self.registry.add_error(
                    &self.unit_path,
                    tag,
                    line,
                    format!("Undocumented parameter `{name}`"),
                );
            }
        }

        doc.returns = parsed.returns;
        doc.returns.extend(parsed.yields);
        doc.raises = parsed.raises;

        SymbolRecord {
            line,
            doc: (!parsed.description.is_empty()).then_some(parsed.description),
            func: Some(doc),
            ..SymbolRecord::default()
        }
    }

    /// Parses a class into a symbol record with nested method and
    /// attribute records.
    fn parse_class(&mut self, class: &StmtClassDef) -> SymbolRecord {
        let class_name = class.name.as_str();
        let line = self.line_of(class);
        let doc = docstring(&class.body).filter(|d| !d.is_empty());

        self.registry.add_token(&self.unit_path);
        if doc.is_none() {
            self.registry.add_error(
                &self.unit_path,
                class_name,
                line,
                "Missing description".to_owned(),
            );
        }

        let mut record = SymbolRecord {
            line,
            doc,
            ..SymbolRecord::default()
        };

        for (i, stmt) in class.body.iter().enumerate() {
            match stmt {
                Stmt::FunctionDef(method) => {
                    let name = method.name.as_str();
                    if name.starts_with(PRIVACY_PREFIX) {
                        continue;
                    }
                    let tag = format!("{class_name}.{name}");
                    let parsed = self.parse_function(method, &tag, true);
                    record.methods.insert(name.to_owned(), parsed);
                }
                Stmt::Assign(assign) => {
                    let name = assign_name(&assign.targets);
                    if name.is_empty() || name.starts_with(PRIVACY_PREFIX) {
                        continue;
                    }
                    let attr_line = self.line_of(assign);
                    let description = trailing_description(class.body.get(i + 1));

                    self.registry.add_token(&self.unit_path);
                    if description.is_none() {
                        self.registry.add_error(
                            &self.unit_path,
                            &format!("{class_name}.{name}"),
                            attr_line,
                            format!("Undocumented attribute `{name}`"),
                        );
                    }

                    record.attrs.insert(
                        name,
                        SymbolRecord {
                            line: attr_line,
                            doc: description,
                            ..SymbolRecord::default()
                        },
                    );
                }
                _ => {}
            }
        }

        record
    }

    /// Walks the module body, populating `unit`.
    fn parse_module(&mut self, body: &[Stmt], unit: &mut SourceUnit, check_imports: bool) {
        unit.doc = docstring(body).filter(|d| !d.is_empty());

        for (i, stmt) in body.iter().enumerate() {
            match stmt {
                Stmt::ClassDef(class) => {
                    let name = class.name.as_str();
                    if name.starts_with(PRIVACY_PREFIX) {
                        continue;
                    }
                    let record = self.parse_class(class);
                    unit.classes.insert(name.to_owned(), record);
                }
                Stmt::FunctionDef(func) => {
                    let name = func.name.as_str();
                    if name.starts_with(PRIVACY_PREFIX) {
                        continue;
                    }
                    let record = self.parse_function(func, name, false);
                    unit.functions.insert(name.to_owned(), record);
                }
                Stmt::Assign(assign) => {
                    let name = assign_name(&assign.targets);
                    if name == EXPORT_LIST {
                        // Captured verbatim rather than turned into a record.
                        unit.exports = Some(export_list(&assign.value));
                        continue;
                    }
                    if name.is_empty() || name.starts_with(PRIVACY_PREFIX) {
                        continue;
                    }
                    let line = self.line_of(assign);
                    let description = trailing_description(body.get(i + 1));

                    self.registry.add_token(&self.unit_path);
                    if description.is_none() {
                        self.registry.add_error(
                            &self.unit_path,
                            &name,
                            line,
                            "Missing description".to_owned(),
                        );
                    }

                    unit.definitions.insert(
                        name,
                        SymbolRecord {
                            line,
                            doc: description,
                            ..SymbolRecord::default()
                        },
                    );
                }
                Stmt::ImportFrom(import) if check_imports => {
                    // Skip global imports; only local (relative) ones are
                    // resolved against the package tree.
                    if import.level == 0 {
                        continue;
                    }
                    let module = import
                        .module
                        .as_ref()
                        .map(|m| m.as_str().to_owned())
                        .unwrap_or_default();
                    let names = import.names.iter().map(|alias| {
                        let name = CompactString::from(alias.name.as_str());
                        let asname = alias
                            .asname
                            .as_ref()
                            .map_or_else(|| name.clone(), |a| CompactString::from(a.as_str()));
                        (name, asname)
                    });
                    unit.push_imports(import.level, &module, names);
                }
                _ => {}
            }
        }
    }
}

/// Parses one source unit into a [`SourceUnit`].
///
/// `unit_path` is the file path relative to the package directory; it keys
/// the documentation registry and later serves as the origin annotation for
/// re-exported records. Import directives are only recorded when
/// `check_imports` is set (package roots).
///
/// # Errors
///
/// Returns [`DocguardError::Parse`] on a syntax error; this aborts the
/// whole analysis.
pub fn parse_source_unit(
    source: &str,
    unit_path: &str,
    check_imports: bool,
    registry: &mut DocRegistry,
) -> Result<SourceUnit> {
    let parsed = ruff_python_parser::parse_module(source).map_err(|e| DocguardError::Parse {
        file: unit_path.into(),
        message: e.to_string(),
    })?;
    let module = parsed.into_syntax();

    let mut unit = SourceUnit {
        path: unit_path.to_owned(),
        ..SourceUnit::default()
    };
    let mut parser = UnitParser {
        source,
        line_index: LineIndex::new(source),
        unit_path: unit_path.to_owned(),
        registry,
    };
    parser.parse_module(&module.body, &mut unit, check_imports);

    Ok(unit)
}
