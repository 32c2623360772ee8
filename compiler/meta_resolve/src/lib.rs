//! Declaration resolver for Meta.
//!
//! Builds the symbol tables the evaluator runs against and validates every
//! statically-checkable reference before execution: duplicate declarations,
//! unknown types, struct literal field sets, call targets, and the `main`
//! entry point. Resolution has no side effects; a program that resolves
//! cleanly can still fail at runtime (arithmetic, type mismatches), but it
//! can never call into a procedure that does not exist.

mod error;

use meta_ir::{
    Block, Expr, ExprKind, Name, ProcDecl, StringInterner, StructDecl, TranslationUnit, Type,
};
use rustc_hash::FxHashMap;
use tracing::debug;

pub use error::ResolveError;

/// Read-only symbol tables over a resolved translation unit.
pub struct Symbols<'ast> {
    structs: FxHashMap<Name, &'ast StructDecl>,
    procs: FxHashMap<Name, &'ast ProcDecl>,
    associated: FxHashMap<(Name, Name), &'ast ProcDecl>,
    main: &'ast ProcDecl,
}

impl<'ast> Symbols<'ast> {
    /// Look up a struct declaration by name.
    pub fn struct_decl(&self, name: Name) -> Option<&'ast StructDecl> {
        self.structs.get(&name).copied()
    }

    /// Look up a free procedure by name.
    pub fn proc(&self, name: Name) -> Option<&'ast ProcDecl> {
        self.procs.get(&name).copied()
    }

    /// Look up an associated procedure by its `(type, name)` key.
    pub fn associated(&self, type_name: Name, name: Name) -> Option<&'ast ProcDecl> {
        self.associated.get(&(type_name, name)).copied()
    }

    /// The entry point. Guaranteed to take no parameters and return
    /// `i32` or nothing.
    pub fn main(&self) -> &'ast ProcDecl {
        self.main
    }
}

/// Resolve a translation unit into symbol tables, rejecting every
/// statically-detectable error.
pub fn resolve<'ast>(
    unit: &'ast TranslationUnit,
    interner: &StringInterner,
) -> Result<Symbols<'ast>, ResolveError> {
    let resolver = Resolver { interner };
    let symbols = resolver.run(unit)?;
    debug!(
        structs = symbols.structs.len(),
        procs = symbols.procs.len(),
        associated = symbols.associated.len(),
        "resolved translation unit"
    );
    Ok(symbols)
}

struct Resolver<'i> {
    interner: &'i StringInterner,
}

impl Resolver<'_> {
    fn run<'ast>(&self, unit: &'ast TranslationUnit) -> Result<Symbols<'ast>, ResolveError> {
        let structs = self.collect_structs(unit)?;
        let procs = self.collect_procs(unit)?;
        let associated = self.collect_associated(unit, &structs)?;

        // Declared types must exist before bodies are walked.
        for decl in &unit.structs {
            for field in &decl.fields {
                self.check_type(field.ty, &structs)?;
            }
        }
        for proc in unit.procs.iter().chain(unit.impls.iter().flat_map(|i| i.procs.iter())) {
            self.check_proc_signature(proc, &structs)?;
        }

        let main = self.find_main(&procs)?;

        let symbols = Symbols {
            structs,
            procs,
            associated,
            main,
        };
        for proc in symbols.procs.values() {
            self.check_block(&proc.body, &symbols)?;
        }
        for proc in symbols.associated.values() {
            self.check_block(&proc.body, &symbols)?;
        }
        Ok(symbols)
    }

    fn lookup(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    fn collect_structs<'ast>(
        &self,
        unit: &'ast TranslationUnit,
    ) -> Result<FxHashMap<Name, &'ast StructDecl>, ResolveError> {
        let mut structs = FxHashMap::default();
        for decl in &unit.structs {
            if let Some(first) = structs.insert(decl.name, decl) {
                return Err(ResolveError::DuplicateStruct {
                    name: self.lookup(decl.name),
                    span: decl.name_span,
                    first: first.name_span,
                });
            }
            let mut seen = FxHashMap::default();
            for field in &decl.fields {
                if seen.insert(field.name, field.name_span).is_some() {
                    return Err(ResolveError::DuplicateField {
                        struct_name: self.lookup(decl.name),
                        field: self.lookup(field.name),
                        span: field.name_span,
                    });
                }
            }
        }
        Ok(structs)
    }

    fn collect_procs<'ast>(
        &self,
        unit: &'ast TranslationUnit,
    ) -> Result<FxHashMap<Name, &'ast ProcDecl>, ResolveError> {
        let mut procs = FxHashMap::default();
        for proc in &unit.procs {
            self.check_params(proc)?;
            if let Some(first) = procs.insert(proc.name, proc) {
                return Err(ResolveError::DuplicateProc {
                    name: self.lookup(proc.name),
                    span: proc.name_span,
                    first: first.name_span,
                });
            }
        }
        Ok(procs)
    }

    fn collect_associated<'ast>(
        &self,
        unit: &'ast TranslationUnit,
        structs: &FxHashMap<Name, &'ast StructDecl>,
    ) -> Result<FxHashMap<(Name, Name), &'ast ProcDecl>, ResolveError> {
        let mut associated = FxHashMap::default();
        for block in &unit.impls {
            if !structs.contains_key(&block.type_name) {
                return Err(ResolveError::ImplUnknownType {
                    name: self.lookup(block.type_name),
                    span: block.type_span,
                });
            }
            for proc in &block.procs {
                self.check_params(proc)?;
                if let Some(first) = associated.insert((block.type_name, proc.name), proc) {
                    return Err(ResolveError::DuplicateAssociated {
                        type_name: self.lookup(block.type_name),
                        name: self.lookup(proc.name),
                        span: proc.name_span,
                        first: first.name_span,
                    });
                }
            }
        }
        Ok(associated)
    }

    fn check_params(&self, proc: &ProcDecl) -> Result<(), ResolveError> {
        let mut seen = FxHashMap::default();
        for param in &proc.params {
            if seen.insert(param.name, param.name_span).is_some() {
                return Err(ResolveError::DuplicateParam {
                    proc_name: self.lookup(proc.name),
                    param: self.lookup(param.name),
                    span: param.name_span,
                });
            }
        }
        Ok(())
    }

    fn check_proc_signature(
        &self,
        proc: &ProcDecl,
        structs: &FxHashMap<Name, &StructDecl>,
    ) -> Result<(), ResolveError> {
        for param in &proc.params {
            self.check_type(param.ty, structs)?;
        }
        if let Some(ret) = proc.return_type {
            self.check_type(ret, structs)?;
        }
        Ok(())
    }

    fn check_type(
        &self,
        ty: meta_ir::TypeRef,
        structs: &FxHashMap<Name, &StructDecl>,
    ) -> Result<(), ResolveError> {
        match ty.ty {
            Type::I32 | Type::Str => Ok(()),
            Type::Named(name) if structs.contains_key(&name) => Ok(()),
            Type::Named(name) => Err(ResolveError::UnknownType {
                name: self.lookup(name),
                span: ty.span,
            }),
        }
    }

    fn find_main<'ast>(
        &self,
        procs: &FxHashMap<Name, &'ast ProcDecl>,
    ) -> Result<&'ast ProcDecl, ResolveError> {
        let main_name = self.interner.intern("main");
        let main = procs
            .get(&main_name)
            .copied()
            .ok_or(ResolveError::MissingMain)?;
        if !main.params.is_empty() {
            return Err(ResolveError::MainHasParams {
                span: main.name_span,
            });
        }
        match main.return_type {
            None => Ok(main),
            Some(ret) if ret.ty == Type::I32 => Ok(main),
            Some(ret) => Err(ResolveError::MainBadReturn { span: ret.span }),
        }
    }

    fn check_block(&self, block: &Block, symbols: &Symbols<'_>) -> Result<(), ResolveError> {
        use meta_ir::StmtKind;
        for stmt in &block.stmts {
            match &stmt.kind {
                StmtKind::Let { ty, value, .. } => {
                    if let Some(ty) = ty {
                        self.check_type(*ty, &symbols.structs)?;
                    }
                    self.check_expr(value, symbols)?;
                }
                StmtKind::Assign { value, .. } => self.check_expr(value, symbols)?,
                StmtKind::Expr(expr) => self.check_expr(expr, symbols)?,
                StmtKind::If {
                    cond,
                    then_block,
                    else_block,
                } => {
                    self.check_expr(cond, symbols)?;
                    self.check_block(then_block, symbols)?;
                    if let Some(else_block) = else_block {
                        self.check_block(else_block, symbols)?;
                    }
                }
                StmtKind::While { cond, body } => {
                    self.check_expr(cond, symbols)?;
                    self.check_block(body, symbols)?;
                }
                StmtKind::ForRange {
                    start, end, body, ..
                } => {
                    self.check_expr(start, symbols)?;
                    self.check_expr(end, symbols)?;
                    self.check_block(body, symbols)?;
                }
                StmtKind::Return { value } => {
                    if let Some(value) = value {
                        self.check_expr(value, symbols)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn check_expr(&self, expr: &Expr, symbols: &Symbols<'_>) -> Result<(), ResolveError> {
        match &expr.kind {
            ExprKind::Int(_) | ExprKind::Str(_) | ExprKind::Var(_) => Ok(()),
            ExprKind::Field { base, .. } => self.check_expr(base, symbols),
            ExprKind::Binary { lhs, rhs, .. } => {
                self.check_expr(lhs, symbols)?;
                self.check_expr(rhs, symbols)
            }
            ExprKind::Call {
                callee,
                callee_span,
                args,
            } => {
                if !symbols.procs.contains_key(callee) {
                    return Err(ResolveError::UnknownFunction {
                        name: self.lookup(*callee),
                        span: *callee_span,
                    });
                }
                for arg in args {
                    self.check_expr(arg, symbols)?;
                }
                Ok(())
            }
            ExprKind::AssociatedCall {
                type_name,
                type_span,
                func,
                func_span,
                args,
            } => {
                if !symbols.structs.contains_key(type_name) {
                    return Err(ResolveError::UnknownType {
                        name: self.lookup(*type_name),
                        span: *type_span,
                    });
                }
                if !symbols.associated.contains_key(&(*type_name, *func)) {
                    return Err(ResolveError::UnknownAssociated {
                        type_name: self.lookup(*type_name),
                        name: self.lookup(*func),
                        span: type_span.merge(*func_span),
                    });
                }
                for arg in args {
                    self.check_expr(arg, symbols)?;
                }
                Ok(())
            }
            ExprKind::StructLiteral {
                type_name,
                type_span,
                fields,
            } => {
                let Some(decl) = symbols.struct_decl(*type_name) else {
                    return Err(ResolveError::LiteralUnknownType {
                        name: self.lookup(*type_name),
                        span: *type_span,
                    });
                };
                let mut seen = FxHashMap::default();
                for init in fields {
                    if decl.fields.iter().all(|f| f.name != init.name) {
                        return Err(ResolveError::ExtraField {
                            type_name: self.lookup(*type_name),
                            field: self.lookup(init.name),
                            span: init.name_span,
                        });
                    }
                    if seen.insert(init.name, ()).is_some() {
                        return Err(ResolveError::RepeatedField {
                            type_name: self.lookup(*type_name),
                            field: self.lookup(init.name),
                            span: init.name_span,
                        });
                    }
                    self.check_expr(&init.value, symbols)?;
                }
                for field in &decl.fields {
                    if !seen.contains_key(&field.name) {
                        return Err(ResolveError::MissingField {
                            type_name: self.lookup(*type_name),
                            field: self.lookup(field.name),
                            span: *type_span,
                        });
                    }
                }
                Ok(())
            }
        }
    }
}
