//! S-expression rendering of the AST.
//!
//! Used by `rotate --ast` and by tests to compare tree shapes as text:
//!
//! ```text
//! add :: fn(a: int, b: int) int { ret a + b }
//! (fn add (params (a int) (b int)) int (block (ret (+ a b))))
//! ```
//!
//! One line per top-level declaration. Identifiers and literals are printed with their source spelling.

use rotate_core::lang::types;

use crate::ast::*;
use crate::lexer::Token;

/// Render every declaration of `program`, one per line.
pub fn render_program(source: &str, program: &Program) -> String {
    program
        .declarations
        .iter()
        .map(|decl| render_declaration(source, &decl.node))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_declaration(source: &str, decl: &Declaration) -> String {
    let mut printer = Printer::new(source);
    printer.declaration(decl);
    printer.out
}

struct Printer<'a> {
    source: &'a str,
    out: String,
}

impl<'a> Printer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            out: String::new(),
        }
    }

    fn text(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn token(&mut self, token: Token) {
        self.out.push_str(token.lexeme(self.source));
    }

    fn open(&mut self, head: &str) {
        self.out.push('(');
        self.out.push_str(head);
    }

    fn close(&mut self) {
        self.out.push(')');
    }

    fn space(&mut self) {
        self.out.push(' ');
    }

    // ------------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------------

    fn declaration(&mut self, decl: &Declaration) {
        match decl {
            Declaration::Import(import) => {
                self.open("import");
                if let Some(alias) = import.alias {
                    self.space();
                    self.token(alias);
                }
                self.space();
                self.token(import.module_path);
                self.close();
            }
            Declaration::Function(func) => {
                self.open("fn ");
                self.token(func.name);
                self.text(" (params");
                for param in &func.params {
                    self.space();
                    self.binding(param);
                }
                self.close();
                if let Some(ret) = &func.return_type {
                    self.space();
                    self.ty(&ret.node);
                }
                self.space();
                self.block(&func.body.node);
                self.close();
            }
            Declaration::Variable(var) => {
                self.open(if var.is_constant { "const " } else { "var " });
                self.token(var.name);
                if let Some(ty) = &var.ty {
                    self.space();
                    self.ty(&ty.node);
                }
                if let Some(init) = &var.initializer {
                    self.space();
                    self.expr(&init.node, init.token);
                }
                self.close();
            }
            Declaration::Struct(def) => {
                self.open("struct ");
                self.token(def.name);
                for field in &def.fields {
                    self.space();
                    self.binding(field);
                }
                self.close();
            }
            Declaration::Enum(def) => {
                self.open("enum ");
                self.token(def.name);
                for member in &def.members {
                    self.space();
                    self.token(member.name);
                }
                self.close();
            }
        }
    }

    /// `(name type?)` for parameters and fields.
    fn binding(&mut self, var: &VariableDecl) {
        self.open("");
        self.token(var.name);
        if let Some(ty) = &var.ty {
            self.space();
            self.ty(&ty.node);
        }
        self.close();
    }

    // ------------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------------

    fn block(&mut self, block: &Block) {
        self.open("block");
        for stmt in &block.statements {
            self.space();
            self.statement(&stmt.node);
        }
        self.close();
    }

    fn statement(&mut self, stmt: &Statement) {
        if let Some((var, range)) = stmt.as_range_loop() {
            self.open("for-in ");
            self.token(var.name);
            self.space();
            self.expr(&range.node, range.token);
            if let Statement::For { body, .. } = stmt {
                self.space();
                self.statement(&body.node);
            }
            self.close();
            return;
        }

        match stmt {
            Statement::Expr(expr) => self.expr(&expr.node, expr.token),
            Statement::Decl(decl) => self.declaration(&decl.node),
            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.open("if ");
                self.expr(&condition.node, condition.token);
                self.space();
                self.statement(&then_branch.node);
                if let Some(else_branch) = else_branch {
                    self.space();
                    self.statement(&else_branch.node);
                }
                self.close();
            }
            Statement::While { condition, body } => {
                self.open("while ");
                self.expr(&condition.node, condition.token);
                self.space();
                self.statement(&body.node);
                self.close();
            }
            Statement::For {
                init,
                condition,
                update,
                body,
            } => {
                self.open("for");
                self.space();
                match init {
                    Some(init) => self.statement(&init.node),
                    None => self.text("_"),
                }
                self.space();
                match condition {
                    Some(condition) => self.expr(&condition.node, condition.token),
                    None => self.text("_"),
                }
                self.space();
                match update {
                    Some(update) => self.statement(&update.node),
                    None => self.text("_"),
                }
                self.space();
                self.statement(&body.node);
                self.close();
            }
            Statement::Return(value) => {
                self.open("ret");
                if let Some(value) = value {
                    self.space();
                    self.expr(&value.node, value.token);
                }
                self.close();
            }
            Statement::Defer(inner) => {
                self.open("defer ");
                self.statement(&inner.node);
                self.close();
            }
            Statement::Block(block) => self.block(block),
        }
    }

    // ------------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------------

    fn expr(&mut self, expr: &Expr, token: Token) {
        match expr {
            Expr::Literal(_) | Expr::Identifier => self.token(token),
            Expr::Binary { left, op, right } => {
                self.open(op.as_str());
                self.space();
                self.expr(&left.node, left.token);
                self.space();
                self.expr(&right.node, right.token);
                self.close();
            }
            Expr::Unary { op, operand } => {
                self.open(op.as_str());
                self.space();
                self.expr(&operand.node, operand.token);
                self.close();
            }
            Expr::Call { callee, args } => {
                self.open("call ");
                self.expr(&callee.node, callee.token);
                for arg in args {
                    self.space();
                    self.expr(&arg.node, arg.token);
                }
                self.close();
            }
            Expr::Member { object, member } => {
                self.open(". ");
                self.expr(&object.node, object.token);
                self.space();
                self.token(*member);
                self.close();
            }
            Expr::Assign { target, op, value } => {
                self.open(op.as_str());
                self.space();
                self.expr(&target.node, target.token);
                self.space();
                self.expr(&value.node, value.token);
                self.close();
            }
        }
    }

    // ------------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------------

    fn ty(&mut self, ty: &Type) {
        match ty {
            Type::Basic(BasicType::Primitive(id)) => self.text(types::as_str(*id)),
            Type::Basic(BasicType::Named(name)) => self.token(*name),
            Type::Array { element, size } => {
                self.open("array ");
                self.ty(&element.node);
                if let Some(size) = size {
                    self.space();
                    self.expr(&size.node, size.token);
                }
                self.close();
            }
            Type::Function { params, return_type } => {
                self.open("fn-type (");
                for (idx, param) in params.iter().enumerate() {
                    if idx > 0 {
                        self.space();
                    }
                    self.ty(&param.node);
                }
                self.close();
                if let Some(ret) = return_type {
                    self.space();
                    self.ty(&ret.node);
                }
                self.close();
            }
        }
    }
}
