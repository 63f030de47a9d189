//! Abstract Syntax Tree definitions for Rotate
//!
//! Four node families (declarations, statements, expressions, types) as closed enums. Every node is wrapped in a
//! [`Node`] that carries the token it originated from, so later stages can report positions without a side table.
//!
//! Children are owned through `Box` / `Vec`; dropping a [`Program`] releases the whole tree.

use rotate_core::lang::types::PrimitiveId;

use crate::lexer::Token;

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A node plus the token that introduced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<T> {
    pub node: T,
    pub token: Token,
}

impl<T> Node<T> {
    pub fn new(node: T, token: Token) -> Self {
        Self { node, token }
    }

    /// Span of the originating token.
    pub fn span(&self) -> Span {
        self.token.span
    }
}

/// A program is a sequence of declarations
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub declarations: Vec<Node<Declaration>>,
}

// ============================================================================
// Declarations
// ============================================================================

/// Top-level (and block-scoped) declarations
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Import(ImportDecl),
    Function(FunctionDecl),
    Variable(VariableDecl),
    Struct(StructDecl),
    Enum(EnumDecl),
}

/// `alias :: import "path"`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub alias: Option<Token>,
    /// The string literal token, quotes included.
    pub module_path: Token,
}

/// `name :: fn(params) ret { body }` or `fn name(params) ret { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: Token,
    pub params: Vec<VariableDecl>,
    pub return_type: Option<Node<Type>>,
    pub body: Node<Block>,
}

/// A binding. Also used for parameters, struct fields, enum members, and `for .. in` loop variables.
///
/// ## Notes
/// - `initializer` is `None` only for parameters, fields, members, and the synthesized loop variable.
/// - `is_constant` is set by the `::` form.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub name: Token,
    pub ty: Option<Node<Type>>,
    pub initializer: Option<Node<Expr>>,
    pub is_constant: bool,
}

impl VariableDecl {
    /// A name-only binding (enum member, loop variable).
    pub fn bare(name: Token) -> Self {
        Self {
            name,
            ty: None,
            initializer: None,
            is_constant: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    pub name: Token,
    pub fields: Vec<VariableDecl>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub name: Token,
    pub members: Vec<VariableDecl>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Node<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expr(Node<Expr>),
    Decl(Box<Node<Declaration>>),
    If {
        condition: Node<Expr>,
        then_branch: Box<Node<Statement>>,
        else_branch: Option<Box<Node<Statement>>>,
    },
    While {
        condition: Node<Expr>,
        body: Box<Node<Statement>>,
    },
    /// Both loop forms.
    ///
    /// `for i in range` is stored as `init = Decl(i)`, `condition = range`, `update = None`.
    For {
        init: Option<Box<Node<Statement>>>,
        condition: Option<Node<Expr>>,
        update: Option<Box<Node<Statement>>>,
        body: Box<Node<Statement>>,
    },
    Return(Option<Node<Expr>>),
    Defer(Box<Node<Statement>>),
    Block(Block),
}

impl Statement {
    /// Loop variable and range of a `for .. in` loop, if this is one.
    pub fn as_range_loop(&self) -> Option<(&VariableDecl, &Node<Expr>)> {
        let Statement::For {
            init: Some(init),
            condition: Some(range),
            update: None,
            ..
        } = self
        else {
            return None;
        };
        let Statement::Decl(decl) = &init.node else {
            return None;
        };
        match &decl.node {
            Declaration::Variable(var) if var.initializer.is_none() => Some((var, range)),
            _ => None,
        }
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// The literal's token is the node token; its value is resolved from the source on demand.
    Literal(LiteralKind),
    Identifier,
    Binary {
        left: Box<Node<Expr>>,
        op: BinaryOp,
        right: Box<Node<Expr>>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Node<Expr>>,
    },
    Call {
        callee: Box<Node<Expr>>,
        args: Vec<Node<Expr>>,
    },
    Member {
        object: Box<Node<Expr>>,
        member: Token,
    },
    Assign {
        target: Box<Node<Expr>>,
        op: AssignOp,
        value: Box<Node<Expr>>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Int,
    Float,
    String,
    Char,
    True,
    False,
    Nil,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
    Range,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Range => "..",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Neg,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    /// `:=`
    Declare,
    /// `::`
    Constant,
}

impl AssignOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
            AssignOp::Declare => ":=",
            AssignOp::Constant => "::",
        }
    }

    /// `:=` and `::` introduce a name and only accept an identifier target.
    pub fn is_binding(&self) -> bool {
        matches!(self, AssignOp::Declare | AssignOp::Constant)
    }
}

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Basic(BasicType),
    /// `[size]elem`; no size means an unbounded array.
    Array {
        element: Box<Node<Type>>,
        size: Option<Node<Expr>>,
    },
    /// `fn(params) ret`
    Function {
        params: Vec<Node<Type>>,
        return_type: Option<Box<Node<Type>>>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicType {
    Primitive(PrimitiveId),
    /// A user-defined name, resolved by a later stage.
    Named(Token),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_len() {
        let a = Span::new(2, 5);
        assert_eq!(a.len(), 3);
        assert!(Span::new(7, 7).is_empty());
    }

    #[test]
    fn binding_ops() {
        assert!(AssignOp::Declare.is_binding());
        assert!(AssignOp::Constant.is_binding());
        assert!(!AssignOp::AddAssign.is_binding());
        assert_eq!(AssignOp::Constant.as_str(), "::");
    }
}
