use super::Value;
use indexmap::IndexSet;
use itertools::Itertools;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Negate,
    Plus,
    Not,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Not => "!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Power,

    // Comparison
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,

    // Equality
    Equal,
    NotEqual,
    StrictEqual,
    StrictNotEqual,

    // Logical, short-circuiting
    And,
    Or,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Remainder => "%",
            BinaryOp::Power => "**",
            BinaryOp::Less => "<",
            BinaryOp::LessOrEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterOrEqual => ">=",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::StrictEqual => "===",
            BinaryOp::StrictNotEqual => "!==",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    /// Binding strength; higher binds tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOp::Or => 2,
            BinaryOp::And => 3,
            BinaryOp::Equal
            | BinaryOp::NotEqual
            | BinaryOp::StrictEqual
            | BinaryOp::StrictNotEqual => 4,
            BinaryOp::Less
            | BinaryOp::LessOrEqual
            | BinaryOp::Greater
            | BinaryOp::GreaterOrEqual => 5,
            BinaryOp::Add | BinaryOp::Subtract => 6,
            BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Remainder => 7,
            BinaryOp::Power => 8,
        }
    }
}

/// Abstract syntax tree of a parsed expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    // Leaf nodes
    Literal(Value),
    Symbol(String),

    Array(Vec<Expression>),
    Unary(UnaryOp, Box<Expression>),
    Binary(BinaryOp, Box<Expression>, Box<Expression>),
    Conditional {
        condition: Box<Expression>,
        then_branch: Box<Expression>,
        else_branch: Box<Expression>,
    },
    /// Call of a named helper. Only the aggregate helpers are callable.
    Call {
        callee: String,
        args: Vec<Expression>,
    },
    Member {
        object: Box<Expression>,
        property: String,
    },
    Index {
        object: Box<Expression>,
        index: Box<Expression>,
    },
}

impl Expression {
    /// Collects every symbol the expression reads, in first-use order.
    /// Helper names in call position are not symbols and are skipped.
    pub fn collect_symbols(&self, symbols: &mut IndexSet<String>) {
        match self {
            Expression::Symbol(name) => {
                symbols.insert(name.clone());
            }
            Expression::Array(items) | Expression::Call { args: items, .. } => {
                for item in items {
                    item.collect_symbols(symbols);
                }
            }
            Expression::Unary(_, v) | Expression::Member { object: v, .. } => {
                v.collect_symbols(symbols);
            }
            Expression::Binary(_, l, r)
            | Expression::Index {
                object: l,
                index: r,
            } => {
                l.collect_symbols(symbols);
                r.collect_symbols(symbols);
            }
            Expression::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                condition.collect_symbols(symbols);
                then_branch.collect_symbols(symbols);
                else_branch.collect_symbols(symbols);
            }
            Expression::Literal(_) => {}
        }
    }

    pub fn free_symbols(&self) -> IndexSet<String> {
        let mut symbols = IndexSet::new();
        self.collect_symbols(&mut symbols);
        symbols
    }

    fn precedence(&self) -> u8 {
        match self {
            Expression::Conditional { .. } => 1,
            Expression::Binary(op, _, _) => op.precedence(),
            Expression::Unary(_, _) => 9,
            _ => 10,
        }
    }

    /// Formats the expression, adding parentheses only where precedence requires them.
    fn fmt_with_parent(&self, f: &mut fmt::Formatter<'_>, parent_precedence: u8) -> fmt::Result {
        let current = self.precedence();
        let needs_parens = current < parent_precedence;
        if needs_parens {
            write!(f, "(")?;
        }

        match self {
            Expression::Literal(Value::String(s)) => write!(f, "{:?}", s)?,
            Expression::Literal(v) => write!(f, "{}", v)?,
            Expression::Symbol(name) => write!(f, "{}", name)?,
            Expression::Array(items) => write!(f, "[{}]", items.iter().join(", "))?,
            Expression::Unary(op, v) => {
                write!(f, "{}", op.symbol())?;
                v.fmt_with_parent(f, current)?;
            }
            Expression::Binary(op, l, r) => {
                // Right-associative power binds the right side at the same level.
                let (left_min, right_min) = if *op == BinaryOp::Power {
                    (current + 1, current)
                } else {
                    (current, current + 1)
                };
                l.fmt_with_parent(f, left_min)?;
                write!(f, " {} ", op.symbol())?;
                r.fmt_with_parent(f, right_min)?;
            }
            Expression::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                condition.fmt_with_parent(f, current + 1)?;
                write!(f, " ? ")?;
                then_branch.fmt_with_parent(f, current)?;
                write!(f, " : ")?;
                else_branch.fmt_with_parent(f, current)?;
            }
            Expression::Call { callee, args } => {
                write!(f, "{}({})", callee, args.iter().join(", "))?
            }
            Expression::Member { object, property } => {
                object.fmt_with_parent(f, current)?;
                write!(f, ".{}", property)?;
            }
            Expression::Index { object, index } => {
                object.fmt_with_parent(f, current)?;
                write!(f, "[{}]", index)?;
            }
        }

        if needs_parens {
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with_parent(f, 0)
    }
}
