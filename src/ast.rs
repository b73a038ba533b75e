use std::fmt;

/// A parsed expression tree.
///
/// Leaves are variable references; interior nodes apply a named operator to
/// an ordered argument list. Arity is whatever the registered operator
/// accepts and is checked at evaluation time, not here.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Expr {
    Variable(String),
    Operation { op: String, args: Vec<Expr> },
}

impl Expr {
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    pub fn operation(op: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Operation {
            op: op.into(),
            args,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Variable(name) => f.write_str(name),
            Expr::Operation { op, args } => {
                write!(f, "{op}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}
