pub type AlphaResult<T> = Result<T, AlphaError>;

#[derive(thiserror::Error, Debug)]
pub enum AlphaError {
    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    #[error("operator '{name}' failed: {source}")]
    OperatorFailed {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("shape mismatch in expression '{0}'")]
    ShapeMismatch(String),

    #[error("no variables provided")]
    NoVariables,

    #[error("no expressions provided")]
    NoExpressions,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AlphaError {
    pub fn syntax(msg: impl Into<String>) -> Self {
        Self::Syntax(msg.into())
    }

    pub fn operator_failed(name: impl Into<String>, source: anyhow::Error) -> Self {
        Self::OperatorFailed {
            name: name.into(),
            source,
        }
    }
}
