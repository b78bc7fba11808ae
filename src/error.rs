use thiserror::Error;

pub type ComponentResult<T> = Result<T, ComponentError>;

#[derive(Debug, Error)]
pub enum ComponentError {
    #[error("component class not found: main_type={main_type}, sub_type={}", .sub_type.as_deref().unwrap_or("*"))]
    NotFound {
        main_type: String,
        sub_type: Option<String>,
    },

    #[error("cannot determine sub type of `{main_type}` among {candidates:?}")]
    AmbiguousSubtype {
        main_type: String,
        candidates: Vec<String>,
    },

    #[error("circular dependency detected at `{main_type}`")]
    CyclicDependency { main_type: String },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
