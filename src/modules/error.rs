use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("unknown module type '{name}'")]
    UnknownType { name: String },

    #[error("invalid properties for module type '{type_name}': {reason}")]
    InvalidProperties {
        type_name: &'static str,
        reason: String,
    },
}
