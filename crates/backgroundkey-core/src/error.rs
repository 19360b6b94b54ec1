use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("current module is not available")]
    ModuleUnavailable,

    #[error("effect file not found in module data: {file}")]
    EffectNotFound { file: String },

    #[error("failed to compile effect {path}: {message}")]
    EffectLoad { path: String, message: String },
}

pub type Result<T> = std::result::Result<T, KeyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_effect() {
        let err = KeyError::EffectLoad {
            path: "/data/background_key_filter.effect".into(),
            message: "syntax error".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to compile effect /data/background_key_filter.effect: syntax error"
        );

        let err = KeyError::EffectNotFound {
            file: "background_key_filter.effect".into(),
        };
        assert_eq!(
            err.to_string(),
            "effect file not found in module data: background_key_filter.effect"
        );
    }
}
