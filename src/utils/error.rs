use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file")]
    Parse {
        #[from]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}
