//! Text protocol errors.

/// Errors that can occur while reading or parsing driver commands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A command was given fewer arguments than it needs.
    #[error("{command}: missing {what}")]
    MissingArgument {
        /// The command being parsed.
        command: &'static str,
        /// Description of the missing argument.
        what: &'static str,
    },

    /// A token could not be read as a cell name like `e4`.
    #[error("invalid cell: {value}")]
    InvalidCell {
        /// The token that failed to parse.
        value: String,
    },

    /// A promotion token was not one of `q`, `r`, `b` or `n`.
    #[error("invalid promotion piece: {value}")]
    InvalidPromotion {
        /// The token that failed to parse.
        value: String,
    },

    /// `set` named an option that does not exist.
    #[error("unknown option: {name}")]
    UnknownOption {
        /// The option name given.
        name: String,
    },

    /// `set` gave a value the option does not accept.
    #[error("invalid value for {name}: {value}")]
    InvalidOptionValue {
        /// The option being set.
        name: String,
        /// The rejected value.
        value: String,
    },

    /// An I/O error occurred while reading input or writing output.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
