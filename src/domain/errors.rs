#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    UnknownScreen(String),
    UnknownCommand(String),
    MissingArgument(&'static str),
    EmptyCommand,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::UnknownScreen(name) => {
                write!(f, "Unknown screen name: {}", name)
            }
            DomainError::UnknownCommand(command) => {
                write!(f, "Unknown command: {}", command)
            }
            DomainError::MissingArgument(argument) => {
                write!(f, "Missing argument: {}", argument)
            }
            DomainError::EmptyCommand => {
                write!(f, "Empty command")
            }
        }
    }
}

impl std::error::Error for DomainError {}

pub type DomainResult<T> = Result<T, DomainError>;
