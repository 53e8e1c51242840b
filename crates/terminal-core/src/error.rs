use thiserror::Error;

/// A command that failed. The message is what the user sees on the error line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Command not found: {0}. Type 'help' for available commands.")]
    NotFound(String),
    #[error("cd: {0}: No such file or directory")]
    NoSuchDirectory(String),
    #[error("cat: {0}: No such file or directory")]
    NoSuchFile(String),
    #[error("{0}: missing file operand")]
    MissingFileOperand(&'static str),
    #[error("{0}: missing operand")]
    MissingOperand(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            CommandError::NotFound("sl".into()).to_string(),
            "Command not found: sl. Type 'help' for available commands."
        );
        assert_eq!(
            CommandError::NoSuchDirectory("nope".into()).to_string(),
            "cd: nope: No such file or directory"
        );
        assert_eq!(
            CommandError::MissingFileOperand("touch").to_string(),
            "touch: missing file operand"
        );
        assert_eq!(CommandError::MissingOperand("rm").to_string(), "rm: missing operand");
    }
}
