//! Console error types

use crate::config::StoreError;

/// Console error, reported to the operator as a one-line notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// No command matches the typed line
    UnknownCommand,
    /// `set name=value` with a name that matches no variable
    UnknownVariable,
    /// Writing the configuration failed
    Store(StoreError),
}

impl ConsoleError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "E01",
            Self::UnknownVariable => "E02",
            Self::Store(_) => "E03",
        }
    }

    /// Get error message, including its severity prefix
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "ERR: Unknown command, try 'help'",
            Self::UnknownVariable => "ERR: Unknown variable name",
            Self::Store(StoreError::Timeout) => "ERROR: timeout while writing EEPROM",
            Self::Store(StoreError::NotAcknowledged) => "ERROR: EEPROM is faulty or missing",
            Self::Store(StoreError::Fault) => "ERROR: EEPROM is faulty",
            Self::Store(StoreError::Failed) => "FAIL: unable to write EEPROM",
        }
    }
}

impl From<StoreError> for ConsoleError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl core::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct_per_kind() {
        assert_eq!(ConsoleError::UnknownCommand.code(), "E01");
        assert_eq!(ConsoleError::UnknownVariable.code(), "E02");
        assert_eq!(ConsoleError::from(StoreError::Timeout).code(), "E03");
        assert_eq!(ConsoleError::from(StoreError::Failed).code(), "E03");
    }

    #[test]
    fn test_display_is_operator_message() {
        let e = ConsoleError::from(StoreError::Fault);
        assert_eq!(e.to_string(), "ERROR: EEPROM is faulty");
    }
}
