// Locale document model
pub mod document;

// Domain-specific error types
pub mod errors;

// Fixed language set and selection rules
pub mod language;

// Port interfaces
pub mod ports;
