//! Shared error type across tplguard crates.

use thiserror::Error;

/// Stable error codes surfaced to the hosting template subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// A method call was rejected by the active policy.
    MethodNotAllowed,
    /// A property read was rejected by the active policy.
    PropertyNotAllowed,
    /// Policy configuration is malformed.
    InvalidConfig,
    /// Policy file version is not understood.
    UnsupportedVersion,
    /// Policy file references a type the host never registered.
    UnknownType,
    /// Internal error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and render failure reports.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ClientCode::PropertyNotAllowed => "PROPERTY_NOT_ALLOWED",
            ClientCode::InvalidConfig => "INVALID_CONFIG",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::UnknownType => "UNKNOWN_TYPE",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, SandboxError>;

/// Unified error type used by core and policy crates.
///
/// Security variants carry the concrete runtime type name and the member name
/// exactly as the template requested it. They never carry object state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SandboxError {
    #[error("calling \"{method}\" method on a \"{type_name}\" object is blocked")]
    MethodNotAllowed { type_name: String, method: String },
    #[error("calling any method (\"{method}\" requested) on a \"{type_name}\" object is blocked")]
    TypeNotAllowed { type_name: String, method: String },
    #[error("reading \"{property}\" property on a \"{type_name}\" object is blocked")]
    PropertyNotAllowed { type_name: String, property: String },
    #[error("invalid policy config: {0}")]
    InvalidConfig(String),
    #[error("unsupported policy version")]
    UnsupportedVersion,
    #[error("unknown type in policy config: {0}")]
    UnknownType(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl SandboxError {
    /// Map internal error to a stable code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            SandboxError::MethodNotAllowed { .. } | SandboxError::TypeNotAllowed { .. } => {
                ClientCode::MethodNotAllowed
            }
            SandboxError::PropertyNotAllowed { .. } => ClientCode::PropertyNotAllowed,
            SandboxError::InvalidConfig(_) => ClientCode::InvalidConfig,
            SandboxError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            SandboxError::UnknownType(_) => ClientCode::UnknownType,
            SandboxError::Internal(_) => ClientCode::Internal,
        }
    }

    /// True for errors raised by a policy check (fatal to the render).
    pub fn is_security_violation(&self) -> bool {
        matches!(
            self.client_code(),
            ClientCode::MethodNotAllowed | ClientCode::PropertyNotAllowed
        )
    }

    /// Runtime type name of the rejected object, if this is a policy error.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            SandboxError::MethodNotAllowed { type_name, .. }
            | SandboxError::TypeNotAllowed { type_name, .. }
            | SandboxError::PropertyNotAllowed { type_name, .. } => Some(type_name),
            _ => None,
        }
    }

    /// Member name as requested by the template, if this is a policy error.
    pub fn member(&self) -> Option<&str> {
        match self {
            SandboxError::MethodNotAllowed { method, .. }
            | SandboxError::TypeNotAllowed { method, .. } => Some(method),
            SandboxError::PropertyNotAllowed { property, .. } => Some(property),
            _ => None,
        }
    }
}
