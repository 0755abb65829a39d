use thiserror::Error;

/// Configuration errors detected before any pixel is rendered.
///
/// Scene parameters are authored by hand, so a malformed value is reported
/// instead of being clamped into something that silently renders.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    /// A gradient band has missing endpoints, too few stops or unordered offsets.
    #[error("invalid gradient `{band}`: {reason}")]
    Gradient { band: String, reason: String },

    /// A region or shape collapses to zero size (division by zero in interpolation).
    #[error("degenerate geometry: {0}")]
    Geometry(String),

    /// A color string that `css-color` could not parse.
    #[error("invalid color `{0}`")]
    Color(String),

    /// Any other scene parameter outside of its accepted range.
    #[error("invalid {field}: {reason}")]
    Parameter { field: String, reason: String },
}

impl SceneError {
    pub fn gradient(band: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Gradient {
            band: band.into(),
            reason: reason.into(),
        }
    }

    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    pub fn parameter(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parameter {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
