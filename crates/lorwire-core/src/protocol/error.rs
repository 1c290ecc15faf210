use thiserror::Error;

use crate::effect::EffectKind;

/// Errors returned by request configuration and batch encoding.
///
/// # Examples
/// ```
/// use lorwire_core::{EffectKind, LorError, Request};
///
/// let mut req = Request::new();
/// let err = req.set_effect(EffectKind::Fade, None).unwrap_err();
/// assert!(matches!(err, LorError::InvalidArgument { .. }));
/// assert!(err.to_string().contains("fade"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LorError {
    #[error("invalid arguments for {effect}: {reason}")]
    InvalidArgument {
        effect: EffectKind,
        reason: &'static str,
    },
    #[error("insufficient capacity: need {required} bytes, have {capacity}")]
    InsufficientCapacity { required: usize, capacity: usize },
}
