//! Configuration errors raised while attaching an overlay.

/// Fatal configuration problems detected at overlay attachment.
///
/// Attachment validates eagerly and returns before touching the document,
/// so a failed attach never leaves a partially-initialized overlay behind.
/// The one non-fatal condition — an open-trigger selector matching nothing —
/// is logged as a warning instead, since an overlay may be opened purely by
/// program call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The overlay element has no `id` attribute.
    #[error("overlay `{name}` must have an id")]
    MissingId { name: String },

    /// The configuration carries an empty name.
    #[error("overlay must have a non-empty name")]
    MissingName,

    /// The background selector matched no element.
    #[error("overlay `{name}`: background selector `{selector}` matched no element")]
    MissingBackground { name: String, selector: String },

    /// The close-trigger selector matched no elements. An overlay without a
    /// close trigger could never be dismissed from the UI once opened.
    #[error("overlay `{name}`: close-trigger selector `{selector}` matched no elements")]
    NoCloseTriggers { name: String, selector: String },
}
