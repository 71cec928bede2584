//! Configuration shared by the size calculator, encoder and decoder.

/// Nesting limit used when the caller does not pick one.
pub const DEFAULT_MAX_DEPTH: usize = 20;

/// How sequences with a declared terminator are laid out on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Terminators {
    /// The terminator never appears on the wire. Decoding an element equal to it fails.
    #[default]
    Reject,

    /// Legacy layout: a terminator element follows the payload and is validated on decode.
    ///
    /// Elements equal to the terminator are still rejected.
    Trailing,
}

/// Limits and layout options for a single encode or decode call.
///
/// # Examples
///
/// ```
/// use canon_codec::{Config, Terminators, DEFAULT_MAX_DEPTH};
///
/// let cfg = Config::default();
/// assert_eq!(cfg.max_depth, DEFAULT_MAX_DEPTH);
/// assert_eq!(cfg.terminators, Terminators::Reject);
///
/// let legacy = Config::new(8).legacy();
/// assert_eq!(legacy.max_depth, 8);
/// assert_eq!(legacy.terminators, Terminators::Trailing);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Config {
    /// Values nested this deep (or deeper) are rejected. The root sits at depth 0.
    pub max_depth: usize,

    /// Layout of terminated sequences.
    pub terminators: Terminators,
}

impl Config {
    /// Creates a configuration with the given depth limit and default layout.
    pub const fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            terminators: Terminators::Reject,
        }
    }

    /// Switches terminated sequences to the legacy trailing-terminator layout.
    pub const fn legacy(self) -> Self {
        Self {
            terminators: Terminators::Trailing,
            ..self
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl From<usize> for Config {
    fn from(max_depth: usize) -> Self {
        Self::new(max_depth)
    }
}
