//! Error types for render configuration.  The numeric kernels never
//! fail; a zero derivative or a blown iteration budget is a value, not
//! an error, and gets its own rendering downstream.

/// Everything that can go wrong before any pixel is computed.
#[derive(Debug, Fail)]
pub enum FractalError {
    /// The requested pixel grid has no area.
    #[fail(display = "image dimensions must be positive, got {}x{}", width, height)]
    EmptyImage {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// A palette entry could not be parsed.
    #[fail(display = "unrecognized color {:?}, expected \"#RRGGBB\"", spec)]
    BadColorSpec {
        /// The offending entry, verbatim.
        spec: String,
    },
}
