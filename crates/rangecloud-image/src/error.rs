/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the image has no pixels.
    #[error("Image size must be positive, got {0}x{1}")]
    ZeroSize(usize, usize),

    /// Error when the number of pixels or bytes of the image overflows a `usize`.
    #[error("Image size {0}x{1} is too large")]
    SizeOverflow(usize, usize),

    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when the row pitch cannot hold a full row.
    #[error("Row pitch ({0} bytes) is smaller than a row ({1} bytes)")]
    InvalidPitch(usize, usize),

    /// Error when the pixel coordinates are outside the image.
    #[error("Pixel ({0}, {1}) is out of bounds for image of size {2}x{3}")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),
}
