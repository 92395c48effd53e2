use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use rangecloud_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by the size, or `None` if it does not fit in a `usize`.
    #[inline]
    pub fn area(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Byte order of the 16-bit samples in a host buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ByteOrder {
    /// Least significant byte first (x86 and ARM host memory).
    #[default]
    LittleEndian,
    /// Most significant byte first (PNG and network order).
    BigEndian,
}

impl ByteOrder {
    #[inline]
    fn decode(&self, bytes: [u8; 2]) -> u16 {
        match self {
            ByteOrder::LittleEndian => u16::from_le_bytes(bytes),
            ByteOrder::BigEndian => u16::from_be_bytes(bytes),
        }
    }
}

/// A single channel 16-bit range image.
///
/// Each sample holds the raw depth measured by the sensor at that pixel. A sample
/// of `0` is the sensor's invalid-pixel sentinel and carries no measurement.
///
/// The samples are stored row-major: `data[y * width + x]`.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeImage {
    size: ImageSize,
    data: Vec<u16>,
}

impl RangeImage {
    /// Create a new range image from raw samples.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The raw depth samples in row-major order.
    ///
    /// # Errors
    ///
    /// If the image has no pixels, its pixel count overflows a `usize` or the length
    /// of the data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangecloud_image::{ImageSize, RangeImage};
    ///
    /// let image = RangeImage::new(
    ///     ImageSize {
    ///         width: 2,
    ///         height: 2,
    ///     },
    ///     vec![0, 100, 200, 0],
    /// ).unwrap();
    ///
    /// assert_eq!(image.width(), 2);
    /// assert_eq!(image.get(1, 0), Some(100));
    /// ```
    pub fn new(size: ImageSize, data: Vec<u16>) -> Result<Self, ImageError> {
        let area = checked_area(size)?;
        if data.len() != area {
            return Err(ImageError::InvalidDataLength(data.len(), area));
        }

        Ok(Self { size, data })
    }

    /// Create a new range image filled with the same sample.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `val` - The sample value for every pixel.
    pub fn from_size_val(size: ImageSize, val: u16) -> Result<Self, ImageError> {
        Self::new(size, vec![val; checked_area(size)?])
    }

    /// Create a range image by copying samples out of a pitched host buffer.
    ///
    /// Frame grabbers expose their buffers as a base address plus a row pitch that
    /// may be larger than the row itself. Only the first `2 * width` bytes of each
    /// row are read; the padding is skipped.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `pitch` - The distance in bytes between the start of two consecutive rows.
    /// * `bytes` - The host buffer.
    /// * `byte_order` - The byte order of the samples in the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidPitch`] if a row does not fit in the pitch or the
    /// pitched layout cannot be addressed, [`ImageError::InvalidDataLength`] if the
    /// buffer is too short and [`ImageError::SizeOverflow`] if the image itself is
    /// too large.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangecloud_image::{ByteOrder, ImageSize, RangeImage};
    ///
    /// // one row of two samples followed by two bytes of padding
    /// let bytes = [1u8, 0, 2, 0, 0xff, 0xff, 3, 0, 4, 0];
    /// let image = RangeImage::from_pitched_bytes(
    ///     ImageSize { width: 2, height: 2 },
    ///     6,
    ///     &bytes,
    ///     ByteOrder::LittleEndian,
    /// ).unwrap();
    ///
    /// assert_eq!(image.as_slice(), &[1, 2, 3, 4]);
    /// ```
    pub fn from_pitched_bytes(
        size: ImageSize,
        pitch: usize,
        bytes: &[u8],
        byte_order: ByteOrder,
    ) -> Result<Self, ImageError> {
        let area = checked_area(size)?;

        let row_bytes = size
            .width
            .checked_mul(std::mem::size_of::<u16>())
            .ok_or(ImageError::SizeOverflow(size.width, size.height))?;
        if pitch < row_bytes {
            return Err(ImageError::InvalidPitch(pitch, row_bytes));
        }

        // the last row does not need to carry its padding
        let required = pitch
            .checked_mul(size.height - 1)
            .and_then(|n| n.checked_add(row_bytes))
            .ok_or(ImageError::InvalidPitch(pitch, row_bytes))?;
        if bytes.len() < required {
            return Err(ImageError::InvalidDataLength(bytes.len(), required));
        }

        let mut data = Vec::with_capacity(area);
        for row in bytes.chunks(pitch).take(size.height) {
            data.extend(
                row[..row_bytes]
                    .chunks_exact(2)
                    .map(|b| byte_order.decode([b[0], b[1]])),
            );
        }

        Self::new(size, data)
    }

    /// Get the size of the image in pixels.
    #[inline]
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the image in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the raw samples in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[u16] {
        &self.data
    }

    /// Consume the image and return the raw samples.
    pub fn into_vec(self) -> Vec<u16> {
        self.data
    }

    /// Get the sample at the given pixel, or `None` if it is outside the image.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u16> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.data.get(y * self.size.width + x).copied()
    }

    /// Get the sample at the given pixel.
    ///
    /// # Arguments
    ///
    /// * `x` - The column of the pixel.
    /// * `y` - The row of the pixel.
    ///
    /// # Errors
    ///
    /// If the pixel is outside the image, an error is returned.
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<u16, ImageError> {
        self.get(x, y).ok_or(ImageError::PixelIndexOutOfBounds(
            x,
            y,
            self.size.width,
            self.size.height,
        ))
    }

    /// Iterate over the rows of the image, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u16]> {
        self.data.chunks_exact(self.size.width)
    }

    /// Count the samples holding a measurement, i.e. the non-zero ones.
    pub fn valid_count(&self) -> usize {
        self.data.iter().filter(|&&d| d != 0).count()
    }
}

// number of pixels of a non empty image whose size fits in memory
fn checked_area(size: ImageSize) -> Result<usize, ImageError> {
    match size.area() {
        Some(0) => Err(ImageError::ZeroSize(size.width, size.height)),
        Some(area) => Ok(area),
        None => Err(ImageError::SizeOverflow(size.width, size.height)),
    }
}
