#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use rangecloud_image as image;

#[doc(inline)]
pub use rangecloud_io as io;

#[doc(inline)]
pub use rangecloud_3d as k3d;
