// * HTTP side of the audit: identity headers and the image inspector

pub mod client;
pub mod errors;
pub mod identity;

pub use client::{measure_image, ImageClient, ImageDetails, ImageInspector};
pub use errors::{InspectionError, NetworkError};
pub use identity::IdentityProfile;
