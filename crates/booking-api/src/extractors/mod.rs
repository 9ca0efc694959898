//! Custom Axum extractors.

pub mod body;
pub mod confirmation;
pub mod owner;
pub mod path;

pub use body::{ApiJson, ApiQuery};
pub use confirmation::{CONFIRMATION_TOKEN_HEADER, ConfirmationCaller};
pub use owner::{OwnerId, USER_ID_HEADER};
pub use path::BookingPath;
