mod error;
mod form;
mod relay;
mod submission;
mod transport;
mod types;

pub use error::*;
pub use form::*;
pub use relay::*;
pub use submission::*;
pub use transport::*;
pub use types::*;
