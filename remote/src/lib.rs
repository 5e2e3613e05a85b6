pub mod cli;
pub mod controller;
pub mod errors;
pub mod form;
pub mod media;
pub mod request;
pub mod terminal;

pub use controller::{PlaybackController, PlaybackState, PlaybackView};
pub use errors::{RemoteError, RequestError};
pub use form::{add_media_source, FormView};
pub use media::{MediaSource, MediaType};
pub use request::{AwcRequester, Header, Requester};
