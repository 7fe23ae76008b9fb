//! Error handling and reporting for this backend

use thiserror::Error;
use x11rb::errors::ConnectError;
use x11rb::rust_connection::{ConnectionError, ReplyError};

pub(crate) type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub(crate) enum Error {
    #[error("Unable to connect to the X server: {0}")]
    Connect(#[from] ConnectError),
    #[error("Unable to watch the X connection: {0}")]
    Watch(#[from] std::io::Error),
    #[error("The window manager does not publish `{0}`, is an EWMH compliant one running?")]
    MissingHint(&'static str),

    // Errors from x11rb
    #[error("Connection error occured: {0}")]
    ConnectionError(#[from] ConnectionError),

    #[error("Unable to parse reply: {0}")]
    ReplyError(#[from] ReplyError),
}
