//! Open dispatch - hands a local file to an external handler and correlates
//! the host's asynchronous results back to the logical caller.

mod dispatcher;
mod events;
mod request;

pub use dispatcher::{
    decode_request_code, request_code, OpenDispatcher, OpenFailure, REQUEST_CODE_OFFSET,
};
pub use events::{ViewerEvent, DISMISS_EVENT, OPEN_EVENT};
pub use request::{OpenOptions, OpenRequest};
