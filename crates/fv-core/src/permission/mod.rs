//! Permission acquisition - secures the broad filesystem-access grant needed
//! to read and write files outside the application's private sandbox.

mod machine;
mod state;

pub use machine::{
    ErrorCallback, StorageAccessMachine, SuccessCallback, ACCESS_CONSENT_REQUEST_CODE,
};
pub use state::PermissionState;
