mod client;
mod client_utils;
mod errors;
mod forge_api;
mod line_framer;
mod session;
mod types;
mod types_ext;
mod update_stream;

pub use client::{ForgeClient, ForgeClientOptions, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use client_utils::error_detail;
pub use errors::*;
pub use forge_api::ForgeApi;
pub use line_framer::LineFramer;
pub use session::{SessionEvent, SessionState};
pub use types::*;
pub use types_ext::{
    DEFAULT_MAX_ITERATIONS, DEFAULT_THRESHOLD, MAX_ITERATIONS_RANGE, THRESHOLD_RANGE,
};
pub use update_stream::{decode_update_stream, parse_data_line, ForgeUpdateStream, DATA_PREFIX};
