pub mod client;
pub mod error;
pub mod mock;
pub mod sanitize;
pub mod throttle;
pub mod transport;

pub use client::{CountryFetch, CountryInput, FetchClient};
pub use error::FetchError;
pub use sanitize::sanitize_input;
pub use throttle::ThrottleGate;
pub use transport::{ApiRequest, HttpTransport, Transport};
