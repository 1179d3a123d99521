//! Error type shared by the fetchers, payload validation and canvas setup.

use thiserror::Error;

/// Everything that can stop a visualization from being drawn.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VizError {
	/// The request never produced a response.
	#[error("Network error while fetching {endpoint}: {message}")]
	Network { endpoint: String, message: String },

	/// The server answered with a non-success status.
	#[error("Request to {endpoint} failed with status {status}")]
	Status { endpoint: String, status: u16 },

	/// The body was not the JSON shape the adapter expects.
	#[error("Could not decode {endpoint}: {message}")]
	Decode { endpoint: String, message: String },

	/// The JSON decoded but breaks a payload invariant.
	#[error("Invalid payload: {0}")]
	InvalidPayload(String),

	/// A required DOM element is not on the page.
	#[error("Missing DOM element #{0}")]
	MissingElement(String),

	/// The 2d drawing context could not be obtained.
	#[error("Canvas error: {0}")]
	Canvas(String),
}

/// Shorthand used across the crate.
pub type Result<T> = std::result::Result<T, VizError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_name_the_endpoint() {
		let err = VizError::Status {
			endpoint: "/data.json".into(),
			status: 500,
		};
		assert_eq!(err.to_string(), "Request to /data.json failed with status 500");

		let err = VizError::MissingElement("bubble_container".into());
		assert_eq!(err.to_string(), "Missing DOM element #bubble_container");
	}
}
