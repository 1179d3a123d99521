//! One-shot JSON fetches from the server endpoints.

use leptos::prelude::*;
use log::{debug, error, info};
use serde::de::DeserializeOwned;

use crate::error::{Result, VizError};
use crate::payload::Validate;

/// Joins an origin and an endpoint path with exactly one slash.
pub fn endpoint_url(base: &str, path: &str) -> String {
	format!(
		"{}/{}",
		base.trim_end_matches('/'),
		path.trim_start_matches('/')
	)
}

/// Origin of the current page, used when no `api_base` is configured.
fn page_origin() -> Result<String> {
	web_sys::window()
		.ok_or_else(|| VizError::MissingElement("window".into()))?
		.location()
		.origin()
		.map_err(|e| VizError::Network {
			endpoint: String::new(),
			message: format!("{:?}", e),
		})
}

/// Issues a single GET for `path`, decodes the body and validates it.
pub async fn fetch_json<T>(api_base: Option<String>, path: String) -> Result<T>
where
	T: DeserializeOwned + Validate,
{
	let base = match api_base {
		Some(base) => base,
		None => page_origin()?,
	};
	let url = endpoint_url(&base, &path);
	debug!("Fetching {}", url);

	let response = reqwest::get(&url).await.map_err(|e| {
		error!("Request to {} failed: {}", path, e);
		VizError::Network {
			endpoint: path.clone(),
			message: e.to_string(),
		}
	})?;

	let status = response.status();
	if !status.is_success() {
		error!("{} answered {}", path, status);
		return Err(VizError::Status {
			endpoint: path,
			status: status.as_u16(),
		});
	}

	let body = response.text().await.map_err(|e| VizError::Network {
		endpoint: path.clone(),
		message: e.to_string(),
	})?;
	let payload = decode::<T>(&path, &body)?;
	info!("Loaded {} ({} bytes)", path, body.len());
	Ok(payload)
}

/// Resource that fetches `path` once for the component that owns it. Reading
/// it inside `<Suspense>` shows the fallback while the request is in flight.
pub fn load<T>(api_base: Option<String>, path: String) -> LocalResource<Result<T>>
where
	T: DeserializeOwned + Validate + 'static,
{
	LocalResource::new(move || fetch_json::<T>(api_base.clone(), path.clone()))
}

/// Decoding and validation, split out of [`fetch_json`] for testing.
pub fn decode<T>(endpoint: &str, body: &str) -> Result<T>
where
	T: DeserializeOwned + Validate,
{
	let payload: T = serde_json::from_str(body).map_err(|e| VizError::Decode {
		endpoint: endpoint.to_string(),
		message: e.to_string(),
	})?;
	payload.validate().inspect_err(|e| error!("{}: {}", endpoint, e))?;
	Ok(payload)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::payload::GraphPayload;

	#[test]
	fn joins_without_doubling_slashes() {
		assert_eq!(
			endpoint_url("http://localhost:5000/", "/data.json"),
			"http://localhost:5000/data.json"
		);
		assert_eq!(
			endpoint_url("http://localhost:5000", "data.json"),
			"http://localhost:5000/data.json"
		);
	}

	#[test]
	fn decode_reports_malformed_bodies() {
		let err = decode::<GraphPayload>("/data.json", "{\"paths\": []}").unwrap_err();
		assert!(matches!(err, VizError::Decode { ref endpoint, .. } if endpoint == "/data.json"));

		let err = decode::<GraphPayload>("/data.json", "<html>").unwrap_err();
		assert!(matches!(err, VizError::Decode { .. }));
	}

	#[test]
	fn decode_runs_validation() {
		let body = r#"{"nodes": [{"name": "A"}], "paths": [{"source": "A", "target": "Z"}]}"#;
		let err = decode::<GraphPayload>("/data.json", body).unwrap_err();
		assert!(matches!(err, VizError::InvalidPayload(_)));

		let body = r#"{"nodes": [{"name": "A"}, {"name": "Z"}], "paths": [{"source": "A", "target": "Z"}]}"#;
		let payload = decode::<GraphPayload>("/data.json", body).unwrap();
		assert_eq!(payload.nodes.len(), 2);
	}
}
