//! Typed client for the external todo REST API.
//!
//! The backend is an external collaborator exposing JSON CRUD endpoints;
//! this module owns request plumbing and response decoding so pages only
//! deal in [`Todo`] values and [`TodoApiError`].

use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

/// Base URL of the todo backend.
const API_BASE_URL: &str = "http://localhost:8080/api/todos";

/// A todo item as returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
	/// Server-assigned id.
	pub id: i64,
	/// Short summary line.
	pub title: String,
	/// Optional longer description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Completion flag, toggled via the dedicated endpoint.
	pub completed: bool,
	/// Creation timestamp (ISO 8601), set by the server.
	#[serde(default)]
	pub created_at: Option<String>,
	/// Last-update timestamp (ISO 8601), if the todo was ever edited.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub updated_at: Option<String>,
}

/// Payload for creating a new todo.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
	/// Short summary line.
	pub title: String,
	/// Optional longer description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Initial completion flag.
	pub completed: bool,
}

/// Failures talking to the todo backend.
#[derive(Debug, thiserror::Error)]
pub enum TodoApiError {
	/// The request never produced a response (offline, CORS, DNS, ...).
	#[error("network error: {0}")]
	Network(String),
	/// The server answered with a non-success status.
	#[error("server responded with status {0}")]
	Status(u16),
	/// The response body was not the JSON shape we expect.
	#[error("malformed response body: {0}")]
	Decode(#[from] serde_json::Error),
}

fn js_error(value: JsValue) -> TodoApiError {
	TodoApiError::Network(format!("{value:?}"))
}

/// Issue a request and return the raw response body.
async fn request(method: &str, url: &str, body: Option<String>) -> Result<String, TodoApiError> {
	let opts = RequestInit::new();
	opts.set_method(method);
	if let Some(body) = body {
		opts.set_body(&JsValue::from_str(&body));
	}
	let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
	request
		.headers()
		.set("Content-Type", "application/json")
		.map_err(js_error)?;

	let window = web_sys::window().ok_or_else(|| TodoApiError::Network("no window".into()))?;
	let response = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(js_error)?;
	let response: Response = response.dyn_into().map_err(js_error)?;
	if !response.ok() {
		return Err(TodoApiError::Status(response.status()));
	}
	let text = JsFuture::from(response.text().map_err(js_error)?)
		.await
		.map_err(js_error)?;
	Ok(text.as_string().unwrap_or_default())
}

/// Fetch all todos.
pub async fn list() -> Result<Vec<Todo>, TodoApiError> {
	let body = request("GET", API_BASE_URL, None).await?;
	Ok(serde_json::from_str(&body)?)
}

/// Fetch a single todo.
pub async fn get(id: i64) -> Result<Todo, TodoApiError> {
	let body = request("GET", &format!("{API_BASE_URL}/{id}"), None).await?;
	Ok(serde_json::from_str(&body)?)
}

/// Create a todo and return the server's version of it.
pub async fn create(todo: &NewTodo) -> Result<Todo, TodoApiError> {
	let payload = serde_json::to_string(todo)?;
	let body = request("POST", API_BASE_URL, Some(payload)).await?;
	Ok(serde_json::from_str(&body)?)
}

/// Replace a todo.
pub async fn update(id: i64, todo: &Todo) -> Result<Todo, TodoApiError> {
	let payload = serde_json::to_string(todo)?;
	let body = request("PUT", &format!("{API_BASE_URL}/{id}"), Some(payload)).await?;
	Ok(serde_json::from_str(&body)?)
}

/// Flip a todo's completed flag.
pub async fn toggle(id: i64) -> Result<Todo, TodoApiError> {
	let body = request("PATCH", &format!("{API_BASE_URL}/{id}/toggle"), None).await?;
	Ok(serde_json::from_str(&body)?)
}

/// Delete a todo.
pub async fn delete(id: i64) -> Result<(), TodoApiError> {
	request("DELETE", &format!("{API_BASE_URL}/{id}"), None).await?;
	Ok(())
}

/// Fetch todos filtered by completion status on the server.
pub async fn by_status(completed: bool) -> Result<Vec<Todo>, TodoApiError> {
	let body = request("GET", &format!("{API_BASE_URL}/status/{completed}"), None).await?;
	Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
	use super::{NewTodo, Todo};

	#[test]
	fn decodes_camel_case_payloads() {
		let json = r#"{
			"id": 3,
			"title": "write docs",
			"completed": false,
			"createdAt": "2024-05-01T10:00:00"
		}"#;
		let todo: Todo = serde_json::from_str(json).unwrap();
		assert_eq!(todo.id, 3);
		assert_eq!(todo.title, "write docs");
		assert_eq!(todo.description, None);
		assert_eq!(todo.created_at.as_deref(), Some("2024-05-01T10:00:00"));
		assert_eq!(todo.updated_at, None);
	}

	#[test]
	fn serializes_new_todos_without_null_fields() {
		let json = serde_json::to_string(&NewTodo {
			title: "ship it".into(),
			description: None,
			completed: false,
		})
		.unwrap();
		assert_eq!(json, r#"{"title":"ship it","completed":false}"#);
	}

	#[test]
	fn round_trips_descriptions() {
		let todo = Todo {
			id: 1,
			title: "t".into(),
			description: Some("details".into()),
			completed: true,
			created_at: Some("2024-05-01T10:00:00".into()),
			updated_at: Some("2024-05-02T09:30:00".into()),
		};
		let json = serde_json::to_string(&todo).unwrap();
		assert!(json.contains(r#""createdAt":"2024-05-01T10:00:00""#));
		let back: Todo = serde_json::from_str(&json).unwrap();
		assert_eq!(back, todo);
	}
}
