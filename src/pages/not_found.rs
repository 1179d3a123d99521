use leptos::prelude::*;

/// 404 - Not Found
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<h1>"Nothing charted here"</h1>
		<a href="/">"Back to the network"</a>
	}
}
