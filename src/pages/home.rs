use leptos::prelude::*;

use crate::components::force_graph::ForceGraphCanvas;
use crate::config::VizConfig;
use crate::fetch::load;
use crate::payload::GraphPayload;

/// Network of producers and performers from `/data.json`.
#[component]
pub fn Home() -> impl IntoView {
	let config = use_context::<VizConfig>().unwrap_or_default();
	let graph = load::<GraphPayload>(
		config.endpoints.api_base.clone(),
		config.endpoints.network.clone(),
	);
	let network = config.network;

	view! {
		<div class="network-page">
			<h1>"Who works with whom"</h1>
			<p class="subtitle">"Drag nodes to pull the network around."</p>
			<Suspense fallback=|| view! { <p class="loading">"Loading network..."</p> }>
				<ErrorBoundary fallback=|errors| {
					view! {
						<h1>"Uh oh! Something went wrong!"</h1>

						<p>"Errors: "</p>
						<ul>
							{move || {
								errors
									.get()
									.into_iter()
									.map(|(_, e)| view! { <li>{e.to_string()}</li> })
									.collect_view()
							}}
						</ul>
					}
				}>
					{move || {
						let network = network.clone();
						graph
							.get()
							.map(|result| {
								result.map(|data| {
									view! {
										<ForceGraphCanvas
											data=Signal::derive(move || data.clone())
											config=network
											container_id="svg_container"
										/>
									}
								})
							})
					}}
				</ErrorBoundary>
			</Suspense>
		</div>
	}
}
