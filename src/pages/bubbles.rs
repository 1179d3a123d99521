use leptos::prelude::*;

use crate::components::bubble_chart::BubbleChartCanvas;
use crate::config::VizConfig;
use crate::fetch::load;
use crate::payload::BubblePayload;

/// Producers packed as bubbles, sized by how many songs they produced.
#[component]
pub fn Bubbles() -> impl IntoView {
	let config = use_context::<VizConfig>().unwrap_or_default();
	let bubbles = load::<BubblePayload>(
		config.endpoints.api_base.clone(),
		config.endpoints.producer_bubbles.clone(),
	);
	let layout = config.bubbles;

	view! {
		<div class="bubbles-page">
			<h1>"Producers"</h1>
			<Suspense fallback=|| view! { <p class="loading">"Loading producers..."</p> }>
				<ErrorBoundary fallback=|errors| {
					view! {
						<h2>"Could not draw the producer bubbles"</h2>
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
						let layout = layout.clone();
						bubbles
							.get()
							.map(|result| {
								result.map(|data| {
									view! {
										<BubbleChartCanvas
											data=Signal::derive(move || data.clone())
											config=layout
											container_id="bubble_container"
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
