use leptos::prelude::*;

use crate::components::chart::{ChartCanvas, ChartKind, ChartPayload};
use crate::config::{ChartConfig, VizConfig};
use crate::fetch::load;

/// Fetches one chart payload and draws it into the canvas `element_id`.
#[component]
fn FetchedChart(
	#[prop(into)] endpoint: String,
	api_base: Option<String>,
	kind: ChartKind,
	config: ChartConfig,
	#[prop(into)] element_id: String,
	#[prop(into)] title: String,
) -> impl IntoView {
	let payload = load::<ChartPayload>(api_base, endpoint);

	view! {
		<section class="chart">
			<h2>{title}</h2>
			<Suspense fallback=|| view! { <p class="loading">"Loading chart..."</p> }>
				<ErrorBoundary fallback=|errors| {
					view! {
						<ul class="errors">
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
						let (config, element_id) = (config.clone(), element_id.clone());
						payload
							.get()
							.map(|result| {
								result
									.and_then(|data| data.validate_for(kind).map(|_| data))
									.map(|data| {
										view! {
											<ChartCanvas
												data=Signal::derive(move || data.clone())
												kind=kind
												config=config
												element_id=element_id
											/>
										}
									})
							})
					}}
				</ErrorBoundary>
			</Suspense>
		</section>
	}
}

/// Which producers a performer works with most.
#[component]
pub fn PerformerCharts() -> impl IntoView {
	let config = use_context::<VizConfig>().unwrap_or_default();

	view! {
		<div class="charts-page">
			<FetchedChart
				endpoint=config.endpoints.performer_frequency.clone()
				api_base=config.endpoints.api_base.clone()
				kind=ChartKind::Doughnut
				config=config.charts.clone()
				element_id="performer_song_donutChart"
				title="Songs per producer"
			/>
		</div>
	}
}

/// Which performers a producer works with, and output per year.
#[component]
pub fn ProducerCharts() -> impl IntoView {
	let config = use_context::<VizConfig>().unwrap_or_default();

	view! {
		<div class="charts-page">
			<FetchedChart
				endpoint=config.endpoints.producer_frequency.clone()
				api_base=config.endpoints.api_base.clone()
				kind=ChartKind::Doughnut
				config=config.charts.clone()
				element_id="producer_song_donutChart"
				title="Songs per performer"
			/>
			<FetchedChart
				endpoint=config.endpoints.producer_productivity.clone()
				api_base=config.endpoints.api_base.clone()
				kind=ChartKind::Line
				config=config.charts.clone()
				element_id="producer_song_lineChart"
				title="Songs produced per year"
			/>
		</div>
	}
}
