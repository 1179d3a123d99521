//! Leptos client-side app wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod components;
mod config;
mod error;
mod fetch;
mod pages;
mod payload;

use crate::config::VizConfig;

// Top-Level pages
use crate::pages::bubbles::Bubbles;
use crate::pages::charts::{PerformerCharts, ProducerCharts};
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Router over the four visualizations, with a 404 fallback.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();
	provide_context(VizConfig::default());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Music Industry Network" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<nav class="top-nav">
				<A href="/">"Network"</A>
				<A href="/bubbles">"Producers"</A>
				<A href="/performer">"Performer charts"</A>
				<A href="/producer">"Producer charts"</A>
			</nav>
			<main>
				<Routes fallback=|| view! { <NotFound /> }>
					<Route path=path!("/") view=Home />
					<Route path=path!("/bubbles") view=Bubbles />
					<Route path=path!("/performer") view=PerformerCharts />
					<Route path=path!("/producer") view=ProducerCharts />
				</Routes>
			</main>
		</Router>
	}
}
