use leptos::prelude::*;
use music_network_viz::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App);
}
