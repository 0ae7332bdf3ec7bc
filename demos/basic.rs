//! Standalone demo: opens a window with the color picker.

use floem::event::EventListener;
use floem::prelude::*;
use floem::window::WindowConfig;
use floem_triad::{triangle_picker, HsvColor};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let start = HsvColor::from_hex("3B82F6").unwrap();
    let color = RwSignal::new(start.to_argb());

    floem::Application::new()
        .window(
            move |_| {
                triangle_picker(color)
                    .on_event_stop(EventListener::WindowClosed, |_| floem::quit_app())
            },
            Some(
                WindowConfig::default()
                    .size((300.0, 420.0))
                    .title("floem-triad"),
            ),
        )
        .run();
}
