mod app;
mod components;

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  tracing::info!(
    version = env!("CARGO_PKG_VERSION"),
    "starting Taskdeck frontend"
  );

  let root = mount_point()
    .expect("missing #app mount element");
  yew::Renderer::<app::App>::with_root(root)
    .render();
}

/// The `#app` element `index.html` ships.
fn mount_point() -> Option<web_sys::Element>
{
  web_sys::window()?
    .document()?
    .get_element_by_id("app")
}
