cfg_if::cfg_if! {
    if #[cfg(feature = "csr")] {
        use blog::App;

        fn main() {
            _ = console_log::init_with_level(log::Level::Debug);
            console_error_panic_hook::set_once();

            log::info!("Mounting blog");
            leptos::mount_to_body(App);
        }
    } else {
        fn main() {
            // The app only runs in the browser: build with `trunk serve --features csr`.
        }
    }
}
