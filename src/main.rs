// Only the wasm frontend drives these modules; native builds exist for `cargo test`.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod carousel;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod config;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod content;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod pointer;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod reveal;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod rotation;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod router;

#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This project is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
