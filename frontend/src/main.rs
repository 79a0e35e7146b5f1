//! Entry point for the WASM application

pub fn main() {
    hpt_frontend::start();
}
