// RustPixel
// copyright zipxing@hotmail.com 2022～2025

// cfg aliases for the rendering backends

fn main() {
    use cfg_aliases::cfg_aliases;

    cfg_aliases! {
        // Platform aliases
        wasm: { target_arch = "wasm32" },

        // Rendering backend aliases
        wgpu_backend: { all(feature = "wgpu", not(wasm)) },
        headless_backend: { not(wgpu_backend) },
    }
}
