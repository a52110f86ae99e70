//! Host-side helper: `cargo run` builds the wasm package into `static/pkg`
//! and serves `static/` locally so the backdrop can be viewed in a browser.
//!
//! `BACKDROP_PORT` overrides the default port 8000.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::process::{Command, Stdio};
    use std::{env, thread, time::Duration};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("building wasm pkg");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            log::error!("wasm-pack finished with errors");
            std::process::exit(1);
        }
        Err(_) => {
            log::warn!(
                "wasm-pack not found in PATH (https://rustwasm.github.io/wasm-pack/); \
                 serving whatever is already in static/pkg"
            );
        }
    }

    let port = env::var("BACKDROP_PORT").unwrap_or_else(|_| "8000".to_owned());
    log::info!("serving static/ at http://127.0.0.1:{port}");
    let server = Command::new("python3")
        .args(["-m", "http.server", port.as_str(), "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    if let Err(err) = server {
        log::error!("failed to start http server: {err}");
        std::process::exit(1);
    }

    // Keep process alive
    loop {
        thread::sleep(Duration::from_secs(60));
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
