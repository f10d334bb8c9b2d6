pub fn run(host: &str, port: u16, algorithm: &str) {
    let algorithm = super::parse_algorithm(algorithm);

    println!("🔬 digestscope server v{}", digestscope_core::VERSION);
    println!("   Listening on http://{host}:{port}");
    println!("   Default algorithm: {}", algorithm.display_name());
    println!();
    println!("   Endpoints:");
    println!("     GET  /                   API index");
    println!("     GET  /health             Health check");
    println!("     GET  /api/v1/algorithms  Supported algorithms");
    println!("     POST /api/v1/inspect     Hash one text and inspect the digest");
    println!("     POST /api/v1/compare     Hash two texts and compare the digests");
    println!("     POST /api/v1/analyze     Compare two precomputed digests");
    println!();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => super::fail(format!("failed to start async runtime: {e}")),
    };
    if let Err(e) = rt.block_on(digestscope_server::run_server(host, port, algorithm)) {
        super::fail(format!("server stopped: {e}"));
    }
}
