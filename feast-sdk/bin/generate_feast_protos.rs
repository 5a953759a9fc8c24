use std::env;
use std::fs;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Generating Feast wire types...");

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let out_dir = manifest_dir.join("src/proto/generated");
    let proto_folder = manifest_dir.join("proto");

    let proto_files = [
        proto_folder.join("feast/types/Value.proto"),
        proto_folder.join("feast/core/CoreService.proto"),
        proto_folder.join("feast/serving/ServingService.proto"),
    ];

    if !out_dir.exists() {
        fs::create_dir_all(&out_dir)?;
    }

    // Stubs are hand-written in `transport.rs` on top of the unary gRPC client,
    // so only the messages are generated.
    tonic_prost_build::configure()
        .build_server(false)
        .build_client(false)
        .out_dir(&out_dir)
        .compile_protos(&proto_files, &[proto_folder])?;

    println!("Done! Generated files are in src/proto/generated");

    Ok(())
}
