/// Example: Parse an OBJ file and report what the viewer would upload
///
/// Usage: cargo run --example load_obj -- path/to/file.obj

use std::env;
use std::fs;
use std::io;
use orbview_core::{frame_uniforms, parse_obj, ViewerControls, ViewerSettings};

fn main() -> io::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let text = match args.get(1) {
        Some(path) => {
            println!("Loading OBJ file: {}", path);
            fs::read_to_string(path).map_err(|e| {
                io::Error::new(io::ErrorKind::NotFound, format!("Failed to read OBJ file: {}", e))
            })?
        }
        None => {
            eprintln!("Usage: {} <obj-file>", args[0]);
            eprintln!("\nNo OBJ file provided, using the built-in cube...");
            orbview_core::assets::BUILTIN_MODELS[0].1.to_string()
        }
    };

    let mesh = parse_obj(&text).map_err(|e| {
        io::Error::new(io::ErrorKind::InvalidData, format!("Failed to parse OBJ: {}", e))
    })?;

    println!("Vertices:  {}", mesh.vertex_count());
    println!("Triangles: {}", mesh.triangle_count());
    println!("Normals:   {}", if mesh.has_normals() { "per vertex" } else { "partial or none" });
    println!("Texcoords: {}", if mesh.has_texcoords() { "per vertex" } else { "partial or none" });

    let state = ViewerControls::new().snapshot(&ViewerSettings::default(), 16.0 / 9.0);
    let uniforms = frame_uniforms(&state);
    println!("World-view-projection (column-major):");
    for column in uniforms.world_view_projection.chunks(4) {
        println!(
            "  {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
            column[0], column[1], column[2], column[3]
        );
    }
    Ok(())
}
