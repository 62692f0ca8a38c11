/// orbview terminal viewer
///
/// Usage: orbview-terminal [MODEL_NAME | PATH.obj]
///
/// Controls:
///   - Mouse drag: Orbit the camera, scroll wheel / +,-: Zoom
///   - WASD / Arrow Keys: Rotate the model
///   - Q/E: Swing the light
///   - f/F: Narrow / widen the field of view
///   - Tab, 1-9: Switch model, Space: Auto-spin
///   - Esc: Quit

use std::env;
use std::fs;
use std::io;
use std::path::Path;
use orbview_core::ModelLibrary;
use orbview_terminal::TerminalApp;

fn main() -> io::Result<()> {
    env_logger::init();

    let mut library = ModelLibrary::builtin();
    let requested = env::args().nth(1);

    let start = match requested {
        Some(arg) if Path::new(&arg).extension().map_or(false, |ext| ext == "obj") => {
            Some(load_file(&mut library, &arg)?)
        }
        other => other,
    };

    println!("orbview - {} models loaded", library.len());
    println!("Starting terminal renderer (press Esc to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(library)?;
    if let Some(name) = start {
        app = app.with_model(&name)?;
    }
    app.run()?;

    println!("Thank you for using orbview!");
    Ok(())
}

/// Add an OBJ file to the library, returning the name it was stored under
fn load_file(library: &mut ModelLibrary, path: &str) -> io::Result<String> {
    let text = fs::read_to_string(path).map_err(|e| {
        io::Error::new(io::ErrorKind::NotFound, format!("Failed to read OBJ file: {}", e))
    })?;

    let name = Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());

    library
        .insert(name.clone(), &text)
        .map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("Failed to parse OBJ: {}", e))
        })?;
    log::info!("loaded {} from {}", name, path);
    Ok(name)
}
