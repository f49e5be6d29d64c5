//! Write a file through an owned C stdio stream.
//!
//! Run with: cargo run --example fopen

#[cfg(unix)]
fn main() -> owned_handle::Result<()> {
    use owned_handle::ffi::crt;

    let path = std::env::temp_dir().join("owned_handle_hello.txt");
    let filename = path.to_string_lossy();

    // Own the stream straight after opening it.
    let file = crt::fopen(&filename, "w+b")?;

    let buffer = "Hello, world!\n";
    let written = unsafe { libc::fwrite(buffer.as_ptr().cast(), 1, buffer.len(), file.get()) };
    if written < buffer.len() {
        eprintln!("Unable to write to file: {}", filename);
        std::process::exit(1);
    }

    // `fclose` runs here; its return value is discarded.
    drop(file);

    println!("Wrote {} bytes to {}", written, filename);
    Ok(())
}

#[cfg(not(unix))]
fn main() {
    println!("This example needs a unix C runtime");
}
