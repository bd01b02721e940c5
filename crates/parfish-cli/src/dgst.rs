//! Checksum command: SHA-256 over a file's word buffer.

use crate::buffer;

pub fn run(file: &str) -> Result<(), Box<dyn std::error::Error>> {
    let words = buffer::read_words(file)?;
    let hex = buffer::checksum(&words);
    if file == "-" {
        println!("SHA256(stdin)= {hex}");
    } else {
        println!("SHA256({file})= {hex}");
    }
    Ok(())
}
