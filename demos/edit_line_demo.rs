//! Line Editor Demo
//!
//! Exercises the interactive line editor on its own, without the
//! scaffolding workflow: one required prompt (Esc aborts) and one optional
//! prompt (Esc just skips it).

use std::io;

use mkproj::abort;
use mkproj::input::edit_line;

fn main() -> io::Result<()> {
    abort::install_signal_handlers();

    println!("mkproj line editor demo");
    println!("=======================");
    println!();

    let (name, _) = edit_line("Your name: ", "anonymous", true)?;
    println!("hello, {}", name);

    let (color, cancelled) = edit_line("Favorite color (Esc to skip): ", "", false)?;
    if cancelled {
        println!("no color, then.");
    } else {
        println!("{} it is.", color);
    }

    Ok(())
}
