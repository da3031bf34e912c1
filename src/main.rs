mod console;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use log::*;

use console::Console;

fn main() -> Result<()> {
    std::env::set_var("RUST_LOG", "info");
    pretty_env_logger::init();

    println!("memfit: interactive memory placement demo (try 'help')");
    let mut console = Console::new();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();

        if !line.is_empty() {
            match console.execute(line) {
                Some(reply) => println!("{reply}"),
                None => break,
            }
        }

        write!(stdout, "> ")?;
        stdout.flush()?;
    }

    info!("Session closed.");
    Ok(())
}
