use std::io::{self, BufRead, Write};
use std::process;

use cashbook::{dispatch, Store};

fn main() {
    env_logger::init();
    if run().is_err() {
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let mut store = Store::with_demo_accounts();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }
        writeln!(stdout, "{}", dispatch(line, &mut store))?;
    }

    Ok(())
}
